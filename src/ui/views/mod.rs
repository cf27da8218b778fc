pub mod favorites;
pub mod home;
pub mod prayers;
pub mod rituals;
pub mod schedule;
