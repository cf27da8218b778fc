//! The `:` command palette and its autocomplete ranking.

#[derive(Debug, Clone)]
pub struct Command {
  pub name: &'static str,
  pub aliases: &'static [&'static str],
  pub description: &'static str,
}

pub const COMMANDS: &[Command] = &[
  Command {
    name: "home",
    aliases: &["h"],
    description: "Today at a glance",
  },
  Command {
    name: "prayers",
    aliases: &["p", "prayer"],
    description: "Browse the prayer catalog",
  },
  Command {
    name: "rituals",
    aliases: &["r", "ritual"],
    description: "Browse rituals and their steps",
  },
  Command {
    name: "schedule",
    aliases: &["s", "puja"],
    description: "Daily puja timeline",
  },
  Command {
    name: "favorites",
    aliases: &["f", "fav"],
    description: "Bookmarked prayers and rituals",
  },
  Command {
    name: "quit",
    aliases: &["q", "exit"],
    description: "Exit bhakti",
  },
];

/// Rank a command against typed input: exact or alias hit beats a prefix,
/// a prefix beats a substring. `None` means no match at all.
fn rank(cmd: &Command, input: &str) -> Option<u8> {
  if cmd.name == input || cmd.aliases.contains(&input) {
    Some(0)
  } else if cmd.name.starts_with(input) || cmd.aliases.iter().any(|a| a.starts_with(input)) {
    Some(1)
  } else if cmd.name.contains(input) {
    Some(2)
  } else {
    None
  }
}

/// Autocomplete suggestions for the palette, best match first. Empty input
/// lists every command.
pub fn get_suggestions(input: &str) -> Vec<&'static Command> {
  let needle = input.to_lowercase();
  if needle.is_empty() {
    return COMMANDS.iter().collect();
  }

  let mut ranked: Vec<(u8, &Command)> = COMMANDS
    .iter()
    .filter_map(|cmd| rank(cmd, &needle).map(|r| (r, cmd)))
    .collect();
  ranked.sort_by_key(|(r, _)| *r);
  ranked.into_iter().map(|(_, cmd)| cmd).collect()
}
