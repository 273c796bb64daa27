//! Command registry.

/// Every command the REPL understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    Mapb,
    Explore,
    Catch,
    Inspect,
    Pokedex,
    Cache,
}

impl Command {
    /// All commands, in the order `help` lists them.
    pub const ALL: [Command; 9] = [
        Command::Help,
        Command::Exit,
        Command::Map,
        Command::Mapb,
        Command::Explore,
        Command::Catch,
        Command::Inspect,
        Command::Pokedex,
        Command::Cache,
    ];

    /// Looks a command up by the word the user typed.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Exit => "exit",
            Command::Map => "map",
            Command::Mapb => "mapb",
            Command::Explore => "explore",
            Command::Catch => "catch",
            Command::Inspect => "inspect",
            Command::Pokedex => "pokedex",
            Command::Cache => "cache",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::Help => "Displays a help message",
            Command::Exit => "Exit the Pokedex",
            Command::Map => "Displays the names of 20 location areas in the Pokemon world",
            Command::Mapb => "Displays the previous 20 locations",
            Command::Explore => "Explore a location area to see Pokemon. Usage: explore <area_name>",
            Command::Catch => "Attempt to catch a Pokemon. Usage: catch <pokemon_name>",
            Command::Inspect => "View details of a caught Pokemon. Usage: inspect <pokemon_name>",
            Command::Pokedex => "View all caught Pokemon",
            Command::Cache => "Show response cache statistics",
        }
    }
}
