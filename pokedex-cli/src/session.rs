//! Interactive session state and command handlers.

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use colored::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use pokedex_api::{Fetched, PokeApiClient};
use pokedex_cache::ExpiringCache;
use pokedex_core::error::PokedexError;
use pokedex_core::types::{LocationAreasPage, Pokemon};

use crate::commands::Command;
use crate::input::clean_input;

/// What the REPL should do after a line has been handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// State carried across REPL lines.
pub struct Session {
    client: PokeApiClient,
    cache: Option<Arc<ExpiringCache>>,
    next_location_url: Option<String>,
    previous_location_url: Option<String>,
    caught: BTreeMap<String, Pokemon>,
    rng: StdRng,
}

impl Session {
    /// Creates a session. `cache` should be the same cache the client uses;
    /// it is only read here for the `cache` command.
    pub fn new(client: PokeApiClient, cache: Option<Arc<ExpiringCache>>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            client,
            cache,
            next_location_url: None,
            previous_location_url: None,
            caught: BTreeMap::new(),
            rng,
        }
    }

    /// Handles one line of input.
    ///
    /// Command failures are printed and the session continues; only write
    /// failures on `out` are returned as errors.
    pub async fn dispatch<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let words = clean_input(line);
        let Some((name, args)) = words.split_first() else {
            return Ok(Flow::Continue);
        };

        let Some(command) = Command::from_name(name) else {
            writeln!(out, "Unknown command")?;
            return Ok(Flow::Continue);
        };

        debug!(command = command.name(), ?args, "Dispatching command");
        match self.run(command, args, out).await {
            Ok(flow) => Ok(flow),
            Err(err) => match err.downcast::<PokedexError>() {
                Ok(err) => {
                    writeln!(out, "{} {}", "Error:".red(), err)?;
                    Ok(Flow::Continue)
                }
                Err(io) => Err(io),
            },
        }
    }

    async fn run<W: Write>(&mut self, command: Command, args: &[String], out: &mut W) -> Result<Flow> {
        match command {
            Command::Help => self.help(out)?,
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Flow::Exit);
            }
            Command::Map => self.map(out).await?,
            Command::Mapb => self.mapb(out).await?,
            Command::Explore => {
                let area = required(command, args, "location area name")?;
                self.explore(area, out).await?;
            }
            Command::Catch => {
                let name = required(command, args, "Pokemon name")?;
                self.catch(name, out).await?;
            }
            Command::Inspect => {
                let name = required(command, args, "Pokemon name")?;
                self.inspect(name, out)?;
            }
            Command::Pokedex => self.pokedex(out)?,
            Command::Cache => self.cache_stats(out)?,
        }
        Ok(Flow::Continue)
    }

    fn help<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", "Welcome to the Pokedex!".cyan().bold())?;
        writeln!(out, "Usage:")?;
        writeln!(out)?;
        for command in Command::ALL {
            writeln!(out, "{}: {}", command.name(), command.description())?;
        }
        writeln!(out)?;
        Ok(())
    }

    async fn map<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let page_url = self.next_location_url.clone();
        self.show_page(page_url.as_deref(), out).await
    }

    async fn mapb<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let Some(page_url) = self.previous_location_url.clone() else {
            writeln!(out, "you're on the first page")?;
            return Ok(());
        };
        self.show_page(Some(&page_url), out).await
    }

    async fn show_page<W: Write>(&mut self, page_url: Option<&str>, out: &mut W) -> Result<()> {
        let fetched = self.client.location_areas(page_url).await?;
        report_source(&fetched, None, out)?;

        let LocationAreasPage {
            next,
            previous,
            results,
            ..
        } = fetched.value;
        self.next_location_url = next;
        self.previous_location_url = previous;

        for area in results {
            writeln!(out, "{}", area.name)?;
        }
        Ok(())
    }

    async fn explore<W: Write>(&mut self, area: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Exploring {}...", area)?;
        let fetched = self.client.location_area(area).await?;
        report_source(&fetched, Some(area), out)?;

        writeln!(out, "{}", "Found Pokemon:".yellow())?;
        if fetched.value.pokemon_encounters.is_empty() {
            writeln!(out, "No Pokemon found in this area.")?;
        } else {
            for name in fetched.value.pokemon_names() {
                writeln!(out, " - {}", name)?;
            }
        }
        Ok(())
    }

    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Throwing a Pokeball at {}...", name)?;
        let fetched = self.client.pokemon(name).await?;
        report_source(&fetched, Some(name), out)?;

        let pokemon = fetched.value;
        let chance = pokemon.catch_chance();
        let roll: u32 = self.rng.gen_range(1..=100);
        debug!(pokemon = name, chance, roll, "Catch attempt");

        if is_caught(roll, chance) {
            writeln!(out, "{}", format!("{} was caught!", name).green().bold())?;
            self.caught.insert(name.to_string(), pokemon);
            writeln!(out, "You may now inspect it with the inspect command.")?;
        } else {
            writeln!(out, "{}", format!("{} escaped!", name).red())?;
        }
        Ok(())
    }

    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> Result<()> {
        let Some(pokemon) = self.caught.get(name) else {
            writeln!(out, "you have not caught that pokemon")?;
            return Ok(());
        };

        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(out, "  -{}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for slot in &pokemon.types {
            writeln!(out, "  - {}", slot.kind.name)?;
        }
        Ok(())
    }

    fn pokedex<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "{}", "Your Pokedex:".cyan())?;
        if self.caught.is_empty() {
            writeln!(out, "You haven't caught any Pokemon yet!")?;
            return Ok(());
        }
        for name in self.caught.keys() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    fn cache_stats<W: Write>(&self, out: &mut W) -> Result<()> {
        let Some(cache) = &self.cache else {
            writeln!(out, "Response cache is disabled")?;
            return Ok(());
        };

        let stats = cache.stats();
        writeln!(
            out,
            "Cache entries: {} ({} live, {} awaiting sweep)",
            stats.total_entries, stats.valid_entries, stats.expired_entries
        )?;
        writeln!(
            out,
            "TTL: {:?}, sweep interval: {:?}",
            stats.ttl,
            cache.sweep_interval()
        )?;
        Ok(())
    }
}

/// A roll in 1..=100 catches when it does not exceed the chance percentage.
fn is_caught(roll: u32, chance: u32) -> bool {
    roll <= chance
}

fn required<'a>(command: Command, args: &'a [String], argument: &str) -> Result<&'a str> {
    args.first()
        .map(String::as_str)
        .ok_or_else(|| PokedexError::missing_argument(command.name(), argument).into())
}

fn report_source<T, W: Write>(fetched: &Fetched<T>, subject: Option<&str>, out: &mut W) -> Result<()> {
    let line = match (fetched.from_cache, subject) {
        (true, Some(s)) => format!("Cache hit! Using cached data for {}.", s),
        (true, None) => "Cache hit! Using cached data.".to_string(),
        (false, Some(s)) => format!("Cache miss! Making HTTP request for {}.", s),
        (false, None) => "Cache miss! Making HTTP request.".to_string(),
    };
    writeln!(out, "{}", line.dimmed())?;
    Ok(())
}
