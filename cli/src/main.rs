use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dicecup_engine::{Dice, DiceRoller, FileStore, RollerConfig};

mod config;
mod logging;
mod output;
mod session;

use output::{render_page, render_theme, Format};

#[derive(Subcommand)]
enum Cmd {
    /// Roll a number of six-sided dice and show the faces with statistics
    Roll {
        /// How many dice to roll (1 up to the configured maximum)
        #[arg(allow_hyphen_values = true)]
        count: String,
        /// RNG seed for determinism
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the last stored roll with its statistics
    Last,
    /// Forget the stored roll
    Reset,
    /// Show the light/dark preference, or toggle it
    Theme {
        #[command(subcommand)]
        action: Option<ThemeCmd>,
    },
    /// Interactive session: one dice count per line, or `reset`, `theme`, `quit`
    Play {
        /// RNG seed for determinism
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Subcommand)]
enum ThemeCmd {
    /// Print the current preference
    Show,
    /// Switch between dark and light and remember the choice
    Toggle,
}

#[derive(Parser)]
#[command(name = "dicecup")]
#[command(about = "Roll a handful of six-sided dice; remembers the last roll and your theme")]
struct Cli {
    /// Key-value store file holding the last roll and theme
    #[arg(long, env = "DICECUP_STORE", default_value = ".dicecup/store.json", global = true)]
    store: PathBuf,
    /// YAML file overriding `max_dice` / `roll_delay_ms`
    #[arg(long, env = "DICECUP_CONFIG", global = true)]
    config: Option<PathBuf>,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,
    /// More log output on stderr (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

fn open_roller(
    store: &Path,
    config: RollerConfig,
    seed: Option<u64>,
) -> anyhow::Result<DiceRoller<FileStore>> {
    let store = FileStore::open(store)
        .with_context(|| format!("failed to open store: {}", store.display()))?;
    let dice = seed.map(Dice::from_seed).unwrap_or_else(Dice::from_entropy);
    Ok(DiceRoller::new(config, dice, store))
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logging(&logging::LogConfig::from_verbosity(cli.verbose, cli.quiet))?;
    let config = config::load_config(cli.config.as_deref())?;

    match cli.cmd {
        Cmd::Roll { count, seed } => {
            let mut roller = open_roller(&cli.store, config, seed)?;
            let mut stdout = io::stdout().lock();
            if !session::roll_and_show(&mut roller, &count, &mut stdout, cli.format)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Cmd::Last => {
            let roller = open_roller(&cli.store, config, None)?;
            if roller.current_roll().is_none() && cli.format == Format::Text {
                println!("No previous roll stored.");
            } else {
                println!("{}", render_page(roller.page(), cli.format)?);
            }
        }
        Cmd::Reset => {
            let mut roller = open_roller(&cli.store, config, None)?;
            roller.reset()?;
            println!("{}", render_page(roller.page(), cli.format)?);
        }
        Cmd::Theme { action } => {
            let mut roller = open_roller(&cli.store, config, None)?;
            if let Some(ThemeCmd::Toggle) = action {
                roller.toggle_theme()?;
            }
            println!("{}", render_theme(roller.page(), cli.format)?);
        }
        Cmd::Play { seed } => {
            let mut roller = open_roller(&cli.store, config, seed)?;
            session::play(&mut roller, io::stdin().lock(), io::stdout().lock(), cli.format)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
