//! CLI frontend for the Sundown brawling engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sundown",
    about = "Sundown: bare-knuckle brawls resolved with a d6",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine decisions to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a brawl until someone is knocked out
    Brawl {
        /// Player character JSON file (default: a built-in fighter)
        #[arg(long)]
        player: Option<PathBuf>,

        /// Opponent character JSON file (default: a built-in fighter)
        #[arg(long)]
        opponent: Option<PathBuf>,

        /// RNG seed for reproducible fights
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Open each round with a grapple instead of a punch
        #[arg(short, long)]
        grapple: bool,

        /// Let the opponent open each round
        #[arg(long)]
        opponent_first: bool,

        /// Stop after this many rounds even without a knockout
        #[arg(short, long, default_value = "20")]
        max_rounds: u32,

        /// Pause between the two attacks of a round, in milliseconds
        #[arg(long, default_value = "0")]
        delay_ms: u64,

        /// Chance (0.0-1.0) that the answering side punches
        #[arg(long)]
        punch_chance: Option<f64>,

        /// Print the result and final character records as JSON
        #[arg(long)]
        json: bool,

        /// Write the round log to a file (markdown for .md, plain text otherwise)
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Roll a dice expression such as 2d6+1
    Roll {
        /// Dice expression (XdY, dY, XdY+Z, XdY-Z)
        expr: String,

        /// Roll twice and keep the higher total
        #[arg(long, conflicts_with = "disadvantage")]
        advantage: bool,

        /// Roll twice and keep the lower total
        #[arg(long)]
        disadvantage: bool,

        /// RNG seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Print the outcome tables
    Table {
        /// Table to print: punching or grappling (default: both)
        name: Option<String>,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Brawl {
            player,
            opponent,
            seed,
            grapple,
            opponent_first,
            max_rounds,
            delay_ms,
            punch_chance,
            json,
            export,
        } => {
            let opts = commands::brawl::BrawlOptions {
                player,
                opponent,
                seed,
                grapple,
                opponent_first,
                max_rounds,
                delay_ms,
                punch_chance,
                json,
                export,
            };
            commands::brawl::run(opts).await
        }
        Commands::Roll {
            expr,
            advantage,
            disadvantage,
            seed,
        } => commands::roll::run(&expr, advantage, disadvantage, seed),
        Commands::Table { name } => commands::table::run(name.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
