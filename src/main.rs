#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use broadside::{init_logging, run_interactive, MatchCoordinator, MatchStatus};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play against the automated opponent in the terminal.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Let the automated players fight it out and print the result.
    Auto {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Print a JSON summary instead of the final boards")]
        json: bool,
    },
}

#[cfg(feature = "std")]
fn pick_seed(seed: Option<u64>) -> u64 {
    match seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            s
        }
        None => rand::random(),
    }
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { seed } => {
            let coordinator = MatchCoordinator::new(pick_seed(seed));
            coordinator.place_ships_randomly()?;
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            run_interactive(&coordinator, stdin.lock(), &mut stdout)?;
        }
        Commands::Auto { seed, json } => {
            let seed = if json {
                seed.unwrap_or_else(rand::random)
            } else {
                pick_seed(seed)
            };
            let mut coordinator = MatchCoordinator::new(seed);
            coordinator.place_ships_randomly()?;
            let status = coordinator.play_automated()?;
            if json {
                println!("{}", serde_json::to_string(&coordinator.summary())?);
            } else {
                println!("{}", coordinator.render());
                match status {
                    MatchStatus::Finished { winner, .. } => println!("{} wins!", winner),
                    MatchStatus::InProgress => println!("No winner."),
                }
            }
        }
    }
    Ok(())
}
