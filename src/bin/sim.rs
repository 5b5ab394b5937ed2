use broadside::{init_logging, MatchCoordinator};

fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <seed>", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;

    let mut coordinator = MatchCoordinator::new(seed);
    coordinator.place_ships_randomly()?;
    coordinator.play_automated()?;

    println!("{}", serde_json::to_string(&coordinator.summary())?);
    Ok(())
}
