//! Quantum Treasure Hunt
//!
//! Pick a level, read the clue, guess the hidden 4-bit PIN. Grover's search
//! then reveals which PIN the quantum computer amplified.

use std::path::PathBuf;

use clap::Parser;
use console::style;

use qhunt_adapter_sim::SimulatorBackend;
use qhunt_demos::amplitudes::grover_snapshots;
use qhunt_demos::levels::{self, find_level};
use qhunt_demos::runners::HuntRunner;
use qhunt_demos::{
    create_spinner, init_logging, print_counts, print_header, print_info, print_result,
    print_section, print_snapshot, print_success, print_warning,
};
use qhunt_hal::{BackendConfig, BackendFactory};

#[derive(Parser, Debug)]
#[command(name = "demo-hunt")]
#[command(about = "Quantum Treasure Hunt: guess the PIN Grover amplifies")]
struct Args {
    /// Your 4-bit guess, e.g. 0110 (omit to list the levels)
    guess: Option<String>,

    /// Level to play
    #[arg(short, long, default_value_t = 1)]
    level: u32,

    /// Level file (defaults to the bundled levels)
    #[arg(long, env = "QHUNT_LEVELS")]
    levels: Option<PathBuf>,

    /// Number of measurement shots
    #[arg(short, long, env = "QHUNT_SHOTS", default_value_t = 1024)]
    shots: u32,

    /// Seed for the hidden PIN and for sampling
    #[arg(long, env = "QHUNT_SEED")]
    seed: Option<u64>,

    /// Show amplitude evolution (for the quantum nerds)
    #[arg(long)]
    show_amplitudes: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let all_levels = match &args.levels {
        Some(path) => levels::load_levels(path)?,
        None => levels::bundled_levels()?,
    };

    let Some(guess) = args.guess.as_deref() else {
        print_header("Quantum Treasure Hunt");
        for level in &all_levels {
            print_result(&format!("Level {}", level.level), &level.clue);
        }
        println!();
        print_info("Run again with a guess, e.g. `demo-hunt --level 1 0110`.");
        return Ok(());
    };

    let level = find_level(&all_levels, args.level)?;

    let mut config = BackendConfig::new("simulator");
    if let Some(seed) = args.seed {
        config = config.with_extra("seed", seed.into());
    }
    let mut runner = HuntRunner::new(SimulatorBackend::from_config(config)?).with_shots(args.shots);
    if let Some(seed) = args.seed {
        runner = runner.with_seed(seed);
    }

    if args.json {
        let outcome = runner.play_level(level, guess).await?;
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    print_header("Quantum Treasure Hunt");
    print_section(&format!("Level {}", level.level));
    print_result("Clue", &level.clue);
    print_result("Your guess", guess);

    let target = runner.hide_target(level)?;

    if args.show_amplitudes {
        print_section("Amplitude Evolution");
        for snapshot in grover_snapshots(&target)? {
            print_snapshot(&snapshot);
        }
    }

    print_section("Measurement Outcome");
    let spinner = create_spinner("Running quantum circuit...");
    let outcome = runner.play(&target, guess).await;
    spinner.finish_and_clear();
    let outcome = outcome?;

    print_success("Quantum Simulation Complete!");
    print_counts(&outcome.counts);

    println!();
    let found = outcome.most_frequent.as_deref().unwrap_or("?");
    if outcome.is_match() {
        print_success(&format!(
            "Correct! Your guess `{}` matches the quantum result!",
            outcome.guess
        ));
    } else {
        print_warning(&format!(
            "Oops! Your guess was `{}` but Grover found `{found}`.",
            outcome.guess
        ));
    }
    print_info("The tallest bar is the PIN Grover amplified, the one you'll most likely measure.");

    Ok(())
}
