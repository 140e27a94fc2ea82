//! Grover's Search Algorithm Demo
//!
//! Searches for a target bit pattern on the local simulator and prints the
//! measurement histogram.

use clap::Parser;
use console::style;

use qhunt_adapter_sim::SimulatorBackend;
use qhunt_demos::amplitudes::grover_snapshots;
use qhunt_demos::circuits::grover::{self, Target};
use qhunt_demos::{
    create_spinner, init_logging, print_counts, print_header, print_info, print_result,
    print_section, print_snapshot, print_success, print_warning,
};
use qhunt_hal::{Backend, BackendConfig, BackendFactory};

#[derive(Parser, Debug)]
#[command(name = "demo-grover")]
#[command(about = "Demonstrate Grover's search algorithm")]
struct Args {
    /// Target bit pattern to search for
    #[arg(default_value = "0110")]
    target: String,

    /// Number of qubits (search space size = 2^n)
    #[arg(short = 'n', long, default_value_t = Target::DEFAULT_WIDTH)]
    qubits: usize,

    /// Number of Grover rounds (default: optimal for n)
    #[arg(short, long)]
    rounds: Option<usize>,

    /// Number of measurement shots
    #[arg(short, long, env = "QHUNT_SHOTS", default_value_t = 1024)]
    shots: u32,

    /// Seed for reproducible sampling
    #[arg(long, env = "QHUNT_SEED")]
    seed: Option<u64>,

    /// Show amplitudes after each stage of the first round
    #[arg(long)]
    show_amplitudes: bool,

    /// Print counts as JSON instead of a histogram
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
    let target = Target::parse(&args.target, args.qubits)?;
    let rounds = args
        .rounds
        .unwrap_or_else(|| grover::optimal_rounds(target.num_qubits()));

    let mut config = BackendConfig::new("simulator");
    if let Some(seed) = args.seed {
        config = config.with_extra("seed", seed.into());
    }
    let backend = SimulatorBackend::from_config(config)?;
    let limit = backend.capabilities().num_qubits as usize;
    if target.num_qubits() > limit {
        anyhow::bail!(
            "a {}-bit target needs more than the simulator's {limit} qubits",
            target.num_qubits()
        );
    }

    if args.json {
        let counts = grover::run(&backend, &target, rounds, args.shots).await?;
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(());
    }

    print_header("Grover's Search Algorithm Demo");

    print_section("Problem Setup");
    print_result("Qubits", target.num_qubits());
    print_result("Search space size", 1usize << target.num_qubits());
    print_result("Target", format!("|{target}⟩ = {}", target.index()));
    print_result("Grover rounds", rounds);

    print_section("Circuit Generation");
    let circuit = grover::grover_circuit(&target, rounds)?;
    print_result("Circuit depth", circuit.depth());
    print_result("Operations", circuit.num_ops());
    print_result("Classical bits", circuit.num_clbits());

    if args.show_amplitudes {
        print_section("Amplitude Evolution");
        for snapshot in grover_snapshots(&target)? {
            print_snapshot(&snapshot);
        }
    }

    print_section("Execution");
    let spinner = create_spinner("Running quantum circuit...");
    let counts = grover::run(&backend, &target, rounds, args.shots).await;
    spinner.finish_and_clear();
    let counts = counts?;

    print_counts(&counts);

    print_section("Result");
    // sin²((2r + 1)·θ) with sin θ = 1/√N
    let theta = (1.0 / (1u64 << target.num_qubits()) as f64).sqrt().asin();
    let theory = ((2 * rounds + 1) as f64 * theta).sin().powi(2);
    print_result("Expected success", format!("{:.1}%", theory * 100.0));
    print_result(
        "Measured success",
        format!("{:.1}%", counts.probability(target.as_str()) * 100.0),
    );

    println!();
    match counts.most_frequent() {
        Some((bits, _)) if bits == target.as_str() => {
            print_success(&format!("Grover found |{bits}⟩"));
        }
        Some((bits, _)) => print_warning(&format!("Most frequent outcome was |{bits}⟩")),
        None => print_warning("No measurement outcomes"),
    }
    print_info("Each round flips the target's phase, then reflects every amplitude about the mean.");

    Ok(())
}
