//! Quantum Phase Estimation Demo
//!
//! Estimates the phase φ of a phase gate from its eigenstate |1⟩.

use clap::Parser;
use console::style;

use qhunt_adapter_sim::SimulatorBackend;
use qhunt_demos::circuits::qpe::{self, DEFAULT_COUNTING_QUBITS, Phase};
use qhunt_demos::{
    create_spinner, init_logging, print_counts, print_header, print_info, print_result,
    print_section, print_success,
};
use qhunt_hal::{BackendConfig, BackendFactory};

#[derive(Parser, Debug)]
#[command(name = "demo-qpe")]
#[command(about = "Demonstrate quantum phase estimation")]
struct Args {
    /// Phase to estimate, in [0, 1)
    #[arg(default_value_t = 0.25)]
    phase: f64,

    /// Number of counting qubits (precision = 2^-c)
    #[arg(short, long, default_value_t = DEFAULT_COUNTING_QUBITS)]
    counting_qubits: usize,

    /// Number of measurement shots
    #[arg(short, long, env = "QHUNT_SHOTS", default_value_t = 1024)]
    shots: u32,

    /// Seed for reproducible sampling
    #[arg(long, env = "QHUNT_SEED")]
    seed: Option<u64>,

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
    let phase = Phase::new(args.phase)?;

    let mut config = BackendConfig::new("simulator");
    if let Some(seed) = args.seed {
        config = config.with_extra("seed", seed.into());
    }
    let backend = SimulatorBackend::from_config(config)?;

    if args.json {
        let counts = qpe::run(&backend, phase, args.counting_qubits, args.shots).await?;
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(());
    }

    print_header("Quantum Phase Estimation Demo");

    print_section("Problem Setup");
    print_result("Phase φ", phase.value());
    print_result("Counting qubits", args.counting_qubits);
    print_result(
        "Resolution",
        format!("1/{}", 1u64 << args.counting_qubits.min(63)),
    );

    let circuit = qpe::qpe_circuit(phase, args.counting_qubits)?;
    print_result("Circuit depth", circuit.depth());

    print_section("Execution");
    let spinner = create_spinner("Running quantum circuit...");
    let counts = qpe::run(&backend, phase, args.counting_qubits, args.shots).await;
    spinner.finish_and_clear();
    let counts = counts?;

    print_counts(&counts);

    print_section("Result");
    if let Some(estimate) = qpe::estimate(&counts)? {
        print_result("Estimated φ", estimate);
        print_result("Error", format!("{:.4}", (estimate - phase.value()).abs()));
        println!();
        print_success("Phase estimation complete!");
    }
    print_info("Phases that are not multiples of the resolution spread over neighbouring outcomes.");

    Ok(())
}
