//! qhunt Demo Suite
//!
//! Small educational demos built on `qhunt-ir` circuits and any
//! `qhunt-hal` backend:
//!
//! - **Grover's Search**: find a hidden 4-bit PIN in ⌊π/4·√16⌋ = 3 rounds
//! - **Phase Estimation**: read a phase φ ∈ [0, 1) out of a counting register
//! - **Treasure Hunt**: level-driven game wrapping Grover's search
//!
//! The circuit builders in [`circuits`] never simulate anything themselves;
//! they append gates and hand the circuit to a backend.
//!
//! ```
//! use qhunt_adapter_sim::SimulatorBackend;
//! use qhunt_demos::circuits::grover::{self, Target};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let backend = SimulatorBackend::with_seed(7);
//! let target: Target = "0110".parse().unwrap();
//! let rounds = grover::optimal_rounds(target.num_qubits());
//!
//! let counts = grover::run(&backend, &target, rounds, 1024).await.unwrap();
//! assert_eq!(counts.most_frequent().unwrap().0, "0110");
//! # });
//! ```

pub mod amplitudes;
pub mod circuits;
pub mod error;
pub mod levels;
pub mod runners;

pub use error::{DemoError, DemoResult};

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use qhunt_hal::Counts;

use crate::amplitudes::Snapshot;

/// Install the tracing subscriber for a `-v` count.
pub fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}

/// Create a spinner shown while a job runs.
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}

/// Print counts as a histogram, most frequent first.
pub fn print_counts(counts: &Counts) {
    let sorted = counts.sorted();
    let total = counts.total_shots() as f64;

    for (bitstring, count) in sorted.iter().take(16) {
        let prob = **count as f64 / total * 100.0;
        let bar: String = "█".repeat((prob / 2.0).round() as usize);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > 16 {
        println!("  ... and {} more outcomes", sorted.len() - 16);
    }
}

/// Print an amplitude snapshot as a two-column table.
pub fn print_snapshot(snapshot: &Snapshot) {
    println!("  {}", style(&snapshot.label).bold());
    for row in &snapshot.rows {
        println!("    {}  {}", style(&row.label).cyan(), row.value);
    }
}
