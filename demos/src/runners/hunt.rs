//! Treasure hunt runner.
//!
//! Hides a PIN drawn from a level's rule, lets Grover search for it and
//! checks whether the player's guess matches what the quantum run found.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info};

use qhunt_hal::{Backend, Counts};

use crate::circuits::grover::{self, Target};
use crate::error::DemoResult;
use crate::levels::{Level, generate_target};

/// Result of one round of the hunt.
#[derive(Debug, Clone, Serialize)]
pub struct HuntOutcome {
    /// The hidden PIN.
    pub target: Target,
    /// The player's guess.
    pub guess: Target,
    /// Number of Grover rounds run.
    pub rounds: usize,
    /// Measurement counts.
    pub counts: Counts,
    /// Most frequently measured bit string.
    pub most_frequent: Option<String>,
}

impl HuntOutcome {
    /// Whether the guess equals the most frequent measurement.
    pub fn is_match(&self) -> bool {
        self.most_frequent.as_deref() == Some(self.guess.as_str())
    }

    /// Whether Grover's answer is the hidden PIN.
    pub fn found_target(&self) -> bool {
        self.most_frequent.as_deref() == Some(self.target.as_str())
    }
}

/// Treasure hunt runner configuration.
pub struct HuntRunner<B> {
    backend: B,
    /// Number of measurement shots.
    pub shots: u32,
    /// PIN width in bits.
    pub width: usize,
    rng: StdRng,
}

impl<B: Backend> HuntRunner<B> {
    /// Create a new runner with 1024 shots over 4-bit PINs.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            shots: 1024,
            width: Target::DEFAULT_WIDTH,
            rng: StdRng::from_entropy(),
        }
    }

    /// Set the number of shots.
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// Set the PIN width.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Make hidden targets reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Draw the hidden PIN for `level`.
    pub fn hide_target(&mut self, level: &Level) -> DemoResult<Target> {
        let rule = level.target_rule()?;
        let target = generate_target(rule, self.width, &mut self.rng)?;
        debug!(level = level.level, %rule, "hid target");
        Ok(target)
    }

    /// Search for `target` and compare the result with `guess`.
    ///
    /// The guess must be as wide as `target` and is validated before
    /// anything is submitted. Rounds follow the target's width, not the
    /// runner's.
    pub async fn play(&self, target: &Target, guess: &str) -> DemoResult<HuntOutcome> {
        let n = target.num_qubits();
        let guess = Target::parse(guess, n)?;
        let rounds = grover::optimal_rounds(n);

        let counts = grover::run(&self.backend, target, rounds, self.shots).await?;
        let most_frequent = counts.most_frequent().map(|(bits, _)| bits.clone());

        let outcome = HuntOutcome {
            target: target.clone(),
            guess,
            rounds,
            counts,
            most_frequent,
        };
        info!(
            guess = %outcome.guess,
            found = outcome.most_frequent.as_deref().unwrap_or("-"),
            matched = outcome.is_match(),
            "hunt round finished"
        );
        Ok(outcome)
    }

    /// Hide a PIN for `level` and play one round against it.
    pub async fn play_level(&mut self, level: &Level, guess: &str) -> DemoResult<HuntOutcome> {
        Target::parse(guess, self.width)?;
        let target = self.hide_target(level)?;
        self.play(&target, guess).await
    }
}
