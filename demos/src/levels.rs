//! Treasure hunt levels and hidden-target generation.
//!
//! Level files are JSON arrays of `{ "level", "rule", "clue" }` objects.
//! The rule names how the hidden PIN is drawn; the clue is shown to the
//! player.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::circuits::grover::Target;
use crate::error::{DemoError, DemoResult};

const BUNDLED_LEVELS: &str = include_str!("../assets/level_clues.json");

/// How a hidden target is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetRule {
    /// Any pattern, uniformly.
    Random,
    /// Reads the same in both directions.
    Symmetric,
    /// First half equals second half. An odd middle bit is free.
    HalfHalf,
    /// Exactly one '1'.
    SingleOne,
    /// `0101…` or `1010…`.
    Alternating,
}

impl TargetRule {
    /// Every rule, in declaration order.
    pub const ALL: [TargetRule; 5] = [
        TargetRule::Random,
        TargetRule::Symmetric,
        TargetRule::HalfHalf,
        TargetRule::SingleOne,
        TargetRule::Alternating,
    ];

    /// Name used in level files.
    pub fn as_str(self) -> &'static str {
        match self {
            TargetRule::Random => "random",
            TargetRule::Symmetric => "symmetric",
            TargetRule::HalfHalf => "half_half",
            TargetRule::SingleOne => "single_one",
            TargetRule::Alternating => "alternating",
        }
    }

    /// Check whether `target` could have been produced by this rule.
    pub fn accepts(self, target: &Target) -> bool {
        let bits = target.as_str().as_bytes();
        let n = bits.len();
        match self {
            TargetRule::Random => true,
            TargetRule::Symmetric => bits.iter().eq(bits.iter().rev()),
            TargetRule::HalfHalf => bits[..n / 2] == bits[n - n / 2..],
            TargetRule::SingleOne => bits.iter().filter(|&&b| b == b'1').count() == 1,
            TargetRule::Alternating => bits.windows(2).all(|w| w[0] != w[1]),
        }
    }
}

impl fmt::Display for TargetRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetRule {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| DemoError::UnknownRule(s.to_string()))
    }
}

/// Draw a hidden target of `width` bits following `rule`.
pub fn generate_target<R: Rng + ?Sized>(
    rule: TargetRule,
    width: usize,
    rng: &mut R,
) -> DemoResult<Target> {
    Target::check_width(rule.as_str(), width)?;
    let mut bits = vec![b'0'; width];

    match rule {
        TargetRule::Random => bits.iter_mut().for_each(|b| *b = coin(rng)),
        TargetRule::Symmetric => {
            for i in 0..width.div_ceil(2) {
                let bit = coin(rng);
                bits[i] = bit;
                bits[width - 1 - i] = bit;
            }
        }
        TargetRule::HalfHalf => {
            let half = width / 2;
            for i in 0..half {
                let bit = coin(rng);
                bits[i] = bit;
                bits[width - half + i] = bit;
            }
            if width % 2 == 1 {
                bits[half] = coin(rng);
            }
        }
        TargetRule::SingleOne => {
            if width > 0 {
                bits[rng.gen_range(0..width)] = b'1';
            }
        }
        TargetRule::Alternating => {
            let first = coin(rng);
            for (i, b) in bits.iter_mut().enumerate() {
                *b = if i % 2 == 0 { first } else { first ^ 1 };
            }
        }
    }

    let pattern = String::from_utf8_lossy(&bits).into_owned();
    Target::parse(&pattern, width)
}

fn coin<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    if rng.gen_bool(0.5) { b'1' } else { b'0' }
}

/// One treasure hunt level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Level number shown to the player.
    pub level: u32,
    /// Name of the [`TargetRule`] used for this level.
    pub rule: String,
    /// Hint shown to the player.
    pub clue: String,
}

impl Level {
    /// Resolve the rule name.
    pub fn target_rule(&self) -> DemoResult<TargetRule> {
        self.rule.parse()
    }
}

/// Parse levels from JSON, rejecting unknown rule names.
pub fn parse_levels(json: &str) -> DemoResult<Vec<Level>> {
    let levels: Vec<Level> = serde_json::from_str(json)?;
    for level in &levels {
        level.target_rule()?;
    }
    Ok(levels)
}

/// Load levels from a JSON file.
pub fn load_levels(path: impl AsRef<Path>) -> DemoResult<Vec<Level>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| DemoError::LevelIo {
        path: path.to_path_buf(),
        source,
    })?;
    let levels = parse_levels(&json)?;
    debug!(path = %path.display(), count = levels.len(), "loaded levels");
    Ok(levels)
}

/// Levels shipped with the demos.
pub fn bundled_levels() -> DemoResult<Vec<Level>> {
    parse_levels(BUNDLED_LEVELS)
}

/// Find the level numbered `number`.
pub fn find_level(levels: &[Level], number: u32) -> DemoResult<&Level> {
    levels
        .iter()
        .find(|l| l.level == number)
        .ok_or(DemoError::UnknownLevel(number))
}
