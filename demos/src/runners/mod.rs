//! Demo runners for executing quantum algorithms.

pub mod hunt;

pub use hunt::{HuntOutcome, HuntRunner};
