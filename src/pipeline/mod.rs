//! Pipeline entry points for draw sweeps.
//!
//! - `run_lottery`: Join eligible lottery moments across all categories
//! - `run_red_packet`: Join open red packets across all categories
//! - `run_all`: Both, with merged follow lists

pub mod all;
pub mod lottery;
pub mod red_packet;
pub mod sweep;

pub use all::{CombinedOutcome, run_all};
pub use lottery::run_lottery;
pub use red_packet::run_red_packet;
pub use sweep::{SweepOutcome, run_sweep};
