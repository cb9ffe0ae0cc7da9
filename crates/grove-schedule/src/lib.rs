//! # grove-schedule
//!
//! Reward emission schedule: a fixed `[start_block, end_block]` window and a
//! per-block emission rate. Pure block-range math; no mutable state.
//!
//! ## Modules
//!
//! - [`emission`] — Eligible window and per-range reward computation

pub mod emission;

pub use emission::RewardSchedule;

/// Error types for schedule operations.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// The emission window is empty or inverted.
    #[error("invalid emission window: start block {start} >= end block {end}")]
    InvalidWindow {
        /// The configured start block.
        start: u64,
        /// The configured end block.
        end: u64,
    },

    /// Arithmetic overflow while computing a reward amount.
    #[error("arithmetic overflow computing reward over {blocks} blocks")]
    Overflow {
        /// The eligible block count that overflowed.
        blocks: u64,
    },
}

/// Convenience result type for schedule operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;
