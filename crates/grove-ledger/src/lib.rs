//! # grove-ledger
//!
//! Accrual ledger and claim gate. Tracks each participant's
//! accrued-but-unclaimed reward balance, crystallized lazily at interaction
//! time ("checkpointing"), and enforces the minimum interval between
//! successful claims.
//!
//! ## Modules
//!
//! - [`accrual`] — Per-participant accounts and checkpointing
//! - [`claim`] — Claim interval policy and the begin/settle claim protocol

pub mod accrual;
pub mod claim;

pub use accrual::{AccrualLedger, StakerAccount};
pub use claim::ClaimPolicy;

/// Error types for ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The claim interval has not elapsed since the last successful claim.
    #[error("claim too soon: next allowed at {next_allowed_at}, current time {now}")]
    ClaimTooSoon {
        /// Earliest timestamp at which the next claim may succeed.
        next_allowed_at: u64,
        /// The current timestamp.
        now: u64,
    },

    /// The participant's unclaimed balance is zero.
    #[error("nothing to claim")]
    NothingToClaim,

    /// The configured claim interval is zero.
    #[error("claim interval must be a positive number of minutes")]
    InvalidInterval,

    /// Adding newly accrued reward would overflow the stored balance.
    #[error("unclaimed balance overflow")]
    BalanceOverflow,

    /// Reward computation failed in the schedule.
    #[error(transparent)]
    Schedule(#[from] grove_schedule::ScheduleError),
}

/// Convenience result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
