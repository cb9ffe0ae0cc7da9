//! # grove-staking
//!
//! The public-facing staking coordinator: validates inputs, moves assets in
//! and out of custody, checkpoints the accrual ledger, and exposes the
//! staker-info query surface. External side effects live behind the
//! collaborator traits; the coordinator itself never performs I/O.
//!
//! ## Modules
//!
//! - [`collaborators`] — Custody and payout collaborator traits
//! - [`coordinator`] — The staking coordinator and its configuration
//! - [`stubs`] — In-memory collaborators for tests and development

pub mod collaborators;
pub mod coordinator;
pub mod stubs;

pub use collaborators::{CustodyError, CustodyTransfer, PayoutError, RewardPayout};
pub use coordinator::{StakerInfo, StakingConfig, StakingCoordinator};

/// Error types for staking operations.
#[derive(Debug, thiserror::Error)]
pub enum StakingError {
    /// The item id list is empty.
    #[error("item id list must not be empty")]
    EmptyBatch,

    /// Asset registry rejection (already staked / not staked by caller).
    #[error(transparent)]
    Registry(#[from] grove_registry::RegistryError),

    /// Ledger rejection (claim too soon, nothing to claim, overflow).
    #[error(transparent)]
    Ledger(#[from] grove_ledger::LedgerError),

    /// Schedule construction or reward math rejection.
    #[error(transparent)]
    Schedule(#[from] grove_schedule::ScheduleError),

    /// Underlying asset-custody failure, propagated unmodified.
    #[error(transparent)]
    Custody(#[from] collaborators::CustodyError),

    /// Reward payout failure; the claim is rolled back.
    #[error("payout failed: {0}")]
    PayoutFailed(#[from] collaborators::PayoutError),
}

/// Convenience result type for staking operations.
pub type Result<T> = std::result::Result<T, StakingError>;
