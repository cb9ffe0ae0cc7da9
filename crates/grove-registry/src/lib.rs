//! # grove-registry
//!
//! Asset Registry: which non-fungible items each participant currently has
//! staked. Pure ownership bookkeeping, independent of reward math.
//!
//! ## Modules
//!
//! - [`holdings`] — Insertion-ordered holdings with batch stake/unstake

pub mod holdings;

pub use holdings::AssetRegistry;

/// Error types for registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The item is already staked (by any participant, or twice in one batch).
    #[error("asset {asset} is already staked")]
    AssetAlreadyStaked {
        /// The offending asset.
        asset: grove_types::AssetRef,
    },

    /// The item is not currently staked by the calling participant.
    #[error("asset {asset} is not staked by the caller")]
    AssetNotStakedByCaller {
        /// The offending asset.
        asset: grove_types::AssetRef,
    },
}

/// Convenience result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
