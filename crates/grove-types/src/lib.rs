//! # grove-types
//!
//! Shared domain types used across the Grove staking workspace.
//!
//! ## Modules
//!
//! - [`asset`] — Staked asset references

pub mod asset;

pub use asset::AssetRef;

/// Address-like opaque participant/contract identifier (20 bytes).
pub type Address = [u8; 20];

/// Identifier of a single item within an NFT collection.
pub type TokenId = u64;

/// Block height counter supplied by the external chain context.
pub type BlockNumber = u64;

/// Reward amount in wei-scale fixed point.
pub type RewardAmount = u128;

/// Wei per whole reward token (18 decimals).
pub const WEI_PER_TOKEN: u128 = 1_000_000_000_000_000_000;
