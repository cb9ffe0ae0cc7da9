//! Custody and payout collaborator traits.
//!
//! The coordinator owns the staking ledger but not the assets themselves:
//! moving an NFT into escrow and paying out reward tokens are external
//! operations. These traits are the seam; implementors provide the actual
//! transfers, which lets the coordination logic be tested without a chain.
//!
//! Block height and wall time are NOT abstracted here: every coordinator
//! operation takes them as explicit parameters supplied by the caller, who
//! owns the monotonic counters.

use grove_types::{Address, RewardAmount, TokenId};

/// Failure modes of the external asset-custody collaborator.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CustodyError {
    /// The token id does not exist in the collection.
    #[error("nonexistent token {item}")]
    NonexistentItem {
        /// The unknown token id.
        item: TokenId,
    },

    /// The token exists but the caller does not own it.
    #[error("token {item} is not owned by the caller")]
    NotOwnedByCaller {
        /// The token id owned by someone else.
        item: TokenId,
    },
}

/// Failure modes of the external reward-payout collaborator.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PayoutError {
    /// The reward treasury cannot cover the payout.
    #[error("insufficient treasury: have {available}, need {required}")]
    InsufficientTreasury {
        /// Treasury balance in wei.
        available: RewardAmount,
        /// Requested payout in wei.
        required: RewardAmount,
    },
}

/// Moves non-fungible items between their owner and the staking escrow.
pub trait CustodyTransfer {
    /// Pull one item from `owner` into escrow.
    ///
    /// # Errors
    ///
    /// - [`CustodyError::NonexistentItem`] if the token id is unknown
    /// - [`CustodyError::NotOwnedByCaller`] if `owner` does not hold it
    fn transfer_in(
        &mut self,
        owner: Address,
        collection: Address,
        item: TokenId,
    ) -> std::result::Result<(), CustodyError>;

    /// Return one escrowed item to `recipient`. Cannot fail: the escrow
    /// holds every item the registry says it holds.
    fn transfer_out(&mut self, recipient: Address, collection: Address, item: TokenId);
}

/// Pays accrued reward tokens out of the treasury.
pub trait RewardPayout {
    /// Transfer `amount` wei of the reward token to `recipient`.
    ///
    /// # Errors
    ///
    /// - [`PayoutError::InsufficientTreasury`] if the treasury is short
    fn payout(
        &mut self,
        recipient: Address,
        amount: RewardAmount,
    ) -> std::result::Result<(), PayoutError>;
}
