//! In-memory collaborators for tests and development.
//!
//! [`InMemoryCustody`] stands in for the NFT contract: it tracks per-item
//! ownership and rejects transfers of unminted or foreign items, mirroring
//! the `ERC721NonexistentToken` revert of a real collection. The staking
//! escrow is modeled as ownership by [`ESCROW_ADDRESS`].
//!
//! [`StubTreasury`] stands in for the funded reward-token balance of the
//! staking contract; it fails with `InsufficientTreasury` once drained.

use std::collections::HashMap;

use grove_types::{Address, AssetRef, RewardAmount, TokenId};

use crate::collaborators::{CustodyError, CustodyTransfer, PayoutError, RewardPayout};

/// Address holding every escrowed item in the stub custody.
pub const ESCROW_ADDRESS: Address = [0xEE; 20];

/// In-memory NFT custody: mint, ownership lookup, escrow transfers.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCustody {
    owners: HashMap<AssetRef, Address>,
}

impl InMemoryCustody {
    /// Create an empty custody with no minted items.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint an item to `owner`. Re-minting an existing id overwrites it.
    pub fn mint(&mut self, owner: Address, collection: Address, item: TokenId) {
        self.owners.insert(AssetRef::new(collection, item), owner);
    }

    /// Current holder of an item, if it exists.
    pub fn holder_of(&self, collection: Address, item: TokenId) -> Option<Address> {
        self.owners.get(&AssetRef::new(collection, item)).copied()
    }
}

impl CustodyTransfer for InMemoryCustody {
    fn transfer_in(
        &mut self,
        owner: Address,
        collection: Address,
        item: TokenId,
    ) -> std::result::Result<(), CustodyError> {
        let asset = AssetRef::new(collection, item);
        match self.owners.get_mut(&asset) {
            None => Err(CustodyError::NonexistentItem { item }),
            Some(holder) if *holder != owner => Err(CustodyError::NotOwnedByCaller { item }),
            Some(holder) => {
                *holder = ESCROW_ADDRESS;
                Ok(())
            }
        }
    }

    fn transfer_out(&mut self, recipient: Address, collection: Address, item: TokenId) {
        if let Some(holder) = self.owners.get_mut(&AssetRef::new(collection, item)) {
            *holder = recipient;
        }
    }
}

/// In-memory reward treasury with a finite funded balance.
#[derive(Clone, Debug, Default)]
pub struct StubTreasury {
    balance: RewardAmount,
    paid: HashMap<Address, RewardAmount>,
}

impl StubTreasury {
    /// Create a treasury funded with `balance` wei.
    pub fn new(balance: RewardAmount) -> Self {
        Self {
            balance,
            paid: HashMap::new(),
        }
    }

    /// Add funds (the deploy-time token transfer into the contract).
    pub fn fund(&mut self, amount: RewardAmount) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Remaining treasury balance in wei.
    pub fn balance(&self) -> RewardAmount {
        self.balance
    }

    /// Total paid to a recipient so far.
    pub fn paid_to(&self, recipient: &Address) -> RewardAmount {
        self.paid.get(recipient).copied().unwrap_or(0)
    }
}

impl RewardPayout for StubTreasury {
    fn payout(
        &mut self,
        recipient: Address,
        amount: RewardAmount,
    ) -> std::result::Result<(), PayoutError> {
        if self.balance < amount {
            return Err(PayoutError::InsufficientTreasury {
                available: self.balance,
                required: amount,
            });
        }
        self.balance -= amount;
        *self.paid.entry(recipient).or_default() += amount;
        Ok(())
    }
}
