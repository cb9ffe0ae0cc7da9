//! Insertion-ordered holdings with batch stake/unstake.
//!
//! Two indexes are kept in sync: a per-participant `Vec<AssetRef>` in
//! insertion order (the order `holdings_of` reports, stable for queries and
//! tests) and a global owner map enforcing that an item is staked by at
//! most one participant at a time.
//!
//! All batch operations are all-or-nothing: every item is validated before
//! any index is touched, so a failed batch leaves the registry exactly as
//! it was.

use std::collections::{HashMap, HashSet};

use grove_types::{Address, AssetRef, TokenId};

use crate::{RegistryError, Result};

/// Registry of staked assets across all participants.
///
/// Held in memory; mutated only through the staking coordinator.
#[derive(Clone, Debug, Default)]
pub struct AssetRegistry {
    /// Staked items per participant, in insertion order.
    holdings: HashMap<Address, Vec<AssetRef>>,
    /// Owner of each currently staked item.
    owners: HashMap<AssetRef, Address>,
}

impl AssetRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Phase-1 check for a stake batch: no side effects.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::AssetAlreadyStaked`] if any item is staked by any
    ///   participant, or appears twice within the batch
    pub fn validate_stake(&self, collection: Address, items: &[TokenId]) -> Result<()> {
        let mut seen = HashSet::with_capacity(items.len());
        for &item in items {
            let asset = AssetRef::new(collection, item);
            if self.owners.contains_key(&asset) || !seen.insert(asset) {
                return Err(RegistryError::AssetAlreadyStaked { asset });
            }
        }
        Ok(())
    }

    /// Stake a batch of items for `owner`. All-or-nothing.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::AssetAlreadyStaked`] if any item is staked by any
    ///   participant, or appears twice within the batch
    pub fn stake(&mut self, owner: Address, collection: Address, items: &[TokenId]) -> Result<()> {
        self.validate_stake(collection, items)?;

        let held = self.holdings.entry(owner).or_default();
        for &item in items {
            let asset = AssetRef::new(collection, item);
            held.push(asset);
            self.owners.insert(asset, owner);
        }

        tracing::info!(
            owner = %hex::encode(owner),
            count = items.len(),
            "assets staked"
        );
        Ok(())
    }

    /// Unstake a batch of items held by `owner`. All-or-nothing.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::AssetNotStakedByCaller`] if any item is not
    ///   currently staked by `owner`, or appears twice within the batch
    pub fn unstake(
        &mut self,
        owner: Address,
        collection: Address,
        items: &[TokenId],
    ) -> Result<()> {
        let mut seen = HashSet::with_capacity(items.len());
        for &item in items {
            let asset = AssetRef::new(collection, item);
            if self.owners.get(&asset) != Some(&owner) || !seen.insert(asset) {
                return Err(RegistryError::AssetNotStakedByCaller { asset });
            }
        }

        let removing: HashSet<AssetRef> = items
            .iter()
            .map(|&item| AssetRef::new(collection, item))
            .collect();
        if let Some(held) = self.holdings.get_mut(&owner) {
            held.retain(|asset| !removing.contains(asset));
        }
        for asset in &removing {
            self.owners.remove(asset);
        }

        tracing::info!(
            owner = %hex::encode(owner),
            count = items.len(),
            "assets unstaked"
        );
        Ok(())
    }

    /// The participant's staked items in insertion order. No side effects.
    pub fn holdings_of(&self, participant: &Address) -> &[AssetRef] {
        self.holdings
            .get(participant)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of items the participant currently has staked.
    pub fn staked_count(&self, participant: &Address) -> usize {
        self.holdings_of(participant).len()
    }

    /// Total staked item count across all participants (informational only).
    pub fn total_staked(&self) -> usize {
        self.owners.len()
    }

    /// Current owner of a staked item, if any.
    pub fn owner_of(&self, asset: &AssetRef) -> Option<&Address> {
        self.owners.get(asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: Address = [0xA1; 20];
    const BOB: Address = [0xB0; 20];
    const COLLECTION: Address = [0xC0; 20];

    #[test]
    fn test_stake_records_insertion_order() {
        let mut reg = AssetRegistry::new();
        reg.stake(ALICE, COLLECTION, &[3, 1, 2]).expect("stake");
        let held = reg.holdings_of(&ALICE);
        let items: Vec<u64> = held.iter().map(|a| a.item).collect();
        assert_eq!(items, vec![3, 1, 2]);
        assert_eq!(reg.total_staked(), 3);
    }

    #[test]
    fn test_double_stake_same_participant_rejected() {
        let mut reg = AssetRegistry::new();
        reg.stake(ALICE, COLLECTION, &[1]).expect("stake");
        let err = reg.stake(ALICE, COLLECTION, &[1]).expect_err("double stake");
        assert!(matches!(err, RegistryError::AssetAlreadyStaked { .. }));
    }

    #[test]
    fn test_double_stake_across_participants_rejected() {
        let mut reg = AssetRegistry::new();
        reg.stake(ALICE, COLLECTION, &[1]).expect("alice stakes");
        let err = reg.stake(BOB, COLLECTION, &[1]).expect_err("bob double stakes");
        assert!(matches!(err, RegistryError::AssetAlreadyStaked { .. }));
        assert_eq!(reg.owner_of(&AssetRef::new(COLLECTION, 1)), Some(&ALICE));
    }

    #[test]
    fn test_stake_batch_with_internal_duplicate_rejected() {
        let mut reg = AssetRegistry::new();
        let err = reg.stake(ALICE, COLLECTION, &[1, 2, 1]).expect_err("dup in batch");
        assert!(matches!(err, RegistryError::AssetAlreadyStaked { .. }));
        assert_eq!(reg.staked_count(&ALICE), 0);
    }

    #[test]
    fn test_stake_batch_is_all_or_nothing() {
        let mut reg = AssetRegistry::new();
        reg.stake(BOB, COLLECTION, &[5]).expect("bob stakes");
        // 5 is taken, so the whole batch fails and 4 is not staked either.
        let err = reg.stake(ALICE, COLLECTION, &[4, 5]).expect_err("batch fails");
        assert!(matches!(err, RegistryError::AssetAlreadyStaked { .. }));
        assert_eq!(reg.staked_count(&ALICE), 0);
        assert_eq!(reg.total_staked(), 1);
    }

    #[test]
    fn test_unstake_removes_items() {
        let mut reg = AssetRegistry::new();
        reg.stake(ALICE, COLLECTION, &[1, 2, 3]).expect("stake");
        reg.unstake(ALICE, COLLECTION, &[2]).expect("unstake");
        let items: Vec<u64> = reg.holdings_of(&ALICE).iter().map(|a| a.item).collect();
        assert_eq!(items, vec![1, 3]);
        assert_eq!(reg.owner_of(&AssetRef::new(COLLECTION, 2)), None);
        assert_eq!(reg.total_staked(), 2);
    }

    #[test]
    fn test_unstake_not_held_rejected() {
        let mut reg = AssetRegistry::new();
        reg.stake(ALICE, COLLECTION, &[1]).expect("stake");
        let err = reg.unstake(ALICE, COLLECTION, &[2]).expect_err("not held");
        assert!(matches!(err, RegistryError::AssetNotStakedByCaller { .. }));
        assert_eq!(reg.staked_count(&ALICE), 1);
    }

    #[test]
    fn test_unstake_other_participants_item_rejected() {
        let mut reg = AssetRegistry::new();
        reg.stake(ALICE, COLLECTION, &[1]).expect("stake");
        let err = reg.unstake(BOB, COLLECTION, &[1]).expect_err("bob unstakes alice's");
        assert!(matches!(err, RegistryError::AssetNotStakedByCaller { .. }));
        assert_eq!(reg.staked_count(&ALICE), 1);
    }

    #[test]
    fn test_unstake_batch_is_all_or_nothing() {
        let mut reg = AssetRegistry::new();
        reg.stake(ALICE, COLLECTION, &[1, 2]).expect("stake");
        let err = reg.unstake(ALICE, COLLECTION, &[1, 9]).expect_err("9 not held");
        assert!(matches!(err, RegistryError::AssetNotStakedByCaller { .. }));
        assert_eq!(reg.staked_count(&ALICE), 2);
    }

    #[test]
    fn test_unstake_batch_with_internal_duplicate_rejected() {
        let mut reg = AssetRegistry::new();
        reg.stake(ALICE, COLLECTION, &[1]).expect("stake");
        let err = reg.unstake(ALICE, COLLECTION, &[1, 1]).expect_err("dup in batch");
        assert!(matches!(err, RegistryError::AssetNotStakedByCaller { .. }));
        assert_eq!(reg.staked_count(&ALICE), 1);
    }

    #[test]
    fn test_multiset_conservation_over_sequence() {
        let mut reg = AssetRegistry::new();
        reg.stake(ALICE, COLLECTION, &[1, 2]).expect("stake 1,2");
        reg.stake(BOB, COLLECTION, &[3]).expect("stake 3");
        reg.unstake(ALICE, COLLECTION, &[1]).expect("unstake 1");
        reg.stake(ALICE, COLLECTION, &[4]).expect("stake 4");

        let alice: Vec<u64> = reg.holdings_of(&ALICE).iter().map(|a| a.item).collect();
        let bob: Vec<u64> = reg.holdings_of(&BOB).iter().map(|a| a.item).collect();
        assert_eq!(alice, vec![2, 4]);
        assert_eq!(bob, vec![3]);
        assert_eq!(reg.total_staked(), alice.len() + bob.len());
    }

    #[test]
    fn test_holdings_of_unknown_participant_is_empty() {
        let reg = AssetRegistry::new();
        assert!(reg.holdings_of(&ALICE).is_empty());
        assert_eq!(reg.staked_count(&ALICE), 0);
    }

    #[test]
    fn test_restake_after_unstake() {
        let mut reg = AssetRegistry::new();
        reg.stake(ALICE, COLLECTION, &[1]).expect("stake");
        reg.unstake(ALICE, COLLECTION, &[1]).expect("unstake");
        reg.stake(BOB, COLLECTION, &[1]).expect("bob restakes freed item");
        assert_eq!(reg.owner_of(&AssetRef::new(COLLECTION, 1)), Some(&BOB));
    }
}
