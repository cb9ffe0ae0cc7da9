//! The staking coordinator and its configuration.
//!
//! Thin orchestration over the registry, schedule, and ledger: every
//! state-changing entry point checkpoints the caller's ledger account
//! against the holdings count *as it was before* the mutation, then
//! delegates. Batch custody transfers are two-phase: the registry is
//! validated first with no side effects, then items move into escrow one
//! by one, and a failure rolls the already-moved items back out before the
//! error is surfaced.

use serde::{Deserialize, Serialize};

use grove_ledger::{claim, AccrualLedger, ClaimPolicy};
use grove_registry::AssetRegistry;
use grove_schedule::RewardSchedule;
use grove_types::{Address, AssetRef, BlockNumber, RewardAmount, TokenId};

use crate::collaborators::{CustodyTransfer, RewardPayout};
use crate::Result;

/// One-time setup parameters, validated at construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingConfig {
    /// Address of the reward token contract (informational).
    pub reward_token: Address,
    /// Emission rate in wei per block.
    pub reward_per_block: RewardAmount,
    /// First block of the eligible window (inclusive).
    pub start_block: BlockNumber,
    /// Last block of the eligible window (inclusive).
    pub end_block: BlockNumber,
    /// Minimum gap between successful claims, in minutes.
    pub claim_interval_minutes: u64,
}

/// Read-only composite view of one participant.
///
/// Assembled without checkpointing, so `unclaimed` is the balance as of
/// the participant's last checkpoint, not the instantaneous value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakerInfo {
    /// Staked items in insertion order.
    pub staked_items: Vec<AssetRef>,
    /// Unclaimed reward balance as of the last checkpoint, in wei.
    pub unclaimed: RewardAmount,
    /// Unix timestamp of the last successful claim (0 = never).
    pub last_claim_at: u64,
}

/// Orchestrates staking, unstaking, and claiming over the core stores.
///
/// All mutating methods take `&mut self`: operations execute to completion
/// with no interleaving, and the registry and ledger are never mutated
/// except through here.
#[derive(Clone, Debug)]
pub struct StakingCoordinator {
    reward_token: Address,
    schedule: RewardSchedule,
    policy: ClaimPolicy,
    registry: AssetRegistry,
    ledger: AccrualLedger,
}

impl StakingCoordinator {
    /// Create a coordinator from validated configuration.
    ///
    /// # Errors
    ///
    /// - [`ScheduleError::InvalidWindow`](grove_schedule::ScheduleError::InvalidWindow)
    ///   if `start_block >= end_block`
    /// - [`LedgerError::InvalidInterval`](grove_ledger::LedgerError::InvalidInterval)
    ///   if `claim_interval_minutes` is zero
    pub fn new(config: StakingConfig) -> Result<Self> {
        let schedule = RewardSchedule::new(
            config.reward_per_block,
            config.start_block,
            config.end_block,
        )?;
        let policy = ClaimPolicy::from_minutes(config.claim_interval_minutes)?;
        Ok(Self {
            reward_token: config.reward_token,
            schedule,
            policy,
            registry: AssetRegistry::new(),
            ledger: AccrualLedger::new(),
        })
    }

    /// Stake a batch of items for `owner`, pulling them into escrow.
    ///
    /// All-or-nothing: a custody failure on any item returns every
    /// already-escrowed item of the batch before the error is surfaced,
    /// and the registry is untouched.
    ///
    /// # Errors
    ///
    /// - [`StakingError::EmptyBatch`](crate::StakingError::EmptyBatch) if `items` is empty
    /// - [`StakingError::Registry`](crate::StakingError::Registry) if any item is already staked
    /// - [`StakingError::Custody`](crate::StakingError::Custody) if any custody transfer fails
    pub fn stake_nfts<C: CustodyTransfer>(
        &mut self,
        owner: Address,
        collection: Address,
        items: &[TokenId],
        current_block: BlockNumber,
        custody: &mut C,
    ) -> Result<()> {
        if items.is_empty() {
            return Err(crate::StakingError::EmptyBatch);
        }

        // Crystallize reward under the pre-mutation holdings count.
        let count_before = self.registry.staked_count(&owner);
        self.ledger
            .checkpoint(owner, count_before, current_block, &self.schedule)?;

        // Phase 1: registry validation, no side effects.
        self.registry.validate_stake(collection, items)?;

        // Phase 2: custody transfers with logical rollback.
        for (index, &item) in items.iter().enumerate() {
            if let Err(err) = custody.transfer_in(owner, collection, item) {
                tracing::warn!(
                    owner = %hex::encode(owner),
                    item,
                    %err,
                    "custody transfer failed, rolling back batch"
                );
                for &moved in &items[..index] {
                    custody.transfer_out(owner, collection, moved);
                }
                return Err(err.into());
            }
        }

        // Commit: cannot fail after phase 1 validated the same batch.
        self.registry.stake(owner, collection, items)?;

        tracing::info!(
            owner = %hex::encode(owner),
            count = items.len(),
            block = current_block,
            "stake complete"
        );
        Ok(())
    }

    /// Unstake a batch of items held by `owner`, returning them from escrow.
    ///
    /// # Errors
    ///
    /// - [`StakingError::EmptyBatch`](crate::StakingError::EmptyBatch) if `items` is empty
    /// - [`StakingError::Registry`](crate::StakingError::Registry) if any item is not staked
    ///   by `owner`
    pub fn unstake_nfts<C: CustodyTransfer>(
        &mut self,
        owner: Address,
        collection: Address,
        items: &[TokenId],
        current_block: BlockNumber,
        custody: &mut C,
    ) -> Result<()> {
        if items.is_empty() {
            return Err(crate::StakingError::EmptyBatch);
        }

        let count_before = self.registry.staked_count(&owner);
        self.ledger
            .checkpoint(owner, count_before, current_block, &self.schedule)?;

        // Atomic all-or-nothing removal; rejects before anything changes.
        self.registry.unstake(owner, collection, items)?;

        // Escrow release cannot fail for items the registry held.
        for &item in items {
            custody.transfer_out(owner, collection, item);
        }

        tracing::info!(
            owner = %hex::encode(owner),
            count = items.len(),
            block = current_block,
            "unstake complete"
        );
        Ok(())
    }

    /// Claim the participant's accrued reward.
    ///
    /// The ledger is settled only after the external payout succeeds; a
    /// payout failure leaves the unclaimed balance and the last-claim
    /// timestamp exactly as they were.
    ///
    /// # Errors
    ///
    /// - [`StakingError::Ledger`](crate::StakingError::Ledger) for
    ///   `ClaimTooSoon` / `NothingToClaim`
    /// - [`StakingError::PayoutFailed`](crate::StakingError::PayoutFailed) if the
    ///   treasury transfer fails
    pub fn claim_rewards<P: RewardPayout>(
        &mut self,
        participant: Address,
        current_block: BlockNumber,
        now: u64,
        payout: &mut P,
    ) -> Result<RewardAmount> {
        let staked_count = self.registry.staked_count(&participant);
        let amount = claim::begin_claim(
            &mut self.ledger,
            &self.policy,
            participant,
            staked_count,
            current_block,
            now,
            &self.schedule,
        )?;

        payout.payout(participant, amount)?;

        claim::settle_claim(&mut self.ledger, participant, now);

        tracing::info!(
            participant = %hex::encode(participant),
            amount,
            block = current_block,
            "rewards claimed"
        );
        Ok(amount)
    }

    /// Read-only staker view: holdings, unclaimed balance, last claim time.
    ///
    /// Does not checkpoint; the balance reflects the last checkpoint.
    pub fn staker_info(&self, participant: &Address) -> StakerInfo {
        StakerInfo {
            staked_items: self.registry.holdings_of(participant).to_vec(),
            unclaimed: self.ledger.unclaimed(participant),
            last_claim_at: self.ledger.last_claim_at(participant),
        }
    }

    /// Total staked item count across all participants (informational).
    pub fn total_staked(&self) -> usize {
        self.registry.total_staked()
    }

    /// The emission schedule.
    pub fn schedule(&self) -> &RewardSchedule {
        &self.schedule
    }

    /// The claim interval policy.
    pub fn claim_policy(&self) -> &ClaimPolicy {
        &self.policy
    }

    /// The reward token contract address.
    pub fn reward_token(&self) -> Address {
        self.reward_token
    }
}
