//! Per-participant accounts and checkpointing.
//!
//! Reward accrues lazily: nothing is recomputed per block. Instead, the
//! coordinator checkpoints a participant's account immediately before any
//! holdings mutation and before any claim, crystallizing the reward earned
//! over `[last_checkpoint_block, current_block)` into the stored balance.
//!
//! The reward model is flat per participant: a participant with one or
//! more staked items earns the full schedule rate; holdings count does not
//! scale the rate. With zero staked items the checkpoint only advances the
//! block cursor.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use grove_schedule::RewardSchedule;
use grove_types::{Address, BlockNumber, RewardAmount};

use crate::Result;

/// Ledger record for one participant. Created on first touch, never
/// destroyed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakerAccount {
    /// Block up to which reward has been crystallized.
    pub last_checkpoint_block: BlockNumber,
    /// Accrued-but-unclaimed reward in wei.
    pub unclaimed: RewardAmount,
    /// Unix timestamp of the last successful claim; 0 = never claimed.
    pub last_claim_at: u64,
}

/// The accrual ledger: participant accounts keyed by address.
#[derive(Clone, Debug, Default)]
pub struct AccrualLedger {
    accounts: HashMap<Address, StakerAccount>,
}

impl AccrualLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Crystallize accrued reward for `participant` up to `current_block`.
    ///
    /// `staked_count` must be the participant's holdings count *before* any
    /// mutation the caller is about to perform. With `staked_count >= 1`
    /// the reward for `[last_checkpoint_block, current_block)` is added to
    /// the unclaimed balance; with zero holdings only the block cursor
    /// advances. A first touch creates the account at `current_block`.
    ///
    /// Idempotent within one block: an empty block range accrues nothing,
    /// so repeated checkpoints over subranges sum to exactly the reward of
    /// one checkpoint spanning the whole range.
    ///
    /// Returns the newly accrued amount.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Schedule`](crate::LedgerError::Schedule) on reward
    ///   arithmetic overflow
    pub fn checkpoint(
        &mut self,
        participant: Address,
        staked_count: usize,
        current_block: BlockNumber,
        schedule: &RewardSchedule,
    ) -> Result<RewardAmount> {
        let account = self.accounts.entry(participant).or_insert(StakerAccount {
            last_checkpoint_block: current_block,
            unclaimed: 0,
            last_claim_at: 0,
        });

        let accrued = if staked_count >= 1 {
            schedule.reward_for_range(account.last_checkpoint_block, current_block)?
        } else {
            0
        };
        account.unclaimed = account
            .unclaimed
            .checked_add(accrued)
            .ok_or(crate::LedgerError::BalanceOverflow)?;
        // The external block counter is non-decreasing; never move the
        // cursor backwards.
        account.last_checkpoint_block = account.last_checkpoint_block.max(current_block);

        if accrued > 0 {
            tracing::debug!(
                participant = %hex::encode(participant),
                accrued,
                unclaimed = account.unclaimed,
                block = current_block,
                "checkpoint accrued reward"
            );
        }
        Ok(accrued)
    }

    /// The participant's unclaimed balance as of the last checkpoint.
    pub fn unclaimed(&self, participant: &Address) -> RewardAmount {
        self.accounts.get(participant).map_or(0, |a| a.unclaimed)
    }

    /// Timestamp of the participant's last successful claim (0 = never).
    pub fn last_claim_at(&self, participant: &Address) -> u64 {
        self.accounts.get(participant).map_or(0, |a| a.last_claim_at)
    }

    /// The participant's account record, if one has been created.
    pub fn account(&self, participant: &Address) -> Option<&StakerAccount> {
        self.accounts.get(participant)
    }

    pub(crate) fn account_mut(&mut self, participant: &Address) -> Option<&mut StakerAccount> {
        self.accounts.get_mut(participant)
    }
}
