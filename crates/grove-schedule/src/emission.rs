//! Eligible window and per-range reward computation.
//!
//! The schedule emits `reward_per_block` for every block inside the
//! inclusive window `[start_block, end_block]` and nothing outside it.
//! Ranges are half-open `[from, to)`, so checkpointing at block `b` and
//! again at block `c` covers each block exactly once — repeated
//! checkpoints over subranges sum to the same total as one checkpoint
//! spanning the whole range.

use serde::{Deserialize, Serialize};

use grove_types::{BlockNumber, RewardAmount};

use crate::{Result, ScheduleError};

/// Immutable reward emission schedule.
///
/// Constructed once via [`RewardSchedule::new`]; there is no setter
/// surface. Blocks outside `[start_block, end_block]` emit zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardSchedule {
    reward_per_block: RewardAmount,
    start_block: BlockNumber,
    end_block: BlockNumber,
}

impl RewardSchedule {
    /// Create a schedule.
    ///
    /// # Errors
    ///
    /// - [`ScheduleError::InvalidWindow`] if `start_block >= end_block`
    pub fn new(
        reward_per_block: RewardAmount,
        start_block: BlockNumber,
        end_block: BlockNumber,
    ) -> Result<Self> {
        if start_block >= end_block {
            return Err(ScheduleError::InvalidWindow {
                start: start_block,
                end: end_block,
            });
        }
        Ok(Self {
            reward_per_block,
            start_block,
            end_block,
        })
    }

    /// The per-block emission rate in wei.
    pub fn reward_per_block(&self) -> RewardAmount {
        self.reward_per_block
    }

    /// First block of the eligible window (inclusive).
    pub fn start_block(&self) -> BlockNumber {
        self.start_block
    }

    /// Last block of the eligible window (inclusive).
    pub fn end_block(&self) -> BlockNumber {
        self.end_block
    }

    /// Count the blocks in `[from, to)` that fall inside the eligible
    /// window.
    ///
    /// Returns 0 for an empty or inverted range (`to <= from`) and for
    /// ranges entirely outside the window.
    pub fn eligible_blocks(&self, from: BlockNumber, to: BlockNumber) -> u64 {
        if to <= from {
            return 0;
        }
        // Intersect [from, to) with [start, end] expressed as [start, end + 1).
        let lo = from.max(self.start_block);
        let hi = to.min(self.end_block.saturating_add(1));
        hi.saturating_sub(lo)
    }

    /// Reward emitted over `[from, to)`: `eligible_blocks × reward_per_block`.
    ///
    /// # Errors
    ///
    /// - [`ScheduleError::Overflow`] if the product exceeds `u128`
    pub fn reward_for_range(&self, from: BlockNumber, to: BlockNumber) -> Result<RewardAmount> {
        let blocks = self.eligible_blocks(from, to);
        (blocks as u128)
            .checked_mul(self.reward_per_block)
            .ok_or(ScheduleError::Overflow { blocks })
    }
}
