//! Claim interval policy and the begin/settle claim protocol.
//!
//! A participant may claim at most once per configured interval. The first
//! ever claim is always interval-eligible (`last_claim_at == 0` sentinel).
//!
//! Claiming is split into two steps so the coordinator can interleave the
//! external reward payout between them:
//!
//! 1. [`begin_claim`] — interval check, checkpoint, reads the claimable
//!    amount. Rejects with `ClaimTooSoon` or `NothingToClaim`. Does NOT
//!    zero the balance.
//! 2. [`settle_claim`] — zeroes the balance and stamps `last_claim_at`.
//!
//! If the payout collaborator fails, the coordinator simply never settles:
//! the balance and claim timestamp are untouched and the claim can be
//! retried.

use serde::{Deserialize, Serialize};

use grove_schedule::RewardSchedule;
use grove_types::{Address, BlockNumber, RewardAmount};

use crate::accrual::{AccrualLedger, StakerAccount};
use crate::{LedgerError, Result};

/// Minimum gap between two successful claims by the same participant.
///
/// Configured in whole minutes, enforced in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimPolicy {
    interval_secs: u64,
}

impl ClaimPolicy {
    /// Create a policy from a claim interval in minutes.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidInterval`] if `minutes` is zero
    pub fn from_minutes(minutes: u64) -> Result<Self> {
        if minutes == 0 {
            return Err(LedgerError::InvalidInterval);
        }
        Ok(Self {
            interval_secs: minutes.saturating_mul(60),
        })
    }

    /// The enforced interval in seconds.
    pub fn interval_secs(&self) -> u64 {
        self.interval_secs
    }
}

/// Check whether the account is interval-eligible to claim at `now`.
///
/// # Errors
///
/// - [`LedgerError::ClaimTooSoon`] if the interval has not elapsed since
///   the last successful claim
pub fn check_interval(policy: &ClaimPolicy, account: &StakerAccount, now: u64) -> Result<()> {
    if account.last_claim_at == 0 {
        return Ok(());
    }
    let next_allowed_at = account.last_claim_at.saturating_add(policy.interval_secs);
    if now < next_allowed_at {
        return Err(LedgerError::ClaimTooSoon {
            next_allowed_at,
            now,
        });
    }
    Ok(())
}

/// Begin a claim: interval check, checkpoint, read the claimable amount.
///
/// Leaves the balance in place; the caller settles with [`settle_claim`]
/// once the external payout has succeeded.
///
/// # Errors
///
/// - [`LedgerError::ClaimTooSoon`] if the interval has not elapsed
/// - [`LedgerError::NothingToClaim`] if the checkpointed balance is zero
/// - [`LedgerError::Schedule`] on reward arithmetic overflow
pub fn begin_claim(
    ledger: &mut AccrualLedger,
    policy: &ClaimPolicy,
    participant: Address,
    staked_count: usize,
    current_block: BlockNumber,
    now: u64,
    schedule: &RewardSchedule,
) -> Result<RewardAmount> {
    if let Some(account) = ledger.account(&participant) {
        check_interval(policy, account, now)?;
    }

    ledger.checkpoint(participant, staked_count, current_block, schedule)?;

    let amount = ledger.unclaimed(&participant);
    if amount == 0 {
        return Err(LedgerError::NothingToClaim);
    }
    Ok(amount)
}

/// Settle a claim begun with [`begin_claim`]: zero the balance and stamp
/// the claim timestamp. Returns the settled amount.
pub fn settle_claim(ledger: &mut AccrualLedger, participant: Address, now: u64) -> RewardAmount {
    let Some(account) = ledger.account_mut(&participant) else {
        return 0;
    };
    let amount = account.unclaimed;
    account.unclaimed = 0;
    account.last_claim_at = now;

    tracing::info!(
        participant = %hex::encode(participant),
        amount,
        at = now,
        "claim settled"
    );
    amount
}

#[cfg(test)]
mod tests {
    use super::*;
    use grove_types::WEI_PER_TOKEN;

    const ALICE: Address = [0xA1; 20];
    const RATE: u128 = WEI_PER_TOKEN / 10;

    fn schedule() -> RewardSchedule {
        RewardSchedule::new(RATE, 100, 10_000).expect("schedule")
    }

    fn policy() -> ClaimPolicy {
        ClaimPolicy::from_minutes(10).expect("policy")
    }

    #[test]
    fn test_policy_from_minutes() {
        assert_eq!(policy().interval_secs(), 600);
        assert!(matches!(
            ClaimPolicy::from_minutes(0).expect_err("zero interval"),
            LedgerError::InvalidInterval
        ));
    }

    #[test]
    fn test_first_claim_skips_interval_check() {
        let account = StakerAccount {
            last_checkpoint_block: 100,
            unclaimed: 1,
            last_claim_at: 0,
        };
        check_interval(&policy(), &account, 0).expect("first claim always eligible");
    }

    #[test]
    fn test_interval_boundary() {
        let account = StakerAccount {
            last_checkpoint_block: 100,
            unclaimed: 1,
            last_claim_at: 1_000,
        };
        let pol = policy();
        assert!(check_interval(&pol, &account, 1_599).is_err());
        check_interval(&pol, &account, 1_600).expect("exactly at interval");
        check_interval(&pol, &account, 2_000).expect("past interval");
    }

    #[test]
    fn test_begin_claim_happy_path() {
        let mut ledger = AccrualLedger::new();
        let sched = schedule();
        ledger.checkpoint(ALICE, 1, 200, &sched).expect("init");
        let amount =
            begin_claim(&mut ledger, &policy(), ALICE, 1, 300, 5_000, &sched).expect("claim");
        assert_eq!(amount, 100 * RATE);
        // Not settled yet: balance still in place.
        assert_eq!(ledger.unclaimed(&ALICE), amount);
        assert_eq!(ledger.last_claim_at(&ALICE), 0);
    }

    #[test]
    fn test_begin_claim_nothing_to_claim() {
        let mut ledger = AccrualLedger::new();
        let sched = schedule();
        let err = begin_claim(&mut ledger, &policy(), ALICE, 0, 300, 5_000, &sched)
            .expect_err("no balance");
        assert!(matches!(err, LedgerError::NothingToClaim));
    }

    #[test]
    fn test_begin_claim_too_soon_leaves_balance() {
        let mut ledger = AccrualLedger::new();
        let sched = schedule();
        ledger.checkpoint(ALICE, 1, 200, &sched).expect("init");
        ledger.checkpoint(ALICE, 1, 300, &sched).expect("accrue");
        settle_claim(&mut ledger, ALICE, 5_000);

        ledger.checkpoint(ALICE, 1, 400, &sched).expect("accrue more");
        let balance_before = ledger.unclaimed(&ALICE);
        let err = begin_claim(&mut ledger, &policy(), ALICE, 1, 400, 5_100, &sched)
            .expect_err("too soon");
        assert!(matches!(
            err,
            LedgerError::ClaimTooSoon {
                next_allowed_at: 5_600,
                now: 5_100
            }
        ));
        assert_eq!(ledger.unclaimed(&ALICE), balance_before);
        assert_eq!(ledger.last_claim_at(&ALICE), 5_000);
    }

    #[test]
    fn test_settle_claim_zeroes_and_stamps() {
        let mut ledger = AccrualLedger::new();
        let sched = schedule();
        ledger.checkpoint(ALICE, 1, 200, &sched).expect("init");
        ledger.checkpoint(ALICE, 1, 250, &sched).expect("accrue");

        let amount = settle_claim(&mut ledger, ALICE, 7_777);
        assert_eq!(amount, 50 * RATE);
        assert_eq!(ledger.unclaimed(&ALICE), 0);
        assert_eq!(ledger.last_claim_at(&ALICE), 7_777);
    }

    #[test]
    fn test_claim_cycle_after_interval() {
        let mut ledger = AccrualLedger::new();
        let sched = schedule();
        let pol = policy();
        ledger.checkpoint(ALICE, 1, 200, &sched).expect("init");

        begin_claim(&mut ledger, &pol, ALICE, 1, 300, 1_000, &sched).expect("first claim");
        settle_claim(&mut ledger, ALICE, 1_000);

        // Interval elapsed, new accrual available.
        let amount =
            begin_claim(&mut ledger, &pol, ALICE, 1, 400, 1_000 + 600, &sched).expect("second");
        assert_eq!(amount, 100 * RATE);
    }

    #[test]
    fn test_settle_unknown_participant_is_zero() {
        let mut ledger = AccrualLedger::new();
        assert_eq!(settle_claim(&mut ledger, ALICE, 1), 0);
    }

    #[test]
    fn test_claim_while_unstaked_with_residual_balance() {
        let mut ledger = AccrualLedger::new();
        let sched = schedule();
        ledger.checkpoint(ALICE, 1, 200, &sched).expect("init");
        ledger.checkpoint(ALICE, 1, 300, &sched).expect("accrue");
        // Fully unstaked now, but the prior balance remains claimable.
        let amount =
            begin_claim(&mut ledger, &policy(), ALICE, 0, 350, 9_000, &sched).expect("claim");
        assert_eq!(amount, 100 * RATE);
    }
}
