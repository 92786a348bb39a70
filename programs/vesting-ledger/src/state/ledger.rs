use anchor_lang::prelude::*;

use crate::constants::MAX_ASSETS;
use crate::error::LedgerError;
use crate::state::UnlockSchedule;

/// Balance record for a single tracked asset. The native lamport balance
/// lives in a record like any other, keyed by the `NATIVE_ASSET` sentinel.
///
/// Invariants: `claimed_amount <= vested_amount <= initial_amount`, and
/// both running totals are non-decreasing for the life of the ledger.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AssetRecord {
    /// Token mint, or `NATIVE_ASSET` for lamports.
    pub asset: Pubkey,
    /// Amount deposited at funding time; fixed thereafter.
    pub initial_amount: u64,
    /// Cached amount unlocked so far.
    pub vested_amount: u64,
    /// Cumulative amount withdrawn by the beneficiary.
    pub claimed_amount: u64,
    /// Cached unlock rate (amount per second), derived on the first
    /// evaluation past the start unless a cliff rate overrides it.
    pub vesting_slope: u64,
    /// One-shot flag for the slope cache.
    pub slope_cached: bool,
    /// Timestamp of the last vesting evaluation; accrual is always
    /// `slope * (now - last_eval_ts)`, which makes repeated evaluation at
    /// one timestamp idempotent.
    pub last_eval_ts: i64,
}

impl AssetRecord {
    pub const SIZE: usize =
        32 + // asset
        8 +  // initial_amount
        8 +  // vested_amount
        8 +  // claimed_amount
        8 +  // vesting_slope
        1 +  // slope_cached
        8;   // last_eval_ts

    pub fn new(asset: Pubkey, initial_amount: u64) -> Self {
        Self {
            asset,
            initial_amount,
            ..Self::default()
        }
    }

    pub fn claimable_amount(&self) -> u64 {
        self.vested_amount.saturating_sub(self.claimed_amount)
    }

    pub fn unvested_amount(&self) -> u64 {
        self.initial_amount.saturating_sub(self.vested_amount)
    }

    /// Advance the cached vested amount to `now`. This is the only place
    /// time passage is ever observed; callers needing fresh balance
    /// figures invoke it before reading.
    pub fn advance(
        &mut self,
        schedule: &UnlockSchedule,
        now: i64,
    ) -> core::result::Result<(), LedgerError> {
        match *schedule {
            UnlockSchedule::Unset => {}
            UnlockSchedule::Instant { start_ts } => {
                if now >= start_ts {
                    self.vested_amount = self.initial_amount;
                }
            }
            UnlockSchedule::Linear { start_ts, end_ts } => {
                self.accrue(start_ts, end_ts, None, now)?;
            }
            UnlockSchedule::LinearWithCliff {
                start_ts,
                end_ts,
                rate,
            } => {
                self.accrue(start_ts, end_ts, Some(rate), now)?;
            }
        }
        if now > self.last_eval_ts {
            self.last_eval_ts = now;
        }
        Ok(())
    }

    fn accrue(
        &mut self,
        start_ts: i64,
        end_ts: i64,
        rate: Option<u64>,
        now: i64,
    ) -> core::result::Result<(), LedgerError> {
        if now < start_ts {
            return Ok(());
        }
        // Snap to fully vested at/after the end, clearing any floor-division
        // residue (or cliff-rate shortfall) the running total would leave.
        if now >= end_ts {
            self.vested_amount = self.initial_amount;
            return Ok(());
        }
        if !self.slope_cached {
            // `end_ts > start_ts` is enforced when the schedule is set, so
            // the denominator is never zero; instant schedules never reach
            // this branch at all.
            let span = (end_ts - start_ts) as u64;
            self.vesting_slope = match rate {
                Some(rate) => rate,
                None => self.initial_amount / span,
            };
            self.slope_cached = true;
        }
        let since = now.saturating_sub(self.last_eval_ts.max(start_ts));
        let accrued = (self.vesting_slope as u128)
            .checked_mul(since as u128)
            .ok_or(LedgerError::MathOverflow)?;
        let vested = (self.vested_amount as u128)
            .checked_add(accrued)
            .ok_or(LedgerError::MathOverflow)?
            .min(self.initial_amount as u128);
        self.vested_amount = vested as u64;
        Ok(())
    }

    /// Move the full claimable amount to claimed and return it. Callers
    /// commit this mutation before issuing the outgoing transfer, so a
    /// reentrant call mid-transfer observes a zero claimable balance.
    pub fn claim_all(&mut self) -> core::result::Result<u64, LedgerError> {
        let claimable = self.claimable_amount();
        if claimable == 0 {
            return Err(LedgerError::NothingClaimable);
        }
        self.claimed_amount = self
            .claimed_amount
            .checked_add(claimable)
            .ok_or(LedgerError::MathOverflow)?;
        Ok(claimable)
    }
}

/// Single ledger state PDA: identities, the one-shot schedule, and the
/// one-shot funding flag. Native lamports are held on this account.
#[account]
pub struct LedgerState {
    /// Owner identity: sets the schedule and funds the ledger.
    pub owner: Pubkey,
    /// Beneficiary identity: the only one allowed to withdraw.
    pub beneficiary: Pubkey,
    /// Unlock schedule; `Unset` until the owner configures it.
    pub schedule: UnlockSchedule,
    /// One-shot funding flag.
    pub is_funded: bool,
    /// Number of live entries in the asset list PDA.
    pub asset_count: u8,
}

impl LedgerState {
    pub const SIZE: usize =
        32 + // owner
        32 + // beneficiary
        UnlockSchedule::SIZE +
        1 +  // is_funded
        1;   // asset_count

    /// Funding requires a schedule and happens at most once.
    pub fn ensure_can_fund(&self) -> core::result::Result<(), LedgerError> {
        if !self.schedule.is_set() {
            return Err(LedgerError::ScheduleNotSet);
        }
        if self.is_funded {
            return Err(LedgerError::AlreadyFunded);
        }
        Ok(())
    }
}

/// PDA holding the per-asset balance records (fixed capacity; the live
/// count lives in `LedgerState::asset_count`).
#[account]
pub struct AssetLedger {
    pub entries: [AssetRecord; MAX_ASSETS],
}

impl AssetLedger {
    /// Space for discriminator + fixed entries array.
    pub const fn space() -> usize {
        8 + MAX_ASSETS * AssetRecord::SIZE
    }

    pub fn record(&self, count: u8, asset: &Pubkey) -> Option<&AssetRecord> {
        self.entries
            .iter()
            .take(count as usize)
            .find(|e| e.asset == *asset)
    }

    pub fn record_mut(&mut self, count: u8, asset: &Pubkey) -> Option<&mut AssetRecord> {
        self.entries
            .iter_mut()
            .take(count as usize)
            .find(|e| e.asset == *asset)
    }

    /// Append a record, rejecting duplicates and overflow of the fixed
    /// capacity. `count` is the caller's running live count.
    pub fn push(
        &mut self,
        count: &mut u8,
        record: AssetRecord,
    ) -> core::result::Result<(), LedgerError> {
        if self.record(*count, &record.asset).is_some() {
            return Err(LedgerError::DuplicateAsset);
        }
        let idx = *count as usize;
        if idx >= MAX_ASSETS {
            return Err(LedgerError::AssetListFull);
        }
        self.entries[idx] = record;
        *count = count.checked_add(1).ok_or(LedgerError::MathOverflow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NATIVE_ASSET;

    fn mint(byte: u8) -> Pubkey {
        Pubkey::new_from_array([byte; 32])
    }

    fn linear(start_ts: i64, end_ts: i64) -> UnlockSchedule {
        let mut s = UnlockSchedule::Unset;
        s.set(start_ts, Some(end_ts), None).unwrap();
        s
    }

    fn cliff(start_ts: i64, end_ts: i64, rate: u64) -> UnlockSchedule {
        let mut s = UnlockSchedule::Unset;
        s.set(start_ts, Some(end_ts), Some(rate)).unwrap();
        s
    }

    fn instant(start_ts: i64) -> UnlockSchedule {
        let mut s = UnlockSchedule::Unset;
        s.set(start_ts, None, None).unwrap();
        s
    }

    fn check_invariants(r: &AssetRecord) {
        assert!(r.claimed_amount <= r.vested_amount);
        assert!(r.vested_amount <= r.initial_amount);
        assert_eq!(r.claimable_amount(), r.vested_amount - r.claimed_amount);
        assert_eq!(r.unvested_amount(), r.initial_amount - r.vested_amount);
    }

    #[test]
    fn zero_progress_before_start() {
        let s = linear(1_000, 51_000);
        let mut r = AssetRecord::new(mint(1), 500_000);
        r.advance(&s, 999).unwrap();
        assert_eq!(r.vested_amount, 0);
        assert_eq!(r.unvested_amount(), 500_000);
        assert_eq!(r.claimable_amount(), 0);
        check_invariants(&r);
    }

    #[test]
    fn instant_unlock_full_at_start() {
        // Three token balances plus 0.1 in native units, unlocking all at
        // once at a future start time.
        let s = instant(100_000 + 1_000);
        let amounts = [69_420_420u64, 69_000_000, 42_000_000];
        let mut records: Vec<AssetRecord> = amounts
            .iter()
            .enumerate()
            .map(|(i, &a)| AssetRecord::new(mint(i as u8 + 1), a))
            .collect();
        records.push(AssetRecord::new(NATIVE_ASSET, 100_000_000));

        // Before the start nothing is vested.
        for r in records.iter_mut() {
            r.advance(&s, 100_999).unwrap();
            assert_eq!(r.unvested_amount(), r.initial_amount);
            assert_eq!(r.claimable_amount(), 0);
        }
        // At/after the start everything is.
        for r in records.iter_mut() {
            r.advance(&s, 101_000).unwrap();
            assert_eq!(r.claimable_amount(), r.initial_amount);
            assert_eq!(r.unvested_amount(), 0);
            check_invariants(r);
        }
    }

    #[test]
    fn linear_slope_is_floor_of_initial_over_span() {
        let s = linear(100_000, 600_000);
        let mut r = AssetRecord::new(mint(1), 69_420_420);
        r.advance(&s, 100_001).unwrap();
        assert!(r.slope_cached);
        assert_eq!(r.vesting_slope, 69_420_420 / 500_000);
    }

    #[test]
    fn linear_checkpoint_accrual() {
        // Linear over [t, t+50000]: at t+10000 the claimable amount is
        // exactly slope * 10000.
        let t = 1_000;
        let s = linear(t, t + 50_000);
        let initial = 69_420_420u64;
        let mut r = AssetRecord::new(mint(1), initial);
        r.advance(&s, t + 10_000).unwrap();
        let slope = initial / 50_000;
        assert_eq!(r.claimable_amount(), slope * 10_000);
        check_invariants(&r);
    }

    #[test]
    fn linear_snaps_to_full_at_end() {
        // 69420421 / 50000 floors, so the running total alone would strand
        // dust; the end-of-schedule snap must clear it.
        let t = 1_000;
        let s = linear(t, t + 50_000);
        let mut r = AssetRecord::new(mint(1), 69_420_421);
        for i in 1..=5 {
            r.advance(&s, t + i * 10_000).unwrap();
            check_invariants(&r);
        }
        assert_eq!(r.vested_amount, 69_420_421);
        // And it stays there.
        r.advance(&s, t + 60_000).unwrap();
        assert_eq!(r.vested_amount, 69_420_421);
    }

    #[test]
    fn cliff_rate_overrides_derived_slope() {
        let t = 1_000;
        let s = cliff(t, t + 50_000, 69);
        let mut r = AssetRecord::new(mint(1), 69_420_420);
        r.advance(&s, t + 10_000).unwrap();
        assert_eq!(r.vesting_slope, 69);
        assert_eq!(r.vested_amount, 69 * 10_000);
    }

    #[test]
    fn cliff_snaps_to_full_at_end_despite_shortfall() {
        // rate * span = 69 * 50000 is far short of the initial amount, yet
        // the end boundary still reports fully vested.
        let t = 1_000;
        let s = cliff(t, t + 50_000, 69);
        let mut r = AssetRecord::new(mint(1), 69_420_420);
        r.advance(&s, t + 49_999).unwrap();
        assert!(r.vested_amount < r.initial_amount);
        r.advance(&s, t + 50_000).unwrap();
        assert_eq!(r.vested_amount, 69_420_420);
    }

    #[test]
    fn cliff_accrual_caps_at_initial_before_end() {
        // An aggressive rate unlocks everything long before the end but can
        // never exceed the initial amount.
        let t = 1_000;
        let s = cliff(t, t + 50_000, 1_000_000);
        let mut r = AssetRecord::new(mint(1), 5_000_000);
        r.advance(&s, t + 10_000).unwrap();
        assert_eq!(r.vested_amount, 5_000_000);
        check_invariants(&r);
    }

    #[test]
    fn refresh_is_idempotent_at_a_fixed_timestamp() {
        let t = 1_000;
        let s = linear(t, t + 50_000);
        let mut r = AssetRecord::new(mint(1), 69_420_420);
        r.advance(&s, t + 10_000).unwrap();
        let once = r.vested_amount;
        r.advance(&s, t + 10_000).unwrap();
        r.advance(&s, t + 10_000).unwrap();
        assert_eq!(r.vested_amount, once);
    }

    #[test]
    fn accrual_counts_from_start_not_from_stale_cursor() {
        // An evaluation long before the start must not inflate the first
        // accrual window past it.
        let s = linear(100_000, 150_000);
        let mut r = AssetRecord::new(mint(1), 500_000);
        r.advance(&s, 10).unwrap();
        r.advance(&s, 110_000).unwrap();
        assert_eq!(r.vested_amount, (500_000 / 50_000) * 10_000);
    }

    #[test]
    fn vesting_is_monotonic_across_interleaved_claims() {
        let t = 1_000;
        let s = linear(t, t + 50_000);
        let mut r = AssetRecord::new(mint(1), 69_420_420);
        let mut last_vested = 0u64;
        let mut last_claimed = 0u64;
        for i in 1..=6 {
            r.advance(&s, t + i * 10_000).unwrap();
            assert!(r.vested_amount >= last_vested);
            last_vested = r.vested_amount;
            if r.claimable_amount() > 0 {
                r.claim_all().unwrap();
                assert_eq!(r.claimable_amount(), 0);
            }
            assert!(r.claimed_amount >= last_claimed);
            last_claimed = r.claimed_amount;
            check_invariants(&r);
        }
        // Everything vested was eventually claimed, nothing more.
        assert_eq!(r.claimed_amount, r.initial_amount);
    }

    #[test]
    fn claim_requires_a_claimable_balance() {
        let s = instant(100_000);
        let mut r = AssetRecord::new(mint(1), 42_000_000);
        assert!(matches!(r.claim_all(), Err(LedgerError::NothingClaimable)));
        // A qualifying refresh makes the same claim succeed, once.
        r.advance(&s, 100_001).unwrap();
        assert_eq!(r.claim_all().unwrap(), 42_000_000);
        assert_eq!(r.claimable_amount(), 0);
        assert!(matches!(r.claim_all(), Err(LedgerError::NothingClaimable)));
    }

    #[test]
    fn advance_with_unset_schedule_is_a_no_op() {
        let mut r = AssetRecord::new(mint(1), 42);
        r.advance(&UnlockSchedule::Unset, 1_000_000).unwrap();
        assert_eq!(r.vested_amount, 0);
    }

    #[test]
    fn funding_guards_are_one_shot_and_ordered() {
        let mut ledger = LedgerState {
            owner: mint(9),
            beneficiary: mint(8),
            schedule: UnlockSchedule::Unset,
            is_funded: false,
            asset_count: 0,
        };
        assert!(matches!(
            ledger.ensure_can_fund(),
            Err(LedgerError::ScheduleNotSet)
        ));
        ledger.schedule.set(100, None, None).unwrap();
        ledger.ensure_can_fund().unwrap();
        ledger.is_funded = true;
        assert!(matches!(
            ledger.ensure_can_fund(),
            Err(LedgerError::AlreadyFunded)
        ));
    }

    #[test]
    fn asset_list_rejects_duplicates_and_overflow() {
        let mut assets = AssetLedger {
            entries: [AssetRecord::default(); MAX_ASSETS],
        };
        let mut count = 0u8;
        assets.push(&mut count, AssetRecord::new(mint(1), 10)).unwrap();
        assert!(matches!(
            assets.push(&mut count, AssetRecord::new(mint(1), 20)),
            Err(LedgerError::DuplicateAsset)
        ));
        for i in 2..=MAX_ASSETS as u8 {
            assets.push(&mut count, AssetRecord::new(mint(i), 10)).unwrap();
        }
        assert!(matches!(
            assets.push(&mut count, AssetRecord::new(mint(99), 10)),
            Err(LedgerError::AssetListFull)
        ));
        assert_eq!(count as usize, MAX_ASSETS);
        // Lookup only sees live entries.
        assert!(assets.record(count, &mint(1)).is_some());
        assert!(assets.record(0, &mint(1)).is_none());
    }
}
