use anchor_lang::prelude::*;

use crate::error::LedgerError;

/// Unlock schedule for the whole ledger, set exactly once by the owner.
/// `Unset` is the only state from which `set` succeeds; after that the
/// schedule is frozen for the life of the ledger.
///
/// Exactly three parameter shapes are valid: start only (everything
/// unlocks at `start_ts`), start + end (linear unlock, slope derived per
/// asset), and start + end + rate (linear unlock with the rate used as
/// the slope instead of the derived one).
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnlockSchedule {
    Unset,
    Instant {
        start_ts: i64,
    },
    Linear {
        start_ts: i64,
        end_ts: i64,
    },
    LinearWithCliff {
        start_ts: i64,
        end_ts: i64,
        rate: u64,
    },
}

impl UnlockSchedule {
    /// Serialized size of the widest variant (tag + start + end + rate).
    pub const SIZE: usize = 1 + 8 + 8 + 8;

    pub fn is_set(&self) -> bool {
        !matches!(self, UnlockSchedule::Unset)
    }

    /// One-shot transition out of `Unset`.
    pub fn set(
        &mut self,
        start_ts: i64,
        end_ts: Option<i64>,
        cliff_rate: Option<u64>,
    ) -> core::result::Result<(), LedgerError> {
        if self.is_set() {
            return Err(LedgerError::AlreadySet);
        }
        if start_ts <= 0 {
            return Err(LedgerError::InvalidTimestamp);
        }
        *self = match (end_ts, cliff_rate) {
            (None, None) => UnlockSchedule::Instant { start_ts },
            (Some(end_ts), None) => {
                if end_ts <= start_ts {
                    return Err(LedgerError::InvalidTimestamp);
                }
                UnlockSchedule::Linear { start_ts, end_ts }
            }
            (Some(end_ts), Some(rate)) => {
                if end_ts <= start_ts {
                    return Err(LedgerError::InvalidTimestamp);
                }
                if rate == 0 {
                    return Err(LedgerError::InvalidConfig);
                }
                UnlockSchedule::LinearWithCliff {
                    start_ts,
                    end_ts,
                    rate,
                }
            }
            // A cliff rate without an end time is not a valid arity.
            (None, Some(_)) => return Err(LedgerError::InvalidConfig),
        };
        Ok(())
    }

    pub fn unlock_start_ts(&self) -> Option<i64> {
        match *self {
            UnlockSchedule::Unset => None,
            UnlockSchedule::Instant { start_ts }
            | UnlockSchedule::Linear { start_ts, .. }
            | UnlockSchedule::LinearWithCliff { start_ts, .. } => Some(start_ts),
        }
    }

    pub fn unlock_end_ts(&self) -> Option<i64> {
        match *self {
            UnlockSchedule::Linear { end_ts, .. }
            | UnlockSchedule::LinearWithCliff { end_ts, .. } => Some(end_ts),
            _ => None,
        }
    }

    /// The configured cliff rate, when one was supplied.
    pub fn cliff_rate(&self) -> Option<u64> {
        match *self {
            UnlockSchedule::LinearWithCliff { rate, .. } => Some(rate),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_accepts_all_three_arities() {
        let mut s = UnlockSchedule::Unset;
        s.set(100, None, None).unwrap();
        assert_eq!(s, UnlockSchedule::Instant { start_ts: 100 });
        assert_eq!(s.unlock_start_ts(), Some(100));
        assert_eq!(s.unlock_end_ts(), None);

        let mut s = UnlockSchedule::Unset;
        s.set(100, Some(600), None).unwrap();
        assert_eq!(
            s,
            UnlockSchedule::Linear {
                start_ts: 100,
                end_ts: 600
            }
        );

        let mut s = UnlockSchedule::Unset;
        s.set(100, Some(600), Some(69)).unwrap();
        assert_eq!(s.unlock_end_ts(), Some(600));
        assert_eq!(s.cliff_rate(), Some(69));
    }

    #[test]
    fn set_is_one_shot() {
        let mut s = UnlockSchedule::Unset;
        s.set(100, None, None).unwrap();
        assert!(matches!(
            s.set(200, None, None),
            Err(LedgerError::AlreadySet)
        ));
        // First params survive the rejected second call.
        assert_eq!(s.unlock_start_ts(), Some(100));
    }

    #[test]
    fn set_rejects_bad_params() {
        let mut s = UnlockSchedule::Unset;
        assert!(matches!(
            s.set(0, None, None),
            Err(LedgerError::InvalidTimestamp)
        ));
        assert!(matches!(
            s.set(100, Some(100), None),
            Err(LedgerError::InvalidTimestamp)
        ));
        assert!(matches!(
            s.set(100, None, Some(69)),
            Err(LedgerError::InvalidConfig)
        ));
        assert!(matches!(
            s.set(100, Some(600), Some(0)),
            Err(LedgerError::InvalidConfig)
        ));
        // All rejections leave the schedule unset.
        assert!(!s.is_set());
    }
}
