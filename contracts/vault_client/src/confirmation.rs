use soroban_sdk::Env;

use crate::VaultError;

/// Observed state of a submitted transaction
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TxStatus {
    Confirmed { at: u64 },
    Failed,
    Pending { now: u64 },
}

/// How long a write may stay unconfirmed before it is reported as timed out.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ConfirmationPolicy {
    pub timeout_secs: u64,
}

impl ConfirmationPolicy {
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

    pub fn new(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }

    /// Resolve `status` for a transaction submitted at `submitted_at`.
    ///
    /// Returns the confirmation time, or `None` while still pending inside
    /// the window.
    pub fn settle(&self, submitted_at: u64, status: TxStatus) -> Result<Option<u64>, VaultError> {
        match status {
            TxStatus::Confirmed { at } if self.within(submitted_at, at) => Ok(Some(at)),
            TxStatus::Confirmed { .. } => Err(VaultError::Timeout),
            TxStatus::Failed => Err(VaultError::TransactionFailed),
            TxStatus::Pending { now } if self.within(submitted_at, now) => Ok(None),
            TxStatus::Pending { .. } => Err(VaultError::Timeout),
        }
    }

    fn within(&self, submitted_at: u64, at: u64) -> bool {
        at.saturating_sub(submitted_at) <= self.timeout_secs
    }
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT_SECS)
    }
}

/// Where a session learns the fate of a write it has dispatched.
pub trait ConfirmationSource {
    fn status(&self, env: &Env, submitted_at: u64) -> TxStatus;
}

/// Invocations settle in the ledger they were applied to, so a dispatched
/// write is confirmed at the current ledger time.
#[derive(Clone, Copy, Debug, Default)]
pub struct LedgerConfirmation;

impl ConfirmationSource for LedgerConfirmation {
    fn status(&self, env: &Env, _submitted_at: u64) -> TxStatus {
        TxStatus::Confirmed {
            at: env.ledger().timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SUBMITTED: u64 = 1_700_000_000;

    #[test]
    fn test_default_window() {
        assert_eq!(ConfirmationPolicy::default().timeout_secs, 60);
    }

    #[test]
    fn test_settle() {
        let policy = ConfirmationPolicy::default();

        assert_eq!(
            policy.settle(SUBMITTED, TxStatus::Confirmed { at: SUBMITTED }),
            Ok(Some(SUBMITTED))
        );
        assert_eq!(
            policy.settle(SUBMITTED, TxStatus::Confirmed { at: SUBMITTED + 60 }),
            Ok(Some(SUBMITTED + 60))
        );
        assert_eq!(
            policy.settle(SUBMITTED, TxStatus::Confirmed { at: SUBMITTED + 61 }),
            Err(VaultError::Timeout)
        );
        assert_eq!(
            policy.settle(SUBMITTED, TxStatus::Pending { now: SUBMITTED + 30 }),
            Ok(None)
        );
        assert_eq!(
            policy.settle(SUBMITTED, TxStatus::Pending { now: SUBMITTED + 61 }),
            Err(VaultError::Timeout)
        );
        assert_eq!(
            policy.settle(SUBMITTED, TxStatus::Failed),
            Err(VaultError::TransactionFailed)
        );
    }

    #[test]
    fn test_ledger_confirmation_uses_ledger_time() {
        use soroban_sdk::testutils::Ledger;

        let env = Env::default();
        env.ledger().with_mut(|li| li.timestamp = SUBMITTED + 7);
        assert_eq!(
            LedgerConfirmation.status(&env, SUBMITTED),
            TxStatus::Confirmed { at: SUBMITTED + 7 }
        );
    }

    #[test]
    fn test_clock_skew_counts_as_inside_window() {
        let policy = ConfirmationPolicy::new(5);
        assert_eq!(
            policy.settle(SUBMITTED, TxStatus::Confirmed { at: SUBMITTED - 10 }),
            Ok(Some(SUBMITTED - 10))
        );
    }

    proptest! {
        #[test]
        fn prop_pending_times_out_exactly_past_window(timeout in 0u64..3_600, elapsed in 0u64..7_200) {
            let policy = ConfirmationPolicy::new(timeout);
            let settled = policy.settle(SUBMITTED, TxStatus::Pending { now: SUBMITTED + elapsed });
            if elapsed <= timeout {
                prop_assert_eq!(settled, Ok(None));
            } else {
                prop_assert_eq!(settled, Err(VaultError::Timeout));
            }
        }
    }
}
