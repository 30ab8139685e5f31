#![no_std]

//! Caller-side session over a deployed health vault.
//!
//! A session validates input before anything is dispatched, derives data
//! hashes for metric submissions, folds every failure into [`VaultError`],
//! and settles write confirmation against a [`ConfirmationPolicy`].

#[cfg(test)]
extern crate std;

mod confirmation;
mod error;
pub mod hash;

use health_vault::HealthVaultContractClient;
use soroban_sdk::{Address, Env, String};

pub use common::{HealthMetrics, ValidationError};
pub use confirmation::{ConfirmationPolicy, ConfirmationSource, LedgerConfirmation, TxStatus};
pub use error::{classify, TryResult, VaultError};
pub use health_vault::{ContractError, HealthDataSummary, HealthField, VaultConfig};

/// Outcome of a confirmed record write
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WriteReceipt {
    pub data_hash: String,
    /// `None` while the write is still pending inside the policy window
    pub confirmed_at: Option<u64>,
}

pub struct VaultSession<'a> {
    env: Env,
    vault: HealthVaultContractClient<'a>,
    caller: Address,
    policy: ConfirmationPolicy,
    source: &'a dyn ConfirmationSource,
}

impl<'a> VaultSession<'a> {
    pub fn new(env: &Env, vault: &Address, caller: Address) -> Self {
        Self {
            env: env.clone(),
            vault: HealthVaultContractClient::new(env, vault),
            caller,
            policy: ConfirmationPolicy::default(),
            source: &LedgerConfirmation,
        }
    }

    pub fn with_policy(mut self, policy: ConfirmationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the default ledger-time confirmation with another observer.
    pub fn with_confirmation(mut self, source: &'a dyn ConfirmationSource) -> Self {
        self.source = source;
        self
    }

    pub fn caller(&self) -> &Address {
        &self.caller
    }

    pub fn policy(&self) -> ConfirmationPolicy {
        self.policy
    }

    pub fn config(&self) -> Result<VaultConfig, VaultError> {
        classify(self.vault.try_get_config())
    }

    // ── Record writes ───────────────────────────────────────

    /// Create the caller's record under a hash derived from `metrics`.
    pub fn upload(&self, metrics: &HealthMetrics) -> Result<WriteReceipt, VaultError> {
        let data_hash = self.derive_hash(metrics);
        self.upload_with_hash(data_hash, metrics)
    }

    /// Create the caller's record under a caller-supplied hash.
    pub fn upload_with_hash(
        &self,
        data_hash: String,
        metrics: &HealthMetrics,
    ) -> Result<WriteReceipt, VaultError> {
        self.check_submission(&data_hash, metrics)?;
        let confirmed_at = self.submit(|| {
            self.vault.try_upload_health_data(
                &self.caller,
                &data_hash,
                &metrics.health_score,
                &metrics.risk_factor,
                &metrics.age_group,
            )
        })?;

        Ok(WriteReceipt {
            data_hash,
            confirmed_at,
        })
    }

    pub fn update(&self, metrics: &HealthMetrics) -> Result<WriteReceipt, VaultError> {
        let data_hash = self.derive_hash(metrics);
        self.update_with_hash(data_hash, metrics)
    }

    pub fn update_with_hash(
        &self,
        data_hash: String,
        metrics: &HealthMetrics,
    ) -> Result<WriteReceipt, VaultError> {
        self.check_submission(&data_hash, metrics)?;
        let confirmed_at = self.submit(|| {
            self.vault.try_update_health_data(
                &self.caller,
                &data_hash,
                &metrics.health_score,
                &metrics.risk_factor,
                &metrics.age_group,
            )
        })?;

        Ok(WriteReceipt {
            data_hash,
            confirmed_at,
        })
    }

    pub fn deactivate(&self) -> Result<Option<u64>, VaultError> {
        self.submit(|| self.vault.try_deactivate_health_data(&self.caller))
    }

    pub fn emergency_clear(&self) -> Result<Option<u64>, VaultError> {
        self.submit(|| self.vault.try_emergency_clear_data(&self.caller))
    }

    // ── Permissions ─────────────────────────────────────────

    pub fn grant(&self, recipient: &Address) -> Result<Option<u64>, VaultError> {
        self.submit(|| {
            self.vault
                .try_grant_sharing_permission(&self.caller, recipient)
        })
    }

    pub fn revoke(&self, recipient: &Address) -> Result<Option<u64>, VaultError> {
        self.submit(|| {
            self.vault
                .try_revoke_sharing_permission(&self.caller, recipient)
        })
    }

    pub fn has_permission(&self, owner: &Address, recipient: &Address) -> Result<bool, VaultError> {
        classify(self.vault.try_has_sharing_permission(owner, recipient))
    }

    // ── Reads ───────────────────────────────────────────────

    pub fn summary(&self) -> Result<HealthDataSummary, VaultError> {
        classify(self.vault.try_get_user_health_data(&self.caller))
    }

    /// The caller's own fields, or `None` if they never uploaded.
    pub fn my_metrics(&self) -> Result<Option<HealthMetrics>, VaultError> {
        match classify(self.vault.try_get_my_health_data(&self.caller)) {
            Ok(metrics) => Ok(Some(metrics)),
            Err(VaultError::PreconditionFailed(ContractError::NoHealthDataUploaded)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Read one field of `owner`'s record through a grant.
    pub fn shared_field(&self, owner: &Address, field: HealthField) -> Result<u32, VaultError> {
        let result = match field {
            HealthField::HealthScore => self.vault.try_share_health_score(&self.caller, owner),
            HealthField::RiskFactor => self.vault.try_share_risk_factor(&self.caller, owner),
            HealthField::AgeGroup => self.vault.try_share_age_group(&self.caller, owner),
        };
        classify(result)
    }

    pub fn compare_scores(&self, user1: &Address, user2: &Address) -> Result<i32, VaultError> {
        classify(
            self.vault
                .try_compare_health_scores(&self.caller, user1, user2),
        )
    }

    // ── Internals ───────────────────────────────────────────

    fn derive_hash(&self, metrics: &HealthMetrics) -> String {
        hash::derive_data_hash(&self.env, metrics, self.env.ledger().timestamp())
    }

    /// Metric bounds come from the vault's live config.
    fn check_submission(&self, data_hash: &String, metrics: &HealthMetrics) -> Result<(), VaultError> {
        health_vault::validation::validate_data_hash(data_hash)?;
        let config = self.config()?;
        common::validate_metrics(metrics, config.age_banding)?;
        Ok(())
    }

    /// Dispatch, then settle against the policy. A rejected invocation never
    /// reaches confirmation; a timed-out one may still have been applied.
    fn submit(&self, call: impl FnOnce() -> TryResult<()>) -> Result<Option<u64>, VaultError> {
        let submitted_at = self.env.ledger().timestamp();
        classify(call())?;
        self.policy
            .settle(submitted_at, self.source.status(&self.env, submitted_at))
    }
}
