#![no_std]

#[cfg(any(test, feature = "testutils"))]
extern crate std;

pub mod emergency;
pub mod events;
#[cfg(any(test, feature = "testutils"))]
pub mod fixtures;
mod records;
pub mod validation;

use core::cmp::Ordering;

use common::{AgeBanding, HealthMetrics, ValidationError};
use soroban_sdk::{
    contract, contractimpl, contracttype, log, symbol_short, Address, Env, String, Symbol,
};

pub use emergency::EmergencyClearEntry;

/// Storage keys for the contract
const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const CONFIG: Symbol = symbol_short!("CONFIG");

const CONTRACT_VERSION: u32 = 1;

/// Tunable vault policy, held in instance storage.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultConfig {
    pub age_banding: AgeBanding,
}

impl VaultConfig {
    pub fn default_config() -> Self {
        Self {
            age_banding: AgeBanding::Five,
        }
    }
}

/// Scalar fields that can be read out of a record
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HealthField {
    HealthScore,
    RiskFactor,
    AgeGroup,
}

/// One record per owner. `owner` never changes once written and
/// `is_active` only ever goes from true to false.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HealthRecord {
    pub owner: Address,
    pub data_hash: String,
    pub health_score: u32,
    pub risk_factor: u32,
    pub age_group: u32,
    pub timestamp: u64,
    pub is_active: bool,
    pub is_encrypted: bool,
}

impl HealthRecord {
    pub fn field(&self, field: HealthField) -> u32 {
        match field {
            HealthField::HealthScore => self.health_score,
            HealthField::RiskFactor => self.risk_factor,
            HealthField::AgeGroup => self.age_group,
        }
    }

    pub fn metrics(&self) -> HealthMetrics {
        HealthMetrics {
            health_score: self.health_score,
            risk_factor: self.risk_factor,
            age_group: self.age_group,
        }
    }
}

/// Public metadata view of a record, without the scalar fields
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HealthDataSummary {
    pub data_hash: String,
    pub timestamp: u64,
    pub owner: Address,
    pub is_active: bool,
    pub is_encrypted: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContractInfo {
    pub version: u32,
    pub fhe_supported: bool,
    pub fhe_version: String,
}

/// Contract errors
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    EmptyDataHash = 4,
    DataHashTooLong = 5,
    InvalidHealthScore = 6,
    InvalidRiskFactor = 7,
    InvalidAgeGroup = 8,
    HealthDataAlreadyExists = 9,
    NoHealthDataUploaded = 10,
    CannotGrantToSelf = 11,
    InvalidRecipient = 12,
    PermissionDenied = 13,
    DataUnavailable = 14,
    DataNotActive = 15,
    MalformedDataHash = 16,
}

impl ContractError {
    /// The input-validation subset, as opposed to state guards.
    pub fn as_validation(self) -> Option<ValidationError> {
        match self {
            ContractError::EmptyDataHash => Some(ValidationError::EmptyDataHash),
            ContractError::DataHashTooLong => Some(ValidationError::DataHashTooLong),
            ContractError::MalformedDataHash => Some(ValidationError::DataHashMalformed),
            ContractError::InvalidHealthScore => Some(ValidationError::HealthScoreOutOfRange),
            ContractError::InvalidRiskFactor => Some(ValidationError::RiskFactorOutOfRange),
            ContractError::InvalidAgeGroup => Some(ValidationError::AgeGroupOutOfRange),
            _ => None,
        }
    }
}

impl From<ValidationError> for ContractError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::EmptyDataHash => ContractError::EmptyDataHash,
            ValidationError::DataHashTooLong => ContractError::DataHashTooLong,
            ValidationError::DataHashMalformed => ContractError::MalformedDataHash,
            ValidationError::HealthScoreOutOfRange => ContractError::InvalidHealthScore,
            ValidationError::RiskFactorOutOfRange => ContractError::InvalidRiskFactor,
            ValidationError::AgeGroupOutOfRange => ContractError::InvalidAgeGroup,
        }
    }
}

#[contract]
pub struct HealthVaultContract;

#[contractimpl]
impl HealthVaultContract {
    /// Initialize the vault with an admin and an age-group policy
    pub fn initialize(
        env: Env,
        admin: Address,
        age_banding: AgeBanding,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        admin.require_auth();

        let config = VaultConfig { age_banding };
        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&CONFIG, &config);
        env.storage().instance().set(&INITIALIZED, &true);

        events::publish_initialized(&env, admin, age_banding);

        Ok(())
    }

    /// Get the admin address
    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    /// Check if the contract is initialized
    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    /// Active policy. Uninitialized vaults run on the default config.
    pub fn get_config(env: Env) -> VaultConfig {
        env.storage()
            .instance()
            .get(&CONFIG)
            .unwrap_or_else(VaultConfig::default_config)
    }

    /// Switch the age-group scheme. Existing records are not revalidated.
    pub fn set_age_banding(
        env: Env,
        caller: Address,
        age_banding: AgeBanding,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        let admin = Self::get_admin(env.clone())?;
        if caller != admin {
            return Err(ContractError::Unauthorized);
        }

        let config = VaultConfig { age_banding };
        env.storage().instance().set(&CONFIG, &config);

        events::publish_config_updated(&env, admin, age_banding);

        Ok(())
    }

    /// Create the caller's record. Only valid while no record exists.
    pub fn upload_health_data(
        env: Env,
        owner: Address,
        data_hash: String,
        health_score: u32,
        risk_factor: u32,
        age_group: u32,
    ) -> Result<(), ContractError> {
        owner.require_auth();

        let metrics = HealthMetrics {
            health_score,
            risk_factor,
            age_group,
        };
        Self::check_submission(&env, &data_hash, &metrics)?;

        if records::has_record(&env, &owner) {
            log!(&env, "upload rejected: record already exists for {}", owner);
            return Err(ContractError::HealthDataAlreadyExists);
        }

        let timestamp = env.ledger().timestamp();
        let record = HealthRecord {
            owner: owner.clone(),
            data_hash: data_hash.clone(),
            health_score,
            risk_factor,
            age_group,
            timestamp,
            is_active: true,
            is_encrypted: false,
        };
        records::set_record(&env, &record);

        events::publish_health_data_uploaded(&env, owner, data_hash, timestamp, false);

        Ok(())
    }

    /// Overwrite every field of an existing record. Activity state is left as is.
    pub fn update_health_data(
        env: Env,
        owner: Address,
        data_hash: String,
        health_score: u32,
        risk_factor: u32,
        age_group: u32,
    ) -> Result<(), ContractError> {
        owner.require_auth();

        let metrics = HealthMetrics {
            health_score,
            risk_factor,
            age_group,
        };
        Self::check_submission(&env, &data_hash, &metrics)?;

        let mut record =
            records::get_record(&env, &owner).ok_or(ContractError::NoHealthDataUploaded)?;

        let timestamp = env.ledger().timestamp();
        record.data_hash = data_hash.clone();
        record.health_score = health_score;
        record.risk_factor = risk_factor;
        record.age_group = age_group;
        record.timestamp = timestamp;
        records::set_record(&env, &record);

        events::publish_health_data_updated(&env, owner, data_hash, timestamp);

        Ok(())
    }

    /// Allow `recipient` to read the owner's scalar fields
    pub fn grant_sharing_permission(
        env: Env,
        owner: Address,
        recipient: Address,
    ) -> Result<(), ContractError> {
        owner.require_auth();

        if recipient == owner {
            return Err(ContractError::CannotGrantToSelf);
        }
        if recipient == env.current_contract_address() {
            return Err(ContractError::InvalidRecipient);
        }
        match records::get_record(&env, &owner) {
            Some(record) if record.is_active => {}
            _ => {
                log!(&env, "grant rejected: no active record for {}", owner);
                return Err(ContractError::NoHealthDataUploaded);
            }
        }

        records::set_grant(&env, &owner, &recipient);

        events::publish_permission_granted(&env, owner, recipient);

        Ok(())
    }

    /// Withdraw a grant. Revoking a grant that does not exist is a no-op.
    pub fn revoke_sharing_permission(
        env: Env,
        owner: Address,
        recipient: Address,
    ) -> Result<(), ContractError> {
        owner.require_auth();

        records::remove_grant(&env, &owner, &recipient);

        events::publish_permission_revoked(&env, owner, recipient);

        Ok(())
    }

    /// Check whether `owner` has granted `recipient` read access
    pub fn has_sharing_permission(env: Env, owner: Address, recipient: Address) -> bool {
        records::has_grant(&env, &owner, &recipient)
    }

    /// Record metadata. Absent records report `is_active = false`.
    pub fn get_user_health_data(env: Env, owner: Address) -> HealthDataSummary {
        match records::get_record(&env, &owner) {
            Some(record) => HealthDataSummary {
                data_hash: record.data_hash,
                timestamp: record.timestamp,
                owner: record.owner,
                is_active: record.is_active,
                is_encrypted: record.is_encrypted,
            },
            None => HealthDataSummary {
                data_hash: String::from_str(&env, ""),
                timestamp: 0,
                owner,
                is_active: false,
                is_encrypted: false,
            },
        }
    }

    pub fn get_my_health_score(env: Env, caller: Address) -> Result<u32, ContractError> {
        Self::own_field(&env, caller, HealthField::HealthScore)
    }

    pub fn get_my_risk_factor(env: Env, caller: Address) -> Result<u32, ContractError> {
        Self::own_field(&env, caller, HealthField::RiskFactor)
    }

    pub fn get_my_age_group(env: Env, caller: Address) -> Result<u32, ContractError> {
        Self::own_field(&env, caller, HealthField::AgeGroup)
    }

    /// All three of the caller's fields, read from one record snapshot.
    pub fn get_my_health_data(env: Env, caller: Address) -> Result<HealthMetrics, ContractError> {
        caller.require_auth();

        records::get_record(&env, &caller)
            .map(|record| record.metrics())
            .ok_or(ContractError::NoHealthDataUploaded)
    }

    pub fn share_health_score(
        env: Env,
        recipient: Address,
        owner: Address,
    ) -> Result<u32, ContractError> {
        Self::shared_field(&env, recipient, owner, HealthField::HealthScore)
    }

    pub fn share_risk_factor(
        env: Env,
        recipient: Address,
        owner: Address,
    ) -> Result<u32, ContractError> {
        Self::shared_field(&env, recipient, owner, HealthField::RiskFactor)
    }

    pub fn share_age_group(
        env: Env,
        recipient: Address,
        owner: Address,
    ) -> Result<u32, ContractError> {
        Self::shared_field(&env, recipient, owner, HealthField::AgeGroup)
    }

    /// Mark the owner's record inactive. Inactive is terminal.
    pub fn deactivate_health_data(env: Env, owner: Address) -> Result<(), ContractError> {
        owner.require_auth();

        Self::retire_record(&env, &owner)?;

        events::publish_data_deactivated(&env, owner, env.ledger().timestamp());

        Ok(())
    }

    /// Same transition as `deactivate_health_data`, plus a write-once
    /// emergency audit entry.
    pub fn emergency_clear_data(env: Env, owner: Address) -> Result<(), ContractError> {
        owner.require_auth();

        let record = Self::retire_record(&env, &owner)?;
        let entry = EmergencyClearEntry {
            owner: owner.clone(),
            data_hash: record.data_hash,
            cleared_at: env.ledger().timestamp(),
        };
        emergency::set_clear_entry(&env, &entry);

        events::publish_emergency_cleared(&env, owner, entry.cleared_at);

        Ok(())
    }

    pub fn get_emergency_clear(env: Env, owner: Address) -> Option<EmergencyClearEntry> {
        emergency::get_clear_entry(&env, &owner)
    }

    /// Compare two owners' health scores: -1, 0 or 1 as `user1` scores
    /// below, equal to or above `user2`. The requester needs read access to
    /// both records, either as owner or as grantee.
    pub fn compare_health_scores(
        env: Env,
        requester: Address,
        user1: Address,
        user2: Address,
    ) -> Result<i32, ContractError> {
        requester.require_auth();

        let first = Self::readable_record(&env, &requester, &user1)?;
        let second = Self::readable_record(&env, &requester, &user2)?;

        let result = match first.health_score.cmp(&second.health_score) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        };

        events::publish_computation_performed(&env, requester, symbol_short!("compare"), result);

        Ok(result)
    }

    /// Fields are stored as plaintext; no homomorphic backend is wired in.
    pub fn is_fhe_supported() -> bool {
        false
    }

    pub fn get_contract_info(env: Env) -> ContractInfo {
        ContractInfo {
            version: CONTRACT_VERSION,
            fhe_supported: false,
            fhe_version: String::from_str(&env, "none"),
        }
    }

    /// Contract version
    pub fn version() -> u32 {
        CONTRACT_VERSION
    }
}

impl HealthVaultContract {
    fn check_submission(
        env: &Env,
        data_hash: &String,
        metrics: &HealthMetrics,
    ) -> Result<(), ContractError> {
        let config = Self::get_config(env.clone());
        validation::validate_data_hash(data_hash)
            .and_then(|_| validation::validate_metrics(metrics, config.age_banding))
            .inspect_err(|err| log!(env, "submission rejected: {}", *err as u32))
    }

    fn own_field(env: &Env, caller: Address, field: HealthField) -> Result<u32, ContractError> {
        caller.require_auth();

        records::get_record(env, &caller)
            .map(|record| record.field(field))
            .ok_or(ContractError::NoHealthDataUploaded)
    }

    fn shared_field(
        env: &Env,
        recipient: Address,
        owner: Address,
        field: HealthField,
    ) -> Result<u32, ContractError> {
        recipient.require_auth();

        if !records::has_grant(env, &owner, &recipient) {
            log!(env, "share denied: {} has no grant from {}", recipient, owner);
            return Err(ContractError::PermissionDenied);
        }
        let record = records::get_record(env, &owner)
            .filter(|record| record.is_active)
            .ok_or(ContractError::DataUnavailable)?;

        let value = record.field(field);
        events::publish_data_shared(env, owner, recipient, field);

        Ok(value)
    }

    fn readable_record(
        env: &Env,
        requester: &Address,
        owner: &Address,
    ) -> Result<HealthRecord, ContractError> {
        if requester != owner && !records::has_grant(env, owner, requester) {
            return Err(ContractError::PermissionDenied);
        }
        records::get_record(env, owner)
            .filter(|record| record.is_active)
            .ok_or(ContractError::DataUnavailable)
    }

    fn retire_record(env: &Env, owner: &Address) -> Result<HealthRecord, ContractError> {
        let mut record =
            records::get_record(env, owner).ok_or(ContractError::NoHealthDataUploaded)?;
        if !record.is_active {
            log!(env, "retire rejected: record for {} is not active", owner);
            return Err(ContractError::DataNotActive);
        }

        record.is_active = false;
        records::set_record(env, &record);

        Ok(record)
    }
}
