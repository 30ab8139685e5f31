use common::AgeBanding;
use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol};

use crate::HealthField;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub age_banding: AgeBanding,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigUpdatedEvent {
    pub admin: Address,
    pub age_banding: AgeBanding,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HealthDataUploadedEvent {
    pub user: Address,
    pub data_hash: String,
    pub timestamp: u64,
    pub is_encrypted: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HealthDataUpdatedEvent {
    pub user: Address,
    pub data_hash: String,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PermissionGrantedEvent {
    pub owner: Address,
    pub recipient: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PermissionRevokedEvent {
    pub owner: Address,
    pub recipient: Address,
}

/// Audit trail for every successful share read
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DataSharedEvent {
    pub owner: Address,
    pub recipient: Address,
    pub data_type: HealthField,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DataDeactivatedEvent {
    pub owner: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyClearedEvent {
    pub owner: Address,
    pub cleared_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComputationPerformedEvent {
    pub requester: Address,
    pub operation: Symbol,
    pub result: i32,
}

pub fn publish_initialized(env: &Env, admin: Address, age_banding: AgeBanding) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent { admin, age_banding },
    );
}

pub fn publish_config_updated(env: &Env, admin: Address, age_banding: AgeBanding) {
    env.events().publish(
        (symbol_short!("CFG_UPD"), admin.clone()),
        ConfigUpdatedEvent { admin, age_banding },
    );
}

pub fn publish_health_data_uploaded(
    env: &Env,
    user: Address,
    data_hash: String,
    timestamp: u64,
    is_encrypted: bool,
) {
    env.events().publish(
        (symbol_short!("UPLOAD"), user.clone()),
        HealthDataUploadedEvent {
            user,
            data_hash,
            timestamp,
            is_encrypted,
        },
    );
}

pub fn publish_health_data_updated(env: &Env, user: Address, data_hash: String, timestamp: u64) {
    env.events().publish(
        (symbol_short!("UPDATE"), user.clone()),
        HealthDataUpdatedEvent {
            user,
            data_hash,
            timestamp,
        },
    );
}

pub fn publish_permission_granted(env: &Env, owner: Address, recipient: Address) {
    env.events().publish(
        (symbol_short!("SHR_GRT"), owner.clone(), recipient.clone()),
        PermissionGrantedEvent { owner, recipient },
    );
}

pub fn publish_permission_revoked(env: &Env, owner: Address, recipient: Address) {
    env.events().publish(
        (symbol_short!("SHR_REV"), owner.clone(), recipient.clone()),
        PermissionRevokedEvent { owner, recipient },
    );
}

pub fn publish_data_shared(env: &Env, owner: Address, recipient: Address, data_type: HealthField) {
    env.events().publish(
        (symbol_short!("SHARED"), owner.clone(), recipient.clone()),
        DataSharedEvent {
            owner,
            recipient,
            data_type,
        },
    );
}

pub fn publish_data_deactivated(env: &Env, owner: Address, timestamp: u64) {
    env.events().publish(
        (symbol_short!("DEACT"), owner.clone()),
        DataDeactivatedEvent { owner, timestamp },
    );
}

pub fn publish_emergency_cleared(env: &Env, owner: Address, cleared_at: u64) {
    env.events().publish(
        (symbol_short!("EMRG_CLR"), owner.clone()),
        EmergencyClearedEvent { owner, cleared_at },
    );
}

pub fn publish_computation_performed(env: &Env, requester: Address, operation: Symbol, result: i32) {
    env.events().publish(
        (symbol_short!("COMPUTE"), requester.clone()),
        ComputationPerformedEvent {
            requester,
            operation,
            result,
        },
    );
}
