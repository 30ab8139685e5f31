use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::HealthRecord;

// ── Storage keys ──────────────────────────────────────────────
const RECORD: Symbol = symbol_short!("RECORD");
const GRANT: Symbol = symbol_short!("GRANT");

pub(crate) const TTL_THRESHOLD: u32 = 518_400; // ~30 days
pub(crate) const TTL_EXTEND_TO: u32 = 3_110_400; // ~180 days

pub(crate) fn record_key(owner: &Address) -> (Symbol, Address) {
    (RECORD, owner.clone())
}

pub(crate) fn grant_key(owner: &Address, recipient: &Address) -> (Symbol, Address, Address) {
    (GRANT, owner.clone(), recipient.clone())
}

fn extend_record_ttl(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn extend_grant_ttl(env: &Env, key: &(Symbol, Address, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn has_record(env: &Env, owner: &Address) -> bool {
    env.storage().persistent().has(&record_key(owner))
}

/// Records are stored whole, so readers never observe a half-applied update.
pub fn set_record(env: &Env, record: &HealthRecord) {
    let key = record_key(&record.owner);
    env.storage().persistent().set(&key, record);
    extend_record_ttl(env, &key);
}

pub fn get_record(env: &Env, owner: &Address) -> Option<HealthRecord> {
    let key = record_key(owner);
    let record = env.storage().persistent().get::<_, HealthRecord>(&key);
    if record.is_some() {
        extend_record_ttl(env, &key);
    }
    record
}

pub fn set_grant(env: &Env, owner: &Address, recipient: &Address) {
    let key = grant_key(owner, recipient);
    env.storage().persistent().set(&key, &true);
    extend_grant_ttl(env, &key);
}

pub fn remove_grant(env: &Env, owner: &Address, recipient: &Address) {
    env.storage()
        .persistent()
        .remove(&grant_key(owner, recipient));
}

/// Unknown pairs read as not granted.
pub fn has_grant(env: &Env, owner: &Address, recipient: &Address) -> bool {
    let key = grant_key(owner, recipient);
    let granted = env.storage().persistent().get(&key).unwrap_or(false);
    if granted {
        extend_grant_ttl(env, &key);
    }
    granted
}
