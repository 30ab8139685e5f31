use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol};

use crate::records::{TTL_EXTEND_TO, TTL_THRESHOLD};

// ── Storage keys ──────────────────────────────────────────────
const EMRG_CLR: Symbol = symbol_short!("EMRG_CLR");

// ── Types ─────────────────────────────────────────────────────

/// Immutable audit entry for an emergency clear. Written once, never
/// deleted. A cleared record cannot become active again, so it cannot be
/// cleared twice.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyClearEntry {
    pub owner: Address,
    /// Hash the record carried when it was cleared
    pub data_hash: String,
    pub cleared_at: u64,
}

// ── Storage Functions ────────────────────────────────────────

pub(crate) fn clear_key(owner: &Address) -> (Symbol, Address) {
    (EMRG_CLR, owner.clone())
}

fn extend_clear_ttl(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn set_clear_entry(env: &Env, entry: &EmergencyClearEntry) {
    let key = clear_key(&entry.owner);
    env.storage().persistent().set(&key, entry);
    extend_clear_ttl(env, &key);
}

pub fn get_clear_entry(env: &Env, owner: &Address) -> Option<EmergencyClearEntry> {
    let key = clear_key(owner);
    let entry = env
        .storage()
        .persistent()
        .get::<_, EmergencyClearEntry>(&key);
    if entry.is_some() {
        extend_clear_ttl(env, &key);
    }
    entry
}
