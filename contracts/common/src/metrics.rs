use core::ops::RangeInclusive;

use soroban_sdk::contracttype;

use crate::AgeBanding;

pub const HEALTH_SCORE_RANGE: RangeInclusive<u32> = 1..=100;
pub const RISK_FACTOR_RANGE: RangeInclusive<u32> = 1..=10;

/// Data hashes are opaque identifiers (IPFS CID, hex digest, ...). Content
/// is only checked for printable ASCII.
pub const MAX_DATA_HASH_LEN: u32 = 256;

/// The three scalar fields carried by every health record.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HealthMetrics {
    pub health_score: u32,
    pub risk_factor: u32,
    pub age_group: u32,
}

/// Input rejected before any state is touched.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValidationError {
    EmptyDataHash,
    DataHashTooLong,
    DataHashMalformed,
    HealthScoreOutOfRange,
    RiskFactorOutOfRange,
    AgeGroupOutOfRange,
}

pub fn validate_data_hash_len(len: u32) -> Result<(), ValidationError> {
    if len == 0 {
        return Err(ValidationError::EmptyDataHash);
    }
    if len > MAX_DATA_HASH_LEN {
        return Err(ValidationError::DataHashTooLong);
    }
    Ok(())
}

/// Full data-hash check: length bounds, then printable ASCII only.
pub fn validate_data_hash(hash: &[u8]) -> Result<(), ValidationError> {
    validate_data_hash_len(hash.len() as u32)?;
    if hash.iter().any(|b| !(32..=126).contains(b)) {
        return Err(ValidationError::DataHashMalformed);
    }
    Ok(())
}

/// Checks each field against its domain. Fields are checked in declaration
/// order and the first failure wins.
pub fn validate_metrics(
    metrics: &HealthMetrics,
    banding: AgeBanding,
) -> Result<(), ValidationError> {
    if !HEALTH_SCORE_RANGE.contains(&metrics.health_score) {
        return Err(ValidationError::HealthScoreOutOfRange);
    }
    if !RISK_FACTOR_RANGE.contains(&metrics.risk_factor) {
        return Err(ValidationError::RiskFactorOutOfRange);
    }
    if !banding.contains(metrics.age_group) {
        return Err(ValidationError::AgeGroupOutOfRange);
    }
    Ok(())
}
