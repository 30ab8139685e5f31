use common::{AgeBanding, HealthMetrics, MAX_DATA_HASH_LEN};
use soroban_sdk::String;

use crate::ContractError;

/// Validate a record's data hash.
/// Hashes are opaque (IPFS CID, hex digest, ...), so only the length and a
/// printable-ASCII charset are enforced.
pub fn validate_data_hash(hash: &String) -> Result<(), ContractError> {
    let len = hash.len();
    common::validate_data_hash_len(len)?;

    let mut buf = [0u8; MAX_DATA_HASH_LEN as usize];
    hash.copy_into_slice(&mut buf[..len as usize]);

    common::validate_data_hash(&buf[..len as usize])?;

    Ok(())
}

/// Validate the scalar fields against the vault's age banding.
pub fn validate_metrics(
    metrics: &HealthMetrics,
    banding: AgeBanding,
) -> Result<(), ContractError> {
    common::validate_metrics(metrics, banding)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::Env;

    fn metrics(health_score: u32, risk_factor: u32, age_group: u32) -> HealthMetrics {
        HealthMetrics {
            health_score,
            risk_factor,
            age_group,
        }
    }

    #[test]
    fn test_validate_data_hash() {
        let env = Env::default();

        assert_eq!(validate_data_hash(&String::from_str(&env, "H1")), Ok(()));
        assert_eq!(
            validate_data_hash(&String::from_str(&env, "QmHash123456789")),
            Ok(())
        );

        // Empty
        assert_eq!(
            validate_data_hash(&String::from_str(&env, "")),
            Err(ContractError::EmptyDataHash)
        );

        // Too long
        let long_hash = "a".repeat(MAX_DATA_HASH_LEN as usize + 1);
        assert_eq!(
            validate_data_hash(&String::from_str(&env, &long_hash)),
            Err(ContractError::DataHashTooLong)
        );

        // Control characters
        assert_eq!(
            validate_data_hash(&String::from_str(&env, "Qm\tHash")),
            Err(ContractError::MalformedDataHash)
        );
    }

    #[test]
    fn test_validate_metrics() {
        assert_eq!(validate_metrics(&metrics(85, 3, 2), AgeBanding::Five), Ok(()));
        assert_eq!(
            validate_metrics(&metrics(0, 3, 2), AgeBanding::Five),
            Err(ContractError::InvalidHealthScore)
        );
        assert_eq!(
            validate_metrics(&metrics(85, 11, 2), AgeBanding::Five),
            Err(ContractError::InvalidRiskFactor)
        );
        assert_eq!(
            validate_metrics(&metrics(85, 3, 7), AgeBanding::Five),
            Err(ContractError::InvalidAgeGroup)
        );
        assert_eq!(validate_metrics(&metrics(85, 3, 7), AgeBanding::Eight), Ok(()));
    }
}
