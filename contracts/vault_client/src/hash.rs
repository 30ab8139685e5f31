use common::HealthMetrics;
use soroban_sdk::{Bytes, Env, String};

const HEX: &[u8; 16] = b"0123456789abcdef";

/// `0x` followed by 64 lowercase hex digits
pub const DERIVED_HASH_LEN: usize = 66;

/// Content identifier for a metrics submission: sha256 over the three fields
/// and the submission time, all big-endian.
pub fn derive_data_hash(env: &Env, metrics: &HealthMetrics, timestamp: u64) -> String {
    let mut preimage = Bytes::new(env);
    preimage.extend_from_array(&metrics.health_score.to_be_bytes());
    preimage.extend_from_array(&metrics.risk_factor.to_be_bytes());
    preimage.extend_from_array(&metrics.age_group.to_be_bytes());
    preimage.extend_from_array(&timestamp.to_be_bytes());

    let digest = env.crypto().sha256(&preimage).to_array();

    let mut out = [0u8; DERIVED_HASH_LEN];
    out[0] = b'0';
    out[1] = b'x';
    for (i, byte) in digest.iter().enumerate() {
        out[2 + i * 2] = HEX[(byte >> 4) as usize];
        out[3 + i * 2] = HEX[(byte & 0x0f) as usize];
    }

    String::from_bytes(env, &out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> HealthMetrics {
        HealthMetrics {
            health_score: 85,
            risk_factor: 3,
            age_group: 2,
        }
    }

    #[test]
    fn test_known_digest() {
        let env = Env::default();
        let hash = derive_data_hash(&env, &metrics(), 1_700_000_000);
        assert_eq!(
            hash,
            String::from_str(
                &env,
                "0xb634c6fbc752d7c12c8c8c076f4111cc028f1fe3ad28d3cb28f309a660de7a22"
            )
        );
    }

    #[test]
    fn test_timestamp_changes_hash() {
        let env = Env::default();
        let first = derive_data_hash(&env, &metrics(), 1_700_000_000);
        let second = derive_data_hash(&env, &metrics(), 1_700_000_001);
        assert_ne!(first, second);
        assert_eq!(first.len() as usize, DERIVED_HASH_LEN);
        assert_eq!(second.len() as usize, DERIVED_HASH_LEN);
    }

    #[test]
    fn test_derived_hash_passes_validation() {
        let env = Env::default();
        let hash = derive_data_hash(&env, &metrics(), 0);
        assert_eq!(health_vault::validation::validate_data_hash(&hash), Ok(()));
    }
}
