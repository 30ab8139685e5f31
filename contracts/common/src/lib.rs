#![no_std]

#[cfg(test)]
extern crate std;

pub mod banding;
pub mod descriptors;
pub mod metrics;

pub use banding::AgeBanding;
pub use metrics::{
    validate_data_hash, validate_data_hash_len, validate_metrics, HealthMetrics, ValidationError,
    MAX_DATA_HASH_LEN,
};
