use core::fmt;

use common::ValidationError;
use health_vault::ContractError;
use soroban_sdk::{ConversionError, InvokeError};

/// Raw shape of a `try_*` call on a generated contract client. Entry points
/// that do not return `Result` report host errors as `soroban_sdk::Error`.
pub type TryResult<T, E = ContractError> =
    Result<Result<T, ConversionError>, Result<E, InvokeError>>;

/// Everything a session call can fail with. Nothing is retried; every
/// variant goes straight back to the caller.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VaultError {
    /// Rejected locally, or by the vault's own input checks.
    Validation(ValidationError),
    /// The vault refused the call in its current state.
    PreconditionFailed(ContractError),
    /// The invocation trapped or failed authorization.
    TransactionFailed,
    /// No confirmation inside the policy window.
    Timeout,
    Unknown,
}

impl From<ValidationError> for VaultError {
    fn from(err: ValidationError) -> Self {
        VaultError::Validation(err)
    }
}

impl From<ContractError> for VaultError {
    fn from(err: ContractError) -> Self {
        match err.as_validation() {
            Some(validation) => VaultError::Validation(validation),
            None => VaultError::PreconditionFailed(err),
        }
    }
}

impl From<soroban_sdk::Error> for VaultError {
    fn from(_: soroban_sdk::Error) -> Self {
        VaultError::TransactionFailed
    }
}

impl fmt::Display for VaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VaultError::Validation(ValidationError::EmptyDataHash) => {
                f.write_str("Data hash cannot be empty")
            }
            VaultError::Validation(ValidationError::DataHashTooLong) => {
                f.write_str("Data hash is too long")
            }
            VaultError::Validation(ValidationError::DataHashMalformed) => {
                f.write_str("Data hash must be printable ASCII")
            }
            VaultError::Validation(ValidationError::HealthScoreOutOfRange) => {
                f.write_str("Invalid health score")
            }
            VaultError::Validation(ValidationError::RiskFactorOutOfRange) => {
                f.write_str("Invalid risk factor")
            }
            VaultError::Validation(ValidationError::AgeGroupOutOfRange) => {
                f.write_str("Invalid age group")
            }
            VaultError::PreconditionFailed(err) => match err {
                ContractError::NoHealthDataUploaded => f.write_str("No health data uploaded"),
                ContractError::HealthDataAlreadyExists => {
                    f.write_str("Health data already uploaded")
                }
                ContractError::CannotGrantToSelf => f.write_str("Cannot grant permission to self"),
                ContractError::InvalidRecipient => f.write_str("Invalid recipient address"),
                ContractError::PermissionDenied => f.write_str("No sharing permission"),
                ContractError::DataUnavailable => f.write_str("Health data not available"),
                ContractError::DataNotActive => f.write_str("Health data not active"),
                other => write!(f, "Vault rejected the call (code {})", *other as u32),
            },
            VaultError::TransactionFailed => f.write_str("Transaction failed"),
            VaultError::Timeout => f.write_str("Transaction confirmation timed out"),
            VaultError::Unknown => f.write_str("Unknown error"),
        }
    }
}

/// Fold a `try_*` result into the session taxonomy.
pub fn classify<T, E: Into<VaultError>>(result: TryResult<T, E>) -> Result<T, VaultError> {
    match result {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(_)) => Err(VaultError::Unknown),
        Err(Ok(err)) => Err(err.into()),
        Err(Err(InvokeError::Abort)) => Err(VaultError::TransactionFailed),
        // A code the error type does not know
        Err(Err(InvokeError::Contract(_))) => Err(VaultError::Unknown),
    }
}
