//! Mapping of domain errors onto `AppError`.

use subpool_core::charge::ChargeError;
use subpool_core::pool::PoolError;
use subpool_core::split::SplitError;
use subpool_shared::AppError;

pub fn map_split_error(e: &SplitError) -> AppError {
    AppError::Validation(e.to_string())
}

pub fn map_pool_error(e: &PoolError) -> AppError {
    match e {
        PoolError::InvalidLineTransition { .. } => AppError::BusinessRule(e.to_string()),
        _ => AppError::Validation(e.to_string()),
    }
}

pub fn map_charge_error(e: &ChargeError) -> AppError {
    match e {
        ChargeError::InvalidAmount(_) | ChargeError::PoolSubscriptionMismatch { .. } => {
            AppError::Validation(e.to_string())
        }
        ChargeError::Archived(_) | ChargeError::AlreadyPaid => {
            AppError::BusinessRule(e.to_string())
        }
    }
}

pub fn map_json_error(e: &serde_json::Error) -> AppError {
    AppError::Validation(format!("invalid input document: {e}"))
}
