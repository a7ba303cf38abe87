//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when a currency does not exist.
//! - [`InvalidName`] and [`InvalidRate`] thrown when a field fails validation.
//! - [`Database`] thrown when the store rejects or cannot run an operation.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`InvalidName`]: EngineError::InvalidName
//!  [`InvalidRate`]: EngineError::InvalidRate
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid rate: {0}")]
    InvalidRate(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// `true` for errors caused by the submitted fields rather than the store.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidName(_) | Self::InvalidRate(_))
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::InvalidRate(a), Self::InvalidRate(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_field_errors_are_validation() {
        assert!(EngineError::InvalidName(String::new()).is_validation());
        assert!(EngineError::InvalidRate("-1".to_string()).is_validation());
        assert!(!EngineError::KeyNotFound("abc".to_string()).is_validation());
        assert!(!EngineError::Database(DbErr::Custom("down".to_string())).is_validation());
    }
}
