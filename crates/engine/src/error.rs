//! The module contains the errors the engine can throw.
//!
//! Every validation failure aborts the enclosing transaction and reaches the
//! caller as one of these typed variants; unexpected store failures pass
//! through as [`Database`].
//!
//! [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("purchase not found: {0}")]
    PurchaseNotFound(String),
    #[error("no access to purchase: {0}")]
    AccessDenied(String),
    #[error("customer not found: {0}")]
    CustomerNotFound(String),
    #[error("no access to customer: {0}")]
    AccessDeniedCustomer(String),
    #[error("customer not in purchase: {0}")]
    CustomerNotInPurchase(String),
    #[error("item not found: {0}")]
    ItemNotFound(String),
    #[error("record already exists: {0}")]
    DuplicateRecord(String),
    #[error("constraint violated: {0}")]
    ConstraintViolation(String),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("invalid id: {0}")]
    InvalidId(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::PurchaseNotFound(a), Self::PurchaseNotFound(b)) => a == b,
            (Self::AccessDenied(a), Self::AccessDenied(b)) => a == b,
            (Self::CustomerNotFound(a), Self::CustomerNotFound(b)) => a == b,
            (Self::AccessDeniedCustomer(a), Self::AccessDeniedCustomer(b)) => a == b,
            (Self::CustomerNotInPurchase(a), Self::CustomerNotInPurchase(b)) => a == b,
            (Self::ItemNotFound(a), Self::ItemNotFound(b)) => a == b,
            (Self::DuplicateRecord(a), Self::DuplicateRecord(b)) => a == b,
            (Self::ConstraintViolation(a), Self::ConstraintViolation(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidId(a), Self::InvalidId(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
