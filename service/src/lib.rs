use std::fmt::{Display, Formatter};
use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

pub mod booking;
pub mod clock;
pub mod permission;
pub mod schedule;
pub mod slot;
pub mod user_service;
pub mod uuid_service;

pub use permission::{Authentication, MockPermissionService, PermissionService, Role, User};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailureItem {
    MissingField(Arc<str>),
    InvalidValue(Arc<str>),
    ModificationNotAllowed(Arc<str>),
}
impl Display for ValidationFailureItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationFailureItem::MissingField(field) => write!(f, "Field {field} is missing"),
            ValidationFailureItem::InvalidValue(field) => {
                write!(f, "Field {field} has an invalid value")
            }
            ValidationFailureItem::ModificationNotAllowed(field) => {
                write!(f, "Field {field} must not be modified")
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Database query error: {0}")]
    DatabaseQueryError(#[from] dao::DaoError),

    #[error("Forbidden")]
    Forbidden,

    #[error("Entity {0} not found")]
    EntityNotFound(Uuid),

    #[error("Validation error: {0:?}")]
    ValidationError(Arc<[ValidationFailureItem]>),

    #[error("Cannot update past time slots: {1} on {0} already began")]
    SlotElapsed(time::Date, Arc<str>),

    #[error("Internal error")]
    InternalError,
}
