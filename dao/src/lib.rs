use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

pub mod booking;

#[derive(Error, Debug)]
pub enum DaoError {
    #[error("Database query error: {0}")]
    DatabaseQueryError(#[from] Box<dyn std::error::Error + Send + Sync>),

    #[error("Could not parse date/time: {0}")]
    DateTimeParseError(#[from] time::error::Parse),

    #[error("Unknown enum value in database: {0}")]
    EnumValueNotKnown(Arc<str>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserEntity {
    pub name: Arc<str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleEntity {
    pub name: Arc<str>,
}

#[automock]
#[async_trait]
pub trait PermissionDao {
    async fn has_role(&self, user: &str, role: &str) -> Result<bool, DaoError>;

    async fn create_user(&self, user: &UserEntity, process: &str) -> Result<(), DaoError>;
    async fn find_user(&self, username: &str) -> Result<Option<UserEntity>, DaoError>;
    async fn all_users(&self) -> Result<Arc<[UserEntity]>, DaoError>;
    async fn delete_user(&self, username: &str) -> Result<(), DaoError>;

    async fn add_user_role(&self, user: &str, role: &str, process: &str) -> Result<(), DaoError>;
    async fn delete_user_role(&self, user: &str, role: &str) -> Result<(), DaoError>;
    async fn roles_for_user(&self, user: &str) -> Result<Arc<[RoleEntity]>, DaoError>;
}
