use std::sync::Arc;

use async_trait::async_trait;
use service::permission::{Authentication, MockContext, ADMIN_ROLE, STUDENT_ROLE};
use service::{Role, ServiceError, User, ValidationFailureItem};

pub mod booking;
pub mod clock;
pub mod schedule;
mod test;
pub mod uuid_service;

const PERMISSION_SERVICE_PROCESS: &str = "permission-service";

pub struct PermissionServiceImpl<PermissionDao, UserService>
where
    PermissionDao: dao::PermissionDao + Send + Sync,
    UserService: service::user_service::UserService + Send + Sync,
{
    pub permission_dao: Arc<PermissionDao>,
    pub user_service: Arc<UserService>,
}
impl<PermissionDao, UserService> PermissionServiceImpl<PermissionDao, UserService>
where
    PermissionDao: dao::PermissionDao + Send + Sync,
    UserService: service::user_service::UserService + Send + Sync,
{
    pub fn new(permission_dao: Arc<PermissionDao>, user_service: Arc<UserService>) -> Self {
        Self {
            permission_dao,
            user_service,
        }
    }
}

#[async_trait]
impl<PermissionDao, UserService> service::PermissionService
    for PermissionServiceImpl<PermissionDao, UserService>
where
    PermissionDao: dao::PermissionDao + Send + Sync,
    UserService: service::user_service::UserService + Send + Sync,
{
    type Context = UserService::Context;

    async fn check_permission(
        &self,
        role: &str,
        context: Authentication<Self::Context>,
    ) -> Result<(), ServiceError> {
        match context {
            Authentication::Full => Ok(()),
            Authentication::Context(context) => {
                let current_user = self.user_service.current_user(context).await?;
                if self
                    .permission_dao
                    .has_role(current_user.as_ref(), role)
                    .await?
                {
                    Ok(())
                } else {
                    Err(ServiceError::Forbidden)
                }
            }
        }
    }

    async fn current_user_id(
        &self,
        context: Authentication<Self::Context>,
    ) -> Result<Option<Arc<str>>, ServiceError> {
        match context {
            Authentication::Full => Ok(None),
            Authentication::Context(context) => {
                let current_user = self.user_service.current_user(context).await?;
                Ok(Some(current_user))
            }
        }
    }

    async fn create_user(
        &self,
        user: &str,
        context: Authentication<Self::Context>,
    ) -> Result<(), ServiceError> {
        self.check_permission(ADMIN_ROLE, context).await?;
        self.permission_dao
            .create_user(
                &dao::UserEntity { name: user.into() },
                PERMISSION_SERVICE_PROCESS,
            )
            .await?;
        Ok(())
    }

    async fn user_exists(
        &self,
        user: &str,
        context: Authentication<Self::Context>,
    ) -> Result<bool, ServiceError> {
        self.check_permission(ADMIN_ROLE, context).await?;
        Ok(self.permission_dao.find_user(user).await?.is_some())
    }

    async fn delete_user(
        &self,
        user: &str,
        context: Authentication<Self::Context>,
    ) -> Result<(), ServiceError> {
        self.check_permission(ADMIN_ROLE, context).await?;
        self.permission_dao.delete_user(user).await?;
        Ok(())
    }

    async fn get_all_users(
        &self,
        context: Authentication<Self::Context>,
    ) -> Result<Arc<[User]>, ServiceError> {
        self.check_permission(ADMIN_ROLE, context).await?;
        Ok(self
            .permission_dao
            .all_users()
            .await?
            .iter()
            .map(User::from)
            .collect())
    }

    async fn add_user_role(
        &self,
        user: &str,
        role: &str,
        context: Authentication<Self::Context>,
    ) -> Result<(), ServiceError> {
        self.check_permission(ADMIN_ROLE, context).await?;
        if role != ADMIN_ROLE && role != STUDENT_ROLE {
            return Err(ServiceError::ValidationError(
                [ValidationFailureItem::InvalidValue("role".into())].into(),
            ));
        }
        self.permission_dao
            .add_user_role(user, role, PERMISSION_SERVICE_PROCESS)
            .await?;
        Ok(())
    }

    async fn delete_user_role(
        &self,
        user: &str,
        role: &str,
        context: Authentication<Self::Context>,
    ) -> Result<(), ServiceError> {
        self.check_permission(ADMIN_ROLE, context).await?;
        self.permission_dao.delete_user_role(user, role).await?;
        Ok(())
    }

    async fn get_roles_of_user(
        &self,
        user: &str,
        context: Authentication<Self::Context>,
    ) -> Result<Arc<[Role]>, ServiceError> {
        self.check_permission(ADMIN_ROLE, context).await?;
        Ok(self
            .permission_dao
            .roles_for_user(user)
            .await?
            .iter()
            .map(Role::from)
            .collect())
    }
}

/// Resolves the acting user from the identity established by the outer
/// HTTP layer.
pub struct UserServiceImpl;

#[async_trait]
impl service::user_service::UserService for UserServiceImpl {
    type Context = Option<Arc<str>>;

    async fn current_user(&self, context: Self::Context) -> Result<Arc<str>, ServiceError> {
        context.ok_or(ServiceError::Forbidden)
    }
}

/// Always authenticates as DEVUSER. Used to run the server locally
/// without a login service in front of it.
pub struct UserServiceDev;

#[async_trait]
impl service::user_service::UserService for UserServiceDev {
    type Context = MockContext;

    async fn current_user(&self, _context: Self::Context) -> Result<Arc<str>, ServiceError> {
        Ok("DEVUSER".into())
    }
}
