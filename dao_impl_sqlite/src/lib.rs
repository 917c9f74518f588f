use std::sync::Arc;

use async_trait::async_trait;
use dao::{DaoError, RoleEntity, UserEntity};
use sqlx::SqlitePool;

pub mod booking;

pub trait ResultDbErrorExt<T, E> {
    fn map_db_error(self) -> Result<T, DaoError>;
}
impl<T, E: std::error::Error + Send + Sync + 'static> ResultDbErrorExt<T, E> for Result<T, E> {
    fn map_db_error(self) -> Result<T, DaoError> {
        self.map_err(|err| DaoError::DatabaseQueryError(Box::new(err)))
    }
}

pub struct PermissionDaoImpl {
    pool: Arc<SqlitePool>,
}
impl PermissionDaoImpl {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl dao::PermissionDao for PermissionDaoImpl {
    async fn has_role(&self, user: &str, role: &str) -> Result<bool, DaoError> {
        let count: i64 = sqlx::query_scalar(
            r"SELECT count(*) FROM user
                INNER JOIN user_role ON user.name = user_role.user_name
                WHERE user_role.role_name = ? AND user.name = ?",
        )
        .bind(role)
        .bind(user)
        .fetch_one(self.pool.as_ref())
        .await
        .map_db_error()?;
        Ok(count > 0)
    }

    async fn create_user(&self, user: &UserEntity, process: &str) -> Result<(), DaoError> {
        sqlx::query(r"INSERT INTO user (name, update_process) VALUES (?, ?)")
            .bind(user.name.as_ref())
            .bind(process)
            .execute(self.pool.as_ref())
            .await
            .map_db_error()?;
        Ok(())
    }

    async fn find_user(&self, username: &str) -> Result<Option<UserEntity>, DaoError> {
        let name: Option<String> = sqlx::query_scalar(r"SELECT name FROM user WHERE name = ?")
            .bind(username)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_db_error()?;
        Ok(name.map(|name| UserEntity { name: name.into() }))
    }

    async fn all_users(&self) -> Result<Arc<[UserEntity]>, DaoError> {
        let names: Vec<String> = sqlx::query_scalar(r"SELECT name FROM user ORDER BY name")
            .fetch_all(self.pool.as_ref())
            .await
            .map_db_error()?;
        Ok(names
            .into_iter()
            .map(|name| UserEntity { name: name.into() })
            .collect())
    }

    async fn delete_user(&self, username: &str) -> Result<(), DaoError> {
        sqlx::query(r"DELETE FROM user WHERE name = ?")
            .bind(username)
            .execute(self.pool.as_ref())
            .await
            .map_db_error()?;
        Ok(())
    }

    async fn add_user_role(&self, user: &str, role: &str, process: &str) -> Result<(), DaoError> {
        sqlx::query(r"INSERT INTO user_role (user_name, role_name, update_process) VALUES (?, ?, ?)")
            .bind(user)
            .bind(role)
            .bind(process)
            .execute(self.pool.as_ref())
            .await
            .map_db_error()?;
        Ok(())
    }

    async fn delete_user_role(&self, user: &str, role: &str) -> Result<(), DaoError> {
        sqlx::query(r"DELETE FROM user_role WHERE user_name = ? AND role_name = ?")
            .bind(user)
            .bind(role)
            .execute(self.pool.as_ref())
            .await
            .map_db_error()?;
        Ok(())
    }

    async fn roles_for_user(&self, user: &str) -> Result<Arc<[RoleEntity]>, DaoError> {
        let names: Vec<String> =
            sqlx::query_scalar(r"SELECT role_name FROM user_role WHERE user_name = ?")
                .bind(user)
                .fetch_all(self.pool.as_ref())
                .await
                .map_db_error()?;
        Ok(names
            .into_iter()
            .map(|name| RoleEntity { name: name.into() })
            .collect())
    }
}
