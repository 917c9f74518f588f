use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::ServiceError;

/// Resolves the acting user from the request context. Establishing the
/// identity itself (login, tokens) is the job of the outer identity
/// provider.
#[automock(type Context=();)]
#[async_trait]
pub trait UserService {
    type Context: Clone + PartialEq + Eq + Debug + Send + Sync + 'static;

    async fn current_user(&self, context: Self::Context) -> Result<Arc<str>, ServiceError>;
}
