#[cfg(feature = "header_auth")]
use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
#[cfg(feature = "mock_auth")]
use service::permission::MockContext;

#[cfg(feature = "mock_auth")]
pub type Context = MockContext;
#[cfg(feature = "header_auth")]
pub type Context = Option<Arc<str>>;

/// Takes the identity established by the proxy in front of the server
/// from the `x-user` header. The proxy is trusted; the header carries
/// no secret.
#[cfg(feature = "header_auth")]
pub async fn context_extractor(mut request: Request, next: Next) -> Response {
    let user: Context = request
        .headers()
        .get("x-user")
        .and_then(|value| value.to_str().ok())
        .map(Arc::from);
    request.extensions_mut().insert(user);
    next.run(request).await
}

#[cfg(feature = "mock_auth")]
pub async fn context_extractor(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(MockContext);
    next.run(request).await
}
