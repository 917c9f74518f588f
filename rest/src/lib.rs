use std::sync::Arc;

mod booking;
mod permission;
mod schedule;
mod session;

use axum::{body::Body, middleware, response::Response, routing::get, Router};

pub use session::Context;

fn error_handler(result: Result<Response, service::ServiceError>) -> Response {
    match result {
        Ok(response) => response,
        Err(service::ServiceError::Forbidden) => {
            Response::builder().status(403).body(Body::empty()).unwrap()
        }
        Err(service::ServiceError::DatabaseQueryError(e)) => {
            tracing::error!("Database query failed: {}", e);
            Response::builder()
                .status(500)
                .body(Body::new(e.to_string()))
                .unwrap()
        }
        Err(service::ServiceError::EntityNotFound(id)) => Response::builder()
            .status(404)
            .body(Body::new(id.to_string()))
            .unwrap(),
        Err(err @ service::ServiceError::ValidationError(_)) => Response::builder()
            .status(422)
            .body(Body::new(err.to_string()))
            .unwrap(),
        Err(err @ service::ServiceError::SlotElapsed(_, _)) => Response::builder()
            .status(409)
            .body(Body::new(err.to_string()))
            .unwrap(),
        Err(err @ service::ServiceError::InternalError) => {
            tracing::error!("Internal error while handling request");
            Response::builder()
                .status(500)
                .body(Body::new(err.to_string()))
                .unwrap()
        }
    }
}

pub trait RestStateDef: Clone + Send + Sync + 'static {
    type BookingService: service::booking::BookingService<Context = Context>
        + Send
        + Sync
        + 'static;
    type ScheduleService: service::schedule::ScheduleService<Context = Context>
        + Send
        + Sync
        + 'static;
    type PermissionService: service::permission::PermissionService<Context = Context>
        + Send
        + Sync
        + 'static;

    fn backend_version(&self) -> Arc<str>;

    fn booking_service(&self) -> Arc<Self::BookingService>;
    fn schedule_service(&self) -> Arc<Self::ScheduleService>;
    fn permission_service(&self) -> Arc<Self::PermissionService>;
}

pub async fn get_version<RestState: RestStateDef>(
    rest_state: axum::extract::State<RestState>,
) -> String {
    rest_state.backend_version().to_string()
}

pub async fn start_server<RestState: RestStateDef>(rest_state: RestState) {
    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let app = Router::new()
        .route("/version", get(get_version::<RestState>))
        .nest("/booking", booking::generate_route())
        .nest("/schedule", schedule::generate_route())
        .nest("/permission", permission::generate_route())
        .layer(middleware::from_fn(session::context_extractor))
        .with_state(rest_state);
    tracing::info!("Starting server on {}", bind_address);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .expect("Could not bind server");
    axum::serve(listener, app)
        .await
        .expect("Could not start server");
}
