use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::get;
use axum::{Extension, Router};
use rest_types::{ScheduleSlotTO, TurfTypeTO};
use service::schedule::ScheduleService;
use time::Date;

use crate::{error_handler, Context, RestStateDef};

pub fn generate_route<RestState: RestStateDef>() -> Router<RestState> {
    Router::new()
        .route(
            "/{turf_type}/{date}",
            get(get_upcoming_day_schedule::<RestState>),
        )
        .route(
            "/{turf_type}/{date}/full",
            get(get_day_schedule::<RestState>),
        )
}

pub async fn get_upcoming_day_schedule<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
    Path((turf_type, date)): Path<(TurfTypeTO, Date)>,
) -> Response {
    error_handler(
        (async {
            let slots: Arc<[ScheduleSlotTO]> = rest_state
                .schedule_service()
                .upcoming_day_schedule(date, turf_type.into(), context.into())
                .await?
                .iter()
                .map(ScheduleSlotTO::from)
                .collect();
            Ok(Response::builder()
                .status(200)
                .body(Body::new(serde_json::to_string(&slots).unwrap()))
                .unwrap())
        })
        .await,
    )
}

pub async fn get_day_schedule<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
    Path((turf_type, date)): Path<(TurfTypeTO, Date)>,
) -> Response {
    error_handler(
        (async {
            let slots: Arc<[ScheduleSlotTO]> = rest_state
                .schedule_service()
                .day_schedule(date, turf_type.into(), context.into())
                .await?
                .iter()
                .map(ScheduleSlotTO::from)
                .collect();
            Ok(Response::builder()
                .status(200)
                .body(Body::new(serde_json::to_string(&slots).unwrap()))
                .unwrap())
        })
        .await,
    )
}
