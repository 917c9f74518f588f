use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::{delete, get, post, put};
use axum::{Extension, Json, Router};
use rest_types::{BookingChangeTO, BookingTO, BookingUpdateTO, TurfTypeTO};
use serde::Deserialize;
use service::booking::{BookingChange, BookingService};
use time::Date;
use uuid::Uuid;

use crate::{error_handler, Context, RestStateDef};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayQueryTO {
    pub date: Date,
    pub turf_type: TurfTypeTO,
}

pub fn generate_route<RestState: RestStateDef>() -> Router<RestState> {
    Router::new()
        .route("/", get(get_bookings_for_day::<RestState>))
        .route("/", post(upsert_booking::<RestState>))
        .route("/{id}", get(get_booking::<RestState>))
        .route("/{id}", put(update_booking::<RestState>))
        .route("/{id}", delete(delete_booking::<RestState>))
}

pub async fn get_bookings_for_day<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
    Query(query): Query<DayQueryTO>,
) -> Response {
    error_handler(
        (async {
            let bookings: Arc<[BookingTO]> = rest_state
                .booking_service()
                .get_for_day(query.date, query.turf_type.into(), context.into())
                .await?
                .iter()
                .map(BookingTO::from)
                .collect();
            Ok(Response::builder()
                .status(200)
                .body(Body::new(serde_json::to_string(&bookings).unwrap()))
                .unwrap())
        })
        .await,
    )
}

pub async fn get_booking<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
    Path(booking_id): Path<Uuid>,
) -> Response {
    error_handler(
        (async {
            let booking = rest_state
                .booking_service()
                .get(booking_id, context.into())
                .await?;
            Ok(Response::builder()
                .status(200)
                .body(Body::new(
                    serde_json::to_string(&BookingTO::from(&booking)).unwrap(),
                ))
                .unwrap())
        })
        .await,
    )
}

pub async fn upsert_booking<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
    Json(change): Json<BookingChangeTO>,
) -> Response {
    error_handler(
        (async {
            let booking = rest_state
                .booking_service()
                .upsert(&BookingChange::from(&change), context.into())
                .await?;
            Ok(Response::builder()
                .status(200)
                .body(Body::new(
                    serde_json::to_string(&BookingTO::from(&booking)).unwrap(),
                ))
                .unwrap())
        })
        .await,
    )
}

pub async fn update_booking<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
    Path(booking_id): Path<Uuid>,
    Json(update): Json<BookingUpdateTO>,
) -> Response {
    error_handler(
        (async {
            let booking = rest_state
                .booking_service()
                .update(
                    booking_id,
                    update.status.map(Into::into),
                    update.notes.map(Arc::<str>::from),
                    context.into(),
                )
                .await?;
            Ok(Response::builder()
                .status(200)
                .body(Body::new(
                    serde_json::to_string(&BookingTO::from(&booking)).unwrap(),
                ))
                .unwrap())
        })
        .await,
    )
}

pub async fn delete_booking<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
    Path(booking_id): Path<Uuid>,
) -> Response {
    error_handler(
        (async {
            rest_state
                .booking_service()
                .delete(booking_id, context.into())
                .await?;
            Ok(Response::builder().status(200).body(Body::empty()).unwrap())
        })
        .await,
    )
}
