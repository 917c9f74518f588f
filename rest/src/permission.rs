use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::{delete, get, post};
use axum::{Extension, Json, Router};
use rest_types::{RoleTO, UserRoleTO, UserTO};
use service::PermissionService;

use crate::{error_handler, Context, RestStateDef};

pub fn generate_route<RestState: RestStateDef>() -> Router<RestState> {
    Router::new()
        .route("/user", get(get_all_users::<RestState>))
        .route("/user", post(create_user::<RestState>))
        .route("/user/{user}", delete(delete_user::<RestState>))
        .route("/user/{user}/role", get(get_roles_of_user::<RestState>))
        .route("/user_role", post(add_user_role::<RestState>))
        .route("/user_role", delete(delete_user_role::<RestState>))
}

pub async fn get_all_users<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
) -> Response {
    error_handler(
        (async {
            let users: Arc<[UserTO]> = rest_state
                .permission_service()
                .get_all_users(context.into())
                .await?
                .iter()
                .map(UserTO::from)
                .collect();
            Ok(Response::builder()
                .status(200)
                .body(Body::new(serde_json::to_string(&users).unwrap()))
                .unwrap())
        })
        .await,
    )
}

pub async fn create_user<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
    Json(user): Json<UserTO>,
) -> Response {
    error_handler(
        (async {
            rest_state
                .permission_service()
                .create_user(&user.name, context.into())
                .await?;
            Ok(Response::builder().status(200).body(Body::empty()).unwrap())
        })
        .await,
    )
}

pub async fn delete_user<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
    Path(user): Path<String>,
) -> Response {
    error_handler(
        (async {
            rest_state
                .permission_service()
                .delete_user(&user, context.into())
                .await?;
            Ok(Response::builder().status(200).body(Body::empty()).unwrap())
        })
        .await,
    )
}

pub async fn get_roles_of_user<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
    Path(user): Path<String>,
) -> Response {
    error_handler(
        (async {
            let roles: Arc<[RoleTO]> = rest_state
                .permission_service()
                .get_roles_of_user(&user, context.into())
                .await?
                .iter()
                .map(RoleTO::from)
                .collect();
            Ok(Response::builder()
                .status(200)
                .body(Body::new(serde_json::to_string(&roles).unwrap()))
                .unwrap())
        })
        .await,
    )
}

pub async fn add_user_role<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
    Json(user_role): Json<UserRoleTO>,
) -> Response {
    error_handler(
        (async {
            rest_state
                .permission_service()
                .add_user_role(&user_role.user, &user_role.role, context.into())
                .await?;
            Ok(Response::builder().status(200).body(Body::empty()).unwrap())
        })
        .await,
    )
}

pub async fn delete_user_role<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
    Json(user_role): Json<UserRoleTO>,
) -> Response {
    error_handler(
        (async {
            rest_state
                .permission_service()
                .delete_user_role(&user_role.user, &user_role.role, context.into())
                .await?;
            Ok(Response::builder().status(200).body(Body::empty()).unwrap())
        })
        .await,
    )
}
