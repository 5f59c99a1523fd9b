//! Handlers for the `/admin` resource.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use onboard_db::models::user::PublicUser;
use onboard_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/users
///
/// List registered users for the admin console, newest first.
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let users = UserRepo::list_all(&state.pool).await?;
    let users: Vec<PublicUser> = users.iter().map(PublicUser::from).collect();

    tracing::debug!(count = users.len(), "Listed users");

    Ok(Json(DataResponse { data: users }))
}
