//! Handlers for the `/uploads` resource.
//!
//! Real file storage is an external collaborator; this endpoint returns
//! an opaque placeholder avatar URL the flow stores under the reserved
//! `profileImage` form-data key without further processing.

use axum::response::IntoResponse;
use axum::Json;
use rand::Rng;

use onboard_core::field::FORM_DATA_KEY_PROFILE_IMAGE;

use crate::error::AppResult;
use crate::response::DataResponse;

/// POST /api/v1/uploads/avatar
///
/// The response names the reserved form-data key so clients store the URL
/// where the dashboard expects to find it.
pub async fn upload_avatar() -> AppResult<impl IntoResponse> {
    let avatar_id: u32 = rand::rng().random_range(0..100);
    let url = format!("https://i.pravatar.cc/300?img={avatar_id}");

    tracing::debug!(url = %url, "Issued placeholder avatar URL");

    Ok(Json(DataResponse {
        data: serde_json::json!({
            "url": url,
            "form_key": FORM_DATA_KEY_PROFILE_IMAGE,
        }),
    }))
}
