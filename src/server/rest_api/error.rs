use crate::store::error::StoreError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

/// Type-erased error response, a slimmed-down take on RFC7807 problem
/// details.
///
/// See: <https://www.rfc-editor.org/rfc/rfc7807.html>
#[derive(Serialize, Debug)]
pub struct ApiErrorResponse {
	r#type: &'static str,
	status: u16,
	message: String,
}

impl ApiErrorResponse {
	pub fn bad_request(message: impl Into<String>) -> Self {
		Self {
			r#type: "bad-request",
			status: StatusCode::BAD_REQUEST.as_u16(),
			message: message.into(),
		}
	}

	pub fn not_found(message: impl Into<String>) -> Self {
		Self {
			r#type: "not-found",
			status: StatusCode::NOT_FOUND.as_u16(),
			message: message.into(),
		}
	}

	pub fn service_unavailable(message: impl Into<String>) -> Self {
		Self {
			r#type: "service-unavailable",
			status: StatusCode::SERVICE_UNAVAILABLE.as_u16(),
			message: message.into(),
		}
	}

	pub fn internal(message: impl Into<String>) -> Self {
		Self {
			r#type: "internal",
			status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
			message: message.into(),
		}
	}
}

impl From<StoreError> for ApiErrorResponse {
	fn from(store_error: StoreError) -> Self {
		match store_error {
			StoreError::NotFound => Self::not_found("Entity not found"),
			other => {
				error!("Store operation failed: {other}");
				Self::internal("Store operation failed")
			}
		}
	}
}

impl IntoResponse for ApiErrorResponse {
	fn into_response(self) -> Response {
		let status_code = StatusCode::from_u16(self.status).expect("StatusCode could not be mapped.");
		(status_code, Json(self)).into_response()
	}
}
