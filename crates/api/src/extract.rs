//! Request extractors that report rejections as [`AppError`] JSON bodies.

use axum::extract::FromRequest;
use axum::response::{IntoResponse, Response};

use crate::error::AppError;

/// Drop-in replacement for [`axum::Json`].
///
/// A malformed body, a wrong content type, or a field the target type
/// refuses becomes a 400 `BAD_REQUEST` with the usual `{ error, code }`
/// shape instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl<T: serde::Serialize> IntoResponse for AppJson<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}
