use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` whose rejections are reported through [`AppError`], so a
/// malformed body gets the usual envelope and a 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
