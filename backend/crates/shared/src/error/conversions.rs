//! Error conversions - HTTP response rendering for [`AppError`]
//!
//! Every public form endpoint answers with the same JSON envelope,
//! `{"success": false, "error": "..."}`, so the frontend can show a toast
//! without branching on the status code.

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for super::app_error::AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // source はログ専用。クライアントには message のみ返す
        let body = serde_json::json!({
            "success": false,
            "error": self.message(),
        });

        (status, Json(body)).into_response()
    }
}
