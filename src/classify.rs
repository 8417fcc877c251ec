use crate::error::{HttpError, HttpErrorKind};

/// Map a response status to an error; `Ok` means the body is usable.
///
/// A missing status is treated like a server failure.
pub fn check_status(status: Option<u16>, body: &[u8]) -> Result<(), HttpError> {
    match status {
        Some(code) => tracing::debug!(status = code, "Response status"),
        None => tracing::debug!("Response status missing"),
    }

    let kind = match status {
        Some(401) => HttpErrorKind::Auth,
        None => HttpErrorKind::Server,
        Some(code) if code >= 500 => HttpErrorKind::Server,
        Some(code) if code >= 400 => HttpErrorKind::Client,
        Some(_) => return Ok(()),
    };

    let message = error_message(body);
    match kind {
        HttpErrorKind::Auth => tracing::error!("Auth error: {}", message),
        HttpErrorKind::Server => tracing::error!("5xx Server error: {}", message),
        HttpErrorKind::Client => tracing::error!("4xx Client error: {}", message),
    }

    Err(HttpError {
        kind,
        status,
        message,
    })
}

/// `title` of a JSON error body, or the raw body text when there is none
pub fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("title")?.as_str().map(str::to_string))
        .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned())
}
