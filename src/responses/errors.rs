use crate::errors::ServerError;
use crate::templates::components::error_page;
use astra::{Body, Response, ResponseBuilder};
use tracing::{error, warn};

pub type ResultResp = Result<Response, ServerError>;

/// Convert a ServerError into a proper HTML response
pub fn error_to_response(err: ServerError) -> Response {
    let status = err.status();
    if status >= 500 {
        error!(error = %err, "request failed");
    } else {
        warn!(error = %err, status, "request rejected");
    }

    let message = match &err {
        // Don't leak SQL or stored values to the browser.
        ServerError::DbError(_)
        | ServerError::MalformedMeta { .. }
        | ServerError::ConfigError(_)
        | ServerError::Io(_) => "Internal Server Error".to_string(),
        other => other.to_string(),
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(error_page(status, &message).into_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
