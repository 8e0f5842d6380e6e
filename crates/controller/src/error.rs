/// Errors from the workflow-controller client.
///
/// None of these are attributable to the gateway's caller: the API layer
/// maps them all to an internal-error response.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("controller request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The controller returned a non-2xx status code.
    #[error("controller error ({status}): {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The controller responded 2xx but the body did not decode.
    #[error("malformed controller response: {0}")]
    Format(String),
}
