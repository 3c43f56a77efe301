//! Retry policy for transient transport failures.

use crate::error::Error;

/// Maximum number of attempts for idempotent requests.
pub const MAX_RETRIES: usize = 3;

/// Delay between retry attempts in milliseconds.
pub const RETRY_DELAY_MS: u64 = 1000;

/// Classifies an error as worth repeating or not.
///
/// Only transport trouble that can clear on its own qualifies: connect
/// failures, timeouts and 5xx statuses. Gateway rejections, 4xx statuses and
/// malformed bodies will answer the same way on every attempt.
pub fn is_retryable(error: &Error) -> bool {
    match error {
        Error::Http(e) => {
            if e.is_connect() || e.is_timeout() {
                return true;
            }
            e.status().is_some_and(|status| status.is_server_error())
        }
        _ => false,
    }
}
