//! HTTP transport module with retry logic and envelope decoding.

mod provider;
mod retry;

pub use provider::HttpProvider;
pub use retry::{MAX_RETRIES, RETRY_DELAY_MS, is_retryable};
