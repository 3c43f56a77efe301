//! Typed errors for gateway rejections and transport failures.

use std::fmt;

/// Gateway error kinds documented in the Ligdicash error wiki.
///
/// These are the kinds a non-`"00"` response code resolves to through
/// [`crate::wiki::resolve`]. `InvalidToken` and `NoDeposit24H` appear in the
/// gateway documentation but in no resolution table; they are kept so
/// integrators handling webhook payloads can name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid api_key or auth_token.
    Authentication,
    /// The calling application could not be authenticated.
    ApplicationAuthentication,
    /// The recipient's mobile-money operator could not be identified.
    RecipientOperatorNotIdentified,
    /// Merchant balance is too low to cover the payout.
    MerchantBalanceLow,
    /// Payout is disabled for this merchant.
    MerchantPayoutDisabled,
    /// Payin is not enabled for this merchant.
    MerchantPayinDisabled,
    /// The customer is not registered on the platform.
    CustomerDoesNotExist,
    /// A transaction with the same identifier already exists.
    TransactionAlreadyExist,
    /// Currency conversion is not authorized for this account.
    UnauthorizedCurrencyConversion,
    /// No invoice matches the given token.
    InvoiceNotFound,
    /// The amount is invalid.
    InvalidAmount,
    /// The transaction token is invalid.
    InvalidToken,
    /// No merchant account exists on the specified network.
    MerchantAccountDoesNotExist,
    /// No pending or processed payout within the last 24 hours.
    NoPendProcPayout24H,
    /// No deposit within the last 3 months.
    NoDeposit3M,
    /// No deposit within the last 24 hours.
    NoDeposit24H,
    /// The requested amount is outside the allowed range.
    AmountOutOfRange,
    /// The caller's IP address is not allowed.
    IpDenied,
    /// The gateway failed while processing the request.
    Processing,
    /// The gateway failed while sending the payment.
    Sending,
    /// The submitted data is malformed or incomplete.
    DataInput,
    /// Unspecified API error; also the fallback for unknown codes.
    Api,
    /// No hash was provided with the request.
    NoHash,
    /// The provided hash is invalid.
    InvalidHash,
    /// No network access is configured for this account.
    NoNetworkAccessConfiguration,
    /// The HTTP method is not authorized for this endpoint.
    UnauthorizedMethod,
    /// The HTTP method is invalid for this endpoint.
    InvalidMethod,
}

impl ErrorKind {
    /// Stable one-line description, as documented by the gateway.
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorKind::Authentication => "invalid api_key or auth_token",
            ErrorKind::ApplicationAuthentication => "application could not be authenticated",
            ErrorKind::RecipientOperatorNotIdentified => {
                "recipient operator could not be identified"
            }
            ErrorKind::MerchantBalanceLow => "merchant balance is insufficient",
            ErrorKind::MerchantPayoutDisabled => "payout is disabled for this merchant",
            ErrorKind::MerchantPayinDisabled => "payin is not enabled for this merchant",
            ErrorKind::CustomerDoesNotExist => "customer is not registered on the platform",
            ErrorKind::TransactionAlreadyExist => "transaction already exists",
            ErrorKind::UnauthorizedCurrencyConversion => "currency conversion is not authorized",
            ErrorKind::InvoiceNotFound => "invoice not found",
            ErrorKind::InvalidAmount => "invalid amount, must be between 20 and 1000000",
            ErrorKind::InvalidToken => "invalid token",
            ErrorKind::MerchantAccountDoesNotExist => {
                "no merchant account on the specified network"
            }
            ErrorKind::NoPendProcPayout24H => {
                "no pending or processed payout within the last 24 hours"
            }
            ErrorKind::NoDeposit3M => "no deposit within the last 3 months",
            ErrorKind::NoDeposit24H => "no deposit within the last 24 hours",
            ErrorKind::AmountOutOfRange => "requested amount is outside the [20;1000000] range",
            ErrorKind::IpDenied => "IP address denied",
            ErrorKind::Processing => "an error occurred during processing",
            ErrorKind::Sending => "an error occurred while sending",
            ErrorKind::DataInput => "incorrect input data",
            ErrorKind::Api => "API error",
            ErrorKind::NoHash => "no hash provided",
            ErrorKind::InvalidHash => "invalid hash",
            ErrorKind::NoNetworkAccessConfiguration => "no network access configured",
            ErrorKind::UnauthorizedMethod => "HTTP method not authorized",
            ErrorKind::InvalidMethod => "invalid HTTP method",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Errors returned by the client.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The gateway answered with a non-`"00"` response code. `code` is the
    /// raw code extracted from the response text (possibly empty when none
    /// could be found); `kind` is its resolution through the error wiki.
    #[error("gateway refused the request ({kind}, code {code:?})")]
    Gateway { kind: ErrorKind, code: String },

    /// Transport-level failure: connection, TLS, timeout or a non-2xx status.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// A 2xx body that does not match the expected response shape.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Credentials contain bytes that cannot appear in an HTTP header.
    #[error("credential is not a valid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// A blank OTP was passed to the no-redirect payin.
    #[error("one-time password must not be empty")]
    InvalidOtp,

    /// A required environment variable is not set.
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    /// The platform name is neither `test` nor `live`.
    #[error("unknown platform {0:?}, expected \"test\" or \"live\"")]
    UnknownPlatform(String),
}

impl Error {
    /// The resolved gateway error kind, for [`Error::Gateway`] values.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Gateway { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_message_stable() {
        assert_eq!(ErrorKind::Authentication.message(), "invalid api_key or auth_token");
        assert_eq!(ErrorKind::Api.message(), "API error");
        assert_eq!(ErrorKind::Api.to_string(), "API error");
    }

    #[test]
    fn test_gateway_error_display() {
        let err = Error::Gateway {
            kind: ErrorKind::MerchantBalanceLow,
            code: "08".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("merchant balance is insufficient"));
        assert!(text.contains("08"));
    }

    #[test]
    fn test_gateway_error_display_empty_code() {
        let err = Error::Gateway {
            kind: ErrorKind::Api,
            code: String::new(),
        };
        assert!(err.to_string().contains("\"\""));
    }

    #[test]
    fn test_kind_accessor() {
        let err = Error::Gateway {
            kind: ErrorKind::IpDenied,
            code: "06".to_string(),
        };
        assert_eq!(err.kind(), Some(ErrorKind::IpDenied));
        assert_eq!(Error::InvalidOtp.kind(), None);
    }

    #[test]
    fn test_unknown_platform_display() {
        let err = Error::UnknownPlatform("prod".to_string());
        assert!(err.to_string().contains("prod"));
        assert!(err.to_string().contains("live"));
    }
}
