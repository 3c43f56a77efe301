//! Error wiki: response-code resolution tables per platform and feature.
//!
//! The gateway reports failures as a short code embedded in free text; what a
//! code means depends on which feature was called and, for payin and status,
//! on the platform. The tables below are transcribed from the gateway
//! documentation. Codes are lowercase (`03a`, `03b`); anything the tables do
//! not list resolves to [`ErrorKind::Api`].

use std::fmt;

use crate::config::Platform;
use crate::error::ErrorKind;

/// Gateway feature whose error table applies to a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Invoice creation (redirect or OTP checkout).
    Payin,
    /// Payout routed through the customer's Ligdicash wallet.
    ClientPayout,
    /// Direct payout from the merchant account.
    MerchantPayout,
    /// Transaction status lookup.
    Status,
}

impl Feature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Payin => "payin",
            Feature::ClientPayout => "client_payout",
            Feature::MerchantPayout => "merchant_payout",
            Feature::Status => "status",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves an extracted response code for the given platform and feature.
///
/// Unknown codes resolve to [`ErrorKind::Api`].
pub fn resolve(platform: Platform, feature: Feature, code: &str) -> ErrorKind {
    match feature {
        Feature::Payin => payin(platform, code),
        Feature::ClientPayout => client_payout(code),
        Feature::MerchantPayout => merchant_payout(code),
        Feature::Status => status(platform, code),
    }
}

fn payin(platform: Platform, code: &str) -> ErrorKind {
    // Codes 05..13 only exist on the live platform.
    match (platform, code) {
        (_, "00") => ErrorKind::Authentication,
        (Platform::Test, "01") => ErrorKind::ApplicationAuthentication,
        (Platform::Live, "01") => ErrorKind::MerchantPayinDisabled,
        (_, "02") => ErrorKind::InvalidAmount,
        (_, "03") => ErrorKind::IpDenied,
        (_, "04") => ErrorKind::Processing,
        (Platform::Live, "05" | "06") => ErrorKind::Sending,
        (Platform::Live, "07") => ErrorKind::NoNetworkAccessConfiguration,
        (Platform::Live, "08") => ErrorKind::DataInput,
        (Platform::Live, "09") => ErrorKind::Api,
        (Platform::Live, "10") => ErrorKind::NoHash,
        (Platform::Live, "11") => ErrorKind::InvalidHash,
        (Platform::Live, "12") => ErrorKind::InvalidMethod,
        (Platform::Live, "13") => ErrorKind::UnauthorizedMethod,
        _ => ErrorKind::Api,
    }
}

// Test and live tables are identical for both payout features.

fn client_payout(code: &str) -> ErrorKind {
    match code {
        "00" => ErrorKind::Authentication,
        "01" => ErrorKind::MerchantPayoutDisabled,
        "02" => ErrorKind::CustomerDoesNotExist,
        "03" => ErrorKind::MerchantAccountDoesNotExist,
        "03a" => ErrorKind::NoPendProcPayout24H,
        "03b" => ErrorKind::NoDeposit3M,
        "04" => ErrorKind::MerchantBalanceLow,
        "05" => ErrorKind::AmountOutOfRange,
        "06" => ErrorKind::IpDenied,
        "07" => ErrorKind::TransactionAlreadyExist,
        "08" => ErrorKind::Processing,
        "09" => ErrorKind::DataInput,
        "10" => ErrorKind::Api,
        "13" => ErrorKind::NoHash,
        "14" => ErrorKind::InvalidHash,
        _ => ErrorKind::Api,
    }
}

fn merchant_payout(code: &str) -> ErrorKind {
    match code {
        "00" => ErrorKind::Authentication,
        "01" => ErrorKind::ApplicationAuthentication,
        "02" => ErrorKind::AmountOutOfRange,
        "03" | "06" | "07" => ErrorKind::MerchantAccountDoesNotExist,
        "04" => ErrorKind::NoPendProcPayout24H,
        "05" => ErrorKind::RecipientOperatorNotIdentified,
        "08" => ErrorKind::MerchantBalanceLow,
        "09" => ErrorKind::Processing,
        "10" => ErrorKind::Api,
        "11" => ErrorKind::NoHash,
        "12" => ErrorKind::InvalidHash,
        "13" => ErrorKind::UnauthorizedCurrencyConversion,
        "14" => ErrorKind::IpDenied,
        _ => ErrorKind::Api,
    }
}

fn status(platform: Platform, code: &str) -> ErrorKind {
    match (platform, code) {
        (_, "00") => ErrorKind::Authentication,
        (Platform::Test, "01") => ErrorKind::ApplicationAuthentication,
        (Platform::Live, "01") => ErrorKind::MerchantPayinDisabled,
        (_, "02") => ErrorKind::InvoiceNotFound,
        (_, "03") => ErrorKind::Processing,
        (Platform::Live, "04") => ErrorKind::DataInput,
        _ => ErrorKind::Api,
    }
}
