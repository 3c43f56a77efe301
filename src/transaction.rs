//! Transaction status lookups.

use crate::error::Result;
use crate::http::HttpProvider;
use crate::response::StatusResponse;
use crate::wiki::Feature;

/// The flow a transaction was created by. Each flow confirms its tokens on
/// its own endpoint, under its own query-parameter name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    /// Invoice created by payin, either flavor.
    Payin,
    /// Withdrawal on the client rail.
    ClientPayout,
    /// Withdrawal on the merchant rail.
    MerchantPayout,
}

impl TransactionKind {
    fn confirm_endpoint(self) -> (&'static str, &'static str) {
        match self {
            TransactionKind::Payin => ("redirect/checkout-invoice/confirm/", "invoiceToken"),
            TransactionKind::ClientPayout => ("withdrawal/confirm/", "withdrawalToken"),
            TransactionKind::MerchantPayout => ("straight/payout/confirm/", "payoutToken"),
        }
    }
}

/// Looks up the current state of a transaction by its creation token.
#[tracing::instrument(skip(provider))]
pub(crate) async fn get_transaction(
    provider: &HttpProvider,
    token: &str,
    kind: TransactionKind,
) -> Result<StatusResponse> {
    let (endpoint, token_param) = kind.confirm_endpoint();
    provider
        .get_json(endpoint, &[(token_param, token)], Feature::Status)
        .await
}
