//! Payout: move money from the merchant account to a customer.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::http::HttpProvider;
use crate::response::BaseResponse;
use crate::wiki::Feature;

/// Which payout rail the money takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithdrawalKind {
    /// The amount passes through the customer's Ligdicash wallet first.
    /// With `to_wallet` set it stays there instead of being pushed on to
    /// the customer's mobile money account.
    Client { to_wallet: bool },
    /// The amount goes straight from the merchant account to the customer's
    /// mobile money account.
    Merchant,
}

/// Options for submitting a withdrawal.
#[derive(Debug, Clone)]
pub struct SendOptions {
    pub kind: WithdrawalKind,
    /// Server-to-server notification URL for transaction status changes.
    pub callback_url: Option<String>,
    /// Arbitrary pairs echoed back when the transaction is queried.
    pub custom_data: Map<String, Value>,
}

impl SendOptions {
    pub fn new(kind: WithdrawalKind) -> Self {
        Self {
            kind,
            callback_url: None,
            custom_data: Map::new(),
        }
    }
}

/// A withdrawal request to pay a customer.
///
/// Obtained from [`Ligdicash::withdrawal`](crate::Ligdicash::withdrawal),
/// then submitted with [`send`](Withdrawal::send).
#[derive(Clone)]
pub struct Withdrawal {
    provider: HttpProvider,
    /// Amount to pay out, in whole XOF francs.
    pub amount: u64,
    pub description: String,
    /// Wallet number of the customer being paid.
    pub customer: String,
}

impl Withdrawal {
    pub(crate) fn new(
        provider: HttpProvider,
        amount: u64,
        description: impl Into<String>,
        customer: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            amount,
            description: description.into(),
            customer: customer.into(),
        }
    }

    /// Submits the withdrawal on the rail picked by `options.kind`.
    #[tracing::instrument(skip(self, options))]
    pub async fn send(&self, options: SendOptions) -> Result<BaseResponse> {
        let (endpoint, feature, to_ligdicash) = match options.kind {
            WithdrawalKind::Client { to_wallet } => {
                ("withdrawal/create", Feature::ClientPayout, Some(to_wallet))
            }
            WithdrawalKind::Merchant => ("straight/payout", Feature::MerchantPayout, None),
        };

        let payload = PayoutPayload {
            commande: PayoutCommand {
                amount: self.amount,
                description: &self.description,
                customer: &self.customer,
                custom_data: &options.custom_data,
                callback_url: options.callback_url.as_deref().unwrap_or_default(),
                to_ligdicash,
            },
        };
        self.provider.post_json(endpoint, &payload, feature).await
    }
}

#[derive(Serialize)]
struct PayoutPayload<'a> {
    commande: PayoutCommand<'a>,
}

#[derive(Serialize)]
struct PayoutCommand<'a> {
    amount: u64,
    description: &'a str,
    customer: &'a str,
    custom_data: &'a Map<String, Value>,
    callback_url: &'a str,
    // Only sent on the client rail.
    #[serde(skip_serializing_if = "Option::is_none")]
    to_ligdicash: Option<bool>,
}
