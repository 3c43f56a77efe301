//! The SDK entry point.

use crate::config::{ApiConfig, Platform};
use crate::error::Result;
use crate::http::HttpProvider;
use crate::payin::Invoice;
use crate::payout::Withdrawal;
use crate::response::StatusResponse;
use crate::transaction::{self, TransactionKind};

/// Entry point to the gateway.
///
/// One `Ligdicash` owns an authenticated transport; the invoices and
/// withdrawals it hands out share that transport. The client is cheap to
/// clone.
#[derive(Clone)]
pub struct Ligdicash {
    provider: HttpProvider,
}

impl Ligdicash {
    /// Builds a client for the given credentials.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            provider: HttpProvider::new(config)?,
        })
    }

    /// Builds a client from the `LIGDICASH_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(&ApiConfig::from_env()?)
    }

    /// The platform this client talks to.
    pub fn platform(&self) -> Platform {
        self.provider.platform()
    }

    /// Starts an empty invoice to collect from a customer.
    pub fn invoice(&self) -> Invoice {
        Invoice::new(self.provider.clone())
    }

    /// Starts a withdrawal paying `amount` XOF francs to a customer wallet.
    pub fn withdrawal(
        &self,
        amount: u64,
        description: impl Into<String>,
        customer: impl Into<String>,
    ) -> Withdrawal {
        Withdrawal::new(self.provider.clone(), amount, description, customer)
    }

    /// Looks up a transaction by its creation token.
    pub async fn get_transaction(
        &self,
        token: &str,
        kind: TransactionKind,
    ) -> Result<StatusResponse> {
        transaction::get_transaction(&self.provider, token, kind).await
    }
}
