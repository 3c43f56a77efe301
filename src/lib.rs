//! Client SDK for the Ligdicash mobile-money gateway.
//!
//! Covers the gateway's three surfaces: payin (with or without a hosted
//! checkout page), payout on the client and merchant rails, and transaction
//! status lookups, against either the test or the live platform.
//!
//! ```no_run
//! use ligdicash::{ApiConfig, InvoiceItem, Ligdicash, Platform, RedirectPayment};
//!
//! # async fn demo() -> ligdicash::Result<()> {
//! let config = ApiConfig::new("api-key", "auth-token").with_platform(Platform::Test);
//! let client = Ligdicash::new(&config)?;
//!
//! let mut invoice = client.invoice();
//! invoice.description = "Data bundle".to_string();
//! invoice.store_name = "Example Store".to_string();
//! invoice.add_item(InvoiceItem {
//!     name: "10GB bundle".to_string(),
//!     description: String::new(),
//!     quantity: 1,
//!     unit_price: 5000,
//! });
//!
//! let checkout = invoice
//!     .pay_with_redirection(RedirectPayment {
//!         callback_url: Some("https://store.example.com/hooks/pay".to_string()),
//!         ..RedirectPayment::default()
//!     })
//!     .await?;
//! println!("send the customer to {}", checkout.response_text);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod payin;
pub mod payout;
pub mod response;
pub mod transaction;
pub mod wiki;

pub use client::Ligdicash;
pub use config::{ApiConfig, Platform};
pub use error::{Error, ErrorKind, Result};
pub use payin::{Invoice, InvoiceItem, OtpPayment, RedirectPayment};
pub use payout::{SendOptions, Withdrawal, WithdrawalKind};
pub use response::{BaseResponse, StatusResponse, TransactionStatus};
pub use transaction::TransactionKind;
pub use wiki::{Feature, resolve};
