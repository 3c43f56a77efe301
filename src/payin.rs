//! Payin: collect money from a customer wallet, with or without a hosted
//! checkout page.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::http::HttpProvider;
use crate::response::BaseResponse;
use crate::wiki::Feature;

/// A line on an invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceItem {
    pub name: String,
    pub description: String,
    pub quantity: u32,
    /// Price of one unit, in whole XOF francs.
    pub unit_price: u64,
}

impl InvoiceItem {
    /// Line total: `unit_price * quantity`.
    pub fn total_price(&self) -> u64 {
        self.unit_price * u64::from(self.quantity)
    }
}

/// Options for the hosted checkout flow.
#[derive(Debug, Clone, Default)]
pub struct RedirectPayment {
    /// Where the customer lands after cancelling the payment.
    pub cancel_url: Option<String>,
    /// Where the customer lands after a successful payment.
    pub return_url: Option<String>,
    /// Server-to-server notification URL for transaction status changes.
    pub callback_url: Option<String>,
    /// Arbitrary pairs echoed back when the transaction is queried.
    pub custom_data: Map<String, Value>,
}

/// Options for the direct debit flow confirmed by a one-time password.
#[derive(Debug, Clone, Default)]
pub struct OtpPayment {
    /// One-time password the customer obtained from their operator.
    pub otp: String,
    /// Wallet number of the paying customer.
    pub customer: String,
    /// Server-to-server notification URL for transaction status changes.
    pub callback_url: Option<String>,
    pub custom_data: Map<String, Value>,
}

/// An invoice to collect from a customer.
///
/// Obtained from [`Ligdicash::invoice`](crate::Ligdicash::invoice). Fill in
/// the public fields, add items, then submit it with
/// [`pay_with_redirection`](Invoice::pay_with_redirection) or
/// [`pay_without_redirection`](Invoice::pay_without_redirection).
#[derive(Clone)]
pub struct Invoice {
    provider: HttpProvider,
    items: Vec<InvoiceItem>,
    /// ISO currency code. The gateway only settles `"XOF"` today.
    pub currency: String,
    pub description: String,
    pub customer_firstname: String,
    pub customer_lastname: String,
    pub customer_email: String,
    pub store_name: String,
    pub store_website_url: String,
    /// Merchant-side reference echoed back on status queries.
    pub external_id: String,
}

impl Invoice {
    pub(crate) fn new(provider: HttpProvider) -> Self {
        Self {
            provider,
            items: Vec::new(),
            currency: "XOF".to_string(),
            description: String::new(),
            customer_firstname: String::new(),
            customer_lastname: String::new(),
            customer_email: String::new(),
            store_name: String::new(),
            store_website_url: String::new(),
            external_id: String::new(),
        }
    }

    /// Appends a line to the invoice.
    pub fn add_item(&mut self, item: InvoiceItem) {
        self.items.push(item);
    }

    /// The lines added so far.
    pub fn items(&self) -> &[InvoiceItem] {
        &self.items
    }

    /// Invoice total: the sum of all line totals, in whole XOF francs.
    pub fn total_amount(&self) -> u64 {
        self.items.iter().map(InvoiceItem::total_price).sum()
    }

    /// Creates a hosted checkout invoice.
    ///
    /// On success the returned `token` identifies the invoice for status
    /// queries and `response_text` carries the URL to send the customer to.
    #[tracing::instrument(skip(self, payment))]
    pub async fn pay_with_redirection(&self, payment: RedirectPayment) -> Result<BaseResponse> {
        let actions = ActionsPayload {
            callback_url: payment.callback_url.as_deref().unwrap_or_default(),
            cancel_url: payment.cancel_url.as_deref(),
            return_url: payment.return_url.as_deref(),
        };
        let payload = self.checkout_payload("", "", actions, &payment.custom_data);
        self.provider
            .post_json("redirect/checkout-invoice/create", &payload, Feature::Payin)
            .await
    }

    /// Debits the customer wallet directly, confirmed by the one-time
    /// password the customer obtained from their operator.
    ///
    /// Fails fast with [`Error::InvalidOtp`] when the password is blank.
    /// Status notifications go to `callback_url`; the flow has no browser
    /// redirections.
    #[tracing::instrument(skip(self, payment))]
    pub async fn pay_without_redirection(&self, payment: OtpPayment) -> Result<BaseResponse> {
        if payment.otp.trim().is_empty() {
            return Err(Error::InvalidOtp);
        }

        let actions = ActionsPayload {
            callback_url: payment.callback_url.as_deref().unwrap_or_default(),
            cancel_url: None,
            return_url: None,
        };
        let payload =
            self.checkout_payload(&payment.customer, &payment.otp, actions, &payment.custom_data);
        self.provider
            .post_json("straight/checkout-invoice/create", &payload, Feature::Payin)
            .await
    }

    fn checkout_payload<'a>(
        &'a self,
        customer: &'a str,
        otp: &'a str,
        actions: ActionsPayload<'a>,
        custom_data: &'a Map<String, Value>,
    ) -> CheckoutPayload<'a> {
        CheckoutPayload {
            commande: CommandPayload {
                invoice: InvoicePayload {
                    items: self
                        .items
                        .iter()
                        .map(|item| ItemPayload {
                            name: &item.name,
                            description: &item.description,
                            quantity: item.quantity,
                            unit_price: item.unit_price,
                            total_price: item.total_price(),
                        })
                        .collect(),
                    total_amount: self.total_amount(),
                    devise: &self.currency,
                    description: &self.description,
                    customer,
                    customer_firstname: &self.customer_firstname,
                    customer_lastname: &self.customer_lastname,
                    customer_email: &self.customer_email,
                    external_id: &self.external_id,
                    otp,
                },
                store: StorePayload {
                    name: &self.store_name,
                    website_url: &self.store_website_url,
                },
                actions,
                custom_data,
            },
        }
    }
}

#[derive(Serialize)]
struct CheckoutPayload<'a> {
    commande: CommandPayload<'a>,
}

#[derive(Serialize)]
struct CommandPayload<'a> {
    invoice: InvoicePayload<'a>,
    store: StorePayload<'a>,
    actions: ActionsPayload<'a>,
    custom_data: &'a Map<String, Value>,
}

#[derive(Serialize)]
struct InvoicePayload<'a> {
    items: Vec<ItemPayload<'a>>,
    total_amount: u64,
    // The gateway names the currency field "devise".
    devise: &'a str,
    description: &'a str,
    customer: &'a str,
    customer_firstname: &'a str,
    customer_lastname: &'a str,
    customer_email: &'a str,
    external_id: &'a str,
    otp: &'a str,
}

#[derive(Serialize)]
struct ItemPayload<'a> {
    name: &'a str,
    description: &'a str,
    quantity: u32,
    unit_price: u64,
    total_price: u64,
}

#[derive(Serialize)]
struct StorePayload<'a> {
    name: &'a str,
    website_url: &'a str,
}

#[derive(Serialize)]
struct ActionsPayload<'a> {
    callback_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    cancel_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    return_url: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use mockito::Matcher;
    use serde_json::json;

    fn invoice_for(server: &mockito::Server) -> Invoice {
        let config = ApiConfig::new("test_key", "test_token").with_base_url(server.url());
        let provider = HttpProvider::new(&config).unwrap();
        Invoice::new(provider)
    }

    #[test]
    fn test_item_total_price() {
        let item = InvoiceItem {
            name: "Data bundle".to_string(),
            description: String::new(),
            quantity: 3,
            unit_price: 500,
        };
        assert_eq!(item.total_price(), 1500);
    }

    #[test]
    fn test_total_amount_sums_line_totals() {
        let config = ApiConfig::new("k", "t");
        let mut invoice = Invoice::new(HttpProvider::new(&config).unwrap());
        assert_eq!(invoice.total_amount(), 0);

        invoice.add_item(InvoiceItem {
            name: "Data bundle".to_string(),
            description: String::new(),
            quantity: 2,
            unit_price: 1500,
        });
        invoice.add_item(InvoiceItem {
            name: "SIM card".to_string(),
            description: "prepaid".to_string(),
            quantity: 1,
            unit_price: 500,
        });

        assert_eq!(invoice.items().len(), 2);
        assert_eq!(invoice.total_amount(), 3500);
    }

    #[tokio::test]
    async fn test_pay_with_redirection_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/redirect/checkout-invoice/create")
            .match_header("Apikey", "test_key")
            .match_body(Matcher::Json(json!({
                "commande": {
                    "invoice": {
                        "items": [{
                            "name": "Data bundle",
                            "description": "",
                            "quantity": 2,
                            "unit_price": 1500,
                            "total_price": 3000
                        }],
                        "total_amount": 3000,
                        "devise": "XOF",
                        "description": "Top-up order",
                        "customer": "",
                        "customer_firstname": "Awa",
                        "customer_lastname": "Ouedraogo",
                        "customer_email": "awa@example.com",
                        "external_id": "order-77",
                        "otp": ""
                    },
                    "store": {
                        "name": "Example Store",
                        "website_url": "https://store.example.com"
                    },
                    "actions": {
                        "callback_url": "https://store.example.com/hooks/pay",
                        "cancel_url": "https://store.example.com/cancel",
                        "return_url": "https://store.example.com/done"
                    },
                    "custom_data": {"basket": "b-12"}
                }
            })))
            .with_status(200)
            .with_body(
                r#"{"response_code": "00", "token": "inv_abc",
                    "response_text": "https://pay.example.com/inv_abc",
                    "description": "ok", "custom_data": []}"#,
            )
            .create_async()
            .await;

        let mut invoice = invoice_for(&server);
        invoice.description = "Top-up order".to_string();
        invoice.customer_firstname = "Awa".to_string();
        invoice.customer_lastname = "Ouedraogo".to_string();
        invoice.customer_email = "awa@example.com".to_string();
        invoice.store_name = "Example Store".to_string();
        invoice.store_website_url = "https://store.example.com".to_string();
        invoice.external_id = "order-77".to_string();
        invoice.add_item(InvoiceItem {
            name: "Data bundle".to_string(),
            description: String::new(),
            quantity: 2,
            unit_price: 1500,
        });

        let mut custom_data = Map::new();
        custom_data.insert("basket".to_string(), Value::String("b-12".to_string()));

        let response = invoice
            .pay_with_redirection(RedirectPayment {
                cancel_url: Some("https://store.example.com/cancel".to_string()),
                return_url: Some("https://store.example.com/done".to_string()),
                callback_url: Some("https://store.example.com/hooks/pay".to_string()),
                custom_data,
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.token, "inv_abc");
        assert_eq!(response.response_text, "https://pay.example.com/inv_abc");
    }

    #[tokio::test]
    async fn test_unset_urls_send_empty_callback_only() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/redirect/checkout-invoice/create")
            .match_body(Matcher::Json(json!({
                "commande": {
                    "invoice": {
                        "items": [],
                        "total_amount": 0,
                        "devise": "XOF",
                        "description": "",
                        "customer": "",
                        "customer_firstname": "",
                        "customer_lastname": "",
                        "customer_email": "",
                        "external_id": "",
                        "otp": ""
                    },
                    "store": {"name": "", "website_url": ""},
                    "actions": {"callback_url": ""},
                    "custom_data": {}
                }
            })))
            .with_status(200)
            .with_body(
                r#"{"response_code": "00", "token": "inv_min",
                    "response_text": "https://pay.example.com/inv_min",
                    "description": "", "custom_data": []}"#,
            )
            .create_async()
            .await;

        let invoice = invoice_for(&server);
        let response = invoice
            .pay_with_redirection(RedirectPayment::default())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.token, "inv_min");
    }

    #[tokio::test]
    async fn test_pay_without_redirection_sends_otp_and_callback() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/straight/checkout-invoice/create")
            .match_body(Matcher::Json(json!({
                "commande": {
                    "invoice": {
                        "items": [],
                        "total_amount": 0,
                        "devise": "XOF",
                        "description": "",
                        "customer": "226700000001",
                        "customer_firstname": "",
                        "customer_lastname": "",
                        "customer_email": "",
                        "external_id": "",
                        "otp": "133337"
                    },
                    "store": {"name": "", "website_url": ""},
                    "actions": {"callback_url": "https://store.example.com/hooks/pay"},
                    "custom_data": {}
                }
            })))
            .with_status(200)
            .with_body(
                r#"{"response_code": "00", "token": "inv_otp",
                    "response_text": "transaction initiated",
                    "description": "", "custom_data": []}"#,
            )
            .create_async()
            .await;

        let invoice = invoice_for(&server);
        let response = invoice
            .pay_without_redirection(OtpPayment {
                otp: "133337".to_string(),
                customer: "226700000001".to_string(),
                callback_url: Some("https://store.example.com/hooks/pay".to_string()),
                custom_data: Map::new(),
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.token, "inv_otp");
    }

    #[tokio::test]
    async fn test_blank_otp_is_rejected_locally() {
        let config = ApiConfig::new("k", "t");
        let invoice = Invoice::new(HttpProvider::new(&config).unwrap());

        let result = invoice
            .pay_without_redirection(OtpPayment {
                otp: "   ".to_string(),
                ..OtpPayment::default()
            })
            .await;

        assert!(matches!(result, Err(Error::InvalidOtp)));
    }

    #[tokio::test]
    async fn test_payin_rejection_resolves_for_platform() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/redirect/checkout-invoice/create")
            .with_status(200)
            .with_body(
                r#"{"response_code": "99",
                    "response_text": "rejected with code 02, amount must be positive"}"#,
            )
            .create_async()
            .await;

        let invoice = invoice_for(&server);
        let result = invoice.pay_with_redirection(RedirectPayment::default()).await;

        match result {
            Err(Error::Gateway { kind, code }) => {
                assert_eq!(kind, crate::error::ErrorKind::InvalidAmount);
                assert_eq!(code, "02");
            }
            other => panic!("expected gateway error, got {:?}", other.map(|_| ())),
        }
    }
}
