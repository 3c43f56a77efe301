//! Normalized gateway responses.
//!
//! The gateway wraps every reply in the same envelope: a `response_code`
//! (`"00"` on success), free-form `response_text`, and a `custom_data` array
//! of `{keyof_customdata, valueof_customdata}` objects. Successful bodies are
//! normalized here: the array is folded into a plain map before the typed
//! response is produced. Failed bodies carry their error code inside
//! `response_text`; [`extract_error_code`] digs it out for the wiki.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response to invoice and withdrawal creation.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct BaseResponse {
    pub response_code: String,
    /// Transaction token, used later for status lookups.
    #[serde(default)]
    pub token: String,
    /// Free-form text; for redirect checkouts this is the payment URL.
    pub response_text: String,
    #[serde(default)]
    pub description: String,
    /// Link into the gateway error wiki.
    #[serde(default)]
    pub wiki: String,
    /// Caller-supplied data echoed back by the gateway, folded into a map.
    #[serde(default)]
    pub custom_data: Map<String, Value>,
}

/// Lifecycle state reported for a transaction.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    #[serde(rename = "nocompleted")]
    NotCompleted,
}

/// Response to a transaction status lookup.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct StatusResponse {
    pub response_code: String,
    #[serde(default)]
    pub token: String,
    pub response_text: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub wiki: String,
    #[serde(default)]
    pub custom_data: Map<String, Value>,
    /// Amount in whole XOF francs; `montant` is the gateway's own spelling,
    /// `amount` its duplicate.
    pub montant: u64,
    pub amount: u64,
    pub status: TransactionStatus,
    pub operator_id: String,
    pub operator_name: String,
    pub external_id: Option<String>,
    pub request_id: Option<String>,
    pub customer: Option<String>,
    pub date: Option<String>,
}

/// Folds the vendor `custom_data` array inside a raw response body into a
/// plain object. Later entries win on duplicate keys, matching the gateway's
/// own echo order; per-entry bookkeeping fields (`id_invoice`) are dropped.
/// An empty or `null` array becomes `{}`; a missing field is left missing.
pub(crate) fn fold_custom_data(body: &mut Value) {
    let Some(object) = body.as_object_mut() else {
        return;
    };
    let folded = match object.get("custom_data") {
        Some(Value::Array(entries)) => {
            let mut map = Map::new();
            for entry in entries {
                let key = entry.get("keyof_customdata").and_then(Value::as_str);
                let value = entry.get("valueof_customdata");
                if let (Some(key), Some(value)) = (key, value) {
                    map.insert(key.to_string(), value.clone());
                }
            }
            map
        }
        Some(Value::Null) => Map::new(),
        _ => return,
    };
    object.insert("custom_data".to_string(), Value::Object(folded));
}

/// Extracts the first 2-3 digit run, with an optional single trailing ASCII
/// letter, from the gateway's free-form response text. The letter suffix is
/// folded to lowercase so suffixed codes (`03a`, `03b`) match the wiki keys.
pub(crate) fn extract_error_code(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let run = i - start;
            if run >= 2 {
                let take = run.min(3);
                let mut code = text[start..start + take].to_string();
                // A letter only attaches when it directly follows the taken
                // digits, so runs longer than three digits never get one.
                if take == run {
                    if let Some(&next) = bytes.get(i) {
                        if next.is_ascii_alphabetic() {
                            code.push(next.to_ascii_lowercase() as char);
                        }
                    }
                }
                return Some(code);
            }
            // A lone digit is not a code; keep scanning.
        } else {
            i += 1;
        }
    }
    None
}
