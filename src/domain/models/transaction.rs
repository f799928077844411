//! Transaction model module for ledger history records.
//!
//! Upstream SDK versions disagree on where a transaction's memo lives and on
//! whether a history page is a bare list or a `{data, cursor}` envelope. This
//! module decodes both once, at the boundary, into [`RawTransaction`] and
//! [`TransactionPage`], so the rest of the gateway only sees one shape.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A transaction as returned by the ledger history endpoint.
///
/// Only the fields the gateway interprets are modelled. Every field is
/// optional, and a field holding anything other than a string is treated as
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    /// Stable transaction identifier
    #[serde(default, deserialize_with = "string_or_none")]
    pub hash: Option<String>,
    /// Top-level memo
    #[serde(default, deserialize_with = "string_or_none")]
    pub memo: Option<String>,
    /// Transaction as originally submitted, as nested by older SDK versions
    #[serde(default, deserialize_with = "lenient")]
    pub transaction_original: Option<TransactionOriginal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TransactionOriginal {
    #[serde(default, deserialize_with = "lenient")]
    pub value: Option<OriginalValue>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub memo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OriginalValue {
    #[serde(default, deserialize_with = "string_or_none")]
    pub memo: Option<String>,
}

impl RawTransaction {
    /// Decodes a single history item. Items that are not objects, or whose
    /// fields cannot be read, still count as transactions; they just carry
    /// nothing the gateway interprets.
    pub fn from_value(value: Value) -> Self {
        from_object(value).unwrap_or_default()
    }

    /// Returns the memo of this transaction, wherever the upstream put it.
    ///
    /// The first non-empty candidate wins, in order: the top-level `memo`,
    /// `transactionOriginal.value.memo`, then `transactionOriginal.memo`.
    pub fn memo(&self) -> Option<&str> {
        let original = self.transaction_original.as_ref();

        [
            self.memo.as_deref(),
            original
                .and_then(|o| o.value.as_ref())
                .and_then(|v| v.memo.as_deref()),
            original.and_then(|o| o.memo.as_deref()),
        ]
        .into_iter()
        .flatten()
        .find(|memo| !memo.is_empty())
    }
}

/// One page of transaction history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionPage {
    /// A plain list of transactions. Never has a continuation.
    BareList(Vec<RawTransaction>),
    /// A `{data, cursor}` envelope.
    Envelope {
        data: Vec<RawTransaction>,
        cursor: Option<String>,
    },
    /// Neither shape. Treated as end of history.
    Unrecognized,
}

impl TransactionPage {
    /// Classifies a raw history response.
    ///
    /// An empty or non-string cursor counts as no cursor.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::BareList(decode_items(items)),
            Value::Object(mut envelope) => match envelope.remove("data") {
                Some(Value::Array(items)) => Self::Envelope {
                    data: decode_items(items),
                    cursor: match envelope.remove("cursor") {
                        Some(Value::String(cursor)) if !cursor.is_empty() => Some(cursor),
                        _ => None,
                    },
                },
                _ => Self::Unrecognized,
            },
            _ => Self::Unrecognized,
        }
    }
}

impl<'de> Deserialize<'de> for TransactionPage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

fn decode_items(items: Vec<Value>) -> Vec<RawTransaction> {
    items.into_iter().map(RawTransaction::from_value).collect()
}

fn string_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    Ok(from_object(Value::deserialize(deserializer)?))
}

/// Only objects are read by field name; serde would otherwise fill a struct
/// positionally from an array.
fn from_object<T: serde::de::DeserializeOwned>(value: Value) -> Option<T> {
    match value {
        Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    }
}
