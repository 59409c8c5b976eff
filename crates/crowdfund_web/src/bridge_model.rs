//! Decoding of values returned by the JS bridge.
//!
//! The bridge hands back whatever the generated proxy produced, already passed
//! through `JSON.stringify`. Integers may arrive as numbers, decimal strings or
//! `0x` hex (BN serialisation), and optional values as `null`.

use crowdfund::campaign::{u64_from_json, Address, Bits256, Campaign};
use crowdfund::contract::CallReceipt;
use crowdfund::error::ClientError;
use serde::Deserialize;
use serde_json::Value;

/// Shape of a value-carrying call result from the bridge.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReceipt {
    transaction_id: String,
    value: Value,
}

pub fn decode_u64(value: &Value) -> Result<u64, ClientError> {
    u64_from_json(value).map_err(ClientError::Decode)
}

pub fn decode_receipt(value: Value) -> Result<CallReceipt<u64>, ClientError> {
    let raw: RawReceipt = serde_json::from_value(value)?;
    Ok(CallReceipt {
        value: decode_u64(&raw.value)?,
        transaction_id: raw.transaction_id,
    })
}

pub fn decode_campaigns(value: Value) -> Result<Vec<Campaign>, ClientError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .map(|v| Campaign::from_json(v).map_err(ClientError::from))
            .collect(),
        other => Err(ClientError::Decode(format!(
            "expected a list of campaigns, got {other}"
        ))),
    }
}

pub fn decode_lookup(value: Value) -> Result<Option<Campaign>, ClientError> {
    match value {
        Value::Null => Ok(None),
        v => Ok(Some(Campaign::from_json(v)?)),
    }
}

/// Accepts a bare hex string, `{ "bits": .. }`, or `null`.
pub fn decode_optional_address(value: Value) -> Result<Option<Address>, ClientError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(Bits256(s))),
        Value::Object(mut map) => match map.remove("bits") {
            Some(Value::String(s)) => Ok(Some(Bits256(s))),
            _ => Err(ClientError::Decode("address object without bits".into())),
        },
        other => Err(ClientError::Decode(format!("unexpected address {other}"))),
    }
}
