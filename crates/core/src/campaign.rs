//! Read-only campaign snapshots as returned by the contract.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::amount::AmountDisplay;
use crate::deadline;

/// 256-bit value rendered as `0x`-prefixed hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bits256(pub String);

impl Bits256 {
    pub fn zero() -> Self {
        Self(format!("0x{}", "0".repeat(64)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `0x12345678…abcdef`: the first 10 and last 6 characters.
    pub fn short(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 16 {
            return self.0.clone();
        }
        let head: String = chars[..10].iter().collect();
        let tail: String = chars[chars.len() - 6..].iter().collect();
        format!("{head}…{tail}")
    }
}

pub type Address = Bits256;
pub type AssetId = Bits256;

/// Campaign owner: a wallet address or another contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Identity {
    Address { bits: Bits256 },
    ContractId { bits: Bits256 },
}

impl Identity {
    pub fn bits(&self) -> &Bits256 {
        match self {
            Identity::Address { bits } | Identity::ContractId { bits } => bits,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    #[serde(deserialize_with = "de_u64")]
    pub id: u64,
    pub owner: Identity,
    #[serde(deserialize_with = "de_u64")]
    pub target_goal: u64,
    #[serde(deserialize_with = "de_u64")]
    pub total_raised: u64,
    /// Milliseconds since the Unix epoch.
    #[serde(deserialize_with = "de_u64")]
    pub deadline: u64,
    #[serde(default)]
    pub asset_id: Option<AssetId>,
}

impl Campaign {
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

/// Lookups may come back absent or as a zeroed record depending on the
/// contract interface version; both mean "not found".
pub fn normalize_lookup(found: Option<Campaign>) -> Option<Campaign> {
    found.filter(|c| c.id != 0)
}

/// Row/card model shared by the list and detail views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignCard {
    pub id: u64,
    pub title: String,
    pub owner_short: String,
    pub goal: AmountDisplay,
    pub raised: AmountDisplay,
    pub deadline: String,
    pub details_path: String,
}

impl CampaignCard {
    pub fn new(c: &Campaign, offset: chrono::FixedOffset) -> Self {
        Self {
            id: c.id,
            title: format!("Campaign #{}", c.id),
            owner_short: c.owner.bits().short(),
            goal: AmountDisplay::new("Target Goal", c.target_goal),
            raised: AmountDisplay::new("Total Raised", c.total_raised),
            deadline: deadline::format_deadline(c.deadline, offset),
            details_path: crate::route::Route::CampaignDetails(c.id.to_string()).path(),
        }
    }
}

/// Accepts JSON numbers, decimal strings and `0x` hex strings (big-number
/// JSON form).
pub(crate) fn de_u64<'de, D>(d: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(d)?;
    u64_from_json(&v).map_err(de::Error::custom)
}

pub fn u64_from_json(v: &serde_json::Value) -> Result<u64, String> {
    match v {
        serde_json::Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| format!("expected unsigned 64-bit integer, got {n}")),
        serde_json::Value::String(s) => {
            let s = s.trim();
            if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                u64::from_str_radix(hex, 16).map_err(|e| format!("bad hex integer {s:?}: {e}"))
            } else {
                s.parse::<u64>()
                    .map_err(|e| format!("bad decimal integer {s:?}: {e}"))
            }
        }
        other => Err(format!("expected integer, got {other}")),
    }
}
