use serde::{Deserialize, Serialize};

/// A single cryptocurrency asset as reported by the CoinCap API.
///
/// All numeric fields are transported as decimal strings to avoid precision
/// loss; this layer performs no arithmetic on them. `id` is the sole key used
/// for detail lookups and cache correlation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub rank: String,
    pub symbol: String,
    pub name: String,
    pub supply: String,
    #[serde(rename = "maxSupply")]
    pub max_supply: Option<String>,
    #[serde(rename = "marketCapUsd")]
    pub market_cap_usd: String,
    #[serde(rename = "volumeUsd24Hr")]
    pub volume_usd_24hr: String,
    #[serde(rename = "priceUsd")]
    pub price_usd: String,
    #[serde(rename = "changePercent24Hr")]
    pub change_percent_24hr: String,
    #[serde(rename = "vwap24Hr")]
    pub vwap_24hr: Option<String>,
}

/// Envelope for `GET /assets`: the full listing plus the server's timestamp
/// (epoch milliseconds).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsResponse {
    pub data: Vec<Asset>,
    pub timestamp: i64,
}

/// Envelope for `GET /assets/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetDetailResponse {
    pub data: Asset,
    pub timestamp: i64,
}
