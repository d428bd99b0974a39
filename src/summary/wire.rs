use serde::Deserialize;

/* ---------------- Serde mapping (only the envelope; module payloads stay
dynamic because their schema is open-ended) ---------------- */

#[derive(Deserialize)]
pub(crate) struct QuoteSummaryEnvelope {
    #[serde(rename = "quoteSummary")]
    pub(crate) quote_summary: Option<QuoteSummaryNode>,
}

#[derive(Deserialize)]
pub(crate) struct QuoteSummaryNode {
    pub(crate) result: Option<Vec<serde_json::Value>>,
    pub(crate) error: Option<ApiErrorNode>,
}

#[derive(Deserialize)]
pub(crate) struct ApiErrorNode {
    pub(crate) description: Option<String>,
}
