use serde::Deserialize;

#[derive(Deserialize)]
pub(crate) struct ChartEnvelope {
    pub(crate) chart: Option<ChartNode>,
}

#[derive(Deserialize)]
pub(crate) struct ChartNode {
    pub(crate) result: Option<Vec<serde_json::Value>>,
    pub(crate) error: Option<ApiErrorNode>,
}

#[derive(Deserialize)]
pub(crate) struct ApiErrorNode {
    pub(crate) description: Option<String>,
}
