pub(super) const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/124.0.0.0 Safari/537.36";

pub(super) const DEFAULT_BASE_SUMMARY: &str =
    "https://query1.finance.yahoo.com/v10/finance/quoteSummary/";
pub(super) const DEFAULT_BASE_CHART: &str = "https://query1.finance.yahoo.com/v8/finance/chart/";

pub(super) const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Marker the upstream serves on its maintenance placeholder page, on every
/// endpoint.
pub(crate) const MAINTENANCE_MARKER: &str = "Will be right back";
