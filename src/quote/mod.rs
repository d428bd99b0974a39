//! Historical price reader backed by the v8 chart endpoint.
//!
//! Returns OHLCV rows as a [`Table`] per symbol, plus optional dividend and
//! split event tables.

mod wire;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde_json::{Map, Value, json};

use crate::core::client::MAINTENANCE_MARKER;
use crate::core::{RetryConfig, Table, YsClient, YsError, batch, table};
use wire::ChartEnvelope;

/// Bar width for chart requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interval {
    M1,
    M5,
    M15,
    H1,
    #[default]
    D1,
    W1,
    Mo1,
}

impl Interval {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::M1 => "1m",
            Self::M5 => "5m",
            Self::M15 => "15m",
            Self::H1 => "1h",
            Self::D1 => "1d",
            Self::W1 => "1wk",
            Self::Mo1 => "1mo",
        }
    }
}

/// Per-symbol result container for one chart request.
///
/// Mirrors the summary container contract: a fetch failure is captured here
/// as `exception` instead of failing the whole batch.
#[derive(Debug, Default)]
pub struct QuoteReport {
    symbol: String,
    exception: Option<YsError>,
    quotes: Option<Table>,
    dividends: Option<Table>,
    splits: Option<Table>,
}

impl QuoteReport {
    fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    pub(crate) fn with_exception(symbol: impl Into<String>, e: YsError) -> Self {
        Self {
            symbol: symbol.into(),
            exception: Some(e),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The failure that prevented this symbol from being read, if any.
    #[must_use]
    pub const fn exception(&self) -> Option<&YsError> {
        self.exception.as_ref()
    }

    /// The OHLCV table.
    ///
    /// # Errors
    ///
    /// Returns the container exception when the fetch for this symbol failed.
    pub fn quotes(&self) -> Result<Option<&Table>, &YsError> {
        match &self.exception {
            Some(e) => Err(e),
            None => Ok(self.quotes.as_ref()),
        }
    }

    /// Dividend events, when requested and present.
    ///
    /// # Errors
    ///
    /// Returns the container exception when the fetch for this symbol failed.
    pub fn dividends(&self) -> Result<Option<&Table>, &YsError> {
        match &self.exception {
            Some(e) => Err(e),
            None => Ok(self.dividends.as_ref()),
        }
    }

    /// Split events, when requested and present.
    ///
    /// # Errors
    ///
    /// Returns the container exception when the fetch for this symbol failed.
    pub fn splits(&self) -> Result<Option<&Table>, &YsError> {
        match &self.exception {
            Some(e) => Err(e),
            None => Ok(self.splits.as_ref()),
        }
    }
}

/// The reports for one batch request, in request order.
#[derive(Debug, Default)]
pub struct QuoteSet {
    entries: Vec<QuoteReport>,
}

impl QuoteSet {
    pub(crate) fn new(entries: Vec<QuoteReport>) -> Self {
        Self { entries }
    }

    /// Returns the first report for `symbol`, if any.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&QuoteReport> {
        self.entries.iter().find(|r| r.symbol == symbol)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuoteReport> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for QuoteSet {
    type Item = QuoteReport;
    type IntoIter = std::vec::IntoIter<QuoteReport>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a QuoteSet {
    type Item = &'a QuoteReport;
    type IntoIter = std::slice::Iter<'a, QuoteReport>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A builder for fetching historical quotes for one or more symbols.
#[derive(Debug)]
pub struct QuoteBuilder {
    client: YsClient,
    symbols: Vec<String>,
    start: Option<i64>,
    end: Option<i64>,
    interval: Interval,
    events: bool,
    prepost: bool,
    retry_override: Option<RetryConfig>,
    concurrency: Option<usize>,
}

impl QuoteBuilder {
    /// Creates a new `QuoteBuilder`.
    #[must_use]
    pub fn new(client: &YsClient) -> Self {
        Self {
            client: client.clone(),
            symbols: Vec::new(),
            start: None,
            end: None,
            interval: Interval::default(),
            events: false,
            prepost: true,
            retry_override: None,
            concurrency: None,
        }
    }

    /// Replaces the current list of symbols with a new list.
    #[must_use]
    pub fn symbols<I, S>(mut self, syms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols = syms.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a single symbol.
    #[must_use]
    pub fn add_symbol(mut self, sym: impl Into<String>) -> Self {
        self.symbols.push(sym.into());
        self
    }

    /// Restricts the request to a UTC time range.
    ///
    /// Without this, the request covers the epoch through now.
    #[must_use]
    pub const fn between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start = Some(start.timestamp());
        self.end = Some(end.timestamp());
        self
    }

    /// Sets the bar width.
    #[must_use]
    pub const fn interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    /// Also fetch dividend and split events.
    #[must_use]
    pub const fn events(mut self, enabled: bool) -> Self {
        self.events = enabled;
        self
    }

    /// Include pre- and post-market bars (on by default).
    #[must_use]
    pub const fn prepost(mut self, enabled: bool) -> Self {
        self.prepost = enabled;
        self
    }

    /// Overrides the client's retry policy for this request.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Overrides the client's worker limit for this request.
    #[must_use]
    pub const fn concurrency(mut self, workers: usize) -> Self {
        self.concurrency = Some(workers);
        self
    }

    /// Fetches all requested symbols and returns one [`QuoteReport`] per
    /// symbol, in request order.
    ///
    /// # Errors
    ///
    /// Returns [`YsError::InvalidRequest`] when no symbols were requested.
    /// Per-symbol failures are captured in each report's exception instead.
    pub async fn fetch(self) -> Result<QuoteSet, YsError> {
        let Self {
            client,
            symbols,
            start,
            end,
            interval,
            events,
            prepost,
            retry_override,
            concurrency,
        } = self;

        if symbols.is_empty() {
            return Err(YsError::InvalidRequest("no symbols specified".into()));
        }

        let period1 = start.unwrap_or(0);
        let period2 = end.unwrap_or_else(|| Utc::now().timestamp());
        let limit = concurrency.unwrap_or_else(|| client.concurrency());
        let client = &client;
        let retry = retry_override.as_ref();

        let entries = batch::run_per_symbol(symbols, limit, |symbol| async move {
            match fetch_chart(
                client, &symbol, period1, period2, interval, events, prepost, retry,
            )
            .await
            {
                Ok(root) => assemble_report(&symbol, &root, events),
                Err(e) => QuoteReport::with_exception(symbol, e),
            }
        })
        .await;

        Ok(QuoteSet::new(entries))
    }

    /// Fetches a single symbol and returns its [`QuoteReport`] directly.
    ///
    /// # Errors
    ///
    /// Returns [`YsError::InvalidRequest`] unless exactly one symbol was
    /// requested.
    pub async fn fetch_one(self) -> Result<QuoteReport, YsError> {
        if self.symbols.len() != 1 {
            return Err(YsError::InvalidRequest(format!(
                "expected exactly one symbol, got {}",
                self.symbols.len()
            )));
        }
        let set = self.fetch().await?;
        Ok(set.into_iter().next().expect("one report per symbol"))
    }
}

#[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip(client, retry_override), err)
)]
#[allow(clippy::too_many_arguments)]
async fn fetch_chart(
    client: &YsClient,
    symbol: &str,
    period1: i64,
    period2: i64,
    interval: Interval,
    events: bool,
    prepost: bool,
    retry_override: Option<&RetryConfig>,
) -> Result<Value, YsError> {
    let mut url = client.base_chart().join(symbol)?;
    url.query_pairs_mut()
        .append_pair("period1", &period1.to_string())
        .append_pair("period2", &period2.to_string())
        .append_pair("interval", interval.as_str())
        .append_pair("includePrePost", if prepost { "true" } else { "false" })
        .append_pair("events", if events { "div,splits" } else { "" });

    let req = client.http().get(url);
    let resp = client.send_with_retry(req, retry_override).await?;
    let body = resp.text().await?;
    classify_chart_body(&body)
}

fn classify_chart_body(body: &str) -> Result<Value, YsError> {
    if body.contains(MAINTENANCE_MARKER) {
        return Err(YsError::ServiceUnavailable(
            "Yahoo Finance is currently down".into(),
        ));
    }

    let env: ChartEnvelope = serde_json::from_str(body)
        .map_err(|e| YsError::ModuleFormat(format!("chart json parse: {e}")))?;

    let Some(node) = env.chart else {
        return Err(YsError::Api("missing chart wrapper".into()));
    };

    if let Some(error) = node.error {
        let desc = error
            .description
            .unwrap_or_else(|| "unspecified error".into());
        return Err(YsError::Api(desc));
    }

    node.result
        .and_then(|mut v| if v.is_empty() { None } else { Some(v.remove(0)) })
        .ok_or_else(|| YsError::Api("empty chart result".into()))
}

fn assemble_report(symbol: &str, root: &Value, events: bool) -> QuoteReport {
    let mut report = QuoteReport::new(symbol);

    match quote_table(root) {
        Ok(table) => report.quotes = Some(table),
        Err(e) => return QuoteReport::with_exception(symbol, e),
    }

    if events {
        report.dividends = event_table(root, "dividends");
        report.splits = event_table(root, "splits");
    }

    report
}

/// Align the columnar chart arrays into one row object per timestamp.
///
/// Bars the upstream left as null (halts, partial sessions) come through as
/// null cells rather than being dropped.
fn quote_table(root: &Value) -> Result<Table, YsError> {
    let timestamps = root
        .get("timestamp")
        .and_then(Value::as_array)
        .ok_or_else(|| YsError::ModuleFormat("chart payload has no timestamp array".into()))?;

    let quote = root
        .pointer("/indicators/quote/0")
        .and_then(Value::as_object)
        .ok_or_else(|| YsError::ModuleFormat("chart payload has no quote indicators".into()))?;

    let adjclose = root
        .pointer("/indicators/adjclose/0/adjclose")
        .and_then(Value::as_array);

    let series = |name: &str| quote.get(name).and_then(Value::as_array);
    let opens = series("open");
    let highs = series("high");
    let lows = series("low");
    let closes = series("close");
    let volumes = series("volume");

    let cell = |arr: Option<&Vec<Value>>, i: usize| {
        arr.and_then(|a| a.get(i)).cloned().unwrap_or(Value::Null)
    };

    let mut rows = Vec::with_capacity(timestamps.len());
    for (i, ts) in timestamps.iter().enumerate() {
        let date = ts
            .as_i64()
            .and_then(rfc3339_date)
            .map_or(Value::Null, Value::String);

        let mut row = Map::new();
        row.insert("date".into(), date);
        row.insert("open".into(), cell(opens, i));
        row.insert("high".into(), cell(highs, i));
        row.insert("low".into(), cell(lows, i));
        row.insert("close".into(), cell(closes, i));
        row.insert("adjclose".into(), cell(adjclose, i));
        row.insert("volume".into(), cell(volumes, i));
        rows.push(Value::Object(row));
    }

    table::normalize(&Value::Array(rows))
}

/// Build a table from the `events` map for `kind` ("dividends" or "splits"),
/// ordered by event timestamp.
fn event_table(root: &Value, kind: &str) -> Option<Table> {
    let map = root
        .pointer(&format!("/events/{kind}"))
        .and_then(Value::as_object)?;

    let mut keyed: Vec<(i64, &Value)> = map
        .iter()
        .filter_map(|(k, v)| k.parse::<i64>().ok().map(|ts| (ts, v)))
        .collect();
    keyed.sort_unstable_by_key(|(ts, _)| *ts);

    let rows: Vec<Value> = keyed
        .into_iter()
        .map(|(ts, entry)| {
            let mut row = entry.as_object().cloned().unwrap_or_default();
            let date = rfc3339_date(ts).map_or(Value::Null, Value::String);
            row.insert("eventTime".into(), date);
            // The per-entry "date" echoes the key; the rendered time replaces it.
            row.remove("date");
            Value::Object(row)
        })
        .collect();

    if rows.is_empty() {
        return None;
    }
    table::normalize(&json!(rows)).ok()
}

fn rfc3339_date(ts: i64) -> Option<String> {
    Utc.timestamp_opt(ts, 0)
        .single()
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
}
