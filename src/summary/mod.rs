//! quoteSummary reader: request a set of report modules for one or more
//! symbols and get back flat tables in a per-symbol [`Summary`] container.

mod fetch;
mod model;
mod module;
mod parse;
mod wire;

pub use model::{FieldState, Summary, SummarySet, SummarySlot};
pub use module::Module;

use crate::core::{RetryConfig, YsClient, YsError, batch};

/// A builder for fetching summary reports for one or more symbols.
///
/// The requested reports are a plain list of [`Module`] values; requesting no
/// modules (or no symbols) is rejected with [`YsError::InvalidRequest`]
/// before any network activity.
#[derive(Debug)]
pub struct SummaryBuilder {
    client: YsClient,
    symbols: Vec<String>,
    modules: Vec<Module>,
    retry_override: Option<RetryConfig>,
    concurrency: Option<usize>,
}

impl SummaryBuilder {
    /// Creates a new `SummaryBuilder`.
    #[must_use]
    pub fn new(client: &YsClient) -> Self {
        Self {
            client: client.clone(),
            symbols: Vec::new(),
            modules: Vec::new(),
            retry_override: None,
            concurrency: None,
        }
    }

    /// Replaces the current list of symbols with a new list.
    ///
    /// Order is preserved and duplicates are kept; each occurrence is fetched
    /// independently.
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

    /// Adds symbols from a whitespace- or comma-delimited string.
    #[must_use]
    pub fn symbols_str(mut self, list: &str) -> Self {
        self.symbols.extend(
            list.split(|c: char| c.is_whitespace() || c == ',')
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
        self
    }

    /// Replaces the requested modules with a new list.
    #[must_use]
    pub fn modules<I>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = Module>,
    {
        self.modules = modules.into_iter().collect();
        self
    }

    /// Adds a single module to the request.
    #[must_use]
    pub fn add_module(mut self, module: Module) -> Self {
        self.modules.push(module);
        self
    }

    /// Requests every available module.
    #[must_use]
    pub fn all_modules(mut self) -> Self {
        self.modules = Module::ALL.to_vec();
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

    /// Fetches all requested symbols and returns one [`Summary`] per symbol,
    /// in request order.
    ///
    /// A failure fetching or parsing one symbol is captured as that symbol's
    /// container exception and never disturbs its siblings; this method only
    /// fails for caller contract violations detected before any network call.
    ///
    /// # Errors
    ///
    /// Returns [`YsError::InvalidRequest`] when no symbols or no modules were
    /// requested.
    pub async fn fetch(self) -> Result<SummarySet, YsError> {
        let Self {
            client,
            symbols,
            modules,
            retry_override,
            concurrency,
        } = self;

        if symbols.is_empty() {
            return Err(YsError::InvalidRequest("no symbols specified".into()));
        }
        if modules.is_empty() {
            return Err(YsError::InvalidRequest(
                "no summary modules requested".into(),
            ));
        }

        let limit = concurrency.unwrap_or_else(|| client.concurrency());
        let client = &client;
        let modules = modules.as_slice();
        let retry = retry_override.as_ref();

        let entries = batch::run_per_symbol(symbols, limit, |symbol| async move {
            match fetch::fetch_summary(client, &symbol, modules, retry).await {
                Ok(root) => parse::parse_summary(&symbol, modules, &root),
                Err(e) => Summary::with_exception(symbol, e),
            }
        })
        .await;

        Ok(SummarySet::new(entries))
    }

    /// Fetches a single symbol and returns its [`Summary`] directly.
    ///
    /// # Errors
    ///
    /// Returns [`YsError::InvalidRequest`] unless exactly one symbol and at
    /// least one module were requested.
    pub async fn fetch_one(self) -> Result<Summary, YsError> {
        if self.symbols.len() != 1 {
            return Err(YsError::InvalidRequest(format!(
                "expected exactly one symbol, got {}",
                self.symbols.len()
            )));
        }
        let set = self.fetch().await?;
        Ok(set.into_iter().next().expect("one summary per symbol"))
    }
}

/* ---------------- Convenience wrappers ---------------- */

/// Fetches the company profile (and officer list) for one symbol.
///
/// # Errors
///
/// See [`SummaryBuilder::fetch_one`].
pub async fn profile(client: &YsClient, symbol: &str) -> Result<Summary, YsError> {
    SummaryBuilder::new(client)
        .add_symbol(symbol)
        .add_module(Module::AssetProfile)
        .fetch_one()
        .await
}

/// Fetches the income statement history for one symbol.
///
/// # Errors
///
/// See [`SummaryBuilder::fetch_one`].
pub async fn income_statement(
    client: &YsClient,
    symbol: &str,
    quarterly: bool,
) -> Result<Summary, YsError> {
    let module = if quarterly {
        Module::IncomeStatementHistoryQuarterly
    } else {
        Module::IncomeStatementHistory
    };
    SummaryBuilder::new(client)
        .add_symbol(symbol)
        .add_module(module)
        .fetch_one()
        .await
}

/// Fetches the balance sheet history for one symbol.
///
/// # Errors
///
/// See [`SummaryBuilder::fetch_one`].
pub async fn balance_sheet(
    client: &YsClient,
    symbol: &str,
    quarterly: bool,
) -> Result<Summary, YsError> {
    let module = if quarterly {
        Module::BalanceSheetHistoryQuarterly
    } else {
        Module::BalanceSheetHistory
    };
    SummaryBuilder::new(client)
        .add_symbol(symbol)
        .add_module(module)
        .fetch_one()
        .await
}

/// Fetches the cash flow statement history for one symbol.
///
/// # Errors
///
/// See [`SummaryBuilder::fetch_one`].
pub async fn cash_flow(
    client: &YsClient,
    symbol: &str,
    quarterly: bool,
) -> Result<Summary, YsError> {
    let module = if quarterly {
        Module::CashflowStatementHistoryQuarterly
    } else {
        Module::CashflowStatementHistory
    };
    SummaryBuilder::new(client)
        .add_symbol(symbol)
        .add_module(module)
        .fetch_one()
        .await
}

/// Fetches earnings estimates and the yearly/quarterly financials charts.
///
/// # Errors
///
/// See [`SummaryBuilder::fetch_one`].
pub async fn earnings(client: &YsClient, symbol: &str) -> Result<Summary, YsError> {
    SummaryBuilder::new(client)
        .add_symbol(symbol)
        .add_module(Module::Earnings)
        .fetch_one()
        .await
}

/// Fetches the financialData module for one symbol.
///
/// # Errors
///
/// See [`SummaryBuilder::fetch_one`].
pub async fn financial_data(client: &YsClient, symbol: &str) -> Result<Summary, YsError> {
    SummaryBuilder::new(client)
        .add_symbol(symbol)
        .add_module(Module::FinancialData)
        .fetch_one()
        .await
}

/// Fetches the defaultKeyStatistics module for one symbol.
///
/// # Errors
///
/// See [`SummaryBuilder::fetch_one`].
pub async fn key_statistics(client: &YsClient, symbol: &str) -> Result<Summary, YsError> {
    SummaryBuilder::new(client)
        .add_symbol(symbol)
        .add_module(Module::DefaultKeyStatistics)
        .fetch_one()
        .await
}
