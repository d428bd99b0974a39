use std::collections::HashMap;

use crate::core::{Table, YsError};

/// The fixed set of result fields a [`Summary`] can carry.
///
/// Split modules contribute more than one slot (e.g. `assetProfile` fills
/// both `Profile` and `CompanyOfficers`), which is why this set is larger
/// than the module catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummarySlot {
    Profile,
    CompanyOfficers,
    IncomeStatementHistory,
    IncomeStatementHistoryQuarterly,
    BalanceSheetHistory,
    BalanceSheetHistoryQuarterly,
    CashFlowStatementHistory,
    CashFlowStatementHistoryQuarterly,
    EarningsEstimates,
    EarningsEstimatesQuarterly,
    FinancialsYearly,
    FinancialsQuarterly,
    EarningsHistory,
    FinancialData,
    DefaultKeyStatistics,
    InstitutionOwnership,
    InsiderHolders,
    InsiderTransactions,
    FundOwnership,
    MajorDirectHolders,
    MajorHoldersBreakdown,
    RecommendationTrend,
    EarningsTrend,
    IndustryTrend,
    IndexTrendInfo,
    IndexTrendEstimates,
    SectorTrend,
    CalendarEventsEarnings,
    CalendarEventsDividends,
    SecFilings,
    UpgradeDowngradeHistory,
    NetSharePurchaseActivity,
}

impl SummarySlot {
    /// Every slot, in catalogue order.
    pub const ALL: [Self; 32] = [
        Self::Profile,
        Self::CompanyOfficers,
        Self::IncomeStatementHistory,
        Self::IncomeStatementHistoryQuarterly,
        Self::BalanceSheetHistory,
        Self::BalanceSheetHistoryQuarterly,
        Self::CashFlowStatementHistory,
        Self::CashFlowStatementHistoryQuarterly,
        Self::EarningsEstimates,
        Self::EarningsEstimatesQuarterly,
        Self::FinancialsYearly,
        Self::FinancialsQuarterly,
        Self::EarningsHistory,
        Self::FinancialData,
        Self::DefaultKeyStatistics,
        Self::InstitutionOwnership,
        Self::InsiderHolders,
        Self::InsiderTransactions,
        Self::FundOwnership,
        Self::MajorDirectHolders,
        Self::MajorHoldersBreakdown,
        Self::RecommendationTrend,
        Self::EarningsTrend,
        Self::IndustryTrend,
        Self::IndexTrendInfo,
        Self::IndexTrendEstimates,
        Self::SectorTrend,
        Self::CalendarEventsEarnings,
        Self::CalendarEventsDividends,
        Self::SecFilings,
        Self::UpgradeDowngradeHistory,
        Self::NetSharePurchaseActivity,
    ];

    /// Stable snake_case name, used in error and warning messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::CompanyOfficers => "company_officers",
            Self::IncomeStatementHistory => "income_statement_history",
            Self::IncomeStatementHistoryQuarterly => "income_statement_history_quarterly",
            Self::BalanceSheetHistory => "balance_sheet_history",
            Self::BalanceSheetHistoryQuarterly => "balance_sheet_history_quarterly",
            Self::CashFlowStatementHistory => "cash_flow_statement_history",
            Self::CashFlowStatementHistoryQuarterly => "cash_flow_statement_history_quarterly",
            Self::EarningsEstimates => "earnings_estimates",
            Self::EarningsEstimatesQuarterly => "earnings_estimates_quarterly",
            Self::FinancialsYearly => "financials_yearly",
            Self::FinancialsQuarterly => "financials_quarterly",
            Self::EarningsHistory => "earnings_history",
            Self::FinancialData => "financial_data",
            Self::DefaultKeyStatistics => "default_key_statistics",
            Self::InstitutionOwnership => "institution_ownership",
            Self::InsiderHolders => "insider_holders",
            Self::InsiderTransactions => "insider_transactions",
            Self::FundOwnership => "fund_ownership",
            Self::MajorDirectHolders => "major_direct_holders",
            Self::MajorHoldersBreakdown => "major_holders_breakdown",
            Self::RecommendationTrend => "recommendation_trend",
            Self::EarningsTrend => "earnings_trend",
            Self::IndustryTrend => "industry_trend",
            Self::IndexTrendInfo => "index_trend_info",
            Self::IndexTrendEstimates => "index_trend_estimates",
            Self::SectorTrend => "sector_trend",
            Self::CalendarEventsEarnings => "calendar_events_earnings",
            Self::CalendarEventsDividends => "calendar_events_dividends",
            Self::SecFilings => "sec_filings",
            Self::UpgradeDowngradeHistory => "upgrade_downgrade_history",
            Self::NetSharePurchaseActivity => "net_share_purchase_activity",
        }
    }
}

/// Tri-state of one result field.
#[derive(Debug, Default)]
pub enum FieldState {
    /// Never written: the report was not requested.
    #[default]
    Unset,
    /// Requested and successfully normalized.
    Value(Table),
    /// Requested, but fetching or normalizing it failed.
    Error(YsError),
}

static UNSET: FieldState = FieldState::Unset;

/// Per-symbol result container.
///
/// A summary is created empty when parsing of one symbol's response begins,
/// populated field by field, and handed to the caller as-is. Fields for
/// unrequested reports stay silently [`FieldState::Unset`]; fields for
/// requested-but-failed reports surface their stored error on every read.
#[derive(Debug)]
pub struct Summary {
    symbol: String,
    exception: Option<YsError>,
    fields: HashMap<SummarySlot, FieldState>,
}

impl Summary {
    /// Creates an empty summary for `symbol`, with every field unset.
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            exception: None,
            fields: HashMap::new(),
        }
    }

    pub(crate) fn with_exception(symbol: impl Into<String>, error: YsError) -> Self {
        Self {
            symbol: symbol.into(),
            exception: Some(error),
            fields: HashMap::new(),
        }
    }

    /// The symbol this summary belongs to.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The top-level transport/protocol failure, if the whole fetch failed.
    #[must_use]
    pub fn exception(&self) -> Option<&YsError> {
        self.exception.as_ref()
    }

    /// The raw state of one field, with no read-contract side effects.
    #[must_use]
    pub fn state(&self, slot: SummarySlot) -> &FieldState {
        self.fields.get(&slot).unwrap_or(&UNSET)
    }

    /// Read one field under the access contract.
    ///
    /// A container-level exception shadows every field and is returned as the
    /// error regardless of field state. Otherwise an unset field yields
    /// `Ok(None)` (plus a non-fatal warning when the `tracing` feature is on),
    /// a populated field yields its table, and a failed field propagates its
    /// stored error.
    ///
    /// # Errors
    ///
    /// Returns the container-level exception or the field's stored error.
    pub fn field(&self, slot: SummarySlot) -> Result<Option<&Table>, &YsError> {
        if let Some(e) = &self.exception {
            return Err(e);
        }
        match self.state(slot) {
            FieldState::Unset => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    symbol = %self.symbol,
                    field = slot.name(),
                    "field referenced but never requested"
                );
                Ok(None)
            }
            FieldState::Value(table) => Ok(Some(table)),
            FieldState::Error(e) => Err(e),
        }
    }

    /// Write one field from separate value/error parts.
    ///
    /// Exactly one of `value` and `error` must be supplied; anything else is
    /// a caller contract violation and fails this write only.
    ///
    /// # Errors
    ///
    /// Returns [`YsError::InvalidRequest`] when both or neither part is given.
    pub fn record_parts(
        &mut self,
        slot: SummarySlot,
        value: Option<Table>,
        error: Option<YsError>,
    ) -> Result<(), YsError> {
        let state = match (value, error) {
            (Some(table), None) => FieldState::Value(table),
            (None, Some(e)) => FieldState::Error(e),
            (Some(_), Some(_)) => {
                return Err(YsError::InvalidRequest(format!(
                    "cannot assign both a value and an error to {}",
                    slot.name()
                )));
            }
            (None, None) => {
                return Err(YsError::InvalidRequest(format!(
                    "must assign either a value or an error to {}",
                    slot.name()
                )));
            }
        };
        self.fields.insert(slot, state);
        Ok(())
    }

    /// Write one field from a parse outcome.
    pub(crate) fn record(&mut self, slot: SummarySlot, outcome: Result<Table, YsError>) {
        let state = match outcome {
            Ok(table) => FieldState::Value(table),
            Err(e) => FieldState::Error(e),
        };
        self.fields.insert(slot, state);
    }
}

/// The result of one multi-symbol summary fetch.
///
/// Holds one [`Summary`] per requested symbol, in request order. Duplicate
/// symbols were fetched independently and appear as independent entries;
/// [`SummarySet::get`] returns the first match.
#[derive(Debug)]
pub struct SummarySet {
    entries: Vec<Summary>,
}

impl SummarySet {
    pub(crate) fn new(entries: Vec<Summary>) -> Self {
        Self { entries }
    }

    /// The summary for a symbol, if it was requested.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&Summary> {
        self.entries.iter().find(|s| s.symbol() == symbol)
    }

    /// All summaries, in request order.
    pub fn iter(&self) -> impl Iterator<Item = &Summary> {
        self.entries.iter()
    }

    /// Number of summaries (one per requested symbol).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no symbols were requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for SummarySet {
    type Item = Summary;
    type IntoIter = std::vec::IntoIter<Summary>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a SummarySet {
    type Item = &'a Summary;
    type IntoIter = std::slice::Iter<'a, Summary>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
