use super::model::SummarySlot;

/// One requestable quoteSummary module.
///
/// Variants are named after the upstream spelling; [`Module::query_name`]
/// returns the exact string placed in the `modules` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    AssetProfile,
    IncomeStatementHistory,
    IncomeStatementHistoryQuarterly,
    BalanceSheetHistory,
    BalanceSheetHistoryQuarterly,
    CashflowStatementHistory,
    CashflowStatementHistoryQuarterly,
    Earnings,
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
    IndexTrend,
    SectorTrend,
    CalendarEvents,
    SecFilings,
    UpgradeDowngradeHistory,
    NetSharePurchaseActivity,
}

/// One `(module subtree → result field)` extraction rule.
///
/// Most modules map to a single rule with an optional wrapper key. Split
/// modules (assetProfile, earnings, indexTrend, calendarEvents) carry several
/// rules, each targeting a different slot of the same payload.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Extraction {
    /// The result field this rule fills.
    pub slot: SummarySlot,
    /// Key path from the module object down to the data to normalize.
    pub path: &'static [&'static str],
    /// Sibling keys removed from the target object before normalizing,
    /// because another rule owns them.
    pub drop: &'static [&'static str],
    /// Keys whose value occasionally arrives as a list where a scalar is
    /// expected; the first element is taken (the `earningsDate` quirk).
    pub first_of_list: &'static [&'static str],
}

const fn rule(slot: SummarySlot, path: &'static [&'static str]) -> Extraction {
    Extraction {
        slot,
        path,
        drop: &[],
        first_of_list: &[],
    }
}

impl Module {
    /// Every module, in catalogue order.
    pub const ALL: [Self; 26] = [
        Self::AssetProfile,
        Self::IncomeStatementHistory,
        Self::IncomeStatementHistoryQuarterly,
        Self::BalanceSheetHistory,
        Self::BalanceSheetHistoryQuarterly,
        Self::CashflowStatementHistory,
        Self::CashflowStatementHistoryQuarterly,
        Self::Earnings,
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
        Self::IndexTrend,
        Self::SectorTrend,
        Self::CalendarEvents,
        Self::SecFilings,
        Self::UpgradeDowngradeHistory,
        Self::NetSharePurchaseActivity,
    ];

    /// The upstream name used in the `modules` query parameter and as the
    /// module's key in the response.
    #[must_use]
    pub const fn query_name(self) -> &'static str {
        match self {
            Self::AssetProfile => "assetProfile",
            Self::IncomeStatementHistory => "incomeStatementHistory",
            Self::IncomeStatementHistoryQuarterly => "incomeStatementHistoryQuarterly",
            Self::BalanceSheetHistory => "balanceSheetHistory",
            Self::BalanceSheetHistoryQuarterly => "balanceSheetHistoryQuarterly",
            Self::CashflowStatementHistory => "cashflowStatementHistory",
            Self::CashflowStatementHistoryQuarterly => "cashflowStatementHistoryQuarterly",
            Self::Earnings => "earnings",
            Self::EarningsHistory => "earningsHistory",
            Self::FinancialData => "financialData",
            Self::DefaultKeyStatistics => "defaultKeyStatistics",
            Self::InstitutionOwnership => "institutionOwnership",
            Self::InsiderHolders => "insiderHolders",
            Self::InsiderTransactions => "insiderTransactions",
            Self::FundOwnership => "fundOwnership",
            Self::MajorDirectHolders => "majorDirectHolders",
            Self::MajorHoldersBreakdown => "majorHoldersBreakdown",
            Self::RecommendationTrend => "recommendationTrend",
            Self::EarningsTrend => "earningsTrend",
            Self::IndustryTrend => "industryTrend",
            Self::IndexTrend => "indexTrend",
            Self::SectorTrend => "sectorTrend",
            Self::CalendarEvents => "calendarEvents",
            Self::SecFilings => "secFilings",
            Self::UpgradeDowngradeHistory => "upgradeDowngradeHistory",
            Self::NetSharePurchaseActivity => "netSharePurchaseActivity",
        }
    }

    /// The extraction rules applied to this module's response subtree.
    ///
    /// Each arm is an inline `const` block so the rule slices are promoted to
    /// `'static` despite being built through a `const fn`.
    pub(crate) const fn extractions(self) -> &'static [Extraction] {
        match self {
            Self::AssetProfile => const {
                &[
                    Extraction {
                        slot: SummarySlot::Profile,
                        path: &[],
                        drop: &["companyOfficers"],
                        first_of_list: &[],
                    },
                    rule(SummarySlot::CompanyOfficers, &["companyOfficers"]),
                ]
            },
            Self::IncomeStatementHistory => const {
                &[rule(
                    SummarySlot::IncomeStatementHistory,
                    &["incomeStatementHistory"],
                )]
            },
            Self::IncomeStatementHistoryQuarterly => const {
                &[rule(
                    SummarySlot::IncomeStatementHistoryQuarterly,
                    &["incomeStatementHistory"],
                )]
            },
            Self::BalanceSheetHistory => const {
                &[rule(
                    SummarySlot::BalanceSheetHistory,
                    &["balanceSheetStatements"],
                )]
            },
            Self::BalanceSheetHistoryQuarterly => const {
                &[rule(
                    SummarySlot::BalanceSheetHistoryQuarterly,
                    &["balanceSheetStatements"],
                )]
            },
            Self::CashflowStatementHistory => const {
                &[rule(
                    SummarySlot::CashFlowStatementHistory,
                    &["cashflowStatements"],
                )]
            },
            Self::CashflowStatementHistoryQuarterly => const {
                &[rule(
                    SummarySlot::CashFlowStatementHistoryQuarterly,
                    &["cashflowStatements"],
                )]
            },
            Self::Earnings => const {
                &[
                    Extraction {
                        slot: SummarySlot::EarningsEstimates,
                        path: &["earningsChart"],
                        drop: &["quarterly"],
                        first_of_list: &["earningsDate"],
                    },
                    rule(
                        SummarySlot::EarningsEstimatesQuarterly,
                        &["earningsChart", "quarterly"],
                    ),
                    rule(
                        SummarySlot::FinancialsYearly,
                        &["financialsChart", "yearly"],
                    ),
                    rule(
                        SummarySlot::FinancialsQuarterly,
                        &["financialsChart", "quarterly"],
                    ),
                ]
            },
            Self::EarningsHistory => const { &[rule(SummarySlot::EarningsHistory, &["history"])] },
            Self::FinancialData => const { &[rule(SummarySlot::FinancialData, &[])] },
            Self::DefaultKeyStatistics => const { &[rule(SummarySlot::DefaultKeyStatistics, &[])] },
            Self::InstitutionOwnership => const {
                &[rule(
                    SummarySlot::InstitutionOwnership,
                    &["ownershipList"],
                )]
            },
            Self::InsiderHolders => const { &[rule(SummarySlot::InsiderHolders, &["holders"])] },
            Self::InsiderTransactions => const {
                &[rule(
                    SummarySlot::InsiderTransactions,
                    &["transactions"],
                )]
            },
            Self::FundOwnership => const { &[rule(SummarySlot::FundOwnership, &["ownershipList"])] },
            Self::MajorDirectHolders => const {
                &[rule(SummarySlot::MajorDirectHolders, &["holders"])]
            },
            Self::MajorHoldersBreakdown => const {
                &[rule(SummarySlot::MajorHoldersBreakdown, &[])]
            },
            Self::RecommendationTrend => const {
                &[rule(SummarySlot::RecommendationTrend, &["trend"])]
            },
            Self::EarningsTrend => const { &[rule(SummarySlot::EarningsTrend, &["trend"])] },
            Self::IndustryTrend => const { &[rule(SummarySlot::IndustryTrend, &[])] },
            Self::IndexTrend => const {
                &[
                    Extraction {
                        slot: SummarySlot::IndexTrendInfo,
                        path: &[],
                        drop: &["estimates"],
                        first_of_list: &[],
                    },
                    rule(SummarySlot::IndexTrendEstimates, &["estimates"]),
                ]
            },
            Self::SectorTrend => const { &[rule(SummarySlot::SectorTrend, &[])] },
            Self::CalendarEvents => const {
                &[
                    Extraction {
                        slot: SummarySlot::CalendarEventsEarnings,
                        path: &["earnings"],
                        drop: &[],
                        first_of_list: &["earningsDate"],
                    },
                    Extraction {
                        slot: SummarySlot::CalendarEventsDividends,
                        path: &[],
                        drop: &["earnings"],
                        first_of_list: &[],
                    },
                ]
            },
            Self::SecFilings => const { &[rule(SummarySlot::SecFilings, &["filings"])] },
            Self::UpgradeDowngradeHistory => const {
                &[rule(
                    SummarySlot::UpgradeDowngradeHistory,
                    &["history"],
                )]
            },
            Self::NetSharePurchaseActivity => const {
                &[rule(SummarySlot::NetSharePurchaseActivity, &[])]
            },
        }
    }
}
