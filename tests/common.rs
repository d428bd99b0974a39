#![allow(dead_code)]

use httpmock::MockServer;
use url::Url;
use ysummary_rs::{RetryConfig, YsClient};

pub fn setup_server() -> MockServer {
    MockServer::start()
}

/// A client pointed at the mock server, with retries off so every test
/// observes exactly the hits it provokes.
pub fn test_client(server: &MockServer) -> YsClient {
    YsClient::builder()
        .base_summary(
            Url::parse(&format!("{}/v10/finance/quoteSummary/", server.base_url())).unwrap(),
        )
        .base_chart(Url::parse(&format!("{}/v8/finance/chart/", server.base_url())).unwrap())
        .retry_policy(RetryConfig::none())
        .build()
        .unwrap()
}

/// Wraps a modules object in the quoteSummary envelope.
pub fn summary_envelope(modules_json: &str) -> String {
    format!(r#"{{"quoteSummary":{{"result":[{modules_json}],"error":null}}}}"#)
}

pub fn summary_error_envelope(description: &str) -> String {
    format!(
        r#"{{"quoteSummary":{{"result":null,"error":{{"code":"Not Found","description":"{description}"}}}}}}"#
    )
}

/// assetProfile + financialData payload shaped like a live response,
/// including the fmt/longFmt renderings the normalizer must drop.
pub fn profile_and_financials_body() -> String {
    summary_envelope(
        r#"{
            "assetProfile": {
                "address1": "One Apple Park Way",
                "city": "Cupertino",
                "fullTimeEmployees": 161000,
                "companyOfficers": [
                    {
                        "name": "Mr. Timothy D. Cook",
                        "age": 62,
                        "totalPay": {"raw": 16239562, "fmt": "16.24M", "longFmt": "16,239,562"}
                    },
                    {"name": "Mr. Luca Maestri"}
                ]
            },
            "financialData": {
                "currentPrice": {"raw": 189.84, "fmt": "189.84"},
                "recommendationKey": "buy",
                "numberOfAnalystOpinions": {"raw": 39, "fmt": "39", "longFmt": "39"}
            }
        }"#,
    )
}

/// earnings payload exercising the split extraction rules and the
/// earningsDate list quirk.
pub fn earnings_body() -> String {
    summary_envelope(
        r#"{
            "earnings": {
                "earningsChart": {
                    "quarterly": [
                        {"date": "4Q2023", "actual": {"raw": 2.18, "fmt": "2.18"}, "estimate": {"raw": 2.1, "fmt": "2.10"}}
                    ],
                    "currentQuarterEstimate": {"raw": 1.5, "fmt": "1.50"},
                    "earningsDate": [{"raw": 1706216400, "fmt": "Jan 25, 2024"}]
                },
                "financialsChart": {
                    "yearly": [
                        {"date": 2023, "revenue": {"raw": 383285000000, "fmt": "383.29B"}, "earnings": {"raw": 96995000000, "fmt": "97B"}}
                    ],
                    "quarterly": [
                        {"date": "4Q2023", "revenue": {"raw": 119575000000}, "earnings": {"raw": 33916000000}}
                    ]
                }
            }
        }"#,
    )
}

/// Three daily bars with the middle bar halted (all-null) and a dividend and
/// split event.
pub fn chart_body() -> String {
    r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "AAPL"},
                "timestamp": [1704326400, 1704412800, 1704499200],
                "events": {
                    "dividends": {
                        "1704412800": {"amount": 0.24, "date": 1704412800}
                    },
                    "splits": {
                        "1704326400": {"date": 1704326400, "numerator": 4, "denominator": 1, "splitRatio": "4:1"}
                    }
                },
                "indicators": {
                    "quote": [{
                        "open":   [184.35, null, 182.15],
                        "high":   [186.4,  null, 183.0],
                        "low":    [183.92, null, 180.88],
                        "close":  [185.64, null, 181.18],
                        "volume": [82488700, null, 62303300]
                    }],
                    "adjclose": [{"adjclose": [185.21, null, 180.76]}]
                }
            }],
            "error": null
        }
    }"#
    .to_string()
}
