use std::time::Duration;

use httpmock::Method::GET;
use url::Url;
use ysummary_rs::{Module, RetryConfig, SummaryBuilder, SummarySlot, YsClient, YsError};

use crate::common;

#[tokio::test]
async fn maintenance_page_becomes_service_unavailable() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/v10/finance/quoteSummary/AAPL");
        then.status(200)
            .header("content-type", "text/html")
            .body("<html><body>Will be right back</body></html>");
    });

    let client = common::test_client(&server);
    let summary = SummaryBuilder::new(&client)
        .add_symbol("AAPL")
        .add_module(Module::FinancialData)
        .fetch_one()
        .await
        .unwrap();

    assert!(matches!(
        summary.exception(),
        Some(YsError::ServiceUnavailable(_))
    ));
}

#[tokio::test]
async fn api_error_envelope_becomes_container_exception() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/v10/finance/quoteSummary/ZZZXYZ");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::summary_error_envelope(
                "Quote not found for ticker symbol: ZZZXYZ",
            ));
    });

    let client = common::test_client(&server);
    let summary = SummaryBuilder::new(&client)
        .add_symbol("ZZZXYZ")
        .add_module(Module::FinancialData)
        .fetch_one()
        .await
        .unwrap();

    match summary.exception() {
        Some(YsError::Api(desc)) => assert!(desc.contains("ZZZXYZ")),
        other => panic!("expected Api exception, got {other:?}"),
    }
}

#[tokio::test]
async fn http_error_status_becomes_container_exception() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/v10/finance/quoteSummary/AAPL");
        then.status(404).body("Not Found");
    });

    let client = common::test_client(&server);
    let summary = SummaryBuilder::new(&client)
        .add_symbol("AAPL")
        .add_module(Module::FinancialData)
        .fetch_one()
        .await
        .unwrap();

    assert!(matches!(
        summary.exception(),
        Some(YsError::Status { status: 404, .. })
    ));
}

#[tokio::test]
async fn container_exception_shadows_every_field_read() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/v10/finance/quoteSummary/AAPL");
        then.status(500).body("boom");
    });

    let client = common::test_client(&server);
    let summary = SummaryBuilder::new(&client)
        .add_symbol("AAPL")
        .add_module(Module::FinancialData)
        .fetch_one()
        .await
        .unwrap();

    // Even reads of never-requested fields surface the container failure.
    assert!(summary.field(SummarySlot::FinancialData).is_err());
    assert!(summary.field(SummarySlot::SecFilings).is_err());
}

#[tokio::test]
async fn timeout_surfaces_as_timeout_error() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/v10/finance/quoteSummary/SLOW");
        then.status(200)
            .delay(Duration::from_millis(500))
            .header("content-type", "application/json")
            .body(common::summary_envelope(r#"{"financialData": {}}"#));
    });

    let client = YsClient::builder()
        .base_summary(
            Url::parse(&format!("{}/v10/finance/quoteSummary/", server.base_url())).unwrap(),
        )
        .timeout(Duration::from_millis(50))
        .retry_policy(RetryConfig::none())
        .build()
        .unwrap();

    let summary = SummaryBuilder::new(&client)
        .add_symbol("SLOW")
        .add_module(Module::FinancialData)
        .fetch_one()
        .await
        .unwrap();

    let exc = summary.exception().expect("timeout should be captured");
    assert!(exc.is_timeout(), "expected a timeout, got {exc:?}");
}

#[tokio::test]
async fn zero_symbols_is_rejected_before_any_request() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET);
        then.status(200);
    });

    let client = common::test_client(&server);
    let result = SummaryBuilder::new(&client)
        .add_module(Module::FinancialData)
        .fetch()
        .await;

    mock.assert_hits(0);
    assert!(matches!(result, Err(YsError::InvalidRequest(_))));
}

#[tokio::test]
async fn zero_modules_is_rejected_before_any_request() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET);
        then.status(200);
    });

    let client = common::test_client(&server);
    let result = SummaryBuilder::new(&client)
        .add_symbol("AAPL")
        .fetch()
        .await;

    mock.assert_hits(0);
    assert!(matches!(result, Err(YsError::InvalidRequest(_))));
}

#[tokio::test]
async fn fetch_one_requires_exactly_one_symbol() {
    let server = common::setup_server();
    let client = common::test_client(&server);

    let result = SummaryBuilder::new(&client)
        .symbols(["AAPL", "MSFT"])
        .add_module(Module::FinancialData)
        .fetch_one()
        .await;

    assert!(matches!(result, Err(YsError::InvalidRequest(_))));
}
