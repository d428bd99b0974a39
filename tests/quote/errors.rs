use httpmock::Method::GET;
use ysummary_rs::{QuoteBuilder, YsError};

use crate::common;

#[tokio::test]
async fn maintenance_page_becomes_service_unavailable() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/v8/finance/chart/AAPL");
        then.status(200)
            .header("content-type", "text/html")
            .body("<html><body>Will be right back</body></html>");
    });

    let client = common::test_client(&server);
    let report = QuoteBuilder::new(&client)
        .add_symbol("AAPL")
        .fetch_one()
        .await
        .unwrap();

    assert!(matches!(
        report.exception(),
        Some(YsError::ServiceUnavailable(_))
    ));
    assert!(report.quotes().is_err());
}

#[tokio::test]
async fn chart_error_node_becomes_api_exception() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/v8/finance/chart/NOPE");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#);
    });

    let client = common::test_client(&server);
    let report = QuoteBuilder::new(&client)
        .add_symbol("NOPE")
        .fetch_one()
        .await
        .unwrap();

    match report.exception() {
        Some(YsError::Api(desc)) => assert!(desc.contains("delisted")),
        other => panic!("expected Api exception, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_chart_result_becomes_api_exception() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/v8/finance/chart/EMPTY");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"chart":{"result":[],"error":null}}"#);
    });

    let client = common::test_client(&server);
    let report = QuoteBuilder::new(&client)
        .add_symbol("EMPTY")
        .fetch_one()
        .await
        .unwrap();

    assert!(matches!(report.exception(), Some(YsError::Api(_))));
}

#[tokio::test]
async fn one_bad_symbol_never_disturbs_its_siblings() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/v8/finance/chart/AAPL");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::chart_body());
    });
    server.mock(|when, then| {
        when.method(GET).path("/v8/finance/chart/ZZZBAD");
        then.status(404).body("Not Found");
    });

    let client = common::test_client(&server);
    let set = QuoteBuilder::new(&client)
        .symbols(["AAPL", "ZZZBAD"])
        .fetch()
        .await
        .unwrap();

    assert_eq!(set.len(), 2);
    assert!(set.get("AAPL").unwrap().exception().is_none());
    assert!(matches!(
        set.get("ZZZBAD").unwrap().exception(),
        Some(YsError::Status { status: 404, .. })
    ));
}

#[tokio::test]
async fn zero_symbols_is_rejected_before_any_request() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET);
        then.status(200);
    });

    let client = common::test_client(&server);
    let result = QuoteBuilder::new(&client).fetch().await;

    mock.assert_hits(0);
    assert!(matches!(result, Err(YsError::InvalidRequest(_))));
}
