use serde_json::json;
use ysummary_rs::core::normalize;
use ysummary_rs::{FieldState, Summary, SummarySlot, YsError};

fn sample_table() -> ysummary_rs::Table {
    normalize(&json!({"currentPrice": {"raw": 1.0, "fmt": "1.00"}})).unwrap()
}

#[test]
fn unset_fields_read_as_absent() {
    let summary = Summary::new("AAPL");
    assert!(matches!(summary.state(SummarySlot::Profile), FieldState::Unset));
    assert!(matches!(summary.field(SummarySlot::Profile), Ok(None)));
}

#[test]
fn a_recorded_value_reads_back() {
    let mut summary = Summary::new("AAPL");
    summary
        .record_parts(SummarySlot::FinancialData, Some(sample_table()), None)
        .unwrap();

    let table = summary.field(SummarySlot::FinancialData).unwrap().unwrap();
    assert_eq!(table.get(0, "current_price"), Some(&json!(1.0)));
}

#[test]
fn a_recorded_error_is_returned_on_every_read() {
    let mut summary = Summary::new("AAPL");
    summary
        .record_parts(
            SummarySlot::SecFilings,
            None,
            Some(YsError::ModuleNotFound("secFilings missing".into())),
        )
        .unwrap();

    assert!(matches!(
        summary.field(SummarySlot::SecFilings),
        Err(YsError::ModuleNotFound(_))
    ));
    // A second read behaves the same; the state is not consumed.
    assert!(summary.field(SummarySlot::SecFilings).is_err());

    // Other fields are unaffected.
    assert!(matches!(summary.field(SummarySlot::Profile), Ok(None)));
}

#[test]
fn recording_both_parts_is_rejected() {
    let mut summary = Summary::new("AAPL");
    let result = summary.record_parts(
        SummarySlot::FinancialData,
        Some(sample_table()),
        Some(YsError::Api("boom".into())),
    );
    assert!(matches!(result, Err(YsError::InvalidRequest(_))));

    // The failed write left the field untouched.
    assert!(matches!(summary.field(SummarySlot::FinancialData), Ok(None)));
}

#[test]
fn recording_neither_part_is_rejected() {
    let mut summary = Summary::new("AAPL");
    let result = summary.record_parts(SummarySlot::FinancialData, None, None);
    assert!(matches!(result, Err(YsError::InvalidRequest(_))));
}

#[test]
fn a_rerecorded_field_takes_the_new_state() {
    let mut summary = Summary::new("AAPL");
    summary
        .record_parts(
            SummarySlot::FinancialData,
            None,
            Some(YsError::Api("first try failed".into())),
        )
        .unwrap();
    summary
        .record_parts(SummarySlot::FinancialData, Some(sample_table()), None)
        .unwrap();

    assert!(summary.field(SummarySlot::FinancialData).unwrap().is_some());
}
