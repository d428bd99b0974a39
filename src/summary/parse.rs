use serde_json::Value;

use super::model::Summary;
use super::module::{Extraction, Module};
use crate::core::{Table, YsError, table};

/// Interpret one symbol's root modules object against the requested module
/// list, recording a value or an error per result field.
///
/// Failures are confined to the field they occurred in; one malformed module
/// never disturbs the others.
pub(crate) fn parse_summary(symbol: &str, modules: &[Module], root: &Value) -> Summary {
    let mut summary = Summary::new(symbol);

    for module in modules {
        match root.get(module.query_name()) {
            Some(subtree) => {
                for extraction in module.extractions() {
                    summary.record(extraction.slot, extract(subtree, extraction));
                }
            }
            None => {
                for extraction in module.extractions() {
                    summary.record(
                        extraction.slot,
                        Err(YsError::ModuleNotFound(format!(
                            "{} missing from response",
                            module.query_name()
                        ))),
                    );
                }
            }
        }
    }

    summary
}

fn extract(subtree: &Value, extraction: &Extraction) -> Result<Table, YsError> {
    let mut node = subtree;
    for key in extraction.path {
        node = node.get(key).ok_or_else(|| {
            YsError::ModuleNotFound(format!("submodule {key} missing from module payload"))
        })?;
    }

    if extraction.drop.is_empty() && extraction.first_of_list.is_empty() {
        return table::normalize(node);
    }

    let mut target = node.clone();
    if let Value::Object(map) = &mut target {
        for key in extraction.drop {
            map.remove(*key);
        }
        for key in extraction.first_of_list {
            if let Some(Value::Array(items)) = map.get(*key) {
                let first = items.first().cloned().unwrap_or(Value::Null);
                map.insert((*key).to_string(), first);
            }
        }
    }
    table::normalize(&target)
}
