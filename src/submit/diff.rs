//! Change detection against baseline values

use crate::types::{FieldValue, FileValue, FormData};
use tracing::debug;

/// Compute the fields of `data` that differ from `baseline`
///
/// Without a baseline every field counts as changed. With one, a field is
/// dropped only when the baseline holds a truthy value for it that compares
/// equal under [`values_equal`].
pub fn diff_against_baseline(data: &FormData, baseline: Option<&FormData>) -> FormData {
    let Some(baseline) = baseline else {
        return data.clone();
    };

    let diff: FormData = data
        .iter()
        .filter(|(key, value)| {
            let changed = baseline
                .get(key.as_str())
                .is_none_or(|base| !base.is_truthy() || !values_equal(value, base));
            if !changed {
                debug!("Dropping unchanged {} field '{key}'", value.kind());
            }
            changed
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    debug!(
        "Diff kept {} of {} fields: {:?}",
        diff.len(),
        data.len(),
        diff.keys().collect::<Vec<_>>()
    );

    diff
}

/// Strict equality between two field values
///
/// Files compare by metadata. Scalars compare by value. Composite JSON values
/// (arrays, objects) are never equal to one another, and values of different
/// kinds are never equal.
pub fn values_equal(a: &FieldValue, b: &FieldValue) -> bool {
    match (a, b) {
        (FieldValue::Text(a), FieldValue::Text(b)) => a == b,
        (FieldValue::File(a), FieldValue::File(b)) => files_equal(a, b),
        (FieldValue::Json(a), FieldValue::Json(b)) => json_scalars_equal(a, b),
        _ => false,
    }
}

/// Whether two files look like the same file
///
/// Content bytes are not compared.
pub fn files_equal(a: &FileValue, b: &FileValue) -> bool {
    a.name == b.name
        && a.size == b.size
        && a.media_type == b.media_type
        && a.last_modified == b.last_modified
}

fn json_scalars_equal(a: &serde_json::Value, b: &serde_json::Value) -> bool {
    use serde_json::Value;

    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => {
            a == b || ((a.is_f64() || b.is_f64()) && a.as_f64() == b.as_f64())
        }
        (Value::String(a), Value::String(b)) => a == b,
        _ => false,
    }
}

/// Merge newly submitted values into the baseline
///
/// Covers baseline keys only: each takes the submitted value when present,
/// otherwise keeps its baseline value.
pub fn merge_into_baseline(baseline: &FormData, submitted: &FormData) -> FormData {
    baseline
        .iter()
        .map(|(key, base)| {
            let value = submitted.get(key).unwrap_or(base);
            (key.clone(), value.clone())
        })
        .collect()
}
