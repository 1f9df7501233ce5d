//! Diff command - show which fields would be submitted

use crate::cli::FieldArgs;
use crate::cli::style::{Stylize, changed, unchanged};
use anstream::println;
use diffpost::error::Result;
use diffpost::submit::diff_against_baseline;
use diffpost::types::{FieldValue, FormData};

/// Human-readable rendering of a field value
pub fn describe(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(text) => format!("{text:?}"),
        FieldValue::Json(json) => json.to_string(),
        FieldValue::File(file) => format!(
            "{} ({} bytes, {})",
            file.name, file.size, file.media_type
        ),
    }
}

/// Print every field, marking the ones kept by the diff
pub fn print_field_diff(data: &FormData, diff: &FormData) {
    for (name, value) in data {
        if diff.contains_key(name) {
            println!("  {} {} = {}", changed(), name.accent(), describe(value));
        } else {
            println!(
                "  {} {}",
                unchanged(),
                format!("{name} = {}", describe(value)).muted()
            );
        }
    }

    println!();
    println!(
        "{} of {} field{} changed",
        diff.len().accent(),
        data.len(),
        if data.len() == 1 { "" } else { "s" }
    );
}

/// Run the diff command
pub async fn run_diff(fields: &FieldArgs) -> Result<()> {
    let data = fields.form_data().await?;
    let baseline = fields.baseline()?;

    if data.is_empty() {
        println!("{}", "No fields given".muted());
        return Ok(());
    }

    let diff = diff_against_baseline(&data, baseline.as_ref());
    print_field_diff(&data, &diff);
    Ok(())
}
