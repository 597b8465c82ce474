//! The navigation formatters exposed to templates: [`archive_links`] builds
//! head-link fragments and [`archive_selects`] builds dropdown-option
//! fragments, both from the archive count table. Both are pure functions;
//! the `*_func` adapters wrap them as gtmpl template functions.

use crate::page::month_name;
use gtmpl::Value;
use gtmpl_value::FuncError;
use std::collections::BTreeMap;

/// Formats one `<link rel="archives" ...>` fragment per archive group, most
/// recent group first. Keys are `"year/month"` strings; since both segments
/// are fixed-width, reverse lexicographic order is reverse chronological
/// order. An empty count table produces an empty list.
pub fn archive_links(counts: &BTreeMap<String, usize>) -> Vec<String> {
    counts
        .keys()
        .rev()
        .map(|key| {
            let (year, month) = split_key(key);
            format!(
                r#"<link rel="archives" title="{} {}" href="/archives/{}/" />"#,
                month_name(month),
                year,
                key,
            )
        })
        .collect()
}

/// Formats one `<option>` fragment per archive group for a select dropdown,
/// most recent group first, each showing the group's post count in
/// parentheses. An empty count table produces an empty list.
pub fn archive_selects(counts: &BTreeMap<String, usize>) -> Vec<String> {
    counts
        .iter()
        .rev()
        .map(|(key, count)| {
            let (year, month) = split_key(key);
            format!(
                r#"<option value="/archives/{}/"> {} {} &nbsp;({})</option>"#,
                key,
                month_name(month),
                year,
                count,
            )
        })
        .collect()
}

// Count-table keys are always `year/month`; anything else is a caller bug.
fn split_key(key: &str) -> (&str, &str) {
    let mut segments = key.splitn(2, '/');
    let year = segments.next().unwrap();
    let month = segments.next().unwrap();
    (year, month)
}

/// The gtmpl adapter for [`archive_links`]: takes the `site.archives` map as
/// its single argument and returns an array of fragment strings for the
/// template to concatenate.
pub fn archive_links_func(args: &[Value]) -> Result<Value, FuncError> {
    Ok(Value::Array(
        archive_links(&counts_from_value(args)?)
            .into_iter()
            .map(Value::String)
            .collect(),
    ))
}

/// The gtmpl adapter for [`archive_selects`]. See [`archive_links_func`].
pub fn archive_selects_func(args: &[Value]) -> Result<Value, FuncError> {
    Ok(Value::Array(
        archive_selects(&counts_from_value(args)?)
            .into_iter()
            .map(Value::String)
            .collect(),
    ))
}

// Converts the single template-function argument (the `site.archives`
// object) back into the count table.
fn counts_from_value(args: &[Value]) -> Result<BTreeMap<String, usize>, FuncError> {
    match args {
        [Value::Object(m)] => {
            let mut counts = BTreeMap::new();
            for (key, value) in m {
                match value {
                    Value::Number(n) => match n.as_u64() {
                        Some(count) => {
                            counts.insert(key.clone(), count as usize);
                        }
                        None => return Err(FuncError::UnableToConvertFromValue),
                    },
                    _ => return Err(FuncError::UnableToConvertFromValue),
                }
            }
            Ok(counts)
        }
        _ => Err(FuncError::UnableToConvertFromValue),
    }
}
