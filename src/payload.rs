//! The site payload overlay: extends the template rendering context with the
//! archive count table as `site.archives`. The overlay copies rather than
//! mutates, so several payload-extension steps can be layered and each sees
//! the previous one's additions.

use gtmpl::Value;
use std::collections::BTreeMap;

/// Returns a copy of `payload` with `site.archives` set to the count table.
/// All pre-existing fields of the payload and of its `site` object are
/// preserved; if the payload has no `site` object, one is created. The input
/// payload is never mutated.
pub fn augment(payload: &Value, counts: &BTreeMap<String, usize>) -> Value {
    use std::collections::HashMap;

    let archives: HashMap<String, Value> = counts
        .iter()
        .map(|(key, count)| (key.clone(), Value::from(*count as u64)))
        .collect();

    let mut root: HashMap<String, Value> = match payload {
        Value::Object(m) => m.clone(),
        _ => HashMap::new(),
    };
    let mut site: HashMap<String, Value> = match root.get("site") {
        Some(Value::Object(m)) => m.clone(),
        _ => HashMap::new(),
    };
    site.insert("archives".to_owned(), Value::Object(archives));
    root.insert("site".to_owned(), Value::Object(site));
    Value::Object(root)
}
