use serde_json::Value;

use tas_model::LabelValues;

/// Split a delimited string into trimmed, non-empty values.
pub(crate) fn split_delimited(raw: &str, delimiter: char, out: &mut LabelValues) {
    raw.split(delimiter)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .for_each(|v| {
            out.insert(v.to_string());
        });
}

/// Collect label values from a JSON task input.
///
/// Strings are trimmed (and split when a delimiter is given), arrays contribute every element,
/// `null` contributes nothing, any other value contributes its JSON text.
pub(crate) fn collect_json(value: &Value, delimiter: Option<char>, out: &mut LabelValues) {
    match value {
        Value::Null => {}
        Value::String(s) => match delimiter {
            Some(d) => split_delimited(s, d, out),
            None => {
                let s = s.trim();
                if !s.is_empty() {
                    out.insert(s.to_string());
                }
            }
        },
        Value::Array(items) => items
            .iter()
            .for_each(|item| collect_json(item, delimiter, out)),
        other => {
            out.insert(other.to_string());
        }
    }
}

/// Turn an accumulated set into the extractor result.
pub(crate) fn non_empty(values: LabelValues) -> Option<LabelValues> {
    if values.is_empty() { None } else { Some(values) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn split_drops_blank_entries() {
        let mut out = LabelValues::new();
        split_delimited(" java, ,rust,,java ", ',', &mut out);
        assert_eq!(out.into_iter().collect::<Vec<_>>(), vec!["java", "rust"]);
    }

    #[test]
    fn json_strings_are_kept_whole_without_delimiter() {
        let mut out = LabelValues::new();
        collect_json(&json!(" java,rust "), None, &mut out);
        assert_eq!(out.into_iter().collect::<Vec<_>>(), vec!["java,rust"]);
    }

    #[test]
    fn json_arrays_and_scalars() {
        let mut out = LabelValues::new();
        collect_json(&json!(["a", "", null, 3, true]), None, &mut out);
        assert_eq!(
            out.into_iter().collect::<Vec<_>>(),
            vec!["3", "a", "true"]
        );
    }

    #[test]
    fn non_empty_maps_empty_set_to_none() {
        assert!(non_empty(LabelValues::new()).is_none());
    }
}
