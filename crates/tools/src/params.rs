//! Parameter lookup with name synonyms.
//!
//! Models do not always use the declared parameter name (`place_name` may
//! arrive as `city`). Each tool lists the names it accepts, most preferred
//! first, and resolves them here.

use protocol::Parameters;
use serde_json::Value;

/// First non-blank value among `names`.
///
/// `null` and empty or whitespace-only strings count as absent.
pub fn lookup<'a>(params: &'a Parameters, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| params.get(*name))
        .find(|value| !is_blank(value))
}

/// Like [`lookup`], rendered as trimmed text.
///
/// Non-string values are rendered as JSON (`5` stays `5`).
pub fn lookup_text(params: &Parameters, names: &[&str]) -> Option<String> {
    lookup(params, names).map(|value| match value {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    })
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Parameters {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn prefers_earlier_names() {
        let p = params(json!({"city": "Mumbai", "place_name": "Pune"}));
        assert_eq!(lookup_text(&p, &["place_name", "city"]).as_deref(), Some("Pune"));
    }

    #[test]
    fn skips_blank_values() {
        let p = params(json!({"place_name": "  ", "place": null, "location": "Delhi"}));
        assert_eq!(
            lookup_text(&p, &["place_name", "place", "location", "city"]).as_deref(),
            Some("Delhi")
        );
    }

    #[test]
    fn renders_numbers_as_text() {
        let p = params(json!({"a": 5}));
        assert_eq!(lookup_text(&p, &["a"]).as_deref(), Some("5"));
        assert!(lookup(&p, &["b"]).is_none());
    }
}
