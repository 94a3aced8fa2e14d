use serde_json::Value;

use crate::error::SearchError;

/// Extract and validate the `query` field of an inbound frame / 提取查询关键词
///
/// A missing `query` is treated as an empty string. The returned query is trimmed.
pub fn extract_query(text: &str, min_length: usize) -> Result<String, SearchError> {
    let payload: Value = serde_json::from_str(text).map_err(|_| SearchError::MalformedPayload)?;
    let object = payload.as_object().ok_or(SearchError::MalformedPayload)?;

    let query = match object.get("query") {
        None => "",
        Some(Value::String(query)) => query.as_str(),
        Some(_) => return Err(SearchError::InvalidPayload("Query must be a string".to_string())),
    };

    let query = query.trim();
    if query.chars().count() < min_length {
        return Err(SearchError::ShortQuery(min_length));
    }

    Ok(query.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_valid_query() {
        assert_eq!(extract_query(r#"{"query": "Test Company"}"#, 3).unwrap(), "Test Company");
        assert_eq!(extract_query(r#"{"query": "  Test Company  "}"#, 3).unwrap(), "Test Company");
        assert_eq!(extract_query(r#"{"query": "abc", "other": 1}"#, 3).unwrap(), "abc");
    }

    #[test]
    fn test_extract_short_query() {
        for text in [
            r#"{"query": "Te"}"#,
            r#"{"query": ""}"#,
            r#"{"query": "   "}"#,
            r#"{"query": "  ab  "}"#,
            r#"{}"#,
        ] {
            assert!(
                matches!(extract_query(text, 3), Err(SearchError::ShortQuery(3))),
                "expected short query for {}",
                text
            );
        }
    }

    #[test]
    fn test_length_counts_characters() {
        assert_eq!(extract_query(r#"{"query": "東京都"}"#, 3).unwrap(), "東京都");
        assert!(matches!(extract_query(r#"{"query": "東京"}"#, 3), Err(SearchError::ShortQuery(_))));
    }

    #[test]
    fn test_extract_non_string_query() {
        for text in [
            r#"{"query": 123}"#,
            r#"{"query": null}"#,
            r#"{"query": true}"#,
            r#"{"query": ["Test"]}"#,
            r#"{"query": {"name": "Test"}}"#,
        ] {
            match extract_query(text, 3) {
                Err(SearchError::InvalidPayload(message)) => assert_eq!(message, "Query must be a string"),
                other => panic!("unexpected result for {}: {:?}", text, other),
            }
        }
    }

    #[test]
    fn test_extract_malformed_frame() {
        for text in ["{invalid json", "", "query=Test", "[\"Test\"]", "\"Test Company\"", "42"] {
            assert!(
                matches!(extract_query(text, 3), Err(SearchError::MalformedPayload)),
                "expected malformed payload for {:?}",
                text
            );
        }
    }
}
