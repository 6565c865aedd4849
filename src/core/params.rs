//! Build parameter parsing

use std::collections::HashMap;

/// Parse `key:value` entries into a parameter map
///
/// Each entry is split on its first colon. Entries without a colon, or with
/// an empty key or value, are dropped. Later keys overwrite earlier ones.
/// Empty input yields an empty map; an optional list can be passed as
/// `list.into_iter().flatten()`.
pub fn parse_params<I, S>(entries: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .filter_map(|entry| {
            let (key, value) = entry.as_ref().split_once(':')?;
            if key.is_empty() || value.is_empty() {
                return None;
            }
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_pairs() {
        assert_eq!(parse_params(["a:1", "b:2"]), map(&[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn test_drops_entries_without_colon() {
        assert_eq!(parse_params(["noColon", "b:2"]), map(&[("b", "2")]));
    }

    #[test]
    fn test_drops_empty_key_or_value() {
        assert_eq!(parse_params([":1", "a:", ":", "c:3"]), map(&[("c", "3")]));
    }

    #[test]
    fn test_splits_on_first_colon_only() {
        assert_eq!(
            parse_params(["url:http://host:8080"]),
            map(&[("url", "http://host:8080")])
        );
    }

    #[test]
    fn test_later_duplicates_win() {
        assert_eq!(parse_params(["a:1", "a:2"]), map(&[("a", "2")]));
    }

    #[test]
    fn test_empty_and_absent_input() {
        assert!(parse_params(Vec::<String>::new()).is_empty());
        assert!(parse_params(None::<Vec<String>>.into_iter().flatten()).is_empty());
        let absent: Option<Vec<String>> = None;
        assert!(parse_params(absent.unwrap_or_default()).is_empty());
    }
}
