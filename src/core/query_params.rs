use indexmap::IndexMap;

/// Split a raw query string into its parameters.
///
/// Keys are URL-decoded, values are kept raw so the parameter parser can apply
/// its own decoding. Repeated keys accumulate their values in order and keys
/// keep the position of their first appearance.
///
/// # Example
/// ```
/// use fusion_input::core::query_params::split_query;
///
/// let params = split_query("chart=bar&series=a&series=b%2Bc");
/// assert_eq!(params["chart"], vec!["bar".to_string()]);
/// assert_eq!(params["series"], vec!["a".to_string(), "b%2Bc".to_string()]);
/// ```
pub fn split_query(query: &str) -> IndexMap<String, Vec<String>> {
    let mut params: IndexMap<String, Vec<String>> = IndexMap::new();

    for pair in query.trim_start_matches('?').split('&') {
        if pair.is_empty() {
            continue;
        }
        let (raw_key, raw_value) = match pair.split_once('=') {
            Some((k, v)) => (k, v),
            // Flag parameter without value
            None => (pair, ""),
        };
        let key = urlencoding::decode(raw_key)
            .map(|k| k.into_owned())
            .unwrap_or_else(|_| raw_key.to_string());
        params.entry(key).or_default().push(raw_value.to_string());
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query() {
        assert!(split_query("").is_empty());
        assert!(split_query("&&").is_empty());
    }

    #[test]
    fn flags_and_repeats() {
        let params = split_query("debug&a=1&b=2&a=3");
        let keys: Vec<&str> = params.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["debug", "a", "b"]);
        assert_eq!(params["debug"], vec![String::new()]);
        assert_eq!(params["a"], vec!["1".to_string(), "3".to_string()]);
    }

    #[test]
    fn keys_decoded_values_raw() {
        let params = split_query("my%20key=a+b%2Bc&x=y=z");
        assert_eq!(params["my key"], vec!["a+b%2Bc".to_string()]);
        assert_eq!(params["x"], vec!["y=z".to_string()]);
    }
}
