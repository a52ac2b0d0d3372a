use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// A normalized parameter value: one string, or every value supplied for a
/// repeated parameter in the order received.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ParameterValue {
    Scalar(String),
    Multi(Vec<String>),
}

impl ParameterValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ParameterValue::Scalar(s) => Some(s),
            ParameterValue::Multi(_) => None,
        }
    }

    pub fn values(&self) -> Vec<&str> {
        match self {
            ParameterValue::Scalar(s) => vec![s.as_str()],
            ParameterValue::Multi(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::Scalar(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::Scalar(value.to_string())
    }
}

impl From<Vec<String>> for ParameterValue {
    fn from(values: Vec<String>) -> Self {
        ParameterValue::Multi(values)
    }
}

/// Parameters keyed by name, iterated in lexicographic key order.
pub type ParameterMap = BTreeMap<String, ParameterValue>;

/// Operations the content generator dispatches on.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    ClearCache,
    DataStream,
    CheckVersions,
    RenderChartExternalData,
}

impl Operation {
    /// Matching priority: the first literal found in a path wins.
    pub const PRIORITY: [Operation; 4] = [
        Operation::ClearCache,
        Operation::DataStream,
        Operation::CheckVersions,
        Operation::RenderChartExternalData,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Operation::ClearCache => "clearCache",
            Operation::DataStream => "dataStream",
            Operation::CheckVersions => "checkVersions",
            Operation::RenderChartExternalData => "renderChartExternalData",
        }
    }

    /// Classify a dispatch path by substring search.
    pub fn classify(path: &str) -> Option<Operation> {
        Self::PRIORITY
            .into_iter()
            .find(|op| path.contains(op.as_str()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RepositoryFile {
    pub path: String,
}

impl RepositoryFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Raw value handed out by a parameter source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostValue {
    Text(String),
    List(Vec<String>),
    File(RepositoryFile),
}

impl From<&str> for HostValue {
    fn from(value: &str) -> Self {
        HostValue::Text(value.to_string())
    }
}

impl From<String> for HostValue {
    fn from(value: String) -> Self {
        HostValue::Text(value)
    }
}

impl From<Vec<String>> for HostValue {
    fn from(values: Vec<String>) -> Self {
        HostValue::List(values)
    }
}

impl From<Vec<&str>> for HostValue {
    fn from(values: Vec<&str>) -> Self {
        HostValue::List(values.into_iter().map(str::to_string).collect())
    }
}

impl From<RepositoryFile> for HostValue {
    fn from(file: RepositoryFile) -> Self {
        HostValue::File(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_first_match_wins() {
        assert_eq!(
            Operation::classify("/foo/clearCache/dataStream"),
            Some(Operation::ClearCache)
        );
        assert_eq!(
            Operation::classify("/x/renderChartExternalData?checkVersions"),
            Some(Operation::CheckVersions)
        );
    }

    #[test]
    fn classify_is_substring_search() {
        assert_eq!(Operation::classify("clearCacheFoo"), Some(Operation::ClearCache));
        assert_eq!(Operation::classify("/foo/unknown"), None);
        assert_eq!(Operation::classify("/foo/clearcache"), None);
        assert_eq!(Operation::DataStream.to_string(), "dataStream");
    }

    #[test]
    fn scalar_and_multi_accessors() {
        let scalar = ParameterValue::from("a");
        let multi = ParameterValue::from(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(scalar.as_scalar(), Some("a"));
        assert_eq!(multi.as_scalar(), None);
        assert_eq!(multi.values(), vec!["a", "b"]);
    }

    #[test]
    fn values_serialize_untagged() {
        let scalar = serde_json::to_value(ParameterValue::from("a")).unwrap();
        let multi =
            serde_json::to_value(ParameterValue::from(vec!["a".to_string(), "b".to_string()]))
                .unwrap();
        assert_eq!(scalar, serde_json::json!("a"));
        assert_eq!(multi, serde_json::json!(["a", "b"]));
        assert_eq!(
            serde_json::to_value(Operation::RenderChartExternalData).unwrap(),
            serde_json::json!("renderChartExternalData")
        );
    }
}
