//! Normalization of request parameters for the content generator.
//!
//! A request arrives either as plain URL parameters or with a single `json`
//! parameter carrying every value. [`RequestParameterParser`] turns both into
//! one sorted [`ParameterMap`] and classifies the dispatch path into an
//! [`Operation`].

use std::collections::HashSet;
use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;

use crate::config::ENCODING;
use crate::core::errors::ParameterError;
use crate::core::helpers::decode_parameter_value;
use crate::models::{HostValue, Operation, ParameterMap, ParameterValue};
use crate::source::{ParameterProviders, ParameterSource, SCOPE_PATH, SCOPE_REQUEST};

pub const JSON_PARAMETER: &str = "json";
pub const FILE_PARAMETER: &str = "file";
pub const PATH_PARAMETER: &str = "path";
/// Key under which the repository path of the rendered file is exposed.
pub const FUSION_PATH_KEY: &str = "xFusionPath";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterMode {
    Json,
    Url,
}

pub struct RequestParameterParser<'a> {
    path_scope: Option<&'a dyn ParameterSource>,
    mode: ParameterMode,
    parameters: ParameterMap,
}

impl<'a> RequestParameterParser<'a> {
    pub fn new(providers: &ParameterProviders<'a>) -> Result<Self, ParameterError> {
        let request = providers.get(SCOPE_REQUEST).copied().ok_or_else(|| {
            ParameterError::invalid(format!("missing `{}` parameter scope", SCOPE_REQUEST))
        })?;

        let mode = if request.has_parameter(JSON_PARAMETER) {
            ParameterMode::Json
        } else {
            ParameterMode::Url
        };

        let mut parser = Self {
            path_scope: providers.get(SCOPE_PATH).copied(),
            mode,
            parameters: ParameterMap::new(),
        };

        let result = match mode {
            ParameterMode::Json => parser.initialize_parameters_json(request),
            ParameterMode::Url => parser.initialize_parameters_url(request),
        };
        if let Err(err) = result {
            tracing::warn!(mode = ?mode, error = %err, "rejecting request parameters");
            return Err(err);
        }

        tracing::debug!(
            mode = ?mode,
            parameters = parser.parameters.len(),
            "request parameters parsed"
        );
        Ok(parser)
    }

    fn initialize_parameters_url(&mut self, request: &dyn ParameterSource) -> Result<(), ParameterError> {
        if let Some(HostValue::File(file)) = self
            .path_scope
            .and_then(|scope| scope.get_parameter(FILE_PARAMETER))
        {
            self.parameters
                .insert(FUSION_PATH_KEY.to_string(), ParameterValue::Scalar(file.path.clone()));
        }

        for name in request.get_parameter_names() {
            let decoded = request
                .get_string_array_parameter(&name, &[])
                .iter()
                .map(|raw| decode_parameter_value(raw))
                .collect::<Result<Vec<_>, _>>()?;

            let value = if decoded.len() == 1 {
                ParameterValue::Scalar(decoded.into_iter().next().unwrap_or_default())
            } else {
                ParameterValue::Multi(decoded)
            };
            self.parameters.insert(trim_key(&name).to_string(), value);
        }

        tracing::trace!(encoding = ENCODING, "url parameters decoded");
        Ok(())
    }

    fn initialize_parameters_json(&mut self, request: &dyn ParameterSource) -> Result<(), ParameterError> {
        let content = request
            .get_string_parameter(JSON_PARAMETER, None)
            .ok_or_else(|| ParameterError::invalid("`json` parameter is not text"))?;

        let JsonObject(entries) = serde_json::from_str(&content)
            .map_err(|e| ParameterError::invalid(format!("malformed json payload: {}", e)))?;

        for (key, value) in entries {
            self.parameters.insert(key, ParameterValue::Scalar(json_to_string(value)));
        }
        Ok(())
    }

    /// Classify the dispatch path of the `path` scope.
    pub fn extract_method(&self) -> Option<Operation> {
        let path = self
            .path_scope?
            .get_string_parameter(PATH_PARAMETER, None)?;
        Operation::classify(&path)
    }

    pub fn parameters(&self) -> &ParameterMap {
        &self.parameters
    }

    pub fn into_parameters(self) -> ParameterMap {
        self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterValue> {
        self.parameters.get(name)
    }

    /// Insert or overwrite a parameter after parsing.
    pub fn put_parameter(&mut self, key: impl Into<String>, value: impl Into<ParameterValue>) {
        self.parameters.insert(key.into(), value.into());
    }

    pub fn mode(&self) -> ParameterMode {
        self.mode
    }
}

// Strings are taken verbatim, anything else as compact JSON text.
fn json_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

// Strips leading and trailing ASCII control characters and spaces only.
fn trim_key(name: &str) -> &str {
    name.trim_matches(|c: char| c <= ' ')
}

/// Top-level JSON object whose keys must be unique.
struct JsonObject(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for JsonObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ObjectVisitor;

        impl<'de> Visitor<'de> for ObjectVisitor {
            type Value = JsonObject;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a json object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<JsonObject, A::Error> {
                let mut seen = HashSet::new();
                let mut entries = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    if !seen.insert(key.clone()) {
                        return Err(de::Error::custom(format!("duplicate key `{}`", key)));
                    }
                    entries.push((key, value));
                }
                Ok(JsonObject(entries))
            }
        }

        deserializer.deserialize_map(ObjectVisitor)
    }
}
