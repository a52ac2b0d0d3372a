//! Parameter sources supplied by the hosting platform.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::models::HostValue;

pub const SCOPE_REQUEST: &str = "request";
pub const SCOPE_PATH: &str = "path";

/// Read-only view over one scope of request data.
///
/// Only `get_parameter` and `get_parameter_names` are required; the string
/// accessors are derived from them.
pub trait ParameterSource {
    fn get_parameter(&self, name: &str) -> Option<&HostValue>;

    fn get_parameter_names(&self) -> Vec<String>;

    fn has_parameter(&self, name: &str) -> bool {
        self.get_parameter(name).is_some()
    }

    /// All values of `name`, or `default` when absent or not textual.
    fn get_string_array_parameter(&self, name: &str, default: &[String]) -> Vec<String> {
        match self.get_parameter(name) {
            Some(HostValue::Text(value)) => vec![value.clone()],
            Some(HostValue::List(values)) => values.clone(),
            Some(HostValue::File(_)) | None => default.to_vec(),
        }
    }

    /// First value of `name`, or `default` when absent or not textual.
    fn get_string_parameter(&self, name: &str, default: Option<&str>) -> Option<String> {
        match self.get_parameter(name) {
            Some(HostValue::Text(value)) => Some(value.clone()),
            Some(HostValue::List(values)) if !values.is_empty() => Some(values[0].clone()),
            _ => default.map(str::to_string),
        }
    }
}

/// Sources keyed by scope name.
pub type ParameterProviders<'a> = HashMap<String, &'a dyn ParameterSource>;

/// In-memory source that enumerates names in insertion order.
#[derive(Debug, Clone, Default)]
pub struct SimpleParameterProvider {
    parameters: IndexMap<String, HostValue>,
}

impl SimpleParameterProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or replace a parameter. A replaced name keeps its position.
    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<HostValue>) {
        self.parameters.insert(name.into(), value.into());
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<HostValue>) -> Self {
        self.set_parameter(name, value);
        self
    }
}

impl ParameterSource for SimpleParameterProvider {
    fn get_parameter(&self, name: &str) -> Option<&HostValue> {
        self.parameters.get(name)
    }

    fn get_parameter_names(&self) -> Vec<String> {
        self.parameters.keys().cloned().collect()
    }
}
