//! Builds the parameter scopes of the platform from a Spin HTTP request.

use spin_sdk::http::Request;

use crate::core::errors::ParameterError;
use crate::core::helpers::decode_parameter_value;
use crate::core::query_params::split_query;
use crate::models::RepositoryFile;
use crate::parser::{FILE_PARAMETER, JSON_PARAMETER, PATH_PARAMETER};
use crate::source::{ParameterSource, SimpleParameterProvider};

const REPOSITORY_SEGMENT: &str = "repos";

/// Query parameters of the request, plus a JSON body exposed as `json`.
///
/// Values stay URL-encoded, except for a `json` query parameter which is
/// decoded here since JSON payloads are read verbatim. An explicit `json`
/// query parameter takes precedence over the body.
pub fn request_scope(req: &Request) -> Result<SimpleParameterProvider, ParameterError> {
    let mut scope = SimpleParameterProvider::new();
    for (name, values) in split_query(req.query()) {
        let values = if name == JSON_PARAMETER {
            values
                .iter()
                .map(|raw| decode_parameter_value(raw))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            values
        };
        scope.set_parameter(name, values);
    }

    if !scope.has_parameter(JSON_PARAMETER) && is_json_body(req) {
        let body = std::str::from_utf8(req.body())
            .map_err(|_| ParameterError::invalid("json body is not valid UTF-8"))?;
        scope.set_parameter(JSON_PARAMETER, body);
    }

    Ok(scope)
}

/// The dispatch path and, for repository URLs, the file being rendered.
pub fn path_scope(req: &Request) -> SimpleParameterProvider {
    let path = req.path();
    let mut scope = SimpleParameterProvider::new().with_parameter(PATH_PARAMETER, path);
    if let Some(file) = repository_file_from_path(path) {
        scope.set_parameter(FILE_PARAMETER, file);
    }
    scope
}

/// Resolve `/api/repos/:home:x:report.prpt/...` to `/home/x/report.prpt`.
pub fn repository_file_from_path(path: &str) -> Option<RepositoryFile> {
    let mut segments = path.split('/');
    segments.find(|segment| *segment == REPOSITORY_SEGMENT)?;
    let id = segments.next()?;

    let id = urlencoding::decode(id).ok()?;
    if !id.starts_with(':') || id.len() < 2 {
        return None;
    }
    Some(RepositoryFile::new(id.replace(':', "/")))
}

fn is_json_body(req: &Request) -> bool {
    let json_content = req
        .header("Content-Type")
        .and_then(|value| value.as_str())
        .map(|value| value.trim_start().to_ascii_lowercase().starts_with("application/json"))
        .unwrap_or(false);
    json_content && !req.body().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_ids_become_paths() {
        assert_eq!(
            repository_file_from_path("/api/repos/:home:x:report.prpt/generatedContent"),
            Some(RepositoryFile::new("/home/x/report.prpt"))
        );
        assert_eq!(
            repository_file_from_path("/api/repos/%3Apublic%3Achart.xfusion"),
            Some(RepositoryFile::new("/public/chart.xfusion"))
        );
    }

    #[test]
    fn non_repository_paths_have_no_file() {
        assert_eq!(repository_file_from_path("/api/plugin/dataStream"), None);
        assert_eq!(repository_file_from_path("/api/repos/"), None);
        assert_eq!(repository_file_from_path("/api/repos/plugin/clearCache"), None);
        assert_eq!(repository_file_from_path("/api/repos/:"), None);
    }
}
