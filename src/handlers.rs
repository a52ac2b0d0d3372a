use serde::Serialize;
use spin_sdk::http::{Request, Response};

use crate::core::errors::ApiError;
use crate::core::helpers::json_response;
use crate::host::{path_scope, request_scope};
use crate::models::{Operation, ParameterMap};
use crate::parser::RequestParameterParser;
use crate::source::{ParameterProviders, ParameterSource, SCOPE_PATH, SCOPE_REQUEST};

/// Dispatch descriptor returned to the content generator.
#[derive(Serialize)]
struct Dispatch<'a> {
    operation: Option<Operation>,
    parameters: &'a ParameterMap,
}

pub fn handle_request(req: Request) -> anyhow::Result<Response> {
    let request_params = match request_scope(&req) {
        Ok(scope) => scope,
        Err(err) => return Ok(ApiError::from(err).into()),
    };
    let path_params = path_scope(&req);

    let mut providers = ParameterProviders::new();
    providers.insert(SCOPE_REQUEST.to_string(), &request_params as &dyn ParameterSource);
    providers.insert(SCOPE_PATH.to_string(), &path_params as &dyn ParameterSource);

    let parser = match RequestParameterParser::new(&providers) {
        Ok(parser) => parser,
        Err(err) => return Ok(ApiError::from(err).into()),
    };
    let operation = parser.extract_method();

    tracing::info!(
        path = req.path(),
        operation = operation.map(Operation::as_str).unwrap_or("none"),
        "dispatching content generator request"
    );

    json_response(
        200,
        &Dispatch {
            operation,
            parameters: parser.parameters(),
        },
    )
}

#[cfg(target_arch = "wasm32")]
#[spin_sdk::http_component]
fn handle_fusion(req: Request) -> anyhow::Result<Response> {
    handle_request(req)
}
