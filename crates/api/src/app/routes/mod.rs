use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::Extension,
    http::{Method, StatusCode, Uri},
    response::Response,
};

use taskhub_routing::{Operation, Resolution};

use crate::app::{errors, resources::ResourceTable};

pub mod admin;
pub mod system;
pub mod todos;

/// Registry-driven dispatch for everything that is not a static mount.
///
/// Resolves `(method, path)` against the immutable registration table and
/// invokes the matching operation on the registered handler. Bodies are
/// decoded here so handlers only ever see JSON values.
pub async fn dispatch(
    Extension(table): Extension<Arc<ResourceTable>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let resolution = match table.registry().resolve(&method, uri.path()) {
        Ok(resolution) => resolution,
        Err(err) => return errors::route_error_to_response(err),
    };

    let matched = match resolution {
        Resolution::Resource(matched) => matched,
        // Admin paths are served by the nested admin router, which carries
        // its own fallback; an admin path can only land here if that mount
        // is missing entirely.
        Resolution::Admin => return errors::not_found("unknown admin path"),
    };

    tracing::debug!(
        resource = matched.resource,
        operation = ?matched.operation,
        id = matched.id,
        "resolved request"
    );

    let Some(handler) = table.handler(matched.resource) else {
        return errors::json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "unregistered_handler",
            format!("no handler registered for resource `{}`", matched.resource),
        );
    };

    match (matched.operation, matched.id) {
        (Operation::List, None) => handler.list(),
        (Operation::Create, None) => match parse_body(&body) {
            Ok(value) => handler.create(value),
            Err(response) => response,
        },
        (Operation::Retrieve, Some(id)) => handler.retrieve(id),
        (Operation::Update, Some(id)) => match parse_body(&body) {
            Ok(value) => handler.update(id, value, method == Method::PATCH),
            Err(response) => response,
        },
        (Operation::Delete, Some(id)) => handler.delete(id),
        // The registry only yields id-less collection operations and id-ful
        // item operations.
        _ => errors::not_found("no route matches the requested path"),
    }
}

/// Decode the request body as JSON. An empty body decodes to an empty object
/// so sparse updates without a payload stay valid; required fields are
/// enforced by the handler's DTO.
fn parse_body(body: &Bytes) -> Result<serde_json::Value, Response> {
    if body.is_empty() {
        return Ok(serde_json::Value::Object(serde_json::Map::new()));
    }
    serde_json::from_slice(body)
        .map_err(|e| errors::json_error(StatusCode::BAD_REQUEST, "invalid_json", e.to_string()))
}
