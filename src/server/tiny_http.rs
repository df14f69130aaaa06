//! tiny_http server adapter
//!
//! Handles routing, query and body parsing, and response conversion for
//! tiny_http. Requests are served one at a time on the accept loop.

use std::io::Cursor;

use ::tiny_http::{Header, Method, Request, Response, Server, StatusCode};
use reqwest::Url;
use serde::{Serialize, de::DeserializeOwned};

use crate::api::{ApiError, ApiResponse, CheckinBody, Portal};
use crate::qr_link::TOKEN_PARAM;

type JsonResponse = Response<Cursor<Vec<u8>>>;

// =============================================================================
// SERVER LOOP
// =============================================================================

/// Bind `0.0.0.0:<port>` and serve the portal until the process exits
pub fn serve(port: u16, portal: &Portal<'_>) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let server = Server::http(&addr).map_err(|e| anyhow::anyhow!("Failed to start server: {e}"))?;
    log::info!("portal listening on http://{addr}");
    run(&server, portal);
    Ok(())
}

/// Serve requests from an already bound server
pub fn run(server: &Server, portal: &Portal<'_>) {
    for mut request in server.incoming_requests() {
        let response = handle_api_request(portal, &mut request);
        log::debug!(
            "{} {} -> {}",
            request.method(),
            request.url(),
            response.status_code().0
        );
        if let Err(e) = request.respond(response) {
            log::warn!("failed to send response: {e}");
        }
    }
}

// =============================================================================
// REQUEST HANDLING
// =============================================================================

/// Handle an API request and return a response
///
/// Both `/api/v1/...` and `/api/...` are accepted.
pub fn handle_api_request(portal: &Portal<'_>, request: &mut Request) -> JsonResponse {
    let method = request.method().clone();
    let Some(url) = parse_url(request.url()) else {
        return error_response(&ApiError::bad_request("Malformed request URL"));
    };

    let path = url.path();
    let api_path = path
        .strip_prefix("/api/v1")
        .or_else(|| path.strip_prefix("/api"))
        .unwrap_or(path);
    let token = query_param(&url, TOKEN_PARAM);

    match (&method, api_path) {
        (&Method::Get, "/site") => handle_result(portal.get_site()),
        (&Method::Get, "/token") => handle_result(portal.check_token(token.as_deref())),

        (&Method::Post, "/checkin") => match read_json_body::<CheckinBody>(request) {
            Ok(body) => handle_result(portal.check_in(&body)),
            Err(e) => error_response(&e),
        },

        // Student lookup: GET /students/{id}
        _ if method == Method::Get && api_path.starts_with("/students/") => {
            let raw_id = api_path.strip_prefix("/students/").unwrap_or("");
            if raw_id.contains('/') {
                return not_found_response(&format!("API endpoint not found: {method} {api_path}"));
            }
            match urlencoding::decode(raw_id) {
                Ok(id) => handle_result(portal.get_student(token.as_deref(), &id)),
                Err(_) => error_response(&ApiError::bad_request("Student ID is not valid UTF-8")),
            }
        },

        _ => not_found_response(&format!("API endpoint not found: {method} {api_path}")),
    }
}

fn parse_url(raw: &str) -> Option<Url> {
    Url::parse("http://portal.invalid").ok()?.join(raw).ok()
}

fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

// =============================================================================
// BODY PARSING
// =============================================================================

/// Read and parse JSON body from request
fn read_json_body<T: DeserializeOwned>(request: &mut Request) -> Result<T, ApiError> {
    let mut body = String::new();
    request
        .as_reader()
        .read_to_string(&mut body)
        .map_err(|e| ApiError::bad_request(format!("Failed to read request body: {e}")))?;

    serde_json::from_str(&body).map_err(|e| ApiError::bad_request(format!("Invalid JSON: {e}")))
}

// =============================================================================
// RESPONSE CONVERSION
// =============================================================================

/// Convert a handler result to an HTTP response
fn handle_result<T: Serialize>(result: Result<T, ApiError>) -> JsonResponse {
    match result {
        Ok(data) => json_response(&ApiResponse::success(data), 200),
        Err(e) => error_response(&e),
    }
}

/// Create an error JSON response with appropriate status code
fn error_response(error: &ApiError) -> JsonResponse {
    let response = ApiResponse::<()>::error(error.code.as_str(), &error.message);
    json_response(&response, error.status_code())
}

/// Create a 404 not found response
fn not_found_response(message: &str) -> JsonResponse {
    error_response(&ApiError::not_found(message))
}

/// Serialize data to JSON response with status code
fn json_response<T: Serialize>(data: &T, status: u16) -> JsonResponse {
    let json = serde_json::to_string(data).unwrap_or_else(|_| r#"{"success":false}"#.to_string());
    let response = Response::from_data(json.into_bytes()).with_status_code(StatusCode(status));
    match Header::from_bytes("Content-Type", "application/json") {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}
