use serde::Serialize;
use spin_sdk::http::Response;

use crate::config::ENCODING;
use crate::core::errors::ParameterError;

/// Decode a raw URL parameter value.
///
/// Literal `+` is escaped to `%2B` before percent-decoding so it comes out as
/// a plus sign instead of a space.
pub fn decode_parameter_value(raw: &str) -> Result<String, ParameterError> {
    let escaped = raw.replace('+', "%2B");
    check_percent_escapes(&escaped)?;

    urlencoding::decode(&escaped)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| ParameterError::invalid(format!("Unsupported Encoding: value is not valid {}", ENCODING)))
}

// urlencoding passes malformed escapes through untouched; reject them instead.
fn check_percent_escapes(value: &str) -> Result<(), ParameterError> {
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(ParameterError::invalid(format!(
                    "malformed percent escape at byte {}",
                    i
                )));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}

pub fn json_response<T: Serialize>(status: u16, value: &T) -> anyhow::Result<Response> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(value)?)
        .build())
}
