use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::ErrorCode;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response has neither result nor error")]
    MissingResult,

    #[error("response contains invalid {field}: {value}")]
    InvalidId { field: &'static str, value: String },

    #[error("response contains non-numeric {field}: {value}")]
    InvalidCount { field: &'static str, value: String },
}

/// Error reported inside an otherwise well-formed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub result: Result<Value, RemoteError>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct EnvelopeJson {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<ErrorJson>,
    #[serde(default)]
    code: Option<TransportCode>,
    #[serde(default)]
    warnings: Vec<WarningJson>,
}

// UniSender reports errors as `{"error": "text", "code": "invalid_arg"}`; some gateways
// nest them as `{"error": {"code": ..., "message": ...}}`. Any other scalar is kept as text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ErrorJson {
    Message(String),
    Object {
        #[serde(default)]
        code: Option<TransportCode>,
        #[serde(default)]
        message: Option<String>,
    },
    Other(Value),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum WarningJson {
    Text(String),
    Object { warning: String },
}

impl WarningJson {
    fn into_string(self) -> String {
        match self {
            Self::Text(value) | Self::Object { warning: value } => value,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TransportCode {
    Int(i64),
    String(String),
}

impl TransportCode {
    fn into_error_code(self) -> ErrorCode {
        match self {
            Self::Int(value) => ErrorCode::new(value.to_string()),
            Self::String(value) => ErrorCode::new(value),
        }
    }
}

const UNSPECIFIED_CODE: &str = "unspecified";
const RESULT_FIELD: &str = "result";

fn sibling_code(code: Option<TransportCode>) -> ErrorCode {
    code.map(TransportCode::into_error_code)
        .unwrap_or_else(|| ErrorCode::new(UNSPECIFIED_CODE))
}

/// Decode a response body. The body must be a JSON object carrying `result` or `error`.
pub fn decode_envelope(json: &str) -> Result<Envelope, TransportError> {
    let object: Map<String, Value> = serde_json::from_str(json)?;
    let has_result = object.contains_key(RESULT_FIELD);
    let parsed: EnvelopeJson = serde_json::from_value(Value::Object(object))?;
    let warnings = parsed
        .warnings
        .into_iter()
        .map(WarningJson::into_string)
        .collect();

    let result = match parsed.error {
        None if has_result => Ok(parsed.result.unwrap_or(Value::Null)),
        None => return Err(TransportError::MissingResult),
        Some(ErrorJson::Message(message)) => Err(RemoteError {
            code: sibling_code(parsed.code),
            message,
        }),
        Some(ErrorJson::Object { code, message }) => Err(RemoteError {
            code: sibling_code(code.or(parsed.code)),
            message: message.unwrap_or_default(),
        }),
        Some(ErrorJson::Other(value)) => Err(RemoteError {
            code: sibling_code(parsed.code),
            message: value.to_string(),
        }),
    };

    Ok(Envelope { result, warnings })
}

/// Identifier sent by UniSender either as a JSON number or as a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TransportId {
    Int(u64),
    String(String),
}

impl TransportId {
    pub fn into_u64(self, field: &'static str) -> Result<u64, TransportError> {
        match self {
            Self::Int(value) => Ok(value),
            Self::String(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| TransportError::InvalidId { field, value }),
        }
    }
}

/// Counter that may arrive as number or string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TransportCount {
    Int(u64),
    String(String),
}

impl TransportCount {
    pub fn into_u64(self, field: &'static str) -> Result<u64, TransportError> {
        match self {
            Self::Int(value) => Ok(value),
            Self::String(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| TransportError::InvalidCount { field, value }),
        }
    }
}
