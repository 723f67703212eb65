use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AdvisorError, ErrorCode};

pub const JSONRPC_VERSION: &str = "2.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    #[serde(default = "default_version")]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

fn default_version() -> String {
    JSONRPC_VERSION.to_string()
}

impl RpcRequest {
    pub fn new(id: i64, method: &str, params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(Value::from(id)),
            method: method.to_string(),
            params: Some(params),
        }
    }

    /// Missing or `null` params read as an empty object.
    pub fn params_object(&self) -> Value {
        match &self.params {
            Some(Value::Null) | None => Value::Object(Default::default()),
            Some(other) => other.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

impl From<&AdvisorError> for RpcErrorObject {
    fn from(err: &AdvisorError) -> Self {
        Self {
            code: err.code().as_i64(),
            message: err.to_string(),
        }
    }
}

impl RpcErrorObject {
    pub fn error_code(&self) -> Option<ErrorCode> {
        ErrorCode::from_i64(self.code)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErrorObject>,
}

impl RpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Option<Value>, err: &AdvisorError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(RpcErrorObject::from(err)),
        }
    }

    /// Single line, no embedded newlines.
    pub fn to_line(&self) -> String {
        match serde_json::to_string(self) {
            Ok(line) => line,
            Err(err) => format!(
                r#"{{"jsonrpc":"2.0","id":null,"error":{{"code":{},"message":"failed to encode response: {}"}}}}"#,
                ErrorCode::Internal.as_i64(),
                err.to_string().replace('"', "'")
            ),
        }
    }
}
