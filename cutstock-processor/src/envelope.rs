use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;

/// One request line read by the processor
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    /// Caller chosen identifier, echoed in the response
    pub id: String,
    pub route: String,
    #[serde(default)]
    pub body: Value,
    /// Name under which a successful solve is archived (defaults to the request id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One response line written by the processor
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub id: String,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unplaced: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// The request was understood but rejected by input validation
    Validation,
    /// The engine failed to produce a valid result
    Internal,
    /// The request line or its body could not be parsed
    Malformed,
    /// No such route
    NotFound,
}

impl ResponseEnvelope {
    pub fn success(id: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            ok: true,
            data: Some(data),
            summary: None,
            unplaced: None,
            error: None,
        }
    }

    pub fn failure(id: impl Into<String>, kind: ErrorKind, message: impl Display) -> Self {
        Self {
            id: id.into(),
            ok: false,
            data: None,
            summary: None,
            unplaced: None,
            error: Some(ErrorBody {
                kind,
                message: message.to_string(),
            }),
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(|e| e.kind)
    }
}

/// Routes understood by the processor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    CutBar,
    CutPlane,
    RecordAdd,
    RecordList,
    RecordDelete(String),
}

impl Route {
    pub fn parse(route: &str) -> Option<Self> {
        match route {
            "/cut/bar" => Some(Route::CutBar),
            "/cut/plane" => Some(Route::CutPlane),
            "/cutRecord/add" => Some(Route::RecordAdd),
            "/cutRecord/list" => Some(Route::RecordList),
            _ => route
                .strip_prefix("/cutRecord/delete/")
                .filter(|id| !id.is_empty() && !id.contains('/'))
                .map(|id| Route::RecordDelete(id.to_string())),
        }
    }
}
