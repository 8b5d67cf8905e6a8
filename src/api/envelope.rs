// src/api/envelope.rs

//! The `{code, message, data}` envelope every live endpoint answers with.

use serde::Deserialize;

/// Raw response envelope as sent by the platform.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,

    #[serde(default, alias = "msg")]
    pub message: String,

    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

/// Typed outcome of a remote call.
///
/// `Failed` keeps whatever payload came along with the error code so callers
/// may continue with partial data.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    Ok(Option<T>),
    Failed {
        code: i64,
        message: String,
        data: Option<T>,
    },
}

impl<T> From<Envelope<T>> for Reply<T> {
    fn from(envelope: Envelope<T>) -> Self {
        if envelope.code == 0 {
            Reply::Ok(envelope.data)
        } else {
            Reply::Failed {
                code: envelope.code,
                message: envelope.message,
                data: envelope.data,
            }
        }
    }
}

impl<T> Reply<T> {
    /// A successful reply carrying `data`.
    pub fn ok(data: T) -> Self {
        Reply::Ok(Some(data))
    }

    /// A successful reply with a null payload.
    pub fn empty() -> Self {
        Reply::Ok(None)
    }

    /// A failed reply without payload.
    pub fn failed(code: i64, message: impl Into<String>) -> Self {
        Reply::Failed {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Reply::Ok(_))
    }

    /// Payload regardless of outcome.
    pub fn into_data(self) -> Option<T> {
        match self {
            Reply::Ok(data) | Reply::Failed { data, .. } => data,
        }
    }

    /// Log a non-zero code for `op` and continue with whatever data arrived.
    pub fn soft(self, op: &str) -> Option<T> {
        if let Reply::Failed { code, message, .. } = &self {
            log::warn!("{} returned code {}: {}", op, code, message);
        }
        self.into_data()
    }
}
