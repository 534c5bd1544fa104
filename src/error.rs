/// Error type for storage, bridge and clipboard failures
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum StashError {
    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Extension API call failed: {message}")]
    Bridge { message: String },

    #[error("Clipboard unavailable: {message}")]
    Clipboard { message: String },
}

impl StashError {
    pub fn storage(message: impl Into<String>) -> Self {
        StashError::Storage {
            message: message.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        StashError::Serialization {
            message: message.into(),
        }
    }

    /// Wrap a rejected promise or thrown JS exception
    pub fn bridge(value: JsValue) -> Self {
        StashError::Bridge {
            message: describe_js(&value),
        }
    }

    pub fn clipboard(value: JsValue) -> Self {
        StashError::Clipboard {
            message: describe_js(&value),
        }
    }
}

impl From<serde_wasm_bindgen::Error> for StashError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        StashError::serialization(e.to_string())
    }
}

impl From<serde_json::Error> for StashError {
    fn from(e: serde_json::Error) -> Self {
        StashError::serialization(e.to_string())
    }
}

fn describe_js(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

pub type Result<T> = std::result::Result<T, StashError>;
