/// Errors raised while talking to the browser
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum PopupError {
    #[error("browser call `{call}` failed: {message}")]
    Browser { call: &'static str, message: String },
    #[error("failed to decode {what}: {message}")]
    Decode { what: &'static str, message: String },
    #[error("failed to encode {what}: {message}")]
    Encode { what: &'static str, message: String },
}

impl PopupError {
    pub fn browser(call: &'static str, err: JsValue) -> Self {
        PopupError::Browser {
            call,
            message: js_error_message(&err),
        }
    }

    pub fn decode(what: &'static str, err: impl std::fmt::Debug) -> Self {
        PopupError::Decode {
            what,
            message: format!("{:?}", err),
        }
    }

    pub fn encode(what: &'static str, err: impl std::fmt::Debug) -> Self {
        PopupError::Encode {
            what,
            message: format!("{:?}", err),
        }
    }
}

/// Prefer the `message` of a JS `Error`, fall back to the debug form
fn js_error_message(err: &JsValue) -> String {
    if let Some(message) = err.as_string() {
        return message;
    }
    js_sys::Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{:?}", err))
}
