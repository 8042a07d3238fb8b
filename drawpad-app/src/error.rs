//! Error types for the browser widget.

use drawpad_core::PadError;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised while building or driving the widget.
#[derive(Debug, Error)]
pub enum AppError {
    /// No global `window` (not running in a browser page).
    #[error("No window object")]
    NoWindow,

    /// The window has no document.
    #[error("No document object")]
    NoDocument,

    /// A DOM call threw.
    #[error("DOM operation failed: {0}")]
    Dom(String),

    /// A created or looked-up node had an unexpected type.
    #[error("Element is not a {0}")]
    WrongElement(&'static str),

    /// The `CanvasDrawer` engine is not loaded on the page.
    #[error("CanvasDrawer engine is not available")]
    EngineMissing,

    /// The widget was torn down or never generated.
    #[error("Drawing pad is not generated")]
    NotGenerated,

    /// Another handler is running on the pad.
    #[error("Drawing pad is busy")]
    Busy,

    /// Pad logic error.
    #[error(transparent)]
    Pad(#[from] PadError),
}

impl AppError {
    /// Wrap a thrown JavaScript value.
    pub(crate) fn dom(err: &JsValue) -> Self {
        Self::Dom(err.as_string().unwrap_or_else(|| format!("{err:?}")))
    }
}

impl From<AppError> for JsValue {
    fn from(err: AppError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Result type for widget operations.
pub type AppResult<T> = std::result::Result<T, AppError>;
