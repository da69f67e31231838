//! Result and error types for Conjunto.

use thiserror::Error;

/// Result type for Conjunto operations
pub type ConjuntoResult<T> = Result<T, ConjuntoError>;

/// Errors that can occur in Conjunto
///
/// The descriptor core (handles, locators, collections) is pure and cannot
/// fail; every variant here surfaces from the browser evaluation layer.
/// Selector strings are opaque to this crate, so selector errors arrive as
/// engine evaluation failures and are not reinterpreted.
#[derive(Debug, Error)]
pub enum ConjuntoError {
    /// Browser executable not found
    #[error("Browser not found. Install Chromium or set CHROMIUM_PATH")]
    BrowserNotFound,

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Page error
    #[error("Page error: {message}")]
    PageError {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Query evaluation failed in the engine
    #[error("Evaluation failed: {message}")]
    EvalFailed {
        /// Error message
        message: String,
    },

    /// A locator query matched no element at evaluation time
    #[error("No element matched query: {query}")]
    ElementNotFound {
        /// The rendered query that matched nothing
        query: String,
    },

    /// Screenshot error
    #[error("Screenshot failed: {message}")]
    Screenshot {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
