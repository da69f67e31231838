//! Browser evaluation layer for locator descriptors.
//!
//! The descriptor core never performs I/O; this module is where a rendered
//! query actually meets a browser. When compiled with the `browser` feature
//! it drives a real Chromium via the Chrome `DevTools` Protocol
//! (chromiumoxide). Without the feature it provides a mock implementation
//! with the same surface for unit testing.

use crate::result::{ConjuntoError, ConjuntoResult};

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 800,
            viewport_height: 600,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

// ============================================================================
// Real CDP Implementation (when `browser` feature is enabled)
// ============================================================================

#[cfg(feature = "browser")]
mod cdp {
    use super::{BrowserConfig, ConjuntoError, ConjuntoResult};
    use crate::handle::Page;
    use crate::locator::Locator;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::cdp::browser_protocol::page::{
        CaptureScreenshotFormat, CaptureScreenshotParams,
    };
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use tracing::debug;

    /// Browser instance with real CDP connection
    #[derive(Debug)]
    pub struct Browser {
        config: BrowserConfig,
        inner: Arc<Mutex<CdpBrowser>>,
        #[allow(dead_code)]
        handle: tokio::task::JoinHandle<()>,
    }

    impl Browser {
        /// Launch a new browser instance with real CDP
        ///
        /// # Errors
        ///
        /// Returns [`ConjuntoError::BrowserNotFound`] when a configured
        /// chromium path does not exist, or an error if the browser cannot
        /// be launched
        pub async fn launch(config: BrowserConfig) -> ConjuntoResult<Self> {
            if let Some(ref path) = config.chromium_path {
                if !std::path::Path::new(path).exists() {
                    return Err(ConjuntoError::BrowserNotFound);
                }
            }

            let mut builder = CdpConfig::builder();

            if !config.headless {
                builder = builder.with_head();
            }

            if !config.sandbox {
                builder = builder.no_sandbox();
            }

            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }

            let cdp_config = builder.build().map_err(|e| ConjuntoError::BrowserLaunch {
                message: e.to_string(),
            })?;

            let (browser, mut handler) = CdpBrowser::launch(cdp_config).await.map_err(|e| {
                ConjuntoError::BrowserLaunch {
                    message: e.to_string(),
                }
            })?;

            // Spawn handler task
            let handle = tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            Ok(Self {
                config,
                inner: Arc::new(Mutex::new(browser)),
                handle,
            })
        }

        /// Open a new session (a fresh browser page with a handle
        /// descriptor collections can be rooted at)
        ///
        /// # Errors
        ///
        /// Returns error if the page cannot be created
        pub async fn new_session(&self) -> ConjuntoResult<Session> {
            let browser = self.inner.lock().await;
            let cdp_page =
                browser
                    .new_page("about:blank")
                    .await
                    .map_err(|e| ConjuntoError::PageError {
                        message: e.to_string(),
                    })?;

            Ok(Session {
                page: Page::new(),
                url: String::from("about:blank"),
                inner: Some(Arc::new(Mutex::new(cdp_page))),
            })
        }

        /// Get the browser configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }

        /// Close the browser
        pub async fn close(self) -> ConjuntoResult<()> {
            let mut browser = self.inner.lock().await;
            browser
                .close()
                .await
                .map_err(|e| ConjuntoError::BrowserLaunch {
                    message: e.to_string(),
                })?;
            Ok(())
        }
    }

    /// A live browser page that evaluates locator descriptors
    #[derive(Debug)]
    pub struct Session {
        page: Page,
        url: String,
        inner: Option<Arc<Mutex<CdpPage>>>,
    }

    impl Session {
        /// The handle descriptor for this session's page; root collections
        /// here
        #[must_use]
        pub fn page(&self) -> Page {
            self.page.clone()
        }

        /// Navigate to a URL
        ///
        /// # Errors
        ///
        /// Returns error if navigation fails
        pub async fn goto(&mut self, url: &str) -> ConjuntoResult<()> {
            debug!(url, "navigating");
            if let Some(ref inner) = self.inner {
                let page = inner.lock().await;
                page.goto(url)
                    .await
                    .map_err(|e| ConjuntoError::Navigation {
                        url: url.to_string(),
                        message: e.to_string(),
                    })?;
            }
            self.url = url.to_string();
            Ok(())
        }

        /// Replace the document content of the page
        ///
        /// # Errors
        ///
        /// Returns error if the engine rejects the write
        pub async fn set_content(&self, html: &str) -> ConjuntoResult<()> {
            let expr = format!(
                "document.open(); document.write({html:?}); document.close(); true"
            );
            let _: bool = self.eval(&expr).await?;
            Ok(())
        }

        /// Evaluate a JavaScript expression
        ///
        /// # Errors
        ///
        /// Returns error if evaluation fails
        pub async fn eval<T: serde::de::DeserializeOwned>(&self, expr: &str) -> ConjuntoResult<T> {
            if let Some(ref inner) = self.inner {
                debug!(expr, "evaluating");
                let page = inner.lock().await;
                let result = page
                    .evaluate(expr)
                    .await
                    .map_err(|e| ConjuntoError::EvalFailed {
                        message: e.to_string(),
                    })?;
                result.into_value().map_err(|e| ConjuntoError::EvalFailed {
                    message: e.to_string(),
                })
            } else {
                Err(ConjuntoError::EvalFailed {
                    message: "No browser connection".to_string(),
                })
            }
        }

        /// Text content of the locator's first match
        ///
        /// # Errors
        ///
        /// Returns [`ConjuntoError::ElementNotFound`] when nothing matches
        pub async fn text_content(&self, locator: &Locator) -> ConjuntoResult<String> {
            let text: Option<String> = self.eval(&locator.to_text_query()).await?;
            text.ok_or_else(|| ConjuntoError::ElementNotFound {
                query: locator.to_query(),
            })
        }

        /// Number of elements the locator currently matches
        ///
        /// # Errors
        ///
        /// Returns error if evaluation fails
        pub async fn count(&self, locator: &Locator) -> ConjuntoResult<usize> {
            let count: u64 = self.eval(&locator.to_count_query()).await?;
            Ok(usize::try_from(count).unwrap_or(usize::MAX))
        }

        /// Whether the locator currently matches at least one element
        ///
        /// # Errors
        ///
        /// Returns error if evaluation fails
        pub async fn is_attached(&self, locator: &Locator) -> ConjuntoResult<bool> {
            Ok(self.count(locator).await? > 0)
        }

        /// Take a screenshot
        ///
        /// # Errors
        ///
        /// Returns error if screenshot fails
        pub async fn screenshot(&self) -> ConjuntoResult<Vec<u8>> {
            if let Some(ref inner) = self.inner {
                let page = inner.lock().await;
                let params = CaptureScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .build();

                let screenshot =
                    page.execute(params)
                        .await
                        .map_err(|e| ConjuntoError::Screenshot {
                            message: e.to_string(),
                        })?;

                use base64::Engine;
                base64::engine::general_purpose::STANDARD
                    .decode(&screenshot.data)
                    .map_err(|e| ConjuntoError::Screenshot {
                        message: e.to_string(),
                    })
            } else {
                Ok(vec![])
            }
        }

        /// Get current URL
        #[must_use]
        pub fn current_url(&self) -> &str {
            &self.url
        }
    }
}

// ============================================================================
// Mock Implementation (when `browser` feature is NOT enabled)
// ============================================================================

#[cfg(not(feature = "browser"))]
mod mock {
    use super::{BrowserConfig, ConjuntoError, ConjuntoResult};
    use crate::handle::Page;
    use crate::locator::Locator;

    fn no_browser<T>() -> ConjuntoResult<T> {
        Err(ConjuntoError::EvalFailed {
            message: "Browser feature not enabled. Enable 'browser' feature for real CDP support."
                .to_string(),
        })
    }

    /// Browser instance for testing (mock when `browser` feature disabled)
    #[derive(Debug)]
    pub struct Browser {
        config: BrowserConfig,
    }

    impl Browser {
        /// Launch a new browser instance (mock)
        ///
        /// # Errors
        ///
        /// Returns [`ConjuntoError::BrowserNotFound`] when a configured
        /// chromium path does not exist
        pub fn launch(config: BrowserConfig) -> ConjuntoResult<Self> {
            if let Some(ref path) = config.chromium_path {
                if !std::path::Path::new(path).exists() {
                    return Err(ConjuntoError::BrowserNotFound);
                }
            }
            Ok(Self { config })
        }

        /// Open a new session
        ///
        /// # Errors
        ///
        /// Returns error if the page cannot be created
        pub fn new_session(&self) -> ConjuntoResult<Session> {
            Ok(Session {
                page: Page::new(),
                url: String::from("about:blank"),
            })
        }

        /// Get the browser configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }
    }

    /// A browser session for testing (mock when `browser` feature disabled)
    #[derive(Debug)]
    pub struct Session {
        page: Page,
        url: String,
    }

    impl Session {
        /// The handle descriptor for this session's page
        #[must_use]
        pub fn page(&self) -> Page {
            self.page.clone()
        }

        /// Navigate to a URL (mock records the URL only)
        ///
        /// # Errors
        ///
        /// Returns Ok in mock mode
        pub fn goto(&mut self, url: &str) -> ConjuntoResult<()> {
            tracing::debug!(url, "navigating (mock)");
            self.url = url.to_string();
            Ok(())
        }

        /// Replace the document content (mock returns error)
        ///
        /// # Errors
        ///
        /// Always returns error in mock mode
        pub fn set_content(&self, _html: &str) -> ConjuntoResult<()> {
            no_browser()
        }

        /// Evaluate a JavaScript expression (mock returns error)
        ///
        /// # Errors
        ///
        /// Always returns error in mock mode
        pub fn eval<T: serde::de::DeserializeOwned>(&self, _expr: &str) -> ConjuntoResult<T> {
            no_browser()
        }

        /// Text content of the locator's first match (mock returns error)
        ///
        /// # Errors
        ///
        /// Always returns error in mock mode
        pub fn text_content(&self, _locator: &Locator) -> ConjuntoResult<String> {
            no_browser()
        }

        /// Number of matching elements (mock returns error)
        ///
        /// # Errors
        ///
        /// Always returns error in mock mode
        pub fn count(&self, _locator: &Locator) -> ConjuntoResult<usize> {
            no_browser()
        }

        /// Whether at least one element matches (mock returns error)
        ///
        /// # Errors
        ///
        /// Always returns error in mock mode
        pub fn is_attached(&self, _locator: &Locator) -> ConjuntoResult<bool> {
            no_browser()
        }

        /// Take a screenshot (mock returns empty)
        ///
        /// # Errors
        ///
        /// Returns empty bytes in mock mode
        pub fn screenshot(&self) -> ConjuntoResult<Vec<u8>> {
            Ok(vec![])
        }

        /// Get current URL
        #[must_use]
        pub fn current_url(&self) -> &str {
            &self.url
        }
    }
}

// Re-export based on feature
#[cfg(feature = "browser")]
pub use cdp::{Browser, Session};

#[cfg(not(feature = "browser"))]
pub use mock::{Browser, Session};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod config_tests {
        use super::*;

        #[test]
        fn test_default_config() {
            let config = BrowserConfig::default();
            assert!(config.headless);
            assert_eq!(config.viewport_width, 800);
            assert_eq!(config.viewport_height, 600);
            assert!(config.sandbox);
        }

        #[test]
        fn test_builder() {
            let config = BrowserConfig::default()
                .with_viewport(1280, 720)
                .with_headless(false)
                .with_chromium_path("/usr/bin/chromium")
                .with_no_sandbox();
            assert_eq!(config.viewport_width, 1280);
            assert!(!config.headless);
            assert_eq!(config.chromium_path.as_deref(), Some("/usr/bin/chromium"));
            assert!(!config.sandbox);
        }
    }

    #[cfg(not(feature = "browser"))]
    mod mock_tests {
        use super::*;
        use crate::handle::Page;

        #[test]
        fn test_mock_session_records_url() {
            let browser = Browser::launch(BrowserConfig::default()).unwrap();
            let mut session = browser.new_session().unwrap();
            assert_eq!(session.current_url(), "about:blank");
            session.goto("https://example.com").unwrap();
            assert_eq!(session.current_url(), "https://example.com");
        }

        #[test]
        fn test_mock_eval_is_an_error() {
            let browser = Browser::launch(BrowserConfig::default()).unwrap();
            let session = browser.new_session().unwrap();
            let locator = session.page().locator("p");
            assert!(session.text_content(&locator).is_err());
            assert!(session.count(&locator).is_err());
        }

        #[test]
        fn test_launch_rejects_missing_chromium_path() {
            let config = BrowserConfig::default().with_chromium_path("/nonexistent/chromium");
            assert!(matches!(
                Browser::launch(config),
                Err(crate::result::ConjuntoError::BrowserNotFound)
            ));
        }

        #[test]
        fn test_mock_page_is_a_fresh_descriptor() {
            let browser = Browser::launch(BrowserConfig::default()).unwrap();
            let a = browser.new_session().unwrap();
            let b = browser.new_session().unwrap();
            assert_ne!(a.page(), b.page());
            let _: Page = a.page();
        }
    }
}
