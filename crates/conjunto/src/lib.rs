//! Conjunto: page-object collections over lazily-resolved browser locators.
//!
//! Test authors declare reusable collection types whose element accessors
//! resolve to locators scoped under a root handle. Roots can be a whole
//! page, a frame, a frame locator, or an element locator; collections nest
//! into sub-scopes, and element-rooted nesting gains positional selection
//! (`nth`/`first`/`last`) that re-roots into a sibling instance of the same
//! type.
//!
//! Locators are pure query descriptors: composing them performs no I/O and
//! never fails. Rendering to a JavaScript query and evaluating it against a
//! live Chromium happens in the [`browser`] layer (enable the `browser`
//! feature for real CDP support).
//!
//! ```
//! use conjunto::{Collection, ElementOptions, Handle, Locator, Nested, Page};
//!
//! struct Row {
//!     root: Handle,
//! }
//!
//! impl Collection for Row {
//!     fn from_root(root: Handle) -> Self {
//!         Self { root }
//!     }
//!
//!     fn root(&self) -> &Handle {
//!         &self.root
//!     }
//! }
//!
//! impl Row {
//!     fn delete_button(&self) -> Locator {
//!         self.el("button.delete")
//!     }
//!
//!     // Confirmation dialog is portal-mounted on the document body.
//!     fn confirm(&self) -> Locator {
//!         self.el_with(".confirm-dialog", &ElementOptions::new().portal())
//!     }
//! }
//!
//! struct Table {
//!     root: Handle,
//! }
//!
//! impl Collection for Table {
//!     fn from_root(root: Handle) -> Self {
//!         Self { root }
//!     }
//!
//!     fn root(&self) -> &Handle {
//!         &self.root
//!     }
//! }
//!
//! impl Table {
//!     fn rows(&self) -> Nested<Row> {
//!         self.nest("tr")
//!     }
//! }
//!
//! let page = Page::new();
//! let table = Table::from_root(page.locator("table#users").into());
//! let last_delete = table.rows().last().delete_button();
//! assert!(last_delete.to_query().contains("button.delete"));
//!
//! // Portal accessors escape the row subtree entirely.
//! let confirm = table.rows().first().confirm();
//! assert!(!confirm.to_query().contains("\"tr\""));
//! ```

#![warn(missing_docs)]

mod browser;
mod collection;
mod handle;
mod locator;
mod result;

pub use browser::{Browser, BrowserConfig, Session};
pub use collection::{Collection, ElementOptions, ElementRoot, Nested, ScopeRoot};
pub use handle::{Frame, Handle, Page};
pub use locator::{FrameLocator, Locator, ScopeStep};
pub use result::{ConjuntoError, ConjuntoResult};
