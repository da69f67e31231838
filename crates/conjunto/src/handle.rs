//! Handle layer: pages, frames, and the closed union over every place a
//! collection can be rooted.
//!
//! A [`Handle`] is one of exactly four variants: a [`Page`], a [`Frame`], a
//! [`FrameLocator`](crate::locator::FrameLocator), or an element
//! [`Locator`](crate::locator::Locator). Which variant a root is determines
//! the operations available on it, and this module is the only place that
//! variant knowledge is concentrated; everything else in the crate works
//! against the union.
//!
//! Engines typically associate a locator with its owning frame through
//! private, undocumented internals, and relying on that association is an
//! integration risk. Here frame identity is threaded explicitly through
//! descriptor construction instead: every locator carries the [`Frame`] it
//! was built under, and [`Handle::owning_frame`] reads it back.

use std::sync::Arc;

use uuid::Uuid;

use crate::locator::{FrameLocator, Locator, ScopeStep};

/// A browser page descriptor.
///
/// Cheap to clone; identity (not content) equality. A `Page` performs no
/// I/O — it is the origin every frame and locator descriptor hangs off.
#[derive(Debug, Clone)]
pub struct Page {
    inner: Arc<PageInner>,
}

#[derive(Debug)]
struct PageInner {
    id: Uuid,
}

impl Page {
    /// Create a new page descriptor
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(PageInner { id: Uuid::new_v4() }),
        }
    }

    /// Unique identity of this page
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    /// The main frame of this page
    #[must_use]
    pub fn main_frame(&self) -> Frame {
        Frame {
            page: self.clone(),
            path: Vec::new(),
        }
    }

    /// A concrete embedded frame, identified by an iframe selector applied
    /// from the main frame
    #[must_use]
    pub fn frame(&self, selector: impl Into<String>) -> Frame {
        self.main_frame().enter(selector)
    }

    /// A locator for `selector` scoped under the main frame
    #[must_use]
    pub fn locator(&self, selector: impl Into<String>) -> Locator {
        self.main_frame().locator(selector)
    }

    /// A frame locator for the iframe matched by `selector` under the main
    /// frame
    #[must_use]
    pub fn frame_locator(&self, selector: impl Into<String>) -> FrameLocator {
        self.main_frame().frame_locator(selector)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Page {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Page {}

/// A concrete frame identity: the owning page plus the chain of iframe
/// selectors leading to it from the main frame. An empty chain is the main
/// frame itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    page: Page,
    path: Vec<String>,
}

impl Frame {
    /// The page that owns this frame
    #[must_use]
    pub fn page(&self) -> Page {
        self.page.clone()
    }

    /// Whether this is the page's main frame
    #[must_use]
    pub fn is_main(&self) -> bool {
        self.path.is_empty()
    }

    /// The concrete frame embedded in this one behind `selector`
    #[must_use]
    pub fn enter(&self, selector: impl Into<String>) -> Frame {
        let mut path = self.path.clone();
        path.push(selector.into());
        Frame {
            page: self.page.clone(),
            path,
        }
    }

    /// A locator for `selector` scoped under this frame
    #[must_use]
    pub fn locator(&self, selector: impl Into<String>) -> Locator {
        Locator::rooted(self.clone(), vec![ScopeStep::Descend(selector.into())])
    }

    /// A frame locator for the iframe matched by `selector` in this frame
    #[must_use]
    pub fn frame_locator(&self, selector: impl Into<String>) -> FrameLocator {
        FrameLocator::rooted(self.clone(), vec![ScopeStep::EnterFrame(selector.into())])
    }

    /// JavaScript expression evaluating to this frame's document
    #[must_use]
    pub(crate) fn document_expr(&self) -> String {
        let mut expr = String::from("document");
        for selector in &self.path {
            expr = format!("{expr}.querySelector({selector:?}).contentDocument");
        }
        expr
    }
}

/// The closed union of every value a collection can be rooted at.
///
/// Exactly one variant at any time; positional selection (`nth`/`first`/
/// `last`) is only meaningful for the `Locator` variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handle {
    /// A whole page
    Page(Page),
    /// A concrete frame
    Frame(Frame),
    /// A scope crossing into an embedded frame
    FrameLocator(FrameLocator),
    /// An element locator
    Locator(Locator),
}

impl Handle {
    /// Whether this handle is a page
    #[must_use]
    pub const fn is_page(&self) -> bool {
        matches!(self, Self::Page(_))
    }

    /// Whether this handle is a concrete frame
    #[must_use]
    pub const fn is_frame(&self) -> bool {
        matches!(self, Self::Frame(_))
    }

    /// Whether this handle is a frame locator
    #[must_use]
    pub const fn is_frame_locator(&self) -> bool {
        matches!(self, Self::FrameLocator(_))
    }

    /// Whether this handle is an element locator
    #[must_use]
    pub const fn is_locator(&self) -> bool {
        matches!(self, Self::Locator(_))
    }

    /// A locator for `selector` scoped under this handle
    #[must_use]
    pub fn locator(&self, selector: impl Into<String>) -> Locator {
        match self {
            Self::Page(page) => page.locator(selector),
            Self::Frame(frame) => frame.locator(selector),
            Self::FrameLocator(frame_locator) => frame_locator.locator(selector),
            Self::Locator(locator) => locator.locator(selector),
        }
    }

    /// A frame locator for the iframe matched by `selector` under this
    /// handle
    #[must_use]
    pub fn frame_locator(&self, selector: impl Into<String>) -> FrameLocator {
        match self {
            Self::Page(page) => page.frame_locator(selector),
            Self::Frame(frame) => frame.frame_locator(selector),
            Self::FrameLocator(frame_locator) => frame_locator.frame_locator(selector),
            Self::Locator(locator) => locator.frame_locator(selector),
        }
    }

    /// The frame this handle is attached to.
    ///
    /// For a locator or frame locator this is the frame threaded through its
    /// construction (the outer frame, even when the scope chain crosses into
    /// an embedded frame). For a page it is the main frame. A frame resolves
    /// to itself.
    #[must_use]
    pub fn owning_frame(&self) -> Frame {
        match self {
            Self::Page(page) => page.main_frame(),
            Self::Frame(frame) => frame.clone(),
            Self::FrameLocator(frame_locator) => frame_locator.frame(),
            Self::Locator(locator) => locator.frame(),
        }
    }

    /// The page this handle is attached to
    #[must_use]
    pub fn page(&self) -> Page {
        self.owning_frame().page()
    }
}

impl From<Page> for Handle {
    fn from(page: Page) -> Self {
        Self::Page(page)
    }
}

impl From<Frame> for Handle {
    fn from(frame: Frame) -> Self {
        Self::Frame(frame)
    }
}

impl From<FrameLocator> for Handle {
    fn from(frame_locator: FrameLocator) -> Self {
        Self::FrameLocator(frame_locator)
    }
}

impl From<Locator> for Handle {
    fn from(locator: Locator) -> Self {
        Self::Locator(locator)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod page_tests {
        use super::*;

        #[test]
        fn test_page_identity() {
            let page = Page::new();
            assert_eq!(page, page.clone());
            assert_ne!(page, Page::new());
        }

        #[test]
        fn test_main_frame() {
            let page = Page::new();
            let frame = page.main_frame();
            assert!(frame.is_main());
            assert_eq!(frame.page(), page);
        }

        #[test]
        fn test_embedded_frame() {
            let page = Page::new();
            let frame = page.frame("iframe[name='checkout']");
            assert!(!frame.is_main());
            assert_eq!(frame.page(), page);
        }
    }

    mod frame_tests {
        use super::*;

        #[test]
        fn test_document_expr_main() {
            let page = Page::new();
            assert_eq!(page.main_frame().document_expr(), "document");
        }

        #[test]
        fn test_document_expr_nested() {
            let page = Page::new();
            let frame = page.frame("iframe#outer").enter("iframe#inner");
            let expr = frame.document_expr();
            assert!(expr.starts_with("document.querySelector(\"iframe#outer\")"));
            assert!(expr.contains("iframe#inner"));
            assert_eq!(expr.matches("contentDocument").count(), 2);
        }

        #[test]
        fn test_enter_does_not_mutate() {
            let page = Page::new();
            let frame = page.main_frame();
            let _child = frame.enter("iframe");
            assert!(frame.is_main());
        }
    }

    mod handle_tests {
        use super::*;

        #[test]
        fn test_discrimination() {
            let page = Page::new();
            assert!(Handle::from(page.clone()).is_page());
            assert!(Handle::from(page.main_frame()).is_frame());
            assert!(Handle::from(page.frame_locator("iframe")).is_frame_locator());
            assert!(Handle::from(page.locator("div")).is_locator());
        }

        #[test]
        fn test_discrimination_is_exclusive() {
            let handle = Handle::from(Page::new().locator("div"));
            assert!(handle.is_locator());
            assert!(!handle.is_page());
            assert!(!handle.is_frame());
            assert!(!handle.is_frame_locator());
        }

        #[test]
        fn test_owning_frame_of_page_is_main() {
            let page = Page::new();
            let frame = Handle::from(page.clone()).owning_frame();
            assert!(frame.is_main());
            assert_eq!(frame, page.main_frame());
        }

        #[test]
        fn test_owning_frame_of_frame_is_identity() {
            let frame = Page::new().frame("iframe#inner");
            assert_eq!(Handle::from(frame.clone()).owning_frame(), frame);
        }

        #[test]
        fn test_owning_frame_of_locator() {
            let frame = Page::new().frame("iframe#inner");
            let locator = frame.locator("button");
            assert_eq!(Handle::from(locator).owning_frame(), frame);
        }

        #[test]
        fn test_owning_frame_of_frame_locator_is_outer() {
            let frame = Page::new().main_frame();
            let frame_locator = frame.frame_locator("iframe#inner");
            // The frame locator lives in the frame that contains the iframe
            // element, not in the document it crosses into.
            assert_eq!(Handle::from(frame_locator).owning_frame(), frame);
        }

        #[test]
        fn test_page_accessor_agrees_across_variants() {
            let page = Page::new();
            let locator = page.frame("iframe").locator("div");
            assert_eq!(Handle::from(locator).page(), page);
            assert_eq!(Handle::from(page.clone()).page(), page);
        }

        #[test]
        fn test_locator_dispatch_scopes_under_handle() {
            let page = Page::new();
            let outer = Handle::from(page.locator("div"));
            let inner = outer.locator("p");
            let query = inner.to_query();
            assert!(query.contains("\"div\""));
            assert!(query.contains("\"p\""));
        }
    }
}
