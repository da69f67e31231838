//! Page-object collections: reusable classes of lazily-resolved element
//! accessors scoped under a root handle.
//!
//! A collection wraps exactly one root [`Handle`], set at construction and
//! never mutated; re-rooting always produces a new instance. Element
//! accessors are ordinary methods calling [`Collection::el`] on every read,
//! so a fresh descriptor is derived from the current root each time —
//! nothing is resolved or cached at construction.
//!
//! Nesting another collection under an element root goes through
//! [`Collection::nest`], which wraps the child in the [`Nested`] decorator
//! so positional selection (`nth`/`first`/`last`) re-roots into a sibling
//! instance of the same concrete type. Frame- and page-rooted nesting goes
//! through [`Collection::nest_within`] and stays plain, since positional
//! selection is undefined on non-element roots. The two root kinds are
//! separate parameter types, so the enhanced/plain choice is made by the
//! overload used at the call site and the decorator is an explicit type
//! rather than a runtime proxy.

use std::ops::Deref;

use crate::handle::{Frame, Handle, Page};
use crate::locator::{FrameLocator, Locator};

/// Options controlling how [`Collection::el_with`] builds a locator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementOptions {
    /// Base the locator on the collection's owning frame instead of its
    /// root, escaping any collection nesting. Useful for UI that is
    /// visually nested but mounted elsewhere in the DOM (portals,
    /// overlays).
    pub portal: bool,
    /// Narrow scope into the embedded frame matched by this selector before
    /// applying the element selector
    pub frame: Option<String>,
}

impl ElementOptions {
    /// Create default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Base the locator on the owning frame instead of the root
    #[must_use]
    pub const fn portal(mut self) -> Self {
        self.portal = true;
        self
    }

    /// Narrow scope into the embedded frame matched by `selector` first
    #[must_use]
    pub fn in_frame(mut self, selector: impl Into<String>) -> Self {
        self.frame = Some(selector.into());
        self
    }
}

/// Root specification for element-rooted nesting: a selector resolved
/// against the parent collection, or an existing locator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementRoot {
    /// A selector string, resolved via the parent collection's `el`
    Selector(String),
    /// An already-resolved element locator
    Locator(Locator),
}

impl From<&str> for ElementRoot {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_string())
    }
}

impl From<String> for ElementRoot {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

impl From<Locator> for ElementRoot {
    fn from(locator: Locator) -> Self {
        Self::Locator(locator)
    }
}

/// Root specification for frame- or page-rooted nesting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeRoot {
    /// A scope crossing into an embedded frame
    FrameLocator(FrameLocator),
    /// A concrete frame
    Frame(Frame),
    /// A whole page
    Page(Page),
}

impl From<FrameLocator> for ScopeRoot {
    fn from(frame_locator: FrameLocator) -> Self {
        Self::FrameLocator(frame_locator)
    }
}

impl From<Frame> for ScopeRoot {
    fn from(frame: Frame) -> Self {
        Self::Frame(frame)
    }
}

impl From<Page> for ScopeRoot {
    fn from(page: Page) -> Self {
        Self::Page(page)
    }
}

impl From<ScopeRoot> for Handle {
    fn from(root: ScopeRoot) -> Self {
        match root {
            ScopeRoot::FrameLocator(frame_locator) => Self::FrameLocator(frame_locator),
            ScopeRoot::Frame(frame) => Self::Frame(frame),
            ScopeRoot::Page(page) => Self::Page(page),
        }
    }
}

/// A page-object collection rooted at a single [`Handle`].
///
/// Implementors provide construction from a root and access to it; element
/// accessors, frame/page resolution and nesting come as provided methods.
///
/// # Example
///
/// ```
/// use conjunto::{Collection, Handle, Locator, Nested, Page};
///
/// struct TodoItem {
///     root: Handle,
/// }
///
/// impl Collection for TodoItem {
///     fn from_root(root: Handle) -> Self {
///         Self { root }
///     }
///
///     fn root(&self) -> &Handle {
///         &self.root
///     }
/// }
///
/// impl TodoItem {
///     fn label(&self) -> Locator {
///         self.el("label")
///     }
/// }
///
/// struct TodoList {
///     root: Handle,
/// }
///
/// impl Collection for TodoList {
///     fn from_root(root: Handle) -> Self {
///         Self { root }
///     }
///
///     fn root(&self) -> &Handle {
///         &self.root
///     }
/// }
///
/// impl TodoList {
///     fn items(&self) -> Nested<TodoItem> {
///         self.nest("li.todo")
///     }
/// }
///
/// let page = Page::new();
/// let list = TodoList::from_root(page.locator("ul#todos").into());
/// let second_label = list.items().nth(1).label();
/// assert!(second_label.to_query().contains("\"label\""));
/// ```
pub trait Collection {
    /// Construct an instance rooted at `root`. Must perform no I/O.
    fn from_root(root: Handle) -> Self
    where
        Self: Sized;

    /// The root this collection is scoped under
    fn root(&self) -> &Handle;

    /// A locator for `selector` scoped under this collection's root.
    ///
    /// Re-derived from the current root on every call; accessors built on
    /// this stay valid across re-rooting and DOM mutation because nothing
    /// is resolved until the engine evaluates the descriptor.
    fn el(&self, selector: &str) -> Locator {
        self.el_with(selector, &ElementOptions::default())
    }

    /// Like [`Collection::el`], with options.
    ///
    /// With `portal` the locator is based on the owning [`Frame`] rather
    /// than the root. With `frame` the scope first crosses into the matched
    /// embedded frame, then applies `selector` inside it.
    fn el_with(&self, selector: &str, options: &ElementOptions) -> Locator {
        let base: Handle = if options.portal {
            self.frame().into()
        } else {
            self.root().clone()
        };

        match &options.frame {
            Some(frame_selector) => base.frame_locator(frame_selector.as_str()).locator(selector),
            None => base.locator(selector),
        }
    }

    /// The frame this collection is attached to: the owning frame for a
    /// locator or frame-locator root, the main frame for a page root, the
    /// frame itself for a frame root
    fn frame(&self) -> Frame {
        self.root().owning_frame()
    }

    /// The page this collection is attached to
    fn page(&self) -> Page {
        self.frame().page()
    }

    /// Nest a collection under an element root.
    ///
    /// A selector root is resolved via this collection's own [`el`]
    /// (scoping it under this collection); a locator root is used as-is.
    /// The child is always returned enhanced, since an element root
    /// supports positional selection.
    ///
    /// [`el`]: Collection::el
    fn nest<C>(&self, root: impl Into<ElementRoot>) -> Nested<C>
    where
        Self: Sized,
        C: Collection,
    {
        let locator = match root.into() {
            ElementRoot::Selector(selector) => self.el(&selector),
            ElementRoot::Locator(locator) => locator,
        };
        Nested::rooted(locator)
    }

    /// Nest a collection under a frame, frame-locator, or page root.
    ///
    /// The child is returned plain — positional selection is undefined on
    /// non-element roots, so no enhancement applies.
    fn nest_within<C>(&self, root: impl Into<ScopeRoot>) -> C
    where
        Self: Sized,
        C: Collection,
    {
        C::from_root(root.into().into())
    }
}

/// Enhancement decorator for element-rooted nested collections.
///
/// Adds positional selection on top of a collection whose root is an
/// element [`Locator`]: `nth`, `first` and `last` each produce a new
/// `Nested<C>` of the same concrete `C`, re-rooted at the selected match.
/// Everything else delegates transparently to the wrapped collection via
/// `Deref`, so an enhanced instance behaves exactly like the plain one for
/// every other operation.
#[derive(Debug, Clone)]
pub struct Nested<C> {
    root: Locator,
    inner: C,
}

impl<C: Collection> Nested<C> {
    /// Construct the wrapped collection from an element root and enhance it
    #[must_use]
    pub fn rooted(root: Locator) -> Self {
        let inner = C::from_root(Handle::Locator(root.clone()));
        Self { root, inner }
    }

    /// The element root this instance is scoped under
    #[must_use]
    pub fn root_locator(&self) -> &Locator {
        &self.root
    }

    /// A sibling instance re-rooted at the Nth match (0-based)
    #[must_use]
    pub fn nth(&self, index: usize) -> Nested<C> {
        Self::rooted(self.root.nth(index))
    }

    /// A sibling instance re-rooted at the first match
    #[must_use]
    pub fn first(&self) -> Nested<C> {
        self.nth(0)
    }

    /// A sibling instance re-rooted at the last match
    #[must_use]
    pub fn last(&self) -> Nested<C> {
        Self::rooted(self.root.last())
    }

    /// A reference to the wrapped collection
    #[must_use]
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Unwrap into the plain collection
    #[must_use]
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C> Deref for Nested<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.inner
    }
}
