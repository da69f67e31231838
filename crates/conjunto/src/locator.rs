//! Locator descriptors: lazily-evaluated, frame-scoped element queries.
//!
//! A [`Locator`] never touches a browser. It is a pure description of "which
//! elements" — an owning [`Frame`] plus a chain of scope steps — that the
//! evaluation layer renders to a JavaScript query expression on demand.
//! Composition is synchronous and allocation-only; all waiting, querying and
//! failure happens later, in the engine, when the rendered query runs.
//!
//! Scoping is structural: narrowing a locator appends a step that queries
//! under every current match, so a derived locator can never select outside
//! its parent's subtree.

use crate::handle::Frame;

/// One step of a locator's scope chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeStep {
    /// Narrow to descendants matching a CSS selector
    Descend(String),
    /// Cross into the document of an embedded frame matching a selector
    EnterFrame(String),
    /// Keep only the Nth current match (0-based)
    Nth(usize),
    /// Keep only the last current match
    Last,
}

/// An element locator: an owning frame plus a scope chain.
///
/// Selector strings are opaque to this crate; they are handed to the engine
/// verbatim and never validated or parsed here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    frame: Frame,
    steps: Vec<ScopeStep>,
}

impl Locator {
    pub(crate) fn rooted(frame: Frame, steps: Vec<ScopeStep>) -> Self {
        Self { frame, steps }
    }

    /// The frame this locator was built under.
    ///
    /// This stays the outer frame even when the scope chain crosses into an
    /// embedded frame, matching the engine's owning-frame semantics.
    #[must_use]
    pub fn frame(&self) -> Frame {
        self.frame.clone()
    }

    /// The scope chain
    #[must_use]
    pub fn steps(&self) -> &[ScopeStep] {
        &self.steps
    }

    /// Narrow to descendants of every current match
    #[must_use]
    pub fn locator(&self, selector: impl Into<String>) -> Locator {
        self.push(ScopeStep::Descend(selector.into()))
    }

    /// Cross into the embedded frame matched by `selector` under the current
    /// matches
    #[must_use]
    pub fn frame_locator(&self, selector: impl Into<String>) -> FrameLocator {
        let narrowed = self.push(ScopeStep::EnterFrame(selector.into()));
        FrameLocator::rooted(narrowed.frame, narrowed.steps)
    }

    /// Keep only the Nth current match (0-based)
    #[must_use]
    pub fn nth(&self, index: usize) -> Locator {
        self.push(ScopeStep::Nth(index))
    }

    /// Keep only the first current match
    #[must_use]
    pub fn first(&self) -> Locator {
        self.nth(0)
    }

    /// Keep only the last current match
    #[must_use]
    pub fn last(&self) -> Locator {
        self.push(ScopeStep::Last)
    }

    fn push(&self, step: ScopeStep) -> Locator {
        let mut steps = self.steps.clone();
        steps.push(step);
        Locator {
            frame: self.frame.clone(),
            steps,
        }
    }

    /// Render the JavaScript expression for the list of matching elements
    #[must_use]
    pub fn to_list_query(&self) -> String {
        render_list(&self.frame, &self.steps)
    }

    /// Render the JavaScript expression for the first matching element
    #[must_use]
    pub fn to_query(&self) -> String {
        format!("({})[0]", self.to_list_query())
    }

    /// Render the JavaScript expression counting matching elements
    #[must_use]
    pub fn to_count_query(&self) -> String {
        format!("({}).length", self.to_list_query())
    }

    /// Render the JavaScript expression for the first match's text content,
    /// or `null` when nothing matches
    #[must_use]
    pub fn to_text_query(&self) -> String {
        format!("(({})[0] ?? {{}}).textContent ?? null", self.to_list_query())
    }
}

/// A scope crossing into an embedded frame's document.
///
/// Produced by `frame_locator` calls; its chain always ends in an
/// enter-frame step, so it denotes documents rather than elements and does
/// not support positional selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLocator {
    frame: Frame,
    steps: Vec<ScopeStep>,
}

impl FrameLocator {
    pub(crate) fn rooted(frame: Frame, steps: Vec<ScopeStep>) -> Self {
        Self { frame, steps }
    }

    /// The frame this scope was built under (the outer frame containing the
    /// iframe element)
    #[must_use]
    pub fn frame(&self) -> Frame {
        self.frame.clone()
    }

    /// A locator for `selector` inside the crossed-into document
    #[must_use]
    pub fn locator(&self, selector: impl Into<String>) -> Locator {
        let mut steps = self.steps.clone();
        steps.push(ScopeStep::Descend(selector.into()));
        Locator::rooted(self.frame.clone(), steps)
    }

    /// A frame locator crossing one level deeper
    #[must_use]
    pub fn frame_locator(&self, selector: impl Into<String>) -> FrameLocator {
        let mut steps = self.steps.clone();
        steps.push(ScopeStep::EnterFrame(selector.into()));
        FrameLocator::rooted(self.frame.clone(), steps)
    }
}

/// Render a scope chain to a JavaScript array expression.
///
/// The expression starts from the frame's document and folds each step into
/// an array transformation, so positional steps always apply to the match
/// list produced by the steps before them. A descend step can reach the
/// same element through several matching ancestors, so every
/// element-producing step is deduped; counts and positional indexes then
/// see each matching element exactly once.
fn render_list(frame: &Frame, steps: &[ScopeStep]) -> String {
    let mut expr = format!("[{}]", frame.document_expr());
    for step in steps {
        expr = match step {
            ScopeStep::Descend(selector) => format!(
                "Array.from(new Set({expr}.flatMap((el) => Array.from(el.querySelectorAll({selector:?})))))"
            ),
            ScopeStep::EnterFrame(selector) => format!(
                "Array.from(new Set({expr}.flatMap((el) => Array.from(el.querySelectorAll({selector:?}))).map((el) => el.contentDocument)))"
            ),
            ScopeStep::Nth(index) => {
                format!("{expr}.slice({index}, {})", index.saturating_add(1))
            }
            ScopeStep::Last => format!("{expr}.slice(-1)"),
        };
    }
    expr
}
