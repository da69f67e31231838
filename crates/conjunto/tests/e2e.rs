//! End-to-end checks against a real Chromium.
//!
//! Requires the `browser` feature and a Chromium binary (auto-detected or
//! via CHROMIUM_PATH):
//!
//! ```text
//! cargo test --features browser --test e2e
//! ```

#![cfg(feature = "browser")]
#![allow(clippy::unwrap_used)]

use conjunto::{Browser, BrowserConfig, Collection, Handle, Locator, Nested, Session};

struct RootPage {
    root: Handle,
}

impl Collection for RootPage {
    fn from_root(root: Handle) -> Self {
        Self { root }
    }

    fn root(&self) -> &Handle {
        &self.root
    }
}

impl RootPage {
    fn inner(&self) -> Locator {
        self.el("p")
    }

    fn items(&self) -> Nested<Item> {
        self.nest("li")
    }
}

struct Item {
    root: Handle,
}

impl Collection for Item {
    fn from_root(root: Handle) -> Self {
        Self { root }
    }

    fn root(&self) -> &Handle {
        &self.root
    }
}

impl Item {
    fn label(&self) -> Locator {
        self.el("span")
    }
}

async fn session() -> (Browser, Session) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("conjunto=debug")
        .try_init();
    let browser = Browser::launch(BrowserConfig::default().with_no_sandbox())
        .await
        .unwrap();
    let session = browser.new_session().await.unwrap();
    (browser, session)
}

#[tokio::test]
async fn provides_access_to_the_root_element() {
    let (browser, session) = session().await;
    session
        .set_content("<p>One</p><span>Two</span>")
        .await
        .unwrap();

    let root = session.page().locator("p");
    assert_eq!(session.text_content(&root).await.unwrap(), "One");

    browser.close().await.unwrap();
}

#[tokio::test]
async fn scopes_elements_inside_the_root_element() {
    let (browser, session) = session().await;
    session
        .set_content("<p>Outer</p><div><p>Inner</p></div>")
        .await
        .unwrap();

    let root_page = RootPage::from_root(session.page().locator("div").into());
    assert_eq!(
        session.text_content(&root_page.inner()).await.unwrap(),
        "Inner"
    );

    browser.close().await.unwrap();
}

#[tokio::test]
async fn counts_each_element_once_under_nested_matching_ancestors() {
    let (browser, session) = session().await;
    session
        .set_content("<div><div><p>x</p></div></div>")
        .await
        .unwrap();

    // The single <p> is reachable through both matching ancestors but must
    // be matched once.
    let paragraphs = session.page().locator("div").locator("p");
    assert_eq!(session.count(&paragraphs).await.unwrap(), 1);
    assert!(!session.is_attached(&paragraphs.nth(1)).await.unwrap());
    assert_eq!(session.text_content(&paragraphs).await.unwrap(), "x");

    browser.close().await.unwrap();
}

#[tokio::test]
async fn positional_selection_reroots_nested_collections() {
    let (browser, session) = session().await;
    session
        .set_content(
            "<ul><li><span>a</span></li><li><span>b</span></li><li><span>c</span></li></ul>",
        )
        .await
        .unwrap();

    let root_page = RootPage::from_root(session.page().locator("ul").into());
    let items = root_page.items();

    assert_eq!(session.count(items.root_locator()).await.unwrap(), 3);
    assert_eq!(
        session.text_content(&items.nth(1).label()).await.unwrap(),
        "b"
    );
    assert_eq!(
        session.text_content(&items.first().label()).await.unwrap(),
        "a"
    );
    assert_eq!(
        session.text_content(&items.last().label()).await.unwrap(),
        "c"
    );
    assert!(!session
        .is_attached(&root_page.el("table"))
        .await
        .unwrap());

    browser.close().await.unwrap();
}
