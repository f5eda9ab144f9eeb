//! Document access.
//!
//! Everything the storefront does to the page goes through [`Dom`]. The
//! browser implementation lives in the wasm crate; tests use
//! [`crate::testing::MockDom`].

use crate::error::DomError;

/// Handle to the live document plus the few window facilities the page uses
/// (confirm dialogs, location, timers).
///
/// Implementations are cheap to clone: scheduled callbacks capture a clone.
pub trait Dom: Clone + 'static {
    type Element: Clone + 'static;

    // ── Lookup ──

    fn by_id(&self, id: &str) -> Option<Self::Element>;
    fn query(&self, selector: &str) -> Option<Self::Element>;
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;
    fn query_all_within(&self, parent: &Self::Element, selector: &str) -> Vec<Self::Element>;
    fn body(&self) -> Option<Self::Element>;
    fn head(&self) -> Option<Self::Element>;

    // ── Mutation ──

    fn create_element(&self, tag: &str) -> Result<Self::Element, DomError>;
    /// Replaces all children with a single text node.
    fn set_text(&self, el: &Self::Element, text: &str);
    fn set_class_name(&self, el: &Self::Element, class: &str);
    /// Returns whether the class is present afterwards.
    fn toggle_class(&self, el: &Self::Element, class: &str) -> bool;
    fn set_attribute(&self, el: &Self::Element, name: &str, value: &str);
    fn set_style(&self, el: &Self::Element, property: &str, value: &str);
    /// Current value of an input, select or textarea; empty for anything else.
    fn value(&self, el: &Self::Element) -> String;
    /// Insert `child` before the first child of `parent`.
    fn prepend_child(&self, parent: &Self::Element, child: &Self::Element)
    -> Result<(), DomError>;
    fn append_child(&self, parent: &Self::Element, child: &Self::Element)
    -> Result<(), DomError>;
    /// Detach from the document. Removing a detached element is a no-op.
    fn remove(&self, el: &Self::Element);

    // ── Events ──

    fn click(&self, el: &Self::Element);
    fn on_click(&self, el: &Self::Element, handler: Box<dyn FnMut()>);

    // ── Window ──

    fn confirm(&self, message: &str) -> bool;
    fn location_href(&self) -> String;
    /// Full page navigation.
    fn navigate(&self, href: &str);
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>);
}
