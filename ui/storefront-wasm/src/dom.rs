//! Browser-backed [`Dom`].
//!
//! Thin adapter over `web_sys`: every method is one or two DOM calls. JS
//! exceptions from calls that cannot meaningfully fail on a live page are
//! logged and dropped.

use gloo_timers::callback::Timeout;
use sf_ui_core::{Dom, DomError};
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
    NodeList, Window,
};

fn js_err(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

fn elements(list: Result<NodeList, JsValue>, selector: &str) -> Vec<Element> {
    let nl = match list {
        Ok(nl) => nl,
        Err(e) => {
            warn!(%selector, error = %js_err(e), "invalid selector");
            return Vec::new();
        }
    };
    let mut v = Vec::new();
    for i in 0..nl.length() {
        if let Some(e) = nl.item(i) {
            if let Ok(el) = e.dyn_into::<Element>() {
                v.push(el);
            }
        }
    }
    v
}

#[derive(Clone)]
pub struct BrowserDom {
    window: Window,
    document: Document,
}

impl BrowserDom {
    pub fn new() -> Self {
        Self {
            window: gloo_utils::window(),
            document: gloo_utils::document(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Default for BrowserDom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom for BrowserDom {
    type Element = Element;

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok()?
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        elements(self.document.query_selector_all(selector), selector)
    }

    fn query_all_within(&self, parent: &Element, selector: &str) -> Vec<Element> {
        elements(parent.query_selector_all(selector), selector)
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Into::into)
    }

    fn head(&self) -> Option<Element> {
        self.document.head().map(Into::into)
    }

    fn create_element(&self, tag: &str) -> Result<Element, DomError> {
        self.document
            .create_element(tag)
            .map_err(|e| DomError::Create {
                tag: tag.to_owned(),
                reason: js_err(e),
            })
    }

    fn set_text(&self, el: &Element, text: &str) {
        el.set_text_content(Some(text));
    }

    fn set_class_name(&self, el: &Element, class: &str) {
        el.set_class_name(class);
    }

    fn toggle_class(&self, el: &Element, class: &str) -> bool {
        el.class_list().toggle(class).unwrap_or(false)
    }

    fn set_attribute(&self, el: &Element, name: &str, value: &str) {
        if let Err(e) = el.set_attribute(name, value) {
            warn!(%name, error = %js_err(e), "set_attribute failed");
        }
    }

    fn set_style(&self, el: &Element, property: &str, value: &str) {
        if let Some(html) = el.dyn_ref::<HtmlElement>() {
            if let Err(e) = html.style().set_property(property, value) {
                warn!(%property, error = %js_err(e), "set_property failed");
            }
        }
    }

    fn value(&self, el: &Element) -> String {
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn prepend_child(&self, parent: &Element, child: &Element) -> Result<(), DomError> {
        parent
            .insert_before(child, parent.first_child().as_ref())
            .map(|_| ())
            .map_err(|e| DomError::Insert(js_err(e)))
    }

    fn append_child(&self, parent: &Element, child: &Element) -> Result<(), DomError> {
        parent
            .append_child(child)
            .map(|_| ())
            .map_err(|e| DomError::Insert(js_err(e)))
    }

    fn remove(&self, el: &Element) {
        el.remove();
    }

    fn click(&self, el: &Element) {
        if let Some(html) = el.dyn_ref::<HtmlElement>() {
            html.click();
        }
    }

    fn on_click(&self, el: &Element, handler: Box<dyn FnMut()>) {
        let mut handler = handler;
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            handler();
        }) as Box<dyn FnMut(web_sys::MouseEvent)>);
        if let Err(e) = el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref()) {
            warn!(error = %js_err(e), "could not attach click listener");
        }
        cb.forget();
    }

    fn confirm(&self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or(false)
    }

    fn location_href(&self) -> String {
        self.window.location().href().unwrap_or_default()
    }

    fn navigate(&self, href: &str) {
        if let Err(e) = self.window.location().set_href(href) {
            warn!(%href, error = %js_err(e), "navigation failed");
        }
    }

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, callback).forget();
    }
}
