//! Headless doubles for [`Dom`] and [`Transport`].
//!
//! `MockDom` keeps a small element tree, a manual clock for timers, and a log
//! of navigations and confirm prompts. Selector support covers what the
//! storefront uses: `tag`, `#id`, `.class`, `[attr]`, `[attr="value"]` and
//! compounds of those.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use serde::Serialize;
use sf_api_types::{FileMeta, UploadKind};

use crate::dom::Dom;
use crate::error::{DomError, TransportError};
use crate::transport::{Reply, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

const ROOT: NodeId = NodeId(0);
const HEAD: NodeId = NodeId(1);
const BODY: NodeId = NodeId(2);

type Listener = Rc<RefCell<Box<dyn FnMut()>>>;

#[derive(Default)]
struct Node {
    tag: String,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    text: String,
    value: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    listeners: Vec<Listener>,
}

struct Timer {
    due: u64,
    seq: u64,
    callback: Box<dyn FnOnce()>,
}

struct Inner {
    nodes: Vec<Node>,
    href: String,
    navigations: Vec<String>,
    prompts: Vec<String>,
    confirm_answer: bool,
    now: u64,
    next_seq: u64,
    timers: Vec<Timer>,
}

#[derive(Clone)]
pub struct MockDom {
    inner: Rc<RefCell<Inner>>,
}

impl Default for MockDom {
    fn default() -> Self {
        Self::new("https://shop.test/products")
    }
}

impl MockDom {
    /// An empty `<html><head/><body/></html>` document at `href`.
    pub fn new(href: &str) -> Self {
        let mut nodes = vec![
            Node {
                tag: "html".to_owned(),
                ..Node::default()
            },
            Node {
                tag: "head".to_owned(),
                parent: Some(ROOT),
                ..Node::default()
            },
            Node {
                tag: "body".to_owned(),
                parent: Some(ROOT),
                ..Node::default()
            },
        ];
        nodes[0].children = vec![HEAD, BODY];
        Self {
            inner: Rc::new(RefCell::new(Inner {
                nodes,
                href: href.to_owned(),
                navigations: Vec::new(),
                prompts: Vec::new(),
                confirm_answer: true,
                now: 0,
                next_seq: 0,
                timers: Vec::new(),
            })),
        }
    }

    pub fn body_id(&self) -> NodeId {
        BODY
    }

    /// Append a new element under `parent`. `id` and `class` attributes are
    /// interpreted the way the browser would.
    pub fn add(&self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let el = self.new_node(tag);
        for (name, value) in attrs {
            self.set_attribute(&el, name, value);
        }
        self.attach(parent, el, false);
        el
    }

    pub fn set_value(&self, el: NodeId, value: &str) {
        self.inner.borrow_mut().nodes[el.0].value = value.to_owned();
    }

    /// Answer given to every subsequent `confirm()`.
    pub fn answer_confirm(&self, answer: bool) {
        self.inner.borrow_mut().confirm_answer = answer;
    }

    pub fn navigations(&self) -> Vec<String> {
        self.inner.borrow().navigations.clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.inner.borrow().prompts.clone()
    }

    pub fn now(&self) -> u64 {
        self.inner.borrow().now
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Move the clock forward, firing due timers in order. Timers scheduled
    /// by a callback fire too if they fall inside the window.
    pub fn advance(&self, ms: u64) {
        let target = self.inner.borrow().now + ms;
        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                let due = inner
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(idx, _)| idx);
                due.map(|idx| {
                    let timer = inner.timers.remove(idx);
                    inner.now = timer.due;
                    timer.callback
                })
            };
            match next {
                Some(callback) => callback(),
                None => break,
            }
        }
        self.inner.borrow_mut().now = target;
    }

    pub fn is_attached(&self, el: NodeId) -> bool {
        let inner = self.inner.borrow();
        let mut cur = el;
        loop {
            if cur == ROOT {
                return true;
            }
            match inner.nodes[cur.0].parent {
                Some(parent) => cur = parent,
                None => return false,
            }
        }
    }

    pub fn has_class(&self, el: NodeId, class: &str) -> bool {
        self.inner.borrow().nodes[el.0]
            .classes
            .iter()
            .any(|c| c == class)
    }

    pub fn class_name(&self, el: NodeId) -> String {
        self.inner.borrow().nodes[el.0].classes.join(" ")
    }

    pub fn style(&self, el: NodeId, property: &str) -> Option<String> {
        self.inner.borrow().nodes[el.0].styles.get(property).cloned()
    }

    pub fn attribute(&self, el: NodeId, name: &str) -> Option<String> {
        self.inner.borrow().nodes[el.0].attrs.get(name).cloned()
    }

    pub fn tag(&self, el: NodeId) -> String {
        self.inner.borrow().nodes[el.0].tag.clone()
    }

    pub fn children(&self, el: NodeId) -> Vec<NodeId> {
        self.inner.borrow().nodes[el.0].children.clone()
    }

    /// Own text followed by the text of every descendant, like `textContent`.
    pub fn text_content(&self, el: NodeId) -> String {
        let inner = self.inner.borrow();
        let mut out = String::new();
        collect_text(&inner.nodes, el, &mut out);
        out
    }

    fn new_node(&self, tag: &str) -> NodeId {
        let mut inner = self.inner.borrow_mut();
        inner.nodes.push(Node {
            tag: tag.to_ascii_lowercase(),
            ..Node::default()
        });
        NodeId(inner.nodes.len() - 1)
    }

    fn detach(inner: &mut Inner, el: NodeId) {
        if let Some(parent) = inner.nodes[el.0].parent.take() {
            inner.nodes[parent.0].children.retain(|c| *c != el);
        }
    }

    fn attach(&self, parent: NodeId, child: NodeId, first: bool) {
        let mut inner = self.inner.borrow_mut();
        Self::detach(&mut inner, child);
        inner.nodes[child.0].parent = Some(parent);
        let children = &mut inner.nodes[parent.0].children;
        if first {
            children.insert(0, child);
        } else {
            children.push(child);
        }
    }

    fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let inner = self.inner.borrow();
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = inner.nodes[from.0].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(inner.nodes[id.0].children.iter().rev().copied());
        }
        out
    }

    fn matching(&self, from: NodeId, selector: &str) -> Vec<NodeId> {
        let selector = Selector::parse(selector);
        let candidates = self.descendants(from);
        let inner = self.inner.borrow();
        candidates
            .into_iter()
            .filter(|id| selector.matches(&inner.nodes[id.0]))
            .collect()
    }
}

fn collect_text(nodes: &[Node], el: NodeId, out: &mut String) {
    out.push_str(&nodes[el.0].text);
    for child in &nodes[el.0].children {
        collect_text(nodes, *child, out);
    }
}

#[derive(Debug, Default)]
struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
}

impl Selector {
    fn parse(raw: &str) -> Self {
        let mut sel = Selector::default();
        let mut rest = raw.trim();
        let tag_end = rest.find(['#', '.', '[']).unwrap_or(rest.len());
        if tag_end > 0 {
            sel.tag = Some(rest[..tag_end].to_ascii_lowercase());
        }
        rest = &rest[tag_end..];
        while let Some(marker) = rest.chars().next() {
            match marker {
                '[' => {
                    let end = rest.find(']').unwrap_or(rest.len());
                    let body = &rest[1..end];
                    match body.split_once('=') {
                        Some((name, value)) => sel.attrs.push((
                            name.trim().to_owned(),
                            Some(value.trim().trim_matches(['"', '\'']).to_owned()),
                        )),
                        None => sel.attrs.push((body.trim().to_owned(), None)),
                    }
                    rest = rest.get(end + 1..).unwrap_or("");
                }
                _ => {
                    let tail = &rest[1..];
                    let end = tail.find(['#', '.', '[']).unwrap_or(tail.len());
                    let name = tail[..end].to_owned();
                    if marker == '#' {
                        sel.id = Some(name);
                    } else {
                        sel.classes.push(name);
                    }
                    rest = &tail[end..];
                }
            }
        }
        sel
    }

    fn matches(&self, node: &Node) -> bool {
        if let Some(tag) = &self.tag {
            if &node.tag != tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if node.attrs.get("id") != Some(id) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| node.classes.contains(c)) {
            return false;
        }
        self.attrs.iter().all(|(name, value)| match value {
            Some(v) => node.attrs.get(name) == Some(v),
            None => node.attrs.contains_key(name),
        })
    }
}

impl Dom for MockDom {
    type Element = NodeId;

    fn by_id(&self, id: &str) -> Option<NodeId> {
        self.query(&format!("#{id}"))
    }

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.matching(ROOT, selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.matching(ROOT, selector)
    }

    fn query_all_within(&self, parent: &NodeId, selector: &str) -> Vec<NodeId> {
        self.matching(*parent, selector)
    }

    fn body(&self) -> Option<NodeId> {
        Some(BODY)
    }

    fn head(&self) -> Option<NodeId> {
        Some(HEAD)
    }

    fn create_element(&self, tag: &str) -> Result<NodeId, DomError> {
        Ok(self.new_node(tag))
    }

    fn set_text(&self, el: &NodeId, text: &str) {
        let children = {
            let mut inner = self.inner.borrow_mut();
            inner.nodes[el.0].text = text.to_owned();
            std::mem::take(&mut inner.nodes[el.0].children)
        };
        let mut inner = self.inner.borrow_mut();
        for child in children {
            inner.nodes[child.0].parent = None;
        }
    }

    fn set_class_name(&self, el: &NodeId, class: &str) {
        self.set_attribute(el, "class", class);
    }

    fn toggle_class(&self, el: &NodeId, class: &str) -> bool {
        let mut inner = self.inner.borrow_mut();
        let node = &mut inner.nodes[el.0];
        let present = if node.classes.iter().any(|c| c == class) {
            node.classes.retain(|c| c != class);
            false
        } else {
            node.classes.push(class.to_owned());
            true
        };
        let joined = node.classes.join(" ");
        node.attrs.insert("class".to_owned(), joined);
        present
    }

    fn set_attribute(&self, el: &NodeId, name: &str, value: &str) {
        let mut inner = self.inner.borrow_mut();
        let node = &mut inner.nodes[el.0];
        if name == "class" {
            node.classes = value.split_whitespace().map(str::to_owned).collect();
        }
        node.attrs.insert(name.to_owned(), value.to_owned());
    }

    fn set_style(&self, el: &NodeId, property: &str, value: &str) {
        self.inner.borrow_mut().nodes[el.0]
            .styles
            .insert(property.to_owned(), value.to_owned());
    }

    fn value(&self, el: &NodeId) -> String {
        let inner = self.inner.borrow();
        let node = &inner.nodes[el.0];
        match node.tag.as_str() {
            "input" | "select" | "textarea" => node.value.clone(),
            _ => String::new(),
        }
    }

    fn prepend_child(&self, parent: &NodeId, child: &NodeId) -> Result<(), DomError> {
        self.attach(*parent, *child, true);
        Ok(())
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<(), DomError> {
        self.attach(*parent, *child, false);
        Ok(())
    }

    fn remove(&self, el: &NodeId) {
        Self::detach(&mut self.inner.borrow_mut(), *el);
    }

    fn click(&self, el: &NodeId) {
        let listeners = self.inner.borrow().nodes[el.0].listeners.clone();
        for listener in listeners {
            let mut handler = listener.borrow_mut();
            (*handler)();
        }
    }

    fn on_click(&self, el: &NodeId, handler: Box<dyn FnMut()>) {
        self.inner.borrow_mut().nodes[el.0]
            .listeners
            .push(Rc::new(RefCell::new(handler)));
    }

    fn confirm(&self, message: &str) -> bool {
        let mut inner = self.inner.borrow_mut();
        inner.prompts.push(message.to_owned());
        inner.confirm_answer
    }

    fn location_href(&self) -> String {
        self.inner.borrow().href.clone()
    }

    fn navigate(&self, href: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.navigations.push(href.to_owned());
        inner.href = href.to_owned();
    }

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        let mut inner = self.inner.borrow_mut();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        let due = inner.now + u64::from(delay_ms);
        inner.timers.push(Timer { due, seq, callback });
    }
}

/// Upload payload recorded by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockUpload {
    pub kind: UploadKind,
    pub file: FileMeta,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Json { url: String, body: serde_json::Value },
    Upload { url: String, upload: MockUpload },
}

/// Replays scripted replies in order and records what was sent.
#[derive(Default)]
pub struct MockTransport {
    replies: RefCell<VecDeque<Result<Reply, TransportError>>>,
    sent: RefCell<Vec<Sent>>,
}

impl MockTransport {
    pub fn replying(status: u16, body: serde_json::Value) -> Self {
        let transport = Self::default();
        transport.push(Ok(Reply { status, body }));
        transport
    }

    pub fn failing(error: TransportError) -> Self {
        let transport = Self::default();
        transport.push(Err(error));
        transport
    }

    pub fn push(&self, reply: Result<Reply, TransportError>) {
        self.replies.borrow_mut().push_back(reply);
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.borrow().clone()
    }

    fn next_reply(&self) -> Result<Reply, TransportError> {
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted reply".to_owned())))
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    type Upload = MockUpload;

    async fn post_json<B>(&self, url: &str, body: &B) -> Result<Reply, TransportError>
    where
        B: Serialize + ?Sized,
    {
        let body =
            serde_json::to_value(body).map_err(|e| TransportError::Encode(e.to_string()))?;
        self.sent.borrow_mut().push(Sent::Json {
            url: url.to_owned(),
            body,
        });
        self.next_reply()
    }

    async fn post_upload(&self, url: &str, upload: MockUpload) -> Result<Reply, TransportError> {
        self.sent.borrow_mut().push(Sent::Upload {
            url: url.to_owned(),
            upload,
        });
        self.next_reply()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compound_selectors_match() {
        let dom = MockDom::default();
        let body = dom.body_id();
        let form = dom.add(body, "form", &[("id", "login")]);
        let user = dom.add(form, "input", &[("name", "user"), ("required", "")]);
        dom.add(form, "input", &[("name", "remember")]);
        let toggle = dom.add(body, "button", &[("data-toggle", "mobile-menu"), ("class", "btn x")]);

        assert_eq!(dom.by_id("login"), Some(form));
        assert_eq!(dom.query_all_within(&form, "[required]"), vec![user]);
        assert_eq!(dom.query(r#"[data-toggle="mobile-menu"]"#), Some(toggle));
        assert_eq!(dom.query("button.btn.x"), Some(toggle));
        assert_eq!(dom.query("input#login"), None);
    }

    #[test]
    fn timers_fire_in_due_order() {
        let dom = MockDom::default();
        let log = Rc::new(RefCell::new(Vec::new()));
        for (delay, tag) in [(300, "b"), (100, "a"), (300, "c")] {
            let log = Rc::clone(&log);
            dom.set_timeout(delay, Box::new(move || log.borrow_mut().push(tag)));
        }
        dom.advance(299);
        assert_eq!(*log.borrow(), vec!["a"]);
        assert_eq!(dom.now(), 299);
        dom.advance(1);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(dom.now(), 300);
        assert_eq!(dom.pending_timers(), 0);
    }

    #[test]
    fn detached_subtree_is_not_queryable() {
        let dom = MockDom::default();
        let outer = dom.add(dom.body_id(), "div", &[("class", "modal")]);
        let inner = dom.add(outer, "span", &[("class", "x")]);
        dom.remove(&outer);
        assert!(!dom.is_attached(inner));
        assert!(dom.query(".x").is_none());
        assert!(dom.query_all(".modal").is_empty());
    }
}
