//! In-memory [`Dom`] for tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use untick_cdp::CdpError;

use crate::dom::{Dom, ScrollMetrics};
use crate::error::DomError;
use crate::selector::Selector;

pub type NodeId = usize;

/// What a click on a node does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OnClick {
    /// Browser-like default: inputs toggle, labels toggle their input,
    /// `role="checkbox"` flips `aria-checked`, other elements do nothing.
    Default,
    /// A row handler: toggles the first checkbox below the node.
    ToggleFirstCheckbox,
    /// The page swallows the click and nothing changes.
    Ignore,
    /// The handler throws.
    Fail,
    /// The page re-renders and drops the given subtree; the clicked node
    /// itself does not change.
    Detach(NodeId),
    /// The browser goes away; every later element operation fails.
    Disconnect,
}

#[derive(Debug, Clone)]
pub struct FakeNode {
    tag: String,
    attrs: HashMap<String, String>,
    checked: bool,
    overflow_y: String,
    scroll_height: f64,
    client_height: f64,
    on_click: OnClick,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attached: bool,
}

impl FakeNode {
    pub fn element(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: HashMap::new(),
            checked: false,
            overflow_y: "visible".to_string(),
            scroll_height: 100.0,
            client_height: 100.0,
            on_click: OnClick::Default,
            parent: None,
            children: Vec::new(),
            attached: true,
        }
    }

    /// `<input type="checkbox">`.
    pub fn checkbox(checked: bool) -> Self {
        let mut node = Self::element("input").attr("type", "checkbox");
        node.checked = checked;
        node
    }

    /// `<div role="checkbox" aria-checked=...>`.
    pub fn aria_checkbox(checked: bool) -> Self {
        Self::element("div")
            .attr("role", "checkbox")
            .attr("aria-checked", if checked { "true" } else { "false" })
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn scrollable(mut self, overflow_y: &str, scroll_height: f64, client_height: f64) -> Self {
        self.overflow_y = overflow_y.to_string();
        self.scroll_height = scroll_height;
        self.client_height = client_height;
        self
    }

    pub fn on_click(mut self, on_click: OnClick) -> Self {
        self.on_click = on_click;
        self
    }

    fn attr_is(&self, name: &str, value: &str) -> bool {
        self.attrs.get(name).map(String::as_str) == Some(value)
    }

    fn is_native_checkbox(&self) -> bool {
        self.tag == "input" && self.attr_is("type", "checkbox")
    }

    fn matches(&self, selector: Selector) -> bool {
        match selector {
            Selector::CheckedNativeCheckbox => self.is_native_checkbox() && self.checked,
            Selector::NativeCheckbox => self.is_native_checkbox(),
            Selector::CheckedAriaCheckbox => {
                self.attr_is("role", "checkbox") && self.attr_is("aria-checked", "true")
            }
            Selector::AriaCheckbox => self.attr_is("role", "checkbox"),
            Selector::AriaChecked => self.attr_is("aria-checked", "true"),
            Selector::Label => self.tag == "label",
            Selector::Main => self.tag == "main",
            Selector::RoleMain => self.attr_is("role", "main"),
            Selector::Block => self.tag == "div" || self.tag == "section",
        }
    }
}

/// Something the fake observed, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum FakeEvent {
    Click(NodeId),
    Scroll(NodeId, f64),
}

struct FakeState {
    nodes: Vec<FakeNode>,
    root: NodeId,
    body: NodeId,
    scrolling_element: Option<NodeId>,
    events: Vec<FakeEvent>,
    /// Rows mounted by successive scrolls: (parent, checked labelled rows).
    batches: VecDeque<(NodeId, usize)>,
    /// Rows from the last batch, unmounted on the next scroll.
    mounted: Vec<NodeId>,
    disconnected: bool,
}

impl FakeState {
    fn node(&self, id: NodeId) -> Result<&FakeNode, DomError> {
        if self.disconnected {
            return Err(DomError::Cdp(CdpError::SessionClosed));
        }
        match self.nodes.get(id) {
            Some(node) if node.attached => Ok(node),
            _ => Err(DomError::Detached(format!("fake node {}", id))),
        }
    }

    fn append(&mut self, parent: NodeId, mut node: FakeNode) -> NodeId {
        let id = self.nodes.len();
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent].children.push(id);
        id
    }

    fn document_order(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id].children.iter().rev());
        }
        order
    }

    fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[id].children.iter().rev().copied().collect();
        while let Some(child) = stack.pop() {
            out.push(child);
            stack.extend(self.nodes[child].children.iter().rev());
        }
        out
    }

    fn toggle(&mut self, id: NodeId) {
        let node = &mut self.nodes[id];
        if node.is_native_checkbox() {
            node.checked = !node.checked;
        } else if node.attrs.contains_key("aria-checked") {
            let next = if node.attr_is("aria-checked", "true") { "false" } else { "true" };
            node.attrs.insert("aria-checked".to_string(), next.to_string());
        }
    }

    fn first_checkbox_below(&self, id: NodeId) -> Option<NodeId> {
        self.descendants(id)
            .into_iter()
            .find(|&d| self.nodes[d].is_native_checkbox())
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id].parent {
            self.nodes[parent].children.retain(|&c| c != id);
        }
        for d in self.descendants(id) {
            self.nodes[d].attached = false;
        }
        self.nodes[id].attached = false;
    }

    fn mount_next_batch(&mut self) {
        let Some((parent, count)) = self.batches.pop_front() else {
            return;
        };
        for row in std::mem::take(&mut self.mounted) {
            self.detach(row);
        }
        for _ in 0..count {
            let row = self.append(parent, FakeNode::element("div").attr("class", "row"));
            let label = self.append(row, FakeNode::element("label"));
            self.append(label, FakeNode::checkbox(true));
            self.mounted.push(row);
        }
    }
}

/// Shared handle to an in-memory `<html><body>` document.
#[derive(Clone)]
pub struct FakeDom {
    state: Arc<Mutex<FakeState>>,
}

impl FakeDom {
    /// `<html><body></body></html>` whose root is also the scrolling element.
    pub fn new() -> Self {
        let root = FakeNode::element("html").scrollable("visible", 800.0, 800.0);
        let mut state = FakeState {
            nodes: vec![root],
            root: 0,
            body: 0,
            scrolling_element: Some(0),
            events: Vec::new(),
            batches: VecDeque::new(),
            mounted: Vec::new(),
            disconnected: false,
        };
        state.body = state.append(0, FakeNode::element("body"));
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn root(&self) -> NodeId {
        self.state.lock().root
    }

    pub fn body(&self) -> NodeId {
        self.state.lock().body
    }

    pub fn append(&self, parent: NodeId, node: FakeNode) -> NodeId {
        self.state.lock().append(parent, node)
    }

    pub fn set_scrolling_element(&self, node: Option<NodeId>) {
        self.state.lock().scrolling_element = node;
    }

    /// Mount `count` checked rows under `parent` on the next scroll,
    /// unmounting the rows of the previous batch.
    pub fn push_batch(&self, parent: NodeId, count: usize) {
        self.state.lock().batches.push_back((parent, count));
    }

    /// Mount the next batch right away.
    pub fn mount_next_batch(&self) {
        self.state.lock().mount_next_batch();
    }

    pub fn is_checked(&self, id: NodeId) -> bool {
        let state = self.state.lock();
        let node = &state.nodes[id];
        node.checked || node.attr_is("aria-checked", "true")
    }

    pub fn events(&self) -> Vec<FakeEvent> {
        self.state.lock().events.clone()
    }

    pub fn clicks(&self) -> Vec<NodeId> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                FakeEvent::Click(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn scrolls(&self) -> Vec<(NodeId, f64)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                FakeEvent::Scroll(id, dy) => Some((id, dy)),
                _ => None,
            })
            .collect()
    }

    /// Clicks between consecutive scrolls, one entry per scroll plus the tail.
    pub fn clicks_per_scroll(&self) -> Vec<usize> {
        let mut out = vec![0];
        for event in self.events() {
            match event {
                FakeEvent::Click(_) => *out.last_mut().unwrap() += 1,
                FakeEvent::Scroll(..) => out.push(0),
            }
        }
        out
    }
}

#[async_trait]
impl Dom for FakeDom {
    type Node = NodeId;

    async fn query_all(&self, selector: Selector) -> Result<Vec<NodeId>, DomError> {
        let state = self.state.lock();
        Ok(state
            .document_order()
            .into_iter()
            .filter(|&id| state.nodes[id].matches(selector))
            .collect())
    }

    async fn query_first(&self, selector: Selector) -> Result<Option<NodeId>, DomError> {
        Ok(self.query_all(selector).await?.into_iter().next())
    }

    async fn matches(&self, node: &NodeId, selector: Selector) -> Result<bool, DomError> {
        Ok(self.state.lock().node(*node)?.matches(selector))
    }

    async fn closest(&self, node: &NodeId, selector: Selector) -> Result<Option<NodeId>, DomError> {
        let state = self.state.lock();
        let mut current = Some(*node);
        while let Some(id) = current {
            let n = state.node(id)?;
            if n.matches(selector) {
                return Ok(Some(id));
            }
            current = n.parent;
        }
        Ok(None)
    }

    async fn parent(&self, node: &NodeId) -> Result<Option<NodeId>, DomError> {
        Ok(self.state.lock().node(*node)?.parent)
    }

    async fn click(&self, node: &NodeId) -> Result<(), DomError> {
        let mut state = self.state.lock();
        let on_click = state.node(*node)?.on_click;
        state.events.push(FakeEvent::Click(*node));

        match on_click {
            OnClick::Fail => return Err(DomError::Script("click handler threw".to_string())),
            OnClick::Ignore => {}
            OnClick::Detach(target) => state.detach(target),
            OnClick::Disconnect => state.disconnected = true,
            OnClick::ToggleFirstCheckbox => {
                if let Some(input) = state.first_checkbox_below(*node) {
                    state.toggle(input);
                }
            }
            OnClick::Default => {
                let n = &state.nodes[*node];
                let (is_input, is_label, is_role) =
                    (n.is_native_checkbox(), n.tag == "label", n.attr_is("role", "checkbox"));
                if is_input {
                    state.toggle(*node);
                } else if is_label {
                    if let Some(input) = state.first_checkbox_below(*node) {
                        state.toggle(input);
                    }
                } else if is_role {
                    state.toggle(*node);
                    if let Some(input) = state.first_checkbox_below(*node) {
                        state.toggle(input);
                    }
                }
            }
        }
        Ok(())
    }

    async fn scroll_metrics(&self, node: &NodeId) -> Result<ScrollMetrics, DomError> {
        let state = self.state.lock();
        let n = state.node(*node)?;
        Ok(ScrollMetrics {
            overflow_y: n.overflow_y.clone(),
            scroll_height: n.scroll_height,
            client_height: n.client_height,
        })
    }

    async fn scrolling_element(&self) -> Result<Option<NodeId>, DomError> {
        Ok(self.state.lock().scrolling_element)
    }

    async fn document_element(&self) -> Result<NodeId, DomError> {
        Ok(self.state.lock().root)
    }

    async fn scroll_by(&self, node: &NodeId, _dx: f64, dy: f64) -> Result<(), DomError> {
        let mut state = self.state.lock();
        state.node(*node)?;
        state.events.push(FakeEvent::Scroll(*node, dy));
        state.mount_next_batch();
        Ok(())
    }

    async fn describe(&self, node: &NodeId) -> Result<String, DomError> {
        Ok(self.state.lock().node(*node)?.tag.clone())
    }
}
