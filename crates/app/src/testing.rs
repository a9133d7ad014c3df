//! Shared test doubles: an in-memory tree and a spy host.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axpulse_domain::element::{Element, ElementAction};
use axpulse_domain::error::DispatchError;

use crate::ports::{ForegroundPresentation, HostPlatform};

#[derive(Debug)]
pub struct NodeData {
    name: &'static str,
    actions: Vec<ElementAction>,
    scrollable: bool,
    clickable: bool,
    children: Vec<Node>,
}

#[derive(Debug, Clone)]
pub struct Node(Arc<NodeData>);

impl Node {
    pub fn with(
        name: &'static str,
        actions: &[ElementAction],
        scrollable: bool,
        clickable: bool,
        children: Vec<Node>,
    ) -> Self {
        Self(Arc::new(NodeData {
            name,
            actions: actions.to_vec(),
            scrollable,
            clickable,
            children,
        }))
    }

    pub fn parent(name: &'static str, children: Vec<Node>) -> Self {
        Self::with(name, &[], false, false, children)
    }

    pub fn scrollable(name: &'static str) -> Self {
        Self::with(
            name,
            &[ElementAction::ScrollForward, ElementAction::ScrollBackward],
            true,
            false,
            Vec::new(),
        )
    }

    pub fn clickable(name: &'static str) -> Self {
        Self::with(name, &[ElementAction::Click], false, true, Vec::new())
    }

    pub fn name(&self) -> &'static str {
        self.0.name
    }
}

impl Element for Node {
    fn child_count(&self) -> usize {
        self.0.children.len()
    }

    fn child(&self, index: usize) -> Option<Self> {
        self.0.children.get(index).cloned()
    }

    fn supports(&self, action: ElementAction) -> bool {
        self.0.actions.contains(&action)
    }

    fn is_scrollable(&self) -> bool {
        self.0.scrollable
    }

    fn is_clickable(&self) -> bool {
        self.0.clickable
    }
}

/// Records every call the engine and service make against the host.
#[derive(Default)]
pub struct SpyHost {
    root: Mutex<Option<Node>>,
    pub root_requests: AtomicUsize,
    pub dispatched: Mutex<Vec<(&'static str, ElementAction)>>,
    pub enters: AtomicUsize,
    pub exits: AtomicUsize,
    /// `true` per enter, `false` per exit, in call order.
    foreground: Mutex<Vec<bool>>,
    pub fail_dispatch: AtomicBool,
}

impl SpyHost {
    pub fn with_root(root: Node) -> Self {
        let host = Self::default();
        *host.root.lock().unwrap() = Some(root);
        host
    }

    pub fn dispatched(&self) -> Vec<(&'static str, ElementAction)> {
        self.dispatched.lock().unwrap().clone()
    }

    pub fn enters(&self) -> usize {
        self.enters.load(Ordering::SeqCst)
    }

    pub fn exits(&self) -> usize {
        self.exits.load(Ordering::SeqCst)
    }

    pub fn foreground_log(&self) -> Vec<bool> {
        self.foreground.lock().unwrap().clone()
    }
}

impl HostPlatform for SpyHost {
    type Element = Node;

    fn active_root(&self) -> Option<Node> {
        self.root_requests.fetch_add(1, Ordering::SeqCst);
        self.root.lock().unwrap().clone()
    }

    fn dispatch(&self, element: &Node, action: ElementAction) -> Result<(), DispatchError> {
        if self.fail_dispatch.load(Ordering::SeqCst) {
            return Err(DispatchError::Detached);
        }
        self.dispatched.lock().unwrap().push((element.name(), action));
        Ok(())
    }

    fn enter_foreground(&self, _presentation: &ForegroundPresentation) {
        self.enters.fetch_add(1, Ordering::SeqCst);
        self.foreground.lock().unwrap().push(true);
    }

    fn exit_foreground(&self) {
        self.exits.fetch_add(1, Ordering::SeqCst);
        self.foreground.lock().unwrap().push(false);
    }
}
