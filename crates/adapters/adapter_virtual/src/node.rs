//! Virtual UI nodes — an in-memory stand-in for a host accessibility tree.
//!
//! Each node keeps a little mutable state (scroll position, click count,
//! attachment) so dispatched actions have an observable effect.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use axpulse_domain::element::{Element, ElementAction};
use axpulse_domain::error::DispatchError;

#[derive(Debug)]
struct VirtualNode {
    name: String,
    class_name: String,
    actions: Vec<ElementAction>,
    scrollable: bool,
    clickable: bool,
    children: Vec<VirtualElement>,
    scroll_position: AtomicU64,
    clicks: AtomicU64,
    attached: AtomicBool,
}

/// Cheap handle to a virtual node.
#[derive(Debug, Clone)]
pub struct VirtualElement(Arc<VirtualNode>);

impl VirtualElement {
    /// Create a builder for a node named `name`.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> VirtualElementBuilder {
        VirtualElementBuilder {
            name: name.into(),
            class_name: "android.view.View".to_string(),
            actions: Vec::new(),
            scrollable: false,
            clickable: false,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.0.class_name
    }

    /// Pages scrolled forward minus pages scrolled back, floored at zero.
    #[must_use]
    pub fn scroll_position(&self) -> u64 {
        self.0.scroll_position.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn clicks(&self) -> u64 {
        self.0.clicks.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.0.attached.load(Ordering::SeqCst)
    }

    /// Invalidate this node and its whole subtree, as a host does when a
    /// window goes away. Detached children disappear from their parent.
    pub fn detach(&self) {
        self.0.attached.store(false, Ordering::SeqCst);
        for child in &self.0.children {
            child.detach();
        }
    }

    /// Whether both handles point at the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// First node named `name`, in breadth-first order.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<Self> {
        axpulse_domain::tree_search::find(Some(self.clone()), |e| e.name() == name)
    }

    /// Apply the effect of `action` to this node.
    pub(crate) fn perform(&self, action: ElementAction) -> Result<(), DispatchError> {
        if !self.is_attached() {
            return Err(DispatchError::Detached);
        }
        if !self.supports(action) {
            return Err(DispatchError::Unsupported { action });
        }
        match action {
            ElementAction::ScrollForward => {
                self.0.scroll_position.fetch_add(1, Ordering::SeqCst);
            }
            ElementAction::ScrollBackward => {
                // Already at the top: nothing moves.
                let _ = self.0.scroll_position.fetch_update(
                    Ordering::SeqCst,
                    Ordering::SeqCst,
                    |pos| pos.checked_sub(1),
                );
            }
            ElementAction::Click => {
                self.0.clicks.fetch_add(1, Ordering::SeqCst);
            }
        }
        Ok(())
    }
}

impl Element for VirtualElement {
    fn child_count(&self) -> usize {
        self.0.children.len()
    }

    fn child(&self, index: usize) -> Option<Self> {
        self.0
            .children
            .get(index)
            .filter(|child| child.is_attached())
            .cloned()
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

/// Step-by-step builder for [`VirtualElement`].
#[derive(Debug)]
pub struct VirtualElementBuilder {
    name: String,
    class_name: String,
    actions: Vec<ElementAction>,
    scrollable: bool,
    clickable: bool,
    children: Vec<VirtualElement>,
}

impl VirtualElementBuilder {
    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    #[must_use]
    pub fn action(mut self, action: ElementAction) -> Self {
        if !self.actions.contains(&action) {
            self.actions.push(action);
        }
        self
    }

    /// Advertise both scroll directions and flag the node scrollable.
    #[must_use]
    pub fn scrollable(self) -> Self {
        let mut this = self
            .action(ElementAction::ScrollForward)
            .action(ElementAction::ScrollBackward);
        this.scrollable = true;
        this
    }

    /// Advertise click and flag the node clickable.
    #[must_use]
    pub fn clickable(self) -> Self {
        let mut this = self.action(ElementAction::Click);
        this.clickable = true;
        this
    }

    /// Set the flags without touching the action list.
    #[must_use]
    pub fn flags(mut self, scrollable: bool, clickable: bool) -> Self {
        self.scrollable = scrollable;
        self.clickable = clickable;
        self
    }

    #[must_use]
    pub fn child(mut self, child: VirtualElement) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn build(self) -> VirtualElement {
        VirtualElement(Arc::new(VirtualNode {
            name: self.name,
            class_name: self.class_name,
            actions: self.actions,
            scrollable: self.scrollable,
            clickable: self.clickable,
            children: self.children,
            scroll_position: AtomicU64::new(0),
            clicks: AtomicU64::new(0),
            attached: AtomicBool::new(true),
        }))
    }
}
