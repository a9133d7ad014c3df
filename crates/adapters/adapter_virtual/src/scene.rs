//! Scenes — virtual trees described as JSON, plus a built-in demo screen.
//!
//! ```json
//! {
//!   "name": "root",
//!   "children": [
//!     { "name": "feed", "scrollable": true, "actions": ["scroll_forward", "scroll_backward"] }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use axpulse_domain::element::ElementAction;

use crate::node::VirtualElement;

/// Serialized description of one node and its subtree.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeSpec {
    pub name: String,
    #[serde(default = "default_class_name")]
    pub class_name: String,
    #[serde(default)]
    pub actions: Vec<ElementAction>,
    #[serde(default)]
    pub scrollable: bool,
    #[serde(default)]
    pub clickable: bool,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

fn default_class_name() -> String {
    "android.view.View".to_string()
}

impl NodeSpec {
    /// Materialize the spec into a live virtual tree.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::EmptyName`] if any node has a blank name.
    pub fn build(&self) -> Result<VirtualElement, SceneError> {
        if self.name.trim().is_empty() {
            return Err(SceneError::EmptyName);
        }
        let mut builder = VirtualElement::builder(&self.name)
            .class_name(&self.class_name)
            .flags(self.scrollable, self.clickable);
        for action in &self.actions {
            builder = builder.action(*action);
        }
        for child in &self.children {
            builder = builder.child(child.build()?);
        }
        Ok(builder.build())
    }
}

/// Parse a JSON scene into a virtual tree.
///
/// # Errors
///
/// Returns [`SceneError::Parse`] for malformed JSON and
/// [`SceneError::EmptyName`] for unnamed nodes.
pub fn from_json(json: &str) -> Result<VirtualElement, SceneError> {
    let spec: NodeSpec = serde_json::from_str(json)?;
    spec.build()
}

/// Read and parse a JSON scene file.
///
/// # Errors
///
/// Returns [`SceneError::Io`] if the file cannot be read, otherwise as
/// [`from_json`].
pub fn load(path: impl AsRef<Path>) -> Result<VirtualElement, SceneError> {
    let content = std::fs::read_to_string(path)?;
    from_json(&content)
}

/// A small feed screen: a scrollable list of tappable posts above a toolbar.
///
/// ```text
/// root (FrameLayout)
/// ├── feed (RecyclerView, scrollable)
/// │   ├── post_1 (clickable)
/// │   ├── post_2 (clickable)
/// │   └── post_3 (clickable)
/// └── toolbar
///     └── menu (clickable)
/// ```
#[must_use]
pub fn demo() -> VirtualElement {
    let post = |name: &str| {
        VirtualElement::builder(name)
            .class_name("android.widget.LinearLayout")
            .clickable()
            .build()
    };

    VirtualElement::builder("root")
        .class_name("android.widget.FrameLayout")
        .child(
            VirtualElement::builder("feed")
                .class_name("androidx.recyclerview.widget.RecyclerView")
                .scrollable()
                .child(post("post_1"))
                .child(post("post_2"))
                .child(post("post_3"))
                .build(),
        )
        .child(
            VirtualElement::builder("toolbar")
                .class_name("android.widget.Toolbar")
                .child(
                    VirtualElement::builder("menu")
                        .class_name("android.widget.ImageButton")
                        .clickable()
                        .build(),
                )
                .build(),
        )
        .build()
}

/// Errors raised while loading a scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("failed to read scene file")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scene")]
    Parse(#[from] serde_json::Error),

    #[error("scene node name must not be empty")]
    EmptyName,
}
