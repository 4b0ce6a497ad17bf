//! Input events and lazy-render notifications.

use serde_json::Value;

/// Input events the widgets consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A mouse click resolved to a node id.
    Click { target: String },
}

impl Event {
    pub fn click(target: impl Into<String>) -> Self {
        Self::Click {
            target: target.into(),
        }
    }
}

/// Render state of a lazily populated pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderState {
    #[default]
    Unrendered,
    Rendered,
}

/// Emitted exactly once per pane, on its `Unrendered -> Rendered`
/// transition.
///
/// Notices bubble through every containment level, so an external listener
/// on the outermost widget sees reveals from arbitrarily deep panes and can
/// supply real content reactively.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    /// Hierarchical path of container identifiers, outermost first.
    pub path: Vec<String>,
    /// Identifier of the revealed pane.
    pub pane: String,
    /// The pane's source specification (nested table spec, tab payload, or
    /// raw detail payload).
    pub spec: Value,
}
