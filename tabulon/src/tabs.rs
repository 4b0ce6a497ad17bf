//! Recursive tab panel.
//!
//! A panel holds an ordered list of tab entries. Entries with nested `tabs`
//! lazily materialize a child panel on first selection; leaf entries emit a
//! [`Notice`] carrying their payload on first reveal. Selecting an entry
//! whose child panel was just created cascades a selection of the child's
//! first entry, so opening a deep branch reveals one leaf end to end.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;
use crate::event::{Event, Notice, RenderState};
use crate::node::{Node, NodeKind};

/// Specification for one tab entry: a title, optional nested entries, and
/// an arbitrary payload forwarded in the reveal notice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabSpec {
    #[serde(alias = "id")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tabs: Option<Vec<TabSpec>>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

/// Unique identifier for a TabPanel instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabPanelId(usize);

impl TabPanelId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TabPanelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__tabs_{}", self.0)
    }
}

#[derive(Debug)]
struct TabPanelInner {
    specs: Vec<TabSpec>,
    active: Option<usize>,
    /// One-shot reveal state per entry index.
    rendered: HashMap<usize, RenderState>,
    /// Lazily created child panels, keyed by entry index.
    children: BTreeMap<usize, TabPanel>,
    /// Hierarchical path of this panel, outermost container first.
    path: Vec<String>,
    root: Node,
}

/// A recursive tab panel. Clones share one widget.
#[derive(Debug)]
pub struct TabPanel {
    id: TabPanelId,
    inner: Arc<RwLock<TabPanelInner>>,
    dirty: Arc<AtomicBool>,
}

impl TabPanel {
    pub fn new() -> Self {
        Self::with_tabs(Vec::new())
    }

    pub fn with_tabs(specs: Vec<TabSpec>) -> Self {
        let id = TabPanelId::new();
        let inner = TabPanelInner {
            specs,
            active: None,
            rendered: HashMap::new(),
            children: BTreeMap::new(),
            path: vec![id.to_string()],
            root: Node::new(NodeKind::Tabs),
        };
        let panel = Self {
            id,
            inner: Arc::new(RwLock::new(inner)),
            dirty: Arc::new(AtomicBool::new(false)),
        };
        panel.rebuild();
        panel
    }

    pub fn id(&self) -> TabPanelId {
        self.id
    }

    /// The widget id as it appears in node ids (`__tabs_{n}`).
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    /// Parse and install tab entries from JSON. Malformed input is rejected
    /// and the previous entries stay in place.
    pub fn set_tabs_json(&self, text: &str) -> Result<(), Error> {
        match serde_json::from_str::<Vec<TabSpec>>(text) {
            Ok(specs) => {
                self.set_tabs(specs);
                Ok(())
            }
            Err(err) => {
                let err = Error::InvalidData(err.to_string());
                log::warn!("{}: rejected tabs: {err}", self.id);
                Err(err)
            }
        }
    }

    /// Install entries, resetting selection and all lazily created state.
    pub fn set_tabs(&self, specs: Vec<TabSpec>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.specs = specs;
            guard.active = None;
            guard.rendered.clear();
            guard.children.clear();
        }
        self.rebuild();
    }

    pub fn tabs(&self) -> Vec<TabSpec> {
        self.inner
            .read()
            .map(|g| g.specs.clone())
            .unwrap_or_default()
    }

    /// Index of the active entry, if any has been selected yet.
    pub fn active(&self) -> Option<usize> {
        self.inner.read().ok().and_then(|g| g.active)
    }

    /// Override the hierarchical path reported in notices.
    pub fn set_path(&self, path: Vec<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.path = path;
        }
    }

    pub fn path(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|g| g.path.clone())
            .unwrap_or_default()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// The last built node tree.
    pub fn root(&self) -> Node {
        self.inner
            .read()
            .map(|g| g.root.clone())
            .unwrap_or_else(|_| Node::new(NodeKind::Tabs))
    }

    /// Select the entry at `index`.
    ///
    /// A first selection materializes the entry: a nested entry creates its
    /// child panel and cascades a selection of the child's first entry; a
    /// leaf emits one reveal notice. Later selections only switch panes.
    pub fn select(&self, index: usize) -> Result<Vec<Notice>, Error> {
        let mut notices = Vec::new();
        let mut cascade: Option<TabPanel> = None;
        {
            let Ok(mut guard) = self.inner.write() else {
                return Ok(notices);
            };
            let Some(spec) = guard.specs.get(index).cloned() else {
                return Err(Error::PathNotFound(format!("tab index {index}")));
            };
            guard.active = Some(index);

            let first_reveal =
                guard.rendered.get(&index).copied().unwrap_or_default() == RenderState::Unrendered;
            if first_reveal {
                guard.rendered.insert(index, RenderState::Rendered);
                match &spec.tabs {
                    Some(nested) if !nested.is_empty() => {
                        let child = TabPanel::with_tabs(nested.clone());
                        let mut child_path = guard.path.clone();
                        child_path.push(spec.title.clone());
                        child.set_path(child_path);
                        guard.children.insert(index, child.clone());
                        cascade = Some(child);
                    }
                    _ => {
                        notices.push(Notice {
                            path: guard.path.clone(),
                            pane: spec.title.clone(),
                            spec: serde_json::to_value(&spec).unwrap_or(Value::Null),
                        });
                    }
                }
            }
        }
        if let Some(child) = cascade {
            notices.extend(child.select(0)?);
        }
        self.rebuild();
        Ok(notices)
    }

    /// Open a branch by entry titles, outermost first, selecting each level
    /// along the way.
    ///
    /// The whole path is resolved against the entry tree before anything is
    /// selected: a title with no matching entry at its level yields
    /// [`Error::PathNotFound`] and leaves selection untouched. Reveal
    /// notices are one-shot, so a half-applied navigation would consume
    /// them without delivering them to the caller.
    pub fn open_path(&self, titles: &[&str]) -> Result<Vec<Notice>, Error> {
        let Some((first, rest)) = titles.split_first() else {
            return Ok(Vec::new());
        };
        let index = {
            let Ok(guard) = self.inner.read() else {
                return Ok(Vec::new());
            };
            let index = guard
                .specs
                .iter()
                .position(|s| s.title == *first)
                .ok_or_else(|| Error::PathNotFound((*first).to_string()))?;
            let mut level = guard.specs[index].tabs.as_deref();
            for segment in rest {
                let next = level
                    .and_then(|entries| entries.iter().find(|s| s.title == *segment))
                    .ok_or_else(|| Error::PathNotFound((*segment).to_string()))?;
                level = next.tabs.as_deref();
            }
            index
        };
        let mut notices = self.select(index)?;
        if !rest.is_empty() {
            let child = {
                let Ok(guard) = self.inner.read() else {
                    return Ok(notices);
                };
                guard.children.get(&index).cloned()
            };
            // The path validated above, so the child panel exists whenever
            // the path continues.
            if let Some(child) = child {
                notices.extend(child.open_path(rest)?);
                self.rebuild();
            }
        }
        Ok(notices)
    }

    /// Route an input event into this panel and its children.
    pub fn handle_event(&self, event: &Event) -> Vec<Notice> {
        self.dispatch(event).1
    }

    fn dispatch(&self, event: &Event) -> (bool, Vec<Notice>) {
        let Event::Click { target } = event;
        if let Some(rest) = target.strip_prefix(&format!("{}-btn-", self.id))
            && let Ok(index) = rest.parse::<usize>()
        {
            // An out-of-range index means a stale tree; drop the click.
            let notices = self.select(index).unwrap_or_default();
            return (true, notices);
        }

        let children: Vec<TabPanel> = self
            .inner
            .read()
            .map(|g| g.children.values().cloned().collect())
            .unwrap_or_default();
        let mut notices = Vec::new();
        let mut hit = false;
        for child in children {
            let (child_hit, child_notices) = child.dispatch(event);
            hit |= child_hit;
            notices.extend(child_notices);
        }
        if hit {
            self.rebuild();
        }
        (hit, notices)
    }

    fn rebuild(&self) {
        let root = {
            let Ok(guard) = self.inner.read() else {
                return;
            };
            build_tree(&guard, &self.id.to_string())
        };
        if let Ok(mut guard) = self.inner.write() {
            guard.root = root;
        }
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl Default for TabPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TabPanel {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

/// Tab bar followed by one pane per entry; inactive panes stay in the tree
/// but hidden, so already materialized children keep their state.
fn build_tree(inner: &TabPanelInner, id: &str) -> Node {
    let mut bar = Node::new(NodeKind::TabBar).id(format!("{id}-bar"));
    for (index, spec) in inner.specs.iter().enumerate() {
        let mut button = Node::text_node(NodeKind::TabButton, spec.title.clone())
            .id(format!("{id}-btn-{index}"));
        if inner.active == Some(index) {
            button = button.class("active");
        }
        bar = bar.child(button);
    }

    let mut tabs = Node::new(NodeKind::Tabs).id(id).child(bar);
    for index in 0..inner.specs.len() {
        let mut pane = Node::new(NodeKind::TabPane)
            .id(format!("{id}-pane-{index}"))
            .hidden(inner.active != Some(index));
        if let Some(child) = inner.children.get(&index) {
            pane = pane.child(child.root());
        }
        tabs = tabs.child(pane);
    }
    tabs
}
