//! Table renderer state and public operations.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::error::Error;
use crate::event::{Event, Notice, RenderState};
use crate::node::{Node, NodeKind};
use crate::spec::{DETAIL_DATA_KEY, DETAIL_SPEC_KEY, Row, TableSpec};
use crate::style::StyleConfig;

use super::TableViewId;
use super::{build, cells};

/// Active sort: column key plus direction. Persists until the next header
/// click or programmatic sort changes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub col: String,
    pub ascending: bool,
}

#[derive(Debug)]
pub(super) struct TableViewInner {
    pub spec: TableSpec,
    pub style: StyleConfig,
    pub transpose: bool,
    pub sort: Option<SortState>,
    /// Batch mode: property writes are buffered and no rebuild runs until
    /// the flush.
    pub batching: bool,
    /// Stable serials parallel to `spec.rows`, permuted together with the
    /// rows on sort so detail pane identity survives reordering.
    pub row_ids: Vec<u64>,
    /// Expanded section tokens (`d{serial}` for detail rows, `g{index}` for
    /// groups).
    pub expanded: HashSet<String>,
    /// One-shot lazy-render state per detail pane token.
    pub detail_state: HashMap<String, RenderState>,
    /// Nested renderer instances keyed by detail pane token.
    pub nested: BTreeMap<String, TableView>,
    /// Hierarchical path of this instance, outermost container first.
    pub path: Vec<String>,
    /// The last built tree.
    pub root: Node,
}

/// A sortable, groupable, aggregating table renderer.
///
/// State lives behind an `Arc<RwLock<..>>`, so clones share one widget.
#[derive(Debug)]
pub struct TableView {
    id: TableViewId,
    inner: Arc<RwLock<TableViewInner>>,
    dirty: Arc<AtomicBool>,
}

impl TableView {
    /// An empty table; feed it data and style afterwards.
    pub fn new() -> Self {
        Self::with_spec(TableSpec::default(), StyleConfig::default())
    }

    /// A table over an already validated specification.
    pub fn with_spec(spec: TableSpec, style: StyleConfig) -> Self {
        let id = TableViewId::new();
        let row_ids = (0..spec.rows.len() as u64).collect();
        let inner = TableViewInner {
            spec,
            style,
            transpose: false,
            sort: None,
            batching: false,
            row_ids,
            expanded: HashSet::new(),
            detail_state: HashMap::new(),
            nested: BTreeMap::new(),
            path: vec![id.to_string()],
            root: Node::new(NodeKind::Table),
        };
        let view = Self {
            id,
            inner: Arc::new(RwLock::new(inner)),
            dirty: Arc::new(AtomicBool::new(false)),
        };
        view.rebuild();
        view
    }

    pub fn id(&self) -> TableViewId {
        self.id
    }

    /// The widget id as it appears in node ids (`__grid_{n}`).
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    // -------------------------------------------------------------------------
    // Data and style properties
    // -------------------------------------------------------------------------

    /// Parse and install a table specification from JSON.
    ///
    /// Malformed input is rejected with a diagnostic and the previous good
    /// state stays in place.
    pub fn set_data_json(&self, text: &str) -> Result<(), Error> {
        match TableSpec::from_json(text) {
            Ok(spec) => {
                self.set_data(spec);
                Ok(())
            }
            Err(err) => {
                log::warn!("{}: rejected data: {err}", self.id);
                Err(err)
            }
        }
    }

    /// Install a validated specification, resetting sort, expansion, and
    /// nested state.
    pub fn set_data(&self, spec: TableSpec) {
        if let Ok(mut guard) = self.inner.write() {
            guard.row_ids = (0..spec.rows.len() as u64).collect();
            guard.spec = spec;
            guard.sort = None;
            guard.expanded.clear();
            guard.detail_state.clear();
            guard.nested.clear();
        }
        self.invalidate();
    }

    /// The stored specification. Raw row values are never mutated by
    /// rendering, so this round-trips what was set (modulo sort order).
    pub fn data(&self) -> TableSpec {
        self.inner
            .read()
            .map(|g| g.spec.clone())
            .unwrap_or_default()
    }

    /// Parse and install a style configuration from JSON.
    pub fn set_style_json(&self, text: &str) -> Result<(), Error> {
        match StyleConfig::from_json(text) {
            Ok(style) => {
                self.set_style(style);
                Ok(())
            }
            Err(err) => {
                log::warn!("{}: rejected style: {err}", self.id);
                Err(err)
            }
        }
    }

    pub fn set_style(&self, style: StyleConfig) {
        if let Ok(mut guard) = self.inner.write() {
            guard.style = style;
        }
        self.invalidate();
    }

    pub fn style(&self) -> StyleConfig {
        self.inner
            .read()
            .map(|g| g.style.clone())
            .unwrap_or_default()
    }

    pub fn transpose(&self) -> bool {
        self.inner.read().map(|g| g.transpose).unwrap_or(false)
    }

    /// Swap the semantic roles of rows and columns.
    pub fn set_transpose(&self, transpose: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.transpose = transpose;
        }
        self.invalidate();
    }

    // -------------------------------------------------------------------------
    // Batch mode
    // -------------------------------------------------------------------------

    /// Suppress rebuilds until [`TableView::end_batch`].
    pub fn begin_batch(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.batching = true;
        }
    }

    /// Leave batch mode and run exactly one rebuild reflecting the final
    /// value of every property written during the batch.
    pub fn end_batch(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.batching = false;
        }
        self.rebuild();
    }

    /// Force a rebuild of the node tree from current state.
    pub fn refresh(&self) {
        self.rebuild();
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// The last built node tree.
    pub fn root(&self) -> Node {
        self.inner
            .read()
            .map(|g| g.root.clone())
            .unwrap_or_else(|_| Node::new(NodeKind::Table))
    }

    /// Override the hierarchical path reported in notices. Containers set
    /// this when nesting a table inside their own panes.
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

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    pub fn sort(&self) -> Option<SortState> {
        self.inner.read().ok().and_then(|g| g.sort.clone())
    }

    /// Sort the stored rows by one column.
    ///
    /// The sort permutes the raw rows in place (stably); a descending sort
    /// is the exact reverse of the ascending result. No-op in transposed
    /// mode.
    pub fn sort_by(&self, col: &str, ascending: bool) -> Result<(), Error> {
        {
            let Ok(mut guard) = self.inner.write() else {
                return Ok(());
            };
            if guard.transpose {
                return Ok(());
            }
            let Some(column) = guard.spec.col(col).cloned() else {
                return Err(Error::UnknownColumn(col.to_string()));
            };
            guard.sort = Some(SortState {
                col: col.to_string(),
                ascending,
            });

            let rows = std::mem::take(&mut guard.spec.rows);
            let ids = std::mem::take(&mut guard.row_ids);
            let mut paired: Vec<(u64, Row)> = ids.into_iter().zip(rows).collect();
            paired.sort_by(|(_, a), (_, b)| cells::compare_rows(&column, a, b));
            if !ascending {
                paired.reverse();
            }
            for (serial, row) in paired {
                guard.row_ids.push(serial);
                guard.spec.rows.push(row);
            }
        }
        self.invalidate();
        Ok(())
    }

    /// Header-click behavior: first click on a column sorts ascending,
    /// repeated clicks flip the direction.
    fn toggle_sort_col(&self, col: &str) {
        let next = {
            let Ok(guard) = self.inner.read() else {
                return;
            };
            if guard.transpose || guard.spec.col(col).is_none() {
                return;
            }
            match &guard.sort {
                Some(sort) if sort.col == col => !sort.ascending,
                _ => true,
            }
        };
        // The column was just checked; an error here means a concurrent
        // data swap, which simply drops the click.
        let _ = self.sort_by(col, next);
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Route an input event into this widget and its nested instances.
    ///
    /// Returns the notices emitted by lazily revealed panes, from any
    /// nesting depth.
    pub fn handle_event(&self, event: &Event) -> Vec<Notice> {
        self.dispatch(event).1
    }

    pub(crate) fn dispatch(&self, event: &Event) -> (bool, Vec<Notice>) {
        let Event::Click { target } = event;
        let id = self.id.to_string();

        if let Some(col) = target.strip_prefix(&format!("{id}-h-")) {
            self.toggle_sort_col(col);
            return (true, Vec::new());
        }
        if let Some(token) = target.strip_prefix(&format!("{id}-toggle-")) {
            let notices = self.toggle_section(token);
            return (true, notices);
        }

        // Forward to nested instances. Any hit means a child rebuilt its
        // tree and our spliced copy of it is stale.
        let children: Vec<TableView> = self
            .inner
            .read()
            .map(|g| g.nested.values().cloned().collect())
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

    /// Toggle one expandable section. The first reveal of a detail pane
    /// materializes its content and emits a notice, exactly once.
    fn toggle_section(&self, token: &str) -> Vec<Notice> {
        let mut notices = Vec::new();
        if let Ok(mut guard) = self.inner.write() {
            let now_expanded = if guard.expanded.contains(token) {
                guard.expanded.remove(token);
                false
            } else {
                guard.expanded.insert(token.to_string());
                true
            };

            let first_reveal = now_expanded
                && guard.detail_state.get(token).copied().unwrap_or_default()
                    == RenderState::Unrendered;
            if first_reveal
                && let Some(serial) = token.strip_prefix('d').and_then(|s| s.parse::<u64>().ok())
                && let Some(index) = guard.row_ids.iter().position(|&rid| rid == serial)
            {
                let (payload, has_spec) = {
                    let row = &guard.spec.rows[index];
                    (
                        row.get(DETAIL_SPEC_KEY)
                            .or_else(|| row.get(DETAIL_DATA_KEY))
                            .cloned(),
                        row.contains_key(DETAIL_SPEC_KEY),
                    )
                };
                if let Some(payload) = payload {
                    guard.detail_state.insert(token.to_string(), RenderState::Rendered);
                    let pane = format!("{}-d{serial}", self.id);
                    if has_spec {
                        match TableSpec::from_value(payload.clone()) {
                            Ok(nested_spec) => {
                                let child =
                                    TableView::with_spec(nested_spec, StyleConfig::default());
                                let mut child_path = guard.path.clone();
                                child_path.push(pane.clone());
                                child.set_path(child_path);
                                guard.nested.insert(token.to_string(), child);
                            }
                            Err(err) => {
                                log::warn!("{}: invalid nested specification: {err}", self.id);
                            }
                        }
                    }
                    notices.push(Notice {
                        path: guard.path.clone(),
                        pane,
                        spec: payload,
                    });
                }
            }
        }
        self.rebuild();
        notices
    }

    // -------------------------------------------------------------------------
    // Rebuild plumbing
    // -------------------------------------------------------------------------

    fn invalidate(&self) {
        self.dirty.store(true, Ordering::SeqCst);
        let batching = self.inner.read().map(|g| g.batching).unwrap_or(false);
        if !batching {
            self.rebuild();
        }
    }

    fn rebuild(&self) {
        let root = {
            let Ok(guard) = self.inner.read() else {
                return;
            };
            build::build(&guard, &self.id.to_string())
        };
        if let Ok(mut guard) = self.inner.write() {
            guard.root = root;
        }
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl Default for TableView {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TableView {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}
