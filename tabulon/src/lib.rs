//! Data-grid and tab-panel widgets that build an explicit node tree.
//!
//! [`TableView`] renders declarative table specifications with formatting,
//! sorting, multi-level grouping, subtotals, expandable detail rows, and a
//! transposed orientation. [`TabPanel`] arranges recursive, lazily revealed
//! tab panes. Both consume [`Event`]s and surface lazy reveals as
//! [`Notice`]s; [`render_text`] lays a built tree out as plain text.

pub mod error;
pub mod event;
pub mod format;
pub mod node;
pub mod render;
pub mod spec;
pub mod style;
pub mod table;
pub mod tabs;
pub mod theme;

pub use error::Error;
pub use event::{Event, Notice, RenderState};
pub use node::{Node, NodeKind, collect_text, find_node};
pub use render::render_text;
pub use spec::{
    Aggregate, ColumnKind, ColumnSpec, DETAIL_DATA_KEY, DETAIL_SPEC_KEY, Row, TableSpec,
    row_has_detail,
};
pub use style::{GroupKey, RowButton, RowCriteria, RowStyleRule, SortDir, StyleConfig};
pub use table::{SortState, TableView, TableViewId};
pub use tabs::{TabPanel, TabPanelId, TabSpec};
pub use theme::ThemeVariant;

pub mod prelude {
    pub use crate::error::Error;
    pub use crate::event::{Event, Notice, RenderState};
    pub use crate::node::{Node, NodeKind, find_node};
    pub use crate::spec::{Aggregate, ColumnKind, ColumnSpec, TableSpec};
    pub use crate::style::{GroupKey, SortDir, StyleConfig};
    pub use crate::table::TableView;
    pub use crate::tabs::{TabPanel, TabSpec};
    pub use crate::theme::ThemeVariant;
}
