//! Transposed build: rows and columns swap semantic roles.
//!
//! One chosen heading column supplies the header labels; every other
//! visible column becomes one body row. Grouping, sorting, and aggregation
//! do not apply in this orientation.

use crate::format;
use crate::node::{Node, NodeKind};

use super::cells;
use super::state::TableViewInner;

pub(super) fn build(inner: &TableViewInner, id: &str) -> Node {
    let spec = &inner.spec;
    let style = &inner.style;
    let cols = cells::visible_columns(spec, style);
    let derived = cells::derive_display_cells(&cols, &spec.rows);

    let mut table = Node::new(NodeKind::Table)
        .id(id)
        .class(style.theme.class_name())
        .class("transposed");
    if let Some(table_style) = &style.table_style {
        table = table.data("style", table_style.clone());
    }
    if let Some(caption) = &spec.caption {
        table = table.child(Node::text_node(NodeKind::Caption, caption.clone()));
    }

    // Heading column: the configured one, or the first visible column.
    let Some(heading) = style
        .heading_col
        .as_ref()
        .and_then(|key| cols.iter().find(|c| &c.key == key))
        .copied()
        .or_else(|| cols.first().copied())
    else {
        return table;
    };

    // Header labels come from the heading column's display values.
    let mut head = Node::new(NodeKind::HeaderRow)
        .id(format!("{id}-head"))
        .child(Node::new(NodeKind::HeaderCell).class("corner"));
    for (index, row) in derived.iter().enumerate() {
        let text = row
            .get(&heading.key)
            .map(|cell| cell.disp.clone())
            .unwrap_or_default();
        head = head.child(Node::text_node(NodeKind::HeaderCell, text).id(format!("{id}-th-{index}")));
    }
    table = table.child(head);

    for col in &cols {
        if col.key == heading.key {
            continue;
        }
        let mut row = Node::new(NodeKind::Row).id(format!("{id}-t-{}", col.key));
        if let Some(classes) = style.col_classes.get(&col.key) {
            row = row.classes(classes.iter().cloned());
        }
        row = row.child(
            Node::text_node(NodeKind::Cell, col.display_name.clone()).class("row-label"),
        );
        for derived_row in &derived {
            let mut cell = Node::new(NodeKind::Cell).data("type", col.kind.type_name());
            if let Some(dc) = derived_row.get(&col.key) {
                cell = cell
                    .data("value", format::value_string(&dc.value))
                    .text(dc.disp.clone());
            }
            row = row.child(cell);
        }
        table = table.child(row);
    }
    table
}
