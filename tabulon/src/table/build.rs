//! Node-tree construction: header, plain and grouped bodies, subtotals,
//! footer.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde_json::Value;

use crate::event::RenderState;
use crate::format;
use crate::node::{Node, NodeKind};
use crate::spec::{
    Aggregate, ColumnKind, ColumnSpec, DETAIL_DATA_KEY, Row, TableSpec, row_has_detail,
};
use crate::style::{SortDir, StyleConfig};

use super::cells::{self, DisplayCell, DisplayRow};
use super::state::TableViewInner;
use super::transpose;

pub(super) const COLLAPSED_GLYPH: char = '▶';
pub(super) const EXPANDED_GLYPH: char = '▼';

/// Separator joining raw group values into a composite key. Not escaped:
/// two tuples can collide when a value contains the separator itself.
const GROUP_KEY_SEP: &str = "|";
/// Separator joining group values in the visible group label.
const GROUP_LABEL_SEP: &str = " / ";

struct BuildCtx<'a> {
    id: &'a str,
    inner: &'a TableViewInner,
    cols: Vec<&'a ColumnSpec>,
    aggregates: Vec<(String, Aggregate)>,
    has_buttons: bool,
    /// Leading toggle column, present when any row is expandable or the
    /// table is grouped.
    toggle_col: bool,
}

pub(super) fn build(inner: &TableViewInner, id: &str) -> Node {
    if inner.transpose {
        return transpose::build(inner, id);
    }
    let spec = &inner.spec;
    let style = &inner.style;

    let aggregates = resolve_aggregates(spec, style);
    let cols = cells::visible_columns(spec, style);
    let derived = cells::derive_display_cells(&cols, &spec.rows);

    let expandable = spec.rows.iter().any(row_has_detail);
    let grouped = !style.group_by.is_empty();
    let ctx = BuildCtx {
        id,
        inner,
        cols,
        aggregates,
        has_buttons: !style.row_buttons.is_empty(),
        toggle_col: expandable || grouped,
    };

    let mut table = Node::new(NodeKind::Table)
        .id(id)
        .class(style.theme.class_name());
    if let Some(table_style) = &style.table_style {
        table = table.data("style", table_style.clone());
    }
    if let Some(caption) = &spec.caption {
        table = table.child(Node::text_node(NodeKind::Caption, caption.clone()));
    }

    table = table.child(header_row(&ctx));

    if grouped {
        table = table.children(grouped_rows(&ctx, &derived));
    } else {
        table = table.children(plain_rows(&ctx, &derived));
    }

    // Overall footer computed over all rows, grouped or not.
    if !ctx.aggregates.is_empty() {
        let all: Vec<&Row> = spec.rows.iter().collect();
        table = table.child(subtotal_row(
            &ctx,
            &all,
            None,
            None,
            vec!["footer".to_string()],
            false,
        ));
    }
    table
}

/// Aggregate columns: the explicit style map wins; otherwise the per-column
/// `aggregate` attributes apply. Keys naming no declared column are
/// ignored.
fn resolve_aggregates(spec: &TableSpec, style: &StyleConfig) -> Vec<(String, Aggregate)> {
    match &style.aggregate_cols {
        Some(map) => map
            .iter()
            .filter(|(key, _)| spec.col(key).is_some())
            .map(|(key, aggregate)| (key.clone(), aggregate.clone()))
            .collect(),
        None => spec
            .cols
            .iter()
            .filter_map(|c| c.aggregate.clone().map(|aggregate| (c.key.clone(), aggregate)))
            .collect(),
    }
}

// =============================================================================
// Header
// =============================================================================

fn header_row(ctx: &BuildCtx) -> Node {
    let mut row = Node::new(NodeKind::HeaderRow).id(format!("{}-head", ctx.id));
    if ctx.toggle_col {
        row = row.child(Node::new(NodeKind::HeaderCell).class("toggle-col"));
    }
    for col in &ctx.cols {
        let mut text = col.display_name.clone();
        let mut cell = Node::new(NodeKind::HeaderCell)
            .id(format!("{}-h-{}", ctx.id, col.key))
            .data("type", col.kind.type_name());
        if let Some(sort) = &ctx.inner.sort
            && sort.col == col.key
        {
            let glyph = if sort.ascending { '▲' } else { '▼' };
            text = format!("{text} {glyph}");
            cell = cell.class("sorted");
        }
        row = row.child(cell.text(text));
    }
    if ctx.has_buttons {
        row = row.child(Node::new(NodeKind::HeaderCell).class("actions-col"));
    }
    row
}

// =============================================================================
// Plain body
// =============================================================================

fn plain_rows(ctx: &BuildCtx, derived: &[DisplayRow]) -> Vec<Node> {
    let mut out = Vec::new();
    for (index, row) in ctx.inner.spec.rows.iter().enumerate() {
        out.push(data_row(ctx, index, row, &derived[index], false));
        if row_has_detail(row) {
            out.push(detail_row(ctx, index, row, false));
        }
    }
    out
}

fn data_row(ctx: &BuildCtx, index: usize, raw: &Row, derived: &DisplayRow, hidden: bool) -> Node {
    let serial = ctx.inner.row_ids[index];
    let mut row = Node::new(NodeKind::Row)
        .id(format!("{}-r{serial}", ctx.id))
        .classes(row_classes(ctx, raw))
        .hidden(hidden);
    if ctx.toggle_col {
        row = row.child(toggle_cell(ctx, raw, serial));
    }
    for col in &ctx.cols {
        row = row.child(value_cell(col, derived.get(&col.key)));
    }
    if ctx.has_buttons {
        row = row.child(actions_cell(ctx, raw));
    }
    row
}

/// Classes from every row-style rule whose criterion value set contains the
/// row's raw value.
fn row_classes(ctx: &BuildCtx, raw: &Row) -> Vec<String> {
    let mut classes = Vec::new();
    for rule in &ctx.inner.style.row_styles {
        let matched = raw
            .get(&rule.criteria.col)
            .is_some_and(|value| rule.criteria.values.contains(value));
        if matched {
            classes.extend(rule.classes.iter().cloned());
        }
    }
    classes
}

fn toggle_cell(ctx: &BuildCtx, raw: &Row, serial: u64) -> Node {
    let mut cell = Node::new(NodeKind::Cell).class("toggle-col");
    if row_has_detail(raw) {
        let token = format!("d{serial}");
        let glyph = if ctx.inner.expanded.contains(&token) {
            EXPANDED_GLYPH
        } else {
            COLLAPSED_GLYPH
        };
        cell = cell.child(
            Node::text_node(NodeKind::Toggle, glyph.to_string())
                .id(format!("{}-toggle-{token}", ctx.id)),
        );
    }
    cell
}

fn value_cell(col: &ColumnSpec, cell: Option<&DisplayCell>) -> Node {
    let mut node = Node::new(NodeKind::Cell).data("type", col.kind.type_name());
    if let Some(cell) = cell {
        node = node
            .data("value", format::value_string(&cell.value))
            .text(cell.disp.clone());
    }
    node
}

fn actions_cell(ctx: &BuildCtx, raw: &Row) -> Node {
    let mut cell = Node::new(NodeKind::Cell).class("actions-col");
    for button in &ctx.inner.style.row_buttons {
        let mut node = Node::text_node(NodeKind::Button, button.text.clone());
        if let Some(onclick) = &button.onclick {
            node = node.data("onclick", onclick.clone());
        }
        if let Some(param) = &button.param
            && let Some(value) = raw.get(param)
        {
            node = node.data("args", format::value_string(value));
        }
        for (key, value) in &button.extra {
            node = node.data(key.clone(), format::value_string(value));
        }
        cell = cell.child(node);
    }
    cell
}

/// The hidden/revealed row hosting a detail pane. Content appears only
/// after the pane's first reveal: a nested table for `detail_spec`, a
/// pretty-printed payload for `detail_data`.
fn detail_row(ctx: &BuildCtx, index: usize, raw: &Row, force_hidden: bool) -> Node {
    let serial = ctx.inner.row_ids[index];
    let token = format!("d{serial}");
    let expanded = ctx.inner.expanded.contains(&token);
    let rendered = ctx
        .inner
        .detail_state
        .get(&token)
        .copied()
        .unwrap_or_default()
        == RenderState::Rendered;

    let mut content = Node::new(NodeKind::Cell);
    if rendered {
        if let Some(child) = ctx.inner.nested.get(&token) {
            content = content.child(child.root());
        } else if let Some(payload) = raw.get(DETAIL_DATA_KEY) {
            let pretty = serde_json::to_string_pretty(payload).unwrap_or_default();
            content = content.child(Node::text_node(NodeKind::Pre, pretty));
        }
    }

    Node::new(NodeKind::Row)
        .id(format!("{}-{token}", ctx.id))
        .class("detail")
        .hidden(!expanded || force_hidden)
        .child(content)
}

// =============================================================================
// Grouped body
// =============================================================================

fn grouped_rows(ctx: &BuildCtx, derived: &[DisplayRow]) -> Vec<Node> {
    let style = &ctx.inner.style;
    let spec = &ctx.inner.spec;

    // Order row indices by the group-by columns, honoring per-level
    // directions. The stored rows themselves keep their order.
    let mut order: Vec<usize> = (0..spec.rows.len()).collect();
    order.sort_by(|&a, &b| {
        for level in &style.group_by {
            let Some(column) = spec.col(&level.col) else {
                continue;
            };
            let ord = cells::compare_rows(column, &spec.rows[a], &spec.rows[b]);
            let ord = match level.dir {
                SortDir::Asc => ord,
                SortDir::Desc => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });

    // Partition the ordered sequence into contiguous runs sharing one
    // composite key.
    let composite = |index: usize| -> String {
        style
            .group_by
            .iter()
            .map(|level| {
                spec.rows[index]
                    .get(&level.col)
                    .map(format::value_string)
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>()
            .join(GROUP_KEY_SEP)
    };
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    for index in order {
        let key = composite(index);
        match groups.last_mut() {
            Some((last, members)) if *last == key => members.push(index),
            _ => groups.push((key, vec![index])),
        }
    }

    // When any aggregate column carries the label `Total`, the subtotal row
    // doubles as the group header; otherwise groups get a dedicated label
    // row with subtotals trailing the members.
    let total_mode = ctx
        .aggregates
        .iter()
        .any(|(_, aggregate)| matches!(aggregate, Aggregate::Label(label) if label == "Total"));

    let mut out = Vec::new();
    for (group_index, (key, members)) in groups.iter().enumerate() {
        let token = format!("g{group_index}");
        let expanded = ctx.inner.expanded.contains(&token);
        let label = key.replace(GROUP_KEY_SEP, GROUP_LABEL_SEP);
        let member_rows: Vec<&Row> = members.iter().map(|&i| &spec.rows[i]).collect();

        if total_mode {
            out.push(subtotal_row(
                ctx,
                &member_rows,
                Some(&label),
                Some(&token),
                vec!["group-header".to_string()],
                false,
            ));
        } else {
            out.push(group_label_row(ctx, &label, &token, expanded));
        }
        for &index in members {
            out.push(data_row(ctx, index, &spec.rows[index], &derived[index], !expanded));
            if row_has_detail(&spec.rows[index]) {
                out.push(detail_row(ctx, index, &spec.rows[index], !expanded));
            }
        }
        if !total_mode && !ctx.aggregates.is_empty() {
            out.push(subtotal_row(
                ctx,
                &member_rows,
                None,
                None,
                vec!["group-total".to_string()],
                !expanded,
            ));
        }
    }
    out
}

fn group_label_row(ctx: &BuildCtx, label: &str, token: &str, expanded: bool) -> Node {
    let glyph = if expanded { EXPANDED_GLYPH } else { COLLAPSED_GLYPH };
    let toggle = Node::text_node(NodeKind::Toggle, glyph.to_string())
        .id(format!("{}-toggle-{token}", ctx.id));
    Node::new(NodeKind::Row)
        .id(format!("{}-gh-{token}", ctx.id))
        .class("group-label")
        .child(Node::new(NodeKind::Cell).class("toggle-col").child(toggle))
        .child(Node::text_node(NodeKind::Cell, label.to_string()).class("group-label-cell"))
}

// =============================================================================
// Subtotals and footer
// =============================================================================

/// One aggregate row over `rows`.
///
/// With a `group_label`, the label lands in the first eligible cell: a
/// label-aggregate column if one comes first, else the first column without
/// an aggregate, else the toggle cell. Label-aggregate columns not chosen
/// show their literal text (the footer always shows literals).
fn subtotal_row(
    ctx: &BuildCtx,
    rows: &[&Row],
    group_label: Option<&str>,
    toggle: Option<&str>,
    classes: Vec<String>,
    hidden: bool,
) -> Node {
    let aggregates: BTreeMap<&str, &Aggregate> = ctx
        .aggregates
        .iter()
        .map(|(key, aggregate)| (key.as_str(), aggregate))
        .collect();

    let mut label_placed = group_label.is_none();
    let mut cells_out: Vec<Node> = Vec::new();
    for col in &ctx.cols {
        let mut cell = Node::new(NodeKind::Cell).data("type", col.kind.type_name());
        match aggregates.get(col.key.as_str()) {
            Some(Aggregate::Sum) => {
                cell = cell.text(sum_column(col, rows));
            }
            Some(Aggregate::Label(text)) => {
                if let Some(label) = group_label.filter(|_| !label_placed) {
                    cell = cell.text(label.to_string());
                    label_placed = true;
                } else {
                    cell = cell.text(text.clone());
                }
            }
            None => {
                if let Some(label) = group_label.filter(|_| !label_placed) {
                    cell = cell.text(label.to_string());
                    label_placed = true;
                }
            }
        }
        cells_out.push(cell);
    }

    let mut row = Node::new(NodeKind::Row).classes(classes).hidden(hidden);
    if let Some(token) = toggle {
        row = row.id(format!("{}-gh-{token}", ctx.id));
    }
    if ctx.toggle_col {
        let mut cell = Node::new(NodeKind::Cell).class("toggle-col");
        if let Some(token) = toggle {
            let expanded = ctx.inner.expanded.contains(token);
            let glyph = if expanded { EXPANDED_GLYPH } else { COLLAPSED_GLYPH };
            cell = cell.child(
                Node::text_node(NodeKind::Toggle, glyph.to_string())
                    .id(format!("{}-toggle-{token}", ctx.id)),
            );
        }
        if let Some(label) = group_label.filter(|_| !label_placed) {
            cell = cell.text(label.to_string());
        }
        row = row.child(cell);
    }
    row = row.children(cells_out);
    if ctx.has_buttons {
        row = row.child(Node::new(NodeKind::Cell).class("actions-col"));
    }
    row
}

/// Sum one column over the rows in scope and format the result with the
/// column's own rule. `money_2` sums element-wise; shorter arrays count
/// zero for their missing slots.
fn sum_column(col: &ColumnSpec, rows: &[&Row]) -> String {
    match &col.kind {
        ColumnKind::MoneyPair {
            precisions,
            currencies,
        } => {
            let mut sums: Vec<f64> = Vec::new();
            for row in rows {
                if let Some(items) = row.get(&col.key).and_then(Value::as_array) {
                    if sums.len() < items.len() {
                        sums.resize(items.len(), 0.0);
                    }
                    for (i, item) in items.iter().enumerate() {
                        sums[i] += format::numeric(item).unwrap_or(0.0);
                    }
                }
            }
            format::format_money2(&sums, precisions, currencies)
        }
        kind => {
            let total: f64 = rows
                .iter()
                .filter_map(|row| row.get(&col.key))
                .filter_map(format::numeric)
                .sum();
            format::format_cell(kind, &Value::from(total))
        }
    }
}
