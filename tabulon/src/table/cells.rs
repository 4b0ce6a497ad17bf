//! Display-cell derivation and value comparison.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use serde_json::Value;

use crate::format;
use crate::spec::{ColumnKind, ColumnSpec, Row, TableSpec};
use crate::style::StyleConfig;

/// One derived cell: the column kind, the raw value, and the display
/// string.
///
/// `disp` is a pure function of `(value, kind)`; mutation always happens on
/// the raw row before re-derivation, never on a derived cell.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct DisplayCell {
    pub kind: ColumnKind,
    pub value: Value,
    pub disp: String,
}

pub(super) type DisplayRow = BTreeMap<String, DisplayCell>;

/// Columns that survive `show: false` and grouping exclusion, in
/// declaration order. Grouped-by columns disappear from the grid because
/// their values appear in the group label instead.
pub(super) fn visible_columns<'a>(spec: &'a TableSpec, style: &StyleConfig) -> Vec<&'a ColumnSpec> {
    let grouped: HashSet<&str> = style.group_by.iter().map(|g| g.col.as_str()).collect();
    spec.cols
        .iter()
        .filter(|c| c.show && !grouped.contains(c.key.as_str()))
        .collect()
}

/// Derive display cells for every row, over a deep copy of the raw rows.
///
/// Derivation always reads the stored raw rows, so applying it again
/// produces identical output (it never formats an already-formatted value).
pub(super) fn derive_display_cells(cols: &[&ColumnSpec], rows: &[Row]) -> Vec<DisplayRow> {
    rows.iter()
        .map(|row| {
            let mut derived = DisplayRow::new();
            for col in cols {
                if let Some(raw) = row.get(&col.key) {
                    derived.insert(
                        col.key.clone(),
                        DisplayCell {
                            kind: col.kind.clone(),
                            value: raw.clone(),
                            disp: format::format_cell(&col.kind, raw),
                        },
                    );
                }
            }
            derived
        })
        .collect()
}

/// Column comparison rule: dates compare by their normalized form, numbers
/// numerically, everything else as strings.
pub(super) fn compare_values(kind: &ColumnKind, a: &Value, b: &Value) -> Ordering {
    if matches!(kind, ColumnKind::Date) {
        return format::format_date(a).cmp(&format::format_date(b));
    }
    match (format::numeric(a), format::numeric(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => format::value_string(a).cmp(&format::value_string(b)),
    }
}

/// Compare two rows on one column.
pub(super) fn compare_rows(column: &ColumnSpec, a: &Row, b: &Row) -> Ordering {
    let left = a.get(&column.key).unwrap_or(&Value::Null);
    let right = b.get(&column.key).unwrap_or(&Value::Null);
    compare_values(&column.kind, left, right)
}
