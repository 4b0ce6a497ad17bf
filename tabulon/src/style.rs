//! Style configuration for the table renderer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;
use crate::spec::Aggregate;
use crate::theme::ThemeVariant;

/// Sort direction for a grouping level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

/// One grouping level: a column key plus a direction.
///
/// The wire accepts either a bare key (`"region"`, ascending) or a
/// `["region", "desc"]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawGroupKey")]
pub struct GroupKey {
    pub col: String,
    pub dir: SortDir,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawGroupKey {
    Flat(String),
    Pair(String, SortDir),
}

impl From<RawGroupKey> for GroupKey {
    fn from(raw: RawGroupKey) -> Self {
        match raw {
            RawGroupKey::Flat(col) => Self {
                col,
                dir: SortDir::Asc,
            },
            RawGroupKey::Pair(col, dir) => Self { col, dir },
        }
    }
}

/// Criterion of a row-style rule: a column key and the set of raw values
/// that match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowCriteria {
    pub col: String,
    #[serde(rename = "val", default)]
    pub values: Vec<Value>,
}

/// A rule assigning classes to every row whose raw value for the criterion
/// column is a member of the rule's value set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowStyleRule {
    pub criteria: RowCriteria,
    #[serde(default)]
    pub classes: Vec<String>,
}

/// Descriptor for one per-row action button.
///
/// `param` names the row field whose value populates the button's `args`
/// data attribute; every other descriptor field is copied onto the button
/// as a data attribute for the external click handler to read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowButton {
    pub text: String,
    #[serde(default)]
    pub onclick: Option<String>,
    #[serde(default)]
    pub param: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Caller-supplied style configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Visual theme; unknown names fall back to the default theme.
    #[serde(rename = "cssType")]
    pub theme: ThemeVariant,
    /// Raw style string applied to the table node.
    pub table_style: Option<String>,
    /// Multi-level grouping with per-level sort directions.
    pub group_by: Vec<GroupKey>,
    /// Explicit aggregate columns; derived from `cols[*].aggregate` when
    /// absent.
    #[serde(rename = "aggregateCols")]
    pub aggregate_cols: Option<BTreeMap<String, Aggregate>>,
    pub row_styles: Vec<RowStyleRule>,
    pub row_buttons: Vec<RowButton>,
    /// Transposed mode only: classes for the body row built from each
    /// original column, keyed by the original column key.
    pub col_classes: BTreeMap<String, Vec<String>>,
    /// Transposed mode only: the column supplying the header labels.
    pub heading_col: Option<String>,
}

impl StyleConfig {
    /// Parse a style configuration from its JSON wire form.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        serde_json::from_str(text).map_err(|e| Error::InvalidStyle(e.to_string()))
    }
}
