//! Table specification data model.
//!
//! The caller-supplied specification is validated once at this boundary:
//! unknown column type tags and structurally malformed input are rejected,
//! leaving the widget's previous good state untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;

/// Reserved row key holding a nested table specification.
pub const DETAIL_SPEC_KEY: &str = "detail_spec";
/// Reserved row key holding an arbitrary JSON payload.
pub const DETAIL_DATA_KEY: &str = "detail_data";

/// A row record: column key -> raw value.
///
/// `serde_json` is built with `preserve_order`, so key order survives.
pub type Row = Map<String, Value>;

/// Whether a row carries expandable detail content.
pub fn row_has_detail(row: &Row) -> bool {
    row.contains_key(DETAIL_SPEC_KEY) || row.contains_key(DETAIL_DATA_KEY)
}

/// Closed union of column types, each carrying only the fields its
/// formatting rule needs.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnKind {
    /// Currency-formatted number (`money`).
    Money { precision: usize, currency: String },
    /// Multi-slot currency cell rendered one line per slot (`money_2`).
    MoneyPair {
        precisions: Vec<usize>,
        currencies: Vec<String>,
    },
    /// Grouped decimal (`float`).
    Float { precision: usize },
    /// Decimal with five fixed fraction digits (`float_5`).
    ScaledFloat,
    /// Fraction rendered as a percentage (`percent`, `percent1`).
    Percent { precision: usize },
    /// Date normalized to `YYYY-MM-DD` (`date`).
    Date,
    /// Plain text, the default.
    Text,
}

impl ColumnKind {
    /// The wire-level type tag, carried on cells as a data attribute.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Money { .. } => "money",
            Self::MoneyPair { .. } => "money_2",
            Self::Float { .. } => "float",
            Self::ScaledFloat => "float_5",
            Self::Percent { .. } => "percent",
            Self::Date => "date",
            Self::Text => "text",
        }
    }

    /// Kinds that hold numbers, used for CSS alignment by the themes.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::Date | Self::Text)
    }
}

/// Footer/subtotal marker for a column: compute a sum, or show a literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Aggregate {
    /// The literal `"sum"`: arithmetic sum over the rows in scope.
    Sum,
    /// Any other string passes through unchanged as the displayed value.
    Label(String),
}

impl From<String> for Aggregate {
    fn from(s: String) -> Self {
        if s == "sum" { Self::Sum } else { Self::Label(s) }
    }
}

impl From<Aggregate> for String {
    fn from(aggregate: Aggregate) -> Self {
        match aggregate {
            Aggregate::Sum => "sum".to_string(),
            Aggregate::Label(s) => s,
        }
    }
}

/// Validated descriptor for one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub key: String,
    pub kind: ColumnKind,
    /// Header text; defaults to the column key.
    pub display_name: String,
    /// `false` excludes the column from rendering.
    pub show: bool,
    pub aggregate: Option<Aggregate>,
}

/// The caller-supplied table specification.
///
/// Immutable after acceptance except for the in-place row sort driven by
/// header clicks: row order may change, row field values never do.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSpec {
    pub caption: Option<String>,
    /// Columns in declaration order.
    pub cols: Vec<ColumnSpec>,
    pub rows: Vec<Row>,
}

impl TableSpec {
    /// Parse and validate a specification from its JSON wire form.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        let raw: RawTable =
            serde_json::from_str(text).map_err(|e| Error::InvalidData(e.to_string()))?;
        Self::from_raw(raw)
    }

    /// Validate a specification already parsed to a JSON value (used for
    /// nested detail specifications).
    pub fn from_value(value: Value) -> Result<Self, Error> {
        let raw: RawTable =
            serde_json::from_value(value).map_err(|e| Error::InvalidData(e.to_string()))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawTable) -> Result<Self, Error> {
        let mut cols = Vec::with_capacity(raw.cols.len());
        for (key, value) in raw.cols {
            let column: RawColumn = serde_json::from_value(value)
                .map_err(|e| Error::InvalidData(format!("column '{key}': {e}")))?;
            cols.push(column.into_spec(&key)?);
        }
        Ok(Self {
            caption: raw.caption,
            cols,
            rows: raw.rows,
        })
    }

    /// Look up a column descriptor by key.
    pub fn col(&self, key: &str) -> Option<&ColumnSpec> {
        self.cols.iter().find(|c| c.key == key)
    }
}

// =============================================================================
// Wire form
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
struct RawTable {
    #[serde(default)]
    caption: Option<String>,
    #[serde(default)]
    cols: Map<String, Value>,
    #[serde(default)]
    rows: Vec<Row>,
}

/// Wire-level type tags. Unknown tags fail deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawType {
    Money,
    #[serde(rename = "money_2")]
    Money2,
    Float,
    #[serde(rename = "float_5")]
    Float5,
    Percent,
    Percent1,
    Date,
    #[default]
    Text,
}

/// A scalar or an ordered sequence, as the wire allows for `precision`
/// and `currency`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(v) => vec![v],
            Self::Many(v) => v,
        }
    }

    fn first(&self) -> Option<&T> {
        match self {
            Self::One(v) => Some(v),
            Self::Many(v) => v.first(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawColumn {
    #[serde(rename = "type", default)]
    ctype: RawType,
    #[serde(default)]
    precision: Option<OneOrMany<usize>>,
    #[serde(default)]
    currency: Option<OneOrMany<String>>,
    #[serde(rename = "displayName", default)]
    display_name: Option<String>,
    #[serde(default = "default_true")]
    show: bool,
    #[serde(default)]
    aggregate: Option<Aggregate>,
}

fn default_true() -> bool {
    true
}

impl RawColumn {
    fn into_spec(self, key: &str) -> Result<ColumnSpec, Error> {
        let scalar_precision = self
            .precision
            .as_ref()
            .and_then(OneOrMany::first)
            .copied()
            .unwrap_or(0);

        let kind = match self.ctype {
            RawType::Money => ColumnKind::Money {
                precision: scalar_precision,
                currency: self
                    .currency
                    .as_ref()
                    .and_then(OneOrMany::first)
                    .cloned()
                    .unwrap_or_else(|| "USD".to_string()),
            },
            RawType::Money2 => {
                let currencies = self
                    .currency
                    .map(OneOrMany::into_vec)
                    .unwrap_or_default();
                if currencies.is_empty() {
                    return Err(Error::InvalidData(format!(
                        "column '{key}': money_2 requires at least one currency"
                    )));
                }
                let precisions = self.precision.map(OneOrMany::into_vec).unwrap_or_default();
                ColumnKind::MoneyPair {
                    precisions: if precisions.is_empty() {
                        vec![0]
                    } else {
                        precisions
                    },
                    currencies,
                }
            }
            RawType::Float => ColumnKind::Float {
                precision: scalar_precision,
            },
            RawType::Float5 => ColumnKind::ScaledFloat,
            RawType::Percent => ColumnKind::Percent {
                precision: scalar_precision,
            },
            RawType::Percent1 => ColumnKind::Percent { precision: 1 },
            RawType::Date => ColumnKind::Date,
            RawType::Text => ColumnKind::Text,
        };

        Ok(ColumnSpec {
            key: key.to_string(),
            kind,
            display_name: self.display_name.unwrap_or_else(|| key.to_string()),
            show: self.show,
            aggregate: self.aggregate,
        })
    }
}
