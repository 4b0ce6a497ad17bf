//! Enumerated visual themes.
//!
//! The theme set is closed: a theme is one of the variants below, and an
//! unknown name in the style configuration falls back to [`ThemeVariant::Default`]
//! rather than erroring. Assembled style text is memoized per variant.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// The available visual themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Default,
    Dark,
    Compact,
    Striped,
    Minimal,
}

impl ThemeVariant {
    pub const ALL: [ThemeVariant; 5] = [
        Self::Default,
        Self::Dark,
        Self::Compact,
        Self::Striped,
        Self::Minimal,
    ];

    /// Resolve a theme by name, falling back to the default for unknown
    /// names (with a diagnostic, never an error).
    pub fn from_name(name: &str) -> Self {
        match name {
            "default" => Self::Default,
            "dark" => Self::Dark,
            "compact" => Self::Compact,
            "striped" => Self::Striped,
            "minimal" => Self::Minimal,
            other => {
                log::warn!("unknown theme '{other}', falling back to default");
                Self::Default
            }
        }
    }

    /// The class name carried on the table node.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Default => "tbl-default",
            Self::Dark => "tbl-dark",
            Self::Compact => "tbl-compact",
            Self::Striped => "tbl-striped",
            Self::Minimal => "tbl-minimal",
        }
    }

    /// Assembled style text for this theme, memoized per variant.
    pub fn style_text(self) -> &'static str {
        static CACHE: [OnceLock<String>; 5] = [const { OnceLock::new() }; 5];
        CACHE[self as usize].get_or_init(|| self.assemble())
    }

    fn assemble(self) -> String {
        let class = self.class_name();
        let mut text = String::new();
        // Base rules shared by every theme: numeric cells right-align, the
        // sorted header carries its indicator, detail rows indent.
        text.push_str(&format!(
            ".{class} {{ border-collapse: collapse; }}\n\
             .{class} td[data-type=\"money\"], .{class} td[data-type=\"money_2\"],\n\
             .{class} td[data-type=\"float\"], .{class} td[data-type=\"float_5\"],\n\
             .{class} td[data-type=\"percent\"] {{ text-align: right; }}\n\
             .{class} th.sorted {{ font-weight: bold; }}\n\
             .{class} tr.detail td {{ padding-left: 2em; }}\n\
             .{class} tr.group-label td, .{class} tr.group-header td {{ font-weight: bold; }}\n\
             .{class} tr.footer td {{ border-top: 2px solid; font-weight: bold; }}\n"
        ));
        match self {
            Self::Default => text.push_str(&format!(
                ".{class} th {{ background: #e8e8e8; }}\n\
                 .{class} td, .{class} th {{ border: 1px solid #ccc; padding: 2px 6px; }}\n"
            )),
            Self::Dark => text.push_str(&format!(
                ".{class} {{ background: #1e1e2e; color: #cdd6f4; }}\n\
                 .{class} th {{ background: #313244; }}\n\
                 .{class} td, .{class} th {{ border: 1px solid #45475a; padding: 2px 6px; }}\n"
            )),
            Self::Compact => text.push_str(&format!(
                ".{class} td, .{class} th {{ border: none; padding: 0 4px; }}\n"
            )),
            Self::Striped => text.push_str(&format!(
                ".{class} tr:nth-child(even) {{ background: #f4f4f4; }}\n\
                 .{class} td, .{class} th {{ border: 1px solid #ddd; padding: 2px 6px; }}\n"
            )),
            Self::Minimal => text.push_str(&format!(
                ".{class} th {{ border-bottom: 1px solid; }}\n\
                 .{class} td, .{class} th {{ padding: 1px 4px; }}\n"
            )),
        }
        text
    }
}

impl<'de> Deserialize<'de> for ThemeVariant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}
