//! Plain-text rendering of a built node tree.
//!
//! A debugging and testing aid: lays tables out as aligned monospace
//! columns and tab bars as a bracketed title strip. Hidden nodes do not
//! render.

use unicode_width::UnicodeWidthStr;

use crate::node::{Node, NodeKind};

/// Render a node tree as plain text.
pub fn render_text(root: &Node) -> String {
    let mut out = String::new();
    render_into(root, &mut out);
    out
}

fn render_into(node: &Node, out: &mut String) {
    if node.hidden {
        return;
    }
    match node.kind {
        NodeKind::Table => render_table(node, out),
        NodeKind::Tabs => render_tabs(node, out),
        _ => {
            for child in &node.children {
                render_into(child, out);
            }
        }
    }
}

fn render_table(table: &Node, out: &mut String) {
    let mut grid: Vec<Vec<String>> = Vec::new();
    for child in &table.children {
        match child.kind {
            NodeKind::Caption => {
                out.push_str(child.text.as_deref().unwrap_or(""));
                out.push('\n');
            }
            NodeKind::HeaderRow | NodeKind::Row if !child.hidden => {
                grid.push(child.children.iter().map(cell_text).collect());
            }
            _ => {}
        }
    }

    let cols = grid.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; cols];
    for row in &grid {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }
    for row in &grid {
        let mut line = String::new();
        for (i, width) in widths.iter().enumerate() {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            line.push_str(cell);
            line.push_str(&" ".repeat(width - cell.width()));
            if i + 1 < widths.len() {
                line.push_str("  ");
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
}

fn render_tabs(tabs: &Node, out: &mut String) {
    for child in &tabs.children {
        match child.kind {
            NodeKind::TabBar => {
                let labels: Vec<String> = child
                    .children
                    .iter()
                    .map(|button| {
                        let title = button.text.as_deref().unwrap_or("");
                        if button.has_class("active") {
                            format!("[{title}]")
                        } else {
                            format!(" {title} ")
                        }
                    })
                    .collect();
                out.push_str(labels.join(" ").trim_end());
                out.push('\n');
            }
            NodeKind::TabPane if !child.hidden => {
                for grandchild in &child.children {
                    render_into(grandchild, out);
                }
            }
            _ => {}
        }
    }
}

/// Flatten a cell subtree to one line. Buttons render bracketed; cell-level
/// line breaks (multi-slot money values) collapse to a separator.
fn cell_text(cell: &Node) -> String {
    fn gather(node: &Node, out: &mut String) {
        if node.hidden {
            return;
        }
        if node.kind == NodeKind::Button {
            out.push('[');
            out.push_str(node.text.as_deref().unwrap_or(""));
            out.push(']');
            return;
        }
        if let Some(text) = &node.text {
            out.push_str(text);
        }
        for child in &node.children {
            gather(child, out);
        }
    }
    let mut text = String::new();
    gather(cell, &mut text);
    text.replace('\n', " / ")
}
