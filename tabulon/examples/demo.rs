//! Renders a small revenue table, sorts it by clicking the header, then
//! shows the grouped and transposed orientations.

use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use tabulon::prelude::*;
use tabulon::render_text;

const DATA: &str = r#"{
    "caption": "Monthly revenue",
    "cols": {
        "month": { "displayName": "Month" },
        "region": { "displayName": "Region", "aggregate": "Total" },
        "revenue": { "type": "money", "currency": "INR", "displayName": "Revenue", "aggregate": "sum" },
        "growth": { "type": "percent1", "displayName": "Growth" }
    },
    "rows": [
        { "month": "2025-01", "region": "North", "revenue": 120000, "growth": 0.041 },
        { "month": "2025-02", "region": "North", "revenue": 145000, "growth": 0.208 },
        { "month": "2025-01", "region": "South", "revenue": 98000, "growth": -0.012 },
        { "month": "2025-02", "region": "South", "revenue": 110500, "growth": 0.128 }
    ]
}"#;

fn main() {
    TermLogger::init(
        LevelFilter::Warn,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .ok();

    let view = TableView::new();
    view.begin_batch();
    if let Err(err) = view.set_data_json(DATA) {
        eprintln!("{err}");
        return;
    }
    if let Err(err) = view.set_style_json(r#"{ "cssType": "striped" }"#) {
        eprintln!("{err}");
        return;
    }
    view.end_batch();

    println!("{}", render_text(&view.root()));

    // Two clicks on the revenue header: ascending, then descending.
    let header = format!("{}-h-revenue", view.id_string());
    view.handle_event(&Event::click(&header));
    view.handle_event(&Event::click(&header));
    println!("sorted by revenue, descending:");
    println!("{}", render_text(&view.root()));

    if let Err(err) = view.set_style_json(r#"{ "cssType": "striped", "group_by": ["region"] }"#) {
        eprintln!("{err}");
        return;
    }
    println!("grouped by region:");
    println!("{}", render_text(&view.root()));

    view.set_style(StyleConfig::default());
    view.set_transpose(true);
    println!("transposed:");
    println!("{}", render_text(&view.root()));
}
