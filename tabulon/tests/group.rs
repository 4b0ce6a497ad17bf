use tabulon::prelude::*;

const DATA: &str = r#"{
    "cols": {
        "month": { "displayName": "Month" },
        "region": { "displayName": "Region" },
        "revenue": { "type": "money", "currency": "INR", "displayName": "Revenue", "aggregate": "sum" }
    },
    "rows": [
        { "month": "2025-01", "region": "North", "revenue": 120000 },
        { "month": "2025-01", "region": "South", "revenue": 98000 },
        { "month": "2025-02", "region": "North", "revenue": 145000 },
        { "month": "2025-02", "region": "South", "revenue": 110500 }
    ]
}"#;

fn grouped_view(style: &str) -> TableView {
    let view = TableView::new();
    view.set_data_json(DATA).unwrap();
    view.set_style_json(style).unwrap();
    view
}

fn rows_with_class(root: &Node, class: &str) -> Vec<Node> {
    root.children
        .iter()
        .filter(|n| n.has_class(class))
        .cloned()
        .collect()
}

// ============================================================================
// Partitioning
// ============================================================================

#[test]
fn test_groups_are_contiguous_despite_interleaved_rows() {
    let view = grouped_view(r#"{ "group_by": ["region"] }"#);
    let root = view.root();

    let labels: Vec<String> = rows_with_class(&root, "group-label")
        .iter()
        .map(|row| row.children[1].text.clone().unwrap_or_default())
        .collect();
    assert_eq!(labels, ["North", "South"]);
}

#[test]
fn test_grouped_column_leaves_the_grid() {
    let view = grouped_view(r#"{ "group_by": ["region"] }"#);
    let root = view.root();
    let id = view.id_string();

    assert!(find_node(&root, &format!("{id}-h-month")).is_some());
    assert!(find_node(&root, &format!("{id}-h-region")).is_none());
}

#[test]
fn test_group_direction_desc_reverses_group_order() {
    let view = grouped_view(r#"{ "group_by": [["region", "desc"]] }"#);
    let root = view.root();

    let labels: Vec<String> = rows_with_class(&root, "group-label")
        .iter()
        .map(|row| row.children[1].text.clone().unwrap_or_default())
        .collect();
    assert_eq!(labels, ["South", "North"]);
}

#[test]
fn test_multi_level_group_labels_join_values() {
    let view = grouped_view(r#"{ "group_by": ["region", "month"] }"#);
    let root = view.root();

    let labels: Vec<String> = rows_with_class(&root, "group-label")
        .iter()
        .map(|row| row.children[1].text.clone().unwrap_or_default())
        .collect();
    assert_eq!(
        labels,
        [
            "North / 2025-01",
            "North / 2025-02",
            "South / 2025-01",
            "South / 2025-02"
        ]
    );
}

// ============================================================================
// Collapse and expand
// ============================================================================

#[test]
fn test_members_hidden_until_group_expands() {
    let view = grouped_view(r#"{ "group_by": ["region"] }"#);
    let id = view.id_string();

    let first_member = find_node(&view.root(), &format!("{id}-r0")).unwrap().clone();
    assert!(first_member.hidden);

    view.handle_event(&Event::click(format!("{id}-toggle-g0")));
    let first_member = find_node(&view.root(), &format!("{id}-r0")).unwrap().clone();
    assert!(!first_member.hidden);

    // Rows of the still-collapsed second group stay hidden.
    let other = find_node(&view.root(), &format!("{id}-r1")).unwrap().clone();
    assert!(other.hidden);

    view.handle_event(&Event::click(format!("{id}-toggle-g0")));
    let first_member = find_node(&view.root(), &format!("{id}-r0")).unwrap().clone();
    assert!(first_member.hidden);
}

#[test]
fn test_group_toggle_emits_no_notices() {
    let view = grouped_view(r#"{ "group_by": ["region"] }"#);
    let id = view.id_string();
    let notices = view.handle_event(&Event::click(format!("{id}-toggle-g0")));
    assert!(notices.is_empty());
}

// ============================================================================
// Subtotals and footer
// ============================================================================

#[test]
fn test_each_group_gets_a_subtotal_row() {
    let view = grouped_view(r#"{ "group_by": ["region"] }"#);
    let root = view.root();

    let subtotals: Vec<String> = rows_with_class(&root, "group-total")
        .iter()
        .map(|row| row.children[2].text.clone().unwrap_or_default())
        .collect();
    assert_eq!(subtotals, ["₹2,65,000", "₹2,08,500"]);
}

#[test]
fn test_footer_sums_all_rows_regardless_of_grouping() {
    let view = grouped_view(r#"{ "group_by": ["region"] }"#);
    let root = view.root();

    let footer = rows_with_class(&root, "footer");
    assert_eq!(footer.len(), 1);
    assert_eq!(footer[0].children[2].text.as_deref(), Some("₹4,73,500"));
}

#[test]
fn test_total_label_merges_subtotal_into_group_header() {
    let view = grouped_view(
        r#"{
            "group_by": ["region"],
            "aggregateCols": { "region": "Total", "revenue": "sum" }
        }"#,
    );
    let root = view.root();

    // No dedicated label rows: the subtotal row heads each group, carrying
    // the group label in the first column without an aggregate.
    assert!(rows_with_class(&root, "group-label").is_empty());
    assert!(rows_with_class(&root, "group-total").is_empty());

    let headers = rows_with_class(&root, "group-header");
    assert_eq!(headers.len(), 2);
    assert_eq!(headers[0].children[1].text.as_deref(), Some("North"));
    assert_eq!(headers[0].children[2].text.as_deref(), Some("₹2,65,000"));
    assert_eq!(headers[1].children[1].text.as_deref(), Some("South"));
}

#[test]
fn test_explicit_aggregate_map_overrides_column_attributes() {
    // The explicit map omits revenue, so the column attribute must not
    // produce a footer.
    let view = grouped_view(r#"{ "aggregateCols": {} }"#);
    assert!(rows_with_class(&view.root(), "footer").is_empty());
}
