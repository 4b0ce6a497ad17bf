use tabulon::prelude::*;

const TABS: &str = r#"[
    { "title": "Overview", "kind": "summary" },
    {
        "title": "Regions",
        "tabs": [
            { "title": "North", "rows": 3 },
            { "title": "South", "rows": 2 }
        ]
    }
]"#;

fn sample_panel() -> TabPanel {
    let panel = TabPanel::new();
    panel.set_tabs_json(TABS).unwrap();
    panel
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_tabs_parse_with_payload_and_nesting() {
    let panel = sample_panel();
    let tabs = panel.tabs();
    assert_eq!(tabs.len(), 2);
    assert_eq!(tabs[0].title, "Overview");
    assert_eq!(tabs[0].payload["kind"], "summary");
    assert_eq!(tabs[1].tabs.as_ref().unwrap().len(), 2);
}

#[test]
fn test_title_accepts_id_alias() {
    let panel = TabPanel::new();
    panel.set_tabs_json(r#"[ { "id": "Settings" } ]"#).unwrap();
    assert_eq!(panel.tabs()[0].title, "Settings");
}

#[test]
fn test_malformed_tabs_keep_previous_entries() {
    let panel = sample_panel();
    assert!(panel.set_tabs_json("{ not json").is_err());
    assert_eq!(panel.tabs().len(), 2);
}

// ============================================================================
// Selection and lazy reveal
// ============================================================================

#[test]
fn test_nothing_selected_until_first_select() {
    let panel = sample_panel();
    assert_eq!(panel.active(), None);

    let id = panel.id_string();
    let root = panel.root();
    let pane = find_node(&root, &format!("{id}-pane-0")).unwrap();
    assert!(pane.hidden);
}

#[test]
fn test_leaf_select_notifies_once_with_payload() {
    let panel = sample_panel();
    let notices = panel.select(0).unwrap();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].path, vec![panel.id_string()]);
    assert_eq!(notices[0].pane, "Overview");
    assert_eq!(notices[0].spec["kind"], "summary");

    // Re-selecting an already revealed pane is silent.
    assert!(panel.select(0).unwrap().is_empty());
    assert_eq!(panel.active(), Some(0));
}

#[test]
fn test_select_cascades_into_new_child_panel() {
    let panel = sample_panel();
    let notices = panel.select(1).unwrap();

    // The nested panel materialized and auto-selected its first entry.
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].pane, "North");
    assert_eq!(notices[0].path, vec![panel.id_string(), "Regions".to_string()]);

    // Switching back and forth does not re-cascade.
    panel.select(0).unwrap();
    assert!(panel.select(1).unwrap().is_empty());
}

#[test]
fn test_select_out_of_range_errors() {
    let panel = sample_panel();
    assert!(matches!(panel.select(5), Err(Error::PathNotFound(_))));
    assert_eq!(panel.active(), None);
}

#[test]
fn test_active_button_marked_and_pane_shown() {
    let panel = sample_panel();
    panel.select(0).unwrap();

    let id = panel.id_string();
    let root = panel.root();
    assert!(find_node(&root, &format!("{id}-btn-0")).unwrap().has_class("active"));
    assert!(!find_node(&root, &format!("{id}-btn-1")).unwrap().has_class("active"));
    assert!(!find_node(&root, &format!("{id}-pane-0")).unwrap().hidden);
    assert!(find_node(&root, &format!("{id}-pane-1")).unwrap().hidden);
}

// ============================================================================
// Path navigation
// ============================================================================

#[test]
fn test_open_path_reveals_a_deep_branch() {
    let panel = sample_panel();
    let notices = panel.open_path(&["Regions", "South"]).unwrap();

    // The cascade reveals North first, then the requested South.
    assert_eq!(notices.len(), 2);
    assert_eq!(notices[0].pane, "North");
    assert_eq!(notices[1].pane, "South");
    assert_eq!(
        notices[1].path,
        vec![panel.id_string(), "Regions".to_string()]
    );
    assert_eq!(panel.active(), Some(1));
}

#[test]
fn test_open_path_unknown_title_errors() {
    let panel = sample_panel();
    assert!(matches!(
        panel.open_path(&["Bogus"]),
        Err(Error::PathNotFound(_))
    ));
    assert_eq!(panel.active(), None);
}

#[test]
fn test_open_path_failure_selects_nothing() {
    let panel = sample_panel();
    assert!(matches!(
        panel.open_path(&["Regions", "Bogus"]),
        Err(Error::PathNotFound(_))
    ));
    assert_eq!(panel.active(), None);

    // The failed call consumed nothing, so the branch still opens and its
    // one-shot reveal notices arrive intact.
    let notices = panel.open_path(&["Regions", "North"]).unwrap();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].pane, "North");
}

#[test]
fn test_open_path_into_leaf_errors() {
    let panel = sample_panel();
    assert!(matches!(
        panel.open_path(&["Overview", "Deeper"]),
        Err(Error::PathNotFound(_))
    ));
    assert_eq!(panel.active(), None);
}

// ============================================================================
// Event routing
// ============================================================================

#[test]
fn test_click_selects_tab() {
    let panel = sample_panel();
    let id = panel.id_string();

    let notices = panel.handle_event(&Event::click(format!("{id}-btn-0")));
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].pane, "Overview");
    assert_eq!(panel.active(), Some(0));
}

#[test]
fn test_clicks_route_into_nested_panels() {
    let panel = sample_panel();
    panel.select(1).unwrap();

    // Find the nested panel's second button in the built tree.
    let root = panel.root();
    let pane = find_node(&root, &format!("{}-pane-1", panel.id_string())).unwrap();
    let child_bar = &pane.children[0].children[0];
    let south_btn = child_bar.children[1].id.clone();

    let notices = panel.handle_event(&Event::click(south_btn));
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].pane, "South");

    // The parent re-spliced the child's tree: South's pane is now visible.
    let root = panel.root();
    let pane = find_node(&root, &format!("{}-pane-1", panel.id_string())).unwrap();
    let child_tabs = &pane.children[0];
    let south_pane = &child_tabs.children[2];
    assert!(!south_pane.hidden);
}
