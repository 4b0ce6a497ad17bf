use tabulon::theme::ThemeVariant;

#[test]
fn test_unknown_theme_falls_back_to_default() {
    assert_eq!(ThemeVariant::from_name("dark"), ThemeVariant::Dark);
    assert_eq!(ThemeVariant::from_name("neon"), ThemeVariant::Default);
}

#[test]
fn test_class_names_are_distinct() {
    let mut names: Vec<&str> = ThemeVariant::ALL.iter().map(|t| t.class_name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), ThemeVariant::ALL.len());
}

#[test]
fn test_style_text_is_memoized() {
    let first = ThemeVariant::Striped.style_text();
    let second = ThemeVariant::Striped.style_text();
    assert!(std::ptr::eq(first, second));
    assert!(first.contains("tbl-striped"));
}

#[test]
fn test_every_theme_right_aligns_numeric_cells() {
    for theme in ThemeVariant::ALL {
        let text = theme.style_text();
        assert!(text.contains("text-align: right"), "{theme:?}");
    }
}

#[test]
fn test_wire_deserialization_uses_fallback() {
    let theme: ThemeVariant = serde_json::from_str("\"compact\"").unwrap();
    assert_eq!(theme, ThemeVariant::Compact);
    let theme: ThemeVariant = serde_json::from_str("\"no-such-theme\"").unwrap();
    assert_eq!(theme, ThemeVariant::Default);
}
