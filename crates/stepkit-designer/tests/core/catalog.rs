use stepkit_core::Footprint;
use stepkit_designer::catalog::{find_icon, find_preset, search_icons, IconCategory, PALETTE};
use stepkit_designer::{EditorSession, ObjectTemplate};

#[test]
fn test_catalog_icon_template_adds_icon() {
    let entry = find_icon("coffee").unwrap();
    assert_eq!(entry.category, IconCategory::Food);

    let mut session = EditorSession::new();
    let id = session.add_from_template(entry.template());
    let obj = session.objects().get(id).unwrap();
    assert!(obj.is_icon());
    assert_eq!(obj.name, "Coffee");
    assert_eq!(obj.footprint, Footprint::ICON);
}

#[test]
fn test_preset_template_sizes_step() {
    let preset = find_preset("7x12").unwrap();
    assert_eq!(
        preset.template(),
        ObjectTemplate::Step {
            footprint: Footprint::new(7, 12)
        }
    );

    let mut session = EditorSession::new();
    let id = session.add_from_template(preset.template());
    let step = session.objects().get(id).unwrap();
    let attrs = step.as_step().unwrap();
    assert_eq!((attrs.size.width, attrs.size.height), (280.0, 480.0));
}

#[test]
fn test_search_with_empty_query_lists_everything() {
    assert_eq!(search_icons("", None).len(), 48);
    assert!(search_icons("zzz", None).is_empty());
}

#[test]
fn test_palette_starts_with_step_default() {
    assert_eq!(PALETTE[0], "#4F46E5");
    assert_eq!(PALETTE.len(), 8);
}
