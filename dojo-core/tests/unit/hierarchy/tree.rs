use super::*;

fn names(rows: &[HierarchyRow<'_>]) -> Vec<String> {
    rows.iter().map(|r| r.item.name.clone()).collect()
}

#[test]
fn sample_trees_validate() {
    validate(&scene_hierarchy()).unwrap();
    validate(&project_folders()).unwrap();
}

#[test]
fn collapsed_children_are_hidden() {
    let items = scene_hierarchy();
    let rows = visible_rows(&items);
    assert_eq!(rows.len(), 10);
    assert!(!names(&rows).contains(&"Building_01".to_string()));
    assert_eq!(rows[3].depth, 1);
    assert_eq!(rows[3].indent_px(16, 8), 24);
}

#[test]
fn toggle_copies_and_flips_nested_node() {
    let items = scene_hierarchy();
    let toggled = toggle(&items, "4-3");
    assert!(!find(&items, "4-3").unwrap().expanded);
    assert!(find(&toggled, "4-3").unwrap().expanded);
    assert_eq!(visible_rows(&toggled).len(), 12);

    let back = toggle(&toggled, "4-3");
    assert_eq!(back, items);
    assert_eq!(toggle(&items, "nope"), items);
}

#[test]
fn filter_keeps_ancestors_of_matches() {
    let items = scene_hierarchy();
    let hits = filter(&items, "building_02");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Environment");
    let rows = visible_rows(&hits);
    assert_eq!(names(&rows), ["Environment", "Buildings", "Building_02"]);

    assert_eq!(filter(&items, "  "), items);
    assert!(filter(&items, "zzz").is_empty());
}

#[test]
fn files_cannot_hold_children() {
    let mut items = project_folders();
    items[0].children[0].children[0]
        .children
        .push(HierarchyItem::file("x", "x.cs"));
    assert!(validate(&items).is_err());
}
