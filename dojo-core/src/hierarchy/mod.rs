mod tree;

pub use tree::{
    HierarchyItem, HierarchyRow, ItemKind, filter, find, project_folders, scene_hierarchy,
    toggle, toggle_in_place, validate, visible_rows,
};
