use crate::foundation::error::{DojoError, DojoResult};

/// Kind of entry in an editor tree panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A scene object or folder that may hold children.
    #[default]
    Node,
    /// A leaf asset file.
    File,
}

/// One entry of the hierarchy or project panel.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HierarchyItem {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional glyph shown before the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Node or file.
    #[serde(default)]
    pub kind: ItemKind,
    /// Whether children are shown.
    #[serde(default)]
    pub expanded: bool,
    /// Child entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<HierarchyItem>,
}

/// A flattened, visible row.
#[derive(Clone, Copy, Debug)]
pub struct HierarchyRow<'a> {
    /// Nesting level, 0 for roots.
    pub depth: usize,
    /// The entry shown.
    pub item: &'a HierarchyItem,
}

impl HierarchyRow<'_> {
    /// Left padding in pixels for a row at this depth.
    pub fn indent_px(&self, step: u32, base: u32) -> u32 {
        self.depth as u32 * step + base
    }
}

impl HierarchyItem {
    /// A collapsed leaf-capable node.
    pub fn node(id: &str, name: &str, icon: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.map(str::to_string),
            kind: ItemKind::Node,
            expanded: false,
            children: Vec::new(),
        }
    }

    /// A file leaf.
    pub fn file(id: &str, name: &str) -> Self {
        Self {
            kind: ItemKind::File,
            ..Self::node(id, name, None)
        }
    }

    /// Attach children and set the initial expansion flag.
    pub fn with_children(mut self, expanded: bool, children: Vec<HierarchyItem>) -> Self {
        self.expanded = expanded;
        self.children = children;
        self
    }

    /// `true` if the entry has children to expand.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Return a copy of `items` with the first entry matching `id` flipped.
///
/// Unchanged subtrees are cloned as-is; an unknown id yields an equal tree.
pub fn toggle(items: &[HierarchyItem], id: &str) -> Vec<HierarchyItem> {
    let mut out = items.to_vec();
    toggle_in_place(&mut out, id);
    out
}

/// Flip the expansion flag of the first entry matching `id`. Returns whether one was found.
pub fn toggle_in_place(items: &mut [HierarchyItem], id: &str) -> bool {
    for item in items.iter_mut() {
        if item.id == id {
            item.expanded = !item.expanded;
            return true;
        }
        if toggle_in_place(&mut item.children, id) {
            return true;
        }
    }
    false
}

/// Flatten the tree into the rows a panel would draw.
pub fn visible_rows(items: &[HierarchyItem]) -> Vec<HierarchyRow<'_>> {
    let mut rows = Vec::new();
    push_rows(items, 0, &mut rows);
    rows
}

fn push_rows<'a>(items: &'a [HierarchyItem], depth: usize, rows: &mut Vec<HierarchyRow<'a>>) {
    for item in items {
        rows.push(HierarchyRow { depth, item });
        if item.has_children() && item.expanded {
            push_rows(&item.children, depth + 1, rows);
        }
    }
}

/// Keep entries whose name contains `query` (case-insensitive) and their ancestors.
///
/// Ancestors of a match are expanded so the match is visible. An empty query returns
/// the tree unchanged.
pub fn filter(items: &[HierarchyItem], query: &str) -> Vec<HierarchyItem> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter_map(|item| filter_item(item, &needle))
        .collect()
}

fn filter_item(item: &HierarchyItem, needle: &str) -> Option<HierarchyItem> {
    let children: Vec<HierarchyItem> = item
        .children
        .iter()
        .filter_map(|c| filter_item(c, needle))
        .collect();
    let self_match = item.name.to_lowercase().contains(needle);
    if !self_match && children.is_empty() {
        return None;
    }
    let expanded = if children.is_empty() {
        item.expanded
    } else {
        true
    };
    Some(HierarchyItem {
        expanded,
        children,
        ..item.clone()
    })
}

/// Find an entry by id anywhere in the tree.
pub fn find<'a>(items: &'a [HierarchyItem], id: &str) -> Option<&'a HierarchyItem> {
    items.iter().find_map(|item| {
        if item.id == id {
            Some(item)
        } else {
            find(&item.children, id)
        }
    })
}

/// Reject empty or duplicate ids.
pub fn validate(items: &[HierarchyItem]) -> DojoResult<()> {
    fn walk<'a>(
        items: &'a [HierarchyItem],
        seen: &mut std::collections::BTreeSet<&'a str>,
    ) -> DojoResult<()> {
        for item in items {
            if item.id.trim().is_empty() {
                return Err(DojoError::validation("hierarchy item id must be non-empty"));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(DojoError::validation(format!(
                    "duplicate hierarchy item id '{}'",
                    item.id
                )));
            }
            if item.kind == ItemKind::File && item.has_children() {
                return Err(DojoError::validation(format!(
                    "file '{}' cannot have children",
                    item.id
                )));
            }
            walk(&item.children, seen)?;
        }
        Ok(())
    }
    walk(items, &mut std::collections::BTreeSet::new())
}

/// The sample scene shown in the hierarchy panel.
pub fn scene_hierarchy() -> Vec<HierarchyItem> {
    type Item = HierarchyItem;
    vec![
        Item::node("1", "Main Camera", Some("📷")),
        Item::node("2", "Directional Light", Some("💡")),
        Item::node("3", "Player", Some("🎮")).with_children(
            true,
            vec![
                Item::node("3-1", "PlayerModel", Some("🧊")),
                Item::node("3-2", "PlayerCamera", Some("📷")),
            ],
        ),
        Item::node("4", "Environment", Some("🌍")).with_children(
            true,
            vec![
                Item::node("4-1", "Ground", Some("🟫")),
                Item::node("4-2", "Sky", Some("🌤️")),
                Item::node("4-3", "Buildings", Some("🏢")).with_children(
                    false,
                    vec![
                        Item::node("4-3-1", "Building_01", Some("🏗️")),
                        Item::node("4-3-2", "Building_02", Some("🏗️")),
                    ],
                ),
            ],
        ),
        Item::node("5", "EventSystem", Some("⚡")),
    ]
}

/// The sample asset folders shown in the project panel.
pub fn project_folders() -> Vec<HierarchyItem> {
    type Item = HierarchyItem;
    vec![
        Item::node("1", "Assets", None).with_children(
            true,
            vec![
                Item::node("1-1", "Scenes", None)
                    .with_children(false, vec![Item::file("1-1-1", "MainScene.unity")]),
                Item::node("1-2", "Scripts", None).with_children(
                    false,
                    vec![
                        Item::file("1-2-1", "PlayerController.cs"),
                        Item::file("1-2-2", "GameManager.cs"),
                    ],
                ),
                Item::node("1-3", "Materials", None),
                Item::node("1-4", "Prefabs", None),
                Item::node("1-5", "Textures", None),
                Item::node("1-6", "Models", None),
            ],
        ),
        Item::node("2", "Packages", None),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/hierarchy/tree.rs"]
mod tests;
