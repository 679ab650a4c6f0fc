// SPDX-License-Identifier: MIT OR Apache-2.0
//! Hierarchy panel - Scene tree view.

use crate::state::{EditorState, EntityId};
use std::collections::HashSet;

/// Index of an item in the hierarchy tree
pub type ItemId = usize;

/// One row of the scene tree
#[derive(Debug, Clone)]
pub struct HierarchyItem {
    /// Display text
    pub label: String,
    /// Entity behind the row; group rows have none
    pub entity: Option<EntityId>,
    /// Check box state for checkable rows
    pub checked: Option<bool>,
    /// Child rows
    pub children: Vec<ItemId>,
}

/// The hierarchy panel showing the scene tree
pub struct HierarchyPanel {
    items: Vec<HierarchyItem>,
    roots: Vec<ItemId>,
    /// Search filter
    pub filter: String,
    /// Expanded rows
    expanded: HashSet<ItemId>,
    /// Highlighted row
    selected: Option<ItemId>,
}

impl HierarchyPanel {
    /// Panel showing the sample scene, fully expanded
    pub fn new() -> Self {
        let mut panel = Self::empty();

        let scene = panel.add(None, "SampleScene", None);
        panel.add(Some(scene), "Main Camera", Some(1));
        let environment = panel.add(Some(scene), "Environment", None);
        let terrain = panel.add(Some(environment), "Terrain", Some(2));
        panel.items[terrain].checked = Some(true);
        panel.add(Some(terrain), "Building 1", Some(3));

        panel.expanded = (0..panel.items.len()).collect();
        panel
    }

    /// Panel without a scene
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            roots: Vec::new(),
            filter: String::new(),
            expanded: HashSet::new(),
            selected: None,
        }
    }

    fn add(&mut self, parent: Option<ItemId>, label: &str, entity: Option<EntityId>) -> ItemId {
        let id = self.items.len();
        self.items.push(HierarchyItem {
            label: label.to_string(),
            entity,
            checked: None,
            children: Vec::new(),
        });
        match parent {
            Some(parent) => self.items[parent].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// Look up a row by its label
    pub fn find(&self, label: &str) -> Option<ItemId> {
        self.items.iter().position(|item| item.label == label)
    }

    /// Row data
    pub fn item(&self, id: ItemId) -> Option<&HierarchyItem> {
        self.items.get(id)
    }

    /// Highlight a row. Entity rows become the editor selection.
    pub fn select(&mut self, id: ItemId, state: &mut EditorState) {
        let Some(item) = self.items.get(id) else {
            return;
        };
        self.selected = Some(id);

        match item.entity {
            Some(entity) => {
                tracing::info!("Selected Entity ID: {entity}");
                state.selection = Some(entity);
            }
            None => tracing::info!("Selected non-entity item: {}", item.label),
        }
    }

    /// Render the hierarchy panel
    pub fn ui(&mut self, ui: &mut egui::Ui, state: &mut EditorState) {
        ui.add(
            egui::TextEdit::singleline(&mut self.filter)
                .hint_text("Search...")
                .desired_width(ui.available_width()),
        );

        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            if self.roots.is_empty() || state.project.is_none() {
                ui.add_enabled(false, egui::SelectableLabel::new(false, "No Scene Loaded"));
                return;
            }

            for root in self.roots.clone() {
                self.render_node(ui, root, state, 0);
            }
        });
    }

    fn matches_filter(&self, id: ItemId, filter: &str) -> bool {
        let item = &self.items[id];
        item.label.to_lowercase().contains(filter)
            || item.children.iter().any(|&child| self.matches_filter(child, filter))
    }

    fn render_node(
        &mut self,
        ui: &mut egui::Ui,
        id: ItemId,
        state: &mut EditorState,
        depth: usize,
    ) {
        let filter = self.filter.to_lowercase();
        if !filter.is_empty() && !self.matches_filter(id, &filter) {
            return;
        }

        let has_children = !self.items[id].children.is_empty();
        let is_expanded = self.expanded.contains(&id) || !filter.is_empty();

        ui.horizontal(|ui| {
            ui.add_space(depth as f32 * 16.0);

            if has_children {
                let icon = if is_expanded { "v" } else { ">" };
                if ui.small_button(icon).clicked() {
                    if is_expanded {
                        self.expanded.remove(&id);
                    } else {
                        self.expanded.insert(id);
                    }
                }
            } else {
                ui.add_space(20.0);
            }

            if let Some(checked) = self.items[id].checked.as_mut() {
                ui.checkbox(checked, "");
            }

            let label =
                egui::SelectableLabel::new(self.selected == Some(id), &self.items[id].label);
            if ui.add(label).clicked() {
                self.select(id, state);
            }
        });

        if is_expanded {
            for child in self.items[id].children.clone() {
                self.render_node(ui, child, state, depth + 1);
            }
        }
    }
}

impl Default for HierarchyPanel {
    fn default() -> Self {
        Self::new()
    }
}
