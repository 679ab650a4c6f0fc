// SPDX-License-Identifier: MIT OR Apache-2.0
//! Inspector panel - Properties of the selected entity.

use crate::state::{EditorState, EntityId};
use crate::theme::ThemeColors;
use std::collections::HashMap;

/// Tags offered in the Static section
pub const TAGS: [&str; 1] = ["Nothing"];
/// Layers offered in the Static section
pub const LAYERS: [&str; 1] = ["Default"];
/// Range of the terrain pixel error slider
pub const PIXEL_ERROR_RANGE: std::ops::RangeInclusive<u32> = 1..=500;

/// Editable values shown for one entity
#[derive(Debug, Clone, PartialEq)]
pub struct EntityProperties {
    /// Tag
    pub tag: String,
    /// Layer
    pub layer: String,
    /// Position
    pub position: [f32; 3],
    /// Rotation in degrees
    pub rotation: [f32; 3],
    /// Scale
    pub scale: [f32; 3],
    /// Terrain pixel error
    pub pixel_error: u32,
    /// Mesh material
    pub material: String,
    /// Mesh casts shadows
    pub cast_shadows: bool,
}

impl Default for EntityProperties {
    fn default() -> Self {
        Self {
            tag: TAGS[0].to_string(),
            layer: LAYERS[0].to_string(),
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
            pixel_error: 50,
            material: "DefaultMaterial".to_string(),
            cast_shadows: false,
        }
    }
}

/// Display name of an entity
pub fn entity_name(id: EntityId) -> String {
    format!("Entity_{id}")
}

/// The inspector panel
pub struct InspectorPanel {
    /// Entity the panel was last drawn for
    inspected: Option<EntityId>,
    /// Values per entity, created on first inspection
    properties: HashMap<EntityId, EntityProperties>,
    colors: ThemeColors,
}

impl InspectorPanel {
    /// Create a new inspector panel
    pub fn new() -> Self {
        Self {
            inspected: None,
            properties: HashMap::new(),
            colors: ThemeColors::default(),
        }
    }

    /// Follow the editor selection. Returns whether the inspected entity
    /// changed.
    pub fn sync(&mut self, state: &EditorState) -> bool {
        if self.inspected == state.selection {
            return false;
        }

        self.inspected = state.selection;
        if let Some(id) = self.inspected {
            tracing::info!("Inspecting Entity ID: {id} ({})", entity_name(id));
            self.properties.entry(id).or_default();
        }
        true
    }

    /// Values of an inspected entity
    pub fn properties(&self, id: EntityId) -> Option<&EntityProperties> {
        self.properties.get(&id)
    }

    /// Render the inspector panel
    pub fn ui(&mut self, ui: &mut egui::Ui, state: &EditorState) {
        self.sync(state);

        let Some(id) = self.inspected else {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new("Select an Entity in the Hierarchy")
                        .italics()
                        .color(self.colors.text_dim),
                );
            });
            return;
        };

        let colors = self.colors.clone();
        let props = self.properties.entry(id).or_default();

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.label(egui::RichText::new(entity_name(id)).size(20.0).strong());
            ui.add_space(6.0);

            section(ui, &colors, "Static", |ui| {
                egui::Grid::new("inspector_static").num_columns(2).show(ui, |ui| {
                    ui.label("Tag");
                    combo(ui, "inspector_tag", &mut props.tag, &TAGS);
                    ui.end_row();

                    ui.label("Layer");
                    combo(ui, "inspector_layer", &mut props.layer, &LAYERS);
                    ui.end_row();
                });
            });

            section(ui, &colors, "Transform", |ui| {
                vector_row(ui, &colors, "Position", &mut props.position);
                vector_row(ui, &colors, "Rotation", &mut props.rotation);
                vector_row(ui, &colors, "Scale", &mut props.scale);
            });

            section(ui, &colors, "Terrain", |ui| {
                ui.label(format!("Pixel Error: {}", props.pixel_error));
                ui.add(
                    egui::Slider::new(&mut props.pixel_error, PIXEL_ERROR_RANGE).show_value(false),
                );
            });

            section(ui, &colors, "Mesh Renderer", |ui| {
                ui.horizontal(|ui| {
                    ui.label("Material:");
                    let mut material = props.material.clone();
                    ui.add_enabled(
                        false,
                        egui::TextEdit::singleline(&mut material).desired_width(140.0),
                    );
                    if ui.small_button("...").on_hover_text("Select material").clicked() {
                        tracing::debug!("Material picker requested for {}", entity_name(id));
                    }
                });
                ui.checkbox(&mut props.cast_shadows, "Cast Shadows");
            });

            ui.add_space(12.0);
            ui.vertical_centered_justified(|ui| {
                if ui.button("+ Add Component").clicked() {
                    tracing::info!("Add Component requested for {}", entity_name(id));
                }
            });
        });
    }
}

impl Default for InspectorPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn section(ui: &mut egui::Ui, colors: &ThemeColors, title: &str, body: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(1.0, colors.border_strong))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(title).strong().color(colors.link));
            body(ui);
        });
    ui.add_space(4.0);
}

fn combo(ui: &mut egui::Ui, id: &str, value: &mut String, options: &[&str]) {
    egui::ComboBox::from_id_salt(id)
        .selected_text(value.as_str())
        .show_ui(ui, |ui| {
            for option in options {
                ui.selectable_value(value, option.to_string(), *option);
            }
        });
}

fn vector_row(ui: &mut egui::Ui, colors: &ThemeColors, label: &str, value: &mut [f32; 3]) {
    ui.horizontal(|ui| {
        ui.add_sized([60.0, 18.0], egui::Label::new(label));
        let axes = [("X", colors.axis_x), ("Y", colors.axis_y), ("Z", colors.axis_z)];
        for ((axis, color), component) in axes.into_iter().zip(value.iter_mut()) {
            ui.label(egui::RichText::new(axis).color(color).strong());
            ui.add(egui::DragValue::new(component).speed(0.1).fixed_decimals(1));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_defaults() {
        let props = EntityProperties::default();
        assert_eq!(props.tag, "Nothing");
        assert_eq!(props.layer, "Default");
        assert_eq!(props.scale, [1.0; 3]);
        assert_eq!(props.pixel_error, 50);
        assert!(PIXEL_ERROR_RANGE.contains(&props.pixel_error));
        assert_eq!(props.material, "DefaultMaterial");
    }

    #[test]
    fn test_sync_follows_selection() {
        let mut inspector = InspectorPanel::new();
        let mut state = EditorState::open(Path::new("/nonexistent/Test.orca"));

        assert!(!inspector.sync(&state));
        assert!(inspector.properties(1).is_none());

        state.selection = Some(1);
        assert!(inspector.sync(&state));
        assert!(!inspector.sync(&state));
        assert!(inspector.properties(1).is_some());

        state.selection = None;
        assert!(inspector.sync(&state));
    }

    #[test]
    fn test_entity_name() {
        assert_eq!(entity_name(7), "Entity_7");
    }
}
