// SPDX-License-Identifier: MIT OR Apache-2.0
//! Studio look: the dark Orca palette applied to egui.

use egui::{Color32, Rounding, Stroke, Style, Visuals};

/// Named colors of the studio palette
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    /// Window and dock background (#1e1e1e)
    pub background: Color32,
    /// Panel and dock widget background (#252526)
    pub panel: Color32,
    /// Menu bar, status bar and title bars (#2d2d2d)
    pub bar: Color32,
    /// Text inputs and list backgrounds (#333333)
    pub input: Color32,
    /// Generic border (#333333)
    pub border: Color32,
    /// Border of inputs and group boxes (#444444)
    pub border_strong: Color32,
    /// Button face (#4a4a4a)
    pub button: Color32,
    /// Hovered button face (#555555)
    pub button_hover: Color32,

    /// Primary text (#dcdcdc)
    pub text: Color32,
    /// Hints, paths, dates (#808080)
    pub text_dim: Color32,

    /// Accent for selection and primary actions (#007acc)
    pub accent: Color32,
    /// Hovered accent (#008cd9)
    pub accent_hover: Color32,
    /// Hyperlinks (#88c0d0)
    pub link: Color32,

    /// "Ready" indicator (#00b000)
    pub success: Color32,
    /// Warning text
    pub warning: Color32,
    /// Error text
    pub error: Color32,

    /// X axis label (#ff6666)
    pub axis_x: Color32,
    /// Y axis label (#66ff66)
    pub axis_y: Color32,
    /// Z axis label (#6666ff)
    pub axis_z: Color32,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(0x1e, 0x1e, 0x1e),
            panel: Color32::from_rgb(0x25, 0x25, 0x26),
            bar: Color32::from_rgb(0x2d, 0x2d, 0x2d),
            input: Color32::from_rgb(0x33, 0x33, 0x33),
            border: Color32::from_rgb(0x33, 0x33, 0x33),
            border_strong: Color32::from_rgb(0x44, 0x44, 0x44),
            button: Color32::from_rgb(0x4a, 0x4a, 0x4a),
            button_hover: Color32::from_rgb(0x55, 0x55, 0x55),

            text: Color32::from_rgb(0xdc, 0xdc, 0xdc),
            text_dim: Color32::from_rgb(0x80, 0x80, 0x80),

            accent: Color32::from_rgb(0x00, 0x7a, 0xcc),
            accent_hover: Color32::from_rgb(0x00, 0x8c, 0xd9),
            link: Color32::from_rgb(0x88, 0xc0, 0xd0),

            success: Color32::from_rgb(0x00, 0xb0, 0x00),
            warning: Color32::from_rgb(255, 193, 7),
            error: Color32::from_rgb(244, 67, 54),

            axis_x: Color32::from_rgb(0xff, 0x66, 0x66),
            axis_y: Color32::from_rgb(0x66, 0xff, 0x66),
            axis_z: Color32::from_rgb(0x66, 0x66, 0xff),
        }
    }
}

/// Studio theme: palette plus sizing
#[derive(Debug, Clone)]
pub struct EditorTheme {
    /// Palette
    pub colors: ThemeColors,
    /// Window rounding
    pub panel_rounding: f32,
    /// Button and input rounding
    pub widget_rounding: f32,
    /// Border width
    pub border_width: f32,
    /// Item spacing
    pub item_spacing: f32,
}

impl Default for EditorTheme {
    fn default() -> Self {
        Self {
            colors: ThemeColors::default(),
            panel_rounding: 4.0,
            widget_rounding: 3.0,
            border_width: 1.0,
            item_spacing: 6.0,
        }
    }
}

impl EditorTheme {
    /// Convert to egui Style
    pub fn to_egui_style(&self) -> Style {
        let mut style = Style {
            visuals: self.to_egui_visuals(),
            ..Style::default()
        };

        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(10.0, 4.0);
        style.spacing.indent = 16.0;

        style
    }

    /// Convert to egui Visuals
    pub fn to_egui_visuals(&self) -> Visuals {
        let colors = &self.colors;
        let mut visuals = Visuals::dark();

        visuals.window_fill = colors.panel;
        visuals.window_stroke = Stroke::new(self.border_width, colors.border_strong);
        visuals.window_rounding = Rounding::same(self.panel_rounding);
        visuals.panel_fill = colors.panel;

        let widget_rounding = Rounding::same(self.widget_rounding);

        visuals.widgets.noninteractive.bg_fill = colors.panel;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(self.border_width, colors.border);
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, colors.text);
        visuals.widgets.noninteractive.rounding = widget_rounding;

        visuals.widgets.inactive.bg_fill = colors.button;
        visuals.widgets.inactive.weak_bg_fill = colors.button;
        visuals.widgets.inactive.bg_stroke = Stroke::new(self.border_width, colors.border_strong);
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, colors.text);
        visuals.widgets.inactive.rounding = widget_rounding;

        visuals.widgets.hovered.bg_fill = colors.button_hover;
        visuals.widgets.hovered.weak_bg_fill = colors.button_hover;
        visuals.widgets.hovered.bg_stroke = Stroke::new(self.border_width, colors.accent);
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, Color32::WHITE);
        visuals.widgets.hovered.rounding = widget_rounding;

        visuals.widgets.active.bg_fill = colors.accent;
        visuals.widgets.active.weak_bg_fill = colors.accent;
        visuals.widgets.active.bg_stroke = Stroke::new(self.border_width, colors.accent_hover);
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);
        visuals.widgets.active.rounding = widget_rounding;

        visuals.widgets.open.bg_fill = colors.bar;
        visuals.widgets.open.weak_bg_fill = colors.bar;
        visuals.widgets.open.bg_stroke = Stroke::new(self.border_width, colors.accent);
        visuals.widgets.open.fg_stroke = Stroke::new(1.0, colors.text);
        visuals.widgets.open.rounding = widget_rounding;

        visuals.selection.bg_fill = colors.accent;
        visuals.selection.stroke = Stroke::new(1.0, Color32::WHITE);

        visuals.override_text_color = Some(colors.text);
        visuals.hyperlink_color = colors.link;
        visuals.warn_fg_color = colors.warning;
        visuals.error_fg_color = colors.error;

        visuals.extreme_bg_color = colors.input;
        visuals.faint_bg_color = colors.bar;

        visuals
    }

    /// Apply this theme to an egui context
    pub fn apply(&self, ctx: &egui::Context) {
        ctx.set_style(self.to_egui_style());
    }

    /// Frame for the menu bar and status bar
    pub fn bar_frame(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.colors.bar)
            .inner_margin(egui::Margin::symmetric(6.0, 3.0))
    }
}
