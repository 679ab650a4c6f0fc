// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared panel type definitions.

/// Panels that can be docked in the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelType {
    /// OpenGL scene viewport
    Viewport,
    /// Scene tree
    Hierarchy,
    /// Project folders
    Project,
    /// Properties of the selected entity
    Inspector,
    /// Log output and command line
    Console,
}

impl PanelType {
    /// Every panel, in Window menu order
    pub const ALL: [PanelType; 5] = [
        Self::Viewport,
        Self::Hierarchy,
        Self::Project,
        Self::Inspector,
        Self::Console,
    ];

    /// Get the display name for this panel type
    pub fn name(&self) -> &'static str {
        match self {
            Self::Viewport => "Viewport",
            Self::Hierarchy => "Hierarchy",
            Self::Project => "Project",
            Self::Inspector => "Inspector",
            Self::Console => "Console",
        }
    }

    /// Get the icon for this panel type
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Viewport => "\u{1f3a5}",  // camera
            Self::Hierarchy => "\u{1f4c2}", // open folder
            Self::Project => "\u{1f4c1}",   // folder
            Self::Inspector => "\u{2699}",  // cog
            Self::Console => "\u{1f4bb}",   // terminal
        }
    }
}
