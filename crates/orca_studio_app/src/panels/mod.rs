// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor panel implementations.

pub mod console;
mod hierarchy;
mod inspector;
mod project_browser;
mod viewport;

pub use console::ConsolePanel;
pub use hierarchy::HierarchyPanel;
pub use inspector::InspectorPanel;
pub use project_browser::ProjectBrowserPanel;
pub use viewport::ViewportPanel;
