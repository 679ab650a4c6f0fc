// SPDX-License-Identifier: MIT OR Apache-2.0
//! Orca project files and on-disk project scaffolding.
//!
//! A project is a directory holding one `<Name>.orca` JSON file plus the
//! `Scenes`, `Assets` and `Scripts` folders.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

/// Project file extension, without the dot
pub const PROJECT_EXTENSION: &str = "orca";

/// Engine version written into new projects
pub const ENGINE_VERSION: &str = "0.9.1";

/// Subdirectories created next to a new project file
pub const PROJECT_SUBDIRECTORIES: [&str; 3] = ["Scenes", "Assets", "Scripts"];

/// Project errors
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The project directory could not be created
    #[error("Failed to create project directory {path}: {source}")]
    CreateDirectory {
        /// Directory that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The project file could not be written
    #[error("Failed to write project file {path}: {source}")]
    Write {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The project file could not be read
    #[error("Failed to read project file {path}: {source}")]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The project file is not a valid Orca project
    #[error("Invalid project file {path}: {source}")]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Serialization error
    #[error("Failed to serialize project: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for project operations
pub type Result<T> = std::result::Result<T, ProjectError>;

/// Root of a `.orca` project file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectFile {
    /// Project display name
    pub project_name: String,
    /// Engine version the project was created with
    pub engine_version: String,
    /// Startup scene
    pub scene: Scene,
}

/// Scene description stored in the project file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Scene {
    /// Global environment settings
    pub environment: Environment,
    /// Objects in the scene
    pub game_objects: Vec<GameObject>,
    /// Parent/child structure
    pub hierarchy: Hierarchy,
}

/// Scene environment settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Environment {
    /// Skybox asset name
    pub skybox: String,
    /// Ambient light RGBA
    pub ambient_light: [f32; 4],
    /// Whether fog is on
    pub fog_enabled: bool,
    /// Gravity vector
    pub gravity: [f32; 3],
}

/// One object in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GameObject {
    /// Object name
    pub name: String,
    /// Unique id referenced by the hierarchy
    #[serde(rename = "GUID")]
    pub guid: String,
    /// Free-form tag
    pub tag: String,
    /// Placement
    pub transform: Transform,
    /// Attached components
    #[serde(default)]
    pub components: Vec<Component>,
}

/// Position, rotation (Euler degrees) and scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transform {
    /// Position
    pub position: [f32; 3],
    /// Rotation in degrees
    pub rotation: [f32; 3],
    /// Scale
    pub scale: [f32; 3],
}

/// A component entry. Properties are kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Component {
    /// Component type name
    #[serde(rename = "Type")]
    pub kind: String,
    /// Type-specific properties
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<serde_json::Value>,
    /// Script class for script components
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

/// Scene hierarchy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Hierarchy {
    /// GUIDs of the objects directly under the scene root
    pub root: Vec<String>,
}

impl ProjectFile {
    /// The starter scene: a main camera and a directional light.
    pub fn template(project_name: impl Into<String>) -> Self {
        let camera = GameObject {
            name: "MainCamera".to_string(),
            guid: Uuid::new_v4().to_string(),
            tag: "Camera".to_string(),
            transform: Transform {
                position: [0.0, 1.5, 5.0],
                rotation: [0.0, 180.0, 0.0],
                scale: [1.0, 1.0, 1.0],
            },
            components: vec![
                Component {
                    kind: "CameraComponent".to_string(),
                    properties: Some(json!({
                        "FOV": 60.0,
                        "NearPlane": 0.1,
                        "FarPlane": 1000.0
                    })),
                    class: None,
                },
                Component {
                    kind: "ScriptComponent".to_string(),
                    properties: None,
                    class: Some("CameraControl.java".to_string()),
                },
            ],
        };

        let light = GameObject {
            name: "DirectionalLight".to_string(),
            guid: Uuid::new_v4().to_string(),
            tag: "Light".to_string(),
            transform: Transform {
                position: [10.0, 10.0, 0.0],
                rotation: [-45.0, 45.0, 0.0],
                scale: [1.0, 1.0, 1.0],
            },
            components: vec![Component {
                kind: "LightComponent".to_string(),
                properties: Some(json!({
                    "Type": "Directional",
                    "Color": [1.0, 0.95, 0.9, 1.0],
                    "Intensity": 1.0
                })),
                class: None,
            }],
        };

        let hierarchy = Hierarchy {
            root: vec![camera.guid.clone(), light.guid.clone()],
        };

        Self {
            project_name: project_name.into(),
            engine_version: ENGINE_VERSION.to_string(),
            scene: Scene {
                environment: Environment {
                    skybox: "DefaultSky".to_string(),
                    ambient_light: [0.1, 0.1, 0.1, 1.0],
                    fog_enabled: false,
                    gravity: [0.0, -9.81, 0.0],
                },
                game_objects: vec![camera, light],
                hierarchy,
            },
        }
    }
}

/// Append `.orca` unless the path already ends with it (any case).
pub fn normalize_project_path(path: &Path) -> PathBuf {
    let has_extension = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(PROJECT_EXTENSION));
    if has_extension {
        return path.to_path_buf();
    }

    let mut raw = OsString::from(path.as_os_str());
    raw.push(".");
    raw.push(PROJECT_EXTENSION);
    PathBuf::from(raw)
}

/// Project name for a project file: the file name up to its first `.`.
pub fn project_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| name.split('.').next().map(str::to_string))
        .unwrap_or_default()
}

/// Create a new project at `path` (a `.orca` file path).
///
/// The containing directory must be creatable. Failing to create one of the
/// standard subdirectories only logs a warning.
pub fn create_project(path: &Path) -> Result<ProjectFile> {
    let project_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };

    std::fs::create_dir_all(&project_dir).map_err(|source| ProjectError::CreateDirectory {
        path: project_dir.clone(),
        source,
    })?;

    for sub in PROJECT_SUBDIRECTORIES {
        let sub_dir = project_dir.join(sub);
        if let Err(e) = std::fs::create_dir_all(&sub_dir) {
            tracing::warn!("Could not create {} directory {}: {e}", sub, sub_dir.display());
        }
    }

    let project = ProjectFile::template(project_name(path));
    let content = serde_json::to_string_pretty(&project)?;
    std::fs::write(path, content).map_err(|source| ProjectError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Created project file: {}", path.display());
    Ok(project)
}

/// Read and parse an existing project file.
pub fn open_project(path: &Path) -> Result<ProjectFile> {
    let content = std::fs::read_to_string(path).map_err(|source| ProjectError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ProjectError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
