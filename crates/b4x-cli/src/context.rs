//! Locating the project the tool was started for

use std::path::Path;

use b4x_core::ActionContext;
use b4x_fs::ProjectLayout;

use crate::error::Result;

/// Build the action context from the Objects folder (default: the current
/// directory) and the install folder (default: the executable's folder).
pub fn load(objects_dir: Option<&Path>, install_dir: Option<&Path>) -> Result<ActionContext> {
    let objects = match objects_dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()?,
    };

    let mut layout = ProjectLayout::new(&objects)?;
    let install = install_dir
        .map(Path::to_path_buf)
        .or_else(ProjectLayout::detect_install_dir);
    if let Some(dir) = install {
        layout = layout.with_install_dir(dir);
    }

    tracing::debug!(
        objects = %layout.objects_dir(),
        project = %layout.project_dir(),
        "Project layout"
    );
    Ok(ActionContext::load(layout)?)
}
