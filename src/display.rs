use crate::error::RenderError;
use std::path::Path;
use std::process::Command;

/// The command used to hand a file to the desktop's default viewer.
fn viewer_command(path: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

/// Opens an image in the platform's default viewer and waits for the
/// launcher to return.
pub fn open_image(path: &Path) -> Result<(), RenderError> {
    let mut cmd = viewer_command(path);
    log::debug!("launching viewer: {:?}", cmd);

    let mut child = cmd
        .spawn()
        .map_err(|e| RenderError::Display(format!("failed to launch {:?}: {}", cmd.get_program(), e)))?;
    let status = child
        .wait()
        .map_err(|e| RenderError::Display(format!("failed to wait on viewer: {}", e)))?;

    if !status.success() {
        return Err(RenderError::Display(format!("viewer exited with {}", status)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_command_passes_path_last() {
        let cmd = viewer_command(Path::new("octree_plot.png"));
        let last = cmd.get_args().last().expect("Viewer command has no arguments");
        assert_eq!(last, "octree_plot.png");
    }
}
