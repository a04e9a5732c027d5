//! Open a file in the platform's default viewer.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use tracing::debug;

/// Errors that can occur when launching the external viewer.
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Build the launcher command for `path` on this platform.
pub fn opener_command(path: &Path) -> Command {
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

/// Launch the default viewer for `path` without waiting for it.
///
/// The launcher's output is discarded so it cannot draw over the TUI.
pub fn open_external(path: &Path) -> Result<(), OpenError> {
    if !path.exists() {
        return Err(OpenError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut cmd = opener_command(path);
    let program = cmd.get_program().to_string_lossy().into_owned();
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| OpenError::Launch {
            program: program.clone(),
            source,
        })?;

    debug!(program = %program, path = %path.display(), "launched external viewer");
    // Reap the launcher in the background.
    thread::spawn(move || {
        let _ = child.wait();
    });
    Ok(())
}
