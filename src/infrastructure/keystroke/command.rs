//! Shared runner for external paste tools

use std::process::Stdio;

use tokio::process::Command;

use crate::application::ports::KeystrokeError;

/// Run `tool` with `args`, discarding its output
pub(super) async fn run_tool(tool: &str, args: &[&str]) -> Result<(), KeystrokeError> {
    let status = Command::new(tool)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                KeystrokeError::ToolNotFound(tool.to_string())
            } else {
                KeystrokeError::InjectionFailed(e.to_string())
            }
        })?;

    if !status.success() {
        return Err(KeystrokeError::InjectionFailed(format!(
            "{} exited with status: {}",
            tool, status
        )));
    }

    Ok(())
}
