use anyhow::{Context, Result};
use std::{
    path::Path,
    process::{Command, Stdio},
};
use tracing::info;

/// Open a written report in the platform's default viewer.
///
/// The viewer runs detached; this returns once it has been spawned.
pub fn present(path: &Path) -> Result<()> {
    let mut cmd = opener_command(path);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    let child = cmd
        .spawn()
        .with_context(|| format!("launching viewer for {}", path.display()))?;
    info!(pid = child.id(), path = %path.display(), "opened report");
    Ok(())
}

fn opener_command(path: &Path) -> Command {
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    #[cfg(target_os = "linux")]
    fn linux_uses_xdg_open() {
        let cmd = opener_command(Path::new("results/Chile_2020-03-02.html"));
        assert_eq!(cmd.get_program(), "xdg-open");
        let args: Vec<&OsStr> = cmd.get_args().collect();
        assert_eq!(args, vec![OsStr::new("results/Chile_2020-03-02.html")]);
    }
}
