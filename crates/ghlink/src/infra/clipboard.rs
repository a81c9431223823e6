//! Clipboard integration.

use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};

/// Destination for a finished link.
pub trait ClipboardWriter {
    fn write(&mut self, text: &str) -> Result<()>;
}

/// System clipboard via `arboard`, falling back to platform copy tools when no display server
/// connection is available (SSH sessions, minimal Wayland setups).
pub struct Clipboard {
    native: Option<arboard::Clipboard>,
}

impl Clipboard {
    pub fn new() -> Self {
        let native = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(err) => {
                tracing::debug!(error = %err, "native clipboard unavailable");
                None
            }
        };
        Self { native }
    }
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardWriter for Clipboard {
    fn write(&mut self, text: &str) -> Result<()> {
        if let Some(native) = self.native.as_mut() {
            match native.set_text(text.to_owned()) {
                Ok(()) => return Ok(()),
                Err(err) => {
                    tracing::warn!(error = %err, "native clipboard rejected text, trying copy tools");
                    self.native = None;
                }
            }
        }

        write_with_tools(text)
    }
}

fn write_with_tools(text: &str) -> Result<()> {
    for tool in copy_tools() {
        match pipe_into(tool, text) {
            Ok(()) => {
                tracing::debug!(tool = tool[0], "copied with external tool");
                return Ok(());
            }
            Err(err) => {
                tracing::debug!(tool = tool[0], error = %format!("{err:#}"), "copy tool failed");
            }
        }
    }

    bail!("no clipboard backend accepted the text")
}

fn pipe_into(tool: &[&str], text: &str) -> Result<()> {
    let (program, args) = tool.split_first().context("copy tool has no program")?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("failed to spawn {program}"))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .with_context(|| format!("failed to write to {program}"))?;
    }

    let status = child
        .wait()
        .with_context(|| format!("{program} did not exit cleanly"))?;
    if !status.success() {
        bail!("{program} exited with {status}");
    }
    Ok(())
}

#[cfg(target_os = "macos")]
fn copy_tools() -> &'static [&'static [&'static str]] {
    &[&["pbcopy"]]
}

#[cfg(all(unix, not(target_os = "macos")))]
fn copy_tools() -> &'static [&'static [&'static str]] {
    &[
        &["wl-copy"],
        &["xclip", "-selection", "clipboard"],
        &["xsel", "--clipboard", "--input"],
    ]
}

#[cfg(target_os = "windows")]
fn copy_tools() -> &'static [&'static [&'static str]] {
    &[&["powershell.exe", "-NoProfile", "-Command", "Set-Clipboard"]]
}

#[cfg(not(any(unix, target_os = "windows")))]
fn copy_tools() -> &'static [&'static [&'static str]] {
    &[]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tool_is_an_error() {
        let err = pipe_into(&["ghlink-no-such-copy-tool"], "text").unwrap_err();
        assert!(format!("{err:#}").contains("failed to spawn ghlink-no-such-copy-tool"));
    }

    #[cfg(unix)]
    #[test]
    fn failing_tool_reports_status() {
        assert!(pipe_into(&["false"], "text").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn succeeding_tool_is_accepted() -> Result<()> {
        pipe_into(&["cat"], "https://github.com/acme/widget")
    }
}
