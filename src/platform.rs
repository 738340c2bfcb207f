// File: src/platform.rs
//! Host services the app hands work to: opening a link and sharing text.
//!
//! The desktop implementations shell out to whatever the OS provides. On
//! Android the Kotlin side performs both actions itself.
use std::io::{self, Write};
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("no handler available for {0}")]
    NoHandler(&'static str),
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program} exited with {status}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
    },
}

pub trait UrlOpener {
    fn open_url(&self, url: &str) -> Result<(), PlatformError>;
}

pub trait ShareSheet {
    fn share_text(&self, text: &str) -> Result<(), PlatformError>;
}

/// Hands a link to the system URL handler and waits for the handler to exit,
/// so a missing browser shows up as a non-zero status.
#[derive(Debug, Clone)]
pub struct SystemOpener {
    program: String,
    args: Vec<String>,
}

impl Default for SystemOpener {
    fn default() -> Self {
        if cfg!(target_os = "macos") {
            Self::with_command("open", vec![])
        } else if cfg!(target_os = "windows") {
            // The empty string is the window title `start` expects first.
            Self::with_command("cmd", vec!["/C", "start", ""])
        } else {
            Self::with_command("xdg-open", vec![])
        }
    }
}

impl SystemOpener {
    /// The URL is appended after `args`.
    pub fn with_command(program: &str, args: Vec<&str>) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl UrlOpener for SystemOpener {
    fn open_url(&self, url: &str) -> Result<(), PlatformError> {
        let launch_err = |source| PlatformError::Launch {
            program: self.program.clone(),
            source,
        };
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(launch_err)?;
        if status.success() {
            Ok(())
        } else {
            Err(PlatformError::Failed {
                program: self.program.clone(),
                status,
            })
        }
    }
}

/// Desktop stand-in for a share sheet: puts the text on the clipboard using
/// the first clipboard tool that can be launched.
#[derive(Debug, Clone)]
pub struct ClipboardShare {
    candidates: Vec<(String, Vec<String>)>,
}

impl Default for ClipboardShare {
    fn default() -> Self {
        let list: Vec<(&str, Vec<&str>)> = if cfg!(target_os = "macos") {
            vec![("pbcopy", vec![])]
        } else if cfg!(target_os = "windows") {
            vec![("clip", vec![])]
        } else {
            vec![
                ("wl-copy", vec![]),
                ("xclip", vec!["-selection", "clipboard"]),
                ("xsel", vec!["--clipboard", "--input"]),
            ]
        };
        Self::with_candidates(list)
    }
}

impl ClipboardShare {
    pub fn with_candidates(list: Vec<(&str, Vec<&str>)>) -> Self {
        Self {
            candidates: list
                .into_iter()
                .map(|(prog, args)| {
                    (
                        prog.to_string(),
                        args.iter().map(|a| a.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }

    fn pipe_into(program: &str, args: &[String], text: &str) -> Result<(), PlatformError> {
        let launch_err = |source| PlatformError::Launch {
            program: program.to_string(),
            source,
        };
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(launch_err)?;

        if let Some(mut stdin) = child.stdin.take()
            && let Err(source) = stdin.write_all(text.as_bytes())
        {
            drop(stdin);
            let _ = child.kill();
            let _ = child.wait();
            return Err(launch_err(source));
        }
        let status = child.wait().map_err(launch_err)?;
        if status.success() {
            Ok(())
        } else {
            Err(PlatformError::Failed {
                program: program.to_string(),
                status,
            })
        }
    }
}

impl ShareSheet for ClipboardShare {
    fn share_text(&self, text: &str) -> Result<(), PlatformError> {
        let mut last_err = None;
        for (program, args) in &self.candidates {
            match Self::pipe_into(program, args, text) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    log::debug!("Clipboard tool unavailable: {}", e);
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or(PlatformError::NoHandler("sharing")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_without_candidates_reports_no_handler() {
        let share = ClipboardShare::with_candidates(vec![]);
        assert!(matches!(
            share.share_text("hello"),
            Err(PlatformError::NoHandler(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_opener_exit_status_is_checked() {
        let ok = SystemOpener::with_command("true", vec![]);
        assert!(ok.open_url("http://preview/dune").is_ok());

        // `sh -c` takes the URL as $1 and ignores it.
        let no_handler = SystemOpener::with_command("sh", vec!["-c", "exit 4", "opener"]);
        match no_handler.open_url("http://preview/dune") {
            Err(PlatformError::Failed { program, status }) => {
                assert_eq!(program, "sh");
                assert_eq!(status.code(), Some(4));
            }
            other => panic!("expected failed status, got {:?}", other),
        }
        assert!(!crate::presenter::open_external(
            &no_handler,
            Some("http://preview/dune")
        ));
    }

    #[test]
    fn test_opener_missing_program_reports_launch_error() {
        let opener = SystemOpener::with_command("folio-no-such-opener", vec![]);
        assert!(matches!(
            opener.open_url("http://x"),
            Err(PlatformError::Launch { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_share_tool_that_stops_reading_is_reaped() {
        // More than a pipe buffer, so the write fails once the tool exits.
        let text = "x".repeat(1 << 20);
        let share = ClipboardShare::with_candidates(vec![("sh", vec!["-c", "exit 0"])]);
        assert!(matches!(
            share.share_text(&text),
            Err(PlatformError::Launch { .. })
        ));
    }

    #[test]
    fn test_share_with_missing_program_reports_launch_error() {
        let share = ClipboardShare::with_candidates(vec![("folio-no-such-clipboard-tool", vec![])]);
        assert!(matches!(
            share.share_text("hello"),
            Err(PlatformError::Launch { .. })
        ));
    }
}
