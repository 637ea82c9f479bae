use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Lines of stderr kept in a failure message; the full output goes to the
/// debug log.
const TAIL_LINES: usize = 20;

/// Finds the first of `candidates` that is executable from `PATH`.
pub(crate) fn discover(tool: &'static str, candidates: &[&str]) -> Result<PathBuf> {
    for exe in candidates {
        if let Ok(path) = which::which(exe) {
            tracing::trace!(tool, path = %path.display(), "Discovered executable");
            return Ok(path);
        }
    }
    tracing::debug!(tool, ?candidates, "Executable not found in PATH");
    exn::bail!(ErrorKind::NotFound(tool));
}

/// Runs `program` to completion, capturing its output.
///
/// A non-zero exit (or death by signal) becomes [`ErrorKind::Failed`] with
/// the tail of the tool's stderr as the message.
pub(crate) fn run(tool: &'static str, program: &Path, args: &[OsString]) -> Result<Output> {
    tracing::debug!(tool, command = %render(program, args), "Running external tool");
    let output = Command::new(program).args(args).output().or_raise(|| ErrorKind::Spawn(tool))?;
    if !output.stdout.is_empty() {
        tracing::debug!(tool, stdout = %String::from_utf8_lossy(&output.stdout), "Tool output");
    }
    if !output.stderr.is_empty() {
        tracing::debug!(tool, stderr = %String::from_utf8_lossy(&output.stderr), "Tool diagnostics");
    }
    if !output.status.success() {
        exn::bail!(ErrorKind::Failed {
            tool,
            status: output.status.to_string(),
            message: tail(&output),
        });
    }
    Ok(output)
}

fn tail(output: &Output) -> String {
    let text = match output.stderr.is_empty() {
        true => String::from_utf8_lossy(&output.stdout),
        false => String::from_utf8_lossy(&output.stderr),
    };
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(TAIL_LINES);
    match lines[start..].join("\n") {
        empty if empty.is_empty() => "no output".to_string(),
        message => message,
    }
}

fn render(program: &Path, args: &[OsString]) -> String {
    std::iter::once(program.as_os_str())
        .chain(args.iter().map(OsString::as_os_str))
        .map(|part| part.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds an argument vector from anything path- or string-like.
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        vec![$(::std::ffi::OsString::from($arg)),*]
    };
}
pub(crate) use args;
