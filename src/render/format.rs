use std::{
    io::{ErrorKind, Write},
    process::{Command, Stdio},
};

use tracing::{debug, warn};

use crate::error::{GenError, GenResult};

/// Post-processes rendered source before it is written.
pub trait SourceFormatter: Send + Sync {
    fn format(&self, table: &str, source: String) -> GenResult<String>;
}

/// Leaves the rendered source untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl SourceFormatter for Passthrough {
    fn format(&self, _table: &str, source: String) -> GenResult<String> {
        Ok(source)
    }
}

/// Pipes the source through an external `gofmt` compatible program
/// (reads stdin, writes stdout, non-zero exit on syntax errors). When the
/// program is not installed the source is passed through unchanged.
#[derive(Debug, Clone)]
pub struct Gofmt {
    program: String,
}

impl Gofmt {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl SourceFormatter for Gofmt {
    fn format(&self, table: &str, source: String) -> GenResult<String> {
        let failed = |message: String| GenError::Format {
            table: table.to_string(),
            message,
        };

        let spawned = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();
        let mut child = match spawned {
            Ok(child) => child,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(
                    table,
                    program = %self.program,
                    "formatter not found; writing unformatted source"
                );
                return Ok(source);
            }
            Err(err) => return Err(failed(format!("failed to run {}: {err}", self.program))),
        };

        // stdin is closed before waiting, and the child is always reaped even
        // when it stopped reading early.
        let written = child
            .stdin
            .take()
            .map_or(Ok(()), |mut stdin| stdin.write_all(source.as_bytes()));
        let output = child
            .wait_with_output()
            .map_err(|err| failed(format!("failed to wait for {}: {err}", self.program)))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(failed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        written.map_err(|err| failed(format!("failed to write to {}: {err}", self.program)))?;

        debug!(table, program = %self.program, "formatted source");
        String::from_utf8(output.stdout)
            .map_err(|err| failed(format!("{} produced invalid UTF-8: {err}", self.program)))
    }
}

#[cfg(test)]
mod tests {
    use super::{Gofmt, Passthrough, SourceFormatter};
    use crate::error::GenError;

    #[test]
    fn passthrough_returns_input() {
        let out = Passthrough
            .format("t", "package model\n".to_string())
            .expect("passthrough cannot fail");
        assert_eq!(out, "package model\n");
    }

    #[cfg(unix)]
    #[test]
    fn external_program_output_replaces_source() {
        let out = Gofmt::new("cat")
            .format("t", "package model\n".to_string())
            .expect("cat should echo input");
        assert_eq!(out, "package model\n");
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_fails_the_table() {
        let err = Gofmt::new("false")
            .format("jobs", "package model\n".to_string())
            .expect_err("false always fails");
        assert!(matches!(err, GenError::Format { ref table, .. } if table == "jobs"));
    }

    #[cfg(unix)]
    #[test]
    fn program_that_stops_reading_fails_the_table() {
        let err = Gofmt::new("true")
            .format("jobs", "x".repeat(1 << 20))
            .expect_err("a closed stdin should fail the write");
        assert!(matches!(err, GenError::Format { ref table, .. } if table == "jobs"));
        assert!(err.to_string().contains("failed to write to true"));
    }

    #[test]
    fn missing_program_passes_source_through() {
        let out = Gofmt::new("modelgen-no-such-formatter")
            .format("jobs", "package model\n".to_string())
            .expect("a missing formatter falls back to the raw source");
        assert_eq!(out, "package model\n");
    }
}
