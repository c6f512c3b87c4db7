//! Execution of the optional "check before create issue" script.
//!
//! The script body is written to a temporary executable file and run with
//! bash. Only the exit status matters; output is kept for logging.
use async_trait::async_trait;
use log::*;
use std::io::Write;

#[cfg(test)]
use mockall::automock;

/// Interpreter used for guard scripts.
pub const DEFAULT_INTERPRETER: &str = "bash";

/// Exit status and captured output of a finished script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptOutput {
    pub success: bool,
    /// `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ScriptOutput {
    /// Exit code as text, for error messages.
    pub fn status(&self) -> String {
        self.code
            .map(|code| code.to_string())
            .unwrap_or_else(|| "terminated by signal".to_string())
    }

    /// Captured stdout followed by stderr.
    pub fn combined_output(&self) -> String {
        format!("{}{}", self.stdout, self.stderr).trim().to_string()
    }
}

/// Runs arbitrary shell text.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ScriptRunner: Send + Sync {
    /// Run `script`. Launch failures are errors, non-zero exits are not.
    async fn run(&self, script: &str) -> std::io::Result<ScriptOutput>;
}

/// [`ScriptRunner`] backed by a temporary file and a real subprocess.
pub struct BashScriptRunner {
    interpreter: String,
}

impl BashScriptRunner {
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }
}

impl Default for BashScriptRunner {
    fn default() -> Self {
        Self::new(DEFAULT_INTERPRETER)
    }
}

#[async_trait]
impl ScriptRunner for BashScriptRunner {
    async fn run(&self, script: &str) -> std::io::Result<ScriptOutput> {
        let mut file = tempfile::Builder::new()
            .prefix("issue_creator_")
            .suffix(".sh")
            .tempfile()?;

        file.write_all(script.as_bytes())?;
        file.flush()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(
                file.path(),
                std::fs::Permissions::from_mode(0o755),
            )?;
        }

        debug!(
            "running guard script {} with {}",
            file.path().display(),
            self.interpreter
        );

        let output = tokio::process::Command::new(&self.interpreter)
            .arg(file.path())
            .output()
            .await?;

        // file is removed when dropped, after the process has exited
        drop(file);

        Ok(ScriptOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn successful_script() {
        let runner = BashScriptRunner::default();

        let output = runner.run("echo working day\nexit 0\n").await.unwrap();

        assert!(output.success);
        assert_eq!(output.code, Some(0));
        assert_eq!(output.stdout, "working day\n");
    }

    #[tokio::test]
    async fn failing_script_is_not_an_error() {
        let runner = BashScriptRunner::default();

        let output = runner
            .run("echo holiday >&2\nexit 3\n")
            .await
            .unwrap();

        assert!(!output.success);
        assert_eq!(output.code, Some(3));
        assert_eq!(output.status(), "3");
        assert_eq!(output.combined_output(), "holiday");
    }

    #[tokio::test]
    async fn missing_interpreter_is_an_error() {
        let runner = BashScriptRunner::new("/nonexistent/interpreter");

        let result = runner.run("exit 0").await;

        assert!(result.is_err());
    }

    #[test]
    fn signal_status_is_described() {
        let output = ScriptOutput {
            success: false,
            code: None,
            ..Default::default()
        };

        assert_eq!(output.status(), "terminated by signal");
    }
}
