//! Subprocess-backed generation gateway

use super::catalog::BackendCatalog;
use async_trait::async_trait;
use debate_application::{GatewayError, LlmGateway};
use debate_domain::BackendId;
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Runs one prompt through a backend CLI per call
///
/// The prompt goes to the child's stdin; the trimmed stdout is the answer.
/// Each call is a fresh process, so the gateway itself holds no session.
#[derive(Debug, Clone)]
pub struct CliLlmGateway {
    catalog: BackendCatalog,
    timeout: Duration,
}

impl CliLlmGateway {
    pub fn new(catalog: BackendCatalog, timeout: Duration) -> Self {
        Self { catalog, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn command_for(&self, backend: &BackendId) -> Result<Command, GatewayError> {
        let spec = self
            .catalog
            .get(backend)
            .ok_or_else(|| GatewayError::BackendUnavailable(format!("unknown backend '{}'", backend)))?;
        let (program, args) = spec.command.split_first().ok_or_else(|| {
            GatewayError::BackendUnavailable(format!("backend '{}' has no command", backend))
        })?;

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Linux: SIGTERM the child if this process dies without dropping it.
        #[cfg(target_os = "linux")]
        unsafe {
            cmd.pre_exec(|| {
                libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM);
                Ok(())
            });
        }

        Ok(cmd)
    }

    async fn run(&self, backend: &BackendId, prompt: &str) -> Result<String, GatewayError> {
        let mut cmd = self.command_for(backend)?;
        let mut child = cmd.spawn().map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                GatewayError::BackendUnavailable(format!("'{}' is not installed", backend))
            }
            _ => GatewayError::RequestFailed(format!("failed to start '{}': {}", backend, e)),
        })?;

        let stdin = child.stdin.take();
        let write = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(prompt.as_bytes()).await?;
                stdin.shutdown().await?;
            }
            Ok::<(), std::io::Error>(())
        };
        let (written, output) = tokio::join!(write, child.wait_with_output());

        let output = output
            .map_err(|e| GatewayError::RequestFailed(format!("'{}' failed: {}", backend, e)))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GatewayError::RequestFailed(format!(
                "'{}' exited with {}: {}",
                backend,
                output.status,
                stderr.trim()
            )));
        }
        if let Err(e) = written {
            // the child may legitimately stop reading before the whole prompt
            debug!("{}: stdin closed early: {}", backend, e);
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() {
            return Err(GatewayError::EmptyResponse(backend.to_string()));
        }
        Ok(text)
    }
}

#[async_trait]
impl LlmGateway for CliLlmGateway {
    async fn generate(&self, backend: &BackendId, prompt: &str) -> Result<String, GatewayError> {
        debug!("{}: sending prompt ({} bytes)", backend, prompt.len());
        match tokio::time::timeout(self.timeout, self.run(backend, prompt)).await {
            Ok(result) => result,
            Err(_) => Err(GatewayError::Timeout {
                backend: backend.to_string(),
                seconds: self.timeout.as_secs(),
            }),
        }
    }
}
