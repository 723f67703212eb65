//! Controller side of the worker protocol: spawn a worker process and make
//! blocking one-request/one-response calls over its stdio.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use serde_json::Value;

use crate::error::{AdvisorError, ErrorCode};
use crate::server::rpc::{RpcRequest, RpcResponse};

const WORKER: &str = "worker";

pub struct WorkerClient {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    next_id: i64,
}

impl WorkerClient {
    /// Spawn `program args...` with piped stdin/stdout; stderr is inherited for logs.
    pub fn spawn<I, S>(program: impl AsRef<Path>, args: I) -> Result<Self, AdvisorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let mut command = Command::new(program.as_ref());
        command.args(args);
        Self::from_command(command)
    }

    /// Spawn a prepared command (environment, working directory) as the worker.
    pub fn from_command(mut command: Command) -> Result<Self, AdvisorError> {
        let program = command.get_program().to_string_lossy().into_owned();
        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| AdvisorError::upstream(WORKER, format!("failed to spawn {program}: {e}")))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| AdvisorError::upstream(WORKER, "worker stdin unavailable"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| AdvisorError::upstream(WORKER, "worker stdout unavailable"))?;
        tracing::info!(%program, pid = child.id(), "worker started");
        Ok(Self {
            child,
            stdin,
            stdout: BufReader::new(stdout),
            next_id: 1,
        })
    }

    /// Send one request and read exactly one response line.
    pub fn call_raw(&mut self, method: &str, params: Value) -> Result<RpcResponse, AdvisorError> {
        let request = RpcRequest::new(self.next_id, method, params);
        self.next_id += 1;
        let line = serde_json::to_string(&request)?;
        tracing::debug!(direction = "->", payload = %line, "worker io");
        self.stdin
            .write_all(line.as_bytes())
            .and_then(|_| self.stdin.write_all(b"\n"))
            .and_then(|_| self.stdin.flush())
            .map_err(|e| AdvisorError::upstream(WORKER, format!("write failed: {e}")))?;

        let mut reply = String::new();
        let read = self
            .stdout
            .read_line(&mut reply)
            .map_err(|e| AdvisorError::upstream(WORKER, format!("read failed: {e}")))?;
        if read == 0 {
            return Err(AdvisorError::upstream(WORKER, "worker closed its output"));
        }
        tracing::debug!(direction = "<-", payload = %reply.trim_end(), "worker io");
        serde_json::from_str(&reply).map_err(|e| AdvisorError::parse("worker response", e))
    }

    /// Like [Self::call_raw] but turns an error response into an [AdvisorError].
    pub fn call(&mut self, method: &str, params: Value) -> Result<Value, AdvisorError> {
        let response = self.call_raw(method, params)?;
        if let Some(error) = response.error {
            return Err(remote_error(error.error_code(), error.message));
        }
        Ok(response.result.unwrap_or(Value::Null))
    }

    /// Close stdin and wait for the worker to exit.
    pub fn shutdown(self) -> Result<Option<i32>, AdvisorError> {
        let Self {
            mut child, stdin, ..
        } = self;
        drop(stdin);
        let status = child
            .wait()
            .map_err(|e| AdvisorError::upstream(WORKER, format!("wait failed: {e}")))?;
        tracing::info!(code = ?status.code(), "worker exited");
        Ok(status.code())
    }
}

fn remote_error(code: Option<ErrorCode>, message: String) -> AdvisorError {
    match code {
        Some(ErrorCode::StateNotReady) => AdvisorError::StateNotReady(message),
        Some(ErrorCode::InvalidArgument) => AdvisorError::InvalidArgument(
            message.trim_start_matches("invalid argument: ").to_string(),
        ),
        Some(ErrorCode::InvalidParams) => AdvisorError::InvalidParams(
            message.trim_start_matches("invalid params: ").to_string(),
        ),
        Some(ErrorCode::MethodNotFound) => AdvisorError::MethodNotFound(
            message.trim_start_matches("Method not found: ").to_string(),
        ),
        _ => AdvisorError::upstream(WORKER, message),
    }
}
