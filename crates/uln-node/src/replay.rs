//! # Operation Replay
//!
//! Reads JSON-lines operations, wraps each in an `OperationEnvelope`,
//! dispatches it through the handler and writes one JSON result per line.
//!
//! ```text
//! {"origin":"0xaa..","payload":"0x00000001..."}
//!   → {"correlation_id":"..","ok":true,"result":{"type":"path_deployed",..}}
//! ```
//!
//! A fatal error is reported and the replay continues; the caller decides
//! the exit status from the returned summary.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shared_types::{AccountId, OperationEnvelope};
use std::io::{BufRead, Write};
use tracing::{error, info};
use uln_manager::{
    ErrorKind, OperationResult, RawOperation, UlnError, UlnManagerApi, UlnManagerHandler,
};
use uuid::Uuid;

/// One input line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputLine {
    /// Account the environment attributes the operation to.
    #[serde(default)]
    pub origin: Option<AccountId>,
    /// Hex-encoded wire operation, `0x` prefix optional.
    pub payload: String,
}

impl InputLine {
    /// Build the envelope the handler consumes.
    pub fn into_envelope(self) -> Result<RawOperation, hex::FromHexError> {
        let digits = self.payload.strip_prefix("0x").unwrap_or(&self.payload);
        let bytes = hex::decode(digits)?;
        Ok(match self.origin {
            Some(origin) => OperationEnvelope::new(origin, bytes),
            None => OperationEnvelope::unattributed(bytes),
        })
    }
}

/// One output line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputLine {
    /// Correlation id of the envelope, or a fresh one for unreadable input.
    pub correlation_id: Uuid,
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Result on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<OperationResult>,
    /// Error message on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Error category on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    /// Set for integrity failures.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fatal: bool,
}

impl OutputLine {
    fn success(correlation_id: Uuid, result: OperationResult) -> Self {
        Self {
            correlation_id,
            ok: true,
            result: Some(result),
            error: None,
            kind: None,
            fatal: false,
        }
    }

    fn failure(correlation_id: Uuid, err: &UlnError) -> Self {
        Self {
            correlation_id,
            ok: false,
            result: None,
            error: Some(err.to_string()),
            kind: Some(err.kind()),
            fatal: err.is_fatal(),
        }
    }

    fn unreadable(message: String) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            ok: false,
            result: None,
            error: Some(message),
            kind: Some(ErrorKind::Rejected),
            fatal: false,
        }
    }
}

/// Counters for one replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Non-blank lines read.
    pub processed: usize,
    /// Operations that succeeded.
    pub succeeded: usize,
    /// Operations rejected without integrity impact.
    pub rejected: usize,
    /// Integrity failures.
    pub fatal: usize,
}

impl ReplaySummary {
    /// Whether any fatal error occurred.
    pub fn has_fatal(&self) -> bool {
        self.fatal > 0
    }
}

/// Replays JSON-lines operations through a handler.
pub struct Replayer<'h, S: UlnManagerApi> {
    handler: &'h UlnManagerHandler<S>,
}

impl<'h, S: UlnManagerApi> Replayer<'h, S> {
    /// Create a replayer over `handler`.
    pub fn new(handler: &'h UlnManagerHandler<S>) -> Self {
        Self { handler }
    }

    /// Process every line of `input`, writing results to `output`.
    pub fn replay<R: BufRead, W: Write>(&self, input: R, mut output: W) -> Result<ReplaySummary> {
        let mut summary = ReplaySummary::default();

        for (index, line) in input.lines().enumerate() {
            let line = line.with_context(|| format!("reading input line {}", index + 1))?;
            if line.trim().is_empty() {
                continue;
            }
            summary.processed += 1;

            let out = self.process(&line);
            match (out.ok, out.fatal) {
                (true, _) => summary.succeeded += 1,
                (false, true) => summary.fatal += 1,
                (false, false) => summary.rejected += 1,
            }

            serde_json::to_writer(&mut output, &out).context("writing result")?;
            output.write_all(b"\n").context("writing result")?;
        }

        output.flush().context("flushing results")?;
        info!(
            "[uln] replay done: {} processed, {} ok, {} rejected, {} fatal",
            summary.processed, summary.succeeded, summary.rejected, summary.fatal
        );
        Ok(summary)
    }

    fn process(&self, line: &str) -> OutputLine {
        let input: InputLine = match serde_json::from_str(line) {
            Ok(input) => input,
            Err(e) => return OutputLine::unreadable(format!("invalid input line: {}", e)),
        };
        let envelope = match input.into_envelope() {
            Ok(envelope) => envelope,
            Err(e) => return OutputLine::unreadable(format!("invalid payload hex: {}", e)),
        };

        match self.handler.handle(&envelope) {
            Ok(result) => OutputLine::success(envelope.correlation_id, result),
            Err(err) => {
                if err.is_fatal() {
                    error!("[uln] {} failed fatally: {}", envelope.correlation_id, err);
                }
                OutputLine::failure(envelope.correlation_id, &err)
            }
        }
    }
}
