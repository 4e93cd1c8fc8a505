//! Error/warning accumulator threaded through every data-gathering stage.
//!
//! Gathering routines never return `Err`: a hard failure (missing resource,
//! unsupported ecosystem) lands in `errors` and drives the non-zero exit code,
//! everything recoverable lands in `warnings`. One instance per evaluation run,
//! single writer.

#[derive(Debug, Default)]
pub struct Diagnostics {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Diagnostics {
    pub fn error(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        tracing::warn!(error = %msg, "recorded hard error");
        self.errors.push(msg);
    }

    pub fn warn(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        tracing::debug!(warning = %msg, "recorded warning");
        self.warnings.push(msg);
    }
}
