/// Convenience result type used across tilescript.
pub type ScriptResult<T> = Result<T, ScriptError>;

/// Top-level error taxonomy used by parsing, context lookups and image tools.
#[derive(thiserror::Error, Debug)]
pub enum ScriptError {
    /// A command received fewer fields than its grammar requires.
    #[error("'{command}' expects at least {expected} argument(s), got {found}")]
    InvalidArgumentCount {
        /// Command name as written in the script.
        command: &'static str,
        /// Minimum number of whitespace-separated fields.
        expected: usize,
        /// Number of fields actually present.
        found: usize,
    },

    /// A numeric field did not parse as a base-10 integer.
    #[error("expected '{0}' to be an integer")]
    NotAnInteger(String),

    /// A range was declared with a zero step.
    #[error("range step for axis '{0}' must be non-zero")]
    ZeroStep(String),

    /// Failure raised while interpreting a specific script line.
    ///
    /// The inner error is part of the message and is not reported again as a source.
    #[error("line {line}: {inner}")]
    AtLine {
        /// 1-based line number in the script.
        line: usize,
        /// Underlying failure.
        inner: Box<ScriptError>,
    },

    /// Lookup of a variable that was never assigned.
    #[error("undefined variable '{0}'")]
    UndefinedVariable(String),

    /// Lookup of an image name that was never declared.
    #[error("unknown img: '{0}'")]
    UnknownImage(String),

    /// The external image tool failed.
    #[error("image tool error: {0}")]
    Tool(String),

    /// IO failure while reading a script.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScriptError {
    /// Build a [`ScriptError::Tool`] value.
    pub fn tool(msg: impl Into<String>) -> Self {
        Self::Tool(msg.into())
    }

    /// Attach a 1-based script line number to `self`.
    pub fn at_line(self, line: usize) -> Self {
        Self::AtLine {
            line,
            inner: Box::new(self),
        }
    }

    /// Line number attached through [`ScriptError::at_line`], if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::AtLine { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// The error with any line context peeled off.
    pub fn root(&self) -> &ScriptError {
        match self {
            Self::AtLine { inner, .. } => inner.root(),
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
