//! Error taxonomy for the drafter workflow
//!
//! Three classes of failure:
//! - `WorkflowError::InvalidInput` - blank/missing input text; fatal, not retried
//! - `WorkflowError::Capability` - an external capability raised; wrapped with
//!   the failing stage and propagated (per-query search failures are caught
//!   inside the resolver instead)
//! - Malformed items (a tag without a name, a reference without content) are
//!   filtered at the producing boundary and never surface as errors

/// External capability failures
#[derive(Debug, thiserror::Error)]
pub enum CapabilityError {
    /// Text generation call failed
    #[error("generation failed: {0}")]
    Generation(String),

    /// Structured generation returned a payload that does not deserialize
    #[error("malformed structured response: {0}")]
    MalformedResponse(String),

    /// Named-entity extraction failed
    #[error("entity extraction failed: {0}")]
    Extraction(String),

    /// Web search call failed
    #[error("search failed: {0}")]
    Search(String),

    /// Prompt assembly failed
    #[error("prompt error: {0}")]
    Prompt(String),
}

/// Main workflow error type
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// Input text was empty or missing at a generator entry
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A required state field was missing when a node read it
    #[error("missing state field: {0}")]
    MissingField(&'static str),

    /// An external capability failed inside a named stage
    #[error("stage '{stage}' failed: {source}")]
    Capability {
        /// Node that was running when the capability failed
        stage: &'static str,
        /// Underlying capability failure
        #[source]
        source: CapabilityError,
    },

    /// Scheduler detected an inconsistent graph (no runnable node remains)
    #[error("workflow stalled: {0}")]
    Stalled(String),
}

impl WorkflowError {
    /// Wrap a capability failure with its stage name
    #[inline]
    #[must_use]
    pub fn capability(stage: &'static str, source: CapabilityError) -> Self {
        Self::Capability { stage, source }
    }

    /// Whether this error came from input validation
    #[inline]
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
