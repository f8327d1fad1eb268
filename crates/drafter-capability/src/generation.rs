//! Text-generation capability contract

use crate::message::Message;
use drafter_state::CapabilityError;

/// External text-generation capability
///
/// Implementations wrap whatever backend actually serves the calls; the
/// workflow only depends on this contract. The structured variant returns
/// raw JSON which callers deserialize into their payload type via
/// [`crate::payload::parse_payload`].
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate free text from a message sequence
    async fn invoke(&self, messages: &[Message]) -> Result<String, CapabilityError>;

    /// Generate a structured response from a message sequence
    async fn invoke_structured(
        &self,
        messages: &[Message],
    ) -> Result<serde_json::Value, CapabilityError>;
}
