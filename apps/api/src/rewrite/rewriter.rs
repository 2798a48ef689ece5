//! Section rewriter: renders a section's policy and submits it to the generation oracle.

use tracing::{debug, info};

use crate::llm_client::{CompletionRequest, GenerationOracle, LlmError, MODEL, TEMPERATURE};
use crate::rewrite::policy::build_instructions;

/// Rewrites one section into LinkedIn prose.
///
/// The oracle's text is returned verbatim. A failed call or blank response is
/// an error; there is no fallback to empty content.
pub async fn rewrite_section(
    oracle: &dyn GenerationOracle,
    section_name: &str,
    content: &str,
    example_text: &str,
) -> Result<String, LlmError> {
    let instructions = build_instructions(section_name, content, example_text);
    info!(
        "Rewriting section {} with {:?} policy",
        section_name.to_uppercase(),
        instructions.policy
    );

    let request = CompletionRequest {
        model: MODEL,
        temperature: TEMPERATURE,
        system: &instructions.system,
        user: &instructions.user,
    };

    let text = oracle.complete(&request).await?;
    if text.trim().is_empty() {
        return Err(LlmError::EmptyContent);
    }

    debug!("Section {} rewritten ({} chars)", section_name, text.len());
    Ok(text)
}
