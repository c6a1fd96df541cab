//! LLM provider implementations
//!
//! Each provider is implemented in its own module. They share the prompt,
//! the output schema, and the response validation defined here.

pub mod gemini;
pub mod ollama;
pub mod openai;

// Re-export providers for easy access
pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

use crate::error::{NameForgeError, Result};
use crate::types::{GenerationRequest, MAX_SCHEMA_NAMES, MIN_SCHEMA_NAMES};
use serde::Deserialize;
use serde_json::{json, Value};

/// System instruction sent with every generation request
pub const SYSTEM_INSTRUCTION: &str = "You are a startup name generator specialized in creating aesthetic, memorable names.

For each request:
1. Generate exactly 6 unique startup names based on the description and tone provided
2. Names should be short (1-2 words), memorable, and brandable
3. Include a mix of real words, compound words, and made-up words
4. Focus on names that would work well as domain names
5. Return ONLY the names in the specified JSON format

Examples of good names: Stripe, Notion, Vercel, Figma, Slack, Airtable, Canva, blvnk, nuvem, GrainWorks";

/// Prompt pair handed to a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePrompt {
    pub system: String,
    pub prompt: String,
}

/// Build the generation prompt for a request
pub fn build_name_prompt(request: &GenerationRequest) -> NamePrompt {
    NamePrompt {
        system: SYSTEM_INSTRUCTION.to_string(),
        prompt: format!(
            "Create 6 startup names for a company that does: {}.
The tone should be: {}.
Return only the names in the specified JSON format.",
            request.description,
            request.tone.description()
        ),
    }
}

/// JSON Schema of the expected response object
pub fn names_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "names": {
                "type": "array",
                "items": { "type": "string" },
                "minItems": MIN_SCHEMA_NAMES,
                "maxItems": MAX_SCHEMA_NAMES
            }
        },
        "required": ["names"],
        "additionalProperties": false
    })
}

#[derive(Debug, Deserialize)]
struct NamesPayload {
    names: Vec<String>,
}

/// Validate a provider's response text against the names schema.
///
/// Anything that does not match is an error; entries are never dropped or
/// padded to make the response fit.
pub fn parse_names(content: &str) -> Result<Vec<String>> {
    // Tolerate markdown fences around the object
    let json_start = content.find('{').unwrap_or(0);
    let json_end = content.rfind('}').map(|i| i + 1).unwrap_or(content.len());
    let json_content = content.get(json_start..json_end).unwrap_or(content);

    let payload: NamesPayload = serde_json::from_str(json_content).map_err(|e| {
        NameForgeError::parse(
            format!("Response does not match schema: {}", e),
            Some(json_content.to_string()),
        )
    })?;

    let count = payload.names.len();
    if !(MIN_SCHEMA_NAMES..=MAX_SCHEMA_NAMES).contains(&count) {
        return Err(NameForgeError::parse(
            format!(
                "Response does not match schema: expected {}-{} names, got {}",
                MIN_SCHEMA_NAMES, MAX_SCHEMA_NAMES, count
            ),
            Some(json_content.to_string()),
        ));
    }

    let mut names = Vec::with_capacity(count);
    for name in payload.names {
        let name = name.trim();
        if name.is_empty() {
            return Err(NameForgeError::parse(
                "Response does not match schema: blank name",
                Some(json_content.to_string()),
            ));
        }
        names.push(name.to_string());
    }

    Ok(names)
}

/// Map a non-success provider status to an error message
pub(crate) fn status_error(provider: &str, status: u16, body: &str) -> String {
    match status {
        401 => format!("Authentication failed (401). Please check your {} API key", provider),
        403 => format!("Access forbidden (403). Your {} API key may not have permission", provider),
        429 => format!("Rate limit exceeded (429) at {}. Please try again later", provider),
        500..=599 => format!("{} server error ({}). The API service is experiencing issues", provider, status),
        _ => format!("{} API request failed ({}): {}", provider, status, body),
    }
}
