use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use foundry_core::{ChatMessage, CompletionProvider};

/// Name of the single exposed tool.
pub const ASK_TOOL: &str = "ask_foundry_model";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

pub fn list_tools() -> Vec<ToolDefinition> {
    vec![ToolDefinition {
        name: ASK_TOOL.to_string(),
        description: "Send a query to the configured Microsoft Foundry (Azure OpenAI) model."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "question": {
                    "type": "string",
                    "description": "The prompt or question for the model"
                }
            },
            "required": ["question"]
        }),
    }]
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}

#[derive(Debug, Deserialize)]
struct AskArgs {
    question: String,
}

pub fn call_tool(
    name: &str,
    arguments: Value,
    provider: &dyn CompletionProvider,
) -> Result<Value, ToolError> {
    match name {
        ASK_TOOL => {
            let args: AskArgs = serde_json::from_value(arguments)
                .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

            // Errors from the provider come back as ordinary reply text, so
            // the user sees them inside the transcript.
            let answer = provider.complete(&[ChatMessage::user(args.question)]);

            Ok(json!({
                "content": [{
                    "type": "text",
                    "text": answer
                }]
            }))
        }
        other => Err(ToolError::UnknownTool(other.to_string())),
    }
}
