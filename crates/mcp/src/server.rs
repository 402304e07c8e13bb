use serde_json::json;

use foundry_core::CompletionProvider;

use crate::tools::{call_tool, list_tools, ToolError};
use crate::transport::{JsonRpcRequest, JsonRpcResponse, INVALID_PARAMS, METHOD_NOT_FOUND};

const SERVER_NAME: &str = "foundry-mcp";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
const PROTOCOL_VERSION: &str = "2024-11-05";

/// Outcome of dispatching one request: either a reply envelope to write, or
/// nothing. Notifications and unrecognized methods take the `NoReply` path.
#[derive(Debug)]
pub enum Dispatch {
    Reply(JsonRpcResponse),
    NoReply,
}

/// Stateless request handler: each line is an independent transaction, so no
/// session data survives between calls.
pub struct McpServer {
    provider: Box<dyn CompletionProvider>,
}

impl McpServer {
    pub fn new(provider: Box<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// One request-response transaction. Returns the serialized reply line,
    /// if the request warrants one. An unparsable line is logged and dropped
    /// without an answer.
    pub fn handle_line(&self, input: &str) -> Option<String> {
        let request: JsonRpcRequest = match serde_json::from_str(input) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!("dropping unparsable request line: {e}");
                return None;
            }
        };

        match self.dispatch(request) {
            Dispatch::Reply(response) => Some(serde_json::to_string(&response).unwrap()),
            Dispatch::NoReply => None,
        }
    }

    fn dispatch(&self, request: JsonRpcRequest) -> Dispatch {
        match request.method.as_str() {
            "initialize" => Dispatch::Reply(self.handle_initialize(&request)),
            "notifications/initialized" => Dispatch::NoReply,
            "tools/list" => Dispatch::Reply(self.handle_tools_list(&request)),
            "tools/call" => Dispatch::Reply(self.handle_tools_call(&request)),
            other => {
                // Unknown methods get no reply at all, not a method-not-found
                // error envelope.
                tracing::debug!("ignoring unsupported method: {other}");
                Dispatch::NoReply
            }
        }
    }

    fn handle_initialize(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::success(
            request.id.clone(),
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {},
                    "resources": {}
                },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": SERVER_VERSION
                }
            }),
        )
    }

    fn handle_tools_list(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::success(request.id.clone(), json!({ "tools": list_tools() }))
    }

    fn handle_tools_call(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let params = match &request.params {
            Some(p) => p,
            None => {
                return JsonRpcResponse::error(request.id.clone(), INVALID_PARAMS, "Missing params")
            }
        };

        let name = params
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or_default();

        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

        match call_tool(name, arguments, self.provider.as_ref()) {
            Ok(result) => JsonRpcResponse::success(request.id.clone(), result),
            Err(ToolError::UnknownTool(_)) => {
                JsonRpcResponse::error(request.id.clone(), METHOD_NOT_FOUND, "Method not found")
            }
            Err(e @ ToolError::InvalidArguments(_)) => {
                JsonRpcResponse::error(request.id.clone(), INVALID_PARAMS, e.to_string())
            }
        }
    }
}
