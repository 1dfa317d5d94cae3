use anyhow::Result;
use serde_json::json;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::engine::registry::RuleRegistry;
use crate::mcp::write_tools::WRITE_TOOLS;
use crate::mcp::{protocol::*, resources, tools, write_tools};

/// Run the MCP server over stdio (stdin/stdout). Logging goes to stderr.
pub async fn run(registry: RuleRegistry) -> Result<()> {
    tracing::info!("caser stdio transport ready ({} rules)", registry.len());
    serve(registry, BufReader::new(io::stdin()), io::stdout()).await
}

/// Serve line-delimited JSON-RPC from `reader`, answering on `writer`, until
/// the reader is exhausted. Requests are handled one at a time.
pub async fn serve<R, W>(mut registry: RuleRegistry, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        tracing::debug!("← {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                let resp = JsonRpcResponse::error(None, PARSE_ERROR, format!("Parse error: {e}"));
                send(&mut writer, &resp).await?;
                continue;
            }
        };

        let response = handle_request(&mut registry, &request);

        if !request.is_notification() {
            send(&mut writer, &response).await?;
        }
    }

    Ok(())
}

fn handle_request(registry: &mut RuleRegistry, req: &JsonRpcRequest) -> JsonRpcResponse {
    let id = req.id.clone();

    match req.method.as_str() {
        // ── Lifecycle ──────────────────────────────────────────────
        "initialize" => JsonRpcResponse::from_result(
            id,
            &InitializeResult {
                protocol_version: PROTOCOL_VERSION.into(),
                capabilities: ServerCapabilities::default(),
                server_info: ServerInfo {
                    name: "caser".into(),
                    version: env!("CARGO_PKG_VERSION").into(),
                },
            },
        ),

        "notifications/initialized" | "initialized" => JsonRpcResponse::success(id, json!({})),

        // ── Tools ──────────────────────────────────────────────────
        "tools/list" => {
            let mut all_tools = tools::list_tools();
            all_tools.extend(write_tools::list_write_tools());
            JsonRpcResponse::from_result(id, &ToolsListResult { tools: all_tools })
        }

        "tools/call" => {
            let params: ToolCallParams = match req.parse_params() {
                Ok(p) => p,
                Err(resp) => return resp,
            };
            let result = if WRITE_TOOLS.contains(&params.name.as_str()) {
                write_tools::call_write_tool(registry, &params.name, &params.arguments)
            } else {
                tools::call_tool(registry, &params.name, &params.arguments)
            };
            JsonRpcResponse::from_result(id, &result)
        }

        // ── Resources ──────────────────────────────────────────────
        "resources/list" => JsonRpcResponse::from_result(
            id,
            &ResourcesListResult {
                resources: resources::list_resources(registry),
            },
        ),

        "resources/read" => {
            let params: ResourceReadParams = match req.parse_params() {
                Ok(p) => p,
                Err(resp) => return resp,
            };
            JsonRpcResponse::from_result(id, &resources::read_resource(registry, &params.uri))
        }

        "ping" => JsonRpcResponse::success(id, json!({})),

        method => JsonRpcResponse::error(id, METHOD_NOT_FOUND, format!("Method not found: {method}")),
    }
}

async fn send<W: AsyncWrite + Unpin>(writer: &mut W, resp: &JsonRpcResponse) -> Result<()> {
    let json = serde_json::to_string(resp)?;
    tracing::debug!("→ {}", json);
    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    async fn exchange(input: &str) -> Vec<Value> {
        let mut output = Vec::new();
        serve(RuleRegistry::new(), input.as_bytes(), &mut output)
            .await
            .unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_initialize_and_notification() {
        let responses = exchange(concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
        ))
        .await;
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["result"]["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(responses[0]["result"]["serverInfo"]["name"], "caser");
    }

    #[tokio::test]
    async fn test_register_then_convert_over_the_wire() {
        let responses = exchange(concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"register_rule","arguments":{"name":"semicolon-case","separator":":"}}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"convert_case_to","arguments":{"text":"someText","to":"semicolon-case"}}}"#,
            "\n",
        ))
        .await;
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[1]["id"], 2);
        assert_eq!(responses[1]["result"]["content"][0]["text"], "some:text");
    }

    #[tokio::test]
    async fn test_tools_list_includes_write_tools() {
        let responses = exchange("{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"tools/list\"}\n").await;
        let tools = responses[0]["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 7);
        assert!(tools.iter().any(|t| t["name"] == "register_rules"));
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let responses = exchange(concat!(
            "not json\n",
            "\n",
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/call"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"prompts/list"}"#,
            "\n",
        ))
        .await;
        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["error"]["code"], PARSE_ERROR);
        assert_eq!(responses[1]["error"]["code"], INVALID_PARAMS);
        assert_eq!(responses[2]["error"]["code"], METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_null_id_request_is_answered() {
        let responses = exchange("{\"jsonrpc\":\"2.0\",\"id\":null,\"method\":\"ping\"}\n").await;
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["id"], Value::Null);
        assert_eq!(responses[0]["result"], serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_resources_read() {
        let responses = exchange(
            "{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"resources/read\",\"params\":{\"uri\":\"caser://rules/kebab-case\"}}\n",
        )
        .await;
        let text = responses[0]["result"]["contents"][0]["text"].as_str().unwrap();
        assert!(text.contains("\"separator\":\"-\""));
    }
}
