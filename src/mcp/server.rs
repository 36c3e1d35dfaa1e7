use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use swc_common::SourceMap;

use crate::cli::args::CommonArgs;
use crate::cli::commands::{compile_project, compile_source_text};
use crate::compiler::Mode;
use crate::config::{Config, load_config};

use super::types::{
    CompileProjectParams, CompileProjectResult, CompileSourceParams, CompileSourceResult,
    ConfigDto, ConfigValues, GetConfigParams, Pagination,
};

#[derive(Clone)]
pub struct LingoMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for LingoMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_mode(mode: Option<&str>) -> Result<Option<Mode>, McpError> {
    mode.map(Mode::from_str)
        .transpose()
        .map_err(|e| McpError::invalid_params(e.to_string(), None))
}

fn to_json_result<T: serde::Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

#[tool_router]
impl LingoMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Compile a source snippet into message descriptors
    #[tool(
        description = "Compile the i18n macro call sites in a JS/TSX source snippet and return the resulting message descriptors (id, message, placeholder keys) plus per-site errors."
    )]
    async fn compile_source(
        &self,
        params: Parameters<CompileSourceParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let file_name = params.file_name.as_deref().unwrap_or("input.tsx");

        let mut config = Config::default();
        if let Some(mode) = parse_mode(params.mode.as_deref())? {
            config.mode = mode;
        }
        if let Some(extract) = params.extract {
            config.extract = extract;
        }

        let source_map = Arc::new(SourceMap::default());
        let (sites, errors) = compile_source_text(
            params.source,
            file_name,
            &source_map,
            &config.macro_modules,
            config.compile_options(),
        );

        let result = CompileSourceResult {
            total_count: sites.len(),
            sites,
            errors,
        };
        to_json_result(&result)
    }

    /// Compile every macro call site in a project
    #[tool(
        description = "Scan a project tree, compile every i18n macro call site, and return the message descriptors. Returns a paginated list plus any per-site compilation errors."
    )]
    async fn compile_project(
        &self,
        params: Parameters<CompileProjectParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let limit = params.limit.map(|v| v as usize).unwrap_or(50).min(200);
        let offset = params.offset.map(|v| v as usize).unwrap_or(0);

        let common = CommonArgs {
            path: std::path::PathBuf::from(&params.project_root_path),
            mode: parse_mode(params.mode.as_deref())?,
            extract: params.extract.unwrap_or(false),
            verbose: false,
        };

        let report = compile_project(&common)
            .map_err(|e| McpError::internal_error(format!("Compilation failed: {}", e), None))?;

        let total_count = report.sites.len();
        let paginated: Vec<_> = report.sites.into_iter().skip(offset).take(limit).collect();
        let has_more = offset + paginated.len() < total_count;

        let result = CompileProjectResult {
            total_count,
            files_scanned: report.files_scanned,
            sites: paginated,
            errors: report.errors,
            pagination: Pagination {
                offset,
                limit,
                has_more,
            },
        };
        to_json_result(&result)
    }

    /// Get the current lingo configuration
    #[tool(description = "Get the current lingo configuration.")]
    async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = Path::new(&params.0.project_root_path);

        let result = load_config(path)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?;

        let config_dto = ConfigDto {
            from_file: result.from_file,
            config: ConfigValues::from(result.config),
        };
        to_json_result(&config_dto)
    }
}

#[tool_handler]
impl ServerHandler for LingoMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Lingo MCP compiles i18n macro call sites in JS/TSX sources into translation \
                 message descriptors.\n\n\
                 Available tools:\n\
                 1. get_config - Get project configuration\n\
                 2. compile_source - Compile a source snippet and inspect the resulting descriptors\n\
                 3. compile_project - Compile a whole project tree (paginated)\n\n\
                 Each descriptor carries the deterministic message id, the canonical ICU-style \
                 message string, and the value/component placeholder keys. Compilation errors \
                 are reported per call site with file/line/column."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = LingoMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
