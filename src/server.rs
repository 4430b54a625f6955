//! MCP server exposing the knowledge base over stdio.

use crate::config::{Config, SearchConfig};
use crate::search::SearchService;
use crate::tools::design_system::{DesignSystemRequest, handle_design_system};
use crate::tools::health::handle_health;
use crate::tools::search::{
    SearchRequest, SearchStackRequest, handle_search, handle_search_stack,
};
use crate::types::Stack;
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars::{self, JsonSchema, generate::SchemaSettings},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP server for design knowledge queries
#[derive(Clone)]
pub struct DesignServer {
    /// Read-only indices, shared by every in-flight tool call
    service: Arc<SearchService>,
    limits: SearchConfig,
    default_stack: Stack,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for DesignServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesignServer")
            .field("domains", &self.service.domains())
            .field("stacks", &self.service.stacks())
            .field("default_stack", &self.default_stack)
            .finish()
    }
}

#[tool_router]
impl DesignServer {
    /// Create a server over an already-built search service.
    pub fn new(service: Arc<SearchService>, config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            service,
            limits: config.search,
            default_stack: config.default_stack()?,
            tool_router: Self::tool_router(),
        })
    }

    #[tool(
        description = "Search one design knowledge domain (style, color, typography, ux, chart, landing, product, icons, react, web) with BM25 ranking. When no domain is given it is detected from the query.",
        input_schema = inline_schema_for_type::<SearchRequest>()
    )]
    async fn search(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> std::result::Result<String, String> {
        handle_search(&self.service, &self.limits, request)
    }

    #[tool(
        description = "Search implementation guidelines for a technology stack (html-tailwind, react, nextjs, vue, svelte, swiftui, react-native, flutter, shadcn, jetpack-compose, astro, nuxtjs, nuxt-ui).",
        input_schema = inline_schema_for_type::<SearchStackRequest>()
    )]
    async fn search_stack(
        &self,
        Parameters(request): Parameters<SearchStackRequest>,
    ) -> std::result::Result<String, String> {
        handle_search_stack(&self.service, &self.limits, self.default_stack, request)
    }

    #[tool(
        description = "Compose a complete design system for a product description: the best style, color palette, typography, UX, chart, landing, product, icon, React and web guidance, plus optional stack guidelines.",
        input_schema = inline_schema_for_type::<DesignSystemRequest>()
    )]
    async fn design_system(
        &self,
        Parameters(request): Parameters<DesignSystemRequest>,
    ) -> std::result::Result<String, String> {
        handle_design_system(&self.service, request)
    }

    #[tool(description = "Report service status and the configured domains and stacks.")]
    async fn health(&self) -> std::result::Result<String, String> {
        handle_health(&self.service)
    }
}

#[tool_handler]
impl ServerHandler for DesignServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "designkb-mcp: BM25 search over a curated UI/UX design knowledge base. \
                 Use design_system for a complete recommendation, search for a single domain, \
                 and search_stack for framework-specific guidelines.",
            )
    }
}

/// Generate an inline JSON schema for MCP tools
///
/// Unlike rmcp's default `schema_for_type()`, this function sets `inline_subschemas = true`
/// so optional fields render as plain inputs instead of `$ref` patterns.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let schema = generator.into_root_schema_for::<T>();
    let object = serde_json::to_value(schema).expect("failed to serialize schema");

    let json_object = match object {
        serde_json::Value::Object(object) => object,
        _ => panic!("Schema serialization produced non-object value"),
    };

    Arc::new(json_object)
}
