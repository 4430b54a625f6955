use anyhow::Context;
use designkb_mcp::{Config, DesignServer, SearchService, corpus, logging};
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!(
        "Starting {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::load().context("Failed to load configuration")?;
    let corpus = corpus::load(&config.data_dir)
        .await
        .context("Failed to load knowledge base")?;
    let service = Arc::new(SearchService::from_corpus(corpus, &config));

    if service.domains().is_empty() {
        tracing::warn!(
            "No domain corpora found under {}; design_system requests will fail",
            config.data_dir.display()
        );
    }

    // Create and serve the MCP server over stdio
    let server = DesignServer::new(service, &config)?;
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    // Wait for the service to complete
    service.waiting().await?;

    Ok(())
}
