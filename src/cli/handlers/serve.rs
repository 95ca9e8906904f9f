//! API server handler

use crate::api::serve_api;
use crate::RehabRag;
use crate::Result;

pub async fn handle_serve_api(
    app: &RehabRag,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let server = &app.config().server;
    let host = host.unwrap_or_else(|| server.host.clone());
    let port = port.unwrap_or(server.port);

    println!("🚀 Starting Rehabilitation Assistant API Server");
    println!("===============================================\n");
    println!("📍 Host: {host}");
    println!("🔌 Port: {port}");
    println!("📄 Document: {}", app.config().document.path.display());
    println!();

    // Traffic is only accepted once the index is built
    app.initialize().await?;

    serve_api(server, app.api_state(), &host, port).await
}
