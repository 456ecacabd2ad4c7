//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};

pub async fn cmd_serve(
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
    allowed_origins: Vec<String>,
) -> Result<()> {
    println!("🚀 Starting Pantry relay server...");
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }
    if !allowed_origins.is_empty() {
        println!("   CORS origins: {}", allowed_origins.join(", "));
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let static_dir_str = static_dir
        .map(|p| p.to_str().context("static dir path must be valid UTF-8"))
        .transpose()?;

    let config = pantry_server::ServerConfig { allowed_origins };
    pantry_server::serve_with_config(host, port, static_dir_str, config).await?;

    Ok(())
}
