//! `ironbrief serve` — Start the HTTP webhook gateway.

use ironbrief_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("IronBrief Gateway");
    println!("   Listening:  {}:{}", config.gateway.host, config.gateway.port);
    println!("   Inference:  {} ({})", config.inference.endpoint, config.inference.model);
    println!("   Knowledge:  {}", config.knowledge.root.display());

    ironbrief_gateway::start(config).await?;

    Ok(())
}
