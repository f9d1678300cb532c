//! `ironbrief ask` — Run one message through the pipeline from the terminal.

use ironbrief_assistant::Assistant;
use ironbrief_config::AppConfig;
use ironbrief_core::generate::TextGenerator;
use ironbrief_inference::OllamaClient;
use ironbrief_knowledge::KnowledgeStore;
use std::sync::Arc;

pub async fn run(message: String) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let generator: Arc<dyn TextGenerator> = Arc::new(OllamaClient::new(
        config.inference.endpoint.clone(),
        config.inference.model.clone(),
        std::time::Duration::from_secs(config.inference.timeout_secs),
    ));

    let store = Arc::new(KnowledgeStore::new(&config.knowledge.root));
    store.load().await;

    let assistant = Assistant::new(generator, store);

    eprint!("  Thinking...");
    let reply = ironbrief_gateway::handle_message(&assistant, &message, "cli").await;
    eprint!("\r             \r");
    println!("{reply}");

    Ok(())
}
