//! `ironbrief status` — Show configuration and knowledge base summary.

use ironbrief_config::AppConfig;
use ironbrief_core::knowledge::Section;
use ironbrief_knowledge::KnowledgeStore;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!("IronBrief Status");
    println!();
    println!("  Inference endpoint:  {}", config.inference.endpoint);
    println!("  Model:               {}", config.inference.model);
    println!("  Gateway:             {}:{}", config.gateway.host, config.gateway.port);
    println!("  Knowledge root:      {}", config.knowledge.root.display());
    println!();

    let store = KnowledgeStore::new(&config.knowledge.root);
    let snapshot = store.load().await;

    println!("  Knowledge sections:");
    for section in Section::ALL {
        let chars = snapshot.get(section).chars().count();
        let marker = if chars == 0 { "(empty)" } else { "" };
        println!("    {:<12} {:>8} chars {}", section.key(), chars, marker);
    }
    println!();
    println!("  Loaded at: {}", snapshot.loaded_at);

    Ok(())
}
