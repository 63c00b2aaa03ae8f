use std::path::Path;

use colored::Colorize;
use deck_core::TemplateCatalog;
use deck_custom::{CustomizationEngine, CustomizationPayload};
use deck_share::{MemoryStore, Publisher, ShareConfig};
use tracing::debug;

pub async fn run(
    template_id: &str,
    payload_path: &Path,
    origin: &str,
    seed: Option<u64>,
    output: Option<&Path>,
) -> Result<(), String> {
    let text = std::fs::read_to_string(payload_path)
        .map_err(|e| format!("cannot read {}: {e}", payload_path.display()))?;
    let payload: CustomizationPayload = serde_json::from_str(&text)
        .map_err(|e| format!("invalid payload {}: {e}", payload_path.display()))?;
    debug!(
        template = template_id,
        level = ?payload.level,
        fields = payload.fields.len(),
        questions = payload.questions.len(),
        "payload loaded"
    );

    let mut config = ShareConfig::new().with_origin(origin);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let catalog = TemplateCatalog::builtin();
    let engine = CustomizationEngine::default();
    let publisher = Publisher::new(MemoryStore::new(), config);

    let (record, publication) = publisher
        .publish_customized(&engine, &catalog, template_id, &payload)
        .await
        .map_err(|e| e.to_string())?;

    println!(
        "  {} '{}' for {}",
        "Customized".bold(),
        record.template.name,
        payload
            .recipient_name()
            .unwrap_or(engine.config().fallback_recipient_name.as_str())
    );
    println!("  {} slides, {} custom questions", record.template.len(), record.inserted.len());
    println!("  token: {}", publication.token);
    println!("  link:  {}", publication.link.green());

    if let Some(path) = output {
        let published = super::PublishedRecord {
            record,
            publication,
        };
        let json = serde_json::to_string_pretty(&published)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        std::fs::write(path, json)
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Record written to {}", path.display());
    }

    Ok(())
}
