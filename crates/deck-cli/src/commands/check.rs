use std::path::Path;

use colored::Colorize;

pub fn run(record_path: &Path) -> Result<(), String> {
    let record = super::read_record(record_path)?;
    let missing = record.missing_required();

    if missing.is_empty() {
        println!(
            "  All required questions answered for '{}'.",
            record.template.name
        );
        println!("  {} answers recorded", record.answers.len());
        return Ok(());
    }

    for text in &missing {
        println!("  {}  {text}", "MISSING".yellow().bold());
    }
    Err(format!(
        "{} required question{} unanswered",
        missing.len(),
        if missing.len() == 1 { "" } else { "s" }
    ))
}
