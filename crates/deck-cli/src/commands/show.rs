use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use deck_core::TemplateCatalog;

pub fn run(template_id: &str) -> Result<(), String> {
    let catalog = TemplateCatalog::builtin();
    let template = catalog.require(template_id).map_err(|e| e.to_string())?;

    println!("  {} [{}]", template.name.bold(), template.id.dimmed());
    if let Some(description) = &template.description {
        println!("  {description}");
    }
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Slide", "Variant", "Title", "Duration"]);

    for (i, slide) in template.slides.iter().enumerate() {
        let duration = if slide.is_manual() {
            "manual".to_string()
        } else {
            format!("{:.1}s", slide.duration_ms as f64 / 1000.0)
        };
        let mut title = slide.title.clone().unwrap_or_else(|| "-".to_string());
        if slide.has_required_question() {
            title.push_str(" *");
        }
        table.add_row(vec![
            (i + 1).to_string(),
            slide.id.clone(),
            slide.variant.to_string(),
            title,
            duration,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} slides", template.len());

    Ok(())
}
