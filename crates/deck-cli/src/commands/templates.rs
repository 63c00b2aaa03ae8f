use comfy_table::{ContentArrangement, Table};
use deck_core::TemplateCatalog;

pub fn run() -> Result<(), String> {
    let catalog = TemplateCatalog::builtin();
    catalog.load().map_err(|e| e.to_string())?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Slides", "Description"]);

    for template in catalog.list() {
        let desc = template.description.clone().unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            template.id.clone(),
            template.name.clone(),
            template.len().to_string(),
            desc,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} templates", catalog.list().len());

    Ok(())
}
