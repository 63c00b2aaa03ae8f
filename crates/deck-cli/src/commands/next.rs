use std::path::Path;

use deck_core::TemplateCatalog;
use deck_flow::FlowController;

pub fn run(
    family: &str,
    slide: &str,
    answer: Option<&str>,
    record: Option<&Path>,
) -> Result<(), String> {
    let catalog = TemplateCatalog::builtin();
    let record = record.map(super::read_record).transpose()?;
    let deck = match &record {
        Some(record) => &record.template,
        None => catalog.require(family).map_err(|e| e.to_string())?,
    };

    let answer = answer.map(super::parse_answer);
    let flow = FlowController::builtin();
    let next = flow
        .next_slide(family, deck, slide, answer.as_ref())
        .map_err(|e| e.to_string())?;

    println!("{next}");
    Ok(())
}
