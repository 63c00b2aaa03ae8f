use std::collections::HashMap;

use colored::Colorize;
use deck_core::{AnswerValue, TemplateCatalog};
use deck_flow::FlowController;

pub fn run(template_id: &str, raw_answers: &[String]) -> Result<(), String> {
    let answers = parse_answers(raw_answers)?;
    let catalog = TemplateCatalog::builtin();
    let deck = catalog.require(template_id).map_err(|e| e.to_string())?;
    let flow = FlowController::builtin();

    // Every slide can be visited at most once on a path that terminates.
    let max_steps = deck.len();
    let mut current = flow
        .initial_slide(template_id, deck)
        .map_err(|e| e.to_string())?;
    let mut path = vec![current];

    loop {
        let next = flow
            .next_slide(template_id, deck, current, answers.get(current))
            .map_err(|e| e.to_string())?;
        if next == current {
            break;
        }
        if path.len() >= max_steps {
            return Err(format!(
                "flow for '{template_id}' does not reach a terminal slide"
            ));
        }
        path.push(next);
        current = next;
    }

    for (i, id) in path.iter().enumerate() {
        let title = deck
            .slide(id)
            .and_then(|s| s.title.as_deref())
            .unwrap_or("");
        let marker = if answers.contains_key(*id) { "?" } else { " " };
        println!("  {:>2}. {} {} {}", i + 1, marker, id.bold(), title.dimmed());
    }
    println!();
    println!("  {} of {} slides visited", path.len(), deck.len());

    Ok(())
}

fn parse_answers(raw: &[String]) -> Result<HashMap<&str, AnswerValue>, String> {
    raw.iter()
        .map(|entry| {
            let (slide, value) = entry
                .split_once('=')
                .ok_or_else(|| format!("expected SLIDE=JSON, got \"{entry}\""))?;
            Ok((slide.trim(), super::parse_answer(value)))
        })
        .collect()
}
