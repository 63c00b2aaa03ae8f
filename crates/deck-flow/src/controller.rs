//! The flow controller.

use std::collections::{HashMap, HashSet};

use deck_core::{AnswerValue, Template};
use tracing::{debug, error};

use crate::builtin;
use crate::error::{FlowError, FlowResult};
use crate::family::FlowFamily;

/// Computes slide transitions for registered flow families.
///
/// Holds no session state. The caller tracks the current slide and asks for
/// its successor on every navigation event, passing the deck the recipient is
/// viewing so inserted question slides take part in document order.
#[derive(Debug, Clone, Default)]
pub struct FlowController {
    families: HashMap<String, FlowFamily>,
}

impl FlowController {
    /// Create a controller over the given families. Later families replace
    /// earlier ones with the same id.
    pub fn new(families: impl IntoIterator<Item = FlowFamily>) -> Self {
        let mut controller = Self::default();
        for family in families {
            controller.register(family);
        }
        controller
    }

    /// Create a controller over the built-in families.
    pub fn builtin() -> Self {
        Self::new(builtin::families())
    }

    /// Register a family, returning the one it replaces.
    pub fn register(&mut self, family: FlowFamily) -> Option<FlowFamily> {
        debug!(family = %family.id, transitions = family.transitions.len(), "flow family registered");
        self.families.insert(family.id.clone(), family)
    }

    /// Look up a family. Unknown ids fail closed.
    pub fn family(&self, family_id: &str) -> FlowResult<&FlowFamily> {
        self.families
            .get(family_id)
            .ok_or_else(|| FlowError::UnknownFamily(family_id.to_string()))
    }

    /// Returns true if a family is registered under this id.
    pub fn has_family(&self, family_id: &str) -> bool {
        self.families.contains_key(family_id)
    }

    /// The slide a viewing session starts on.
    pub fn initial_slide<'d>(&self, family_id: &str, deck: &'d Template) -> FlowResult<&'d str> {
        self.family(family_id)?;
        deck.first()
            .map(|s| s.id.as_str())
            .ok_or_else(|| FlowError::EmptyDeck(family_id.to_string()))
    }

    /// The slide to show after `current`, given the recipient's answer.
    ///
    /// Slides without a table entry, and decisions that do not recognize the
    /// answer, advance in document order. The last slide returns itself.
    pub fn next_slide<'d>(
        &self,
        family_id: &str,
        deck: &'d Template,
        current: &str,
        answer: Option<&AnswerValue>,
    ) -> FlowResult<&'d str> {
        let family = self.family(family_id)?;
        let position = locate(family, deck, current)?;

        match family.transition(current).and_then(|t| t.resolve(answer)) {
            Some(target) => deck.slide(target).map(|s| s.id.as_str()).ok_or_else(|| {
                error!(family = %family.id, from = current, to = target, "transition leads to a missing slide");
                FlowError::DanglingTarget {
                    family: family.id.clone(),
                    from: current.to_string(),
                    target: target.to_string(),
                }
            }),
            None => deck
                .slides
                .get(position + 1)
                .or_else(|| deck.slides.get(position))
                .map(|s| s.id.as_str())
                .ok_or_else(|| FlowError::UnknownSlide {
                    family: family.id.clone(),
                    slide: current.to_string(),
                }),
        }
    }

    /// Whether `current` is a terminal slide: the last one, with no outgoing
    /// transition.
    pub fn is_terminal(&self, family_id: &str, deck: &Template, current: &str) -> FlowResult<bool> {
        let family = self.family(family_id)?;
        let position = locate(family, deck, current)?;
        Ok(position + 1 == deck.len() && family.transition(current).is_none())
    }

    /// Slides of `deck` that no path from the first slide can reach, in
    /// document order.
    ///
    /// Every branch of every decision counts as taken, so a slide listed here
    /// is skipped whatever the recipient answers.
    pub fn unreachable<'d>(&self, family_id: &str, deck: &'d Template) -> FlowResult<Vec<&'d str>> {
        let family = self.family(family_id)?;
        let mut seen: HashSet<&str> = HashSet::new();
        let mut pending: Vec<&str> = deck.first().map(|s| s.id.as_str()).into_iter().collect();

        while let Some(current) = pending.pop() {
            if !seen.insert(current) {
                continue;
            }
            let following = deck
                .position_of(current)
                .and_then(|p| deck.slides.get(p + 1))
                .map(|s| s.id.as_str());

            match family.transition(current) {
                Some(transition) => {
                    pending.extend(transition.targets().into_iter().filter_map(|target| {
                        deck.slide(target).map(|s| s.id.as_str())
                    }));
                    if transition.may_advance() {
                        pending.extend(following);
                    }
                }
                None => pending.extend(following),
            }
        }

        Ok(deck
            .slide_ids()
            .filter(|id| !seen.contains(id))
            .collect())
    }

    /// Check that every slide the family's table mentions exists in `deck`.
    pub fn validate(&self, family_id: &str, deck: &Template) -> FlowResult<()> {
        let family = self.family(family_id)?;
        for (from, transition) in &family.transitions {
            if !deck.contains(from) {
                return Err(FlowError::UnknownSlide {
                    family: family.id.clone(),
                    slide: from.clone(),
                });
            }
            for target in transition.targets() {
                if !deck.contains(target) {
                    return Err(FlowError::DanglingTarget {
                        family: family.id.clone(),
                        from: from.clone(),
                        target: target.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn locate(family: &FlowFamily, deck: &Template, current: &str) -> FlowResult<usize> {
    deck.position_of(current).ok_or_else(|| {
        error!(family = %family.id, slide = current, "current slide is not in the deck");
        FlowError::UnknownSlide {
            family: family.id.clone(),
            slide: current.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use deck_core::builtin as decks;
    use deck_core::{Slide, SlideVariant};
    use proptest::prelude::*;

    use super::*;
    use crate::decision::Decision;

    fn omega_answer(omega3: &str, omega6: &str) -> AnswerValue {
        AnswerValue::fields([("omega3", omega3), ("omega6", omega6)])
    }

    #[test]
    fn omega_balanced_and_unbalanced() {
        let flow = FlowController::builtin();
        let deck = decks::omega();

        let balanced = flow
            .next_slide("omega", &deck, "slide-3-input", Some(&omega_answer("1", "3")))
            .unwrap();
        assert_eq!(balanced, "slide-4-balanced");

        let unbalanced = flow
            .next_slide("omega", &deck, "slide-3-input", Some(&omega_answer("2", "3")))
            .unwrap();
        assert_eq!(unbalanced, "slide-5-unbalanced");
    }

    #[test]
    fn omega_balanced_branch_skips_advice() {
        let flow = FlowController::builtin();
        let deck = decks::omega();
        assert_eq!(
            flow.next_slide("omega", &deck, "slide-4-balanced", None).unwrap(),
            "slide-6-contact"
        );
        assert_eq!(
            flow.next_slide("omega", &deck, "slide-5-unbalanced", None).unwrap(),
            "slide-6-contact"
        );
    }

    #[test]
    fn slides_without_entry_advance_by_one() {
        let flow = FlowController::builtin();
        let deck = decks::omega();
        assert_eq!(
            flow.next_slide("omega", &deck, "slide-1-welcome", None).unwrap(),
            "slide-2-explain"
        );
    }

    #[test]
    fn terminal_slide_returns_itself() {
        let flow = FlowController::builtin();
        let deck = decks::omega();
        let next = flow
            .next_slide("omega", &deck, "slide-7-final", Some(&AnswerValue::Bool(true)))
            .unwrap();
        assert_eq!(next, "slide-7-final");
        assert!(flow.is_terminal("omega", &deck, "slide-7-final").unwrap());
        assert!(!flow.is_terminal("omega", &deck, "slide-3-input").unwrap());
    }

    #[test]
    fn unrecognized_answer_falls_back_to_document_order() {
        let flow = FlowController::builtin();
        let deck = decks::wellness_check();
        let next = flow
            .next_slide(
                "wellness-check",
                &deck,
                "habits",
                Some(&AnswerValue::Text("sometimes".into())),
            )
            .unwrap();
        assert_eq!(next, "routine-yes");

        let no = flow
            .next_slide("wellness-check", &deck, "habits", Some(&AnswerValue::Bool(false)))
            .unwrap();
        assert_eq!(no, "routine-no");
    }

    #[test]
    fn product_tour_rating_branch() {
        let flow = FlowController::builtin();
        let deck = decks::product_tour();
        let high = flow
            .next_slide("product-tour", &deck, "rating", Some(&AnswerValue::Number(5.0)))
            .unwrap();
        let low = flow
            .next_slide("product-tour", &deck, "rating", Some(&AnswerValue::Text("2".into())))
            .unwrap();
        assert_eq!(high, "testimonials");
        assert_eq!(low, "support");
    }

    #[test]
    fn unknown_family_fails_closed() {
        let flow = FlowController::builtin();
        let deck = decks::demo();
        assert!(matches!(
            flow.next_slide("nope", &deck, "s1", None),
            Err(FlowError::UnknownFamily(ref id)) if id == "nope"
        ));
        assert!(flow.initial_slide("nope", &deck).is_err());
    }

    #[test]
    fn unknown_current_slide_is_an_error() {
        let flow = FlowController::builtin();
        let deck = decks::demo();
        assert!(matches!(
            flow.next_slide("demo", &deck, "s9", None),
            Err(FlowError::UnknownSlide { .. })
        ));
    }

    #[test]
    fn dangling_target_is_reported() {
        let flow = FlowController::new([FlowFamily::new("broken").goto("a", "missing")]);
        let deck = Template::new("broken", "Broken")
            .with_slide(Slide::new("a", SlideVariant::Hero))
            .with_slide(Slide::new("b", SlideVariant::Final));

        assert!(matches!(
            flow.next_slide("broken", &deck, "a", None),
            Err(FlowError::DanglingTarget { ref target, .. }) if target == "missing"
        ));
        assert!(flow.validate("broken", &deck).is_err());
    }

    #[test]
    fn initial_slide_and_empty_deck() {
        let flow = FlowController::builtin();
        assert_eq!(flow.initial_slide("demo", &decks::demo()).unwrap(), "s1");
        assert!(matches!(
            flow.initial_slide("demo", &Template::new("demo", "Empty")),
            Err(FlowError::EmptyDeck(_))
        ));
    }

    #[test]
    fn builtin_families_match_builtin_decks() {
        let flow = FlowController::builtin();
        for deck in decks::templates() {
            assert!(flow.has_family(&deck.id), "no family for {}", deck.id);
            flow.validate(&deck.id, &deck).unwrap();
        }
    }

    #[test]
    fn inserted_slides_join_document_order() {
        let flow = FlowController::builtin();
        let mut deck = decks::demo();
        deck.slides
            .insert(1, Slide::new("question-custom-1", SlideVariant::Quiz));

        assert_eq!(
            flow.next_slide("demo", &deck, "s1", None).unwrap(),
            "question-custom-1"
        );
        assert_eq!(
            flow.next_slide("demo", &deck, "question-custom-1", None).unwrap(),
            "s2"
        );
    }

    #[test]
    fn register_replaces_family() {
        let mut flow = FlowController::builtin();
        let previous = flow.register(FlowFamily::new("omega"));
        assert!(previous.is_some_and(|f| !f.is_linear()));

        // An unbalanced answer would branch to slide-5 under the built-in table;
        // the linear replacement just advances.
        let deck = decks::omega();
        assert_eq!(
            flow.next_slide("omega", &deck, "slide-3-input", Some(&omega_answer("2", "3")))
                .unwrap(),
            "slide-4-balanced"
        );
    }

    #[test]
    fn builtin_decks_are_fully_reachable() {
        let flow = FlowController::builtin();
        for deck in decks::templates() {
            assert!(flow.unreachable(&deck.id, &deck).unwrap().is_empty(), "{}", deck.id);
        }
    }

    #[test]
    fn slide_behind_a_goto_is_unreachable() {
        let flow = FlowController::builtin();
        let mut deck = decks::omega();
        let at = deck.position_of("slide-5-unbalanced").unwrap();
        deck.slides
            .insert(at, Slide::new("question-like", SlideVariant::Quiz));

        assert_eq!(flow.unreachable("omega", &deck).unwrap(), vec!["question-like"]);

        // The recipient never lands on it either way.
        for answer in [omega_answer("1", "3"), omega_answer("2", "3")] {
            let mut current = "slide-3-input";
            let mut path = vec![current];
            loop {
                let next = flow.next_slide("omega", &deck, current, Some(&answer)).unwrap();
                if next == current {
                    break;
                }
                path.push(next);
                current = next;
            }
            assert!(!path.contains(&"question-like"));
        }
    }

    #[test]
    fn slide_before_a_branch_is_reachable() {
        let flow = FlowController::builtin();
        let mut deck = decks::omega();
        let at = deck.position_of("slide-3-input").unwrap();
        deck.slides
            .insert(at, Slide::new("question-early", SlideVariant::Quiz));
        assert!(flow.unreachable("omega", &deck).unwrap().is_empty());
    }

    #[test]
    fn fallthrough_decision_keeps_next_slide_reachable() {
        let flow = FlowController::new([FlowFamily::new("f").decide("a", Decision::yes_no("c", "c"))]);
        let deck = Template::new("f", "F")
            .with_slide(Slide::new("a", SlideVariant::Quiz))
            .with_slide(Slide::new("b", SlideVariant::Split))
            .with_slide(Slide::new("c", SlideVariant::Final));
        assert!(flow.unreachable("f", &deck).unwrap().is_empty());

        let flow = FlowController::new([FlowFamily::new("f")
            .decide("a", Decision::yes_no("c", "c").otherwise("c"))]);
        assert_eq!(flow.unreachable("f", &deck).unwrap(), vec!["b"]);
    }

    fn arb_answer() -> impl Strategy<Value = Option<AnswerValue>> {
        prop::option::of(prop_oneof![
            any::<bool>().prop_map(AnswerValue::Bool),
            any::<f64>().prop_map(AnswerValue::Number),
            ".{0,8}".prop_map(AnswerValue::Text),
            prop::collection::btree_map("[a-z0-9]{1,6}", "[0-9. a-z]{0,4}", 0..3)
                .prop_map(AnswerValue::Fields),
        ])
    }

    proptest! {
        #[test]
        fn next_slide_is_total_for_builtin_families(
            deck_index in 0usize..4,
            slide_seed in any::<prop::sample::Index>(),
            answer in arb_answer(),
        ) {
            let flow = FlowController::builtin();
            let templates = decks::templates();
            let deck = &templates[deck_index];
            let current = &deck.slides[slide_seed.index(deck.len())].id;

            let next = flow.next_slide(&deck.id, deck, current, answer.as_ref());
            prop_assert!(next.is_ok());
            prop_assert!(deck.contains(next.unwrap()));
        }
    }
}
