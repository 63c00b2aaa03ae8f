//! Decks shipped with Deckhand.
//!
//! These are the static definitions the default [`TemplateCatalog`] is built
//! from. Slide ids here are referenced by the flow families in `deck-flow`,
//! so renaming one means updating the matching transition table.
//!
//! [`TemplateCatalog`]: crate::TemplateCatalog

use crate::slide::{Feature, QuestionKind, Slide, SlideQuestion, SlideVariant};
use crate::template::Template;

/// Id of the minimal demonstration deck.
pub const DEMO: &str = "demo";
/// Id of the omega-ratio deck.
pub const OMEGA: &str = "omega";
/// Id of the wellness questionnaire deck.
pub const WELLNESS_CHECK: &str = "wellness-check";
/// Id of the product tour deck.
pub const PRODUCT_TOUR: &str = "product-tour";

/// All built-in templates in registration order.
pub fn templates() -> Vec<Template> {
    vec![demo(), omega(), wellness_check(), product_tour()]
}

/// Two-slide deck: a greeting and a required question.
pub fn demo() -> Template {
    Template::new(DEMO, "Demo")
        .with_description("Minimal deck for trying out customization")
        .with_slide(
            Slide::new("s1", SlideVariant::Hero)
                .with_title("Hello {{recipientName}}")
                .with_subtitle("A short presentation prepared for you"),
        )
        .with_slide(
            Slide::new("s2", SlideVariant::Quiz)
                .with_title("One quick question")
                .with_question(
                    SlideQuestion::new("s2-q1", "How did you hear about us?", QuestionKind::Text)
                        .required(),
                ),
        )
}

/// Omega-3/omega-6 balance deck.
///
/// The recipient enters both values on `slide-3-input`; a 1:3 ratio leads to
/// the balanced branch, anything else to the unbalanced one.
pub fn omega() -> Template {
    Template::new(OMEGA, "Omega Balance")
        .with_description("Explains the omega-3/omega-6 ratio and checks the recipient's")
        .with_metadata("category", "health")
        .with_slide(
            Slide::new("slide-1-welcome", SlideVariant::Hero)
                .with_title("Welcome, {{recipientName}}")
                .with_subtitle("Let's talk about balance")
                .with_duration(5000)
                .with_extra("background", "assets/ocean.jpg"),
        )
        .with_slide(
            Slide::new("slide-2-explain", SlideVariant::Split)
                .with_title("Why the ratio matters")
                .with_body(
                    "Omega-3 and omega-6 fatty acids compete for the same enzymes. \
                     A balanced intake keeps that competition fair.",
                )
                .with_extra("media", "assets/ratio.mp4"),
        )
        .with_slide(
            Slide::new("slide-3-input", SlideVariant::Quiz)
                .with_title("Your test results")
                .with_body("Enter the two values from your test report.")
                .with_question(
                    SlideQuestion::new("omega3", "Omega-3 share", QuestionKind::Text).required(),
                )
                .with_question(
                    SlideQuestion::new("omega6", "Omega-6 share", QuestionKind::Text).required(),
                ),
        )
        .with_slide(
            Slide::new("slide-4-balanced", SlideVariant::Hero)
                .with_title("You're in balance")
                .with_body("Your ratio is right where it should be. Keep it up!"),
        )
        .with_slide(
            Slide::new("slide-5-unbalanced", SlideVariant::Split)
                .with_title("Room for improvement")
                .with_body("Your ratio is off. Small changes in diet can make a big difference."),
        )
        .with_slide(
            Slide::new("slide-6-contact", SlideVariant::Contact)
                .with_title("Questions?")
                .with_body("{{recipientName}}, reach out any time: {{contactLink}}"),
        )
        .with_slide(
            Slide::new("slide-7-final", SlideVariant::Final)
                .with_title("Thank you")
                .with_body("{{message}}"),
        )
}

/// Wellness questionnaire with a yes/no branch.
pub fn wellness_check() -> Template {
    Template::new(WELLNESS_CHECK, "Wellness Check")
        .with_description("Short lifestyle check that branches on supplement use")
        .with_slide(
            Slide::new("welcome", SlideVariant::Hero)
                .with_title("Hi {{recipientName}}")
                .with_subtitle("Three minutes for your wellbeing")
                .with_duration(4000),
        )
        .with_slide(
            Slide::new("habits", SlideVariant::Quiz)
                .with_title("Your routine")
                .with_question(
                    SlideQuestion::new(
                        "takes-supplements",
                        "Do you take a daily supplement?",
                        QuestionKind::YesNo,
                    )
                    .required(),
                ),
        )
        .with_slide(
            Slide::new("routine-yes", SlideVariant::Split)
                .with_title("Great habit")
                .with_body("Let's make sure your supplement covers what you need."),
        )
        .with_slide(
            Slide::new("routine-no", SlideVariant::Split)
                .with_title("Getting started")
                .with_body("A simple daily routine is easier than you think."),
        )
        .with_slide(
            Slide::new("contact", SlideVariant::Contact)
                .with_title("Talk to us")
                .with_body("{{contactLink}}"),
        )
        .with_slide(Slide::new("final", SlideVariant::Final).with_title("Stay well, {{recipientName}}"))
}

/// Product tour with a rating branch.
pub fn product_tour() -> Template {
    Template::new(PRODUCT_TOUR, "Product Tour")
        .with_description("Feature walkthrough that branches on the recipient's rating")
        .with_slide(
            Slide::new("intro", SlideVariant::Hero)
                .with_title("{{recipientName}}, meet the product")
                .with_duration(3000),
        )
        .with_slide(
            Slide::new("features", SlideVariant::Grid)
                .with_title("What you get")
                .with_feature(Feature::new("bolt", "Fast", "Set up in minutes."))
                .with_feature(Feature::new("shield", "Safe", "Your data stays yours."))
                .with_feature(Feature::new(
                    "heart",
                    "Made for {{recipientName}}",
                    "Tailored to how you work.",
                )),
        )
        .with_slide(
            Slide::new("rating", SlideVariant::Quiz)
                .with_title("First impression")
                .with_question(
                    SlideQuestion::new("score", "How would you rate it so far?", QuestionKind::Rating)
                        .required()
                        .with_choices(["1", "2", "3", "4", "5"]),
                ),
        )
        .with_slide(
            Slide::new("testimonials", SlideVariant::Split)
                .with_title("You're in good company")
                .with_body("Here's what other customers say."),
        )
        .with_slide(
            Slide::new("support", SlideVariant::Split)
                .with_title("Let us help")
                .with_body("Tell us what's missing and we'll show you around."),
        )
        .with_slide(
            Slide::new("contact", SlideVariant::Contact)
                .with_title("Next steps")
                .with_body("Book a call: {{contactLink}}"),
        )
        .with_slide(
            Slide::new("final", SlideVariant::Final)
                .with_title("Thanks for your time")
                .with_body("{{message}}"),
        )
}
