//! Transition tables for the built-in decks.

use deck_core::builtin::{DEMO, OMEGA, PRODUCT_TOUR, WELLNESS_CHECK};

use crate::decision::Decision;
use crate::family::FlowFamily;

/// Omega-3 share of a balanced ratio.
pub const OMEGA3_REFERENCE: f64 = 1.0;
/// Omega-6 share of a balanced ratio.
pub const OMEGA6_REFERENCE: f64 = 3.0;
/// Lowest rating that counts as a positive first impression.
pub const POSITIVE_RATING: f64 = 4.0;

/// All built-in families.
pub fn families() -> Vec<FlowFamily> {
    vec![demo(), omega(), wellness_check(), product_tour()]
}

/// The demo deck is linear.
pub fn demo() -> FlowFamily {
    FlowFamily::new(DEMO)
}

/// Balanced ratios skip the improvement advice.
pub fn omega() -> FlowFamily {
    FlowFamily::new(OMEGA)
        .decide(
            "slide-3-input",
            Decision::ratio(
                [("omega3", OMEGA3_REFERENCE), ("omega6", OMEGA6_REFERENCE)],
                "slide-4-balanced",
                "slide-5-unbalanced",
            ),
        )
        .goto("slide-4-balanced", "slide-6-contact")
}

/// Supplement users and non-users each see their own routine slide.
pub fn wellness_check() -> FlowFamily {
    FlowFamily::new(WELLNESS_CHECK)
        .decide("habits", Decision::yes_no("routine-yes", "routine-no"))
        .goto("routine-yes", "contact")
}

/// Happy raters see testimonials, everyone else is offered support.
pub fn product_tour() -> FlowFamily {
    FlowFamily::new(PRODUCT_TOUR)
        .decide(
            "rating",
            Decision::at_least(POSITIVE_RATING, "testimonials", "support"),
        )
        .goto("testimonials", "contact")
}
