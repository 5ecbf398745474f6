//! Classification rule implementations.
//!
//! Provides the concrete [`ChangeRule`]s and the fixed order in which the
//! classifier runs them.

mod components;
mod derived;
mod method;
mod narrative;
mod safety;
mod yields;

pub use components::ComponentRule;
pub use derived::DerivedAttributeRule;
pub use method::MethodRule;
pub use narrative::FreeTextRule;
pub use safety::{CrossContactRule, PossibleAttributeRule, PresentAttributeRule};
pub use yields::YieldRule;

use super::traits::ChangeRule;

/// The rule battery in evaluation order.
///
/// [`PresentAttributeRule`] and [`ComponentRule`] must precede
/// [`DerivedAttributeRule`], which skips allergens they already attributed.
#[must_use]
pub fn default_rules() -> Vec<Box<dyn ChangeRule>> {
    vec![
        Box::new(PresentAttributeRule),
        Box::new(PossibleAttributeRule),
        Box::new(CrossContactRule),
        Box::new(ComponentRule),
        Box::new(YieldRule),
        Box::new(DerivedAttributeRule),
        Box::new(MethodRule),
        Box::new(FreeTextRule),
    ]
}
