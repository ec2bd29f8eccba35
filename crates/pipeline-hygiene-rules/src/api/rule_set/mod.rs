// Rule trait and tuple-based rule sets.

mod boxed;
mod hygiene;


pub use hygiene::{HygieneRule, RuleSet};
