//! Profile module - the learner's canonical profile document.
//!
//! - `person` - `PersonProfile`, `Skill`, `CareerGoal` and the example template
//! - `normalizer` - lossy mapping from diagnostic output to a profile

mod normalizer;
mod person;

pub use normalizer::{NormalizerDefaults, ProfileNormalizer};
pub use person::{example_profile, CareerGoal, PersonProfile, Skill};
