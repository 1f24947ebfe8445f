//! Decision logic behind the AI dietitian: calorie targets, intent
//! detection, allergy enforcement, and prompt/reply text handling.
//! Everything here is a pure function over profile data and strings.

pub mod allergy;
pub mod calories;
pub mod intent;
pub mod prompt;
pub mod sanitize;

pub use allergy::{flag_allergen, refusal};
pub use calories::daily_calorie_target;
pub use intent::{classify, Intent};
pub use prompt::{build_recommendation_prompt, build_system_prompt};
pub use sanitize::sanitize_reply;
