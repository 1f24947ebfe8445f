use lazy_static::lazy_static;
use regex::Regex;

/// What the user is asking for; selects the prompt template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    MealPlan,
    CalorieQuery,
    WeightAdvice,
    Recipe,
    General,
}

lazy_static! {
    static ref MEAL_PLAN_RE: Regex =
        Regex::new(r"meal\s*plan|diet\s*plan|plan\s+my\s+(meals|week|day)").unwrap();
    static ref CALORIE_RE: Regex =
        Regex::new(r"how\s+many\s+calories|calorie|kcal|daily\s+intake").unwrap();
    static ref WEIGHT_RE: Regex =
        Regex::new(r"lose\s+weight|gain\s+weight|weight\s*loss|burn\s+fat|bulk(ing)?\b").unwrap();
    static ref RECIPE_RE: Regex =
        Regex::new(r"recipe|how\s+(do\s+i|to)\s+(cook|make|prepare)").unwrap();
}

/// Ordered regex matches against the lowercased input, first match wins.
pub fn classify(message: &str) -> Intent {
    let text = message.to_lowercase();
    if MEAL_PLAN_RE.is_match(&text) {
        Intent::MealPlan
    } else if CALORIE_RE.is_match(&text) {
        Intent::CalorieQuery
    } else if WEIGHT_RE.is_match(&text) {
        Intent::WeightAdvice
    } else if RECIPE_RE.is_match(&text) {
        Intent::Recipe
    } else {
        Intent::General
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_plan_phrases() {
        assert_eq!(classify("Can you build me a meal plan?"), Intent::MealPlan);
        assert_eq!(classify("plan my week please"), Intent::MealPlan);
        assert_eq!(classify("I need a DIET PLAN"), Intent::MealPlan);
    }

    #[test]
    fn calorie_phrases() {
        assert_eq!(
            classify("How many calories are in a banana?"),
            Intent::CalorieQuery
        );
        assert_eq!(classify("what's my daily intake"), Intent::CalorieQuery);
    }

    #[test]
    fn weight_phrases() {
        assert_eq!(classify("I want to lose weight fast"), Intent::WeightAdvice);
        assert_eq!(classify("tips for bulking"), Intent::WeightAdvice);
    }

    #[test]
    fn recipe_phrases() {
        assert_eq!(classify("got a recipe for lentil soup?"), Intent::Recipe);
        assert_eq!(classify("how do I cook quinoa"), Intent::Recipe);
    }

    #[test]
    fn first_match_wins() {
        // Mentions both a meal plan and calories; meal plan is checked first.
        assert_eq!(
            classify("make a meal plan around 2000 calories"),
            Intent::MealPlan
        );
    }

    #[test]
    fn unmatched_text_is_general() {
        assert_eq!(classify("hello there"), Intent::General);
        assert_eq!(classify(""), Intent::General);
    }
}
