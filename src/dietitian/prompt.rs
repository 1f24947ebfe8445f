use super::intent::Intent;
use crate::auth::repo_types::{Goal, User};

fn goal_phrase(goal: Goal) -> &'static str {
    match goal {
        Goal::LoseWeight => "lose weight",
        Goal::GainWeight => "gain weight",
        Goal::Maintenance => "maintain their current weight",
    }
}

fn profile_block(user: &User, calorie_target: i32) -> String {
    let allergies = user.allergy_list();
    let allergy_line = if allergies.is_empty() {
        "none".to_string()
    } else {
        allergies.join(", ")
    };
    format!(
        "Client profile:\n\
         - Name: {name}\n\
         - Age: {age}\n\
         - Current weight: {current:.1} kg, target weight: {target:.1} kg\n\
         - Height: {height:.1} cm\n\
         - Activity level: {activity:?}\n\
         - Goal: {goal}\n\
         - Daily calorie target: {kcal} kcal\n\
         - Allergies: {allergies}",
        name = user.name,
        age = user.age,
        current = user.current_weight_kg,
        target = user.target_weight_kg,
        height = user.height_cm,
        activity = user.activity_level,
        goal = goal_phrase(user.goal),
        kcal = calorie_target,
        allergies = allergy_line,
    )
}

/// System prompt for a chat turn. The intent picks the instruction
/// template; the profile block is always appended.
pub fn build_system_prompt(user: &User, calorie_target: i32, intent: Intent) -> String {
    let instruction = match intent {
        Intent::MealPlan => {
            "You are a registered dietitian. Build a realistic one-day meal plan that \
             fits the client's calorie target, split into breakfast, lunch, dinner and \
             one snack. Keep portions concrete."
        }
        Intent::CalorieQuery => {
            "You are a registered dietitian. Answer the client's calorie question with \
             concrete numbers, and relate them to the client's own daily target."
        }
        Intent::WeightAdvice => {
            "You are a registered dietitian. Give practical, safe advice toward the \
             client's weight goal. No crash diets, no supplements."
        }
        Intent::Recipe => {
            "You are a registered dietitian. Suggest a simple recipe that fits the \
             client's goal, with an ingredient list and an estimated calorie count."
        }
        Intent::General => {
            "You are a registered dietitian having a friendly conversation with a \
             client. Keep answers short, factual and encouraging."
        }
    };
    format!(
        "{instruction}\n\nNever suggest foods the client is allergic to. Answer in plain \
         sentences without markdown.\n\n{profile}",
        profile = profile_block(user, calorie_target)
    )
}

/// One-shot prompt for the meal recommendation endpoint.
pub fn build_recommendation_prompt(user: &User, calorie_target: i32) -> String {
    format!(
        "You are a registered dietitian. Recommend three meals for today that together \
         stay close to the client's daily calorie target, with a one-line reason for \
         each. Never include foods the client is allergic to. Answer in plain sentences \
         without markdown.\n\n{profile}",
        profile = profile_block(user, calorie_target)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo_types::{ActivityLevel, Gender};
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn sample_user(allergies: Option<Vec<String>>) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Dana".into(),
            email: "dana@example.com".into(),
            password_hash: String::new(),
            goal: Goal::LoseWeight,
            age: 31,
            current_weight_kg: 82.0,
            target_weight_kg: 74.0,
            gender: Gender::Female,
            activity_level: ActivityLevel::Light,
            height_cm: 168.0,
            allergies: allergies.map(sqlx::types::Json),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn system_prompt_injects_profile() {
        let user = sample_user(Some(vec!["peanut".into(), "soy".into()]));
        let prompt = build_system_prompt(&user, 1850, Intent::MealPlan);
        assert!(prompt.contains("Dana"));
        assert!(prompt.contains("1850 kcal"));
        assert!(prompt.contains("peanut, soy"));
        assert!(prompt.contains("lose weight"));
        assert!(prompt.contains("meal plan"));
    }

    #[test]
    fn templates_differ_by_intent() {
        let user = sample_user(None);
        let plan = build_system_prompt(&user, 2000, Intent::MealPlan);
        let recipe = build_system_prompt(&user, 2000, Intent::Recipe);
        assert_ne!(plan, recipe);
        assert!(recipe.contains("recipe"));
    }

    #[test]
    fn empty_allergy_list_reads_none() {
        let user = sample_user(None);
        let prompt = build_system_prompt(&user, 2000, Intent::General);
        assert!(prompt.contains("Allergies: none"));
    }

    #[test]
    fn recommendation_prompt_mentions_three_meals_and_target() {
        let user = sample_user(Some(vec!["gluten".into()]));
        let prompt = build_recommendation_prompt(&user, 1700);
        assert!(prompt.contains("three meals"));
        assert!(prompt.contains("1700 kcal"));
        assert!(prompt.contains("gluten"));
    }
}
