use crate::auth::repo_types::{ActivityLevel, Gender, Goal, User};

const MIN_DAILY_KCAL: f64 = 1200.0;
const GOAL_DEFICIT_KCAL: f64 = 500.0;

/// Mifflin-St Jeor basal metabolic rate, kcal/day.
pub fn bmr_kcal(gender: Gender, weight_kg: f64, height_cm: f64, age: i32) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

pub fn activity_multiplier(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::Light => 1.375,
        ActivityLevel::Moderate => 1.55,
        ActivityLevel::Active => 1.725,
        ActivityLevel::VeryActive => 1.9,
    }
}

fn goal_offset(goal: Goal) -> f64 {
    match goal {
        Goal::LoseWeight => -GOAL_DEFICIT_KCAL,
        Goal::GainWeight => GOAL_DEFICIT_KCAL,
        Goal::Maintenance => 0.0,
    }
}

/// Daily calorie target for a profile: BMR scaled by activity, shifted
/// by the goal, never below 1200 kcal.
pub fn daily_calorie_target(user: &User) -> i32 {
    let bmr = bmr_kcal(
        user.gender,
        user.current_weight_kg,
        user.height_cm,
        user.age,
    );
    let target = bmr * activity_multiplier(user.activity_level) + goal_offset(user.goal);
    target.max(MIN_DAILY_KCAL).round() as i32
}
