use jsonwebtoken::{DecodingKey, EncodingKey};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::auth::repo_types::{ActivityLevel, Gender, Goal};

/// Token type used to distinguish Access and Refresh JWTs.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    #[serde(alias = "Access")]
    Access,
    #[serde(alias = "Refresh")]
    Refresh,
}

/// JWT payload. Besides the registered claims it carries the signed
/// `{id, email, name}` triple clients rely on.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,       // user ID
    pub email: String,
    pub name: String,
    pub exp: usize,      // expiration time
    pub iat: usize,      // issued at
    pub iss: String,     // issuer
    pub aud: String,     // audience
    pub kind: TokenKind, // access or refresh
}

/// Holds JWT signing and verification keys with config data.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub goal: Goal,
    pub age: i32,
    pub current_weight_kg: f64,
    pub target_weight_kg: f64,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub height_cm: f64,
    #[serde(default)]
    pub allergies: Option<Vec<String>>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for token refresh.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Response returned after login, register or refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: PublicUser,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Full profile for GET /user/me, with the derived calorie target.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub goal: Goal,
    pub age: i32,
    pub current_weight_kg: f64,
    pub target_weight_kg: f64,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub height_cm: f64,
    pub allergies: Vec<String>,
    pub daily_calorie_target: i32,
}

/// Request body for PUT /user/allergies, the only mutable profile field.
#[derive(Debug, Deserialize)]
pub struct UpdateAllergiesRequest {
    pub allergies: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_parses_profile_enums() {
        let raw = r#"{
            "name": "Dana",
            "email": "dana@example.com",
            "password": "hunter2hunter2",
            "goal": "lose_weight",
            "age": 31,
            "current_weight_kg": 82.0,
            "target_weight_kg": 74.0,
            "gender": "female",
            "activity_level": "very_active",
            "height_cm": 168.0
        }"#;
        let req: RegisterRequest = serde_json::from_str(raw).expect("parse");
        assert_eq!(req.goal, Goal::LoseWeight);
        assert_eq!(req.activity_level, ActivityLevel::VeryActive);
        assert!(req.allergies.is_none());
    }

    #[test]
    fn profile_response_serializes_snake_case_enums() {
        let response = ProfileResponse {
            id: Uuid::new_v4(),
            name: "Dana".into(),
            email: "dana@example.com".into(),
            goal: Goal::GainWeight,
            age: 31,
            current_weight_kg: 82.0,
            target_weight_kg: 86.0,
            gender: Gender::Female,
            activity_level: ActivityLevel::Moderate,
            height_cm: 168.0,
            allergies: vec!["peanut".into()],
            daily_calorie_target: 2400,
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["goal"], "gain_weight");
        assert_eq!(json["activity_level"], "moderate");
        assert_eq!(json["daily_calorie_target"], 2400);
    }
}
