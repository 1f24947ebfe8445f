use crate::auth::dto::RegisterRequest;
use crate::auth::repo_types::User;
use sqlx::PgPool;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, name, email, password_hash, goal, age, current_weight_kg, \
     target_weight_kg, gender, activity_level, height_cm, allergies, created_at";

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(db)
            .await?;
        Ok(user)
    }

    /// Find a user by id.
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(user)
    }

    /// Create a new user with a hashed password and full profile.
    pub async fn create(
        db: &PgPool,
        payload: &RegisterRequest,
        password_hash: &str,
    ) -> anyhow::Result<User> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash, goal, age, current_weight_kg, \
             target_weight_kg, gender, activity_level, height_cm, allergies) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&payload.name)
            .bind(&payload.email)
            .bind(password_hash)
            .bind(payload.goal)
            .bind(payload.age)
            .bind(payload.current_weight_kg)
            .bind(payload.target_weight_kg)
            .bind(payload.gender)
            .bind(payload.activity_level)
            .bind(payload.height_cm)
            .bind(payload.allergies.clone().map(sqlx::types::Json))
            .fetch_one(db)
            .await?;
        Ok(user)
    }

    /// Replace the allergy list, the only profile field that ever changes.
    pub async fn update_allergies(
        db: &PgPool,
        id: Uuid,
        allergies: &[String],
    ) -> anyhow::Result<User> {
        let query = format!(
            "UPDATE users SET allergies = $2 WHERE id = $1 RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(sqlx::types::Json(allergies.to_vec()))
            .fetch_one(db)
            .await?;
        Ok(user)
    }
}
