use tracing::warn;
use uuid::Uuid;

use crate::auth::repo_types::User;
use crate::chat::repo::{self, Message};
use crate::dietitian::{
    build_recommendation_prompt, build_system_prompt, classify, daily_calorie_target,
    flag_allergen, refusal, sanitize_reply,
};
use crate::external::generative::ChatTurn;
use crate::state::AppState;

/// Returned verbatim when the generative API is down.
pub const FALLBACK_REPLY: &str =
    "I'm having trouble reaching my nutrition knowledge right now. Please try again in a \
     moment; in the meantime, aim for balanced meals with lean protein and vegetables.";

const HISTORY_WINDOW: i64 = 20;

/// Map transcript rows to chat turns; the user's rows become "user",
/// everything else is the assistant.
fn assemble_turns(system: String, history: &[Message], user_id: Uuid) -> Vec<ChatTurn> {
    let mut turns = Vec::with_capacity(history.len() + 1);
    turns.push(ChatTurn::system(system));
    for m in history {
        if m.sender_id == user_id {
            turns.push(ChatTurn::user(m.body.clone()));
        } else {
            turns.push(ChatTurn::assistant(m.body.clone()));
        }
    }
    turns
}

/// Produce the dietitian's reply to a message that has already been
/// persisted to the transcript. Allergy hits short-circuit the model;
/// model failures degrade to the canned fallback.
pub async fn dietitian_reply(
    state: &AppState,
    user: &User,
    message: &str,
) -> anyhow::Result<String> {
    if let Some(hit) = flag_allergen(message, user.allergy_list()) {
        return Ok(refusal(&hit));
    }

    let intent = classify(message);
    let target = daily_calorie_target(user);
    let system = build_system_prompt(user, target, intent);

    // The just-persisted user message is the tail of this window.
    let history = repo::transcript(&state.db, user.id, HISTORY_WINDOW).await?;
    let turns = assemble_turns(system, &history, user.id);

    match state.model.complete(&turns).await {
        Ok(text) => Ok(sanitize_reply(&text)),
        Err(e) => {
            warn!(error = %e, user_id = %user.id, "generative API failed, using fallback");
            Ok(FALLBACK_REPLY.to_string())
        }
    }
}

/// One-shot meal recommendation from the profile alone; not persisted
/// to the transcript.
pub async fn recommend_meals(state: &AppState, user: &User) -> (i32, String) {
    let target = daily_calorie_target(user);
    let prompt = build_recommendation_prompt(user, target);
    let turns = vec![ChatTurn::system(prompt)];

    let text = match state.model.complete(&turns).await {
        Ok(text) => sanitize_reply(&text),
        Err(e) => {
            warn!(error = %e, user_id = %user.id, "generative API failed, using fallback");
            FALLBACK_REPLY.to_string()
        }
    };
    (target, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo_types::{ActivityLevel, Gender, Goal};
    use crate::chat::repo::AI_PEER;
    use time::OffsetDateTime;

    fn message(sender: Uuid, receiver: Uuid, body: &str) -> Message {
        Message {
            id: Uuid::new_v4(),
            sender_id: sender,
            receiver_id: receiver,
            body: body.into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

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
    fn turns_map_roles_by_sender() {
        let user_id = Uuid::new_v4();
        let history = vec![
            message(user_id, AI_PEER, "hi"),
            message(AI_PEER, user_id, "hello, how can I help?"),
            message(user_id, AI_PEER, "what should I eat?"),
        ];
        let turns = assemble_turns("sys".into(), &history, user_id);
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[0].role, "system");
        assert_eq!(turns[1].role, "user");
        assert_eq!(turns[2].role, "assistant");
        assert_eq!(turns[3].role, "user");
        assert_eq!(turns[3].content, "what should I eat?");
    }

    #[tokio::test]
    async fn allergy_hit_skips_the_model() {
        let state = AppState::fake();
        let user = sample_user(Some(vec!["peanut".into()]));
        let reply = dietitian_reply(&state, &user, "give me a peanut butter snack")
            .await
            .expect("reply");
        // The fake model would answer "fake reply"; the guard must answer first.
        assert!(reply.contains("allergy list"));
    }
}
