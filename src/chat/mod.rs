pub mod ai_helper;
pub mod responder;

use ai_helper::LegalHelper;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: &str) -> Self {
        Self {
            role: Role::User,
            content: content.to_string(),
        }
    }

    pub fn assistant(content: &str) -> Self {
        Self {
            role: Role::Assistant,
            content: content.to_string(),
        }
    }
}

/// Prompts offered as one-tap questions in the chatbot.
pub const SAMPLE_QUESTIONS: [&str; 8] = [
    "What is a contract?",
    "What are my rights as a consumer?",
    "What is the legal age to marry?",
    "How do I file a police complaint?",
    "What is alimony?",
    "What is intellectual property law?",
    "What is an NDA?",
    "What is RTI?",
];

/// Answers chat queries through the live backend when one is configured,
/// and through the keyword responder otherwise.
pub struct LegalAssistant {
    helper: Option<LegalHelper>,
}

impl LegalAssistant {
    pub fn new(helper: Option<LegalHelper>) -> Self {
        Self { helper }
    }

    pub fn offline() -> Self {
        Self::new(None)
    }

    pub async fn chat_query(&self, query: &str, history: &[ChatMessage]) -> String {
        let Some(helper) = &self.helper else {
            return responder::respond(query);
        };

        match helper.chat_query(query, history).await {
            Ok(reply) => reply,
            Err(e) => {
                log::warn!("Chat backend unavailable, using canned answers: {e}");
                responder::respond(query)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_string(&ChatMessage::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);

        let back: ChatMessage = serde_json::from_str(r#"{"role":"user","content":"q"}"#).unwrap();
        assert_eq!(back, ChatMessage::user("q"));
    }

    #[tokio::test]
    async fn offline_assistant_uses_keyword_responder() {
        let assistant = LegalAssistant::offline();
        let history = vec![ChatMessage::user("What is an NDA?")];

        let reply = assistant.chat_query("What is an NDA?", &history).await;
        assert_eq!(reply, responder::NDA);
    }

    #[tokio::test]
    async fn unreachable_backend_falls_back_to_keyword_responder() {
        let helper = LegalHelper::new("sk-test", std::time::Duration::from_secs(5))
            .unwrap()
            .with_api_url("http://127.0.0.1:1/v1/chat/completions");
        let assistant = LegalAssistant::new(Some(helper));
        let history = vec![ChatMessage::user("What is an NDA?")];

        let reply = assistant.chat_query("What is an NDA?", &history).await;
        assert_eq!(reply, responder::NDA);
    }

    #[tokio::test]
    async fn sample_questions_have_canned_answers() {
        let assistant = LegalAssistant::offline();
        for question in SAMPLE_QUESTIONS {
            let reply = assistant.chat_query(question, &[]).await;
            assert!(!responder::fallback_responses(question).contains(&reply));
        }
    }
}
