use std::time::Duration;

use chatgpt::config::ChatGPTEngine;
use chatgpt::prelude::*;
use chatgpt::types::{ChatMessage as GptMessage, CompletionResponse, Role as GptRole};

use crate::chat::{ChatMessage, Role};

const SYSTEM_PROMPT: &str = "You are a legal information assistant for users in India. \
Explain legal concepts, procedures and documents in plain language, using numbered steps where it helps. \
You provide general information only, not legal advice; suggest consulting a qualified legal professional for specific situations.";

/// Live chat backend for the legal assistant.
pub struct LegalHelper {
    chat_gpt: ChatGPT,
}

impl LegalHelper {
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self> {
        let mut chat_gpt = ChatGPT::new(api_key)?;
        chat_gpt.config.engine = ChatGPTEngine::Gpt35Turbo;
        chat_gpt.config.timeout = timeout;

        Ok(Self { chat_gpt })
    }

    #[cfg(test)]
    pub(crate) fn with_api_url(mut self, url: &str) -> Self {
        self.chat_gpt.config.api_url = url.parse().expect("valid backend url");
        self
    }

    pub async fn chat_query(&self, query: &str, history: &[ChatMessage]) -> Result<String> {
        log::debug!("Sending query with {} messages of history: {:?}", history.len(), query);

        let conversation = build_conversation(query, history);
        let response: CompletionResponse = self.chat_gpt.send_history(&conversation).await?;
        let content = response.message().clone().content;

        log::debug!("Completion: {:?}", content);

        Ok(content)
    }
}

/// System prompt followed by the session history, ending with the query.
fn build_conversation(query: &str, history: &[ChatMessage]) -> Vec<GptMessage> {
    let mut conversation = vec![GptMessage {
        role: GptRole::System,
        content: SYSTEM_PROMPT.to_string(),
    }];
    conversation.extend(history.iter().map(|m| GptMessage {
        role: match m.role {
            Role::User => GptRole::User,
            Role::Assistant => GptRole::Assistant,
        },
        content: m.content.clone(),
    }));

    let ends_with_query = matches!(
        history.last(),
        Some(ChatMessage { role: Role::User, content }) if content == query
    );
    if !ends_with_query {
        conversation.push(GptMessage {
            role: GptRole::User,
            content: query.to_string(),
        });
    }
    conversation
}
