//! services/api/src/adapters/quiz_llm.rs
//!
//! This module contains the adapter for AI quiz generation.
//! It implements the `QuizGenerationService` port from the `core` crate.
//! The model is asked for a single JSON object; anything it wraps around that
//! object (prose, code fences) is stripped before parsing.

const QUIZ_PROMPT_TEMPLATE: &str = r#"You are an expert quiz generator. Create a quiz based on the provided content.

SUBJECT: {subject}
DIFFICULTY LEVEL: {difficulty}
NUMBER OF QUESTIONS: {question_count}

CONTENT TO GENERATE QUESTIONS FROM:
{content}

REQUIREMENTS:
1. Generate exactly {question_count} multiple-choice questions, each with 4 options.
2. Questions must be answerable from the provided content and match the difficulty level.
3. Include a short explanation for every correct answer.
4. Vary question types (factual, conceptual, application-based).

OUTPUT FORMAT:
Return ONLY a JSON object with this structure, no surrounding text:
{
  "subject": "{subject}",
  "difficulty": "{difficulty}",
  "sourceContent": "Brief preview of the content used",
  "questions": [
    {
      "id": 1,
      "question": "Question text here?",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correctAnswer": 0,
      "explanation": "Why this answer is correct"
    }
  ]
}

"correctAnswer" must be 0, 1, 2 or 3, indexing into "options"."#;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use regex::Regex;
use study_assistant_core::domain::Quiz;
use study_assistant_core::ports::{PortError, PortResult, QuizGenerationService};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `QuizGenerationService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiQuizAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiQuizAdapter {
    /// Creates a new `OpenAiQuizAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    /// Pulls the first JSON object out of the raw model output. Models often
    /// wrap the payload in code fences or a leading sentence despite the
    /// prompt, so parse the widest brace-delimited span.
    fn extract_quiz(raw: &str) -> PortResult<Quiz> {
        let json_regex = Regex::new(r"(?s)\{.*\}")
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        let json_text = json_regex
            .find(raw)
            .map(|m| m.as_str())
            .unwrap_or(raw);

        serde_json::from_str::<Quiz>(json_text).map_err(|_| {
            PortError::Unexpected("Failed to parse quiz response from AI".to_string())
        })
    }
}

//=========================================================================================
// `QuizGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl QuizGenerationService for OpenAiQuizAdapter {
    async fn generate_quiz(
        &self,
        content: &str,
        subject: &str,
        difficulty: &str,
        question_count: u32,
    ) -> PortResult<Quiz> {
        let prompt = QUIZ_PROMPT_TEMPLATE
            .replace("{subject}", subject)
            .replace("{difficulty}", difficulty)
            .replace("{question_count}", &question_count.to_string())
            .replace("{content}", content);

        let messages = vec![ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?,
        )];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let raw = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                PortError::Unexpected("The model returned an empty response".to_string())
            })?;

        Self::extract_quiz(&raw)
    }
}
