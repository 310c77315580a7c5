//! Test runner state machine.

use tracing::{debug, warn};

use mindgauge_common::{AssistantError, TestResult, TestType};

use crate::auth::TokenManager;
use crate::session::ChatSession;
use crate::ChatClient;

use super::conclusion::is_conclusion;
use super::prompts;
use super::ResultSink;

/// Hard cap on answered questions; reaching it forces a conclusion request
/// regardless of what the heuristic says.
pub const QUESTION_CAP: u32 = 7;

/// Where the runner is in the dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestPhase {
    Priming,
    Questioning,
    AwaitingConclusion,
    Concluded,
}

/// What one answered question produced.
#[derive(Debug)]
pub enum StepOutcome {
    /// The model asked another question; surface it to the caller.
    NextQuestion(String),
    /// The dialogue concluded; the result has been persisted.
    Finished(TestResult),
}

/// Drives one guided assessment over a conversation session.
///
/// The question count increments only on successfully answered questions:
/// the priming exchange does not count, and a failed `answer` call leaves
/// the count (and phase) untouched so the caller can retry.
pub struct TestRunner {
    test_type: TestType,
    session: ChatSession,
    turn_count: u32,
    phase: TestPhase,
}

impl TestRunner {
    pub fn new(test_type: TestType) -> Self {
        Self {
            test_type,
            session: ChatSession::for_test(test_type),
            turn_count: 0,
            phase: TestPhase::Priming,
        }
    }

    pub fn test_type(&self) -> TestType {
        self.test_type
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn phase(&self) -> TestPhase {
        self.phase
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    /// Prime the dialogue: send the canned opener and surface the model's
    /// greeting plus first question. Does not count as an answered question.
    pub async fn begin(
        &mut self,
        auth: &TokenManager,
        chat: &dyn ChatClient,
    ) -> Result<String, AssistantError> {
        if self.phase != TestPhase::Priming {
            return Err(AssistantError::Other("test already started".into()));
        }

        debug!(test_type = %self.test_type, "priming test dialogue");
        let greeting = self.session.send(auth, chat, prompts::OPENER).await?;
        self.phase = TestPhase::Questioning;
        Ok(greeting)
    }

    /// Relay one user answer. Returns the model's next question, or the
    /// finalized result once the dialogue concludes.
    pub async fn answer(
        &mut self,
        auth: &TokenManager,
        chat: &dyn ChatClient,
        sink: &dyn ResultSink,
        answer: &str,
    ) -> Result<StepOutcome, AssistantError> {
        if self.phase != TestPhase::Questioning {
            return Err(AssistantError::Other(
                "test is not accepting answers".into(),
            ));
        }

        let reply = self.session.send(auth, chat, answer).await?;
        self.turn_count += 1;
        debug!(turn = self.turn_count, "answer relayed");

        if is_conclusion(&reply, self.test_type) {
            self.phase = TestPhase::AwaitingConclusion;
            let result = self.finish(sink, reply)?;
            return Ok(StepOutcome::Finished(result));
        }

        if self.turn_count >= QUESTION_CAP {
            self.phase = TestPhase::AwaitingConclusion;
            debug!("question cap reached, requesting conclusion");
            let verdict = self.request_conclusion(auth, chat).await;
            let result = self.finish(sink, verdict)?;
            return Ok(StepOutcome::Finished(result));
        }

        Ok(StepOutcome::NextQuestion(reply))
    }

    /// Ask the model for its conclusion outright. On failure, fall back to
    /// the most recent assistant turn; a session with at least one reply
    /// never fails outright at this point.
    async fn request_conclusion(&mut self, auth: &TokenManager, chat: &dyn ChatClient) -> String {
        let prompt = prompts::conclusion_prompt(self.test_type);
        match self.session.send(auth, chat, prompt).await {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!("conclusion request failed, using last assistant turn: {e}");
                self.session
                    .last_assistant_turn()
                    .unwrap_or(prompts::FALLBACK_VERDICT)
                    .to_string()
            }
        }
    }

    fn finish(
        &mut self,
        sink: &dyn ResultSink,
        verdict: String,
    ) -> Result<TestResult, AssistantError> {
        self.phase = TestPhase::Concluded;
        let details = details_text(self.test_type, self.turn_count);
        let result = TestResult::new(self.test_type, verdict, self.turn_count, details);
        let id = sink.save(&result)?;
        debug!(id, turns = self.turn_count, "test result persisted");
        Ok(result)
    }
}

fn details_text(test_type: TestType, turn_count: u32) -> String {
    match test_type {
        TestType::Advice => format!(
            "Консультация проведена через ИИ-диалог. Количество вопросов: {turn_count}"
        ),
        _ => format!("Тест проведен через ИИ-диалог. Количество вопросов: {turn_count}"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mindgauge_common::TransportError;

    use crate::auth::TokenManager;
    use crate::test_support::{CountingTransport, MemorySink, MemoryStore, ScriptedChat};

    use super::*;

    fn auth() -> TokenManager {
        TokenManager::new(
            MemoryStore::with_credential("cred"),
            Arc::new(CountingTransport::new()),
        )
    }

    fn conclusion_text() -> String {
        let mut text = String::from("Заключение и рекомендации: ");
        text.extend(std::iter::repeat('а').take(450));
        text
    }

    #[tokio::test]
    async fn priming_does_not_count_a_question() {
        let auth = auth();
        let chat = ScriptedChat::replying(&["Здравствуйте! Вопрос 1."]);
        let mut runner = TestRunner::new(TestType::PersonalityType);

        let greeting = runner.begin(&auth, &chat).await.unwrap();
        assert_eq!(greeting, "Здравствуйте! Вопрос 1.");
        assert_eq!(runner.turn_count(), 0);
        assert_eq!(runner.phase(), TestPhase::Questioning);
    }

    #[tokio::test]
    async fn begin_twice_is_rejected() {
        let auth = auth();
        let chat = ScriptedChat::replying(&["Вопрос 1."]);
        let mut runner = TestRunner::new(TestType::PersonalityType);

        runner.begin(&auth, &chat).await.unwrap();
        let err = runner.begin(&auth, &chat).await.unwrap_err();
        assert!(matches!(err, AssistantError::Other(_)));
    }

    #[tokio::test]
    async fn answer_before_begin_is_rejected() {
        let auth = auth();
        let chat = ScriptedChat::new();
        let sink = MemorySink::default();
        let mut runner = TestRunner::new(TestType::StressLevel);

        let err = runner.answer(&auth, &chat, &sink, "да").await.unwrap_err();
        assert!(matches!(err, AssistantError::Other(_)));
    }

    #[tokio::test]
    async fn questions_increment_until_conclusion() {
        let auth = auth();
        let chat = ScriptedChat::replying(&["Вопрос 1.", "Вопрос 2.", "Вопрос 3."]);
        chat.push_reply(&conclusion_text());
        let sink = MemorySink::default();
        let mut runner = TestRunner::new(TestType::PersonalityType);

        runner.begin(&auth, &chat).await.unwrap();

        for expected in 1..=2 {
            let outcome = runner.answer(&auth, &chat, &sink, "ответ").await.unwrap();
            assert!(matches!(outcome, StepOutcome::NextQuestion(_)));
            assert_eq!(runner.turn_count(), expected);
        }

        let outcome = runner.answer(&auth, &chat, &sink, "ответ").await.unwrap();
        match outcome {
            StepOutcome::Finished(result) => {
                assert_eq!(result.turn_count, 3);
                assert_eq!(result.verdict, conclusion_text());
                assert!(result.details.contains("3"));
            }
            other => panic!("expected Finished, got {other:?}"),
        }
        assert_eq!(runner.phase(), TestPhase::Concluded);
        assert_eq!(sink.results().len(), 1);
    }

    #[tokio::test]
    async fn cap_forces_a_conclusion_request() {
        let auth = auth();
        let chat = ScriptedChat::replying(&["Вопрос 0."]);
        // Seven short, non-conclusive replies, then the forced conclusion.
        for i in 1..=7 {
            chat.push_reply(&format!("Вопрос {i}."));
        }
        chat.push_reply(&conclusion_text());
        let sink = MemorySink::default();
        let mut runner = TestRunner::new(TestType::StressLevel);

        runner.begin(&auth, &chat).await.unwrap();
        let mut last = None;
        for _ in 1..=7 {
            last = Some(runner.answer(&auth, &chat, &sink, "ответ").await.unwrap());
        }

        match last.unwrap() {
            StepOutcome::Finished(result) => {
                assert_eq!(result.turn_count, 7);
                assert_eq!(result.verdict, conclusion_text());
            }
            other => panic!("expected Finished at the cap, got {other:?}"),
        }
        assert_eq!(sink.results().len(), 1);
    }

    #[tokio::test]
    async fn failed_conclusion_request_falls_back_to_last_reply() {
        let auth = auth();
        let chat = ScriptedChat::replying(&["Вопрос 0."]);
        for i in 1..=7 {
            chat.push_reply(&format!("Вопрос {i}."));
        }
        chat.push_failure(TransportError::Http {
            status: 500,
            body: "server error".into(),
        });
        let sink = MemorySink::default();
        let mut runner = TestRunner::new(TestType::Profession);

        runner.begin(&auth, &chat).await.unwrap();
        let mut last = None;
        for _ in 1..=7 {
            last = Some(runner.answer(&auth, &chat, &sink, "ответ").await.unwrap());
        }

        match last.unwrap() {
            StepOutcome::Finished(result) => {
                // The verdict is the last successfully received reply.
                assert_eq!(result.verdict, "Вопрос 7.");
                assert_eq!(result.turn_count, 7);
            }
            other => panic!("expected Finished, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_answer_does_not_advance_and_can_be_retried() {
        let auth = auth();
        let chat = ScriptedChat::replying(&["Вопрос 1."]);
        chat.push_failure(TransportError::Network("connection reset".into()));
        chat.push_reply("Вопрос 2.");
        let sink = MemorySink::default();
        let mut runner = TestRunner::new(TestType::Relationships);

        runner.begin(&auth, &chat).await.unwrap();

        let err = runner.answer(&auth, &chat, &sink, "ответ").await.unwrap_err();
        assert!(matches!(err, AssistantError::Transport(_)));
        assert_eq!(runner.turn_count(), 0);
        assert_eq!(runner.phase(), TestPhase::Questioning);

        // Retry records the answer again; the orphaned user turn stays.
        let outcome = runner.answer(&auth, &chat, &sink, "ответ").await.unwrap();
        assert!(matches!(outcome, StepOutcome::NextQuestion(_)));
        assert_eq!(runner.turn_count(), 1);
    }

    #[tokio::test]
    async fn advice_details_use_the_consultation_wording() {
        let auth = auth();
        let chat = ScriptedChat::replying(&["Уточните, пожалуйста."]);
        let mut advice_conclusion = String::from("Мой совет и практические шаги: ");
        advice_conclusion.extend(std::iter::repeat('а').take(320));
        chat.push_reply(&advice_conclusion);
        let sink = MemorySink::default();
        let mut runner = TestRunner::new(TestType::Advice);

        runner.begin(&auth, &chat).await.unwrap();
        let outcome = runner.answer(&auth, &chat, &sink, "вот ситуация").await.unwrap();

        match outcome {
            StepOutcome::Finished(result) => {
                assert!(result.details.starts_with("Консультация"));
            }
            other => panic!("expected Finished, got {other:?}"),
        }
    }
}
