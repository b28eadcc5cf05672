//! Semantic detector adapter around an external classifier.
//!
//! Renders the recent conversation as `author(gender): content` lines with
//! the incoming message marked `[current]`, then calls the classifier under
//! a hard timeout. Timeouts and errors come back as `DetectionError`s; the
//! caller decides whether to fail open via [`SemanticDetector::detect_or_fallback`].

use std::time::{Duration, Instant};

use concord_core::config::SemanticConfig;
use concord_core::errors::DetectionError;
use concord_core::models::{Message, Signal, SignalKind};
use concord_core::traits::ISemanticClassifier;
use concord_session::ConversationWindow;

use super::DetectorOutcome;

pub struct SemanticDetector<C: ISemanticClassifier> {
    classifier: C,
    timeout: Duration,
    context_messages: usize,
}

impl<C: ISemanticClassifier> SemanticDetector<C> {
    pub fn new(classifier: C, config: &SemanticConfig) -> Self {
        Self {
            classifier,
            timeout: Duration::from_millis(config.timeout_ms),
            context_messages: config.context_messages.max(1),
        }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Conversation excerpt handed to the classifier.
    pub fn format_context(&self, message: &Message, window: &ConversationWindow) -> String {
        let mut lines: Vec<String> = window
            .recent(self.context_messages - 1)
            .into_iter()
            .map(|m| format!("{}({}): {}", m.author, m.gender, m.content))
            .collect();
        lines.push(format!(
            "{}({}): {} [current]",
            message.author, message.gender, message.content
        ));
        lines.join("\n")
    }

    /// Classify under the timeout. Dropping the returned future cancels the call.
    pub async fn detect(
        &self,
        message: &Message,
        window: &ConversationWindow,
    ) -> Result<Signal, DetectionError> {
        let context = self.format_context(message, window);
        match tokio::time::timeout(self.timeout, self.classifier.classify(&context)).await {
            Ok(Ok(score)) => Ok(Signal::new(
                SignalKind::Semantic,
                score.score,
                score.confidence,
                format!("{} classified", self.classifier.name()),
            )),
            Ok(Err(e)) => Err(e),
            Err(_elapsed) => Err(DetectionError::Timeout {
                detector: SignalKind::Semantic.as_str().to_string(),
                timeout_ms: self.timeout.as_millis() as u64,
            }),
        }
    }

    /// Fail-open wrapper: always yields a signal, zero on timeout or error.
    pub async fn detect_or_fallback(
        &self,
        message: &Message,
        window: &ConversationWindow,
    ) -> DetectorOutcome {
        let start = Instant::now();
        let result = self.detect(message, window).await;
        let latency_ms = match &result {
            Err(DetectionError::Timeout { timeout_ms, .. }) => *timeout_ms as f64,
            _ => start.elapsed().as_secs_f64() * 1000.0,
        };
        DetectorOutcome::from_result(SignalKind::Semantic, result, latency_ms)
    }
}
