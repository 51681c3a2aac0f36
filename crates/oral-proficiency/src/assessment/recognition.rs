//! Shape of the upstream transcription collaborator.
//!
//! Recognition engines are tried in order and the first one returning a
//! non-empty transcript wins. The scoring core never calls a recognizer; it
//! only consumes the [`RecognitionResult`] produced here.

use std::fmt;

use super::domain::{tokenize, RecognitionResult};

/// A speech-to-text strategy, typically one model of a cloud engine.
pub trait SpeechRecognizer: Send + Sync {
    fn name(&self) -> &str;

    fn recognize(&self, audio: &[u8]) -> Result<RecognitionResult, RecognitionError>;
}

/// One failed strategy in a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionAttempt {
    pub recognizer: String,
    pub reason: String,
}

impl fmt::Display for RecognitionAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.recognizer, self.reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecognitionError {
    #[error("recognizer failed: {0}")]
    Failed(String),
    #[error("no recognizer configured")]
    NoRecognizers,
    #[error("every recognizer failed: {}", join_attempts(.attempts))]
    Exhausted { attempts: Vec<RecognitionAttempt> },
}

fn join_attempts(attempts: &[RecognitionAttempt]) -> String {
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Ordered fallback over several recognizers.
#[derive(Default)]
pub struct RecognizerChain {
    recognizers: Vec<Box<dyn SpeechRecognizer>>,
}

impl RecognizerChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, recognizer: impl SpeechRecognizer + 'static) -> Self {
        self.recognizers.push(Box::new(recognizer));
        self
    }

    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }

    /// Run recognizers in order until one yields speech. An empty transcript
    /// counts as a miss.
    pub fn recognize(&self, audio: &[u8]) -> Result<RecognitionResult, RecognitionError> {
        if self.recognizers.is_empty() {
            return Err(RecognitionError::NoRecognizers);
        }

        let mut attempts = Vec::new();
        for recognizer in &self.recognizers {
            let reason = match recognizer.recognize(audio) {
                Ok(result) if !tokenize(&result.transcript).is_empty() => {
                    tracing::debug!(recognizer = recognizer.name(), "transcription succeeded");
                    return Ok(result);
                }
                Ok(_) => "empty transcript".to_string(),
                Err(err) => err.to_string(),
            };
            tracing::warn!(recognizer = recognizer.name(), %reason, "recognizer failed, trying next");
            attempts.push(RecognitionAttempt {
                recognizer: recognizer.name().to_string(),
                reason,
            });
        }

        Err(RecognitionError::Exhausted { attempts })
    }
}
