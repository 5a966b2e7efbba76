/*!
 * Mock translator implementations for testing.
 *
 * The mocks implement the same Translator seam the pipeline consumes:
 * - `MockTranslator::echo()` - returns the input lines unchanged
 * - `MockTranslator::returning(lines)` - returns a fixed batch
 * - `MockTranslator::drop_last()` - always returns one line too few
 * - `MockTranslator::wrong_count_then_echo()` - mismatch on the first
 *   call, correct from the second onwards
 * - `MockTranslator::auth_failing()` - always fails with a fatal error
 */

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use subloc::errors::ProviderError;
use subloc::translation_service::Translator;

/// Behavior mode for the mock translator
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return the input lines unchanged
    Echo,
    /// Return a fixed batch regardless of input
    Returning(Vec<String>),
    /// Return the input lines minus the last one
    DropLast,
    /// Return one line too few on the first call, echo afterwards
    WrongCountThenEcho,
    /// Always fail with an authentication error
    AuthFailing,
}

/// Mock translator for pipeline behavior tests
pub struct MockTranslator {
    behavior: MockBehavior,
    call_count: AtomicUsize,
}

impl MockTranslator {
    /// Create a mock with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: AtomicUsize::new(0),
        }
    }

    /// Mock that returns the input lines unchanged
    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    /// Mock that returns a fixed batch
    pub fn returning(lines: Vec<String>) -> Self {
        Self::new(MockBehavior::Returning(lines))
    }

    /// Mock that always returns one line too few
    pub fn drop_last() -> Self {
        Self::new(MockBehavior::DropLast)
    }

    /// Mock that mismatches once, then echoes
    pub fn wrong_count_then_echo() -> Self {
        Self::new(MockBehavior::WrongCountThenEcho)
    }

    /// Mock that always fails with a fatal error
    pub fn auth_failing() -> Self {
        Self::new(MockBehavior::AuthFailing)
    }

    /// Number of translate calls made so far
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

fn input_lines(text: &str) -> Vec<String> {
    text.lines().map(|line| line.to_string()).collect()
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str) -> Result<Vec<String>, ProviderError> {
        let call = self.call_count.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            MockBehavior::Echo => Ok(input_lines(text)),
            MockBehavior::Returning(lines) => Ok(lines.clone()),
            MockBehavior::DropLast => {
                let mut lines = input_lines(text);
                lines.pop();
                Ok(lines)
            }
            MockBehavior::WrongCountThenEcho => {
                let mut lines = input_lines(text);
                if call == 0 {
                    lines.pop();
                }
                Ok(lines)
            }
            MockBehavior::AuthFailing => Err(ProviderError::AuthenticationError(
                "Invalid API key".to_string(),
            )),
        }
    }
}
