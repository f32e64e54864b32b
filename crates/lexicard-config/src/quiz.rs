use std::env;

use serde::{Deserialize, Serialize};

fn default_feedback_delay_ms() -> u64 {
    1500
}

#[derive(Serialize, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct QuizConfig {
    /// How long answer feedback stays on screen before the next question is
    /// loaded. The sequencer itself is delay-free; the app schedules this.
    #[serde(default = "default_feedback_delay_ms")]
    pub feedback_delay_ms: u64,
}

impl QuizConfig {
    pub fn from_env() -> Self {
        let feedback_delay_ms = env::var("LEXICARD_FEEDBACK_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_feedback_delay_ms);

        Self { feedback_delay_ms }
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            feedback_delay_ms: default_feedback_delay_ms(),
        }
    }
}
