mod client;
mod prompt;
mod reply;

pub use client::GeminiClient;
pub use prompt::build_prompt;
pub use reply::{parse_details, strip_reply_fences};
