//! OpenAI chat-completions summarizer.

mod summarizer;

pub use summarizer::OpenAiSummarizer;
