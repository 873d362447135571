// Study planning and discipline coaching endpoints.
// All LLM calls go through the `TextGenerator` in AppState.

pub mod body;
pub mod handlers;
pub mod prompts;
pub mod reset_mode;
