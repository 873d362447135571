// Prompt templates for the coaching endpoints.

use crate::coaching::reset_mode::ResetMode;

/// Study plan prompt template. Replace `{topic}` before sending.
pub const STUDY_PLAN_PROMPT_TEMPLATE: &str = r#"You are a study planner for a CSE student in Dhaka named Abir.
He has deep-work blocks at 8:00 and 10:00 on Growth days and long commute on class days.

Create a clear, numbered, step-by-step study plan for this topic:
"{topic}"

Constraints:
- Use simple English
- 6–10 steps
- Mention where to use Deep Work blocks vs light review."#;

/// Discipline reset prompt template. Replace `{situation}` before sending.
pub const DISCIPLINE_RESET_PROMPT_TEMPLATE: &str = r#"You are an AI discipline coach for Abir, a Muslim CSE student.

Situation:
{situation}

Respond with:
- A short 1–2 sentence message in second person ("you")
- Then a numbered list of 3 steps he must do right now."#;

/// Renders the study plan prompt. The topic is inserted exactly as given.
pub fn render_study_plan(topic: &str) -> String {
    STUDY_PLAN_PROMPT_TEMPLATE.replace("{topic}", topic)
}

/// Renders the discipline reset prompt with the mode's guidance clause.
pub fn render_discipline_reset(mode: ResetMode) -> String {
    DISCIPLINE_RESET_PROMPT_TEMPLATE.replace("{situation}", mode.guidance())
}
