// Prompt constants for the Recommendations module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{system_instruction, BRAND_CONTEXT, SCOPE_INSTRUCTION};

/// Recommendation prompt. Replace `{interests}` and `{goals}` before sending.
pub const RECOMMENDATION_PROMPT_TEMPLATE: &str = r#"A learner is looking for their next step at DevAura Labs.

Interests: {interests}
Goals: {goals}

Recommend 3 to 5 DevAura Labs courses or skill programs that fit this learner.
For each one give:
- a short title
- the level (beginner, intermediate, advanced)
- one or two sentences on why it fits their interests and goals

If relevant, suggest hardware from the DevAura store that would help with hands-on practice.
Write plain prose with a simple list. Do not use tables."#;

const GOALS_PLACEHOLDER: &str = "Not specified";

pub fn recommendation_system() -> String {
    system_instruction(&[
        BRAND_CONTEXT,
        "You recommend learning paths. Be encouraging and specific.",
        SCOPE_INSTRUCTION,
    ])
}

pub fn render_recommendation_prompt(interests: &str, goals: &str) -> String {
    let goals = goals.trim();
    let goals = if goals.is_empty() {
        GOALS_PLACEHOLDER
    } else {
        goals
    };

    RECOMMENDATION_PROMPT_TEMPLATE
        .replace("{goals}", goals)
        .replace("{interests}", interests.trim())
}
