// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains the cross-cutting pieces.

/// Who the model is speaking for. Prefixed to every system instruction.
pub const BRAND_CONTEXT: &str = "\
    You are the assistant for DevAura Labs, an education and technology company. \
    DevAura Labs offers instructor-led courses, multi-week skill programs, and a \
    hardware store for developer and maker equipment.";

/// Keeps answers inside what DevAura actually offers.
pub const SCOPE_INSTRUCTION: &str = "\
    Only describe offerings in general terms (topic, level, format). \
    Do NOT invent prices, dates, discounts, or instructor names. \
    If a request is unrelated to learning, careers, or the store, politely redirect.";

/// Joins fragments into one system instruction.
pub fn system_instruction(parts: &[&str]) -> String {
    parts.join("\n\n")
}
