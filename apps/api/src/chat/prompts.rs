use crate::llm_client::prompts::{system_instruction, BRAND_CONTEXT, SCOPE_INSTRUCTION};

const CHAT_STYLE: &str = "\
    You are chatting with a visitor on the DevAura Labs website. \
    Answer in a friendly tone, in at most a few short paragraphs. \
    Help them find courses, skill programs, or store products, and answer general \
    questions about learning to code, electronics, and tech careers.";

pub fn chat_system() -> String {
    system_instruction(&[BRAND_CONTEXT, CHAT_STYLE, SCOPE_INSTRUCTION])
}
