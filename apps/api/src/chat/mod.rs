// Site chatbot. Stateless: the client sends the conversation so far with each
// message, nothing is stored server-side.

pub mod assistant;
pub mod handlers;
pub mod prompts;

pub use assistant::ChatAssistant;
