// AI course and skill-program recommendations.
// All LLM calls go through llm_client — no direct provider calls here.

pub mod dispatcher;
pub mod handlers;
pub mod models;
pub mod prompts;

pub use dispatcher::RecommendationDispatcher;
