// Optimize pipeline: mode parsing, prompt compilation, model invocation.
// All LLM calls go through llm_client — no direct Gemini calls here.

pub mod handlers;
pub mod invoker;
pub mod prompts;
pub mod templates;
