//! Prompt Compiler — static mode → (template, generation params) table.
//!
//! Compilation is a pure function of (mode, role, text): the same inputs
//! always produce the same prompt string and the same parameter pair.
//! Unknown mode tags are not an error; they resolve to the default template.

use crate::llm_client::GenParams;
use crate::optimize::prompts;

/// Substituted for the role when the request leaves it empty.
pub const DEFAULT_ROLE: &str = "Professional";

/// The rewriting mode, parsed from the request's free-form `mode` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Resume,
    Linkedin,
    Portfolio,
    /// Any unrecognized tag — general cover-letter style rewrite.
    Default,
}

impl Mode {
    /// Never fails: anything outside the known set maps to `Default`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "resume" => Mode::Resume,
            "linkedin" => Mode::Linkedin,
            "portfolio" => Mode::Portfolio,
            _ => Mode::Default,
        }
    }

    fn template(self) -> &'static str {
        match self {
            Mode::Resume => prompts::RESUME_PROMPT_TEMPLATE,
            Mode::Linkedin => prompts::LINKEDIN_PROMPT_TEMPLATE,
            Mode::Portfolio => prompts::PORTFOLIO_PROMPT_TEMPLATE,
            Mode::Default => prompts::DEFAULT_PROMPT_TEMPLATE,
        }
    }
}

/// Generation parameters per mode. Resume bullets are capped tightly; every
/// other mode gets room for multi-paragraph output. Temperature is fixed.
pub fn params_for(mode: Mode) -> GenParams {
    GenParams {
        max_output_tokens: match mode {
            Mode::Resume => 150,
            _ => 400,
        },
        temperature: 0.7,
    }
}

/// Compiles the prompt for one request: substitutes role and text into the
/// mode's template. An empty or whitespace-only role becomes `DEFAULT_ROLE`.
pub fn compile(mode: Mode, role: &str, text: &str) -> String {
    let role = if role.trim().is_empty() {
        DEFAULT_ROLE
    } else {
        role
    };

    mode.template()
        .replace("{role}", role)
        .replace("{text}", text)
}
