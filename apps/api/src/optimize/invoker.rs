//! Invoker — compiles the prompt for a request and calls the model once.
//!
//! No retry lives here: a failed generation surfaces the upstream message
//! as-is. The only self-healing behavior is re-running model selection when
//! no handle has been resolved yet.

use serde::Deserialize;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::llm_client::selector::{resolve_handle, ModelHandle};
use crate::llm_client::GenerativeBackend;
use crate::optimize::templates::{compile, params_for, Mode};

/// One optimize request. Constructed per call from the JSON body; the
/// frontend sends the role as either `role` or `target_role`.
#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    pub text: String,
    #[serde(default)]
    pub mode: String,
    #[serde(default, alias = "target_role")]
    pub role: String,
}

/// Runs the full pipeline for one request: ensure model handle → compile
/// prompt → generate → trim. Returns the optimized text.
pub async fn optimize_text(
    backend: &dyn GenerativeBackend,
    api_key: Option<&str>,
    model_slot: &RwLock<Option<ModelHandle>>,
    request: &OptimizeRequest,
) -> Result<String, AppError> {
    // Re-attempts selection if the startup run failed; fails the request
    // with MissingCredential or ModelUnavailable otherwise.
    let handle = resolve_handle(backend, api_key, model_slot).await?;

    // A cached handle can outlive the credential, so guard the generate
    // call on the key explicitly.
    let api_key = api_key.ok_or(AppError::MissingCredential)?;

    let mode = Mode::from_tag(&request.mode);
    let prompt = compile(mode, &request.role, &request.text);
    let params = params_for(mode);

    let generated = backend
        .generate(api_key, handle.id(), &prompt, params)
        .await?;

    Ok(generated.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::{GenParams, LlmError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Records calls and returns canned data. `fail_listing` / `fail_generate`
    /// simulate upstream faults on the respective operation.
    struct StubBackend {
        authorized: Vec<String>,
        reply: String,
        fail_listing: bool,
        fail_generate: bool,
        list_calls: AtomicUsize,
        generate_calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
        last_params: Mutex<Option<GenParams>>,
        last_model: Mutex<Option<String>>,
    }

    impl StubBackend {
        fn new(authorized: &[&str], reply: &str) -> Self {
            Self {
                authorized: authorized.iter().map(|s| s.to_string()).collect(),
                reply: reply.to_string(),
                fail_listing: false,
                fail_generate: false,
                list_calls: AtomicUsize::new(0),
                generate_calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
                last_params: Mutex::new(None),
                last_model: Mutex::new(None),
            }
        }

        fn failing_listing() -> Self {
            Self {
                fail_listing: true,
                ..Self::new(&[], "unused")
            }
        }

        fn failing_generate(authorized: &[&str]) -> Self {
            Self {
                fail_generate: true,
                ..Self::new(authorized, "unused")
            }
        }
    }

    #[async_trait]
    impl GenerativeBackend for StubBackend {
        async fn list_generation_models(&self, _api_key: &str) -> Result<Vec<String>, LlmError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_listing {
                return Err(LlmError::Api {
                    status: 503,
                    message: "listing unavailable".to_string(),
                });
            }
            Ok(self.authorized.clone())
        }

        async fn generate(
            &self,
            _api_key: &str,
            model: &str,
            prompt: &str,
            params: GenParams,
        ) -> Result<String, LlmError> {
            self.generate_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_model.lock().unwrap() = Some(model.to_string());
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            *self.last_params.lock().unwrap() = Some(params);
            if self.fail_generate {
                return Err(LlmError::Api {
                    status: 429,
                    message: "quota exceeded".to_string(),
                });
            }
            Ok(self.reply.clone())
        }
    }

    fn request(text: &str, mode: &str, role: &str) -> OptimizeRequest {
        OptimizeRequest {
            text: text.to_string(),
            mode: mode.to_string(),
            role: role.to_string(),
        }
    }

    #[tokio::test]
    async fn test_resume_request_end_to_end() {
        let stub = StubBackend::new(
            &["models/gemini-1.5-flash"],
            "Engineered a fix that reduced downtime.",
        );
        let slot = RwLock::new(None);

        let req = request("Led a team to fix a bug", "resume", "Backend Engineer");
        let out = optimize_text(&stub, Some("test-key"), &slot, &req)
            .await
            .unwrap();

        assert_eq!(out, "Engineered a fix that reduced downtime.");

        let prompt = stub.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("Backend Engineer"));
        assert!(prompt.contains("Led a team to fix a bug"));

        let params = stub.last_params.lock().unwrap().unwrap();
        assert_eq!(params.max_output_tokens, 150);

        let model = stub.last_model.lock().unwrap().clone().unwrap();
        assert_eq!(model, "models/gemini-1.5-flash");
    }

    #[tokio::test]
    async fn test_portfolio_prompt_instructs_three_part_structure() {
        let stub = StubBackend::new(&["models/gemini-1.5-flash"], "case study");
        let slot = RwLock::new(None);

        let req = request("built a cache", "portfolio", "Platform Engineer");
        optimize_text(&stub, Some("test-key"), &slot, &req)
            .await
            .unwrap();

        let prompt = stub.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("PROBLEM"));
        assert!(prompt.contains("SOLUTION"));
        assert!(prompt.contains("IMPACT"));

        let params = stub.last_params.lock().unwrap().unwrap();
        assert_eq!(params.max_output_tokens, 400);
    }

    #[tokio::test]
    async fn test_empty_authorized_list_yields_model_unavailable() {
        let stub = StubBackend::new(&[], "unused");
        let slot = RwLock::new(None);

        let req = request("some text", "resume", "");
        let err = optimize_text(&stub, Some("test-key"), &slot, &req)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ModelUnavailable));
    }

    #[tokio::test]
    async fn test_listing_failure_yields_model_unavailable_and_leaves_slot_empty() {
        let stub = StubBackend::failing_listing();
        let slot = RwLock::new(None);

        let req = request("some text", "resume", "");
        let err = optimize_text(&stub, Some("test-key"), &slot, &req)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ModelUnavailable));
        assert!(slot.read().await.is_none());
        assert_eq!(stub.generate_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_generation_failure_surfaces_upstream_message_without_retry() {
        let stub = StubBackend::failing_generate(&["models/gemini-1.5-flash"]);
        let slot = RwLock::new(None);

        let req = request("some text", "linkedin", "Designer");
        let err = optimize_text(&stub, Some("test-key"), &slot, &req)
            .await
            .unwrap_err();

        match err {
            AppError::Upstream(LlmError::Api { status, message }) => {
                assert_eq!(status, 429);
                assert_eq!(message, "quota exceeded");
            }
            other => panic!("expected Upstream error, got {other:?}"),
        }
        assert_eq!(stub.generate_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_credential_fails_without_listing() {
        let stub = StubBackend::new(&["models/gemini-1.5-flash"], "unused");
        let slot = RwLock::new(None);

        let req = request("some text", "linkedin", "Designer");
        let err = optimize_text(&stub, None, &slot, &req).await.unwrap_err();

        assert!(matches!(err, AppError::MissingCredential));
        assert_eq!(stub.list_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_handle_is_cached_across_requests() {
        let stub = StubBackend::new(&["models/gemini-1.5-flash"], "done");
        let slot = RwLock::new(None);

        let req = request("first", "resume", "SRE");
        optimize_text(&stub, Some("test-key"), &slot, &req)
            .await
            .unwrap();
        let req = request("second", "resume", "SRE");
        optimize_text(&stub, Some("test-key"), &slot, &req)
            .await
            .unwrap();

        assert_eq!(stub.list_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_output_is_trimmed() {
        let stub = StubBackend::new(&["models/gemini-pro"], "  polished text \n");
        let slot = RwLock::new(None);

        let req = request("rough text", "whatever", "");
        let out = optimize_text(&stub, Some("test-key"), &slot, &req)
            .await
            .unwrap();

        assert_eq!(out, "polished text");
    }
}
