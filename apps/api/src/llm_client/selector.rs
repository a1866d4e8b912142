//! Model Selector — resolves which Gemini model identifier the service uses.
//!
//! Selection runs once at startup and is cached in `AppState` as an immutable
//! `ModelHandle`. If it fails (missing key, upstream listing error, empty
//! list), each optimize request re-attempts it before failing, so a fixed
//! credential or a recovered upstream heals the service without a restart.

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::GenerativeBackend;

/// Preferred model: flash tier, fast and cheap.
pub const PREFERRED_MODEL: &str = "models/gemini-1.5-flash";
/// Fallback when flash is not authorized for the key.
pub const FALLBACK_MODEL: &str = "models/gemini-pro";

/// An immutable handle to the selected generation model.
/// Shared read-only across all requests; never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelHandle {
    id: String,
}

impl ModelHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Picks a model identifier from the authorized list.
///
/// Ordered preference, first match wins: flash tier, then pro tier, then the
/// first list entry. The last rule depends on upstream list ordering, which
/// the upstream does not define — callers must treat it as non-deterministic.
pub fn pick_model(authorized: &[String]) -> Option<&str> {
    if authorized.iter().any(|m| m == PREFERRED_MODEL) {
        Some(PREFERRED_MODEL)
    } else if authorized.iter().any(|m| m == FALLBACK_MODEL) {
        Some(FALLBACK_MODEL)
    } else {
        authorized.first().map(String::as_str)
    }
}

/// Returns the cached `ModelHandle`, resolving it first if absent.
///
/// Resolution queries the upstream model listing and applies `pick_model`.
/// A listing failure is reported as `ModelUnavailable`, never a crash.
/// Concurrent calls may race to fill the slot; the handle is immutable, so
/// last write wins without corruption.
pub async fn resolve_handle(
    backend: &dyn GenerativeBackend,
    api_key: Option<&str>,
    slot: &RwLock<Option<ModelHandle>>,
) -> Result<ModelHandle, AppError> {
    if let Some(handle) = slot.read().await.as_ref() {
        return Ok(handle.clone());
    }

    let api_key = api_key.ok_or(AppError::MissingCredential)?;

    let authorized = match backend.list_generation_models(api_key).await {
        Ok(models) => models,
        Err(e) => {
            warn!("Model listing failed: {e}");
            return Err(AppError::ModelUnavailable);
        }
    };

    let id = pick_model(&authorized).ok_or(AppError::ModelUnavailable)?;
    info!("Selected model: {id}");

    let handle = ModelHandle::new(id);
    *slot.write().await = Some(handle.clone());

    Ok(handle)
}
