use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::llm_client::selector::ModelHandle;
use crate::llm_client::GenerativeBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Generation backend. Default: `GeminiClient`. Swapped for a stub in tests.
    pub llm: Arc<dyn GenerativeBackend>,
    /// The active model handle, resolved once at startup.
    ///
    /// `None` means selection has not succeeded yet; the invoker re-runs the
    /// selector before failing a request. The handle itself is immutable, so
    /// concurrent re-selection attempts may race harmlessly (last write wins).
    pub model: Arc<RwLock<Option<ModelHandle>>>,
    pub config: Config,
}
