//! Single-endpoint translation gateway.
//!
//! A `POST /` request names a provider (or takes the default), the matching
//! backend client calls its LLM API, and the reply is normalized into
//! `{ translation, prompt }` or `{ error }`.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod state;

pub use application::registry::ProviderRegistry;
pub use domain::error::GatewayError;
pub use domain::model::{ProviderId, TranslateInput, TranslationRequest, TranslationResult};
pub use domain::traits::Translator;
pub use infrastructure::config::Config;
pub use state::AppState;
