pub mod anthropic;
pub mod client;
pub mod http;
pub mod xai;

pub use anthropic::ClaudeTranslator;
pub use xai::XaiTranslator;
