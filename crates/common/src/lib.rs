//! SenseCheck Common Library
//!
//! Shared configuration, prompt banks, and artifact recording for the
//! SenseCheck quality suite.

pub mod artifact;
pub mod config;
pub mod error;
pub mod prompts;

// Re-export commonly used types
pub use artifact::ArtifactStore;
pub use config::Config;
pub use error::{Error, Result};
pub use prompts::{load_prompts, PromptCategory};

/// SenseCheck version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
