//! # Wingman Core
//!
//! Prompt-construction and model-configuration pipeline for the Wingman
//! coding assistant, backed by a locally hosted Ollama server.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │   Context    │-->│   Settings   │-->│    Prompt    │-->│  Inference   │
//! │  Collector   │   │   Resolver   │   │   Builder    │   │   Client     │
//! └──────────────┘   └──────────────┘   └──────────────┘   └──────────────┘
//!                          │
//!                    ┌─────┴──────┐
//!                    │  Defaults  │
//!                    │   Table    │
//!                    └────────────┘
//! ```
//!
//! Each command invocation runs the whole chain from scratch; the only
//! process-wide state is the read-only model defaults table. The pipeline
//! always terminates with text to place into the document - a model reply or
//! a clearly marked failure comment.
//!
//! ## Usage
//!
//! ```ignore
//! use wingman_core::{CommandKind, Engine, OllamaClient, SettingsStore};
//!
//! let store = SettingsStore::new(SettingsStore::default_path());
//! let engine = Engine::new(OllamaClient::new(), ".");
//! let reply = engine
//!     .run(CommandKind::Fix, "a.py", "def f(): pass", "", store.load().as_ref())
//!     .await;
//! ```

pub mod command;
pub mod context;
pub mod engine;
pub mod models;
pub mod ollama;
pub mod prompt;
pub mod settings;

pub use command::CommandKind;
pub use context::{collect as collect_context, ContextFile, CONTEXT_FILE_CAP};
pub use engine::Engine;
pub use models::{default_profile, profile, ModelProfile, DEFAULT_MODEL, MODEL_DEFAULTS};
pub use ollama::{
    FailureKind, InferenceResult, OllamaClient, OllamaError, CONNECT_FAILED_TEXT,
    DEFAULT_OLLAMA_URL, NO_RESPONSE_TEXT,
};
pub use prompt::{build as build_prompt, PromptRequest, CONTINUATION_MARKER, SYSTEM_PREAMBLE};
pub use settings::{
    resolve as resolve_settings, EffectiveSettings, PartialSettings, SettingsError, SettingsStore,
};
