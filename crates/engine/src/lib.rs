//! Blackwood Engine library.
//!
//! Server-side core of the Blackwood Manor interrogation game.
//!
//! ## Structure
//!
//! - `moderation/` - Deterministic lexicon classifier for user messages
//! - `timeline` - Knowledge context building and reply validation
//! - `prompt_templates` - System prompt assembly for the LLM relay
//! - `stores/` - Conversation/game-state and presence stores
//! - `use_cases/` - User story orchestration (the gating pipeline)
//! - `infrastructure/` - Ports and adapters (LLM, snapshot, clock)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod moderation;
pub mod prompt_templates;
pub mod stores;
pub mod timeline;
pub mod use_cases;

pub use app::App;
