//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model state and persistence into session-level APIs.
//! - Keep UI layers decoupled from storage details.

pub mod note_manager;
pub mod notify;
