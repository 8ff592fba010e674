//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model, formatter and persistence into session behavior.
//! - Keep hosts (CLI, tests) decoupled from storage details.

pub mod app;
pub mod event_loop;
pub mod milestone_tracker;
