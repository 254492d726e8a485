//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Own the daily entry draft/validated lifecycle guards.
//! - Keep UI layers decoupled from storage details.

pub mod day_service;
pub mod goal_service;
