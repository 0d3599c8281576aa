//! # Color Collector - grid arcade game core
//!
//! A head tile roams a wrap-around board collecting food. Every pickup lays a
//! colored tile on the trail. Most tiles are plain, but every N-th pickup lays
//! either a hazard, which ends the game on contact, or a bonus, which pays out
//! once and then turns plain.
//!
//! ## Features
//!
//! - Deterministic rules with an injected random source
//! - Configurable scoring, special-tile cadence and tick speed
//! - Properties or JSON configuration with non-fatal fallback to defaults
//! - Sound as a pluggable capability
//!
//! ## Core Modules
//!
//! - [`game::board`] - Board state and the per-tick rules
//! - [`game::controller`] - Player input and tick cadence
//! - [`game::config`] - Session configuration
//! - [`game::audio`] - Sound capability
//! - [`game::error`] - Error types

/// Game state, rules and their collaborators.
pub mod game {
    /// Sound requests issued by the rules.
    pub mod audio;
    /// Board state and the per-tick transition.
    pub mod board;
    /// Session configuration.
    pub mod config;
    /// Player input and tick cadence.
    pub mod controller;
    /// Errors raised by configuration and audio.
    pub mod error;
}
