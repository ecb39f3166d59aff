//! Domain layer containing the dashboard's pure logic.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (value objects, errors, state machine trait)
//! - `fetch` - Per-domain loading/error/success state and its reducer
//! - `report` - Analysis payload shapes and the normalizer
//! - `memory` - Memory analytics and system info payloads
//! - `presentation` - Intent-conditional section rules and the view composer

pub mod fetch;
pub mod foundation;
pub mod memory;
pub mod presentation;
pub mod report;
