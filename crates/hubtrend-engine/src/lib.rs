//! hubtrend Engine - Orchestration layer
//!
//! Provides high-level commands that coordinate between the delta engine in
//! `hubtrend-core` and the snapshot store in `hubtrend-store`.

pub mod commands;
