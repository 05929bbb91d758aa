//! Core engine types and utilities for OpenSky.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Flight control input vector
//! - Transform and aircraft pose
//! - Fixed-cadence frame clock

pub mod controls;
pub mod time;
pub mod transform;

pub use controls::*;
pub use time::*;
pub use transform::*;

