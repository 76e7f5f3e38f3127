//! Error Types
//!
//! This module defines the error types used throughout the rig.
//!
//! # Overview
//!
//! The main error type [`RigError`] covers the failure modes of the pipeline:
//! - Mesh source failures (terminal, nothing gets constructed)
//! - Skeleton declaration errors from the generalized builder
//! - Per-frame faults that the frame loop logs and skips
//! - Configuration parsing errors
//!
//! A degenerate path tangent is recovered inside the curve and an
//! out-of-range skin band is clamped by the binder; neither has a variant.
//!
//! # Usage
//!
//! All fallible APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, RigError>`.
//!
//! ```rust,ignore
//! use finrig::errors::{RigError, Result};
//!
//! fn load() -> Result<()> {
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the rig.
#[derive(Error, Debug)]
pub enum RigError {
    // ========================================================================
    // Load-time Errors
    // ========================================================================
    /// The external mesh source could not produce geometry.
    #[error("Mesh load failed: {0}")]
    MeshLoad(String),

    /// The geometry has no vertices, so it can be neither bound nor normalized.
    #[error("Geometry has no vertices")]
    EmptyGeometry,

    // ========================================================================
    // Skeleton Declaration Errors
    // ========================================================================
    /// Skinning interpolates between adjacent bones, so at least two are needed.
    #[error("Skeleton needs at least 2 bones, got {count}")]
    InsufficientBones {
        /// Number of bones that were declared
        count: usize,
    },

    /// A bone names a parent that was not declared before it.
    #[error("Bone '{bone}' references unknown parent '{parent}'")]
    UnknownParent {
        /// The bone being declared
        bone: String,
        /// The missing parent name
        parent: String,
    },

    /// Two bones share the same name.
    #[error("Duplicate bone name: {0}")]
    DuplicateBone(String),

    /// More than one bone was declared without a parent.
    #[error("Skeleton has more than one root bone ('{first}' and '{second}')")]
    MultipleRoots {
        /// The first parentless bone
        first: String,
        /// The second parentless bone
        second: String,
    },

    /// A bone lookup by name failed.
    #[error("Bone not found: {0}")]
    UnknownBone(String),

    // ========================================================================
    // Per-frame Errors
    // ========================================================================
    /// The clock produced a time value that is NaN or infinite.
    #[error("Non-finite frame time (elapsed: {elapsed}, delta: {delta})")]
    NonFiniteTime {
        /// Elapsed seconds reported for the frame
        elapsed: f64,
        /// Delta seconds reported for the frame
        delta: f64,
    },

    /// The external renderer failed to draw a frame.
    #[error("Render error: {0}")]
    Render(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration JSON could not be parsed.
    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// A configuration value is outside its valid range.
    #[error("Invalid config: {field} = {value} ({reason})")]
    InvalidConfig {
        /// Offending field
        field: String,
        /// Value as written
        value: String,
        /// What the field requires
        reason: &'static str,
    },
}

/// Alias for `Result<T, RigError>`.
pub type Result<T> = std::result::Result<T, RigError>;
