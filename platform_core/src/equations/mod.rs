//! # Working Platform Equations
//!
//! This module contains every formula used by the thickness calculation.
//! Having equations in one place enables:
//! - Easy verification against BRE BR470
//! - Documentation of assumptions and validity ranges
//! - Pinning reference values once, in one test suite
//!
//! ## Modules
//!
//! - [`bearing`] - Bearing capacity factors, resistances and the thickness expression
//! - [`registry`] - Equation metadata and tracking for the audit reference
//!
//! ## References
//!
//! - BRE BR470: Working platforms for tracked plant (2004)

pub mod bearing;
pub mod registry;

// Re-export commonly used items
pub use bearing::{
    design_pressure,
    in_fit_range,
    kp_tan_delta,
    max_allowed_thickness,
    n_gamma,
    platform_strength,
    required_thickness,
    shape_factors,
    subgrade_resistance,
    ShapeFactors,
    FIT_RANGE_MAX_DEG,
    FIT_RANGE_MIN_DEG,
    MAX_THICKNESS_RATIO,
    MIN_PLATFORM_THICKNESS_M,
    NC,
};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    EquationTracker,
    EquationUsage,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
