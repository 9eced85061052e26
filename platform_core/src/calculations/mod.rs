//! # Platform Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Config` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `solve(..) -> *Result` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`platform`] - Unreinforced working platform thickness (BRE)
//! - [`batch`] - Cross-product evaluation over strengths and friction angles

pub mod batch;
pub mod platform;

// Re-export commonly used types
pub use batch::{evaluate, evaluate_parallel, evaluate_strengths, evaluate_tracked, BatchEntry};
pub use platform::{
    solve, solve_tracked, BearingTerms, InputIssue, PlatformCase, PlatformConfig, ThicknessResult,
};
