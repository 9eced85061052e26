//! # Unreinforced Working Platform Calculation
//!
//! Required thickness of a granular working platform over a cohesive
//! subgrade per the BRE unreinforced method.
//!
//! ## Decision Procedure
//!
//! The solver is a short-circuiting sequence; the first case that applies
//! decides the result:
//!
//! 1. Invalid input (L1 = 0 first, then any other invalid field)
//! 2. Subgrade carries the load on its own (`Rd1 > q1d`)
//! 3. Platform material too weak (`q1dP >= R_platform`)
//! 4. Subgrade stronger than the platform material (`Rd1 >= R_platform`)
//! 5. Closed-form thickness, flagged when it exceeds 1.5·b
//!
//! Every input produces exactly one [`ThicknessResult`]; none of the cases is
//! an error.
//!
//! ## Assumptions
//!
//! - Single homogeneous cohesive subgrade layer
//! - Unreinforced granular platform
//! - Rectangular loaded area b × L1
//!
//! ## Example (LLM-friendly)
//!
//! ```rust
//! use platform_core::calculations::platform::{solve, PlatformCase, PlatformConfig};
//!
//! // 1 m square pad, 150 kPa track pressure, default platform material
//! let config = PlatformConfig::new(1.0, 1.0, 150.0);
//! let result = solve(10.0, &config);
//!
//! assert_eq!(result.case, PlatformCase::WithinLimits);
//! assert!((result.thickness_m - 0.384).abs() < 1e-3);
//! println!("{}", result);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::equations::bearing::{
    design_pressure, in_fit_range, kp_tan_delta, max_allowed_thickness, n_gamma,
    platform_strength, required_thickness, shape_factors, subgrade_resistance,
    FIT_RANGE_MAX_DEG, FIT_RANGE_MIN_DEG, NC,
};
use crate::equations::registry::{Equation, EquationTracker};
use crate::errors::{CalcError, CalcResult};
use crate::units::{Meters, Millimeters};

/// Default platform unit weight γk (kN/m³)
pub const DEFAULT_PLATFORM_GAMMA_K: f64 = 20.0;

/// Default platform friction angle φk (degrees)
pub const DEFAULT_PLATFORM_PHI_K_DEG: f64 = 50.0;

/// Default partial factor on qu for the check without platform
pub const DEFAULT_GAMMA_NO_PLATFORM: f64 = 1.5;

/// Default partial factor on qu for the check with platform
pub const DEFAULT_GAMMA_PLATFORM: f64 = 1.2;

fn default_gamma_k() -> f64 {
    DEFAULT_PLATFORM_GAMMA_K
}

fn default_phi_k() -> f64 {
    DEFAULT_PLATFORM_PHI_K_DEG
}

fn default_gamma_no_platform() -> f64 {
    DEFAULT_GAMMA_NO_PLATFORM
}

fn default_gamma_platform() -> f64 {
    DEFAULT_GAMMA_PLATFORM
}

/// Platform design configuration.
///
/// Immutable per evaluation; per-φ variations are made with
/// [`with_friction_angle`](Self::with_friction_angle), which returns a copy.
///
/// ## JSON Example
///
/// ```json
/// {
///   "b_m": 1.0,
///   "l1_m": 1.0,
///   "platform_gamma_k": 20.0,
///   "platform_phi_k_deg": 50.0,
///   "qu_kpa": 150.0,
///   "gamma_no_platform": 1.5,
///   "gamma_platform": 1.2
/// }
/// ```
///
/// The keys `b`, `L1`, `qu`, `platform_phi_k`, `gamma_BRECaseNoPlatform` and
/// `gamma_BRECasePlatform` are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Loaded area width b (m)
    #[serde(alias = "b")]
    pub b_m: f64,

    /// Loaded area length L1 (m)
    #[serde(alias = "L1")]
    pub l1_m: f64,

    /// Platform material unit weight γk (kN/m³)
    #[serde(default = "default_gamma_k")]
    pub platform_gamma_k: f64,

    /// Platform material friction angle φk (degrees)
    #[serde(alias = "platform_phi_k", default = "default_phi_k")]
    pub platform_phi_k_deg: f64,

    /// Characteristic bearing pressure qu (kPa)
    #[serde(alias = "qu")]
    pub qu_kpa: f64,

    /// Partial factor on qu for the check without platform
    #[serde(alias = "gamma_BRECaseNoPlatform", default = "default_gamma_no_platform")]
    pub gamma_no_platform: f64,

    /// Partial factor on qu for the check with platform
    #[serde(alias = "gamma_BRECasePlatform", default = "default_gamma_platform")]
    pub gamma_platform: f64,
}

impl PlatformConfig {
    /// Create a configuration with the default platform material and factors.
    ///
    /// # Arguments
    ///
    /// * `b_m` - Loaded area width (m)
    /// * `l1_m` - Loaded area length (m)
    /// * `qu_kpa` - Characteristic bearing pressure (kPa)
    pub fn new(b_m: f64, l1_m: f64, qu_kpa: f64) -> Self {
        PlatformConfig {
            b_m,
            l1_m,
            platform_gamma_k: DEFAULT_PLATFORM_GAMMA_K,
            platform_phi_k_deg: DEFAULT_PLATFORM_PHI_K_DEG,
            qu_kpa,
            gamma_no_platform: DEFAULT_GAMMA_NO_PLATFORM,
            gamma_platform: DEFAULT_GAMMA_PLATFORM,
        }
    }

    /// Create a configuration from machine data given in millimetres.
    ///
    /// ```rust
    /// use platform_core::calculations::platform::PlatformConfig;
    ///
    /// let config = PlatformConfig::from_millimeters(900.0, 4500.0, 180.0);
    /// assert_eq!(config.b_m, 0.9);
    /// assert_eq!(config.l1_m, 4.5);
    /// ```
    pub fn from_millimeters(b_mm: f64, l1_mm: f64, qu_kpa: f64) -> Self {
        let b: Meters = Millimeters(b_mm).into();
        let l1: Meters = Millimeters(l1_mm).into();
        PlatformConfig::new(b.value(), l1.value(), qu_kpa)
    }

    /// Copy of this configuration with a different platform friction angle
    pub fn with_friction_angle(&self, phi_deg: f64) -> Self {
        PlatformConfig {
            platform_phi_k_deg: phi_deg,
            ..*self
        }
    }

    /// Copy of this configuration with a different platform unit weight
    pub fn with_unit_weight(&self, gamma_k: f64) -> Self {
        PlatformConfig {
            platform_gamma_k: gamma_k,
            ..*self
        }
    }

    /// Copy of this configuration with different partial factors
    pub fn with_partial_factors(&self, gamma_no_platform: f64, gamma_platform: f64) -> Self {
        PlatformConfig {
            gamma_no_platform,
            gamma_platform,
            ..*self
        }
    }

    /// First problem with this configuration, if any.
    ///
    /// `L1 = 0` is always reported first, whatever the other fields hold.
    pub fn issue(&self) -> Option<InputIssue> {
        if self.l1_m == 0.0 {
            return Some(InputIssue::ZeroLength);
        }

        let fields = [
            ("b_m", self.b_m),
            ("l1_m", self.l1_m),
            ("platform_gamma_k", self.platform_gamma_k),
            ("platform_phi_k_deg", self.platform_phi_k_deg),
            ("qu_kpa", self.qu_kpa),
            ("gamma_no_platform", self.gamma_no_platform),
            ("gamma_platform", self.gamma_platform),
        ];

        if let Some((field, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Some(InputIssue::NotFinite {
                field: field.to_string(),
            });
        }

        if let Some((field, value)) = fields
            .iter()
            .filter(|(field, _)| *field != "platform_phi_k_deg")
            .find(|(_, v)| *v <= 0.0)
        {
            return Some(InputIssue::NonPositive {
                field: field.to_string(),
                value: *value,
            });
        }

        if self.platform_phi_k_deg <= 0.0 || self.platform_phi_k_deg >= 90.0 {
            return Some(InputIssue::FrictionAngleOutOfDomain {
                value: self.platform_phi_k_deg,
            });
        }

        None
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        match self.issue() {
            Some(issue) => Err(issue.to_error()),
            None => Ok(()),
        }
    }

    /// Aspect ratio r = b/L1
    pub fn aspect_ratio(&self) -> f64 {
        self.b_m / self.l1_m
    }
}

/// A reason the solver cannot evaluate an input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputIssue {
    /// L1 is exactly zero
    ZeroLength,
    /// A field is NaN or infinite
    NotFinite { field: String },
    /// A field that must be strictly positive is not
    NonPositive { field: String, value: f64 },
    /// φ is not strictly between 0° and 90°
    FrictionAngleOutOfDomain { value: f64 },
    /// Subgrade strength below zero
    NegativeStrength { value: f64 },
}

impl InputIssue {
    /// Human-readable label used as the result diagnostic
    pub fn label(&self) -> String {
        match self {
            InputIssue::ZeroLength => "L1 cannot be zero".to_string(),
            InputIssue::NotFinite { field } => format!("{} must be a finite number", field),
            InputIssue::NonPositive { field, value } => {
                format!("{} must be positive (got {})", field, value)
            }
            InputIssue::FrictionAngleOutOfDomain { value } => format!(
                "platform_phi_k must be between 0 and 90 degrees (got {})",
                value
            ),
            InputIssue::NegativeStrength { value } => {
                format!("subgrade cu_k cannot be negative (got {})", value)
            }
        }
    }

    /// Name of the offending field
    pub fn field(&self) -> &str {
        match self {
            InputIssue::ZeroLength => "l1_m",
            InputIssue::NotFinite { field } | InputIssue::NonPositive { field, .. } => field.as_str(),
            InputIssue::FrictionAngleOutOfDomain { .. } => "platform_phi_k_deg",
            InputIssue::NegativeStrength { .. } => "cu_k_kpa",
        }
    }

    /// Convert to a structured error for the configuration layer
    pub fn to_error(&self) -> CalcError {
        let value = match self {
            InputIssue::ZeroLength => "0".to_string(),
            InputIssue::NotFinite { .. } => "non-finite".to_string(),
            InputIssue::NonPositive { value, .. }
            | InputIssue::FrictionAngleOutOfDomain { value }
            | InputIssue::NegativeStrength { value } => value.to_string(),
        };
        CalcError::invalid_input(self.field(), value, self.label())
    }
}

/// Format `value` to `digits` significant figures (`1.5` -> `1.50`, `0.006` -> `0.00600`).
fn format_significant(value: f64, digits: i32) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}", value);
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (digits - 1 - magnitude).clamp(0, 15) as usize;
    format!("{:.*}", decimals, value)
}

/// Outcome of the decision procedure.
///
/// Exactly one case applies to every input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "case", rename_all = "snake_case")]
pub enum PlatformCase {
    /// Input cannot be evaluated
    InvalidConfiguration { issue: InputIssue },
    /// Subgrade resistance exceeds the unfactored-platform demand
    GroundStable,
    /// Platform material cannot carry the demand itself
    PlatformTooWeak,
    /// Subgrade is at least as strong as the platform material
    SubgradeStronger,
    /// Thickness computed but larger than 1.5·b
    ExceedsMaximum { max_allowed_m: f64 },
    /// Thickness computed and within the validated range
    WithinLimits,
}

impl PlatformCase {
    /// Human-readable diagnostic label
    pub fn label(&self) -> String {
        match self {
            PlatformCase::InvalidConfiguration { issue } => issue.label(),
            PlatformCase::GroundStable => "ground is stable without additional support".to_string(),
            PlatformCase::PlatformTooWeak => {
                "chosen platform material cannot provide required bearing resistance".to_string()
            }
            PlatformCase::SubgradeStronger => "subgrade is stronger than the platform material".to_string(),
            PlatformCase::ExceedsMaximum { max_allowed_m } => format!(
                "platform thickness exceeds 1.5×b (max allowed: {} m)",
                format_significant(*max_allowed_m, 3)
            ),
            PlatformCase::WithinLimits => "platform thickness is within limits".to_string(),
        }
    }

    /// Short code for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            PlatformCase::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            PlatformCase::GroundStable => "GROUND_STABLE",
            PlatformCase::PlatformTooWeak => "PLATFORM_TOO_WEAK",
            PlatformCase::SubgradeStronger => "SUBGRADE_STRONGER",
            PlatformCase::ExceedsMaximum { .. } => "EXCEEDS_MAXIMUM",
            PlatformCase::WithinLimits => "WITHIN_LIMITS",
        }
    }

    /// Whether this case carries a numeric thickness
    pub fn has_thickness(&self) -> bool {
        matches!(self, PlatformCase::ExceedsMaximum { .. } | PlatformCase::WithinLimits)
    }
}

/// Intermediate values computed before the deciding case.
///
/// Terms after the deciding case are never computed and stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BearingTerms {
    /// r = b/L1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f64>,
    /// sc = 1 + 0.2r
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sc: Option<f64>,
    /// sγ = 1 - 0.3r
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s_gamma: Option<f64>,
    /// sp = 1 + r
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sp: Option<f64>,
    /// Nc = 2 + π
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nc: Option<f64>,
    /// Rd1 = cu·Nc·sc (kPa)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rd1_kpa: Option<f64>,
    /// q1d = γ_no_platform·qu (kPa)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q1d_kpa: Option<f64>,
    /// Nγ
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_gamma: Option<f64>,
    /// 0.5·γ·b·Nγ·sγ (kPa)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_strength_kpa: Option<f64>,
    /// q1dP = γ_platform·qu (kPa)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q1dp_kpa: Option<f64>,
    /// KpTanΔ
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kp_tan_delta: Option<f64>,
}

/// Result of one thickness evaluation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "thickness_m": 0.384,
///   "case": { "case": "within_limits" },
///   "outside_fit_range": false,
///   "terms": { "rd1_kpa": 61.7, "q1d_kpa": 225.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThicknessResult {
    /// Required thickness D1 (m); 0.0 when the case carries no thickness
    pub thickness_m: f64,

    /// Deciding case of the procedure
    pub case: PlatformCase,

    /// KpTanΔ was evaluated outside its 20°–55° fit range
    pub outside_fit_range: bool,

    /// Intermediate values up to the deciding case
    pub terms: BearingTerms,
}

impl ThicknessResult {
    fn without_thickness(case: PlatformCase, terms: BearingTerms) -> Self {
        ThicknessResult {
            thickness_m: 0.0,
            case,
            outside_fit_range: false,
            terms,
        }
    }

    /// Diagnostic label of the deciding case
    pub fn diagnostic(&self) -> String {
        self.case.label()
    }

    /// Short code of the deciding case
    pub fn code(&self) -> &'static str {
        self.case.code()
    }

    /// Whether `thickness_m` is a computed thickness
    pub fn has_thickness(&self) -> bool {
        self.case.has_thickness()
    }

    /// Computed thickness, if the case carries one
    pub fn thickness(&self) -> Option<f64> {
        self.has_thickness().then_some(self.thickness_m)
    }
}

impl fmt::Display for ThicknessResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_thickness() {
            write!(f, "{:.2} m: {}", self.thickness_m, self.diagnostic())?;
        } else {
            write!(f, "{}", self.diagnostic())?;
        }
        if self.outside_fit_range {
            write!(
                f,
                " [phi outside {}-{}° KpTanΔ fit range]",
                FIT_RANGE_MIN_DEG, FIT_RANGE_MAX_DEG
            )?;
        }
        Ok(())
    }
}

/// Calculate the required platform thickness for one subgrade strength.
///
/// # Arguments
///
/// * `cu_k_kpa` - Characteristic undrained shear strength of the subgrade (kPa)
/// * `config` - Platform configuration
///
/// # Returns
///
/// The [`ThicknessResult`] of the first case that applies. Never fails.
pub fn solve(cu_k_kpa: f64, config: &PlatformConfig) -> ThicknessResult {
    solve_inner(cu_k_kpa, config, None)
}

/// [`solve`], recording every equation reached in `tracker`.
pub fn solve_tracked(cu_k_kpa: f64, config: &PlatformConfig, tracker: &mut EquationTracker) -> ThicknessResult {
    solve_inner(cu_k_kpa, config, Some(tracker))
}

fn solve_inner(cu_k_kpa: f64, config: &PlatformConfig, mut tracker: Option<&mut EquationTracker>) -> ThicknessResult {
    let phi = config.platform_phi_k_deg;
    let mut record = |equation: Equation| {
        if let Some(t) = tracker.as_deref_mut() {
            t.record(equation, format!("cu = {} kPa, phi = {} deg", cu_k_kpa, phi));
        }
    };

    let issue = config.issue().or_else(|| {
        if !cu_k_kpa.is_finite() {
            Some(InputIssue::NotFinite {
                field: "cu_k_kpa".to_string(),
            })
        } else if cu_k_kpa < 0.0 {
            Some(InputIssue::NegativeStrength { value: cu_k_kpa })
        } else {
            None
        }
    });
    if let Some(issue) = issue {
        debug!(cu_k_kpa, code = "INVALID_CONFIGURATION", "{}", issue.label());
        return ThicknessResult::without_thickness(
            PlatformCase::InvalidConfiguration { issue },
            BearingTerms::default(),
        );
    }

    // Subgrade on its own
    let sf = shape_factors(config.b_m, config.l1_m);
    record(Equation::ShapeFactors);
    record(Equation::CohesionBearingFactor);
    let rd1 = subgrade_resistance(cu_k_kpa, sf.sc);
    record(Equation::SubgradeResistance);
    let q1d = design_pressure(config.gamma_no_platform, config.qu_kpa);
    record(Equation::DesignPressureNoPlatform);

    let mut terms = BearingTerms {
        aspect_ratio: Some(sf.aspect_ratio),
        sc: Some(sf.sc),
        s_gamma: Some(sf.s_gamma),
        sp: Some(sf.sp),
        nc: Some(NC),
        rd1_kpa: Some(rd1),
        q1d_kpa: Some(q1d),
        ..BearingTerms::default()
    };

    if rd1 > q1d {
        debug!(cu_k_kpa, rd1, q1d, "ground stable without platform");
        return ThicknessResult::without_thickness(PlatformCase::GroundStable, terms);
    }

    // Platform material on its own
    let ng = n_gamma(phi);
    record(Equation::SelfWeightBearingFactor);
    let strength = platform_strength(config.platform_gamma_k, config.b_m, ng, sf.s_gamma);
    record(Equation::PlatformMaterialStrength);
    let q1dp = design_pressure(config.gamma_platform, config.qu_kpa);
    record(Equation::DesignPressureWithPlatform);

    terms.n_gamma = Some(ng);
    terms.platform_strength_kpa = Some(strength);
    terms.q1dp_kpa = Some(q1dp);

    if q1dp >= strength {
        debug!(cu_k_kpa, q1dp, strength, "platform material too weak");
        return ThicknessResult::without_thickness(PlatformCase::PlatformTooWeak, terms);
    }

    if rd1 >= strength {
        debug!(cu_k_kpa, rd1, strength, "subgrade stronger than platform material");
        return ThicknessResult::without_thickness(PlatformCase::SubgradeStronger, terms);
    }

    // Closed-form thickness
    let outside_fit_range = !in_fit_range(phi);
    if outside_fit_range {
        warn!(
            phi,
            "KpTanΔ evaluated outside its {}-{}° fit range", FIT_RANGE_MIN_DEG, FIT_RANGE_MAX_DEG
        );
    }
    let kp = kp_tan_delta(phi);
    record(Equation::PunchingShearCoefficient);
    terms.kp_tan_delta = Some(kp);

    let d1 = required_thickness(config.b_m, q1dp, rd1, config.platform_gamma_k, kp, sf.sp);
    record(Equation::RequiredThickness);
    record(Equation::MinimumThickness);

    let max_allowed_m = max_allowed_thickness(config.b_m);
    record(Equation::MaximumThickness);

    let case = if d1 > max_allowed_m {
        PlatformCase::ExceedsMaximum { max_allowed_m }
    } else {
        PlatformCase::WithinLimits
    };
    debug!(cu_k_kpa, d1, code = case.code(), "platform thickness computed");

    ThicknessResult {
        thickness_m: d1,
        case,
        outside_fit_range,
        terms,
    }
}
