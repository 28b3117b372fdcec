//! Physical constants and numerical floors shared by the motion modules.

/// Standard gravity [cm/s²]; converts cm/s² spectra to units of g.
pub const GRAVITY_CM_PER_S2: f64 = 980.665;

/// Average S-wave radiation pattern coefficient.
pub const RADIATION_PATTERN: f64 = 0.55;

/// Free-surface amplification factor.
pub const FREE_SURFACE_FACTOR: f64 = 2.0;

/// Partition of energy onto two horizontal components (1/√2).
pub const HORIZONTAL_PARTITION: f64 = 0.707;

/// Unit conversion folding km, km/s and g/cc into CGS for the Brune constant.
pub const BRUNE_UNIT_SCALE: f64 = 1.0e-20;

/// Numerator of the Brune corner frequency relation with β in km/s,
/// Δσ in bars and M0 in dyne-cm.
pub const CORNER_FREQUENCY_COEFF: f64 = 4.906e6;

/// log10(M0 [dyne-cm]) = 1.5 Mw + 16.05.
pub const MOMENT_MAG_SLOPE: f64 = 1.5;
pub const MOMENT_MAG_INTERCEPT: f64 = 16.05;

/// Hypocentral distances below this floor [km] are raised to it.
pub const MIN_HYPOCENTRAL_DISTANCE: f64 = 1.0;

/// Ground-motion duration floor [s].
pub const MIN_DURATION: f64 = 0.01;

/// Frequencies accepted for the motion's frequency axis [Hz].
pub const FREQUENCY_LIMITS: (f64, f64) = (0.001, 1000.0);

pub const DEFAULT_FREQUENCY_MIN: f64 = 0.05;
pub const DEFAULT_FREQUENCY_MAX: f64 = 50.0;
pub const DEFAULT_FREQUENCY_COUNT: usize = 1024;

pub const DEFAULT_PERIOD_MIN: f64 = 0.01;
pub const DEFAULT_PERIOD_MAX: f64 = 10.0;
pub const DEFAULT_PERIOD_COUNT: usize = 91;

/// Oscillator damping as a fraction of critical.
pub const DEFAULT_DAMPING: f64 = 0.05;
