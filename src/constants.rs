pub type Float = f64;

pub const DELTA_T: Float = 1.0;

pub const DELTA_X: Float = 1.0;

pub const CS_2: Float = 1.0 / 3.0 * DELTA_X * DELTA_X / DELTA_T / DELTA_T;

pub const CS_2_INV: Float = 3.0;

pub const CS_4_INV: Float = 9.0;

/// BGK is only stable for relaxation times strictly above this value.
pub const TAU_STABILITY_LIMIT: Float = 0.5;

/// Baseline population of every direction before the per-cell rescale.
pub const INITIAL_POPULATION: Float = 1.0;

pub const DEFAULT_NOISE_AMPLITUDE: Float = 0.01;

pub const DEFAULT_BIAS: Float = 0.3;

/// East, i.e. `(1, 0)` in the D2Q9 ordering.
pub const DEFAULT_BIAS_DIRECTION: usize = 1;
