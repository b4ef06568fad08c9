#![forbid(unsafe_code)]

//! Scroll-linked keyframe interpolation.
//!
//! [`Keyframes`] maps an input (usually scroll progress) through a list of
//! `(input, output)` stops with linear interpolation between neighbours.
//! Inputs outside the first/last stop clamp to the first/last output.
//!
//! ```
//! use pinstrip_core::animation::Keyframes;
//!
//! // Hero product shot shrinks as the page scrolls.
//! let scale = Keyframes::new(&[0.0, 0.3, 0.6, 1.0], &[1.0, 0.8, 0.6, 0.4]).unwrap();
//! assert_eq!(scale.sample(0.0), 1.0);
//! assert!((scale.sample(0.15) - 0.9).abs() < 1e-9);
//! assert_eq!(scale.sample(2.0), 0.4);
//! ```
//!
//! # Invariants
//!
//! 1. Inputs are non-decreasing (checked at construction).
//! 2. `sample` is continuous in its argument for any valid stop list.
//! 3. A single stop yields a constant.

/// Why a keyframe list was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyframesError {
    /// No stops were given.
    Empty,
    /// Input and output lists differ in length.
    LengthMismatch {
        /// Number of inputs.
        inputs: usize,
        /// Number of outputs.
        outputs: usize,
    },
    /// Inputs decrease at the given index, or contain a non-finite value.
    Unordered(usize),
}

impl std::fmt::Display for KeyframesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "keyframes need at least one stop"),
            Self::LengthMismatch { inputs, outputs } => {
                write!(f, "{inputs} inputs but {outputs} outputs")
            }
            Self::Unordered(i) => write!(f, "keyframe input {i} is out of order"),
        }
    }
}

impl std::error::Error for KeyframesError {}

/// Piecewise-linear mapping over sorted stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframes {
    stops: Vec<(f64, f64)>,
}

impl Keyframes {
    /// Build from parallel input/output lists.
    pub fn new(inputs: &[f64], outputs: &[f64]) -> Result<Self, KeyframesError> {
        if inputs.is_empty() {
            return Err(KeyframesError::Empty);
        }
        if inputs.len() != outputs.len() {
            return Err(KeyframesError::LengthMismatch {
                inputs: inputs.len(),
                outputs: outputs.len(),
            });
        }
        for (i, x) in inputs.iter().enumerate() {
            if !x.is_finite() || (i > 0 && *x < inputs[i - 1]) {
                return Err(KeyframesError::Unordered(i));
            }
        }
        Ok(Self {
            stops: inputs.iter().copied().zip(outputs.iter().copied()).collect(),
        })
    }

    /// A single stop: always `value`.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self {
            stops: vec![(0.0, value)],
        }
    }

    /// Number of stops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always false: construction rejects empty lists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Interpolated output at `x`.
    #[must_use]
    pub fn sample(&self, x: f64) -> f64 {
        let (first_x, first_y) = self.stops[0];
        let (last_x, last_y) = self.stops[self.stops.len() - 1];
        if x.is_nan() || x <= first_x {
            return first_y;
        }
        if x >= last_x {
            return last_y;
        }
        // First stop strictly greater than x; x > first_x guarantees idx >= 1.
        let idx = self.stops.partition_point(|&(sx, _)| sx <= x);
        let (x0, y0) = self.stops[idx - 1];
        let (x1, y1) = self.stops[idx];
        let span = x1 - x0;
        if span <= 0.0 {
            return y1;
        }
        y0 + (y1 - y0) * ((x - x0) / span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero_scale() -> Keyframes {
        Keyframes::new(&[0.0, 0.3, 0.6, 1.0], &[1.0, 0.8, 0.6, 0.4]).unwrap()
    }

    #[test]
    fn hits_every_stop_exactly() {
        let k = hero_scale();
        assert_eq!(k.sample(0.0), 1.0);
        assert_eq!(k.sample(0.3), 0.8);
        assert_eq!(k.sample(0.6), 0.6);
        assert_eq!(k.sample(1.0), 0.4);
    }

    #[test]
    fn clamps_outside_range() {
        let k = hero_scale();
        assert_eq!(k.sample(-1.0), 1.0);
        assert_eq!(k.sample(f64::NAN), 1.0);
        assert_eq!(k.sample(9.0), 0.4);
    }

    #[test]
    fn interpolates_between_stops() {
        let k = hero_scale();
        assert!((k.sample(0.8) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn single_stop_is_constant() {
        let k = Keyframes::new(&[0.5], &[3.0]).unwrap();
        assert_eq!(k.sample(0.0), 3.0);
        assert_eq!(k.sample(1.0), 3.0);
    }

    #[test]
    fn constant_ignores_input() {
        let k = Keyframes::constant(0.4);
        assert_eq!(k.sample(-3.0), 0.4);
        assert_eq!(k.sample(3.0), 0.4);
    }

    #[test]
    fn duplicate_input_steps_cleanly() {
        let k = Keyframes::new(&[0.0, 0.5, 0.5, 1.0], &[0.0, 0.0, 1.0, 1.0]).unwrap();
        assert_eq!(k.sample(0.25), 0.0);
        assert_eq!(k.sample(0.75), 1.0);
    }

    #[test]
    fn rejects_bad_lists() {
        assert_eq!(Keyframes::new(&[], &[]), Err(KeyframesError::Empty));
        assert!(matches!(
            Keyframes::new(&[0.0, 1.0], &[1.0]),
            Err(KeyframesError::LengthMismatch { .. })
        ));
        assert_eq!(
            Keyframes::new(&[0.0, 0.6, 0.3], &[1.0, 2.0, 3.0]),
            Err(KeyframesError::Unordered(2))
        );
    }
}
