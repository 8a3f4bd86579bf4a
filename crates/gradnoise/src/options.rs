//! Validated call configuration: repeat periods, octave blending and batch requests.

use std::fmt;
use std::num::NonZeroU32;

use crate::error::NoiseError;

/// A point in noise space.
pub type Point = [f64; 3];

/// Largest accepted octave count: the highest octave's frequency, `2^1023`,
/// is still a finite `f64`.
pub const MAX_OCTAVES: u32 = 1024;

/// One of the three noise axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        })
    }
}

/// Per-axis tiling period. An axis without a period never repeats
/// (beyond the 256-cell period of the hash itself).
///
/// `f(x) == f(x + p)` holds bit for bit when `x + p` is exactly representable.
/// Otherwise the shifted coordinate rounds (`0.1 + 5.0` has a fractional part
/// that is not exactly `0.1`) and the two values differ by that rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RepeatPeriod {
    periods: [Option<NonZeroU32>; 3],
}

impl RepeatPeriod {
    /// No repetition on any axis.
    pub const NONE: Self = Self {
        periods: [None; 3],
    };

    /// The same period on all three axes. `0` disables repetition.
    pub fn uniform(period: i64) -> Result<Self, NoiseError> {
        Self::per_axis([period; 3])
    }

    /// Independent periods for x, y and z. `0` disables repetition on that axis.
    pub fn per_axis(periods: [i64; 3]) -> Result<Self, NoiseError> {
        let mut out = [None; 3];
        for axis in Axis::ALL {
            out[axis.index()] = checked_period(axis, periods[axis.index()])?;
        }
        Ok(Self { periods: out })
    }

    /// Period configured for `axis`, if any.
    #[inline]
    pub fn axis(&self, axis: Axis) -> Option<NonZeroU32> {
        self.periods[axis.index()]
    }

    pub fn is_none(&self) -> bool {
        self.periods.iter().all(Option::is_none)
    }
}

impl fmt::Display for RepeatPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return f.write_str("off");
        }
        for (i, axis) in Axis::ALL.into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match self.axis(axis) {
                Some(period) => write!(f, "{axis}={period}")?,
                None => write!(f, "{axis}=off")?,
            }
        }
        Ok(())
    }
}

fn checked_period(axis: Axis, period: i64) -> Result<Option<NonZeroU32>, NoiseError> {
    if period == 0 {
        return Ok(None);
    }
    u32::try_from(period)
        .ok()
        .and_then(NonZeroU32::new)
        .map(Some)
        .ok_or(NoiseError::InvalidRepeat { axis, period })
}

/// Fractal blending: octave count and per-octave amplitude decay.
///
/// Frequency starts at 1 and doubles each octave; amplitude starts at 1 and
/// is multiplied by `persistence` each octave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OctaveSpec {
    octaves: u32,
    persistence: f64,
}

impl OctaveSpec {
    /// A single octave: plain gradient noise.
    pub const SINGLE: Self = Self {
        octaves: 1,
        persistence: 1.0,
    };

    pub fn new(octaves: i64, persistence: f64) -> Result<Self, NoiseError> {
        let octaves = u32::try_from(octaves)
            .ok()
            .filter(|n| (1..=MAX_OCTAVES).contains(n))
            .ok_or(NoiseError::InvalidOctaves {
                got: octaves,
                max: MAX_OCTAVES,
            })?;
        if !persistence.is_finite() || persistence <= 0.0 {
            return Err(NoiseError::InvalidPersistence(persistence));
        }
        Ok(Self {
            octaves,
            persistence,
        })
    }

    pub fn octaves(&self) -> u32 {
        self.octaves
    }

    pub fn persistence(&self) -> f64 {
        self.persistence
    }
}

impl Default for OctaveSpec {
    fn default() -> Self {
        Self::SINGLE
    }
}

/// Everything that shapes a single evaluation besides the coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NoiseOptions {
    pub repeat: RepeatPeriod,
    pub octaves: OctaveSpec,
}

impl NoiseOptions {
    pub fn new(repeat: RepeatPeriod, octaves: OctaveSpec) -> Self {
        Self { repeat, octaves }
    }

    /// Build options from the classic numeric parameters.
    ///
    /// `repeat = 0, octaves = 1, persistence = 1.0` is the unconfigured behavior.
    pub fn from_parts(repeat: i64, octaves: i64, persistence: f64) -> Result<Self, NoiseError> {
        Ok(Self {
            repeat: RepeatPeriod::uniform(repeat)?,
            octaves: OctaveSpec::new(octaves, persistence)?,
        })
    }

    pub fn with_repeat(mut self, repeat: RepeatPeriod) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn with_octaves(mut self, octaves: OctaveSpec) -> Self {
        self.octaves = octaves;
        self
    }
}

/// A stepped walk through noise space: element `i` samples `start + i * delta`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRequest {
    start: Point,
    delta: Point,
    count: usize,
    pub options: NoiseOptions,
}

impl SampleRequest {
    pub fn new(
        start: Point,
        delta: Point,
        count: i64,
        options: NoiseOptions,
    ) -> Result<Self, NoiseError> {
        for axis in Axis::ALL {
            let value = start[axis.index()];
            if !value.is_finite() {
                return Err(NoiseError::InvalidStart { axis, value });
            }
            let value = delta[axis.index()];
            if !value.is_finite() {
                return Err(NoiseError::InvalidDelta { axis, value });
            }
        }
        let count = usize::try_from(count).map_err(|_| NoiseError::InvalidCount(count))?;
        Ok(Self {
            start,
            delta,
            count,
            options,
        })
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn delta(&self) -> Point {
        self.delta
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Coordinate of element `index`. Computed directly, never accumulated.
    #[inline]
    pub fn point(&self, index: usize) -> Point {
        let i = index as f64;
        [
            self.start[0] + i * self.delta[0],
            self.start[1] + i * self.delta[1],
            self.start[2] + i * self.delta[2],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_repeat_disables_axis() {
        let repeat = RepeatPeriod::per_axis([0, 5, 0]).unwrap();
        assert_eq!(repeat.axis(Axis::X), None);
        assert_eq!(repeat.axis(Axis::Y).map(NonZeroU32::get), Some(5));
        assert!(!repeat.is_none());
        assert!(RepeatPeriod::uniform(0).unwrap().is_none());
        assert_eq!(RepeatPeriod::default(), RepeatPeriod::NONE);
    }

    #[test]
    fn repeat_display() {
        assert_eq!(RepeatPeriod::NONE.to_string(), "off");
        assert_eq!(
            RepeatPeriod::per_axis([5, 0, 8]).unwrap().to_string(),
            "x=5, y=off, z=8"
        );
    }

    #[test]
    fn negative_repeat_rejected() {
        assert_eq!(
            RepeatPeriod::per_axis([4, 4, -1]),
            Err(NoiseError::InvalidRepeat {
                axis: Axis::Z,
                period: -1
            })
        );
        let too_big = i64::from(u32::MAX) + 1;
        assert!(matches!(
            RepeatPeriod::uniform(too_big),
            Err(NoiseError::InvalidRepeat { axis: Axis::X, .. })
        ));
    }

    #[test]
    fn octave_bounds() {
        assert!(OctaveSpec::new(1, 1.0).is_ok());
        assert!(OctaveSpec::new(i64::from(MAX_OCTAVES), 0.5).is_ok());
        for bad in [0, -3, i64::from(MAX_OCTAVES) + 1] {
            assert_eq!(
                OctaveSpec::new(bad, 0.5),
                Err(NoiseError::InvalidOctaves {
                    got: bad,
                    max: MAX_OCTAVES
                })
            );
        }
    }

    #[test]
    fn persistence_must_be_positive_and_finite() {
        assert!(OctaveSpec::new(4, 2.0).is_ok());
        for bad in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                OctaveSpec::new(4, bad),
                Err(NoiseError::InvalidPersistence(_))
            ));
        }
    }

    #[test]
    fn default_options_match_classic_parts() {
        assert_eq!(
            NoiseOptions::from_parts(0, 1, 1.0).unwrap(),
            NoiseOptions::default()
        );
    }

    #[test]
    fn request_validation() {
        let opts = NoiseOptions::default();
        assert_eq!(
            SampleRequest::new([0.0; 3], [1.0; 3], -1, opts),
            Err(NoiseError::InvalidCount(-1))
        );
        assert!(matches!(
            SampleRequest::new([0.0, f64::NAN, 0.0], [1.0; 3], 4, opts),
            Err(NoiseError::InvalidStart { axis: Axis::Y, .. })
        ));
        assert!(matches!(
            SampleRequest::new([0.0; 3], [0.0, 0.0, f64::NEG_INFINITY], 4, opts),
            Err(NoiseError::InvalidDelta { axis: Axis::Z, .. })
        ));
        let empty = SampleRequest::new([0.0; 3], [1.0; 3], 0, opts).unwrap();
        assert_eq!(empty.count(), 0);
    }

    #[test]
    fn request_points_step_from_start() {
        let req =
            SampleRequest::new([0.5, 1.0, -2.0], [1.0, 0.0, -0.25], 3, NoiseOptions::default())
                .unwrap();
        assert_eq!(req.point(0), [0.5, 1.0, -2.0]);
        assert_eq!(req.point(2), [2.5, 1.0, -2.5]);
    }

    #[test]
    fn axis_display() {
        assert_eq!(Axis::X.to_string(), "x");
        assert_eq!(Axis::Z.index(), 2);
    }
}
