//! Single-point gradient noise and multi-octave combination.

use std::sync::Arc;

use tracing::debug;

use crate::error::NoiseError;
use crate::lattice::{gradient_dot, CellCorners, Lattice};
use crate::options::{NoiseOptions, OctaveSpec, Point, RepeatPeriod};
use crate::permutation::PermutationTable;

/// Improved Perlin fade function: 6t^5 - 15t^4 + 10t^3.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Linear interpolation.
#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Map raw noise from [-1, 1] to [0, 1].
#[inline]
fn normalize(v: f64) -> f64 {
    ((v + 1.0) * 0.5).clamp(0.0, 1.0)
}

/// Split a point into its lattice cell and the offset within that cell.
///
/// An axis scaled past the `f64` range has no fractional part left and is
/// treated as sitting on a lattice point.
#[inline]
fn split(point: Point) -> ([i64; 3], Point) {
    let floor = point.map(f64::floor);
    let cell = floor.map(|f| f as i64);
    let offset = [0, 1, 2].map(|a| {
        let t = point[a] - floor[a];
        if t.is_finite() {
            t
        } else {
            0.0
        }
    });
    (cell, offset)
}

/// Raw gradient noise inside one cell, given its corner gradients and the
/// offset of the point from the low corner. Approximately in [-1, 1].
#[inline]
fn gradient_noise(corners: &CellCorners, offset: Point) -> f64 {
    let [xf, yf, zf] = offset;

    let u = fade(xf);
    let v = fade(yf);
    let w = fade(zf);

    let d000 = gradient_dot(corners[0], xf, yf, zf);
    let d100 = gradient_dot(corners[1], xf - 1.0, yf, zf);
    let d010 = gradient_dot(corners[2], xf, yf - 1.0, zf);
    let d110 = gradient_dot(corners[3], xf - 1.0, yf - 1.0, zf);
    let d001 = gradient_dot(corners[4], xf, yf, zf - 1.0);
    let d101 = gradient_dot(corners[5], xf - 1.0, yf, zf - 1.0);
    let d011 = gradient_dot(corners[6], xf, yf - 1.0, zf - 1.0);
    let d111 = gradient_dot(corners[7], xf - 1.0, yf - 1.0, zf - 1.0);

    // Trilinear interpolation, x then y then z
    let x1 = lerp(u, d000, d100);
    let x2 = lerp(u, d010, d110);
    let y1 = lerp(v, x1, x2);

    let x3 = lerp(u, d001, d101);
    let x4 = lerp(u, d011, d111);
    let y2 = lerp(v, x3, x4);

    lerp(w, y1, y2)
}

/// Octave weights below this are dropped. Keeping every weight well inside
/// the normal range makes halving exact, so lattice points blend to exactly 0.5.
const MIN_AMPLITUDE: f64 = f64::MIN_POSITIVE * 4.0;

/// Per-call octave setup: the amplitude of each octave and their total,
/// used to keep the blend in [0, 1].
///
/// Amplitudes are stored relative to the largest one. With persistence above
/// 1 the last octave weighs 1 and earlier ones shrink by `1 / persistence`,
/// so no weight or sum can overflow.
#[derive(Debug, Clone)]
pub(crate) struct OctavePlan {
    amplitudes: Vec<f64>,
    amplitude_sum: f64,
}

impl OctavePlan {
    pub(crate) fn new(spec: &OctaveSpec) -> Self {
        let count = spec.octaves() as usize;
        let persistence = spec.persistence();
        let step = if persistence <= 1.0 {
            persistence
        } else {
            1.0 / persistence
        };

        let mut amplitudes = Vec::with_capacity(count);
        let mut amplitude = 1.0;
        for _ in 0..count {
            amplitudes.push(if amplitude < MIN_AMPLITUDE { 0.0 } else { amplitude });
            amplitude *= step;
        }
        if persistence > 1.0 {
            amplitudes.reverse();
        }

        let amplitude_sum: f64 = amplitudes.iter().sum();
        Self {
            amplitudes,
            amplitude_sum,
        }
    }

    pub(crate) fn octaves(&self) -> usize {
        self.amplitudes.len()
    }

    /// Blend all octaves at `point`. `corners` resolves the cell gradients
    /// for octave `i`; any source must agree with [`Lattice::corners`].
    #[inline]
    pub(crate) fn evaluate<F>(&self, point: Point, mut corners: F) -> f64
    where
        F: FnMut(usize, [i64; 3]) -> CellCorners,
    {
        let mut total = 0.0;
        let mut frequency = 1.0;

        for (octave, &amplitude) in self.amplitudes.iter().enumerate() {
            let scaled = point.map(|c| c * frequency);
            let (cell, offset) = split(scaled);
            total += normalize(gradient_noise(&corners(octave, cell), offset)) * amplitude;
            frequency *= 2.0;
        }

        total / self.amplitude_sum
    }
}

/// Gradient noise engine. Cheap to clone; clones share one permutation table.
#[derive(Debug, Clone)]
pub struct Engine {
    table: Arc<PermutationTable>,
}

impl Engine {
    /// Create an engine whose permutation table is shuffled from `seed`.
    pub fn new(seed: u64) -> Self {
        debug!(seed, "building seeded permutation table");
        Self::from_table(Arc::new(PermutationTable::from_seed(seed)))
    }

    /// Create an engine over the fixed reference permutation.
    pub fn reference() -> Self {
        debug!("using reference permutation table");
        Self::from_table(Arc::new(PermutationTable::reference()))
    }

    pub fn from_table(table: Arc<PermutationTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &Arc<PermutationTable> {
        &self.table
    }

    pub(crate) fn lattice(&self, repeat: RepeatPeriod) -> Lattice<'_> {
        Lattice::new(&self.table, repeat)
    }

    /// Raw single-octave noise at `point`, approximately in [-1, 1].
    pub fn noise(&self, point: Point, repeat: &RepeatPeriod) -> f64 {
        let lattice = self.lattice(*repeat);
        let (cell, offset) = split(point);
        gradient_noise(&lattice.corners(cell), offset)
    }

    /// Normalized noise at `point` in [0, 1], blended over the configured octaves.
    pub fn evaluate(&self, point: Point, options: &NoiseOptions) -> f64 {
        let lattice = self.lattice(options.repeat);
        OctavePlan::new(&options.octaves).evaluate(point, |_, cell| lattice.corners(cell))
    }

    /// Normalized single-octave noise with no repetition.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        self.evaluate([x, y, z], &NoiseOptions::default())
    }

    /// [`Engine::evaluate`] taking the classic numeric parameters.
    ///
    /// `repeat = 0` disables tiling; `octaves = 1, persistence = 1.0` is plain noise.
    pub fn evaluate_with(
        &self,
        x: f64,
        y: f64,
        z: f64,
        repeat: i64,
        octaves: i64,
        persistence: f64,
    ) -> Result<f64, NoiseError> {
        let options = NoiseOptions::from_parts(repeat, octaves, persistence)?;
        Ok(self.evaluate([x, y, z], &options))
    }
}
