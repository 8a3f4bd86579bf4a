//! Batched sampling along a stepped line through noise space.
//!
//! A [`SampleSequence`] yields exactly what [`Engine::evaluate`] returns at
//! `start + i * delta` for each index. It only saves work: the octave plan is
//! built once, and each octave remembers the gradients of the last lattice
//! cell it visited so small steps do not re-hash the same corners.

use std::ops::Range;

use rayon::prelude::*;
use tracing::debug;

use crate::error::NoiseError;
use crate::evaluator::{Engine, OctavePlan};
use crate::lattice::{CellCorners, Lattice};
use crate::options::{NoiseOptions, Point, SampleRequest};

/// Gradients of the most recently visited cell for one octave.
#[derive(Debug, Clone, Copy)]
struct CachedCell {
    cell: [i64; 3],
    corners: CellCorners,
}

/// Lazy, restartable sequence of normalized samples for a [`SampleRequest`].
#[derive(Debug, Clone)]
pub struct SampleSequence<'a> {
    lattice: Lattice<'a>,
    plan: OctavePlan,
    request: SampleRequest,
    front: usize,
    back: usize,
    cache: Vec<Option<CachedCell>>,
}

impl<'a> SampleSequence<'a> {
    fn new(engine: &'a Engine, request: &SampleRequest, range: Range<usize>) -> Self {
        let plan = OctavePlan::new(&request.options.octaves);
        Self {
            lattice: engine.lattice(request.options.repeat),
            cache: vec![None; plan.octaves()],
            plan,
            request: *request,
            front: range.start,
            back: range.end,
        }
    }

    fn sample_at(&mut self, index: usize) -> f64 {
        let point = self.request.point(index);
        let lattice = &self.lattice;
        let cache = &mut self.cache;
        self.plan.evaluate(point, |octave, cell| {
            let slot = &mut cache[octave];
            match *slot {
                Some(hit) if hit.cell == cell => hit.corners,
                _ => {
                    let corners = lattice.corners(cell);
                    *slot = Some(CachedCell { cell, corners });
                    corners
                }
            }
        })
    }
}

impl Iterator for SampleSequence<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.front >= self.back {
            return None;
        }
        let index = self.front;
        self.front += 1;
        Some(self.sample_at(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back.saturating_sub(self.front);
        (len, Some(len))
    }
}

impl DoubleEndedIterator for SampleSequence<'_> {
    fn next_back(&mut self) -> Option<f64> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        let index = self.back;
        Some(self.sample_at(index))
    }
}

impl ExactSizeIterator for SampleSequence<'_> {}

impl std::iter::FusedIterator for SampleSequence<'_> {}

impl Engine {
    /// Lazily sample `request.count()` points starting at the request's start.
    pub fn sample_sequence(&self, request: &SampleRequest) -> SampleSequence<'_> {
        SampleSequence::new(self, request, 0..request.count())
    }

    /// Lazily sample only the indices in `range` of `request`, clamped to its count.
    ///
    /// Element values are the same as at those indices of the full sequence.
    pub fn sample_range(&self, request: &SampleRequest, range: Range<usize>) -> SampleSequence<'_> {
        let end = range.end.min(request.count());
        let start = range.start.min(end);
        SampleSequence::new(self, request, start..end)
    }

    /// Eagerly sample the whole request.
    pub fn sample_sequence_vec(&self, request: &SampleRequest) -> Vec<f64> {
        self.sample_sequence(request).collect()
    }

    /// Sample the whole request on the rayon pool, `chunk_len` indices per task.
    ///
    /// The output does not depend on `chunk_len`.
    pub fn sample_sequence_par(
        &self,
        request: &SampleRequest,
        chunk_len: usize,
    ) -> Result<Vec<f64>, NoiseError> {
        if chunk_len == 0 {
            return Err(NoiseError::InvalidChunkLen);
        }
        debug!(
            count = request.count(),
            chunk_len, "dispatching parallel sample sequence"
        );

        let mut out = vec![0.0; request.count()];
        out.par_chunks_mut(chunk_len)
            .enumerate()
            .for_each(|(chunk, slice)| {
                let first = chunk * chunk_len;
                let values = self.sample_range(request, first..first + slice.len());
                for (dst, v) in slice.iter_mut().zip(values) {
                    *dst = v;
                }
            });
        Ok(out)
    }

    /// [`Engine::sample_sequence_vec`] taking the classic numeric parameters.
    #[allow(clippy::too_many_arguments)]
    pub fn sample_sequence_with(
        &self,
        start_x: f64,
        delta_x: f64,
        start_y: f64,
        delta_y: f64,
        start_z: f64,
        delta_z: f64,
        count: i64,
        repeat: i64,
        octaves: i64,
        persistence: f64,
    ) -> Result<Vec<f64>, NoiseError> {
        let options = NoiseOptions::from_parts(repeat, octaves, persistence)?;
        let start: Point = [start_x, start_y, start_z];
        let delta: Point = [delta_x, delta_y, delta_z];
        let request = SampleRequest::new(start, delta, count, options)?;
        Ok(self.sample_sequence_vec(&request))
    }
}
