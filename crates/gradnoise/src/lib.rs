//! Deterministic 3D gradient noise.
//!
//! An [`Engine`] owns an immutable permutation table and evaluates improved
//! Perlin noise at arbitrary points, optionally tiled per axis
//! ([`RepeatPeriod`]) and blended over several octaves ([`OctaveSpec`]).
//! [`Engine::sample_sequence`] walks a start point through space with a fixed
//! per-axis step and yields the same values as evaluating each point alone.
//!
//! ```
//! use gradnoise::{Engine, NoiseOptions};
//!
//! let engine = Engine::new(42);
//! let v = engine.evaluate([0.5, 1.25, -3.0], &NoiseOptions::default());
//! assert!((0.0..=1.0).contains(&v));
//! // integer lattice points always sit at the middle of the range
//! assert_eq!(engine.sample(4.0, -2.0, 7.0), 0.5);
//! ```

pub mod batch;
pub mod error;
pub mod evaluator;
pub mod lattice;
pub mod options;
pub mod permutation;

pub use batch::SampleSequence;
pub use error::NoiseError;
pub use evaluator::Engine;
pub use options::{Axis, NoiseOptions, OctaveSpec, Point, RepeatPeriod, SampleRequest, MAX_OCTAVES};
pub use permutation::PermutationTable;
