//! Lattice hash: integer grid point to pseudo-random gradient.

use crate::options::{Axis, RepeatPeriod};
use crate::permutation::PermutationTable;

/// 3D gradient vectors (12 cube-edge directions).
const GRAD3: [[f64; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

/// Number of distinct gradient directions.
pub const GRADIENT_COUNT: usize = GRAD3.len();

/// Gradient indices of the 8 corners of one lattice cell.
///
/// Ordered x fastest, then y, then z: `[000, 100, 010, 110, 001, 101, 011, 111]`.
pub type CellCorners = [u8; 8];

/// A view of the permutation table under a particular repeat configuration.
#[derive(Debug, Clone, Copy)]
pub struct Lattice<'a> {
    table: &'a PermutationTable,
    repeat: RepeatPeriod,
}

impl<'a> Lattice<'a> {
    pub fn new(table: &'a PermutationTable, repeat: RepeatPeriod) -> Self {
        Self { table, repeat }
    }

    /// Reduce a lattice coordinate to a table index, wrapping by the axis period first.
    #[inline]
    fn wrap(&self, axis: Axis, v: i64) -> usize {
        let v = match self.repeat.axis(axis) {
            Some(period) => v.rem_euclid(i64::from(period.get())),
            None => v,
        };
        (v & 255) as usize
    }

    /// Gradient index for the lattice point `(x, y, z)`. Total over all integers.
    #[inline]
    pub fn gradient_index(&self, x: i64, y: i64, z: i64) -> u8 {
        let h = self.table.hash(
            self.wrap(Axis::X, x),
            self.wrap(Axis::Y, y),
            self.wrap(Axis::Z, z),
        );
        h % GRADIENT_COUNT as u8
    }

    /// Resolve the gradients of all 8 corners of the cell whose low corner is `cell`.
    pub fn corners(&self, cell: [i64; 3]) -> CellCorners {
        let [x0, y0, z0] = cell;
        let x1 = x0.wrapping_add(1);
        let y1 = y0.wrapping_add(1);
        let z1 = z0.wrapping_add(1);
        [
            self.gradient_index(x0, y0, z0),
            self.gradient_index(x1, y0, z0),
            self.gradient_index(x0, y1, z0),
            self.gradient_index(x1, y1, z0),
            self.gradient_index(x0, y0, z1),
            self.gradient_index(x1, y0, z1),
            self.gradient_index(x0, y1, z1),
            self.gradient_index(x1, y1, z1),
        ]
    }
}

/// Dot product of gradient `index` with the offset `(x, y, z)` from its lattice point.
#[inline]
pub fn gradient_dot(index: u8, x: f64, y: f64, z: f64) -> f64 {
    let g = &GRAD3[index as usize];
    g[0] * x + g[1] * y + g[2] * z
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_in_range() {
        let table = PermutationTable::from_seed(3);
        let lattice = Lattice::new(&table, RepeatPeriod::NONE);
        for x in -300..300 {
            let idx = lattice.gradient_index(x, x * 7, -x * 13);
            assert!((idx as usize) < GRADIENT_COUNT);
        }
    }

    #[test]
    fn unwrapped_hash_tiles_at_256() {
        let table = PermutationTable::from_seed(11);
        let lattice = Lattice::new(&table, RepeatPeriod::NONE);
        for x in -20..20 {
            assert_eq!(
                lattice.gradient_index(x, 3, -4),
                lattice.gradient_index(x + 256, 3, -4 - 512)
            );
        }
    }

    #[test]
    fn repeat_wraps_before_masking() {
        let table = PermutationTable::from_seed(11);
        let lattice = Lattice::new(&table, RepeatPeriod::per_axis([5, 0, 7]).unwrap());
        for x in -12..12 {
            for z in -9..9 {
                let base = lattice.gradient_index(x, 2, z);
                assert_eq!(base, lattice.gradient_index(x + 5, 2, z));
                assert_eq!(base, lattice.gradient_index(x - 10, 2, z + 7));
            }
        }
        // negative coordinates wrap with euclidean remainder
        assert_eq!(
            lattice.gradient_index(-1, 0, 0),
            lattice.gradient_index(4, 0, 0)
        );
    }

    #[test]
    fn extreme_coordinates_are_total() {
        let table = PermutationTable::reference();
        let lattice = Lattice::new(&table, RepeatPeriod::uniform(3).unwrap());
        let corners = lattice.corners([i64::MAX, i64::MIN, 0]);
        assert!(corners.iter().all(|&c| (c as usize) < GRADIENT_COUNT));
    }

    #[test]
    fn corner_order() {
        let table = PermutationTable::from_seed(5);
        let lattice = Lattice::new(&table, RepeatPeriod::NONE);
        let c = lattice.corners([2, -3, 9]);
        assert_eq!(c[0], lattice.gradient_index(2, -3, 9));
        assert_eq!(c[1], lattice.gradient_index(3, -3, 9));
        assert_eq!(c[2], lattice.gradient_index(2, -2, 9));
        assert_eq!(c[7], lattice.gradient_index(3, -2, 10));
    }

    #[test]
    fn dot_with_zero_offset_is_zero() {
        for i in 0..GRADIENT_COUNT as u8 {
            assert_eq!(gradient_dot(i, 0.0, 0.0, 0.0), 0.0);
        }
        assert_eq!(gradient_dot(0, 0.25, 0.5, 9.0), 0.75);
    }
}
