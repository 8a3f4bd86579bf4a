//! Immutable permutation table backing the lattice hash.
//!
//! The table holds a shuffle of `0..=255` repeated twice so nested lookups of
//! the form `perm[perm[x] + y]` never need an extra mask.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::NoiseError;

/// Number of distinct lattice hash values.
pub const TABLE_SIZE: usize = 256;

/// Ken Perlin's published permutation from the improved noise reference.
const REFERENCE: [u8; TABLE_SIZE] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225,
    140, 36, 103, 30, 69, 142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148,
    247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219, 203, 117, 35, 11, 32,
    57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122,
    60, 211, 133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54,
    65, 25, 63, 161, 1, 216, 80, 73, 209, 76, 132, 187, 208, 89, 18, 169,
    200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173, 186, 3, 64,
    52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212,
    207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213,
    119, 248, 152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9,
    129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232, 178, 185, 112, 104,
    218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162, 241,
    81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157,
    184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93,
    222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

/// A doubled permutation of `0..=255`. Never mutated after construction.
#[derive(Clone, PartialEq, Eq)]
pub struct PermutationTable {
    perm: [u8; TABLE_SIZE * 2],
}

impl PermutationTable {
    /// Shuffle `0..=255` with a generator seeded from `seed`.
    ///
    /// The same seed always produces the same table.
    pub fn from_seed(seed: u64) -> Self {
        let mut table: Vec<u8> = (0..=255).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        table.shuffle(&mut rng);

        let mut base = [0u8; TABLE_SIZE];
        base.copy_from_slice(&table);
        Self::doubled(base)
    }

    /// The fixed reference permutation, independent of any seed.
    pub fn reference() -> Self {
        Self::doubled(REFERENCE)
    }

    /// Build a table from a caller-supplied permutation.
    ///
    /// Fails if any value appears more than once (and therefore another is missing).
    pub fn from_permutation(base: [u8; TABLE_SIZE]) -> Result<Self, NoiseError> {
        let mut seen = [false; TABLE_SIZE];
        for &v in &base {
            if seen[v as usize] {
                return Err(NoiseError::InvalidPermutation(v));
            }
            seen[v as usize] = true;
        }
        Ok(Self::doubled(base))
    }

    fn doubled(base: [u8; TABLE_SIZE]) -> Self {
        let mut perm = [0u8; TABLE_SIZE * 2];
        perm[..TABLE_SIZE].copy_from_slice(&base);
        perm[TABLE_SIZE..].copy_from_slice(&base);
        Self { perm }
    }

    /// Look up a single entry. `index` must be below 512.
    #[inline]
    pub fn get(&self, index: usize) -> u8 {
        self.perm[index]
    }

    /// Hash three coordinates already reduced to `0..256`.
    #[inline]
    pub fn hash(&self, x: usize, y: usize, z: usize) -> u8 {
        let a = self.perm[x] as usize + y;
        let b = self.perm[a] as usize + z;
        self.perm[b]
    }

    /// The underlying 256-entry permutation (first half of the table).
    pub fn permutation(&self) -> &[u8] {
        &self.perm[..TABLE_SIZE]
    }
}

impl std::fmt::Debug for PermutationTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermutationTable")
            .field("head", &&self.perm[..8])
            .finish_non_exhaustive()
    }
}
