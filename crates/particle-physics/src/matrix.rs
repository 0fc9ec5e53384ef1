//! Per-family-pair coefficient tables
//!
//! The interaction matrix drives the pairwise force law; the mutation
//! matrix carries per-pair probabilities for family reassignment
//! policies layered on top by the host.

use rand::Rng;
use thiserror::Error;

/// Edit call outside the `[0, m)` index range; the matrix is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("matrix index ({row}, {col}) out of range for size {size}")]
pub struct MatrixIndexError {
    pub row: usize,
    pub col: usize,
    pub size: usize,
}

/// Generation presets for the interaction matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixPreset {
    /// Uniform random in `[-1, 1]`, quantized to steps of 0.1.
    Random,
    /// All cells zero.
    Zero,
    /// Random with `[i][j] == [j][i]`; diagonal drawn independently.
    Symmetric,
    /// Diagonal -1 with a single wrapped off-diagonal neighbor at -0.4.
    Snake,
    /// Diagonal and both wrapped neighbors -1.
    Lines,
}

/// Square table of signed attraction/repulsion coefficients.
///
/// Cells are stored in the edited domain `[-1, 1]`; any force-magnitude
/// pre-scaling is applied by the stepper, not here. `[i][j]` is the
/// coefficient for the force family `i` receives from family `j` and is
/// only symmetric under the [`MatrixPreset::Symmetric`] preset.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionMatrix {
    size: usize,
    cells: Vec<f32>,
}

impl InteractionMatrix {
    /// All-zero matrix of the given size.
    pub fn zeroed(size: usize) -> Self {
        Self {
            size,
            cells: vec![0.0; size * size],
        }
    }

    /// Generate a matrix from a preset.
    pub fn generate<R: Rng>(preset: MatrixPreset, size: usize, rng: &mut R) -> Self {
        let mut matrix = Self::zeroed(size);
        matrix.apply_preset(preset, rng);
        matrix
    }

    /// Re-seed all cells from a preset at the current size.
    pub fn regenerate<R: Rng>(&mut self, preset: MatrixPreset, rng: &mut R) {
        self.cells.fill(0.0);
        self.apply_preset(preset, rng);
    }

    /// Resize to a new family count. Old coefficients are never
    /// preserved: the table is zeroed before the preset is applied.
    pub fn resize<R: Rng>(&mut self, size: usize, preset: MatrixPreset, rng: &mut R) {
        self.size = size;
        self.cells.clear();
        self.cells.resize(size * size, 0.0);
        self.apply_preset(preset, rng);
    }

    fn apply_preset<R: Rng>(&mut self, preset: MatrixPreset, rng: &mut R) {
        let m = self.size;
        match preset {
            MatrixPreset::Random => {
                for cell in &mut self.cells {
                    *cell = quantized(rng, -10, 10);
                }
            }
            MatrixPreset::Zero => {}
            MatrixPreset::Symmetric => {
                for i in 0..m {
                    for j in 0..i {
                        let value = quantized(rng, -10, 10);
                        self.cells[i * m + j] = value;
                        self.cells[j * m + i] = value;
                    }
                    self.cells[i * m + i] = quantized(rng, -10, 10);
                }
            }
            MatrixPreset::Snake => {
                for i in 0..m {
                    self.cells[i * m + i] = -1.0;
                    self.cells[i * m + (i + m - 1) % m] = -0.4;
                }
            }
            MatrixPreset::Lines => {
                for i in 0..m {
                    self.cells[i * m + i] = -1.0;
                    self.cells[i * m + (i + 1) % m] = -1.0;
                    self.cells[i * m + (i + m - 1) % m] = -1.0;
                }
            }
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Coefficient at `[row][col]`. Panics outside `[0, m)`; the stepper
    /// only ever indexes with validated family indices.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.cells[row * self.size + col]
    }

    /// Set a single cell, clamping the value into `[-1, 1]`.
    pub fn set(&mut self, row: usize, col: usize, value: f32) -> Result<(), MatrixIndexError> {
        if row >= self.size || col >= self.size {
            return Err(MatrixIndexError {
                row,
                col,
                size: self.size,
            });
        }
        self.cells[row * self.size + col] = value.clamp(-1.0, 1.0);
        Ok(())
    }

    /// Row-major cell storage, for bulk readers.
    pub fn cells(&self) -> &[f32] {
        &self.cells
    }
}

/// Square table of per-family-pair probabilities in `[0, 1]`.
///
/// Same shape and editing contract as [`InteractionMatrix`], but kept
/// as data only: no force or update rule consumes it. Hosts that want a
/// family-mutation policy read it and drive reassignment themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationMatrix {
    size: usize,
    cells: Vec<f32>,
}

impl MutationMatrix {
    pub fn zeroed(size: usize) -> Self {
        Self {
            size,
            cells: vec![0.0; size * size],
        }
    }

    /// Re-seed every cell uniformly in `[0, 1]`, quantized to steps of 0.1.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        for cell in &mut self.cells {
            *cell = quantized(rng, 0, 10);
        }
    }

    /// Resize to a new family count, dropping all old probabilities.
    pub fn resize(&mut self, size: usize) {
        self.size = size;
        self.cells.clear();
        self.cells.resize(size * size, 0.0);
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.cells[row * self.size + col]
    }

    /// Set a single cell, clamping the value into `[0, 1]`.
    pub fn set(&mut self, row: usize, col: usize, value: f32) -> Result<(), MatrixIndexError> {
        if row >= self.size || col >= self.size {
            return Err(MatrixIndexError {
                row,
                col,
                size: self.size,
            });
        }
        self.cells[row * self.size + col] = value.clamp(0.0, 1.0);
        Ok(())
    }

    pub fn cells(&self) -> &[f32] {
        &self.cells
    }
}

fn quantized<R: Rng>(rng: &mut R, lo: i32, hi: i32) -> f32 {
    rng.random_range(lo..=hi) as f32 / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_presets_yield_square_tables() {
        let presets = [
            MatrixPreset::Random,
            MatrixPreset::Zero,
            MatrixPreset::Symmetric,
            MatrixPreset::Snake,
            MatrixPreset::Lines,
        ];
        let mut rng = rng();
        for preset in presets {
            for m in [1, 2, 3, 6, 10] {
                let matrix = InteractionMatrix::generate(preset, m, &mut rng);
                assert_eq!(matrix.size(), m);
                assert_eq!(matrix.cells().len(), m * m);
                for &cell in matrix.cells() {
                    assert!((-1.0..=1.0).contains(&cell), "{preset:?} cell {cell} out of domain");
                }
            }
        }
    }

    #[test]
    fn test_random_is_quantized_to_tenths() {
        let matrix = InteractionMatrix::generate(MatrixPreset::Random, 8, &mut rng());
        for &cell in matrix.cells() {
            let scaled = cell * 10.0;
            assert!((scaled - scaled.round()).abs() < 1e-5, "cell {cell} not a tenth");
        }
    }

    #[test]
    fn test_symmetric_mirrors_off_diagonal() {
        let matrix = InteractionMatrix::generate(MatrixPreset::Symmetric, 7, &mut rng());
        for i in 0..7 {
            for j in 0..7 {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
            }
        }
    }

    #[test]
    fn test_snake_cells() {
        let matrix = InteractionMatrix::generate(MatrixPreset::Snake, 6, &mut rng());
        for i in 0..6 {
            for j in 0..6 {
                let expected = if i == j {
                    -1.0
                } else if j == (i + 5) % 6 {
                    -0.4
                } else {
                    0.0
                };
                assert_eq!(matrix.get(i, j), expected, "cell ({i}, {j})");
            }
        }
    }

    #[test]
    fn test_lines_wraps_at_edges() {
        let matrix = InteractionMatrix::generate(MatrixPreset::Lines, 6, &mut rng());
        assert_eq!(matrix.get(0, 5), -1.0);
        assert_eq!(matrix.get(5, 0), -1.0);
        for i in 0..6 {
            assert_eq!(matrix.get(i, i), -1.0);
            assert_eq!(matrix.get(i, (i + 1) % 6), -1.0);
            assert_eq!(matrix.get(i, (i + 5) % 6), -1.0);
            assert_eq!(matrix.get(i, (i + 3) % 6), 0.0);
        }
    }

    #[test]
    fn test_set_clamps_value() {
        let mut matrix = InteractionMatrix::zeroed(3);
        matrix.set(1, 2, 4.5).unwrap();
        assert_eq!(matrix.get(1, 2), 1.0);
        matrix.set(1, 2, -4.5).unwrap();
        assert_eq!(matrix.get(1, 2), -1.0);
    }

    #[test]
    fn test_set_rejects_out_of_range_without_change() {
        let mut matrix = InteractionMatrix::zeroed(3);
        let err = matrix.set(3, 0, 0.5).unwrap_err();
        assert_eq!(
            err,
            MatrixIndexError {
                row: 3,
                col: 0,
                size: 3
            }
        );
        assert!(matrix.cells().iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_resize_discards_old_coefficients() {
        let mut rng = rng();
        let mut matrix = InteractionMatrix::generate(MatrixPreset::Random, 4, &mut rng);
        matrix.resize(6, MatrixPreset::Zero, &mut rng);
        assert_eq!(matrix.size(), 6);
        assert!(matrix.cells().iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_mutation_matrix_domain() {
        let mut matrix = MutationMatrix::zeroed(5);
        matrix.randomize(&mut rng());
        for &cell in matrix.cells() {
            assert!((0.0..=1.0).contains(&cell));
        }
        matrix.set(0, 0, 2.0).unwrap();
        assert_eq!(matrix.get(0, 0), 1.0);
        matrix.set(0, 0, -2.0).unwrap();
        assert_eq!(matrix.get(0, 0), 0.0);
        assert!(matrix.set(5, 0, 0.5).is_err());
    }
}
