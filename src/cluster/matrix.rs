use std::ops::{Index, IndexMut};

/// Dense, row-major `n x n` matrix of `f64`.
///
/// The message-passing loops index it as `m[(i, k)]` and walk whole rows through
/// [`SquareMatrix::row`], so each cell is a plain load/store with no indirection.
#[derive(Clone, Debug, PartialEq)]
pub struct SquareMatrix {
    n: usize,
    data: Vec<f64>,
}

impl SquareMatrix {
    /// An `n x n` matrix of zeros.
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    /// Build a matrix cell by cell.
    pub fn from_fn(n: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(n * n);
        for i in 0..n {
            for k in 0..n {
                data.push(f(i, k));
            }
        }
        Self { n, data }
    }

    /// Number of rows (equal to the number of columns).
    #[inline]
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Row `i` as a slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Row `i` as a mutable slice.
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.data[i * self.n..(i + 1) * self.n]
    }

    /// Diagonal entries, in row order.
    pub fn diagonal(&self) -> Vec<f64> {
        (0..self.n).map(|i| self[(i, i)]).collect()
    }

    /// All cells in row-major order.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

impl Index<(usize, usize)> for SquareMatrix {
    type Output = f64;

    #[inline]
    fn index(&self, (i, k): (usize, usize)) -> &f64 {
        &self.data[i * self.n + k]
    }
}

impl IndexMut<(usize, usize)> for SquareMatrix {
    #[inline]
    fn index_mut(&mut self, (i, k): (usize, usize)) -> &mut f64 {
        &mut self.data[i * self.n + k]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_layout() {
        let m = SquareMatrix::from_fn(3, |i, k| (i * 10 + k) as f64);
        assert_eq!(m.dim(), 3);
        assert_eq!(m[(1, 2)], 12.0);
        assert_eq!(m.row(2), &[20.0, 21.0, 22.0]);
        assert_eq!(m.diagonal(), vec![0.0, 11.0, 22.0]);
    }

    #[test]
    fn mutation_through_rows_and_cells() {
        let mut m = SquareMatrix::zeros(2);
        m[(0, 1)] = 3.5;
        m.row_mut(1)[0] = -1.0;
        assert_eq!(m.as_slice(), &[0.0, 3.5, -1.0, 0.0]);
    }

    #[test]
    fn clones_do_not_alias() {
        let a = SquareMatrix::zeros(2);
        let mut b = a.clone();
        b[(0, 0)] = 1.0;
        assert_eq!(a[(0, 0)], 0.0);
    }
}
