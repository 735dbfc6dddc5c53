use super::{dot, VecN};
use crate::error::{DimensionError, DimensionResult};
use core::ops::{Index, IndexMut, Mul};

/// Dense row-major matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct MatMN {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl MatMN {
    #[inline]
    pub fn zero(rows: usize, cols: usize) -> Self {
        MatMN {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn identity(dimension: usize) -> Self {
        let mut mat = MatMN::zero(dimension, dimension);
        for i in 0..dimension {
            mat[(i, i)] = 1.0;
        }
        mat
    }

    /// Builds a matrix from row slices, all of which must have the same length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> DimensionResult<Self> {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(DimensionError::RaggedRows {
                    row: index,
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(MatMN {
            rows: rows.len(),
            cols,
            data,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    #[inline]
    pub fn row(&self, index: usize) -> &[f64] {
        let start = index * self.cols;
        &self.data[start..start + self.cols]
    }

    #[inline]
    pub fn row_mut(&mut self, index: usize) -> &mut [f64] {
        let start = index * self.cols;
        &mut self.data[start..start + self.cols]
    }

    pub fn swap_cols(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        for r in 0..self.rows {
            self.row_mut(r).swap(i, j);
        }
    }

    pub fn transpose(&self) -> Self {
        let mut mat = MatMN::zero(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                mat[(c, r)] = self[(r, c)];
            }
        }
        mat
    }
}

impl Index<(usize, usize)> for MatMN {
    type Output = f64;
    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        debug_assert!(col < self.cols);
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for MatMN {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        debug_assert!(col < self.cols);
        &mut self.data[row * self.cols + col]
    }
}

impl Mul<&VecN> for &MatMN {
    type Output = VecN;
    #[inline]
    fn mul(self, rhs: &VecN) -> Self::Output {
        debug_assert_eq!(self.cols, rhs.len());
        (0..self.rows).map(|r| dot(self.row(r), rhs)).collect()
    }
}

impl Mul<&MatMN> for &MatMN {
    type Output = MatMN;
    fn mul(self, rhs: &MatMN) -> Self::Output {
        debug_assert_eq!(self.cols, rhs.rows);
        let rhs_transpose = rhs.transpose();

        let mut tmp = MatMN::zero(self.rows, rhs.cols);
        for m in 0..self.rows {
            for n in 0..rhs.cols {
                tmp[(m, n)] = dot(self.row(m), rhs_transpose.row(n));
            }
        }
        tmp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matmn() {
        let m0 = MatMN::from_rows(&[[1., 2.], [3., 4.], [5., 6.]]).unwrap();
        let m1 = m0.transpose();
        assert_eq!(m1, MatMN::from_rows(&[[1., 3., 5.], [2., 4., 6.]]).unwrap());
        assert_eq!(m1.rows(), 2);
        assert_eq!(m1.cols(), 3);
        assert!(!m1.is_square());

        let product = &m1 * &m0;
        assert_eq!(product, MatMN::from_rows(&[[35., 44.], [44., 56.]]).unwrap());
        assert_eq!(&MatMN::identity(2) * &product, product);
    }

    #[test]
    fn test_mat_vec() {
        let m = MatMN::from_rows(&[[2., 1.], [0., 2.]]).unwrap();
        let v = VecN::from(vec![0., 1.]);
        assert_eq!(&m * &v, VecN::from(vec![1., 2.]));
    }

    #[test]
    fn test_swap_cols() {
        let mut m = MatMN::from_rows(&[[1., 2., 3.], [4., 5., 6.]]).unwrap();
        m.swap_cols(0, 2);
        assert_eq!(m.row(0), &[3., 2., 1.]);
        assert_eq!(m.row(1), &[6., 5., 4.]);
    }

    #[test]
    fn test_ragged_rows() {
        let rows = vec![vec![1., 2.], vec![3.]];
        assert_eq!(
            MatMN::from_rows(&rows),
            Err(DimensionError::RaggedRows {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        let empty: [[f64; 0]; 0] = [];
        let m = MatMN::from_rows(&empty).unwrap();
        assert_eq!((m.rows(), m.cols()), (0, 0));
    }
}
