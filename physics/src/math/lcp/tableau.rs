use super::{Variable, PIVOT_EPSILON};
use crate::{
    error::{DimensionError, DimensionResult},
    math::{MatMN, VecN},
};
use core::fmt;
use tracing::debug;

/// Augmented tableau `[I | -M | -1 | q]` for the equations `w - Mz - y = q`.
///
/// Column `i < n` holds the basic variable of row `i`. Column `2n` holds the variable about to
/// enter the basis (initially `y`) and column `2n + 1` the current basic values.
#[derive(Clone, Debug)]
pub struct Tableau {
    n: usize,
    matrix: MatMN,
    index: Vec<Variable>,
    w_pos: Vec<usize>,
    z_pos: Vec<usize>,
}

impl Tableau {
    pub fn new(m: &MatMN, q: &VecN) -> DimensionResult<Self> {
        if !m.is_square() {
            return Err(DimensionError::NotSquare {
                rows: m.rows(),
                cols: m.cols(),
            });
        }
        let n = m.rows();
        if q.len() != n {
            return Err(DimensionError::LengthMismatch {
                expected: n,
                found: q.len(),
            });
        }

        let width = 2 * n + 2;
        let mut matrix = MatMN::zero(n, width);
        for i in 0..n {
            let row = matrix.row_mut(i);
            row[i] = 1.0;
            for (dst, &src) in row[n..2 * n].iter_mut().zip(m.row(i)) {
                *dst = -src;
            }
            row[2 * n] = -1.0;
            row[2 * n + 1] = q[i];
        }

        let index = (0..n)
            .map(Variable::W)
            .chain((0..n).map(Variable::Z))
            .chain([Variable::Y, Variable::Q].iter().copied())
            .collect();

        Ok(Self {
            n,
            matrix,
            index,
            w_pos: (0..n).collect(),
            z_pos: (n..2 * n).collect(),
        })
    }

    /// Problem size `n`.
    #[inline]
    pub fn size(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn width(&self) -> usize {
        2 * self.n + 2
    }

    #[inline]
    pub fn driving_col(&self) -> usize {
        2 * self.n
    }

    #[inline]
    pub fn constant_col(&self) -> usize {
        2 * self.n + 1
    }

    #[inline]
    pub fn matrix(&self) -> &MatMN {
        &self.matrix
    }

    /// Variable identities by column position.
    #[inline]
    pub fn index(&self) -> &[Variable] {
        &self.index
    }

    #[inline]
    pub fn variable_at(&self, pos: usize) -> Variable {
        self.index[pos]
    }

    #[inline]
    pub fn driving(&self, row: usize) -> f64 {
        self.matrix[(row, self.driving_col())]
    }

    #[inline]
    pub fn constant(&self, row: usize) -> f64 {
        self.matrix[(row, self.constant_col())]
    }

    /// Current column of a `w` or `z` variable.
    #[inline]
    pub fn position(&self, var: Variable) -> Option<usize> {
        match var {
            Variable::W(index) => Some(self.w_pos[index]),
            Variable::Z(index) => Some(self.z_pos[index]),
            Variable::Y | Variable::Q => None,
        }
    }

    /// Column of the complementary partner of the variable at `pos`.
    #[inline]
    pub fn partner_pos(&self, pos: usize) -> Option<usize> {
        self.index[pos]
            .partner()
            .and_then(|partner| self.position(partner))
    }

    /// Gauss-Jordan step turning the driving column into the unit vector for `row`.
    ///
    /// The divisor is offset by [`PIVOT_EPSILON`] so an exactly zero entry never divides by zero.
    pub fn clear_driver_column(&mut self, row: usize) {
        let driving_col = self.driving_col();
        let a = self.matrix[(row, driving_col)] + PIVOT_EPSILON;
        for value in self.matrix.row_mut(row) {
            *value /= a;
        }

        let pivot_row = self.matrix.row(row).to_vec();
        for i in (0..self.n).filter(|&i| i != row) {
            let b = self.matrix[(i, driving_col)];
            for (value, &p) in self.matrix.row_mut(i).iter_mut().zip(&pivot_row) {
                *value -= b * p;
            }
        }
    }

    /// Exchanges the basic variable at `pos` with the driving column.
    ///
    /// The leaving variable's partner moves into the driving column, ready to enter on the next
    /// step. Returns `false` when the leaving variable is `y`, which has no partner: `y` is then
    /// back in the driving column and the basis is complementary.
    pub fn pivot(&mut self, pos: usize) -> bool {
        let driving_col = self.driving_col();
        debug!(
            row = pos,
            entering = %self.index[driving_col],
            leaving = %self.index[pos],
            "pivot"
        );
        match self.partner_pos(pos) {
            Some(partner_pos) => {
                self.swap_columns(pos, partner_pos);
                self.swap_columns(pos, driving_col);
                true
            }
            None => {
                self.swap_columns(pos, driving_col);
                false
            }
        }
    }

    /// Swaps two columns, keeping the index map and the `w`/`z` positions in step.
    pub fn swap_columns(&mut self, i: usize, j: usize) {
        self.set_position(self.index[i], j);
        self.set_position(self.index[j], i);
        self.index.swap(i, j);
        self.matrix.swap_cols(i, j);
    }

    fn set_position(&mut self, var: Variable, new_pos: usize) {
        let new_pos = new_pos % self.width();
        match var {
            Variable::W(index) => self.w_pos[index] = new_pos,
            Variable::Z(index) => self.z_pos[index] = new_pos,
            Variable::Y | Variable::Q => {}
        }
    }

    /// Reads `z` from the basic columns; non-basic entries are zero.
    pub fn extract_solution(&self) -> VecN {
        let mut z = VecN::zero(self.n);
        for (row, var) in self.index[..self.n].iter().enumerate() {
            if let Variable::Z(index) = *var {
                z[index] = self.constant(row);
            }
        }
        z
    }
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for var in &self.index {
            write!(f, "{:>12}", var.to_string())?;
        }
        writeln!(f)?;
        for row in 0..self.n {
            for value in self.matrix.row(row) {
                write!(f, "{:>12.6}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
