use core::fmt;

/// Identity of the variable occupying a tableau column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Variable {
    /// Slack `w_i = (Mz + q)_i`.
    W(usize),
    /// Unknown `z_i`.
    Z(usize),
    /// Artificial driving variable.
    Y,
    /// Constant column.
    Q,
}

impl Variable {
    /// The complementary partner, `w_i <-> z_i`. `Y` and `Q` have none.
    #[inline]
    pub fn partner(self) -> Option<Variable> {
        match self {
            Variable::W(index) => Some(Variable::Z(index)),
            Variable::Z(index) => Some(Variable::W(index)),
            Variable::Y | Variable::Q => None,
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::W(index) => write!(f, "w{}", index),
            Variable::Z(index) => write!(f, "z{}", index),
            Variable::Y => f.write_str("y"),
            Variable::Q => f.write_str("q"),
        }
    }
}

#[test]
fn test_variable_labels() {
    assert_eq!(Variable::W(3).to_string(), "w3");
    assert_eq!(Variable::Z(0).to_string(), "z0");
    assert_eq!(Variable::Y.to_string(), "y");
    assert_eq!(Variable::Q.to_string(), "q");
    assert_eq!(Variable::W(1).partner(), Some(Variable::Z(1)));
    assert_eq!(Variable::Z(1).partner(), Some(Variable::W(1)));
    assert_eq!(Variable::Y.partner(), None);
}
