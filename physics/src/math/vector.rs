use super::dot;
use core::ops::{Add, Deref, DerefMut};
use serde::{Deserialize, Serialize};
use std::iter::FromIterator;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VecN(pub(crate) Vec<f64>);

impl VecN {
    #[inline]
    pub fn zero(size: usize) -> Self {
        Self(vec![0.0; size])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn dot(&self, rhs: &Self) -> f64 {
        dot(&self.0, &rhs.0)
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for VecN {
    #[inline]
    fn from(v: Vec<f64>) -> Self {
        Self(v)
    }
}

impl From<&[f64]> for VecN {
    #[inline]
    fn from(v: &[f64]) -> Self {
        Self(v.to_vec())
    }
}

impl FromIterator<f64> for VecN {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Deref for VecN {
    type Target = [f64];
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for VecN {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Add<&VecN> for VecN {
    type Output = VecN;
    #[inline]
    fn add(self, rhs: &VecN) -> Self::Output {
        debug_assert_eq!(self.len(), rhs.len());
        let mut tmp = self;
        for (lhs, rhs) in tmp.iter_mut().zip(rhs.iter()) {
            *lhs += rhs;
        }
        tmp
    }
}

#[test]
fn test_vecn() {
    let a = VecN::from(vec![1.0, 2.0, 3.0]);
    let b: VecN = (0..3).map(|i| i as f64).collect();
    assert_eq!(a.dot(&b), 8.0);
    assert_eq!(a.clone() + &b, VecN::from(vec![1.0, 3.0, 5.0]));
    assert_eq!(VecN::zero(2).into_vec(), vec![0.0, 0.0]);
    assert!(VecN::default().is_empty());
}
