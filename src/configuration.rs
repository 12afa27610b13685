//! Joint-space configurations, single and batched
//!
//! A [`Configuration`] is one joint-space point. A [`ConfigurationBlock`] is a
//! batch of `L::WIDTH` candidates stored dimension-major:
//!
//! ```text
//! block[0]: [q0_lane0, q0_lane1, ..., q0_lane7]   joint 0 of every candidate
//! block[1]: [q1_lane0, q1_lane1, ..., q1_lane7]   joint 1 of every candidate
//! ...
//! ```
//!
//! Gradients share the same type.

use crate::lanes::FloatLanes;
use std::ops::{Add, Index, IndexMut, Mul, Sub};

/// One joint-space point, one value per dimension
pub type Configuration<const D: usize> = [f32; D];

/// Dimension-major batch of `L::WIDTH` configurations
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfigurationBlock<L, const D: usize> {
    rows: [L; D],
}

impl<L: FloatLanes, const D: usize> ConfigurationBlock<L, D> {
    /// Number of joint dimensions
    pub const DIMENSION: usize = D;

    /// Build from one lane vector per dimension
    #[inline]
    pub fn from_rows(rows: [L; D]) -> Self {
        ConfigurationBlock { rows }
    }

    /// Every lane set to `q`
    #[inline]
    pub fn broadcast(q: &Configuration<D>) -> Self {
        ConfigurationBlock {
            rows: std::array::from_fn(|i| L::splat(q[i])),
        }
    }

    /// Build lane-by-lane from up to `L::WIDTH` configurations.
    ///
    /// Missing lanes repeat the last configuration given; an empty slice
    /// yields all zeros.
    pub fn from_configurations(configs: &[Configuration<D>]) -> Self {
        ConfigurationBlock {
            rows: std::array::from_fn(|i| {
                L::from_fn(|lane| {
                    configs
                        .get(lane)
                        .or_else(|| configs.last())
                        .map_or(0.0, |q| q[i])
                })
            }),
        }
    }

    /// Extract the configuration held in `lane`
    #[inline]
    pub fn lane(&self, lane: usize) -> Configuration<D> {
        std::array::from_fn(|i| self.rows[i].lane(lane))
    }

    /// All lanes as separate configurations
    pub fn to_configurations(&self) -> Vec<Configuration<D>> {
        (0..L::WIDTH).map(|lane| self.lane(lane)).collect()
    }

    /// Per-dimension lane vectors
    #[inline]
    pub fn rows(&self) -> &[L; D] {
        &self.rows
    }

    /// Copy with dimension `i` replaced by `value`
    #[inline]
    pub fn with(&self, i: usize, value: L) -> Self {
        let mut out = *self;
        out.rows[i] = value;
        out
    }

    /// Every dimension scaled by the same per-lane factor
    #[inline]
    pub fn scale_lanes(&self, factor: L) -> Self {
        ConfigurationBlock {
            rows: std::array::from_fn(|i| self.rows[i] * factor),
        }
    }
}

impl<L, const D: usize> Index<usize> for ConfigurationBlock<L, D> {
    type Output = L;
    #[inline(always)]
    fn index(&self, i: usize) -> &L {
        &self.rows[i]
    }
}

impl<L, const D: usize> IndexMut<usize> for ConfigurationBlock<L, D> {
    #[inline(always)]
    fn index_mut(&mut self, i: usize) -> &mut L {
        &mut self.rows[i]
    }
}

impl<L: FloatLanes, const D: usize> Add for ConfigurationBlock<L, D> {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        ConfigurationBlock {
            rows: std::array::from_fn(|i| self.rows[i] + other.rows[i]),
        }
    }
}

impl<L: FloatLanes, const D: usize> Sub for ConfigurationBlock<L, D> {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        ConfigurationBlock {
            rows: std::array::from_fn(|i| self.rows[i] - other.rows[i]),
        }
    }
}

impl<L: FloatLanes, const D: usize> Mul for ConfigurationBlock<L, D> {
    type Output = Self;
    #[inline]
    fn mul(self, other: Self) -> Self {
        ConfigurationBlock {
            rows: std::array::from_fn(|i| self.rows[i] * other.rows[i]),
        }
    }
}
