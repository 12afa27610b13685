//! Fixed-width lane types for batched evaluation
//!
//! Every distance primitive and every configuration block in this crate is
//! generic over a [`FloatLanes`] type: a small fixed-size bundle of `f32`
//! values with elementwise arithmetic. The same code path therefore runs on
//! a single scalar (`f32`, width 1), on portable SIMD registers
//! (`wide::f32x4`, `wide::f32x8`), or on the plain-loop fallback
//! [`LaneArray`].
//!
//! # Layout
//!
//! ```text
//! f32x8:  [v0, v1, v2, v3, v4, v5, v6, v7]   one register, 8 candidates
//! f32:    v0                                 one candidate
//! ```
//!
//! Lanes never interact: no operation in this trait reads from a lane other
//! than the one it writes.

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};
use wide::{f32x4, f32x8};

/// Default lane type (8 x f32, AVX2 / 2x NEON)
pub type DefaultLanes = f32x8;

/// Width of [`DefaultLanes`]
pub const DEFAULT_WIDTH: usize = 8;

/// A fixed-width bundle of `f32` values processed together.
pub trait FloatLanes:
    Copy
    + Debug
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Number of independent lanes
    const WIDTH: usize;

    /// All lanes set to `value`
    fn splat(value: f32) -> Self;

    /// Build lane `i` from `f(i)`
    fn from_fn<F: FnMut(usize) -> f32>(f: F) -> Self;

    /// Read a single lane
    fn lane(self, index: usize) -> f32;

    /// Lane-wise absolute value
    fn abs(self) -> Self;

    /// Lane-wise maximum
    fn max(self, other: Self) -> Self;

    /// Lane-wise minimum
    fn min(self, other: Self) -> Self;

    /// Lane-wise square root
    fn sqrt(self) -> Self;

    /// Lane-wise `(sin, cos)`
    fn sin_cos(self) -> (Self, Self);

    /// All lanes zero
    #[inline]
    fn zero() -> Self {
        Self::splat(0.0)
    }

    /// Copy all lanes out
    fn to_vec(self) -> Vec<f32> {
        (0..Self::WIDTH).map(|i| self.lane(i)).collect()
    }

    /// Number of lanes satisfying `pred`
    fn count_lanes<P: Fn(f32) -> bool>(self, pred: P) -> usize {
        (0..Self::WIDTH).filter(|&i| pred(self.lane(i))).count()
    }

    /// True if any lane satisfies `pred`
    fn any_lane<P: Fn(f32) -> bool>(self, pred: P) -> bool {
        (0..Self::WIDTH).any(|i| pred(self.lane(i)))
    }
}

// ============================================================================
// Scalar (width 1)
// ============================================================================

impl FloatLanes for f32 {
    const WIDTH: usize = 1;

    #[inline(always)]
    fn splat(value: f32) -> Self {
        value
    }

    #[inline(always)]
    fn from_fn<F: FnMut(usize) -> f32>(mut f: F) -> Self {
        f(0)
    }

    #[inline(always)]
    fn lane(self, index: usize) -> f32 {
        debug_assert!(index == 0, "lane {} out of range for f32", index);
        self
    }

    #[inline(always)]
    fn abs(self) -> Self {
        f32::abs(self)
    }

    #[inline(always)]
    fn max(self, other: Self) -> Self {
        f32::max(self, other)
    }

    #[inline(always)]
    fn min(self, other: Self) -> Self {
        f32::min(self, other)
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        f32::sqrt(self)
    }

    #[inline(always)]
    fn sin_cos(self) -> (Self, Self) {
        f32::sin_cos(self)
    }
}

// ============================================================================
// Portable SIMD (wide)
// ============================================================================

macro_rules! impl_wide_lanes {
    ($ty:ty, $width:expr) => {
        impl FloatLanes for $ty {
            const WIDTH: usize = $width;

            #[inline(always)]
            fn splat(value: f32) -> Self {
                <$ty>::splat(value)
            }

            #[inline(always)]
            fn from_fn<F: FnMut(usize) -> f32>(f: F) -> Self {
                <$ty>::new(std::array::from_fn(f))
            }

            #[inline(always)]
            fn lane(self, index: usize) -> f32 {
                self.to_array()[index]
            }

            #[inline(always)]
            fn abs(self) -> Self {
                <$ty>::abs(self)
            }

            #[inline(always)]
            fn max(self, other: Self) -> Self {
                <$ty>::max(self, other)
            }

            #[inline(always)]
            fn min(self, other: Self) -> Self {
                <$ty>::min(self, other)
            }

            #[inline(always)]
            fn sqrt(self) -> Self {
                <$ty>::sqrt(self)
            }

            #[inline(always)]
            fn sin_cos(self) -> (Self, Self) {
                <$ty>::sin_cos(self)
            }

            fn to_vec(self) -> Vec<f32> {
                self.to_array().to_vec()
            }
        }
    };
}

impl_wide_lanes!(f32x4, 4);
impl_wide_lanes!(f32x8, 8);

// ============================================================================
// Scalar loop fallback
// ============================================================================

/// Plain array of `N` lanes, evaluated with scalar loops.
///
/// Useful on targets without a `wide` backend worth having, for odd widths,
/// and as a reference implementation when checking the SIMD paths.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaneArray<const N: usize>(pub [f32; N]);

impl<const N: usize> LaneArray<N> {
    #[inline(always)]
    fn map(self, f: impl Fn(f32) -> f32) -> Self {
        LaneArray(std::array::from_fn(|i| f(self.0[i])))
    }

    #[inline(always)]
    fn zip(self, other: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        LaneArray(std::array::from_fn(|i| f(self.0[i], other.0[i])))
    }
}

impl<const N: usize> Add for LaneArray<N> {
    type Output = Self;
    #[inline(always)]
    fn add(self, other: Self) -> Self {
        self.zip(other, |a, b| a + b)
    }
}

impl<const N: usize> Sub for LaneArray<N> {
    type Output = Self;
    #[inline(always)]
    fn sub(self, other: Self) -> Self {
        self.zip(other, |a, b| a - b)
    }
}

impl<const N: usize> Mul for LaneArray<N> {
    type Output = Self;
    #[inline(always)]
    fn mul(self, other: Self) -> Self {
        self.zip(other, |a, b| a * b)
    }
}

impl<const N: usize> Div for LaneArray<N> {
    type Output = Self;
    #[inline(always)]
    fn div(self, other: Self) -> Self {
        self.zip(other, |a, b| a / b)
    }
}

impl<const N: usize> Neg for LaneArray<N> {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        self.map(|a| -a)
    }
}

impl<const N: usize> FloatLanes for LaneArray<N> {
    const WIDTH: usize = N;

    #[inline(always)]
    fn splat(value: f32) -> Self {
        LaneArray([value; N])
    }

    #[inline(always)]
    fn from_fn<F: FnMut(usize) -> f32>(f: F) -> Self {
        LaneArray(std::array::from_fn(f))
    }

    #[inline(always)]
    fn lane(self, index: usize) -> f32 {
        self.0[index]
    }

    #[inline(always)]
    fn abs(self) -> Self {
        self.map(f32::abs)
    }

    #[inline(always)]
    fn max(self, other: Self) -> Self {
        self.zip(other, f32::max)
    }

    #[inline(always)]
    fn min(self, other: Self) -> Self {
        self.zip(other, f32::min)
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        self.map(f32::sqrt)
    }

    #[inline(always)]
    fn sin_cos(self) -> (Self, Self) {
        (self.map(f32::sin), self.map(f32::cos))
    }

    fn to_vec(self) -> Vec<f32> {
        self.0.to_vec()
    }
}
