// -*- mode: rust; -*-
//
// This file is part of ristretto255.
// Copyright (c) 2016-2021 isis agora lovecruft
// Copyright (c) 2016-2019 Henry de Valence
// See LICENSE for licensing information.
//
// Authors:
// - Isis Agora Lovecruft <isis@patternsinthevoid.net>
// - Henry de Valence <hdevalence@hdevalence.ca>

//! Code for fixed- and sliding-window functionality.
//!
//! All table lookups indexed by secret digits are linear scans: every
//! entry is compared against the digit and conditionally copied, so
//! that no memory address depends on secret data.

#![allow(non_snake_case)]

use core::fmt::Debug;

use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use crate::curve_models::AffineNielsPoint;
use crate::edwards::EdwardsPoint;
use crate::traits::Identity;

/// A lookup table of precomputed multiples of a point \\(P\\), used to
/// compute \\( xP \\) for \\( -8 \leq x \leq 8 \\) in constant time.
#[derive(Copy, Clone)]
pub struct LookupTableRadix16<T>(pub(crate) [T; 8]);

impl<T> LookupTableRadix16<T>
where
    T: Identity + ConditionallySelectable + ConditionallyNegatable,
{
    /// Given \\(-8 \leq x \leq 8\\), return \\(xP\\) in constant time.
    pub fn select(&self, x: i8) -> T {
        debug_assert!(x >= -8);
        debug_assert!(x <= 8);

        // Compute xabs = |x|
        let xmask = x >> 7;
        let xabs = (x + xmask) ^ xmask;

        // Set t = 0 * P = identity
        let mut t = T::identity();
        for j in 1..9 {
            // Copy `points[j-1] == j*P` onto `t` in constant time if `|x| == j`.
            let c = (xabs as u8).ct_eq(&(j as u8));
            t.conditional_assign(&self.0[j - 1], c);
        }
        // Now t == |x| * P.

        let neg_mask = Choice::from((xmask & 1) as u8);
        t.conditional_negate(neg_mask);
        // Now t == x * P.

        t
    }
}

impl<'a> From<&'a EdwardsPoint> for LookupTableRadix16<AffineNielsPoint> {
    fn from(P: &'a EdwardsPoint) -> Self {
        let mut points = [P.to_affine_niels(); 8];
        for j in 0..7 {
            points[j + 1] = (P + &points[j]).to_extended().to_affine_niels();
        }
        LookupTableRadix16(points)
    }
}

impl<T: Debug> Debug for LookupTableRadix16<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "LookupTableRadix16({:?})", self.0)
    }
}

/// A lookup table of precomputed multiples of a point \\(P\\), used to
/// compute \\( xP \\) for \\( -16 \leq x \leq 16 \\) in constant time
/// by the radix-32 variable-base multiplication.
#[derive(Copy, Clone)]
pub struct LookupTableRadix32<T>(pub(crate) [T; 16]);

impl<T> LookupTableRadix32<T>
where
    T: Identity + ConditionallySelectable + ConditionallyNegatable,
{
    /// Given \\(-16 \leq x \leq 16\\), return \\(xP\\) in constant time.
    pub fn select(&self, x: i8) -> T {
        debug_assert!(x >= -16);
        debug_assert!(x <= 16);

        let xmask = x >> 7;
        let xabs = (x + xmask) ^ xmask;

        let mut t = T::identity();
        for j in 1..17 {
            let c = (xabs as u8).ct_eq(&(j as u8));
            t.conditional_assign(&self.0[j - 1], c);
        }

        let neg_mask = Choice::from((xmask & 1) as u8);
        t.conditional_negate(neg_mask);

        t
    }
}

impl<'a> From<&'a EdwardsPoint> for LookupTableRadix32<EdwardsPoint> {
    fn from(P: &'a EdwardsPoint) -> Self {
        // points[j-1] = j * P, built by alternating doublings of the
        // already-computed even entries with single additions of P;
        // 16P is the doubling of 8P.
        let mut points = [*P; 16];
        for i in (2..16).step_by(2) {
            points[i - 1] = points[i / 2 - 1].double();
            points[i] = &points[i - 1] + P;
        }
        points[15] = points[7].double();
        LookupTableRadix32(points)
    }
}

impl<T: Debug> Debug for LookupTableRadix32<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "LookupTableRadix32({:?})", self.0)
    }
}

/// Holds odd multiples 1A, 3A, ..., 15A of a point A, for use by the
/// width-5 NAF variable-time multiplication.
#[derive(Copy, Clone)]
pub(crate) struct NafLookupTable5<T>(pub(crate) [T; 8]);

impl<T: Copy> NafLookupTable5<T> {
    /// Given public, odd \\( x \\) with \\( 0 < x < 2^4 \\), return \\(xA\\).
    pub fn select(&self, x: usize) -> T {
        debug_assert_eq!(x & 1, 1);
        debug_assert!(x < 16);

        self.0[x / 2]
    }
}

impl<'a> From<&'a EdwardsPoint> for NafLookupTable5<EdwardsPoint> {
    fn from(A: &'a EdwardsPoint) -> Self {
        let mut Ai = [*A; 8];
        let A2 = A.double();
        for i in 0..7 {
            Ai[i + 1] = &A2 + &Ai[i];
        }
        // Now Ai = [A, 3A, 5A, 7A, 9A, 11A, 13A, 15A]
        NafLookupTable5(Ai)
    }
}

impl<T: Debug> Debug for NafLookupTable5<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "NafLookupTable5({:?})", self.0)
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
