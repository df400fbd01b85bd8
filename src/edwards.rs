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

//! Group operations on the Edwards form of Curve25519.
//!
//! An `EdwardsPoint` is a point in extended twisted Edwards
//! coordinates (X:Y:Z:T) with x = X/Z, y = Y/Z, X·Y = Z·T.  Doubling
//! and addition pass through the completed 𝗣¹×𝗣¹ model and are
//! converted back immediately; see `curve_models` for the
//! representations and the mixed-addition formulas.
//!
//! Note that the Edwards points themselves are *not* a prime-order
//! group; the `ristretto` module quotients away the cofactor.  This
//! module is exposed for the benefit of users who need the underlying
//! curve, e.g. for testing equivalence classes.

#![allow(non_snake_case)]

use core::fmt::Debug;
use core::ops::{Add, Mul, Neg, Sub};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use crate::constants;
use crate::curve_models::{AffineNielsPoint, CompletedPoint};
use crate::field::FieldElement;
use crate::scalar::Scalar;
use crate::traits::Identity;
use crate::window::{LookupTableRadix16, LookupTableRadix32, NafLookupTable5};

// ------------------------------------------------------------------------
// Point representation
// ------------------------------------------------------------------------

/// An `EdwardsPoint` represents a point on the Edwards form of
/// Curve25519, in extended twisted Edwards coordinates.
#[derive(Copy, Clone)]
pub struct EdwardsPoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T: FieldElement,
}

// ------------------------------------------------------------------------
// Constructors
// ------------------------------------------------------------------------

impl Identity for EdwardsPoint {
    fn identity() -> EdwardsPoint {
        EdwardsPoint {
            X: FieldElement::ZERO,
            Y: FieldElement::ONE,
            Z: FieldElement::ONE,
            T: FieldElement::ZERO,
        }
    }
}

// ------------------------------------------------------------------------
// Constant-time assignment and equality
// ------------------------------------------------------------------------

impl ConditionallySelectable for EdwardsPoint {
    fn conditional_select(a: &EdwardsPoint, b: &EdwardsPoint, choice: Choice) -> EdwardsPoint {
        EdwardsPoint {
            X: FieldElement::conditional_select(&a.X, &b.X, choice),
            Y: FieldElement::conditional_select(&a.Y, &b.Y, choice),
            Z: FieldElement::conditional_select(&a.Z, &b.Z, choice),
            T: FieldElement::conditional_select(&a.T, &b.T, choice),
        }
    }
}

impl ConstantTimeEq for EdwardsPoint {
    /// Exact point equality, by cross-multiplying out the projective
    /// factors.  This is *not* Ristretto equality; use
    /// [`crate::ristretto::RistrettoPoint`] comparison for equality of
    /// group elements.
    fn ct_eq(&self, other: &EdwardsPoint) -> Choice {
        (&self.X * &other.Z).ct_eq(&(&other.X * &self.Z))
            & (&self.Y * &other.Z).ct_eq(&(&other.Y * &self.Z))
    }
}

impl Eq for EdwardsPoint {}

impl PartialEq for EdwardsPoint {
    fn eq(&self, other: &EdwardsPoint) -> bool {
        self.ct_eq(other).into()
    }
}

// ------------------------------------------------------------------------
// Point conversions
// ------------------------------------------------------------------------

impl EdwardsPoint {
    /// Dehomogenize to an `AffineNielsPoint`.  Costs one inversion;
    /// used when building lookup tables.
    pub(crate) fn to_affine_niels(&self) -> AffineNielsPoint {
        let recip = self.Z.invert();
        let x = &self.X * &recip;
        let y = &self.Y * &recip;
        let xy2d = &(&x * &y) * &constants::EDWARDS_D2;
        AffineNielsPoint {
            y_plus_x: &y + &x,
            y_minus_x: &y - &x,
            xy2d,
        }
    }

    /// Equality of the Ristretto equivalence classes containing `self`
    /// and `other`, i.e. equality up to the four-torsion.
    pub(crate) fn ristretto_eq(&self, other: &EdwardsPoint) -> Choice {
        let X1Y2 = &self.X * &other.Y;
        let Y1X2 = &self.Y * &other.X;
        let X1X2 = &self.X * &other.X;
        let Y1Y2 = &self.Y * &other.Y;

        X1Y2.ct_eq(&Y1X2) | X1X2.ct_eq(&Y1Y2)
    }
}

// ------------------------------------------------------------------------
// Doubling
// ------------------------------------------------------------------------

impl EdwardsPoint {
    /// Double this point, staying in the completed model.
    pub(crate) fn double_completed(&self) -> CompletedPoint {
        let a = self.X.square();
        let b = self.Y.square();
        let c = self.Z.square2();
        let d = -&a;

        let X = &(&(&self.X + &self.Y).square() - &a) - &b;
        let Z = &d + &b;
        let T = &Z - &c;
        let Y = &d - &b;

        CompletedPoint { X, Y, Z, T }
    }

    /// Add this point to itself.
    pub fn double(&self) -> EdwardsPoint {
        self.double_completed().to_extended()
    }

    /// Compute \\(2^k P\\) by successive doublings.
    pub(crate) fn mul_by_pow_2(&self, k: u32) -> EdwardsPoint {
        debug_assert!(k > 0);
        let mut P = *self;
        for _ in 0..k {
            P = P.double();
        }
        P
    }
}

// ------------------------------------------------------------------------
// Addition and Subtraction
// ------------------------------------------------------------------------

impl EdwardsPoint {
    /// Add another point, staying in the completed model.
    pub(crate) fn add_completed(&self, other: &EdwardsPoint) -> CompletedPoint {
        let a = &(&self.Y - &self.X) * &(&other.Y - &other.X);
        let b = &(&self.X + &self.Y) * &(&other.X + &other.Y);
        let c = &(&self.T * &other.T) * &constants::EDWARDS_D2;
        let zz = &self.Z * &other.Z;
        let dd = &zz + &zz;

        CompletedPoint {
            X: &b - &a,
            Y: &b + &a,
            Z: &dd + &c,
            T: &dd - &c,
        }
    }
}

impl<'a, 'b> Add<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    fn add(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        self.add_completed(other).to_extended()
    }
}

define_add_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint, Output = EdwardsPoint);

impl<'a, 'b> Sub<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    fn sub(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        self.add_completed(&-other).to_extended()
    }
}

define_sub_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint, Output = EdwardsPoint);

// ------------------------------------------------------------------------
// Negation
// ------------------------------------------------------------------------

impl<'a> Neg for &'a EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        EdwardsPoint {
            X: -(&self.X),
            Y: self.Y,
            Z: self.Z,
            T: -(&self.T),
        }
    }
}

impl Neg for EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        -&self
    }
}

// ------------------------------------------------------------------------
// Scalar multiplication
// ------------------------------------------------------------------------

impl<'a, 'b> Mul<&'b Scalar> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    /// Constant-time variable-base scalar multiplication: compute
    /// `scalar * self`.
    ///
    /// The scalar is rewritten as 51 signed base-32 digits; the lookup
    /// of each window is a full-table scan with masked selection.
    fn mul(self, scalar: &'b Scalar) -> EdwardsPoint {
        let lookup_table = LookupTableRadix32::<EdwardsPoint>::from(self);
        let digits = scalar.as_radix_32();
        let mut P = EdwardsPoint::identity();
        for i in (0..51).rev() {
            P = P.mul_by_pow_2(5);
            P = &P + &lookup_table.select(digits[i]);
        }
        P
    }
}

define_mul_variants!(LHS = EdwardsPoint, RHS = Scalar, Output = EdwardsPoint);

impl<'a, 'b> Mul<&'b EdwardsPoint> for &'a Scalar {
    type Output = EdwardsPoint;
    /// Constant-time variable-base scalar multiplication: compute
    /// `self * point`.
    fn mul(self, point: &'b EdwardsPoint) -> EdwardsPoint {
        point * self
    }
}

define_mul_variants!(LHS = Scalar, RHS = EdwardsPoint, Output = EdwardsPoint);

impl EdwardsPoint {
    /// Variable-time scalar multiplication.
    ///
    /// Roughly twice as fast as the `Mul` implementation, but the
    /// execution trace depends on the scalar: use only when the scalar
    /// is public.
    pub fn vartime_mul(&self, scalar: &Scalar) -> EdwardsPoint {
        let naf = scalar.non_adjacent_form();
        let table = NafLookupTable5::<EdwardsPoint>::from(self);

        // Skip the zero digits above the most significant one.
        let mut i = 255;
        loop {
            if naf[i] != 0 {
                break;
            }
            if i == 0 {
                return EdwardsPoint::identity();
            }
            i -= 1;
        }

        let mut P = EdwardsPoint::identity();
        loop {
            P = P.double();
            if naf[i] > 0 {
                P = &P + &table.select(naf[i] as usize);
            } else if naf[i] < 0 {
                P = &P - &table.select(-naf[i] as usize);
            }
            if i == 0 {
                break;
            }
            i -= 1;
        }
        P
    }
}

// ------------------------------------------------------------------------
// Fixed-base precomputation
// ------------------------------------------------------------------------

/// A precomputed table of multiples of a basepoint.
///
/// Row \\(i\\) of the table stores the Niels forms of
/// \\(j \cdot 256^i \cdot B\\) for \\(1 \leq j \leq 8\\) — 32 rows of
/// 8 points.  The table is read-only after construction and may be
/// shared freely between threads.
#[derive(Copy, Clone)]
pub struct EdwardsBasepointTable(pub(crate) [LookupTableRadix16<AffineNielsPoint>; 32]);

impl EdwardsBasepointTable {
    /// Create a table of precomputed multiples of `basepoint`.
    ///
    /// Deterministic; the same basepoint always yields the same table.
    pub fn create(basepoint: &EdwardsPoint) -> EdwardsBasepointTable {
        let mut table =
            EdwardsBasepointTable([LookupTableRadix16([AffineNielsPoint::identity(); 8]); 32]);
        let mut P = *basepoint;
        for i in 0..32 {
            // P = 256^i * B
            table.0[i] = LookupTableRadix16::from(&P);
            P = P.mul_by_pow_2(8);
        }
        table
    }

    /// Get the basepoint of this table.
    pub fn basepoint(&self) -> EdwardsPoint {
        // self.0[0].select(1) = 1 * (256^0) * B
        (&EdwardsPoint::identity() + &self.0[0].select(1)).to_extended()
    }

    /// The constant-time fixed-base multiplication.
    ///
    /// Write the scalar in 64 signed radix-16 digits
    /// \\( s = \sum a_i 16^i \\) and split the sum into even and odd
    /// powers:
    ///
    /// \\( s B = (\sum a_{2i} 256^i) B + 16 (\sum a_{2i+1} 256^i) B, \\)
    ///
    /// so one pass over the odd digits, four doublings, and one pass
    /// over the even digits cover the whole scalar with 32 table rows.
    fn basepoint_mul(&self, scalar: &Scalar) -> EdwardsPoint {
        let a = scalar.as_radix_16();

        let mut P = EdwardsPoint::identity();

        for i in (0..64).filter(|x| x % 2 == 1) {
            P = (&P + &self.0[i / 2].select(a[i])).to_extended();
        }

        P = P.mul_by_pow_2(4);

        for i in (0..64).filter(|x| x % 2 == 0) {
            P = (&P + &self.0[i / 2].select(a[i])).to_extended();
        }

        P
    }

    /// Variable-time fixed-base multiplication.
    ///
    /// The same two-pass digit walk as the constant-time version, but
    /// table rows are indexed directly and zero digits are skipped:
    /// use only when the scalar is public.
    pub fn vartime_mul(&self, scalar: &Scalar) -> EdwardsPoint {
        let a = scalar.as_radix_16();

        let mut P = EdwardsPoint::identity();

        for i in (1..64).step_by(2) {
            P = self.vartime_mixed_add(&P, i / 2, a[i]);
        }

        P = P.mul_by_pow_2(4);

        for i in (0..64).step_by(2) {
            P = self.vartime_mixed_add(&P, i / 2, a[i]);
        }

        P
    }

    fn vartime_mixed_add(&self, P: &EdwardsPoint, row: usize, digit: i8) -> EdwardsPoint {
        if digit > 0 {
            (P + &self.0[row].0[(digit - 1) as usize]).to_extended()
        } else if digit < 0 {
            (P - &self.0[row].0[(-digit - 1) as usize]).to_extended()
        } else {
            *P
        }
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a EdwardsBasepointTable {
    type Output = EdwardsPoint;

    /// Construct an `EdwardsPoint` from a `Scalar`, `scalar`, by
    /// computing the multiple `scalar * B` of this basepoint `B`.
    fn mul(self, scalar: &'b Scalar) -> EdwardsPoint {
        self.basepoint_mul(scalar)
    }
}

impl<'a, 'b> Mul<&'a EdwardsBasepointTable> for &'b Scalar {
    type Output = EdwardsPoint;

    /// Construct an `EdwardsPoint` from a `Scalar`, `self`, by
    /// computing the multiple `self * B` of the basepoint `B`.
    fn mul(self, basepoint_table: &'a EdwardsBasepointTable) -> EdwardsPoint {
        basepoint_table * self
    }
}

// ------------------------------------------------------------------------
// Debug traits
// ------------------------------------------------------------------------

impl Debug for EdwardsPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "EdwardsPoint{{\n\tX: {:?},\n\tY: {:?},\n\tZ: {:?},\n\tT: {:?}\n}}",
            &self.X, &self.Y, &self.Z, &self.T
        )
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::Zeroize for EdwardsPoint {
    fn zeroize(&mut self) {
        use zeroize::Zeroize;
        self.X.zeroize();
        self.Y.zeroize();
        self.Z.zeroize();
        self.T.zeroize();
        *self = EdwardsPoint::identity();
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
