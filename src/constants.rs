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

//! This module contains various constants (such as curve parameters
//! and useful field elements like `sqrt(-1)`), as well as the
//! basepoint, the four-torsion representatives used for testing
//! Ristretto equivalence, and the pre-computed basepoint table.

use crate::edwards::EdwardsPoint;
use crate::field::FieldElement;
use crate::ristretto::RistrettoPoint;
use crate::scalar::Scalar;

#[cfg(feature = "precomputed-tables")]
use crate::ristretto::RistrettoBasepointTable;
#[cfg(feature = "precomputed-tables")]
use std::sync::LazyLock;

/// Edwards `d` value, equal to `-121665/121666 mod p`.
pub(crate) const EDWARDS_D: FieldElement = FieldElement([
    -10913610, 13857413, -15372611, 6949391, 114729,
    -8787816, -6275908, -3247719, -18696448, -12055116,
]);

/// Edwards `2*d` value, equal to `2*(-121665/121666) mod p`.
pub(crate) const EDWARDS_D2: FieldElement = FieldElement([
    -21827239, -5839606, -30745221, 13898782, 229458,
    15978800, -12551817, -6495438, 29715968, 9444199,
]);

/// Precomputed value of one of the square roots of -1 (mod p).
pub(crate) const SQRT_M1: FieldElement = FieldElement([
    -32595792, -7943725, 9377950, 3500415, 12389472,
    -272473, -25146209, -2005654, 326686, 11406482,
]);

/// `= 1/sqrt(a-d)`, where `a = -1 (mod p)`, `d` are the Edwards curve
/// parameters.  This is the root the Elligator2 bridge is defined
/// with.
pub(crate) const INVSQRT_A_MINUS_D: FieldElement = FieldElement([
    -6111485, -4156064, 27798727, -12243468, 25904040,
    -120897, -20826367, 7060776, -6093568, 1986012,
]);

/// `= (d-1)^2`.
pub(crate) const D_MINUS_ONE_SQUARED: FieldElement = FieldElement([
    15551795, -11097455, -13425098, -10125071, -11896535,
    10178284, -26634327, 4729244, -5282110, -10116402,
]);

/// `= 1 - d^2`.
pub(crate) const ONE_MINUS_D_SQUARED: FieldElement = FieldElement([
    6275446, -16617371, -22938544, -3773710, 11667077,
    7397348, -27922721, 1766195, -24433858, 672203,
]);

/// `= sqrt(i*d)`, where `i = +sqrt(-1)` and `d` is the Edwards curve
/// parameter.  The sole Elligator2 preimage of the s = 0, t = 1 point
/// on the Jacobi quartic.
pub(crate) const SQRT_ID: FieldElement = FieldElement([
    39590824, 701138, 28659366, 23623507, 53932708,
    32206357, 36326585, 24309414, 26167230, 1494357,
]);

/// `= (d+1)/(d-1)`.
pub(crate) const DP1_OVER_DM1: FieldElement = FieldElement([
    58833708, 32184294, 62457071, 26110240, 19032991,
    27203620, 7122892, 18068959, 51019405, 3776288,
]);

/// `= 2/sqrt(a-d)`, in the sign convention of the Jacobi-quartic
/// conversion formulas.
pub(crate) const DOUBLE_INVSQRT_A_MINUS_D: FieldElement = FieldElement([
    54885894, 25242303, 55597453, 9067496, 51808079,
    33312638, 25456129, 14121551, 54921728, 3972023,
]);

/// `= 2i/sqrt(a-d)`, where `i = +sqrt(-1)`, in the sign convention of
/// the Jacobi-quartic conversion formulas.
pub(crate) const DOUBLE_I_INVSQRT_A_MINUS_D: FieldElement = FieldElement([
    58178520, 23970840, 26444491, 29801899, 41064376,
    743696, 2900628, 27920316, 41968995, 5270573,
]);

/// `= -1/sqrt(1+d)`.
pub(crate) const MINVSQRT_ONE_PLUS_D: FieldElement = FieldElement([
    38019585, 4791795, 20332186, 18653482, 46576675,
    33182583, 65658549, 2817057, 12569934, 30919145,
]);

/// The Ed25519 basepoint, with y = 4/5.
pub const ED25519_BASEPOINT_POINT: EdwardsPoint = EdwardsPoint {
    X: FieldElement([
        -14297830, -7645148, 16144683, -16471763, 27570974,
        -2696100, -26142465, 8378389, 20764389, 8758491,
    ]),
    Y: FieldElement([
        -26843541, -6710886, 13421773, -13421773, 26843546,
        6710886, -13421773, 13421773, -26843546, -6710886,
    ]),
    Z: FieldElement([1, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
    T: FieldElement([
        28827062, -6116119, -27349572, 244363, 8635006,
        11264893, 19351346, 13413597, 16611511, -6414980,
    ]),
};

/// The four-torsion subgroup Ɛ\[4\].
///
/// The `i`th element of the array is `i*P`, where `P` is a point of
/// order 4 generating Ɛ\[4\].  Adding any of these to a point leaves
/// its Ristretto equivalence class unchanged.
pub const FOUR_TORSION: [EdwardsPoint; 4] = [
    EdwardsPoint {
        X: FieldElement([0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
        Y: FieldElement([1, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
        Z: FieldElement([1, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
        T: FieldElement([0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
    },
    EdwardsPoint {
        X: FieldElement([
            32595792, 7943725, -9377950, -3500415, -12389472,
            272473, 25146209, 2005654, -326686, -11406482,
        ]),
        Y: FieldElement([0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
        Z: FieldElement([1, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
        T: FieldElement([0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
    },
    EdwardsPoint {
        X: FieldElement([0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
        Y: FieldElement([-1, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
        Z: FieldElement([1, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
        T: FieldElement([0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
    },
    EdwardsPoint {
        X: FieldElement([
            -32595792, -7943725, 9377950, 3500415, 12389472,
            -272473, -25146209, -2005654, 326686, 11406482,
        ]),
        Y: FieldElement([0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
        Z: FieldElement([1, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
        T: FieldElement([0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
    },
];

/// The Ristretto basepoint, i.e. the Ed25519 basepoint seen as a
/// Ristretto group element.
pub const RISTRETTO_BASEPOINT_POINT: RistrettoPoint = RistrettoPoint(ED25519_BASEPOINT_POINT);

/// `l` is the order of the Ristretto group and of the basepoint, i.e.
/// `2^252 + 27742317777372353535851937790883648493`, as raw bytes.
///
/// Note that `l` itself is not in canonical range, so this constant is
/// not a valid scalar value; it exists for boundary tests and the
/// negation borrow chain.
pub const BASEPOINT_ORDER: Scalar = Scalar([
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58,
    0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde, 0x14,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
]);

/// `l - 2`, the Fermat exponent for scalar inversion.
pub(crate) const L_MINUS_2: Scalar = Scalar([
    0xeb, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58,
    0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde, 0x14,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
]);

/// The Ristretto basepoint table, computed once on first use and
/// immutable afterwards.  Initialization costs a few hundred point
/// operations plus 256 field inversions; every later fixed-base scalar
/// multiplication through it is roughly four times faster than the
/// variable-base route.
#[cfg(feature = "precomputed-tables")]
pub static RISTRETTO_BASEPOINT_TABLE: LazyLock<RistrettoBasepointTable> =
    LazyLock::new(|| RistrettoBasepointTable::create(&RISTRETTO_BASEPOINT_POINT));

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::field::FieldElement;

    #[test]
    fn d_constants() {
        assert_eq!(EDWARDS_D2, &EDWARDS_D + &EDWARDS_D);
        let one = FieldElement::ONE;
        assert_eq!(
            D_MINUS_ONE_SQUARED,
            (&EDWARDS_D - &one).square()
        );
        assert_eq!(
            ONE_MINUS_D_SQUARED,
            &one - &EDWARDS_D.square()
        );
        assert_eq!(
            DP1_OVER_DM1,
            &(&EDWARDS_D + &one) * &(&EDWARDS_D - &one).invert()
        );
    }

    #[test]
    fn sqrt_minus_one() {
        assert_eq!(SQRT_M1.square(), FieldElement::MINUS_ONE);
    }

    #[test]
    fn sqrt_id() {
        assert_eq!(SQRT_ID, (&SQRT_M1 * &EDWARDS_D).sqrt());
    }

    #[test]
    fn invsqrt_a_minus_d_family() {
        let one = FieldElement::ONE;
        let a_minus_d = -&(&one + &EDWARDS_D);
        let four = &(&one + &one) + &(&one + &one);

        // Each member, squared, against the value it inverts.
        assert_eq!(&INVSQRT_A_MINUS_D.square() * &a_minus_d, one);
        assert_eq!(&DOUBLE_INVSQRT_A_MINUS_D.square() * &a_minus_d, four);
        assert_eq!(
            DOUBLE_I_INVSQRT_A_MINUS_D,
            &DOUBLE_INVSQRT_A_MINUS_D * &SQRT_M1
        );
    }

    #[test]
    fn minvsqrt_one_plus_d() {
        let (is_sq, r) = (&EDWARDS_D + &FieldElement::ONE).invsqrt_i();
        assert_eq!(is_sq.unwrap_u8(), 1);
        assert_eq!(MINVSQRT_ONE_PLUS_D, -&r);
    }

    #[test]
    fn basepoint_has_order_l() {
        // l * B = identity, and no smaller listed factor annihilates B.
        use crate::traits::Identity;
        let b = ED25519_BASEPOINT_POINT;
        let l_minus_1 = crate::scalar::Scalar::ZERO - crate::scalar::Scalar::ONE;
        let almost = &b * &l_minus_1;
        assert_eq!(&almost + &b, EdwardsPoint::identity());
    }

    #[test]
    fn four_torsion_structure() {
        use crate::traits::Identity;
        let t1 = FOUR_TORSION[1];
        let t2 = FOUR_TORSION[2];
        let t3 = FOUR_TORSION[3];
        assert_eq!(FOUR_TORSION[0], EdwardsPoint::identity());
        assert_eq!(t1.double(), t2);
        assert_eq!(t2.double(), EdwardsPoint::identity());
        assert_eq!(&t1 + &t3, EdwardsPoint::identity());
        assert_eq!(-&t1, t3);
    }
}
