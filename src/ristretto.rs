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

//! An implementation of Ristretto, which provides a prime-order group
//! on top of Edwards25519.
//!
//! Ristretto is a modification of Mike Hamburg's Decaf scheme to work
//! with cofactor-8 curves, such as Curve25519.  Internally, a
//! `RistrettoPoint` is an Edwards point; two points are considered
//! equal when they differ by an element of the four-torsion, and the
//! canonical 32-byte encoding selects one distinguished representative
//! of each class.  The encoding and decoding routines, the
//! Elligator2 map and its inverse, and the equality test are all
//! branchless on secret data.

#![allow(non_snake_case)]

use core::fmt::Debug;
use core::ops::{Add, Mul, Neg, Sub};

use digest::consts::U64;
use digest::Digest;

use rand_core::{CryptoRng, RngCore};

use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;
use subtle::CtOption;

use crate::constants;
use crate::curve_models::CompletedPoint;
use crate::edwards::{EdwardsBasepointTable, EdwardsPoint};
use crate::field::FieldElement;
use crate::jacobi_quartic::JacobiPoint;
use crate::scalar::Scalar;
use crate::traits::Identity;

// ------------------------------------------------------------------------
// Compressed points
// ------------------------------------------------------------------------

/// A Ristretto point, in compressed wire format.
///
/// The Ristretto encoding is canonical, so two points are equal if and
/// only if their encodings are equal.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct CompressedRistretto(pub [u8; 32]);

impl CompressedRistretto {
    /// View this `CompressedRistretto` as an array of bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copy the bytes of this `CompressedRistretto`.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Attempt to decompress to a `RistrettoPoint`.
    ///
    /// # Return
    ///
    /// - `Some(RistrettoPoint)` if `self` was the canonical encoding of
    ///   a point;
    /// - `None` if `self` was not the canonical encoding of a point.
    ///
    /// All rejection conditions are folded into a single mask, and the
    /// coordinates are zeroed on failure, so that only the public
    /// validity bit is observable.
    pub fn decompress(&self) -> Option<RistrettoPoint> {
        // Step 1: load s and check that it is canonical and
        // non-negative.
        let s = FieldElement::from_bytes(&self.0);
        let s_encoding_is_canonical = s.to_bytes().ct_eq(&self.0);
        let s_is_negative = s.is_negative();

        // Step 2: recover the candidate coordinates
        //
        //   x = |2s / sqrt(-d y_den^2 - y_den^2 ... )|,  y = y_num * ...
        //
        // where y_num = 1 - s^2, y_den = 1 + s^2, and the shared
        // inverse square root witnesses that x exists at all.
        let one = FieldElement::ONE;
        let ss = s.square();
        let y_den = &one + &ss; // 1 + s^2
        let y_num = &one - &ss; // 1 - s^2
        let y_den_sq = y_den.square();
        let x_den_sq = -&(&(&constants::EDWARDS_D * &y_num.square()) + &y_den_sq);

        let (invsqrt_ok, isr) = (&x_den_sq * &y_den_sq).invsqrt_i();

        let x_den_inv = &isr * &y_den;
        let y_den_inv = &(&x_den_inv * &isr) * &x_den_sq;

        let x = (&(&s + &s) * &x_den_inv).abs();
        let y = &y_num * &y_den_inv;
        let t = &x * &y;

        let ok = s_encoding_is_canonical
            & !s_is_negative
            & invsqrt_ok
            & !t.is_negative()
            & !y.is_zero();

        let mut P = EdwardsPoint {
            X: x,
            Y: y,
            Z: one,
            T: t,
        };
        let zeroed = EdwardsPoint {
            X: FieldElement::ZERO,
            Y: FieldElement::ZERO,
            Z: FieldElement::ZERO,
            T: FieldElement::ZERO,
        };
        P.conditional_assign(&zeroed, !ok);

        if ok.into() {
            Some(RistrettoPoint(P))
        } else {
            None
        }
    }
}

impl Identity for CompressedRistretto {
    fn identity() -> CompressedRistretto {
        CompressedRistretto([0u8; 32])
    }
}

impl ConstantTimeEq for CompressedRistretto {
    fn ct_eq(&self, other: &CompressedRistretto) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl Debug for CompressedRistretto {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "CompressedRistretto: {:?}", self.as_bytes())
    }
}

// ------------------------------------------------------------------------
// Ristretto group elements
// ------------------------------------------------------------------------

/// A `RistrettoPoint` represents a point in the Ristretto group for
/// Curve25519.  Ristretto, a variant of Decaf, constructs a
/// prime-order group as a quotient group of the Edwards curve's point
/// group.
///
/// Internally, a `RistrettoPoint` is implemented as a wrapper type
/// around `EdwardsPoint`, with custom equality, compression, and
/// decompression routines to account for the quotient.
#[derive(Copy, Clone)]
pub struct RistrettoPoint(pub(crate) EdwardsPoint);

impl RistrettoPoint {
    /// Compress this point using the Ristretto encoding.
    pub fn compress(&self) -> CompressedRistretto {
        let X = &self.0.X;
        let Y = &self.0.Y;
        let Z = &self.0.Z;
        let T = &self.0.T;

        let u1 = &(Z + Y) * &(Z - Y);
        let u2 = X * Y;
        // The argument is a square for any even point, so the witness
        // bit of the inverse square root carries no information here.
        let isr = (&u1 * &u2.square()).invsqrt();
        let i1 = &isr * &u1;
        let i2 = &isr * &u2;
        let z_inv = &(&i1 * &i2) * T;

        // If T z_inv is negative, apply the torsion rotation
        // (x, y) -> (iy, ix) and use the rotated denominator.
        let rotate = (&z_inv * T).is_negative();
        let mut nx = Y * &constants::SQRT_M1;
        let mut ny = X * &constants::SQRT_M1;
        let mut den_inv = &constants::INVSQRT_A_MINUS_D * &i1;
        nx.conditional_assign(X, !rotate);
        ny.conditional_assign(Y, !rotate);
        den_inv.conditional_assign(&i2, !rotate);

        // Fix the sign of y so that the chosen representative has
        // non-negative x.
        let x_z_inv_is_negative = (&nx * &z_inv).is_negative();
        ny.conditional_negate(x_z_inv_is_negative);

        let s = (&(Z - &ny) * &den_inv).abs();

        CompressedRistretto(s.to_bytes())
    }

    /// Return the coset self + E\[4\], for debugging and testing the
    /// equivalence classes.
    pub fn coset4(&self) -> [EdwardsPoint; 4] {
        [
            self.0,
            &self.0 + &constants::FOUR_TORSION[1],
            &self.0 + &constants::FOUR_TORSION[2],
            &self.0 + &constants::FOUR_TORSION[3],
        ]
    }

    /// Computes the Ristretto Elligator2 map, from a field element to
    /// a group element.
    ///
    /// This method is not public because it's just used for hashing
    /// to a point, and direct callers would need to understand that
    /// the map is roughly 8:1.
    pub(crate) fn elligator_ristretto_flavor(r_0: &FieldElement) -> RistrettoPoint {
        let one = FieldElement::ONE;

        // r := i * r_0^2
        let r_0i = r_0 * &constants::SQRT_M1;
        let r = r_0 * &r_0i;

        // D := -((d*r)+1) * (r + d)
        let r_plus_d = &constants::EDWARDS_D + &r;
        let D = -&(&(&(&constants::EDWARDS_D * &r) + &one) * &r_plus_d);

        // N := -(d^2 - 1)(r + 1)
        let r_plus_one = &r + &one;
        let N = &constants::ONE_MINUS_D_SQUARED * &r_plus_one;

        // sqrt is the inverse square root of N*D, or of i*N*D when
        // N*D is not a square.
        let ND = &N * &D;
        let (ND_is_square, mut sqrt) = ND.invsqrt_i();

        let mut twiddle = one;
        twiddle.conditional_assign(&r_0i, !ND_is_square);
        let mut sgn = one;
        sgn.conditional_assign(&FieldElement::MINUS_ONE, !ND_is_square);
        sqrt = &sqrt * &twiddle;

        // s = sqrt * N
        let mut s = &sqrt * &N;

        // t = -sgn * sqrt * s * (r-1) * (d-1)^2 - 1
        let r_sub_one = &r - &one;
        let t = &(&(&(&(&(-&sgn) * &sqrt) * &s)
            * &constants::D_MINUS_ONE_SQUARED)
            * &r_sub_one)
            - &one;

        // The sign of s is forced: negate it exactly when its current
        // sign bit agrees with the squareness bit.
        let s_is_negative = s.is_negative();
        s.conditional_negate(!(s_is_negative ^ ND_is_square));

        // Map (s,t) on the Jacobi quartic to the Edwards curve:
        //
        //   x = 2s / (sqrt(-d-1) t),  y = (1-s^2) / (1+s^2),
        //
        // kept projective as the completed point
        // ((2s/sqrt(-d-1) : t), (1-s^2 : 1+s^2)).
        let s_sq = s.square();
        RistrettoPoint(
            CompletedPoint {
                X: &(&s + &s) * &constants::INVSQRT_A_MINUS_D,
                Y: &one - &s_sq,
                Z: t,
                T: &one + &s_sq,
            }
            .to_extended(),
        )
    }

    /// Find a point on the Jacobi quartic associated to each of the
    /// four points Ristretto-equivalent to `self`.
    ///
    /// There is one exception: for (0,-1) there is no point on the
    /// quartic and so we repeat one on the quartic equivalent to (0,1).
    fn to_jacobi_quartic_ristretto(&self) -> [JacobiPoint; 4] {
        let x2 = self.0.X.square(); // X^2
        let y2 = self.0.Y.square(); // Y^2
        let y4 = y2.square(); // Y^4
        let z2 = self.0.Z.square(); // Z^2
        let z_min_y = &self.0.Z - &self.0.Y; // Z - Y
        let z_pl_y = &self.0.Z + &self.0.Y; // Z + Y
        let z2_min_y2 = &z2 - &y2; // Z^2 - Y^2

        // gamma := 1/sqrt( Y^4 X^2 (Z^2 - Y^2) )
        let (_, gamma) = (&(&y4 * &x2) * &z2_min_y2).invsqrt_i();

        let den = &gamma * &y2;

        let s_over_x = &den * &z_min_y;
        let sp_over_xp = &den * &z_pl_y;

        let s0 = &s_over_x * &self.0.X;
        let s1 = &(-(&sp_over_xp)) * &self.0.X;

        // t_0 := 2/sqrt(-d-1) * Z * sOverX
        // t_1 := 2/sqrt(-d-1) * Z * spOverXp
        let tmp = &constants::DOUBLE_INVSQRT_A_MINUS_D * &self.0.Z;
        let mut t0 = &tmp * &s_over_x;
        let mut t1 = &tmp * &sp_over_xp;

        // den := -1/sqrt(1+d) (Y^2 - Z^2) gamma
        let den = &(&(-(&z2_min_y2)) * &constants::MINVSQRT_ONE_PLUS_D) * &gamma;

        // Same as before, but with the substitution (X, Y, Z) = (Y, X, i*Z)
        let iz = &constants::SQRT_M1 * &self.0.Z; // iZ
        let iz_min_x = &iz - &self.0.X; // iZ - X
        let iz_pl_x = &iz + &self.0.X; // iZ + X

        let s_over_y = &den * &iz_min_x;
        let sp_over_yp = &den * &iz_pl_x;

        let mut s2 = &s_over_y * &self.0.Y;
        let mut s3 = &(-(&sp_over_yp)) * &self.0.Y;

        // t_2 := 2/sqrt(-d-1) * i*Z * sOverY
        // t_3 := 2/sqrt(-d-1) * i*Z * spOverYp
        let tmp = &constants::DOUBLE_INVSQRT_A_MINUS_D * &iz;
        let mut t2 = &tmp * &s_over_y;
        let mut t3 = &tmp * &sp_over_yp;

        // Special case: X=0 or Y=0, i.e. the class of the identity.
        // Then return
        //
        //  (0,1)   (1, 2i/sqrt(-d-1))   (-1, 2i/sqrt(-d-1))
        //
        // Note that if X=0 or Y=0, then s_i = t_i = 0.
        let x_or_y_is_zero = self.0.X.is_zero() | self.0.Y.is_zero();
        t0.conditional_assign(&FieldElement::ONE, x_or_y_is_zero);
        t1.conditional_assign(&FieldElement::ONE, x_or_y_is_zero);
        t2.conditional_assign(&constants::DOUBLE_I_INVSQRT_A_MINUS_D, x_or_y_is_zero);
        t3.conditional_assign(&constants::DOUBLE_I_INVSQRT_A_MINUS_D, x_or_y_is_zero);
        s2.conditional_assign(&FieldElement::ONE, x_or_y_is_zero);
        s3.conditional_assign(&FieldElement::MINUS_ONE, x_or_y_is_zero);

        [
            JacobiPoint { S: s0, T: t0 },
            JacobiPoint { S: s1, T: t1 },
            JacobiPoint { S: s2, T: t2 },
            JacobiPoint { S: s3, T: t3 },
        ]
    }

    /// Computes the at most 8 positive field elements f such that
    /// `self == elligator_ristretto_flavor(f)`.
    ///
    /// The candidates appear in a fixed order: for each of the four
    /// Jacobi-quartic representatives of the class of `self`, first
    /// the representative itself, then its dual.  The other preimages
    /// of `self` are exactly the negatives of the returned values.
    pub fn elligator_inverse(&self) -> [CtOption<FieldElement>; 8] {
        // Elligator2 computes a point from a field element in two
        // steps: first it computes a (s,t) on the Jacobi quartic and
        // then computes the corresponding even point on the Edwards
        // curve.
        //
        // We invert in three steps.  Any Ristretto point has four
        // representatives as even Edwards points.  For each of those
        // even Edwards points, there are two points on the Jacobi
        // quartic that map to it.  Each of those eight points on the
        // Jacobi quartic might have an Elligator2 preimage.
        let jcs = self.to_jacobi_quartic_ristretto();

        [
            jcs[0].e_inv_positive(),
            jcs[0].dual().e_inv_positive(),
            jcs[1].e_inv_positive(),
            jcs[1].dual().e_inv_positive(),
            jcs[2].e_inv_positive(),
            jcs[2].dual().e_inv_positive(),
            jcs[3].e_inv_positive(),
            jcs[3].dual().e_inv_positive(),
        ]
    }

    /// Map a 32-byte buffer to a group element using the Ristretto
    /// Elligator2 map.  The buffer is interpreted as a field element
    /// (the 256th bit is ignored).
    ///
    /// In contrast to decompression, every buffer maps to a point, but
    /// the map is roughly 8:1, so it is *not* an encoding; use
    /// [`RistrettoPoint::elligator_inverse`] to enumerate preimages.
    pub fn map_to_curve(bytes: &[u8; 32]) -> RistrettoPoint {
        let r_0 = FieldElement::from_bytes(bytes);
        RistrettoPoint::elligator_ristretto_flavor(&r_0)
    }

    /// Derive a group element from arbitrary input, by hashing with
    /// `D` and feeding the first 32 bytes of the digest to the
    /// Elligator2 map.
    ///
    /// Takes a type parameter `D`, which is any `Digest` producing 64
    /// bytes of output; use SHA-512 unless a protocol requires
    /// otherwise.
    pub fn hash_from_bytes<D>(input: &[u8]) -> RistrettoPoint
    where
        D: Digest<OutputSize = U64>,
    {
        let mut hash = D::new();
        hash.update(input);
        RistrettoPoint::from_hash(hash)
    }

    /// Construct a group element from an existing `Digest` instance;
    /// see [`RistrettoPoint::hash_from_bytes`].
    pub fn from_hash<D>(hash: D) -> RistrettoPoint
    where
        D: Digest<OutputSize = U64>,
    {
        let digest = hash.finalize();
        let mut fe_bytes = [0u8; 32];
        fe_bytes.copy_from_slice(&digest.as_slice()[..32]);
        RistrettoPoint::map_to_curve(&fe_bytes)
    }

    /// Return a `RistrettoPoint` chosen uniformly at random using a
    /// user-provided RNG, by mapping 32 random bytes through
    /// Elligator2.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> RistrettoPoint {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        RistrettoPoint::map_to_curve(&bytes)
    }

    /// Variable-time scalar multiplication; see
    /// [`EdwardsPoint::vartime_mul`].  Use only when the scalar is
    /// public.
    pub fn vartime_mul(&self, scalar: &Scalar) -> RistrettoPoint {
        RistrettoPoint(self.0.vartime_mul(scalar))
    }
}

impl Identity for RistrettoPoint {
    fn identity() -> RistrettoPoint {
        RistrettoPoint(EdwardsPoint::identity())
    }
}

impl Default for RistrettoPoint {
    fn default() -> RistrettoPoint {
        RistrettoPoint::identity()
    }
}

// ------------------------------------------------------------------------
// Equality
// ------------------------------------------------------------------------

impl ConstantTimeEq for RistrettoPoint {
    /// Test equality between two `RistrettoPoint`s.
    ///
    /// The internal representatives may differ by an element of the
    /// four-torsion; the test is insensitive to this.
    fn ct_eq(&self, other: &RistrettoPoint) -> Choice {
        self.0.ristretto_eq(&other.0)
    }
}

impl Eq for RistrettoPoint {}

impl PartialEq for RistrettoPoint {
    fn eq(&self, other: &RistrettoPoint) -> bool {
        self.ct_eq(other).into()
    }
}

// ------------------------------------------------------------------------
// Arithmetic
// ------------------------------------------------------------------------

impl<'a, 'b> Add<&'b RistrettoPoint> for &'a RistrettoPoint {
    type Output = RistrettoPoint;
    fn add(self, other: &'b RistrettoPoint) -> RistrettoPoint {
        RistrettoPoint(&self.0 + &other.0)
    }
}

define_add_variants!(LHS = RistrettoPoint, RHS = RistrettoPoint, Output = RistrettoPoint);

impl<'a, 'b> Sub<&'b RistrettoPoint> for &'a RistrettoPoint {
    type Output = RistrettoPoint;
    fn sub(self, other: &'b RistrettoPoint) -> RistrettoPoint {
        RistrettoPoint(&self.0 - &other.0)
    }
}

define_sub_variants!(LHS = RistrettoPoint, RHS = RistrettoPoint, Output = RistrettoPoint);

impl<'a> Neg for &'a RistrettoPoint {
    type Output = RistrettoPoint;
    fn neg(self) -> RistrettoPoint {
        RistrettoPoint(-&self.0)
    }
}

impl Neg for RistrettoPoint {
    type Output = RistrettoPoint;
    fn neg(self) -> RistrettoPoint {
        -&self
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a RistrettoPoint {
    type Output = RistrettoPoint;
    /// Constant-time scalar multiplication: compute `scalar * self`.
    fn mul(self, scalar: &'b Scalar) -> RistrettoPoint {
        RistrettoPoint(&self.0 * scalar)
    }
}

define_mul_variants!(LHS = RistrettoPoint, RHS = Scalar, Output = RistrettoPoint);

impl<'a, 'b> Mul<&'b RistrettoPoint> for &'a Scalar {
    type Output = RistrettoPoint;
    /// Constant-time scalar multiplication: compute `self * point`.
    fn mul(self, point: &'b RistrettoPoint) -> RistrettoPoint {
        point * self
    }
}

define_mul_variants!(LHS = Scalar, RHS = RistrettoPoint, Output = RistrettoPoint);

// ------------------------------------------------------------------------
// Fixed-base precomputation
// ------------------------------------------------------------------------

/// A precomputed table of multiples of a basepoint, used to accelerate
/// fixed-base scalar multiplication.
///
/// The table is deterministic, read-only after construction, and
/// freely shareable between threads; see
/// [`crate::constants::RISTRETTO_BASEPOINT_TABLE`] for the table of
/// the standard basepoint.
#[derive(Copy, Clone)]
pub struct RistrettoBasepointTable(pub(crate) EdwardsBasepointTable);

impl RistrettoBasepointTable {
    /// Create a precomputed table of multiples of the given basepoint.
    pub fn create(basepoint: &RistrettoPoint) -> RistrettoBasepointTable {
        RistrettoBasepointTable(EdwardsBasepointTable::create(&basepoint.0))
    }

    /// Get the basepoint of this table.
    pub fn basepoint(&self) -> RistrettoPoint {
        RistrettoPoint(self.0.basepoint())
    }

    /// Variable-time fixed-base scalar multiplication; see
    /// [`EdwardsBasepointTable::vartime_mul`].  Use only when the
    /// scalar is public.
    pub fn vartime_mul(&self, scalar: &Scalar) -> RistrettoPoint {
        RistrettoPoint(self.0.vartime_mul(scalar))
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a RistrettoBasepointTable {
    type Output = RistrettoPoint;

    fn mul(self, scalar: &'b Scalar) -> RistrettoPoint {
        RistrettoPoint(&self.0 * scalar)
    }
}

impl<'a, 'b> Mul<&'a RistrettoBasepointTable> for &'b Scalar {
    type Output = RistrettoPoint;

    fn mul(self, basepoint_table: &'a RistrettoBasepointTable) -> RistrettoPoint {
        RistrettoPoint(self * &basepoint_table.0)
    }
}

// ------------------------------------------------------------------------
// Debug traits
// ------------------------------------------------------------------------

impl Debug for RistrettoPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "RistrettoPoint: {:?}", self.0)
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::Zeroize for RistrettoPoint {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::Zeroize for CompressedRistretto {
    fn zeroize(&mut self) {
        // The all-zero string is the canonical encoding of the
        // identity, so plain wiping leaves a valid value behind.
        self.0.zeroize();
    }
}

// ------------------------------------------------------------------------
// Serde
// ------------------------------------------------------------------------

#[cfg(feature = "serde")]
impl serde::Serialize for CompressedRistretto {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeTuple;
        let mut tup = serializer.serialize_tuple(32)?;
        for byte in self.as_bytes().iter() {
            tup.serialize_element(byte)?;
        }
        tup.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CompressedRistretto {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct CompressedRistrettoVisitor;

        impl<'de> serde::de::Visitor<'de> for CompressedRistrettoVisitor {
            type Value = CompressedRistretto;

            fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                formatter.write_str("32 bytes of data")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<CompressedRistretto, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut bytes = [0u8; 32];
                for (i, byte) in bytes.iter_mut().enumerate() {
                    *byte = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &"32 bytes"))?;
                }
                Ok(CompressedRistretto(bytes))
            }
        }

        deserializer.deserialize_tuple(32, CompressedRistrettoVisitor)
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants;
    use rand::rngs::OsRng;
    use rand::RngCore;
    use sha2::Sha512;

    #[test]
    fn scalarmult_ristrettopoint_works_both_ways() {
        let P = constants::RISTRETTO_BASEPOINT_POINT;
        let s = Scalar::from_u64(999);

        let P1 = &P * &s;
        let P2 = &s * &P;

        assert!(P1.compress().as_bytes() == P2.compress().as_bytes());
    }

    #[test]
    fn decompress_negative_s_fails() {
        // constants::EDWARDS_D is negative, so decompression should
        // fail as |d| != d.
        let bad_compressed = CompressedRistretto(constants::EDWARDS_D.to_bytes());
        assert!(bad_compressed.decompress().is_none());
    }

    #[test]
    fn decompress_id() {
        let compressed_id = CompressedRistretto::identity();
        let id = compressed_id.decompress().unwrap();
        assert_eq!(id, RistrettoPoint::identity());
    }

    #[test]
    fn compress_id() {
        let id = RistrettoPoint::identity();
        assert_eq!(id.compress(), CompressedRistretto::identity());
    }

    #[test]
    fn basepoint_roundtrip() {
        let bp_compressed_ristretto = constants::RISTRETTO_BASEPOINT_POINT.compress();
        let bp_recaf = bp_compressed_ristretto.decompress().unwrap();
        assert_eq!(bp_recaf, constants::RISTRETTO_BASEPOINT_POINT);
    }

    #[test]
    fn encodings_of_small_multiples_of_basepoint() {
        // Table of encodings of i*basepoint
        // Generated using ristretto.sage
        let compressed = [
            CompressedRistretto([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
            CompressedRistretto([226, 242, 174, 10, 106, 188, 78, 113, 168, 132, 169, 97, 197, 0, 81, 95, 88, 227, 11, 106, 165, 130, 221, 141, 182, 166, 89, 69, 224, 141, 45, 118]),
            CompressedRistretto([106, 73, 50, 16, 247, 73, 156, 209, 127, 236, 181, 16, 174, 12, 234, 35, 161, 16, 232, 213, 185, 1, 248, 172, 173, 211, 9, 92, 115, 163, 185, 25]),
            CompressedRistretto([148, 116, 31, 93, 93, 82, 117, 94, 206, 79, 35, 240, 68, 238, 39, 213, 209, 234, 30, 43, 209, 150, 180, 98, 22, 107, 22, 21, 42, 157, 2, 89]),
            CompressedRistretto([218, 128, 134, 39, 115, 53, 139, 70, 111, 250, 223, 224, 179, 41, 58, 179, 217, 253, 83, 197, 234, 108, 149, 83, 88, 245, 104, 50, 45, 175, 106, 87]),
            CompressedRistretto([232, 130, 177, 49, 1, 107, 82, 193, 211, 51, 112, 128, 24, 124, 247, 104, 66, 62, 252, 203, 181, 23, 187, 73, 90, 184, 18, 196, 22, 15, 244, 78]),
            CompressedRistretto([246, 71, 70, 211, 201, 43, 19, 5, 14, 216, 216, 2, 54, 167, 240, 0, 124, 59, 63, 150, 47, 91, 167, 147, 209, 154, 96, 30, 187, 29, 244, 3]),
            CompressedRistretto([68, 245, 53, 32, 146, 110, 200, 31, 189, 90, 56, 120, 69, 190, 183, 223, 133, 169, 106, 36, 236, 225, 135, 56, 189, 207, 166, 167, 130, 42, 23, 109]),
            CompressedRistretto([144, 50, 147, 216, 242, 40, 126, 190, 16, 226, 55, 77, 193, 165, 62, 11, 200, 135, 229, 146, 105, 159, 2, 208, 119, 213, 38, 60, 221, 85, 96, 28]),
            CompressedRistretto([2, 98, 42, 206, 143, 115, 3, 163, 28, 175, 198, 63, 143, 196, 143, 220, 22, 225, 200, 200, 210, 52, 178, 240, 214, 104, 82, 130, 169, 7, 96, 49]),
            CompressedRistretto([32, 112, 111, 215, 136, 178, 114, 10, 30, 210, 165, 218, 212, 149, 43, 1, 244, 19, 188, 240, 231, 86, 77, 232, 205, 200, 22, 104, 158, 45, 185, 95]),
            CompressedRistretto([188, 232, 63, 139, 165, 221, 47, 165, 114, 134, 76, 36, 186, 24, 16, 249, 82, 43, 198, 0, 74, 254, 149, 135, 122, 199, 50, 65, 202, 253, 171, 66]),
            CompressedRistretto([228, 84, 158, 225, 107, 154, 160, 48, 153, 202, 32, 140, 103, 173, 175, 202, 250, 76, 63, 62, 78, 83, 3, 222, 96, 38, 227, 202, 143, 248, 68, 96]),
            CompressedRistretto([170, 82, 224, 0, 223, 46, 22, 245, 95, 177, 3, 47, 195, 59, 196, 39, 66, 218, 214, 189, 90, 143, 192, 190, 1, 103, 67, 108, 89, 72, 80, 31]),
            CompressedRistretto([70, 55, 107, 128, 244, 9, 178, 157, 194, 181, 246, 240, 197, 37, 145, 153, 8, 150, 229, 113, 111, 65, 71, 124, 211, 0, 133, 171, 127, 16, 48, 30]),
            CompressedRistretto([224, 196, 24, 247, 200, 217, 196, 205, 215, 57, 91, 147, 234, 18, 79, 58, 217, 144, 33, 187, 104, 29, 252, 51, 2, 169, 217, 154, 46, 83, 230, 78]),
        ];
        let mut bp = RistrettoPoint::identity();
        for i in 0..16 {
            assert_eq!(bp.compress(), compressed[i]);
            bp = &bp + &constants::RISTRETTO_BASEPOINT_POINT;
        }
    }

    #[test]
    fn bad_encodings_are_rejected() {
        let bad_encodings = [
            // Non-canonical field encodings.
            "00ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
            "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f",
            "f3ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f",
            "edffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f",
            // Negative field elements.
            "0100000000000000000000000000000000000000000000000000000000000000",
            "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f",
            // s = p - 1, which gives y = 0.
            "ecffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f",
        ];
        for bad in bad_encodings.iter() {
            let mut bytes = [0u8; 32];
            bytes.copy_from_slice(&hex::decode(bad).unwrap());
            assert!(
                CompressedRistretto(bytes).decompress().is_none(),
                "encoding {} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn four_torsion_basepoint() {
        let bp = constants::RISTRETTO_BASEPOINT_POINT;
        let bp_coset = bp.coset4();
        for point in bp_coset.iter() {
            assert_eq!(bp, RistrettoPoint(*point));
            assert_eq!(RistrettoPoint(*point).compress(), bp.compress());
        }
    }

    #[test]
    fn four_torsion_random() {
        let mut rng = OsRng;
        for _ in 0..16 {
            let P = RistrettoPoint::random(&mut rng);
            for point in P.coset4().iter() {
                assert_eq!(P, RistrettoPoint(*point));
                assert_eq!(RistrettoPoint(*point).compress(), P.compress());
            }
        }
    }

    #[test]
    fn random_roundtrip() {
        let mut rng = OsRng;
        for _ in 0..32 {
            let P = RistrettoPoint::random(&mut rng);
            let compressed_P = P.compress();
            let Q = compressed_P.decompress().unwrap();
            assert_eq!(P, Q);
            assert_eq!(Q.compress(), compressed_P);
        }
    }

    #[test]
    fn elligator_vs_ristretto_sage() {
        // Test vectors extracted from ristretto.sage.
        //
        // Notice that all of the byte sequences have bit 255 set to 0;
        // this is because ristretto.sage does not mask the high bit of
        // a field element.  When the high bit is set, the
        // ristretto.sage elligator implementation gives different
        // results, since it takes a different field element as input.
        let bytes: [[u8; 32]; 16] = [
            [184, 249, 135, 49, 253, 123, 89, 113, 67, 160, 6, 239, 7, 105, 211, 41, 192, 249, 185, 57, 9, 102, 70, 198, 15, 127, 7, 26, 160, 102, 134, 71],
            [229, 14, 241, 227, 75, 9, 118, 60, 128, 153, 226, 21, 183, 217, 91, 136, 98, 0, 231, 156, 124, 77, 82, 139, 142, 134, 164, 169, 169, 62, 250, 52],
            [115, 109, 36, 220, 180, 223, 99, 6, 204, 169, 19, 29, 169, 68, 84, 23, 21, 109, 189, 149, 127, 205, 91, 102, 172, 35, 112, 35, 134, 69, 186, 34],
            [16, 49, 96, 107, 171, 199, 164, 9, 129, 16, 64, 62, 241, 63, 132, 173, 209, 160, 112, 215, 105, 50, 157, 81, 253, 105, 1, 154, 229, 25, 120, 83],
            [156, 131, 161, 162, 236, 251, 5, 187, 167, 171, 17, 178, 148, 210, 90, 207, 86, 21, 79, 161, 167, 215, 234, 1, 136, 242, 182, 248, 38, 85, 79, 86],
            [251, 177, 124, 54, 18, 101, 75, 235, 245, 186, 19, 46, 133, 157, 229, 64, 10, 136, 181, 185, 78, 144, 254, 167, 137, 49, 107, 10, 61, 10, 21, 25],
            [232, 193, 20, 68, 240, 77, 186, 77, 183, 40, 44, 86, 150, 31, 198, 212, 76, 81, 3, 217, 197, 8, 126, 128, 126, 152, 164, 208, 153, 44, 189, 77],
            [173, 229, 149, 177, 37, 230, 30, 69, 61, 56, 172, 190, 219, 115, 167, 194, 71, 134, 59, 75, 28, 244, 118, 26, 162, 97, 64, 16, 15, 189, 30, 64],
            [106, 71, 61, 107, 250, 117, 42, 151, 91, 202, 212, 100, 52, 188, 190, 21, 125, 218, 31, 18, 253, 241, 160, 133, 57, 242, 3, 164, 189, 68, 111, 75],
            [112, 204, 182, 90, 220, 198, 120, 73, 173, 107, 193, 17, 227, 40, 162, 36, 150, 141, 235, 55, 172, 183, 12, 39, 194, 136, 43, 153, 244, 118, 91, 89],
            [111, 24, 203, 123, 254, 189, 11, 162, 51, 196, 163, 136, 204, 143, 10, 222, 33, 112, 81, 205, 34, 35, 8, 66, 90, 6, 164, 58, 170, 177, 34, 25],
            [225, 183, 30, 52, 236, 82, 6, 183, 109, 25, 227, 181, 25, 82, 41, 193, 80, 77, 161, 80, 242, 203, 79, 204, 136, 245, 131, 110, 237, 106, 3, 58],
            [207, 246, 38, 56, 30, 86, 176, 90, 27, 200, 61, 42, 221, 27, 56, 210, 79, 178, 189, 120, 68, 193, 120, 167, 77, 185, 53, 197, 124, 128, 191, 126],
            [1, 136, 215, 80, 240, 46, 63, 147, 16, 244, 230, 207, 82, 189, 74, 50, 106, 169, 138, 86, 30, 131, 214, 202, 166, 125, 251, 228, 98, 24, 36, 21],
            [210, 207, 228, 56, 155, 116, 207, 54, 84, 195, 251, 215, 249, 199, 116, 75, 109, 239, 196, 251, 194, 246, 252, 228, 70, 146, 156, 35, 25, 39, 241, 4],
            [34, 116, 123, 9, 8, 40, 93, 189, 9, 103, 57, 103, 66, 227, 3, 2, 157, 107, 134, 219, 202, 74, 230, 154, 78, 107, 219, 195, 214, 14, 84, 80],
        ];
        let encoded_images: [CompressedRistretto; 16] = [
            CompressedRistretto([176, 157, 237, 97, 66, 29, 140, 166, 168, 94, 26, 157, 212, 216, 229, 160, 195, 246, 232, 239, 169, 112, 63, 193, 64, 32, 152, 69, 11, 190, 246, 86]),
            CompressedRistretto([234, 141, 77, 203, 181, 225, 250, 74, 171, 62, 15, 118, 78, 212, 150, 19, 131, 14, 188, 238, 194, 244, 141, 138, 166, 162, 83, 122, 228, 201, 19, 26]),
            CompressedRistretto([232, 231, 51, 92, 5, 168, 80, 36, 173, 179, 104, 68, 186, 149, 68, 40, 140, 170, 27, 103, 99, 140, 21, 242, 43, 62, 250, 134, 208, 255, 61, 89]),
            CompressedRistretto([208, 120, 140, 129, 177, 179, 237, 159, 252, 160, 28, 13, 206, 5, 211, 241, 192, 218, 1, 97, 130, 241, 20, 169, 119, 46, 246, 29, 79, 80, 77, 84]),
            CompressedRistretto([202, 11, 236, 145, 58, 12, 181, 157, 209, 6, 213, 88, 75, 147, 11, 119, 191, 139, 47, 142, 33, 36, 153, 193, 223, 183, 178, 8, 205, 120, 248, 110]),
            CompressedRistretto([26, 66, 231, 67, 203, 175, 116, 130, 32, 136, 62, 253, 215, 46, 5, 214, 166, 248, 108, 237, 216, 71, 244, 173, 72, 133, 82, 6, 143, 240, 104, 41]),
            CompressedRistretto([40, 157, 102, 96, 201, 223, 200, 197, 150, 181, 106, 83, 103, 126, 143, 33, 145, 230, 78, 6, 171, 146, 210, 143, 112, 5, 245, 23, 183, 138, 18, 120]),
            CompressedRistretto([220, 37, 27, 203, 239, 196, 176, 131, 37, 66, 188, 243, 185, 250, 113, 23, 167, 211, 154, 243, 168, 215, 54, 171, 159, 36, 195, 81, 13, 150, 43, 43]),
            CompressedRistretto([232, 121, 176, 222, 183, 196, 159, 90, 238, 193, 105, 52, 101, 167, 244, 170, 121, 114, 196, 6, 67, 152, 80, 185, 221, 7, 83, 105, 176, 208, 224, 121]),
            CompressedRistretto([226, 181, 183, 52, 241, 163, 61, 179, 221, 207, 220, 73, 245, 242, 25, 236, 67, 84, 179, 222, 167, 62, 167, 182, 32, 9, 92, 30, 165, 127, 204, 68]),
            CompressedRistretto([226, 119, 16, 242, 200, 139, 240, 87, 11, 222, 92, 146, 156, 243, 46, 119, 65, 59, 1, 248, 92, 183, 50, 175, 87, 40, 206, 53, 208, 220, 148, 13]),
            CompressedRistretto([70, 240, 79, 112, 54, 157, 228, 146, 74, 122, 216, 88, 232, 62, 158, 13, 14, 146, 115, 117, 176, 222, 90, 225, 244, 23, 94, 190, 150, 7, 136, 96]),
            CompressedRistretto([22, 71, 241, 103, 45, 193, 195, 144, 183, 101, 154, 50, 39, 68, 49, 110, 51, 44, 62, 0, 229, 113, 72, 81, 168, 29, 73, 106, 102, 40, 132, 24]),
            CompressedRistretto([196, 133, 107, 11, 130, 105, 74, 33, 204, 171, 133, 221, 174, 193, 241, 36, 38, 179, 196, 107, 219, 185, 181, 253, 228, 47, 155, 42, 231, 73, 41, 78]),
            CompressedRistretto([58, 255, 225, 197, 115, 208, 160, 143, 39, 197, 82, 69, 143, 235, 92, 170, 74, 40, 57, 11, 171, 227, 26, 185, 217, 207, 90, 185, 197, 190, 35, 60]),
            CompressedRistretto([88, 43, 92, 118, 223, 136, 105, 145, 238, 186, 115, 8, 214, 112, 153, 253, 38, 108, 205, 230, 157, 130, 11, 66, 101, 85, 253, 110, 110, 14, 148, 112]),
        ];
        for i in 0..16 {
            let r_0 = FieldElement::from_bytes(&bytes[i]);
            let Q = RistrettoPoint::elligator_ristretto_flavor(&r_0);
            assert_eq!(Q.compress(), encoded_images[i]);
        }
    }

    #[test]
    fn hash_from_bytes_vectors() {
        // Hash-to-group vectors: SHA-512, then Elligator2 on the first
        // 32 bytes of the digest.
        let vectors: [(&[u8], &str); 4] = [
            (
                b"test",
                "b01d60504aa5f4c5bd9a7541c457661f9a789d18cb4e136e91d3c953488bd208",
            ),
            (
                b"pep",
                "3286c8d171dec02e70549c280d62524430408a781efc07e4428d1735671d195b",
            ),
            (
                b"ristretto",
                "c2f6bb4c4dab8feab66eab09e77e79b36095c86b3cd1145b9a2703205858d712",
            ),
            (
                b"elligator",
                "784c727b1e8099eb94e5a8edbd260363567fdbd35106a7a29c8b809cd108b322",
            ),
        ];
        for (input, expected) in vectors {
            let P = RistrettoPoint::hash_from_bytes::<Sha512>(input);
            assert_eq!(hex::encode(P.compress().as_bytes()), expected);
        }
    }

    fn test_elligator_inverse_on(fe_bytes: [u8; 32]) {
        let fe = FieldElement::from_bytes(&fe_bytes);
        let P = RistrettoPoint::elligator_ristretto_flavor(&fe);
        for representative in P.coset4().iter() {
            let fes = RistrettoPoint(*representative).elligator_inverse();
            let mut found_original = false;
            for candidate in fes.iter() {
                if bool::from(candidate.is_some()) {
                    let r = candidate.unwrap();
                    // Every filled slot must map back to P.
                    assert_eq!(RistrettoPoint::elligator_ristretto_flavor(&r), P);
                    if r == fe {
                        found_original = true;
                    }
                }
            }
            assert!(
                found_original,
                "original preimage not found for fe = {:?}",
                fe_bytes
            );
        }
    }

    #[test]
    fn elligator_inverse_corner_cases() {
        // fe = +sqrt(i*d), the preimage of the s = 0, t = 1 point on
        // the Jacobi quartic; this lands in the identity class.
        test_elligator_inverse_on([
            168, 27, 92, 74, 203, 42, 48, 117, 170, 109, 234, 14, 45, 169, 188, 205, 21, 110,
            235, 115, 153, 84, 52, 117, 151, 235, 123, 244, 88, 85, 179, 5,
        ]);
    }

    #[test]
    fn elligator_inverse_identity_class_slots() {
        // fe = 0 maps to the s = 0, t = -1 point on the Jacobi
        // quartic, i.e. into the identity's class.
        let P = RistrettoPoint::map_to_curve(&[0u8; 32]);
        assert_eq!(P, RistrettoPoint::identity());

        // Inverting any representative of the identity class must
        // yield sqrt(i*d) for the two (0,1) quartic slots and report
        // no preimage for their (0,-1) duals; the remaining slots may
        // only hold preimages that map back into the class.
        for representative in P.coset4().iter() {
            let fes = RistrettoPoint(*representative).elligator_inverse();

            assert!(bool::from(fes[0].is_some()));
            assert_eq!(fes[0].unwrap(), constants::SQRT_ID);
            assert!(bool::from(fes[2].is_some()));
            assert_eq!(fes[2].unwrap(), constants::SQRT_ID);

            assert!(bool::from(fes[1].is_none()));
            assert!(bool::from(fes[3].is_none()));

            for candidate in fes.iter() {
                if bool::from(candidate.is_some()) {
                    let r = candidate.unwrap();
                    assert_eq!(RistrettoPoint::elligator_ristretto_flavor(&r), P);
                }
            }
        }
    }

    #[test]
    fn elligator_inverse_random() {
        let mut rng = OsRng;
        for _ in 0..16 {
            let mut fe_bytes = [0u8; 32];
            rng.fill_bytes(&mut fe_bytes);
            // Make the field element positive and canonical, so that
            // it can literally reappear among the positive preimages.
            fe_bytes[0] &= 254;
            fe_bytes[31] &= 63;
            test_elligator_inverse_on(fe_bytes);
        }
    }

    #[test]
    fn basepoint_table_vs_adhoc() {
        let mut rng = OsRng;
        let B = constants::RISTRETTO_BASEPOINT_POINT;
        let table = RistrettoBasepointTable::create(&B);
        assert_eq!(table.basepoint(), B);
        for _ in 0..64 {
            // Unreduced 253-bit scalars, to exercise the raw-bit path.
            let mut s_bytes = [0u8; 32];
            rng.fill_bytes(&mut s_bytes);
            s_bytes[31] &= 0b0001_1111;
            let s = Scalar::from_bits(s_bytes);

            let P1 = &table * &s;
            let P2 = &B * &s;
            let P3 = table.vartime_mul(&s);

            assert_eq!(P1.compress(), P2.compress());
            assert_eq!(P1.compress(), P3.compress());
        }
    }

    #[cfg(feature = "precomputed-tables")]
    #[test]
    fn precomputed_basepoint_table_matches() {
        let s = Scalar::from_u64(8475983295);
        let B = &constants::RISTRETTO_BASEPOINT_TABLE;
        assert_eq!(
            (&**B * &s).compress(),
            (&constants::RISTRETTO_BASEPOINT_POINT * &s).compress()
        );
    }

    #[test]
    fn scalar_mul_group_laws() {
        let mut rng = OsRng;
        let B = constants::RISTRETTO_BASEPOINT_POINT;
        for _ in 0..8 {
            let s = Scalar::random(&mut rng);
            let t = Scalar::random(&mut rng);
            let P = RistrettoPoint::random(&mut rng);

            // s(tP) = (st)P
            assert_eq!(&(&P * &t) * &s, &P * &(&s * &t));
            // (s+t)B = sB + tB
            assert_eq!(&B * &(&s + &t), &(&B * &s) + &(&B * &t));
            // Constant-time and variable-time multiplications agree.
            assert_eq!(P.vartime_mul(&s), &P * &s);
        }
    }

    #[test]
    fn identity_laws() {
        let mut rng = OsRng;
        let P = RistrettoPoint::random(&mut rng);
        let id = RistrettoPoint::identity();
        assert_eq!(&P + &id, P);
        assert_eq!(&P - &P, id);
        assert_eq!(&P + &(-&P), id);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_compressed_roundtrip() {
        let compressed = constants::RISTRETTO_BASEPOINT_POINT.compress();
        let json = serde_json::to_string(&compressed).unwrap();
        let parsed: CompressedRistretto = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, compressed);
    }
}
