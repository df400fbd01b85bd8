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

//! Field arithmetic modulo \\(p = 2\^{255} - 19\\).
//!
//! A `FieldElement` is represented in radix \\(2\^{25.5}\\) as ten
//! signed 32-bit limbs \\(h_0, \ldots, h_9\\) with value
//! \\( \sum h_i 2\^{\lceil 25.5 i \rceil} \\), so that limbs at even
//! indices carry 26 bits and limbs at odd indices carry 25 bits.
//! Operations produce unnormalized limbs and run a single carry chain
//! to bring them back below \\(1.01 \cdot 2\^{25}\\) (even) and
//! \\(1.01 \cdot 2\^{24}\\) (odd).
//!
//! Serialization always produces the canonical representative in
//! \\([0, p)\\); deserialization ignores the 256th bit.

use core::fmt::Debug;
use core::ops::{Add, Mul, Neg, Sub};

use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use crate::constants;

/// A `FieldElement` represents an element of the field
/// \\( \mathbb Z / (2\^{255} - 19)\\).
#[derive(Copy, Clone)]
pub struct FieldElement(pub(crate) [i32; 10]);

/// Interpret a 3-byte little-endian slice prefix as an `i64`.
pub(crate) fn load3(input: &[u8]) -> i64 {
    (input[0] as i64) | ((input[1] as i64) << 8) | ((input[2] as i64) << 16)
}

/// Interpret a 4-byte little-endian slice prefix as an `i64`.
pub(crate) fn load4(input: &[u8]) -> i64 {
    (input[0] as i64)
        | ((input[1] as i64) << 8)
        | ((input[2] as i64) << 16)
        | ((input[3] as i64) << 24)
}

impl FieldElement {
    /// The additive identity.
    pub const ZERO: FieldElement = FieldElement([0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    /// The multiplicative identity.
    pub const ONE: FieldElement = FieldElement([1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    /// The element `-1 (mod p)`.
    pub const MINUS_ONE: FieldElement = FieldElement([-1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

    /// Carry unnormalized 64-bit coefficients back into ten bounded
    /// limbs.  The chain runs 0→1→⋯→9, folds the top carry back onto
    /// limb 0 multiplied by 19, and carries limb 0 once more.
    fn reduce(mut h: [i64; 10]) -> FieldElement {
        let mut carry = [0i64; 10];

        carry[0] = (h[0] + (1 << 25)) >> 26;
        h[1] += carry[0];
        h[0] -= carry[0] << 26;
        carry[4] = (h[4] + (1 << 25)) >> 26;
        h[5] += carry[4];
        h[4] -= carry[4] << 26;

        carry[1] = (h[1] + (1 << 24)) >> 25;
        h[2] += carry[1];
        h[1] -= carry[1] << 25;
        carry[5] = (h[5] + (1 << 24)) >> 25;
        h[6] += carry[5];
        h[5] -= carry[5] << 25;

        carry[2] = (h[2] + (1 << 25)) >> 26;
        h[3] += carry[2];
        h[2] -= carry[2] << 26;
        carry[6] = (h[6] + (1 << 25)) >> 26;
        h[7] += carry[6];
        h[6] -= carry[6] << 26;

        carry[3] = (h[3] + (1 << 24)) >> 25;
        h[4] += carry[3];
        h[3] -= carry[3] << 25;
        carry[7] = (h[7] + (1 << 24)) >> 25;
        h[8] += carry[7];
        h[7] -= carry[7] << 25;

        carry[4] = (h[4] + (1 << 25)) >> 26;
        h[5] += carry[4];
        h[4] -= carry[4] << 26;
        carry[8] = (h[8] + (1 << 25)) >> 26;
        h[9] += carry[8];
        h[8] -= carry[8] << 26;

        carry[9] = (h[9] + (1 << 24)) >> 25;
        h[0] += carry[9] * 19;
        h[9] -= carry[9] << 25;

        carry[0] = (h[0] + (1 << 25)) >> 26;
        h[1] += carry[0];
        h[0] -= carry[0] << 26;

        FieldElement([
            h[0] as i32,
            h[1] as i32,
            h[2] as i32,
            h[3] as i32,
            h[4] as i32,
            h[5] as i32,
            h[6] as i32,
            h[7] as i32,
            h[8] as i32,
            h[9] as i32,
        ])
    }

    /// Load a `FieldElement` from 32 bytes, little-endian, ignoring the
    /// 256th bit of the input.
    pub fn from_bytes(bytes: &[u8; 32]) -> FieldElement {
        FieldElement::reduce([
            load4(&bytes[0..]),
            load3(&bytes[4..]) << 6,
            load3(&bytes[7..]) << 5,
            load3(&bytes[10..]) << 3,
            load3(&bytes[13..]) << 2,
            load4(&bytes[16..]),
            load3(&bytes[20..]) << 7,
            load3(&bytes[23..]) << 5,
            load3(&bytes[26..]) << 4,
            (load3(&bytes[29..]) & 8388607) << 2,
        ])
    }

    /// Serialize this `FieldElement` to its unique, canonical 32-byte
    /// little-endian representative in \\([0, p)\\).
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut h = self.0;
        let mut carry = [0i32; 10];

        // Compute q, the carry out of the top limb after adding 19,
        // i.e. whether the value is >= p, so it can be folded away.
        let mut q = (19 * h[9] + (1 << 24)) >> 25;
        q = (h[0] + q) >> 26;
        q = (h[1] + q) >> 25;
        q = (h[2] + q) >> 26;
        q = (h[3] + q) >> 25;
        q = (h[4] + q) >> 26;
        q = (h[5] + q) >> 25;
        q = (h[6] + q) >> 26;
        q = (h[7] + q) >> 25;
        q = (h[8] + q) >> 26;
        q = (h[9] + q) >> 25;

        h[0] += 19 * q;

        carry[0] = h[0] >> 26;
        h[1] += carry[0];
        h[0] -= carry[0] << 26;
        carry[1] = h[1] >> 25;
        h[2] += carry[1];
        h[1] -= carry[1] << 25;
        carry[2] = h[2] >> 26;
        h[3] += carry[2];
        h[2] -= carry[2] << 26;
        carry[3] = h[3] >> 25;
        h[4] += carry[3];
        h[3] -= carry[3] << 25;
        carry[4] = h[4] >> 26;
        h[5] += carry[4];
        h[4] -= carry[4] << 26;
        carry[5] = h[5] >> 25;
        h[6] += carry[5];
        h[5] -= carry[5] << 25;
        carry[6] = h[6] >> 26;
        h[7] += carry[6];
        h[6] -= carry[6] << 26;
        carry[7] = h[7] >> 25;
        h[8] += carry[7];
        h[7] -= carry[7] << 25;
        carry[8] = h[8] >> 26;
        h[9] += carry[8];
        h[8] -= carry[8] << 26;
        carry[9] = h[9] >> 25;
        h[9] -= carry[9] << 25;

        let mut s = [0u8; 32];
        s[0] = h[0] as u8;
        s[1] = (h[0] >> 8) as u8;
        s[2] = (h[0] >> 16) as u8;
        s[3] = ((h[0] >> 24) | (h[1] << 2)) as u8;
        s[4] = (h[1] >> 6) as u8;
        s[5] = (h[1] >> 14) as u8;
        s[6] = ((h[1] >> 22) | (h[2] << 3)) as u8;
        s[7] = (h[2] >> 5) as u8;
        s[8] = (h[2] >> 13) as u8;
        s[9] = ((h[2] >> 21) | (h[3] << 5)) as u8;
        s[10] = (h[3] >> 3) as u8;
        s[11] = (h[3] >> 11) as u8;
        s[12] = ((h[3] >> 19) | (h[4] << 6)) as u8;
        s[13] = (h[4] >> 2) as u8;
        s[14] = (h[4] >> 10) as u8;
        s[15] = (h[4] >> 18) as u8;
        s[16] = h[5] as u8;
        s[17] = (h[5] >> 8) as u8;
        s[18] = (h[5] >> 16) as u8;
        s[19] = ((h[5] >> 24) | (h[6] << 1)) as u8;
        s[20] = (h[6] >> 7) as u8;
        s[21] = (h[6] >> 15) as u8;
        s[22] = ((h[6] >> 23) | (h[7] << 3)) as u8;
        s[23] = (h[7] >> 5) as u8;
        s[24] = (h[7] >> 13) as u8;
        s[25] = ((h[7] >> 21) | (h[8] << 4)) as u8;
        s[26] = (h[8] >> 4) as u8;
        s[27] = (h[8] >> 12) as u8;
        s[28] = ((h[8] >> 20) | (h[9] << 6)) as u8;
        s[29] = (h[9] >> 2) as u8;
        s[30] = (h[9] >> 10) as u8;
        s[31] = (h[9] >> 18) as u8;

        s
    }

    /// Determine if this `FieldElement` is negative, in the sense used
    /// in the ed25519 paper: `x` is negative if the low bit of its
    /// canonical encoding is set.
    pub fn is_negative(&self) -> Choice {
        let bytes = self.to_bytes();
        (bytes[0] & 1).into()
    }

    /// Determine if this `FieldElement` is zero.
    pub fn is_zero(&self) -> Choice {
        let zero = [0u8; 32];
        let bytes = self.to_bytes();

        bytes.ct_eq(&zero)
    }

    /// Compute `|self|`: `-self` if `self` is negative, `self`
    /// otherwise.
    pub fn abs(&self) -> FieldElement {
        let mut r = *self;
        r.conditional_negate(self.is_negative());
        r
    }

    /// The unnormalized 64-bit coefficients of `self^2`.
    fn square_inner(&self) -> [i64; 10] {
        let f0 = self.0[0] as i64;
        let f1 = self.0[1] as i64;
        let f2 = self.0[2] as i64;
        let f3 = self.0[3] as i64;
        let f4 = self.0[4] as i64;
        let f5 = self.0[5] as i64;
        let f6 = self.0[6] as i64;
        let f7 = self.0[7] as i64;
        let f8 = self.0[8] as i64;
        let f9 = self.0[9] as i64;

        let f0_2 = 2 * f0;
        let f1_2 = 2 * f1;
        let f2_2 = 2 * f2;
        let f3_2 = 2 * f3;
        let f4_2 = 2 * f4;
        let f5_2 = 2 * f5;
        let f6_2 = 2 * f6;
        let f7_2 = 2 * f7;
        let f5_38 = 38 * f5;
        let f6_19 = 19 * f6;
        let f7_38 = 38 * f7;
        let f8_19 = 19 * f8;
        let f9_38 = 38 * f9;

        [
            f0 * f0 + f1_2 * f9_38 + f2_2 * f8_19 + f3_2 * f7_38 + f4_2 * f6_19 + f5 * f5_38,
            f0_2 * f1 + f2 * f9_38 + f3_2 * f8_19 + f4 * f7_38 + f5_2 * f6_19,
            f0_2 * f2 + f1_2 * f1 + f3_2 * f9_38 + f4_2 * f8_19 + f5_2 * f7_38 + f6 * f6_19,
            f0_2 * f3 + f1_2 * f2 + f4 * f9_38 + f5_2 * f8_19 + f6 * f7_38,
            f0_2 * f4 + f1_2 * f3_2 + f2 * f2 + f5_2 * f9_38 + f6_2 * f8_19 + f7 * f7_38,
            f0_2 * f5 + f1_2 * f4 + f2_2 * f3 + f6 * f9_38 + f7_2 * f8_19,
            f0_2 * f6 + f1_2 * f5_2 + f2_2 * f4 + f3_2 * f3 + f7_2 * f9_38 + f8 * f8_19,
            f0_2 * f7 + f1_2 * f6 + f2_2 * f5 + f3_2 * f4 + f8 * f9_38,
            f0_2 * f8 + f1_2 * f7_2 + f2_2 * f6 + f3_2 * f5_2 + f4 * f4 + f9 * f9_38,
            f0_2 * f9 + f1_2 * f8 + f2_2 * f7 + f3_2 * f6 + f4_2 * f5,
        ]
    }

    /// Compute `self^2`.
    pub fn square(&self) -> FieldElement {
        FieldElement::reduce(self.square_inner())
    }

    /// Compute `2 * self^2`, as a canonical field element.
    pub fn square2(&self) -> FieldElement {
        let mut coeffs = self.square_inner();
        for coeff in coeffs.iter_mut() {
            *coeff += *coeff;
        }
        FieldElement::reduce(coeffs)
    }

    /// Compute `self^(2^k)` by squaring `k` times.  Requires `k > 0`.
    fn pow2k(&self, k: u32) -> FieldElement {
        debug_assert!(k > 0);
        let mut z = self.square();
        for _ in 1..k {
            z = z.square();
        }
        z
    }

    /// Compute `(self^(2^250-1), self^11)`, used as a helper function
    /// within `invert()` and `pow_p58()`.
    fn pow22501(&self) -> (FieldElement, FieldElement) {
        // Each temporary variable t_i is of the form (self)^e_i.
        // Squaring t_i corresponds to multiplying e_i by 2, so the
        // pow2k function shifts e_i left by k places.  Multiplying t_i
        // and t_j corresponds to adding e_i + e_j.
        //
        // Temporary t_i                      Nonzero bits of e_i
        //
        let t0 = self.square(); // 1         e_0 = 2^1
        let t1 = t0.square().square(); // 3         e_1 = 2^3
        let t2 = self * &t1; // 3,0       e_2 = 2^3 + 2^0
        let t3 = &t0 * &t2; // 3,1,0
        let t4 = t3.square(); // 4,2,1
        let t5 = &t2 * &t4; // 4,3,2,1,0
        let t6 = t5.pow2k(5); // 9,8,7,6,5
        let t7 = &t6 * &t5; // 9,8,7,6,5,4,3,2,1,0
        let t8 = t7.pow2k(10); // 19..10
        let t9 = &t8 * &t7; // 19..0
        let t10 = t9.pow2k(20); // 39..20
        let t11 = &t10 * &t9; // 39..0
        let t12 = t11.pow2k(10); // 49..10
        let t13 = &t12 * &t7; // 49..0
        let t14 = t13.pow2k(50); // 99..50
        let t15 = &t14 * &t13; // 99..0
        let t16 = t15.pow2k(100); // 199..100
        let t17 = &t16 * &t15; // 199..0
        let t18 = t17.pow2k(50); // 249..50
        let t19 = &t18 * &t13; // 249..0

        (t19, t3)
    }

    /// Given a nonzero field element, compute its inverse.
    ///
    /// The inverse is computed as `self^(p-2)`, since
    /// `x^(p-2) * x = x^(p-1) = 1 (mod p)`.
    ///
    /// This function returns zero on input zero.
    pub fn invert(&self) -> FieldElement {
        // The bits of p-2 = 2^255 - 19 - 2 are 11010111111...11.
        //
        //                                 nonzero bits of exponent
        let (t19, t3) = self.pow22501(); // t19: 249..0 ; t3: 3,1,0
        let t20 = t19.pow2k(5); // 254..5
        &t20 * &t3 // 254..5,3,1,0
    }

    /// Raise this field element to the power `(p-5)/8 = 2^252 - 3`.
    ///
    /// Used by the Lagrange square-root computation.
    fn pow_p58(&self) -> FieldElement {
        // The bits of (p-5)/8 are 101111.....11.
        //
        //                                 nonzero bits of exponent
        let (t19, _) = self.pow22501(); // 249..0
        let t20 = t19.pow2k(2); // 251..2
        self * &t20 // 251..2,0
    }

    /// Compute either `1/sqrt(self)` or `1/sqrt(i*self)` in constant
    /// time, where `i = sqrt(-1)`.
    ///
    /// The result is always the non-negative root.
    ///
    /// # Return
    ///
    /// - `(Choice(1), 1/sqrt(self))  ` if `self` is a nonzero square;
    /// - `(Choice(0), zero)          ` if `self` is zero;
    /// - `(Choice(0), 1/sqrt(i*self))` if `self` is a nonzero nonsquare.
    ///
    /// This witnessed form is the branchless core shared by the
    /// Ristretto decoder and Elligator2; use it whenever control
    /// depends on squareness.
    pub fn invsqrt_i(&self) -> (Choice, FieldElement) {
        // Compute t = self^3 * (self^7)^((p-5)/8), a candidate
        // inverse square root by the method of Lagrange, and then
        // classify it by chk = t^2 * self:
        //
        // case       A           B            C             D
        // ----------------------------------------------------------
        // t          1/sqrt(a)   -i/sqrt(a)   1/sqrt(i*a)   -i/sqrt(i*a)
        // chk        1           -1           -i            i
        // corr       1           i            1             i
        // ok         1           1            0             0
        let a2 = self.square();
        let a3 = &a2 * self;
        let a4 = a2.square();
        let a6 = &a2 * &a4;
        let a7 = &a6 * self;
        let mut t = &a7.pow_p58() * &a3;

        let chk = &t.square() * self;

        let in_case_a = chk.ct_eq(&FieldElement::ONE);
        let in_case_b = (-&chk).ct_eq(&FieldElement::ONE);
        let in_case_d = chk.ct_eq(&constants::SQRT_M1);

        let mut corr = FieldElement::ONE;
        corr.conditional_assign(&constants::SQRT_M1, in_case_b | in_case_d);
        t = &t * &corr;

        let t_is_negative = t.is_negative();
        t.conditional_negate(t_is_negative);

        (in_case_a | in_case_b, t)
    }

    /// Compute `1/sqrt(self)`.
    ///
    /// The result is only meaningful if `self` is a nonzero square;
    /// use [`FieldElement::invsqrt_i`] when squareness is in question.
    pub fn invsqrt(&self) -> FieldElement {
        self.invsqrt_i().1
    }

    /// Compute the non-negative square root of `self`.
    ///
    /// The result is only meaningful if `self` is a square.
    pub fn sqrt(&self) -> FieldElement {
        (self * &self.invsqrt()).abs()
    }
}

impl<'a, 'b> Add<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn add(self, rhs: &'b FieldElement) -> FieldElement {
        let mut coeffs = [0i64; 10];
        for i in 0..10 {
            coeffs[i] = self.0[i] as i64 + rhs.0[i] as i64;
        }
        FieldElement::reduce(coeffs)
    }
}

define_add_variants!(LHS = FieldElement, RHS = FieldElement, Output = FieldElement);

impl<'a, 'b> Sub<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn sub(self, rhs: &'b FieldElement) -> FieldElement {
        let mut coeffs = [0i64; 10];
        for i in 0..10 {
            coeffs[i] = self.0[i] as i64 - rhs.0[i] as i64;
        }
        FieldElement::reduce(coeffs)
    }
}

define_sub_variants!(LHS = FieldElement, RHS = FieldElement, Output = FieldElement);

impl<'a> Neg for &'a FieldElement {
    type Output = FieldElement;
    fn neg(self) -> FieldElement {
        let mut output = *self;
        for limb in output.0.iter_mut() {
            *limb = -*limb;
        }
        output
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;
    fn neg(self) -> FieldElement {
        -&self
    }
}

impl<'a, 'b> Mul<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn mul(self, rhs: &'b FieldElement) -> FieldElement {
        let a0 = self.0[0] as i64;
        let a1 = self.0[1] as i64;
        let a2 = self.0[2] as i64;
        let a3 = self.0[3] as i64;
        let a4 = self.0[4] as i64;
        let a5 = self.0[5] as i64;
        let a6 = self.0[6] as i64;
        let a7 = self.0[7] as i64;
        let a8 = self.0[8] as i64;
        let a9 = self.0[9] as i64;

        let a1_2 = 2 * a1;
        let a3_2 = 2 * a3;
        let a5_2 = 2 * a5;
        let a7_2 = 2 * a7;
        let a9_2 = 2 * a9;

        let b0 = rhs.0[0] as i64;
        let b1 = rhs.0[1] as i64;
        let b2 = rhs.0[2] as i64;
        let b3 = rhs.0[3] as i64;
        let b4 = rhs.0[4] as i64;
        let b5 = rhs.0[5] as i64;
        let b6 = rhs.0[6] as i64;
        let b7 = rhs.0[7] as i64;
        let b8 = rhs.0[8] as i64;
        let b9 = rhs.0[9] as i64;

        let b1_19 = 19 * b1;
        let b2_19 = 19 * b2;
        let b3_19 = 19 * b3;
        let b4_19 = 19 * b4;
        let b5_19 = 19 * b5;
        let b6_19 = 19 * b6;
        let b7_19 = 19 * b7;
        let b8_19 = 19 * b8;
        let b9_19 = 19 * b9;

        let h0 = a0 * b0
            + a1_2 * b9_19
            + a2 * b8_19
            + a3_2 * b7_19
            + a4 * b6_19
            + a5_2 * b5_19
            + a6 * b4_19
            + a7_2 * b3_19
            + a8 * b2_19
            + a9_2 * b1_19;
        let h1 = a0 * b1
            + a1 * b0
            + a2 * b9_19
            + a3 * b8_19
            + a4 * b7_19
            + a5 * b6_19
            + a6 * b5_19
            + a7 * b4_19
            + a8 * b3_19
            + a9 * b2_19;
        let h2 = a0 * b2
            + a1_2 * b1
            + a2 * b0
            + a3_2 * b9_19
            + a4 * b8_19
            + a5_2 * b7_19
            + a6 * b6_19
            + a7_2 * b5_19
            + a8 * b4_19
            + a9_2 * b3_19;
        let h3 = a0 * b3
            + a1 * b2
            + a2 * b1
            + a3 * b0
            + a4 * b9_19
            + a5 * b8_19
            + a6 * b7_19
            + a7 * b6_19
            + a8 * b5_19
            + a9 * b4_19;
        let h4 = a0 * b4
            + a1_2 * b3
            + a2 * b2
            + a3_2 * b1
            + a4 * b0
            + a5_2 * b9_19
            + a6 * b8_19
            + a7_2 * b7_19
            + a8 * b6_19
            + a9_2 * b5_19;
        let h5 = a0 * b5
            + a1 * b4
            + a2 * b3
            + a3 * b2
            + a4 * b1
            + a5 * b0
            + a6 * b9_19
            + a7 * b8_19
            + a8 * b7_19
            + a9 * b6_19;
        let h6 = a0 * b6
            + a1_2 * b5
            + a2 * b4
            + a3_2 * b3
            + a4 * b2
            + a5_2 * b1
            + a6 * b0
            + a7_2 * b9_19
            + a8 * b8_19
            + a9_2 * b7_19;
        let h7 = a0 * b7
            + a1 * b6
            + a2 * b5
            + a3 * b4
            + a4 * b3
            + a5 * b2
            + a6 * b1
            + a7 * b0
            + a8 * b9_19
            + a9 * b8_19;
        let h8 = a0 * b8
            + a1_2 * b7
            + a2 * b6
            + a3_2 * b5
            + a4 * b4
            + a5_2 * b3
            + a6 * b2
            + a7_2 * b1
            + a8 * b0
            + a9_2 * b9_19;
        let h9 = a0 * b9
            + a1 * b8
            + a2 * b7
            + a3 * b6
            + a4 * b5
            + a5 * b4
            + a6 * b3
            + a7 * b2
            + a8 * b1
            + a9 * b0;

        FieldElement::reduce([h0, h1, h2, h3, h4, h5, h6, h7, h8, h9])
    }
}

define_mul_variants!(LHS = FieldElement, RHS = FieldElement, Output = FieldElement);

impl ConditionallySelectable for FieldElement {
    fn conditional_select(
        a: &FieldElement,
        b: &FieldElement,
        choice: Choice,
    ) -> FieldElement {
        let mut limbs = [0i32; 10];
        for i in 0..10 {
            limbs[i] = i32::conditional_select(&a.0[i], &b.0[i], choice);
        }
        FieldElement(limbs)
    }
}

impl ConstantTimeEq for FieldElement {
    /// Test equality between two `FieldElement`s.  Since the internal
    /// representation is not canonical, the field elements are
    /// normalized to wire format before comparison.
    fn ct_eq(&self, other: &FieldElement) -> Choice {
        self.to_bytes().ct_eq(&other.to_bytes())
    }
}

impl Eq for FieldElement {}

impl PartialEq for FieldElement {
    fn eq(&self, other: &FieldElement) -> bool {
        self.ct_eq(other).into()
    }
}

impl Debug for FieldElement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "FieldElement({:?})", &self.0[..])
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::Zeroize for FieldElement {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
