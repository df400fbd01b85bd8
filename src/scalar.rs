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

//! Arithmetic on scalars (integers mod the group order).
//!
//! The `Scalar` struct represents an element in
//! \\( \mathbb Z / \ell\mathbb Z \\), where
//! \\( \ell = 2\^{252} + 27742317777372353535851937790883648493 \\) is
//! the order of the Ristretto group and of the basepoint.
//!
//! At rest a scalar is its canonical 32-byte little-endian encoding.
//! To compute products, the scalar is unpacked into twelve 21-bit
//! limbs (`UnpackedScalar`); twelve limbs of 21 bits cover 252 bits
//! exactly, so the reduction
//! \\( 2\^{252} \equiv -27742317777372353535851937790883648493 \\)
//! eliminates high limbs without any sub-limb shifting.

use core::fmt::Debug;
use core::ops::{Add, Mul, Neg, Sub};

use digest::consts::U64;
use digest::Digest;

use rand_core::{CryptoRng, RngCore};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;
use subtle::CtOption;

use crate::constants;
use crate::field::{load3, load4};

/// The `Scalar` struct represents an element in
/// \\( \mathbb Z / \ell\mathbb Z \\), held as its canonical 32-byte
/// little-endian encoding.
#[derive(Copy, Clone)]
pub struct Scalar(pub(crate) [u8; 32]);

impl Scalar {
    /// The additive identity.
    pub const ZERO: Scalar = Scalar([0u8; 32]);

    /// The multiplicative identity.
    pub const ONE: Scalar = Scalar([
        1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0,
    ]);

    /// Construct a scalar from the given `u64`.
    pub fn from_u64(x: u64) -> Scalar {
        let mut s = Scalar::ZERO;
        s.0[..8].copy_from_slice(&x.to_le_bytes());
        s
    }

    /// Construct a scalar by reducing a 256-bit little-endian integer
    /// modulo the group order \\( \ell \\).
    pub fn from_bytes_mod_order(bytes: [u8; 32]) -> Scalar {
        let mut wide = [0u8; 64];
        wide[..32].copy_from_slice(&bytes);
        Scalar::from_bytes_mod_order_wide(&wide)
    }

    /// Construct a scalar by reducing a 512-bit little-endian integer
    /// modulo the group order \\( \ell \\).  This is the standard way
    /// to derive a scalar from wide hash output.
    pub fn from_bytes_mod_order_wide(input: &[u8; 64]) -> Scalar {
        let mut s = [0i64; 24];

        let mask_21bits: i64 = (1 << 21) - 1;
        s[0] = mask_21bits & load3(&input[0..]);
        s[1] = mask_21bits & (load4(&input[2..]) >> 5);
        s[2] = mask_21bits & (load3(&input[5..]) >> 2);
        s[3] = mask_21bits & (load4(&input[7..]) >> 7);
        s[4] = mask_21bits & (load4(&input[10..]) >> 4);
        s[5] = mask_21bits & (load3(&input[13..]) >> 1);
        s[6] = mask_21bits & (load4(&input[15..]) >> 6);
        s[7] = mask_21bits & (load3(&input[18..]) >> 3);
        s[8] = mask_21bits & load3(&input[21..]);
        s[9] = mask_21bits & (load4(&input[23..]) >> 5);
        s[10] = mask_21bits & (load3(&input[26..]) >> 2);
        s[11] = mask_21bits & (load4(&input[28..]) >> 7);
        s[12] = mask_21bits & (load4(&input[31..]) >> 4);
        s[13] = mask_21bits & (load3(&input[34..]) >> 1);
        s[14] = mask_21bits & (load4(&input[36..]) >> 6);
        s[15] = mask_21bits & (load3(&input[39..]) >> 3);
        s[16] = mask_21bits & load3(&input[42..]);
        s[17] = mask_21bits & (load4(&input[44..]) >> 5);
        s[18] = mask_21bits & (load3(&input[47..]) >> 2);
        s[19] = mask_21bits & (load4(&input[49..]) >> 7);
        s[20] = mask_21bits & (load4(&input[52..]) >> 4);
        s[21] = mask_21bits & (load3(&input[55..]) >> 1);
        s[22] = mask_21bits & (load4(&input[57..]) >> 6);
        s[23] = load4(&input[60..]) >> 3;

        UnpackedScalar::reduce_limbs(&mut s).pack()
    }

    /// Attempt to construct a scalar from its canonical byte
    /// representation.
    ///
    /// Succeeds if and only if the input is the canonical little-endian
    /// encoding of an integer in \\( [0, \ell) \\).  The reason for a
    /// failure is not reported.
    pub fn from_canonical_bytes(bytes: [u8; 32]) -> CtOption<Scalar> {
        let candidate = Scalar(bytes);
        let reduced = Scalar::from_bytes_mod_order(bytes);
        CtOption::new(candidate, candidate.ct_eq(&reduced))
    }

    /// Construct a scalar from the low 255 bits of a 256-bit integer,
    /// without reducing mod \\( \ell \\).
    ///
    /// The scalar arithmetic in this crate expects canonical values;
    /// this constructor exists so that scalar *multiplication* can be
    /// exercised on unreduced inputs (values below \\( 2^{254} \\)).
    pub fn from_bits(bytes: [u8; 32]) -> Scalar {
        let mut s = Scalar(bytes);
        // Ensure that s < 2^255
        s.0[31] &= 0b0111_1111;
        s
    }

    /// Return a `Scalar` chosen uniformly at random using a
    /// user-provided RNG.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Scalar {
        let mut scalar_bytes = [0u8; 64];
        rng.fill_bytes(&mut scalar_bytes);
        Scalar::from_bytes_mod_order_wide(&scalar_bytes)
    }

    /// Hash a slice of bytes into a scalar.
    ///
    /// Takes a type parameter `D`, which is any `Digest` producing 64
    /// bytes (512 bits) of output; use SHA-512 unless a protocol
    /// requires otherwise.
    pub fn hash_from_bytes<D>(input: &[u8]) -> Scalar
    where
        D: Digest<OutputSize = U64>,
    {
        let mut hash = D::new();
        hash.update(input);
        Scalar::from_hash(hash)
    }

    /// Construct a scalar from an existing `Digest` instance.
    ///
    /// Use this instead of `hash_from_bytes` if it is more convenient
    /// to stream data into the `Digest` than to pass a single byte
    /// slice.
    pub fn from_hash<D>(hash: D) -> Scalar
    where
        D: Digest<OutputSize = U64>,
    {
        let mut output = [0u8; 64];
        output.copy_from_slice(hash.finalize().as_slice());
        Scalar::from_bytes_mod_order_wide(&output)
    }

    /// Hash a slice of bytes into a short scalar of at most 128 bits,
    /// taken from the low half of the digest's first 32 bytes.
    ///
    /// Short scalars make the multiplication `s * P` roughly twice as
    /// fast, at the cost of the scalar carrying only 128 bits of
    /// entropy.
    pub fn hash_from_bytes_short<D>(input: &[u8]) -> Scalar
    where
        D: Digest<OutputSize = U64>,
    {
        let mut hash = D::new();
        hash.update(input);
        let mut bytes = [0u8; 32];
        bytes[..16].copy_from_slice(&hash.finalize().as_slice()[..16]);
        Scalar(bytes)
    }

    /// View this `Scalar` as a sequence of bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert this `Scalar` to its canonical byte representation.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Compute the multiplicative inverse of this scalar, via Fermat's
    /// little theorem: \\( s^{-1} = s^{\ell - 2} \\).
    ///
    /// Returns zero on input zero.
    pub fn invert(&self) -> Scalar {
        self.unpack().invert().pack()
    }

    /// Compute `a*b + c (mod l)`.
    pub fn multiply_add(a: &Scalar, b: &Scalar, c: &Scalar) -> Scalar {
        let al = a.unpack();
        let bl = b.unpack();
        let cl = c.unpack();

        UnpackedScalar::multiply_add(&al, &bl, &cl).pack()
    }

    /// Compute `a*b - c (mod l)`.
    pub fn multiply_sub(a: &Scalar, b: &Scalar, c: &Scalar) -> Scalar {
        Scalar::multiply_add(a, b, &-c)
    }

    /// Compute `self^2 (mod l)`.
    pub fn square(&self) -> Scalar {
        self * self
    }

    /// Get the bits of the scalar, least significant first.
    pub(crate) fn bits(&self) -> [i8; 256] {
        let mut bits = [0i8; 256];
        for i in 0..256 {
            // As i runs from 0..256, the bottom 3 bits index the bit,
            // while the upper bits index the byte.
            bits[i] = ((self.0[i >> 3] >> (i & 7)) & 1u8) as i8;
        }
        bits
    }

    /// Compute a width-5 "Non-Adjacent Form" of this scalar.
    ///
    /// A width-`w` NAF of a positive integer `k` is an expression
    /// `k = sum(k[i]*2^i for i in range(l))`, where each nonzero
    /// coefficient `k[i]` is odd and bounded by `|k[i]| < 2^(w-1)`,
    /// `k[l-1]` is nonzero, and at most one of any `w` consecutive
    /// coefficients is nonzero.  (Hankerson, Menezes, Vanstone; def 3.32).
    pub(crate) fn non_adjacent_form(&self) -> [i8; 256] {
        // Step 1: write out bits of the scalar
        let mut naf = self.bits();

        // Step 2: zero coefficients by carrying them upwards or downwards
        'bits: for i in 0..256 {
            if naf[i] == 0 {
                continue 'bits;
            }
            'window: for b in 1..6 {
                if i + b >= 256 {
                    break 'window;
                }
                if naf[i + b] == 0 {
                    continue 'window;
                }
                let potential_carry = naf[i + b] << b;
                if naf[i] + potential_carry <= 15 {
                    // Eliminate naf[i+b] by carrying its value onto naf[i]
                    naf[i] += potential_carry;
                    naf[i + b] = 0;
                } else if naf[i] - potential_carry >= -15 {
                    // Eliminate naf[i+b] by carrying its value upwards.
                    naf[i] -= potential_carry; // Subtract 2^(i+b)
                    'carry: for k in i + b..256 {
                        if naf[k] != 0 {
                            // Since naf[k] = 0 or 1 for k > i, naf[k] == 1.
                            naf[k] = 0; // Subtract 2^k
                        } else {
                            // By now we have subtracted 2^k =
                            // 2^(i+b) + 2^(i+b) + 2^(i+b+1) + ... + 2^(k-1).
                            naf[k] = 1; // Add back 2^k.
                            break 'carry;
                        }
                    }
                }
            }
        }

        naf
    }

    /// Write this scalar in radix 16, with coefficients in `[-8,8)`,
    /// i.e., compute `a_i` such that
    ///
    ///    a = a_0 + a_1*16^1 + ... + a_63*16^63,
    ///
    /// with `-8 ≤ a_i < 8` for `0 ≤ i < 63` and `-8 ≤ a_63 ≤ 8`.
    ///
    /// Precondition: self\[31\] <= 127.  This is the case whenever
    /// `self` is reduced.
    pub(crate) fn as_radix_16(&self) -> [i8; 64] {
        debug_assert!(self.0[31] <= 127);
        let mut output = [0i8; 64];

        // Step 1: change radix.
        // Convert from radix 256 (bytes) to radix 16 (nibbles)
        #[inline(always)]
        fn bot_half(x: u8) -> u8 {
            x & 15
        }
        #[inline(always)]
        fn top_half(x: u8) -> u8 {
            (x >> 4) & 15
        }

        for i in 0..32 {
            output[2 * i] = bot_half(self.0[i]) as i8;
            output[2 * i + 1] = top_half(self.0[i]) as i8;
        }
        // Precondition note: since self[31] <= 127, output[63] <= 7

        // Step 2: recenter coefficients from [0,16) to [-8,8)
        for i in 0..63 {
            let carry = (output[i] + 8) >> 4;
            output[i] -= carry << 4;
            output[i + 1] += carry;
        }
        // Precondition note: output[63] is not recentered.  It
        // increases by carry <= 1.  Thus output[63] <= 8.

        output
    }

    /// Write this scalar in radix 32, with coefficients in `[-16,16]`:
    /// 51 windows of five bits each, recentered by a carry sweep so
    /// that the top window stays non-negative.
    ///
    /// Precondition: self\[31\] <= 63, i.e. the value is below
    /// \\( 2^{254} \\).  This is the case whenever `self` is reduced.
    pub(crate) fn as_radix_32(&self) -> [i8; 51] {
        debug_assert!(self.0[31] <= 63);
        let mut w = [0i8; 51];

        // Step 1: cut the 255 bits into 51 five-bit windows.
        for i in 0..51 {
            let bit = 5 * i;
            let byte = bit >> 3;
            let shift = bit & 7;
            let mut v = (self.0[byte] as u16) >> shift;
            if byte + 1 < 32 {
                v |= (self.0[byte + 1] as u16) << (8 - shift);
            }
            w[i] = (v & 31) as i8;
        }

        // Step 2: recenter coefficients from [0,32) to [-16,16).  The
        // final window only absorbs the carry, so it remains
        // non-negative (and at most 16).
        let mut carry = 0i8;
        for i in 0..50 {
            w[i] += carry;
            carry = (w[i] + 16) >> 5;
            w[i] -= carry << 5;
        }
        w[50] += carry;

        w
    }

    /// Unpack this scalar into 12 21-bit limbs.
    fn unpack(&self) -> UnpackedScalar {
        let mask_21bits: i64 = (1 << 21) - 1;
        let mut a = UnpackedScalar([0i64; 12]);
        a.0[0] = mask_21bits & load3(&self.0[0..]);
        a.0[1] = mask_21bits & (load4(&self.0[2..]) >> 5);
        a.0[2] = mask_21bits & (load3(&self.0[5..]) >> 2);
        a.0[3] = mask_21bits & (load4(&self.0[7..]) >> 7);
        a.0[4] = mask_21bits & (load4(&self.0[10..]) >> 4);
        a.0[5] = mask_21bits & (load3(&self.0[13..]) >> 1);
        a.0[6] = mask_21bits & (load4(&self.0[15..]) >> 6);
        a.0[7] = mask_21bits & (load3(&self.0[18..]) >> 3);
        a.0[8] = mask_21bits & load3(&self.0[21..]);
        a.0[9] = mask_21bits & (load4(&self.0[23..]) >> 5);
        a.0[10] = mask_21bits & (load3(&self.0[26..]) >> 2);
        a.0[11] = load4(&self.0[28..]) >> 7;

        a
    }
}

// ------------------------------------------------------------------------
// Arithmetic operators
// ------------------------------------------------------------------------

impl<'a, 'b> Mul<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn mul(self, rhs: &'b Scalar) -> Scalar {
        Scalar::multiply_add(self, rhs, &Scalar::ZERO)
    }
}

define_mul_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl<'a, 'b> Add<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn add(self, rhs: &'b Scalar) -> Scalar {
        let al = self.unpack();
        let bl = rhs.unpack();
        let mut sum = [0i64; 24];
        for i in 0..12 {
            sum[i] = al.0[i] + bl.0[i];
        }
        UnpackedScalar::reduce_limbs(&mut sum).pack()
    }
}

define_add_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl<'a, 'b> Sub<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn sub(self, rhs: &'b Scalar) -> Scalar {
        self + &-rhs
    }
}

define_sub_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl<'a> Neg for &'a Scalar {
    type Output = Scalar;
    /// Compute `l - self`, with a constant-time fix-up of the
    /// `self = 0` case.
    fn neg(self) -> Scalar {
        let l = &constants::BASEPOINT_ORDER;
        let mut difference = [0u8; 32];
        let mut borrow = 0i16;
        for i in 0..32 {
            let t = (l.0[i] as i16) - (self.0[i] as i16) - borrow;
            difference[i] = t as u8;
            borrow = (t >> 8) & 1;
        }
        // self is canonical, so l - self never underflows; it is l
        // itself exactly when self = 0.
        let negated = Scalar(difference);
        Scalar::conditional_select(&negated, &Scalar::ZERO, self.ct_eq(&Scalar::ZERO))
    }
}

impl Neg for Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        -&self
    }
}

// ------------------------------------------------------------------------
// Constant-time trait impls
// ------------------------------------------------------------------------

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Scalar) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl Eq for Scalar {}

impl PartialEq for Scalar {
    fn eq(&self, other: &Scalar) -> bool {
        self.ct_eq(other).into()
    }
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Scalar, b: &Scalar, choice: Choice) -> Scalar {
        let mut bytes = [0u8; 32];
        for i in 0..32 {
            bytes[i] = u8::conditional_select(&a.0[i], &b.0[i], choice);
        }
        Scalar(bytes)
    }
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Scalar{{\n\tbytes: {:?},\n}}", &self.0)
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

// ------------------------------------------------------------------------
// Serde
// ------------------------------------------------------------------------

#[cfg(feature = "serde")]
impl serde::Serialize for Scalar {
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
impl<'de> serde::Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ScalarVisitor;

        impl<'de> serde::de::Visitor<'de> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                formatter.write_str("a canonical 32-byte scalar")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Scalar, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut bytes = [0u8; 32];
                for (i, byte) in bytes.iter_mut().enumerate() {
                    *byte = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &"32 bytes"))?;
                }
                Option::<Scalar>::from(Scalar::from_canonical_bytes(bytes))
                    .ok_or_else(|| serde::de::Error::custom("scalar was not canonically encoded"))
            }
        }

        deserializer.deserialize_tuple(32, ScalarVisitor)
    }
}

// ------------------------------------------------------------------------
// Unpacked representation
// ------------------------------------------------------------------------

/// An `UnpackedScalar` represents an element in ℤ/lℤ as 12 21-bit
/// limbs.
#[derive(Copy, Clone)]
struct UnpackedScalar([i64; 12]);

impl UnpackedScalar {
    /// Return the zero scalar.
    fn zero() -> UnpackedScalar {
        UnpackedScalar([0; 12])
    }

    /// Return the one scalar.
    fn one() -> UnpackedScalar {
        UnpackedScalar([1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0])
    }

    /// Pack the limbs of this `UnpackedScalar` into a `Scalar`.
    fn pack(&self) -> Scalar {
        let mut s = Scalar::ZERO;
        s.0[0] = self.0[0] as u8;
        s.0[1] = (self.0[0] >> 8) as u8;
        s.0[2] = ((self.0[0] >> 16) | (self.0[1] << 5)) as u8;
        s.0[3] = (self.0[1] >> 3) as u8;
        s.0[4] = (self.0[1] >> 11) as u8;
        s.0[5] = ((self.0[1] >> 19) | (self.0[2] << 2)) as u8;
        s.0[6] = (self.0[2] >> 6) as u8;
        s.0[7] = ((self.0[2] >> 14) | (self.0[3] << 7)) as u8;
        s.0[8] = (self.0[3] >> 1) as u8;
        s.0[9] = (self.0[3] >> 9) as u8;
        s.0[10] = ((self.0[3] >> 17) | (self.0[4] << 4)) as u8;
        s.0[11] = (self.0[4] >> 4) as u8;
        s.0[12] = (self.0[4] >> 12) as u8;
        s.0[13] = ((self.0[4] >> 20) | (self.0[5] << 1)) as u8;
        s.0[14] = (self.0[5] >> 7) as u8;
        s.0[15] = ((self.0[5] >> 15) | (self.0[6] << 6)) as u8;
        s.0[16] = (self.0[6] >> 2) as u8;
        s.0[17] = (self.0[6] >> 10) as u8;
        s.0[18] = ((self.0[6] >> 18) | (self.0[7] << 3)) as u8;
        s.0[19] = (self.0[7] >> 5) as u8;
        s.0[20] = (self.0[7] >> 13) as u8;
        s.0[21] = self.0[8] as u8;
        s.0[22] = (self.0[8] >> 8) as u8;
        s.0[23] = ((self.0[8] >> 16) | (self.0[9] << 5)) as u8;
        s.0[24] = (self.0[9] >> 3) as u8;
        s.0[25] = (self.0[9] >> 11) as u8;
        s.0[26] = ((self.0[9] >> 19) | (self.0[10] << 2)) as u8;
        s.0[27] = (self.0[10] >> 6) as u8;
        s.0[28] = ((self.0[10] >> 14) | (self.0[11] << 7)) as u8;
        s.0[29] = (self.0[11] >> 1) as u8;
        s.0[30] = (self.0[11] >> 9) as u8;
        s.0[31] = (self.0[11] >> 17) as u8;

        s
    }

    /// Compute the multiplicative inverse of this scalar, by
    /// square-and-multiply over the (public) bits of l-2.
    fn invert(&self) -> UnpackedScalar {
        let mut y = UnpackedScalar::one();
        for bit in constants::L_MINUS_2.bits().iter().rev() {
            y = UnpackedScalar::multiply_add(&y, &y, &UnpackedScalar::zero());
            if *bit == 1 {
                y = UnpackedScalar::multiply_add(&y, self, &UnpackedScalar::zero());
            }
        }
        y
    }

    /// Compute `ab+c (mod l)`.
    fn multiply_add(
        a: &UnpackedScalar,
        b: &UnpackedScalar,
        c: &UnpackedScalar,
    ) -> UnpackedScalar {
        let mut result = [0i64; 24];
        let a = &a.0;
        let b = &b.0;
        let c = &c.0;

        // Multiply a and b, and add c
        result[0] = c[0] + a[0] * b[0];
        result[1] = c[1] + a[0] * b[1] + a[1] * b[0];
        result[2] = c[2] + a[0] * b[2] + a[1] * b[1] + a[2] * b[0];
        result[3] = c[3] + a[0] * b[3] + a[1] * b[2] + a[2] * b[1] + a[3] * b[0];
        result[4] = c[4] + a[0] * b[4] + a[1] * b[3] + a[2] * b[2] + a[3] * b[1] + a[4] * b[0];
        result[5] = c[5]
            + a[0] * b[5]
            + a[1] * b[4]
            + a[2] * b[3]
            + a[3] * b[2]
            + a[4] * b[1]
            + a[5] * b[0];
        result[6] = c[6]
            + a[0] * b[6]
            + a[1] * b[5]
            + a[2] * b[4]
            + a[3] * b[3]
            + a[4] * b[2]
            + a[5] * b[1]
            + a[6] * b[0];
        result[7] = c[7]
            + a[0] * b[7]
            + a[1] * b[6]
            + a[2] * b[5]
            + a[3] * b[4]
            + a[4] * b[3]
            + a[5] * b[2]
            + a[6] * b[1]
            + a[7] * b[0];
        result[8] = c[8]
            + a[0] * b[8]
            + a[1] * b[7]
            + a[2] * b[6]
            + a[3] * b[5]
            + a[4] * b[4]
            + a[5] * b[3]
            + a[6] * b[2]
            + a[7] * b[1]
            + a[8] * b[0];
        result[9] = c[9]
            + a[0] * b[9]
            + a[1] * b[8]
            + a[2] * b[7]
            + a[3] * b[6]
            + a[4] * b[5]
            + a[5] * b[4]
            + a[6] * b[3]
            + a[7] * b[2]
            + a[8] * b[1]
            + a[9] * b[0];
        result[10] = c[10]
            + a[0] * b[10]
            + a[1] * b[9]
            + a[2] * b[8]
            + a[3] * b[7]
            + a[4] * b[6]
            + a[5] * b[5]
            + a[6] * b[4]
            + a[7] * b[3]
            + a[8] * b[2]
            + a[9] * b[1]
            + a[10] * b[0];
        result[11] = c[11]
            + a[0] * b[11]
            + a[1] * b[10]
            + a[2] * b[9]
            + a[3] * b[8]
            + a[4] * b[7]
            + a[5] * b[6]
            + a[6] * b[5]
            + a[7] * b[4]
            + a[8] * b[3]
            + a[9] * b[2]
            + a[10] * b[1]
            + a[11] * b[0];
        result[12] = a[1] * b[11]
            + a[2] * b[10]
            + a[3] * b[9]
            + a[4] * b[8]
            + a[5] * b[7]
            + a[6] * b[6]
            + a[7] * b[5]
            + a[8] * b[4]
            + a[9] * b[3]
            + a[10] * b[2]
            + a[11] * b[1];
        result[13] = a[2] * b[11]
            + a[3] * b[10]
            + a[4] * b[9]
            + a[5] * b[8]
            + a[6] * b[7]
            + a[7] * b[6]
            + a[8] * b[5]
            + a[9] * b[4]
            + a[10] * b[3]
            + a[11] * b[2];
        result[14] = a[3] * b[11]
            + a[4] * b[10]
            + a[5] * b[9]
            + a[6] * b[8]
            + a[7] * b[7]
            + a[8] * b[6]
            + a[9] * b[5]
            + a[10] * b[4]
            + a[11] * b[3];
        result[15] = a[4] * b[11]
            + a[5] * b[10]
            + a[6] * b[9]
            + a[7] * b[8]
            + a[8] * b[7]
            + a[9] * b[6]
            + a[10] * b[5]
            + a[11] * b[4];
        result[16] = a[5] * b[11]
            + a[6] * b[10]
            + a[7] * b[9]
            + a[8] * b[8]
            + a[9] * b[7]
            + a[10] * b[6]
            + a[11] * b[5];
        result[17] =
            a[6] * b[11] + a[7] * b[10] + a[8] * b[9] + a[9] * b[8] + a[10] * b[7] + a[11] * b[6];
        result[18] = a[7] * b[11] + a[8] * b[10] + a[9] * b[9] + a[10] * b[8] + a[11] * b[7];
        result[19] = a[8] * b[11] + a[9] * b[10] + a[10] * b[9] + a[11] * b[8];
        result[20] = a[9] * b[11] + a[10] * b[10] + a[11] * b[9];
        result[21] = a[10] * b[11] + a[11] * b[10];
        result[22] = a[11] * b[11];
        result[23] = 0i64;

        // Reduce limbs
        UnpackedScalar::reduce_limbs(&mut result)
    }

    /// Reduce 24 limbs to 12, consuming the input. Reduction is mod
    ///
    ///   l = 2^252 + 27742317777372353535851937790883648493,
    ///
    /// so
    ///
    ///   2^252 = -27742317777372353535851937790883648493 (mod l).
    ///
    /// We can write the right-hand side in 21-bit limbs as
    ///
    /// rhs =    666643 * 2^0
    ///        + 470296 * 2^21
    ///        + 654183 * 2^42
    ///        - 997805 * 2^63
    ///        + 136657 * 2^84
    ///        - 683901 * 2^105
    ///
    /// The (12+k)-th limb of `limbs` is the coefficient of
    ///
    ///    2^(252 + 21*k)
    ///
    /// since 12*21 = 252.  By the above, we have that
    ///
    ///    c * 2^(252 + 21*k) =   c * 666643 * 2^(21*k)
    ///                         + c * 470296 * 2^(21*(k+1)) + ...
    ///
    /// so we can eliminate it by adding those values to the lower
    /// limbs.  Reduction mod l amounts to eliminating all of the
    /// high limbs while carrying as appropriate to prevent overflows
    /// in the lower limbs.
    fn reduce_limbs(limbs: &mut [i64; 24]) -> UnpackedScalar {
        #[inline]
        fn do_reduction(limbs: &mut [i64; 24], i: usize) {
            limbs[i - 12] += limbs[i] * 666643;
            limbs[i - 11] += limbs[i] * 470296;
            limbs[i - 10] += limbs[i] * 654183;
            limbs[i - 9] -= limbs[i] * 997805;
            limbs[i - 8] += limbs[i] * 136657;
            limbs[i - 7] -= limbs[i] * 683901;
            limbs[i] = 0;
        }

        /// Carry excess from the `i`-th limb into the `(i+1)`-th limb.
        /// Postcondition: `0 <= limbs[i] < 2^21`.
        #[inline]
        fn do_carry_uncentered(limbs: &mut [i64; 24], i: usize) {
            let carry: i64 = limbs[i] >> 21;
            limbs[i + 1] += carry;
            limbs[i] -= carry << 21;
        }

        /// Carry excess from the `i`-th limb into the `(i+1)`-th limb.
        /// Postcondition: `-2^20 <= limbs[i] < 2^20`.
        #[inline]
        fn do_carry_centered(limbs: &mut [i64; 24], i: usize) {
            let carry: i64 = (limbs[i] + (1 << 20)) >> 21;
            limbs[i + 1] += carry;
            limbs[i] -= carry << 21;
        }

        for i in 0..23 {
            do_carry_centered(limbs, i);
        }
        for i in (0..23).filter(|x| x % 2 == 1) {
            do_carry_centered(limbs, i);
        }

        do_reduction(limbs, 23);
        do_reduction(limbs, 22);
        do_reduction(limbs, 21);
        do_reduction(limbs, 20);
        do_reduction(limbs, 19);
        do_reduction(limbs, 18);

        for i in (6..18).filter(|x| x % 2 == 0) {
            do_carry_centered(limbs, i);
        }
        for i in (6..16).filter(|x| x % 2 == 1) {
            do_carry_centered(limbs, i);
        }

        do_reduction(limbs, 17);
        do_reduction(limbs, 16);
        do_reduction(limbs, 15);
        do_reduction(limbs, 14);
        do_reduction(limbs, 13);
        do_reduction(limbs, 12);

        for i in (0..12).filter(|x| x % 2 == 0) {
            do_carry_centered(limbs, i);
        }
        for i in (0..12).filter(|x| x % 2 == 1) {
            do_carry_centered(limbs, i);
        }

        do_reduction(limbs, 12);

        for i in 0..12 {
            do_carry_uncentered(limbs, i);
        }

        do_reduction(limbs, 12);

        for i in 0..11 {
            do_carry_uncentered(limbs, i);
        }

        let mut out = UnpackedScalar::zero();
        out.0.copy_from_slice(&limbs[0..12]);
        out
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use sha2::Sha512;

    /// x = 2238329342913194256032495932344128051776374960164957527413114840482143558222
    pub static X: Scalar = Scalar([
        0x4e, 0x5a, 0xb4, 0x34, 0x5d, 0x47, 0x08, 0x84, 0x59, 0x13, 0xb4, 0x64, 0x1b, 0xc2,
        0x7d, 0x52, 0x52, 0xa5, 0x85, 0x10, 0x1b, 0xcc, 0x42, 0x44, 0xd4, 0x49, 0xf4, 0xa8,
        0x79, 0xd9, 0xf2, 0x04,
    ]);
    /// y = 2592331292931086675770238855846338635550719849568364935475441891787804997264
    pub static Y: Scalar = Scalar([
        0x90, 0x76, 0x33, 0xfe, 0x1c, 0x4b, 0x66, 0xa4, 0xa2, 0x8d, 0x2d, 0xd7, 0x67, 0x83,
        0x86, 0xc3, 0x53, 0xd0, 0xde, 0x54, 0x55, 0xd4, 0xfc, 0x9d, 0xe8, 0xef, 0x7a, 0xc3,
        0x1f, 0x35, 0xbb, 0x05,
    ]);
    /// z = 5033871415930814945849241457262266927579821285980625165479289807629491019013
    pub static Z: Scalar = Scalar([
        0x05, 0x9d, 0x3e, 0x0b, 0x09, 0x26, 0x50, 0x3d, 0xa3, 0x84, 0xa1, 0x3c, 0x92, 0x7a,
        0xc2, 0x06, 0x41, 0x98, 0xcf, 0x34, 0x3a, 0x24, 0xd5, 0xb7, 0xeb, 0x33, 0x6a, 0x2d,
        0xfc, 0x11, 0x21, 0x0b,
    ]);
    /// w = 3486911242272497535104403593250518247409663771668155364040899665266216860804
    static W: Scalar = Scalar([
        0x84, 0xfc, 0xbc, 0x4f, 0x78, 0x12, 0xa0, 0x06, 0xd7, 0x91, 0xd9, 0x7a, 0x3a, 0x27,
        0xdd, 0x1e, 0x21, 0x43, 0x45, 0xf7, 0xb1, 0xb9, 0x56, 0x7a, 0x81, 0x30, 0x73, 0x44,
        0x96, 0x85, 0xb5, 0x07,
    ]);

    /// x*y = 5690045403673944803228348699031245560686958845067437804563560795922180092780
    static X_TIMES_Y: Scalar = Scalar([
        0x6c, 0x33, 0x74, 0xa1, 0x89, 0x4f, 0x62, 0x21, 0x0a, 0xaa, 0x2f, 0xe1, 0x86, 0xa6,
        0xf9, 0x2c, 0xe0, 0xaa, 0x75, 0xc2, 0x77, 0x95, 0x81, 0xc2, 0x95, 0xfc, 0x08, 0x17,
        0x9a, 0x73, 0x94, 0x0c,
    ]);

    static A_SCALAR: Scalar = Scalar([
        0x1a, 0x0e, 0x97, 0x8a, 0x90, 0xf6, 0x62, 0x2d, 0x37, 0x47, 0x02, 0x3f, 0x8a, 0xd8,
        0x26, 0x4d, 0xa7, 0x58, 0xaa, 0x1b, 0x88, 0xe0, 0x40, 0xd1, 0x58, 0x9e, 0x7b, 0x7f,
        0x23, 0x76, 0xef, 0x09,
    ]);

    static A_NAF: [i8; 256] = [
        0, 13, 0, 0, 0, 0, 0, 0, 0, 7, 0, 0, 0, 0, 0, 0, -9, 0, 0, 0, 0, -11, 0, 0, 0, 0, 3,
        0, 0, 0, 0, 1, 0, 0, 0, 0, 9, 0, 0, 0, 0, -5, 0, 0, 0, 0, 0, 0, 3, 0, 0, 0, 0, 11, 0,
        0, 0, 0, 11, 0, 0, 0, 0, 0, -9, 0, 0, 0, 0, 0, -3, 0, 0, 0, 0, 9, 0, 0, 0, 0, 0, 1, 0,
        0, 0, 0, 0, 0, -1, 0, 0, 0, 0, 0, 9, 0, 0, 0, 0, -15, 0, 0, 0, 0, -7, 0, 0, 0, 0, -9,
        0, 0, 0, 0, 0, 5, 0, 0, 0, 0, 13, 0, 0, 0, 0, 0, -3, 0, 0, 0, 0, -11, 0, 0, 0, 0, -7,
        0, 0, 0, 0, -13, 0, 0, 0, 0, 11, 0, 0, 0, 0, -9, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, -15,
        0, 0, 0, 0, 1, 0, 0, 0, 0, 7, 0, 0, 0, 0, 0, 0, 0, 0, 5, 0, 0, 0, 0, 0, 13, 0, 0, 0,
        0, 0, 0, 11, 0, 0, 0, 0, 0, 15, 0, 0, 0, 0, 0, -9, 0, 0, 0, 0, 0, 0, 0, -1, 0, 0, 0,
        0, 0, 0, 0, 7, 0, 0, 0, 0, 0, -15, 0, 0, 0, 0, 0, 15, 0, 0, 0, 0, 15, 0, 0, 0, 0, 15,
        0, 0, 0, 0, 0, 1, 0, 0, 0, 0,
    ];

    #[test]
    fn non_adjacent_form() {
        let naf = A_SCALAR.non_adjacent_form();
        for i in 0..256 {
            assert_eq!(naf[i], A_NAF[i]);
        }
    }

    #[test]
    fn from_unsigned() {
        let val: u64 = 0xdeadbeefdeadbeef;
        let s = Scalar::from_u64(val);
        assert_eq!(s.0[7], 0xde);
        assert_eq!(s.0[6], 0xad);
        assert_eq!(s.0[5], 0xbe);
        assert_eq!(s.0[4], 0xef);
        assert_eq!(s.0[3], 0xde);
        assert_eq!(s.0[2], 0xad);
        assert_eq!(s.0[1], 0xbe);
        assert_eq!(s.0[0], 0xef);
    }

    #[test]
    fn scalar_multiply_by_one() {
        let test_scalar = Scalar::multiply_add(&X, &Scalar::ONE, &Scalar::ZERO);
        for i in 0..32 {
            assert!(test_scalar.0[i] == X.0[i]);
        }
    }

    #[test]
    fn impl_add() {
        let mut two = Scalar::ZERO;
        two.0[0] = 2;
        let one = Scalar::ONE;
        let should_be_two = &one + &one;
        assert_eq!(should_be_two, two);
    }

    #[test]
    fn impl_sub() {
        let l_minus_1 = crate::constants::L_MINUS_2 + Scalar::ONE;
        let should_be_one = &(l_minus_1 + Scalar::ONE) - &l_minus_1;
        assert_eq!(should_be_one, Scalar::ONE);

        let x_minus_x = &X - &X;
        assert_eq!(x_minus_x, Scalar::ZERO);
    }

    #[allow(non_snake_case)]
    #[test]
    fn impl_mul() {
        let should_be_X_times_Y = &X * &Y;
        assert_eq!(should_be_X_times_Y, X_TIMES_Y);
    }

    #[test]
    fn scalar_multiply_add() {
        let test_scalar = Scalar::multiply_add(&X, &Y, &Z);
        for i in 0..32 {
            assert!(test_scalar.0[i] == W.0[i]);
        }
    }

    #[test]
    fn scalar_multiply_sub() {
        let w = Scalar::multiply_add(&X, &Y, &Z);
        assert_eq!(Scalar::multiply_sub(&X, &Y, &Z), &w - &(&Z + &Z));
    }

    #[test]
    fn square() {
        assert_eq!(X.square(), &X * &X);
    }

    #[test]
    fn scalar_reduce() {
        let mut bignum = [0u8; 64];
        // set bignum = x + 2^256x
        for i in 0..32 {
            bignum[i] = X.0[i];
            bignum[32 + i] = X.0[i];
        }
        // 3958878930004874126169954872055634648693766179881526445624823978500314864344
        // = x + 2^256x (mod l)
        let reduced = Scalar([
            216, 154, 179, 139, 210, 121, 2, 71, 69, 99, 158, 216, 23, 173, 63, 100, 204, 0,
            91, 50, 219, 153, 57, 249, 28, 82, 31, 197, 100, 165, 192, 8,
        ]);
        let test_red = Scalar::from_bytes_mod_order_wide(&bignum);
        for i in 0..32 {
            assert!(test_red.0[i] == reduced.0[i]);
        }
    }

    #[allow(non_snake_case)]
    #[test]
    fn invert() {
        let inv_X = X.invert();
        let should_be_one = &inv_X * &X;
        assert_eq!(should_be_one, Scalar::ONE);
    }

    // Negating a scalar twice should result in the original scalar.
    #[allow(non_snake_case)]
    #[test]
    fn neg_twice_is_identity() {
        let negative_X = -&X;
        let should_be_X = -&negative_X;

        assert_eq!(should_be_X, X);
        assert_eq!(&X + &negative_X, Scalar::ZERO);
        assert_eq!(-&Scalar::ZERO, Scalar::ZERO);
    }

    #[test]
    fn canonical_decoding() {
        // x = 2592331292931086675770238855846338635550719849568364935475441891787804997264
        let canonical_bytes = [
            99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99,
            99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 4,
        ];
        assert!(bool::from(
            Scalar::from_canonical_bytes(canonical_bytes).is_some()
        ));

        // l is not canonical.
        assert!(bool::from(
            Scalar::from_canonical_bytes(crate::constants::BASEPOINT_ORDER.0).is_none()
        ));

        // l - 1 is canonical.
        let l_minus_1 = crate::constants::L_MINUS_2 + Scalar::ONE;
        assert!(bool::from(
            Scalar::from_canonical_bytes(l_minus_1.0).is_some()
        ));

        // A high bit is never canonical.
        let mut high_bit = [0u8; 32];
        high_bit[31] = 0x80;
        assert!(bool::from(Scalar::from_canonical_bytes(high_bit).is_none()));
    }

    #[test]
    fn from_bytes_mod_order_reduces() {
        // l + 2 reduces to 2.
        let mut l_plus_2 = crate::constants::BASEPOINT_ORDER.0;
        l_plus_2[0] += 2;
        let two = Scalar::from_u64(2);
        assert_eq!(Scalar::from_bytes_mod_order(l_plus_2), two);
    }

    #[test]
    fn radix_16_reconstructs() {
        let digits = X.as_radix_16();
        let sixteen = Scalar::from_u64(16);
        let mut acc = Scalar::ZERO;
        for i in (0..64).rev() {
            acc = &acc * &sixteen;
            let digit = digits[i];
            if digit >= 0 {
                acc = &acc + &Scalar::from_u64(digit as u64);
            } else {
                acc = &acc - &Scalar::from_u64((-digit) as u64);
            }
        }
        assert_eq!(acc, X);
    }

    #[test]
    fn radix_32_reconstructs() {
        let digits = X.as_radix_32();
        let thirty_two = Scalar::from_u64(32);
        let mut acc = Scalar::ZERO;
        for i in (0..51).rev() {
            acc = &acc * &thirty_two;
            let digit = digits[i];
            assert!((-16..=16).contains(&digit));
            if digit >= 0 {
                acc = &acc + &Scalar::from_u64(digit as u64);
            } else {
                acc = &acc - &Scalar::from_u64((-digit) as u64);
            }
        }
        assert_eq!(acc, X);
        assert!(digits[50] >= 0);
    }

    #[test]
    fn scalar_derivation_vectors() {
        let vectors: [(&[u8], &str); 3] = [
            (
                b"test1",
                "f4f2ba0eccc056c32241b5e7f648ffe6bf870773e09104f0fd2c28fbd7fc5402",
            ),
            (
                b"ristretto",
                "a17454b11da0ee4f9aed08190c61781c326a0c59bb449133bacc0c75308db805",
            ),
            (
                b"decaf",
                "8107e19264d3e54e9869de056c90dc245dbc097529c4a5ef0dae42e1f3cd7700",
            ),
        ];
        for (input, expected) in vectors {
            let s = Scalar::hash_from_bytes::<Sha512>(input);
            assert_eq!(hex::encode(s.as_bytes()), expected);
        }
    }

    #[test]
    fn scalar_short_derivation_vectors() {
        let vectors: [(&[u8], &str); 3] = [
            (
                b"test1",
                "b16ed7d24b3ecbd4164dcdad374e08c000000000000000000000000000000000",
            ),
            (
                b"ristretto",
                "27bf1d7100b6a72bd2b2f43babb948b500000000000000000000000000000000",
            ),
            (
                b"decaf",
                "39e5d267455abfce52284ac648d4b97100000000000000000000000000000000",
            ),
        ];
        for (input, expected) in vectors {
            let s = Scalar::hash_from_bytes_short::<Sha512>(input);
            assert_eq!(hex::encode(s.as_bytes()), expected);
        }
    }

    #[test]
    fn random_is_canonical() {
        let mut rng = rand::rngs::OsRng;
        for _ in 0..32 {
            let s = Scalar::random(&mut rng);
            assert!(bool::from(Scalar::from_canonical_bytes(s.0).is_some()));
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrip() {
        let json = serde_json::to_string(&X).unwrap();
        let parsed: Scalar = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, X);
    }
}
