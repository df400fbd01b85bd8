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

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![allow(clippy::needless_range_loop)]

//! # ristretto255
//!
//! **A pure-Rust implementation of the Ristretto prime-order group over
//! the Edwards form of Curve25519.**
//!
//! Many cryptographic schemes require a group of prime order.  Popular
//! and efficient elliptic curves, such as Edwards25519 of `ed25519`
//! fame, are rarely of prime order; there is, however, a convenient
//! method to construct a prime-order group from such curves, called
//! [Ristretto](https://ristretto.group), proposed by Mike Hamburg.
//!
//! The [`ristretto::RistrettoPoint`] type represents an element of the
//! Ristretto group of order
//! \\( \ell = 2\^{252} + 27742317777372353535851937790883648493 \\); the
//! [`scalar::Scalar`] type represents the integers modulo \\( \ell \\).
//!
//! This crate provides:
//!
//! * canonical 32-byte encoding and validating decoding of group
//!   elements ([`ristretto::CompressedRistretto`]);
//! * the Ristretto-flavored Elligator2 map in both directions, and
//!   hash-to-group built on it;
//! * constant-time fixed-base and variable-base scalar multiplication,
//!   with explicitly named variable-time variants for public scalars;
//! * arithmetic on scalars modulo \\( \ell \\).
//!
//! All operations on secret data are constant time: no branch and no
//! memory address depends on secret inputs.  Lookup tables indexed by
//! secret digits are read by linear scan with masked conditional
//! assignment, using the [`subtle`] traits throughout.

#[cfg(feature = "std")]
extern crate std;

// Internal macros for the pass-by-value operator variants.
#[macro_use]
mod macros;

// Modules for low-level operations directly on field elements and curve
// points.

pub mod field;
pub mod scalar;
pub mod edwards;
pub mod ristretto;

// Internal curve representations which are not part of the public API.

pub(crate) mod curve_models;
pub(crate) mod jacobi_quartic;
pub(crate) mod window;

// Low-level curve and point constants, and the pre-computed basepoint
// table.

pub mod constants;

// Traits shared between point types.

pub mod traits;
