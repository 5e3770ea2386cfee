// ============================================================================
// Numeric Module
// Dual-domain arithmetic for time-value-of-money kernels
// ============================================================================
//
// This module provides:
// - TvmScalar: the arithmetic capability set the kernels are generic over
// - f64 and rust_decimal::Decimal implementations of it
// - FractionalPowerPolicy: how decimals handle non-integral exponents
// - TvmError: the error taxonomy shared by the whole crate
//
// Design principles:
// - No value crosses domains inside a call
// - All arithmetic returns Result (no NaN/infinity sentinels, no panics)
// - Decimal arithmetic stays decimal; only fractional powers may use f64

mod decimal;
mod errors;
mod float;
mod scalar;

pub use errors::{TvmError, TvmResult};
pub use scalar::{FractionalPowerPolicy, NumericDomain, TvmScalar};
