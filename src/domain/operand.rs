// ============================================================================
// Operands
// Domain-tagged arrays passed across the evaluator's dynamic entry points
// ============================================================================

use super::array::NdArray;
use super::shape::Shape;
use crate::numeric::{NumericDomain, TvmError, TvmResult, TvmScalar};
use rust_decimal::Decimal;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which argument of an operation an operand fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OperandRole {
    Rate,
    Cashflows,
    Periods,
    Payment,
    PresentValue,
}

impl fmt::Display for OperandRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperandRole::Rate => write!(f, "rate"),
            OperandRole::Cashflows => write!(f, "cashflows"),
            OperandRole::Periods => write!(f, "periods"),
            OperandRole::Payment => write!(f, "payment"),
            OperandRole::PresentValue => write!(f, "present value"),
        }
    }
}

/// An array tagged with its numeric domain.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operand {
    Float(NdArray<f64>),
    Decimal(NdArray<Decimal>),
}

impl Operand {
    #[inline]
    pub fn domain(&self) -> NumericDomain {
        match self {
            Operand::Float(_) => NumericDomain::Float,
            Operand::Decimal(_) => NumericDomain::Decimal,
        }
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        match self {
            Operand::Float(a) => a.shape(),
            Operand::Decimal(a) => a.shape(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shape().size()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shape().is_empty()
    }

    pub fn as_float(&self) -> Option<&NdArray<f64>> {
        match self {
            Operand::Float(a) => Some(a),
            Operand::Decimal(_) => None,
        }
    }

    pub fn as_decimal(&self) -> Option<&NdArray<Decimal>> {
        match self {
            Operand::Decimal(a) => Some(a),
            Operand::Float(_) => None,
        }
    }

    /// Typed view of this operand in domain `T`.
    ///
    /// # Errors
    /// Returns `DomainMismatch` naming `role` if the operand belongs to
    /// another domain.
    pub fn expect_domain<T: DomainValue>(&self, role: OperandRole) -> TvmResult<&NdArray<T>> {
        T::extract(self).ok_or(TvmError::DomainMismatch {
            expected: T::DOMAIN,
            found: self.domain(),
            role,
        })
    }
}

impl From<NdArray<f64>> for Operand {
    fn from(array: NdArray<f64>) -> Self {
        Operand::Float(array)
    }
}

impl From<NdArray<Decimal>> for Operand {
    fn from(array: NdArray<Decimal>) -> Self {
        Operand::Decimal(array)
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Float(NdArray::scalar(value))
    }
}

impl From<Decimal> for Operand {
    fn from(value: Decimal) -> Self {
        Operand::Decimal(NdArray::scalar(value))
    }
}

impl From<Vec<f64>> for Operand {
    fn from(values: Vec<f64>) -> Self {
        Operand::Float(NdArray::from_vec(values))
    }
}

impl From<Vec<Decimal>> for Operand {
    fn from(values: Vec<Decimal>) -> Self {
        Operand::Decimal(NdArray::from_vec(values))
    }
}

/// Bridges a scalar type to its `Operand` variant.
///
/// Implemented for exactly the two domain scalars; the evaluator uses it
/// to instantiate one typed code path per domain.
pub trait DomainValue: TvmScalar {
    fn extract(operand: &Operand) -> Option<&NdArray<Self>>;

    fn into_operand(array: NdArray<Self>) -> Operand;
}

impl DomainValue for f64 {
    #[inline]
    fn extract(operand: &Operand) -> Option<&NdArray<Self>> {
        operand.as_float()
    }

    #[inline]
    fn into_operand(array: NdArray<Self>) -> Operand {
        Operand::Float(array)
    }
}

impl DomainValue for Decimal {
    #[inline]
    fn extract(operand: &Operand) -> Option<&NdArray<Self>> {
        operand.as_decimal()
    }

    #[inline]
    fn into_operand(array: NdArray<Self>) -> Operand {
        Operand::Decimal(array)
    }
}
