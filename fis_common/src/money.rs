use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

use crate::op;

pub const VBUCKS_CURRENCY_CODE: &str = "VBK";
pub const FCFA_CURRENCY_CODE: &str = "XOF";

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented as an integer amount: {0}")]
pub struct MoneyConversionError(pub String);

//--------------------------------------      Vbucks       -----------------------------------------------------------
/// An amount of V-Bucks, the upstream storefront's currency-neutral points. Always a non-negative integer in
/// practice; the signed representation matches the sqlite column type.
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct Vbucks(i64);

op!(binary Vbucks, Add, add);
op!(binary Vbucks, Sub, sub);
op!(inplace Vbucks, SubAssign, sub_assign);
op!(unary Vbucks, Neg, neg);

impl Mul<i64> for Vbucks {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self::from(self.value() * rhs)
    }
}

impl Sum for Vbucks {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl From<i64> for Vbucks {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl PartialEq for Vbucks {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Vbucks {}

impl std::hash::Hash for Vbucks {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl TryFrom<u64> for Vbucks {
    type Error = MoneyConversionError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value > i64::MAX as u64 {
            Err(MoneyConversionError(format!("Value {value} is too large to convert to Vbucks")))
        } else {
            #[allow(clippy::cast_possible_wrap)]
            Ok(Self(value as i64))
        }
    }
}

impl Display for Vbucks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} V-Bucks", self.0)
    }
}

impl Vbucks {
    pub fn value(&self) -> i64 {
        self.0
    }
}

//--------------------------------------       Fcfa        -----------------------------------------------------------
/// An amount of CFA francs. The franc has no minor unit, so whole francs are stored directly.
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct Fcfa(i64);

op!(binary Fcfa, Add, add);
op!(binary Fcfa, Sub, sub);
op!(inplace Fcfa, SubAssign, sub_assign);
op!(unary Fcfa, Neg, neg);

impl Mul<i64> for Fcfa {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self::from(self.value() * rhs)
    }
}

impl Sum for Fcfa {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl From<i64> for Fcfa {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl PartialEq for Fcfa {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Fcfa {}

impl Display for Fcfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} FCFA", self.0)
    }
}

impl Fcfa {
    pub fn value(&self) -> i64 {
        self.0
    }
}
