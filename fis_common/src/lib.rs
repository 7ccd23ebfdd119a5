mod money;

pub mod helpers;
pub mod op;
mod secret;

pub use money::{Fcfa, MoneyConversionError, Vbucks, FCFA_CURRENCY_CODE, VBUCKS_CURRENCY_CODE};
pub use secret::Secret;
