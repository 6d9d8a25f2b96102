pub mod operators;
pub mod provider;
pub mod rational;
pub mod types;

pub use provider::{TypeNameError, TypeProvider, TypeSystem};
pub use rational::{ArithmeticError, MAX_BITS, Rational};
pub use types::{IntegerType, Type, TypeCategory, TypeRef};

#[cfg(test)]
mod tests;
