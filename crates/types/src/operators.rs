// Operator typing
//
// Result types of unary and binary operators, per operand category. Literal
// operands fold exactly here; everything else resolves to a common type.

use crate::rational::Rational;
use crate::types::{IntegerType, Type};
use parser::ast::{BinaryOp, UnaryOp};

impl Type {
    /// Type of `op self`, or `None` when the operator does not apply
    pub fn unary_operator_result(&self, op: UnaryOp) -> Option<Type> {
        match (self, op) {
            (Type::RationalNumber(value), UnaryOp::Negate) => Some(Type::RationalNumber(-value)),
            (Type::RationalNumber(value), UnaryOp::BitNot) => {
                value.checked_bit_not().ok().map(Type::RationalNumber)
            }
            (Type::Integer(integer), UnaryOp::Negate) if integer.is_signed() => Some(self.clone()),
            (Type::Integer(_), UnaryOp::BitNot) => Some(self.clone()),
            (Type::Bool, UnaryOp::Not) => Some(Type::Bool),
            _ => None,
        }
    }

    /// Type of `self op other`, or `None` when the operator does not apply.
    ///
    /// Comparisons between integers report the operands' common type and
    /// comparisons between literals report `bool`; either way the value of a
    /// comparison is typed `bool` by its consumer.
    pub fn binary_operator_result(&self, op: BinaryOp, other: &Type) -> Option<Type> {
        match (self, other) {
            (Type::RationalNumber(lhs), Type::RationalNumber(rhs)) => {
                if op.is_comparison() {
                    return Some(Type::Bool);
                }
                rational_binary(lhs, op, rhs).map(Type::RationalNumber)
            }
            (Type::Integer(lhs), Type::Integer(rhs)) => integer_binary(lhs, op, Some(rhs)),
            (Type::Integer(lhs), Type::RationalNumber(rhs)) => {
                if rhs.is_fractional() {
                    return None;
                }
                let fits = if is_shift_or_pow(op) {
                    !rhs.is_negative()
                } else {
                    lhs.contains(rhs.numerator())
                };
                if !fits {
                    return None;
                }
                integer_binary(lhs, op, None)
            }
            (Type::RationalNumber(lhs), Type::Integer(rhs)) => {
                if lhs.is_fractional() || !rhs.contains(lhs.numerator()) {
                    return None;
                }
                integer_binary(rhs, op, Some(rhs))
            }
            (Type::Bool, Type::Bool) => match op {
                BinaryOp::LogicalAnd | BinaryOp::LogicalOr | BinaryOp::Eq | BinaryOp::NotEq => {
                    Some(Type::Bool)
                }
                _ => None,
            },
            _ => None,
        }
    }
}

fn is_shift_or_pow(op: BinaryOp) -> bool {
    matches!(op, BinaryOp::Shl | BinaryOp::Shr | BinaryOp::Pow)
}

fn rational_binary(lhs: &Rational, op: BinaryOp, rhs: &Rational) -> Option<Rational> {
    match op {
        BinaryOp::Add => lhs.checked_add(rhs).ok(),
        BinaryOp::Sub => lhs.checked_sub(rhs).ok(),
        BinaryOp::Mul => lhs.checked_mul(rhs).ok(),
        BinaryOp::Div => lhs.checked_div(rhs).ok(),
        BinaryOp::Mod => lhs.checked_rem(rhs).ok(),
        BinaryOp::Pow => lhs.checked_pow(rhs).ok(),
        BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor => {
            if lhs.is_fractional() || rhs.is_fractional() {
                return None;
            }
            Some(match op {
                BinaryOp::BitAnd => lhs.bit_and(rhs),
                BinaryOp::BitOr => lhs.bit_or(rhs),
                _ => lhs.bit_xor(rhs),
            })
        }
        BinaryOp::Shl => lhs.checked_shl(rhs).ok(),
        BinaryOp::Shr => lhs.checked_shr(rhs).ok(),
        _ => None,
    }
}

// `rhs` is `None` when the right operand is a literal already checked to fit.
fn integer_binary(lhs: &IntegerType, op: BinaryOp, rhs: Option<&IntegerType>) -> Option<Type> {
    match op {
        BinaryOp::LogicalAnd | BinaryOp::LogicalOr => None,
        // Shift amounts and exponents must be unsigned, the result keeps the left type
        BinaryOp::Shl | BinaryOp::Shr | BinaryOp::Pow => match rhs {
            Some(rhs) if rhs.is_signed() => None,
            _ => Some(Type::Integer(*lhs)),
        },
        _ => match rhs {
            Some(rhs) => lhs.common(rhs).map(Type::Integer),
            None => Some(Type::Integer(*lhs)),
        },
    }
}
