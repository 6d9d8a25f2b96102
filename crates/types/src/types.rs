// Type system
//
// Types are shared through `TypeRef` handles; a folded constant is just a
// `Type::RationalNumber` carrying its exact value.

use crate::rational::Rational;
use num_bigint::BigInt;
use num_traits::One;
use std::fmt;
use std::rc::Rc;

pub type TypeRef = Rc<Type>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Integer,
    RationalNumber,
    Bool,
    StringLiteral,
    String,
}

/// `uint8` .. `uint256`, `int8` .. `int256`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntegerType {
    bits: u16,
    signed: bool,
}

impl IntegerType {
    pub fn new(bits: u16, signed: bool) -> Option<Self> {
        if bits == 0 || bits > 256 || bits % 8 != 0 {
            return None;
        }
        Some(IntegerType { bits, signed })
    }

    pub fn is_signed(&self) -> bool {
        self.signed
    }

    pub fn min_value(&self) -> BigInt {
        if self.signed {
            -(BigInt::one() << (self.bits as usize - 1))
        } else {
            BigInt::from(0)
        }
    }

    pub fn max_value(&self) -> BigInt {
        if self.signed {
            (BigInt::one() << (self.bits as usize - 1)) - 1
        } else {
            (BigInt::one() << self.bits as usize) - 1
        }
    }

    pub fn contains(&self, value: &BigInt) -> bool {
        *value >= self.min_value() && *value <= self.max_value()
    }

    /// The narrowest type of the same signedness holding both operands
    pub fn common(&self, other: &IntegerType) -> Option<IntegerType> {
        if self.signed != other.signed {
            return None;
        }
        Some(IntegerType {
            bits: self.bits.max(other.bits),
            signed: self.signed,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Integer(IntegerType),
    RationalNumber(Rational),
    Bool,
    StringLiteral(String),
    String,
}

impl Type {
    pub fn category(&self) -> TypeCategory {
        match self {
            Type::Integer(_) => TypeCategory::Integer,
            Type::RationalNumber(_) => TypeCategory::RationalNumber,
            Type::Bool => TypeCategory::Bool,
            Type::StringLiteral(_) => TypeCategory::StringLiteral,
            Type::String => TypeCategory::String,
        }
    }

    /// The exact value of a folded numeric literal type
    pub fn as_rational(&self) -> Option<&Rational> {
        match self {
            Type::RationalNumber(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_fractional(&self) -> bool {
        self.as_rational().is_some_and(Rational::is_fractional)
    }

    /// Resolve a type name as written in a declaration
    pub fn from_name(name: &str) -> Option<Type> {
        match name {
            "bool" => return Some(Type::Bool),
            "string" => return Some(Type::String),
            "uint" => return IntegerType::new(256, false).map(Type::Integer),
            "int" => return IntegerType::new(256, true).map(Type::Integer),
            _ => {}
        }

        let (signed, bits) = if let Some(bits) = name.strip_prefix("uint") {
            (false, bits)
        } else if let Some(bits) = name.strip_prefix("int") {
            (true, bits)
        } else {
            return None;
        };
        // Reject "uint08" and friends
        if bits.starts_with('0') {
            return None;
        }
        let bits = bits.parse::<u16>().ok()?;
        IntegerType::new(bits, signed).map(Type::Integer)
    }

    /// Whether a value of this type may initialise a declaration of `target`
    pub fn is_implicitly_convertible_to(&self, target: &Type) -> bool {
        if self == target {
            return true;
        }
        match (self, target) {
            (Type::RationalNumber(value), Type::Integer(integer)) => {
                value.is_integral() && integer.contains(value.numerator())
            }
            (Type::Integer(from), Type::Integer(to)) => {
                from.signed == to.signed && from.bits <= to.bits
            }
            (Type::StringLiteral(_), Type::String) => true,
            _ => false,
        }
    }
}

impl fmt::Display for IntegerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.signed {
            write!(f, "int{}", self.bits)
        } else {
            write!(f, "uint{}", self.bits)
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Integer(integer) => write!(f, "{}", integer),
            Type::RationalNumber(value) if value.is_integral() => write!(f, "int_const {}", value),
            Type::RationalNumber(value) => write!(f, "rational_const {}", value),
            Type::Bool => write!(f, "bool"),
            Type::StringLiteral(text) => write!(f, "literal_string {:?}", text),
            Type::String => write!(f, "string"),
        }
    }
}
