use crate::error::EvaluationError;
use std::fmt;

/// Precedence tiers, resolved in declaration order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Tier {
    Exponent,
    Multiplicative,
    Additive,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Power,
    Multiply,
    Divide,
    FloorDivide,
    Modulo,
    Add,
    Subtract,
}

impl Operator {
    pub fn tier(&self) -> Tier {
        match self {
            Operator::Power => Tier::Exponent,
            Operator::Multiply | Operator::Divide | Operator::FloorDivide | Operator::Modulo => {
                Tier::Multiplicative
            }
            Operator::Add | Operator::Subtract => Tier::Additive,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Power => "**",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::FloorDivide => "//",
            Operator::Modulo => "%",
            Operator::Add => "+",
            Operator::Subtract => "-",
        }
    }

    /// Applies the operator. The result is always finite: anything else
    /// could not be written back into the expression as a literal.
    pub fn apply(&self, lhs: f64, rhs: f64) -> Result<f64, EvaluationError> {
        let zero_division = || EvaluationError::ZeroDivision {
            lhs,
            operator: *self,
            rhs,
        };

        let result = match self {
            Operator::Power => lhs.powf(rhs),
            Operator::Multiply => lhs * rhs,
            Operator::Divide => {
                if rhs == 0.0 {
                    return Err(zero_division());
                }
                lhs / rhs
            }
            Operator::FloorDivide => {
                if rhs == 0.0 {
                    return Err(zero_division());
                }
                floor_divide(lhs, rhs)
            }
            Operator::Modulo => {
                if rhs == 0.0 {
                    return Err(zero_division());
                }
                floored_modulo(lhs, rhs)
            }
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
        };

        if result.is_finite() {
            Ok(result)
        } else {
            Err(EvaluationError::InvalidResult {
                lhs,
                operator: *self,
                rhs,
                result,
            })
        }
    }
}

/// Remainder carrying the sign of the divisor.
fn floored_modulo(lhs: f64, rhs: f64) -> f64 {
    let remainder = lhs % rhs;
    if remainder == 0.0 {
        0.0_f64.copysign(rhs)
    } else if (remainder < 0.0) != (rhs < 0.0) {
        remainder + rhs
    } else {
        remainder
    }
}

/// Quotient rounded towards negative infinity, computed from the truncated
/// remainder so that `lhs == rhs * (lhs // rhs) + lhs % rhs` holds as
/// closely as floating point allows.
fn floor_divide(lhs: f64, rhs: f64) -> f64 {
    let remainder = lhs % rhs;
    let mut quotient = (lhs - remainder) / rhs;
    if remainder != 0.0 && (remainder < 0.0) != (rhs < 0.0) {
        quotient -= 1.0;
    }

    if quotient == 0.0 {
        return 0.0_f64.copysign(lhs / rhs);
    }
    let floored = quotient.floor();
    if quotient - floored > 0.5 {
        floored + 1.0
    } else {
        floored
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl TryFrom<&str> for Operator {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "**" => Ok(Operator::Power),
            "*" => Ok(Operator::Multiply),
            "/" => Ok(Operator::Divide),
            "//" => Ok(Operator::FloorDivide),
            "%" => Ok(Operator::Modulo),
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            _ => Err(format!("Unknown operator: {}", value)),
        }
    }
}
