//! The host math library: the functions an expression can call without the
//! caller supplying anything.

use crate::functions::{checked, FunctionTable};
use strmath_macros::math_fn;

pub fn register(table: &mut FunctionTable) {
    table.register_function("acos", acos);
    table.register_function("acosh", acosh);
    table.register_function("asin", asin);
    table.register_function("asinh", asinh);
    table.register_function("atan", atan);
    table.register_function("atan2", atan2);
    table.register_function("atanh", atanh);
    table.register_function("cbrt", cbrt);
    table.register_function("ceil", ceil);
    table.register_function("comb", comb);
    table.register_function("copysign", copysign);
    table.register_function("cos", cos);
    table.register_function("cosh", cosh);
    table.register_function("degrees", degrees);
    table.register_function("exp", exp);
    table.register_function("exp2", exp2);
    table.register_function("expm1", expm1);
    table.register_function("fabs", fabs);
    table.register_function("factorial", factorial);
    table.register_function("floor", floor);
    table.register_function("fmod", fmod);
    table.register_function("gcd", gcd);
    table.register_function("hypot", hypot);
    table.register_function("isqrt", isqrt);
    table.register_function("lcm", lcm);
    table.register_function("ldexp", ldexp);
    table.register_function("log", log);
    table.register_function("log10", log10);
    table.register_function("log1p", log1p);
    table.register_function("log2", log2);
    table.register_function("perm", perm);
    table.register_function("radians", radians);
    table.register_function("remainder", remainder);
    table.register_function("sin", sin);
    table.register_function("sinh", sinh);
    table.register_function("sqrt", sqrt);
    table.register_function("tan", tan);
    table.register_function("tanh", tanh);
    table.register_function("trunc", trunc);
}

fn domain_error() -> Result<f64, String> {
    Err("math domain error".to_string())
}

/// Rejects values with a fractional part, for the integer functions.
fn integral(name: &str, value: f64) -> Result<f64, String> {
    if value.fract() == 0.0 {
        Ok(value)
    } else {
        Err(format!("{}() only accepts integral values", name))
    }
}

fn non_negative_integral(name: &str, value: f64) -> Result<f64, String> {
    let value = integral(name, value)?;
    if value < 0.0 {
        Err(format!("{}() not defined for negative values", name))
    } else {
        Ok(value)
    }
}

#[math_fn]
fn acos(x: f64) -> Result<f64, String> {
    checked(x.acos())
}

#[math_fn]
fn acosh(x: f64) -> Result<f64, String> {
    checked(x.acosh())
}

#[math_fn]
fn asin(x: f64) -> Result<f64, String> {
    checked(x.asin())
}

#[math_fn]
fn asinh(x: f64) -> Result<f64, String> {
    checked(x.asinh())
}

#[math_fn]
fn atan(x: f64) -> Result<f64, String> {
    checked(x.atan())
}

#[math_fn]
fn atan2(y: f64, x: f64) -> Result<f64, String> {
    checked(y.atan2(x))
}

#[math_fn]
fn atanh(x: f64) -> Result<f64, String> {
    if x.abs() >= 1.0 {
        return domain_error();
    }
    checked(x.atanh())
}

#[math_fn]
fn cbrt(x: f64) -> Result<f64, String> {
    checked(x.cbrt())
}

#[math_fn]
fn ceil(x: f64) -> Result<f64, String> {
    Ok(x.ceil())
}

/// Ways to choose `k` items from `n` without order.
#[math_fn]
fn comb(n: f64, k: f64) -> Result<f64, String> {
    let n = non_negative_integral("comb", n)?;
    let k = non_negative_integral("comb", k)?;
    if k > n {
        return Ok(0.0);
    }
    let k = k.min(n - k);
    let mut result: f64 = 1.0;
    let mut i = 0.0;
    while i < k && result.is_finite() {
        result = result * (n - i) / (i + 1.0);
        i += 1.0;
    }
    checked(result.round())
}

#[math_fn]
fn copysign(x: f64, y: f64) -> Result<f64, String> {
    Ok(x.copysign(y))
}

#[math_fn]
fn cos(x: f64) -> Result<f64, String> {
    checked(x.cos())
}

#[math_fn]
fn cosh(x: f64) -> Result<f64, String> {
    checked(x.cosh())
}

#[math_fn]
fn degrees(x: f64) -> Result<f64, String> {
    checked(x.to_degrees())
}

#[math_fn]
fn exp(x: f64) -> Result<f64, String> {
    checked(x.exp())
}

#[math_fn]
fn exp2(x: f64) -> Result<f64, String> {
    checked(x.exp2())
}

#[math_fn]
fn expm1(x: f64) -> Result<f64, String> {
    checked(x.exp_m1())
}

#[math_fn]
fn fabs(x: f64) -> Result<f64, String> {
    Ok(x.abs())
}

#[math_fn]
fn factorial(n: f64) -> Result<f64, String> {
    let n = non_negative_integral("factorial", n)?;
    let mut result = 1.0_f64;
    let mut i = 2.0;
    while i <= n && result.is_finite() {
        result *= i;
        i += 1.0;
    }
    checked(result)
}

#[math_fn]
fn floor(x: f64) -> Result<f64, String> {
    Ok(x.floor())
}

/// Truncated remainder, sign of `x`; unlike `%` in expressions.
#[math_fn]
fn fmod(x: f64, y: f64) -> Result<f64, String> {
    if y == 0.0 {
        return domain_error();
    }
    checked(x % y)
}

#[math_fn]
fn gcd(values: &[f64]) -> Result<f64, String> {
    let mut result = 0.0_f64;
    for &value in values {
        let mut a = result;
        let mut b = integral("gcd", value)?.abs();
        while b != 0.0 {
            (a, b) = (b, a % b);
        }
        result = a;
    }
    Ok(result)
}

#[math_fn]
fn hypot(values: &[f64]) -> Result<f64, String> {
    checked(values.iter().fold(0.0_f64, |acc, value| acc.hypot(*value)))
}

#[math_fn]
fn isqrt(n: f64) -> Result<f64, String> {
    let n = non_negative_integral("isqrt", n)?;
    let mut root = n.sqrt().floor();
    while root * root > n {
        root -= 1.0;
    }
    while (root + 1.0) * (root + 1.0) <= n {
        root += 1.0;
    }
    Ok(root)
}

#[math_fn]
fn lcm(values: &[f64]) -> Result<f64, String> {
    let mut result = 1.0_f64;
    for &value in values {
        let value = integral("lcm", value)?.abs();
        if value == 0.0 || result == 0.0 {
            result = 0.0;
            continue;
        }
        let divisor = gcd(&[result, value])?;
        result = result / divisor * value;
    }
    checked(result)
}

#[math_fn]
fn ldexp(x: f64, i: f64) -> Result<f64, String> {
    let i = integral("ldexp", i)?;
    checked(x * 2.0_f64.powf(i))
}

/// Natural logarithm, or the logarithm to `base` when one is given.
#[math_fn]
fn log(x: f64, base: Option<f64>) -> Result<f64, String> {
    if x <= 0.0 {
        return domain_error();
    }
    match base {
        None => checked(x.ln()),
        Some(base) if base <= 0.0 => domain_error(),
        Some(base) if base == 1.0 => Err("division by zero".to_string()),
        Some(base) => checked(x.ln() / base.ln()),
    }
}

#[math_fn]
fn log10(x: f64) -> Result<f64, String> {
    if x <= 0.0 {
        return domain_error();
    }
    checked(x.log10())
}

#[math_fn]
fn log1p(x: f64) -> Result<f64, String> {
    if x <= -1.0 {
        return domain_error();
    }
    checked(x.ln_1p())
}

#[math_fn]
fn log2(x: f64) -> Result<f64, String> {
    if x <= 0.0 {
        return domain_error();
    }
    checked(x.log2())
}

/// Ordered arrangements of `k` items out of `n`; `k` defaults to `n`.
#[math_fn]
fn perm(n: f64, k: Option<f64>) -> Result<f64, String> {
    let n = non_negative_integral("perm", n)?;
    let k = non_negative_integral("perm", k.unwrap_or(n))?;
    if k > n {
        return Ok(0.0);
    }
    let mut result = 1.0_f64;
    let mut i = 0.0;
    while i < k && result.is_finite() {
        result *= n - i;
        i += 1.0;
    }
    checked(result)
}

#[math_fn]
fn radians(x: f64) -> Result<f64, String> {
    checked(x.to_radians())
}

/// IEEE 754 remainder: `x - n*y` with `n` the integer nearest `x / y`.
#[math_fn]
fn remainder(x: f64, y: f64) -> Result<f64, String> {
    if y == 0.0 {
        return domain_error();
    }
    let quotient = (x / y).round_ties_even();
    checked(x - quotient * y)
}

#[math_fn]
fn sin(x: f64) -> Result<f64, String> {
    checked(x.sin())
}

#[math_fn]
fn sinh(x: f64) -> Result<f64, String> {
    checked(x.sinh())
}

#[math_fn]
fn sqrt(x: f64) -> Result<f64, String> {
    checked(x.sqrt())
}

#[math_fn]
fn tan(x: f64) -> Result<f64, String> {
    checked(x.tan())
}

#[math_fn]
fn tanh(x: f64) -> Result<f64, String> {
    checked(x.tanh())
}

#[math_fn]
fn trunc(x: f64) -> Result<f64, String> {
    Ok(x.trunc())
}
