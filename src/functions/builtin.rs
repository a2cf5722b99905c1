use crate::functions::FunctionTable;
use strmath_macros::math_fn;

/// Registers `max`, `min` and `pow`.
pub fn register(table: &mut FunctionTable) {
    table.register_function("max", max);
    table.register_function("min", min);
    table.register_function("pow", pow);
}

#[math_fn]
fn max(first: f64, rest: &[f64]) -> Result<f64, String> {
    Ok(rest.iter().fold(first, |acc, value| acc.max(*value)))
}

#[math_fn]
fn min(first: f64, rest: &[f64]) -> Result<f64, String> {
    Ok(rest.iter().fold(first, |acc, value| acc.min(*value)))
}

#[math_fn]
fn pow(base: f64, exponent: f64) -> Result<f64, String> {
    if base == 0.0 && exponent < 0.0 {
        return Err("0 cannot be raised to a negative power".to_string());
    }
    let result = base.powf(exponent);
    if result.is_nan() {
        Err(format!(
            "{} cannot be raised to the fractional power {}",
            base, exponent
        ))
    } else if result.is_infinite() {
        Err(format!("{} ** {} overflows", base, exponent))
    } else {
        Ok(result)
    }
}
