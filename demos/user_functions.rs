use strmath_macros::math_fn;
use strmath_rs::{evaluate_with, function, Call, Functions, Value, Variables};

#[math_fn]
fn clamp(x: f64, low: Option<f64>, high: Option<f64>) -> Result<f64, String> {
    let low = low.unwrap_or(0.0);
    let high = high.unwrap_or(1.0);
    if low > high {
        return Err(format!("empty range [{low}, {high}]"));
    }
    Ok(x.clamp(low, high))
}

#[math_fn]
fn mean(first: f64, rest: &[f64]) -> Result<f64, String> {
    Ok((first + rest.iter().sum::<f64>()) / (rest.len() + 1) as f64)
}

fn main() {
    pretty_env_logger::init();

    let functions = Functions::from([
        ("clamp".to_string(), function(clamp)),
        ("mean".to_string(), function(mean)),
        ("double".to_string(), function(|args| Ok(args[0] * 2.0))),
    ]);
    let variables = Variables::from([("x".to_string(), 0.75), ("y".to_string(), -2.0)]);

    for expr in [
        "clamp(x * 2)",
        "clamp(y, -1, 1)",
        "mean(x, y, 4) ** 2",
        "double(mean(1, 2, 3))",
        "clamp(x, 1, 0)",
        "mean()",
    ] {
        match evaluate_with(expr, &variables, &functions) {
            Ok(result) => println!("{expr} = {result}"),
            Err(err) => println!("{expr}: {err}"),
        }
    }

    // Arguments known only at run time go through `Call`.
    let call = Call::new()
        .expression("hypot(a, b) + scale(1)")
        .variables(Value::map([("a", Value::Integer(3)), ("b", Value::Float(4.0))]))
        .functions(Value::map([("scale", function(|args| Ok(args[0] * 10.0)))]));
    println!("{:?}", call.evaluate());

    let bad = Call::new().expression("a").variables(Value::map([("a", "text")]));
    if let Err(err) = bad.evaluate() {
        println!("{err}");
    }
}
