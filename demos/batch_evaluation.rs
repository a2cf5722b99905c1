use rayon::prelude::*;
use strmath_rs::{Evaluator, Functions, Variables};

fn main() {
    pretty_env_logger::init();

    let contexts: Vec<Variables> = (1..=8)
        .map(|i| {
            Variables::from([
                ("price".to_string(), 100.0 + f64::from(i) * 5.0),
                ("volume".to_string(), 1000.0 * f64::from(i)),
            ])
        })
        .collect();

    let expression = "price * volume / 1000 - max(price - 110, 0) ** 2";
    let evaluator = Evaluator::new();
    let functions = Functions::new();

    let results: Vec<_> = contexts
        .par_iter()
        .map(|context| evaluator.evaluate(expression, context, &functions))
        .collect();

    for (i, result) in results.iter().enumerate() {
        println!("Result {}: {:?}", i, result);
    }
}
