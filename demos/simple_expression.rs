use log::debug;
use std::sync::Arc;
use strmath_rs::{evaluate, Evaluator, Functions, Step, TraceSink, Variables};

/// Prints every rewrite step as it happens.
struct PrintSteps;

impl TraceSink for PrintSteps {
    fn record(&self, step: &Step<'_>) {
        println!("  {step}");
    }
}

fn main() {
    pretty_env_logger::init();

    for expr in ["1 + 2", "2 ** 3 ** 2", "3 + 4 * 2 / (1 - 5) ** 2", "10 // 3 + 10 % 3"] {
        match evaluate(expr) {
            Ok(result) => println!("{expr} = {result}"),
            Err(err) => println!("{expr}: {err}"),
        }
    }

    // One failure of each kind.
    for expr in ["", "1 / 0", "a + 1", "2(3)"] {
        let result = evaluate(expr);
        debug!("{expr:?} -> {result:?}");
        if let Err(err) = result {
            println!("{expr:?}: {err}");
        }
    }

    let evaluator = Evaluator::new().with_trace(Arc::new(PrintSteps));
    let variables = Variables::from([("r".to_string(), 1.5)]);
    println!("tracing max(1, r) * (2 + r) ** 2:");
    let result = evaluator.evaluate("max(1, r) * (2 + r) ** 2", &variables, &Functions::new());
    println!("result: {result:?}");
}
