pub mod builtin;
pub mod math;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A callable taking any number of numeric arguments.
pub type Function = Arc<dyn Fn(&[f64]) -> Result<f64, String> + Send + Sync>;

/// Caller-supplied functions, keyed by the name used in expressions.
pub type Functions = HashMap<String, Function>;

/// Wraps a closure into a [`Function`].
pub fn function<F>(f: F) -> Function
where
    F: Fn(&[f64]) -> Result<f64, String> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// The name to callable lookup used for one evaluation.
#[derive(Clone, Default)]
pub struct FunctionTable {
    functions: HashMap<String, Function>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges the math library, the `max`/`min`/`pow` helpers and the
    /// caller's functions, later layers replacing earlier ones.
    pub fn build(user: &Functions) -> Self {
        let mut table = Self::new();
        math::register(&mut table);
        builtin::register(&mut table);
        for (name, function) in user {
            table.insert(name, Arc::clone(function));
        }
        table
    }

    pub fn register_function<F>(&mut self, name: &str, function: F)
    where
        F: Fn(&[f64]) -> Result<f64, String> + Send + Sync + 'static,
    {
        self.functions.insert(name.to_string(), Arc::new(function));
    }

    pub fn insert(&mut self, name: &str, function: Function) {
        self.functions.insert(name.to_string(), function);
    }

    pub fn get(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl fmt::Debug for FunctionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("FunctionTable")
            .field("functions", &names)
            .finish()
    }
}

/// Checks a math library result: NaN means the input was outside the
/// function's domain, infinity means the result overflowed.
pub(crate) fn checked(value: f64) -> Result<f64, String> {
    if value.is_nan() {
        Err("math domain error".to_string())
    } else if value.is_infinite() {
        Err("math range error".to_string())
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_contains_every_layer() {
        let user = Functions::from([("double".to_string(), function(|args| Ok(args[0] * 2.0)))]);
        let table = FunctionTable::build(&user);

        assert!(table.contains("sin"));
        assert!(table.contains("log"));
        assert!(table.contains("max"));
        assert!(table.contains("pow"));
        assert!(table.contains("double"));
        assert!(!table.contains("pi"));
    }

    #[test]
    fn test_user_functions_override() {
        let user = Functions::from([
            ("sin".to_string(), function(|_| Ok(42.0))),
            ("max".to_string(), function(|_| Ok(-1.0))),
        ]);
        let table = FunctionTable::build(&user);

        assert_eq!(table.get("sin").map(|f| f(&[0.0])), Some(Ok(42.0)));
        assert_eq!(table.get("max").map(|f| f(&[1.0, 2.0])), Some(Ok(-1.0)));
    }

    #[test]
    fn test_pow_comes_from_builtins() {
        let table = FunctionTable::build(&Functions::new());
        let pow = table.get("pow").expect("pow is registered");
        assert_eq!(pow(&[2.0, 3.0]), Ok(8.0));
        assert_eq!(
            pow(&[0.0, -1.0]),
            Err("0 cannot be raised to a negative power".to_string())
        );
    }

    #[test]
    fn test_build_is_fresh_per_call() {
        let user = Functions::from([("f".to_string(), function(|_| Ok(1.0)))]);
        let with_user = FunctionTable::build(&user);
        let without = FunctionTable::build(&Functions::new());

        assert!(with_user.contains("f"));
        assert!(!without.contains("f"));
        assert_eq!(with_user.len(), without.len() + 1);
    }

    #[test]
    fn test_checked() {
        assert_eq!(checked(1.5), Ok(1.5));
        assert_eq!(checked(f64::NAN), Err("math domain error".to_string()));
        assert_eq!(checked(f64::INFINITY), Err("math range error".to_string()));
    }
}
