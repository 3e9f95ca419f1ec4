use rustc_hash::FxHashMap;

/// The stand-in constants every evaluator starts with.
pub const STANDARD_VARIABLES: [(&str, f64); 6] = [
    ("x", 10.0),
    ("y", 5.0),
    ("z", 3.0),
    ("price", 100.0),
    ("tax", 20.0),
    ("discount", 15.0),
];

/// Resolves variable names during evaluation. Names are case-sensitive.
pub trait Environment: Send + Sync {
    fn resolve(&self, name: &str) -> Option<f64>;
}

impl<F> Environment for F
where
    F: Fn(&str) -> Option<f64> + Send + Sync,
{
    fn resolve(&self, name: &str) -> Option<f64> {
        self(name)
    }
}

/// A closed map of named constants.
#[derive(Debug, Clone, Default)]
pub struct FixedEnvironment {
    values: FxHashMap<String, f64>,
}

impl FixedEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// `x=10, y=5, z=3, price=100, tax=20, discount=15`.
    pub fn standard() -> Self {
        STANDARD_VARIABLES
            .iter()
            .fold(Self::new(), |env, (name, value)| env.with_variable(*name, *value))
    }

    pub fn with_variable<S: Into<String>>(mut self, name: S, value: f64) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl Environment for FixedEnvironment {
    fn resolve(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_has_six_constants() {
        let env = FixedEnvironment::standard();
        assert_eq!(env.len(), 6);
        assert_eq!(env.resolve("price"), Some(100.0));
        assert_eq!(env.resolve("discount"), Some(15.0));
        assert_eq!(env.resolve("Price"), None);
        assert_eq!(env.resolve("w"), None);
    }

    #[test]
    fn closures_are_environments() {
        let env = |name: &str| (name == "rate").then_some(0.5);
        assert_eq!(env.resolve("rate"), Some(0.5));
        assert_eq!(env.resolve("x"), None);
    }
}
