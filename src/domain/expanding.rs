use std::fmt;

/// Payload of an expansion tree node: the value plus the best solution
/// reached somewhere in its subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expanding<T> {
    pub value: T,
    pub solution: Option<T>,
}

impl<T> Expanding<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            solution: None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Expanding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.solution {
            Some(solution) => write!(f, "{} [solution: {}]", self.value, solution),
            None => write!(f, "{}", self.value),
        }
    }
}
