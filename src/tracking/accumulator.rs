use std::collections::HashMap;

/// In-memory mapping from tracked object key to accumulated look seconds.
///
/// Entries appear lazily on first observation and only ever grow; nothing is
/// removed until the whole accumulator is dropped at process end.
#[derive(Debug, Default, Clone)]
pub struct LookAccumulator {
    times: HashMap<String, f64>,
}

impl LookAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `delta_secs` of look time against `key`. Negative deltas are
    /// ignored so entries stay monotonic under host clock hiccups.
    pub fn add(&mut self, key: &str, delta_secs: f64) {
        if delta_secs <= 0.0 {
            return;
        }
        match self.times.get_mut(key) {
            Some(total) => *total += delta_secs,
            None => {
                self.times.insert(key.to_owned(), delta_secs);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.times.get(key).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.times.iter().map(|(key, total)| (key.as_str(), *total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_entries_lazily_and_sums() {
        let mut acc = LookAccumulator::new();
        assert!(acc.is_empty());

        acc.add("Lamp42", 0.5);
        acc.add("Lamp42", 0.5);
        acc.add("Water", 0.25);

        assert_eq!(acc.len(), 2);
        assert_eq!(acc.get("Lamp42"), Some(1.0));
        assert_eq!(acc.get("Water"), Some(0.25));
        assert_eq!(acc.get("Ghost"), None);
    }

    #[test]
    fn ignores_non_positive_deltas() {
        let mut acc = LookAccumulator::new();
        acc.add("Lamp42", 1.0);
        acc.add("Lamp42", 0.0);
        acc.add("Lamp42", -0.5);

        assert_eq!(acc.get("Lamp42"), Some(1.0));
    }
}
