//! Named boolean parameters and their per-tick snapshots.

use std::fmt;

use rustc_hash::FxHashMap;

/// The values of every parameter at one instant.
///
/// Built fresh each tick by the caller and read, never mutated, by
/// [`DecisionTree::evaluate`][crate::DecisionTree::evaluate].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterSnapshot {
    values: FxHashMap<String, bool>,
}

impl ParameterSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: bool) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: bool) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.values.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for ParameterSnapshot {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (name, value) in iter {
            snapshot.set(name, value);
        }
        snapshot
    }
}

type Predicate<E> = Box<dyn Fn(&E) -> bool + Send + Sync>;

/// A registry of named predicates over a caller-owned environment `E`.
///
/// Each predicate is evaluated on demand by [`snapshot`](Self::snapshot);
/// nothing is cached between calls.
///
/// ```
/// use dpm_decision::Parameters;
///
/// struct Room { fridge_ping: bool }
///
/// let params = Parameters::new().with("fridge", |r: &Room| r.fridge_ping);
/// let snap = params.snapshot(&Room { fridge_ping: true });
/// assert_eq!(snap.get("fridge"), Some(true));
/// ```
pub struct Parameters<E> {
    predicates: Vec<(String, Predicate<E>)>,
}

impl<E> Parameters<E> {
    pub fn new() -> Self {
        Self { predicates: Vec::new() }
    }

    /// Register `predicate` under `name`, replacing any earlier one.
    pub fn with<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        self.predicates.retain(|(n, _)| *n != name);
        self.predicates.push((name, Box::new(predicate)));
        self
    }

    /// Evaluate every predicate against `env`.
    pub fn snapshot(&self, env: &E) -> ParameterSnapshot {
        self.predicates
            .iter()
            .map(|(name, predicate)| (name.as_str(), predicate(env)))
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.predicates.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl<E> Default for Parameters<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Parameters<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
