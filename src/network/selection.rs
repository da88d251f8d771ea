//! Selection of the interfaces to monitor.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::AdapterSnapshot;

/// The `interfaces_of_interest` configuration value.
///
/// Accepts `"all"`, a single interface name, or a list of names. The string
/// form is classified once while parsing, so nothing downstream inspects
/// the raw JSON shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawSelector")]
pub enum InterfaceSelector {
    /// Every interface present on the host when the selector is resolved.
    #[default]
    All,
    /// A single interface name.
    Named(String),
    /// An explicit list of interface names.
    List(Vec<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSelector {
    One(String),
    Many(Vec<String>),
}

impl From<RawSelector> for InterfaceSelector {
    fn from(raw: RawSelector) -> Self {
        match raw {
            RawSelector::One(name) if name == Self::ALL => Self::All,
            RawSelector::One(name) => Self::Named(name),
            RawSelector::Many(names) => Self::List(names),
        }
    }
}

impl InterfaceSelector {
    /// Keyword that selects every interface present on the host.
    pub const ALL: &'static str = "all";

    /// The explicitly named interfaces; empty for [`All`](Self::All).
    #[must_use]
    pub fn names(&self) -> &[String] {
        match self {
            Self::All => &[],
            Self::Named(name) => std::slice::from_ref(name),
            Self::List(names) => names,
        }
    }

    /// Resolves the selector against the adapters present right now.
    ///
    /// `All` expands to every adapter name in `available`; the expansion is
    /// a point-in-time list and is not re-evaluated later.
    #[must_use]
    pub fn resolve(&self, available: &[AdapterSnapshot]) -> InterfaceSet {
        match self {
            Self::All => available.iter().map(|a| a.name.clone()).collect(),
            Self::Named(name) => {
                tracing::warn!("Treating interfaces_of_interest value '{name}' as interface name");
                std::iter::once(name.clone()).collect()
            }
            Self::List(names) => names.iter().cloned().collect(),
        }
    }
}

impl fmt::Display for InterfaceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL),
            Self::Named(name) => f.write_str(name),
            Self::List(names) => write!(f, "[{}]", names.join(", ")),
        }
    }
}

/// A deduplicated set of interface names, kept in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct InterfaceSet {
    names: Vec<String>,
}

impl InterfaceSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { names: Vec::new() }
    }

    /// Adds a name if it is not already present. Returns true if it was added.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    /// Returns true if the set contains `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Iterates over the names in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Returns the number of names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Compares membership, ignoring order.
    #[must_use]
    pub fn same_members(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|n| other.contains(n))
    }
}

impl<S: Into<String>> FromIterator<S> for InterfaceSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

impl From<Vec<String>> for InterfaceSet {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}

impl From<InterfaceSet> for Vec<String> {
    fn from(set: InterfaceSet) -> Self {
        set.names
    }
}

impl fmt::Display for InterfaceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.names.join(", "))
    }
}
