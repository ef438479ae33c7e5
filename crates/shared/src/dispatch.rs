//! Discriminator-keyed strategy lookup shared by every kit.

use std::{collections::HashMap, fmt, hash::Hash, sync::Arc};

use crate::error::KitError;

/// A closed set of tags that selects a strategy.
pub trait Discriminator:
    Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Name used in error messages, e.g. `action`.
    const KIND: &'static str;
    /// Every value, in declaration order.
    const ALL: &'static [Self];

    /// Resolves a wire name to its value.
    fn parse(raw: &str) -> Result<Self, KitError> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.to_string() == raw)
            .ok_or_else(|| KitError::unsupported(Self::KIND, raw))
    }
}

/// Immutable discriminator → strategy table.
pub struct StrategyTable<D, S: ?Sized> {
    map: HashMap<D, Arc<S>>,
}

impl<D: Discriminator, S: ?Sized> StrategyTable<D, S> {
    pub fn new(map: HashMap<D, Arc<S>>) -> Self {
        Self { map }
    }

    pub fn select(&self, discriminator: D) -> Result<Arc<S>, KitError> {
        self.map
            .get(&discriminator)
            .cloned()
            .ok_or_else(|| KitError::unsupported(D::KIND, discriminator))
    }

    /// Fails on the first value in `D::ALL` that has no strategy.
    pub fn verify(&self) -> Result<(), KitError> {
        match D::ALL.iter().find(|d| !self.map.contains_key(*d)) {
            Some(missing) => Err(KitError::unsupported(D::KIND, missing)),
            None => Ok(()),
        }
    }

    pub fn registered(&self) -> Vec<D> {
        D::ALL
            .iter()
            .copied()
            .filter(|d| self.map.contains_key(d))
            .collect()
    }
}

impl<D: Discriminator, S: ?Sized> FromIterator<(D, Arc<S>)> for StrategyTable<D, S> {
    fn from_iter<I: IntoIterator<Item = (D, Arc<S>)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
#[path = "tests/dispatch_tests.rs"]
mod tests;
