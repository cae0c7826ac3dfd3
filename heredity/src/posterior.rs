use std::fmt;

use crate::{inference::Assignment, population::Population, probability::Copies};

/// Unnormalized weights over `K` categories.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Distribution<const K: usize>([f64; K]);

impl<const K: usize> Default for Distribution<K> {
    fn default() -> Self {
        Self([0.0; K])
    }
}

impl<const K: usize> Distribution<K> {
    pub fn add(&mut self, category: usize, weight: f64) {
        self.0[category] += weight;
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Scale the weights to sum to one.
    /// A distribution without any weight is left untouched.
    pub fn normalize(&mut self) {
        let total = self.total();
        if total > 0.0 {
            self.0.iter_mut().for_each(|w| *w /= total);
        }
    }
}

/// Gene and trait distributions of one person.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Marginal {
    pub gene: Distribution<3>,
    pub traits: Distribution<2>, // [false, true]
}

impl Marginal {
    #[must_use]
    pub const fn gene(&self, copies: Copies) -> f64 {
        self.gene.0[copies.index()]
    }

    #[must_use]
    pub const fn has_trait(&self, has_trait: bool) -> f64 {
        self.traits.0[has_trait as usize]
    }

    pub fn normalize(&mut self) {
        self.gene.normalize();
        self.traits.normalize();
    }
}

/// Per-person marginals, in population order.
#[derive(Clone, Debug, Default)]
pub struct Posterior {
    names: Vec<String>,
    marginals: Vec<Marginal>,
}

impl Posterior {
    /// All weights start at zero.
    #[must_use]
    pub fn new(population: &Population) -> Self {
        Self {
            names: population
                .people()
                .iter()
                .map(|person| person.name.clone())
                .collect(),
            marginals: vec![Marginal::default(); population.len()],
        }
    }

    /// Add the probability of one joint assignment to each person's
    /// gene and trait categories implied by that assignment.
    pub fn accumulate(&mut self, assignment: &Assignment, p: f64) {
        for (i, marginal) in self.marginals.iter_mut().enumerate() {
            marginal.gene.add(assignment.copies(i).index(), p);
            marginal.traits.add(usize::from(assignment.has_trait(i)), p);
        }
    }

    pub fn normalize(&mut self) {
        self.marginals.iter_mut().for_each(Marginal::normalize);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Marginal> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.marginals[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Marginal)> {
        self.names.iter().map(String::as_str).zip(&self.marginals)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl fmt::Display for Posterior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, marginal) in self.iter() {
            writeln!(f, "{name}:")?;
            writeln!(f, "  Gene:")?;
            for copies in Copies::REPORT_ORDER {
                writeln!(f, "    {copies}: {:.4}", marginal.gene(copies))?;
            }
            writeln!(f, "  Trait:")?;
            writeln!(f, "    True: {:.4}", marginal.has_trait(true))?;
            writeln!(f, "    False: {:.4}", marginal.has_trait(false))?;
        }
        Ok(())
    }
}
