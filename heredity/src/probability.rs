use std::fmt;

/// Unconditional probability of carrying 0, 1 or 2 copies of the gene.
pub const GENE_PRIOR: [f64; 3] = [0.96, 0.03, 0.01];
/// Probability of exhibiting the trait given 0, 1 or 2 copies of the gene.
pub const TRAIT_PROBABILITY: [f64; 3] = [0.01, 0.56, 0.65];
/// Probability that a copy flips when passed from parent to child.
pub const MUTATION_RATE: f64 = 0.01;

/// Number of copies of the gene a person carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Copies {
    Zero,
    One,
    Two,
}

impl Copies {
    /// Ordered the way reports list them.
    pub const REPORT_ORDER: [Self; 3] = [Self::Two, Self::One, Self::Zero];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Copies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Conditional probability table of the heredity model.
///
/// Built once and handed to the inference routine by reference,
/// so alternative models only need a different table.
#[derive(Clone, Debug, PartialEq)]
pub struct Probabilities {
    /// `P(copies)` for people without recorded parents.
    pub gene: [f64; 3],
    /// `P(trait | copies)`.
    pub trait_given_gene: [f64; 3],
    pub mutation: f64,
}

impl Default for Probabilities {
    fn default() -> Self {
        Self {
            gene: GENE_PRIOR,
            trait_given_gene: TRAIT_PROBABILITY,
            mutation: MUTATION_RATE,
        }
    }
}

impl Probabilities {
    #[must_use]
    pub const fn gene(&self, copies: Copies) -> f64 {
        self.gene[copies.index()]
    }

    /// Probability that a person with `copies` does (or does not) show the trait.
    #[must_use]
    pub fn trait_given(&self, copies: Copies, has_trait: bool) -> f64 {
        let p = self.trait_given_gene[copies.index()];
        if has_trait {
            p
        } else {
            1.0 - p
        }
    }

    /// Probability that a parent with `copies` passes a copy on to the child.
    #[must_use]
    pub fn transmission(&self, copies: Copies) -> f64 {
        match copies {
            Copies::Zero => self.mutation,
            Copies::One => 0.5,
            Copies::Two => 1.0 - self.mutation,
        }
    }

    /// Probability of the child having `copies` given what each parent passes on.
    #[must_use]
    pub fn inheritance(&self, mother: Copies, father: Copies, copies: Copies) -> f64 {
        let from_mother = self.transmission(mother);
        let from_father = self.transmission(father);
        match copies {
            Copies::Zero => (1.0 - from_mother) * (1.0 - from_father),
            Copies::One => from_mother.mul_add(1.0 - from_father, (1.0 - from_mother) * from_father),
            Copies::Two => from_mother * from_father,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Copies, Probabilities};

    #[test]
    fn inheritance_sums_to_one() {
        let probabilities = Probabilities::default();
        for mother in Copies::REPORT_ORDER {
            for father in Copies::REPORT_ORDER {
                let total: f64 = Copies::REPORT_ORDER
                    .into_iter()
                    .map(|child| probabilities.inheritance(mother, father, child))
                    .sum();
                assert!((total - 1.0).abs() < 1e-12, "{mother} x {father}: {total}");
            }
        }
    }

    #[test]
    fn two_copy_parents() {
        let probabilities = Probabilities::default();
        let p = probabilities.inheritance(Copies::Two, Copies::Two, Copies::Two);
        assert!((p - 0.9801).abs() < 1e-12);
        let p = probabilities.inheritance(Copies::Zero, Copies::Zero, Copies::Zero);
        assert!((p - 0.9801).abs() < 1e-12);
    }

    #[test]
    fn trait_complements() {
        let probabilities = Probabilities::default();
        assert!((probabilities.trait_given(Copies::Two, true) - 0.65).abs() < 1e-12);
        assert!((probabilities.trait_given(Copies::Two, false) - 0.35).abs() < 1e-12);
        assert!((probabilities.trait_given(Copies::Zero, false) - 0.99).abs() < 1e-12);
    }
}
