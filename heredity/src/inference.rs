use crate::{
    population::{PersonSet, Population},
    posterior::Posterior,
    probability::{Copies, Probabilities},
};

/// A full hypothesis about everyone's gene copies and traits.
/// People in neither gene set carry zero copies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    pub one_gene: PersonSet,
    pub two_genes: PersonSet,
    pub have_trait: PersonSet,
}

impl Assignment {
    #[must_use]
    pub const fn copies(&self, i: usize) -> Copies {
        if self.one_gene.contains(i) {
            Copies::One
        } else if self.two_genes.contains(i) {
            Copies::Two
        } else {
            Copies::Zero
        }
    }

    #[must_use]
    pub const fn has_trait(&self, i: usize) -> bool {
        self.have_trait.contains(i)
    }
}

/// Probability of one full assignment under the heredity model.
///
/// Given the parents' copies, each person is independent of everyone else,
/// so the joint probability is the product of per-person terms.
#[must_use]
pub fn joint_probability(
    population: &Population,
    probabilities: &Probabilities,
    assignment: &Assignment,
) -> f64 {
    (0..population.len())
        .map(|i| {
            let copies = assignment.copies(i);
            let gene = population.parents(i).map_or_else(
                || probabilities.gene(copies),
                |(mother, father)| {
                    probabilities.inheritance(
                        assignment.copies(mother),
                        assignment.copies(father),
                        copies,
                    )
                },
            );
            gene * probabilities.trait_given(copies, assignment.has_trait(i))
        })
        .product()
}

/// Whether a candidate trait set agrees with everything that was observed:
/// among the `observed` people, exactly `observed_with_trait` have the trait.
#[must_use]
pub fn consistent_with_evidence(
    have_trait: PersonSet,
    observed: PersonSet,
    observed_with_trait: PersonSet,
) -> bool {
    have_trait.intersection(observed) == observed_with_trait
}

/// Exact posterior gene and trait distributions for everyone in the population.
///
/// Enumerates every joint assignment which agrees with the observed traits,
/// so the running time grows as `2^n * 3^n` in the population size.
#[must_use]
pub fn infer(population: &Population, probabilities: &Probabilities) -> Posterior {
    let mut posterior = Posterior::new(population);
    let everyone = population.everyone();
    let observed = population.observed();
    let observed_with_trait = population.observed_with_trait();

    let mut trait_sets = 0_u64;
    let mut assignments = 0_u64;
    for have_trait in everyone
        .subsets()
        .filter(|&set| consistent_with_evidence(set, observed, observed_with_trait))
    {
        trait_sets += 1;
        for one_gene in everyone.subsets() {
            // Two-copy sets are drawn from whoever is not in the one-copy set.
            for two_genes in everyone.difference(one_gene).subsets() {
                let assignment = Assignment {
                    one_gene,
                    two_genes,
                    have_trait,
                };
                let p = joint_probability(population, probabilities, &assignment);
                posterior.accumulate(&assignment, p);
                assignments += 1;
            }
        }
    }
    log::debug!(
        "enumerated {assignments} assignments over {trait_sets} consistent trait sets for {} \
         people",
        population.len()
    );

    posterior.normalize();
    posterior
}

#[cfg(test)]
mod tests {
    use super::{consistent_with_evidence, infer, joint_probability, Assignment};
    use crate::{
        population::{Person, PersonSet, Population},
        probability::{Copies, Probabilities, GENE_PRIOR},
    };

    const TOLERANCE: f64 = 1e-9;

    fn family() -> Population {
        Population::new(vec![
            Person::child("Harry", "Lily", "James", None),
            Person::founder("James", Some(true)),
            Person::founder("Lily", Some(false)),
        ])
        .unwrap()
    }

    fn assignment(
        population: &Population,
        one: &[&str],
        two: &[&str],
        traits: &[&str],
    ) -> Assignment {
        Assignment {
            one_gene: population.set_of(one).unwrap(),
            two_genes: population.set_of(two).unwrap(),
            have_trait: population.set_of(traits).unwrap(),
        }
    }

    #[test]
    fn joint_probability_of_family() {
        let population = family();
        let probabilities = Probabilities::default();
        let p = joint_probability(
            &population,
            &probabilities,
            &assignment(&population, &["Harry"], &["James"], &["James"]),
        );
        assert!((p - 0.002_664_324_748_8).abs() < 1e-15, "{p}");
    }

    #[test]
    fn joint_probability_of_two_copy_parents() {
        let population = family();
        let probabilities = Probabilities::default();
        let p = joint_probability(
            &population,
            &probabilities,
            &assignment(&population, &[], &["Harry", "James", "Lily"], &["Harry"]),
        );
        let parents = (0.01 * 0.35) * (0.01 * 0.35);
        let child = (1.0 - 0.01) * (1.0 - 0.01) * 0.65;
        assert!((p - parents * child).abs() < 1e-15, "{p}");
    }

    #[test]
    fn evidence_consistency() {
        let population = family();
        let observed = population.observed();
        let with_trait = population.observed_with_trait();
        let consistent = |names: &[&str]| {
            consistent_with_evidence(population.set_of(names).unwrap(), observed, with_trait)
        };
        assert!(consistent(&["James"]));
        assert!(consistent(&["James", "Harry"]));
        assert!(!consistent(&["Harry"]));
        assert!(!consistent(&["James", "Lily"]));

        // Only Harry is unobserved, so two of the eight trait sets remain.
        let remaining = population
            .everyone()
            .subsets()
            .filter(|&set| consistent_with_evidence(set, observed, with_trait))
            .count();
        assert_eq!(remaining, 2);
    }

    #[test]
    fn infer_family() {
        let population = family();
        let posterior = infer(&population, &Probabilities::default());

        let expected = [
            ("Harry", [0.5351, 0.4557, 0.0092], 0.2665),
            ("James", [0.2918, 0.5106, 0.1976], 1.0),
            ("Lily", [0.9827, 0.0136, 0.0036], 0.0),
        ];
        for (name, gene, has_trait) in expected {
            let marginal = posterior.get(name).unwrap();
            for (copies, p) in [Copies::Zero, Copies::One, Copies::Two].into_iter().zip(gene) {
                assert!((marginal.gene(copies) - p).abs() < 1e-4, "{name} {copies}");
            }
            assert!((marginal.has_trait(true) - has_trait).abs() < 1e-4, "{name}");
        }
    }

    #[test]
    fn distributions_sum_to_one() {
        let population = Population::new(vec![
            Person::founder("Arthur", Some(false)),
            Person::founder("Molly", None),
            Person::child("Ron", "Molly", "Arthur", None),
            Person::child("Ginny", "Molly", "Arthur", Some(true)),
            Person::founder("Hermione", Some(false)),
            Person::child("Rose", "Hermione", "Ron", Some(true)),
        ])
        .unwrap();
        let posterior = infer(&population, &Probabilities::default());
        assert_eq!(posterior.len(), 6);
        for (name, marginal) in posterior.iter() {
            assert!((marginal.gene.total() - 1.0).abs() < TOLERANCE, "{name}");
            assert!((marginal.traits.total() - 1.0).abs() < TOLERANCE, "{name}");
        }
    }

    #[test]
    fn unobserved_founders_keep_the_prior() {
        let population = Population::new(vec![
            Person::founder("Molly", None),
            Person::founder("Arthur", None),
            Person::child("Ron", "Molly", "Arthur", None),
        ])
        .unwrap();
        let probabilities = Probabilities::default();
        let posterior = infer(&population, &probabilities);
        let expected_trait: f64 = (0..3)
            .map(|i| GENE_PRIOR[i] * probabilities.trait_given_gene[i])
            .sum();
        for name in ["Molly", "Arthur"] {
            let marginal = posterior.get(name).unwrap();
            for copies in Copies::REPORT_ORDER {
                assert!((marginal.gene(copies) - probabilities.gene(copies)).abs() < TOLERANCE);
            }
            assert!((marginal.has_trait(true) - expected_trait).abs() < TOLERANCE);
        }
    }

    #[test]
    fn fully_observed_population() {
        let population = Population::new(vec![
            Person::founder("Molly", Some(true)),
            Person::founder("Arthur", Some(false)),
        ])
        .unwrap();
        let posterior = infer(&population, &Probabilities::default());
        assert!((posterior.get("Molly").unwrap().has_trait(true) - 1.0).abs() < TOLERANCE);
        assert!((posterior.get("Arthur").unwrap().has_trait(false) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn empty_population() {
        let population = Population::new(Vec::new()).unwrap();
        let posterior = infer(&population, &Probabilities::default());
        assert!(posterior.is_empty());
        assert_eq!(posterior.to_string(), "");
        assert_eq!(population.everyone(), PersonSet::EMPTY);
    }
}
