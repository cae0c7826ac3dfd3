use std::collections::HashMap;

use thiserror::Error;

/// Largest population a [`PersonSet`] can describe.
pub const MAX_PEOPLE: usize = u64::BITS as usize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub mother: Option<String>,
    pub father: Option<String>,
    /// `None` when nobody observed whether this person has the trait.
    pub observed: Option<bool>,
}

impl Person {
    #[must_use]
    pub fn founder(name: impl Into<String>, observed: Option<bool>) -> Self {
        Self {
            name: name.into(),
            mother: None,
            father: None,
            observed,
        }
    }

    #[must_use]
    pub fn child(
        name: impl Into<String>,
        mother: impl Into<String>,
        father: impl Into<String>,
        observed: Option<bool>,
    ) -> Self {
        Self {
            name: name.into(),
            mother: Some(mother.into()),
            father: Some(father.into()),
            observed,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PopulationError {
    #[error("`{0}` appears more than once")]
    Duplicate(String),
    #[error("`{0}` has only one recorded parent")]
    SingleParent(String),
    #[error("`{person}` refers to unknown parent `{parent}`")]
    UnknownParent { person: String, parent: String },
    #[error("`{0}` is their own ancestor")]
    Cycle(String),
    #[error("population of {size} exceeds the supported maximum of {max}")]
    TooLarge { size: usize, max: usize },
}

/// A validated pedigree.
///
/// Every recorded parent is a member of the population,
/// people have either both parents or none,
/// and nobody is their own ancestor.
#[derive(Clone, Debug, Default)]
pub struct Population {
    people: Vec<Person>,
    parents: Vec<Option<(usize, usize)>>, // (mother, father)
    index: HashMap<String, usize>,
}

impl Population {
    /// Validate people and resolve parent names to indices.
    /// Load order is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the people do not form a valid pedigree.
    pub fn new(people: Vec<Person>) -> Result<Self, PopulationError> {
        if people.len() > MAX_PEOPLE {
            return Err(PopulationError::TooLarge {
                size: people.len(),
                max: MAX_PEOPLE,
            });
        }

        let mut index = HashMap::with_capacity(people.len());
        for (i, person) in people.iter().enumerate() {
            if index.insert(person.name.clone(), i).is_some() {
                return Err(PopulationError::Duplicate(person.name.clone()));
            }
        }

        let lookup = |person: &Person, parent: &String| {
            index
                .get(parent)
                .copied()
                .ok_or_else(|| PopulationError::UnknownParent {
                    person: person.name.clone(),
                    parent: parent.clone(),
                })
        };
        let parents = people
            .iter()
            .map(|person| match (&person.mother, &person.father) {
                (Some(mother), Some(father)) => {
                    Ok(Some((lookup(person, mother)?, lookup(person, father)?)))
                }
                (None, None) => Ok(None),
                _ => Err(PopulationError::SingleParent(person.name.clone())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let population = Self {
            people,
            parents,
            index,
        };
        population.check_acyclic()?;
        Ok(population)
    }

    fn check_acyclic(&self) -> Result<(), PopulationError> {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            Unvisited,
            Visiting,
            Done,
        }

        fn visit(
            population: &Population,
            marks: &mut [Mark],
            i: usize,
        ) -> Result<(), PopulationError> {
            match marks[i] {
                Mark::Done => return Ok(()),
                Mark::Visiting => {
                    return Err(PopulationError::Cycle(population.people[i].name.clone()))
                }
                Mark::Unvisited => {}
            }
            marks[i] = Mark::Visiting;
            if let Some((mother, father)) = population.parents[i] {
                visit(population, marks, mother)?;
                visit(population, marks, father)?;
            }
            marks[i] = Mark::Done;
            Ok(())
        }

        let mut marks = vec![Mark::Unvisited; self.people.len()];
        (0..self.people.len()).try_for_each(|i| visit(self, &mut marks, i))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.people.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    #[must_use]
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Indices of the mother and father of person `i`, if recorded.
    #[must_use]
    pub fn parents(&self, i: usize) -> Option<(usize, usize)> {
        self.parents[i]
    }

    /// The set containing every member of the population.
    #[must_use]
    pub fn everyone(&self) -> PersonSet {
        PersonSet::first(self.people.len())
    }

    /// People who were observed either with or without the trait.
    #[must_use]
    pub fn observed(&self) -> PersonSet {
        self.collect_set(|person| person.observed.is_some())
    }

    /// People who were observed with the trait.
    #[must_use]
    pub fn observed_with_trait(&self) -> PersonSet {
        self.collect_set(|person| person.observed == Some(true))
    }

    fn collect_set(&self, predicate: impl Fn(&Person) -> bool) -> PersonSet {
        self.people
            .iter()
            .enumerate()
            .filter(|(_, person)| predicate(person))
            .fold(PersonSet::EMPTY, |set, (i, _)| set.with(i))
    }

    /// Build a set from names. Returns `None` if any name is unknown.
    #[must_use]
    pub fn set_of(&self, names: &[&str]) -> Option<PersonSet> {
        names.iter().try_fold(PersonSet::EMPTY, |set, name| {
            Some(set.with(self.index_of(name)?))
        })
    }
}

/// A subset of a population, stored as a bitset over population indices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PersonSet(u64);

impl PersonSet {
    pub const EMPTY: Self = Self(0);

    /// The set of the first `n` people.
    #[must_use]
    pub fn first(n: usize) -> Self {
        Self(
            u32::try_from(n)
                .ok()
                .and_then(|n| 1u64.checked_shl(n))
                .map_or(u64::MAX, |bit| bit - 1),
        )
    }

    #[must_use]
    pub const fn contains(self, i: usize) -> bool {
        (self.0 >> i) & 1 == 1
    }

    #[must_use]
    pub const fn with(self, i: usize) -> Self {
        Self(self.0 | 1 << i)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Members of `self` which are not in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Iterate over every subset of this set, including the empty set and itself.
    #[must_use]
    pub const fn subsets(self) -> Subsets {
        Subsets {
            set: self.0,
            next: Some(self.0),
        }
    }
}

pub struct Subsets {
    set: u64,
    next: Option<u64>,
}

impl Iterator for Subsets {
    type Item = PersonSet;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.checked_sub(1).map(|below| below & self.set);
        Some(PersonSet(current))
    }
}
