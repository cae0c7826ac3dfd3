use std::{io, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::population::{Person, Population, PopulationError};

/// One row of a pedigree file with the header `name,mother,father,trait`.
#[derive(Debug, Deserialize)]
struct Record {
    name: String,
    mother: Option<String>,
    father: Option<String>,
    #[serde(rename = "trait")]
    observed: Option<String>,
}

impl From<Record> for Person {
    fn from(record: Record) -> Self {
        Self {
            name: record.name,
            mother: record.mother,
            father: record.father,
            observed: match record.observed.as_deref().map(str::trim) {
                Some("1") => Some(true),
                Some("0") => Some(false),
                _ => None,
            },
        }
    }
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{0}")]
    Csv(#[from] csv::Error),
    #[error("invalid pedigree: {0}")]
    Population(#[from] PopulationError),
}

/// Open a pedigree file and validate it.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed,
/// or if the people in it do not form a valid pedigree.
pub fn load(path: impl AsRef<Path>) -> Result<Population, LoadError> {
    let reader = csv::Reader::from_path(path)?;
    collect(reader)
}

/// Read a pedigree from any reader.
///
/// # Errors
///
/// See [`load`].
pub fn from_reader(reader: impl io::Read) -> Result<Population, LoadError> {
    collect(csv::Reader::from_reader(reader))
}

fn collect<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Population, LoadError> {
    let people = reader
        .deserialize::<Record>()
        .map(|record| record.map(Person::from))
        .collect::<Result<Vec<_>, _>>()?;
    log::debug!("read {} people", people.len());
    Ok(Population::new(people)?)
}

#[cfg(test)]
mod tests {
    use super::{from_reader, LoadError};
    use crate::population::PopulationError;

    #[test]
    fn read_family() {
        let data = "name,mother,father,trait\nHarry,Lily,James,\nJames,,,1\nLily,,,0\n";
        let population = from_reader(data.as_bytes()).unwrap();
        let people = population.people();
        assert_eq!(people.len(), 3);
        assert_eq!(people[0].name, "Harry");
        assert_eq!(people[0].mother.as_deref(), Some("Lily"));
        assert_eq!(people[0].father.as_deref(), Some("James"));
        assert_eq!(people[0].observed, None);
        assert_eq!(people[1].mother, None);
        assert_eq!(people[1].observed, Some(true));
        assert_eq!(people[2].observed, Some(false));
    }

    #[test]
    fn unknown_trait_values() {
        let data = "name,mother,father,trait\nArthur,,,maybe\nMolly,,,2\n";
        let population = from_reader(data.as_bytes()).unwrap();
        assert!(population.people().iter().all(|p| p.observed.is_none()));
    }

    #[test]
    fn dangling_parent() {
        let data = "name,mother,father,trait\nHarry,Lily,James,\nJames,,,1\n";
        assert!(matches!(
            from_reader(data.as_bytes()),
            Err(LoadError::Population(PopulationError::UnknownParent { .. }))
        ));
    }

    #[test]
    fn malformed_csv() {
        let data = "name,mother,father,trait\nHarry,Lily\n";
        assert!(matches!(from_reader(data.as_bytes()), Err(LoadError::Csv(_))));
    }
}
