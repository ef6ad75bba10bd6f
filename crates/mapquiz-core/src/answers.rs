//! Answer dataset and the validators built from it.
//!
//! A dataset maps region ids to the spellings accepted for that region:
//!
//! ```json
//! { "fr": { "name": "France", "accept": ["france", "french republic"] } }
//! ```
//!
//! Matching is exact against one of the accepted spellings. Spellings are
//! expected to already be in normalized form.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DatasetError;
use crate::normalize::normalize;
use crate::region::{MapTree, RegionTree};

/// Decides whether a guess names a region.
pub trait Validator {
    fn accepts(&self, region_id: &str, guess: &str) -> bool;
}

impl<F> Validator for F
where
    F: Fn(&str, &str) -> bool,
{
    fn accepts(&self, region_id: &str, guess: &str) -> bool {
        self(region_id, guess)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEntry {
    /// Display name.
    pub name: String,
    pub accept: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    entries: BTreeMap<String, AnswerEntry>,
}

impl AnswerSet {
    /// Parse a dataset from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or holds no regions.
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let set: AnswerSet = serde_json::from_str(json)?;
        if set.entries.is_empty() {
            return Err(DatasetError::Empty);
        }
        set.warn_unnormalized();
        Ok(set)
    }

    /// Read and parse a dataset file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let set = Self::from_json_str(&content)?;
        tracing::debug!(path = %path.display(), regions = set.len(), "loaded answer dataset");
        Ok(set)
    }

    pub fn insert(&mut self, id: impl Into<String>, entry: AnswerEntry) {
        self.entries.insert(id.into(), entry);
    }

    /// Number of regions; a full game scores exactly this many.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&AnswerEntry> {
        self.entries.get(id)
    }

    pub fn name(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(|e| e.name.as_str())
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Check that every region on the map has an entry.
    ///
    /// # Errors
    ///
    /// Returns the first region id missing from the dataset.
    pub fn check_against(&self, tree: &MapTree) -> Result<(), DatasetError> {
        for region in tree.regions() {
            let id = tree.region_id(region);
            if !self.entries.contains_key(id) {
                return Err(DatasetError::UnknownRegion(id.to_string()));
            }
        }
        Ok(())
    }

    fn warn_unnormalized(&self) {
        for (id, entry) in &self.entries {
            for spelling in &entry.accept {
                if normalize(spelling) != *spelling {
                    tracing::warn!(region = %id, spelling = %spelling, "accepted spelling is not normalized and can never match");
                }
            }
        }
    }
}

impl Validator for AnswerSet {
    fn accepts(&self, region_id: &str, guess: &str) -> bool {
        match self.entries.get(region_id) {
            Some(entry) => entry.accept.iter().any(|a| a == guess),
            None => {
                tracing::warn!(region = %region_id, "guess for region with no dataset entry");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "fr": { "name": "France", "accept": ["france", "french republic"] },
        "ba": { "name": "Bosnia and Herzegovina", "accept": ["bosnia herzegovina", "bosnia and herzegovina", "bosnia"] }
    }"#;

    #[test]
    fn accepts_any_listed_spelling() {
        let set = AnswerSet::from_json_str(SAMPLE).unwrap();
        assert!(set.accepts("fr", "france"));
        assert!(set.accepts("fr", "french republic"));
        assert!(set.accepts("ba", "bosnia"));
    }

    #[test]
    fn exact_match_only() {
        let set = AnswerSet::from_json_str(SAMPLE).unwrap();
        assert!(!set.accepts("fr", "franc"));
        assert!(!set.accepts("fr", "France"));
        assert!(!set.accepts("ba", "france"));
    }

    #[test]
    fn unknown_region_is_rejected() {
        let set = AnswerSet::from_json_str(SAMPLE).unwrap();
        assert!(!set.accepts("xx", "france"));
    }

    #[test]
    fn empty_dataset_is_an_error() {
        assert!(matches!(
            AnswerSet::from_json_str("{}"),
            Err(DatasetError::Empty)
        ));
    }

    #[test]
    fn malformed_dataset_is_an_error() {
        assert!(matches!(
            AnswerSet::from_json_str(r#"{"fr": {"name": "France"}}"#),
            Err(DatasetError::Parse(_))
        ));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let set = AnswerSet::load(file.path()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.name("fr"), Some("France"));
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = AnswerSet::load(Path::new("/nonexistent/answers.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/answers.json"));
    }

    #[test]
    fn check_against_finds_unmapped_region() {
        let set = AnswerSet::from_json_str(SAMPLE).unwrap();
        let tree = MapTree::from_region_ids(["fr", "de"]);
        let err = set.check_against(&tree).unwrap_err();
        assert!(matches!(err, DatasetError::UnknownRegion(id) if id == "de"));

        let tree = MapTree::from_region_ids(["fr", "ba"]);
        assert!(set.check_against(&tree).is_ok());

        // Nested regions are enumerated too.
        let mut tree = MapTree::from_region_ids(["fr"]);
        let fr = tree.find("fr").unwrap();
        tree.add_region(fr, "de");
        let err = set.check_against(&tree).unwrap_err();
        assert!(matches!(err, DatasetError::UnknownRegion(id) if id == "de"));
    }

    #[test]
    fn closures_are_validators() {
        let only_x = |id: &str, guess: &str| id == "x" && guess == "ex";
        assert!(only_x.accepts("x", "ex"));
        assert!(!only_x.accepts("x", "why"));
    }
}
