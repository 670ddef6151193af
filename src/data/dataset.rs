use std::collections::HashSet;
use std::path::Path;

use anyhow::Context as _;

use crate::{
    data::palette::Mechanism,
    foundation::error::{MorphError, MorphResult},
};

/// One row of the species-study dataset.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StudyRecord {
    #[serde(rename = "SpeciesBinomial")]
    pub species_binomial: String,
    #[serde(rename = "SpeciesGrouped")]
    pub species_group: String,
    #[serde(rename = "CompMech")]
    pub mechanism: String,
    #[serde(rename = "Type", default)]
    pub study_type: String,
    #[serde(rename = "Title", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "Year", default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
}

impl StudyRecord {
    pub fn mechanism(&self) -> Mechanism {
        Mechanism::parse(&self.mechanism)
    }
}

/// A species occurrence as consumed by a layout: identity plus grouping attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeciesItem {
    pub binomial: String,
    pub mechanism: Mechanism,
}

/// Records of one circle-packing group, in first-appearance order.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeciesGroup {
    pub name: String,
    pub items: Vec<SpeciesItem>,
}

/// Records of one grid band, grouped by mechanism in first-appearance order.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeBand {
    pub study_type: String,
    pub by_mechanism: Vec<(Mechanism, Vec<SpeciesItem>)>,
}

impl TypeBand {
    pub fn len(&self) -> usize {
        self.by_mechanism.iter().map(|(_, items)| items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug, Default)]
pub struct Dataset {
    records: Vec<StudyRecord>,
}

impl Dataset {
    /// Builds a dataset, dropping rows without a species binomial.
    pub fn new(records: Vec<StudyRecord>) -> Self {
        let before = records.len();
        let records: Vec<StudyRecord> = records
            .into_iter()
            .filter(|r| !r.species_binomial.trim().is_empty())
            .collect();
        if records.len() != before {
            tracing::warn!(
                dropped = before - records.len(),
                "skipping dataset rows without a species binomial"
            );
        }
        Self { records }
    }

    pub fn from_json_str(s: &str) -> MorphResult<Self> {
        let records: Vec<StudyRecord> = serde_json::from_str(s)?;
        Ok(Self::new(records))
    }

    pub fn from_path(path: &Path) -> MorphResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read dataset '{}'", path.display()))?;
        Self::from_json_str(&text).map_err(|e| match e {
            MorphError::Serde(msg) => {
                MorphError::serde(format!("dataset '{}': {msg}", path.display()))
            }
            other => other,
        })
    }

    pub fn records(&self) -> &[StudyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows grouped by species group for the circle packing.
    ///
    /// A binomial appears at most once across all groups; the first row wins.
    pub fn species_groups(&self) -> Vec<SpeciesGroup> {
        let mut seen = HashSet::<&str>::new();
        let mut groups = Vec::<SpeciesGroup>::new();
        for r in &self.records {
            if !seen.insert(r.species_binomial.as_str()) {
                continue;
            }
            let item = SpeciesItem {
                binomial: r.species_binomial.clone(),
                mechanism: r.mechanism(),
            };
            match groups.iter_mut().find(|g| g.name == r.species_group) {
                Some(g) => g.items.push(item),
                None => groups.push(SpeciesGroup {
                    name: r.species_group.clone(),
                    items: vec![item],
                }),
            }
        }
        groups
    }

    /// Rows with a recognized mechanism, grouped by study type then mechanism.
    ///
    /// A binomial appears at most once across all bands; the first row wins.
    pub fn type_bands(&self) -> Vec<TypeBand> {
        let mut seen = HashSet::<&str>::new();
        let mut bands = Vec::<TypeBand>::new();
        for r in &self.records {
            let mechanism = r.mechanism();
            if !mechanism.is_recognized() {
                continue;
            }
            if !seen.insert(r.species_binomial.as_str()) {
                continue;
            }
            let item = SpeciesItem {
                binomial: r.species_binomial.clone(),
                mechanism: mechanism.clone(),
            };

            let band = match bands.iter().position(|b| b.study_type == r.study_type) {
                Some(idx) => &mut bands[idx],
                None => {
                    bands.push(TypeBand {
                        study_type: r.study_type.clone(),
                        by_mechanism: Vec::new(),
                    });
                    let last = bands.len() - 1;
                    &mut bands[last]
                }
            };
            match band.by_mechanism.iter_mut().find(|(m, _)| *m == mechanism) {
                Some((_, items)) => items.push(item),
                None => band.by_mechanism.push((mechanism, vec![item])),
            }
        }
        bands
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/dataset.rs"]
mod tests;
