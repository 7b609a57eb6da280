//! Use case catalog loaded from the JSON call configuration document.
//!
//! Two layouts are accepted:
//! - `{"use_cases": {"<id>": {name, description, customer_info, call_settings, ai_prompt}}}`
//! - the flat single-use-case layout with `customer_info`, `call_settings`
//!   and `ai_prompt` at the top level, exposed under the id `default`

mod use_case;

pub use use_case::{CallSettings, UseCase, UseCaseSummary, VoiceSettings};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Id given to the use case of a flat document
pub const DEFAULT_USE_CASE_ID: &str = "default";

#[derive(Debug, Deserialize)]
struct CatalogFile {
    use_cases: Option<BTreeMap<String, UseCase>>,
    #[serde(flatten)]
    flat: UseCase,
}

/// Read-only set of use cases keyed by id
#[derive(Debug, Clone, Default)]
pub struct UseCaseCatalog {
    use_cases: BTreeMap<String, UseCase>,
}

impl UseCaseCatalog {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading use cases from {}", path.display());

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("{} not found. Please create the configuration file.", path.display()))?;

        let catalog = Self::from_json_str(&raw)
            .with_context(|| format!("Error parsing {}", path.display()))?;

        info!("Loaded {} use case(s)", catalog.len());
        Ok(catalog)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(raw)?;

        let use_cases = match file.use_cases {
            Some(use_cases) => use_cases,
            None => {
                let mut flat = file.flat;
                if flat.name.is_empty() {
                    flat.name = "Default".to_string();
                }
                BTreeMap::from([(DEFAULT_USE_CASE_ID.to_string(), flat)])
            }
        };

        if use_cases.is_empty() {
            bail!("configuration defines no use cases");
        }

        Ok(Self { use_cases })
    }

    pub fn get(&self, id: &str) -> Option<&UseCase> {
        self.use_cases.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.use_cases.keys().map(String::as_str)
    }

    pub fn summaries(&self) -> Vec<UseCaseSummary> {
        self.use_cases
            .iter()
            .map(|(id, use_case)| UseCaseSummary {
                id: id.clone(),
                name: use_case.name.clone(),
                description: use_case.description.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.use_cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.use_cases.is_empty()
    }
}
