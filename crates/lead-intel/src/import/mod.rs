//! Batch evaluation of leads exported from the CRM as CSV.

mod parser;

use crate::leads::{evaluate_lead, LeadEvaluation, ScoringVariant, TagOptions};
use crate::affordability::DEFAULT_CONTRACT_RATE;
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug)]
pub enum LeadImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidValue {
        line: usize,
        column: &'static str,
        value: String,
    },
}

impl std::fmt::Display for LeadImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeadImportError::Io(err) => write!(f, "failed to read lead export: {}", err),
            LeadImportError::Csv(err) => write!(f, "invalid lead CSV data: {}", err),
            LeadImportError::InvalidValue {
                line,
                column,
                value,
            } => write!(f, "line {}: '{}' is not a valid {}", line, value, column),
        }
    }
}

impl std::error::Error for LeadImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LeadImportError::Io(err) => Some(err),
            LeadImportError::Csv(err) => Some(err),
            LeadImportError::InvalidValue { .. } => None,
        }
    }
}

impl From<std::io::Error> for LeadImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for LeadImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportedLead {
    pub lead_id: String,
    pub evaluation: LeadEvaluation,
}

/// Evaluates every row of a lead export with shared tagging settings.
#[derive(Debug, Clone)]
pub struct LeadCsvImporter {
    pub options: TagOptions,
    pub variant: ScoringVariant,
    pub default_contract_rate: f64,
}

impl Default for LeadCsvImporter {
    fn default() -> Self {
        Self {
            options: TagOptions::default(),
            variant: ScoringVariant::default(),
            default_contract_rate: DEFAULT_CONTRACT_RATE,
        }
    }
}

impl LeadCsvImporter {
    pub fn import_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<ImportedLead>, LeadImportError> {
        let file = std::fs::File::open(path)?;
        self.import_reader(file)
    }

    pub fn import_reader<R: Read>(&self, reader: R) -> Result<Vec<ImportedLead>, LeadImportError> {
        let records = parser::parse_records(reader, self.variant, self.default_contract_rate)?;
        let leads: Vec<ImportedLead> = records
            .into_iter()
            .map(|record| ImportedLead {
                evaluation: evaluate_lead(&record.intake, &self.options),
                lead_id: record.lead_id,
            })
            .collect();

        info!(count = leads.len(), "lead export evaluated");
        Ok(leads)
    }
}
