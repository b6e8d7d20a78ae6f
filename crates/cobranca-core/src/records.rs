//! Contact record source — loads the billing spreadsheet.
//!
//! The input CSV must carry the columns `nome`, `telefone`, `valor`
//! and `data_vencimento`; rows are mapped by header via serde. Any
//! problem here is fatal: the batch never starts on a bad file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CobrancaError, Result};

/// One row of contact/billing data. Never mutated after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Customer name, substituted into `{nome}`.
    pub nome: String,
    /// Local-format phone number; the country code is prefixed at
    /// dispatch time.
    pub telefone: String,
    /// Amount due, substituted into `{valor}`.
    pub valor: f64,
    /// Due date as written in the spreadsheet, substituted into
    /// `{vencimento}`.
    pub data_vencimento: String,
}

impl ContactRecord {
    /// Per-record sanity check. A failure here skips the record but
    /// never aborts the batch.
    pub fn validate(&self) -> Result<()> {
        if self.nome.trim().is_empty() {
            return Err(CobrancaError::Record("empty 'nome' field".into()));
        }
        if self.telefone.trim().is_empty() {
            return Err(CobrancaError::Record("empty 'telefone' field".into()));
        }
        Ok(())
    }
}

/// Load the contact spreadsheet, in source order.
pub fn load_records(path: &Path) -> Result<Vec<ContactRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| CobrancaError::Load(format!("{}: {e}", path.display())))?;

    let mut records = Vec::new();
    for row in reader.deserialize::<ContactRecord>() {
        let record = row.map_err(|e| CobrancaError::Load(format!("{}: {e}", path.display())))?;
        records.push(record);
    }

    tracing::debug!("Loaded {} contact(s) from {}", records.len(), path.display());
    Ok(records)
}
