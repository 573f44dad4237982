//! Source table loading.
//!
//! The seven source tables are read from CSV files in one directory. Each file has
//! a header row whose column names match the fields of the row types in
//! [`crate::rows`]. A missing file is an empty table; a malformed one is an error.
//!
//! Records are decoded one at a time. A record whose cells do not decode (a
//! non-numeric reading, a bad date, an invalid identifier) is a row failure and
//! follows the same [`RowPolicy`] as the builders.

use serde::de::DeserializeOwned;
use std::path::Path;

use crate::bundle::{RowPolicy, SkippedRow};
use crate::constants::{
    COGNITIVE_CSV, DIAGNOSES_CSV, LABS_CSV, MEDICATIONS_CSV, PATIENTS_CSV, PROCEDURES_CSV,
    VITALS_CSV,
};
use crate::rows::{
    CognitiveRow, DiagnosisRow, LabRow, MedicationRow, PatientRow, ProcedureRow, VitalRow,
};
use crate::{CoreError, CoreResult};

/// The seven independent row-oriented input tables.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SourceTables {
    pub patients: Vec<PatientRow>,
    pub labs: Vec<LabRow>,
    pub vitals: Vec<VitalRow>,
    pub cognitive: Vec<CognitiveRow>,
    pub diagnoses: Vec<DiagnosisRow>,
    pub procedures: Vec<ProcedureRow>,
    pub medications: Vec<MedicationRow>,
}

/// Tables loaded under a [`RowPolicy`], with the records left out.
#[derive(Clone, Debug, Default)]
pub struct LoadedTables {
    pub tables: SourceTables,
    pub skipped: Vec<SkippedRow>,
}

impl SourceTables {
    /// Load every table from CSV files in `dir`, failing on the first bad record.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] if `dir` is not a directory and
    /// [`CoreError::TableRead`] if a present file cannot be parsed into rows.
    pub fn load_dir(dir: &Path) -> CoreResult<Self> {
        Self::load_dir_with_policy(dir, RowPolicy::Abort).map(|loaded| loaded.tables)
    }

    /// Load every table from CSV files in `dir` under `policy`.
    ///
    /// Under [`RowPolicy::Skip`] a record that fails to decode is logged and
    /// recorded in [`LoadedTables::skipped`]; its `index` is the zero-based data row
    /// in the file. I/O errors and a bad header row still fail the load.
    ///
    /// # Errors
    ///
    /// As [`SourceTables::load_dir`], except that undecodable records do not fail
    /// under [`RowPolicy::Skip`].
    pub fn load_dir_with_policy(dir: &Path, policy: RowPolicy) -> CoreResult<LoadedTables> {
        if !dir.is_dir() {
            return Err(CoreError::InvalidInput(format!(
                "input directory does not exist: {}",
                dir.display()
            )));
        }

        let mut loader = TableLoader {
            dir,
            policy,
            skipped: Vec::new(),
        };
        let tables = Self {
            patients: loader.read("patients", PATIENTS_CSV)?,
            labs: loader.read("labs", LABS_CSV)?,
            vitals: loader.read("vitals", VITALS_CSV)?,
            cognitive: loader.read("cognitive", COGNITIVE_CSV)?,
            diagnoses: loader.read("diagnoses", DIAGNOSES_CSV)?,
            procedures: loader.read("procedures", PROCEDURES_CSV)?,
            medications: loader.read("medications", MEDICATIONS_CSV)?,
        };

        Ok(LoadedTables {
            tables,
            skipped: loader.skipped,
        })
    }

    /// Total number of rows across all tables.
    pub fn row_count(&self) -> usize {
        self.patients.len()
            + self.labs.len()
            + self.vitals.len()
            + self.cognitive.len()
            + self.diagnoses.len()
            + self.procedures.len()
            + self.medications.len()
    }
}

struct TableLoader<'a> {
    dir: &'a Path,
    policy: RowPolicy,
    skipped: Vec<SkippedRow>,
}

impl TableLoader<'_> {
    fn read<T: DeserializeOwned>(
        &mut self,
        table: &'static str,
        file_name: &str,
    ) -> CoreResult<Vec<T>> {
        let path = self.dir.join(file_name);
        if !path.is_file() {
            tracing::debug!("no {} in {}, using empty table", file_name, self.dir.display());
            return Ok(Vec::new());
        }

        let table_err = |source: csv::Error| CoreError::TableRead {
            path: path.clone(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(table_err)?;

        let mut rows = Vec::new();
        for (index, record) in reader.deserialize::<T>().enumerate() {
            match record {
                Ok(row) => rows.push(row),
                Err(err) if self.policy == RowPolicy::Skip && is_record_error(&err) => {
                    tracing::warn!("skipping {} row {}: {}", table, index, err);
                    self.skipped.push(SkippedRow {
                        table,
                        index,
                        reason: err.to_string(),
                    });
                }
                Err(err) => return Err(table_err(err)),
            }
        }

        tracing::debug!("loaded {} rows from {}", rows.len(), path.display());
        Ok(rows)
    }
}

/// Errors confined to one record; the reader can carry on past them.
fn is_record_error(err: &csv::Error) -> bool {
    matches!(
        err.kind(),
        csv::ErrorKind::Deserialize { .. } | csv::ErrorKind::UnequalLengths { .. }
    )
}
