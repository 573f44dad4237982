//! Bundle assembly.
//!
//! Runs the matching builder over every row of every source table and collects
//! the results into one `collection` bundle. Entry order is fixed: subjects,
//! diagnoses, lab, vitals, cognitive, procedures, medication courses. Within a
//! table, rows keep their input order. There is no deduplication and no join
//! beyond the shared subject reference.

use fhir::{Bundle, Resource};

use crate::builders::{
    build_cognitive_observation, build_condition, build_lab_observation,
    build_medication_statement, build_patient, build_procedure, build_vital_observations,
};
use crate::tables::SourceTables;
use crate::{CoreError, CoreResult};

/// What to do when a row cannot be converted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RowPolicy {
    /// Stop at the first failing row and return its error.
    #[default]
    Abort,
    /// Log the failing row, record it in [`AssembledBundle::skipped`], carry on.
    Skip,
}

/// A row left out of the bundle under [`RowPolicy::Skip`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedRow {
    pub table: &'static str,
    /// Zero-based data row index within the table.
    pub index: usize,
    pub reason: String,
}

/// Assembly result.
#[derive(Clone, Debug)]
pub struct AssembledBundle {
    pub bundle: Bundle,
    pub skipped: Vec<SkippedRow>,
}

/// Builds bundles from source tables under a [`RowPolicy`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BundleAssembler {
    policy: RowPolicy,
}

impl BundleAssembler {
    pub fn new(policy: RowPolicy) -> Self {
        Self { policy }
    }

    /// Convert every row of `tables` into one ordered bundle.
    ///
    /// # Errors
    ///
    /// Under [`RowPolicy::Abort`], returns [`CoreError::Row`] wrapping the first
    /// builder failure. Under [`RowPolicy::Skip`] this does not fail.
    pub fn assemble(&self, tables: &SourceTables) -> CoreResult<AssembledBundle> {
        let mut resources: Vec<Resource> = Vec::new();
        let mut skipped = Vec::new();

        resources.extend(tables.patients.iter().map(|r| Resource::from(build_patient(r))));
        resources.extend(tables.diagnoses.iter().map(|r| Resource::from(build_condition(r))));

        self.collect("labs", &tables.labs, &mut resources, &mut skipped, |r| {
            Ok(vec![Resource::from(build_lab_observation(r)?)])
        })?;
        self.collect("vitals", &tables.vitals, &mut resources, &mut skipped, |r| {
            Ok(build_vital_observations(r)?
                .into_iter()
                .map(Resource::from)
                .collect())
        })?;
        self.collect("cognitive", &tables.cognitive, &mut resources, &mut skipped, |r| {
            Ok(vec![Resource::from(build_cognitive_observation(r)?)])
        })?;

        resources.extend(tables.procedures.iter().map(|r| Resource::from(build_procedure(r))));
        resources.extend(
            tables
                .medications
                .iter()
                .map(|r| Resource::from(build_medication_statement(r))),
        );

        tracing::info!(
            "assembled bundle with {} entries from {} rows ({} skipped)",
            resources.len(),
            tables.row_count(),
            skipped.len()
        );

        Ok(AssembledBundle {
            bundle: Bundle::collection(resources),
            skipped,
        })
    }

    fn collect<R>(
        &self,
        table: &'static str,
        rows: &[R],
        out: &mut Vec<Resource>,
        skipped: &mut Vec<SkippedRow>,
        build: impl Fn(&R) -> CoreResult<Vec<Resource>>,
    ) -> CoreResult<()> {
        for (index, row) in rows.iter().enumerate() {
            match build(row) {
                Ok(resources) => out.extend(resources),
                Err(err) => match self.policy {
                    RowPolicy::Abort => {
                        return Err(CoreError::Row {
                            table,
                            index,
                            source: Box::new(err),
                        })
                    }
                    RowPolicy::Skip => {
                        tracing::warn!("skipping {} row {}: {}", table, index, err);
                        skipped.push(SkippedRow {
                            table,
                            index,
                            reason: err.to_string(),
                        });
                    }
                },
            }
        }
        Ok(())
    }
}

/// Assemble with [`RowPolicy::Abort`] and return just the bundle.
pub fn build_bundle(tables: &SourceTables) -> CoreResult<Bundle> {
    BundleAssembler::new(RowPolicy::Abort)
        .assemble(tables)
        .map(|assembled| assembled.bundle)
}
