use chrono::{DateTime, FixedOffset};
use fhir::{
    CodeableConcept, Coding, Observation, ObservationComponent, ObservationStatus, Quantity,
    Reference,
};

use super::{effective_at_midnight, format_date_time, observation_category, present};
use crate::constants::{
    BP_PANEL_CODE, BP_PANEL_DISPLAY, BP_PANEL_TEXT, CATEGORY_VITAL_SIGNS, LOINC_SYSTEM,
    MMHG_UCUM, MMHG_UNIT, UCUM_SYSTEM,
};
use crate::ids::patient_reference;
use crate::rows::VitalRow;
use crate::CoreResult;

/// Single-value vital signs, each with a fixed LOINC code and UCUM unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VitalSign {
    HeartRate,
    BodyHeight,
    BodyWeight,
}

impl VitalSign {
    pub fn loinc_code(self) -> &'static str {
        match self {
            VitalSign::HeartRate => "8867-4",
            VitalSign::BodyHeight => "8302-2",
            VitalSign::BodyWeight => "29463-7",
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            VitalSign::HeartRate => "Heart rate",
            VitalSign::BodyHeight => "Body height",
            VitalSign::BodyWeight => "Body weight",
        }
    }

    /// Human-readable unit.
    pub fn unit(self) -> &'static str {
        match self {
            VitalSign::HeartRate => "beats/min",
            VitalSign::BodyHeight => "cm",
            VitalSign::BodyWeight => "kg",
        }
    }

    /// UCUM unit code.
    pub fn ucum_code(self) -> &'static str {
        match self {
            VitalSign::HeartRate => "/min",
            VitalSign::BodyHeight => "cm",
            VitalSign::BodyWeight => "kg",
        }
    }
}

#[derive(Clone, Copy)]
enum BloodPressure {
    Systolic,
    Diastolic,
}

impl BloodPressure {
    fn coding(self) -> Coding {
        match self {
            BloodPressure::Systolic => {
                Coding::new(LOINC_SYSTEM, "8480-6").with_display("Systolic blood pressure")
            }
            BloodPressure::Diastolic => {
                Coding::new(LOINC_SYSTEM, "8462-4").with_display("Diastolic blood pressure")
            }
        }
    }

    fn component(self, value: f64) -> ObservationComponent {
        ObservationComponent {
            code: CodeableConcept::from_coding(self.coding()),
            value_quantity: Some(Quantity {
                value: Some(value),
                unit: Some(MMHG_UNIT.to_string()),
                system: Some(UCUM_SYSTEM.to_string()),
                code: Some(MMHG_UCUM.to_string()),
            }),
        }
    }
}

/// Build one vital-sign `Observation` for any subject and timestamp.
pub fn vital_sign_observation(
    sign: VitalSign,
    subject: Reference,
    effective: &DateTime<FixedOffset>,
    value: f64,
) -> Observation {
    Observation {
        id: None,
        meta: None,
        status: ObservationStatus::Final,
        category: vec![observation_category(CATEGORY_VITAL_SIGNS)],
        code: CodeableConcept::from_coding(
            Coding::new(LOINC_SYSTEM, sign.loinc_code()).with_display(sign.display()),
        )
        .with_text(sign.display()),
        subject,
        effective_date_time: Some(format_date_time(effective)),
        value_quantity: Some(Quantity {
            value: Some(value),
            unit: Some(sign.unit().to_string()),
            system: Some(UCUM_SYSTEM.to_string()),
            code: Some(sign.ucum_code().to_string()),
        }),
        value_integer: None,
        component: Vec::new(),
    }
}

/// Build the vital-sign observations for one measurement occasion.
///
/// Returns up to four observations in a fixed order: blood-pressure panel, heart
/// rate, height, weight. Each is guarded by its own presence check, and the panel
/// is only emitted when at least one of systolic/diastolic is present. A row with
/// no readings yields an empty list.
pub fn build_vital_observations(row: &VitalRow) -> CoreResult<Vec<Observation>> {
    let effective = effective_at_midnight(row.date)?;
    let subject = patient_reference(&row.uuid);
    let mut observations = Vec::new();

    let components: Vec<ObservationComponent> = [
        (BloodPressure::Systolic, row.systolic),
        (BloodPressure::Diastolic, row.diastolic),
    ]
    .into_iter()
    .filter_map(|(part, reading)| present(reading).map(|v| part.component(v)))
    .collect();

    if !components.is_empty() {
        observations.push(Observation {
            id: None,
            meta: None,
            status: ObservationStatus::Final,
            category: vec![observation_category(CATEGORY_VITAL_SIGNS)],
            code: CodeableConcept::from_coding(
                Coding::new(LOINC_SYSTEM, BP_PANEL_CODE).with_display(BP_PANEL_DISPLAY),
            )
            .with_text(BP_PANEL_TEXT),
            subject: subject.clone(),
            effective_date_time: Some(format_date_time(&effective)),
            value_quantity: None,
            value_integer: None,
            component: components,
        });
    }

    let singles = [
        (VitalSign::HeartRate, row.heart_rate),
        (VitalSign::BodyHeight, row.height),
        (VitalSign::BodyWeight, row.weight),
    ];
    for (sign, reading) in singles {
        if let Some(value) = present(reading) {
            observations.push(vital_sign_observation(
                sign,
                subject.clone(),
                &effective,
                value,
            ));
        }
    }

    Ok(observations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use clinbridge_types::SourceId;

    fn empty_row() -> VitalRow {
        VitalRow {
            uuid: SourceId::new("DEMO-001").expect("valid id"),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"),
            systolic: None,
            diastolic: None,
            heart_rate: None,
            height: None,
            weight: None,
        }
    }

    fn quantity_value(obs: &Observation) -> Option<f64> {
        obs.value_quantity.as_ref().and_then(|q| q.value)
    }

    #[test]
    fn all_missing_yields_nothing() {
        let observations = build_vital_observations(&empty_row()).expect("build vitals");
        assert!(observations.is_empty());
    }

    #[test]
    fn nan_readings_count_as_missing() {
        let row = VitalRow {
            systolic: Some(f64::NAN),
            diastolic: Some(f64::NAN),
            heart_rate: Some(f64::NAN),
            height: Some(f64::NAN),
            weight: Some(f64::NAN),
            ..empty_row()
        };
        let observations = build_vital_observations(&row).expect("build vitals");
        assert!(observations.is_empty());
    }

    #[test]
    fn systolic_only_yields_single_component_panel() {
        let row = VitalRow {
            systolic: Some(132.0),
            ..empty_row()
        };

        let observations = build_vital_observations(&row).expect("build vitals");
        assert_eq!(observations.len(), 1);

        let panel = &observations[0];
        assert_eq!(panel.code.first_code(), Some(BP_PANEL_CODE));
        assert!(panel.value_quantity.is_none());
        assert_eq!(panel.component.len(), 1);
        assert_eq!(panel.component[0].code.first_code(), Some("8480-6"));
        assert_eq!(
            panel.component[0].value_quantity.as_ref().and_then(|q| q.value),
            Some(132.0)
        );
    }

    #[test]
    fn diastolic_only_yields_single_component_panel() {
        let row = VitalRow {
            diastolic: Some(78.0),
            ..empty_row()
        };

        let observations = build_vital_observations(&row).expect("build vitals");
        assert_eq!(observations.len(), 1);

        let panel = &observations[0];
        assert_eq!(panel.code.first_code(), Some(BP_PANEL_CODE));
        assert_eq!(panel.component.len(), 1);
        assert_eq!(panel.component[0].code.first_code(), Some("8462-4"));
        assert_eq!(
            panel.component[0].value_quantity.as_ref().and_then(|q| q.value),
            Some(78.0)
        );
    }

    #[test]
    fn heart_rate_only_has_no_panel() {
        let row = VitalRow {
            heart_rate: Some(66.0),
            ..empty_row()
        };

        let observations = build_vital_observations(&row).expect("build vitals");
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].code.first_code(), Some("8867-4"));
        assert!(observations[0].component.is_empty());
        assert_eq!(quantity_value(&observations[0]), Some(66.0));
    }

    #[test]
    fn full_row_yields_panel_and_three_singles() {
        let row = VitalRow {
            systolic: Some(120.0),
            diastolic: Some(80.0),
            heart_rate: Some(72.0),
            height: Some(170.0),
            weight: Some(65.0),
            ..empty_row()
        };

        let observations = build_vital_observations(&row).expect("build vitals");
        assert_eq!(observations.len(), 4);

        let panel = &observations[0];
        let component_codes: Vec<_> = panel
            .component
            .iter()
            .map(|c| c.code.first_code())
            .collect();
        assert_eq!(component_codes, vec![Some("8480-6"), Some("8462-4")]);

        let singles: Vec<_> = observations[1..]
            .iter()
            .map(|o| (o.code.first_code(), quantity_value(o)))
            .collect();
        assert_eq!(
            singles,
            vec![
                (Some("8867-4"), Some(72.0)),
                (Some("8302-2"), Some(170.0)),
                (Some("29463-7"), Some(65.0)),
            ]
        );

        for obs in &observations {
            assert_eq!(obs.subject.as_str(), Some("Patient/pat-DEMO-001"));
            assert_eq!(obs.category[0].first_code(), Some(CATEGORY_VITAL_SIGNS));
            assert_eq!(
                obs.effective_date_time.as_deref(),
                Some("2024-06-01T00:00:00+08:00")
            );
        }
    }

    #[test]
    fn zero_reading_is_present() {
        let row = VitalRow {
            weight: Some(0.0),
            ..empty_row()
        };

        let observations = build_vital_observations(&row).expect("build vitals");
        assert_eq!(observations.len(), 1);
        assert_eq!(quantity_value(&observations[0]), Some(0.0));
    }

    #[test]
    fn single_vital_carries_ucum_units() {
        let at = effective_at_midnight(NaiveDate::from_ymd_opt(2024, 6, 1).expect("date"))
            .expect("midnight");
        let obs = vital_sign_observation(
            VitalSign::HeartRate,
            Reference::to(fhir::ResourceType::Patient, "42"),
            &at,
            64.0,
        );

        let quantity = obs.value_quantity.expect("quantity");
        assert_eq!(quantity.unit.as_deref(), Some("beats/min"));
        assert_eq!(quantity.code.as_deref(), Some("/min"));
        assert_eq!(quantity.system.as_deref(), Some(UCUM_SYSTEM));
        assert_eq!(obs.subject.as_str(), Some("Patient/42"));
    }
}
