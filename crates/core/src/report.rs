//! Human-readable summaries of sent and stored resources.
//!
//! Pure formatting: pick a fixed set of fields per resource type and lay them out
//! as `label = value` lines. A field missing from either side renders as an empty
//! value. Output is meant for people, not for parsing.

use fhir::{CodeableConcept, Observation, Quantity, Resource};

const LABEL_WIDTH: usize = 18;

/// One labelled field of a summary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryField {
    pub label: &'static str,
    pub value: Option<String>,
}

impl SummaryField {
    fn new(label: &'static str, value: Option<String>) -> Self {
        Self { label, value }
    }
}

/// Fixed summary fields for `resource`, excluding its id.
pub fn summarise(resource: &Resource) -> Vec<SummaryField> {
    let subject = || {
        resource
            .subject()
            .and_then(|s| s.as_str())
            .map(str::to_string)
    };

    match resource {
        Resource::Patient(p) => vec![
            SummaryField::new(
                "identifier.value",
                p.first_identifier_value().map(str::to_string),
            ),
            SummaryField::new("gender", p.gender.map(|g| g.to_string())),
            SummaryField::new("birthDate", p.birth_date.map(|d| d.to_string())),
        ],
        Resource::Observation(o) => vec![
            SummaryField::new("code.text", concept_text(Some(&o.code))),
            SummaryField::new("value", observation_value(o)),
            SummaryField::new("subject.reference", subject()),
            SummaryField::new("effectiveDateTime", o.effective_date_time.clone()),
        ],
        Resource::Condition(c) => vec![
            SummaryField::new("code", concept_code_and_display(c.code.as_ref())),
            SummaryField::new("subject.reference", subject()),
            SummaryField::new("onsetDateTime", c.onset_date_time.clone()),
        ],
        Resource::Procedure(p) => vec![
            SummaryField::new("code.text", concept_text(p.code.as_ref())),
            SummaryField::new("subject.reference", subject()),
            SummaryField::new("performedDateTime", p.performed_date_time.clone()),
        ],
        Resource::MedicationStatement(m) => vec![
            SummaryField::new(
                "medication",
                concept_code_and_display(m.medication_codeable_concept.as_ref()),
            ),
            SummaryField::new("subject.reference", subject()),
            SummaryField::new(
                "effectivePeriod",
                m.effective_period.as_ref().map(|p| {
                    format!(
                        "{} .. {}",
                        p.start.as_deref().unwrap_or_default(),
                        p.end.as_deref().unwrap_or_default()
                    )
                }),
            ),
        ],
    }
}

/// One titled block listing `resource`'s id and summary fields.
pub fn render_resource(title: &str, resource: &Resource) -> String {
    let mut out = format!("=== {title} ===\n");
    push_fields(&mut out, resource, true);
    out
}

/// Side-by-side (sent, then stored) view of a resource before and after the
/// repository accepted it.
pub fn render_comparison(sent: &Resource, stored: &Resource) -> String {
    let mut out = format!("=== {} ===\nSent:\n", sent.resource_type());
    push_fields(&mut out, sent, false);
    out.push_str("\nStored:\n");
    push_fields(&mut out, stored, true);
    out
}

fn push_fields(out: &mut String, resource: &Resource, with_id: bool) {
    if with_id {
        push_line(out, "id", resource.id());
    }
    for field in summarise(resource) {
        push_line(out, field.label, field.value.as_deref());
    }
}

fn push_line(out: &mut String, label: &str, value: Option<&str>) {
    out.push_str(&format!(
        "  {label:<LABEL_WIDTH$}= {}\n",
        value.unwrap_or_default()
    ));
}

fn concept_text(concept: Option<&CodeableConcept>) -> Option<String> {
    let concept = concept?;
    concept
        .text
        .clone()
        .or_else(|| concept.coding.first().and_then(|c| c.display.clone()))
}

fn concept_code_and_display(concept: Option<&CodeableConcept>) -> Option<String> {
    let coding = concept?.coding.first()?;
    match (coding.code.as_deref(), coding.display.as_deref()) {
        (Some(code), Some(display)) if code != display => Some(format!("{code} ({display})")),
        (Some(code), _) => Some(code.to_string()),
        (None, display) => display.map(str::to_string),
    }
}

fn quantity_text(quantity: &Quantity) -> Option<String> {
    let value = quantity.value?;
    Some(match quantity.unit.as_deref() {
        Some(unit) => format!("{value} {unit}"),
        None => value.to_string(),
    })
}

fn observation_value(observation: &Observation) -> Option<String> {
    if let Some(quantity) = &observation.value_quantity {
        return quantity_text(quantity);
    }
    if let Some(score) = observation.value_integer {
        return Some(score.to_string());
    }

    let parts: Vec<String> = observation
        .component
        .iter()
        .filter_map(|c| {
            let name = concept_text(Some(&c.code))
                .or_else(|| c.code.first_code().map(str::to_string))?;
            let value = c.value_quantity.as_ref().and_then(quantity_text)?;
            Some(format!("{name} {value}"))
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}
