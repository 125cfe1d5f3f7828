use chrono::NaiveDate;

use crate::domain::duration::{DurationUnit, StepDuration};
use crate::domain::process::{GmpClassification, ProcessDefinition, ProcessStep};

pub fn on_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn build_step(name: &str, parameters: &[&str], equipment: &[&str]) -> ProcessStep {
    let mut step = ProcessStep::new(name);
    step.parameters = parameters.iter().map(|p| (*p).to_string()).collect();
    step.equipment = equipment.iter().map(|e| (*e).to_string()).collect();
    step
}

pub fn build_timed_step(name: &str, parameters: &[&str], hours: f64) -> ProcessStep {
    let mut step = build_step(name, parameters, &[]);
    step.duration = StepDuration::new(hours, DurationUnit::Hours);
    step
}

pub fn build_process(name: &str, description: &str, steps: Vec<ProcessStep>) -> ProcessDefinition {
    let mut process = ProcessDefinition::new(name);
    process.description = description.to_string();
    process.steps = steps;
    process
}

/// A small biologic process touching every parameter kind.
pub fn build_biologic_process() -> ProcessDefinition {
    let mut process = build_process(
        "Monoclonal antibody",
        "Monoclonal antibody produced in CHO cells",
        vec![
            build_timed_step(
                "Cell Culture",
                &["Temperature (36.5-37.5°C)", "pH (6.9-7.1)", "Culture time", "Dissolved oxygen"],
                336.0,
            ),
            build_timed_step(
                "Protein A Chromatography",
                &["Column pressure", "Load density", "Elution pH"],
                6.0,
            ),
            build_timed_step("Viral Filtration", &["Filter pressure", "Flux"], 4.0),
        ],
    );
    process.gmp_classification = GmpClassification::High;
    process
}
