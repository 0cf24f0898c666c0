use std::error::Error;

use ayurdiet_reports::{patient_report, DietPlan, Patient, ProgressRecord, ReportContext};
use chrono::NaiveDate;

fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid demo date")
}

fn main() -> Result<(), Box<dyn Error>> {
    let patient = Patient {
        name: Some("Asha Rao".to_string()),
        age: Some(34),
        gender: Some("Female".to_string()),
        height: Some(162.0),
        weight: Some(72.5),
        bmi: Some(27.6),
        dominant_dosha: Some("Pitta".to_string()),
        dietary_preference: Some("Vegetarian".to_string()),
        ..Patient::new("pat_001")
    };

    let plan = DietPlan {
        plan_name: Some("Pitta Balancing Plan".to_string()),
        start_date: Some(date("2024-02-01")),
        status: Some("Active".to_string()),
        dosha_focus: Some("Pitta".to_string()),
        thermal_preference: Some("Cooling".to_string()),
        target_calories: Some(1800),
        target_protein: Some(70),
        target_carbs: Some(220),
        target_fat: Some(55),
        primary_rasa: vec!["Sweet".to_string(), "Bitter".to_string()],
        avoid_rasa: vec!["Pungent".to_string(), "Sour".to_string()],
    };

    let progress = vec![
        ProgressRecord {
            date: date("2024-03-01"),
            weight: 72.5,
            bmi: 27.6,
            compliance_percentage: 82.0,
            energy_level: Some("Moderate".to_string()),
            sleep_quality: Some("Fair".to_string()),
            stress_level: Some("Moderate".to_string()),
        },
        ProgressRecord {
            date: date("2024-03-14"),
            weight: 71.2,
            bmi: 27.1,
            compliance_percentage: 91.0,
            energy_level: Some("High".to_string()),
            sleep_quality: Some("Good".to_string()),
            stress_level: Some("Low".to_string()),
        },
    ];

    let context = ReportContext::new()
        .with_patient(patient)
        .with_diet_plan(plan)
        .with_progress(progress);

    let report = patient_report(&context)?;
    let path = report.save_to(".")?;
    println!(
        "Generated {} ({} bytes)",
        path.display(),
        report.bytes().len()
    );
    Ok(())
}
