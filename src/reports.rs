//! The three report assemblies offered by the dashboard.
//!
//! Each report kind builds a fresh [`PageLayout`], writes its sections in
//! order, stamps the footer and renders the result into PDF bytes together
//! with a file name that encodes the report kind, the subject and the
//! generation date.  The assembly step is separated from rendering so the
//! laid-out [`Document`] can be inspected directly in tests.
//!
//! All data flows in through an explicit [`ReportContext`]; a missing record
//! renders as placeholder text rather than failing the report.  Errors only
//! arise from the PDF backend or file export, and any error aborts the
//! report without producing a partial artifact.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Days, Local, NaiveDate};

use crate::error::Result;
use crate::layout::{Document, FontStyle, PageGeometry, PageLayout};
use crate::model::{default_daily_plan, DietPlan, Patient, ProgressRecord, ReportContext, PLACEHOLDER};
use crate::render::render_pdf;
use crate::theme;

/// Footer note stamped on every page of every report.
const FOOTER_NOTE: &str = "AyurDiet Pro - Personalized Ayurvedic Nutrition Dashboard";

/// Vertical reserve before each weekday block of the meal-plan report, so a
/// day header keeps at least its first meals on the same page.
const WEEKDAY_RESERVE: f32 = 80.0;

/// How many trend rows the detailed progress analysis prints.
const TREND_ROWS: usize = 10;

/// General Ayurvedic guidelines printed in the recommendations section.
const GENERAL_GUIDELINES: [&str; 6] = [
    "Eat meals at regular times for better digestion",
    "Drink warm water throughout the day",
    "Include all six tastes in your daily diet",
    "Eat your largest meal at midday when digestion is strongest",
    "Allow 3-4 hours between meals",
    "Practice mindful eating in a peaceful environment",
];

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// The report kinds the dashboard can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportKind {
    /// Comprehensive patient health report.
    Patient,
    /// Weekly meal-plan report, defaulting to today through +7 days.
    MealPlan,
    /// Progress analysis report.
    Progress,
}

/// A finished report: PDF bytes plus the file name to save them under.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedReport {
    file_name: String,
    bytes: Vec<u8>,
}

impl GeneratedReport {
    /// Returns the generated file name, e.g.
    /// `ayurveda-report-asha-rao-2024-03-15.pdf`.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the rendered PDF bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Writes the report into `dir` under its generated file name and
    /// returns the full path.
    pub fn save_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        fs::write(&path, &self.bytes)?;
        log::info!("saved report to {}", path.display());
        Ok(path)
    }
}

/// Generates the given report kind from the context, using today's date and
/// the default meal-plan range.
pub fn generate_report(kind: ReportKind, context: &ReportContext) -> Result<GeneratedReport> {
    match kind {
        ReportKind::Patient => patient_report(context),
        ReportKind::MealPlan => meal_plan_report(context),
        ReportKind::Progress => progress_report(context),
    }
}

/// Generates the comprehensive patient health report dated today.
pub fn patient_report(context: &ReportContext) -> Result<GeneratedReport> {
    patient_report_dated(context, today())
}

/// Generates the patient health report for an explicit generation date.
pub fn patient_report_dated(
    context: &ReportContext,
    generated_on: NaiveDate,
) -> Result<GeneratedReport> {
    let document = patient_document(context, generated_on);
    let bytes = render_pdf(&document, "Patient Health Report")?;
    let file_name = format!(
        "ayurveda-report-{}-{}.pdf",
        subject_slug(context),
        generated_on
    );
    log::info!(
        "generated {} ({} pages, {} bytes)",
        file_name,
        document.page_count(),
        bytes.len()
    );
    Ok(GeneratedReport { file_name, bytes })
}

/// Lays out the patient health report without rendering it.
pub fn patient_document(context: &ReportContext, generated_on: NaiveDate) -> Document {
    let mut layout = PageLayout::new(PageGeometry::A4);

    let subtitle = format!(
        "Ayurvedic Diet Management - {}",
        subject_name(context.patient())
    );
    layout.add_report_header(
        "Patient Health Report",
        Some(&subtitle),
        &long_date(generated_on),
    );

    write_patient_info(&mut layout, context.patient());
    write_diet_plan_summary(&mut layout, context.diet_plan());
    write_progress_summary(&mut layout, context.progress());

    // The meal plan always opens a fresh page.
    layout.break_page();
    layout.add_daily_meal_plan(&long_date(generated_on), &default_daily_plan());
    write_recommendations(&mut layout, context.diet_plan());

    layout.finish(FOOTER_NOTE)
}

/// Generates the weekly meal-plan report for today through +7 days.
pub fn meal_plan_report(context: &ReportContext) -> Result<GeneratedReport> {
    let start = today();
    let end = start + Days::new(7);
    meal_plan_report_dated(context, start, end)
}

/// Generates the meal-plan report for an explicit date range.
pub fn meal_plan_report_dated(
    context: &ReportContext,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<GeneratedReport> {
    let document = meal_plan_document(context, start, end);
    let bytes = render_pdf(&document, "Weekly Meal Plan")?;
    let file_name = format!("meal-plan-{start}-to-{end}.pdf");
    log::info!(
        "generated {} ({} pages, {} bytes)",
        file_name,
        document.page_count(),
        bytes.len()
    );
    Ok(GeneratedReport { file_name, bytes })
}

/// Lays out the weekly meal-plan report without rendering it.
pub fn meal_plan_document(context: &ReportContext, start: NaiveDate, end: NaiveDate) -> Document {
    let mut layout = PageLayout::new(PageGeometry::A4);

    layout.add_report_header(
        "Weekly Meal Plan",
        Some(&format!("{start} to {end}")),
        &long_date(start),
    );

    if let Some(patient) = context.patient() {
        layout.add_plain_line(
            &format!("Patient: {}", text_or_placeholder(patient.name.as_deref())),
            12.0,
            FontStyle::Regular,
            theme::TEXT,
        );
        layout.add_plain_line(
            &format!(
                "Dosha: {}",
                text_or_placeholder(patient.dominant_dosha.as_deref())
            ),
            12.0,
            FontStyle::Regular,
            theme::TEXT,
        );
        layout.advance(8.0);
    }

    let meals = default_daily_plan();
    for day in WEEKDAYS {
        layout.check_page_break(WEEKDAY_RESERVE);
        layout.add_daily_meal_plan(day, &meals);
    }

    if context.diet_plan().is_some() {
        write_recommendations(&mut layout, context.diet_plan());
    }

    layout.finish(FOOTER_NOTE)
}

/// Generates the progress analysis report dated today.
pub fn progress_report(context: &ReportContext) -> Result<GeneratedReport> {
    progress_report_dated(context, today())
}

/// Generates the progress analysis report for an explicit generation date.
pub fn progress_report_dated(
    context: &ReportContext,
    generated_on: NaiveDate,
) -> Result<GeneratedReport> {
    let document = progress_document(context, generated_on);
    let bytes = render_pdf(&document, "Progress Analysis Report")?;
    let file_name = format!(
        "progress-report-{}-{}.pdf",
        subject_slug(context),
        generated_on
    );
    log::info!(
        "generated {} ({} pages, {} bytes)",
        file_name,
        document.page_count(),
        bytes.len()
    );
    Ok(GeneratedReport { file_name, bytes })
}

/// Lays out the progress analysis report without rendering it.
pub fn progress_document(context: &ReportContext, generated_on: NaiveDate) -> Document {
    let mut layout = PageLayout::new(PageGeometry::A4);

    let subtitle = format!("Health Journey - {}", subject_name(context.patient()));
    layout.add_report_header(
        "Progress Analysis Report",
        Some(&subtitle),
        &long_date(generated_on),
    );

    if context.patient().is_some() {
        write_patient_info(&mut layout, context.patient());
    }
    write_progress_summary(&mut layout, context.progress());

    layout.add_section_header("Detailed Progress Analysis");
    let mut records = context.progress().to_vec();
    records.sort_by(|a, b| b.date.cmp(&a.date));
    if !records.is_empty() {
        layout.add_plain_line(
            "Weight Trend (Last 10 Records):",
            10.0,
            FontStyle::Regular,
            theme::TEXT,
        );
        layout.advance(4.0);
        for record in records.iter().take(TREND_ROWS) {
            layout.add_indented_line(
                &format!(
                    "{}: {} kg (BMI: {})",
                    record.date, record.weight, record.bmi
                ),
                10.0,
            );
        }
        layout.advance(10.0);

        layout.add_plain_line("Compliance Trend:", 10.0, FontStyle::Regular, theme::TEXT);
        layout.advance(4.0);
        for record in records.iter().take(TREND_ROWS) {
            layout.add_indented_line(
                &format!(
                    "{}: {}% ({})",
                    record.date,
                    record.compliance_percentage,
                    compliance_status(record.compliance_percentage)
                ),
                10.0,
            );
        }
    }

    layout.finish(FOOTER_NOTE)
}

/// Classifies a compliance percentage into the dashboard's adherence bands.
pub fn compliance_status(percentage: f32) -> &'static str {
    if percentage >= 90.0 {
        "Excellent"
    } else if percentage >= 75.0 {
        "Good"
    } else if percentage >= 60.0 {
        "Fair"
    } else {
        "Poor"
    }
}

fn write_patient_info(layout: &mut PageLayout, patient: Option<&Patient>) {
    layout.add_section_header("Patient Information");

    let fallback = Patient::default();
    let patient = patient.unwrap_or(&fallback);
    let pairs = [
        ("Name:", text_or_placeholder(patient.name.as_deref())),
        ("Age:", format!("{} years", num_or_placeholder(patient.age))),
        ("Gender:", text_or_placeholder(patient.gender.as_deref())),
        (
            "Height:",
            format!("{} cm", num_or_placeholder(patient.height)),
        ),
        (
            "Weight:",
            format!("{} kg", num_or_placeholder(patient.weight)),
        ),
        ("BMI:", num_or_placeholder(patient.bmi)),
        (
            "Dominant Dosha:",
            text_or_placeholder(patient.dominant_dosha.as_deref()),
        ),
        (
            "Dietary Preference:",
            text_or_placeholder(patient.dietary_preference.as_deref()),
        ),
    ];
    layout.add_key_value_block(&pairs, 40.0);
    layout.advance(10.0);
}

fn write_diet_plan_summary(layout: &mut PageLayout, plan: Option<&DietPlan>) {
    layout.add_section_header("Current Diet Plan");

    let fallback = DietPlan::default();
    let plan = plan.unwrap_or(&fallback);
    layout.add_plain_line(
        &text_or_placeholder(plan.plan_name.as_deref()),
        12.0,
        FontStyle::Bold,
        theme::BLACK,
    );
    layout.advance(4.0);

    let pairs = [
        (
            "Start Date:",
            plan.start_date
                .map(|date| date.to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
        ),
        ("Status:", text_or_placeholder(plan.status.as_deref())),
        (
            "Dosha Focus:",
            text_or_placeholder(plan.dosha_focus.as_deref()),
        ),
        (
            "Thermal Preference:",
            text_or_placeholder(plan.thermal_preference.as_deref()),
        ),
        (
            "Target Calories:",
            format!("{} kcal/day", plan.target_calories.unwrap_or(0)),
        ),
        (
            "Target Protein:",
            format!("{}g/day", plan.target_protein.unwrap_or(0)),
        ),
        (
            "Target Carbs:",
            format!("{}g/day", plan.target_carbs.unwrap_or(0)),
        ),
        (
            "Target Fat:",
            format!("{}g/day", plan.target_fat.unwrap_or(0)),
        ),
    ];
    layout.add_key_value_block(&pairs, 50.0);
    layout.advance(10.0);
}

fn write_progress_summary(layout: &mut PageLayout, records: &[ProgressRecord]) {
    layout.add_section_header("Progress Summary");

    let (Some(latest), Some(oldest)) = (
        records.iter().max_by_key(|record| record.date),
        records.iter().min_by_key(|record| record.date),
    ) else {
        layout.add_plain_line(
            "No progress data available",
            10.0,
            FontStyle::Regular,
            theme::TEXT,
        );
        layout.advance(10.0);
        return;
    };

    let weight_change = latest.weight - oldest.weight;
    let weight_change_text = if weight_change > 0.0 {
        format!("+{weight_change:.1} kg")
    } else {
        format!("{weight_change:.1} kg")
    };
    let average_compliance = records
        .iter()
        .map(|record| record.compliance_percentage)
        .sum::<f32>()
        / records.len() as f32;

    let pairs = [
        ("Period:", format!("{} to {}", oldest.date, latest.date)),
        ("Weight Change:", weight_change_text),
        ("Current Weight:", format!("{} kg", latest.weight)),
        ("Current BMI:", latest.bmi.to_string()),
        ("Average Compliance:", format!("{average_compliance:.1}%")),
        (
            "Current Energy Level:",
            text_or_placeholder(latest.energy_level.as_deref()),
        ),
        (
            "Sleep Quality:",
            text_or_placeholder(latest.sleep_quality.as_deref()),
        ),
        (
            "Stress Level:",
            text_or_placeholder(latest.stress_level.as_deref()),
        ),
    ];
    layout.add_key_value_block(&pairs, 60.0);
    layout.advance(10.0);
}

fn write_recommendations(layout: &mut PageLayout, plan: Option<&DietPlan>) {
    layout.add_section_header("Ayurvedic Recommendations");

    if let Some(plan) = plan {
        if !plan.primary_rasa.is_empty() {
            layout.add_labeled_line("Emphasize Tastes:", &plan.primary_rasa.join(", "), 45.0);
        }
        if !plan.avoid_rasa.is_empty() {
            layout.add_labeled_line("Avoid Tastes:", &plan.avoid_rasa.join(", "), 45.0);
        }
    }
    layout.advance(5.0);

    layout.add_plain_line("General Guidelines:", 10.0, FontStyle::Regular, theme::TEXT);
    layout.advance(2.0);
    for guideline in GENERAL_GUIDELINES {
        layout.add_bullet_line(guideline, 9.0);
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Long-form date used in report headers, e.g. `March 15, 2024`.
fn long_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

fn subject_name(patient: Option<&Patient>) -> String {
    patient
        .and_then(|patient| patient.name.clone())
        .unwrap_or_else(|| "Patient".to_string())
}

fn subject_slug(context: &ReportContext) -> String {
    context
        .patient()
        .map(Patient::file_slug)
        .unwrap_or_else(|| "patient".to_string())
}

fn text_or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

fn num_or_placeholder<T: ToString>(value: Option<T>) -> String {
    value
        .map(|value| value.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid test date")
    }

    fn sample_patient() -> Patient {
        Patient {
            name: Some("Asha Rao".to_string()),
            age: Some(34),
            gender: Some("Female".to_string()),
            height: Some(162.0),
            weight: Some(72.5),
            bmi: Some(27.6),
            dominant_dosha: Some("Pitta".to_string()),
            dietary_preference: Some("Vegetarian".to_string()),
            ..Patient::new("pat_001")
        }
    }

    fn sample_plan() -> DietPlan {
        DietPlan {
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
        }
    }

    fn record(day: &str, weight: f32, compliance: f32) -> ProgressRecord {
        ProgressRecord {
            date: date(day),
            weight,
            bmi: 24.0,
            compliance_percentage: compliance,
            energy_level: Some("High".to_string()),
            sleep_quality: Some("Good".to_string()),
            stress_level: Some("Low".to_string()),
        }
    }

    #[test]
    fn empty_context_renders_placeholders_not_errors() {
        let document = patient_document(&ReportContext::new(), date("2024-03-15"));
        assert!(document.contains_text(PLACEHOLDER));
        assert!(document.contains_text("Patient Information"));
        assert!(document.contains_text("Current Diet Plan"));
        assert!(!document.contains_text("Invalid"));
    }

    #[test]
    fn zero_progress_records_render_fallback_text() {
        let context = ReportContext::new().with_patient(sample_patient());
        let document = progress_document(&context, date("2024-03-15"));
        assert!(document.contains_text("No progress data available"));

        let report = progress_report_dated(&context, date("2024-03-15")).expect("no failure");
        assert!(!report.bytes().is_empty());
    }

    #[test]
    fn weight_change_uses_latest_minus_oldest_with_explicit_sign() {
        // Input deliberately unordered; latest is 2024-03-10, oldest 2024-03-01.
        let context = ReportContext::new().with_progress(vec![
            record("2024-03-05", 71.0, 80.0),
            record("2024-03-10", 72.5, 85.0),
            record("2024-03-01", 70.0, 90.0),
        ]);
        let document = progress_document(&context, date("2024-03-15"));
        assert!(document.contains_text("+2.5 kg"));
        assert!(document.contains_text("2024-03-01 to 2024-03-10"));
    }

    #[test]
    fn negative_weight_change_has_no_plus_sign() {
        let context = ReportContext::new().with_progress(vec![
            record("2024-03-01", 72.0, 80.0),
            record("2024-03-10", 70.5, 80.0),
        ]);
        let document = progress_document(&context, date("2024-03-15"));
        assert!(document.contains_text("-1.5 kg"));
        assert!(!document.contains_text("+-1.5 kg"));
    }

    #[test]
    fn average_compliance_has_one_decimal() {
        let context = ReportContext::new().with_progress(vec![
            record("2024-03-01", 70.0, 80.0),
            record("2024-03-02", 70.0, 85.0),
        ]);
        let document = progress_document(&context, date("2024-03-15"));
        assert!(document.contains_text("82.5%"));
    }

    #[test]
    fn compliance_bands_match_thresholds() {
        assert_eq!(compliance_status(95.0), "Excellent");
        assert_eq!(compliance_status(90.0), "Excellent");
        assert_eq!(compliance_status(89.9), "Good");
        assert_eq!(compliance_status(75.0), "Good");
        assert_eq!(compliance_status(60.0), "Fair");
        assert_eq!(compliance_status(59.9), "Poor");
    }

    #[test]
    fn file_names_encode_kind_subject_and_date() {
        let context = ReportContext::new().with_patient(sample_patient());
        let patient = patient_report_dated(&context, date("2024-03-15")).expect("patient report");
        assert_eq!(
            patient.file_name(),
            "ayurveda-report-asha-rao-2024-03-15.pdf"
        );

        let meal_plan =
            meal_plan_report_dated(&context, date("2024-03-15"), date("2024-03-22"))
                .expect("meal plan report");
        assert_eq!(
            meal_plan.file_name(),
            "meal-plan-2024-03-15-to-2024-03-22.pdf"
        );

        let progress = progress_report_dated(&context, date("2024-03-15")).expect("progress");
        assert_eq!(
            progress.file_name(),
            "progress-report-asha-rao-2024-03-15.pdf"
        );
    }

    #[test]
    fn anonymous_context_falls_back_to_patient_slug() {
        let report =
            patient_report_dated(&ReportContext::new(), date("2024-03-15")).expect("report");
        assert_eq!(report.file_name(), "ayurveda-report-patient-2024-03-15.pdf");
    }

    #[test]
    fn meal_plan_document_covers_every_weekday() {
        let context = ReportContext::new()
            .with_patient(sample_patient())
            .with_diet_plan(sample_plan());
        let document = meal_plan_document(&context, date("2024-03-15"), date("2024-03-22"));

        for day in WEEKDAYS {
            assert!(
                document.contains_text(&format!("Meal Plan - {day}")),
                "missing weekday {day}"
            );
        }
        assert!(document.contains_text("Emphasize Tastes:"));
        assert!(document.contains_text("Sweet, Bitter"));
        assert!(document.page_count() > 1);
    }

    #[test]
    fn patient_document_starts_meal_plan_on_fresh_page() {
        let context = ReportContext::new()
            .with_patient(sample_patient())
            .with_diet_plan(sample_plan())
            .with_progress(vec![record("2024-03-01", 70.0, 88.0)]);
        let document = patient_document(&context, date("2024-03-15"));

        assert!(document.page_count() >= 2);
        let first = &document.pages()[0];
        assert!(first.contains_text("Patient Information"));
        assert!(!first.contains_text("Breakfast (7:30 AM)"));
        assert!(document.contains_text("Breakfast (7:30 AM)"));
    }

    #[test]
    fn detailed_analysis_lists_latest_records_first() {
        let context = ReportContext::new().with_progress(
            (1..=12)
                .map(|day| record(&format!("2024-03-{day:02}"), 70.0 + day as f32 * 0.1, 80.0))
                .collect::<Vec<_>>(),
        );
        let document = progress_document(&context, date("2024-03-15"));

        // Only the ten most recent rows are printed.
        assert!(document.contains_text("2024-03-12"));
        assert!(document.contains_text("2024-03-03"));
        assert!(!document.contains_text("2024-03-02:"));
    }

    #[test]
    fn save_to_writes_the_generated_file() {
        let context = ReportContext::new().with_patient(sample_patient());
        let report = patient_report_dated(&context, date("2024-03-15")).expect("report");

        let dir = tempfile::tempdir().expect("tempdir");
        let path = report.save_to(dir.path()).expect("save");
        assert!(path.ends_with("ayurveda-report-asha-rao-2024-03-15.pdf"));
        let written = std::fs::read(&path).expect("read back");
        assert_eq!(written, report.bytes());
    }
}
