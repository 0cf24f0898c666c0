//! # ayurdiet_reports
//!
//! Client-side PDF report generation for an Ayurvedic diet-management
//! dashboard.
//!
//! The crate lays out structured content blocks (patient info, diet plan
//! summary, progress summary, daily meal plans, recommendations) onto
//! fixed-size A4 pages with a cursor-tracked, single-pass layout engine,
//! stamps a footer across every page, and renders the result to PDF bytes
//! with a generated file name.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ayurdiet_reports::{patient_report, Patient, ReportContext};
//!
//! fn main() -> ayurdiet_reports::Result<()> {
//!     let patient = Patient {
//!         name: Some("Asha Rao".to_string()),
//!         ..Patient::new("pat_001")
//!     };
//!     let context = ReportContext::new().with_patient(patient);
//!
//!     let report = patient_report(&context)?;
//!     report.save_to(".")?;
//!     Ok(())
//! }
//! ```
//!
//! Data is supplied through an explicit [`ReportContext`] built once per
//! report-generation call; records the host failed to fetch are simply left
//! out and render as `N/A` placeholders.

pub mod error;
pub mod layout;
pub mod model;
pub mod render;
pub mod reports;
pub mod theme;

pub use error::{Error, Result};
pub use layout::{Document, FontStyle, Page, PageGeometry, PageLayout, Primitive};
pub use model::{
    default_daily_plan, DietPlan, Meal, Patient, ProgressRecord, ReportContext, TableResponse,
    PLACEHOLDER,
};
pub use render::render_pdf;
pub use reports::{
    generate_report, meal_plan_report, patient_report, progress_report, GeneratedReport,
    ReportKind,
};
