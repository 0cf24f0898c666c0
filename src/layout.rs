//! Cursor-tracked page layout for report documents.
//!
//! The layout pass is a single forward sweep: content blocks are appended to
//! the current page while a vertical cursor tracks the next baseline, and a
//! new page is allocated whenever a block's reserved height would cross the
//! bottom margin.  Earlier pages are never revisited or reflowed.  The only
//! lookahead is [`PageLayout::check_page_break`], which every block invokes
//! with its true height before writing; line-by-line writers invoke it per
//! line so worst-case overflow is bounded to a single line.
//!
//! [`PageLayout`] is a scoped builder: one instance exists for the duration
//! of a single report-generation call and is consumed by
//! [`PageLayout::finish`], which stamps the footer across all pages and
//! yields the immutable [`Document`].

use crate::model::Meal;
use crate::theme::{self, Color};

/// Brand line printed in the report header and footer.
pub const BRAND_LINE: &str = "AyurDiet Pro";

/// Vertical budget reserved before writing a section header.
const SECTION_HEADER_BUDGET: f32 = 15.0;
/// Cursor advance after a section header.
const SECTION_HEADER_ADVANCE: f32 = 12.0;
/// Cursor advance consumed by the report header block.
const REPORT_HEADER_ADVANCE: f32 = 45.0;
/// Cursor advance after a meal header line.
const MEAL_HEADER_ADVANCE: f32 = 8.0;
/// Cursor advance per meal item bullet.
const MEAL_ITEM_ADVANCE: f32 = 5.0;
/// Gap left after the last item of a meal.
const MEAL_TRAILING_GAP: f32 = 5.0;
/// Indent applied to bulleted and trend lines.
const INDENT: f32 = 5.0;
/// Distance of the footer rule from the bottom edge.
const FOOTER_RULE_OFFSET: f32 = 15.0;
/// Distance of the footer text baseline from the bottom edge.
const FOOTER_TEXT_OFFSET: f32 = 8.0;

/// Fixed page dimensions and spacing used by the layout pass, in
/// millimetres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    /// Page width.
    pub width: f32,
    /// Page height.
    pub height: f32,
    /// Uniform margin on all four sides.
    pub margin: f32,
    /// Baseline-to-baseline distance of body text.
    pub line_height: f32,
}

impl PageGeometry {
    /// A4 portrait with the dashboard's 20 mm margin and 6 mm line height.
    pub const A4: PageGeometry = PageGeometry {
        width: 210.0,
        height: 297.0,
        margin: 20.0,
        line_height: 6.0,
    };

    /// Lowest cursor position content may occupy on a page.
    pub fn limit(&self) -> f32 {
        self.height - self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

/// Typeface variants available to the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontStyle {
    /// Regular weight.
    #[default]
    Regular,
    /// Bold weight, used for titles and headers.
    Bold,
}

/// A single drawing command placed on a page.
///
/// Coordinates are millimetres measured from the top-left page corner; the
/// renderer converts them into the PDF backend's bottom-origin space.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// A text run anchored at its baseline start.
    Text {
        /// Horizontal position of the first glyph.
        x: f32,
        /// Baseline position from the top edge.
        y: f32,
        /// Font size in points.
        size: f32,
        /// Typeface variant.
        style: FontStyle,
        /// Fill color.
        color: Color,
        /// The text itself.
        text: String,
    },
    /// A straight hairline rule.
    Rule {
        /// Start point.
        x1: f32,
        /// Start baseline from the top edge.
        y1: f32,
        /// End point.
        x2: f32,
        /// End baseline from the top edge.
        y2: f32,
        /// Stroke color.
        color: Color,
    },
}

impl Primitive {
    /// Returns the text content for text primitives.
    pub fn text(&self) -> Option<&str> {
        match self {
            Primitive::Text { text, .. } => Some(text),
            Primitive::Rule { .. } => None,
        }
    }

    /// Returns the baseline (top-origin) of the primitive.
    pub fn baseline(&self) -> f32 {
        match self {
            Primitive::Text { y, .. } => *y,
            Primitive::Rule { y1, .. } => *y1,
        }
    }
}

/// One finished page holding its primitives in draw order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    primitives: Vec<Primitive>,
}

impl Page {
    /// Returns the primitives in the order they were drawn.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Returns whether any text primitive on the page contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.primitives
            .iter()
            .any(|primitive| primitive.text().is_some_and(|text| text.contains(needle)))
    }
}

/// An ordered sequence of laid-out pages.
///
/// A document is built once per report-generation call, handed to the
/// renderer, and discarded after export.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    geometry: PageGeometry,
    pages: Vec<Page>,
}

impl Document {
    /// Returns the geometry the document was laid out with.
    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    /// Returns the pages in order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Returns the number of allocated pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Returns whether any page contains `needle` in a text primitive.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.pages.iter().any(|page| page.contains_text(needle))
    }
}

/// Scoped layout builder whose lifetime is a single report-generation call.
///
/// Created via [`PageLayout::new`] with the cursor at the top margin of a
/// fresh first page, mutated by the block-writing methods, and consumed by
/// [`PageLayout::finish`].  Consuming the builder makes footer stamping a
/// run-exactly-once operation that cannot disturb cursor state afterwards.
#[derive(Clone, Debug)]
pub struct PageLayout {
    geometry: PageGeometry,
    pages: Vec<Page>,
    cursor_y: f32,
}

impl PageLayout {
    /// Begins a new document: page 1 allocated, cursor at the top margin.
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![Page::default()],
            cursor_y: geometry.margin,
        }
    }

    /// Returns the geometry the layout was created with.
    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    /// Returns the current cursor position from the top edge.
    pub fn cursor_y(&self) -> f32 {
        self.cursor_y
    }

    /// Returns the number of pages allocated so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Allocates a new page when `needed` millimetres of content would cross
    /// the bottom margin; returns whether a break occurred.
    ///
    /// The comparison is strict, so content that ends exactly at the limit
    /// stays on the current page.  When no break is needed the cursor is
    /// left untouched.
    pub fn check_page_break(&mut self, needed: f32) -> bool {
        if self.cursor_y + needed > self.geometry.limit() {
            log::debug!(
                "page break at y={:.1} (needed {:.1} mm), starting page {}",
                self.cursor_y,
                needed,
                self.pages.len() + 1
            );
            self.break_page();
            true
        } else {
            false
        }
    }

    /// Unconditionally starts a new page with the cursor at the top margin.
    pub fn break_page(&mut self) {
        self.pages.push(Page::default());
        self.cursor_y = self.geometry.margin;
    }

    /// Moves the cursor down without writing anything.
    pub fn advance(&mut self, mm: f32) {
        self.cursor_y += mm;
    }

    /// Writes the document header: brand line, title, optional subtitle,
    /// generation date and a separator rule.
    pub fn add_report_header(&mut self, title: &str, subtitle: Option<&str>, generated_on: &str) {
        let margin = self.geometry.margin;
        let y = self.cursor_y;

        self.push_text(margin, y, 16.0, FontStyle::Bold, theme::PRIMARY, BRAND_LINE);
        self.push_text(margin, y + 15.0, 20.0, FontStyle::Bold, theme::TEXT, title);
        if let Some(subtitle) = subtitle {
            self.push_text(margin, y + 25.0, 12.0, FontStyle::Regular, theme::MUTED, subtitle);
        }
        self.push_text(
            self.geometry.width - 60.0,
            y + 10.0,
            10.0,
            FontStyle::Regular,
            theme::TEXT,
            format!("Generated on: {generated_on}"),
        );
        self.push_rule(
            margin,
            y + 35.0,
            self.geometry.width - margin,
            y + 35.0,
            theme::RULE,
        );

        self.cursor_y += REPORT_HEADER_ADVANCE;
    }

    /// Writes a styled section header with its underline rule.
    pub fn add_section_header(&mut self, title: &str) {
        self.check_page_break(SECTION_HEADER_BUDGET);

        let margin = self.geometry.margin;
        let y = self.cursor_y;
        self.push_text(margin, y, 14.0, FontStyle::Bold, theme::PRIMARY, title);
        self.push_rule(margin, y + 2.0, margin + 50.0, y + 2.0, theme::PRIMARY);

        self.cursor_y += SECTION_HEADER_ADVANCE;
    }

    /// Writes one label/value line per pair, reserving the block's full
    /// height before the first line so the block never straddles a page
    /// boundary.  `value_offset` is the horizontal distance between the
    /// margin and the value column.
    pub fn add_key_value_block(&mut self, pairs: &[(&str, String)], value_offset: f32) {
        self.check_page_break(pairs.len() as f32 * self.geometry.line_height);

        let margin = self.geometry.margin;
        for (label, value) in pairs {
            let y = self.cursor_y;
            self.push_text(margin, y, 10.0, FontStyle::Regular, theme::TEXT, *label);
            self.push_text(
                margin + value_offset,
                y,
                10.0,
                FontStyle::Regular,
                theme::BLACK,
                value.clone(),
            );
            self.cursor_y += self.geometry.line_height;
        }
    }

    /// Writes a single label/value line with a per-line break check.
    pub fn add_labeled_line(&mut self, label: &str, value: &str, value_offset: f32) {
        self.check_page_break(self.geometry.line_height);

        let margin = self.geometry.margin;
        let y = self.cursor_y;
        self.push_text(margin, y, 10.0, FontStyle::Regular, theme::TEXT, label);
        self.push_text(
            margin + value_offset,
            y,
            10.0,
            FontStyle::Regular,
            theme::BLACK,
            value,
        );
        self.cursor_y += self.geometry.line_height;
    }

    /// Writes one plain line at the margin with a per-line break check.
    pub fn add_plain_line(&mut self, text: &str, size: f32, style: FontStyle, color: Color) {
        self.check_page_break(self.geometry.line_height);
        let y = self.cursor_y;
        self.push_text(self.geometry.margin, y, size, style, color, text);
        self.cursor_y += self.geometry.line_height;
    }

    /// Writes one indented line with a per-line break check, used for trend
    /// rows in the progress report.
    pub fn add_indented_line(&mut self, text: &str, size: f32) {
        self.check_page_break(self.geometry.line_height);
        let y = self.cursor_y;
        self.push_text(
            self.geometry.margin + INDENT,
            y,
            size,
            FontStyle::Regular,
            theme::BLACK,
            text,
        );
        self.cursor_y += self.geometry.line_height;
    }

    /// Writes one bulleted line with a per-line break check.
    pub fn add_bullet_line(&mut self, text: &str, size: f32) {
        self.add_indented_line(&format!("\u{2022} {text}"), size);
    }

    /// Writes one meal: header line with right-aligned calorie total, then
    /// item bullets.  The meal's full height is reserved up front.
    pub fn add_meal(&mut self, meal: &Meal) {
        let needed = MEAL_HEADER_ADVANCE
            + meal.items.len() as f32 * MEAL_ITEM_ADVANCE
            + MEAL_TRAILING_GAP;
        self.check_page_break(needed);

        let margin = self.geometry.margin;
        let y = self.cursor_y;
        self.push_text(
            margin,
            y,
            11.0,
            FontStyle::Bold,
            theme::PRIMARY,
            format!("{} ({})", meal.meal_type, meal.time),
        );
        self.push_text(
            self.geometry.width - 50.0,
            y,
            11.0,
            FontStyle::Regular,
            theme::TEXT,
            format!("Total: {} cal", meal.total_calories),
        );
        self.cursor_y += MEAL_HEADER_ADVANCE;

        for item in &meal.items {
            let y = self.cursor_y;
            self.push_text(
                margin + INDENT,
                y,
                9.0,
                FontStyle::Regular,
                theme::BLACK,
                format!("\u{2022} {item}"),
            );
            self.cursor_y += MEAL_ITEM_ADVANCE;
        }
        self.cursor_y += MEAL_TRAILING_GAP;
    }

    /// Writes a titled meal-plan section followed by every meal of the day.
    pub fn add_daily_meal_plan(&mut self, title: &str, meals: &[Meal]) {
        self.add_section_header(&format!("Meal Plan - {title}"));
        for meal in meals {
            self.add_meal(meal);
        }
    }

    /// Consumes the layout, stamping the footer rule, footer note and page
    /// number on every allocated page, and returns the finished document.
    pub fn finish(mut self, footer_note: &str) -> Document {
        let geometry = self.geometry;
        let rule_y = geometry.height - FOOTER_RULE_OFFSET;
        let text_y = geometry.height - FOOTER_TEXT_OFFSET;
        let page_count = self.pages.len();

        for (index, page) in self.pages.iter_mut().enumerate() {
            page.primitives.push(Primitive::Rule {
                x1: geometry.margin,
                y1: rule_y,
                x2: geometry.width - geometry.margin,
                y2: rule_y,
                color: theme::RULE,
            });
            page.primitives.push(Primitive::Text {
                x: geometry.margin,
                y: text_y,
                size: 8.0,
                style: FontStyle::Regular,
                color: theme::FOOTER,
                text: footer_note.to_string(),
            });
            page.primitives.push(Primitive::Text {
                x: geometry.width - 30.0,
                y: text_y,
                size: 8.0,
                style: FontStyle::Regular,
                color: theme::FOOTER,
                text: format!("Page {} of {}", index + 1, page_count),
            });
        }

        Document {
            geometry,
            pages: self.pages,
        }
    }

    fn push_text(
        &mut self,
        x: f32,
        y: f32,
        size: f32,
        style: FontStyle,
        color: Color,
        text: impl Into<String>,
    ) {
        self.current_page().primitives.push(Primitive::Text {
            x,
            y,
            size,
            style,
            color,
            text: text.into(),
        });
    }

    fn push_rule(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color) {
        self.current_page()
            .primitives
            .push(Primitive::Rule { x1, y1, x2, y2, color });
    }

    fn current_page(&mut self) -> &mut Page {
        self.pages
            .last_mut()
            .expect("layout always holds at least one page")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_daily_plan;

    fn layout() -> PageLayout {
        PageLayout::new(PageGeometry::A4)
    }

    #[test]
    fn begins_with_one_page_and_cursor_at_margin() {
        let layout = layout();
        assert_eq!(layout.page_count(), 1);
        assert_eq!(layout.cursor_y(), PageGeometry::A4.margin);
    }

    #[test]
    fn check_page_break_is_idempotent_when_content_fits() {
        let mut layout = layout();
        assert!(!layout.check_page_break(50.0));
        let cursor = layout.cursor_y();
        assert!(!layout.check_page_break(50.0));
        assert_eq!(layout.cursor_y(), cursor);
        assert_eq!(layout.page_count(), 1);
    }

    #[test]
    fn content_ending_exactly_at_limit_stays_on_page() {
        let geometry = PageGeometry::A4;
        let mut layout = PageLayout::new(geometry);
        let exact_fit = geometry.limit() - geometry.margin;
        assert!(!layout.check_page_break(exact_fit));
        assert!(layout.check_page_break(exact_fit + 0.1));
        assert_eq!(layout.page_count(), 2);
        assert_eq!(layout.cursor_y(), geometry.margin);
    }

    #[test]
    fn overflowing_content_allocates_pages_and_stays_above_limit() {
        let geometry = PageGeometry::A4;
        let mut layout = PageLayout::new(geometry);
        for index in 0..120 {
            layout.add_bullet_line(&format!("guideline {index}"), 9.0);
        }
        let document = layout.finish("note");

        assert!(document.page_count() > 1);
        let limit = geometry.limit();
        for page in document.pages() {
            for primitive in page.primitives() {
                // Footers live inside the bottom margin; only body lines are bounded.
                if primitive.text().is_some_and(|t| t.contains("guideline")) {
                    assert!(primitive.baseline() <= limit);
                    assert!(primitive.baseline() >= geometry.margin);
                }
            }
        }
    }

    #[test]
    fn key_value_block_never_straddles_pages() {
        let geometry = PageGeometry::A4;
        let mut layout = PageLayout::new(geometry);
        // Park the cursor so only two lines of space remain.
        layout.advance(geometry.limit() - geometry.margin - 2.0 * geometry.line_height);

        let pairs: Vec<(&str, String)> = (0..5)
            .map(|index| ("Label:", format!("value {index}")))
            .collect();
        layout.add_key_value_block(&pairs, 40.0);

        let document = layout.finish("note");
        assert_eq!(document.page_count(), 2);
        assert!(!document.pages()[0].contains_text("value"));
        for index in 0..5 {
            assert!(document.pages()[1].contains_text(&format!("value {index}")));
        }
    }

    #[test]
    fn meal_reserves_its_full_height() {
        let geometry = PageGeometry::A4;
        let mut layout = PageLayout::new(geometry);
        layout.advance(geometry.limit() - geometry.margin - 10.0);

        let meals = default_daily_plan();
        layout.add_meal(&meals[0]);

        let document = layout.finish("note");
        assert_eq!(document.page_count(), 2);
        assert!(document.pages()[1].contains_text("Breakfast (7:30 AM)"));
        assert!(document.pages()[1].contains_text("Total: 365 cal"));
    }

    #[test]
    fn finish_stamps_every_page_exactly_once() {
        let mut layout = layout();
        layout.break_page();
        layout.break_page();
        let document = layout.finish("AyurDiet Pro - Personalized Ayurvedic Nutrition Dashboard");

        assert_eq!(document.page_count(), 3);
        for (index, page) in document.pages().iter().enumerate() {
            let footers = page
                .primitives()
                .iter()
                .filter(|p| p.text().is_some_and(|t| t.starts_with("Page ")))
                .count();
            assert_eq!(footers, 1);
            assert!(page.contains_text(&format!("Page {} of 3", index + 1)));
            assert!(page.contains_text("AyurDiet Pro"));
        }
    }

    #[test]
    fn section_header_advances_by_fixed_height() {
        let mut layout = layout();
        let before = layout.cursor_y();
        layout.add_section_header("Patient Information");
        assert_eq!(layout.cursor_y(), before + SECTION_HEADER_ADVANCE);
    }
}
