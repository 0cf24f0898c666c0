//! PDF rendering backend for laid-out documents.
//!
//! Translates the draw-order primitives of a [`Document`] into `printpdf`
//! calls.  Layout coordinates are top-origin millimetres while PDF pages are
//! bottom-origin, so every baseline is flipped against the page height.
//! Text is set in the builtin Helvetica family, which keeps the output free
//! of bundled font assets.

use std::io::BufWriter;

use printpdf::{
    BuiltinFont, Color as PdfColor, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference,
    Point, Rgb,
};

use crate::error::{Error, Result};
use crate::layout::{Document, FontStyle, Primitive};
use crate::theme::Color;

/// Stroke width for hairline rules.
const RULE_THICKNESS: f32 = 0.3;

fn pdf_color(color: Color) -> PdfColor {
    PdfColor::Rgb(Rgb::new(
        f32::from(color.r) / 255.0,
        f32::from(color.g) / 255.0,
        f32::from(color.b) / 255.0,
        None,
    ))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn pick(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
        }
    }
}

fn draw_primitive(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    page_height: f32,
    primitive: &Primitive,
) {
    match primitive {
        Primitive::Text {
            x,
            y,
            size,
            style,
            color,
            text,
        } => {
            layer.set_fill_color(pdf_color(*color));
            layer.use_text(text, *size, Mm(*x), Mm(page_height - y), fonts.pick(*style));
        }
        Primitive::Rule {
            x1,
            y1,
            x2,
            y2,
            color,
        } => {
            layer.set_outline_color(pdf_color(*color));
            layer.set_outline_thickness(RULE_THICKNESS);
            layer.add_line(Line {
                points: vec![
                    (Point::new(Mm(*x1), Mm(page_height - y1)), false),
                    (Point::new(Mm(*x2), Mm(page_height - y2)), false),
                ],
                is_closed: false,
            });
        }
    }
}

/// Renders a finished document into PDF bytes.
///
/// `title` becomes the document title in the PDF metadata.  The document is
/// rendered page by page in layout order; nothing is written to disk.
pub fn render_pdf(document: &Document, title: &str) -> Result<Vec<u8>> {
    let geometry = document.geometry();
    let (pdf, first_page, first_layer) = PdfDocument::new(
        title,
        Mm(geometry.width),
        Mm(geometry.height),
        "Layer 1",
    );

    let fonts = Fonts {
        regular: pdf
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| Error::Pdf(e.to_string()))?,
        bold: pdf
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| Error::Pdf(e.to_string()))?,
    };

    for (index, page) in document.pages().iter().enumerate() {
        let layer = if index == 0 {
            pdf.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) = pdf.add_page(
                Mm(geometry.width),
                Mm(geometry.height),
                format!("Page {}", index + 1),
            );
            pdf.get_page(page_index).get_layer(layer_index)
        };

        for primitive in page.primitives() {
            draw_primitive(&layer, &fonts, geometry.height, primitive);
        }
    }

    let mut writer = BufWriter::new(Vec::new());
    pdf.save(&mut writer)
        .map_err(|e| Error::Pdf(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| Error::Pdf(format!("PDF buffer error: {e}")))
}
