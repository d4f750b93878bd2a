//! The layout engine shared by the four document kinds.
//!
//! `layout` walks a document payload once and emits an ordered sequence of draw
//! instructions (positioned text and rules) in a fixed page coordinate space: A4
//! in millimeters, origin at the top-left corner, y growing downwards. The PDF
//! backend consumes the instructions verbatim, it performs no layout of its own.
//!
//! The space is paginated: whenever the cursor would pass the bottom margin a new
//! page is started and the cursor returns to the top margin, so long itemized
//! tables and wordy descriptions flow onto further pages instead of running off
//! the sheet.

use crate::document::{BillingData, CoverLetterData, CvData, DocumentContent, DocumentKind};
use crate::format;

/// Page width in millimeters (A4 portrait).
pub const PAGE_WIDTH: f32 = 210.0;
/// Page height in millimeters (A4 portrait).
pub const PAGE_HEIGHT: f32 = 297.0;
/// Left margin and x position of the left content column.
pub const LEFT_MARGIN: f32 = 20.0;
/// Right edge of the content area, where right-aligned text ends.
pub const RIGHT_EDGE: f32 = 190.0;
/// Horizontal center of the page, where centered text is anchored.
pub const CENTER: f32 = PAGE_WIDTH / 2.0;
/// Vertical advance of one line in a contact or paragraph block.
pub const LINE_HEIGHT: f32 = 5.0;
/// Vertical advance of one row of the itemized table.
pub const ROW_HEIGHT: f32 = 10.0;
/// Column width the word-wrapped blocks are constrained to.
pub const WRAP_WIDTH: f32 = 170.0;
/// Lowest y position content may reach before a page break.
const CONTENT_BOTTOM: f32 = PAGE_HEIGHT - 20.0;
/// Cursor position at the top of a continuation page.
const CONTENT_TOP: f32 = 20.0;

const TITLE_SIZE: f32 = 20.0;
const SUBTITLE_SIZE: f32 = 14.0;
const HEADING_SIZE: f32 = 12.0;
const ENTRY_SIZE: f32 = 11.0;
const BODY_SIZE: f32 = 10.0;

/// Horizontal alignment of a placed piece of text relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// One primitive drawing directive in the page coordinate space.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        text: String,
        x: f32,
        y: f32,
        font_size: f32,
        align: Align,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
}

/// The instructions of a single laid out page, in emission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

/// Lay out a document payload into positioned draw instructions, one `Page` per
/// output page. The dispatch over the kinds is exhaustive.
pub fn layout(content: &DocumentContent) -> Vec<Page> {
    let mut cursor = Cursor::new();
    match content {
        DocumentContent::Invoice(data) => layout_billing(&mut cursor, data, DocumentKind::Invoice),
        DocumentContent::Quote(data) => layout_billing(&mut cursor, data, DocumentKind::Quote),
        DocumentContent::Cv(data) => layout_cv(&mut cursor, data),
        DocumentContent::CoverLetter(data) => layout_cover_letter(&mut cursor, data),
    }
    cursor.into_pages()
}

/// The pagination cursor: tracks the vertical position and opens a new page
/// whenever an advance would pass the bottom margin.
struct Cursor {
    pages: Vec<Page>,
    y: f32,
}

impl Cursor {
    fn new() -> Cursor {
        Cursor {
            pages: vec![Page::default()],
            y: CONTENT_TOP,
        }
    }

    fn into_pages(self) -> Vec<Page> {
        self.pages
    }

    #[allow(clippy::unwrap_used)] // The cursor always holds at least one page
    fn page(&mut self) -> &mut Page {
        self.pages.last_mut().unwrap()
    }

    /// Place text at the current vertical position.
    fn text<S: Into<String>>(&mut self, text: S, x: f32, font_size: f32, align: Align) {
        let y = self.y;
        self.text_at(text, x, y, font_size, align);
    }

    /// Place text at an absolute vertical position without moving the cursor.
    fn text_at<S: Into<String>>(&mut self, text: S, x: f32, y: f32, font_size: f32, align: Align) {
        self.page().ops.push(DrawOp::Text {
            text: text.into(),
            x,
            y,
            font_size,
            align,
        });
    }

    /// Draw a horizontal rule across the content area at the given offset below
    /// the current position.
    fn rule(&mut self, offset: f32) {
        let y = self.y + offset;
        self.page().ops.push(DrawOp::Line {
            x1: LEFT_MARGIN,
            y1: y,
            x2: RIGHT_EDGE,
            y2: y,
        });
    }

    /// Move the cursor down, breaking to a new page past the bottom margin.
    fn advance(&mut self, height: f32) {
        self.y += height;
        if self.y > CONTENT_BOTTOM {
            self.break_page();
        }
    }

    /// Break to a new page unless at least `height` of room remains.
    fn ensure_room(&mut self, height: f32) {
        if self.y + height > CONTENT_BOTTOM {
            self.break_page();
        }
    }

    fn break_page(&mut self) {
        self.pages.push(Page::default());
        self.y = CONTENT_TOP;
    }

    /// Emit a word-wrapped block at the left margin, advancing one line at a
    /// time, then a trailing gap. Empty input emits nothing but the gap.
    fn wrapped_block(&mut self, text: &str, font_size: f32, gap: f32) {
        for line in wrap_text(text, WRAP_WIDTH, font_size) {
            self.ensure_room(LINE_HEIGHT);
            self.text(line, LEFT_MARGIN, font_size, Align::Left);
            self.advance(LINE_HEIGHT);
        }
        self.advance(gap);
    }
}

fn layout_billing(cursor: &mut Cursor, data: &BillingData, kind: DocumentKind) {
    let (title, number_label, due_label) = match kind {
        DocumentKind::Invoice => ("INVOICE", "Invoice #:", "Due Date:"),
        _ => ("QUOTE", "Quote #:", "Valid Until:"),
    };

    cursor.text_at(title, CENTER, 20.0, TITLE_SIZE, Align::Center);

    let number = format::or_placeholder(&data.number, "N/A");
    let date = format::format_long_date(&data.date).unwrap_or_else(|| "N/A".to_string());
    let due_date = format::format_long_date(&data.due_date).unwrap_or_else(|| "N/A".to_string());
    cursor.text_at(format!("{} {}", number_label, number), LEFT_MARGIN, 40.0, BODY_SIZE, Align::Left);
    cursor.text_at(format!("Date: {}", date), LEFT_MARGIN, 45.0, BODY_SIZE, Align::Left);
    cursor.text_at(format!("{} {}", due_label, due_date), LEFT_MARGIN, 50.0, BODY_SIZE, Align::Left);

    // Two side by side party blocks, left column and right column
    cursor.text_at("From:", LEFT_MARGIN, 65.0, HEADING_SIZE, Align::Left);
    party_block(cursor, LEFT_MARGIN, 70.0, &[
        &data.sender.name,
        &data.sender.address,
        &data.sender.email,
        &data.sender.phone,
    ]);
    cursor.text_at("To:", 120.0, 65.0, HEADING_SIZE, Align::Left);
    party_block(cursor, 120.0, 70.0, &[
        &data.recipient.name,
        &data.recipient.address,
        &data.recipient.email,
        &data.recipient.phone,
    ]);

    cursor.text_at("Items", LEFT_MARGIN, 100.0, HEADING_SIZE, Align::Left);
    cursor.text_at("Description", LEFT_MARGIN, 110.0, BODY_SIZE, Align::Left);
    cursor.text_at("Quantity", 105.0, 110.0, BODY_SIZE, Align::Center);
    cursor.text_at("Price", 155.0, 110.0, BODY_SIZE, Align::Right);
    cursor.text_at("Total", RIGHT_EDGE, 110.0, BODY_SIZE, Align::Right);
    cursor.y = 112.0;
    cursor.rule(0.0);

    cursor.y = 120.0;
    for item in &data.items {
        cursor.ensure_room(ROW_HEIGHT);
        let description = format::or_placeholder(&item.description, "N/A");
        cursor.text(description, LEFT_MARGIN, BODY_SIZE, Align::Left);
        cursor.text(item.quantity.to_string(), 105.0, BODY_SIZE, Align::Center);
        cursor.text(format::currency(item.unit_price), 155.0, BODY_SIZE, Align::Right);
        cursor.text(format::currency(item.line_total()), RIGHT_EDGE, BODY_SIZE, Align::Right);
        cursor.advance(ROW_HEIGHT);
    }

    cursor.ensure_room(2.0 * ROW_HEIGHT);
    // Separating rule right above the totals
    cursor.rule(0.0);
    cursor.advance(ROW_HEIGHT);
    cursor.text("Subtotal:", 130.0, BODY_SIZE, Align::Left);
    cursor.text(format::currency(data.subtotal()), RIGHT_EDGE, BODY_SIZE, Align::Right);
    cursor.advance(ROW_HEIGHT);
    cursor.text("Total:", 130.0, BODY_SIZE, Align::Left);
    cursor.text(format::currency(data.total()), RIGHT_EDGE, BODY_SIZE, Align::Right);

    if !data.notes.trim().is_empty() {
        cursor.advance(2.0 * ROW_HEIGHT);
        cursor.ensure_room(2.0 * ROW_HEIGHT);
        cursor.text("Notes:", LEFT_MARGIN, HEADING_SIZE, Align::Left);
        cursor.advance(ROW_HEIGHT);
        cursor.wrapped_block(&data.notes, BODY_SIZE, ROW_HEIGHT);
    }
    if let Some(terms) = data.terms.as_deref().filter(|terms| !terms.trim().is_empty()) {
        if data.notes.trim().is_empty() {
            cursor.advance(2.0 * ROW_HEIGHT);
        }
        cursor.ensure_room(2.0 * ROW_HEIGHT);
        cursor.text("Terms & Conditions:", LEFT_MARGIN, HEADING_SIZE, Align::Left);
        cursor.advance(ROW_HEIGHT);
        cursor.wrapped_block(terms, BODY_SIZE, 0.0);
    }
}

/// One party contact block: each line advances by the constant line height,
/// whether or not the field is filled, so the two columns stay in step.
fn party_block(cursor: &mut Cursor, x: f32, top: f32, fields: &[&String]) {
    for (index, field) in fields.iter().enumerate() {
        if !field.trim().is_empty() {
            cursor.text_at(field.as_str(), x, top + index as f32 * LINE_HEIGHT, BODY_SIZE, Align::Left);
        }
    }
}

fn layout_cv(cursor: &mut Cursor, data: &CvData) {
    let name = format::or_placeholder(&data.personal.name, "Your Name");
    cursor.text_at(name, CENTER, 20.0, TITLE_SIZE, Align::Center);
    if !data.personal.title.trim().is_empty() {
        cursor.text_at(data.personal.title.as_str(), CENTER, 30.0, SUBTITLE_SIZE, Align::Center);
    }

    let contact_line = [
        data.personal.email.as_str(),
        data.personal.phone.as_str(),
        data.personal.address.as_str(),
    ]
    .iter()
    .filter(|field| !field.trim().is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(" \u{2022} ");
    if !contact_line.is_empty() {
        cursor.text_at(contact_line, CENTER, 40.0, BODY_SIZE, Align::Center);
    }
    if !data.personal.website.trim().is_empty() {
        cursor.text_at(data.personal.website.as_str(), CENTER, 45.0, BODY_SIZE, Align::Center);
    }

    cursor.y = 55.0;

    if !data.personal.summary.trim().is_empty() {
        section_heading(cursor, "SUMMARY");
        cursor.wrapped_block(&data.personal.summary, BODY_SIZE, ROW_HEIGHT);
    }

    if data.experience.iter().any(|entry| entry.is_filled()) {
        section_heading(cursor, "EXPERIENCE");
        for entry in data.experience.iter().filter(|entry| entry.is_filled()) {
            cursor.ensure_room(3.0 * LINE_HEIGHT);
            let position = format::or_placeholder(&entry.position, "Position");
            cursor.text(position, LEFT_MARGIN, ENTRY_SIZE, Align::Left);

            let start = format::format_month_year(&entry.start_date)
                .unwrap_or_else(|| "Start".to_string());
            let end = if entry.current {
                "Present".to_string()
            } else {
                format::format_month_year(&entry.end_date).unwrap_or_else(|| "End".to_string())
            };
            cursor.text(format!("{} - {}", start, end), RIGHT_EDGE, ENTRY_SIZE, Align::Right);
            cursor.advance(LINE_HEIGHT);

            let company = format::or_placeholder(&entry.company, "Company");
            cursor.text(company, LEFT_MARGIN, BODY_SIZE, Align::Left);
            cursor.advance(7.0);

            if !entry.description.trim().is_empty() {
                cursor.wrapped_block(&entry.description, BODY_SIZE, LINE_HEIGHT);
            }
            cursor.advance(LINE_HEIGHT);
        }
    }

    if data.education.iter().any(|entry| entry.is_filled()) {
        section_heading(cursor, "EDUCATION");
        for entry in data.education.iter().filter(|entry| entry.is_filled()) {
            cursor.ensure_room(3.0 * LINE_HEIGHT);
            let degree = format::or_placeholder(&entry.degree, "Degree");
            let title = if entry.field.trim().is_empty() {
                degree.to_string()
            } else {
                format!("{} in {}", degree, entry.field)
            };
            cursor.text(title, LEFT_MARGIN, ENTRY_SIZE, Align::Left);

            let start = format::format_month_year(&entry.start_date)
                .unwrap_or_else(|| "Start".to_string());
            let end = format::format_month_year(&entry.end_date)
                .unwrap_or_else(|| "End".to_string());
            cursor.text(format!("{} - {}", start, end), RIGHT_EDGE, ENTRY_SIZE, Align::Right);
            cursor.advance(LINE_HEIGHT);

            let institution = format::or_placeholder(&entry.institution, "Institution");
            cursor.text(institution, LEFT_MARGIN, BODY_SIZE, Align::Left);
            cursor.advance(7.0);

            if !entry.description.trim().is_empty() {
                cursor.wrapped_block(&entry.description, BODY_SIZE, LINE_HEIGHT);
            }
            cursor.advance(LINE_HEIGHT);
        }
    }

    let skills = joined_entries(&data.skills);
    if !skills.is_empty() {
        section_heading(cursor, "SKILLS");
        cursor.wrapped_block(&skills, BODY_SIZE, ROW_HEIGHT);
    }

    let languages = joined_entries(&data.languages);
    if !languages.is_empty() {
        section_heading(cursor, "LANGUAGES");
        cursor.text(languages, LEFT_MARGIN, BODY_SIZE, Align::Left);
    }
}

/// A CV section header followed by its separating rule.
fn section_heading(cursor: &mut Cursor, heading: &str) {
    cursor.ensure_room(4.0 * LINE_HEIGHT);
    cursor.text(heading, LEFT_MARGIN, HEADING_SIZE, Align::Left);
    cursor.rule(2.0);
    cursor.advance(ROW_HEIGHT);
}

fn joined_entries(entries: &[String]) -> String {
    entries
        .iter()
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn layout_cover_letter(cursor: &mut Cursor, data: &CoverLetterData) {
    if let Some(date) = format::format_long_date(&data.date) {
        cursor.text_at(date, RIGHT_EDGE, 20.0, BODY_SIZE, Align::Right);
    }

    cursor.y = 40.0;
    for field in [
        &data.sender.name,
        &data.sender.address,
        &data.sender.email,
        &data.sender.phone,
    ] {
        if !field.trim().is_empty() {
            cursor.text(field.as_str(), LEFT_MARGIN, BODY_SIZE, Align::Left);
        }
        cursor.advance(LINE_HEIGHT);
    }
    cursor.advance(ROW_HEIGHT);

    for field in [
        &data.recipient.name,
        &data.recipient.title,
        &data.recipient.company,
        &data.recipient.address,
    ] {
        if !field.trim().is_empty() {
            cursor.text(field.as_str(), LEFT_MARGIN, BODY_SIZE, Align::Left);
        }
        cursor.advance(LINE_HEIGHT);
    }
    cursor.advance(ROW_HEIGHT);

    let greeting = format::or_placeholder(&data.content.greeting, "Dear");
    let recipient_name = format::or_placeholder(&data.recipient.name, "[Recipient Name]");
    cursor.text(format!("{} {},", greeting, recipient_name), LEFT_MARGIN, BODY_SIZE, Align::Left);
    cursor.advance(ROW_HEIGHT);

    for paragraph in [&data.content.introduction, &data.content.body] {
        if !paragraph.trim().is_empty() {
            cursor.wrapped_block(paragraph, BODY_SIZE, LINE_HEIGHT);
        }
    }
    if !data.content.conclusion.trim().is_empty() {
        cursor.wrapped_block(&data.content.conclusion, BODY_SIZE, ROW_HEIGHT);
    }

    cursor.ensure_room(4.0 * LINE_HEIGHT);
    let closing = format::or_placeholder(&data.content.closing, "Sincerely,");
    cursor.text(closing, LEFT_MARGIN, BODY_SIZE, Align::Left);
    cursor.advance(15.0);
    let signature = format::or_placeholder(&data.sender.name, "[Your Name]");
    cursor.text(signature, LEFT_MARGIN, BODY_SIZE, Align::Left);
}

/// Advance widths of the Helvetica glyphs for the printable ASCII range, in
/// thousandths of the font size, taken from the standard AFM metrics. Characters
/// outside the range fall back to the average width.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722, 667,
    611, 722, 667, 944, 667, 667, 611, // 'A'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333, 500,
    278, 556, 500, 722, 500, 500, 500, // 'a'..'z'
    334, 260, 334, 584, // '{'..'~'
];

const FALLBACK_WIDTH: u16 = 556;

/// Conversion factor from typographic points to millimeters.
const POINTS_TO_MILLIMETERS: f32 = 25.4 / 72.0;

fn glyph_width(character: char) -> u16 {
    let codepoint = character as u32;
    if (0x20..=0x7E).contains(&codepoint) {
        HELVETICA_WIDTHS[(codepoint - 0x20) as usize]
    } else {
        FALLBACK_WIDTH
    }
}

/// The width in millimeters a string occupies at the given font size.
pub fn text_width(text: &str, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|character| glyph_width(character) as u32).sum();
    units as f32 / 1000.0 * font_size * POINTS_TO_MILLIMETERS
}

/// Wraps a string to the given column width in millimeters. Explicit newlines are
/// respected, words are kept whole unless a single word exceeds the column, in
/// which case it is broken at the character that no longer fits.
pub fn wrap_text(text: &str, max_width: f32, font_size: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for input_line in text.lines() {
        let mut current_line = String::new();
        for word in input_line.split_whitespace() {
            let candidate = if current_line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current_line, word)
            };
            if text_width(&candidate, font_size) <= max_width {
                current_line = candidate;
                continue;
            }
            if !current_line.is_empty() {
                lines.push(std::mem::take(&mut current_line));
            }
            if text_width(word, font_size) <= max_width {
                current_line = word.to_string();
            } else {
                // A single word wider than the column is broken by character
                for character in word.chars() {
                    let mut candidate = current_line.clone();
                    candidate.push(character);
                    if text_width(&candidate, font_size) > max_width && !current_line.is_empty() {
                        lines.push(std::mem::take(&mut current_line));
                    }
                    current_line.push(character);
                }
            }
        }
        lines.push(current_line);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{CvData, DocumentContent, DocumentKind, ExperienceEntry};
    use crate::money::Money;

    fn texts(pages: &[Page]) -> Vec<&str> {
        pages
            .iter()
            .flat_map(|page| &page.ops)
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                DrawOp::Line { .. } => None,
            })
            .collect()
    }

    fn invoice_with_items(items: &[(&str, u32, i64)]) -> DocumentContent {
        let DocumentContent::Invoice(mut data) = DocumentContent::new(DocumentKind::Invoice)
        else {
            unreachable!()
        };
        data.number = "INV-007".to_string();
        data.date = "2025-01-05".to_string();
        data.items = items
            .iter()
            .map(|(description, quantity, cents)| crate::document::LineItem {
                description: description.to_string(),
                quantity: *quantity,
                unit_price: Money::from_cents(*cents),
            })
            .collect();
        DocumentContent::Invoice(data)
    }

    #[test]
    fn invoice_rows_and_totals_are_laid_out() {
        let pages = layout(&invoice_with_items(&[("Consulting", 3, 10000)]));
        assert_eq!(pages.len(), 1);
        let texts = texts(&pages);
        assert!(texts.contains(&"INVOICE"));
        assert!(texts.contains(&"Invoice #: INV-007"));
        assert!(texts.contains(&"Date: January 5, 2025"));
        assert!(texts.contains(&"Consulting"));
        // The computed row total and the final total both read 300.00
        assert_eq!(
            texts.iter().copied().filter(|text| *text == "€300.00").count(),
            3
        );
        assert!(texts.contains(&"Subtotal:"));
        assert!(texts.contains(&"Total:"));
    }

    #[test]
    fn quantity_and_amount_columns_carry_their_alignment() {
        let pages = layout(&invoice_with_items(&[("Consulting", 3, 10000)]));
        let aligned: Vec<_> = pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, align, .. } => Some((text.as_str(), *align)),
                DrawOp::Line { .. } => None,
            })
            .collect();
        assert!(aligned.contains(&("3", Align::Center)));
        assert!(aligned.contains(&("€100.00", Align::Right)));
        assert!(aligned.contains(&("INVOICE", Align::Center)));
    }

    #[test]
    fn long_item_tables_break_onto_a_second_page() {
        let items: Vec<(&str, u32, i64)> = (0..40).map(|_| ("Work", 1, 100)).collect();
        let pages = layout(&invoice_with_items(&items));
        assert!(pages.len() >= 2, "expected a page break, got {} page(s)", pages.len());
        // Every page stays inside the vertical bounds
        for page in &pages {
            for op in &page.ops {
                if let DrawOp::Text { y, .. } = op {
                    assert!(*y <= CONTENT_BOTTOM);
                }
            }
        }
    }

    #[test]
    fn empty_experience_section_is_omitted_entirely() {
        let mut data = CvData::default();
        data.personal.name = "Jane".to_string();
        data.experience = vec![ExperienceEntry::default(), ExperienceEntry::default()];
        let pages = layout(&DocumentContent::Cv(data));
        let texts = texts(&pages);
        assert!(!texts.contains(&"EXPERIENCE"));
        // No separating rule either: the only ops are the header texts
        assert!(pages[0]
            .ops
            .iter()
            .all(|op| matches!(op, DrawOp::Text { .. })));
    }

    #[test]
    fn current_experience_renders_present_as_the_end_date() {
        let mut data = CvData::default();
        data.experience[0] = ExperienceEntry {
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            start_date: "2021-09-01".to_string(),
            end_date: String::new(),
            current: true,
            description: String::new(),
        };
        let pages = layout(&DocumentContent::Cv(data));
        assert!(texts(&pages).contains(&"Sep 2021 - Present"));
    }

    #[test]
    fn wrapping_respects_the_column_width() {
        let text = "lorem ".repeat(60);
        let lines = wrap_text(&text, WRAP_WIDTH, BODY_SIZE);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, BODY_SIZE) <= WRAP_WIDTH);
        }
    }

    #[test]
    fn wrapping_preserves_explicit_newlines() {
        let lines = wrap_text("first\nsecond", WRAP_WIDTH, BODY_SIZE);
        assert_eq!(lines, vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn overlong_words_are_broken_by_character() {
        let word = "a".repeat(400);
        let lines = wrap_text(&word, WRAP_WIDTH, BODY_SIZE);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, BODY_SIZE) <= WRAP_WIDTH);
        }
    }

    #[test]
    fn layout_is_a_pure_function_of_the_payload() {
        let content = invoice_with_items(&[("Consulting", 3, 10000)]);
        assert_eq!(layout(&content), layout(&content));
    }
}
