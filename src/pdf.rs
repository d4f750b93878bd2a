use time::OffsetDateTime;
use unicode_normalization::UnicodeNormalization as _;

use crate::document::DocumentContent;
use crate::error::ContextError;
use crate::layout::{self, Align, DrawOp, Page};

/// The representation of a PDF page: its dimensions together with the content
/// stream operations accumulated so far.
#[derive(Debug, Clone)]
pub struct PdfPage {
    /// The index of the page in the document.
    pub(crate) number: usize,
    /// Page width in points.
    pub width: f32,
    /// Page height in points.
    pub height: f32,
    /// The content stream operations of the page.
    pub(crate) operations: Vec<lopdf::content::Operation>,
}

/// Converts millimeters to points. This function is used in order to present the data
/// in the format required by the PDF specification, while the layout engine works in
/// millimeters which are easier to reason about.
fn millimeters_to_points(millimeters: f32) -> f32 {
    millimeters * 2.834646
}

/// This struct represents the actual PDF document on a high-level. It is an interface
/// to the underlying `lopdf::Document` with the addition of the PDF pages and the
/// document identifier.
///
/// The only font the documents use is Helvetica, one of the fourteen base fonts every
/// PDF reader ships, so no font program has to be embedded and the output stays small
/// and fully deterministic. Text is normalized to the NFC form and encoded as WinAnsi,
/// which covers the Latin range plus the currency and bullet glyphs the documents need.
pub struct PdfDocument {
    /// The underlying PDF document: this is a low-level interface and shouldn't be
    /// directly interacted with unless strictly necessary, anyway this is why it is
    /// exposed to the user.
    pub inner_document: lopdf::Document,
    /// The identifier of the document, it is used in order to set the PDF `ID` tag.
    pub identifier: String,
    /// The pages of the PDF document.
    pub(crate) pages: Vec<PdfPage>,
}

/// The name under which the Helvetica font is registered in every page's resources.
const FONT_RESOURCE: &str = "F1";

impl PdfDocument {
    /// Create a new `PdfDocument` by defaulting the underlying PDF document to version 1.5
    /// of the PDF specification and customly specifying the PDF identifier.
    pub fn new<S: Into<String>>(identifier: S) -> Self {
        PdfDocument {
            inner_document: lopdf::Document::with_version("1.5"),
            identifier: identifier.into(),
            pages: Vec::new(),
        }
    }

    /// Adds a page of the given width and height in millimeters and returns its index,
    /// which is to be passed to the drawing functions.
    pub fn add_page(&mut self, page_width: f32, page_height: f32) -> usize {
        let pdf_page = PdfPage {
            number: self.pages.len() + 1,
            width: millimeters_to_points(page_width),
            height: millimeters_to_points(page_height),
            operations: Vec::new(),
        };
        self.pages.push(pdf_page);
        self.pages.len() - 1
    }

    /// Writes a line of text onto the given page. The position is the baseline start
    /// in millimeters from the bottom-left corner of the page, as the PDF coordinate
    /// space demands.
    pub fn write_text(
        &mut self,
        page_index: usize,
        text: &str,
        font_size: f32,
        position: [f32; 2],
    ) -> Result<(), ContextError> {
        let encoded = encode_win_ansi(text);
        let [x, y] = position;
        let operations = vec![
            lopdf::content::Operation::new("BT", vec![]), // Begin text section
            lopdf::content::Operation::new(
                "Tf",
                vec![
                    lopdf::Object::Name(FONT_RESOURCE.into()),
                    font_size.into(),
                ],
            ), // Set the font and the font size
            lopdf::content::Operation::new(
                "Td",
                vec![
                    millimeters_to_points(x).into(),
                    millimeters_to_points(y).into(),
                ],
            ), // Set the position where the text begins to be written
            lopdf::content::Operation::new(
                "Tj",
                vec![lopdf::Object::String(
                    encoded,
                    lopdf::StringFormat::Literal,
                )],
            ), // The actual text content
            lopdf::content::Operation::new("ET", vec![]), // End text section
        ];
        self.page_at(page_index)?.operations.extend(operations);
        Ok(())
    }

    /// Strokes a straight line between the two points, given in millimeters from the
    /// bottom-left corner of the page.
    pub fn draw_line(
        &mut self,
        page_index: usize,
        from: [f32; 2],
        to: [f32; 2],
    ) -> Result<(), ContextError> {
        let operations = vec![
            // A hairline slightly above the minimal stroke width, so it stays
            // visible on every renderer
            lopdf::content::Operation::new("w", vec![lopdf::Object::Real(0.567)]),
            lopdf::content::Operation::new(
                "m",
                vec![
                    millimeters_to_points(from[0]).into(),
                    millimeters_to_points(from[1]).into(),
                ],
            ),
            lopdf::content::Operation::new(
                "l",
                vec![
                    millimeters_to_points(to[0]).into(),
                    millimeters_to_points(to[1]).into(),
                ],
            ),
            lopdf::content::Operation::new("S", vec![]),
        ];
        self.page_at(page_index)?.operations.extend(operations);
        Ok(())
    }

    fn page_at(&mut self, page_index: usize) -> Result<&mut PdfPage, ContextError> {
        let page_count = self.pages.len();
        self.pages
            .get_mut(page_index)
            .ok_or(ContextError::with_context(format!(
                "There is no page at index {} among the {} pages",
                page_index, page_count
            )))
    }

    /// Assembles the page tree, the font dictionary and the document information and
    /// serializes everything into the bytes of the finished PDF file.
    ///
    /// The creation and modification dates are pinned to the Unix epoch so that the
    /// same document always serializes to the same bytes.
    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>, ContextError> {
        use lopdf::Object::*;

        let pages_id = self.inner_document.new_object_id();

        // The single font dictionary shared by all the pages. Helvetica is a base
        // font, so neither a font descriptor nor an embedded font program is needed.
        let font_id = self.inner_document.add_object(Dictionary(
            lopdf::Dictionary::from_iter(vec![
                ("Type", Name("Font".into())),
                ("Subtype", Name("Type1".into())),
                ("BaseFont", Name("Helvetica".into())),
                ("Encoding", Name("WinAnsiEncoding".into())),
            ]),
        ));
        let font_dictionary =
            lopdf::Dictionary::from_iter(vec![(FONT_RESOURCE, Reference(font_id))]);

        let mut page_ids = Vec::new();
        for page in &self.pages {
            let content = lopdf::content::Content {
                operations: page.operations.clone(),
            };
            let content_bytes = content.encode().map_err(|error| {
                ContextError::with_error(
                    format!("Unable to encode the contents of page {}", page.number),
                    &error,
                )
            })?;
            let content_id = self
                .inner_document
                .add_object(Stream(lopdf::Stream::new(
                    lopdf::Dictionary::new(),
                    content_bytes,
                )));

            let page_dictionary = lopdf::Dictionary::from_iter(vec![
                ("Type", Name("Page".into())),
                ("Parent", Reference(pages_id)),
                (
                    "MediaBox",
                    Array(vec![
                        Integer(0),
                        Integer(0),
                        Real(page.width),
                        Real(page.height),
                    ]),
                ),
                (
                    "Resources",
                    Dictionary(lopdf::Dictionary::from_iter(vec![(
                        "Font",
                        Dictionary(font_dictionary.clone()),
                    )])),
                ),
                ("Contents", Reference(content_id)),
            ]);
            page_ids.push(self.inner_document.add_object(Dictionary(page_dictionary)));
        }

        let pages_dictionary = lopdf::Dictionary::from_iter(vec![
            ("Type", Name("Pages".into())),
            (
                "Kids",
                Array(page_ids.iter().map(|id| Reference(*id)).collect()),
            ),
            ("Count", Integer(page_ids.len() as i64)),
        ]);
        self.inner_document
            .objects
            .insert(pages_id, Dictionary(pages_dictionary));

        let catalog_id = self.inner_document.add_object(Dictionary(
            lopdf::Dictionary::from_iter(vec![
                ("Type", Name("Catalog".into())),
                ("Pages", Reference(pages_id)),
            ]),
        ));

        let timestamp = to_pdf_timestamp_format(&OffsetDateTime::UNIX_EPOCH);
        let info_id = self.inner_document.add_object(Dictionary(
            lopdf::Dictionary::from_iter(vec![
                ("Trapped", "False".into()),
                (
                    "CreationDate",
                    String(timestamp.clone().into_bytes(), lopdf::StringFormat::Literal),
                ),
                (
                    "ModDate",
                    String(timestamp.into_bytes(), lopdf::StringFormat::Literal),
                ),
            ]),
        ));

        self.inner_document.trailer.set("Root", Reference(catalog_id));
        self.inner_document.trailer.set("Info", Reference(info_id));
        self.inner_document.trailer.set(
            "ID",
            Array(vec![
                String(
                    self.identifier.clone().into_bytes(),
                    lopdf::StringFormat::Literal,
                ),
                String(
                    self.identifier.clone().into_bytes(),
                    lopdf::StringFormat::Literal,
                ),
            ]),
        );

        let mut pdf_document_bytes = Vec::new();
        self.inner_document
            .save_to(&mut pdf_document_bytes)
            .map_err(|error| {
                ContextError::with_error("Unable to serialize the PDF document", &error)
            })?;
        Ok(pdf_document_bytes)
    }
}

/// Formats a timestamp the way the PDF document information dictionary expects,
/// such as `D:19700101000000+00'00'`.
fn to_pdf_timestamp_format(timestamp: &OffsetDateTime) -> String {
    format!(
        "D:{:04}{:02}{:02}{:02}{:02}{:02}+00'00'",
        timestamp.year(),
        timestamp.month() as u8,
        timestamp.day(),
        timestamp.hour(),
        timestamp.minute(),
        timestamp.second(),
    )
}

/// Encodes the text as WinAnsi after normalizing it to the NFC form. Characters
/// outside the encoding are replaced with a question mark and logged, the export
/// never fails on exotic input.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    for character in text.nfc() {
        let codepoint = character as u32;
        let byte = match codepoint {
            0x20..=0x7E => Some(codepoint as u8),
            0xA0..=0xFF => Some(codepoint as u8),
            _ => win_ansi_extension(character),
        };
        match byte {
            Some(byte) => bytes.push(byte),
            None => {
                log::warn!("Unable to encode the character {:?} as WinAnsi", character);
                bytes.push(b'?');
            }
        }
    }
    bytes
}

/// The WinAnsi code points of the characters that sit outside the Latin-1 block,
/// limited to the ones the documents actually produce.
fn win_ansi_extension(character: char) -> Option<u8> {
    match character {
        '\u{20AC}' => Some(0x80), // Euro sign
        '\u{2018}' => Some(0x91), // Left single quotation mark
        '\u{2019}' => Some(0x92), // Right single quotation mark
        '\u{201C}' => Some(0x93), // Left double quotation mark
        '\u{201D}' => Some(0x94), // Right double quotation mark
        '\u{2022}' => Some(0x95), // Bullet
        '\u{2013}' => Some(0x96), // En dash
        '\u{2014}' => Some(0x97), // Em dash
        _ => None,
    }
}

/// Renders a laid out page sequence into a `PdfDocument`, resolving the alignment of
/// each instruction against the Helvetica metrics and flipping the top-down layout
/// coordinates into the bottom-up PDF space.
pub fn render_pages(identifier: &str, pages: &[Page]) -> Result<PdfDocument, ContextError> {
    let mut pdf_document = PdfDocument::new(identifier);
    for page in pages {
        let page_index = pdf_document.add_page(layout::PAGE_WIDTH, layout::PAGE_HEIGHT);
        for op in &page.ops {
            match op {
                DrawOp::Text {
                    text,
                    x,
                    y,
                    font_size,
                    align,
                } => {
                    let x = match align {
                        Align::Left => *x,
                        Align::Center => x - layout::text_width(text, *font_size) / 2.0,
                        Align::Right => x - layout::text_width(text, *font_size),
                    };
                    let y = layout::PAGE_HEIGHT - y;
                    pdf_document.write_text(page_index, text, *font_size, [x, y])?;
                }
                DrawOp::Line { x1, y1, x2, y2 } => {
                    pdf_document.draw_line(
                        page_index,
                        [*x1, layout::PAGE_HEIGHT - y1],
                        [*x2, layout::PAGE_HEIGHT - y2],
                    )?;
                }
            }
        }
    }
    Ok(pdf_document)
}

/// Lays out and renders a document payload, returning the suggested download file
/// name together with the bytes of the finished PDF.
pub fn export_to_pdf(content: &DocumentContent) -> Result<(String, Vec<u8>), ContextError> {
    let file_name = content.export_file_name();
    log::info!("Exporting {:?}", file_name);
    let pages = layout::layout(content);
    let mut pdf_document = render_pages(&file_name, &pages)?;
    let bytes = pdf_document.save_to_bytes()?;
    Ok((file_name, bytes))
}
