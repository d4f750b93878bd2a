//! Paperforge turns structured form data into finished business documents. The
//! library understands four kinds of documents, which are invoices, quotes, CVs and
//! cover letters, each represented by a typed payload that can be parsed from JSON.
//! A payload can be previewed as plain text, laid out onto A4 pages and rendered
//! into a PDF file that is byte-for-byte reproducible.
//!
//! The persistence side of the crate is kept behind the `Gateway` trait so that the
//! editing and rendering logic never depends on a concrete backend. The `Workspace`
//! struct ties a gateway, a session and a draft together and implements the save
//! and export flows on top of them.

/// The module where the document payloads are presented.
///
/// # Introduction
///
/// The entry point of this module is the `DocumentContent` enum, which carries the
/// full payload of one of the four supported document kinds. A payload can be
/// constructed empty through `DocumentContent::new` or parsed from a JSON file or
/// string, the wire format is tagged by a `type` field and tolerates the legacy
/// field names of older exports. On top of the payload the enum derives everything
/// the rest of the crate needs, such as the display name of a draft and the file
/// name a PDF export should be saved under.
pub mod document;

/// This module contains the `ContextError` type which is the error type used throughout this library.
///
/// Every fallible operation in this crate returns a `Result` carrying a
/// `ContextError`, which pairs a human-readable explanation with the stringified
/// error that caused it, if one exists. Errors propagated through several layers
/// therefore keep the full chain of explanations without requiring an enumeration
/// of specific error codes.
pub mod error;

/// Exact money arithmetic for the billing documents.
///
/// Amounts are stored as an integer count of cents, so adding line totals can
/// never accumulate binary floating point error. Free-form user input is turned
/// into an amount through `Money::parse`, which rejects anything that is not a
/// plain non-negative decimal with at most two fraction digits.
pub mod money;

/// Shared display formatting: the currency string, long and abbreviated dates
/// and the placeholder substitution used by the previews and layouts.
pub mod format;

/// The editing operations applied to a payload while the user fills in a form.
///
/// Structural edits such as adding or removing a line item live here, together
/// with the field updates that must validate free-form input first. An update
/// with input that does not parse is rejected as an error and leaves the payload
/// untouched, no field is ever silently zeroed or marked not-a-number.
pub mod edit;

/// The plain-text preview of a document.
///
/// The preview is a pure function of the payload, rendering the same lines the
/// PDF will contain but without any geometry. Missing fields show placeholder
/// text so the user can see the shape of the finished document while the form is
/// still half empty.
pub mod preview;

/// The module where payloads are laid out onto A4 pages.
///
/// # Introduction
///
/// The `layout` function turns a payload into a list of `Page`s holding plain
/// drawing operations, which are positioned text runs and horizontal rules in
/// millimeter coordinates. All the geometry of the documents lives here, such as
/// the column positions of the invoice table, the text wrapping width of the CV
/// sections and the page break that starts a new page once the content would run
/// past the bottom margin. The module knows nothing about PDF, the operations it
/// emits can be inspected and tested directly.
pub mod layout;

/// The module where the `PdfDocument` interface for working with PDF documents is presented.
///
/// # Introduction
///
/// The struct `PdfDocument` wraps the low-level PDF object machinery behind a
/// small interface of `add_page`, `write_text` and `draw_line`, taking positions
/// in millimeters from the bottom-left corner as the PDF coordinate system does.
/// Text is set in the built-in Helvetica font with WinAnsi encoding, so no font
/// file has to be embedded. The creation timestamps and the document identifier
/// are pinned, which makes the output byte-for-byte reproducible and therefore
/// testable. `render_pages` bridges from the layout pages into this interface and
/// `export_to_pdf` is the one-call entry point from a payload to the finished
/// file.
pub mod pdf;

/// The persistence gateway contract and its in-memory reference implementation.
///
/// The `Gateway` trait mirrors the operations of the hosted backend: profile
/// lookup, listing and saving document records, usage counters, account deletion
/// and avatar storage. Saves carry a `SaveOptions` value with the record to
/// update, an optional idempotency key and the timeout budget of the request.
/// `MemoryGateway` implements the contract with plain maps and is what the tests
/// and the command line binary run against.
pub mod gateway;

/// The authentication session as an explicit state machine.
pub mod session;

/// The `Workspace`, which ties a session, a gateway and the draft being edited
/// together and implements the save and export flows.
pub mod app;
