//! The on-screen preview renderer.
//!
//! `preview` is a pure, synchronous projection of a document payload into plain
//! text: no side effects, and identical payloads always produce byte-identical
//! output. Every missing or blank field is substituted with the fixed placeholder
//! of that field rather than reported as an error.
//!
//! One inherited quirk is preserved on purpose: the invoice and quote previews
//! show `"Not set"` for an absent date while the cover letter preview shows
//! `"[Date]"`.

use crate::document::{BillingData, CoverLetterData, CvData, DocumentContent, DocumentKind};
use crate::format;

/// Render the preview text of a document payload.
pub fn preview(content: &DocumentContent) -> String {
    let lines = match content {
        DocumentContent::Invoice(data) => billing_preview(data, DocumentKind::Invoice),
        DocumentContent::Quote(data) => billing_preview(data, DocumentKind::Quote),
        DocumentContent::Cv(data) => cv_preview(data),
        DocumentContent::CoverLetter(data) => cover_letter_preview(data),
    };
    lines.join("\n")
}

fn long_date_or(input: &str, placeholder: &str) -> String {
    format::format_long_date(input).unwrap_or_else(|| placeholder.to_string())
}

fn billing_preview(data: &BillingData, kind: DocumentKind) -> Vec<String> {
    let (number_label, number_placeholder, due_label) = match kind {
        DocumentKind::Invoice => ("Invoice #:", "INV-001", "Due Date:"),
        _ => ("Quote #:", "QT-001", "Valid Until:"),
    };

    let mut lines = vec![
        format!(
            "{} {}",
            number_label,
            format::or_placeholder(&data.number, number_placeholder)
        ),
        format!("Date: {}", long_date_or(&data.date, "Not set")),
        format!("{} {}", due_label, long_date_or(&data.due_date, "Not set")),
        String::new(),
        "From:".to_string(),
        format::or_placeholder(&data.sender.name, "Your Name").to_string(),
        format::or_placeholder(&data.sender.address, "Your Address").to_string(),
        format::or_placeholder(&data.sender.email, "your@email.com").to_string(),
        format::or_placeholder(&data.sender.phone, "Your Phone").to_string(),
        String::new(),
        "To:".to_string(),
        format::or_placeholder(&data.recipient.name, "Client Name").to_string(),
        format::or_placeholder(&data.recipient.address, "Client Address").to_string(),
        format::or_placeholder(&data.recipient.email, "client@email.com").to_string(),
        format::or_placeholder(&data.recipient.phone, "Client Phone").to_string(),
        String::new(),
        "Items".to_string(),
    ];

    for item in &data.items {
        lines.push(format!(
            "{}  x{}  {}  {}",
            format::or_placeholder(&item.description, "Item description"),
            item.quantity,
            format::currency(item.unit_price),
            format::currency(item.line_total()),
        ));
    }

    lines.push(String::new());
    lines.push(format!("Subtotal: {}", format::currency(data.subtotal())));
    lines.push(format!("Total: {}", format::currency(data.total())));

    if !data.notes.trim().is_empty() {
        lines.push(String::new());
        lines.push("Notes:".to_string());
        lines.push(data.notes.clone());
    }
    if let Some(terms) = data.terms.as_deref().filter(|terms| !terms.trim().is_empty()) {
        lines.push(String::new());
        lines.push("Terms & Conditions:".to_string());
        lines.push(terms.to_string());
    }

    lines
}

fn cv_preview(data: &CvData) -> Vec<String> {
    let mut lines = vec![format::or_placeholder(&data.personal.name, "Your Name").to_string()];
    if !data.personal.title.trim().is_empty() {
        lines.push(data.personal.title.clone());
    }

    let contact = [
        data.personal.email.as_str(),
        data.personal.phone.as_str(),
        data.personal.address.as_str(),
    ]
    .iter()
    .filter(|field| !field.trim().is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(" \u{2022} ");
    if !contact.is_empty() {
        lines.push(contact);
    }
    if !data.personal.website.trim().is_empty() {
        lines.push(data.personal.website.clone());
    }

    if !data.personal.summary.trim().is_empty() {
        lines.push(String::new());
        lines.push("SUMMARY".to_string());
        lines.push(data.personal.summary.clone());
    }

    if data.experience.iter().any(|entry| entry.is_filled()) {
        lines.push(String::new());
        lines.push("EXPERIENCE".to_string());
        for entry in data.experience.iter().filter(|entry| entry.is_filled()) {
            let start = format::format_month_year(&entry.start_date)
                .unwrap_or_else(|| "Start".to_string());
            let end = if entry.current {
                "Present".to_string()
            } else {
                format::format_month_year(&entry.end_date).unwrap_or_else(|| "End".to_string())
            };
            lines.push(format!(
                "{} ({} - {})",
                format::or_placeholder(&entry.position, "Position"),
                start,
                end,
            ));
            lines.push(format::or_placeholder(&entry.company, "Company").to_string());
            if !entry.description.trim().is_empty() {
                lines.push(entry.description.clone());
            }
        }
    }

    if data.education.iter().any(|entry| entry.is_filled()) {
        lines.push(String::new());
        lines.push("EDUCATION".to_string());
        for entry in data.education.iter().filter(|entry| entry.is_filled()) {
            let degree = format::or_placeholder(&entry.degree, "Degree");
            let title = if entry.field.trim().is_empty() {
                degree.to_string()
            } else {
                format!("{} in {}", degree, entry.field)
            };
            let start = format::format_month_year(&entry.start_date)
                .unwrap_or_else(|| "Start".to_string());
            let end = format::format_month_year(&entry.end_date)
                .unwrap_or_else(|| "End".to_string());
            lines.push(format!("{} ({} - {})", title, start, end));
            lines.push(format::or_placeholder(&entry.institution, "Institution").to_string());
            if !entry.description.trim().is_empty() {
                lines.push(entry.description.clone());
            }
        }
    }

    let skills = joined(&data.skills);
    if !skills.is_empty() {
        lines.push(String::new());
        lines.push("SKILLS".to_string());
        lines.push(skills);
    }

    let languages = joined(&data.languages);
    if !languages.is_empty() {
        lines.push(String::new());
        lines.push("LANGUAGES".to_string());
        lines.push(languages);
    }

    lines
}

fn joined(entries: &[String]) -> String {
    entries
        .iter()
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn cover_letter_preview(data: &CoverLetterData) -> Vec<String> {
    let mut lines = vec![
        long_date_or(&data.date, "[Date]"),
        String::new(),
        format::or_placeholder(&data.sender.name, "[Your Name]").to_string(),
        format::or_placeholder(&data.sender.address, "[Your Address]").to_string(),
        format::or_placeholder(&data.sender.email, "[Your Email]").to_string(),
        format::or_placeholder(&data.sender.phone, "[Your Phone]").to_string(),
        String::new(),
        format::or_placeholder(&data.recipient.name, "[Recipient Name]").to_string(),
        format::or_placeholder(&data.recipient.title, "[Recipient Title]").to_string(),
        format::or_placeholder(&data.recipient.company, "[Company Name]").to_string(),
        format::or_placeholder(&data.recipient.address, "[Company Address]").to_string(),
        String::new(),
    ];

    lines.push(format!(
        "{} {},",
        format::or_placeholder(&data.content.greeting, "Dear"),
        format::or_placeholder(&data.recipient.name, "[Recipient Name]"),
    ));
    lines.push(String::new());
    lines.push(
        format::or_placeholder(
            &data.content.introduction,
            "[Your introduction paragraph will appear here]",
        )
        .to_string(),
    );
    lines.push(
        format::or_placeholder(&data.content.body, "[Your body paragraphs will appear here]")
            .to_string(),
    );
    lines.push(
        format::or_placeholder(
            &data.content.conclusion,
            "[Your conclusion paragraph will appear here]",
        )
        .to_string(),
    );
    lines.push(String::new());
    lines.push(format::or_placeholder(&data.content.closing, "Sincerely,").to_string());
    lines.push(format::or_placeholder(&data.sender.name, "[Your Name]").to_string());

    lines
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;
    use crate::document::{DocumentContent, DocumentKind, LineItem};
    use crate::money::Money;

    #[test]
    fn rendering_twice_is_byte_identical() {
        let DocumentContent::Invoice(mut data) = DocumentContent::new(DocumentKind::Invoice)
        else {
            unreachable!()
        };
        data.number = "INV-003".to_string();
        data.notes = "Payment within 30 days.".to_string();
        let content = DocumentContent::Invoice(data);
        assert_eq!(preview(&content), preview(&content));
    }

    #[test]
    fn empty_invoice_renders_placeholders_not_errors() {
        let content = DocumentContent::new(DocumentKind::Invoice);
        let rendered = preview(&content);
        assert!(rendered.contains("Invoice #: INV-001"));
        assert!(rendered.contains("Date: Not set"));
        assert!(rendered.contains("Your Name"));
        assert!(rendered.contains("Client Name"));
        assert!(rendered.contains("Item description  x1  €0.00  €0.00"));
        assert!(rendered.contains("Total: €0.00"));
        assert!(!rendered.contains("Notes:"));
    }

    #[test]
    fn subtotal_is_the_sum_of_the_line_totals() {
        let DocumentContent::Quote(mut data) = DocumentContent::new(DocumentKind::Quote) else {
            unreachable!()
        };
        data.items = vec![
            LineItem {
                description: "Design".to_string(),
                quantity: 2,
                unit_price: Money::from_cents(999),
            },
            LineItem {
                description: "Hosting".to_string(),
                quantity: 1,
                unit_price: Money::from_cents(500),
            },
        ];
        let rendered = preview(&DocumentContent::Quote(data));
        assert!(rendered.contains("Subtotal: €24.98"));
        assert!(rendered.contains("Total: €24.98"));
        assert!(rendered.contains("Valid Until: Not set"));
    }

    #[test]
    fn cover_letter_keeps_its_bracketed_date_placeholder() {
        let content = DocumentContent::new(DocumentKind::CoverLetter);
        let rendered = preview(&content);
        assert!(rendered.starts_with("[Date]"));
        assert!(rendered.contains("Dear [Recipient Name],"));
        assert!(rendered.ends_with("[Your Name]"));
    }

    #[test]
    fn dates_format_identically_to_the_layout() {
        let DocumentContent::Invoice(mut data) = DocumentContent::new(DocumentKind::Invoice)
        else {
            unreachable!()
        };
        data.date = "2025-01-05".to_string();
        let rendered = preview(&DocumentContent::Invoice(data));
        assert!(rendered.contains("Date: January 5, 2025"));
    }
}
