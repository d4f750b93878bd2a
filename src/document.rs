use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ContextError;
use crate::money::Money;

/// The four supported document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    Invoice,
    Quote,
    Cv,
    CoverLetter,
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DocumentKind::Invoice => "Invoice",
            DocumentKind::Quote => "Quote",
            DocumentKind::Cv => "CV",
            DocumentKind::CoverLetter => "Cover Letter",
        };
        write!(formatter, "{}", name)
    }
}

/// A contact block reused for the sender and the counterparty across the document kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Party {
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
}

/// A single row of the itemized table of an invoice or a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,
    #[serde(alias = "price")]
    pub unit_price: Money,
}

impl Default for LineItem {
    fn default() -> LineItem {
        LineItem {
            description: String::new(),
            quantity: 1,
            unit_price: Money::ZERO,
        }
    }
}

impl LineItem {
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// The payload shared by invoices and quotes, which are structurally identical.
/// For an invoice `due_date` is the payment due date, for a quote it is the date
/// the offer stays valid until.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BillingData {
    #[serde(alias = "invoiceNumber", alias = "quoteNumber")]
    pub number: String,
    pub date: String,
    #[serde(alias = "validUntil")]
    pub due_date: String,
    #[serde(alias = "yourInfo")]
    pub sender: Party,
    #[serde(alias = "clientInfo")]
    pub recipient: Party,
    pub items: Vec<LineItem>,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
}

impl Default for BillingData {
    fn default() -> BillingData {
        BillingData {
            number: String::new(),
            date: String::new(),
            due_date: String::new(),
            sender: Party::default(),
            recipient: Party::default(),
            // The itemized table always carries at least one row
            items: vec![LineItem::default()],
            notes: String::new(),
            terms: None,
        }
    }
}

impl BillingData {
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// No tax or discount model exists, the total is the subtotal.
    pub fn total(&self) -> Money {
        self.subtotal()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub website: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
}

impl ExperienceEntry {
    /// An entry is laid out only when it names a company or a position.
    pub fn is_filled(&self) -> bool {
        !self.company.trim().is_empty() || !self.position.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

impl EducationEntry {
    pub fn is_filled(&self) -> bool {
        !self.institution.trim().is_empty() || !self.degree.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CvData {
    pub personal: PersonalInfo,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
}

impl Default for CvData {
    fn default() -> CvData {
        CvData {
            personal: PersonalInfo::default(),
            experience: vec![ExperienceEntry::default()],
            education: vec![EducationEntry::default()],
            skills: vec![String::new()],
            languages: vec![String::new()],
        }
    }
}

/// The recipient block of a cover letter, which unlike a `Party` carries a job
/// title and a company name instead of contact details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recipient {
    pub name: String,
    pub title: String,
    pub company: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobInfo {
    pub title: String,
    pub reference: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LetterContent {
    pub greeting: String,
    pub introduction: String,
    pub body: String,
    pub conclusion: String,
    pub closing: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoverLetterData {
    pub date: String,
    pub sender: Party,
    pub recipient: Recipient,
    pub job_info: JobInfo,
    pub content: LetterContent,
}

/// The kind-specific payload of a document, tagged by its kind. All of the
/// downstream stages (editing, preview, layout) dispatch exhaustively on this
/// union, so adding a kind is a compile error until every stage handles it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DocumentContent {
    Invoice(BillingData),
    Quote(BillingData),
    Cv(CvData),
    CoverLetter(CoverLetterData),
}

impl DocumentContent {
    pub fn new(kind: DocumentKind) -> DocumentContent {
        match kind {
            DocumentKind::Invoice => DocumentContent::Invoice(BillingData::default()),
            DocumentKind::Quote => DocumentContent::Quote(BillingData::default()),
            DocumentKind::Cv => DocumentContent::Cv(CvData::default()),
            DocumentKind::CoverLetter => {
                DocumentContent::CoverLetter(CoverLetterData::default())
            }
        }
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            DocumentContent::Invoice(_) => DocumentKind::Invoice,
            DocumentContent::Quote(_) => DocumentKind::Quote,
            DocumentContent::Cv(_) => DocumentKind::Cv,
            DocumentContent::CoverLetter(_) => DocumentKind::CoverLetter,
        }
    }

    /// The identifying field of the payload: the document number for invoices and
    /// quotes, the personal name for a CV, the job title for a cover letter.
    pub fn identifier(&self) -> Option<&str> {
        let identifier = match self {
            DocumentContent::Invoice(data) | DocumentContent::Quote(data) => &data.number,
            DocumentContent::Cv(data) => &data.personal.name,
            DocumentContent::CoverLetter(data) => &data.job_info.title,
        };
        if identifier.trim().is_empty() {
            None
        } else {
            Some(identifier.trim())
        }
    }

    /// The display name a saved record gets, such as `"Invoice INV-007"` or `"CV Draft"`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.kind(), self.identifier().unwrap_or("Draft"))
    }

    /// The suggested name of the exported file, such as `"Invoice_INV-007.pdf"`.
    /// Whitespace runs in the identifier are collapsed to single underscores.
    pub fn export_file_name(&self) -> String {
        let prefix = match self.kind() {
            DocumentKind::Invoice => "Invoice",
            DocumentKind::Quote => "Quote",
            DocumentKind::Cv => "CV",
            DocumentKind::CoverLetter => "Cover_Letter",
        };
        let identifier = self
            .identifier()
            .map(|identifier| identifier.split_whitespace().collect::<Vec<_>>().join("_"))
            .unwrap_or_else(|| "Draft".to_string());
        format!("{}_{}.pdf", prefix, identifier)
    }

    /// Load a document payload from a JSON file.
    pub fn from_path(document_path: &Path) -> Result<DocumentContent, ContextError> {
        let document_content = std::fs::read_to_string(document_path).map_err(|error| {
            ContextError::with_error(
                format!("Unable to read the document {:?}", document_path),
                &error,
            )
        })?;
        Self::from_json(&document_content)
    }

    /// Parse a document payload from its JSON representation.
    pub fn from_json(document_content: &str) -> Result<DocumentContent, ContextError> {
        serde_json::from_str(document_content).map_err(|error| {
            ContextError::with_error("Unable to parse the document", &error)
        })
    }
}

/// The envelope a stored document lives in. The payload is opaque to the envelope,
/// it is only validated by the kind-specific editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub content: DocumentContent,
    pub created_at: String,
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payloads_round_trip_through_the_tagged_representation() {
        let mut data = BillingData::default();
        data.number = "INV-007".to_string();
        data.items[0].description = "Consulting".to_string();
        data.items[0].quantity = 3;
        data.items[0].unit_price = Money::from_cents(10000);
        let content = DocumentContent::Invoice(data);

        let json = serde_json::to_string(&content).unwrap();
        assert!(json.contains("\"type\":\"invoice\""));
        let parsed = DocumentContent::from_json(&json).unwrap();
        assert_eq!(parsed, content);
    }

    #[test]
    fn legacy_field_names_are_still_accepted() {
        let json = r#"{
            "type": "invoice",
            "invoiceNumber": "INV-001",
            "yourInfo": { "name": "Acme" },
            "clientInfo": { "name": "Client" },
            "items": [{ "description": "Work", "quantity": 2, "price": 9.99 }]
        }"#;
        let content = DocumentContent::from_json(json).unwrap();
        let DocumentContent::Invoice(data) = content else {
            panic!("expected an invoice");
        };
        assert_eq!(data.number, "INV-001");
        assert_eq!(data.sender.name, "Acme");
        assert_eq!(data.recipient.name, "Client");
        assert_eq!(data.items[0].unit_price, Money::from_cents(999));
        assert_eq!(data.subtotal(), Money::from_cents(1998));
    }

    #[test]
    fn payloads_with_out_of_range_prices_are_rejected() {
        let json = r#"{
            "type": "invoice",
            "items": [{ "description": "Work", "quantity": 2, "price": 1e17 }]
        }"#;
        assert!(DocumentContent::from_json(json).is_err());
    }

    #[test]
    fn display_names_fall_back_to_draft() {
        let invoice = DocumentContent::new(DocumentKind::Invoice);
        assert_eq!(invoice.display_name(), "Invoice Draft");
        assert_eq!(invoice.export_file_name(), "Invoice_Draft.pdf");

        let mut data = CvData::default();
        data.personal.name = "Jane Smith".to_string();
        let cv = DocumentContent::Cv(data);
        assert_eq!(cv.display_name(), "CV Jane Smith");
        assert_eq!(cv.export_file_name(), "CV_Jane_Smith.pdf");
    }

    #[test]
    fn new_payloads_start_with_one_item_row() {
        let DocumentContent::Quote(data) = DocumentContent::new(DocumentKind::Quote) else {
            panic!("expected a quote");
        };
        assert_eq!(data.items.len(), 1);
        assert_eq!(data.items[0].quantity, 1);
        assert_eq!(data.total(), Money::ZERO);
    }
}
