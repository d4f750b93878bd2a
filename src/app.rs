//! The editing workspace: a session, a gateway and the draft being edited.
//!
//! The workspace owns the save and export flows. A save needs an active
//! session, a create is gated by the monthly allowance of the subscription
//! tier, and only one save may be in flight at a time. A failed save never
//! touches the draft, the user keeps editing exactly what they had.

use crate::document::{DocumentContent, DocumentKind};
use crate::error::ContextError;
use crate::gateway::{DocumentDraft, Gateway, SaveOptions};
use crate::pdf;
use crate::preview;
use crate::session::Session;

pub struct Workspace<G: Gateway> {
    pub session: Session,
    gateway: G,
    draft: DocumentContent,
    /// The identifier of the stored record backing the draft, if any.
    record_id: Option<String>,
    save_in_flight: bool,
}

impl<G: Gateway> Workspace<G> {
    pub fn new(gateway: G, kind: DocumentKind) -> Workspace<G> {
        Workspace {
            session: Session::signed_out(),
            gateway,
            draft: DocumentContent::new(kind),
            record_id: None,
            save_in_flight: false,
        }
    }

    /// Replaces the draft with a stored or loaded document.
    pub fn open(&mut self, content: DocumentContent, record_id: Option<String>) {
        self.draft = content;
        self.record_id = record_id;
    }

    pub fn draft(&self) -> &DocumentContent {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut DocumentContent {
        &mut self.draft
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn preview(&self) -> String {
        preview::preview(&self.draft)
    }

    /// Saves the draft under its display name. The first save creates a record
    /// (subject to the monthly allowance), later saves update it in place.
    pub fn save(&mut self) -> Result<(), ContextError> {
        self.save_with_key(None)
    }

    /// Saves with an idempotency key, so a retry after a lost response does not
    /// create a duplicate record.
    pub fn save_with_key(&mut self, idempotency_key: Option<String>) -> Result<(), ContextError> {
        if self.save_in_flight {
            return Err(ContextError::with_context(
                "Unable to save, another save is still in flight".to_string(),
            ));
        }
        self.save_in_flight = true;
        let outcome = self.save_draft(idempotency_key);
        self.save_in_flight = false;
        outcome
    }

    fn save_draft(&mut self, idempotency_key: Option<String>) -> Result<(), ContextError> {
        let user_id = self.session.require_active()?.to_string();
        let creating = self.record_id.is_none();

        if creating {
            let profile = self
                .gateway
                .get_profile(&user_id)
                .map_err(|error| ContextError::with_error("Unable to check the monthly allowance", &error))?;
            if !profile.can_create_document() {
                return Err(ContextError::with_context(
                    "Unable to create the document, the monthly limit of the current plan has been reached"
                        .to_string(),
                ));
            }
        }

        let draft = DocumentDraft::from_content(self.draft.clone());
        let options = SaveOptions {
            existing_id: self.record_id.clone(),
            idempotency_key,
            ..SaveOptions::default()
        };
        let record = self
            .gateway
            .save_document(&user_id, draft, &options)
            .map_err(|error| ContextError::with_error("Unable to save the document", &error))?;
        log::info!("Saved the document {:?} as {:?}", record.name, record.id);
        self.record_id = Some(record.id);

        if creating {
            self.gateway
                .increment_monthly_document_count(&user_id)
                .map_err(|error| {
                    ContextError::with_error("Unable to update the monthly document count", &error)
                })?;
        }
        Ok(())
    }

    /// Renders the draft to PDF bytes and the file name it should be saved
    /// under. Export does not require a session, a signed-out user may still
    /// download their work.
    pub fn export(&self) -> Result<(String, Vec<u8>), ContextError> {
        pdf::export_to_pdf(&self.draft)
    }

    /// Renders the draft and persists it in one step.
    pub fn export_and_save(&mut self) -> Result<(String, Vec<u8>), ContextError> {
        let exported = self.export()?;
        self.save()?;
        Ok(exported)
    }
}
