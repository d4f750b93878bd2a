//! The persistence gateway the application stores its records through.
//!
//! The gateway is a collaborator, not a subsystem: the core only depends on the
//! `Gateway` trait, which mirrors the operations of the hosted backend (profiles,
//! document records, usage counters, avatar storage). `MemoryGateway` is the
//! in-process reference implementation used by the tests and the command line
//! binary.
//!
//! Concurrency model: last write wins. No optimistic concurrency token is carried
//! by the records, two sessions updating the same record silently overwrite each
//! other. Saves do carry an idempotency key, so a retried create never duplicates
//! a record.

use std::collections::HashMap;
use std::time::Duration;

use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::document::{DocumentContent, DocumentRecord};
use crate::error::ContextError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    Free,
    Premium,
    Payg,
}

/// The number of documents the free tier may create per month.
pub const FREE_TIER_MONTHLY_LIMIT: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub subscription_tier: SubscriptionTier,
    pub documents_created_this_month: u32,
    pub subscription_renewal_date: Option<String>,
}

impl Profile {
    /// Whether the profile may still create a document this month.
    pub fn can_create_document(&self) -> bool {
        match self.subscription_tier {
            SubscriptionTier::Free => self.documents_created_this_month < FREE_TIER_MONTHLY_LIMIT,
            SubscriptionTier::Premium | SubscriptionTier::Payg => true,
        }
    }
}

/// The payload of a save request: the display name together with the content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDraft {
    pub name: String,
    pub content: DocumentContent,
}

impl DocumentDraft {
    pub fn from_content(content: DocumentContent) -> DocumentDraft {
        DocumentDraft {
            name: content.display_name(),
            content,
        }
    }
}

/// Options of a save request.
///
/// `existing_id` selects update-in-place, anything else inserts a new record. The
/// idempotency key makes a retried insert return the already created record
/// instead of a duplicate. The timeout is the budget a network-backed gateway
/// must abandon the request after, a stalled call must never hang its caller
/// indefinitely.
#[derive(Debug, Clone)]
pub struct SaveOptions {
    pub existing_id: Option<String>,
    pub idempotency_key: Option<String>,
    pub timeout: Duration,
}

impl Default for SaveOptions {
    fn default() -> SaveOptions {
        SaveOptions {
            existing_id: None,
            idempotency_key: None,
            timeout: Duration::from_secs(10),
        }
    }
}

/// The operations of the persistence backend.
pub trait Gateway {
    fn get_profile(&self, user_id: &str) -> Result<Profile, ContextError>;

    /// The stored documents of a user, newest first.
    fn list_documents(&self, user_id: &str) -> Result<Vec<DocumentRecord>, ContextError>;

    /// Updates the record in place when `existing_id` names a record owned by
    /// `user_id`, inserts a new record otherwise.
    fn save_document(
        &mut self,
        user_id: &str,
        draft: DocumentDraft,
        options: &SaveOptions,
    ) -> Result<DocumentRecord, ContextError>;

    fn delete_document(&mut self, document_id: &str) -> Result<(), ContextError>;

    /// Read-then-write counter increment. Not atomic, two concurrent increments
    /// may count as one.
    fn increment_monthly_document_count(&mut self, user_id: &str) -> Result<(), ContextError>;

    /// Cascading delete of the profile and every owned record.
    fn delete_account(&mut self, user_id: &str) -> Result<(), ContextError>;

    /// Stores the avatar bytes, patches the profile metadata and returns the
    /// stable public URL of the stored file.
    fn upload_avatar(
        &mut self,
        user_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ContextError>;
}

/// Generates a random alphanumeric identifier of the given length.
pub fn random_identifier(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .map(char::from)
        .take(length)
        .collect()
}

/// An in-process gateway holding everything in plain maps. The save timeout is
/// accepted and ignored, there is no transport that could stall.
#[derive(Default)]
pub struct MemoryGateway {
    profiles: HashMap<String, Profile>,
    documents: Vec<DocumentRecord>,
    idempotency_keys: HashMap<String, String>,
    avatars: HashMap<String, Vec<u8>>,
}

impl MemoryGateway {
    pub fn new() -> MemoryGateway {
        MemoryGateway::default()
    }

    /// Registers a user on the free tier and returns the new profile identifier.
    pub fn add_user(&mut self, email: &str) -> String {
        let user_id = random_identifier(32);
        self.profiles.insert(
            user_id.clone(),
            Profile {
                id: user_id.clone(),
                email: email.to_string(),
                full_name: None,
                avatar_url: None,
                subscription_tier: SubscriptionTier::Free,
                documents_created_this_month: 0,
                subscription_renewal_date: None,
            },
        );
        user_id
    }

    /// Switches the subscription tier of an existing user.
    pub fn set_tier(&mut self, user_id: &str, tier: SubscriptionTier) -> Result<(), ContextError> {
        self.profile_mut(user_id)?.subscription_tier = tier;
        Ok(())
    }

    fn profile_mut(&mut self, user_id: &str) -> Result<&mut Profile, ContextError> {
        self.profiles
            .get_mut(user_id)
            .ok_or(ContextError::with_context(format!(
                "Unable to find the profile of the user {:?}",
                user_id
            )))
    }

    fn timestamp() -> String {
        OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default()
    }
}

impl Gateway for MemoryGateway {
    fn get_profile(&self, user_id: &str) -> Result<Profile, ContextError> {
        self.profiles
            .get(user_id)
            .cloned()
            .ok_or(ContextError::with_context(format!(
                "Unable to find the profile of the user {:?}",
                user_id
            )))
    }

    fn list_documents(&self, user_id: &str) -> Result<Vec<DocumentRecord>, ContextError> {
        // Insertion order is creation order, so newest first is the reverse
        Ok(self
            .documents
            .iter()
            .filter(|record| record.owner_id == user_id)
            .rev()
            .cloned()
            .collect())
    }

    fn save_document(
        &mut self,
        user_id: &str,
        draft: DocumentDraft,
        options: &SaveOptions,
    ) -> Result<DocumentRecord, ContextError> {
        if let Some(existing_id) = options.existing_id.as_deref() {
            let record = self
                .documents
                .iter_mut()
                .find(|record| record.id == existing_id && record.owner_id == user_id)
                .ok_or(ContextError::with_context(format!(
                    "Unable to update the document {:?}, it does not exist or is not owned by the user",
                    existing_id
                )))?;
            record.name = draft.name;
            record.content = draft.content;
            record.updated_at = Self::timestamp();
            return Ok(record.clone());
        }

        if let Some(key) = options.idempotency_key.as_deref() {
            if let Some(existing_id) = self.idempotency_keys.get(key) {
                log::info!("Save retried with the idempotency key {:?}", key);
                let record = self
                    .documents
                    .iter()
                    .find(|record| &record.id == existing_id)
                    .ok_or(ContextError::with_context(format!(
                        "The idempotency key {:?} points at a record that no longer exists",
                        key
                    )))?;
                return Ok(record.clone());
            }
        }

        let now = Self::timestamp();
        let record = DocumentRecord {
            id: random_identifier(32),
            owner_id: user_id.to_string(),
            name: draft.name,
            content: draft.content,
            created_at: now.clone(),
            updated_at: now,
        };
        if let Some(key) = options.idempotency_key.as_deref() {
            self.idempotency_keys
                .insert(key.to_string(), record.id.clone());
        }
        self.documents.push(record.clone());
        Ok(record)
    }

    fn delete_document(&mut self, document_id: &str) -> Result<(), ContextError> {
        let before = self.documents.len();
        self.documents.retain(|record| record.id != document_id);
        if self.documents.len() == before {
            return Err(ContextError::with_context(format!(
                "Unable to delete the document {:?}, it does not exist",
                document_id
            )));
        }
        Ok(())
    }

    fn increment_monthly_document_count(&mut self, user_id: &str) -> Result<(), ContextError> {
        let current = self.get_profile(user_id)?.documents_created_this_month;
        self.profile_mut(user_id)?.documents_created_this_month = current + 1;
        Ok(())
    }

    fn delete_account(&mut self, user_id: &str) -> Result<(), ContextError> {
        if self.profiles.remove(user_id).is_none() {
            return Err(ContextError::with_context(format!(
                "Unable to delete the account of the user {:?}, it does not exist",
                user_id
            )));
        }
        self.documents.retain(|record| record.owner_id != user_id);
        self.avatars
            .retain(|path, _| !path.starts_with(&format!("{}/", user_id)));
        Ok(())
    }

    fn upload_avatar(
        &mut self,
        user_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ContextError> {
        let extension = file_name.rsplit_once('.').map(|(_, extension)| extension);
        let stored_name = match extension {
            Some(extension) => format!("{}-{}.{}", user_id, random_identifier(8), extension),
            None => format!("{}-{}", user_id, random_identifier(8)),
        };
        let path = format!("{}/{}", user_id, stored_name);
        self.avatars.insert(path.clone(), bytes);

        let public_url = format!("memory://avatars/{}", path);
        self.profile_mut(user_id)?.avatar_url = Some(public_url.clone());
        Ok(public_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentContent, DocumentKind};

    fn draft() -> DocumentDraft {
        DocumentDraft::from_content(DocumentContent::new(DocumentKind::Invoice))
    }

    #[test]
    fn saving_without_an_id_creates_exactly_one_record() {
        let mut gateway = MemoryGateway::new();
        let user_id = gateway.add_user("jane@example.com");
        let record = gateway
            .save_document(&user_id, draft(), &SaveOptions::default())
            .unwrap();
        assert_eq!(record.owner_id, user_id);
        assert_eq!(record.name, "Invoice Draft");
        assert_eq!(gateway.list_documents(&user_id).unwrap().len(), 1);
    }

    #[test]
    fn saving_with_an_existing_id_updates_in_place() {
        let mut gateway = MemoryGateway::new();
        let user_id = gateway.add_user("jane@example.com");
        let record = gateway
            .save_document(&user_id, draft(), &SaveOptions::default())
            .unwrap();

        let mut updated = draft();
        updated.name = "Invoice INV-007".to_string();
        let options = SaveOptions {
            existing_id: Some(record.id.clone()),
            ..SaveOptions::default()
        };
        let saved = gateway.save_document(&user_id, updated, &options).unwrap();

        assert_eq!(saved.id, record.id);
        assert_eq!(saved.name, "Invoice INV-007");
        assert_eq!(gateway.list_documents(&user_id).unwrap().len(), 1);
    }

    #[test]
    fn updating_a_record_of_another_user_is_rejected() {
        let mut gateway = MemoryGateway::new();
        let owner = gateway.add_user("owner@example.com");
        let intruder = gateway.add_user("intruder@example.com");
        let record = gateway
            .save_document(&owner, draft(), &SaveOptions::default())
            .unwrap();

        let options = SaveOptions {
            existing_id: Some(record.id),
            ..SaveOptions::default()
        };
        assert!(gateway.save_document(&intruder, draft(), &options).is_err());
    }

    #[test]
    fn a_retried_create_with_the_same_key_does_not_duplicate() {
        let mut gateway = MemoryGateway::new();
        let user_id = gateway.add_user("jane@example.com");
        let options = SaveOptions {
            idempotency_key: Some("retry-1".to_string()),
            ..SaveOptions::default()
        };
        let first = gateway.save_document(&user_id, draft(), &options).unwrap();
        let second = gateway.save_document(&user_id, draft(), &options).unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(gateway.list_documents(&user_id).unwrap().len(), 1);
    }

    #[test]
    fn documents_are_listed_newest_first() {
        let mut gateway = MemoryGateway::new();
        let user_id = gateway.add_user("jane@example.com");
        let first = gateway
            .save_document(&user_id, draft(), &SaveOptions::default())
            .unwrap();
        let second = gateway
            .save_document(&user_id, draft(), &SaveOptions::default())
            .unwrap();

        let listed = gateway.list_documents(&user_id).unwrap();
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[test]
    fn deleting_an_account_cascades_to_the_documents() {
        let mut gateway = MemoryGateway::new();
        let user_id = gateway.add_user("jane@example.com");
        let other = gateway.add_user("other@example.com");
        gateway
            .save_document(&user_id, draft(), &SaveOptions::default())
            .unwrap();
        gateway
            .save_document(&other, draft(), &SaveOptions::default())
            .unwrap();

        gateway.delete_account(&user_id).unwrap();
        assert!(gateway.get_profile(&user_id).is_err());
        assert!(gateway.list_documents(&user_id).unwrap().is_empty());
        assert_eq!(gateway.list_documents(&other).unwrap().len(), 1);
    }

    #[test]
    fn the_monthly_counter_gates_the_free_tier() {
        let mut gateway = MemoryGateway::new();
        let user_id = gateway.add_user("jane@example.com");
        for _ in 0..FREE_TIER_MONTHLY_LIMIT {
            assert!(gateway.get_profile(&user_id).unwrap().can_create_document());
            gateway.increment_monthly_document_count(&user_id).unwrap();
        }
        assert!(!gateway.get_profile(&user_id).unwrap().can_create_document());

        gateway
            .set_tier(&user_id, SubscriptionTier::Premium)
            .unwrap();
        assert!(gateway.get_profile(&user_id).unwrap().can_create_document());
    }

    #[test]
    fn uploading_an_avatar_patches_the_profile() {
        let mut gateway = MemoryGateway::new();
        let user_id = gateway.add_user("jane@example.com");
        let url = gateway
            .upload_avatar(&user_id, "me.png", vec![1, 2, 3])
            .unwrap();
        assert!(url.ends_with(".png"));
        assert_eq!(gateway.get_profile(&user_id).unwrap().avatar_url, Some(url));
    }
}
