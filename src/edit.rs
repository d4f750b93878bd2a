//! Field editing operations on the document payloads.
//!
//! Plain string fields are edited through ordinary `&mut` access, every input
//! event replaces exactly one leaf field. The operations in this module exist for
//! the places where a bare assignment is not enough: the numeric fields of the
//! itemized table, which sit behind a parse-or-reject boundary, and the ordered
//! sequences with their append and removal rules.
//!
//! The numeric policy is deliberate: input that does not parse is rejected with an
//! error and the payload is left untouched. Invalid text never silently becomes
//! zero and can never propagate a non-number into the computed totals.

use crate::document::{BillingData, CvData, EducationEntry, ExperienceEntry, LineItem};
use crate::error::ContextError;
use crate::money::Money;

/// Parse the text of a quantity input field. Quantities are integers of at least 1.
pub fn parse_quantity(input: &str) -> Result<u32, ContextError> {
    let input = input.trim();
    if input.is_empty() || !input.chars().all(|character| character.is_ascii_digit()) {
        return Err(ContextError::with_context(format!(
            "The quantity {:?} is not a whole number",
            input
        )));
    }
    let quantity: u32 = input.parse().map_err(|error| {
        ContextError::with_error(format!("The quantity {:?} is out of range", input), &error)
    })?;
    if quantity == 0 {
        return Err(ContextError::with_context("The quantity must be at least 1"));
    }
    Ok(quantity)
}

impl BillingData {
    /// Replace the quantity of the item at the given index from raw input text.
    pub fn set_item_quantity(&mut self, index: usize, input: &str) -> Result<(), ContextError> {
        let quantity = parse_quantity(input)?;
        self.item_at(index)?.quantity = quantity;
        Ok(())
    }

    /// Replace the unit price of the item at the given index from raw input text.
    pub fn set_item_unit_price(&mut self, index: usize, input: &str) -> Result<(), ContextError> {
        let unit_price = Money::parse(input)?;
        self.item_at(index)?.unit_price = unit_price;
        Ok(())
    }

    pub fn set_item_description(
        &mut self,
        index: usize,
        description: &str,
    ) -> Result<(), ContextError> {
        self.item_at(index)?.description = description.to_string();
        Ok(())
    }

    /// Append one default-valued row to the itemized table.
    pub fn add_item(&mut self) {
        self.items.push(LineItem::default());
    }

    /// Remove the row at the given index. Removing the last remaining row is a
    /// no-op, the table always keeps at least one entry. Returns whether a row
    /// was removed.
    pub fn remove_item(&mut self, index: usize) -> bool {
        if self.items.len() <= 1 || index >= self.items.len() {
            return false;
        }
        self.items.remove(index);
        true
    }

    fn item_at(&mut self, index: usize) -> Result<&mut LineItem, ContextError> {
        let length = self.items.len();
        self.items.get_mut(index).ok_or(ContextError::with_context(format!(
            "There is no item at index {} among the {} items",
            index, length
        )))
    }
}

impl CvData {
    pub fn add_experience(&mut self) {
        self.experience.push(ExperienceEntry::default());
    }

    pub fn remove_experience(&mut self, index: usize) -> bool {
        if index >= self.experience.len() {
            return false;
        }
        self.experience.remove(index);
        true
    }

    pub fn add_education(&mut self) {
        self.education.push(EducationEntry::default());
    }

    pub fn remove_education(&mut self, index: usize) -> bool {
        if index >= self.education.len() {
            return false;
        }
        self.education.remove(index);
        true
    }

    pub fn add_skill(&mut self) {
        self.skills.push(String::new());
    }

    pub fn remove_skill(&mut self, index: usize) -> bool {
        if index >= self.skills.len() {
            return false;
        }
        self.skills.remove(index);
        true
    }

    pub fn add_language(&mut self) {
        self.languages.push(String::new());
    }

    pub fn remove_language(&mut self, index: usize) -> bool {
        if index >= self.languages.len() {
            return false;
        }
        self.languages.remove(index);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantities_parse_or_reject() {
        assert_eq!(parse_quantity("3").unwrap(), 3);
        assert_eq!(parse_quantity(" 12 ").unwrap(), 12);
        assert!(parse_quantity("").is_err());
        assert!(parse_quantity("0").is_err());
        assert!(parse_quantity("-2").is_err());
        assert!(parse_quantity("2.5").is_err());
        assert!(parse_quantity("abc").is_err());
    }

    #[test]
    fn rejected_input_leaves_the_payload_unchanged() {
        let mut data = BillingData::default();
        data.set_item_quantity(0, "4").unwrap();
        data.set_item_unit_price(0, "9.99").unwrap();

        assert!(data.set_item_quantity(0, "four").is_err());
        assert!(data.set_item_unit_price(0, "9.999").is_err());
        assert_eq!(data.items[0].quantity, 4);
        assert_eq!(data.items[0].unit_price, Money::from_cents(999));
        assert_eq!(data.subtotal(), Money::from_cents(3996));
    }

    #[test]
    fn removing_the_last_item_is_a_no_op() {
        let mut data = BillingData::default();
        assert!(!data.remove_item(0));
        assert_eq!(data.items.len(), 1);

        data.add_item();
        assert_eq!(data.items.len(), 2);
        assert!(data.remove_item(1));
        assert_eq!(data.items.len(), 1);
        assert!(!data.remove_item(0));
    }

    #[test]
    fn editing_out_of_range_items_is_an_error() {
        let mut data = BillingData::default();
        assert!(data.set_item_description(3, "Work").is_err());
        assert!(data.set_item_quantity(3, "1").is_err());
    }

    #[test]
    fn cv_sequences_append_and_remove_by_index() {
        let mut data = CvData::default();
        data.add_experience();
        assert_eq!(data.experience.len(), 2);
        assert!(data.remove_experience(0));
        assert_eq!(data.experience.len(), 1);
        assert!(!data.remove_experience(5));

        data.add_skill();
        data.skills[1] = "Rust".to_string();
        assert!(data.remove_skill(0));
        assert_eq!(data.skills, vec!["Rust".to_string()]);
    }
}
