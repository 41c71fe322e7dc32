use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::contact::errors::ContactError;
use crate::contact::models::Contact;
use crate::contact::models::ContactDetails;
use crate::contact::models::ContactId;
use crate::contact::models::ContactPatch;
use crate::contact::models::BIRTHDAY_WINDOW_DAYS;
use crate::contact::ports::ContactRepository;
use crate::contact::ports::ContactServicePort;
use crate::user::models::UserId;

/// Domain service implementation for contact operations.
pub struct ContactService<CR>
where
    CR: ContactRepository,
{
    repository: Arc<CR>,
}

impl<CR> ContactService<CR>
where
    CR: ContactRepository,
{
    pub fn new(repository: Arc<CR>) -> Self {
        Self { repository }
    }

    async fn owned_contact(&self, owner: UserId, id: ContactId) -> Result<Contact, ContactError> {
        self.repository
            .find_by_id(owner, id)
            .await?
            .ok_or(ContactError::NotFound(id))
    }
}

/// Keep contacts whose next birthday is within the window, soonest first.
pub fn upcoming_birthdays(contacts: Vec<Contact>, today: NaiveDate) -> Vec<Contact> {
    let mut upcoming: Vec<(i64, Contact)> = contacts
        .into_iter()
        .filter_map(|contact| {
            contact
                .days_until_birthday(today)
                .filter(|days| *days <= BIRTHDAY_WINDOW_DAYS)
                .map(|days| (days, contact))
        })
        .collect();

    upcoming.sort_by_key(|(days, contact)| (*days, contact.id));
    upcoming.into_iter().map(|(_, contact)| contact).collect()
}

#[async_trait]
impl<CR> ContactServicePort for ContactService<CR>
where
    CR: ContactRepository,
{
    async fn create_contact(
        &self,
        owner: UserId,
        details: ContactDetails,
    ) -> Result<Contact, ContactError> {
        let contact = self.repository.create(owner, details).await?;
        tracing::debug!(contact_id = %contact.id, owner_id = %owner, "Contact created");
        Ok(contact)
    }

    async fn list_contacts(&self, owner: UserId) -> Result<Vec<Contact>, ContactError> {
        self.repository.list_by_owner(owner).await
    }

    async fn get_contact(&self, owner: UserId, id: ContactId) -> Result<Contact, ContactError> {
        self.owned_contact(owner, id).await
    }

    async fn search_by_name(
        &self,
        owner: UserId,
        name: &str,
    ) -> Result<Vec<Contact>, ContactError> {
        self.repository.find_by_name(owner, name).await
    }

    async fn search(&self, owner: UserId, term: &str) -> Result<Vec<Contact>, ContactError> {
        self.repository.find_by_term(owner, term).await
    }

    async fn upcoming_birthdays(
        &self,
        owner: UserId,
        today: NaiveDate,
    ) -> Result<Vec<Contact>, ContactError> {
        let contacts = self.repository.list_by_owner(owner).await?;
        Ok(upcoming_birthdays(contacts, today))
    }

    async fn replace_contact(
        &self,
        owner: UserId,
        id: ContactId,
        details: ContactDetails,
    ) -> Result<Contact, ContactError> {
        let mut contact = self.owned_contact(owner, id).await?;
        contact.details = details;

        self.repository.update(contact).await
    }

    async fn patch_contact(
        &self,
        owner: UserId,
        id: ContactId,
        patch: ContactPatch,
    ) -> Result<Contact, ContactError> {
        let mut contact = self.owned_contact(owner, id).await?;
        contact.details.apply(patch);

        self.repository.update(contact).await
    }

    async fn delete_contact(&self, owner: UserId, id: ContactId) -> Result<(), ContactError> {
        self.repository.delete(owner, id).await?;
        tracing::debug!(contact_id = %id, owner_id = %owner, "Contact deleted");
        Ok(())
    }
}
