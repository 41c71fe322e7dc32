use async_trait::async_trait;
use chrono::NaiveDate;

use crate::contact::errors::ContactError;
use crate::contact::models::Contact;
use crate::contact::models::ContactDetails;
use crate::contact::models::ContactId;
use crate::contact::models::ContactPatch;
use crate::user::models::UserId;

/// Port for contact domain service operations.
///
/// Every operation is scoped to `owner`; contacts of other accounts behave
/// as if they did not exist.
#[async_trait]
pub trait ContactServicePort: Send + Sync + 'static {
    /// Create a contact for the owner.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_contact(
        &self,
        owner: UserId,
        details: ContactDetails,
    ) -> Result<Contact, ContactError>;

    /// List all contacts of the owner, ordered by identifier.
    async fn list_contacts(&self, owner: UserId) -> Result<Vec<Contact>, ContactError>;

    /// Retrieve a single contact.
    ///
    /// # Errors
    /// * `NotFound` - Contact does not exist or belongs to someone else
    /// * `DatabaseError` - Database operation failed
    async fn get_contact(&self, owner: UserId, id: ContactId) -> Result<Contact, ContactError>;

    /// Contacts whose name equals `name` exactly.
    async fn search_by_name(&self, owner: UserId, name: &str)
        -> Result<Vec<Contact>, ContactError>;

    /// Contacts whose name, surname or email equals `term` exactly.
    async fn search(&self, owner: UserId, term: &str) -> Result<Vec<Contact>, ContactError>;

    /// Contacts with a birthday in the next seven days, soonest first.
    ///
    /// # Arguments
    /// * `owner` - Account whose contacts are searched
    /// * `today` - First day of the window
    async fn upcoming_birthdays(
        &self,
        owner: UserId,
        today: NaiveDate,
    ) -> Result<Vec<Contact>, ContactError>;

    /// Replace every editable field of a contact.
    ///
    /// # Errors
    /// * `NotFound` - Contact does not exist or belongs to someone else
    /// * `DatabaseError` - Database operation failed
    async fn replace_contact(
        &self,
        owner: UserId,
        id: ContactId,
        details: ContactDetails,
    ) -> Result<Contact, ContactError>;

    /// Update a single field of a contact.
    ///
    /// # Errors
    /// * `NotFound` - Contact does not exist or belongs to someone else
    /// * `DatabaseError` - Database operation failed
    async fn patch_contact(
        &self,
        owner: UserId,
        id: ContactId,
        patch: ContactPatch,
    ) -> Result<Contact, ContactError>;

    /// Delete a contact.
    ///
    /// # Errors
    /// * `NotFound` - Contact does not exist or belongs to someone else
    /// * `DatabaseError` - Database operation failed
    async fn delete_contact(&self, owner: UserId, id: ContactId) -> Result<(), ContactError>;
}

/// Persistence operations for contacts.
#[async_trait]
pub trait ContactRepository: Send + Sync + 'static {
    /// Persist a new contact.
    ///
    /// # Returns
    /// Created contact with its assigned identifier
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, owner: UserId, details: ContactDetails)
        -> Result<Contact, ContactError>;

    /// Retrieve an owned contact by identifier.
    ///
    /// # Returns
    /// Optional contact (None if missing or owned by another account)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(
        &self,
        owner: UserId,
        id: ContactId,
    ) -> Result<Option<Contact>, ContactError>;

    /// Retrieve all contacts of the owner ordered by identifier.
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Contact>, ContactError>;

    /// Retrieve contacts with exactly this name.
    async fn find_by_name(&self, owner: UserId, name: &str) -> Result<Vec<Contact>, ContactError>;

    /// Retrieve contacts with this exact name, surname or email.
    async fn find_by_term(&self, owner: UserId, term: &str) -> Result<Vec<Contact>, ContactError>;

    /// Store the contact's details.
    ///
    /// # Errors
    /// * `NotFound` - Contact does not exist or belongs to someone else
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, contact: Contact) -> Result<Contact, ContactError>;

    /// Remove an owned contact.
    ///
    /// # Errors
    /// * `NotFound` - Contact does not exist or belongs to someone else
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, owner: UserId, id: ContactId) -> Result<(), ContactError>;
}
