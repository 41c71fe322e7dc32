use chrono::NaiveDate;
use serde::Deserialize;

use crate::contact::errors::ContactError;
use crate::contact::models::ContactDetails;
use crate::contact::models::ContactName;
use crate::user::models::EmailAddress;

pub mod create_contact;
pub mod delete_contact;
pub mod get_contact;
pub mod list_contacts;
pub mod patch_contact;
pub mod search_contacts;
pub mod upcoming_birthdays;
pub mod update_contact;

/// HTTP request body carrying every editable contact field (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContactRequest {
    name: String,
    #[serde(default)]
    surname: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    birthday: Option<NaiveDate>,
    #[serde(default)]
    other: Option<String>,
}

impl ContactRequest {
    fn try_into_details(self) -> Result<ContactDetails, ContactError> {
        Ok(ContactDetails {
            name: ContactName::new(self.name)?,
            surname: self.surname,
            email: self.email.map(EmailAddress::new).transpose()?,
            phone: self.phone,
            birthday: self.birthday,
            other: self.other,
        })
    }
}
