use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Datelike;
use chrono::NaiveDate;
use chrono::Utc;

use crate::contact::errors::ContactError;
use crate::contact::errors::ContactNameError;
use crate::user::models::EmailAddress;
use crate::user::models::UserId;

/// Number of days ahead, today included, covered by the upcoming birthdays
/// listing.
pub const BIRTHDAY_WINDOW_DAYS: i64 = 7;

/// Contact aggregate entity.
///
/// Every contact belongs to exactly one account and is only visible to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub id: ContactId,
    pub owner_id: UserId,
    pub details: ContactDetails,
    pub created_at: DateTime<Utc>,
}

impl Contact {
    /// Days from `today` until the contact's next birthday, `None` when no
    /// birthday is recorded.
    pub fn days_until_birthday(&self, today: NaiveDate) -> Option<i64> {
        self.details
            .birthday
            .and_then(|birthday| days_until_birthday(birthday, today))
    }
}

/// Contact unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(pub i64);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Contact name value type
///
/// Non-blank and at most 50 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactName(String);

impl ContactName {
    const MAX_LENGTH: usize = 50;

    /// Create a new valid contact name.
    ///
    /// # Errors
    /// * `Empty` - Name is empty or whitespace only
    /// * `TooLong` - Name longer than 50 characters
    pub fn new(name: String) -> Result<Self, ContactNameError> {
        if name.trim().is_empty() {
            return Err(ContactNameError::Empty);
        }

        let length = name.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(ContactNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Editable fields of a contact.
///
/// Used as the full replacement on create and PUT.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactDetails {
    pub name: ContactName,
    pub surname: Option<String>,
    pub email: Option<EmailAddress>,
    pub phone: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub other: Option<String>,
}

impl ContactDetails {
    pub fn new(name: ContactName) -> Self {
        Self {
            name,
            surname: None,
            email: None,
            phone: None,
            birthday: None,
            other: None,
        }
    }

    /// Overwrite the single field carried by `patch`.
    pub fn apply(&mut self, patch: ContactPatch) {
        match patch {
            ContactPatch::Name(name) => self.name = name,
            ContactPatch::Surname(surname) => self.surname = surname,
            ContactPatch::Email(email) => self.email = email,
            ContactPatch::Phone(phone) => self.phone = phone,
            ContactPatch::Birthday(birthday) => self.birthday = birthday,
            ContactPatch::Other(other) => self.other = other,
        }
    }
}

/// Field addressed by a single-field update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Surname,
    Email,
    Phone,
    Birthday,
    Other,
}

impl FromStr for ContactField {
    type Err = ContactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(ContactField::Name),
            "surname" => Ok(ContactField::Surname),
            "email" => Ok(ContactField::Email),
            "phone" => Ok(ContactField::Phone),
            "birthday" => Ok(ContactField::Birthday),
            "other" => Ok(ContactField::Other),
            other => Err(ContactError::InvalidField(other.to_string())),
        }
    }
}

/// Validated new value for one contact field.
///
/// `None` clears an optional field.
#[derive(Debug, Clone, PartialEq)]
pub enum ContactPatch {
    Name(ContactName),
    Surname(Option<String>),
    Email(Option<EmailAddress>),
    Phone(Option<String>),
    Birthday(Option<NaiveDate>),
    Other(Option<String>),
}

impl ContactPatch {
    /// Validate a raw value for the given field.
    ///
    /// An empty value clears optional fields. Birthdays use `YYYY-MM-DD`.
    ///
    /// # Errors
    /// * `InvalidName` - Name is blank or too long
    /// * `InvalidEmail` - Email is malformed
    /// * `InvalidBirthday` - Birthday is not a valid date
    pub fn new(field: ContactField, value: String) -> Result<Self, ContactError> {
        let patch = match field {
            ContactField::Name => ContactPatch::Name(ContactName::new(value)?),
            ContactField::Surname => ContactPatch::Surname(non_empty(value)),
            ContactField::Phone => ContactPatch::Phone(non_empty(value)),
            ContactField::Other => ContactPatch::Other(non_empty(value)),
            ContactField::Email => {
                ContactPatch::Email(non_empty(value).map(EmailAddress::new).transpose()?)
            }
            ContactField::Birthday => ContactPatch::Birthday(
                non_empty(value)
                    .map(|v| {
                        NaiveDate::parse_from_str(&v, "%Y-%m-%d")
                            .map_err(|_| ContactError::InvalidBirthday(v))
                    })
                    .transpose()?,
            ),
        };

        Ok(patch)
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Days from `today` until the next occurrence of `birthday`.
///
/// Zero when the birthday is today. A 29 February birthday falls on
/// 28 February in non-leap years.
pub fn days_until_birthday(birthday: NaiveDate, today: NaiveDate) -> Option<i64> {
    let this_year = anniversary(birthday, today.year())?;
    let next = if this_year >= today {
        this_year
    } else {
        anniversary(birthday, today.year() + 1)?
    };

    Some((next - today).num_days())
}

fn anniversary(birthday: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day() - 1))
}
