use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::contact::errors::ContactError;
use crate::domain::contact::models::Contact;
use crate::domain::contact::models::ContactDetails;
use crate::domain::contact::models::ContactId;
use crate::domain::contact::models::ContactName;
use crate::domain::contact::ports::ContactRepository;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;

const CONTACT_COLUMNS: &str =
    "id, owner_id, name, surname, email, phone, birthday, other, created_at";

pub struct PostgresContactRepository {
    pool: PgPool,
}

impl PostgresContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_contact(row: &PgRow) -> Result<Contact, ContactError> {
        let column = |e: sqlx::Error| ContactError::DatabaseError(e.to_string());

        let email: Option<String> = row.try_get("email").map_err(column)?;

        Ok(Contact {
            id: ContactId(row.try_get("id").map_err(column)?),
            owner_id: UserId(row.try_get("owner_id").map_err(column)?),
            details: ContactDetails {
                name: ContactName::new(row.try_get("name").map_err(column)?)?,
                surname: row.try_get("surname").map_err(column)?,
                email: email.map(EmailAddress::new).transpose()?,
                phone: row.try_get("phone").map_err(column)?,
                birthday: row.try_get("birthday").map_err(column)?,
                other: row.try_get("other").map_err(column)?,
            },
            created_at: row.try_get("created_at").map_err(column)?,
        })
    }

    fn rows_to_contacts(rows: Vec<PgRow>) -> Result<Vec<Contact>, ContactError> {
        rows.iter().map(Self::row_to_contact).collect()
    }
}

#[async_trait]
impl ContactRepository for PostgresContactRepository {
    async fn create(
        &self,
        owner: UserId,
        details: ContactDetails,
    ) -> Result<Contact, ContactError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO contacts (owner_id, name, surname, email, phone, birthday, other)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {CONTACT_COLUMNS}
            "#
        ))
        .bind(owner.0)
        .bind(details.name.as_str())
        .bind(details.surname.as_deref())
        .bind(details.email.as_ref().map(|e| e.as_str()))
        .bind(details.phone.as_deref())
        .bind(details.birthday)
        .bind(details.other.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ContactError::DatabaseError(e.to_string()))?;

        Self::row_to_contact(&row)
    }

    async fn find_by_id(
        &self,
        owner: UserId,
        id: ContactId,
    ) -> Result<Option<Contact>, ContactError> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {CONTACT_COLUMNS}
            FROM contacts
            WHERE id = $1 AND owner_id = $2
            "#
        ))
        .bind(id.0)
        .bind(owner.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ContactError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_contact).transpose()
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Contact>, ContactError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {CONTACT_COLUMNS}
            FROM contacts
            WHERE owner_id = $1
            ORDER BY id
            "#
        ))
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ContactError::DatabaseError(e.to_string()))?;

        Self::rows_to_contacts(rows)
    }

    async fn find_by_name(&self, owner: UserId, name: &str) -> Result<Vec<Contact>, ContactError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {CONTACT_COLUMNS}
            FROM contacts
            WHERE owner_id = $1 AND name = $2
            ORDER BY id
            "#
        ))
        .bind(owner.0)
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ContactError::DatabaseError(e.to_string()))?;

        Self::rows_to_contacts(rows)
    }

    async fn find_by_term(&self, owner: UserId, term: &str) -> Result<Vec<Contact>, ContactError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {CONTACT_COLUMNS}
            FROM contacts
            WHERE owner_id = $1 AND (name = $2 OR surname = $2 OR email = $2)
            ORDER BY id
            "#
        ))
        .bind(owner.0)
        .bind(term)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ContactError::DatabaseError(e.to_string()))?;

        Self::rows_to_contacts(rows)
    }

    async fn update(&self, contact: Contact) -> Result<Contact, ContactError> {
        let details = &contact.details;

        let row = sqlx::query(&format!(
            r#"
            UPDATE contacts
            SET name = $3, surname = $4, email = $5, phone = $6, birthday = $7, other = $8
            WHERE id = $1 AND owner_id = $2
            RETURNING {CONTACT_COLUMNS}
            "#
        ))
        .bind(contact.id.0)
        .bind(contact.owner_id.0)
        .bind(details.name.as_str())
        .bind(details.surname.as_deref())
        .bind(details.email.as_ref().map(|e| e.as_str()))
        .bind(details.phone.as_deref())
        .bind(details.birthday)
        .bind(details.other.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ContactError::DatabaseError(e.to_string()))?;

        match row {
            Some(row) => Self::row_to_contact(&row),
            None => Err(ContactError::NotFound(contact.id)),
        }
    }

    async fn delete(&self, owner: UserId, id: ContactId) -> Result<(), ContactError> {
        let result = sqlx::query(
            r#"
            DELETE FROM contacts
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .execute(&self.pool)
        .await
        .map_err(|e| ContactError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ContactError::NotFound(id));
        }

        Ok(())
    }
}
