use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::contact::{ContactMessage, NewContactMessage};
use crate::domain::errors::DomainError;
use crate::domain::ports::ContactRepository;
use crate::schema::contact_messages;

use super::models::{ContactMessageRow, NewContactMessageRow};

pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ContactRepository for DieselContactRepository {
    fn create(&self, message: NewContactMessage) -> Result<ContactMessage, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::insert_into(contact_messages::table)
            .values(NewContactMessageRow::from(message))
            .returning(ContactMessageRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }

    fn list(&self) -> Result<Vec<ContactMessage>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = contact_messages::table
            .select(ContactMessageRow::as_select())
            .order((contact_messages::created_at.desc(), contact_messages::id.desc()))
            .load(&mut conn)?;

        Ok(rows.into_iter().map(ContactMessage::from).collect())
    }

    fn mark_replied(&self, id: i32) -> Result<Option<ContactMessage>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::update(contact_messages::table.find(id))
            .set(contact_messages::is_replied.eq(true))
            .returning(ContactMessageRow::as_returning())
            .get_result(&mut conn)
            .optional()?;

        Ok(row.map(ContactMessage::from))
    }
}
