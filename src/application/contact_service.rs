use std::sync::Arc;

use validator::Validate;

use crate::domain::contact::{ContactMessage, NewContactMessage};
use crate::domain::errors::DomainError;
use crate::domain::ports::ContactRepository;

pub struct ContactService {
    repo: Arc<dyn ContactRepository>,
}

impl ContactService {
    pub fn new(repo: Arc<dyn ContactRepository>) -> Self {
        Self { repo }
    }

    pub fn create_message(&self, message: NewContactMessage) -> Result<ContactMessage, DomainError> {
        let message = message.normalized();
        message.validate()?;
        let created = self.repo.create(message)?;
        log::info!("Contact message {} received", created.id);
        Ok(created)
    }

    pub fn list_messages(&self) -> Result<Vec<ContactMessage>, DomainError> {
        self.repo.list()
    }

    pub fn mark_replied(&self, id: i32) -> Result<ContactMessage, DomainError> {
        self.repo
            .mark_replied(id)?
            .ok_or(DomainError::NotFound("Contact message"))
    }
}
