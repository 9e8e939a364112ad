use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::ports::StatsRepository;
use crate::domain::stats::{OrderStats, RevenueBasis};

/// Dashboard counters. Recomputed from storage on every call.
pub struct StatsService {
    repo: Arc<dyn StatsRepository>,
    basis: RevenueBasis,
}

impl StatsService {
    pub fn new(repo: Arc<dyn StatsRepository>, basis: RevenueBasis) -> Self {
        Self { repo, basis }
    }

    pub fn compute_stats(&self) -> Result<OrderStats, DomainError> {
        self.repo.order_stats(self.basis)
    }
}
