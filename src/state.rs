use std::sync::Arc;

use crate::application::catalog_service::CatalogService;
use crate::application::contact_service::ContactService;
use crate::application::order_service::OrderService;
use crate::application::payment_service::PaymentService;
use crate::application::stats_service::StatsService;
use crate::config::AppConfig;
use crate::db::DbPool;
use crate::domain::ports::{
    CatalogRepository, ContactRepository, OrderRepository, StatsRepository,
};
use crate::infrastructure::catalog_repo::DieselCatalogRepository;
use crate::infrastructure::contact_repo::DieselContactRepository;
use crate::infrastructure::order_repo::DieselOrderRepository;
use crate::infrastructure::stats_repo::DieselStatsRepository;

pub struct Repositories {
    pub catalog: Arc<dyn CatalogRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub stats: Arc<dyn StatsRepository>,
    pub contact: Arc<dyn ContactRepository>,
}

impl Repositories {
    pub fn diesel(pool: DbPool) -> Self {
        Self {
            catalog: Arc::new(DieselCatalogRepository::new(pool.clone())),
            orders: Arc::new(DieselOrderRepository::new(pool.clone())),
            stats: Arc::new(DieselStatsRepository::new(pool.clone())),
            contact: Arc::new(DieselContactRepository::new(pool)),
        }
    }
}

/// Services shared by every worker. Cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub orders: Arc<OrderService>,
    pub stats: Arc<StatsService>,
    pub contact: Arc<ContactService>,
    pub payments: Arc<PaymentService>,
}

impl AppState {
    pub fn new(repos: Repositories, config: &AppConfig) -> Self {
        let orders = Arc::new(OrderService::new(repos.orders, config.status_policy));
        let payments = Arc::new(PaymentService::new(
            Arc::clone(&orders),
            config.payment_callback_delay,
        ));
        Self {
            catalog: Arc::new(CatalogService::new(repos.catalog)),
            orders,
            stats: Arc::new(StatsService::new(repos.stats, config.revenue_basis)),
            contact: Arc::new(ContactService::new(repos.contact)),
            payments,
        }
    }

    pub fn from_pool(pool: DbPool, config: &AppConfig) -> Self {
        Self::new(Repositories::diesel(pool), config)
    }
}
