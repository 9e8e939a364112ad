pub mod catalog_service;
pub mod contact_service;
pub mod order_service;
pub mod payment_service;
pub mod stats_service;

#[cfg(test)]
pub(crate) mod test_support;
