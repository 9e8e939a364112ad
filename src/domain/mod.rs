pub mod cart;
pub mod catalog;
pub mod contact;
pub mod errors;
pub mod money;
pub mod order;
pub mod ports;
pub mod receipt;
pub mod stats;
pub mod status;
