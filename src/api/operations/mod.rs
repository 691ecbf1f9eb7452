//! PrestaShop Operations Module
//!
//! Typed per-resource operations and the adapter that runs them item by item.

pub mod adapter;
pub mod customer;
pub mod operation;
pub mod order;
pub mod product;
pub mod specific_price;

pub use adapter::Adapter;
pub use customer::CustomerOperation;
pub use operation::{ItemOutput, Operation};
pub use order::OrderOperation;
pub use product::{ProductOperation, ShopScope, StockSearchMode};
pub use specific_price::{PriceImpact, ReductionType, SpecificPriceOperation};
