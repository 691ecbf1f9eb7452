//! Writable entity kinds

use serde::{Deserialize, Serialize};
use std::fmt;

use super::xml::TextEncoding;

/// Keys the webservice manages itself and rejects or ignores on write
const COMMON_READ_ONLY: &[&str] = &["associations", "date_add", "date_upd"];

const PRODUCT_READ_ONLY: &[&str] = &[
    "associations",
    "date_add",
    "date_upd",
    "cache_default_attribute",
    "cache_has_attachments",
    "supplier_reference",
    "location",
    "quantity_discount",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Customer,
    Order,
    Product,
    SpecificPrice,
    StockAvailable,
}

impl EntityKind {
    /// Child element of `<prestashop>` and key of single-record responses
    pub fn element(&self) -> &'static str {
        match self {
            EntityKind::Customer => "customer",
            EntityKind::Order => "order",
            EntityKind::Product => "product",
            EntityKind::SpecificPrice => "specific_price",
            EntityKind::StockAvailable => "stock_available",
        }
    }

    /// Collection path below `/api/` and key of collection responses
    pub fn resource(&self) -> &'static str {
        match self {
            EntityKind::Customer => "customers",
            EntityKind::Order => "orders",
            EntityKind::Product => "products",
            EntityKind::SpecificPrice => "specific_prices",
            EntityKind::StockAvailable => "stock_availables",
        }
    }

    pub fn read_only_keys(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Product => PRODUCT_READ_ONLY,
            _ => COMMON_READ_ONLY,
        }
    }

    /// Product descriptions routinely carry HTML, which goes out as CDATA
    pub fn text_encoding(&self) -> TextEncoding {
        match self {
            EntityKind::Product => TextEncoding::CdataForMarkup,
            _ => TextEncoding::Escaped,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element())
    }
}
