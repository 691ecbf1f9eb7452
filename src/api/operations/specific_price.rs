//! Specific price operations
//!
//! A specific price either discounts the catalog price (`reduction`) or
//! replaces it (`price`); `price = -1` means "keep the catalog price".

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::adapter::Adapter;
use super::product::ShopScope;
use crate::api::constants::UNLIMITED_DATE;
use crate::api::payload::multilang::string_or_number;
use crate::api::payload::{EntityKind, EntityPayload, PayloadValue};
use crate::api::query::QuerySpec;

const KIND: EntityKind = EntityKind::SpecificPrice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReductionType {
    #[default]
    Amount,
    Percentage,
}

impl ReductionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReductionType::Amount => "amount",
            ReductionType::Percentage => "percentage",
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PriceImpact {
    Discount {
        /// Percent (e.g. `15` for 15%) or currency amount
        reduction: f64,
        #[serde(default = "default_true")]
        reduction_tax: bool,
        #[serde(default)]
        reduction_type: ReductionType,
    },
    #[serde(rename = "fixed", alias = "fixed_price", alias = "fixedPrice")]
    Fixed {
        /// Tax-excluded price
        price: f64,
    },
}

impl PriceImpact {
    /// Wire value of `reduction`: percentages travel as fractions
    fn reduction_value(reduction: f64, reduction_type: ReductionType) -> f64 {
        match reduction_type {
            ReductionType::Percentage => reduction / 100.0,
            ReductionType::Amount => reduction,
        }
    }

    /// Every pricing attribute, as written on creation
    fn full_fields(&self) -> EntityPayload {
        let mut fields = EntityPayload::new();
        match self {
            PriceImpact::Discount {
                reduction,
                reduction_tax,
                reduction_type,
            } => {
                fields.insert("price", -1i64);
                fields.insert("reduction", Self::reduction_value(*reduction, *reduction_type));
                fields.insert("reduction_tax", *reduction_tax);
                fields.insert("reduction_type", reduction_type.as_str());
            }
            PriceImpact::Fixed { price } => {
                fields.insert("price", *price);
                fields.insert("reduction", 0i64);
                fields.insert("reduction_tax", true);
                fields.insert("reduction_type", ReductionType::Amount.as_str());
            }
        }
        fields
    }

    /// Only the attributes this impact controls, as written on update
    fn patch_fields(&self) -> EntityPayload {
        let mut fields = EntityPayload::new();
        match self {
            PriceImpact::Discount {
                reduction,
                reduction_tax,
                reduction_type,
            } => {
                fields.insert("reduction", Self::reduction_value(*reduction, *reduction_type));
                fields.insert("reduction_tax", *reduction_tax);
                fields.insert("reduction_type", reduction_type.as_str());
            }
            PriceImpact::Fixed { price } => {
                fields.insert("price", *price);
            }
        }
        fields
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum SpecificPriceOperation {
    Create {
        product_id: u64,
        #[serde(default)]
        combination_id: u64,
        #[serde(default)]
        currency_id: u64,
        #[serde(default)]
        country_id: u64,
        #[serde(default)]
        group_id: u64,
        #[serde(default)]
        customer_id: u64,
        #[serde(default = "default_from_quantity")]
        from_quantity: u64,
        #[serde(default = "default_true")]
        unlimited_duration: bool,
        #[serde(default)]
        from: Option<String>,
        #[serde(default)]
        to: Option<String>,
        impact: PriceImpact,
        #[serde(default)]
        multishop: Option<ShopScope>,
    },
    Update {
        #[serde(alias = "specific_price_id", deserialize_with = "string_or_number")]
        id: String,
        #[serde(default)]
        product_id: u64,
        #[serde(default)]
        combination_id: u64,
        #[serde(default)]
        currency_id: u64,
        #[serde(default)]
        country_id: u64,
        #[serde(default)]
        group_id: u64,
        #[serde(default)]
        customer_id: u64,
        #[serde(default)]
        from_quantity: u64,
        /// `None` leaves the validity window untouched
        #[serde(default)]
        unlimited_duration: Option<bool>,
        #[serde(default)]
        from: Option<String>,
        #[serde(default)]
        to: Option<String>,
        #[serde(default)]
        impact: Option<PriceImpact>,
        #[serde(default)]
        multishop: Option<ShopScope>,
    },
    Get {
        #[serde(alias = "specific_price_id", deserialize_with = "string_or_number")]
        id: String,
    },
    GetAll {
        #[serde(default)]
        query: QuerySpec,
    },
    Delete {
        #[serde(alias = "specific_price_id", deserialize_with = "string_or_number")]
        id: String,
    },
}

fn default_from_quantity() -> u64 {
    1
}

impl SpecificPriceOperation {
    pub fn operation_type(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Get { .. } => "get",
            Self::GetAll { .. } => "get_all",
            Self::Delete { .. } => "delete",
        }
    }

    pub(crate) async fn execute(&self, adapter: &Adapter) -> Result<Vec<Value>> {
        match self {
            Self::Create {
                product_id,
                combination_id,
                currency_id,
                country_id,
                group_id,
                customer_id,
                from_quantity,
                unlimited_duration,
                from,
                to,
                impact,
                multishop,
            } => {
                let bound = |date: &Option<String>| match date.as_deref() {
                    Some(date) if !*unlimited_duration && !date.is_empty() => date_value(date),
                    _ => PayloadValue::from(UNLIMITED_DATE),
                };
                let (from, to) = (bound(from), bound(to));

                let mut required = EntityPayload::new();
                required.insert("id_product", *product_id);
                required.insert("id_product_attribute", *combination_id);
                required.insert("id_cart", 0u64);
                required.insert("id_currency", *currency_id);
                required.insert("id_country", *country_id);
                required.insert("id_group", *group_id);
                required.insert("id_customer", *customer_id);
                required.insert("from_quantity", *from_quantity);
                required.insert("from", from);
                required.insert("to", to);
                required.merge(impact.full_fields());
                if let Some(scope) = multishop {
                    required.insert("id_shop", scope.shop_id);
                    required.insert("id_shop_group", scope.shop_group_id);
                }

                adapter.create(KIND, required, EntityPayload::new()).await
            }
            Self::Update {
                id,
                product_id,
                combination_id,
                currency_id,
                country_id,
                group_id,
                customer_id,
                from_quantity,
                unlimited_duration,
                from,
                to,
                impact,
                multishop,
            } => {
                let mut fields = EntityPayload::new();
                insert_non_zero(&mut fields, "id_product", *product_id);
                insert_non_zero(&mut fields, "id_product_attribute", *combination_id);
                insert_non_zero(&mut fields, "from_quantity", *from_quantity);
                insert_non_zero(&mut fields, "id_currency", *currency_id);
                insert_non_zero(&mut fields, "id_country", *country_id);
                insert_non_zero(&mut fields, "id_group", *group_id);
                insert_non_zero(&mut fields, "id_customer", *customer_id);

                if let Some(impact) = impact {
                    fields.merge(impact.patch_fields());
                }

                match unlimited_duration {
                    Some(true) => {
                        fields.insert("from", UNLIMITED_DATE);
                        fields.insert("to", UNLIMITED_DATE);
                    }
                    _ => {
                        fields.insert_present("from", from.as_deref().map(date_value));
                        fields.insert_present("to", to.as_deref().map(date_value));
                    }
                }

                if let Some(scope) = multishop {
                    insert_non_zero(&mut fields, "id_shop", scope.shop_id);
                    insert_non_zero(&mut fields, "id_shop_group", scope.shop_group_id);
                }

                adapter.patch(KIND, id, fields).await
            }
            Self::Get { id } => adapter.get_record(KIND, id).await,
            Self::GetAll { query } => adapter.get_records(KIND, query).await,
            Self::Delete { id } => adapter.delete_record(KIND, id).await,
        }
    }
}

/// Caller dates as typed datetimes, a bare date meaning midnight.
/// Anything else is sent as given.
fn date_value(text: &str) -> PayloadValue {
    const LAYOUTS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.fZ",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];

    LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(PayloadValue::DateTime)
        .unwrap_or_else(|| PayloadValue::from(text))
}

fn insert_non_zero(fields: &mut EntityPayload, key: &str, value: u64) {
    if value != 0 {
        fields.insert(key, value);
    }
}
