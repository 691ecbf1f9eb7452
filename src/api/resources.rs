//! Known attribute names per writable resource
//!
//! Feeds the "filterable attribute" lookups; the compiler itself never
//! validates field names against these lists.

use super::payload::EntityKind;

const CUSTOMER_FIELDS: &[&str] = &[
    "id",
    "id_default_group",
    "id_lang",
    "newsletter_date_add",
    "ip_registration_newsletter",
    "secure_key",
    "deleted",
    "lastname",
    "firstname",
    "email",
    "id_gender",
    "birthday",
    "newsletter",
    "optin",
    "website",
    "company",
    "siret",
    "ape",
    "outstanding_allow_amount",
    "show_public_prices",
    "id_risk",
    "max_payment_days",
    "active",
    "note",
    "is_guest",
    "id_shop",
    "id_shop_group",
];

const ORDER_FIELDS: &[&str] = &[
    "id",
    "id_address_delivery",
    "id_address_invoice",
    "id_cart",
    "id_currency",
    "id_lang",
    "id_customer",
    "id_carrier",
    "current_state",
    "module",
    "invoice_number",
    "invoice_date",
    "delivery_number",
    "delivery_date",
    "valid",
    "shipping_number",
    "note",
    "id_shop_group",
    "id_shop",
    "secure_key",
    "payment",
    "recyclable",
    "gift",
    "gift_message",
    "mobile_theme",
    "total_discounts",
    "total_discounts_tax_incl",
    "total_discounts_tax_excl",
    "total_paid",
    "total_paid_tax_incl",
    "total_paid_tax_excl",
    "total_paid_real",
    "total_products",
    "total_products_wt",
    "total_shipping",
    "total_shipping_tax_incl",
    "total_shipping_tax_excl",
    "carrier_tax_rate",
    "total_wrapping",
    "total_wrapping_tax_incl",
    "total_wrapping_tax_excl",
    "round_mode",
    "round_type",
    "conversion_rate",
    "reference",
];

const PRODUCT_FIELDS: &[&str] = &[
    "id",
    "id_manufacturer",
    "id_supplier",
    "id_category_default",
    "new",
    "id_default_image",
    "id_default_combination",
    "id_tax_rules_group",
    "position_in_category",
    "manufacturer_name",
    "quantity",
    "type",
    "id_shop_default",
    "reference",
    "width",
    "height",
    "depth",
    "weight",
    "ean13",
    "isbn",
    "upc",
    "mpn",
    "cache_is_pack",
    "cache_has_attachments",
    "is_virtual",
    "state",
    "additional_delivery_times",
    "product_type",
    "on_sale",
    "online_only",
    "ecotax",
    "minimal_quantity",
    "low_stock_threshold",
    "low_stock_alert",
    "price",
    "wholesale_price",
    "unity",
    "unit_price",
    "unit_price_ratio",
    "additional_shipping_cost",
    "customizable",
    "text_fields",
    "uploadable_files",
    "active",
    "redirect_type",
    "id_type_redirected",
    "available_for_order",
    "available_date",
    "show_condition",
    "condition",
    "show_price",
    "indexed",
    "visibility",
    "pack_stock_type",
    "delivery_in_stock",
    "delivery_out_stock",
    "meta_description",
    "meta_keywords",
    "meta_title",
    "link_rewrite",
    "name",
    "description",
    "description_short",
    "available_now",
    "available_later",
];

const SPECIFIC_PRICE_FIELDS: &[&str] = &[
    "id",
    "id_shop_group",
    "id_shop",
    "id_cart",
    "id_product",
    "id_product_attribute",
    "id_currency",
    "id_country",
    "id_group",
    "id_customer",
    "id_specific_price_rule",
    "price",
    "from_quantity",
    "reduction",
    "reduction_tax",
    "reduction_type",
    "from",
    "to",
];

const STOCK_AVAILABLE_FIELDS: &[&str] = &[
    "id",
    "id_product",
    "id_product_attribute",
    "id_shop",
    "id_shop_group",
    "quantity",
    "depends_on_stock",
    "out_of_stock",
    "location",
];

pub fn attribute_names(kind: EntityKind) -> &'static [&'static str] {
    match kind {
        EntityKind::Customer => CUSTOMER_FIELDS,
        EntityKind::Order => ORDER_FIELDS,
        EntityKind::Product => PRODUCT_FIELDS,
        EntityKind::SpecificPrice => SPECIFIC_PRICE_FIELDS,
        EntityKind::StockAvailable => STOCK_AVAILABLE_FIELDS,
    }
}

/// `id_default_group` -> `Id Default Group`
pub fn capital_case(field: &str) -> String {
    field
        .split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capital_case() {
        assert_eq!(capital_case("id_default_group"), "Id Default Group");
        assert_eq!(capital_case("ean13"), "Ean13");
        assert_eq!(capital_case("email"), "Email");
    }

    #[test]
    fn test_lists_start_with_id() {
        for kind in [
            EntityKind::Customer,
            EntityKind::Order,
            EntityKind::Product,
            EntityKind::SpecificPrice,
            EntityKind::StockAvailable,
        ] {
            assert_eq!(attribute_names(kind)[0], "id");
        }
    }
}
