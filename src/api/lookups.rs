//! Option loaders
//!
//! Name/value lists used to pick languages, shops, categories and the like,
//! plus the static attribute lists per resource.

use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::cache::LookupCache;
use super::constants::{DEFAULT_LANGUAGE_KEY, DISPLAY_FULL_QUERY};
use super::payload::EntityKind;
use super::query::{Condition, QueryResult, QuerySpec, join_query};
use super::resources::{attribute_names, capital_case};
use super::transport::{ApiRequest, Transport};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupOption {
    pub name: String,
    pub value: String,
}

impl LookupOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Lookup {
    Languages,
    Groups,
    Shops,
    ShopGroups,
    Categories,
    OrderStates,
    Manufacturers,
    Suppliers,
    Currencies,
    Countries,
    CustomerGroups,
    CustomerAttributes,
    OrderAttributes,
    ProductAttributes,
    SpecificPriceAttributes,
}

/// How a remote option list is fetched and labelled
struct RemoteList {
    resource: &'static str,
    /// Names are translated, so the default language is requested
    translated: bool,
    /// Catch-all entry with value `0` placed before the sorted options
    all_label: Option<&'static str>,
    with_iso_code: bool,
}

impl RemoteList {
    const fn plain(resource: &'static str) -> Self {
        Self {
            resource,
            translated: false,
            all_label: None,
            with_iso_code: false,
        }
    }

    const fn translated(resource: &'static str) -> Self {
        Self {
            resource,
            translated: true,
            all_label: None,
            with_iso_code: false,
        }
    }

    const fn with_all(mut self, label: &'static str) -> Self {
        self.all_label = Some(label);
        self
    }
}

impl Lookup {
    fn remote(&self) -> Option<RemoteList> {
        let list = match self {
            Lookup::Languages => RemoteList::plain("languages"),
            Lookup::Groups => RemoteList::translated("groups"),
            Lookup::Shops => RemoteList::plain("shops"),
            Lookup::ShopGroups => RemoteList::plain("shop_groups"),
            Lookup::Categories => RemoteList::translated("categories"),
            Lookup::OrderStates => RemoteList::translated("order_states"),
            Lookup::Manufacturers => RemoteList::plain("manufacturers"),
            Lookup::Suppliers => RemoteList::plain("suppliers"),
            Lookup::Currencies => RemoteList {
                with_iso_code: true,
                ..RemoteList::plain("currencies").with_all("All currencies")
            },
            Lookup::Countries => RemoteList::translated("countries").with_all("All countries"),
            Lookup::CustomerGroups => RemoteList::translated("groups").with_all("All groups"),
            _ => return None,
        };
        Some(list)
    }

    pub fn attribute_kind(&self) -> Option<EntityKind> {
        match self {
            Lookup::CustomerAttributes => Some(EntityKind::Customer),
            Lookup::OrderAttributes => Some(EntityKind::Order),
            Lookup::ProductAttributes => Some(EntityKind::Product),
            Lookup::SpecificPriceAttributes => Some(EntityKind::SpecificPrice),
            _ => None,
        }
    }
}

pub struct Lookups<'a> {
    transport: &'a dyn Transport,
    cache: &'a LookupCache,
}

impl<'a> Lookups<'a> {
    pub fn new(transport: &'a dyn Transport, cache: &'a LookupCache) -> Self {
        Self { transport, cache }
    }

    /// The shop's `PS_LANG_DEFAULT`, or an empty string when the shop has none.
    /// Only a non-empty answer is cached.
    pub async fn default_language(&self) -> Result<String> {
        if let Some(language) = self.cache.default_language() {
            return Ok(language.to_string());
        }

        let filter = QuerySpec::new()
            .with_condition(Condition::eq("name", DEFAULT_LANGUAGE_KEY))
            .to_query_string();
        let request = ApiRequest::get("configurations").query(join_query(&[&filter, DISPLAY_FULL_QUERY]));
        let response = self.transport.request(request).await?;

        let language = QueryResult::from_response("configurations", response)?
            .first()
            .and_then(|configuration| configuration.get("value"))
            .map(value_text)
            .unwrap_or_default();

        if language.is_empty() {
            debug!("Shop has no {} configuration", DEFAULT_LANGUAGE_KEY);
            return Ok(language);
        }
        Ok(self.cache.set_default_language(language).to_string())
    }

    /// Installed languages, fetched once per cache
    pub async fn languages(&self) -> Result<Vec<LookupOption>> {
        if let Some(languages) = self.cache.languages() {
            return Ok(languages.to_vec());
        }

        let languages = self.fetch(&RemoteList::plain("languages")).await?;
        Ok(self.cache.set_languages(languages).to_vec())
    }

    pub async fn load(&self, lookup: Lookup) -> Result<Vec<LookupOption>> {
        if lookup == Lookup::Languages {
            return self.languages().await;
        }
        if let Some(kind) = lookup.attribute_kind() {
            return Ok(attribute_options(kind));
        }
        match lookup.remote() {
            Some(list) => self.fetch(&list).await,
            None => Ok(Vec::new()),
        }
    }

    async fn fetch(&self, list: &RemoteList) -> Result<Vec<LookupOption>> {
        let query = if list.translated {
            let language = self.default_language().await?;
            let language = if language.is_empty() {
                String::new()
            } else {
                format!("language={}", language)
            };
            join_query(&[&language, DISPLAY_FULL_QUERY])
        } else {
            DISPLAY_FULL_QUERY.to_string()
        };

        let response = self
            .transport
            .request(ApiRequest::get(list.resource).query(query))
            .await?;
        let records = QueryResult::from_response(list.resource, response)?.into_records();

        let mut options: Vec<LookupOption> = records
            .iter()
            .map(|record| {
                let name = option_name(record);
                let name = match (list.with_iso_code, record.get("iso_code")) {
                    (true, Some(iso)) => format!("{} ({})", name, value_text(iso)),
                    _ => name,
                };
                let value = record.get("id").map(value_text).unwrap_or_default();
                LookupOption::new(name, value)
            })
            .collect();

        options.sort_by(|a, b| a.name.cmp(&b.name));
        if let Some(label) = list.all_label {
            options.insert(0, LookupOption::new(label, "0"));
        }

        debug!("Loaded {} {} options", options.len(), list.resource);
        Ok(options)
    }
}

/// Attribute names of a resource as `Capital Case` labels, sorted by label
pub fn attribute_options(kind: EntityKind) -> Vec<LookupOption> {
    let mut options: Vec<LookupOption> = attribute_names(kind)
        .iter()
        .map(|field| LookupOption::new(capital_case(field), *field))
        .collect();
    options.sort_by(|a, b| a.name.cmp(&b.name));
    options
}

/// `name` as a plain string, or the first translation when the record came
/// back with every language
fn option_name(record: &Value) -> String {
    match record.get("name") {
        Some(Value::Array(translations)) => translations
            .first()
            .and_then(|translation| translation.get("value"))
            .map(value_text)
            .unwrap_or_default(),
        Some(name) => value_text(name),
        None => String::new(),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::Method;
    use crate::api::transport::mock::MockTransport;
    use serde_json::json;

    fn default_language_response() -> Value {
        json!({"configurations": [{"id": 40, "name": "PS_LANG_DEFAULT", "value": "2"}]})
    }

    #[tokio::test]
    async fn test_default_language_is_cached() {
        let transport = MockTransport::new().respond(Method::Get, "configurations", default_language_response());
        let cache = LookupCache::new();
        let lookups = Lookups::new(&transport, &cache);

        assert_eq!(lookups.default_language().await.unwrap(), "2");
        assert_eq!(lookups.default_language().await.unwrap(), "2");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query, "filter[name]=[PS_LANG_DEFAULT]&display=full");
    }

    #[tokio::test]
    async fn test_empty_default_language_is_not_cached() {
        let transport = MockTransport::new().respond(Method::Get, "configurations", json!([]));
        let cache = LookupCache::new();
        let lookups = Lookups::new(&transport, &cache);

        assert_eq!(lookups.default_language().await.unwrap(), "");
        assert!(cache.default_language().is_none());
    }

    #[tokio::test]
    async fn test_currencies_with_all_entry() {
        let transport = MockTransport::new().respond(
            Method::Get,
            "currencies",
            json!({"currencies": [
                {"id": 2, "name": "US Dollar", "iso_code": "USD"},
                {"id": 1, "name": "Euro", "iso_code": "EUR"}
            ]}),
        );
        let cache = LookupCache::new();

        let options = Lookups::new(&transport, &cache).load(Lookup::Currencies).await.unwrap();

        assert_eq!(
            options,
            vec![
                LookupOption::new("All currencies", "0"),
                LookupOption::new("Euro (EUR)", "1"),
                LookupOption::new("US Dollar (USD)", "2"),
            ]
        );
        assert_eq!(transport.requests()[0].query, "display=full");
    }

    #[tokio::test]
    async fn test_translated_lookup_requests_default_language() {
        let transport = MockTransport::new()
            .respond(Method::Get, "configurations", default_language_response())
            .respond(
                Method::Get,
                "order_states",
                json!({"order_states": [{"id": 3, "name": "Shipped"}, {"id": 1, "name": "Awaiting payment"}]}),
            );
        let cache = LookupCache::new();

        let options = Lookups::new(&transport, &cache).load(Lookup::OrderStates).await.unwrap();

        assert_eq!(options[0], LookupOption::new("Awaiting payment", "1"));
        assert_eq!(transport.requests()[1].query, "language=2&display=full");
    }

    #[tokio::test]
    async fn test_translated_lookup_without_default_language() {
        let transport = MockTransport::new()
            .respond(Method::Get, "configurations", json!([]))
            .respond(Method::Get, "categories", json!({"categories": [{"id": 2, "name": "Home"}]}));
        let cache = LookupCache::new();

        let options = Lookups::new(&transport, &cache).load(Lookup::Categories).await.unwrap();

        assert_eq!(options, vec![LookupOption::new("Home", "2")]);
        assert_eq!(transport.requests()[1].query, "display=full");
    }

    #[tokio::test]
    async fn test_languages_fetched_once() {
        let transport = MockTransport::new().respond(
            Method::Get,
            "languages",
            json!({"languages": [{"id": 1, "name": "English"}, {"id": 2, "name": "Deutsch"}]}),
        );
        let cache = LookupCache::new();
        let lookups = Lookups::new(&transport, &cache);

        let first = lookups.load(Lookup::Languages).await.unwrap();
        let second = lookups.load(Lookup::Languages).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first[0].name, "Deutsch");
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn test_attribute_options() {
        let options = attribute_options(EntityKind::SpecificPrice);
        assert!(options.contains(&LookupOption::new("Reduction Type", "reduction_type")));
        assert!(options.windows(2).all(|pair| pair[0].name <= pair[1].name));
    }
}
