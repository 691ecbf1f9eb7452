//! Offline query preview

use anyhow::{Context, Result};
use clap::Args;
use colored::*;

use crate::api::constants::resource_endpoint;
use crate::api::{Condition, ConditionType, QuerySpec, SortDirection, SortDirective};
use crate::config::Config;

#[derive(Args)]
pub struct QueryCommands {
    /// Resource the query targets, e.g. `customers`
    pub resource: String,
    /// Filter as `field:type:value` or `field:value` (repeatable)
    #[arg(short = 'c', long = "condition")]
    pub conditions: Vec<String>,
    /// Sort as `field:ASC` or `field:DESC` (repeatable, first wins)
    #[arg(short, long = "sort")]
    pub sorts: Vec<String>,
    /// Maximum number of records
    #[arg(short, long)]
    pub limit: Option<u32>,
    /// Print the full request URL for the current shop
    #[arg(long)]
    pub url: bool,
}

pub async fn handle_query_command(args: QueryCommands, config: &Config) -> Result<()> {
    let query = build_query(&args)?;
    let compiled = query.to_query_string();

    if args.url {
        let shop = config.require_current_shop()?;
        println!(
            "{}",
            resource_endpoint(&shop.base_url, &args.resource, &compiled, shop.output_format)
        );
    } else if compiled.is_empty() {
        println!("{}", args.resource);
    } else {
        println!("{}?{}", args.resource, compiled);
    }

    eprintln!(
        "{}",
        format!("{} filters, {} sort fields", query.conditions.len(), query.sort.directives().len()).dimmed()
    );
    Ok(())
}

fn build_query(args: &QueryCommands) -> Result<QuerySpec> {
    let mut query = QuerySpec::new();

    for condition in &args.conditions {
        query = query.with_condition(parse_condition(condition)?);
    }
    for sort in &args.sorts {
        query.sort = query.sort.add(parse_sort(sort)?);
    }
    query.limit = args.limit;

    Ok(query)
}

/// `field:type:value`, or `field:value` for equality. The value may contain `:`.
pub fn parse_condition(text: &str) -> Result<Condition> {
    let parts: Vec<&str> = text.splitn(3, ':').collect();
    match parts.as_slice() {
        [field, value] if !field.is_empty() => Ok(Condition::eq(*field, *value)),
        [field, condition_type, value] if !field.is_empty() => {
            match condition_type.parse::<ConditionType>() {
                Ok(condition_type) => Ok(Condition::new(*field, condition_type, *value)),
                // `date_add:2024-01-01 10:00:00` has no type segment
                Err(_) => Ok(Condition::eq(*field, format!("{}:{}", condition_type, value))),
            }
        }
        _ => anyhow::bail!("Invalid condition '{}', expected field:type:value", text),
    }
}

/// `field:DIR`, or a bare field for ascending order
pub fn parse_sort(text: &str) -> Result<SortDirective> {
    let (field, direction) = match text.rsplit_once(':') {
        Some((field, direction)) => (
            field,
            direction
                .parse::<SortDirection>()
                .with_context(|| format!("Invalid sort '{}'", text))?,
        ),
        None => (text, SortDirection::Asc),
    };
    if field.is_empty() {
        anyhow::bail!("Invalid sort '{}', missing field", text);
    }

    Ok(SortDirective {
        field: field.to_string(),
        direction,
    })
}
