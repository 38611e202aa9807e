//! Validating a model with static and callback-backed membership rules.
//!
//! Run with `RUST_LOG=debug` to see the validation pass in the logs.

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;
use verity_validator::prelude::*;

struct Order {
    currency: String,
    warehouse: Option<String>,
    coupon: String,
}

impl ReadAttribute for Order {
    fn read_attribute(&self, name: &str) -> Option<Value> {
        match name {
            "currency" => Some(json!(self.currency)),
            "warehouse" => Some(json!(self.warehouse)),
            "coupon" => Some(json!(self.coupon)),
            _ => None,
        }
    }
}

fn main() -> Result<(), ValidatorError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Warehouses come and go while the process runs.
    let open_warehouses = Arc::new(RwLock::new(vec!["ams".to_owned(), "fra".to_owned()]));
    let warehouses = Arc::clone(&open_warehouses);

    let validations = Validations::<Order>::new()
        .with(inclusion_of(["currency"]).in_collection(["EUR".to_owned(), "USD".to_owned()]))
        .with(
            inclusion_of(["warehouse"])
                .in_fn(move || warehouses.read().clone())
                .allow_nil(),
        )
        .with(
            exclusion_of(["coupon"])
                .in_collection(vec![json!("EXPIRED10"), json!("STAFF")])
                .message("can no longer be redeemed"),
        );

    let order = Order {
        currency: "GBP".into(),
        warehouse: Some("lis".into()),
        coupon: "STAFF".into(),
    };

    let errors = validations.validate(&order)?;
    for message in errors.full_messages() {
        println!("✗ {message}");
    }

    open_warehouses.write().push("lis".to_owned());
    let errors = validations.validate_attribute(&order, "warehouse")?;
    println!("warehouse valid after opening lis: {}", errors.is_empty());

    Ok(())
}
