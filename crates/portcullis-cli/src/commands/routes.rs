//! Routes command - lists the protected route catalogue.

use anyhow::Result;
use portcullis::RouteCatalog;

use crate::style::print_routes_table;

pub fn run(json: bool) -> Result<()> {
    let catalog = RouteCatalog::standard();

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
    } else {
        print_routes_table(&catalog);
    }
    Ok(())
}
