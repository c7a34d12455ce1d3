//! # Masters Command
//!
//! Fetches all six master collections concurrently and prints a summary.
//! A collection that fails to load is reported but does not hide the
//! others; the command only errors when nothing loaded at all.

use tracing::warn;

use exim_client::{fetch_masters, ApiClient, ClientError, ListParams};

use crate::error::AppResult;

pub async fn run(client: &ApiClient, params: &ListParams) -> AppResult<()> {
    let bundle = fetch_masters(client, params).await;
    let failed = bundle.failed_collections();

    for name in &failed {
        warn!(collection = name, "collection failed to load");
    }

    print_collection("Companies", &bundle.companies, |c| &c.name);
    print_collection("Debit parties", &bundle.debit_parties, |p| &p.name);
    print_collection("Credit parties", &bundle.credit_parties, |p| &p.name);
    print_collection("Items", &bundle.items, |i| &i.name);
    print_collection("Brokers", &bundle.brokers, |b| &b.name);
    print_collection("CHAs", &bundle.chas, |c| &c.name);

    if failed.len() == 6 {
        // Every collection failed; surface the first error as the cause.
        let err = bundle
            .companies
            .err()
            .unwrap_or(ClientError::MissingData);
        return Err(err.into());
    }

    if !failed.is_empty() {
        println!("\nwarning: failed collections: {}", failed.join(", "));
    }

    Ok(())
}

fn print_collection<T>(
    label: &str,
    result: &Result<Vec<T>, ClientError>,
    name: impl Fn(&T) -> &str,
) {
    match result {
        Ok(records) => {
            println!("{label} ({}):", records.len());
            for record in records {
                println!("  - {}", name(record));
            }
        }
        Err(err) => println!("{label}: unavailable ({err})"),
    }
}
