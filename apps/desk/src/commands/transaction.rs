//! # Transaction Commands
//!
//! Local computation (`compute`), upstream persistence (`save`), and the
//! list/show/delete CRUD surface.
//!
//! Derived figures arriving from the server are untrusted: `show` re-runs
//! the computation engine before printing anything.

use std::path::Path;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use exim_core::compute::compute_transaction;
use exim_core::money::Money;
use exim_core::types::SalesTransaction;
use exim_core::TransactionForm;
use exim_client::{ApiClient, ListParams};

use crate::error::{AppError, AppResult};

/// Reads and parses a form draft from a local JSON file.
async fn read_form(path: &Path) -> AppResult<TransactionForm> {
    let text = tokio::fs::read_to_string(path).await?;
    parse_json(&text, path)
}

/// Reads a full stored transaction (the shape `show`/the upstream returns).
async fn read_transaction(path: &Path) -> AppResult<SalesTransaction> {
    let text = tokio::fs::read_to_string(path).await?;
    parse_json(&text, path)
}

fn parse_json<T: serde::de::DeserializeOwned>(text: &str, path: &Path) -> AppResult<T> {
    serde_json::from_str(text).map_err(|e| AppError::BadInput {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Computes a local draft and prints line figures plus totals. Nothing is
/// persisted; this is the offline what-if surface.
pub async fn compute(path: &Path) -> AppResult<()> {
    let form = read_form(path).await?;
    let (items, totals, words) = form.compute()?;

    println!("{:<4} {:<30} {:>12} {:>14} {:>14}", "SR", "DESCRIPTION", "AMOUNT", "TAXABLE", "IGST");
    for (index, item) in items.iter().enumerate() {
        println!(
            "{:<4} {:<30} {:>12} {:>14} {:>14}",
            index + 1,
            truncate(&item.description, 30),
            item.amount().to_string(),
            item.taxable_value().to_string(),
            item.igst_amount().to_string(),
        );
    }

    println!();
    println!("Total amount:        {}", totals.total_amount);
    println!("Total taxable value: {}", totals.total_taxable_value);
    println!("Total IGST:          {}", totals.total_igst_amount);
    println!("In words:            {words}");

    Ok(())
}

/// Reads a stored transaction from a file, recomputes it and replaces the
/// upstream record. Derived figures in the file are ignored: the engine is
/// the only write path for them.
pub async fn update(client: &ApiClient, path: &Path) -> AppResult<()> {
    let mut txn = read_transaction(path).await?;
    compute_transaction(&mut txn)?;

    info!(transaction = %txn.id, "updating transaction upstream");
    let stored = client.update_transaction(&txn).await?;

    println!("updated transaction {}", stored.id);
    Ok(())
}

/// Validates a form draft, computes it and creates it upstream.
pub async fn save(client: &ApiClient, path: &Path) -> AppResult<()> {
    let form = read_form(path).await?;
    let txn = form.build_transaction(Uuid::new_v4().to_string(), Utc::now())?;

    info!(transaction = %txn.id, "creating transaction upstream");
    let stored = client.create_transaction(&txn).await?;

    println!("created transaction {}", stored.id);
    match &stored.invoice_number {
        Some(number) => println!("invoice number: {number}"),
        None => println!("invoice number: pending assignment"),
    }

    Ok(())
}

/// Lists transactions with pagination.
pub async fn list(client: &ApiClient, params: &ListParams) -> AppResult<()> {
    let page = client.list_transactions(params).await?;

    println!(
        "{:<38} {:<16} {:<12} {:<10} {:>14}",
        "ID", "INVOICE", "DATE", "STATUS", "AMOUNT"
    );
    for txn in &page.items {
        println!(
            "{:<38} {:<16} {:<12} {:<10} {:>14}",
            txn.id,
            txn.invoice_number.as_deref().unwrap_or("-"),
            txn.transaction_date.to_string(),
            txn.status.as_str(),
            format!("{} {}", txn.currency.code(), Money::from_minor(txn.total_amount_minor)),
        );
    }

    if let Some(pagination) = &page.pagination {
        println!(
            "\npage {} of {} ({} total)",
            pagination.current_page, pagination.total_pages, pagination.total_items
        );
    }

    Ok(())
}

/// Fetches one transaction, recomputes it and prints a summary.
pub async fn show(client: &ApiClient, id: &str) -> AppResult<()> {
    let mut txn = client.get_transaction(id).await?;
    compute_transaction(&mut txn)?;
    print_summary(&txn);
    Ok(())
}

/// Hard-deletes a transaction upstream.
pub async fn delete(client: &ApiClient, id: &str) -> AppResult<()> {
    client.delete_transaction(id).await?;
    println!("deleted transaction {id}");
    Ok(())
}

fn print_summary(txn: &SalesTransaction) {
    println!("Transaction {}", txn.id);
    println!("  invoice:  {}", txn.invoice_number.as_deref().unwrap_or("-"));
    println!("  date:     {}", txn.transaction_date);
    println!("  status:   {}", txn.status.as_str());
    println!("  currency: {}", txn.currency.code());
    println!("  items:    {}", txn.items.len());
    println!("  amount:   {}", txn.total_amount());
    println!("  taxable:  {}", txn.total_taxable_value());
    println!("  igst:     {}", txn.total_igst_amount());
    println!("  words:    {}", txn.amount_in_words);
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stored_transaction() {
        let text = r#"{
            "id": "t-1",
            "invoiceNumber": "EXP/2025/001",
            "transactionNumber": null,
            "status": "completed",
            "transactionDate": "2025-04-01",
            "currency": "USD",
            "companyId": "cmp-1",
            "debitPartyId": "dp-1",
            "creditPartyId": "cp-1",
            "brokerId": null,
            "chaId": null,
            "totalAmountMinor": 100000,
            "totalTaxableValueMinor": 8300000,
            "totalIgstAmountMinor": 1494000,
            "amountInWords": "ONE THOUSAND AND 00/100 US DOLLARS",
            "createdAt": "2025-04-01T10:00:00Z",
            "updatedAt": "2025-04-01T10:00:00Z"
        }"#;

        let txn: SalesTransaction = parse_json(text, Path::new("txn.json")).unwrap();
        assert_eq!(txn.id, "t-1");
        assert_eq!(txn.invoice_number.as_deref(), Some("EXP/2025/001"));
        assert!(txn.items.is_empty());

        let err = parse_json::<SalesTransaction>("{}", Path::new("txn.json")).unwrap_err();
        assert!(matches!(err, AppError::BadInput { .. }));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 30), "short");
        let long = "a very long description that will not fit the column";
        let cut = truncate(long, 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with('…'));
    }
}
