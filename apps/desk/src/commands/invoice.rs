//! # Invoice Render Command
//!
//! Fetches a transaction, recomputes it, resolves its party references and
//! renders the invoice PDF.
//!
//! ## Cancellation Model
//! The render runs on the blocking pool as one unit and is raced against a
//! Ctrl-C triggered `CancellationToken`. On cancellation nothing is written:
//! the output file appears only after a completed render, so a partially
//! rendered artifact can never land on disk.

use std::path::Path;

use tokio::task;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use exim_core::compute::compute_transaction;
use exim_client::ApiClient;
use exim_render::{render_invoice, RenderedInvoice, ResolvedParties};

use crate::error::{AppError, AppResult};

pub async fn render(client: &ApiClient, id: &str, output_dir: &Path) -> AppResult<()> {
    let mut txn = client.get_transaction(id).await?;
    compute_transaction(&mut txn)?;

    let parties = resolve_parties(client, &txn).await;

    let token = CancellationToken::new();
    let cancel = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let rendered = run_cancellable_render(txn, parties, &token).await?;

    tokio::fs::create_dir_all(output_dir).await?;
    let path = output_dir.join(&rendered.file_name);
    tokio::fs::write(&path, &rendered.bytes).await?;

    info!(
        path = %path.display(),
        pages = rendered.page_count,
        "invoice rendered"
    );
    println!("wrote {} ({} pages)", path.display(), rendered.page_count);

    Ok(())
}

/// Races the blocking render against cancellation. The render itself is not
/// interruptible mid-flight; cancellation abandons the task and returns
/// without writing anything.
async fn run_cancellable_render(
    txn: exim_core::types::SalesTransaction,
    parties: ResolvedParties,
    token: &CancellationToken,
) -> AppResult<RenderedInvoice> {
    let handle = task::spawn_blocking(move || render_invoice(&txn, &parties));

    tokio::select! {
        _ = token.cancelled() => {
            warn!("render cancelled");
            Err(AppError::Cancelled)
        }
        joined = handle => {
            let result = joined.map_err(|e| AppError::Task(e.to_string()))?;
            Ok(result?)
        }
    }
}

/// Resolves the transaction's master references concurrently. Each lookup
/// is optional: a missing or failing master leaves its slot empty and the
/// template falls back to the frozen sub-records and `N/A`.
async fn resolve_parties(
    client: &ApiClient,
    txn: &exim_core::types::SalesTransaction,
) -> ResolvedParties {
    let broker_id = txn.broker_id.as_deref();
    let cha_id = txn.cha_id.as_deref();

    let (company, debit_party, credit_party, broker, cha) = tokio::join!(
        client.get_company(&txn.company_id),
        client.get_debit_party(&txn.debit_party_id),
        client.get_credit_party(&txn.credit_party_id),
        async {
            match broker_id {
                Some(id) => Some(client.get_broker(id).await),
                None => None,
            }
        },
        async {
            match cha_id {
                Some(id) => Some(client.get_cha(id).await),
                None => None,
            }
        },
    );

    ResolvedParties {
        company: log_missing("company", company),
        debit_party: log_missing("debit-party", debit_party),
        credit_party: log_missing("credit-party", credit_party),
        broker: broker.and_then(|r| log_missing("broker", r)),
        cha: cha.and_then(|r| log_missing("cha", r)),
    }
}

fn log_missing<T>(collection: &str, result: Result<T, exim_client::ClientError>) -> Option<T> {
    match result {
        Ok(record) => Some(record),
        Err(err) => {
            warn!(collection, %err, "master lookup failed, rendering with fallbacks");
            None
        }
    }
}
