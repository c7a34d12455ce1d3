//! # Sales Transaction Endpoints
//!
//! CRUD against `/sales-transactions`. Transactions serialize with the same
//! camelCase field names the upstream stores, so `SalesTransaction` crosses
//! the wire directly with no raw DTO in between.
//!
//! Derived figures received from the server are treated as untrusted: the
//! caller re-runs the computation engine after every fetch.

use exim_core::types::SalesTransaction;

use crate::client::{ApiClient, ListParams};
use crate::envelope::PageOf;
use crate::error::ClientResult;

const BASE: &str = "/sales-transactions";

impl ApiClient {
    /// Lists transactions, newest first, with server-side pagination.
    pub async fn list_transactions(
        &self,
        params: &ListParams,
    ) -> ClientResult<PageOf<SalesTransaction>> {
        self.get_page(BASE, params).await
    }

    /// Fetches a single transaction by id.
    pub async fn get_transaction(&self, id: &str) -> ClientResult<SalesTransaction> {
        self.get(&format!("{BASE}/{id}")).await
    }

    /// Creates a transaction; the server assigns the invoice number and
    /// returns the stored record.
    pub async fn create_transaction(
        &self,
        txn: &SalesTransaction,
    ) -> ClientResult<SalesTransaction> {
        self.post(BASE, txn).await
    }

    /// Replaces an existing transaction.
    pub async fn update_transaction(
        &self,
        txn: &SalesTransaction,
    ) -> ClientResult<SalesTransaction> {
        self.put(&format!("{BASE}/{}", txn.id), txn).await
    }

    /// Hard-deletes a transaction.
    pub async fn delete_transaction(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("{BASE}/{id}")).await
    }
}
