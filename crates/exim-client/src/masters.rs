//! # Master Data Endpoints
//!
//! Companies, debit parties, credit parties, items, brokers and CHAs.
//!
//! ## Normalization Boundary
//! The upstream collections are inconsistent about field names: some records
//! carry `_id`, others `id`; names arrive as `companyName`, `partyName`,
//! `itemName`, `brokerName`, `chaName` or plain `name` depending on the
//! collection and its age. The raw DTOs in this module accept every spelling
//! and fold each record into the normalized shapes from `exim_core::types`
//! exactly once. Records with no usable id are dropped with a warning.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

use exim_core::types::{Broker, Cha, Company, CreditParty, DebitParty, ItemMaster};

use crate::client::{ApiClient, ListParams};
use crate::error::{ClientError, ClientResult};

/// Parses the date part of an upstream timestamp (`2025-04-01` or
/// `2025-04-01T00:00:00.000Z`).
fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?;
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn join_address(line1: Option<String>, line2: Option<String>) -> Vec<String> {
    [line1, line2]
        .into_iter()
        .flatten()
        .filter(|l| !l.trim().is_empty())
        .collect()
}

fn to_minor(value: Option<f64>) -> Option<i64> {
    value.filter(|v| v.is_finite()).map(|v| (v * 100.0).round() as i64)
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Raw DTOs
// =============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct RawCompany {
    #[serde(default, alias = "_id")]
    id: Option<String>,
    #[serde(default, alias = "companyName")]
    name: Option<String>,
    #[serde(default, alias = "firmId")]
    firm_id: Option<String>,
    #[serde(default, alias = "addressLine1", alias = "address")]
    address_line1: Option<String>,
    #[serde(default, alias = "addressLine2")]
    address_line2: Option<String>,
    #[serde(default, alias = "pinCode")]
    pin_code: Option<String>,
    #[serde(default, alias = "gstNo")]
    gst_no: Option<String>,
    #[serde(default, alias = "panNo")]
    pan_no: Option<String>,
    #[serde(default, alias = "contactNo", alias = "phone")]
    contact_no: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default = "default_true", alias = "isActive")]
    is_active: bool,
}

impl RawCompany {
    fn normalize(self) -> Option<Company> {
        let id = usable(self.id)?;
        Some(Company {
            id,
            firm_id: self.firm_id,
            name: usable(self.name).unwrap_or_default(),
            address_lines: join_address(self.address_line1, self.address_line2),
            pin_code: self.pin_code,
            gst_no: self.gst_no,
            pan_no: self.pan_no,
            contact_no: self.contact_no,
            email: self.email,
            is_active: self.is_active,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawDebitParty {
    #[serde(default, alias = "_id")]
    id: Option<String>,
    #[serde(default, alias = "partyName")]
    name: Option<String>,
    #[serde(default, alias = "addressLine1", alias = "address")]
    address_line1: Option<String>,
    #[serde(default, alias = "addressLine2")]
    address_line2: Option<String>,
    #[serde(default, alias = "pinCode")]
    pin_code: Option<String>,
    #[serde(default, alias = "gstNo")]
    gst_no: Option<String>,
    #[serde(default, alias = "panNo")]
    pan_no: Option<String>,
    #[serde(default, alias = "iecNo")]
    iec_no: Option<String>,
    #[serde(default, alias = "epcgLicenseNos", alias = "epcgLicenseNo")]
    epcg_license_nos: Vec<String>,
    #[serde(default, alias = "epcgLicenseDate")]
    epcg_license_date: Option<String>,
    #[serde(default = "default_true", alias = "isActive")]
    is_active: bool,
}

impl RawDebitParty {
    fn normalize(self) -> Option<DebitParty> {
        let id = usable(self.id)?;
        Some(DebitParty {
            id,
            name: usable(self.name).unwrap_or_default(),
            address_lines: join_address(self.address_line1, self.address_line2),
            pin_code: self.pin_code,
            gst_no: self.gst_no,
            pan_no: self.pan_no,
            iec_no: self.iec_no,
            epcg_license_nos: self.epcg_license_nos,
            epcg_license_date: parse_date(self.epcg_license_date.as_deref()),
            is_active: self.is_active,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCreditParty {
    #[serde(default, alias = "_id")]
    id: Option<String>,
    #[serde(default, alias = "partyName")]
    name: Option<String>,
    #[serde(default, alias = "partyType")]
    party_type: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default, alias = "gstNo")]
    gst_no: Option<String>,
    #[serde(default, alias = "panNo")]
    pan_no: Option<String>,
    #[serde(default, alias = "creditLimit")]
    credit_limit: Option<f64>,
    #[serde(default, alias = "currentBalance")]
    current_balance: Option<f64>,
    #[serde(default = "default_true", alias = "isActive")]
    is_active: bool,
}

impl RawCreditParty {
    fn normalize(self) -> Option<CreditParty> {
        let id = usable(self.id)?;
        Some(CreditParty {
            id,
            name: usable(self.name).unwrap_or_default(),
            party_type: self.party_type,
            address: self.address,
            phone: self.phone,
            email: self.email,
            gst_no: self.gst_no,
            pan_no: self.pan_no,
            credit_limit_minor: to_minor(self.credit_limit),
            current_balance_minor: to_minor(self.current_balance),
            is_active: self.is_active,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawItem {
    #[serde(default, alias = "_id")]
    id: Option<String>,
    #[serde(default, alias = "itemName")]
    name: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default, alias = "hsnCode")]
    hsn_code: Option<String>,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default, alias = "currentStock")]
    current_stock: Option<f64>,
    #[serde(default, alias = "sellingPrice")]
    selling_price: Option<f64>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default = "default_true", alias = "isActive")]
    is_active: bool,
}

impl RawItem {
    fn normalize(self) -> Option<ItemMaster> {
        let id = usable(self.id)?;
        Some(ItemMaster {
            id,
            name: usable(self.name).unwrap_or_default(),
            category: self.category,
            hsn_code: self.hsn_code,
            unit: self.unit,
            current_stock: self.current_stock,
            selling_price: self.selling_price,
            description: self.description,
            is_active: self.is_active,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawBroker {
    #[serde(default, alias = "_id")]
    id: Option<String>,
    #[serde(default, alias = "brokerName")]
    name: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default, alias = "commissionRate")]
    commission_rate: Option<f64>,
    #[serde(default = "default_true", alias = "isActive")]
    is_active: bool,
}

impl RawBroker {
    fn normalize(self) -> Option<Broker> {
        let id = usable(self.id)?;
        Some(Broker {
            id,
            name: usable(self.name).unwrap_or_default(),
            address: self.address,
            phone: self.phone,
            email: self.email,
            commission_rate: self.commission_rate,
            is_active: self.is_active,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCha {
    #[serde(default, alias = "_id")]
    id: Option<String>,
    #[serde(default, alias = "chaName")]
    name: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default, alias = "licenseNumber", alias = "licenseNo")]
    license_number: Option<String>,
    #[serde(default = "default_true", alias = "isActive")]
    is_active: bool,
}

impl RawCha {
    fn normalize(self) -> Option<Cha> {
        let id = usable(self.id)?;
        Some(Cha {
            id,
            name: usable(self.name).unwrap_or_default(),
            address: self.address,
            phone: self.phone,
            email: self.email,
            license_number: self.license_number,
            is_active: self.is_active,
        })
    }
}

fn usable(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn normalize_all<R, T>(collection: &str, raw: Vec<R>, f: impl Fn(R) -> Option<T>) -> Vec<T> {
    let total = raw.len();
    let normalized: Vec<T> = raw.into_iter().filter_map(f).collect();
    if normalized.len() < total {
        warn!(
            collection,
            dropped = total - normalized.len(),
            "dropped records without a usable id"
        );
    }
    normalized
}

// =============================================================================
// Endpoint Methods
// =============================================================================

impl ApiClient {
    pub async fn list_companies(&self, params: &ListParams) -> ClientResult<Vec<Company>> {
        let page = self.get_page::<RawCompany>("/company", params).await?;
        Ok(normalize_all("company", page.items, RawCompany::normalize))
    }

    pub async fn get_company(&self, id: &str) -> ClientResult<Company> {
        let raw: RawCompany = self.get(&format!("/company/{id}")).await?;
        raw.normalize().ok_or(ClientError::MissingData)
    }

    pub async fn list_debit_parties(&self, params: &ListParams) -> ClientResult<Vec<DebitParty>> {
        let page = self.get_page::<RawDebitParty>("/debit-party", params).await?;
        Ok(normalize_all(
            "debit-party",
            page.items,
            RawDebitParty::normalize,
        ))
    }

    pub async fn get_debit_party(&self, id: &str) -> ClientResult<DebitParty> {
        let raw: RawDebitParty = self.get(&format!("/debit-party/{id}")).await?;
        raw.normalize().ok_or(ClientError::MissingData)
    }

    pub async fn list_credit_parties(&self, params: &ListParams) -> ClientResult<Vec<CreditParty>> {
        let page = self
            .get_page::<RawCreditParty>("/credit-party", params)
            .await?;
        Ok(normalize_all(
            "credit-party",
            page.items,
            RawCreditParty::normalize,
        ))
    }

    pub async fn get_credit_party(&self, id: &str) -> ClientResult<CreditParty> {
        let raw: RawCreditParty = self.get(&format!("/credit-party/{id}")).await?;
        raw.normalize().ok_or(ClientError::MissingData)
    }

    pub async fn list_items(&self, params: &ListParams) -> ClientResult<Vec<ItemMaster>> {
        let page = self.get_page::<RawItem>("/item", params).await?;
        Ok(normalize_all("item", page.items, RawItem::normalize))
    }

    pub async fn list_brokers(&self, params: &ListParams) -> ClientResult<Vec<Broker>> {
        let page = self.get_page::<RawBroker>("/broker", params).await?;
        Ok(normalize_all("broker", page.items, RawBroker::normalize))
    }

    pub async fn get_broker(&self, id: &str) -> ClientResult<Broker> {
        let raw: RawBroker = self.get(&format!("/broker/{id}")).await?;
        raw.normalize().ok_or(ClientError::MissingData)
    }

    pub async fn list_chas(&self, params: &ListParams) -> ClientResult<Vec<Cha>> {
        let page = self.get_page::<RawCha>("/cha", params).await?;
        Ok(normalize_all("cha", page.items, RawCha::normalize))
    }

    pub async fn get_cha(&self, id: &str) -> ClientResult<Cha> {
        let raw: RawCha = self.get(&format!("/cha/{id}")).await?;
        raw.normalize().ok_or(ClientError::MissingData)
    }
}

// =============================================================================
// Concurrent Bundle Fetch
// =============================================================================

/// All six master collections, each with its own outcome. A failure in one
/// collection never discards the others; the caller decides how much of the
/// form it can populate.
#[derive(Debug)]
pub struct MasterBundle {
    pub companies: ClientResult<Vec<Company>>,
    pub debit_parties: ClientResult<Vec<DebitParty>>,
    pub credit_parties: ClientResult<Vec<CreditParty>>,
    pub items: ClientResult<Vec<ItemMaster>>,
    pub brokers: ClientResult<Vec<Broker>>,
    pub chas: ClientResult<Vec<Cha>>,
}

impl MasterBundle {
    /// Collections that failed to load, by endpoint name.
    pub fn failed_collections(&self) -> Vec<&'static str> {
        let mut failed = Vec::new();
        if self.companies.is_err() {
            failed.push("company");
        }
        if self.debit_parties.is_err() {
            failed.push("debit-party");
        }
        if self.credit_parties.is_err() {
            failed.push("credit-party");
        }
        if self.items.is_err() {
            failed.push("item");
        }
        if self.brokers.is_err() {
            failed.push("broker");
        }
        if self.chas.is_err() {
            failed.push("cha");
        }
        failed
    }
}

/// Fetches all six collections concurrently.
pub async fn fetch_masters(client: &ApiClient, params: &ListParams) -> MasterBundle {
    let (companies, debit_parties, credit_parties, items, brokers, chas) = tokio::join!(
        client.list_companies(params),
        client.list_debit_parties(params),
        client.list_credit_parties(params),
        client.list_items(params),
        client.list_brokers(params),
        client.list_chas(params),
    );

    MasterBundle {
        companies,
        debit_parties,
        credit_parties,
        items,
        brokers,
        chas,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
