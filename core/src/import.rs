//! CSV import.
//!
//! Loads the four source CSV files (Employee, Attribute, Transaction,
//! TransAttr) into a local working database. Dates in the source files use
//! the European `DD/MM/YYYY` style and are normalized to ISO on insert.

use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    error::{ReportError, ReportResult},
    store::{AttributeFlags, ReportStore},
};

#[derive(Debug, Deserialize)]
struct EmployeeRecord {
    #[serde(rename = "ID")]
    id: i64,
    #[serde(rename = "FullName")]
    fullname: String,
    #[serde(rename = "Department")]
    department: String,
}

#[derive(Debug, Deserialize)]
struct AttributeRecord {
    #[serde(rename = "ID")]
    id: i64,
    #[serde(rename = "Text")]
    text: String,
    #[serde(rename = "NonCritical")]
    non_critical: Option<String>,
    #[serde(rename = "CustomerCritical")]
    customer_critical: Option<String>,
    #[serde(rename = "ComplianceCritical")]
    compliance_critical: Option<String>,
    #[serde(rename = "BusinessCritical")]
    business_critical: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TransactionRecord {
    #[serde(rename = "ID")]
    id: i64,
    #[serde(rename = "CreationDate")]
    creation_date: String,
    #[serde(rename = "TransactionDate")]
    transaction_date: Option<String>,
    #[serde(rename = "EmployeeID")]
    employee_id: i64,
}

#[derive(Debug, Deserialize)]
struct TransAttrRecord {
    #[serde(rename = "TransactionID")]
    transaction_id: i64,
    #[serde(rename = "AttributeID")]
    attribute_id: i64,
    #[serde(rename = "Failed")]
    failed: Option<String>,
    #[serde(rename = "Appliable")]
    appliable: Option<String>,
}

/// Import `Employee.csv`, `Attribute.csv`, `Transaction.csv` and
/// `TransAttr.csv` from `dir` into the store. Returns the number of rows
/// inserted per table, in that order.
pub fn import_data_dir(
    store: &ReportStore,
    dir: &Path,
) -> ReportResult<(usize, usize, usize, usize)> {
    let mut employees = 0;
    for record in read_csv::<EmployeeRecord>(&dir.join("Employee.csv"))? {
        let r = record?;
        store.insert_employee(r.id, &r.fullname, &r.department)?;
        employees += 1;
    }

    let mut attributes = 0;
    for record in read_csv::<AttributeRecord>(&dir.join("Attribute.csv"))? {
        let r = record?;
        store.insert_attribute(
            r.id,
            &r.text,
            AttributeFlags {
                non_critical: flag(&r.non_critical),
                customer_critical: flag(&r.customer_critical),
                compliance_critical: flag(&r.compliance_critical),
                business_critical: flag(&r.business_critical),
            },
        )?;
        attributes += 1;
    }

    let mut transactions = 0;
    for record in read_csv::<TransactionRecord>(&dir.join("Transaction.csv"))? {
        let r = record?;
        let creation = parse_dmy(&r.creation_date)?;
        let transaction = match r.transaction_date.as_deref() {
            Some(s) if !s.is_empty() => Some(parse_dmy(s)?),
            _ => None,
        };
        store.insert_transaction(r.id, creation, transaction, r.employee_id)?;
        transactions += 1;
    }

    let mut links = 0;
    for record in read_csv::<TransAttrRecord>(&dir.join("TransAttr.csv"))? {
        let r = record?;
        store.insert_transaction_attribute(
            r.transaction_id,
            r.attribute_id,
            flag(&r.failed),
            flag(&r.appliable),
        )?;
        links += 1;
    }

    log::info!(
        "imported {employees} employees, {attributes} attributes, \
         {transactions} transactions, {links} transaction attributes"
    );
    Ok((employees, attributes, transactions, links))
}

fn read_csv<T: serde::de::DeserializeOwned>(
    path: &Path,
) -> ReportResult<impl Iterator<Item = Result<T, csv::Error>>> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;
    Ok(reader.into_deserialize())
}

fn parse_dmy(value: &str) -> ReportResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%d/%m/%Y").map_err(|source| ReportError::InvalidDate {
        value: value.to_string(),
        source,
    })
}

fn flag(value: &Option<String>) -> bool {
    matches!(value.as_deref(), Some("1"))
}
