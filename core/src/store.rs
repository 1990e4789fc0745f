//! SQLite data access layer.
//!
//! RULE: Only store.rs talks to the database.
//! Aggregators consume the row shapes returned here — they never execute
//! SQL directly.

use chrono::NaiveDate;
use rusqlite::{params, Connection};

use crate::{error::ReportResult, types::MonthlyCount};

pub struct ReportStore {
    conn: Connection,
}

impl ReportStore {
    /// Open (or create) the reporting database at `path`.
    ///
    /// The connection is released on drop, on every exit path.
    pub fn open(path: &str) -> ReportResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> ReportResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> ReportResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_schema.sql"))?;
        Ok(())
    }

    // ── Report queries ─────────────────────────────────────────────

    /// Failed transaction-attribute counts per distinct attribute text,
    /// restricted to transactions inside the date window.
    pub fn failure_counts(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ReportResult<Vec<(i64, String)>> {
        let mut stmt = self.conn.prepare(
            "SELECT COUNT(ta.failed), a.text
             FROM transactionattribute ta
             JOIN \"transaction\" t ON t.id = ta.transactionid
             JOIN attribute a ON a.id = ta.attributeid
             WHERE t.transactiondate BETWEEN ?1 AND ?2 AND ta.failed = 1
             GROUP BY a.text
             ORDER BY a.text",
        )?;
        let rows = stmt.query_map(
            params![start.to_string(), end.to_string()],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Failed transaction-attribute counts grouped by (employee, month).
    pub fn failed_counts_by_month(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ReportResult<Vec<MonthlyCount>> {
        self.monthly_counts(start, end, true)
    }

    /// All transaction-attribute counts grouped by (employee, month).
    /// Counts every assessed attribute, failed or not.
    pub fn total_counts_by_month(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ReportResult<Vec<MonthlyCount>> {
        self.monthly_counts(start, end, false)
    }

    fn monthly_counts(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        failed_only: bool,
    ) -> ReportResult<Vec<MonthlyCount>> {
        let filter = if failed_only { "AND ta.failed = 1" } else { "" };
        let sql = format!(
            "SELECT e.fullname, COUNT(*), strftime('%Y-%m', t.transactiondate) AS month
             FROM \"transaction\" t
             JOIN employee e ON e.id = t.employeeid
             JOIN transactionattribute ta ON ta.transactionid = t.id
             WHERE t.transactiondate BETWEEN ?1 AND ?2 {filter}
             GROUP BY e.fullname, month
             ORDER BY e.fullname, month"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![start.to_string(), end.to_string()],
            |row| {
                Ok(MonthlyCount {
                    name: row.get(0)?,
                    count: row.get(1)?,
                    month: row.get(2)?,
                })
            },
        )?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    // ── Fixture / import writes ────────────────────────────────────
    //
    // The reports never write business data; these exist for the CSV
    // importer and for test fixtures.

    pub fn insert_employee(
        &self,
        id: i64,
        fullname: &str,
        department: &str,
    ) -> ReportResult<()> {
        self.conn.execute(
            "INSERT INTO employee (id, fullname, department) VALUES (?1, ?2, ?3)",
            params![id, fullname, department],
        )?;
        Ok(())
    }

    pub fn insert_attribute(
        &self,
        id: i64,
        text: &str,
        flags: AttributeFlags,
    ) -> ReportResult<()> {
        self.conn.execute(
            "INSERT INTO attribute
             (id, text, noncritical, customercritical, compliancecritical, businesscritical)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id,
                text,
                flags.non_critical as i64,
                flags.customer_critical as i64,
                flags.compliance_critical as i64,
                flags.business_critical as i64,
            ],
        )?;
        Ok(())
    }

    pub fn insert_transaction(
        &self,
        id: i64,
        creation_date: NaiveDate,
        transaction_date: Option<NaiveDate>,
        employee_id: i64,
    ) -> ReportResult<()> {
        self.conn.execute(
            "INSERT INTO \"transaction\" (id, creationdate, transactiondate, employeeid)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                id,
                creation_date.to_string(),
                transaction_date.map(|d| d.to_string()),
                employee_id,
            ],
        )?;
        Ok(())
    }

    pub fn insert_transaction_attribute(
        &self,
        transaction_id: i64,
        attribute_id: i64,
        failed: bool,
        appliable: bool,
    ) -> ReportResult<()> {
        self.conn.execute(
            "INSERT INTO transactionattribute (transactionid, attributeid, failed, appliable)
             VALUES (?1, ?2, ?3, ?4)",
            params![transaction_id, attribute_id, failed as i64, appliable as i64],
        )?;
        Ok(())
    }
}

/// Criticality flags carried by an attribute row.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeFlags {
    pub non_critical: bool,
    pub customer_critical: bool,
    pub compliance_critical: bool,
    pub business_critical: bool,
}
