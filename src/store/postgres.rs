use anyhow::{anyhow, Context, Result};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::model::{
    active_from_code, active_to_code, Document, DocumentFilter, Record, RecordId, User, UserFilter,
};
use crate::store::traits::{CollectionStore, Store};

const USER_COLUMNS: &str = "id, erp_id, first_name, last_name, username, password, active";

const DOCUMENT_COLUMNS: &str = "id, file_name, archived_path, received_at, pages, format, \
     account_number, iban, owner_name, bic, bank_code, bank_name, currency, sequence_no, \
     issue_date, period_from, period_to, opening_balance, closing_balance, total_entries, \
     total_sum, total_amount, credit_entries, credit_sum, debit_entries, debit_sum, output_file";

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Create the record tables when they are missing. Safe to run on every
    /// start.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id BIGSERIAL PRIMARY KEY,
                erp_id TEXT,
                first_name TEXT,
                last_name TEXT,
                username TEXT,
                password TEXT,
                active SMALLINT
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create users table")?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id BIGSERIAL PRIMARY KEY,
                file_name TEXT,
                archived_path TEXT,
                received_at TIMESTAMP,
                pages INTEGER,
                format TEXT,
                account_number TEXT,
                iban TEXT,
                owner_name TEXT,
                bic TEXT,
                bank_code TEXT,
                bank_name TEXT,
                currency TEXT,
                sequence_no INTEGER,
                issue_date TIMESTAMP,
                period_from TIMESTAMP,
                period_to TIMESTAMP,
                opening_balance NUMERIC(19, 4),
                closing_balance NUMERIC(19, 4),
                total_entries INTEGER,
                total_sum NUMERIC(19, 4),
                total_amount NUMERIC(19, 4),
                credit_entries INTEGER,
                credit_sum NUMERIC(19, 4),
                debit_entries INTEGER,
                debit_sum NUMERIC(19, 4),
                output_file TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create documents table")?;

        log::info!("database schema is ready");
        Ok(())
    }
}

fn user_from_row(row: &PgRow) -> User {
    // The active flag is stored as a small integer, 1 for active and 0 for
    // inactive.
    let active: Option<i16> = row.get("active");

    User {
        id: row.get("id"),
        erp_id: row.get("erp_id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        username: row.get("username"),
        password: row.get("password"),
        active: active.map(|code| active_from_code(code as u8)),
    }
}

fn document_from_row(row: &PgRow) -> Document {
    Document {
        id: row.get("id"),
        file_name: row.get("file_name"),
        archived_path: row.get("archived_path"),
        received_at: row.get("received_at"),
        pages: row.get("pages"),
        format: row.get("format"),
        account_number: row.get("account_number"),
        iban: row.get("iban"),
        owner_name: row.get("owner_name"),
        bic: row.get("bic"),
        bank_code: row.get("bank_code"),
        bank_name: row.get("bank_name"),
        currency: row.get("currency"),
        sequence_no: row.get("sequence_no"),
        issue_date: row.get("issue_date"),
        period_from: row.get("period_from"),
        period_to: row.get("period_to"),
        opening_balance: row.get("opening_balance"),
        closing_balance: row.get("closing_balance"),
        total_entries: row.get("total_entries"),
        total_sum: row.get("total_sum"),
        total_amount: row.get("total_amount"),
        credit_entries: row.get("credit_entries"),
        credit_sum: row.get("credit_sum"),
        debit_entries: row.get("debit_entries"),
        debit_sum: row.get("debit_sum"),
        output_file: row.get("output_file"),
    }
}

#[async_trait::async_trait]
impl CollectionStore<User> for PostgresStore {
    async fn list(&self) -> Result<Vec<User>> {
        let rows = sqlx::query(&format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS))
            .fetch_all(&self.pool)
            .await
            .context("Failed to list users")?;

        Ok(rows.iter().map(user_from_row).collect())
    }

    async fn get(&self, id: RecordId) -> Result<Option<User>> {
        let row = sqlx::query(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch user")?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(user_from_row(&row)))
    }

    async fn find(&self, filter: &UserFilter) -> Result<Vec<User>> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM users WHERE 1=1", USER_COLUMNS));

        if let Some(id) = filter.id {
            query.push(" AND id = ").push_bind(id);
        }
        if let Some(erp_id) = &filter.erp_id {
            query.push(" AND erp_id = ").push_bind(erp_id);
        }
        if let Some(first_name) = &filter.first_name {
            query.push(" AND first_name = ").push_bind(first_name);
        }
        if let Some(last_name) = &filter.last_name {
            query.push(" AND last_name = ").push_bind(last_name);
        }
        if let Some(username) = &filter.username {
            query.push(" AND username = ").push_bind(username);
        }
        query.push(" ORDER BY id");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .context("Failed to find users")?;

        Ok(rows.iter().map(user_from_row).collect())
    }

    async fn insert(&self, mut record: User) -> Result<User> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (erp_id, first_name, last_name, username, password, active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&record.erp_id)
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(&record.username)
        .bind(&record.password)
        .bind(record.active.map(|flag| active_to_code(flag) as i16))
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert user")?;

        record.set_id(row.get("id"));
        Ok(record)
    }

    async fn replace(&self, record: User) -> Result<()> {
        let id = record
            .id()
            .ok_or_else(|| anyhow!("cannot replace a user without an identifier"))?;

        sqlx::query(
            r#"
            UPDATE users
            SET erp_id = $2, first_name = $3, last_name = $4, username = $5, password = $6, active = $7
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&record.erp_id)
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(&record.username)
        .bind(&record.password)
        .bind(record.active.map(|flag| active_to_code(flag) as i16))
        .execute(&self.pool)
        .await
        .context("Failed to update user")?;

        Ok(())
    }

    async fn delete(&self, id: RecordId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete user")?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl CollectionStore<Document> for PostgresStore {
    async fn list(&self) -> Result<Vec<Document>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM documents ORDER BY id",
            DOCUMENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list documents")?;

        Ok(rows.iter().map(document_from_row).collect())
    }

    async fn get(&self, id: RecordId) -> Result<Option<Document>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM documents WHERE id = $1",
            DOCUMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch document")?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(document_from_row(&row)))
    }

    async fn find(&self, filter: &DocumentFilter) -> Result<Vec<Document>> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM documents WHERE 1=1", DOCUMENT_COLUMNS));

        if let Some(id) = filter.id {
            query.push(" AND id = ").push_bind(id);
        }
        if let Some(owner_name) = &filter.owner_name {
            query.push(" AND owner_name = ").push_bind(owner_name);
        }
        if let Some(bank_name) = &filter.bank_name {
            query.push(" AND bank_name = ").push_bind(bank_name);
        }
        if let Some(iban) = &filter.iban {
            query.push(" AND iban = ").push_bind(iban);
        }
        // Bounds compare the calendar date of the issue timestamp, inclusive
        // on both ends. NULL issue dates never satisfy a bound.
        if let Some(from) = filter.from_date {
            query.push(" AND issue_date::date >= ").push_bind(from);
        }
        if let Some(to) = filter.to_date {
            query.push(" AND issue_date::date <= ").push_bind(to);
        }
        query.push(" ORDER BY id");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .context("Failed to find documents")?;

        Ok(rows.iter().map(document_from_row).collect())
    }

    async fn insert(&self, mut record: Document) -> Result<Document> {
        let row = sqlx::query(
            r#"
            INSERT INTO documents (
                file_name, archived_path, received_at, pages, format, account_number,
                iban, owner_name, bic, bank_code, bank_name, currency, sequence_no,
                issue_date, period_from, period_to, opening_balance, closing_balance,
                total_entries, total_sum, total_amount, credit_entries, credit_sum,
                debit_entries, debit_sum, output_file
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26
            )
            RETURNING id
            "#,
        )
        .bind(&record.file_name)
        .bind(&record.archived_path)
        .bind(record.received_at)
        .bind(record.pages)
        .bind(&record.format)
        .bind(&record.account_number)
        .bind(&record.iban)
        .bind(&record.owner_name)
        .bind(&record.bic)
        .bind(&record.bank_code)
        .bind(&record.bank_name)
        .bind(&record.currency)
        .bind(record.sequence_no)
        .bind(record.issue_date)
        .bind(record.period_from)
        .bind(record.period_to)
        .bind(record.opening_balance)
        .bind(record.closing_balance)
        .bind(record.total_entries)
        .bind(record.total_sum)
        .bind(record.total_amount)
        .bind(record.credit_entries)
        .bind(record.credit_sum)
        .bind(record.debit_entries)
        .bind(record.debit_sum)
        .bind(&record.output_file)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert document")?;

        record.set_id(row.get("id"));
        Ok(record)
    }

    async fn replace(&self, record: Document) -> Result<()> {
        let id = record
            .id()
            .ok_or_else(|| anyhow!("cannot replace a document without an identifier"))?;

        sqlx::query(
            r#"
            UPDATE documents
            SET file_name = $2, archived_path = $3, received_at = $4, pages = $5,
                format = $6, account_number = $7, iban = $8, owner_name = $9,
                bic = $10, bank_code = $11, bank_name = $12, currency = $13,
                sequence_no = $14, issue_date = $15, period_from = $16, period_to = $17,
                opening_balance = $18, closing_balance = $19, total_entries = $20,
                total_sum = $21, total_amount = $22, credit_entries = $23,
                credit_sum = $24, debit_entries = $25, debit_sum = $26, output_file = $27
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&record.file_name)
        .bind(&record.archived_path)
        .bind(record.received_at)
        .bind(record.pages)
        .bind(&record.format)
        .bind(&record.account_number)
        .bind(&record.iban)
        .bind(&record.owner_name)
        .bind(&record.bic)
        .bind(&record.bank_code)
        .bind(&record.bank_name)
        .bind(&record.currency)
        .bind(record.sequence_no)
        .bind(record.issue_date)
        .bind(record.period_from)
        .bind(record.period_to)
        .bind(record.opening_balance)
        .bind(record.closing_balance)
        .bind(record.total_entries)
        .bind(record.total_sum)
        .bind(record.total_amount)
        .bind(record.credit_entries)
        .bind(record.credit_sum)
        .bind(record.debit_entries)
        .bind(record.debit_sum)
        .bind(&record.output_file)
        .execute(&self.pool)
        .await
        .context("Failed to update document")?;

        Ok(())
    }

    async fn delete(&self, id: RecordId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete document")?;

        Ok(result.rows_affected() > 0)
    }
}

impl Store for PostgresStore {}
