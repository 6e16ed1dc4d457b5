use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::record::Record;
use crate::model::{DocumentFilter, RecordId};

/// Archived bank-report document. Every field besides the identifier is
/// optional; monetary amounts are exact decimals, never floating point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Storage-assigned identifier, immutable after creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    /// Name of the source report file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// Full path of the archived copy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_path: Option<String>,

    /// When the report file was received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_at: Option<NaiveDateTime>,

    /// Number of pages in the report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<i32>,

    /// Bank-report format tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Account number in the legacy format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,

    /// Account number per the IBAN standard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,

    /// Account owner's name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,

    /// BIC bank identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bic: Option<String>,

    /// Bank identifier in the legacy format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,

    /// Currency code of the report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Sequence number of the periodic report (daily, monthly, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_no: Option<i32>,

    /// When the bank issued the report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<NaiveDateTime>,

    /// Start of the covered movement window, inclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_from: Option<NaiveDateTime>,

    /// End of the covered movement window, inclusive as well.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_to: Option<NaiveDateTime>,

    /// Balance before the first listed entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_balance: Option<Decimal>,

    /// Balance after the last listed entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_balance: Option<Decimal>,

    /// Total number of entries on the report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_entries: Option<i32>,

    /// Absolute turnover over the period: |sum of debits| + |sum of credits|.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_sum: Option<Decimal>,

    /// Net movement over the period: sum of credits - sum of debits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,

    /// Number of credit entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_entries: Option<i32>,

    /// Sum of all credit entry amounts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_sum: Option<Decimal>,

    /// Number of debit entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debit_entries: Option<i32>,

    /// Sum of all debit entry amounts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debit_sum: Option<Decimal>,

    /// Name of the output file derived from this report, stored next to
    /// the source file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,
}

impl Record for Document {
    type Filter = DocumentFilter;

    const COLLECTION: &'static str = "documents";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn clear_id(&mut self) {
        self.id = None;
    }

    fn apply_update(&mut self, candidate: Self) {
        if let Some(file_name) = candidate.file_name {
            self.file_name = Some(file_name);
        }
        if let Some(archived_path) = candidate.archived_path {
            self.archived_path = Some(archived_path);
        }
        if let Some(received_at) = candidate.received_at {
            self.received_at = Some(received_at);
        }
        if let Some(pages) = candidate.pages {
            self.pages = Some(pages);
        }
        if let Some(format) = candidate.format {
            self.format = Some(format);
        }
        if let Some(account_number) = candidate.account_number {
            self.account_number = Some(account_number);
        }
        if let Some(iban) = candidate.iban {
            self.iban = Some(iban);
        }
        if let Some(owner_name) = candidate.owner_name {
            self.owner_name = Some(owner_name);
        }
        if let Some(bic) = candidate.bic {
            self.bic = Some(bic);
        }
        if let Some(bank_code) = candidate.bank_code {
            self.bank_code = Some(bank_code);
        }
        if let Some(bank_name) = candidate.bank_name {
            self.bank_name = Some(bank_name);
        }
        if let Some(currency) = candidate.currency {
            self.currency = Some(currency);
        }
        if let Some(sequence_no) = candidate.sequence_no {
            self.sequence_no = Some(sequence_no);
        }
        if let Some(issue_date) = candidate.issue_date {
            self.issue_date = Some(issue_date);
        }
        if let Some(period_from) = candidate.period_from {
            self.period_from = Some(period_from);
        }
        if let Some(period_to) = candidate.period_to {
            self.period_to = Some(period_to);
        }
        if let Some(opening_balance) = candidate.opening_balance {
            self.opening_balance = Some(opening_balance);
        }
        if let Some(closing_balance) = candidate.closing_balance {
            self.closing_balance = Some(closing_balance);
        }
        if let Some(total_entries) = candidate.total_entries {
            self.total_entries = Some(total_entries);
        }
        if let Some(total_sum) = candidate.total_sum {
            self.total_sum = Some(total_sum);
        }
        if let Some(total_amount) = candidate.total_amount {
            self.total_amount = Some(total_amount);
        }
        if let Some(credit_entries) = candidate.credit_entries {
            self.credit_entries = Some(credit_entries);
        }
        if let Some(credit_sum) = candidate.credit_sum {
            self.credit_sum = Some(credit_sum);
        }
        if let Some(debit_entries) = candidate.debit_entries {
            self.debit_entries = Some(debit_entries);
        }
        if let Some(debit_sum) = candidate.debit_sum {
            self.debit_sum = Some(debit_sum);
        }
        if let Some(output_file) = candidate.output_file {
            self.output_file = Some(output_file);
        }
    }

    fn matches(&self, filter: &DocumentFilter) -> bool {
        if let Some(id) = filter.id {
            if self.id != Some(id) {
                return false;
            }
        }
        if let Some(owner_name) = &filter.owner_name {
            if self.owner_name.as_ref() != Some(owner_name) {
                return false;
            }
        }
        if let Some(bank_name) = &filter.bank_name {
            if self.bank_name.as_ref() != Some(bank_name) {
                return false;
            }
        }
        if let Some(iban) = &filter.iban {
            if self.iban.as_ref() != Some(iban) {
                return false;
            }
        }
        // Date bounds apply to the calendar date of issue_date, inclusive
        // on both ends; a record without an issue date never falls in range.
        if let Some(from) = filter.from_date {
            match self.issue_date {
                Some(issued) if issued.date() >= from => {}
                _ => return false,
            }
        }
        if let Some(to) = filter.to_date {
            match self.issue_date {
                Some(issued) if issued.date() <= to => {}
                _ => return false,
            }
        }
        true
    }
}
