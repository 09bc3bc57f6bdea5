//! Submission verifier
//!
//! Locates a customer record (by id, by recency, or by the automated-test
//! id prefix) and measures how many of its fields are filled in.
//!
//! # Examples
//!
//! ```no_run
//! use regtools::config::{DatabaseConfig, VerifierConfig};
//! use regtools::verifier::{PgCustomerStore, Verifier, VerifyRequest};
//!
//! let mut store = PgCustomerStore::connect(&DatabaseConfig::default()).unwrap();
//! let verifier = Verifier::from_config(&VerifierConfig::default());
//! let verification = verifier.verify(&mut store, &VerifyRequest::recent(2)).unwrap();
//! println!("{}%", verification.completeness.percentage);
//! ```

mod error;
mod postgres;
mod record;
mod store;

pub use error::{ErrorKind, VerifyError};
pub use postgres::PgCustomerStore;
pub use record::{
    Completeness, CustomerSummary, MAX_VALUE_CHARS, Record, Row, completeness_percentage,
    display_value, is_filled, report_value, truncate_value,
};
pub use store::CustomerStore;

use serde::Serialize;

use crate::config::VerifierConfig;

/// What to verify
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyRequest {
    /// Specific customer; `None` selects the most recent one
    pub customer_id: Option<String>,
    /// Lookback window in minutes when no id is given
    pub minutes_back: u32,
}

impl VerifyRequest {
    /// Verify a specific customer
    #[must_use]
    pub fn by_id(customer_id: impl Into<String>) -> Self {
        Self {
            customer_id: Some(customer_id.into()),
            minutes_back: 2,
        }
    }

    /// Verify the most recent customer within `minutes_back` minutes
    #[must_use]
    pub const fn recent(minutes_back: u32) -> Self {
        Self {
            customer_id: None,
            minutes_back,
        }
    }
}

/// How the verified record was selected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum Selection {
    /// Explicit identifier
    Id,
    /// Most recent customer inside the lookback window
    Recent {
        /// Lookback window in minutes
        minutes_back: u32,
    },
    /// Window was empty; most recent customer with the test prefix
    TestPrefix {
        /// Window that was searched first
        minutes_back: u32,
        /// Prefix that matched
        prefix: String,
    },
}

/// The outcome handed to callers and printed as JSON
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationSummary {
    /// Verified customer
    pub customer_id: String,
    /// Filled percentage, one decimal
    pub completeness: f64,
    /// Number of filled fields
    pub filled_count: usize,
    /// Number of table columns
    pub total_fields: usize,
    /// Key fields that are empty
    pub missing_key_fields: Vec<String>,
    /// How the record was selected
    pub selection: Selection,
    /// When the verification ran (RFC 3339)
    pub verified_at: String,
}

/// A completed verification with everything the report shows
#[derive(Debug, Clone)]
pub struct Verification {
    /// Identification of the customer
    pub customer: CustomerSummary,
    /// How the record was selected
    pub selection: Selection,
    /// The full record, in column order
    pub record: Record,
    /// Completeness statistics
    pub completeness: Completeness,
    /// Key fields that are empty
    pub missing_key_fields: Vec<String>,
    /// When the verification ran (RFC 3339)
    pub verified_at: String,
}

impl Verification {
    /// Condense into the summary mapping
    #[must_use]
    pub fn summary(&self) -> VerificationSummary {
        VerificationSummary {
            customer_id: self.customer.customer_id.clone(),
            completeness: self.completeness.percentage,
            filled_count: self.completeness.filled_count(),
            total_fields: self.completeness.total,
            missing_key_fields: self.missing_key_fields.clone(),
            selection: self.selection.clone(),
            verified_at: self.verified_at.clone(),
        }
    }
}

/// Runs verifications against any [`CustomerStore`]
#[derive(Debug, Clone)]
pub struct Verifier {
    test_prefix: String,
    key_fields: Vec<String>,
}

impl Verifier {
    /// Create a verifier with the given test prefix and key fields
    #[must_use]
    pub const fn new(test_prefix: String, key_fields: Vec<String>) -> Self {
        Self {
            test_prefix,
            key_fields,
        }
    }

    /// Create a verifier from configuration
    #[must_use]
    pub fn from_config(config: &VerifierConfig) -> Self {
        Self::new(config.test_prefix.clone(), config.key_fields.clone())
    }

    /// Locate the customer and analyze its record
    pub fn verify<S: CustomerStore + ?Sized>(
        &self,
        store: &mut S,
        request: &VerifyRequest,
    ) -> Result<Verification, VerifyError> {
        let (selection, row, listed) = match request.customer_id.as_deref() {
            Some(id) => {
                let row = store
                    .find_by_id(id)?
                    .ok_or_else(|| VerifyError::CustomerNotFound(id.to_string()))?;
                (Selection::Id, row, None)
            },
            None => {
                let (selection, summary) = self.select_recent(store, request.minutes_back)?;
                let row = store
                    .find_by_id(&summary.customer_id)?
                    .ok_or_else(|| VerifyError::CustomerNotFound(summary.customer_id.clone()))?;
                (selection, row, Some(summary))
            },
        };

        let columns = store.columns()?;
        let record = Record::from_row(&columns, &row);
        let completeness = Completeness::of(&record);
        let missing_key_fields = completeness.missing_key_fields(&self.key_fields);

        let customer = listed.unwrap_or_else(|| CustomerSummary {
            customer_id: request.customer_id.clone().unwrap_or_default(),
            full_name: record.get_text("full_name"),
            created_at: record.get_text("created_at"),
        });

        log::debug!(
            "Customer {}: {}/{} fields filled",
            customer.customer_id,
            completeness.filled_count(),
            completeness.total
        );

        Ok(Verification {
            customer,
            selection,
            record,
            completeness,
            missing_key_fields,
            verified_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Most recent customer in the window, falling back to the test prefix
    fn select_recent<S: CustomerStore + ?Sized>(
        &self,
        store: &mut S,
        minutes_back: u32,
    ) -> Result<(Selection, CustomerSummary), VerifyError> {
        if let Some(summary) = store.most_recent_within(minutes_back)? {
            return Ok((Selection::Recent { minutes_back }, summary));
        }

        log::warn!(
            "No customers created in the last {minutes_back} minutes, checking for {} customers",
            self.test_prefix
        );

        store
            .most_recent_with_prefix(&self.test_prefix)?
            .map(|summary| {
                (
                    Selection::TestPrefix {
                        minutes_back,
                        prefix: self.test_prefix.clone(),
                    },
                    summary,
                )
            })
            .ok_or_else(|| VerifyError::NoCandidate {
                minutes_back,
                prefix: self.test_prefix.clone(),
            })
    }
}
