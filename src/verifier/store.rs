//! Customer store port
//!
//! The verifier depends only on this trait; `PgCustomerStore` is the
//! PostgreSQL implementation and tests use an in-memory one.

use super::record::{CustomerSummary, Row};
use super::VerifyError;

/// Read-only access to customer records
pub trait CustomerStore {
    /// Fetch the full row of a customer by identifier
    fn find_by_id(&mut self, customer_id: &str) -> Result<Option<Row>, VerifyError>;

    /// Most recently created customer within the last `minutes`
    fn most_recent_within(&mut self, minutes: u32) -> Result<Option<CustomerSummary>, VerifyError>;

    /// Most recently created customer whose identifier starts with `prefix`
    fn most_recent_with_prefix(
        &mut self,
        prefix: &str,
    ) -> Result<Option<CustomerSummary>, VerifyError>;

    /// Column names of the customer table, in ordinal order
    fn columns(&mut self) -> Result<Vec<String>, VerifyError>;
}
