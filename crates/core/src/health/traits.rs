//! Financial health service trait.

use chrono::NaiveDate;

use super::model::FinancialHealthSnapshot;
use crate::errors::Result;
use crate::utils::time_utils::local_today;

/// Service computing and caching financial health snapshots.
pub trait FinancialHealthServiceTrait: Send + Sync {
    /// Returns the snapshot for `today`, recomputing it when the cached one is
    /// stale or was invalidated.
    fn get_financial_health(
        &self,
        account_id: &str,
        today: NaiveDate,
    ) -> Result<FinancialHealthSnapshot>;

    /// Snapshot for the local calendar day.
    fn get_current_financial_health(&self, account_id: &str) -> Result<FinancialHealthSnapshot> {
        self.get_financial_health(account_id, local_today())
    }

    /// Drops the cached snapshot so the next read recomputes it.
    fn invalidate(&self, account_id: &str);
}
