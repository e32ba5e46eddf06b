//! Financial health domain models.
//!
//! This module contains the derived, never-persisted output of the engine:
//! - Goal status classification against the pro-rated daily target
//! - Advisory text and the optional discounted combo offer
//! - The snapshot aggregating all figures shown on the finance dashboard

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Goal Status
// =============================================================================

/// Where today's realized revenue stands against the daily goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Behind,
    OnTrack,
    Ahead,
}

impl GoalStatus {
    /// Returns the string representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Behind => "behind",
            GoalStatus::OnTrack => "on_track",
            GoalStatus::Ahead => "ahead",
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Advice
// =============================================================================

/// Which advisory rule produced the advice text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceKind {
    /// Short of the daily goal; a combo offer is attached.
    ComboOffer,
    /// Short of the daily goal but no service is expensive enough to anchor a combo.
    AddPremiumServices,
    /// Goal met and the average ticket clears the neighborhood bracket.
    StrongTicket,
    /// Goal met but the average ticket is under the neighborhood bracket.
    RaiseTicket,
}

/// Advisory message for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Advice {
    pub kind: AdviceKind,
    pub message: String,
}

/// A bundled, discounted pair of services proposed to close the goal gap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComboSuggestion {
    pub main_service: String,
    pub secondary_service: String,
    /// Sum of both services' list prices
    pub original_price: Decimal,
    /// Discounted bundle price
    pub combo_price: Decimal,
    pub discount_percent: Decimal,
}

// =============================================================================
// Snapshot
// =============================================================================

/// Everything the finance dashboard shows, derived from the current inputs.
///
/// Recomputed whenever an input changes; never stored or diffed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialHealthSnapshot {
    /// Day the snapshot was computed for
    pub computed_for: NaiveDate,

    pub daily_revenue: Decimal,
    /// Confirmed appointment revenue in the current month
    pub monthly_revenue: Decimal,
    /// Linear extrapolation of monthly revenue to month end
    pub projected_revenue: Decimal,
    pub confirmed_appointments: u32,
    pub average_ticket: Decimal,

    pub total_fixed_costs: Decimal,
    pub total_variable_costs: Decimal,
    pub bills_due_today: Decimal,
    pub bills_due_this_week: Decimal,

    /// Accumulated amount per enabled fund id
    pub funds_accumulated: BTreeMap<String, Decimal>,
    pub total_fund_allocation: Decimal,
    pub tax_reserve: Decimal,
    pub card_fee_reserve: Decimal,
    /// Approximation: revenue minus reserves, fund allocations and pro-rated fixed costs
    pub net_operating_income: Decimal,
    pub safe_to_withdraw: Decimal,

    pub daily_goal_target: Decimal,
    /// Daily target minus today's revenue; negative when ahead
    pub goal_gap: Decimal,
    pub goal_status: GoalStatus,

    pub advice: Option<Advice>,
    pub combo_suggestion: Option<ComboSuggestion>,
}

impl FinancialHealthSnapshot {
    /// Accumulated amount for a fund, zero when the fund is disabled or unknown.
    pub fn fund_amount(&self, fund_id: &str) -> Decimal {
        self.funds_accumulated
            .get(fund_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Share of the monthly goal already projected, in percent (for progress bars).
    pub fn projected_goal_percent(&self, monthly_goal: Decimal) -> Decimal {
        if monthly_goal.is_zero() {
            return Decimal::ZERO;
        }
        self.projected_revenue / monthly_goal * Decimal::ONE_HUNDRED
    }
}
