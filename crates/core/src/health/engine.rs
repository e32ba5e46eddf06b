//! Pure financial health computation.
//!
//! `compute_financial_health` turns the current ledger, costs, catalog and
//! settings into a [`FinancialHealthSnapshot`]. It never fails: absent data
//! yields zeros and every division guards a zero divisor.

use chrono::{Datelike, NaiveDate};
use log::debug;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::advisory::build_advice;
use super::model::{FinancialHealthSnapshot, GoalStatus};
use crate::appointments::{Appointment, RevenueByDate};
use crate::catalog::SalonService;
use crate::constants::{BILLS_LOOKAHEAD_DAYS, FIXED_COST_PRORATION_DAYS, GOAL_ON_TRACK_TOLERANCE};
use crate::costs::{FixedCost, VariableCost};
use crate::settings::FinanceSettings;
use crate::utils::time_utils::{day_of_month_after, days_in_month, is_same_month};

/// Returns `numerator / denominator`, or zero when the denominator is zero.
fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    amount * percent / Decimal::ONE_HUNDRED
}

/// Classifies today's revenue against the daily target.
///
/// Returns the gap (target minus revenue, negative when ahead) and the status.
pub fn classify_goal(daily_goal_target: Decimal, daily_revenue: Decimal) -> (Decimal, GoalStatus) {
    let gap = daily_goal_target - daily_revenue;
    let status = if gap <= Decimal::ZERO {
        GoalStatus::Ahead
    } else if gap < daily_goal_target * GOAL_ON_TRACK_TOLERANCE {
        GoalStatus::OnTrack
    } else {
        GoalStatus::Behind
    };
    (gap, status)
}

/// Sums unpaid fixed costs due today and within the lookahead window.
///
/// The window compares days of the month literally: when the lookahead
/// crosses into the next month, nothing counts as due this week.
fn bills_due(today: NaiveDate, fixed_costs: &[FixedCost]) -> (Decimal, Decimal) {
    let today_day = today.day();
    let window_end = day_of_month_after(today, BILLS_LOOKAHEAD_DAYS);

    fixed_costs
        .iter()
        .filter(|cost| !cost.paid)
        .fold((Decimal::ZERO, Decimal::ZERO), |(due_today, due_week), cost| {
            let today_amount = if cost.day_due == today_day {
                cost.amount
            } else {
                Decimal::ZERO
            };
            let week_amount = if today_day <= cost.day_due && cost.day_due <= window_end {
                cost.amount
            } else {
                Decimal::ZERO
            };
            (due_today + today_amount, due_week + week_amount)
        })
}

/// Computes the financial health snapshot for `today`.
#[allow(clippy::too_many_arguments)]
pub fn compute_financial_health(
    today: NaiveDate,
    appointments: &[Appointment],
    revenue_by_date: &RevenueByDate,
    fixed_costs: &[FixedCost],
    variable_costs: &[VariableCost],
    services: &[SalonService],
    settings: &FinanceSettings,
) -> FinancialHealthSnapshot {
    let day_of_month = Decimal::from(today.day());
    let month_days = Decimal::from(days_in_month(today));

    let daily_revenue = revenue_by_date
        .get(&today)
        .copied()
        .unwrap_or(Decimal::ZERO);

    let (monthly_revenue, confirmed_appointments) = appointments
        .iter()
        .filter(|a| a.is_confirmed() && is_same_month(a.date, today))
        .fold((Decimal::ZERO, 0u32), |(sum, count), a| {
            (sum + a.price, count + 1)
        });

    let total_fixed_costs: Decimal = fixed_costs.iter().map(|c| c.amount).sum();
    let total_variable_costs: Decimal = variable_costs.iter().map(|c| c.amount).sum();
    let (bills_due_today, bills_due_this_week) = bills_due(today, fixed_costs);

    let mut funds_accumulated = BTreeMap::new();
    let mut total_fund_allocation = Decimal::ZERO;
    for fund in settings.enabled_funds() {
        let accumulated = percent_of(monthly_revenue, fund.percentage);
        total_fund_allocation += accumulated;
        *funds_accumulated
            .entry(fund.id.clone())
            .or_insert(Decimal::ZERO) += accumulated;
    }

    let tax_reserve = percent_of(monthly_revenue, settings.tax_rate);
    let card_fee_reserve = percent_of(monthly_revenue, settings.card_fee_rate);
    let prorated_fixed_costs =
        safe_div(total_fixed_costs, FIXED_COST_PRORATION_DAYS) * day_of_month;
    let net_operating_income = monthly_revenue
        - (tax_reserve + card_fee_reserve + total_fund_allocation + prorated_fixed_costs);
    let safe_to_withdraw =
        percent_of(net_operating_income, settings.owner_salary_percent).max(Decimal::ZERO);

    let daily_goal_target = safe_div(settings.monthly_goal, month_days);
    let (goal_gap, goal_status) = classify_goal(daily_goal_target, daily_revenue);

    let average_ticket = safe_div(monthly_revenue, Decimal::from(confirmed_appointments));
    let projected_revenue = safe_div(monthly_revenue, day_of_month) * month_days;

    let (advice, combo_suggestion) = build_advice(
        goal_gap,
        average_ticket,
        services,
        settings.neighborhood,
    );

    debug!(
        "Financial health for {}: monthly={} daily={} net={} status={}",
        today, monthly_revenue, daily_revenue, net_operating_income, goal_status
    );

    FinancialHealthSnapshot {
        computed_for: today,
        daily_revenue,
        monthly_revenue,
        projected_revenue,
        confirmed_appointments,
        average_ticket,
        total_fixed_costs,
        total_variable_costs,
        bills_due_today,
        bills_due_this_week,
        funds_accumulated,
        total_fund_allocation,
        tax_reserve,
        card_fee_reserve,
        net_operating_income,
        safe_to_withdraw,
        daily_goal_target,
        goal_gap,
        goal_status,
        advice,
        combo_suggestion,
    }
}
