//! Conversion helpers shared by the repositories.
//!
//! Money is stored as TEXT to keep decimal precision and dates as ISO
//! `YYYY-MM-DD` TEXT.

use chrono::NaiveDate;
use log::warn;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

use salonbook_core::errors::Error;
use salonbook_core::utils::time_utils::{format_iso_date, parse_iso_date};
use salonbook_core::Result;

/// Parses a stored amount, falling back to a float parse and then to zero.
pub fn parse_decimal_tolerant(value: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value.trim()) {
        Ok(parsed) => parsed,
        Err(decimal_err) => match value.trim().parse::<f64>().ok().and_then(Decimal::from_f64) {
            Some(parsed) => parsed,
            None => {
                warn!(
                    "Failed to parse {} '{}' as Decimal ({}). Falling back to ZERO.",
                    field_name, value, decimal_err
                );
                Decimal::ZERO
            }
        },
    }
}

pub fn parse_stored_date(value: &str) -> Result<NaiveDate> {
    parse_iso_date(value)
}

pub fn to_stored_date(date: NaiveDate) -> String {
    format_iso_date(date)
}

/// Converts database rows to domain values, skipping (and logging) rows that
/// cannot be read instead of failing the whole query.
pub fn collect_valid_rows<D, T>(rows: Vec<D>, table: &str) -> Vec<T>
where
    T: TryFrom<D, Error = Error>,
{
    rows.into_iter()
        .filter_map(|row| match T::try_from(row) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Skipping unreadable row in {}: {}", table, e);
                None
            }
        })
        .collect()
}
