use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Minimum price for a service to be proposed as the main item of a combo
pub const COMBO_MAIN_SERVICE_MIN_PRICE: Decimal = dec!(50);

/// Combo price as a fraction of the two services' summed price (14% off)
pub const COMBO_PRICE_FACTOR: Decimal = dec!(0.86);

/// Discount shown next to a combo suggestion, in percent
pub const COMBO_DISCOUNT_PERCENT: Decimal = dec!(14);

/// Shortfall band, as a fraction of the daily target, still counted as on track
pub const GOAL_ON_TRACK_TOLERANCE: Decimal = dec!(0.2);

/// Month length assumed when pro-rating fixed costs
pub const FIXED_COST_PRORATION_DAYS: Decimal = dec!(30);

/// How far ahead "bills due this week" looks, in calendar days
pub const BILLS_LOOKAHEAD_DAYS: i64 = 7;

/// Average-ticket threshold when no neighborhood is configured
pub const DEFAULT_TICKET_THRESHOLD: Decimal = dec!(100);

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;
