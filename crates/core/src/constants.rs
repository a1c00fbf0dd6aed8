use rust_decimal::Decimal;

/// Fund stakes whose magnitude exceeds this value are expressed in percent
/// (20 means 20 %) rather than as a fraction (0.2).
pub const PERCENT_FRACTION_LIMIT: Decimal = Decimal::ONE;

/// Divisor turning a percent stake into a fraction.
pub const PERCENT_SCALE: Decimal = Decimal::ONE_HUNDRED;
