use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Decimal precision for computed metrics
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Allocations are expressed in percentage points and must sum to this.
pub const FULL_ALLOCATION: Decimal = dec!(100);

/// Default per-asset floor used by the allocation UI (percentage points)
pub const DEFAULT_MIN_ALLOCATION: Decimal = dec!(0);

/// Default per-asset ceiling used by the allocation UI (percentage points)
pub const DEFAULT_MAX_ALLOCATION: Decimal = dec!(50);

/// Default advisory ceiling on the number of holdings
pub const DEFAULT_MAX_ASSETS: usize = 10;

/// Portfolio risk above which a de-risking suggestion is emitted (fractional)
pub const HIGH_RISK_THRESHOLD: Decimal = dec!(0.15);

/// Sharpe ratio below which a higher-return suggestion is emitted
pub const LOW_SHARPE_THRESHOLD: Decimal = dec!(1.0);

/// Holding count above which a consolidation suggestion is emitted
pub const CONSOLIDATION_ASSET_COUNT: usize = 8;

/// A portfolio is optimal when its Sharpe ratio is strictly above this...
pub const OPTIMAL_SHARPE_THRESHOLD: Decimal = dec!(1.2);

/// ...and its risk is strictly below this (fractional).
pub const OPTIMAL_RISK_THRESHOLD: Decimal = dec!(0.12);

/// Allocation drift (percentage points) that triggers a rebalancing suggestion
pub const REBALANCE_THRESHOLD: Decimal = dec!(5);

/// Number of monthly steps in a scenario trajectory
pub const SCENARIO_HORIZON_MONTHS: u32 = 6;
