//! Intrinsic valuation domain models.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Which valuation model(s) to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ValuationModel {
    Dcf,
    DividendDiscount,
    Graham,
    Ratios,
    #[default]
    All,
}

impl ValuationModel {
    /// Individual models, in the order they run under `All`.
    pub const MODELS: [ValuationModel; 4] = [
        ValuationModel::Dcf,
        ValuationModel::DividendDiscount,
        ValuationModel::Graham,
        ValuationModel::Ratios,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ValuationModel::Dcf => "dcf",
            ValuationModel::DividendDiscount => "dividendDiscount",
            ValuationModel::Graham => "graham",
            ValuationModel::Ratios => "ratios",
            ValuationModel::All => "all",
        }
    }

    /// Name used in error messages and summaries.
    pub fn display_name(&self) -> &'static str {
        match self {
            ValuationModel::Dcf => "DCF",
            ValuationModel::DividendDiscount => "Dividend Discount Model",
            ValuationModel::Graham => "Graham Formula",
            ValuationModel::Ratios => "Valuation Ratios",
            ValuationModel::All => "All Models",
        }
    }
}

impl fmt::Display for ValuationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValuationModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace(['_', '-'], "").as_str() {
            "dcf" => Ok(ValuationModel::Dcf),
            "ddm" | "dividenddiscount" | "dividend" => Ok(ValuationModel::DividendDiscount),
            "graham" => Ok(ValuationModel::Graham),
            "ratios" | "ratio" => Ok(ValuationModel::Ratios),
            "all" => Ok(ValuationModel::All),
            _ => Err(Error::unknown("valuation model", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Recommendation::Buy => "BUY",
            Recommendation::Sell => "SELL",
            Recommendation::Hold => "HOLD",
        };
        f.write_str(s)
    }
}

/// Price multiples that turn an intrinsic value into a signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationThresholds {
    /// BUY when intrinsic value is strictly above `price × buy_above`
    pub buy_above: Decimal,
    /// SELL when intrinsic value is strictly below `price × sell_below`
    pub sell_below: Decimal,
}

impl RecommendationThresholds {
    pub const DCF: Self = Self {
        buy_above: dec!(1.15),
        sell_below: dec!(0.85),
    };
    pub const DIVIDEND_DISCOUNT: Self = Self {
        buy_above: dec!(1.10),
        sell_below: dec!(0.90),
    };
    pub const GRAHAM: Self = Self {
        buy_above: dec!(1.20),
        sell_below: dec!(0.80),
    };

    pub fn classify(&self, intrinsic_value: Decimal, current_price: Decimal) -> Recommendation {
        // A buy threshold beyond Decimal::MAX cannot be exceeded.
        let above_buy = current_price
            .checked_mul(self.buy_above)
            .is_some_and(|threshold| intrinsic_value > threshold);
        let below_sell = current_price
            .checked_mul(self.sell_below)
            .is_some_and(|threshold| intrinsic_value < threshold);
        if above_buy {
            Recommendation::Buy
        } else if below_sell {
            Recommendation::Sell
        } else {
            Recommendation::Hold
        }
    }
}

/// Model parameters. Every field may be overridden per call; absent fields
/// keep their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValuationAssumptions {
    /// Annual free-cash-flow growth during the projection window
    pub growth_rate: Decimal,
    /// Discount rate (cost of capital) for the DCF
    pub discount_rate: Decimal,
    /// Perpetual growth after the projection window
    pub terminal_growth_rate: Decimal,
    /// Projection window in years
    pub projection_years: u32,
    /// Required rate of return for the dividend discount model
    pub required_return: Decimal,
    /// Perpetual dividend growth for the dividend discount model
    pub dividend_growth_rate: Decimal,
}

impl Default for ValuationAssumptions {
    fn default() -> Self {
        Self {
            growth_rate: dec!(0.05),
            discount_rate: dec!(0.10),
            terminal_growth_rate: dec!(0.025),
            projection_years: 5,
            required_return: dec!(0.09),
            dividend_growth_rate: dec!(0.03),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DcfValuation {
    pub intrinsic_value: Decimal,
    pub current_price: Decimal,
    /// Percent difference between intrinsic value and price
    pub upside: Decimal,
    pub growth_rate: Decimal,
    pub discount_rate: Decimal,
    pub terminal_growth_rate: Decimal,
    /// Free cash flow for each projected year
    pub projected_cash_flows: Vec<Decimal>,
    /// Terminal value at the end of the projection window (undiscounted)
    pub terminal_value: Decimal,
    /// Sum of all discounted cash flows, including the terminal value
    pub enterprise_value: Decimal,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendDiscountValuation {
    pub intrinsic_value: Decimal,
    pub current_price: Decimal,
    pub upside: Decimal,
    pub dividend_per_share: Decimal,
    pub required_return: Decimal,
    pub growth_rate: Decimal,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrahamValuation {
    pub intrinsic_value: Decimal,
    pub current_price: Decimal,
    pub upside: Decimal,
    pub eps: Decimal,
    pub book_value_per_share: Decimal,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValuationLabel {
    Undervalued,
    #[serde(rename = "Fair Value")]
    FairValue,
    Overvalued,
}

impl fmt::Display for ValuationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValuationLabel::Undervalued => "Undervalued",
            ValuationLabel::FairValue => "Fair Value",
            ValuationLabel::Overvalued => "Overvalued",
        };
        f.write_str(s)
    }
}

/// Multiples-based snapshot. Ratios whose denominator is not positive are
/// reported as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatioValuation {
    pub current_price: Decimal,
    pub market_cap: Decimal,
    pub enterprise_value: Decimal,
    pub pe_ratio: Option<Decimal>,
    pub pb_ratio: Option<Decimal>,
    pub ps_ratio: Option<Decimal>,
    pub peg_ratio: Option<Decimal>,
    pub ev_to_revenue: Option<Decimal>,
    pub ev_to_ebitda: Option<Decimal>,
    pub gross_margin: Option<Decimal>,
    pub operating_margin: Option<Decimal>,
    pub profit_margin: Option<Decimal>,
    pub valuation: ValuationLabel,
}

/// Output of a single model, tagged by model name on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "camelCase")]
pub enum ValuationResult {
    Dcf(DcfValuation),
    DividendDiscount(DividendDiscountValuation),
    Graham(GrahamValuation),
    Ratios(RatioValuation),
}

impl ValuationResult {
    pub fn model(&self) -> ValuationModel {
        match self {
            ValuationResult::Dcf(_) => ValuationModel::Dcf,
            ValuationResult::DividendDiscount(_) => ValuationModel::DividendDiscount,
            ValuationResult::Graham(_) => ValuationModel::Graham,
            ValuationResult::Ratios(_) => ValuationModel::Ratios,
        }
    }

    /// The ratios model only labels the valuation and carries no signal.
    pub fn recommendation(&self) -> Option<Recommendation> {
        match self {
            ValuationResult::Dcf(v) => Some(v.recommendation),
            ValuationResult::DividendDiscount(v) => Some(v.recommendation),
            ValuationResult::Graham(v) => Some(v.recommendation),
            ValuationResult::Ratios(_) => None,
        }
    }

    pub fn intrinsic_value(&self) -> Option<Decimal> {
        match self {
            ValuationResult::Dcf(v) => Some(v.intrinsic_value),
            ValuationResult::DividendDiscount(v) => Some(v.intrinsic_value),
            ValuationResult::Graham(v) => Some(v.intrinsic_value),
            ValuationResult::Ratios(_) => None,
        }
    }
}

/// Majority signal across the models that produced a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallValuation {
    pub recommendation: Recommendation,
    /// Share of counted models agreeing with the stronger side (0-1)
    pub confidence: Decimal,
    pub buy_count: usize,
    pub sell_count: usize,
    pub hold_count: usize,
    pub summary: String,
}

/// A model that could not run under `All`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedModel {
    pub model: ValuationModel,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationReport {
    pub symbol: String,
    pub current_price: Decimal,
    pub results: Vec<ValuationResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedModel>,
    pub overall: OverallValuation,
}

impl ValuationReport {
    pub fn result_for(&self, model: ValuationModel) -> Option<&ValuationResult> {
        self.results.iter().find(|r| r.model() == model)
    }
}
