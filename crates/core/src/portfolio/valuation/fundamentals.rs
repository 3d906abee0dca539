//! Company fundamentals and the per-model input records validated from them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::MissingFundamentalsError;

/// Flat record of company financial figures for one symbol.
///
/// Every field is optional; each valuation model checks for the figures it
/// needs when its typed input record is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Fundamentals {
    pub revenue: Option<Decimal>,
    pub net_income: Option<Decimal>,
    pub free_cash_flow: Option<Decimal>,
    pub ebitda: Option<Decimal>,
    pub total_debt: Option<Decimal>,
    pub total_cash: Option<Decimal>,
    pub shares_outstanding: Option<Decimal>,
    pub book_value_per_share: Option<Decimal>,
    pub dividend_per_share: Option<Decimal>,
    pub eps: Option<Decimal>,
    /// Fractional year-over-year earnings growth (0.12 = 12%)
    pub earnings_growth: Option<Decimal>,
    pub gross_margin: Option<Decimal>,
    pub operating_margin: Option<Decimal>,
    pub profit_margin: Option<Decimal>,
    pub roe: Option<Decimal>,
    pub roa: Option<Decimal>,
}

fn require(
    value: Option<Decimal>,
    model: &'static str,
    field: &'static str,
) -> Result<Decimal, MissingFundamentalsError> {
    value.ok_or(MissingFundamentalsError { model, field })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DcfInputs {
    pub free_cash_flow: Decimal,
    pub shares_outstanding: Decimal,
}

impl TryFrom<&Fundamentals> for DcfInputs {
    type Error = MissingFundamentalsError;

    fn try_from(f: &Fundamentals) -> Result<Self, Self::Error> {
        const MODEL: &str = "DCF";
        Ok(Self {
            free_cash_flow: require(f.free_cash_flow, MODEL, "freeCashFlow")?,
            shares_outstanding: require(f.shares_outstanding, MODEL, "sharesOutstanding")?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DdmInputs {
    pub dividend_per_share: Decimal,
}

impl TryFrom<&Fundamentals> for DdmInputs {
    type Error = MissingFundamentalsError;

    fn try_from(f: &Fundamentals) -> Result<Self, Self::Error> {
        Ok(Self {
            dividend_per_share: require(
                f.dividend_per_share,
                "Dividend Discount Model",
                "dividendPerShare",
            )?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrahamInputs {
    pub eps: Decimal,
    pub book_value_per_share: Decimal,
}

impl TryFrom<&Fundamentals> for GrahamInputs {
    type Error = MissingFundamentalsError;

    fn try_from(f: &Fundamentals) -> Result<Self, Self::Error> {
        const MODEL: &str = "Graham Formula";
        Ok(Self {
            eps: require(f.eps, MODEL, "eps")?,
            book_value_per_share: require(f.book_value_per_share, MODEL, "bookValuePerShare")?,
        })
    }
}

/// Inputs for the multiples snapshot. Only the figures behind P/E and P/B are
/// mandatory since they drive the valuation label; the rest widen the report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioInputs {
    pub eps: Decimal,
    pub book_value_per_share: Decimal,
    pub shares_outstanding: Decimal,
    pub revenue: Option<Decimal>,
    pub net_income: Option<Decimal>,
    pub ebitda: Option<Decimal>,
    pub total_debt: Decimal,
    pub total_cash: Decimal,
    pub earnings_growth: Option<Decimal>,
    pub gross_margin: Option<Decimal>,
    pub operating_margin: Option<Decimal>,
    pub profit_margin: Option<Decimal>,
}

impl TryFrom<&Fundamentals> for RatioInputs {
    type Error = MissingFundamentalsError;

    fn try_from(f: &Fundamentals) -> Result<Self, Self::Error> {
        const MODEL: &str = "Valuation Ratios";
        Ok(Self {
            eps: require(f.eps, MODEL, "eps")?,
            book_value_per_share: require(f.book_value_per_share, MODEL, "bookValuePerShare")?,
            shares_outstanding: require(f.shares_outstanding, MODEL, "sharesOutstanding")?,
            revenue: f.revenue,
            net_income: f.net_income,
            ebitda: f.ebitda,
            total_debt: f.total_debt.unwrap_or_default(),
            total_cash: f.total_cash.unwrap_or_default(),
            earnings_growth: f.earnings_growth,
            gross_margin: f.gross_margin,
            operating_margin: f.operating_margin,
            profit_margin: f.profit_margin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_dcf_inputs_name_the_first_missing_field() {
        let fundamentals = Fundamentals {
            free_cash_flow: Some(dec!(1000)),
            ..Default::default()
        };
        let err = DcfInputs::try_from(&fundamentals).unwrap_err();
        assert_eq!(err.model, "DCF");
        assert_eq!(err.field, "sharesOutstanding");
        assert_eq!(err.to_string(), "DCF requires 'sharesOutstanding'");
    }

    #[test]
    fn test_graham_inputs_from_complete_record() {
        let fundamentals = Fundamentals {
            eps: Some(dec!(10)),
            book_value_per_share: Some(dec!(50)),
            ..Default::default()
        };
        let inputs = GrahamInputs::try_from(&fundamentals).unwrap();
        assert_eq!(inputs.eps, dec!(10));
        assert_eq!(inputs.book_value_per_share, dec!(50));
    }

    #[test]
    fn test_ratio_inputs_default_debt_and_cash_to_zero() {
        let fundamentals = Fundamentals {
            eps: Some(dec!(5)),
            book_value_per_share: Some(dec!(20)),
            shares_outstanding: Some(dec!(1000)),
            ..Default::default()
        };
        let inputs = RatioInputs::try_from(&fundamentals).unwrap();
        assert_eq!(inputs.total_debt, Decimal::ZERO);
        assert_eq!(inputs.total_cash, Decimal::ZERO);
        assert!(inputs.revenue.is_none());
    }

    #[test]
    fn test_ddm_requires_dividend() {
        let err = DdmInputs::try_from(&Fundamentals::default()).unwrap_err();
        assert_eq!(err.field, "dividendPerShare");
    }

    #[test]
    fn test_deserializes_partial_camel_case_record() {
        let json = r#"{"freeCashFlow": 2500.5, "sharesOutstanding": 100, "eps": 3.2}"#;
        let fundamentals: Fundamentals = serde_json::from_str(json).unwrap();
        assert_eq!(fundamentals.free_cash_flow, Some(dec!(2500.5)));
        assert_eq!(fundamentals.shares_outstanding, Some(dec!(100)));
        assert_eq!(fundamentals.eps, Some(dec!(3.2)));
        assert!(fundamentals.dividend_per_share.is_none());
    }
}
