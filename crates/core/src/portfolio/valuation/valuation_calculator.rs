use log::debug;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

use crate::constants::DECIMAL_PRECISION;
use crate::errors::{Error, Result};
use crate::utils::in_range;

use super::fundamentals::{DcfInputs, DdmInputs, Fundamentals, GrahamInputs, RatioInputs};
use super::valuation_model::*;

const GRAHAM_MULTIPLIER: Decimal = dec!(22.5);
const MAX_PROJECTION_YEARS: u32 = 30;

const UNDERVALUED_PE: Decimal = dec!(15);
const UNDERVALUED_PB: Decimal = dec!(2);
const OVERVALUED_PE: Decimal = dec!(25);
const OVERVALUED_PB: Decimal = dec!(4);

/// Runs one valuation model, or every model under [`ValuationModel::All`], and
/// aggregates the signals into an overall recommendation.
///
/// A single-model request fails when that model cannot run. Under `All`, a
/// model that fails is listed in `skipped` instead, and the report is only an
/// error when the price itself is invalid.
pub fn valuate(
    symbol: &str,
    current_price: Decimal,
    fundamentals: &Fundamentals,
    model: ValuationModel,
    assumptions: &ValuationAssumptions,
) -> Result<ValuationReport> {
    validate_price(current_price)?;

    let mut results = Vec::new();
    let mut skipped = Vec::new();

    match model {
        ValuationModel::All => {
            for m in ValuationModel::MODELS {
                match run_model(m, current_price, fundamentals, assumptions) {
                    Ok(result) => results.push(result),
                    Err(e) => {
                        debug!("Skipping {} for {}: {}", m.display_name(), symbol, e);
                        skipped.push(SkippedModel {
                            model: m,
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }
        single => results.push(run_model(single, current_price, fundamentals, assumptions)?),
    }

    let overall = overall_valuation(symbol, &results);

    Ok(ValuationReport {
        symbol: symbol.to_string(),
        current_price,
        results,
        skipped,
        overall,
    })
}

fn run_model(
    model: ValuationModel,
    current_price: Decimal,
    fundamentals: &Fundamentals,
    assumptions: &ValuationAssumptions,
) -> Result<ValuationResult> {
    match model {
        ValuationModel::Dcf => {
            let inputs = DcfInputs::try_from(fundamentals)?;
            dcf_valuation(current_price, &inputs, assumptions).map(ValuationResult::Dcf)
        }
        ValuationModel::DividendDiscount => {
            let inputs = DdmInputs::try_from(fundamentals)?;
            dividend_discount_valuation(current_price, &inputs, assumptions)
                .map(ValuationResult::DividendDiscount)
        }
        ValuationModel::Graham => {
            let inputs = GrahamInputs::try_from(fundamentals)?;
            graham_valuation(current_price, &inputs).map(ValuationResult::Graham)
        }
        ValuationModel::Ratios => {
            let inputs = RatioInputs::try_from(fundamentals)?;
            ratio_valuation(current_price, &inputs).map(ValuationResult::Ratios)
        }
        ValuationModel::All => Err(Error::invalid_input(
            "'all' is not a single valuation model",
        )),
    }
}

fn validate_price(current_price: Decimal) -> Result<()> {
    if current_price <= Decimal::ZERO {
        return Err(Error::invalid_input(format!(
            "Current price must be positive, got {}",
            current_price
        )));
    }
    Ok(())
}

/// Percent difference between intrinsic value and price.
fn upside(intrinsic_value: Decimal, current_price: Decimal) -> Result<Decimal> {
    let difference = in_range(intrinsic_value.checked_sub(current_price), "Upside")?;
    let upside = in_range(
        difference
            .checked_div(current_price)
            .and_then(|ratio| ratio.checked_mul(dec!(100))),
        "Upside",
    )?;
    Ok(upside.round_dp(DECIMAL_PRECISION))
}

/// Two-stage discounted cash flow: free cash flow grows at `growth_rate` for
/// the projection window, then at `terminal_growth_rate` forever.
pub fn dcf_valuation(
    current_price: Decimal,
    inputs: &DcfInputs,
    assumptions: &ValuationAssumptions,
) -> Result<DcfValuation> {
    validate_price(current_price)?;

    let discount_rate = assumptions.discount_rate;
    let terminal_growth = assumptions.terminal_growth_rate;
    let years = assumptions.projection_years;

    if discount_rate <= terminal_growth {
        return Err(Error::invalid_input(format!(
            "Discount rate ({}) must exceed terminal growth rate ({})",
            discount_rate, terminal_growth
        )));
    }
    if inputs.shares_outstanding <= Decimal::ZERO {
        return Err(Error::invalid_input("Shares outstanding must be positive"));
    }
    if years == 0 || years > MAX_PROJECTION_YEARS {
        return Err(Error::invalid_input(format!(
            "Projection years must be between 1 and {}, got {}",
            MAX_PROJECTION_YEARS, years
        )));
    }
    if discount_rate <= dec!(-1) || assumptions.growth_rate <= dec!(-1) {
        return Err(Error::invalid_input(
            "Growth and discount rates must be greater than -100%",
        ));
    }

    let growth_factor = in_range(Decimal::ONE.checked_add(assumptions.growth_rate), "Growth factor")?;
    let discount_factor = in_range(Decimal::ONE.checked_add(discount_rate), "Discount factor")?;

    let mut projected_cash_flows = Vec::with_capacity(years as usize);
    let mut present_value = Decimal::ZERO;
    let mut cash_flow = inputs.free_cash_flow;
    let mut discount = Decimal::ONE;

    for year in 1..=years {
        cash_flow = in_range(cash_flow.checked_mul(growth_factor), "Projected cash flow")?;
        discount = in_range(discount.checked_mul(discount_factor), "Discount factor")?;
        if discount.is_zero() {
            return Err(Error::invalid_input(format!(
                "Discount factor vanishes by year {} at a discount rate of {}",
                year, discount_rate
            )));
        }
        let discounted = in_range(cash_flow.checked_div(discount), "Discounted cash flow")?;
        present_value = in_range(present_value.checked_add(discounted), "Present value")?;
        projected_cash_flows.push(cash_flow.round_dp(DECIMAL_PRECISION));
    }

    let spread = in_range(discount_rate.checked_sub(terminal_growth), "Terminal spread")?;
    let terminal_value = in_range(
        Decimal::ONE
            .checked_add(terminal_growth)
            .and_then(|factor| cash_flow.checked_mul(factor))
            .and_then(|value| value.checked_div(spread)),
        "Terminal value",
    )?;
    let enterprise_value = in_range(
        terminal_value
            .checked_div(discount)
            .and_then(|value| value.checked_add(present_value)),
        "Enterprise value",
    )?;
    let intrinsic_value = in_range(
        enterprise_value.checked_div(inputs.shares_outstanding),
        "Intrinsic value",
    )?;

    debug!(
        "DCF: pv_cash_flows={}, terminal_value={}, intrinsic={}",
        present_value, terminal_value, intrinsic_value
    );

    Ok(DcfValuation {
        intrinsic_value: intrinsic_value.round_dp(DECIMAL_PRECISION),
        current_price,
        upside: upside(intrinsic_value, current_price)?,
        growth_rate: assumptions.growth_rate,
        discount_rate,
        terminal_growth_rate: terminal_growth,
        projected_cash_flows,
        terminal_value: terminal_value.round_dp(DECIMAL_PRECISION),
        enterprise_value: enterprise_value.round_dp(DECIMAL_PRECISION),
        recommendation: RecommendationThresholds::DCF.classify(intrinsic_value, current_price),
    })
}

/// Single-stage Gordon growth: `D × (1 + g) / (r − g)`.
pub fn dividend_discount_valuation(
    current_price: Decimal,
    inputs: &DdmInputs,
    assumptions: &ValuationAssumptions,
) -> Result<DividendDiscountValuation> {
    validate_price(current_price)?;

    let required_return = assumptions.required_return;
    let growth = assumptions.dividend_growth_rate;

    if required_return <= growth {
        return Err(Error::invalid_input(format!(
            "Required return ({}) must exceed dividend growth rate ({})",
            required_return, growth
        )));
    }
    if inputs.dividend_per_share <= Decimal::ZERO {
        return Err(Error::invalid_input(
            "Dividend discount model requires a positive dividend per share",
        ));
    }

    let spread = in_range(required_return.checked_sub(growth), "Dividend discount spread")?;
    let intrinsic_value = in_range(
        Decimal::ONE
            .checked_add(growth)
            .and_then(|factor| inputs.dividend_per_share.checked_mul(factor))
            .and_then(|value| value.checked_div(spread)),
        "Dividend discount value",
    )?;

    Ok(DividendDiscountValuation {
        intrinsic_value: intrinsic_value.round_dp(DECIMAL_PRECISION),
        current_price,
        upside: upside(intrinsic_value, current_price)?,
        dividend_per_share: inputs.dividend_per_share,
        required_return,
        growth_rate: growth,
        recommendation: RecommendationThresholds::DIVIDEND_DISCOUNT
            .classify(intrinsic_value, current_price),
    })
}

/// Graham number: `sqrt(22.5 × EPS × BVPS)`.
pub fn graham_valuation(current_price: Decimal, inputs: &GrahamInputs) -> Result<GrahamValuation> {
    validate_price(current_price)?;

    if inputs.eps <= Decimal::ZERO || inputs.book_value_per_share <= Decimal::ZERO {
        return Err(Error::invalid_input(format!(
            "Graham formula requires positive EPS and book value per share, got {} and {}",
            inputs.eps, inputs.book_value_per_share
        )));
    }

    let product = in_range(
        GRAHAM_MULTIPLIER
            .checked_mul(inputs.eps)
            .and_then(|value| value.checked_mul(inputs.book_value_per_share)),
        "Graham product",
    )?;
    let intrinsic_value = product
        .sqrt()
        .ok_or_else(|| Error::invalid_input("Graham number could not be computed"))?;

    Ok(GrahamValuation {
        intrinsic_value: intrinsic_value.round_dp(DECIMAL_PRECISION),
        current_price,
        upside: upside(intrinsic_value, current_price)?,
        eps: inputs.eps,
        book_value_per_share: inputs.book_value_per_share,
        recommendation: RecommendationThresholds::GRAHAM.classify(intrinsic_value, current_price),
    })
}

/// `numerator / denominator`, undefined for a non-positive denominator or a
/// quotient that does not fit in a `Decimal`.
fn ratio(numerator: Decimal, denominator: Option<Decimal>) -> Option<Decimal> {
    denominator
        .filter(|d| *d > Decimal::ZERO)
        .and_then(|d| numerator.checked_div(d))
        .map(|q| q.round_dp(DECIMAL_PRECISION))
}

/// Price and enterprise multiples with a coarse valuation label.
pub fn ratio_valuation(current_price: Decimal, inputs: &RatioInputs) -> Result<RatioValuation> {
    validate_price(current_price)?;

    if inputs.shares_outstanding <= Decimal::ZERO {
        return Err(Error::invalid_input("Shares outstanding must be positive"));
    }

    let market_cap = in_range(
        current_price.checked_mul(inputs.shares_outstanding),
        "Market capitalization",
    )?;
    let enterprise_value = in_range(
        market_cap
            .checked_add(inputs.total_debt)
            .and_then(|value| value.checked_sub(inputs.total_cash)),
        "Enterprise value",
    )?;

    let pe_ratio = ratio(current_price, Some(inputs.eps));
    let pb_ratio = ratio(current_price, Some(inputs.book_value_per_share));
    let ps_ratio = ratio(market_cap, inputs.revenue);
    let peg_ratio = match (pe_ratio, inputs.earnings_growth) {
        (Some(pe), Some(growth)) if growth > Decimal::ZERO => {
            ratio(pe, growth.checked_mul(dec!(100)))
        }
        _ => None,
    };
    let ev_to_revenue = ratio(enterprise_value, inputs.revenue);
    let ev_to_ebitda = ratio(enterprise_value, inputs.ebitda);

    let profit_margin = inputs.profit_margin.or_else(|| match inputs.net_income {
        Some(net_income) => ratio(net_income, inputs.revenue),
        None => None,
    });

    let valuation = match (pe_ratio, pb_ratio) {
        (Some(pe), Some(pb)) if pe < UNDERVALUED_PE && pb < UNDERVALUED_PB => {
            ValuationLabel::Undervalued
        }
        (pe, pb)
            if pe.is_some_and(|v| v > OVERVALUED_PE) || pb.is_some_and(|v| v > OVERVALUED_PB) =>
        {
            ValuationLabel::Overvalued
        }
        _ => ValuationLabel::FairValue,
    };

    Ok(RatioValuation {
        current_price,
        market_cap: market_cap.round_dp(DECIMAL_PRECISION),
        enterprise_value: enterprise_value.round_dp(DECIMAL_PRECISION),
        pe_ratio,
        pb_ratio,
        ps_ratio,
        peg_ratio,
        ev_to_revenue,
        ev_to_ebitda,
        gross_margin: inputs.gross_margin,
        operating_margin: inputs.operating_margin,
        profit_margin,
        valuation,
    })
}

/// Majority vote between BUY and SELL across the models that produced a
/// signal. Ties and an empty vote resolve to HOLD.
pub fn overall_valuation(symbol: &str, results: &[ValuationResult]) -> OverallValuation {
    let signals: Vec<Recommendation> = results.iter().filter_map(|r| r.recommendation()).collect();

    let buy_count = signals.iter().filter(|r| **r == Recommendation::Buy).count();
    let sell_count = signals.iter().filter(|r| **r == Recommendation::Sell).count();
    let hold_count = signals.len() - buy_count - sell_count;

    let recommendation = match buy_count.cmp(&sell_count) {
        std::cmp::Ordering::Greater => Recommendation::Buy,
        std::cmp::Ordering::Less => Recommendation::Sell,
        std::cmp::Ordering::Equal => Recommendation::Hold,
    };

    let confidence = if signals.is_empty() {
        Decimal::ZERO
    } else {
        (Decimal::from(buy_count.max(sell_count)) / Decimal::from(signals.len()))
            .round_dp(DECIMAL_PRECISION)
    };

    let summary = if signals.is_empty() {
        format!("No valuation model produced a signal for {}.", symbol)
    } else {
        format!(
            "{} of {} models agree on {} for {} ({} BUY, {} SELL, {} HOLD).",
            buy_count.max(sell_count),
            signals.len(),
            recommendation,
            symbol,
            buy_count,
            sell_count,
            hold_count
        )
    };

    OverallValuation {
        recommendation,
        confidence,
        buy_count,
        sell_count,
        hold_count,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graham_fundamentals() -> Fundamentals {
        Fundamentals {
            eps: Some(dec!(10)),
            book_value_per_share: Some(dec!(50)),
            ..Default::default()
        }
    }

    fn full_fundamentals() -> Fundamentals {
        Fundamentals {
            revenue: Some(dec!(50000)),
            net_income: Some(dec!(5000)),
            free_cash_flow: Some(dec!(6000)),
            ebitda: Some(dec!(9000)),
            total_debt: Some(dec!(10000)),
            total_cash: Some(dec!(4000)),
            shares_outstanding: Some(dec!(1000)),
            book_value_per_share: Some(dec!(30)),
            dividend_per_share: Some(dec!(2)),
            eps: Some(dec!(5)),
            earnings_growth: Some(dec!(0.10)),
            ..Default::default()
        }
    }

    #[test]
    fn test_graham_example() {
        let result = graham_valuation(
            dec!(40),
            &GrahamInputs::try_from(&graham_fundamentals()).unwrap(),
        )
        .unwrap();

        // sqrt(22.5 * 10 * 50) = sqrt(11250)
        assert!((result.intrinsic_value - dec!(106.066017)).abs() < dec!(0.0001));
        assert!((result.upside - dec!(165.165)).abs() < dec!(0.01));
        assert_eq!(result.recommendation, Recommendation::Buy);
    }

    #[test]
    fn test_graham_rejects_negative_eps() {
        let inputs = GrahamInputs {
            eps: dec!(-2),
            book_value_per_share: dec!(50),
        };
        assert!(matches!(
            graham_valuation(dec!(40), &inputs),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_dcf_boundary_is_hold() {
        let thresholds = RecommendationThresholds::DCF;
        assert_eq!(thresholds.classify(dec!(115), dec!(100)), Recommendation::Hold);
        assert_eq!(thresholds.classify(dec!(115.01), dec!(100)), Recommendation::Buy);
        assert_eq!(thresholds.classify(dec!(85), dec!(100)), Recommendation::Hold);
        assert_eq!(thresholds.classify(dec!(84.99), dec!(100)), Recommendation::Sell);
    }

    #[test]
    fn test_dcf_projection() {
        let inputs = DcfInputs {
            free_cash_flow: dec!(1000),
            shares_outstanding: dec!(100),
        };
        let assumptions = ValuationAssumptions {
            growth_rate: dec!(0.10),
            discount_rate: dec!(0.10),
            terminal_growth_rate: dec!(0.0),
            projection_years: 2,
            ..Default::default()
        };
        let result = dcf_valuation(dec!(50), &inputs, &assumptions).unwrap();

        // Growth equals discount, so each projected year is worth 1000 today.
        assert_eq!(result.projected_cash_flows, vec![dec!(1100), dec!(1210)]);
        // Terminal value 1210 / 0.10 = 12100, discounted two years = 10000.
        assert_eq!(result.terminal_value, dec!(12100));
        assert_eq!(result.enterprise_value, dec!(12000));
        assert_eq!(result.intrinsic_value, dec!(120));
        assert_eq!(result.upside, dec!(140));
        assert_eq!(result.recommendation, Recommendation::Buy);
    }

    #[test]
    fn test_dcf_negative_cash_flow_signals_sell() {
        let inputs = DcfInputs {
            free_cash_flow: dec!(-500),
            shares_outstanding: dec!(100),
        };
        let result = dcf_valuation(dec!(10), &inputs, &ValuationAssumptions::default()).unwrap();
        assert!(result.intrinsic_value < Decimal::ZERO);
        assert_eq!(result.recommendation, Recommendation::Sell);
    }

    #[test]
    fn test_dcf_rejects_discount_not_above_terminal_growth() {
        let inputs = DcfInputs {
            free_cash_flow: dec!(1000),
            shares_outstanding: dec!(100),
        };
        let assumptions = ValuationAssumptions {
            discount_rate: dec!(0.03),
            terminal_growth_rate: dec!(0.03),
            ..Default::default()
        };
        assert!(matches!(
            dcf_valuation(dec!(50), &inputs, &assumptions),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_dcf_rejects_zero_shares() {
        let inputs = DcfInputs {
            free_cash_flow: dec!(1000),
            shares_outstanding: Decimal::ZERO,
        };
        assert!(dcf_valuation(dec!(50), &inputs, &ValuationAssumptions::default()).is_err());
    }

    #[test]
    fn test_dcf_at_buy_threshold_is_hold() {
        // One year, no growth: 126.5 / 1.1 + (126.5 / 0.1) / 1.1 = 1265, over 11 shares
        let inputs = DcfInputs {
            free_cash_flow: dec!(126.5),
            shares_outstanding: dec!(11),
        };
        let assumptions = ValuationAssumptions {
            growth_rate: Decimal::ZERO,
            discount_rate: dec!(0.10),
            terminal_growth_rate: Decimal::ZERO,
            projection_years: 1,
            ..Default::default()
        };

        let at_threshold = dcf_valuation(dec!(100), &inputs, &assumptions).unwrap();
        assert_eq!(at_threshold.intrinsic_value, dec!(115));
        assert_eq!(at_threshold.recommendation, Recommendation::Hold);

        let just_below = dcf_valuation(dec!(99.99), &inputs, &assumptions).unwrap();
        assert_eq!(just_below.recommendation, Recommendation::Buy);
    }

    #[test]
    fn test_dcf_explosive_growth_is_rejected() {
        let inputs = DcfInputs {
            free_cash_flow: dec!(100000000000),
            shares_outstanding: dec!(1000),
        };
        let assumptions = ValuationAssumptions {
            growth_rate: dec!(9),
            projection_years: 30,
            ..Default::default()
        };
        assert!(matches!(
            dcf_valuation(dec!(10), &inputs, &assumptions),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_dcf_vanishing_discount_factor_is_rejected() {
        let inputs = DcfInputs {
            free_cash_flow: dec!(100000000000),
            shares_outstanding: dec!(1000),
        };
        let assumptions = ValuationAssumptions {
            growth_rate: Decimal::ZERO,
            discount_rate: dec!(-0.9),
            terminal_growth_rate: dec!(-0.95),
            projection_years: 30,
            ..Default::default()
        };
        assert!(matches!(
            dcf_valuation(dec!(10), &inputs, &assumptions),
            Err(Error::InvalidInput(_))
        ));

        // Small enough cash flow to survive the division, so the factor itself hits zero
        let tiny = DcfInputs {
            free_cash_flow: dec!(0.000001),
            shares_outstanding: dec!(1000),
        };
        assert!(matches!(
            dcf_valuation(dec!(10), &tiny, &assumptions),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_graham_overflowing_product_is_rejected() {
        let inputs = GrahamInputs {
            eps: Decimal::MAX,
            book_value_per_share: dec!(2),
        };
        assert!(matches!(
            graham_valuation(dec!(40), &inputs),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_graham_thresholds() {
        let thresholds = RecommendationThresholds::GRAHAM;
        assert_eq!(thresholds.classify(dec!(120), dec!(100)), Recommendation::Hold);
        assert_eq!(thresholds.classify(dec!(120.01), dec!(100)), Recommendation::Buy);
        assert_eq!(thresholds.classify(dec!(80), dec!(100)), Recommendation::Hold);
        assert_eq!(thresholds.classify(dec!(79.99), dec!(100)), Recommendation::Sell);
    }

    #[test]
    fn test_classify_with_extreme_price() {
        let thresholds = RecommendationThresholds::GRAHAM;
        assert_eq!(
            thresholds.classify(Decimal::MAX, Decimal::MAX),
            Recommendation::Hold
        );
    }

    #[test]
    fn test_dividend_discount_thresholds() {
        let thresholds = RecommendationThresholds::DIVIDEND_DISCOUNT;
        assert_eq!(thresholds.classify(dec!(110), dec!(100)), Recommendation::Hold);
        assert_eq!(thresholds.classify(dec!(110.01), dec!(100)), Recommendation::Buy);
        assert_eq!(thresholds.classify(dec!(90), dec!(100)), Recommendation::Hold);
        assert_eq!(thresholds.classify(dec!(89.99), dec!(100)), Recommendation::Sell);
    }

    #[test]
    fn test_dividend_discount_at_thresholds_is_hold() {
        let assumptions = ValuationAssumptions {
            required_return: dec!(0.1),
            dividend_growth_rate: Decimal::ZERO,
            ..Default::default()
        };
        // 11 / 0.1 = 110, exactly 1.10 x price
        let upper = DdmInputs {
            dividend_per_share: dec!(11),
        };
        let result = dividend_discount_valuation(dec!(100), &upper, &assumptions).unwrap();
        assert_eq!(result.intrinsic_value, dec!(110));
        assert_eq!(result.recommendation, Recommendation::Hold);

        // 9 / 0.1 = 90, exactly 0.90 x price
        let lower = DdmInputs {
            dividend_per_share: dec!(9),
        };
        let result = dividend_discount_valuation(dec!(100), &lower, &assumptions).unwrap();
        assert_eq!(result.intrinsic_value, dec!(90));
        assert_eq!(result.recommendation, Recommendation::Hold);
    }

    #[test]
    fn test_dividend_discount_tiny_spread_is_rejected() {
        let assumptions = ValuationAssumptions {
            required_return: dec!(0.0000000000000000000000000001),
            dividend_growth_rate: Decimal::ZERO,
            ..Default::default()
        };
        let inputs = DdmInputs {
            dividend_per_share: dec!(10),
        };
        assert!(matches!(
            dividend_discount_valuation(dec!(100), &inputs, &assumptions),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_dividend_discount() {
        let inputs = DdmInputs {
            dividend_per_share: dec!(2),
        };
        let result =
            dividend_discount_valuation(dec!(30), &inputs, &ValuationAssumptions::default())
                .unwrap();
        // 2 * 1.03 / (0.09 - 0.03) = 34.333333
        assert_eq!(result.intrinsic_value, dec!(34.333333));
        assert_eq!(result.recommendation, Recommendation::Buy);
    }

    #[test]
    fn test_dividend_discount_rejects_required_return_at_growth() {
        let inputs = DdmInputs {
            dividend_per_share: dec!(2),
        };
        let assumptions = ValuationAssumptions {
            required_return: dec!(0.05),
            dividend_growth_rate: dec!(0.05),
            ..Default::default()
        };
        assert!(matches!(
            dividend_discount_valuation(dec!(30), &inputs, &assumptions),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_ratio_valuation() {
        let inputs = RatioInputs::try_from(&full_fundamentals()).unwrap();
        let result = ratio_valuation(dec!(50), &inputs).unwrap();

        assert_eq!(result.market_cap, dec!(50000));
        assert_eq!(result.enterprise_value, dec!(56000));
        assert_eq!(result.pe_ratio, Some(dec!(10)));
        assert_eq!(result.pb_ratio, Some(dec!(1.666667)));
        assert_eq!(result.ps_ratio, Some(dec!(1)));
        assert_eq!(result.peg_ratio, Some(dec!(1)));
        assert_eq!(result.ev_to_revenue, Some(dec!(1.12)));
        assert_eq!(result.ev_to_ebitda, Some(dec!(6.222222)));
        assert_eq!(result.profit_margin, Some(dec!(0.1)));
        assert_eq!(result.valuation, ValuationLabel::Undervalued);
    }

    #[test]
    fn test_ratio_labels() {
        let mut inputs = RatioInputs::try_from(&full_fundamentals()).unwrap();

        // P/E 20, P/B 3.33: neither cheap nor expensive
        let fair = ratio_valuation(dec!(100), &inputs).unwrap();
        assert_eq!(fair.valuation, ValuationLabel::FairValue);

        // P/B above 4 alone is enough
        inputs.eps = dec!(20);
        let rich = ratio_valuation(dec!(150), &inputs).unwrap();
        assert_eq!(rich.valuation, ValuationLabel::Overvalued);
    }

    #[test]
    fn test_ratio_skips_undefined_multiples() {
        let mut inputs = RatioInputs::try_from(&full_fundamentals()).unwrap();
        inputs.eps = dec!(-1);
        inputs.ebitda = Some(Decimal::ZERO);
        inputs.earnings_growth = Some(dec!(0.2));

        let result = ratio_valuation(dec!(50), &inputs).unwrap();
        assert_eq!(result.pe_ratio, None);
        assert_eq!(result.peg_ratio, None);
        assert_eq!(result.ev_to_ebitda, None);
        assert_eq!(result.valuation, ValuationLabel::FairValue);
    }

    #[test]
    fn test_valuate_all_skips_models_missing_inputs() {
        let report = valuate(
            "ACME",
            dec!(40),
            &graham_fundamentals(),
            ValuationModel::All,
            &ValuationAssumptions::default(),
        )
        .unwrap();

        assert_eq!(report.results.len(), 1);
        assert!(report.result_for(ValuationModel::Graham).is_some());
        let skipped: Vec<ValuationModel> = report.skipped.iter().map(|s| s.model).collect();
        assert_eq!(
            skipped,
            vec![
                ValuationModel::Dcf,
                ValuationModel::DividendDiscount,
                ValuationModel::Ratios
            ]
        );
        assert_eq!(report.skipped[0].reason, "Missing fundamentals: DCF requires 'freeCashFlow'");
        assert_eq!(report.overall.recommendation, Recommendation::Buy);
        assert_eq!(report.overall.confidence, Decimal::ONE);
    }

    #[test]
    fn test_valuate_single_model_propagates_missing_field() {
        let err = valuate(
            "ACME",
            dec!(40),
            &graham_fundamentals(),
            ValuationModel::Dcf,
            &ValuationAssumptions::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::MissingFundamentals(crate::errors::MissingFundamentalsError {
                model: "DCF",
                field: "freeCashFlow",
            })
        );
    }

    #[test]
    fn test_valuate_rejects_non_positive_price() {
        let result = valuate(
            "ACME",
            Decimal::ZERO,
            &graham_fundamentals(),
            ValuationModel::All,
            &ValuationAssumptions::default(),
        );
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_valuate_all_runs_every_model() {
        let report = valuate(
            "ACME",
            dec!(50),
            &full_fundamentals(),
            ValuationModel::All,
            &ValuationAssumptions::default(),
        )
        .unwrap();
        assert_eq!(report.results.len(), 4);
        assert!(report.skipped.is_empty());
        let counted =
            report.overall.buy_count + report.overall.sell_count + report.overall.hold_count;
        assert_eq!(counted, 3);
    }

    #[test]
    fn test_overall_tie_is_hold() {
        let buy = ValuationResult::Graham(
            graham_valuation(dec!(40), &GrahamInputs::try_from(&graham_fundamentals()).unwrap())
                .unwrap(),
        );
        let sell = ValuationResult::DividendDiscount(
            dividend_discount_valuation(
                dec!(100),
                &DdmInputs {
                    dividend_per_share: dec!(2),
                },
                &ValuationAssumptions::default(),
            )
            .unwrap(),
        );
        let overall = overall_valuation("ACME", &[buy, sell]);
        assert_eq!(overall.recommendation, Recommendation::Hold);
        assert_eq!(overall.confidence, dec!(0.5));
        assert_eq!(overall.buy_count, 1);
        assert_eq!(overall.sell_count, 1);
    }

    #[test]
    fn test_overall_without_signals() {
        let overall = overall_valuation("ACME", &[]);
        assert_eq!(overall.recommendation, Recommendation::Hold);
        assert_eq!(overall.confidence, Decimal::ZERO);
    }

    #[test]
    fn test_model_names_parse() {
        assert_eq!("DCF".parse::<ValuationModel>().unwrap(), ValuationModel::Dcf);
        assert_eq!(
            "dividend_discount".parse::<ValuationModel>().unwrap(),
            ValuationModel::DividendDiscount
        );
        assert!(matches!(
            "capm".parse::<ValuationModel>(),
            Err(Error::UnknownCategory { .. })
        ));
    }
}
