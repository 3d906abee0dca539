use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::ScenarioType;
use crate::assets::AssetCategory;

/// Six-month total shock for a category under a scenario, as a fraction.
pub fn scenario_impact(scenario: ScenarioType, category: AssetCategory) -> Decimal {
    use AssetCategory::*;
    use ScenarioType::*;

    match (scenario, category) {
        (Recession, Stocks) => dec!(-0.22),
        (Recession, LongBonds) => dec!(0.10),
        (Recession, IntermediateBonds) => dec!(0.05),
        (Recession, Gold) => dec!(0.12),
        (Recession, Commodities) => dec!(-0.15),
        (Recession, Other) => dec!(-0.10),

        (InflationSpike, Stocks) => dec!(-0.10),
        (InflationSpike, LongBonds) => dec!(-0.15),
        (InflationSpike, IntermediateBonds) => dec!(-0.07),
        (InflationSpike, Gold) => dec!(0.18),
        (InflationSpike, Commodities) => dec!(0.25),
        (InflationSpike, Other) => dec!(-0.05),

        (InterestRateHike, Stocks) => dec!(-0.12),
        (InterestRateHike, LongBonds) => dec!(-0.18),
        (InterestRateHike, IntermediateBonds) => dec!(-0.08),
        (InterestRateHike, Gold) => dec!(-0.05),
        (InterestRateHike, Commodities) => dec!(-0.03),
        (InterestRateHike, Other) => dec!(-0.06),

        (BullMarket, Stocks) => dec!(0.25),
        (BullMarket, LongBonds) => dec!(-0.02),
        (BullMarket, IntermediateBonds) => dec!(0.01),
        (BullMarket, Gold) => dec!(-0.05),
        (BullMarket, Commodities) => dec!(0.08),
        (BullMarket, Other) => dec!(0.12),

        (WarEnergyCrisis, Stocks) => dec!(-0.15),
        (WarEnergyCrisis, LongBonds) => dec!(0.05),
        (WarEnergyCrisis, IntermediateBonds) => dec!(0.02),
        (WarEnergyCrisis, Gold) => dec!(0.20),
        (WarEnergyCrisis, Commodities) => dec!(0.35),
        (WarEnergyCrisis, Other) => dec!(-0.08),
    }
}

/// Fixed guidance text for a scenario. Not derived from the portfolio.
pub fn scenario_recommendation(scenario: ScenarioType) -> &'static str {
    match scenario {
        ScenarioType::Recession => {
            "Consider increasing allocation to long-term treasuries and gold to cushion equity \
             drawdowns. Reduce exposure to cyclical sectors and commodities."
        }
        ScenarioType::InflationSpike => {
            "Consider adding commodities and gold as inflation hedges. Shorten bond duration \
             and favor companies with pricing power."
        }
        ScenarioType::InterestRateHike => {
            "Consider shortening bond duration and trimming rate-sensitive growth stocks. \
             Cash and short-term instruments become more attractive."
        }
        ScenarioType::BullMarket => {
            "Consider rebalancing to lock in equity gains and keep allocations within target \
             ranges. Avoid chasing momentum with excess concentration."
        }
        ScenarioType::WarEnergyCrisis => {
            "Consider energy and commodity exposure plus gold as safe-haven assets. Limit \
             exposure to energy-intensive sectors."
        }
    }
}
