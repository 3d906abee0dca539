use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assets::AssetCategory;
use crate::errors::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScenarioType {
    Recession,
    InflationSpike,
    InterestRateHike,
    BullMarket,
    WarEnergyCrisis,
}

impl ScenarioType {
    pub const ALL: [ScenarioType; 5] = [
        ScenarioType::Recession,
        ScenarioType::InflationSpike,
        ScenarioType::InterestRateHike,
        ScenarioType::BullMarket,
        ScenarioType::WarEnergyCrisis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioType::Recession => "RECESSION",
            ScenarioType::InflationSpike => "INFLATION_SPIKE",
            ScenarioType::InterestRateHike => "INTEREST_RATE_HIKE",
            ScenarioType::BullMarket => "BULL_MARKET",
            ScenarioType::WarEnergyCrisis => "WAR_ENERGY_CRISIS",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ScenarioType::Recession => "Recession",
            ScenarioType::InflationSpike => "Inflation Spike",
            ScenarioType::InterestRateHike => "Interest Rate Hike",
            ScenarioType::BullMarket => "Bull Market",
            ScenarioType::WarEnergyCrisis => "War / Energy Crisis",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScenarioType::Recession => {
                "Economic contraction with falling earnings and a flight to safety."
            }
            ScenarioType::InflationSpike => {
                "Sharp rise in consumer prices eroding the real value of fixed income."
            }
            ScenarioType::InterestRateHike => {
                "Aggressive central bank tightening that reprices duration and equities."
            }
            ScenarioType::BullMarket => "Broad risk-on rally led by equities.",
            ScenarioType::WarEnergyCrisis => {
                "Geopolitical conflict driving an energy supply shock."
            }
        }
    }
}

impl fmt::Display for ScenarioType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
        ScenarioType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| Error::unknown("scenario type", s))
    }
}

/// One holding in a scenario snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPosition {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    /// Percentage of the portfolio (0-100)
    pub allocation: Decimal,
}

impl PortfolioPosition {
    pub fn new(symbol: impl Into<String>, allocation: Decimal) -> Self {
        let symbol = symbol.into();
        Self {
            name: symbol.clone(),
            symbol,
            allocation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    #[serde(alias = "total_value")]
    pub total_value: Decimal,
    pub assets: Vec<PortfolioPosition>,
}

/// Currency value of one holding at a point in the scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetValue {
    pub symbol: String,
    pub name: String,
    pub category: AssetCategory,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryPoint {
    /// "Start", then "Month 1" through "Month 6"
    pub label: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPerformance {
    pub symbol: String,
    pub name: String,
    pub category: AssetCategory,
    /// Fractional change over the horizon (-0.22 = -22%)
    pub change: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub scenario_type: ScenarioType,
    pub initial_value: Decimal,
    pub final_value: Decimal,
    pub value_change: Decimal,
    /// Fractional change of the whole portfolio
    pub percent_change: Decimal,
    pub before_allocation: Vec<AssetValue>,
    pub after_allocation: Vec<AssetValue>,
    pub portfolio_trajectory: Vec<TrajectoryPoint>,
    /// Best performer first
    pub asset_performance: Vec<AssetPerformance>,
    pub recommendation: String,
}

/// Entry in the scenario catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioInfo {
    pub scenario_type: ScenarioType,
    pub name: String,
    pub description: String,
}

impl From<ScenarioType> for ScenarioInfo {
    fn from(scenario_type: ScenarioType) -> Self {
        Self {
            scenario_type,
            name: scenario_type.display_name().to_string(),
            description: scenario_type.description().to_string(),
        }
    }
}
