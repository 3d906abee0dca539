//! Classification of holdings into the scenario shock categories.
//!
//! Symbols are matched against a static lookup table; anything not listed
//! falls into `Other`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Broad asset category used by the scenario impact matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCategory {
    Stocks,
    LongBonds,
    IntermediateBonds,
    Gold,
    Commodities,
    Other,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 6] = [
        AssetCategory::Stocks,
        AssetCategory::LongBonds,
        AssetCategory::IntermediateBonds,
        AssetCategory::Gold,
        AssetCategory::Commodities,
        AssetCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetCategory::Stocks => "stocks",
            AssetCategory::LongBonds => "long_bonds",
            AssetCategory::IntermediateBonds => "intermediate_bonds",
            AssetCategory::Gold => "gold",
            AssetCategory::Commodities => "commodities",
            AssetCategory::Other => "other",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::unknown("asset category", s))
    }
}

/// Maps a ticker to its scenario category. Matching is case-insensitive.
pub fn classify_symbol(symbol: &str) -> AssetCategory {
    match symbol.trim().to_uppercase().as_str() {
        // Broad equity index funds
        "VTI" | "VOO" | "SPY" | "IVV" | "QQQ" | "VT" | "VXUS" | "VEA" | "VWO" | "IWM" | "SCHB"
        | "ITOT" | "VUG" | "VTV" | "DIA" => AssetCategory::Stocks,
        // Large-cap single names
        "AAPL" | "MSFT" | "GOOGL" | "GOOG" | "AMZN" | "NVDA" | "META" | "TSLA" | "BRK.B"
        | "JPM" | "JNJ" | "V" | "XOM" => AssetCategory::Stocks,
        // Treasuries 20y+
        "TLT" | "EDV" | "VGLT" | "ZROZ" | "SPTL" | "BLV" => AssetCategory::LongBonds,
        // Aggregate and 3-10y bond funds
        "IEF" | "BND" | "AGG" | "VGIT" | "SCHZ" | "BIV" | "IEI" | "GOVT" => {
            AssetCategory::IntermediateBonds
        }
        "GLD" | "IAU" | "SGOL" | "GLDM" | "BAR" => AssetCategory::Gold,
        "DBC" | "GSG" | "PDBC" | "DJP" | "COMT" | "USO" | "BNO" | "DBA" => {
            AssetCategory::Commodities
        }
        _ => AssetCategory::Other,
    }
}
