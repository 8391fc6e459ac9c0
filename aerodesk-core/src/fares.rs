use serde::{Deserialize, Serialize};

/// Fare class with its flat-rate amount. Pricing is a fixed table per
/// class; flights carry no base fare of their own.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FareClass {
    Economy,
    Business,
    Vip,
}

impl FareClass {
    /// Parse caller input. Matching is case-insensitive and anything
    /// unrecognized (including blank) folds to Economy rather than erroring.
    pub fn from_input(value: &str) -> Self {
        let v = value.trim();
        if v.eq_ignore_ascii_case("vip") {
            FareClass::Vip
        } else if v.eq_ignore_ascii_case("business") {
            FareClass::Business
        } else {
            FareClass::Economy
        }
    }

    /// Flat fare amount for this class
    pub fn amount(&self) -> i64 {
        match self {
            FareClass::Economy => 15_000,
            FareClass::Business => 30_000,
            FareClass::Vip => 50_000,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FareClass::Economy => "Economy",
            FareClass::Business => "Business",
            FareClass::Vip => "VIP",
        }
    }
}

impl std::fmt::Display for FareClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
