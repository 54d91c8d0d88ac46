use serde::{Deserialize, Serialize};

/// Named budget-bracket vocabularies. The two CRM call sites disagree on the
/// top buckets, so both are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketTable {
    /// Six buckets up to `2m-plus`.
    #[default]
    Standard,
    /// Five buckets ending in an open `1m-2m`.
    Compact,
}

impl BracketTable {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "standard" | "six" | "6" => Some(Self::Standard),
            "compact" | "five" | "5" => Some(Self::Compact),
            _ => None,
        }
    }

    fn bounds(self) -> &'static [(f64, BudgetBracket)] {
        match self {
            Self::Standard => &[
                (500_000.0, BudgetBracket::Under500k),
                (750_000.0, BudgetBracket::From500kTo750k),
                (1_000_000.0, BudgetBracket::From750kTo1m),
                (1_500_000.0, BudgetBracket::From1mTo1Point5m),
                (2_000_000.0, BudgetBracket::From1Point5mTo2m),
                (f64::INFINITY, BudgetBracket::Over2m),
            ],
            Self::Compact => &[
                (300_000.0, BudgetBracket::Under300k),
                (500_000.0, BudgetBracket::From300kTo500k),
                (750_000.0, BudgetBracket::From500kTo750k),
                (1_000_000.0, BudgetBracket::From750kTo1m),
                (f64::INFINITY, BudgetBracket::From1mTo2m),
            ],
        }
    }

    pub fn bracket_for(self, price: f64) -> BudgetBracket {
        let bounds = self.bounds();
        bounds
            .iter()
            .find(|(upper, _)| price < *upper)
            .map(|(_, bracket)| *bracket)
            .unwrap_or(bounds[bounds.len() - 1].1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetBracket {
    Under300k,
    From300kTo500k,
    Under500k,
    From500kTo750k,
    From750kTo1m,
    From1mTo1Point5m,
    From1Point5mTo2m,
    From1mTo2m,
    Over2m,
}

impl BudgetBracket {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Under300k => "under-300k",
            Self::From300kTo500k => "300k-500k",
            Self::Under500k => "under-500k",
            Self::From500kTo750k => "500k-750k",
            Self::From750kTo1m => "750k-1m",
            Self::From1mTo1Point5m => "1m-1.5m",
            Self::From1Point5mTo2m => "1.5m-2m",
            Self::From1mTo2m => "1m-2m",
            Self::Over2m => "2m-plus",
        }
    }
}
