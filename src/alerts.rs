//! Forecast alert rules.
//!
//! Hourly samples are checked against an ordered rule table (first match wins):
//! - `heavy_rainfall`:      64.5 mm <= rain <= 115.5 mm (IMD "heavy")
//! - `very_heavy_rainfall`: rain > 115.5 mm (IMD "very heavy")
//! - `storm_condition`:     condition text mentions "storm" or "thunder" (case-insensitive)
//!
//! A sample that already tripped a rainfall rule is never checked for storm wording.
//! Daily outlook rows use their own rule (`classify_daily`).

use serde::{Deserialize, Serialize};

/// Lower inclusive bound of the IMD heavy rainfall band (mm).
pub const HEAVY_RAIN_MIN_MM: f64 = 64.5;
/// Upper inclusive bound of the IMD heavy rainfall band (mm); anything above is very heavy.
pub const HEAVY_RAIN_MAX_MM: f64 = 115.5;

const STORM_KEYWORDS: &[&str] = &["storm", "thunder"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLabel {
    #[default]
    None,
    HeavyRainfall,
    VeryHeavyRainfall,
    StormCondition,
}

impl AlertLabel {
    /// Display text shown next to a forecast line; empty when there is no alert.
    pub fn message(self) -> &'static str {
        match self {
            AlertLabel::None => "",
            AlertLabel::HeavyRainfall => "⚠️ Heavy Rainfall Alert (IMD)",
            AlertLabel::VeryHeavyRainfall => "⚠️ Very Heavy Rainfall Alert (IMD)",
            AlertLabel::StormCondition => "⚠️ Thunderstorm Alert",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AlertLabel::None => "none",
            AlertLabel::HeavyRainfall => "heavy_rainfall",
            AlertLabel::VeryHeavyRainfall => "very_heavy_rainfall",
            AlertLabel::StormCondition => "storm_condition",
        }
    }

    pub fn is_alert(self) -> bool {
        self != AlertLabel::None
    }

    pub fn is_rainfall(self) -> bool {
        matches!(
            self,
            AlertLabel::HeavyRainfall | AlertLabel::VeryHeavyRainfall
        )
    }
}

#[derive(Debug, Clone, Copy)]
enum When {
    RainBetween { min_mm: f64, max_mm: f64 },
    RainAbove { mm: f64 },
    ConditionMentions(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct AlertRule {
    pub name: &'static str,
    when: When,
    pub label: AlertLabel,
}

impl AlertRule {
    fn matches(&self, precipitation_mm: f64, condition_lower: &str) -> bool {
        match self.when {
            When::RainBetween { min_mm, max_mm } => {
                (min_mm..=max_mm).contains(&precipitation_mm)
            }
            When::RainAbove { mm } => precipitation_mm > mm,
            When::ConditionMentions(words) => words.iter().any(|w| condition_lower.contains(w)),
        }
    }
}

/// Evaluation order matters: rainfall bands dominate condition wording.
pub static ALERT_RULES: [AlertRule; 3] = [
    AlertRule {
        name: "imd_heavy_rainfall",
        when: When::RainBetween {
            min_mm: HEAVY_RAIN_MIN_MM,
            max_mm: HEAVY_RAIN_MAX_MM,
        },
        label: AlertLabel::HeavyRainfall,
    },
    AlertRule {
        name: "imd_very_heavy_rainfall",
        when: When::RainAbove {
            mm: HEAVY_RAIN_MAX_MM,
        },
        label: AlertLabel::VeryHeavyRainfall,
    },
    AlertRule {
        name: "storm_wording",
        when: When::ConditionMentions(STORM_KEYWORDS),
        label: AlertLabel::StormCondition,
    },
];

/// Map one hourly `(rain, condition)` pair to at most one alert.
pub fn classify(precipitation_mm: f64, condition_text: &str) -> AlertLabel {
    let condition = condition_text.to_lowercase();
    ALERT_RULES
        .iter()
        .find(|rule| rule.matches(precipitation_mm, &condition))
        .map(|rule| rule.label)
        .unwrap_or_default()
}

// --- daily outlook ---

/// Daily precipitation sum above which a day is flagged (mm).
pub const DAILY_RAIN_ALERT_MM: f64 = 20.0;

/// WMO weather codes for moderate/heavy rain and thunderstorms.
pub const STORM_RAIN_WEATHER_CODES: &[u16] = &[61, 63, 65, 95, 96, 99];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DailyAlert {
    #[default]
    None,
    StormOrRain,
}

impl DailyAlert {
    pub fn message(self) -> &'static str {
        match self {
            DailyAlert::None => "",
            DailyAlert::StormOrRain => "⚠️ Storm/Rain Alert",
        }
    }

    pub fn is_alert(self) -> bool {
        self != DailyAlert::None
    }
}

pub fn classify_daily(precipitation_sum_mm: f64, weather_code: u16) -> DailyAlert {
    if precipitation_sum_mm > DAILY_RAIN_ALERT_MM || STORM_RAIN_WEATHER_CODES.contains(&weather_code)
    {
        DailyAlert::StormOrRain
    } else {
        DailyAlert::None
    }
}
