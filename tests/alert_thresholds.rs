// tests/alert_thresholds.rs
// IMD band boundaries and random sampling across the rainfall range.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crop_advisor::alerts::{
    classify, classify_daily, AlertLabel, DailyAlert, ALERT_RULES, DAILY_RAIN_ALERT_MM,
    HEAVY_RAIN_MAX_MM, HEAVY_RAIN_MIN_MM,
};

#[test]
fn band_edges() {
    let cases = [
        (0.0, AlertLabel::None),
        (64.4, AlertLabel::None),
        (HEAVY_RAIN_MIN_MM, AlertLabel::HeavyRainfall),
        (100.0, AlertLabel::HeavyRainfall),
        (HEAVY_RAIN_MAX_MM, AlertLabel::HeavyRainfall),
        (115.6, AlertLabel::VeryHeavyRainfall),
        (400.0, AlertLabel::VeryHeavyRainfall),
    ];
    for (mm, want) in cases {
        assert_eq!(classify(mm, "Overcast"), want, "rain {mm} mm");
    }
}

#[test]
fn random_rainfall_lands_in_exactly_one_band() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    for _ in 0..2_000 {
        let mm: f64 = rng.random_range(0.0..300.0);
        let got = classify(mm, "Sunny");
        let want = if mm > HEAVY_RAIN_MAX_MM {
            AlertLabel::VeryHeavyRainfall
        } else if mm >= HEAVY_RAIN_MIN_MM {
            AlertLabel::HeavyRainfall
        } else {
            AlertLabel::None
        };
        assert_eq!(got, want, "rain {mm} mm");

        // storm wording never overrides a rainfall band
        let stormy = classify(mm, "Severe THUNDERSTORM");
        if want.is_rainfall() {
            assert_eq!(stormy, want);
        } else {
            assert_eq!(stormy, AlertLabel::StormCondition);
        }
    }
}

#[test]
fn rule_table_is_ordered_rainfall_first() {
    let labels: Vec<AlertLabel> = ALERT_RULES.iter().map(|r| r.label).collect();
    assert_eq!(
        labels,
        [
            AlertLabel::HeavyRainfall,
            AlertLabel::VeryHeavyRainfall,
            AlertLabel::StormCondition
        ]
    );
}

#[test]
fn daily_alert_uses_sum_or_weather_code() {
    assert_eq!(classify_daily(DAILY_RAIN_ALERT_MM, 1), DailyAlert::None);
    assert_eq!(classify_daily(20.1, 1), DailyAlert::StormOrRain);
    for code in [61, 63, 65, 95, 96, 99] {
        assert_eq!(classify_daily(0.0, code), DailyAlert::StormOrRain, "code {code}");
    }
    assert_eq!(classify_daily(5.0, 80), DailyAlert::None);
}
