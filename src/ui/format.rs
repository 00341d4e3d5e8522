//! Number and fixture formatting shared by every widget.

use chrono::{DateTime, Local, Utc};
use fpl_api::Fixture;
use tui::style::{Color, Modifier, Style};

pub const MISSING: &str = "-";

/// Fixed precision, `-` for NaN/infinite.
pub fn fixed(value: f64, decimals: usize) -> String {
    if value.is_finite() {
        format!("{value:.decimals$}")
    } else {
        MISSING.to_string()
    }
}

pub fn optional(value: Option<f64>, decimals: usize) -> String {
    value.map(|v| fixed(v, decimals)).unwrap_or_else(|| MISSING.to_string())
}

/// Rates, form and points-per-game: one decimal.
pub fn rate(value: f64) -> String {
    fixed(value, 1)
}

/// Expected metrics and value figures: two decimals.
pub fn metric(value: f64) -> String {
    fixed(value, 2)
}

pub fn percent(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.1}%")
    } else {
        MISSING.to_string()
    }
}

pub fn cost(value: f64) -> String {
    if value.is_finite() {
        format!("£{value:.1}m")
    } else {
        MISSING.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifficultyBucket {
    Known(u8),
    Unknown,
}

/// Out-of-range and non-finite ratings are unknown. In-range values (which may be
/// averages) round to the nearest bucket.
pub fn difficulty_bucket(difficulty: Option<f64>) -> DifficultyBucket {
    match difficulty {
        Some(d) if d.is_finite() && (1.0..=5.0).contains(&d) => {
            DifficultyBucket::Known(d.round().clamp(1.0, 5.0) as u8)
        }
        _ => DifficultyBucket::Unknown,
    }
}

/// The reported rating as-is; whole numbers without decimals.
pub fn difficulty_label(difficulty: Option<f64>) -> String {
    match difficulty {
        Some(d) if d.is_finite() && d.fract() == 0.0 => format!("{d:.0}"),
        Some(d) if d.is_finite() => format!("{d:.1}"),
        _ => MISSING.to_string(),
    }
}

pub fn difficulty_style(bucket: DifficultyBucket) -> Style {
    match bucket {
        DifficultyBucket::Known(1) => Style::default().fg(Color::Black).bg(Color::Green),
        DifficultyBucket::Known(2) => Style::default().fg(Color::Black).bg(Color::LightGreen),
        DifficultyBucket::Known(3) => Style::default().fg(Color::Black).bg(Color::Gray),
        DifficultyBucket::Known(4) => Style::default().fg(Color::White).bg(Color::LightRed),
        DifficultyBucket::Known(_) => Style::default().fg(Color::White).bg(Color::Red),
        DifficultyBucket::Unknown => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    }
}

/// "ARS (H)" style opponent label.
pub fn fixture_label(fixture: &Fixture) -> String {
    let opponent = if fixture.opponent_short.is_empty() {
        fixture.opponent.as_str()
    } else {
        fixture.opponent_short.as_str()
    };
    let opponent = if opponent.is_empty() { "TBC" } else { opponent };
    let venue = if fixture.is_home { "H" } else { "A" };
    format!("{opponent} ({venue})")
}

pub fn gameweek(event: Option<u32>) -> String {
    event.map(|e| format!("GW{e}")).unwrap_or_else(|| "GW?".to_string())
}

pub fn kickoff(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.with_timezone(&Local).format("%a %d %b %H:%M").to_string())
        .unwrap_or_else(|| "TBC".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precision_matches_metric_kind() {
        assert_eq!(rate(5.26), "5.3");
        assert_eq!(rate(7.0), "7.0");
        assert_eq!(metric(0.456), "0.46");
        assert_eq!(percent(43.21), "43.2%");
        assert_eq!(cost(10.5), "£10.5m");
    }

    #[test]
    fn missing_values_render_as_dash() {
        assert_eq!(rate(f64::NAN), "-");
        assert_eq!(metric(f64::INFINITY), "-");
        assert_eq!(optional(None, 2), "-");
        assert_eq!(optional(Some(1.0), 2), "1.00");
    }

    #[test]
    fn difficulty_buckets() {
        assert_eq!(difficulty_bucket(Some(1.0)), DifficultyBucket::Known(1));
        assert_eq!(difficulty_bucket(Some(2.6)), DifficultyBucket::Known(3));
        assert_eq!(difficulty_bucket(Some(5.0)), DifficultyBucket::Known(5));
        assert_eq!(difficulty_bucket(Some(0.0)), DifficultyBucket::Unknown);
        assert_eq!(difficulty_bucket(Some(7.0)), DifficultyBucket::Unknown);
        assert_eq!(difficulty_bucket(Some(f64::NAN)), DifficultyBucket::Unknown);
        assert_eq!(difficulty_bucket(None), DifficultyBucket::Unknown);
    }

    #[test]
    fn difficulty_label_is_never_clamped() {
        assert_eq!(difficulty_label(Some(4.0)), "4");
        assert_eq!(difficulty_label(Some(2.6)), "2.6");
        assert_eq!(difficulty_label(Some(7.0)), "7");
        assert_eq!(difficulty_label(None), "-");
    }

    #[test]
    fn unknown_difficulty_is_styled_apart_from_buckets() {
        let unknown = difficulty_style(DifficultyBucket::Unknown);
        for level in 1..=5 {
            assert_ne!(difficulty_style(DifficultyBucket::Known(level)), unknown);
        }
    }

    #[test]
    fn fixture_label_prefers_short_name() {
        let fixture = Fixture {
            opponent: "Arsenal".into(),
            opponent_short: "ARS".into(),
            is_home: true,
            ..Default::default()
        };
        assert_eq!(fixture_label(&fixture), "ARS (H)");

        let fixture = Fixture { opponent: "Spurs".into(), ..Default::default() };
        assert_eq!(fixture_label(&fixture), "Spurs (A)");
        assert_eq!(fixture_label(&Fixture::default()), "TBC (A)");
    }

    #[test]
    fn gameweek_label() {
        assert_eq!(gameweek(Some(12)), "GW12");
        assert_eq!(gameweek(None), "GW?");
    }
}
