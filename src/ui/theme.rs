//! Theme and condition display assets for the TUI.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::models::Condition;

/// Color and style theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and the focused input.
    pub highlight: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Color for error messages.
    pub error: Color,
    /// Color for warning-level threshold messages.
    pub warning: Color,
    /// Color for in-range threshold messages.
    pub ok: Color,
    /// Style for field labels.
    pub label: Style,
    /// Style for the focused input border.
    pub focused: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            highlight: Color::Cyan,
            border: Color::Gray,
            error: Color::Red,
            warning: Color::Yellow,
            ok: Color::Green,
            label: Style::default().fg(Color::Gray),
            focused: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }
}

/// Display assets derived from a weather condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionAssets {
    /// Single-cell glyph shown beside the condition label.
    pub symbol: &'static str,
    /// Card background color.
    pub background: Color,
}

const CLEAR_SYMBOL: &str = "☀";
const CLEAR_BACKGROUND: Color = Color::Rgb(243, 184, 124);
const CLOUDS_BACKGROUND: Color = Color::Rgb(87, 214, 212);
const RAIN_BACKGROUND: Color = Color::Rgb(91, 200, 251);
const SNOW_BACKGROUND: Color = Color::Rgb(175, 242, 255);
const MIST_BACKGROUND: Color = Color::Rgb(87, 214, 212);
const HAZE_BACKGROUND: Color = Color::Rgb(113, 238, 236);

/// Map a condition to its display assets.
///
/// Total over the enum, with the `Other` arm as the single explicit
/// default. The tables are deliberately asymmetric, matching the asset
/// set: Drizzle has its own symbol but falls back to the Clear
/// background, while Mist and Haze have backgrounds but fall back to the
/// Clear symbol.
#[must_use]
pub fn condition_assets(condition: Condition) -> ConditionAssets {
    match condition {
        Condition::Clear => ConditionAssets {
            symbol: CLEAR_SYMBOL,
            background: CLEAR_BACKGROUND,
        },
        Condition::Clouds => ConditionAssets {
            symbol: "☁",
            background: CLOUDS_BACKGROUND,
        },
        Condition::Rain => ConditionAssets {
            symbol: "☔",
            background: RAIN_BACKGROUND,
        },
        Condition::Drizzle => ConditionAssets {
            symbol: "☂",
            background: CLEAR_BACKGROUND,
        },
        Condition::Snow => ConditionAssets {
            symbol: "❄",
            background: SNOW_BACKGROUND,
        },
        Condition::Mist => ConditionAssets {
            symbol: CLEAR_SYMBOL,
            background: MIST_BACKGROUND,
        },
        Condition::Haze => ConditionAssets {
            symbol: CLEAR_SYMBOL,
            background: HAZE_BACKGROUND,
        },
        Condition::Other => ConditionAssets {
            symbol: CLEAR_SYMBOL,
            background: CLEAR_BACKGROUND,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assets_total_over_conditions() {
        let all = [
            Condition::Clear,
            Condition::Clouds,
            Condition::Rain,
            Condition::Drizzle,
            Condition::Snow,
            Condition::Mist,
            Condition::Haze,
            Condition::Other,
        ];
        for condition in all {
            let assets = condition_assets(condition);
            assert!(!assets.symbol.is_empty());
        }
    }

    #[test]
    fn test_unmapped_entries_fall_back_to_clear() {
        let clear = condition_assets(Condition::Clear);

        // Drizzle has a symbol of its own but no background of its own.
        let drizzle = condition_assets(Condition::Drizzle);
        assert_ne!(drizzle.symbol, clear.symbol);
        assert_eq!(drizzle.background, clear.background);

        // Mist and Haze have backgrounds but no symbol of their own.
        let mist = condition_assets(Condition::Mist);
        assert_eq!(mist.symbol, clear.symbol);
        assert_ne!(mist.background, clear.background);

        // Unrecognized conditions take both defaults.
        let other = condition_assets(Condition::Other);
        assert_eq!(other.symbol, clear.symbol);
        assert_eq!(other.background, clear.background);
    }
}
