//! Plain-text rendering of the title, the result card and notifications.

use rand::{Rng, seq::IndexedRandom};

use crate::{
    model::WeatherResult,
    widget::{Notice, NoticeLevel},
};

pub const TITLE: &str = "Weather or Not";

/// Downpour, snow, storm, sun.
pub const TITLE_ICONS: [&str; 4] = ["🌧", "🌨", "⛈", "🌤"];

/// Title line flanked on both sides by one randomly picked icon.
pub fn title<R: Rng + ?Sized>(rng: &mut R) -> String {
    let icon = TITLE_ICONS.choose(rng).copied().unwrap_or(TITLE_ICONS[0]);
    format!("{icon}  {TITLE}  {icon}")
}

pub fn render_card(result: &WeatherResult) -> Vec<String> {
    let current = &result.current;

    let mut lines = vec![
        result.location.name.clone(),
        format!("Temperature: {}°C", current.temperature),
        format!("Condition: {}", current.description().unwrap_or("Unknown")),
    ];
    if let Some(icon) = current.icon() {
        lines.push(format!("Icon: {icon}"));
    }
    lines.push(format!("Wind Speed: {} km/h", current.wind_speed));
    lines.push(format!("Humidity: {}%", current.humidity));
    lines.push(format!("Local Time: {}", result.location.localtime));

    lines
}

pub fn render_notice(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Warning => format!("Warning: {}", notice.message),
        NoticeLevel::Error => format!("Error: {}", notice.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Current, Location};
    use rand::{SeedableRng, rngs::StdRng};

    fn paris() -> WeatherResult {
        WeatherResult {
            location: Location { name: "Paris".into(), localtime: "2024-01-01 10:00".into() },
            current: Current {
                temperature: 5.0,
                weather_descriptions: vec!["Cloudy".into()],
                weather_icons: vec!["http://x/icon.png".into()],
                wind_speed: 10.0,
                humidity: 80.0,
            },
        }
    }

    #[test]
    fn card_shows_exact_values() {
        let card = render_card(&paris());

        assert_eq!(
            card,
            vec![
                "Paris",
                "Temperature: 5°C",
                "Condition: Cloudy",
                "Icon: http://x/icon.png",
                "Wind Speed: 10 km/h",
                "Humidity: 80%",
                "Local Time: 2024-01-01 10:00",
            ]
        );
    }

    #[test]
    fn card_keeps_fractional_values() {
        let mut result = paris();
        result.current.temperature = -2.5;
        result.current.weather_icons.clear();

        let card = render_card(&result);
        assert!(card.contains(&"Temperature: -2.5°C".to_string()));
        assert!(!card.iter().any(|l| l.starts_with("Icon:")));
    }

    #[test]
    fn title_uses_one_icon_on_both_sides() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let line = title(&mut rng);
            let icon = TITLE_ICONS.iter().find(|i| line.starts_with(**i)).expect("known icon");
            assert!(line.ends_with(icon));
            assert!(line.contains(TITLE));
        }
    }

    #[test]
    fn notices_are_prefixed_by_level() {
        assert_eq!(render_notice(&Notice::warning("careful")), "Warning: careful");
        assert_eq!(render_notice(&Notice::error("broken")), "Error: broken");
    }
}
