use aotui_core::choropleth::ColorScale;
use tui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Palette {
    /// Highlighted path, focused slot, selected country.
    Accent,
    Dim,
    Winner,
    PlayerA,
    PlayerB,
    Text,
}

pub fn resolve(color: Palette) -> Style {
    match color {
        Palette::Accent => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        Palette::Dim => Style::default().fg(Color::Indexed(240)),
        Palette::Winner => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        Palette::PlayerA => Style::default().fg(Color::Rgb(0, 122, 195)),
        Palette::PlayerB => Style::default().fg(Color::Rgb(255, 103, 31)),
        Palette::Text => Style::default().fg(Color::Gray),
    }
}

/// Foreground colour of a palette entry, for canvas shapes that take a bare `Color`.
pub fn fg(color: Palette) -> Color {
    resolve(color).fg.unwrap_or(Color::Reset)
}

pub fn choropleth_color(scale: &ColorScale, wins: Option<u32>) -> Color {
    let (r, g, b) = scale.rgb_or_no_data(wins);
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aotui_core::choropleth::NO_DATA_RGB;

    #[test]
    fn missing_wins_use_no_data_grey() {
        let scale = ColorScale::sequential(10);
        let (r, g, b) = NO_DATA_RGB;
        assert_eq!(choropleth_color(&scale, None), Color::Rgb(r, g, b));
        assert_ne!(choropleth_color(&scale, Some(10)), Color::Rgb(r, g, b));
    }

    #[test]
    fn player_colours_differ() {
        assert_ne!(fg(Palette::PlayerA), fg(Palette::PlayerB));
    }
}
