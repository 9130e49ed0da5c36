pub mod detail_screen;
pub mod detail_tabs;
pub mod hero_card;
pub mod name_prompt;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use detail_screen::{DetailScreen, DetailScreenProps, ERROR_ICON};
pub use detail_tabs::{DetailTabs, DetailTabsProps};
pub use hero_card::{HeroCard, HeroCardProps};
pub use name_prompt::{NamePrompt, NamePromptProps};

use ratatui::style::Color;

use crate::palette::Rgb;

pub const TEXT_DARK: Color = Color::Rgb(40, 44, 52);
pub const TEXT_DIM: Color = Color::Rgb(110, 116, 128);

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }
}

/// Darken toward black; `factor` 1.0 keeps the color.
pub fn shade(rgb: Rgb, factor: f32) -> Rgb {
    let factor = factor.clamp(0.0, 1.0);
    let scale = |c: u8| (f32::from(c) * factor).round() as u8;
    Rgb::new(scale(rgb.r), scale(rgb.g), scale(rgb.b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shade() {
        let base = Rgb::new(200, 100, 50);
        assert_eq!(shade(base, 1.0), base);
        assert_eq!(shade(base, 0.5), Rgb::new(100, 50, 25));
        assert_eq!(shade(base, 0.0), Rgb::new(0, 0, 0));
    }
}
