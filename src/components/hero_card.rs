use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{Component, TEXT_DARK, TEXT_DIM, shade};
use crate::action::Action;
use crate::palette::Rgb;
use crate::view_model::{DetailViewModel, title_case};

pub struct HeroCard;

pub struct HeroCardProps<'a> {
    pub pokemon: &'a DetailViewModel,
}

fn art_color(rgb: Rgb) -> ArtColor {
    ArtColor::rgb(rgb.r, rgb.g, rgb.b)
}

fn name_fill(pokemon: &DetailViewModel) -> Fill {
    let start = shade(pokemon.base_color, 0.55);
    let end = pokemon.base_color;
    Fill::Linear(LinearGradient::horizontal(art_color(start), art_color(end)))
}

fn type_chips(pokemon: &DetailViewModel) -> Line<'static> {
    let mut spans = Vec::with_capacity(pokemon.type_badges.len() * 2);
    for badge in &pokemon.type_badges {
        spans.push(Span::styled(
            format!(" {} ", title_case(&badge.name)),
            Style::default()
                .fg(Color::from(shade(badge.text_color, 0.6)))
                .bg(Color::from(pokemon.chip_color))
                .bold(),
        ));
        spans.push(Span::raw(" "));
    }
    if spans.is_empty() {
        spans.push(Span::styled("untyped", Style::default().fg(TEXT_DIM)));
    }
    Line::from(spans).centered()
}

fn image_line(pokemon: &DetailViewModel) -> Line<'static> {
    match &pokemon.hero_image_url {
        Some(url) => Line::from(vec![
            Span::styled("image ", Style::default().fg(TEXT_DIM)),
            Span::styled(url.clone(), Style::default().fg(TEXT_DARK)),
        ])
        .centered(),
        None => Line::from(Span::styled("No image", Style::default().fg(TEXT_DIM))).centered(),
    }
}

impl Component<Action> for HeroCard {
    type Props<'a> = HeroCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let pokemon = props.pokemon;
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} #{} ", pokemon.display_name, pokemon.padded_id))
            .style(Style::default().bg(Color::from(pokemon.hero_color)).fg(TEXT_DARK))
            .border_style(Style::default().fg(Color::from(pokemon.base_color)));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // FIGlet name
            Constraint::Length(1), // Type chips
            Constraint::Length(1), // Hero image
        ])
        .split(inner);

        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(name_fill(pokemon));
        frame.render_widget(ArtBox::new(&renderer, &pokemon.display_name), chunks[0]);

        frame.render_widget(Paragraph::new(type_chips(pokemon)), chunks[1]);
        frame.render_widget(Paragraph::new(image_line(pokemon)), chunks[2]);
    }
}
