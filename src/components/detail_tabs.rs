use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
};

use super::{Component, TEXT_DARK, TEXT_DIM, shade};
use crate::action::Action;
use crate::state::DetailTab;
use crate::view_model::{DetailViewModel, StatRow, title_case};

const STAT_LABEL_WIDTH: usize = 16;
const STAT_VALUE_WIDTH: usize = 4;

pub struct DetailTabs;

pub struct DetailTabsProps<'a> {
    pub pokemon: &'a DetailViewModel,
    pub tab: DetailTab,
    pub selected_form: usize,
}

impl Component<Action> for DetailTabs {
    type Props<'a> = DetailTabsProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let pokemon = props.pokemon;
        let accent = Color::from(shade(pokemon.base_color, 0.7));
        let block = Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::from(pokemon.primary_color)).fg(TEXT_DARK))
            .border_style(Style::default().fg(accent));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).split(inner);

        let titles: Vec<&str> = DetailTab::ALL.iter().map(|tab| tab.title()).collect();
        let tabs = Tabs::new(titles)
            .select(props.tab.index())
            .style(Style::default().fg(TEXT_DIM))
            .highlight_style(Style::default().fg(accent).add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, chunks[0]);

        let body = match props.tab {
            DetailTab::Forms => forms_text(pokemon, props.selected_form),
            DetailTab::Detail => detail_text(pokemon),
            DetailTab::Types => types_text(pokemon),
            DetailTab::Stats => stats_text(pokemon, chunks[1].width),
        };
        frame.render_widget(Paragraph::new(body).wrap(Wrap { trim: false }), chunks[1]);
    }
}

fn forms_text(pokemon: &DetailViewModel, selected: usize) -> Text<'static> {
    if pokemon.forms.is_empty() {
        return Text::from(Line::from(Span::styled(
            "No sprites available",
            Style::default().fg(TEXT_DIM),
        )));
    }

    let accent = Color::from(shade(pokemon.base_color, 0.7));
    let lines = pokemon
        .forms
        .iter()
        .enumerate()
        .map(|(index, form)| {
            let is_selected = index == selected;
            let marker = if is_selected { "> " } else { "  " };
            let label_style = if is_selected {
                Style::default().fg(accent).bold()
            } else {
                Style::default().fg(TEXT_DARK)
            };
            Line::from(vec![
                Span::styled(marker, label_style),
                Span::styled(format!("{:<8}", form.label), label_style),
                Span::styled(form.url.clone(), Style::default().fg(TEXT_DIM)),
            ])
        })
        .collect::<Vec<_>>();
    Text::from(lines)
}

fn detail_text(pokemon: &DetailViewModel) -> Text<'static> {
    let label = Style::default().fg(TEXT_DIM);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Height      ", label),
            Span::raw(pokemon.height_label.clone()),
        ]),
        Line::from(vec![
            Span::styled("Weight      ", label),
            Span::raw(pokemon.weight_label.clone()),
        ]),
        Line::from(vec![
            Span::styled("Base exp    ", label),
            Span::raw(
                pokemon
                    .base_experience
                    .map_or_else(|| "--".to_string(), |exp| exp.to_string()),
            ),
        ]),
    ];

    if !pokemon.abilities.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Abilities", label)));
        for ability in &pokemon.abilities {
            let mut spans = vec![Span::raw(format!("  {}", ability.label))];
            if ability.is_hidden {
                spans.push(Span::styled(" (hidden)", label));
            }
            lines.push(Line::from(spans));
        }
    }
    Text::from(lines)
}

fn types_text(pokemon: &DetailViewModel) -> Text<'static> {
    if pokemon.type_badges.is_empty() {
        return Text::from(Line::from(Span::styled(
            "No types listed",
            Style::default().fg(TEXT_DIM),
        )));
    }

    let lines = pokemon
        .type_badges
        .iter()
        .enumerate()
        .map(|(index, badge)| {
            let slot = if index == 0 { "primary  " } else { "secondary" };
            Line::from(vec![
                Span::styled(format!("{slot} "), Style::default().fg(TEXT_DIM)),
                Span::styled(
                    format!(" {} ", title_case(&badge.name)),
                    Style::default()
                        .fg(Color::from(shade(badge.text_color, 0.6)))
                        .bg(Color::from(badge.background_color))
                        .bold(),
                ),
                Span::styled(
                    format!("  {}", badge.text_color),
                    Style::default().fg(TEXT_DIM),
                ),
            ])
        })
        .collect::<Vec<_>>();
    Text::from(lines)
}

fn stats_text(pokemon: &DetailViewModel, width: u16) -> Text<'static> {
    if pokemon.stat_rows.is_empty() {
        return Text::from(Line::from(Span::styled(
            "No stats listed",
            Style::default().fg(TEXT_DIM),
        )));
    }

    let bar_width = stat_bar_width(width);
    let mut lines: Vec<Line<'static>> = pokemon
        .stat_rows
        .iter()
        .map(|row| stat_line(row, bar_width, pokemon))
        .collect();

    let total: u64 = pokemon.stat_rows.iter().map(|row| u64::from(row.value)).sum();
    lines.push(Line::from(vec![
        Span::styled(
            format!("{:<STAT_LABEL_WIDTH$}", "total"),
            Style::default().fg(TEXT_DIM),
        ),
        Span::styled(format!("{total:>STAT_VALUE_WIDTH$}"), Style::default().bold()),
    ]));
    Text::from(lines)
}

fn stat_bar_width(width: u16) -> usize {
    (width as usize).saturating_sub(STAT_LABEL_WIDTH + STAT_VALUE_WIDTH + 2)
}

/// Number of filled cells for a ratio on a track of `width` cells.
pub fn filled_cells(fill_ratio: f64, width: usize) -> usize {
    ((fill_ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width)
}

fn stat_line(row: &StatRow, bar_width: usize, pokemon: &DetailViewModel) -> Line<'static> {
    let filled = filled_cells(row.fill_ratio, bar_width);
    Line::from(vec![
        Span::styled(
            format!("{:<STAT_LABEL_WIDTH$}", row.label),
            Style::default().fg(TEXT_DIM),
        ),
        Span::styled(
            format!("{:>STAT_VALUE_WIDTH$}", row.value),
            Style::default().fg(TEXT_DARK).bold(),
        ),
        Span::raw("  "),
        Span::styled(
            "█".repeat(filled),
            Style::default().fg(Color::from(pokemon.base_color)),
        ),
        Span::styled(
            "░".repeat(bar_width - filled),
            Style::default().fg(Color::from(pokemon.chip_color)),
        ),
    ])
}
