use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{Component, DetailTabs, DetailTabsProps, HeroCard, HeroCardProps};
use crate::action::Action;
use crate::state::{AppState, DetailTab};
use crate::view_model::DetailViewModel;

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

/// Hero card height when there is room for FIGlet text.
const HERO_HEIGHT: u16 = 10;

/// Props for DetailScreen - read-only view of state
pub struct DetailScreenProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The whole detail screen: hero card, tabs and help bar
#[derive(Default)]
pub struct DetailScreen;

impl Component<Action> for DetailScreen {
    type Props<'a> = DetailScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        let on_forms = props.state.tab == DetailTab::Forms;
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('r') | KeyCode::F(5) => Some(Action::PokemonRefresh),
                KeyCode::Char('/') => Some(Action::PromptOpen),
                KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => Some(Action::UiTabNext),
                KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => Some(Action::UiTabPrev),
                KeyCode::Char(c @ '1'..='4') => {
                    let index = c as usize - '1' as usize;
                    DetailTab::from_index(index).map(Action::UiTabSelect)
                }
                KeyCode::Down | KeyCode::Char('j') if on_forms => Some(Action::UiFormNext),
                KeyCode::Up | KeyCode::Char('k') if on_forms => Some(Action::UiFormPrev),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: DetailScreenProps<'_>) {
        let chunks = Layout::vertical([
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        match &props.state.pokemon {
            DataResource::Loaded(pokemon) => render_loaded(frame, chunks[0], props.state, pokemon),
            DataResource::Loading => render_loading(frame, chunks[0], props.state),
            DataResource::Failed(error) => render_error(frame, chunks[0], error),
            DataResource::Empty => render_empty(frame, chunks[0]),
        }

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[1],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("tab", "switch tab"),
                    StatusBarHint::new("j/k", "form"),
                    StatusBarHint::new("/", "lookup"),
                    StatusBarHint::new("r", "refresh"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn render_loaded(frame: &mut Frame, area: Rect, state: &AppState, pokemon: &DetailViewModel) {
    let hero_height = HERO_HEIGHT.min(area.height / 2).max(4);
    let chunks = Layout::vertical([Constraint::Length(hero_height), Constraint::Min(3)]).split(area);

    let mut hero = HeroCard;
    hero.render(frame, chunks[0], HeroCardProps { pokemon });

    let mut tabs = DetailTabs;
    tabs.render(
        frame,
        chunks[1],
        DetailTabsProps {
            pokemon,
            tab: state.tab,
            selected_form: state.selected_form,
        },
    );
}

fn render_loading(frame: &mut Frame, area: Rect, state: &AppState) {
    let name = state.requested_name.as_deref().unwrap_or_default();
    let line = Line::from(vec![
        Span::styled(state.spinner_frame(), Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!(" Loading {name}..."),
            Style::default().fg(Color::DarkGray),
        ),
    ])
    .centered();
    frame.render_widget(Paragraph::new(line), centered_row(area));
}

fn render_empty(frame: &mut Frame, area: Rect) {
    let hint = Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
        Span::styled("/", Style::default().fg(Color::Cyan).bold()),
        Span::styled(" to look up a Pokemon", Style::default().fg(Color::DarkGray)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(hint), centered_row(area));
}

fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // icon
        Constraint::Length(1), // "Error"
        Constraint::Length(1), // message
        Constraint::Length(1), // blank
        Constraint::Length(1), // hint
    ])
    .flex(Flex::Center)
    .split(area);

    frame.render_widget(Paragraph::new(Line::from(ERROR_ICON).centered()), chunks[0]);
    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled("Error", Style::default().fg(Color::Red).bold())).centered(),
        ),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(Color::Rgb(200, 100, 100)),
            ))
            .centered(),
        ),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::DarkGray)),
                Span::styled("r", Style::default().fg(Color::Cyan).bold()),
                Span::styled(" to retry or ", Style::default().fg(Color::DarkGray)),
                Span::styled("/", Style::default().fg(Color::Cyan).bold()),
                Span::styled(" to look up another", Style::default().fg(Color::DarkGray)),
            ])
            .centered(),
        ),
        chunks[4],
    );
}

fn centered_row(area: Rect) -> Rect {
    Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .split(area)[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    fn actions_for(state: &AppState, keys: &str) -> Vec<Action> {
        let mut component = DetailScreen;
        let props = DetailScreenProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&EventKind::Key(key(keys)), props)
            .into_iter()
            .collect()
    }

    #[test]
    fn test_handle_event_refresh() {
        let state = AppState::default();
        let actions = actions_for(&state, "r");
        actions.assert_count(1);
        actions.assert_first(Action::PokemonRefresh);
    }

    #[test]
    fn test_number_keys_select_tab() {
        let state = AppState::default();
        actions_for(&state, "3").assert_first(Action::UiTabSelect(DetailTab::Types));
        actions_for(&state, "4").assert_first(Action::UiTabSelect(DetailTab::Stats));
    }

    #[test]
    fn test_form_keys_only_on_forms_tab() {
        let mut state = AppState::default();
        actions_for(&state, "j").assert_first(Action::UiFormNext);

        state.tab = DetailTab::Stats;
        actions_for(&state, "j").assert_empty();
    }

    #[test]
    fn test_handle_event_unfocused_ignores() {
        let mut component = DetailScreen;
        let state = AppState::default();
        let props = DetailScreenProps {
            state: &state,
            is_focused: false,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("r")), props)
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_empty_prompts_lookup() {
        let mut render = RenderHarness::new(60, 20);
        let mut component = DetailScreen;
        let state = AppState::default();

        let output = render.render_to_string_plain(|frame| {
            let props = DetailScreenProps {
                state: &state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("to look up a Pokemon"));
    }
}
