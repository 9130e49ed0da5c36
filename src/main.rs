//! Pokemon detail TUI

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use pokedetail::action::Action;
use pokedetail::api::HttpPokemonClient;
use pokedetail::components::{
    Component, DetailScreen, DetailScreenProps, NamePrompt, NamePromptProps,
};
use pokedetail::config::Config;
use pokedetail::effect::{Effect, fetch_action};
use pokedetail::reducer::reducer;
use pokedetail::state::{AppState, SPINNER_TICK_MS};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_components::centered_rect;
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

const FETCH_TASK: &str = "pokemon";

/// Pokemon detail viewer backed by PokeAPI
#[derive(Parser, Debug)]
#[command(name = "pokedetail")]
#[command(about = "Show one Pokemon as a tabbed detail view")]
struct Args {
    /// Pokemon name or national dex number; leave empty to start idle
    name: Option<String>,

    #[command(flatten)]
    config: Config,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum DetailComponentId {
    Screen,
    Prompt,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum DetailContext {
    Main,
    Prompt,
}

impl EventRoutingState<DetailComponentId, DetailContext> for AppState {
    fn focused(&self) -> Option<DetailComponentId> {
        if self.prompt_open {
            Some(DetailComponentId::Prompt)
        } else {
            Some(DetailComponentId::Screen)
        }
    }

    fn modal(&self) -> Option<DetailComponentId> {
        if self.prompt_open {
            Some(DetailComponentId::Prompt)
        } else {
            None
        }
    }

    fn binding_context(&self, id: DetailComponentId) -> DetailContext {
        match id {
            DetailComponentId::Screen => DetailContext::Main,
            DetailComponentId::Prompt => DetailContext::Prompt,
        }
    }

    fn default_context(&self) -> DetailContext {
        DetailContext::Main
    }
}

/// The UI owns the terminal, so logs only go to a file when one is given.
fn init_tracing(config: &Config) -> io::Result<()> {
    let Some(path) = config.log_file.as_ref() else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pokedetail=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        name,
        config,
        debug: debug_args,
    } = Args::parse();

    init_tracing(&config)?;

    let client = HttpPokemonClient::from_config(&config).map_err(io::Error::other)?;
    info!(api_base = client.base_url(), "starting");

    let debug = DebugSession::new(debug_args);

    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(name))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions, client).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

struct DetailUi {
    screen: DetailScreen,
    prompt: NamePrompt,
}

impl DetailUi {
    fn new() -> Self {
        Self {
            screen: DetailScreen,
            prompt: NamePrompt::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<DetailComponentId>,
    ) {
        event_ctx.set_component_area(DetailComponentId::Screen, area);

        let props = DetailScreenProps {
            state,
            is_focused: render_ctx.is_focused() && !state.prompt_open,
        };
        self.screen.render(frame, area, props);

        self.prompt.set_open(state.prompt_open);
        if state.prompt_open {
            let modal_area = centered_rect(50, 7, area);
            event_ctx.set_component_area(DetailComponentId::Prompt, modal_area);
            let props = prompt_props(state, render_ctx.is_focused());
            self.prompt.render(frame, area, props);
        } else {
            event_ctx
                .component_areas
                .remove(&DetailComponentId::Prompt);
        }
    }

    fn handle_screen_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = DetailScreenProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.screen.handle_event(event, props).into_iter().collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_prompt_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        self.prompt.set_open(state.prompt_open);
        let props = prompt_props(state, true);
        let actions: Vec<_> = self.prompt.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn prompt_props(state: &AppState, is_focused: bool) -> NamePromptProps<'_> {
    NamePromptProps {
        query: &state.prompt_query,
        current: state.requested_name.as_deref(),
        is_focused,
        on_query_change: Action::PromptQueryChange,
        on_query_submit: Action::PromptSubmit,
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
    client: HttpPokemonClient,
) -> io::Result<DebugRunOutput<AppState>> {
    let client = Arc::new(client);
    let ui = Rc::new(RefCell::new(DetailUi::new()));
    let mut bus: EventBus<AppState, Action, DetailComponentId, DetailContext> = EventBus::new();
    let keybindings: Keybindings<DetailContext> = Keybindings::new();

    let ui_screen = Rc::clone(&ui);
    bus.register(DetailComponentId::Screen, move |event, state| {
        ui_screen
            .borrow_mut()
            .handle_screen_event(&event.kind, state)
    });

    let ui_prompt = Rc::clone(&ui);
    bus.register(DetailComponentId::Prompt, move |event, state| {
        ui_prompt
            .borrow_mut()
            .handle_prompt_event(&event.kind, state)
    });

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::PokemonRefresh),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(SPINNER_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, client.clone()),
        )
        .await
}

/// Handle effects by spawning tasks. A new fetch replaces the one in flight.
fn handle_effect(
    effect: Effect,
    ctx: &mut EffectContext<Action>,
    client: Arc<HttpPokemonClient>,
) {
    match effect {
        Effect::FetchPokemon { name } => {
            ctx.tasks().cancel(&TaskKey::new(FETCH_TASK));
            info!(%name, "fetching");
            ctx.tasks().spawn(FETCH_TASK, async move {
                fetch_action(client.as_ref(), name).await
            });
        }
    }
}
