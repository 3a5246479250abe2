//! Forecast TUI - WeatherAPI.com on tui-dispatch

use std::cell::RefCell;
use std::fs::File;
use std::io;
use std::path::Path;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use forecast::action::Action;
use forecast::api::{DEFAULT_BASE_URL, WeatherApiClient, WeatherService};
use forecast::components::{
    Component, SEARCH_MODAL_SIZE, SearchOverlay, SearchOverlayProps, WeatherDisplay,
    WeatherDisplayProps,
};
use forecast::config::{Config, DEFAULT_TIMEOUT};
use forecast::effect::Effect;
use forecast::images::ImageTable;
use forecast::reducer::reducer;
use forecast::runner::EffectRunner;
use forecast::state::{AppState, DEFAULT_CITY, FORECAST_DAYS, LOADING_TICK_MS};
use forecast::theme::Theme;
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tui_dispatch::{
    EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_components::centered_rect;
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Current weather and a daily forecast in the terminal
#[derive(Parser, Debug)]
#[command(name = "forecast")]
#[command(about = "Current conditions and a daily forecast from WeatherAPI.com")]
struct Args {
    /// City shown on startup
    #[arg(long, short, default_value = DEFAULT_CITY)]
    city: String,

    /// WeatherAPI.com key
    #[arg(long, env = "WEATHER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// API root, e.g. a local mock server
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Days of forecast to request
    #[arg(long, short, default_value_t = FORECAST_DAYS)]
    days: u8,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs(), value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Write logs here (filtered by RUST_LOG); the terminal belongs to the UI
    #[arg(long)]
    log_file: Option<String>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum ForecastComponentId {
    Display,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum ForecastContext {
    Main,
    Search,
}

impl EventRoutingState<ForecastComponentId, ForecastContext> for AppState {
    fn focused(&self) -> Option<ForecastComponentId> {
        if self.search_active {
            Some(ForecastComponentId::Search)
        } else {
            Some(ForecastComponentId::Display)
        }
    }

    fn modal(&self) -> Option<ForecastComponentId> {
        if self.search_active {
            Some(ForecastComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: ForecastComponentId) -> ForecastContext {
        match id {
            ForecastComponentId::Display => ForecastContext::Main,
            ForecastComponentId::Search => ForecastContext::Search,
        }
    }

    fn default_context(&self) -> ForecastContext {
        ForecastContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        city,
        api_key,
        base_url,
        days,
        timeout,
        log_file,
        debug: debug_args,
    } = Args::parse();

    if let Some(path) = log_file.as_deref() {
        init_tracing(Path::new(path))?;
    }

    let config = Config::new(api_key, base_url, city)
        .with_days(days)
        .with_timeout(Duration::from_secs(timeout))
        .validate()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    info!(city = %config.city, days = config.days, base_url = %config.base_url, "starting");

    let client = WeatherApiClient::new(&config.base_url, &config.api_key, config.timeout)
        .map_err(io::Error::other)?;
    let service: Arc<dyn WeatherService> = Arc::new(client);

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let mut state = debug
        .load_state_or_else_async(|| {
            let city = config.city.clone();
            async move { Ok::<AppState, io::Error>(AppState::new(city)) }
        })
        .await
        .map_err(debug_error)?;
    state.forecast_days = config.days;

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

    let result = run_app(
        &mut terminal,
        &debug,
        store,
        replay_actions,
        EffectRunner::new(service, config.search_debounce),
    )
    .await;

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

fn init_tracing(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("forecast=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

struct ForecastUi {
    display: WeatherDisplay,
    search: SearchOverlay,
    theme: Theme,
    images: ImageTable,
}

impl ForecastUi {
    fn new() -> Self {
        Self {
            display: WeatherDisplay,
            search: SearchOverlay::new(),
            theme: Theme::default(),
            images: ImageTable::default(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<ForecastComponentId>,
    ) {
        event_ctx.set_component_area(ForecastComponentId::Display, area);

        let props = WeatherDisplayProps {
            state,
            theme: &self.theme,
            images: &self.images,
            is_focused: render_ctx.is_focused() && !state.search_active,
        };
        self.display.render(frame, area, props);

        self.search.set_open(state.search_active);
        if state.search_active {
            let (width, height) = SEARCH_MODAL_SIZE;
            event_ctx.set_component_area(
                ForecastComponentId::Search,
                centered_rect(width, height, area),
            );
            let props = search_props(state, &self.theme, render_ctx.is_focused());
            self.search.render(frame, area, props);
        } else {
            event_ctx
                .component_areas
                .remove(&ForecastComponentId::Search);
        }
    }

    fn handle_display_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = WeatherDisplayProps {
            state,
            theme: &self.theme,
            images: &self.images,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .display
            .handle_event(event, props)
            .into_iter()
            .collect();
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

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        self.search.set_open(state.search_active);
        let props = search_props(state, &self.theme, true);
        let actions: Vec<_> = self.search.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn search_props<'a>(
    state: &'a AppState,
    theme: &'a Theme,
    is_focused: bool,
) -> SearchOverlayProps<'a> {
    SearchOverlayProps {
        query: &state.search_query,
        results: &state.candidates,
        selected: state.search_selected,
        is_focused,
        error: state.search_error.as_deref(),
        theme,
        on_query_change: Action::SearchQueryChange,
        on_query_submit: Action::SearchQuerySubmit,
        on_select: Action::SearchSelect,
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
    runner: EffectRunner,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(ForecastUi::new()));
    let mut bus: EventBus<AppState, Action, ForecastComponentId, ForecastContext> =
        EventBus::new();
    let keybindings: Keybindings<ForecastContext> = Keybindings::new();

    let ui_display = Rc::clone(&ui);
    bus.register(ForecastComponentId::Display, move |event, state| {
        ui_display
            .borrow_mut()
            .handle_display_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(ForecastComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
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
            Some(Action::WeatherFetch),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(LOADING_TICK_MS),
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
            move |effect, ctx| runner.run(effect, ctx.tasks()),
        )
        .await
}
