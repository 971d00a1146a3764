use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use catalog_core::{update, AppState, ComicId, DetailViewModel, LoadStatus, Msg, StatusFilter};
use catalog_engine::{ApiEndpoints, EngineHandle};
use engine_logging::{engine_error, engine_info, DEFAULT_LOG_FILE};
use log::LevelFilter;

use super::cli::{Cli, Command};
use super::config::CatalogConfig;
use super::effects::EffectRunner;
use super::ui::input::{self, HELP};
use super::ui::render;

const POLL_INTERVAL: Duration = Duration::from_millis(40);
/// Slack on top of the request timeout before a one-shot command gives up.
const SETTLE_MARGIN: Duration = Duration::from_secs(5);
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub fn run_app() -> anyhow::Result<()> {
    use clap::Parser;
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    engine_logging::initialize(cli.log.into(), level, Path::new(DEFAULT_LOG_FILE));

    let mut config = CatalogConfig::load(cli.config.as_deref()).context("loading config")?;
    if let Some(base_url) = cli.base_url {
        config.api_base_url = base_url;
    }
    let endpoints = config.endpoints()?;
    let page_size = config.page_size()?;
    let settings = config.fetch_settings()?;
    let settle_limit = settings.request_timeout + SETTLE_MARGIN;
    engine_info!(
        "Catalog API at {} (page size {}, detail lookup {:?})",
        endpoints.base(),
        page_size,
        config.detail_lookup
    );

    let engine = EngineHandle::new(endpoints.clone(), settings, config.detail_lookup);
    let mut session = Session {
        state: AppState::with_page_size(page_size),
        runner: EffectRunner::new(engine),
        endpoints,
        settle_limit,
    };

    match cli.command.unwrap_or(Command::Browse) {
        Command::Browse => browse(&mut session),
        Command::List {
            search,
            status,
            page,
        } => list(&mut session, search, status, page),
        Command::Show { id } => show(&mut session, id),
        Command::Stats => stats(&mut session),
    }
}

struct Session {
    state: AppState,
    runner: EffectRunner,
    endpoints: ApiEndpoints,
    settle_limit: Duration,
}

impl Session {
    /// Feed one message through the reducer and run its effects.
    /// Returns true if the view should scroll back to the top.
    fn dispatch(&mut self, msg: Msg) -> bool {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects)
    }

    /// Block until no fetch is outstanding.
    fn settle(&mut self) -> anyhow::Result<()> {
        let deadline = Instant::now() + self.settle_limit;
        while self.state.is_waiting() {
            let now = Instant::now();
            if now >= deadline {
                bail!("timed out waiting for the catalog API");
            }
            if let Some(msg) = self.runner.next_msg(deadline - now) {
                self.dispatch(msg);
            }
        }
        Ok(())
    }

    fn load_catalog(&mut self) -> anyhow::Result<()> {
        self.dispatch(Msg::SessionStarted);
        self.settle()?;
        if let LoadStatus::Failed(message) = self.state.load_status() {
            bail!("could not load the catalog: {message}");
        }
        Ok(())
    }

    fn render(&self) -> String {
        let view = self.state.view();
        match &view.detail {
            Some(detail) => render::render_detail(detail, &self.endpoints),
            None => render::render_catalog(&view.catalog, &self.endpoints),
        }
    }
}

fn list(
    session: &mut Session,
    search: String,
    status: StatusFilter,
    page: usize,
) -> anyhow::Result<()> {
    session.load_catalog()?;
    session.dispatch(Msg::SearchChanged(search));
    session.dispatch(Msg::StatusFilterChanged(status));
    if page != 1 {
        session.dispatch(Msg::PageRequested(page));
        if session.state.current_page() != page {
            let total = session.state.view().catalog.total_pages;
            bail!("page {page} is out of range (1-{total})");
        }
    }
    print!("{}", session.render());
    Ok(())
}

fn show(session: &mut Session, id: String) -> anyhow::Result<()> {
    session.dispatch(Msg::DetailRequested(ComicId::new(id)));
    session.settle()?;
    print!("{}", session.render());
    let view = session.state.view();
    if let (Some(DetailViewModel::NotFound { .. }), Some(error)) =
        (view.detail, session.state.last_error())
    {
        bail!("detail lookup failed: {error}");
    }
    Ok(())
}

fn stats(session: &mut Session) -> anyhow::Result<()> {
    session.load_catalog()?;
    print!(
        "{}",
        render::render_stats(&session.state.stats(), session.state.filter())
    );
    Ok(())
}

fn browse(session: &mut Session) -> anyhow::Result<()> {
    let (line_tx, line_rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    engine_error!("Failed to read stdin: {}", err);
                    break;
                }
            }
        }
    });

    let mut scroll_to_top = session.dispatch(Msg::SessionStarted);
    let mut redraw = true;
    loop {
        if let Some(msg) = session.runner.next_msg(POLL_INTERVAL) {
            scroll_to_top |= session.dispatch(msg);
        }

        match line_rx.try_recv() {
            Ok(line) => match input::parse_command(&line) {
                Ok(input::Command::Update(msg)) => {
                    scroll_to_top |= session.dispatch(msg);
                    redraw = true;
                }
                Ok(input::Command::Redraw) => redraw = true,
                Ok(input::Command::Help) => prompt(HELP)?,
                Ok(input::Command::Quit) => break,
                Err(message) => prompt(&message)?,
            },
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => break,
        }

        if session.state.consume_dirty() || redraw {
            redraw = false;
            let mut screen = String::new();
            if std::mem::take(&mut scroll_to_top) {
                screen.push_str(CLEAR_SCREEN);
            }
            screen.push_str(&session.render());
            prompt(screen.trim_end())?;
        }
    }
    engine_info!("Interactive session closed");
    Ok(())
}

fn prompt(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}")?;
    write!(stdout, "> ")?;
    stdout.flush()
}
