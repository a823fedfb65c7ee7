#![forbid(unsafe_code)]

//! Scrollstage demo binary entry point.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::Event;
use scrollstage_demo::app::{App, Flow};
use scrollstage_demo::catalog::{default_catalog, load_catalog};
use scrollstage_demo::cli::Opts;
use scrollstage_demo::session::TerminalSession;
use scrollstage_demo::{logging, render};
use scrollstage_runtime::{Catalog, TimelineConfig};

const FRAME: Duration = Duration::from_millis(16);

type BoxError = Box<dyn std::error::Error>;

fn main() {
    let opts = Opts::parse();
    if let Some(path) = &opts.log
        && let Err(e) = logging::init(path)
    {
        eprintln!("Failed to open log file {}: {e}", path.display());
    }
    if let Err(e) = run(&opts) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn load(opts: &Opts) -> Result<(Catalog, TimelineConfig), BoxError> {
    let mut config = match &opts.config {
        Some(path) => TimelineConfig::load(path)?,
        None => TimelineConfig::default(),
    };
    match opts.scrub_ms {
        Some(0) => config.scrub = None,
        Some(ms) => config.scrub = Some(Duration::from_millis(ms)),
        None => {}
    }
    config.validate()?;
    let catalog = match &opts.catalog {
        Some(path) => load_catalog(path)?,
        None => default_catalog()?,
    };
    Ok((catalog, config))
}

fn run(opts: &Opts) -> Result<(), BoxError> {
    let (catalog, config) = load(opts)?;
    let session = TerminalSession::new()?;
    let (mut width, mut height) = session.size()?;
    let mut app = App::new(catalog, config, opts.step, height)?;
    tracing::info!(items = app.controller().catalog().len(), "demo started");

    let started = Instant::now();
    let mut last = Instant::now();
    let mut stdout = io::stdout();
    loop {
        if let Some(event) = session.poll_event(FRAME)? {
            match event {
                Event::Key(key) => {
                    if app.handle_key(key)? == Flow::Quit {
                        break;
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse)?,
                Event::Resize(w, h) => {
                    (width, height) = (w, h);
                    app.mark_dirty();
                }
                _ => {}
            }
        }

        let now = Instant::now();
        app.advance(now - last);
        last = now;

        if app.take_dirty() {
            render::draw(&mut stdout, &app.compose(width, height))?;
        }
        if opts.exit_after_ms > 0 && started.elapsed() >= Duration::from_millis(opts.exit_after_ms)
        {
            break;
        }
    }

    app.shutdown();
    drop(session);
    tracing::info!("demo exited");
    Ok(())
}
