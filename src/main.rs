//! Line-oriented runtime for a single dashboard screen.
//!
//! ```text
//! stdin (JSON Event per line) → handle_event → PostToBackend → PortalWorker
//!                                   ↑                               │
//!                                   └──── Event::BackendResponse ◄──┘
//! stdout ← ScreenViewModel (JSON per line) after every re-render
//! ```
//!
//! Usage: `hireflow [config.toml]`. Without a path the configuration comes from
//! `HIREFLOW_*` environment variables, falling back to defaults.
//!
//! Example session:
//!
//! ```text
//! {"event":"select_tab","tab":1}
//! {"event":"perform","action":"suspend","id":"u-1"}
//! ```
//!
//! A malformed input line is reported on stderr and skipped.

#![allow(clippy::multiple_crate_versions)]

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::Path;

use hireflow::app::screens::{
    ScreenConfig, ADMIN_COMPANIES, ADMIN_JOBS, ADMIN_NOTIFICATIONS, ADMIN_USERS,
    APPLICANT_APPLICATIONS, RECRUITER_CANDIDATES, RECRUITER_INTERVIEWS, RECRUITER_JOBS,
};
use hireflow::domain::{Application, Company, Interview, Job, Notification, User};
use hireflow::storage::JsonSeedStore;
use hireflow::worker::PortalWorker;
use hireflow::{handle_event, initialize, Action, Config, Entity, Event, PortalError, Result};

fn main() {
    if let Err(e) = try_main() {
        eprintln!("hireflow: {e}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let config = match std::env::args_os().nth(1) {
        Some(path) => Config::from_file(Path::new(&path))?,
        None => {
            let config = Config::from_env();
            config.validate()?;
            config
        }
    };
    hireflow::observability::init_tracing(&config);

    let span = tracing::debug_span!("runtime", screen = %config.screen);
    let _guard = span.entered();

    let store = JsonSeedStore::open(config.seed_path())?;
    tracing::debug!(path = %store.path().display(), "seed store opened");
    let worker = PortalWorker::new(Box::new(store));

    match config.screen.as_str() {
        "admin-users" => run::<User>(&config, &ADMIN_USERS, worker),
        "admin-companies" => run::<Company>(&config, &ADMIN_COMPANIES, worker),
        "admin-jobs" => run::<Job>(&config, &ADMIN_JOBS, worker),
        "recruiter-jobs" => run::<Job>(&config, &RECRUITER_JOBS, worker),
        "recruiter-candidates" => run::<Application>(&config, &RECRUITER_CANDIDATES, worker),
        "applicant-applications" => {
            run::<Application>(&config, &APPLICANT_APPLICATIONS, worker)
        }
        "recruiter-interviews" => run::<Interview>(&config, &RECRUITER_INTERVIEWS, worker),
        "admin-notifications" => run::<Notification>(&config, &ADMIN_NOTIFICATIONS, worker),
        other => Err(PortalError::Config(format!("unknown screen '{other}'"))),
    }
}

fn run<E: Entity + 'static>(
    config: &Config,
    screen: &'static ScreenConfig<E::Status>,
    mut worker: PortalWorker,
) -> Result<()> {
    let mut state = initialize::<E>(config, screen);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    process(&mut state, &mut worker, Event::Refresh, &mut out)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Event>(&line) {
            Ok(event) => process(&mut state, &mut worker, event, &mut out)?,
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed event");
                eprintln!("hireflow: ignoring malformed event: {e}");
            }
        }
    }

    tracing::debug!(pending = state.pending_count(), "input closed");
    Ok(())
}

/// Runs one input event to quiescence, executing backend requests in order.
fn process<E: Entity + 'static>(
    state: &mut hireflow::ScreenState<E>,
    worker: &mut PortalWorker,
    event: Event,
    out: &mut impl Write,
) -> Result<()> {
    let mut queue = VecDeque::from([event]);
    let mut rerender = false;

    while let Some(event) = queue.pop_front() {
        let (changed, actions) = handle_event(state, &event)?;
        rerender |= changed;

        for action in actions {
            match action {
                Action::PostToBackend(request) => {
                    let response = worker.handle_message(request);
                    queue.push_back(Event::BackendResponse { response });
                }
                Action::Notify(notice) => {
                    tracing::debug!(message = %notice.message, "notice raised");
                }
            }
        }
    }

    if rerender {
        let view_model = state.compute_viewmodel(chrono::Utc::now().timestamp())?;
        serde_json::to_writer(&mut *out, &view_model)?;
        writeln!(out)?;
        out.flush()?;
    }
    Ok(())
}
