use jswp::catalog::load_catalog;
use jswp::cli::{AppConfig, Args};
use jswp::config::UserConfig;
use jswp::dashboard::{
    applicants_report, applied_report, platform_overview, update_application_status,
};
use jswp::domain::{
    filter_jobs, Decision, DecisionEvent, DecisionQueue, GestureConfig, Job, JobFilter,
    SwipeLedger,
};
use jswp::logging;
use jswp::session::{SessionContext, UserRole};
use jswp::tui::{
    card_width, columns_to_displacement, contains, handle_key_event, handle_mouse_event,
    main_layout, render, render_help_overlay, render_summary, render_welcome_overlay, KeyAction,
    PointerAction, Toast, ViewState, NUDGE_STEP,
};
use jswp::Result;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::{io, time::Duration};

type JobQueue = DecisionQueue<Job, SwipeLedger>;

fn main() {
    // Parse command line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Load user configuration
    let mut user_config = UserConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load user config: {}", e);
        UserConfig::default()
    });

    if let Some(log_path) = logging::default_log_path() {
        if let Err(e) = logging::init(&log_path, args.verbose) {
            eprintln!("Warning: Failed to set up logging: {}", e);
        }
    }

    let config = AppConfig::from_args(args, &user_config);

    if let Err(e) = run_app_with_config(&config, &mut user_config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Runs the view for the session's role
pub fn run_app_with_config(config: &AppConfig, user_config: &mut UserConfig) -> Result<()> {
    let session = SessionContext::new(config.user_id.as_str(), config.role);

    tracing::info!(
        user = %session.user_id,
        role = %session.role,
        catalog = %config.catalog.display(),
        "starting jswp"
    );

    let catalog = load_catalog(&config.catalog)?;
    let mut ledger = open_ledger(config, &session)?;

    match session.role {
        UserRole::Talent => run_talent(config, user_config, &session, &catalog, ledger),
        UserRole::Company => {
            if let Some(update) = &config.status_update {
                let record = update_application_status(
                    &session,
                    &mut ledger,
                    &catalog,
                    &update.talent_id,
                    &update.job_id,
                    update.status,
                )?;
                println!(
                    "{} on job {} is now {}",
                    record.talent_id,
                    record.job_id,
                    record.application_status.label()
                );
            }
            print!("{}", applicants_report(&session, &ledger, &catalog)?);
            Ok(())
        }
        UserRole::Admin => {
            print!("{}", platform_overview(&session, &ledger, &catalog)?);
            Ok(())
        }
    }
}

/// Runs the swipe deck for a talent
fn run_talent(
    config: &AppConfig,
    user_config: &mut UserConfig,
    session: &SessionContext,
    catalog: &[Job],
    ledger: SwipeLedger,
) -> Result<()> {
    session.require_role(UserRole::Talent)?;

    if config.list_applied {
        print!("{}", applied_report(&ledger, catalog));
        return Ok(());
    }

    if catalog.is_empty() {
        println!("No jobs found in catalog: {}", config.catalog.display());
        return Ok(());
    }

    let mut filter = config.filter.clone();
    let jobs = deck_for(catalog, &mut filter, &ledger, config.include_swiped);

    // Print dry-run notice
    if config.dry_run {
        println!("[DRY RUN] Swipes will not be saved");
        println!("   Found {} jobs to review", jobs.len());
        println!("   Press Enter to continue...");
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
    }

    let mut queue = DecisionQueue::new(jobs, GestureConfig::new(config.threshold)?, ledger);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_loop(
        &mut terminal,
        &mut queue,
        catalog,
        &mut filter,
        config,
        user_config,
    );

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Print summary after exit
    if config.dry_run {
        let stats = queue.sink().statistics(queue.len());
        println!("\n[DRY RUN] Complete");
        println!("   Would have applied to: {} jobs", stats.applied);
        println!("   Would have passed on: {} jobs", stats.passed);
    }

    result
}

/// Opens the ledger; a dry run still reads history but never writes
fn open_ledger(config: &AppConfig, session: &SessionContext) -> Result<SwipeLedger> {
    let ledger = match &config.ledger_path {
        Some(path) => SwipeLedger::open(path, session.user_id.as_str())?,
        None => {
            tracing::warn!("no data directory available, swipes will not be saved");
            SwipeLedger::in_memory(session.user_id.as_str())
        }
    };

    if config.dry_run {
        Ok(ledger.into_dry_run())
    } else {
        Ok(ledger)
    }
}

/// Filters the catalog into a deck, hiding jobs already swiped unless asked not to
fn deck_for(
    catalog: &[Job],
    filter: &mut JobFilter,
    ledger: &SwipeLedger,
    include_swiped: bool,
) -> Vec<Job> {
    if !include_swiped {
        filter.exclude_ids = ledger.swiped_job_ids();
    }
    filter_jobs(catalog, filter)
}

/// Suspends the TUI terminal to allow external programs to run
fn suspend_terminal<B: ratatui::backend::Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Resumes the TUI terminal after external program exits
fn resume_terminal<B: ratatui::backend::Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
) -> io::Result<()> {
    enable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        EnterAlternateScreen,
        EnableMouseCapture
    )?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(())
}

/// Toast for a committed decision
fn commit_feedback(ledger: &SwipeLedger, event: &DecisionEvent<String>) -> Option<Toast> {
    if let Some(error) = ledger.last_error() {
        return Some(Toast::Error(error.to_string()));
    }
    match event.decision {
        Decision::Accept => Some(Toast::Success("Applied!".to_string())),
        Decision::Reject => None,
    }
}

/// Main application loop
fn run_loop<B: ratatui::backend::Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
    queue: &mut JobQueue,
    catalog: &[Job],
    filter: &mut JobFilter,
    config: &AppConfig,
    user_config: &mut UserConfig,
) -> Result<()> {
    // Show welcome on first launch or if --welcome flag is set
    let should_show_welcome = config.show_welcome || !user_config.welcome_shown;
    let mut view_state = if should_show_welcome {
        ViewState::Welcome
    } else {
        ViewState::Browsing
    };

    let mut toast: Option<Toast> = None;
    let mut card_area = Rect::default();
    let mut drag_anchor: Option<u16> = None;

    loop {
        let filter_label = filter.job_type_label();

        // Render based on current view state
        terminal.draw(|frame| {
            card_area = main_layout(frame.area()).card;
            render(frame, queue, &filter_label, toast.as_ref());

            // Render overlays
            match view_state {
                ViewState::Help => render_help_overlay(frame),
                ViewState::Summary => {
                    let stats = queue.sink().statistics(queue.len());
                    render_summary(frame, &stats);
                }
                ViewState::Welcome => render_welcome_overlay(frame),
                ViewState::Browsing => {}
            }
        })?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                // Handle overlay-specific input
                match view_state {
                    ViewState::Help => {
                        let action = handle_key_event(key);
                        if matches!(action, KeyAction::Help | KeyAction::Quit | KeyAction::None) {
                            view_state = ViewState::Browsing;
                        }
                        continue;
                    }
                    ViewState::Summary => {
                        // u goes back to the last job, anything else exits
                        if handle_key_event(key) == KeyAction::Undo && queue.undo() {
                            toast = None;
                            view_state = ViewState::Browsing;
                            continue;
                        }
                        break;
                    }
                    ViewState::Welcome => {
                        // Any key dismisses welcome and starts browsing
                        view_state = ViewState::Browsing;

                        // Mark welcome as shown and persist
                        user_config.welcome_shown = true;
                        if let Err(e) = user_config.save() {
                            tracing::warn!(error = %e, "failed to save user config");
                        }
                        continue;
                    }
                    ViewState::Browsing => {}
                }

                let action = handle_key_event(key);
                if action != KeyAction::None {
                    toast = None;
                }

                match action {
                    KeyAction::Quit => {
                        // Show summary before quitting if any decisions were made
                        let stats = queue.sink().statistics(queue.len());
                        if stats.decided() > 0 {
                            view_state = ViewState::Summary;
                        } else {
                            break;
                        }
                    }
                    KeyAction::Apply | KeyAction::Pass => {
                        if queue.is_exhausted() {
                            continue;
                        }
                        let decision = if action == KeyAction::Apply {
                            Decision::Accept
                        } else {
                            Decision::Reject
                        };
                        match queue.commit(decision) {
                            Ok(event) => {
                                toast = commit_feedback(queue.sink(), &event);
                                if queue.is_exhausted() {
                                    view_state = ViewState::Summary;
                                }
                            }
                            Err(e) => tracing::warn!(error = %e, "commit rejected"),
                        }
                    }
                    KeyAction::DragLeft | KeyAction::DragRight => {
                        if queue.is_exhausted() {
                            continue;
                        }
                        let step = if action == KeyAction::DragRight {
                            NUDGE_STEP
                        } else {
                            -NUDGE_STEP
                        };
                        queue.update_gesture(queue.gesture().displacement + step);
                    }
                    KeyAction::Release => {
                        if queue.is_exhausted() || !queue.gesture().active {
                            continue;
                        }
                        release_gesture(queue, &mut toast, &mut view_state);
                    }
                    KeyAction::Undo => {
                        queue.undo();
                    }
                    KeyAction::CycleFilter => {
                        filter.cycle_job_type();
                        let jobs = deck_for(catalog, filter, queue.sink(), config.include_swiped);
                        tracing::info!(
                            filter = %filter.job_type_label(),
                            jobs = jobs.len(),
                            "filter changed"
                        );
                        queue.reset(jobs);
                    }
                    KeyAction::Open => {
                        let Some(website) = queue.current().and_then(|job| job.company_website())
                        else {
                            if queue.current().is_some() {
                                toast = Some(Toast::Error(
                                    "No website for this company".to_string(),
                                ));
                            }
                            continue;
                        };
                        let website = website.to_string();

                        // Suspend terminal before opening external program
                        suspend_terminal(terminal)?;
                        let open_result = open::that(&website);
                        resume_terminal(terminal)?;

                        if let Err(e) = open_result {
                            tracing::warn!(url = %website, error = %e, "failed to open website");
                            toast = Some(Toast::Error(format!("Failed to open website: {}", e)));
                        }
                    }
                    KeyAction::Help => {
                        view_state = ViewState::Help;
                    }
                    KeyAction::None => {}
                }
            }
            Event::Mouse(mouse) => {
                if view_state != ViewState::Browsing || queue.is_exhausted() {
                    continue;
                }

                match handle_mouse_event(mouse) {
                    PointerAction::Press { column, row } => {
                        if contains(card_area, column, row) {
                            drag_anchor = Some(column);
                            toast = None;
                            queue.begin_gesture();
                        }
                    }
                    PointerAction::Drag { column } => {
                        if let Some(anchor) = drag_anchor {
                            let delta = column as i32 - anchor as i32;
                            queue.update_gesture(columns_to_displacement(
                                delta,
                                card_width(card_area),
                            ));
                        }
                    }
                    PointerAction::Release => {
                        if drag_anchor.take().is_some() {
                            release_gesture(queue, &mut toast, &mut view_state);
                        }
                    }
                    PointerAction::None => {}
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// Ends the current drag, committing when it crossed the threshold
fn release_gesture(queue: &mut JobQueue, toast: &mut Option<Toast>, view_state: &mut ViewState) {
    match queue.end_gesture() {
        Ok(Some(event)) => {
            *toast = commit_feedback(queue.sink(), &event);
            if queue.is_exhausted() {
                *view_state = ViewState::Summary;
            }
        }
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "release rejected"),
    }
}
