//! Stepper application state and logic.

use std::time::Instant;
use crate::cpu::{Clock, Datapath, RunState, StepOutcome};
use crate::asm::disasm::{listing_lines, ListingLine};

/// Stepper application state.
pub struct StepperApp {
    /// The datapath being stepped.
    pub datapath: Datapath,
    /// Drives automatic stepping while running.
    pub clock: Clock,
    /// Should we quit?
    pub should_quit: bool,
    /// Status message to display.
    pub status: String,
    /// Memory view scroll offset, in rows of 8 cells.
    pub mem_scroll: usize,
}

impl StepperApp {
    /// Create a stepper around a loaded datapath.
    pub fn new(datapath: Datapath) -> Self {
        let clock = Clock::new(datapath.config().clock_interval());
        Self {
            datapath,
            clock,
            should_quit: false,
            status: "Ready. Press 's' to step, 'r' to run, 'q' to quit.".into(),
            mem_scroll: 0,
        }
    }

    /// Step one micro-op by hand. Stops automatic stepping.
    pub fn step(&mut self) {
        self.datapath.pause();
        self.clock.stop();
        let outcome = self.datapath.step();
        self.status = self.describe(outcome);
    }

    /// Start stepping on every clock tick.
    pub fn run(&mut self, now: Instant) {
        self.datapath.run();
        if self.datapath.is_running() {
            self.clock.start(now);
            self.status = format!("Running, one step every {} ms...", self.clock.interval().as_millis());
        } else {
            self.status = "Nothing to run.".into();
        }
    }

    pub fn pause(&mut self) {
        self.datapath.pause();
        self.clock.stop();
        self.status = format!("Paused at step {}.", self.datapath.current_step());
    }

    /// Step if the clock has fired.
    pub fn tick(&mut self, now: Instant) {
        if !self.clock.poll(now) {
            return;
        }
        if let Some(outcome) = self.datapath.tick() {
            self.status = self.describe(outcome);
        }
        if !self.datapath.is_running() {
            self.clock.stop();
        }
    }

    /// Zero the datapath, keeping the program.
    pub fn reset(&mut self) {
        self.clock.stop();
        self.datapath.reset();
        self.status = "Reset. Ready.".into();
    }

    pub fn scroll_memory(&mut self, down: bool) {
        let rows = self.datapath.memory().size().div_ceil(8);
        if down {
            if self.mem_scroll + 1 < rows {
                self.mem_scroll += 1;
            }
        } else {
            self.mem_scroll = self.mem_scroll.saturating_sub(1);
        }
    }

    /// Program listing with the next-step marker.
    pub fn get_listing(&self) -> Vec<ListingLine> {
        listing_lines(self.datapath.program(), self.datapath.current_step())
    }

    fn describe(&self, outcome: StepOutcome) -> String {
        match outcome {
            StepOutcome::Executed(entry) => {
                let suffix = if self.datapath.status() == RunState::Completed { "  (completed)" } else { "" };
                format!("Step {}: {}  →  {}{}", entry.step, entry.operation, entry.result, suffix)
            }
            StepOutcome::Restarted => "End of program, back to step 0.".into(),
        }
    }
}

/// Run the stepper on a loaded datapath. Returns the datapath as left when
/// the user quits.
pub fn run_stepper(datapath: Datapath) -> std::io::Result<Datapath> {
    use crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    };
    use ratatui::prelude::*;
    use std::io::stdout;
    use std::time::Duration;

    const FRAME: Duration = Duration::from_millis(50);

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = StepperApp::new(datapath);

    loop {
        terminal.draw(|frame| {
            super::ui::draw(frame, &app);
        })?;

        let timeout = app
            .clock
            .until_next_tick(Instant::now())
            .map_or(FRAME, |d| d.min(FRAME));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => app.should_quit = true,
                        KeyCode::Char('s') => app.step(),
                        KeyCode::Char('r') => app.run(Instant::now()),
                        KeyCode::Char('p') => app.pause(),
                        KeyCode::Char(' ') => {
                            if app.datapath.is_running() {
                                app.pause();
                            } else {
                                app.run(Instant::now());
                            }
                        }
                        KeyCode::Char('x') => app.reset(),
                        KeyCode::Up => app.scroll_memory(false),
                        KeyCode::Down => app.scroll_memory(true),
                        _ => {}
                    }
                }
            }
        }

        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(app.datapath)
}
