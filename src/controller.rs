//! Run/pause/resume/stop state machine that drives a search one visible
//! step at a time.
//!
//! Everything here is single-threaded. A run advances only through
//! [`RunController::tick`], and each tick makes at most one cell change
//! visible. Pauses and stops are plain state changes observed by the next
//! tick, so an external event loop can interleave edits, control commands
//! and rendering between ticks. [`RunController::drive`] is the blocking
//! form of that loop, suspending through a [`Scheduler`] between ticks.

use crate::algorithms::{AlgorithmKind, Heuristic, PathfindingAlgorithm, SearchStep};
use crate::error::EngineError;
use crate::grid::{Cell, Grid, Position};
use crate::statistics::Metrics;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// How long a paused [`RunController::drive`] loop waits between checks.
pub const PAUSE_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Ready,
    Running,
    Paused,
    Complete,
    Failed,
}

impl Phase {
    /// Running or paused: a run exists and another may not start.
    pub fn is_active(self) -> bool {
        matches!(self, Phase::Running | Phase::Paused)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Ready => "Ready",
            Phase::Running => "Running",
            Phase::Paused => "Paused",
            Phase::Complete => "Complete",
            Phase::Failed => "No Path Found",
        })
    }
}

/// Animation speed presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum Speed {
    Slow,
    #[default]
    Medium,
    Fast,
    Instant,
}

impl Speed {
    pub fn delay(self) -> Duration {
        Duration::from_millis(match self {
            Speed::Slow => 100,
            Speed::Medium => 50,
            Speed::Fast => 10,
            Speed::Instant => 0,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOptions {
    /// Only consulted by A*.
    pub heuristic: Heuristic,
    /// Pause after each visited cell; path cells use half of it. Zero runs
    /// the search back-to-back and renders once at the end.
    pub delay: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            heuristic: Heuristic::default(),
            delay: Speed::default().delay(),
        }
    }
}

/// Sinks for everything a front end needs to reflect. All methods default
/// to doing nothing.
pub trait RunObserver {
    fn render(&mut self, _grid: &Grid) {}
    fn on_status_change(&mut self, _phase: Phase) {}
    fn on_metrics_change(&mut self, _metrics: &Metrics) {}
    fn on_error(&mut self, _error: &EngineError) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl RunObserver for NullObserver {}

/// Time source for execution-time measurement.
pub trait Clock {
    /// Time elapsed since some fixed origin.
    fn now(&self) -> Duration;
}

pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        MonotonicClock {
            origin: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Commands a scheduler may hand back from a suspension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Pause,
    Resume,
    Stop,
}

/// Yield hook called by [`RunController::drive`] between ticks.
pub trait Scheduler {
    /// Gives up control for `delay`. A command returned here is applied
    /// before the next tick.
    fn suspend(&mut self, delay: Duration) -> Option<Control>;
}

/// Blocks the thread for each delay.
#[derive(Debug, Default, Clone, Copy)]
pub struct SleepScheduler;

impl Scheduler for SleepScheduler {
    fn suspend(&mut self, delay: Duration) -> Option<Control> {
        thread::sleep(delay);
        None
    }
}

/// Returns immediately without waiting.
#[derive(Debug, Default, Clone, Copy)]
pub struct Immediate;

impl Scheduler for Immediate {
    fn suspend(&mut self, _delay: Duration) -> Option<Control> {
        None
    }
}

/// What a single [`RunController::tick`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// No run is progressing (none active, or paused).
    Idle,
    Visited(Position),
    PathMarked(Position),
    /// The run ended in this phase (Complete or Failed).
    Finished(Phase),
}

enum ActiveRun {
    Searching(Box<dyn PathfindingAlgorithm>),
    /// Painting path cells; `next` indexes the next cell to mark.
    Revealing { path: Vec<Position>, next: usize },
}

pub struct RunController<O: RunObserver = NullObserver> {
    grid: Grid,
    phase: Phase,
    metrics: Metrics,
    options: RunOptions,
    active: Option<ActiveRun>,
    algorithm: Option<AlgorithmKind>,
    started_at: Duration,
    observer: O,
    clock: Box<dyn Clock>,
    rng: StdRng,
}

impl RunController<NullObserver> {
    pub fn new(grid_size: usize) -> Self {
        RunController::with_observer(grid_size, NullObserver)
    }
}

impl<O: RunObserver> RunController<O> {
    pub fn with_observer(grid_size: usize, observer: O) -> Self {
        RunController {
            grid: Grid::new(grid_size),
            phase: Phase::Ready,
            metrics: Metrics::default(),
            options: RunOptions::default(),
            active: None,
            algorithm: None,
            started_at: Duration::ZERO,
            observer,
            clock: Box::new(MonotonicClock::default()),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Makes the maze and obstacle generators reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Replaces the grid wholesale, e.g. with one parsed from text.
    /// Any active run is stopped first.
    pub fn with_grid(mut self, grid: Grid) -> Self {
        self.stop();
        self.grid = grid;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    /// Algorithm of the active run, if any.
    pub fn algorithm(&self) -> Option<AlgorithmKind> {
        self.algorithm
    }

    pub fn options(&self) -> RunOptions {
        self.options
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Begins a run. Rejected, returning `false`, while another run is
    /// running or paused.
    pub fn start(&mut self, algorithm: AlgorithmKind, options: RunOptions) -> bool {
        if !self.begin(algorithm, options) {
            return false;
        }
        match algorithm.create(&self.grid, options.heuristic) {
            Ok(search) => self.attach(search),
            Err(e) => {
                self.fault(e);
            }
        }
        true
    }

    /// Like [`start`](Self::start) but with a search built by the caller.
    pub fn start_with(&mut self, search: Box<dyn PathfindingAlgorithm>, options: RunOptions) -> bool {
        if !self.begin(search.kind(), options) {
            return false;
        }
        self.attach(search);
        true
    }

    fn begin(&mut self, algorithm: AlgorithmKind, options: RunOptions) -> bool {
        if self.phase.is_active() {
            warn!(phase = %self.phase, %algorithm, "start rejected: a run is already active");
            return false;
        }

        self.options = options;
        self.grid.clear_search_overlay();
        self.metrics = Metrics::default();
        self.started_at = self.clock.now();
        self.algorithm = Some(algorithm);
        self.set_phase(Phase::Running);
        self.observer.on_metrics_change(&self.metrics);
        debug!(
            %algorithm,
            heuristic = %options.heuristic,
            delay_ms = options.delay.as_millis() as u64,
            "run started"
        );
        true
    }

    fn attach(&mut self, search: Box<dyn PathfindingAlgorithm>) {
        self.active = Some(ActiveRun::Searching(search));
        if self.animated() {
            self.observer.render(&self.grid);
        }
    }

    /// Advances the active run by one visible change. Does nothing unless
    /// the phase is Running.
    pub fn tick(&mut self) -> Tick {
        if self.phase != Phase::Running {
            return Tick::Idle;
        }
        let Some(run) = self.active.as_mut() else {
            return Tick::Idle;
        };

        match run {
            ActiveRun::Searching(search) => match search.step(&self.grid) {
                Ok(SearchStep::Visited(position)) => {
                    self.grid.set_cell(position, Cell::Visited);
                    self.metrics.nodes_explored += 1;
                    self.observer.on_metrics_change(&self.metrics);
                    if self.animated() {
                        self.observer.render(&self.grid);
                    }
                    Tick::Visited(position)
                }
                Ok(SearchStep::Found(path)) => {
                    self.metrics.path_length = path.len();
                    self.active = Some(ActiveRun::Revealing { path, next: 1 });
                    self.tick()
                }
                Ok(SearchStep::Exhausted) => self.finish(Phase::Failed),
                Err(e) => self.fault(e),
            },
            ActiveRun::Revealing { path, next } => {
                // Endpoints keep their own markers, and walls drawn on path
                // cells during the run are left standing.
                while *next + 1 < path.len() {
                    let position = path[*next];
                    *next += 1;
                    if self.grid.cell(position) == Some(Cell::Wall) {
                        warn!(%position, "path crosses a wall drawn during the run");
                        continue;
                    }
                    self.grid.set_cell(position, Cell::Path);
                    if self.animated() {
                        self.observer.render(&self.grid);
                    }
                    return Tick::PathMarked(position);
                }
                self.finish(Phase::Complete)
            }
        }
    }

    /// Ticks until the run is no longer active, suspending through
    /// `scheduler` after each visible change and while paused. Commands
    /// returned by the scheduler take effect before the next tick.
    ///
    /// While paused the scheduler is polled once per [`PAUSE_POLL_INTERVAL`];
    /// if it hands back no command, `drive` returns [`Phase::Paused`] so the
    /// caller can resume and drive again.
    pub fn drive<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) -> Phase {
        loop {
            let delay = match self.phase {
                Phase::Running => match self.tick() {
                    Tick::Visited(_) => self.options.delay,
                    Tick::PathMarked(_) => self.options.delay / 2,
                    Tick::Idle | Tick::Finished(_) => Duration::ZERO,
                },
                Phase::Paused => PAUSE_POLL_INTERVAL,
                _ => return self.phase,
            };
            if delay.is_zero() {
                continue;
            }
            match scheduler.suspend(delay) {
                Some(Control::Pause) => {
                    self.pause();
                }
                Some(Control::Resume) => {
                    self.resume();
                }
                Some(Control::Stop) => {
                    self.stop();
                }
                None if self.phase == Phase::Paused => return self.phase,
                None => {}
            }
        }
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != Phase::Running {
            warn!(phase = %self.phase, "pause ignored: no run is running");
            return false;
        }
        debug!("run paused");
        self.set_phase(Phase::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != Phase::Paused {
            warn!(phase = %self.phase, "resume ignored: no run is paused");
            return false;
        }
        debug!("run resumed");
        self.set_phase(Phase::Running);
        true
    }

    /// Abandons any active run and returns to Ready. Cells already painted
    /// stay painted. Returns whether a run was abandoned.
    pub fn stop(&mut self) -> bool {
        let was_active = self.phase.is_active();
        if was_active {
            debug!(phase = %self.phase, "run stopped");
        }
        self.active = None;
        self.algorithm = None;
        self.set_phase(Phase::Ready);
        was_active
    }

    /// Stops, then restores an empty grid of the same size.
    pub fn reset(&mut self) {
        self.stop();
        self.grid.reset();
        self.reset_metrics();
        self.observer.render(&self.grid);
    }

    /// Stops, then removes the Visited/Path overlay.
    pub fn clear_path(&mut self) {
        self.stop();
        self.grid.clear_search_overlay();
        self.reset_metrics();
        self.observer.render(&self.grid);
    }

    /// Stops, then replaces the grid with an empty one of size `size`
    /// (clamped to the minimum).
    pub fn change_grid_size(&mut self, size: usize) {
        self.stop();
        self.grid = Grid::new(size);
        self.reset_metrics();
        self.observer.render(&self.grid);
    }

    pub fn generate_maze(&mut self) {
        self.stop();
        self.grid.generate_maze(&mut self.rng);
        self.reset_metrics();
        self.observer.render(&self.grid);
    }

    pub fn generate_obstacles(&mut self, density: f64) {
        self.stop();
        self.grid.generate_obstacles(density, &mut self.rng);
        self.reset_metrics();
        self.observer.render(&self.grid);
    }

    // Edits are allowed mid-run; the search sees them on its next step.

    pub fn set_cell(&mut self, position: Position, cell: Cell) {
        self.grid.set_cell(position, cell);
        self.observer.render(&self.grid);
    }

    pub fn toggle_wall(&mut self, position: Position) {
        self.grid.toggle_wall(position);
        self.observer.render(&self.grid);
    }

    pub fn paint_wall(&mut self, position: Position) {
        self.grid.paint_wall(position);
        self.observer.render(&self.grid);
    }

    pub fn erase_wall(&mut self, position: Position) {
        self.grid.erase_wall(position);
        self.observer.render(&self.grid);
    }

    pub fn relocate_start(&mut self, position: Position) {
        self.grid.relocate_start(position);
        self.observer.render(&self.grid);
    }

    pub fn relocate_end(&mut self, position: Position) {
        self.grid.relocate_end(position);
        self.observer.render(&self.grid);
    }

    fn animated(&self) -> bool {
        !self.options.delay.is_zero()
    }

    fn finish(&mut self, phase: Phase) -> Tick {
        let elapsed = self.clock.now().saturating_sub(self.started_at);
        self.metrics.execution_time_ms = elapsed.as_secs_f64() * 1000.0;
        self.active = None;
        self.algorithm = None;
        info!(
            outcome = %phase,
            path_length = self.metrics.path_length,
            nodes_explored = self.metrics.nodes_explored,
            execution_time_ms = self.metrics.execution_time_ms,
            "run finished"
        );
        self.observer.on_metrics_change(&self.metrics);
        if !self.animated() {
            self.observer.render(&self.grid);
        }
        self.set_phase(phase);
        Tick::Finished(phase)
    }

    fn fault(&mut self, e: EngineError) -> Tick {
        error!(error = %e, "search faulted");
        self.observer.on_error(&e);
        self.finish(Phase::Failed)
    }

    fn reset_metrics(&mut self) {
        self.metrics = Metrics::default();
        self.observer.on_metrics_change(&self.metrics);
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            self.phase = phase;
            self.observer.on_status_change(phase);
        }
    }
}
