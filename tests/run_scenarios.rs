use std::time::Duration;

use grid_pathfinding_viz::algorithms::{AlgorithmKind, Heuristic};
use grid_pathfinding_viz::controller::{
    Control, Immediate, Phase, RunController, RunOptions, Scheduler, Tick, PAUSE_POLL_INTERVAL,
};
use grid_pathfinding_viz::grid::{Cell, Grid, Position};

const STEP: Duration = Duration::from_millis(10);

fn animated(heuristic: Heuristic) -> RunOptions {
    RunOptions {
        heuristic,
        delay: STEP,
    }
}

/// Never waits; hands back scripted commands on chosen suspensions
/// (counted from 1) and records every requested delay.
#[derive(Default)]
struct Script {
    commands: Vec<(usize, Control)>,
    delays: Vec<Duration>,
}

impl Script {
    fn new(commands: &[(usize, Control)]) -> Self {
        Script {
            commands: commands.to_vec(),
            delays: Vec::new(),
        }
    }
}

impl Scheduler for Script {
    fn suspend(&mut self, delay: Duration) -> Option<Control> {
        self.delays.push(delay);
        let call = self.delays.len();
        self.commands
            .iter()
            .find(|(at, _)| *at == call)
            .map(|&(_, control)| control)
    }
}

#[test]
fn bfs_on_open_five_by_five() {
    let mut controller = RunController::new(5);
    assert!(controller.start(AlgorithmKind::Bfs, animated(Heuristic::Manhattan)));
    let phase = controller.drive(&mut Immediate);

    assert_eq!(phase, Phase::Complete);
    let metrics = controller.metrics();
    assert_eq!(metrics.path_length, 5);
    assert_eq!(metrics.nodes_explored, 21);

    let grid = controller.grid();
    assert_eq!(grid.count(Cell::Path), 3);
    assert_eq!(grid.count(Cell::Visited), 21 - 3);
    for pos in [Position::new(2, 1), Position::new(3, 1), Position::new(3, 2)] {
        assert_eq!(grid.cell(pos), Some(Cell::Path));
    }
}

#[test]
fn enclosed_start_fails_after_exploring_its_region() {
    let grid: Grid = "
        .....#.
        .S...#.
        .....#.
        ######.
        .......
        .....E.
        .......
    "
    .parse()
    .unwrap();
    for kind in AlgorithmKind::ALL {
        let mut controller = RunController::new(7).with_grid(grid.clone());
        controller.start(kind, animated(Heuristic::Euclidean));
        assert_eq!(controller.drive(&mut Immediate), Phase::Failed, "{}", kind);
        assert_eq!(controller.metrics().path_length, 0);
        assert_eq!(controller.metrics().nodes_explored, 15 - 1, "{}", kind);
        assert_eq!(controller.grid().count(Cell::Path), 0);
    }
}

#[test]
fn start_while_running_changes_nothing() {
    let mut controller = RunController::new(15);
    controller.start(AlgorithmKind::Dijkstra, animated(Heuristic::Manhattan));
    for _ in 0..6 {
        controller.tick();
    }
    let grid = controller.grid().clone();
    let metrics = controller.metrics();

    assert!(!controller.start(AlgorithmKind::Bfs, animated(Heuristic::Manhattan)));
    assert_eq!(controller.phase(), Phase::Running);
    assert_eq!(controller.algorithm(), Some(AlgorithmKind::Dijkstra));
    assert_eq!(controller.grid(), &grid);
    assert_eq!(controller.metrics(), metrics);

    controller.pause();
    assert!(!controller.start(AlgorithmKind::Bfs, animated(Heuristic::Manhattan)));
    assert_eq!(controller.grid(), &grid);
}

#[test]
fn pause_and_resume_do_not_change_the_outcome() {
    let mut grid = Grid::new(25);
    for col in 0..20 {
        grid.paint_wall(Position::new(12, col));
    }

    for (kind, heuristic) in [
        (AlgorithmKind::Bfs, Heuristic::Manhattan),
        (AlgorithmKind::Dijkstra, Heuristic::Manhattan),
        (AlgorithmKind::Astar, Heuristic::Euclidean),
    ] {
        let mut plain = RunController::new(25).with_grid(grid.clone());
        plain.start(kind, animated(heuristic));
        let plain_phase = plain.drive(&mut Immediate);

        let mut script = Script::new(&[
            (3, Control::Pause),
            (4, Control::Resume),
            (8, Control::Pause),
            (9, Control::Resume),
        ]);
        let mut interrupted = RunController::new(25).with_grid(grid.clone());
        interrupted.start(kind, animated(heuristic));
        let interrupted_phase = interrupted.drive(&mut script);

        assert_eq!(interrupted_phase, plain_phase, "{}", kind);
        assert_eq!(interrupted.grid(), plain.grid(), "{}", kind);
        assert_eq!(
            interrupted.metrics().path_length,
            plain.metrics().path_length
        );
        assert_eq!(
            interrupted.metrics().nodes_explored,
            plain.metrics().nodes_explored
        );
        assert_eq!(
            script
                .delays
                .iter()
                .filter(|&&d| d == PAUSE_POLL_INTERVAL)
                .count(),
            2
        );
    }
}

#[test]
fn drive_hands_back_a_pause_the_scheduler_never_lifts() {
    let mut plain = RunController::new(9);
    plain.start(AlgorithmKind::Dijkstra, animated(Heuristic::Manhattan));
    plain.drive(&mut Immediate);

    let mut controller = RunController::new(9);
    controller.start(AlgorithmKind::Dijkstra, animated(Heuristic::Manhattan));
    let mut script = Script::new(&[(2, Control::Pause)]);
    assert_eq!(controller.drive(&mut script), Phase::Paused);
    assert_eq!(script.delays, vec![STEP, STEP, PAUSE_POLL_INTERVAL]);
    assert_eq!(controller.metrics().nodes_explored, 2);

    // Nothing lifts the pause, so driving again returns at once.
    assert_eq!(controller.drive(&mut Immediate), Phase::Paused);
    assert!(controller.resume());
    assert_eq!(controller.drive(&mut Immediate), Phase::Complete);
    assert_eq!(controller.grid(), plain.grid());
    assert_eq!(controller.metrics().nodes_explored, plain.metrics().nodes_explored);
}

#[test]
fn path_cells_are_paced_at_half_the_step_delay() {
    let mut controller = RunController::new(5);
    controller.start(AlgorithmKind::Bfs, animated(Heuristic::Manhattan));
    let mut script = Script::default();
    controller.drive(&mut script);

    let visits = script.delays.iter().filter(|&&d| d == STEP).count();
    let marks = script.delays.iter().filter(|&&d| d == STEP / 2).count();
    assert_eq!(visits, 21);
    assert_eq!(marks, 3);
    assert_eq!(script.delays.len(), visits + marks);
}

#[test]
fn stop_from_scheduler_keeps_painted_cells() {
    let mut controller = RunController::new(15);
    controller.start(AlgorithmKind::Bfs, animated(Heuristic::Manhattan));
    let mut script = Script::new(&[(5, Control::Stop)]);

    assert_eq!(controller.drive(&mut script), Phase::Ready);
    assert_eq!(controller.grid().count(Cell::Visited), 5);
    assert_eq!(controller.metrics().nodes_explored, 5);
    assert_eq!(controller.tick(), Tick::Idle);

    // A fresh run starts from a clean overlay.
    controller.start(AlgorithmKind::Bfs, animated(Heuristic::Manhattan));
    assert_eq!(controller.grid().count(Cell::Visited), 0);
    assert_eq!(controller.drive(&mut Immediate), Phase::Complete);
}

#[test]
fn walls_drawn_mid_run_are_respected() {
    for kind in AlgorithmKind::ALL {
        let mut controller = RunController::new(7);
        controller.start(kind, animated(Heuristic::Manhattan));
        assert!(matches!(controller.tick(), Tick::Visited(_)));
        for col in 0..7 {
            controller.paint_wall(Position::new(3, col));
        }

        assert_eq!(controller.drive(&mut Immediate), Phase::Failed, "{}", kind);
        assert_eq!(controller.grid().count(Cell::Wall), 7, "{}", kind);
        assert_eq!(controller.metrics().nodes_explored, 3 * 7 - 1, "{}", kind);
    }
}

#[test]
fn walls_on_explored_cells_survive_the_path_reveal() {
    let wall = Position::new(2, 1);
    for kind in AlgorithmKind::ALL {
        let mut controller = RunController::new(5);
        controller.start(kind, animated(Heuristic::Manhattan));
        for _ in 0..4 {
            assert!(matches!(controller.tick(), Tick::Visited(_)));
        }
        assert_eq!(controller.grid().cell(wall), Some(Cell::Visited));
        controller.paint_wall(wall);

        assert_eq!(controller.drive(&mut Immediate), Phase::Complete, "{}", kind);
        let grid = controller.grid();
        assert_eq!(grid.cell(wall), Some(Cell::Wall), "{}", kind);
        assert_eq!(grid.count(Cell::Wall), 1, "{}", kind);
        assert_eq!(controller.metrics().path_length, 5, "{}", kind);
    }
}

#[test]
fn clear_path_is_idempotent() {
    let mut controller = RunController::new(15).with_seed(3);
    controller.generate_obstacles(0.2);
    controller.start(AlgorithmKind::Astar, animated(Heuristic::Manhattan));
    controller.drive(&mut Immediate);

    controller.clear_path();
    let once = controller.grid().clone();
    controller.clear_path();
    assert_eq!(controller.grid(), &once);
    assert_eq!(once.count(Cell::Visited) + once.count(Cell::Path), 0);
    assert_eq!(controller.phase(), Phase::Ready);
}

#[test]
fn reset_restores_default_endpoints() {
    for size in [15, 25, 35] {
        let mut controller = RunController::new(size).with_seed(size as u64);
        controller.generate_maze();
        controller.relocate_start(Position::new(0, 0));
        controller.relocate_end(Position::new(size - 1, 0));
        controller.reset();

        let grid = controller.grid();
        assert_eq!(grid.start(), Position::new(1, 1));
        assert_eq!(grid.end(), Position::new(size - 2, size - 2));
        assert_eq!(grid.count(Cell::Empty), size * size - 2);
    }
}
