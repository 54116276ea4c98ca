use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use hex_tactics::game::*;
use rand::Rng;
use std::collections::VecDeque;
use std::time::Duration;

const PLAYER: UnitId = UnitId(0);
const BLOCKER_COUNT: u32 = 4;
const STEP_SECONDS: f32 = 0.25;

/// Controller notifications re-published as bevy events
#[derive(Event)]
struct GridEvent(InteractionEvent);

#[derive(Clone, Copy, Debug)]
enum DemoCommand {
    Select,
    AttackMode,
    MoveMode,
    ClickRandomHighlight,
    RestoreMovement,
    Reset,
}

#[derive(Resource)]
struct DemoScript {
    commands: VecDeque<DemoCommand>,
}

impl Default for DemoScript {
    fn default() -> Self {
        use DemoCommand::*;
        Self {
            commands: VecDeque::from([
                Select,
                AttackMode,
                MoveMode,
                ClickRandomHighlight,
                RestoreMovement,
                MoveMode,
                ClickRandomHighlight,
                Reset,
            ]),
        }
    }
}

#[derive(Resource)]
struct StepTimer(Timer);

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => match GridConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Could not load {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => GridConfig::default(),
    };

    App::new()
        .add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(1.0 / 30.0))))
        .add_plugins(LogPlugin::default())
        .add_event::<GridEvent>()
        .insert_resource(config)
        .insert_resource(DemoScript::default())
        .insert_resource(StepTimer(Timer::from_seconds(STEP_SECONDS, TimerMode::Repeating)))
        .add_systems(Startup, setup_grid)
        .add_systems(Update, (
            run_script,
            advance_movement,
            forward_events,
            log_events,
        ).chain())
        .run();
}

fn setup_grid(
    mut commands: Commands,
    config: Res<GridConfig>,
    mut exit: EventWriter<AppExit>,
) {
    let grid = match config.build_grid() {
        Ok(grid) => grid,
        Err(err) => {
            error!("Grid construction failed: {}", err);
            exit.write(AppExit::error());
            return;
        }
    };

    let mut controller = UnitInteractionController::new(grid);
    if let Err(err) = controller.place_unit(PLAYER, OffsetCoord::new(0, 0), config.unit_movement, false) {
        error!("Could not place the player unit: {}", err);
        exit.write(AppExit::error());
        return;
    }

    // Scatter a few enemies; collisions are simply skipped
    let mut rng = rand::rng();
    for i in 1..=BLOCKER_COUNT {
        let coord = OffsetCoord::new(
            rng.random_range(0..config.columns),
            rng.random_range(0..config.rows),
        );
        if let Err(err) = controller.place_unit(UnitId(i), coord, 0, true) {
            debug!("Skipped blocker {}: {}", i, err);
        }
    }

    commands.insert_resource(controller);
}

fn run_script(
    controller: Option<ResMut<UnitInteractionController>>,
    mut script: ResMut<DemoScript>,
    config: Res<GridConfig>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(mut controller) = controller else { return };
    if controller.mode() == InteractionMode::Moving {
        return;
    }
    let Some(command) = script.commands.pop_front() else {
        info!("Demo finished");
        exit.write(AppExit::Success);
        return;
    };

    match command {
        DemoCommand::Select => {
            controller.select(PLAYER);
        }
        DemoCommand::AttackMode => {
            controller.enter_attack_mode();
            info!("Enemies in attack range: {:?}", controller.attackable_units());
        }
        DemoCommand::MoveMode => {
            controller.enter_move_mode();
        }
        DemoCommand::ClickRandomHighlight => {
            let free: Vec<OffsetCoord> = controller
                .highlights()
                .iter()
                .filter(|&&t| !controller.grid().is_occupied(t))
                .map(|&t| controller.grid().coord_of(t))
                .collect();
            if free.is_empty() {
                warn!("Nothing to click");
                return;
            }
            let target = free[rand::rng().random_range(0..free.len())];
            let outcome = controller.click_tile(target);
            info!("Clicked {} -> {:?}", target, outcome);
        }
        DemoCommand::RestoreMovement => {
            if let Err(err) = controller.restore_movement(PLAYER, config.unit_movement) {
                warn!("{}", err);
            }
        }
        DemoCommand::Reset => controller.reset(),
    }
}

fn advance_movement(
    controller: Option<ResMut<UnitInteractionController>>,
    mut timer: ResMut<StepTimer>,
    time: Res<Time>,
) {
    let Some(mut controller) = controller else { return };
    if controller.mode() != InteractionMode::Moving {
        return;
    }
    if timer.0.tick(time.delta()).just_finished() {
        controller.advance();
    }
}

fn forward_events(
    controller: Option<ResMut<UnitInteractionController>>,
    mut writer: EventWriter<GridEvent>,
) {
    let Some(mut controller) = controller else { return };
    writer.write_batch(controller.drain_events().into_iter().map(GridEvent));
}

fn log_events(
    mut reader: EventReader<GridEvent>,
    controller: Option<Res<UnitInteractionController>>,
    config: Res<GridConfig>,
) {
    let Some(controller) = controller else { return };
    let grid = controller.grid();

    for GridEvent(event) in reader.read() {
        match event {
            InteractionEvent::Occupied { tile, unit } => {
                let pos = tile_world_position(grid.coord_of(*tile), grid.orientation(), grid.parity(), config.spacing);
                info!("{} now on {} at ({:.2}, {:.2})", unit, grid.coord_of(*tile), pos.x, pos.y);
            }
            InteractionEvent::HighlightsChanged { kind, tiles } => {
                info!("{:?} highlights on {} tiles", kind, tiles.len());
            }
            InteractionEvent::MoveInterrupted { unit, tile } => {
                warn!("{} interrupted at {}", unit, grid.coord_of(*tile));
            }
            other => debug!("{:?}", other),
        }
    }
}
