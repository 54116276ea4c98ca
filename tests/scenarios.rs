use hex_tactics::game::*;
use proptest::prelude::*;

const PLAYER: UnitId = UnitId(1);
const BLOCKER: UnitId = UnitId(2);

fn five_by_five() -> UnitInteractionController {
    let grid = GridIndex::rectangle(5, 5, HexOrientation::PointyTop, ParityRule::OddShifted).unwrap();
    let mut controller = UnitInteractionController::new(grid);
    controller.place_unit(PLAYER, OffsetCoord::new(0, 0), 3, false).unwrap();
    controller
}

fn finish_move(controller: &mut UnitInteractionController) -> StepOutcome {
    for _ in 0..64 {
        match controller.advance() {
            StepOutcome::Stepped { .. } => {}
            other => return other,
        }
    }
    panic!("move never finished");
}

#[test]
fn corner_unit_moves_two_tiles() {
    let mut controller = five_by_five();
    assert!(controller.select(PLAYER));
    assert!(controller.enter_move_mode());

    let origin = controller.grid().tile_at(OffsetCoord::new(0, 0)).unwrap();
    let highlights = controller.highlights().to_vec();
    assert_eq!(highlights.len(), 11);
    assert!(!highlights.contains(&origin));
    assert!(highlights.iter().all(|&t| controller.grid().distance(origin, t) <= 3));

    let outcome = controller.click_tile(OffsetCoord::new(2, 0));
    assert_eq!(outcome, ClickOutcome::Committed { steps: 2 });
    assert_eq!(controller.mode(), InteractionMode::Moving);

    let target = controller.grid().tile_at(OffsetCoord::new(2, 0)).unwrap();
    assert_eq!(finish_move(&mut controller), StepOutcome::Arrived { tile: target });

    let unit = controller.unit(PLAYER).unwrap();
    assert_eq!(controller.grid().coord_of(unit.current_tile()), OffsetCoord::new(2, 0));
    assert_eq!(unit.remaining_movement(), 1);
    assert_eq!(controller.mode(), InteractionMode::Idle);
    assert!(!controller.grid().is_occupied(origin));
    assert!(controller.occupancy_consistent());

    // Selection survives, but clicks need move mode again
    assert_eq!(controller.selected(), Some(PLAYER));
    assert_eq!(controller.click_tile(OffsetCoord::new(3, 0)), ClickOutcome::Ignored);
}

#[test]
fn blocker_forces_a_detour() {
    let mut controller = five_by_five();
    controller.place_unit(BLOCKER, OffsetCoord::new(1, 0), 0, true).unwrap();
    controller.select(PLAYER);
    controller.enter_move_mode();

    assert_eq!(controller.click_tile(OffsetCoord::new(2, 0)), ClickOutcome::Committed { steps: 3 });
    let blocker_tile = controller.grid().tile_at(OffsetCoord::new(1, 0)).unwrap();
    assert!(!controller.pending_steps().contains(&blocker_tile));

    finish_move(&mut controller);
    let unit = controller.unit(PLAYER).unwrap();
    assert_eq!(controller.grid().coord_of(unit.current_tile()), OffsetCoord::new(2, 0));
    assert_eq!(unit.remaining_movement(), 0);
    assert!(controller.occupancy_consistent());
}

#[test]
fn walled_in_unit_cannot_move() {
    let mut controller = five_by_five();
    // (0,0) touches only (0,1) and (1,0) on this grid
    controller.place_unit(BLOCKER, OffsetCoord::new(1, 0), 0, true).unwrap();
    controller.place_unit(UnitId(3), OffsetCoord::new(0, 1), 0, true).unwrap();
    controller.select(PLAYER);
    controller.enter_move_mode();

    assert_eq!(controller.highlights().len(), 11);
    assert_eq!(controller.click_tile(OffsetCoord::new(2, 0)), ClickOutcome::NoPath);
    assert_eq!(controller.mode(), InteractionMode::AwaitingMoveTarget);
}

#[test]
fn irregular_layout_from_ron() {
    let layout = GridLayout::from_ron_str(
        r#"(
            orientation: FlatTop,
            parity: EvenShifted,
            tiles: [
                (column: 0, row: 0),
                (column: 1, row: 0),
                (column: 2, row: 0, movement_cost: 2),
                (column: 2, row: 1),
                (column: 3, row: 1),
            ],
        )"#,
    )
    .unwrap();
    let grid = layout.build_grid().unwrap();
    let start = grid.tile_at(OffsetCoord::new(0, 0)).unwrap();
    let goal = grid.tile_at(OffsetCoord::new(3, 1)).unwrap();

    let path = find_path(&grid, start, goal).unwrap();
    assert_eq!(path.last(), Some(&goal));
    let mut prev = start;
    for &step in &path {
        assert!(grid.tile(prev).neighbors().contains(&step));
        prev = step;
    }
}

#[derive(Debug, Clone)]
enum Op {
    Select,
    MoveMode,
    AttackMode,
    Click(i32, i32),
    Step,
    Reset,
    Place(u32, i32, i32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Select),
        Just(Op::MoveMode),
        Just(Op::AttackMode),
        (0i32..5, 0i32..5).prop_map(|(c, r)| Op::Click(c, r)),
        Just(Op::Step),
        Just(Op::Step),
        Just(Op::Reset),
        (10u32..14, 0i32..5, 0i32..5).prop_map(|(id, c, r)| Op::Place(id, c, r)),
    ]
}

proptest! {
    #[test]
    fn occupancy_stays_consistent(ops in prop::collection::vec(op(), 1..60)) {
        let mut controller = five_by_five();
        for op in ops {
            match op {
                Op::Select => { controller.select(PLAYER); }
                Op::MoveMode => { controller.enter_move_mode(); }
                Op::AttackMode => { controller.enter_attack_mode(); }
                Op::Click(c, r) => { controller.click_tile(OffsetCoord::new(c, r)); }
                Op::Step => { controller.advance(); }
                Op::Reset => controller.reset(),
                Op::Place(id, c, r) => { let _ = controller.place_unit(UnitId(id), OffsetCoord::new(c, r), 1, true); }
            }
            prop_assert!(controller.occupancy_consistent());
            let occupied = controller.grid().tiles().filter(|(_, t)| t.is_occupied()).count();
            prop_assert_eq!(occupied, controller.units().count());
            prop_assert!(controller.unit(PLAYER).unwrap().remaining_movement() <= 3);
        }
    }
}
