use maze_forage_core::{Direction, ResourceAllocation, Tile};
use maze_forage_system_dfs::{Dfs, StepOutcome};
use maze_forage_world::{MazeBuilder, PlayerInterface, Resources, Terrain};

/// Fabricates an interface over a grid whose walkable interior is chosen
/// by the predicate, with the player placed at `start`.
fn scaffold(
    width: u32,
    height: u32,
    start: Tile,
    carved: impl Fn(u32, u32) -> bool,
) -> PlayerInterface {
    let rows = (0..height)
        .map(|y| (0..width).map(|x| carved(x, y)).collect())
        .collect();
    let terrain = Terrain::from_rows(rows).expect("well-formed rows");
    let resources = Resources::new(ResourceAllocation::new(0, 0, 0));
    PlayerInterface::new(MazeBuilder::from_parts(terrain, start, resources))
}

/// 5×5 grid with the whole 3×3 interior carved.
fn open_interface() -> PlayerInterface {
    scaffold(5, 5, Tile::new(2, 2), |x, y| {
        (1..4).contains(&x) && (1..4).contains(&y)
    })
}

fn expect_move(agent: &mut Dfs, interface: &mut PlayerInterface) -> (Direction, Tile) {
    match agent.step(interface).expect("step succeeds") {
        StepOutcome::Moved(step) => (step.direction, step.tile),
        StepOutcome::Done => panic!("agent finished prematurely"),
    }
}

#[test]
fn preference_order_is_up_left_right_down() {
    let mut interface = open_interface();
    let mut agent = Dfs::new(&interface);

    // All four neighbors of the center are open and unvisited: up wins.
    let (first, tile) = expect_move(&mut agent, &mut interface);
    assert_eq!(first, Direction::Up);
    assert_eq!(tile, Tile::new(2, 1));

    // From (2, 1) the tile above is border wall, so left is next.
    let (second, tile) = expect_move(&mut agent, &mut interface);
    assert_eq!(second, Direction::Left);
    assert_eq!(tile, Tile::new(1, 1));

    // From (1, 1) up and left are walls and right is visited: down.
    let (third, tile) = expect_move(&mut agent, &mut interface);
    assert_eq!(third, Direction::Down);
    assert_eq!(tile, Tile::new(1, 2));
}

#[test]
fn right_wins_over_down_when_both_are_open() {
    // At (1, 1) up and left are border walls while right and down are
    // both carved and unvisited, forcing a right-versus-down contest
    // that the open-interior walk never produces.
    let mut interface = scaffold(4, 4, Tile::new(1, 1), |x, y| {
        (x, y) == (1, 1) || (x, y) == (2, 1) || (x, y) == (1, 2)
    });
    let mut agent = Dfs::new(&interface);

    let (direction, tile) = expect_move(&mut agent, &mut interface);
    assert_eq!(direction, Direction::Right);
    assert_eq!(tile, Tile::new(2, 1));
}

#[test]
fn corridor_is_explored_and_backtracked_to_done() {
    // Single open corridor (1,1)..(3,1) in a 5×3 grid.
    let mut interface = scaffold(5, 3, Tile::new(1, 1), |x, y| (1..4).contains(&x) && y == 1);
    let mut agent = Dfs::new(&interface);

    let mut moves = Vec::new();
    loop {
        match agent.step(&mut interface).expect("step succeeds") {
            StepOutcome::Moved(step) => moves.push((step.direction, step.tile)),
            StepOutcome::Done => break,
        }
    }

    assert_eq!(
        moves,
        vec![
            (Direction::Right, Tile::new(2, 1)),
            (Direction::Right, Tile::new(3, 1)),
            (Direction::Left, Tile::new(2, 1)),
            (Direction::Left, Tile::new(1, 1)),
        ]
    );
    assert_eq!(interface.player_pos(), Tile::new(1, 1));
    assert_eq!(agent.path(), &[Tile::new(1, 1)]);
}

#[test]
fn boxed_in_agent_reports_done_immediately() {
    let mut interface = scaffold(3, 3, Tile::new(1, 1), |x, y| x == 1 && y == 1);
    let mut agent = Dfs::new(&interface);

    assert_eq!(
        agent.step(&mut interface).expect("step succeeds"),
        StepOutcome::Done
    );
    assert_eq!(agent.visited_count(), 1);
}

#[test]
fn hundred_steps_cover_the_open_interior_without_illegal_moves() {
    let mut interface = open_interface();
    let mut agent = Dfs::new(&interface);

    let mut finished = false;
    for _ in 0..100 {
        match agent.step(&mut interface) {
            Ok(StepOutcome::Moved(_)) => {}
            Ok(StepOutcome::Done) => {
                finished = true;
                break;
            }
            Err(error) => panic!("unexpected step failure: {error}"),
        }
    }

    assert!(finished, "open 3x3 interior should finish within 100 steps");
    assert_eq!(agent.visited_count(), 9);
    for y in 1..4 {
        for x in 1..4 {
            assert!(
                agent.visits(Tile::new(x, y)) >= 1,
                "interior tile ({x}, {y}) never visited"
            );
        }
    }
}
