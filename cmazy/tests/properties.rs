use cmazy::{
    algorithms::{DepthFirstSearch, Random},
    dims::Dims,
    grid::{CellTag, Grid, DISTANCE},
    paths::PathAdjacency,
    report::Summary,
    runner::{RunRecord, Strategy},
    IntegrityError, Maze, MazeError, MazeSpec,
};
use hashbrown::HashSet;
use rand::SeedableRng as _;

const SIZES: [(i32, i32); 6] = [(5, 5), (7, 5), (5, 9), (11, 11), (21, 13), (31, 21)];

fn mazes() -> impl Iterator<Item = Maze> {
    SIZES.into_iter().flat_map(|(w, h)| {
        [false, true].into_iter().flat_map(move |toroidal| {
            (0..4).map(move |seed| {
                Maze::generate(&MazeSpec {
                    toroidal,
                    seed: Some(seed),
                    ..MazeSpec::new(w, h)
                })
                .unwrap()
            })
        })
    })
}

fn adjacent(maze: &Maze, a: Dims, b: Dims) -> bool {
    maze.adjacency().neighbors(a).contains(&b)
}

#[test]
fn carved_maze_is_a_spanning_tree() {
    for maze in mazes() {
        let adj = maze.adjacency();
        let rooms = ((maze.size().0 - 1) / 2 * ((maze.size().1 - 1) / 2)) as usize;

        assert_eq!(adj.len(), 2 * rooms - 1);
        assert_eq!(adj.edge_count(), adj.len() - 1);
        assert_eq!(adj.reachable_from(maze.start()), adj.len());
        assert!(adj.is_tree(maze.start()));
    }
}

#[test]
fn adjacency_is_symmetric() {
    for maze in mazes() {
        let adj = maze.adjacency();
        assert!(adj.is_symmetric());
        for a in adj.cells() {
            for &b in adj.neighbors(a) {
                assert!(adj.neighbors(b).contains(&a), "{a} -> {b}");
            }
        }
    }
}

#[test]
fn distances_are_consistent() {
    for maze in mazes() {
        let dist = maze.distances();
        assert_eq!(dist.get(maze.exit()), Some(0));
        assert_eq!(dist.len(), maze.walkable_count());

        for cell in maze.adjacency().cells().filter(|&c| c != maze.exit()) {
            let d = dist.get(cell).unwrap();
            assert!(maze
                .adjacency()
                .neighbors(cell)
                .iter()
                .any(|&n| dist.get(n) == Some(d - 1)));
        }
    }
}

fn check_run(maze: &Maze, record: &RunRecord) {
    let explored: HashSet<_> = record.explored().iter().copied().collect();
    assert_eq!(explored.len(), record.steps());
    assert_eq!(record.explored()[0], maze.start());

    let segments = record.segments();
    assert_eq!(segments[0][0], maze.start());
    assert_eq!(segments.last().and_then(|s| s.last()), Some(&maze.exit()));

    let mut seen = HashSet::new();
    for segment in segments {
        if !seen.is_empty() {
            assert!(seen.iter().any(|&c| adjacent(maze, c, segment[0])));
        }
        for pair in segment.windows(2) {
            assert!(adjacent(maze, pair[0], pair[1]));
        }
        seen.extend(segment.iter().copied());
    }
    assert_eq!(seen, explored);

    let route = record.route();
    assert_eq!(route.first(), Some(&maze.start()));
    assert_eq!(route.last(), Some(&maze.exit()));
    assert_eq!(route.len() as u32, maze.start_distance() + 1);
    for pair in route.windows(2) {
        assert!(adjacent(maze, pair[0], pair[1]));
    }
}

#[test]
fn every_runner_solves_every_maze() {
    for maze in mazes() {
        for strategy in Strategy::ALL {
            let record = maze.run(&strategy, &mut maze.rng()).unwrap();
            check_run(&maze, &record);
        }
    }
}

#[test]
fn deterministic_runners_repeat() {
    let maze = Maze::generate(&MazeSpec {
        seed: Some(99),
        ..MazeSpec::new(25, 17)
    })
    .unwrap();

    for strategy in Strategy::ALL.into_iter().filter(|s| s.is_deterministic()) {
        let first = maze.run(&strategy, &mut Random::seed_from_u64(1)).unwrap();
        let second = maze.run(&strategy, &mut Random::seed_from_u64(2)).unwrap();
        assert_eq!(first, second, "{strategy}");
    }
}

#[test]
fn random_runner_terminates_for_any_seed() {
    let maze = Maze::generate(&MazeSpec {
        seed: Some(5),
        ..MazeSpec::new(15, 15)
    })
    .unwrap();

    let mut lengths = HashSet::new();
    for seed in 0..32 {
        let record = maze
            .run(&Strategy::RandomChoice, &mut Random::seed_from_u64(seed))
            .unwrap();
        check_run(&maze, &record);
        lengths.insert(record.steps());
    }
    assert!(lengths.len() > 1, "every seed explored {lengths:?} cells");
}

#[test]
fn same_seed_same_grid() {
    let spec = MazeSpec {
        seed: Some(1234),
        ..MazeSpec::new(41, 31)
    };
    let a = Maze::generate(&spec).unwrap();
    let b = Maze::generate(&spec).unwrap();
    assert_eq!(a.grid().cells(), b.grid().cells());
    assert_eq!(a.adjacency(), b.adjacency());
}

#[test]
fn smallest_maze_scenario() {
    let maze = Maze::generate(&MazeSpec {
        start: Some(Dims(1, 1)),
        exit: Some(Dims(3, 3)),
        seed: Some(0),
        ..MazeSpec::new(5, 5)
    })
    .unwrap();

    let interior: HashSet<_> = Dims::iter_fill(Dims(1, 1), Dims(4, 4)).collect();
    assert_eq!(interior.len(), 9);
    assert_eq!(maze.walkable_count(), 7);
    assert!(maze.adjacency().cells().all(|c| interior.contains(&c)));

    let record = maze
        .run(&Strategy::RightHandRule, &mut maze.rng())
        .unwrap();
    assert!(record.explored().iter().all(|c| interior.contains(c)));
    assert!(record.steps() <= 7);
    check_run(&maze, &record);
}

#[test]
fn adjacency_rebuild_is_identical() {
    for maze in mazes().take(8) {
        assert_eq!(&PathAdjacency::build(maze.grid()), maze.adjacency());
    }
}

#[test]
fn bad_sizes_rejected_before_mutation() {
    for size in [Dims(4, 5), Dims(5, 4), Dims(3, 5), Dims(6, 6)] {
        assert!(matches!(
            Maze::generate(&MazeSpec {
                size,
                ..Default::default()
            }),
            Err(MazeError::InvalidDimension { .. })
        ));

        let mut grid = Grid::new(size, false, CellTag::Lane).unwrap();
        let before = grid.cells().clone();
        let mut rng = Random::seed_from_u64(0);
        assert!(DepthFirstSearch
            .carve(&mut grid, Dims(1, 1), Dims(3, 3), &mut rng)
            .is_err());
        assert_eq!(grid.cells(), &before);
    }
}

#[test]
fn distance_overlay_is_transient() {
    let maze = Maze::generate(&MazeSpec {
        seed: Some(6),
        ..MazeSpec::new(13, 9)
    })
    .unwrap();
    let painted = maze.paint_distances().unwrap();
    assert_eq!(painted.cells(), maze.grid().cells());

    let overlay = painted.saved(DISTANCE).unwrap();
    for (pos, d) in maze.distances().iter() {
        if pos != maze.start() && pos != maze.exit() {
            assert_eq!(overlay[pos], CellTag::Distance(d));
        }
    }
}

#[test]
fn parallel_summary_matches_sequential() {
    for maze in mazes().step_by(5) {
        assert_eq!(
            Summary::collect(&maze, &Strategy::ALL, true).unwrap(),
            Summary::collect(&maze, &Strategy::ALL, false).unwrap()
        );
    }
}

#[test]
fn broken_topology_is_reported() {
    let maze = Maze::generate(&MazeSpec {
        seed: Some(2),
        ..MazeSpec::new(9, 9)
    })
    .unwrap();

    let mut grid = maze.grid().clone();
    // wall off the exit
    let doors = [Dims(6, 7), Dims(7, 6)];
    let removed = doors
        .iter()
        .filter(|&&d| maze.adjacency().contains(d))
        .count();
    grid.set_values(doors, CellTag::Wall);
    assert_eq!(
        Maze::from_carved(grid, maze.start(), maze.exit(), maze.seed()).unwrap_err(),
        MazeError::BuildIntegrity(IntegrityError::Unlabeled {
            labeled: 1,
            total: maze.walkable_count() - removed
        })
    );
}
