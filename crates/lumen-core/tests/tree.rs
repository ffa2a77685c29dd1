// File: crates/lumen-core/tests/tree.rs
// Purpose: Decorative tree generation, flower color balance, growth state machine and the animation session.

use rand::rngs::StdRng;
use rand::SeedableRng;

use lumen_core::tree::{calculate_branches, pentagon_vertices, sierpinski_leaves, tree_totals, Branch};
use lumen_core::{
    Animation, AnimationSession, Dataset, FlowerColor, FlowerTally, Point, Record, TreeAnimation, TreeParams,
    TreeState, TreeTotals,
};

fn adoptions() -> Dataset {
    [(2019.0, 1.0), (2019.0, 0.0), (2020.0, 1.0), (2020.0, 1.0), (2021.0, 0.0), (2020.0, 2.0)]
        .into_iter()
        .map(|(year, class)| Record::new().with("year", year).with("class", class))
        .collect()
}

fn small_params() -> TreeParams {
    TreeParams { max_depth: 3, growth_ms: 100.0, bloom_ms: 50.0, ..TreeParams::default() }
}

fn two_trees(params: &TreeParams, seed: u64) -> Vec<Vec<Branch>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let origin = Point::new(400.0, 600.0);
    vec![
        calculate_branches(origin, -std::f64::consts::FRAC_PI_2, params, &mut rng),
        calculate_branches(origin, -std::f64::consts::FRAC_PI_2, params, &mut rng),
    ]
}

#[test]
fn branches_are_generated_parent_first() {
    let params = TreeParams::default();
    let mut rng = StdRng::seed_from_u64(7);
    let branches = calculate_branches(Point::new(0.0, 0.0), -std::f64::consts::FRAC_PI_2, &params, &mut rng);
    assert_eq!(branches.len(), (1 << params.max_depth) - 1);

    let trunk = branches[0];
    assert_eq!(trunk.depth, 1);
    assert_eq!(trunk.width, 30.0);
    assert!((trunk.end.x).abs() < 1e-9 && (trunk.end.y + 200.0).abs() < 1e-9);

    // Pre-order: the trunk's left child comes right after it.
    let left = branches[1];
    assert_eq!(left.depth, 2);
    assert_eq!(left.start, trunk.end);
    assert!((left.width - 21.0).abs() < 1e-9);
    assert!(left.angle <= trunk.angle && left.angle >= trunk.angle - params.branch_angle);
    assert!((left.start.distance(left.end) - 172.0).abs() < 1e-9);

    for d in 1..=params.max_depth {
        let n = branches.iter().filter(|b| b.depth == d).count();
        assert_eq!(n, 1 << (d - 1), "depth {d}");
    }
}

#[test]
fn same_seed_same_tree() {
    let params = TreeParams::default();
    assert_eq!(two_trees(&params, 42), two_trees(&params, 42));
}

#[test]
fn flower_tally_alternates_until_targets_run_out() {
    let mut tally = FlowerTally::new(2, 1);
    let mut colors = Vec::new();
    for _ in 0..5 {
        let (color, next) = tally.next();
        colors.push(color);
        tally = next;
    }
    use FlowerColor::{Boy, Girl};
    assert_eq!(colors, vec![Boy, Girl, Boy, Boy, Girl]);
    assert_eq!((tally.flower_number, tally.boys_drawn, tally.girls_drawn), (5, 2, 1));
}

#[test]
fn sierpinski_pentagon_draws_only_leaves() {
    let center = Point::new(0.0, 0.0);
    assert_eq!(sierpinski_leaves(center, 30.0, 1), vec![(center, 30.0)]);
    assert!(sierpinski_leaves(center, 30.0, 0).is_empty());

    let level2 = sierpinski_leaves(center, 30.0, 2);
    assert_eq!(level2.len(), 5);
    for (p, size) in &level2 {
        assert!((p.distance(center) - 15.0).abs() < 1e-9);
        assert_eq!(*size, 10.0);
    }
    assert_eq!(sierpinski_leaves(center, 60.0, 3).len(), 25);

    let v = pentagon_vertices(Point::new(1.0, 1.0), 2.0);
    assert_eq!(v[0], Point::new(3.0, 1.0));
}

#[test]
fn totals_filter_by_year() {
    let data = adoptions();
    assert_eq!(tree_totals(&data, "year", "class", 2020.0, false), TreeTotals { boys: 2, girls: 0, records: 3 });
    assert_eq!(tree_totals(&data, "year", "class", 2020.0, true), TreeTotals { boys: 3, girls: 1, records: 5 });
    assert_eq!(tree_totals(&data, "year", "class", 1990.0, true), TreeTotals::default());
}

#[test]
fn tree_grows_depth_by_depth_then_blooms() {
    let params = small_params();
    let trees = two_trees(&params, 3);
    let mut rng = StdRng::seed_from_u64(3);
    let totals = TreeTotals { boys: 20, girls: 20, records: 40 };
    let mut anim = TreeAnimation::new(trees, params, totals, &mut rng);

    assert_eq!(anim.state(), TreeState::Idle);
    anim.start();
    assert_eq!(anim.state(), TreeState::GrowingDepth(1));

    assert!(anim.advance(60.0));
    assert_eq!(anim.state(), TreeState::GrowingDepth(1));
    assert!((anim.depth_progress() - 0.6).abs() < 1e-9);

    assert!(anim.advance(40.0));
    assert_eq!(anim.state(), TreeState::GrowingDepth(2));
    assert!(anim.flowers().is_empty(), "no flowers on the trunk");

    assert!(anim.advance(100.0));
    assert_eq!(anim.state(), TreeState::GrowingDepth(3));
    assert_eq!(anim.flowers().len(), 4);

    assert!(anim.advance(100.0));
    assert_eq!(anim.state(), TreeState::Blooming);
    assert_eq!(anim.flowers().len(), 12);
    for f in anim.flowers() {
        assert!((10.0..60.0).contains(&f.size));
    }

    assert!(!anim.advance(50.0));
    assert_eq!(anim.state(), TreeState::Done);
    assert!(anim.is_finished());
}

#[test]
fn flowers_stop_at_the_record_count() {
    let params = small_params();
    let mut rng = StdRng::seed_from_u64(9);
    let totals = TreeTotals { boys: 3, girls: 2, records: 5 };
    let mut anim = TreeAnimation::new(two_trees(&params, 9), params, totals, &mut rng);
    anim.start();
    anim.advance(1_000.0);
    assert_eq!(anim.flowers().len(), 5);
    let tally = anim.tally();
    assert_eq!((tally.boys_drawn, tally.girls_drawn), (3, 2));
}

#[test]
fn create_filters_and_starts() {
    let mut rng = StdRng::seed_from_u64(1);
    let (anim, totals) =
        TreeAnimation::create(&adoptions(), "year", "class", 2019.0, false, (800.0, 600.0), small_params(), &mut rng);
    assert_eq!(totals, TreeTotals { boys: 1, girls: 1, records: 2 });
    assert_eq!(anim.state(), TreeState::GrowingDepth(1));
    assert_eq!(anim.branches().count(), 2 * 7);
    assert!(anim.branches().all(|b| b.depth > 1 || b.start == Point::new(400.0, 600.0)));
}

struct Countdown(f64);

impl Animation for Countdown {
    fn advance(&mut self, dt_ms: f64) -> bool {
        self.0 = (self.0 - dt_ms).max(0.0);
        !self.is_finished()
    }

    fn is_finished(&self) -> bool {
        self.0 <= 0.0
    }
}

#[test]
fn session_ticks_and_restarts() {
    let mut session = AnimationSession::new();
    let short = session.start(Countdown(10.0));
    let long = session.start(Countdown(30.0));
    assert_eq!(session.len(), 2);

    assert_eq!(session.tick(15.0), 1);
    assert!(session.get(short).is_some_and(Countdown::is_finished));
    assert!(!session.is_idle());

    assert!(session.cancel(long));
    assert!(!session.cancel(long));
    assert!(session.is_idle());

    let fresh = session.restart([Countdown(5.0), Countdown(5.0), Countdown(50.0)]);
    assert_eq!(fresh.len(), 3);
    assert!(!session.is_live(short), "restart cancels earlier handles");
    assert!(fresh.iter().all(|&h| session.is_live(h)));
    assert_eq!(session.tick(5.0), 1);
    assert_eq!(session.tick(100.0), 0);
    assert!(session.is_idle());
    assert_eq!(session.cancel_all(), 3);
    assert!(session.is_empty());
}
