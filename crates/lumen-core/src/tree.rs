// File: crates/lumen-core/src/tree.rs
// Summary: Decorative growing tree with Sierpinski-pentagon flowers, as a time-driven state machine.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use skia_safe as skia;
use tracing::debug;

use crate::animation::Animation;
use crate::color::{fill_paint, parse_color, stroke_paint};
use crate::error::Result;
use crate::geometry::Point;
use crate::record::Dataset;
use crate::surface::Viewport;

/// Time for one flower to zoom in, about 39 frames at 60 Hz.
pub const BLOOM_MS: f64 = 640.0;

#[derive(Clone, Debug, PartialEq)]
pub struct TreeParams {
    pub max_depth: u32,
    /// Largest random deviation of a child branch from its parent.
    pub branch_angle: f64,
    pub initial_length: f64,
    pub initial_width: f64,
    pub length_ratio: f64,
    pub width_ratio: f64,
    /// Time to grow one depth level.
    pub growth_ms: f64,
    pub bloom_ms: f64,
    /// Flower radius is drawn uniformly from this range.
    pub flower_size: (f64, f64),
    /// Recursion depth of the pentagon fractal.
    pub pentagon_depth: u32,
    pub branch_color: String,
    pub boy_color: String,
    pub girl_color: String,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: 7,
            branch_angle: FRAC_PI_4,
            initial_length: 200.0,
            initial_width: 30.0,
            length_ratio: 0.86,
            width_ratio: 0.7,
            growth_ms: 2500.0,
            bloom_ms: BLOOM_MS,
            flower_size: (10.0, 60.0),
            pentagon_depth: 3,
            branch_color: "#1F1916".to_string(),
            boy_color: "#164C8F".to_string(),
            girl_color: "#DE78A1".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Branch {
    pub start: Point,
    pub end: Point,
    /// 1 for the trunk.
    pub depth: u32,
    pub width: f64,
    pub angle: f64,
}

impl Branch {
    /// Tip of the branch after `progress` of its growth.
    pub fn tip(&self, progress: f64) -> Point {
        let t = progress.clamp(0.0, 1.0);
        Point::new(
            self.start.x + t * (self.end.x - self.start.x),
            self.start.y + t * (self.end.y - self.start.y),
        )
    }
}

/// Every branch of one tree, parent before children, left subtree first.
pub fn calculate_branches<R: Rng>(origin: Point, angle: f64, params: &TreeParams, rng: &mut R) -> Vec<Branch> {
    let mut out = Vec::new();
    grow(&mut out, origin, params.initial_length, params.initial_width, angle, 1, params, rng);
    out
}

#[allow(clippy::too_many_arguments)]
fn grow<R: Rng>(
    out: &mut Vec<Branch>,
    start: Point,
    length: f64,
    width: f64,
    angle: f64,
    depth: u32,
    params: &TreeParams,
    rng: &mut R,
) {
    if depth > params.max_depth {
        return;
    }
    let end = Point::new(start.x + length * angle.cos(), start.y + length * angle.sin());
    out.push(Branch { start, end, depth, width, angle });

    let left = angle - rng.random::<f64>() * params.branch_angle;
    let right = angle + rng.random::<f64>() * params.branch_angle;
    let (length, width) = (length * params.length_ratio, width * params.width_ratio);
    grow(out, end, length, width, left, depth + 1, params, rng);
    grow(out, end, length, width, right, depth + 1, params, rng);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowerColor {
    Boy,
    Girl,
}

/// Running balance of flower colors: even flowers prefer girls, odd flowers
/// boys, each falling back to the other color once its target is reached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlowerTally {
    pub flower_number: u32,
    pub boys_target: u32,
    pub girls_target: u32,
    pub boys_drawn: u32,
    pub girls_drawn: u32,
}

impl FlowerTally {
    pub fn new(boys_target: u32, girls_target: u32) -> Self {
        Self { boys_target, girls_target, ..Self::default() }
    }

    /// Color of the next flower and the tally after drawing it.
    pub fn next(self) -> (FlowerColor, FlowerTally) {
        let mut t = self;
        t.flower_number += 1;
        let color = if t.flower_number % 2 == 0 {
            if t.girls_drawn < t.girls_target {
                t.girls_drawn += 1;
                FlowerColor::Girl
            } else {
                FlowerColor::Boy
            }
        } else if t.boys_drawn < t.boys_target {
            t.boys_drawn += 1;
            FlowerColor::Boy
        } else {
            FlowerColor::Girl
        };
        (color, t)
    }
}

/// Vertices of a regular pentagon of circumradius `size`.
pub fn pentagon_vertices(center: Point, size: f64) -> [Point; 5] {
    std::array::from_fn(|i| {
        let a = TAU * i as f64 / 5.0;
        Point::new(center.x + size * a.cos(), center.y + size * a.sin())
    })
}

/// Centers and sizes of the visible (innermost) pentagons of a Sierpinski
/// pentagon: each level places five children at half the radius, a third
/// the size.
pub fn sierpinski_leaves(center: Point, size: f64, depth: u32) -> Vec<(Point, f64)> {
    let mut out = Vec::new();
    collect_leaves(&mut out, center, size, depth);
    out
}

fn collect_leaves(out: &mut Vec<(Point, f64)>, center: Point, size: f64, depth: u32) {
    match depth {
        0 => {}
        1 => out.push((center, size)),
        _ => {
            for child in pentagon_vertices(center, size / 2.0) {
                collect_leaves(out, child, size / 3.0, depth - 1);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Flower {
    pub center: Point,
    pub size: f64,
    pub color: FlowerColor,
    /// Clock time the flower was spawned at.
    pub born_ms: f64,
}

/// Running totals shown next to the tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeTotals {
    pub boys: u32,
    pub girls: u32,
    /// Records selected by the year filter; caps the number of flowers.
    pub records: u32,
}

/// Count class values `1` (boys) and `0` (girls) among records whose year is
/// `year` (or up to `year` when `accumulative`).
pub fn tree_totals(data: &Dataset, year_col: &str, class_col: &str, year: f64, accumulative: bool) -> TreeTotals {
    let mut totals = TreeTotals::default();
    for r in data {
        let Some(y) = r.try_get(year_col).and_then(|v| v.as_f64()) else {
            continue;
        };
        let selected = if accumulative { y <= year } else { y == year };
        if !selected {
            continue;
        }
        totals.records += 1;
        match r.try_get(class_col).and_then(|v| v.as_f64()) {
            Some(c) if c == 1.0 => totals.boys += 1,
            Some(c) if c == 0.0 => totals.girls += 1,
            _ => {}
        }
    }
    totals
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeState {
    Idle,
    /// Branches of this depth are growing.
    GrowingDepth(u32),
    /// Every branch is grown; flowers are still opening.
    Blooming,
    Done,
}

/// Two trees sharing one flower tally, grown depth by depth.
pub struct TreeAnimation {
    trees: Vec<Vec<Branch>>,
    params: TreeParams,
    tally: FlowerTally,
    max_flowers: u32,
    flowers: Vec<Flower>,
    state: TreeState,
    /// Time spent in the current depth.
    depth_ms: f64,
    clock_ms: f64,
    rng: StdRng,
}

impl TreeAnimation {
    pub fn new<R: Rng>(trees: Vec<Vec<Branch>>, params: TreeParams, totals: TreeTotals, rng: &mut R) -> Self {
        Self {
            trees,
            params,
            tally: FlowerTally::new(totals.boys, totals.girls),
            max_flowers: totals.records,
            flowers: Vec::new(),
            state: TreeState::Idle,
            depth_ms: 0.0,
            clock_ms: 0.0,
            rng: StdRng::seed_from_u64(rng.random()),
        }
    }

    /// Filter the adoptions, plant two trees at the bottom center of a
    /// `width × height` screen canvas and start growing.
    #[allow(clippy::too_many_arguments)]
    pub fn create<R: Rng>(
        data: &Dataset,
        year_col: &str,
        class_col: &str,
        year: f64,
        accumulative: bool,
        size: (f64, f64),
        params: TreeParams,
        rng: &mut R,
    ) -> (Self, TreeTotals) {
        let totals = tree_totals(data, year_col, class_col, year, accumulative);
        let origin = Point::new(size.0 / 2.0, size.1);
        let first = calculate_branches(origin, -FRAC_PI_2 + rng.random::<f64>() * FRAC_PI_4, &params, rng);
        let second = calculate_branches(origin, -FRAC_PI_2 - rng.random::<f64>() * FRAC_PI_4, &params, rng);
        let mut anim = Self::new(vec![first, second], params, totals, rng);
        anim.start();
        debug!(boys = totals.boys, girls = totals.girls, records = totals.records, "tree created");
        (anim, totals)
    }

    pub fn start(&mut self) {
        if self.state == TreeState::Idle {
            self.state = if self.params.max_depth == 0 { TreeState::Done } else { TreeState::GrowingDepth(1) };
        }
    }

    pub fn state(&self) -> TreeState {
        self.state
    }

    pub fn tally(&self) -> FlowerTally {
        self.tally
    }

    pub fn flowers(&self) -> &[Flower] {
        &self.flowers
    }

    pub fn branches(&self) -> impl Iterator<Item = &Branch> {
        self.trees.iter().flatten()
    }

    /// Growth of the current depth in `[0, 1]`.
    pub fn depth_progress(&self) -> f64 {
        match self.state {
            TreeState::GrowingDepth(_) => (self.depth_ms / self.params.growth_ms).min(1.0),
            TreeState::Idle => 0.0,
            _ => 1.0,
        }
    }

    pub fn flower_progress(&self, flower: &Flower) -> f64 {
        if self.params.bloom_ms <= 0.0 {
            return 1.0;
        }
        ((self.clock_ms - flower.born_ms) / self.params.bloom_ms).clamp(0.0, 1.0)
    }

    /// One flower at the tip of each branch of `depth`, first tree first,
    /// while the cap allows.
    fn spawn_flowers(&mut self, depth: u32) {
        if depth < 2 {
            return;
        }
        let tips = self
            .trees
            .iter()
            .flatten()
            .filter(|b| b.depth == depth)
            .map(|b| b.end)
            .collect::<Vec<_>>();
        let (lo, hi) = self.params.flower_size;
        for tip in tips {
            if self.tally.flower_number >= self.max_flowers {
                break;
            }
            let size = if hi > lo { self.rng.random_range(lo..hi) } else { lo };
            let (color, tally) = self.tally.next();
            self.tally = tally;
            self.flowers.push(Flower { center: tip, size, color, born_ms: self.clock_ms });
        }
    }

    fn all_bloomed(&self) -> bool {
        self.flowers.iter().all(|f| self.flower_progress(f) >= 1.0)
    }

    fn step(&mut self, dt_ms: f64) {
        self.clock_ms += dt_ms;
        let mut budget = dt_ms;
        while let TreeState::GrowingDepth(depth) = self.state {
            let needed = self.params.growth_ms - self.depth_ms;
            if budget < needed {
                self.depth_ms += budget;
                return;
            }
            budget -= needed;
            // flowers spawned on a completed depth start at that instant
            let finished_at = self.clock_ms - budget;
            let clock = std::mem::replace(&mut self.clock_ms, finished_at);
            self.spawn_flowers(depth);
            self.clock_ms = clock;
            self.depth_ms = 0.0;
            self.state = if depth < self.params.max_depth {
                TreeState::GrowingDepth(depth + 1)
            } else {
                TreeState::Blooming
            };
        }
        if self.state == TreeState::Blooming && self.all_bloomed() {
            self.state = TreeState::Done;
        }
    }

    /// Draw the branches on `tree` and the flowers on `flowers`, both
    /// screen-oriented, reflecting the current state.
    pub fn render(&self, tree: &mut Viewport, flowers: &mut Viewport) -> Result<()> {
        tree.clear();
        flowers.clear();
        self.render_branches(tree)?;
        self.render_flowers(flowers)
    }

    pub fn render_branches(&self, vp: &mut Viewport) -> Result<()> {
        let color = parse_color(&self.params.branch_color)?;
        let (current, progress) = match self.state {
            TreeState::Idle => return Ok(()),
            TreeState::GrowingDepth(d) => (d, self.depth_progress()),
            _ => (u32::MAX, 1.0),
        };
        let canvas = vp.canvas();
        for b in self.branches().filter(|b| b.depth <= current) {
            let tip = if b.depth == current { b.tip(progress) } else { b.end };
            canvas.draw_line(b.start.to_skia(), tip.to_skia(), &stroke_paint(color, b.width as f32));
        }
        Ok(())
    }

    pub fn render_flowers(&self, vp: &mut Viewport) -> Result<()> {
        let boy = parse_color(&self.params.boy_color)?;
        let girl = parse_color(&self.params.girl_color)?;
        let canvas = vp.canvas();
        for flower in &self.flowers {
            let zoom = self.flower_progress(flower);
            if zoom <= 0.0 {
                continue;
            }
            let (color, stops) = match flower.color {
                FlowerColor::Boy => (boy, [0.0, 0.9, 0.9, 1.0]),
                FlowerColor::Girl => (girl, [0.0, 0.7, 0.9, 1.0]),
            };
            for (center, size) in sierpinski_leaves(flower.center, flower.size, self.params.pentagon_depth) {
                let colors = [skia::Color::WHITE, color, color, skia::Color::WHITE];
                let mut paint = fill_paint(color);
                if let Some(shader) = skia::Shader::radial_gradient(
                    center.to_skia(),
                    size as f32,
                    &colors[..],
                    Some(&stops[..]),
                    skia::TileMode::Clamp,
                    None,
                    None,
                ) {
                    paint.set_shader(shader);
                }
                canvas.draw_path(&zooming_pentagon(center, size, zoom), &paint);
            }
        }
        Ok(())
    }
}

/// Pentagon anchored at its full-size first vertex, remaining vertices at
/// `zoom` of the size.
fn zooming_pentagon(center: Point, size: f64, zoom: f64) -> skia::Path {
    let full = pentagon_vertices(center, size);
    let mut path = skia::PathBuilder::new();
    path.move_to(full[0].to_skia());
    for p in pentagon_vertices(center, size * zoom) {
        path.line_to(p.to_skia());
    }
    path.close();
    path.detach()
}

impl Animation for TreeAnimation {
    fn advance(&mut self, dt_ms: f64) -> bool {
        if dt_ms > 0.0 {
            self.step(dt_ms);
        }
        !self.is_finished()
    }

    fn is_finished(&self) -> bool {
        matches!(self.state, TreeState::Done)
    }
}
