//! Ruling normalization: snapping, orientation split, collapsing, cropping.
//!
//! These are pure functions over ruling collections. Derived rulings are
//! new values; only [`snap_points`] edits its input in place.

use crate::geometry::{Point, Rectangle};
use crate::ruling::{ORIENTATION_EPSILON, Orientation, Ruling};

/// Default extent gap bridged when collapsing colinear rulings.
pub const DEFAULT_COLLAPSE_EXPAND_AMOUNT: f64 = 1.0;

/// Snap nearby ruling endpoints onto shared coordinates.
///
/// All endpoints are clustered along x, then independently along y. A
/// cluster grows while a coordinate stays strictly within the tolerance of
/// the cluster's first (smallest) coordinate, and every member is moved to
/// the cluster mean. Rulings are renormalized afterwards.
pub fn snap_points(rulings: &mut [Ruling], x_tolerance: f64, y_tolerance: f64) {
    if rulings.is_empty() {
        return;
    }

    let mut points: Vec<Point> = rulings
        .iter()
        .flat_map(|r| [r.start_point(), r.end_point()])
        .collect();

    snap_axis(&mut points, x_tolerance, |p| p.x, |p, v| p.x = v);
    snap_axis(&mut points, y_tolerance, |p| p.y, |p, v| p.y = v);

    for (ruling, pair) in rulings.iter_mut().zip(points.chunks_exact(2)) {
        ruling.set_endpoints(pair[0], pair[1]);
    }
}

/// Cluster points along one axis and snap each cluster to its mean.
fn snap_axis<K, S>(points: &mut [Point], tolerance: f64, key: K, mut set: S)
where
    K: Fn(&Point) -> f64,
    S: FnMut(&mut Point, f64),
{
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| key(&points[a]).total_cmp(&key(&points[b])));

    let mut cluster_start = 0;
    for i in 1..=order.len() {
        let end_of_cluster = i == order.len()
            || (key(&points[order[i]]) - key(&points[order[cluster_start]])).abs() >= tolerance;
        if end_of_cluster {
            let members = &order[cluster_start..i];
            let sum: f64 = members.iter().map(|&j| key(&points[j])).sum();
            let mean = sum / members.len() as f64;
            for &j in members {
                set(&mut points[j], mean);
            }
            cluster_start = i;
        }
    }
}

/// Partition rulings into `(horizontal, vertical)`, dropping oblique ones.
pub fn split_by_orientation<I>(rulings: I) -> (Vec<Ruling>, Vec<Ruling>)
where
    I: IntoIterator<Item = Ruling>,
{
    let mut horizontals = Vec::new();
    let mut verticals = Vec::new();

    for ruling in rulings {
        match ruling.orientation() {
            Orientation::Horizontal => horizontals.push(ruling),
            Orientation::Vertical => verticals.push(ruling),
            Orientation::Oblique => {}
        }
    }

    (horizontals, verticals)
}

/// Merge colinear rulings whose extents overlap or touch.
///
/// Rulings are grouped by orientation and position: a group grows while
/// each next position lies within [`ORIENTATION_EPSILON`] of the previous
/// one, and every ruling in it takes the group's first position. Within a
/// group, segments sorted by start are merged while the next one starts no
/// further than `expand_amount` past the running end. Zero-length rulings
/// that do not merge into a neighbour are dropped, as are oblique rulings.
/// Collapsing an already collapsed set returns it unchanged.
pub fn collapse_oriented_rulings(rulings: Vec<Ruling>, expand_amount: f64) -> Vec<Ruling> {
    let mut rulings: Vec<Ruling> = rulings.into_iter().filter(|r| !r.oblique()).collect();

    rulings.sort_by(|a, b| {
        orientation_rank(a)
            .cmp(&orientation_rank(b))
            .then_with(|| a.position().total_cmp(&b.position()))
    });

    let mut result: Vec<Ruling> = Vec::new();
    let mut group_start = 0;
    for i in 1..=rulings.len() {
        let end_of_group = i == rulings.len()
            || rulings[i].orientation() != rulings[i - 1].orientation()
            || rulings[i].position() - rulings[i - 1].position() >= ORIENTATION_EPSILON;
        if end_of_group {
            merge_group(&mut rulings[group_start..i], expand_amount, &mut result);
            group_start = i;
        }
    }

    result
}

/// Interval-merge one colinear group at the group's first position.
fn merge_group(group: &mut [Ruling], expand_amount: f64, result: &mut Vec<Ruling>) {
    let Some(anchor) = group.first().copied() else {
        return;
    };
    group.sort_by(|a, b| a.start().total_cmp(&b.start()));

    let mut run: Option<(f64, f64)> = None;
    for next in group.iter() {
        if let Some((start, end)) = run {
            if next.start() <= end + expand_amount {
                run = Some((start, end.max(next.end())));
                continue;
            }
            result.push(anchor.with_extent(start, end));
            run = None;
        }
        if next.length() > 0.0 {
            run = Some((next.start(), next.end()));
        }
    }
    if let Some((start, end)) = run {
        result.push(anchor.with_extent(start, end));
    }
}

fn orientation_rank(ruling: &Ruling) -> u8 {
    match ruling.orientation() {
        Orientation::Horizontal => 0,
        Orientation::Vertical => 1,
        Orientation::Oblique => 2,
    }
}

/// Clip every ruling to `area`, dropping rulings that miss it entirely.
///
/// Area edges are inclusive, so a ruling lying on the boundary survives.
/// Results never extend outside `area` and keep their orientation.
pub fn crop_rulings_to_area(rulings: &[Ruling], area: &Rectangle) -> Vec<Ruling> {
    rulings
        .iter()
        .filter_map(|ruling| clip_to_area(ruling, area))
        .collect()
}

fn clip_to_area(ruling: &Ruling, area: &Rectangle) -> Option<Ruling> {
    match ruling.orientation() {
        Orientation::Horizontal => {
            let y = ruling.position();
            let (start, end) = (ruling.start().max(area.left()), ruling.end().min(area.right()));
            (area.top() <= y && y <= area.bottom() && start <= end)
                .then(|| Ruling::horizontal_at(y, start, end))
        }
        Orientation::Vertical => {
            let x = ruling.position();
            let (start, end) = (ruling.start().max(area.top()), ruling.end().min(area.bottom()));
            (area.left() <= x && x <= area.right() && start <= end)
                .then(|| Ruling::vertical_at(x, start, end))
        }
        Orientation::Oblique => clip_oblique(ruling, area),
    }
}

/// Liang–Barsky segment clipping against an axis-aligned rectangle.
fn clip_oblique(ruling: &Ruling, area: &Rectangle) -> Option<Ruling> {
    let (x0, y0) = (ruling.x1(), ruling.y1());
    let (dx, dy) = (ruling.x2() - x0, ruling.y2() - y0);

    let mut t_enter: f64 = 0.0;
    let mut t_exit: f64 = 1.0;

    let boundaries = [
        (-dx, x0 - area.left()),
        (dx, area.right() - x0),
        (-dy, y0 - area.top()),
        (dy, area.bottom() - y0),
    ];

    for (p, q) in boundaries {
        if p == 0.0 {
            // parallel to this boundary: reject if on the outside
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t_exit {
                return None;
            }
            t_enter = t_enter.max(t);
        } else {
            if t < t_enter {
                return None;
            }
            t_exit = t_exit.min(t);
        }
    }

    let clamp_x = |x: f64| x.clamp(area.left(), area.right());
    let clamp_y = |y: f64| y.clamp(area.top(), area.bottom());

    Some(Ruling::new(
        clamp_x(x0 + t_enter * dx),
        clamp_y(y0 + t_enter * dy),
        clamp_x(x0 + t_exit * dx),
        clamp_y(y0 + t_exit * dy),
    ))
}
