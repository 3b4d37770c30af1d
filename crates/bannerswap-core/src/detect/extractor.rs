//! Region extraction from binary masks.
//!
//! The detector needs, per mask, the set of candidate banner pieces as
//! minimum-area rectangles. The [`QuadExtractor`] trait is the seam; the
//! default [`ComponentExtractor`] implements it with two-pass union-find
//! connected components followed by convex hull + rotating calipers.

use ndarray::Array2;

use crate::geometry::Point;

/// One candidate banner region: the four corners of its minimum-area
/// rectangle, its pixel area, and the rectangle center.
#[derive(Clone, Debug)]
pub struct RegionQuad {
    pub corners: [Point; 4],
    pub area: f64,
    pub centroid: Point,
}

/// Output of region extraction: surviving regions plus a mask with their
/// interiors filled (value 1), in the input mask's shape.
#[derive(Clone, Debug)]
pub struct ExtractedRegions {
    pub filled: Array2<u8>,
    pub regions: Vec<RegionQuad>,
}

/// Contour/rectangle-fitting capability consumed by the detector.
///
/// Returns every region with area strictly greater than `min_area`, in a
/// deterministic order (largest area first).
pub trait QuadExtractor: Send + Sync {
    fn extract(&self, mask: &Array2<bool>, min_area: f64) -> ExtractedRegions;
}

/// Default extractor based on connected component analysis (4-connectivity,
/// two-pass labeling with union-find).
#[derive(Clone, Copy, Debug, Default)]
pub struct ComponentExtractor;

impl QuadExtractor for ComponentExtractor {
    fn extract(&self, mask: &Array2<bool>, min_area: f64) -> ExtractedRegions {
        let (h, w) = mask.dim();
        let mut filled = Array2::<u8>::zeros((h, w));
        if h == 0 || w == 0 {
            return ExtractedRegions {
                filled,
                regions: Vec::new(),
            };
        }

        let labels = label_components(mask);

        // Areas per root.
        let mut areas = std::collections::HashMap::<u32, usize>::new();
        for &lbl in labels.iter() {
            if lbl != 0 {
                *areas.entry(lbl).or_insert(0) += 1;
            }
        }

        let mut surviving: Vec<u32> = areas
            .iter()
            .filter(|(_, &area)| area as f64 > min_area)
            .map(|(&lbl, _)| lbl)
            .collect();
        surviving.sort_unstable_by_key(|lbl| std::cmp::Reverse(areas[lbl]));

        // Fill surviving components and gather their pixel coordinates.
        let mut points = std::collections::HashMap::<u32, Vec<Point>>::new();
        for row in 0..h {
            for col in 0..w {
                let lbl = labels[[row, col]];
                if lbl != 0 && areas.get(&lbl).is_some_and(|&a| a as f64 > min_area) {
                    filled[[row, col]] = 1;
                    points
                        .entry(lbl)
                        .or_default()
                        .push(Point::new(col as f64, row as f64));
                }
            }
        }

        let regions = surviving
            .into_iter()
            .filter_map(|lbl| {
                let pts = points.remove(&lbl)?;
                let (corners, centroid) = min_area_rect(&pts)?;
                Some(RegionQuad {
                    corners,
                    area: areas[&lbl] as f64,
                    centroid,
                })
            })
            .collect();

        ExtractedRegions { filled, regions }
    }
}

/// Two-pass labeling; returns the label image with all labels resolved to
/// their union-find roots.
fn label_components(mask: &Array2<bool>) -> Array2<u32> {
    let (h, w) = mask.dim();
    let mut labels = Array2::<u32>::zeros((h, w));
    let mut next_label: u32 = 1;
    // Index 0 unused; labels start at 1.
    let mut parent: Vec<u32> = vec![0; h * w / 2 + 2];

    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] {
                continue;
            }

            let up = if row > 0 { labels[[row - 1, col]] } else { 0 };
            let left = if col > 0 { labels[[row, col - 1]] } else { 0 };

            match (up > 0, left > 0) {
                (false, false) => {
                    if next_label as usize >= parent.len() {
                        parent.resize(parent.len() * 2, 0);
                    }
                    parent[next_label as usize] = next_label;
                    labels[[row, col]] = next_label;
                    next_label += 1;
                }
                (true, false) => labels[[row, col]] = up,
                (false, true) => labels[[row, col]] = left,
                (true, true) => {
                    let smaller = up.min(left);
                    labels[[row, col]] = smaller;
                    if up != left {
                        union(&mut parent, smaller, up.max(left));
                    }
                }
            }
        }
    }

    for i in 1..next_label as usize {
        parent[i] = find(&parent, i as u32);
    }
    for lbl in labels.iter_mut() {
        if *lbl != 0 {
            *lbl = parent[*lbl as usize];
        }
    }

    labels
}

fn find(parent: &[u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        x = parent[x as usize];
    }
    x
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        let (small, big) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[big as usize] = small;
    }
}

/// Minimum-area enclosing rectangle via convex hull + rotating calipers.
///
/// Returns the four rectangle corners (unordered with respect to sides) and
/// the rectangle center. `None` for empty input.
pub fn min_area_rect(points: &[Point]) -> Option<([Point; 4], Point)> {
    if points.is_empty() {
        return None;
    }
    let hull = convex_hull(points);

    if hull.len() == 1 {
        let p = hull[0];
        return Some(([p, p, p, p], p));
    }
    if hull.len() == 2 {
        // Degenerate segment: zero-height rectangle along the segment.
        let (a, b) = (hull[0], hull[1]);
        let center = Point::midpoint(&a, &b);
        return Some(([a, b, b, a], center));
    }

    let mut best_area = f64::INFINITY;
    let mut best: ([Point; 4], Point) = ([Point::default(); 4], Point::default());

    for i in 0..hull.len() {
        let a = hull[i];
        let b = hull[(i + 1) % hull.len()];
        let len = a.distance(&b);
        if len < 1e-12 {
            continue;
        }
        // Unit direction along this hull edge and its normal.
        let ux = (b.x - a.x) / len;
        let uy = (b.y - a.y) / len;

        let mut min_u = f64::INFINITY;
        let mut max_u = f64::NEG_INFINITY;
        let mut min_v = f64::INFINITY;
        let mut max_v = f64::NEG_INFINITY;
        for p in &hull {
            let u = p.x * ux + p.y * uy;
            let v = -p.x * uy + p.y * ux;
            min_u = min_u.min(u);
            max_u = max_u.max(u);
            min_v = min_v.min(v);
            max_v = max_v.max(v);
        }

        let area = (max_u - min_u) * (max_v - min_v);
        if area < best_area {
            best_area = area;
            let corner = |u: f64, v: f64| Point::new(u * ux - v * uy, u * uy + v * ux);
            let corners = [
                corner(min_u, min_v),
                corner(max_u, min_v),
                corner(max_u, max_v),
                corner(min_u, max_v),
            ];
            let center = corner((min_u + max_u) / 2.0, (min_v + max_v) / 2.0);
            best = (corners, center);
        }
    }

    if best_area.is_finite() {
        Some(best)
    } else {
        None
    }
}

/// Andrew's monotone chain convex hull, counter-clockwise in image
/// coordinates, without collinear points.
fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut pts: Vec<Point> = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup_by(|a, b| a.x == b.x && a.y == b.y);

    if pts.len() < 3 {
        return pts;
    }

    let cross = |o: &Point, a: &Point, b: &Point| -> f64 {
        (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
    };

    let mut lower: Vec<Point> = Vec::new();
    for p in &pts {
        while lower.len() >= 2 && cross(&lower[lower.len() - 2], &lower[lower.len() - 1], p) <= 0.0
        {
            lower.pop();
        }
        lower.push(*p);
    }

    let mut upper: Vec<Point> = Vec::new();
    for p in pts.iter().rev() {
        while upper.len() >= 2 && cross(&upper[upper.len() - 2], &upper[upper.len() - 1], p) <= 0.0
        {
            upper.pop();
        }
        upper.push(*p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}
