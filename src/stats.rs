// ---------------------------------------------------------------------------
// Small numeric helpers behind the charts
// ---------------------------------------------------------------------------

/// Ordinary-least-squares fit `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Returns `None` with fewer than two points or when every x is equal.
pub fn ols_fit(points: &[[f64; 2]]) -> Option<LinearFit> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p[0]).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p[1]).sum::<f64>() / n;

    let (sxy, sxx) = points.iter().fold((0.0, 0.0), |(sxy, sxx), p| {
        let dx = p[0] - mean_x;
        (sxy + dx * (p[1] - mean_y), sxx + dx * dx)
    });
    if sxx.abs() < f64::EPSILON {
        return None;
    }
    let slope = sxy / sxx;
    Some(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

// ---------------------------------------------------------------------------
// 2-D histogram
// ---------------------------------------------------------------------------

/// Point counts over a regular grid spanning the data extent.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityGrid {
    /// `nx + 1` bin edges along x.
    pub x_edges: Vec<f64>,
    /// `ny + 1` bin edges along y.
    pub y_edges: Vec<f64>,
    /// `counts[ix][iy]`
    pub counts: Vec<Vec<u32>>,
    pub max_count: u32,
}

impl DensityGrid {
    /// Non-empty cells as `(x0, x1, y0, y1, count)`.
    pub fn cells(&self) -> impl Iterator<Item = (f64, f64, f64, f64, u32)> + '_ {
        self.counts.iter().enumerate().flat_map(move |(ix, column)| {
            column
                .iter()
                .enumerate()
                .filter(|(_, &c)| c > 0)
                .map(move |(iy, &c)| {
                    (
                        self.x_edges[ix],
                        self.x_edges[ix + 1],
                        self.y_edges[iy],
                        self.y_edges[iy + 1],
                        c,
                    )
                })
        })
    }
}

/// Bin points into an `nx` by `ny` grid. `None` when there is nothing to bin.
pub fn density_grid(points: &[[f64; 2]], nx: usize, ny: usize) -> Option<DensityGrid> {
    if points.is_empty() || nx == 0 || ny == 0 {
        return None;
    }
    let x_edges = edges(points.iter().map(|p| p[0]), nx);
    let y_edges = edges(points.iter().map(|p| p[1]), ny);

    let mut counts = vec![vec![0u32; ny]; nx];
    for p in points {
        let ix = bin_index(p[0], &x_edges);
        let iy = bin_index(p[1], &y_edges);
        counts[ix][iy] += 1;
    }
    let max_count = counts.iter().flatten().copied().max().unwrap_or(0);

    Some(DensityGrid {
        x_edges,
        y_edges,
        counts,
        max_count,
    })
}

fn edges(values: impl Iterator<Item = f64>, bins: usize) -> Vec<f64> {
    let (mut lo, mut hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if (hi - lo).abs() < f64::EPSILON {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;
    (0..=bins).map(|i| lo + width * i as f64).collect()
}

fn bin_index(value: f64, edges: &[f64]) -> usize {
    let bins = edges.len() - 1;
    let lo = edges[0];
    let width = (edges[bins] - lo) / bins as f64;
    (((value - lo) / width) as usize).min(bins - 1)
}

// ---------------------------------------------------------------------------
// Spline smoothing for the trend lines
// ---------------------------------------------------------------------------

/// Catmull-Rom interpolation through `points`, `samples` points per segment.
/// Fewer than three points are returned unchanged.
pub fn catmull_rom(points: &[[f64; 2]], samples: usize) -> Vec<[f64; 2]> {
    if points.len() < 3 || samples < 2 {
        return points.to_vec();
    }
    let last = points.len() - 1;
    let mut out = Vec::with_capacity(last * samples + 1);
    for i in 0..last {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(last)];
        for s in 0..samples {
            let t = s as f64 / samples as f64;
            out.push([
                catmull_rom_1d(p0[0], p1[0], p2[0], p3[0], t),
                catmull_rom_1d(p0[1], p1[1], p2[1], p3[1], t),
            ]);
        }
    }
    out.push(points[last]);
    out
}

fn catmull_rom_1d(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * (2.0 * p1
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
}
