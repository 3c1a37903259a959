//! Tone curves drawn as freehand paths
//!
//! A tone curve is authored as a path of integer points in a 256x256 canvas
//! whose y axis points down, so intensity is `255 - y`. The path arrives in
//! drawing order and may double back, loop, or leave the canvas. Turning it
//! into a total lookup table takes four steps:
//!
//! 1. **Densify**: fill each segment with integer-stepped points, using
//!    `max(|dx|, |dy|)` steps and rounding each coordinate
//! 2. **Deduplicate**: clamp x to `[0, 255]` and keep only the first point
//!    drawn at each x
//! 3. **Fill**: columns the path never reached map to 255
//! 4. **Sort**: order by x and set `lut[x] = 255 - y`, clamped to `[0, 255]`
//!
//! # Example
//!
//! ```
//! use phototone_filter::curve::{TonePoint, build_tone_lut};
//!
//! // Bottom-left to top-right of the canvas: the identity curve
//! let lut = build_tone_lut(&[TonePoint::new(0, 255), TonePoint::new(255, 0)]);
//! assert!((0..256).all(|x| lut[x] == x as u8));
//! ```

use phototone_core::{LUT_SIZE, ToneLut};

/// A point on the drawing canvas.
///
/// Coordinates are not clamped; points off the canvas are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TonePoint {
    /// Input intensity (canvas column)
    pub x: i32,
    /// Canvas row; output intensity is `255 - y`
    pub y: i32,
}

impl TonePoint {
    /// Create a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for TonePoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// One column of an enforced curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveSample {
    /// Input intensity
    pub x: u8,
    /// Output intensity
    pub value: u8,
    /// Whether the drawn path reached this column
    pub drawn: bool,
}

/// Integer stepping along one segment of a path.
#[derive(Debug, Clone, Copy)]
struct Segment {
    start: TonePoint,
    steps: i64,
    x_step: f64,
    y_step: f64,
}

impl Segment {
    fn new(p1: TonePoint, p2: TonePoint) -> Self {
        let dx = p2.x as i64 - p1.x as i64;
        let dy = p2.y as i64 - p1.y as i64;
        let steps = dx.abs().max(dy.abs());
        let (x_step, y_step) = if steps == 0 {
            (0.0, 0.0)
        } else {
            (dx as f64 / steps as f64, dy as f64 / steps as f64)
        };
        Self {
            start: p1,
            steps,
            x_step,
            y_step,
        }
    }

    /// Points contributed; a zero-length segment still contributes its start.
    fn len(&self) -> i64 {
        self.steps.max(1)
    }

    fn x_at(&self, s: i64) -> f64 {
        (self.start.x as f64 + s as f64 * self.x_step).round()
    }

    fn y_at(&self, s: i64) -> f64 {
        (self.start.y as f64 + s as f64 * self.y_step).round()
    }

    fn point_at(&self, s: i64) -> TonePoint {
        TonePoint::new(self.x_at(s) as i32, self.y_at(s) as i32)
    }

    fn column_at(&self, s: i64) -> usize {
        self.x_at(s).clamp(0.0, 255.0) as usize
    }

    /// First step after `s` that lands in a different column.
    ///
    /// Columns are monotone along a segment, so the change point is found
    /// by bisection rather than by walking every step.
    fn next_column_change(&self, s: i64) -> Option<i64> {
        let col = self.column_at(s);
        let (mut lo, mut hi) = (s + 1, self.len());
        if lo >= hi || self.column_at(hi - 1) == col {
            return None;
        }
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.column_at(mid) != col {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        Some(lo)
    }
}

/// Fill every segment of `path` with integer-stepped points.
///
/// Each segment `(x1, y1) -> (x2, y2)` contributes
/// `round(p1 + s * (p2 - p1) / steps)` for `s in 0..steps`, where
/// `steps = max(|dx|, |dy|)`; a zero-length segment contributes its start.
/// The last point of the path is appended once at the end. The path
/// order is preserved, so loops and backtracking survive.
///
/// Points are produced lazily: a segment between far off-canvas points
/// yields one point per step.
pub fn densify(path: &[TonePoint]) -> impl Iterator<Item = TonePoint> + '_ {
    path.windows(2)
        .flat_map(|pair| {
            let seg = Segment::new(pair[0], pair[1]);
            (0..seg.len()).map(move |s| seg.point_at(s))
        })
        .chain(path.last().copied())
}

/// Result of steps 2-4 over a densified path.
struct EnforcedCurve {
    lut: [u8; LUT_SIZE],
    drawn: [bool; LUT_SIZE],
}

impl EnforcedCurve {
    fn new() -> Self {
        Self {
            lut: [255; LUT_SIZE],
            drawn: [false; LUT_SIZE],
        }
    }

    /// Record a rounded point unless its column is already drawn.
    fn mark(&mut self, x: f64, y: f64) {
        let col = x.clamp(0.0, 255.0) as usize;
        if !self.drawn[col] {
            self.drawn[col] = true;
            self.lut[col] = (255.0 - y).clamp(0.0, 255.0) as u8;
        }
    }
}

// Only the first point of each run of equal columns can be retained, so
// each segment is visited at its column changes instead of at every step.
fn enforce(path: &[TonePoint]) -> EnforcedCurve {
    let mut curve = EnforcedCurve::new();
    let mut dense_len = 0u64;

    for pair in path.windows(2) {
        let seg = Segment::new(pair[0], pair[1]);
        dense_len += seg.len() as u64;
        let mut s = 0;
        loop {
            curve.mark(seg.x_at(s), seg.y_at(s));
            match seg.next_column_change(s) {
                Some(next) => s = next,
                None => break,
            }
        }
    }
    if let Some(last) = path.last() {
        dense_len += 1;
        curve.mark(last.x as f64, last.y as f64);
    }

    let retained = curve.drawn.iter().filter(|&&d| d).count();
    log::debug!(
        "tone curve: {} path points, {} densified, {} columns drawn, {} filled",
        path.len(),
        dense_len,
        retained,
        LUT_SIZE - retained
    );
    curve
}

/// Build the lookup table for a drawn path.
///
/// An empty path maps every value to 255.
pub fn build_tone_lut(path: &[TonePoint]) -> ToneLut {
    ToneLut::from(enforce(path).lut)
}

/// Accumulates a path while the curve is being drawn.
///
/// ```
/// use phototone_filter::curve::ToneCurveBuilder;
///
/// let mut builder = ToneCurveBuilder::new();
/// builder.begin((0, 255));
/// builder.push((128, 64));
/// builder.push((255, 0));
/// let lut = builder.finish();
/// assert_eq!(lut[255], 255);
/// assert_eq!(builder.path().len(), 256);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ToneCurveBuilder {
    path: Vec<TonePoint>,
}

impl ToneCurveBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new stroke at `point`, discarding any previous path.
    pub fn begin(&mut self, point: impl Into<TonePoint>) {
        self.path.clear();
        self.path.push(point.into());
    }

    /// Append a point to the current stroke.
    pub fn push(&mut self, point: impl Into<TonePoint>) {
        self.path.push(point.into());
    }

    /// Append several points to the current stroke.
    pub fn extend<I, P>(&mut self, points: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<TonePoint>,
    {
        self.path.extend(points.into_iter().map(Into::into));
    }

    /// Discard the path.
    pub fn clear(&mut self) {
        self.path.clear();
    }

    /// The path drawn so far (or the enforced curve after [`finish`](Self::finish)).
    pub fn path(&self) -> &[TonePoint] {
        &self.path
    }

    /// Whether no point has been drawn.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// The enforced curve for the current path, one sample per column.
    pub fn samples(&self) -> Vec<CurveSample> {
        let curve = enforce(&self.path);
        (0..LUT_SIZE)
            .map(|x| CurveSample {
                x: x as u8,
                value: curve.lut[x],
                drawn: curve.drawn[x],
            })
            .collect()
    }

    /// Finish the stroke and return its lookup table.
    ///
    /// The stored path is replaced by the enforced curve, one point per
    /// column in ascending x, so it can be redrawn as a monotonic line.
    pub fn finish(&mut self) -> ToneLut {
        let lut = ToneLut::from(enforce(&self.path).lut);
        self.path = (0..LUT_SIZE)
            .map(|x| TonePoint::new(x as i32, 255 - lut[x] as i32))
            .collect();
        lut
    }
}
