//! Terrain geometry: a polyline plus flush landing pads.
//!
//! Each difficulty selects one fixed dataset. The evaluator only ever sees a
//! `Terrain`, so the flat single-pad layout and the rugged ones share the
//! same collision code.

use super::types::{Difficulty, FIELD_WIDTH};

/// A vertex of the terrain polyline (screen coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A horizontal landing span lying on the polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingPad {
    pub start_x: f64,
    pub width: f64,
    pub y: f64,
}

impl LandingPad {
    pub const fn new(start_x: f64, width: f64, y: f64) -> Self {
        Self { start_x, width, y }
    }

    pub fn end_x(&self) -> f64 {
        self.start_x + self.width
    }

    /// Inclusive span test.
    pub fn contains(&self, x: f64) -> bool {
        x >= self.start_x && x <= self.end_x()
    }

    pub fn center_x(&self) -> f64 {
        self.start_x + self.width / 2.0
    }
}

/// Immutable terrain for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct Terrain {
    points: Vec<Point>,
    pads: Vec<LandingPad>,
}

const EASY_GROUND_Y: f64 = 550.0;

const MEDIUM_POINTS: [(f64, f64); 13] = [
    (0.0, 450.0),
    (60.0, 480.0),
    (120.0, 500.0),
    (200.0, 500.0),
    (260.0, 460.0),
    (330.0, 520.0),
    (400.0, 430.0),
    (460.0, 490.0),
    (520.0, 530.0),
    (600.0, 530.0),
    (680.0, 470.0),
    (740.0, 510.0),
    (800.0, 460.0),
];
const MEDIUM_PADS: [LandingPad; 2] = [
    LandingPad::new(120.0, 80.0, 500.0),
    LandingPad::new(520.0, 80.0, 530.0),
];

const HARD_POINTS: [(f64, f64); 14] = [
    (0.0, 380.0),
    (50.0, 450.0),
    (110.0, 400.0),
    (170.0, 520.0),
    (230.0, 470.0),
    (290.0, 540.0),
    (340.0, 420.0),
    (400.0, 480.0),
    (450.0, 555.0),
    (500.0, 555.0),
    (540.0, 440.0),
    (600.0, 510.0),
    (700.0, 400.0),
    (800.0, 470.0),
];
const HARD_PADS: [LandingPad; 1] = [LandingPad::new(450.0, 50.0, 555.0)];

impl Terrain {
    pub fn new(points: Vec<Point>, pads: Vec<LandingPad>) -> Self {
        Self { points, pads }
    }

    /// Single flat ground line spanning the field with one pad on it.
    pub fn flat(ground_y: f64, pad: LandingPad) -> Self {
        let mut xs = vec![0.0, pad.start_x, pad.end_x(), FIELD_WIDTH];
        xs.dedup_by(|a, b| (*a - *b).abs() < f64::EPSILON);
        let points = xs.into_iter().map(|x| Point::new(x, ground_y)).collect();
        Self::new(points, vec![pad])
    }

    /// Fixed dataset for a difficulty.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self::flat(
                EASY_GROUND_Y,
                LandingPad::new(350.0, 100.0, EASY_GROUND_Y),
            ),
            Difficulty::Medium => Self::from_table(&MEDIUM_POINTS, &MEDIUM_PADS),
            Difficulty::Hard => Self::from_table(&HARD_POINTS, &HARD_PADS),
        }
    }

    fn from_table(points: &[(f64, f64)], pads: &[LandingPad]) -> Self {
        Self::new(
            points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            pads.to_vec(),
        )
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn pads(&self) -> &[LandingPad] {
        &self.pads
    }

    /// Consecutive vertex pairs of the polyline.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Horizontal range covered by the polyline.
    pub fn extent(&self) -> Option<(f64, f64)> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        Some((first.x.min(last.x), first.x.max(last.x)))
    }

    /// Interpolated surface height at `x`, if any segment covers it.
    ///
    /// A vertical segment reports its upper end.
    pub fn height_at(&self, x: f64) -> Option<f64> {
        self.segments()
            .find(|(a, b)| segment_covers(*a, *b, x))
            .map(|(a, b)| interpolate(a, b, x))
    }

    /// Pad whose span contains `x`.
    pub fn pad_at(&self, x: f64) -> Option<&LandingPad> {
        self.pads.iter().find(|pad| pad.contains(x))
    }

    /// True if the pad lies exactly on the polyline across its whole span.
    pub fn is_pad_flush(&self, pad: &LandingPad) -> bool {
        let on_line = |x: f64| {
            self.height_at(x)
                .is_some_and(|h| (h - pad.y).abs() < 1e-9)
        };
        let interior_flat = self
            .points
            .iter()
            .filter(|p| p.x > pad.start_x && p.x < pad.end_x())
            .all(|p| (p.y - pad.y).abs() < 1e-9);
        on_line(pad.start_x) && on_line(pad.end_x()) && on_line(pad.center_x()) && interior_flat
    }
}

pub(crate) fn segment_covers(a: Point, b: Point, x: f64) -> bool {
    x >= a.x.min(b.x) && x <= a.x.max(b.x)
}

pub(crate) fn interpolate(a: Point, b: Point, x: f64) -> f64 {
    let dx = b.x - a.x;
    if dx.abs() < f64::EPSILON {
        return a.y.min(b.y);
    }
    let t = (x - a.x) / dx;
    a.y + (b.y - a.y) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easy_terrain_is_flat_ground_with_one_pad() {
        let terrain = Terrain::for_difficulty(Difficulty::Easy);
        assert_eq!(terrain.pads().len(), 1);
        for p in terrain.points() {
            assert!((p.y - 550.0).abs() < f64::EPSILON);
        }
        let pad = terrain.pads()[0];
        assert!((pad.start_x - 350.0).abs() < f64::EPSILON);
        assert!((pad.width - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_every_dataset_spans_the_field() {
        for diff in &Difficulty::ALL {
            let terrain = Terrain::for_difficulty(*diff);
            let (min_x, max_x) = terrain.extent().unwrap();
            assert!(min_x.abs() < f64::EPSILON, "{:?} starts at {}", diff, min_x);
            assert!(
                (max_x - FIELD_WIDTH).abs() < f64::EPSILON,
                "{:?} ends at {}",
                diff,
                max_x
            );
        }
    }

    #[test]
    fn test_every_pad_is_flush() {
        for diff in &Difficulty::ALL {
            let terrain = Terrain::for_difficulty(*diff);
            assert!(!terrain.pads().is_empty());
            for pad in terrain.pads() {
                assert!(
                    terrain.is_pad_flush(pad),
                    "{:?} pad at {} is not flush",
                    diff,
                    pad.start_x
                );
            }
        }
    }

    #[test]
    fn test_points_are_ordered() {
        for diff in &Difficulty::ALL {
            let terrain = Terrain::for_difficulty(*diff);
            for (a, b) in terrain.segments() {
                assert!(a.x < b.x, "{:?} polyline not ordered at x={}", diff, a.x);
            }
        }
    }

    #[test]
    fn test_height_interpolates_linearly() {
        let terrain = Terrain::new(
            vec![Point::new(0.0, 500.0), Point::new(100.0, 400.0)],
            vec![],
        );
        assert!((terrain.height_at(50.0).unwrap() - 450.0).abs() < 1e-9);
        assert!((terrain.height_at(0.0).unwrap() - 500.0).abs() < 1e-9);
        assert!((terrain.height_at(100.0).unwrap() - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_height_outside_extent_is_none() {
        let terrain = Terrain::new(
            vec![Point::new(100.0, 500.0), Point::new(200.0, 500.0)],
            vec![],
        );
        assert!(terrain.height_at(50.0).is_none());
        assert!(terrain.height_at(250.0).is_none());
    }

    #[test]
    fn test_vertical_segment_reports_upper_end() {
        let a = Point::new(10.0, 500.0);
        let b = Point::new(10.0, 300.0);
        assert!((interpolate(a, b, 10.0) - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pad_contains_is_inclusive() {
        let pad = LandingPad::new(350.0, 100.0, 550.0);
        assert!(pad.contains(350.0));
        assert!(pad.contains(450.0));
        assert!(!pad.contains(349.9));
        assert!(!pad.contains(450.1));
    }

    #[test]
    fn test_pad_at_finds_medium_pads() {
        let terrain = Terrain::for_difficulty(Difficulty::Medium);
        assert!(terrain.pad_at(160.0).is_some());
        assert!(terrain.pad_at(560.0).is_some());
        assert!(terrain.pad_at(400.0).is_none());
    }

    #[test]
    fn test_sloped_pad_is_not_flush() {
        let terrain = Terrain::new(
            vec![Point::new(0.0, 500.0), Point::new(100.0, 450.0)],
            vec![],
        );
        assert!(!terrain.is_pad_flush(&LandingPad::new(10.0, 20.0, 495.0)));
    }

    #[test]
    fn test_flat_dedups_pad_at_field_edge() {
        let terrain = Terrain::flat(550.0, LandingPad::new(0.0, 100.0, 550.0));
        assert_eq!(terrain.points().len(), 3);
    }
}
