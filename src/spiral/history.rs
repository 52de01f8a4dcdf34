use crate::types::polar::PolarPoint;
use std::ops::Range;

/// One finished loop, a window into the flat point history.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LoopRecord {
    start: usize,
    steps: usize,
}

impl LoopRecord {
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.steps
    }
}

/// Every point emitted during a run, in generation order, never pruned.
#[derive(Clone, Debug, Default)]
pub struct History {
    points: Vec<PolarPoint>,
    loops: Vec<LoopRecord>,
    open: Option<usize>,
}

impl History {
    pub fn points(&self) -> &[PolarPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Finished loops only.
    pub fn loops(&self) -> &[LoopRecord] {
        &self.loops
    }

    pub fn last_loop(&self) -> Option<&LoopRecord> {
        self.loops.last()
    }

    pub fn loop_points(&self, record: &LoopRecord) -> &[PolarPoint] {
        &self.points[record.range()]
    }

    /// The point `offset` places from the end, `back(1)` being the newest.
    pub fn back(&self, offset: usize) -> Option<&PolarPoint> {
        if offset == 0 || offset > self.points.len() {
            return None;
        }
        self.points.get(self.points.len() - offset)
    }

    pub(crate) fn begin_loop(&mut self) {
        debug_assert!(self.open.is_none(), "previous loop still open");
        self.open = Some(self.points.len());
    }

    pub(crate) fn push(&mut self, point: PolarPoint) {
        self.points.push(point);
    }

    pub(crate) fn finish_loop(&mut self) -> LoopRecord {
        let start = self.open.take().unwrap_or(self.points.len());
        let record = LoopRecord {
            start,
            steps: self.points.len() - start,
        };
        self.loops.push(record);
        record
    }
}

#[test]
fn test_history_back_indexing() {
    let mut history = History::default();
    history.begin_loop();
    for r in 1..=4 {
        history.push(PolarPoint::new(r as f64, 0.));
    }
    let record = history.finish_loop();

    assert_eq!(record.steps(), 4);
    assert_eq!(history.back(1).map(|p| p.radius()), Some(4.));
    assert_eq!(history.back(4).map(|p| p.radius()), Some(1.));
    assert!(history.back(0).is_none());
    assert!(history.back(5).is_none());
}

#[test]
fn test_history_loop_windows() {
    let mut history = History::default();
    history.begin_loop();
    history.push(PolarPoint::new(1., 0.));
    history.push(PolarPoint::new(2., 0.));
    let first = history.finish_loop();

    history.begin_loop();
    history.push(PolarPoint::new(3., 0.));
    assert_eq!(history.loops().len(), 1);
    let second = history.finish_loop();

    assert_eq!(history.len(), 3);
    assert_eq!(first.range(), 0..2);
    assert_eq!(second.range(), 2..3);
    assert_eq!(history.loop_points(&second), &[PolarPoint::new(3., 0.)]);
    assert_eq!(history.last_loop(), Some(&second));
}
