//! Chart-ready view of a shift summary.
//!
//! Each segment becomes a fraction of the 480-minute shift. Fractions are not
//! normalised: they are drawn as given, so an over-booked shift overflows
//! the ring rather than being rescaled.

use crate::libs::shift::SHIFT_MINUTES;
use crate::libs::utilization::ProcessTimeSummary;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    Maintenance,
    Operating,
    Downtime,
    Remaining,
}

impl Segment {
    pub const ALL: [Segment; 4] = [Segment::Maintenance, Segment::Operating, Segment::Downtime, Segment::Remaining];

    pub fn label(&self) -> &'static str {
        match self {
            Segment::Maintenance => "Maintenance",
            Segment::Operating => "Operating",
            Segment::Downtime => "Downtime",
            Segment::Remaining => "Remaining",
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            Segment::Maintenance => '#',
            Segment::Operating => '=',
            Segment::Downtime => 'x',
            Segment::Remaining => '.',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartSlice {
    pub segment: Segment,
    pub minutes: u32,
    pub fraction: f64,
}

/// One stroke of a donut chart: where it starts along the ring and how long it is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Arc {
    pub segment: Segment,
    pub offset: f64,
    pub length: f64,
}

/// The four segments in drawing order.
pub fn slices(summary: &ProcessTimeSummary) -> [ChartSlice; 4] {
    let slice = |segment, minutes: u32| ChartSlice {
        segment,
        minutes,
        fraction: minutes as f64 / SHIFT_MINUTES as f64,
    };

    [
        slice(Segment::Maintenance, summary.maintenance_minutes),
        slice(Segment::Operating, summary.operating_minutes),
        slice(Segment::Downtime, summary.downtime_minutes),
        slice(Segment::Remaining, summary.remaining_minutes),
    ]
}

/// Arc lengths for a ring of the given circumference, laid end to end.
pub fn arcs(summary: &ProcessTimeSummary, circumference: f64) -> Vec<Arc> {
    let mut offset = 0.0;
    slices(summary)
        .iter()
        .map(|slice| {
            let length = slice.fraction * circumference;
            let arc = Arc {
                segment: slice.segment,
                offset,
                length,
            };
            offset += length;
            arc
        })
        .collect()
}

/// Single-line text rendering, one glyph per `1 / width` of the shift.
pub fn bar(summary: &ProcessTimeSummary, width: usize) -> String {
    slices(summary)
        .iter()
        .flat_map(|slice| {
            let cells = (slice.fraction * width as f64).round() as usize;
            std::iter::repeat(slice.segment.glyph()).take(cells)
        })
        .collect()
}
