//! Parking availability forecast for street segments.

mod availability;
mod segment;

pub use availability::{
    AvailabilityLevel, HOURS_PER_DAY, NEUTRAL_PROBABILITY, SegmentStyle, probability,
    validate_hour,
};
pub use segment::{
    Geometry, SegmentFeature, SegmentProperties, StyledSegment, parse_segments, style_segments,
};
