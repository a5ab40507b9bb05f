//! The liturgical type scale and spacing, in points, with unit conversions
//! for the back ends that need them.

use crate::constants::LITURGY_RED;
use crate::document::SpacerSize;

pub const EVENT_TITLE: f32 = 18.0;
pub const EVENT_DATE_TIME: f32 = 14.0;
pub const SECTION_TITLE: f32 = 16.0;
pub const SECTION_HEADING: f32 = 14.0;
pub const READING_TITLE: f32 = 14.0;
pub const PERICOPE: f32 = 12.0;
pub const BODY: f32 = 11.0;

pub const SPACING_SMALL: f32 = 3.0;
pub const SPACING_MEDIUM: f32 = 6.0;
pub const SPACING_LARGE: f32 = 9.0;
pub const AFTER_PARAGRAPH: f32 = 4.0;

pub const LINE_HEIGHT: f32 = 1.4;

/// Liturgical red as 0..1 RGB components.
pub const RED_RGB: (f32, f32, f32) = (196.0 / 255.0, 30.0 / 255.0, 58.0 / 255.0);

pub fn red_hex() -> &'static str {
    LITURGY_RED
}

pub fn spacer_height(size: SpacerSize) -> f32 {
    match size {
        SpacerSize::Small => 6.0,
        SpacerSize::Medium => 12.0,
        SpacerSize::Large => 18.0,
    }
}

/// Word measures font sizes in half-points.
pub fn half_points(points: f32) -> u32 {
    (points * 2.0).round() as u32
}

/// Word measures spacing and indents in twentieths of a point.
pub fn twips(points: f32) -> u32 {
    (points * 20.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(half_points(BODY), 22);
        assert_eq!(twips(SPACING_MEDIUM), 120);
        assert_eq!(red_hex(), "c41e3a");
    }
}
