//! Gallows drawing stages.
//!
//! The figure is a fixed sequence of segments revealed as tries run out.
//! Rendering layers only ever ask which segments are visible for a given
//! number of remaining tries; none of them know the thresholds.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Base,
    Head,
    Body,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

/// `(threshold, segment)`: the segment is drawn once tries remaining is at or below the threshold.
pub const STAGES: [(u8, Segment); 6] = [
    (5, Segment::Head),
    (4, Segment::Body),
    (3, Segment::LeftArm),
    (2, Segment::RightArm),
    (1, Segment::LeftLeg),
    (0, Segment::RightLeg),
];

#[must_use]
pub fn visible_segments(tries_remaining: u8) -> Vec<Segment> {
    std::iter::once(Segment::Base)
        .chain(
            STAGES
                .iter()
                .filter(|(threshold, _)| tries_remaining <= *threshold)
                .map(|(_, segment)| *segment),
        )
        .collect()
}

const FRAME_HEIGHT: usize = 7;

/// Fixed-size ASCII art showing `segments`.
#[must_use]
pub fn render_ascii(segments: &[Segment]) -> Vec<String> {
    let shown = |segment: Segment| segments.contains(&segment);
    let pick = |segment: Segment, glyph: char| if shown(segment) { glyph } else { ' ' };

    let mut lines = Vec::with_capacity(FRAME_HEIGHT);
    lines.push("  +---+".to_string());
    lines.push("  |   |".to_string());
    lines.push(format!("  |   {}", pick(Segment::Head, 'O')));
    lines.push(format!(
        "  |  {}{}{}",
        pick(Segment::LeftArm, '/'),
        pick(Segment::Body, '|'),
        pick(Segment::RightArm, '\\')
    ));
    lines.push(format!(
        "  |  {} {}",
        pick(Segment::LeftLeg, '/'),
        pick(Segment::RightLeg, '\\')
    ));
    lines.push("  |".to_string());
    lines.push("=======".to_string());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_tries_shows_only_base() {
        assert_eq!(visible_segments(6), vec![Segment::Base]);
    }

    #[test]
    fn test_each_miss_adds_one_segment() {
        for tries in 0..=6u8 {
            assert_eq!(visible_segments(tries).len(), 1 + usize::from(6 - tries));
        }
    }

    #[test]
    fn test_reveal_order() {
        assert_eq!(
            visible_segments(0),
            vec![
                Segment::Base,
                Segment::Head,
                Segment::Body,
                Segment::LeftArm,
                Segment::RightArm,
                Segment::LeftLeg,
                Segment::RightLeg,
            ]
        );
        assert_eq!(
            visible_segments(3),
            vec![Segment::Base, Segment::Head, Segment::Body, Segment::LeftArm]
        );
    }

    #[test]
    fn test_render_ascii_fixed_height() {
        for tries in 0..=6u8 {
            assert_eq!(render_ascii(&visible_segments(tries)).len(), FRAME_HEIGHT);
        }
    }

    #[test]
    fn test_render_ascii_glyphs() {
        let empty = render_ascii(&visible_segments(6)).join("\n");
        assert!(!empty.contains('O'));

        let full = render_ascii(&visible_segments(0));
        assert_eq!(full[2], "  |   O");
        assert_eq!(full[3], "  |  /|\\");
        assert_eq!(full[4], "  |  / \\");
    }

    #[test]
    fn test_render_ascii_draws_only_given_segments() {
        let lines = render_ascii(&[Segment::Base, Segment::RightArm]);
        assert_eq!(lines[2], "  |    ");
        assert_eq!(lines[3], "  |    \\");
    }
}
