use tracing::info;

/// Computes the ordered lateral offsets at which beamlets are centered.
///
/// Offsets start at `spacing / 2` and step by `spacing` while they stay below
/// `target_length / 2`, covering the positive side of the target. With
/// `reflect` unset the negative mirror of every offset is prepended so the
/// result is symmetric and sorted ascending; with it set only the positive
/// side is returned and the simulation reflects the other half by symmetry.
///
/// The ordering fixes beamlet index assignment and therefore output
/// filenames, so it must stay deterministic for identical inputs.
pub fn generate_offsets(target_length: f64, spacing: f64, reflect: bool) -> Vec<f64> {
    info!("Generating beam positions");
    let offset = spacing / 2.0;
    let ymax = target_length / 2.0;
    let mut result = Vec::new();
    let mut k = 0usize;
    let mut y = offset;
    while y < ymax {
        result.push(y);
        // a non-positive spacing cannot advance y
        if spacing <= 0.0 {
            break;
        }
        k += 1;
        y = k as f64 * spacing + offset;
    }
    if !reflect {
        let mut full: Vec<f64> = result.iter().rev().map(|y| -y).collect();
        full.extend(result.iter().copied());
        result = full;
    }
    info!("Generated {} y values", result.len());
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_side_only_when_reflecting() {
        let offsets = generate_offsets(10.0, 2.0, true);
        assert_eq!(offsets, vec![1.0, 3.0]);
    }

    #[test]
    fn full_symmetric_sequence_when_not_reflecting() {
        let offsets = generate_offsets(10.0, 2.0, false);
        assert_eq!(offsets, vec![-3.0, -1.0, 1.0, 3.0]);
    }

    #[test]
    fn reflected_offsets_stay_within_half_target_and_increase() {
        for (target_length, spacing) in [(75.0, 0.38), (12.0, 2.5), (3.0, 0.8), (1.0, 2.0)] {
            let offsets = generate_offsets(target_length, spacing, true);
            let expected =
                ((target_length / 2.0 - spacing / 2.0) / spacing).floor() as i64 + 1;
            assert_eq!(offsets.len() as i64, expected.max(0));
            for pair in offsets.windows(2) {
                assert!(pair[0] < pair[1]);
            }
            for &y in &offsets {
                assert!(y >= spacing / 2.0);
                assert!(y < target_length / 2.0);
            }
        }
    }

    #[test]
    fn unreflected_sequence_is_symmetric_and_sorted() {
        let offsets = generate_offsets(75.0, 0.38, false);
        for &y in &offsets {
            assert!(offsets.iter().any(|&other| other == -y));
        }
        for pair in offsets.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn beam_wider_than_target_yields_no_offsets() {
        assert!(generate_offsets(1.0, 2.0, true).is_empty());
    }

    #[test]
    fn non_positive_spacing_terminates_with_at_most_one_offset() {
        assert!(generate_offsets(10.0, 0.0, true).len() <= 1);
        assert!(generate_offsets(10.0, -1.0, true).len() <= 1);
        assert!(generate_offsets(-10.0, 2.0, true).is_empty());
    }
}
