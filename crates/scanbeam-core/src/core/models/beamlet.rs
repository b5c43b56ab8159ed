/// One discrete scan position of the beam.
///
/// The index is 0-based and contiguous over a run; it determines the name of
/// every file produced for this position (`<index>.egsinp`,
/// `<index>.egsphsp1`). The offset is the signed lateral distance from the
/// target center along the scan axis, in cm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Beamlet {
    pub index: usize,
    pub offset: f64,
}

impl Beamlet {
    /// Pairs each offset with its position in the sequence. The ordering of
    /// `offsets` is significant: it fixes index assignment for the whole run.
    pub fn sequence(offsets: &[f64]) -> Vec<Beamlet> {
        offsets
            .iter()
            .enumerate()
            .map(|(index, &offset)| Beamlet { index, offset })
            .collect()
    }
}

/// Incidence direction of one beamlet relative to the target, as the pair of
/// direction cosines EGSnrc expects (`uinc`, `vinc`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionCosines {
    pub u: f64,
    pub v: f64,
}
