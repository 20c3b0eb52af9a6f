//! Compound inter/intra prediction: an inter prediction is blended with an
//! intra prediction of the same block, trusting the intra samples most near
//! the edge they were extrapolated from.

use super::common::*;

const SCALE_BITS: u32 = 8;
const SCALE_MAX: u32 = 1 << SCALE_BITS;
const SCALE_ROUND: u32 = (1 << (SCALE_BITS - 1)) - 1;

// A + B * exp(-k * x), x being the distance from the predicting edge
pub const WEIGHTS_1D: [u8; 64] = [
    128, 125, 122, 119, 116, 114, 111, 109, 107, 105, 103, 101, 99, 97, 96, 94, 93, 91, 90, 89, 88,
    86, 85, 84, 83, 82, 81, 81, 80, 79, 78, 78, 77, 76, 76, 75, 75, 74, 74, 73, 73, 72, 72, 71, 71,
    71, 70, 70, 70, 70, 69, 69, 69, 69, 68, 68, 68, 68, 68, 67, 67, 67, 67, 67,
];

/// Step through `WEIGHTS_1D` per sample so that the curve spans the block.
pub fn size_scale(bw: usize, bh: usize) -> usize {
    match bw.max(bh) {
        s if s >= 64 => 1,
        32 => 2,
        16 => 4,
        8 => 8,
        _ => 16,
    }
}

/// Per-sample weight pattern of the intra prediction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BlendPattern {
    Rows,
    Columns,
    MostlyRows,
    MostlyColumns,
    NearestEdge,
    Diagonal,
    Average,
}

impl BlendPattern {
    pub fn for_mode(mode: PredictionMode) -> BlendPattern {
        match mode {
            PredictionMode::V => BlendPattern::Rows,
            PredictionMode::H => BlendPattern::Columns,
            PredictionMode::D63 | PredictionMode::D117 => BlendPattern::MostlyRows,
            PredictionMode::D27 | PredictionMode::D153 => BlendPattern::MostlyColumns,
            PredictionMode::D135 => BlendPattern::NearestEdge,
            PredictionMode::D45 => BlendPattern::Diagonal,
            PredictionMode::DC | PredictionMode::TM => BlendPattern::Average,
        }
    }

    /// Intra weight out of 256 for row `i`, column `j`; `None` for the plain
    /// average.
    #[inline(always)]
    pub fn weight(&self, i: usize, j: usize, scale: usize) -> Option<u32> {
        let w = |k: usize| WEIGHTS_1D[k * scale] as u32;
        match self {
            BlendPattern::Rows => Some(w(i)),
            BlendPattern::Columns => Some(w(j)),
            BlendPattern::MostlyRows => Some((w(i) * 3 + w(j)) >> 2),
            BlendPattern::MostlyColumns => Some((w(j) * 3 + w(i)) >> 2),
            BlendPattern::NearestEdge => Some(w(i.min(j))),
            BlendPattern::Diagonal => Some((w(i) + w(j)) >> 1),
            BlendPattern::Average => None,
        }
    }
}

/// Blends `intrapred` into `interpred` in place.
pub fn combine_interintra(
    mode: PredictionMode,
    interpred: &mut [u8],
    interstride: usize,
    intrapred: &[u8],
    intrastride: usize,
    bw: usize,
    bh: usize,
) {
    let pattern = BlendPattern::for_mode(mode);
    let scale = size_scale(bw, bh);
    for i in 0..bh {
        let inter = &mut interpred[i * interstride..i * interstride + bw];
        let intra = &intrapred[i * intrastride..i * intrastride + bw];
        for (j, (p, &q)) in inter.iter_mut().zip(intra).enumerate() {
            *p = match pattern.weight(i, j, scale) {
                Some(w) => (((SCALE_MAX - w) * *p as u32 + w * q as u32 + SCALE_ROUND)
                    >> SCALE_BITS) as u8,
                None => ((*p as u32 + q as u32) >> 1) as u8,
            };
        }
    }
}
