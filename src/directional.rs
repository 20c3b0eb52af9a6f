use super::common::*;
use super::edge_context::*;
use super::scale_table::*;

// All predictors here work on a square block of `bs` samples starting at
// dst[0] with the given stride; the context must hold at least `bs` above and
// `bs` left samples.

#[inline(always)]
fn weighted(a: u8, b: u8, i: usize) -> u8 {
    iscale_round(2 * a as u32 + (i as u32 + 1) * b as u32, 1 + i) as u8
}

/// Near-horizontal, going down-left.
pub fn predict_d27(dst: &mut [u8], stride: usize, bs: usize, ctx: &EdgeContext) {
    // half-pel left sample for even columns, full-pel for odd ones
    let edge = |r: usize, c: usize| {
        if c & 1 == 1 {
            ctx.left(r + 1)
        } else {
            avg2(ctx.left(r), ctx.left(r + 1))
        }
    };

    for c in 0..bs - 2 {
        dst[c] = weighted(edge(0, c), ctx.above(c + 2), c);
    }
    for r in 1..bs / 2 - 1 {
        for c in 0..bs - 2 - 2 * r {
            let b = dst[(r - 1) * stride + c + 2];
            dst[r * stride + c] = weighted(edge(r, c), b, c);
        }
    }
    for r in bs / 2 - 1..bs - 1 {
        for c in 0..bs {
            let h = r - c / 2;
            dst[h * stride + c] = edge(r, c);
        }
    }

    // bottom-right triangle
    let r = bs - 1;
    dst[r * stride] = avg2(dst[(r - 1) * stride], ctx.left(r));
    for r in (bs / 2..=bs - 2).rev() {
        let w = (bs - 1 - r) * 2;
        dst[r * stride + w] = avg2(dst[(r - 1) * stride + w], dst[r * stride + w - 1]);
    }
    for c in 1..bs {
        for r in (bs / 2 + c / 2..bs).rev() {
            let w = c + (bs - 1 - r) * 2;
            dst[r * stride + w] = avg2(dst[(r - 1) * stride + w], dst[r * stride + w - 1]);
        }
    }
}

/// Near-vertical, going down-left; the transpose of d27.
pub fn predict_d63(dst: &mut [u8], stride: usize, bs: usize, ctx: &EdgeContext) {
    let edge = |r: usize, c: usize| {
        if r & 1 == 1 {
            ctx.above(c + 1)
        } else {
            avg2(ctx.above(c), ctx.above(c + 1))
        }
    };

    for r in 0..bs - 2 {
        dst[r * stride] = weighted(edge(r, 0), ctx.left(r + 2), r);
    }
    for c in 1..bs / 2 - 1 {
        for r in 0..bs - 2 - 2 * c {
            let b = dst[(r + 2) * stride + c - 1];
            dst[r * stride + c] = weighted(edge(r, c), b, c);
        }
    }
    for c in bs / 2 - 1..bs - 1 {
        for r in 0..bs {
            let w = c - r / 2;
            dst[r * stride + w] = edge(r, c);
        }
    }

    let c = bs - 1;
    dst[c] = avg2(dst[c - 1], ctx.above(c));
    for c in (bs / 2..=bs - 2).rev() {
        let h = (bs - 1 - c) * 2;
        dst[h * stride + c] = avg2(dst[h * stride + c - 1], dst[(h - 1) * stride + c]);
    }
    for r in 1..bs {
        for c in (bs / 2 + r / 2..bs).rev() {
            let h = r + (bs - 1 - c) * 2;
            dst[h * stride + c] = avg2(dst[h * stride + c - 1], dst[(h - 1) * stride + c]);
        }
    }
}

/// Pure 45 degree diagonal from the top-right.
pub fn predict_d45(dst: &mut [u8], stride: usize, bs: usize, ctx: &EdgeContext) {
    let diagonal = |dst: &mut [u8], r: usize, above: u8, left: u8| {
        for c in 0..=r {
            let v = above as u32 * (c as u32 + 1) + left as u32 * (r - c + 1) as u32;
            dst[(r - c) * stride + c] = iscale_round(v, r) as u8;
        }
    };
    for r in 0..bs - 1 {
        diagonal(dst, r, ctx.above(r + 1), ctx.left(r + 1));
    }
    let r = bs - 1;
    diagonal(dst, r, ctx.above(r), ctx.left(r));

    for r in 1..bs {
        for c in bs - r..bs {
            dst[r * stride + c] = avg2(dst[(r - 1) * stride + c], dst[r * stride + c - 1]);
        }
    }
}

/// Pure 135 degree diagonal, top-left to bottom-right.
pub fn predict_d135(dst: &mut [u8], stride: usize, bs: usize, ctx: &EdgeContext) {
    dst[0] = ctx.corner();
    for c in 1..bs {
        dst[c] = ctx.above(c - 1);
    }
    for r in 1..bs {
        dst[r * stride] = ctx.left(r - 1);
    }
    for r in 1..bs {
        for c in 1..bs {
            dst[r * stride + c] = dst[(r - 1) * stride + c - 1];
        }
    }
}

pub fn predict_d117(dst: &mut [u8], stride: usize, bs: usize, ctx: &EdgeContext) {
    let above_m1 = |c: usize| {
        if c == 0 {
            ctx.corner()
        } else {
            ctx.above(c - 1)
        }
    };
    for c in 0..bs {
        dst[c] = avg2(above_m1(c), ctx.above(c));
    }
    for c in 0..bs {
        dst[stride + c] = above_m1(c);
    }
    for r in 2..bs {
        dst[r * stride] = ctx.left(r - 2);
        for c in 1..bs {
            dst[r * stride + c] = dst[(r - 2) * stride + c - 1];
        }
    }
}

pub fn predict_d153(dst: &mut [u8], stride: usize, bs: usize, ctx: &EdgeContext) {
    dst[0] = avg2(ctx.corner(), ctx.left(0));
    for r in 1..bs {
        dst[r * stride] = avg2(ctx.left(r - 1), ctx.left(r));
    }
    dst[1] = ctx.corner();
    for r in 1..bs {
        dst[r * stride + 1] = ctx.left(r - 1);
    }
    for c in 0..bs - 2 {
        dst[c + 2] = ctx.above(c);
    }
    for r in 1..bs {
        for c in 0..bs - 2 {
            dst[r * stride + c + 2] = dst[(r - 1) * stride + c];
        }
    }
}

/// Runs the square predictor for a directional mode. Returns `false` for
/// the non-directional modes, leaving `dst` untouched.
pub fn predict_directional(
    mode: PredictionMode,
    dst: &mut [u8],
    stride: usize,
    bs: usize,
    ctx: &EdgeContext,
) -> bool {
    debug_assert!(ctx.above_len() >= bs && ctx.left_len() >= bs);
    match mode {
        PredictionMode::D45 => predict_d45(dst, stride, bs, ctx),
        PredictionMode::D135 => predict_d135(dst, stride, bs, ctx),
        PredictionMode::D117 => predict_d117(dst, stride, bs, ctx),
        PredictionMode::D153 => predict_d153(dst, stride, bs, ctx),
        PredictionMode::D27 => predict_d27(dst, stride, bs, ctx),
        PredictionMode::D63 => predict_d63(dst, stride, bs, ctx),
        PredictionMode::DC | PredictionMode::V | PredictionMode::H | PredictionMode::TM => {
            return false
        }
    }
    true
}
