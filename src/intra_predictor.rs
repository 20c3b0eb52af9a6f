use super::common::*;
use super::directional::*;
use super::edge_context::*;
use debug_print::*;

pub struct IntraPredictor {
    pub edge: EdgeContext,
    // square working area for non-square directional prediction
    pub scratch: Vec2d<u8>,
}

impl IntraPredictor {
    pub fn new() -> IntraPredictor {
        IntraPredictor {
            edge: EdgeContext::new(),
            scratch: vec2d![0; MAX_BLOCK_SIZE; MAX_BLOCK_SIZE],
        }
    }

    /// Predicts the `bw`x`bh` block at `dst[dst_off]` from the neighbours of
    /// the block at `src[src_off]`.
    pub fn build_intra_predictors(
        &mut self,
        src: &[u8],
        src_off: usize,
        src_stride: usize,
        dst: &mut [u8],
        dst_off: usize,
        dst_stride: usize,
        mode: PredictionMode,
        bw: usize,
        bh: usize,
        avail: NeighborAvailability,
    ) {
        debug_assert!(is_valid_block_size(bw, bh), "invalid block {}x{}", bw, bh);
        self.edge.fill(src, src_off, src_stride, bw, bh, avail);
        self.predict_from_context(dst, dst_off, dst_stride, mode, bw, bh);
    }

    /// Same as `build_intra_predictors` with the neighbours read from the
    /// buffer that receives the prediction.
    pub fn predict_in_place(
        &mut self,
        buf: &mut [u8],
        off: usize,
        stride: usize,
        mode: PredictionMode,
        bw: usize,
        bh: usize,
        avail: NeighborAvailability,
    ) {
        debug_assert!(is_valid_block_size(bw, bh), "invalid block {}x{}", bw, bh);
        self.edge.fill(buf, off, stride, bw, bh, avail);
        self.predict_from_context(buf, off, stride, mode, bw, bh);
    }

    /// Predicts from the context currently held in `self.edge`.
    pub fn predict_from_context(
        &mut self,
        dst: &mut [u8],
        off: usize,
        stride: usize,
        mode: PredictionMode,
        bw: usize,
        bh: usize,
    ) {
        let dst = &mut dst[off..];
        match mode {
            PredictionMode::DC => Self::predict_dc(dst, stride, bw, bh, &self.edge),
            PredictionMode::V => Self::predict_v(dst, stride, bw, bh, &self.edge),
            PredictionMode::H => Self::predict_h(dst, stride, bw, bh, &self.edge),
            PredictionMode::TM => Self::predict_tm(dst, stride, bw, bh, &self.edge),
            PredictionMode::D45
            | PredictionMode::D135
            | PredictionMode::D117
            | PredictionMode::D153
            | PredictionMode::D27
            | PredictionMode::D63 => self.predict_directional_block(dst, stride, mode, bw, bh),
        }
    }

    pub fn predict_dc(dst: &mut [u8], stride: usize, bw: usize, bh: usize, ctx: &EdgeContext) {
        let avail = ctx.avail;
        let dc_val = if avail.up || avail.left {
            let mut sum = 0u32;
            let mut count = 0u32;
            if avail.up {
                sum += ctx.above_row()[..bw].iter().map(|&a| a as u32).sum::<u32>();
                count += bw as u32;
            }
            if avail.left {
                sum += ctx.left_col()[..bh].iter().map(|&l| l as u32).sum::<u32>();
                count += bh as u32;
            }
            ((sum + (count >> 1)) / count) as u8
        } else {
            128
        };
        for y in 0..bh {
            dst[y * stride..y * stride + bw].fill(dc_val);
        }
    }

    pub fn predict_v(dst: &mut [u8], stride: usize, bw: usize, bh: usize, ctx: &EdgeContext) {
        let above = &ctx.above_row()[..bw];
        for y in 0..bh {
            dst[y * stride..y * stride + bw].copy_from_slice(above);
        }
    }

    pub fn predict_h(dst: &mut [u8], stride: usize, bw: usize, bh: usize, ctx: &EdgeContext) {
        for (y, &left) in ctx.left_col()[..bh].iter().enumerate() {
            dst[y * stride..y * stride + bw].fill(left);
        }
    }

    pub fn predict_tm(dst: &mut [u8], stride: usize, bw: usize, bh: usize, ctx: &EdgeContext) {
        let corner = ctx.corner() as i32;
        let above = &ctx.above_row()[..bw];
        for (y, &left) in ctx.left_col()[..bh].iter().enumerate() {
            let row = &mut dst[y * stride..y * stride + bw];
            for (p, &a) in row.iter_mut().zip(above) {
                *p = clip_pixel(left as i32 + a as i32 - corner);
            }
        }
    }

    // Directional modes only exist for square blocks. A rectangular block is
    // predicted as the square of its longer side, with the shorter context
    // padded by its last sample, and then cropped.
    fn predict_directional_block(
        &mut self,
        dst: &mut [u8],
        stride: usize,
        mode: PredictionMode,
        bw: usize,
        bh: usize,
    ) {
        if bw == bh {
            let written = predict_directional(mode, dst, stride, bw, &self.edge);
            debug_assert!(written);
            return;
        }

        let bs = bw.max(bh);
        if bw > bh {
            self.edge.extend_left(bs);
        } else {
            self.edge.extend_above(bs);
        }
        debug_eprintln!("pred {:?} {}x{} via {}x{} square", mode, bw, bh, bs, bs);
        let scratch_stride = self.scratch.stride();
        let written =
            predict_directional(mode, &mut self.scratch.data, scratch_stride, bs, &self.edge);
        debug_assert!(written);
        for y in 0..bh {
            dst[y * stride..y * stride + bw].copy_from_slice(&self.scratch[y][..bw]);
        }
    }
}

impl Default for IntraPredictor {
    fn default() -> Self {
        IntraPredictor::new()
    }
}
