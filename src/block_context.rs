use super::common::*;
use super::edge_context::*;
#[cfg(feature = "interintra")]
use super::interintra::*;
use super::intra_predictor::*;
use debug_print::*;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ModeInfo {
    pub mode: PredictionMode,
    pub uv_mode: PredictionMode,
    #[cfg(feature = "interintra")]
    pub interintra_mode: PredictionMode,
    #[cfg(feature = "interintra")]
    pub interintra_uv_mode: PredictionMode,
}

impl ModeInfo {
    pub fn new(mode: PredictionMode, uv_mode: PredictionMode) -> ModeInfo {
        ModeInfo {
            mode,
            uv_mode,
            #[cfg(feature = "interintra")]
            interintra_mode: mode,
            #[cfg(feature = "interintra")]
            interintra_uv_mode: uv_mode,
        }
    }
}

/// Per-block decode state: the three reconstruction planes (4:2:0), the luma
/// position of the current block, its neighbour availability and its modes.
pub struct MacroblockContext {
    pub planes: [Vec2d<u8>; 3],
    pub x: usize,
    pub y: usize,
    pub up_available: bool,
    pub left_available: bool,
    pub right_available: bool,
    pub mode_info: ModeInfo,
    pub predictor: IntraPredictor,
}

impl MacroblockContext {
    pub fn new(width: usize, height: usize) -> MacroblockContext {
        #[cfg(debug_assertions)]
        {
            assert!(width > 0, "width must be greater than 0.");
            assert!(height > 0, "height must be greater than 0.");
        }
        MacroblockContext {
            planes: [
                vec2d![0; height; width],
                vec2d![0; (height + 1) / 2; (width + 1) / 2],
                vec2d![0; (height + 1) / 2; (width + 1) / 2],
            ],
            x: 0,
            y: 0,
            up_available: false,
            left_available: false,
            right_available: false,
            mode_info: ModeInfo::new(PredictionMode::DC, PredictionMode::DC),
            predictor: IntraPredictor::new(),
        }
    }

    /// Moves to the block at luma position (`x`, `y`).
    pub fn set_block(&mut self, x: usize, y: usize, bw: usize) {
        self.x = x;
        self.y = y;
        self.up_available = y > 0;
        self.left_available = x > 0;
        self.right_available = x + bw < self.planes[0].width;
    }

    pub fn availability(&self) -> NeighborAvailability {
        NeighborAvailability::new(self.up_available, self.left_available, self.right_available)
    }

    // offset of the current block's top-left sample in a plane
    fn block_offset(&self, plane: usize) -> usize {
        if plane == 0 {
            self.planes[0].offset(self.y, self.x)
        } else {
            self.planes[plane].offset(self.y >> 1, self.x >> 1)
        }
    }

    /// Predicts the luma block in place with `mode_info.mode`.
    pub fn predict_sby_s(&mut self, bsize: BlockSize) {
        let (bw, bh) = bsize.luma_size();
        self.predict_plane_in_place(0, self.mode_info.mode, bw, bh);
    }

    /// Predicts both chroma blocks in place with `mode_info.uv_mode`.
    pub fn predict_sbuv_s(&mut self, bsize: BlockSize) {
        let (bw, bh) = bsize.chroma_size();
        let uv_mode = self.mode_info.uv_mode;
        self.predict_plane_in_place(1, uv_mode, bw, bh);
        self.predict_plane_in_place(2, uv_mode, bw, bh);
    }

    fn predict_plane_in_place(&mut self, plane: usize, mode: PredictionMode, bw: usize, bh: usize) {
        let off = self.block_offset(plane);
        let avail = self.availability();
        debug_eprintln!(
            "plane {} pred {:?} {}x{} @ ({},{})",
            plane,
            mode,
            bw,
            bh,
            self.x,
            self.y
        );
        let buf = &mut self.planes[plane];
        let stride = buf.stride();
        self.predictor
            .predict_in_place(&mut buf.data, off, stride, mode, bw, bh, avail);
    }

    /// Predicts one 8x8 luma quarter of a 16x16 macroblock in place.
    /// `block4x4_idx` is the raster index (0, 2, 8 or 10) of its top-left
    /// 4x4 block.
    pub fn intra8x8_predict(&mut self, block4x4_idx: usize, mode: PredictionMode) {
        let block_idx = (block4x4_idx >> 2) | ((block4x4_idx & 2) != 0) as usize;
        let avail = self.sub_block_availability(block_idx);
        let off = self.block_offset(0)
            + self.planes[0].offset((block4x4_idx >> 2) * 4, (block4x4_idx & 3) * 4);
        let stride = self.planes[0].stride();
        self.predictor
            .predict_in_place(&mut self.planes[0].data, off, stride, mode, 8, 8, avail);
    }

    /// Predicts one 4x4 quarter of an 8x8 chroma block of `plane` in place.
    pub fn intra_uv4x4_predict(&mut self, plane: usize, block4x4_idx: usize, mode: PredictionMode) {
        debug_assert!(plane == 1 || plane == 2);
        let block_idx = block4x4_idx & 3;
        let avail = self.sub_block_availability(block_idx);
        let off = self.block_offset(plane)
            + self.planes[plane].offset((block_idx >> 1) * 4, (block_idx & 1) * 4);
        let stride = self.planes[plane].stride();
        self.predictor
            .predict_in_place(&mut self.planes[plane].data, off, stride, mode, 4, 4, avail);
    }

    // quarters other than the top row / left column see their siblings
    fn sub_block_availability(&self, block_idx: usize) -> NeighborAvailability {
        NeighborAvailability::new(
            (block_idx >> 1) != 0 || self.up_available,
            (block_idx & 1) != 0 || self.left_available,
            (block_idx & 1) == 0 || self.right_available,
        )
    }

    /// Blends an intra prediction made with `mode_info.interintra_mode` into
    /// the luma inter prediction `ypred`.
    #[cfg(feature = "interintra")]
    pub fn build_interintra_predictors_sby(
        &mut self,
        ypred: &mut [u8],
        ystride: usize,
        bsize: BlockSize,
    ) {
        let (bw, bh) = bsize.luma_size();
        let mode = self.mode_info.interintra_mode;
        let mut intrapredictor = [0u8; MAX_BLOCK_SIZE * MAX_BLOCK_SIZE];
        self.predict_plane(0, &mut intrapredictor, bw, mode, bw, bh);
        combine_interintra(mode, ypred, ystride, &intrapredictor, bw, bw, bh);
    }

    #[cfg(feature = "interintra")]
    pub fn build_interintra_predictors_sbuv(
        &mut self,
        upred: &mut [u8],
        vpred: &mut [u8],
        uvstride: usize,
        bsize: BlockSize,
    ) {
        let (bw, bh) = bsize.chroma_size();
        let mode = self.mode_info.interintra_uv_mode;
        let mut uintrapredictor = [0u8; MAX_BLOCK_SIZE * MAX_BLOCK_SIZE / 4];
        let mut vintrapredictor = [0u8; MAX_BLOCK_SIZE * MAX_BLOCK_SIZE / 4];
        self.predict_plane(1, &mut uintrapredictor, bw, mode, bw, bh);
        self.predict_plane(2, &mut vintrapredictor, bw, mode, bw, bh);
        combine_interintra(mode, upred, uvstride, &uintrapredictor, bw, bw, bh);
        combine_interintra(mode, vpred, uvstride, &vintrapredictor, bw, bw, bh);
    }

    #[cfg(feature = "interintra")]
    pub fn build_interintra_predictors(
        &mut self,
        ypred: &mut [u8],
        upred: &mut [u8],
        vpred: &mut [u8],
        ystride: usize,
        uvstride: usize,
        bsize: BlockSize,
    ) {
        self.build_interintra_predictors_sby(ypred, ystride, bsize);
        self.build_interintra_predictors_sbuv(upred, vpred, uvstride, bsize);
    }

    #[cfg(feature = "interintra")]
    fn predict_plane(
        &mut self,
        plane: usize,
        dst: &mut [u8],
        dst_stride: usize,
        mode: PredictionMode,
        bw: usize,
        bh: usize,
    ) {
        let off = self.block_offset(plane);
        let avail = self.availability();
        let src = &self.planes[plane];
        self.predictor.build_intra_predictors(
            &src.data,
            off,
            src.stride(),
            dst,
            0,
            dst_stride,
            mode,
            bw,
            bh,
            avail,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_context(width: usize, height: usize) -> MacroblockContext {
        let mut xd = MacroblockContext::new(width, height);
        for (p, plane) in xd.planes.iter_mut().enumerate() {
            for y in 0..plane.height {
                for (x, s) in plane[y].iter_mut().enumerate() {
                    *s = (x * 3 + y * 5 + p * 40) as u8;
                }
            }
        }
        xd
    }

    #[test]
    fn set_block_derives_availability() {
        let mut xd = MacroblockContext::new(64, 64);
        xd.set_block(0, 0, 16);
        assert_eq!(xd.availability(), NeighborAvailability::new(false, false, true));
        xd.set_block(48, 16, 16);
        assert_eq!(xd.availability(), NeighborAvailability::new(true, true, false));
    }

    #[test]
    fn sby_predicts_luma_in_place() {
        let mut xd = gradient_context(64, 64);
        xd.set_block(16, 16, 16);
        xd.mode_info = ModeInfo::new(PredictionMode::V, PredictionMode::H);
        let above: Vec<u8> = xd.planes[0][15][16..32].to_vec();
        xd.predict_sby_s(BlockSize::Block16x16);
        for y in 16..32 {
            assert_eq!(&xd.planes[0][y][16..32], &above[..]);
        }
        // outside untouched
        assert_eq!(xd.planes[0][16][15], (15 * 3 + 16 * 5) as u8);
        assert_eq!(xd.planes[0][32][16], (16 * 3 + 32 * 5) as u8);
    }

    #[test]
    fn sbuv_predicts_both_chroma_planes() {
        let mut xd = gradient_context(64, 64);
        xd.set_block(32, 32, 32);
        xd.mode_info = ModeInfo::new(PredictionMode::V, PredictionMode::H);
        xd.predict_sbuv_s(BlockSize::Block32x32);
        for p in 1..3 {
            for y in 16..32 {
                let left = (15 * 3 + y * 5 + p * 40) as u8;
                assert!(xd.planes[p][y][16..32].iter().all(|&s| s == left));
            }
        }
    }

    #[test]
    fn intra8x8_sub_block_availability() {
        let mut xd = gradient_context(32, 32);
        xd.set_block(0, 0, 16);
        // bottom-right quarter sees its siblings even at the frame corner
        xd.intra8x8_predict(10, PredictionMode::DC);
        let above: u32 = (8..16).map(|x| (x * 3 + 7 * 5) as u32).sum();
        let left: u32 = (8..16).map(|y| (7 * 3 + y * 5) as u32).sum();
        let dc = ((above + left + 8) / 16) as u8;
        assert!((8..16).all(|y| xd.planes[0][y][8..16].iter().all(|&s| s == dc)));

        // top-left quarter at the frame corner has no neighbours
        xd.intra8x8_predict(0, PredictionMode::DC);
        assert!((0..8).all(|y| xd.planes[0][y][..8].iter().all(|&s| s == 128)));
    }

    #[test]
    fn intra_uv4x4_uses_its_own_plane() {
        let mut xd = gradient_context(32, 32);
        xd.set_block(16, 16, 16);
        xd.intra_uv4x4_predict(2, 17, PredictionMode::V);
        let above: Vec<u8> = xd.planes[2][7][12..16].to_vec();
        for y in 8..12 {
            assert_eq!(&xd.planes[2][y][12..16], &above[..]);
        }
        // the other chroma plane is untouched
        assert_eq!(xd.planes[1][8][12], (12 * 3 + 8 * 5 + 40) as u8);
    }

    #[cfg(feature = "interintra")]
    #[test]
    fn interintra_blends_all_planes() {
        let mut xd = gradient_context(64, 64);
        xd.set_block(16, 16, 16);
        xd.mode_info = ModeInfo::new(PredictionMode::TM, PredictionMode::TM);
        xd.mode_info.interintra_mode = PredictionMode::DC;
        xd.mode_info.interintra_uv_mode = PredictionMode::DC;

        let mut ypred = vec![0u8; 16 * 16];
        let mut upred = vec![100u8; 8 * 8];
        let mut vpred = vec![200u8; 8 * 8];
        xd.build_interintra_predictors(
            &mut ypred,
            &mut upred,
            &mut vpred,
            16,
            8,
            BlockSize::Block16x16,
        );

        let mut intra = vec![0u8; 16 * 16];
        let src = &xd.planes[0];
        IntraPredictor::new().build_intra_predictors(
            &src.data,
            src.offset(16, 16),
            src.stride(),
            &mut intra,
            0,
            16,
            PredictionMode::DC,
            16,
            16,
            xd.availability(),
        );
        for (p, i) in ypred.iter().zip(&intra) {
            assert_eq!(*p, i >> 1);
        }
        // DC blending is a plain average, so a flat inter block stays flat
        assert!(upred.iter().all(|&s| s == upred[0]));
        assert!(vpred.iter().all(|&s| s == vpred[0]));
        assert_ne!(upred[0], vpred[0]);
    }

    #[cfg(feature = "interintra")]
    #[test]
    fn interintra_leaves_reconstruction_alone() {
        let mut xd = gradient_context(32, 32);
        xd.set_block(8, 8, 8);
        xd.mode_info.interintra_mode = PredictionMode::D45;
        let before = xd.planes[0].data.clone();
        let mut ypred = vec![50u8; 8 * 8];
        xd.build_interintra_predictors_sby(&mut ypred, 8, BlockSize::Block8x8);
        assert_eq!(xd.planes[0].data, before);
    }
}
