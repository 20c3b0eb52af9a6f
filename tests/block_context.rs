use num::FromPrimitive;
use vp9_intra::block_context::*;
use vp9_intra::common::*;
use vp9_intra::edge_context::*;
use vp9_intra::intra_predictor::*;

fn flat_context(width: usize, height: usize, v: u8) -> MacroblockContext {
    let mut xd = MacroblockContext::new(width, height);
    for plane in xd.planes.iter_mut() {
        plane.fill(v);
    }
    xd
}

#[test]
fn mode_codes() {
    let expected = [
        (0, PredictionMode::DC),
        (1, PredictionMode::V),
        (2, PredictionMode::H),
        (3, PredictionMode::D45),
        (4, PredictionMode::D135),
        (5, PredictionMode::D117),
        (6, PredictionMode::D153),
        (7, PredictionMode::D27),
        (8, PredictionMode::D63),
        (9, PredictionMode::TM),
    ];
    for (code, mode) in expected {
        assert_eq!(PredictionMode::from_u8(code), Some(mode));
        assert_eq!(PredictionMode::from_name(mode.name()), Some(mode));
    }
    assert_eq!(PredictionMode::from_u8(10), None);
    assert_eq!(PredictionMode::from_name("D135"), Some(PredictionMode::D135));
    assert_eq!(PredictionMode::from_name("d90"), None);
}

#[test]
fn frame_corner_uses_default_samples() {
    let mut xd = flat_context(32, 32, 77);
    xd.set_block(0, 0, 16);

    xd.mode_info = ModeInfo::new(PredictionMode::V, PredictionMode::H);
    xd.predict_sby_s(BlockSize::Block16x16);
    xd.predict_sbuv_s(BlockSize::Block16x16);
    assert!((0..16).all(|y| xd.planes[0][y][..16].iter().all(|&s| s == 127)));
    for p in 1..3 {
        assert!((0..8).all(|y| xd.planes[p][y][..8].iter().all(|&s| s == 129)));
    }

    // left 129 + above 127 - corner 127
    xd.mode_info = ModeInfo::new(PredictionMode::TM, PredictionMode::DC);
    xd.predict_sby_s(BlockSize::Block16x16);
    xd.predict_sbuv_s(BlockSize::Block16x16);
    assert!((0..16).all(|y| xd.planes[0][y][..16].iter().all(|&s| s == 129)));
    for p in 1..3 {
        assert!((0..8).all(|y| xd.planes[p][y][..8].iter().all(|&s| s == 128)));
    }
}

#[test]
fn raster_dc_over_flat_frame() {
    let mut xd = flat_context(64, 32, 77);
    xd.mode_info = ModeInfo::new(PredictionMode::DC, PredictionMode::DC);
    for y in (0..32).step_by(16) {
        for x in (0..64).step_by(16) {
            xd.set_block(x, y, 16);
            xd.predict_sby_s(BlockSize::Block16x16);
            let expected = if x == 0 && y == 0 { 128 } else { 77 };
            for row in y..y + 16 {
                assert!(xd.planes[0][row][x..x + 16].iter().all(|&s| s == expected));
            }
            // restore the reconstruction
            for row in y..y + 16 {
                xd.planes[0][row][x..x + 16].fill(77);
            }
        }
    }
}

#[test]
fn rectangular_blocks() {
    let mut xd = MacroblockContext::new(64, 64);
    for y in 0..64 {
        for (x, s) in xd.planes[0][y].iter_mut().enumerate() {
            *s = (x * 4 + y) as u8;
        }
    }
    xd.set_block(16, 16, 16);
    xd.mode_info = ModeInfo::new(PredictionMode::V, PredictionMode::DC);
    xd.predict_sby_s(BlockSize::Block16x8);
    let above: Vec<u8> = (16..32).map(|x| (x * 4 + 15) as u8).collect();
    for y in 16..24 {
        assert_eq!(&xd.planes[0][y][16..32], &above[..]);
    }
    // the row below the block is untouched
    assert_eq!(xd.planes[0][24][16], (16 * 4 + 24) as u8);

    xd.set_block(32, 32, 8);
    xd.mode_info = ModeInfo::new(PredictionMode::H, PredictionMode::DC);
    xd.predict_sby_s(BlockSize::Block8x16);
    for y in 32..48 {
        let left = (31 * 4 + y) as u8;
        assert!(xd.planes[0][y][32..40].iter().all(|&s| s == left));
    }
    assert_eq!(xd.planes[0][32][40], (40 * 4 + 32) as u8);
}

#[test]
fn directional_modes_stay_inside_the_block() {
    for mode in PredictionMode::ALL {
        for (bw, bh) in [(4, 4), (8, 4), (4, 8), (16, 32), (64, 32)] {
            let stride = 128;
            let mut src = vec![0u8; stride * 128];
            for (i, s) in src.iter_mut().enumerate() {
                *s = (i * 7 % 251) as u8;
            }
            let off = 64 * stride + 32;
            let mut dst = vec![3u8; 64 * 64];
            let mut predictor = IntraPredictor::new();
            predictor.build_intra_predictors(
                &src,
                off,
                stride,
                &mut dst,
                0,
                64,
                mode,
                bw,
                bh,
                NeighborAvailability::all(),
            );
            for y in 0..64 {
                for x in 0..64 {
                    if x >= bw || y >= bh {
                        assert_eq!(dst[y * 64 + x], 3, "{:?} {}x{}", mode, bw, bh);
                    }
                }
            }

            let mut in_place = src.clone();
            predictor.predict_in_place(
                &mut in_place,
                off,
                stride,
                mode,
                bw,
                bh,
                NeighborAvailability::all(),
            );
            for y in 0..bh {
                assert_eq!(
                    &in_place[off + y * stride..off + y * stride + bw],
                    &dst[y * 64..y * 64 + bw]
                );
            }
        }
    }
}
