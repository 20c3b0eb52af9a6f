#[allow(unused_imports)]
use num::FromPrimitive;
use std::ops::{Index, IndexMut};

pub const MAX_BLOCK_SIZE: usize = 64;
pub const LOG2_MAX_BLOCK_SIZE: usize = 6;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, FromPrimitive)]
#[allow(clippy::upper_case_acronyms)]
pub enum PredictionMode {
    DC = 0,
    V = 1,
    H = 2,
    D45 = 3,
    D135 = 4,
    D117 = 5,
    D153 = 6,
    D27 = 7,
    D63 = 8,
    TM = 9,
}

impl PredictionMode {
    pub const ALL: [PredictionMode; 10] = [
        PredictionMode::DC,
        PredictionMode::V,
        PredictionMode::H,
        PredictionMode::D45,
        PredictionMode::D135,
        PredictionMode::D117,
        PredictionMode::D153,
        PredictionMode::D27,
        PredictionMode::D63,
        PredictionMode::TM,
    ];

    pub fn from_name(name: &str) -> Option<PredictionMode> {
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.name().eq_ignore_ascii_case(name))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::DC => "dc",
            Self::V => "v",
            Self::H => "h",
            Self::D45 => "d45",
            Self::D135 => "d135",
            Self::D117 => "d117",
            Self::D153 => "d153",
            Self::D27 => "d27",
            Self::D63 => "d63",
            Self::TM => "tm",
        }
    }

    pub fn is_directional(&self) -> bool {
        matches!(
            self,
            Self::D45 | Self::D135 | Self::D117 | Self::D153 | Self::D27 | Self::D63
        )
    }
}

// sizes in 8x8 mode info units
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BlockSize {
    Block8x8,
    Block8x16,
    Block16x8,
    Block16x16,
    Block16x32,
    Block32x16,
    Block32x32,
    Block32x64,
    Block64x32,
    Block64x64,
}

pub const MI_SIZE: usize = 8;
pub const MI_UV_SIZE: usize = 4;

impl BlockSize {
    pub fn mi_width_log2(&self) -> usize {
        match self {
            Self::Block8x8 | Self::Block8x16 => 0,
            Self::Block16x8 | Self::Block16x16 | Self::Block16x32 => 1,
            Self::Block32x16 | Self::Block32x32 | Self::Block32x64 => 2,
            Self::Block64x32 | Self::Block64x64 => 3,
        }
    }

    pub fn mi_height_log2(&self) -> usize {
        match self {
            Self::Block8x8 | Self::Block16x8 => 0,
            Self::Block8x16 | Self::Block16x16 | Self::Block32x16 => 1,
            Self::Block16x32 | Self::Block32x32 | Self::Block64x32 => 2,
            Self::Block32x64 | Self::Block64x64 => 3,
        }
    }

    pub fn luma_size(&self) -> (usize, usize) {
        (MI_SIZE << self.mi_width_log2(), MI_SIZE << self.mi_height_log2())
    }

    pub fn chroma_size(&self) -> (usize, usize) {
        (
            MI_UV_SIZE << self.mi_width_log2(),
            MI_UV_SIZE << self.mi_height_log2(),
        )
    }

    pub fn from_luma_size(width: usize, height: usize) -> Option<BlockSize> {
        match (width, height) {
            (8, 8) => Some(Self::Block8x8),
            (8, 16) => Some(Self::Block8x16),
            (16, 8) => Some(Self::Block16x8),
            (16, 16) => Some(Self::Block16x16),
            (16, 32) => Some(Self::Block16x32),
            (32, 16) => Some(Self::Block32x16),
            (32, 32) => Some(Self::Block32x32),
            (32, 64) => Some(Self::Block32x64),
            (64, 32) => Some(Self::Block64x32),
            (64, 64) => Some(Self::Block64x64),
            _ => None,
        }
    }
}

/// Checks the block shapes the predictors support: powers of two in [4, 64]
/// with an aspect ratio of at most 2:1.
pub fn is_valid_block_size(bw: usize, bh: usize) -> bool {
    let valid_dim = |d: usize| d.is_power_of_two() && (4..=MAX_BLOCK_SIZE).contains(&d);
    valid_dim(bw) && valid_dim(bh) && bw.max(bh) <= 2 * bw.min(bh)
}

#[inline(always)]
pub fn round_power_of_two(value: u32, n: u32) -> u32 {
    (value + (1 << (n - 1))) >> n
}

#[inline(always)]
pub fn avg2(a: u8, b: u8) -> u8 {
    round_power_of_two(a as u32 + b as u32, 1) as u8
}

#[inline(always)]
pub fn clip_pixel(v: i32) -> u8 {
    num::clamp(v, 0, 255) as u8
}

#[derive(Clone, Debug)]
pub struct Vec2d<T> {
    pub data: Vec<T>,
    pub height: usize,
    pub width: usize,
    pub log2_stride: usize,
}

impl<T: Copy> Vec2d<T> {
    #[inline(always)]
    pub fn new(v: T, height: usize, width: usize) -> Vec2d<T> {
        let log2_stride = (width * 2 - 1).ilog2() as usize;
        Vec2d {
            data: vec![v; height << log2_stride],
            height,
            width,
            log2_stride,
        }
    }

    #[inline(always)]
    pub fn fill(&mut self, v: T) {
        self.data.fill(v);
    }

    #[inline(always)]
    pub fn stride(&self) -> usize {
        1 << self.log2_stride
    }

    #[inline(always)]
    pub fn offset(&self, y: usize, x: usize) -> usize {
        (y << self.log2_stride) + x
    }
}

impl<T> Index<usize> for Vec2d<T> {
    type Output = [T];
    #[inline(always)]
    fn index(&self, index: usize) -> &Self::Output {
        let offset = index << self.log2_stride;
        &self.data[offset..offset + self.width]
    }
}

impl<T> IndexMut<usize> for Vec2d<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut [T] {
        let offset = index << self.log2_stride;
        &mut self.data[offset..offset + self.width]
    }
}

#[macro_export]
macro_rules! vec2d {
    ($elem:expr; $h:expr; $w:expr) => {
        $crate::common::Vec2d::new($elem, $h, $w)
    };
}
