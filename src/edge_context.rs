use super::common::*;

const LEFT_OFFSET: usize = 0;
const CORNER_OFFSET: usize = LEFT_OFFSET + MAX_BLOCK_SIZE;
const ABOVE_OFFSET: usize = CORNER_OFFSET + 1;
const EDGE_LEN: usize = ABOVE_OFFSET + MAX_BLOCK_SIZE;

pub const DEFAULT_ABOVE_SAMPLE: u8 = 127;
pub const DEFAULT_LEFT_SAMPLE: u8 = 129;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct NeighborAvailability {
    pub up: bool,
    pub left: bool,
    pub right: bool,
}

impl NeighborAvailability {
    pub fn new(up: bool, left: bool, right: bool) -> NeighborAvailability {
        NeighborAvailability { up, left, right }
    }

    pub fn all() -> NeighborAvailability {
        NeighborAvailability::new(true, true, true)
    }
}

/// Neighbouring samples of one block.
///
/// The left column, the corner and the above row share a single buffer laid
/// out as `left[0..64] | corner | above[0..64]`, so the corner always sits
/// right before `above(0)`.
///
/// ```text
/// 127 127 127 .. 127 127 127 127 127 127
/// 129  A   B  ..  Y   Z
/// 129  C   D  ..  W   X
/// 129  E   F  ..  U   V
/// 129  G   H  ..  S   T   T   T   T   T
/// ```
#[derive(Clone)]
pub struct EdgeContext {
    data: [u8; EDGE_LEN],
    above_len: usize,
    left_len: usize,
    pub avail: NeighborAvailability,
}

impl EdgeContext {
    pub fn new() -> EdgeContext {
        EdgeContext {
            data: [0; EDGE_LEN],
            above_len: 0,
            left_len: 0,
            avail: NeighborAvailability::default(),
        }
    }

    pub fn from_samples(above: &[u8], left: &[u8], corner: u8) -> EdgeContext {
        debug_assert!(above.len() <= MAX_BLOCK_SIZE && left.len() <= MAX_BLOCK_SIZE);
        let mut ctx = EdgeContext::new();
        ctx.data[ABOVE_OFFSET..ABOVE_OFFSET + above.len()].copy_from_slice(above);
        ctx.data[LEFT_OFFSET..LEFT_OFFSET + left.len()].copy_from_slice(left);
        ctx.data[CORNER_OFFSET] = corner;
        ctx.above_len = above.len();
        ctx.left_len = left.len();
        ctx.avail = NeighborAvailability::all();
        ctx
    }

    /// Gathers the row above and the column left of the block whose top-left
    /// sample is `src[off]`, substituting defaults for missing neighbours.
    pub fn fill(
        &mut self,
        src: &[u8],
        off: usize,
        stride: usize,
        bw: usize,
        bh: usize,
        avail: NeighborAvailability,
    ) {
        debug_assert!(bw <= MAX_BLOCK_SIZE && bh <= MAX_BLOCK_SIZE);
        self.avail = avail;
        self.above_len = bw;
        self.left_len = bh;

        let left = &mut self.data[LEFT_OFFSET..LEFT_OFFSET + bh];
        if avail.left {
            for (i, l) in left.iter_mut().enumerate() {
                *l = src[off + i * stride - 1];
            }
        } else {
            left.fill(DEFAULT_LEFT_SAMPLE);
        }

        let above = &mut self.data[ABOVE_OFFSET..ABOVE_OFFSET + bw];
        if avail.up {
            let above_off = off - stride;
            above.copy_from_slice(&src[above_off..above_off + bw]);
            self.data[CORNER_OFFSET] = if avail.left {
                src[above_off - 1]
            } else {
                DEFAULT_ABOVE_SAMPLE
            };
        } else {
            above.fill(DEFAULT_ABOVE_SAMPLE);
            self.data[CORNER_OFFSET] = DEFAULT_ABOVE_SAMPLE;
        }
    }

    #[inline(always)]
    pub fn corner(&self) -> u8 {
        self.data[CORNER_OFFSET]
    }

    #[inline(always)]
    pub fn above(&self, i: usize) -> u8 {
        debug_assert!(i < self.above_len);
        self.data[ABOVE_OFFSET + i]
    }

    #[inline(always)]
    pub fn left(&self, i: usize) -> u8 {
        debug_assert!(i < self.left_len);
        self.data[LEFT_OFFSET + i]
    }

    pub fn above_row(&self) -> &[u8] {
        &self.data[ABOVE_OFFSET..ABOVE_OFFSET + self.above_len]
    }

    pub fn left_col(&self) -> &[u8] {
        &self.data[LEFT_OFFSET..LEFT_OFFSET + self.left_len]
    }

    pub fn above_len(&self) -> usize {
        self.above_len
    }

    pub fn left_len(&self) -> usize {
        self.left_len
    }

    /// Pads the above row to `len` samples by repeating its last sample.
    pub fn extend_above(&mut self, len: usize) {
        debug_assert!(self.above_len > 0 && len <= MAX_BLOCK_SIZE);
        if len > self.above_len {
            let last = self.data[ABOVE_OFFSET + self.above_len - 1];
            self.data[ABOVE_OFFSET + self.above_len..ABOVE_OFFSET + len].fill(last);
            self.above_len = len;
        }
    }

    /// Pads the left column to `len` samples by repeating its last sample.
    pub fn extend_left(&mut self, len: usize) {
        debug_assert!(self.left_len > 0 && len <= MAX_BLOCK_SIZE);
        if len > self.left_len {
            let last = self.data[LEFT_OFFSET + self.left_len - 1];
            self.data[LEFT_OFFSET + self.left_len..LEFT_OFFSET + len].fill(last);
            self.left_len = len;
        }
    }
}

impl Default for EdgeContext {
    fn default() -> Self {
        EdgeContext::new()
    }
}
