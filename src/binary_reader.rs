use debug_print::*;
use std::fs::File;
use std::io::{self, BufRead, Read};
use vp9_intra::common::Vec2d;

pub struct BinaryReader<'a> {
    input: Box<dyn BufRead + 'a>,
}

impl<'a> BinaryReader<'a> {
    pub fn standard(stdin: &'a io::Stdin) -> BinaryReader<'a> {
        BinaryReader {
            input: Box::new(stdin.lock()),
        }
    }

    pub fn file(path: String) -> io::Result<BinaryReader<'a>> {
        File::open(path).map(|file| BinaryReader {
            input: Box::new(io::BufReader::new(file)),
        })
    }

    #[allow(dead_code)]
    pub fn vec(v: &'a [u8]) -> BinaryReader<'a> {
        BinaryReader { input: Box::new(v) }
    }

    /// Fills `v` completely. Returns `Ok(false)` if the input was already
    /// exhausted, and an `UnexpectedEof` error if it ends part way.
    pub fn read_to_vec(&mut self, v: &mut [u8]) -> io::Result<bool> {
        let len = v.len();
        let mut read_bytes = 0;
        while read_bytes < len {
            match self.input.read(&mut v[read_bytes..]) {
                Ok(0) if read_bytes == 0 => return Ok(false),
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        format!("truncated frame: {} of {} bytes", read_bytes, len),
                    ))
                }
                Ok(s) => read_bytes += s,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        debug_eprintln!("read {} bytes", len);
        Ok(true)
    }

    /// Reads a `width`x`height` plane into the top-left corner of `plane`
    /// and replicates its last column and row into the rest.
    pub fn read_plane(
        &mut self,
        plane: &mut Vec2d<u8>,
        width: usize,
        height: usize,
    ) -> io::Result<bool> {
        let mut samples = vec![0; width * height];
        if !self.read_to_vec(&mut samples)? {
            return Ok(false);
        }
        for (y, row) in samples.chunks(width).enumerate() {
            plane[y][..width].copy_from_slice(row);
            let last = row[width - 1];
            plane[y][width..].fill(last);
        }
        for y in height..plane.height {
            let (done, rest) = plane.data.split_at_mut(y << plane.log2_stride);
            let last_row = &done[(height - 1) << plane.log2_stride..][..plane.width];
            rest[..plane.width].copy_from_slice(last_row);
        }
        Ok(true)
    }
}

impl<'a> Read for BinaryReader<'a> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.input.read(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vp9_intra::vec2d;

    #[test]
    fn read_plane_replicates_edges() {
        let input = [1, 2, 3, 4, 5, 6];
        let mut reader = BinaryReader::vec(&input);
        let mut plane = vec2d![0u8; 4; 4];
        assert!(reader.read_plane(&mut plane, 3, 2).unwrap());
        assert_eq!(&plane[0], &[1, 2, 3, 3]);
        assert_eq!(&plane[1], &[4, 5, 6, 6]);
        assert_eq!(&plane[2], &[4, 5, 6, 6]);
        assert_eq!(&plane[3], &[4, 5, 6, 6]);
        assert!(!reader.read_plane(&mut plane, 3, 2).unwrap());
    }

    #[test]
    fn truncated_input_is_an_error() {
        let input = [1, 2, 3];
        let mut reader = BinaryReader::vec(&input);
        let mut v = vec![0; 4];
        let err = reader.read_to_vec(&mut v).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
