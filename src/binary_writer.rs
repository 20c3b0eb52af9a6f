use std::fs::File;
use std::io::{self, Write};
use vp9_intra::common::Vec2d;

pub struct BinaryWriter<'a> {
    output: Box<dyn Write + 'a>,
}

impl<'a> BinaryWriter<'a> {
    pub fn standard(stdout: &'a io::Stdout) -> BinaryWriter<'a> {
        BinaryWriter {
            output: Box::new(stdout.lock()),
        }
    }

    pub fn file(path: String) -> io::Result<BinaryWriter<'a>> {
        File::create(path).map(|file| BinaryWriter {
            output: Box::new(io::BufWriter::new(file)),
        })
    }

    #[allow(dead_code)]
    pub fn vec(v: &'a mut Vec<u8>) -> BinaryWriter<'a> {
        BinaryWriter {
            output: Box::new(v),
        }
    }

    /// Writes the top-left `width`x`height` samples of `plane`.
    pub fn write_plane(&mut self, plane: &Vec2d<u8>, width: usize, height: usize) -> io::Result<()> {
        for y in 0..height {
            self.write_all(&plane[y][..width])?;
        }
        Ok(())
    }
}

impl<'a> Write for BinaryWriter<'a> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}
