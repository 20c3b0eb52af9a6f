#![allow(clippy::too_many_arguments)]
mod binary_reader;
mod binary_writer;
use binary_reader::BinaryReader;
use binary_writer::BinaryWriter;
use clap::Parser;
use colored::*;
use debug_print::*;
use std::collections::HashMap;
use std::io::{self, Write};
use std::process;
use vp9_intra::block_context::*;
use vp9_intra::common::*;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to input raw video (8-bit I420)
    #[clap(short, long)]
    input: String,
    /// Path to output raw video
    #[clap(short, long)]
    output: String,
    /// Input video resolution (WIDTHxHEIGHT)
    #[clap(long)]
    size: String,
    /// Number of frames to process (default: until end of input)
    #[clap(long)]
    num_frames: Option<usize>,
    /// Prediction mode (dc, v, h, tm, d45, d135, d117, d153, d27, d63)
    #[clap(short, long, default_value = "dc")]
    mode: String,
    /// Luma prediction block size (WIDTHxHEIGHT)
    #[clap(long, default_value = "16x16")]
    block_size: String,
    /// Write source - prediction + 128 instead of the prediction
    #[clap(long)]
    residual: bool,
    /// Blend the intra prediction into a flat inter prediction with this mode
    #[cfg(feature = "interintra")]
    #[clap(long)]
    interintra_mode: Option<String>,
    /// Extra parameters (PARAM1=VAL1[,PARAM2=VAL2,...])
    #[clap(long)]
    extra_params: Option<String>,
}

fn exit_with_error(message: String) -> ! {
    eprintln!("{}: {}", "error".red(), message);
    process::exit(1);
}

fn parse_size(s: &str) -> Option<(usize, usize)> {
    let size = s
        .split('x')
        .map(|x| x.parse::<usize>())
        .collect::<Vec<Result<usize, std::num::ParseIntError>>>();
    if let [Ok(width), Ok(height)] = size[..] {
        Some((width, height))
    } else {
        None
    }
}

fn parse_mode(name: &str) -> PredictionMode {
    match PredictionMode::from_name(name) {
        Some(mode) => mode,
        None => exit_with_error(format!("Invalid prediction mode: {}", name)),
    }
}

fn parse_extra_params(extra_params: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for param in extra_params.split(',') {
        if let [key, val] = param.split('=').collect::<Vec<&str>>()[..] {
            params.insert(key.to_string(), val.to_string());
        } else {
            exit_with_error(format!("Invalid extra-params: {}", extra_params));
        }
    }
    params
}

// copies a w x h block at (x, y) between two planes of the same geometry
fn copy_block(src: &Vec2d<u8>, dst: &mut Vec2d<u8>, x: usize, y: usize, w: usize, h: usize) {
    for y in y..y + h {
        dst[y][x..x + w].copy_from_slice(&src[y][x..x + w]);
    }
}

fn residual_block(src: &Vec2d<u8>, dst: &mut Vec2d<u8>, x: usize, y: usize, w: usize, h: usize) {
    for y in y..y + h {
        for x in x..x + w {
            dst[y][x] = clip_pixel(src[y][x] as i32 - dst[y][x] as i32 + 128);
        }
    }
}

fn main() {
    let args = Args::parse();

    let (width, height) = match parse_size(&args.size) {
        Some(size) => size,
        None => exit_with_error(format!("Invalid size: {}", args.size)),
    };
    if width == 0 || height == 0 {
        exit_with_error(format!("Invalid size: {}", args.size));
    }
    let (bw, bh) = match parse_size(&args.block_size) {
        Some(size) => size,
        None => exit_with_error(format!("Invalid block-size: {}", args.block_size)),
    };
    let bsize = match BlockSize::from_luma_size(bw, bh) {
        Some(bsize) => bsize,
        None => exit_with_error(format!("Unsupported block-size: {}", args.block_size)),
    };

    let mode = parse_mode(&args.mode);
    let extra_params = args
        .extra_params
        .as_deref()
        .map(parse_extra_params)
        .unwrap_or_default();
    let uv_mode = extra_params
        .get("uv_mode")
        .map(|name| parse_mode(name))
        .unwrap_or(mode);
    #[cfg(feature = "interintra")]
    let interintra_mode = args.interintra_mode.as_deref().map(parse_mode);
    #[cfg(feature = "interintra")]
    let interintra = interintra_mode.is_some();
    #[cfg(not(feature = "interintra"))]
    let interintra = false;

    let stdin = io::stdin();
    let mut reader = if args.input == *"-" {
        BinaryReader::standard(&stdin)
    } else {
        match BinaryReader::file(args.input) {
            Ok(f) => f,
            Err(e) => exit_with_error(format!("failed to open input file: {}", e)),
        }
    };

    let stdout = io::stdout();
    let mut writer = if args.output == *"-" {
        BinaryWriter::standard(&stdout)
    } else {
        match BinaryWriter::file(args.output) {
            Ok(f) => f,
            Err(e) => exit_with_error(format!("failed to open output file: {}", e)),
        }
    };

    // planes are padded to whole blocks by edge replication
    let padded_width = (width + bw - 1) / bw * bw;
    let padded_height = (height + bh - 1) / bh * bh;
    let plane_sizes = [
        (width, height),
        ((width + 1) / 2, (height + 1) / 2),
        ((width + 1) / 2, (height + 1) / 2),
    ];
    let (cbw, cbh) = bsize.chroma_size();

    let mut xd = MacroblockContext::new(padded_width, padded_height);
    xd.mode_info = ModeInfo::new(mode, uv_mode);
    #[cfg(feature = "interintra")]
    {
        if let Some(ii_mode) = interintra_mode {
            xd.mode_info.interintra_mode = ii_mode;
            xd.mode_info.interintra_uv_mode = ii_mode;
        }
    }
    let mut output = xd.planes.clone();

    let mut frame_index = 0;
    while args.num_frames.map_or(true, |n| frame_index < n) {
        let mut end_of_input = false;
        for (plane, &(w, h)) in xd.planes.iter_mut().zip(&plane_sizes) {
            match reader.read_plane(plane, w, h) {
                Ok(true) => {}
                Ok(false) => end_of_input = true,
                Err(e) => exit_with_error(format!("failed to read frame {}: {}", frame_index, e)),
            }
        }
        if end_of_input {
            break;
        }
        let source = xd.planes.clone();

        for y in (0..padded_height).step_by(bh) {
            for x in (0..padded_width).step_by(bw) {
                xd.set_block(x, y, bw);
                predict_block(&mut xd, bsize, interintra, &mut output);
                // the reconstruction equals the source
                copy_block(&source[0], &mut xd.planes[0], x, y, bw, bh);
                for p in 1..3 {
                    copy_block(&source[p], &mut xd.planes[p], x / 2, y / 2, cbw, cbh);
                }
                if args.residual {
                    residual_block(&source[0], &mut output[0], x, y, bw, bh);
                    for p in 1..3 {
                        residual_block(&source[p], &mut output[p], x / 2, y / 2, cbw, cbh);
                    }
                }
            }
        }

        for (plane, &(w, h)) in output.iter().zip(&plane_sizes) {
            if let Err(e) = writer.write_plane(plane, w, h) {
                exit_with_error(format!("failed to write frame {}: {}", frame_index, e));
            }
        }
        debug_eprintln!("frame {} end", frame_index);
        frame_index += 1;
    }
    if let Err(e) = writer.flush() {
        exit_with_error(format!("failed to flush output: {}", e));
    }
    debug_eprintln!("{} frames", frame_index);
}

// Predicts the current block of `xd` into `output`.
fn predict_block(
    xd: &mut MacroblockContext,
    bsize: BlockSize,
    interintra: bool,
    output: &mut [Vec2d<u8>; 3],
) {
    let (bw, bh) = bsize.luma_size();
    let (cbw, cbh) = bsize.chroma_size();
    let (x, y) = (xd.x, xd.y);

    if interintra {
        #[cfg(feature = "interintra")]
        {
            // a flat block stands in for the motion compensated prediction
            let mut ypred = vec![128u8; bw * bh];
            let mut upred = vec![128u8; cbw * cbh];
            let mut vpred = vec![128u8; cbw * cbh];
            xd.build_interintra_predictors(&mut ypred, &mut upred, &mut vpred, bw, cbw, bsize);
            for (pred, plane, (px, py, pw, ph)) in [
                (&ypred, 0, (x, y, bw, bh)),
                (&upred, 1, (x / 2, y / 2, cbw, cbh)),
                (&vpred, 2, (x / 2, y / 2, cbw, cbh)),
            ] {
                for (row, line) in pred.chunks(pw).enumerate().take(ph) {
                    output[plane][py + row][px..px + pw].copy_from_slice(line);
                }
            }
            return;
        }
    }

    xd.predict_sby_s(bsize);
    xd.predict_sbuv_s(bsize);
    copy_block(&xd.planes[0], &mut output[0], x, y, bw, bh);
    for p in 1..3 {
        copy_block(&xd.planes[p], &mut output[p], x / 2, y / 2, cbw, cbh);
    }
}
