
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use byteorder::ReadBytesExt;
use log::{debug, trace};

use super::Region;
use super::blocks::*;
use super::lzw;
use super::errors::{DecodeResult, Malformed};
use super::validators::validate_code_size;



/// Per-frame metadata exposed by a [`Container`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameHeader {
    /// Patch position; `None` means the whole canvas
    pub region: Option<Region>,
    /// Layout code of the compressed pixel block (LZW minimum code size for GIF)
    pub code_size: u8,
    pub duration_ms: Option<u32>,
    pub transparent: Option<u8>,
    /// Packed RGB triples
    pub local_palette: Option<Vec<u8>>,
    pub interlaced: bool,
}

/// Source of palette-indexed frames, walked one frame at a time.
pub trait Container {
    fn dimensions(&self) -> (u32, u32);

    /// Packed RGB triples.
    fn global_palette(&self) -> Option<&[u8]>;

    fn tell(&self) -> usize;

    /// Moves to frame `index`. Returns `false` (and stays put) past the last frame.
    fn seek(&mut self, index: usize) -> bool;

    fn frame(&self) -> Option<&FrameHeader>;

    /// Color indices of the current frame's patch, one byte per pixel, row-major.
    fn pixels(&self) -> DecodeResult<Vec<u8>>;
}


struct RawFrame {
    header: FrameHeader,
    data: Vec<u8>,
}

pub struct GifContainer {
    frames: Vec<RawFrame>,
    global_palette: Option<Vec<u8>>,
    height: u32,
    position: usize,
    width: u32,
}


impl GifContainer {
    pub fn open<P: AsRef<Path>>(path: P) -> DecodeResult<Self> {
        let file = File::open(path)?;
        Self::read_from(&mut BufReader::new(file))
    }

    pub fn from_bytes(bytes: &[u8]) -> DecodeResult<Self> {
        let mut bytes = bytes;
        Self::read_from(&mut bytes)
    }

    pub fn read_from<R: Read>(r: &mut R) -> DecodeResult<Self> {
        let mut header = [0u8; 6];
        r.read_exact(&mut header)?;
        if &header[.. 3] != SIGNATURE || !VERSIONS.iter().any(|v| &header[3 ..] == *v) {
            return Err(Malformed::Signature)?;
        }

        let screen = LogicalScreen::read_from(r)?;
        let global_palette = match screen.global_table {
            Some(entries) => Some(read_color_table(r, entries)?),
            None => None,
        };
        debug!("screen: {}x{} global_palette={:?}", screen.width, screen.height, screen.global_table);

        let mut frames = vec![];
        let mut control: Option<GraphicControl> = None;

        loop {
            let introducer = match r.read_u8() {
                Ok(b) => b,
                // Missing trailer
                Err(ref e) if e.kind() == ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e)?,
            };

            match introducer {
                EXTENSION_INTRODUCER => {
                    let label = r.read_u8()?;
                    let data = read_sub_blocks(r)?;
                    trace!("extension: 0x{:02x} ({} bytes)", label, data.len());
                    if label == GRAPHIC_CONTROL_LABEL {
                        control = Some(GraphicControl::from_buf(&data)?);
                    }
                },
                IMAGE_SEPARATOR => {
                    let desc = ImageDescriptor::read_from(r)?;
                    let local_palette = match desc.local_table {
                        Some(entries) => Some(read_color_table(r, entries)?),
                        None => None,
                    };
                    let code_size = r.read_u8()?;
                    validate_code_size(code_size)?;
                    let data = read_sub_blocks(r)?;
                    let control = control.take();
                    let header = FrameHeader {
                        region: Some(desc.region()),
                        code_size,
                        duration_ms: control.map(|it| it.duration_ms()),
                        transparent: control.and_then(|it| it.transparent),
                        local_palette,
                        interlaced: desc.interlaced,
                    };
                    trace!("frame {}: {:?} code_size={}", frames.len(), header.region, code_size);
                    frames.push(RawFrame { header, data });
                },
                TRAILER => break,
                // Padding between blocks
                0x00 => (),
                b => return Err(Malformed::UnknownBlock(b))?,
            }
        }

        Ok(GifContainer {
            frames,
            global_palette,
            height: u32::from(screen.height),
            position: 0,
            width: u32::from(screen.width),
        })
    }
}


impl Container for GifContainer {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn global_palette(&self) -> Option<&[u8]> {
        self.global_palette.as_ref().map(|it| it.as_slice())
    }

    fn tell(&self) -> usize {
        self.position
    }

    fn seek(&mut self, index: usize) -> bool {
        if index < self.frames.len() {
            self.position = index;
            true
        } else {
            false
        }
    }

    fn frame(&self) -> Option<&FrameHeader> {
        self.frames.get(self.position).map(|it| &it.header)
    }

    fn pixels(&self) -> DecodeResult<Vec<u8>> {
        let frame = self.frames.get(self.position).ok_or(Malformed::Truncated)?;
        let region = frame.header.region.unwrap_or_else(|| Region::full(self.width, self.height));
        let count = region.pixels();

        let pixels = lzw::decode(&frame.data, frame.header.code_size, count)?;
        if pixels.len() < count {
            return Err(Malformed::Truncated)?;
        }

        if frame.header.interlaced {
            Ok(deinterlace(&pixels, region.width() as usize, region.height() as usize))
        } else {
            Ok(pixels)
        }
    }
}


/// Reorders rows stored in the four interlace passes into top-to-bottom order.
fn deinterlace(pixels: &[u8], width: usize, height: usize) -> Vec<u8> {
    const PASSES: [(usize, usize); 4] = [(0, 8), (4, 8), (2, 4), (1, 2)];

    let mut result = vec![0; pixels.len()];
    let mut rows = pixels.chunks(width.max(1));
    for &(start, step) in PASSES.iter() {
        for y in (start .. height).step_by(step) {
            if let Some(row) = rows.next() {
                result[y * width .. (y + 1) * width].copy_from_slice(row);
            }
        }
    }
    result
}
