
use std::collections::BTreeSet;

use log::{debug, trace};

use super::{DecodedFrame, DecodeOptions, FrameStore, Region};
use super::container::{Container, FrameHeader};
use super::errors::DecodeResult;
use super::palette::PaletteTable;
use super::validators::validate_image_size;



/// Palette and canvas policy, inferred from the set of tile codes seen across all frames.
///
/// The container does not flag disposal or palette reuse explicitly, so this is a
/// compatibility heuristic over the frames' LZW code sizes and not a reading of the
/// disposal method.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PaletteMode {
    /// Global palette, every frame on a blank canvas
    Base,
    /// Local palettes, every frame on a blank canvas
    PerFrame,
    /// Local palettes, every frame drawn over the previous one
    Cumulative,
}

pub struct FrameDecoder {
    options: DecodeOptions,
}


impl PaletteMode {
    pub fn classify(codes: &BTreeSet<u8>) -> Self {
        let codes: Vec<u8> = codes.iter().cloned().collect();
        match codes.as_slice() {
            [6] | [7] => PaletteMode::PerFrame,
            [7, 8] => PaletteMode::Cumulative,
            _ => PaletteMode::Base,
        }
    }

    pub fn uses_local_palette(self) -> bool {
        self != PaletteMode::Base
    }

    pub fn accumulates(self) -> bool {
        self == PaletteMode::Cumulative
    }
}


impl Default for FrameDecoder {
    fn default() -> Self {
        FrameDecoder::new(DecodeOptions::default())
    }
}

impl FrameDecoder {
    pub fn new(options: DecodeOptions) -> Self {
        FrameDecoder { options }
    }

    pub fn decode<C: Container>(&self, container: &mut C) -> DecodeResult<FrameStore> {
        let (width, height) = container.dimensions();
        validate_image_size(&Region::full(width, height), self.options.max_image_size)?;
        let base = container.global_palette().map(PaletteTable::from_bytes).unwrap_or_default();

        let mode = PaletteMode::classify(&scan_tile_codes(container));
        debug!("{}x{} base palette of {} colors, {:?}", width, height, base.len(), mode);

        let mut frames: Vec<DecodedFrame> = vec![];
        let mut index = 0;
        while container.seek(index) {
            let header = match container.frame() {
                Some(header) => header.clone(),
                None => break,
            };
            let previous = if mode.accumulates() { frames.last() } else { None };
            let frame = self.decode_frame(container, &header, &base, mode, previous)?;
            trace!("frame {}: {:?} {}s", index, frame.region, frame.duration);
            frames.push(frame);
            index += 1;
        }
        container.seek(0);

        FrameStore::new(width, height, frames)
    }

    fn decode_frame<C: Container>(
        &self,
        container: &C,
        header: &FrameHeader,
        base: &PaletteTable,
        mode: PaletteMode,
        previous: Option<&DecodedFrame>,
    ) -> DecodeResult<DecodedFrame> {
        let (width, height) = container.dimensions();
        let region = header.region.unwrap_or_else(|| Region::full(width, height));
        validate_image_size(&region, self.options.max_image_size)?;

        let duration = header.duration_ms
            .map(|ms| f64::from(ms) * 0.001)
            .unwrap_or(self.options.default_duration);

        let local = match header.local_palette {
            Some(ref bytes) if mode.uses_local_palette() => Some(PaletteTable::from_bytes(bytes)),
            _ => None,
        };
        let palette = local.as_ref().unwrap_or(base);

        let mut bitmap = match previous {
            Some(previous) => previous.bitmap.clone(),
            None => vec![0; width as usize * height as usize * 4],
        };
        let pixels = container.pixels()?;
        blit(&mut bitmap, width, height, &pixels, &region, palette, header.transparent);

        Ok(DecodedFrame { bitmap, duration, region })
    }
}


/// Distinct tile codes over all frames. Leaves the container on frame 0.
fn scan_tile_codes<C: Container>(container: &mut C) -> BTreeSet<u8> {
    let mut codes = BTreeSet::new();
    let mut index = 0;
    while container.seek(index) {
        if let Some(header) = container.frame() {
            codes.insert(header.code_size);
        }
        index += 1;
    }
    container.seek(0);
    codes
}

/// Draws the opaque pixels of a patch onto the canvas at the region's origin.
fn blit(
    canvas: &mut [u8],
    width: u32,
    height: u32,
    pixels: &[u8],
    region: &Region,
    palette: &PaletteTable,
    transparent: Option<u8>,
) {
    let patch_width = region.width() as usize;
    if patch_width == 0 {
        return;
    }

    for (py, row) in pixels.chunks(patch_width).take(region.height() as usize).enumerate() {
        let y = region.y0 as usize + py;
        if height as usize <= y {
            break;
        }
        for (px, &index) in row.iter().enumerate() {
            let x = region.x0 as usize + px;
            if width as usize <= x {
                break;
            }
            let rgba = palette.resolve(index, transparent);
            if rgba[3] == 0 {
                continue;
            }
            let offset = (y * width as usize + x) * 4;
            canvas[offset .. offset + 4].copy_from_slice(&rgba);
        }
    }
}


/// Decodes every frame of `container` with the default options.
pub fn decode<C: Container>(container: &mut C) -> DecodeResult<FrameStore> {
    FrameDecoder::default().decode(container)
}
