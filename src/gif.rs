
use std::default::Default;
use std::path::Path;

use self::errors::{DecodeError, DecodeResult};



pub mod blocks;
pub mod container;
pub mod decoder;
pub mod errors;
mod lzw;
pub mod palette;
pub mod player;
mod validators;



/// Rectangle covered by a frame's patch, as `(x0, y0)` inclusive and `(x1, y1)` exclusive.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Region {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DecodedFrame {
    /// RGBA, `width * height * 4` bytes, fully composited
    pub bitmap: Vec<u8>,
    /// Seconds
    pub duration: f64,
    pub region: Region,
}

#[derive(Debug, PartialEq)]
pub struct FrameStore {
    frames: Vec<DecodedFrame>,
    height: u32,
    width: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecodeOptions {
    /// Seconds used when a frame carries no delay
    pub default_duration: f64,
    /// Maximum pixel count of a single frame patch
    pub max_image_size: Option<usize>,
}


impl Region {
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Region { x0, y0, x1, y1 }
    }

    pub fn full(width: u32, height: u32) -> Self {
        Region { x0: 0, y0: 0, x1: width, y1: height }
    }

    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    pub fn pixels(&self) -> usize {
        self.width() as usize * self.height() as usize
    }
}


impl FrameStore {
    pub fn new(width: u32, height: u32, frames: Vec<DecodedFrame>) -> DecodeResult<Self> {
        if frames.is_empty() {
            return Err(DecodeError::NoFrames);
        }
        Ok(FrameStore { frames, height, width })
    }

    pub fn frames(&self) -> &[DecodedFrame] {
        &self.frames
    }

    /// Panics if `index` is out of range.
    pub fn frame(&self, index: usize) -> &DecodedFrame {
        &self.frames[index]
    }

    pub fn get(&self, index: usize) -> Option<&DecodedFrame> {
        self.frames.get(index)
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }
}


impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            default_duration: 0.1,
            max_image_size: Some(1 << 25),
        }
    }
}


/// Decodes the GIF at `path` and wraps it in a playing engine.
pub fn open<P: AsRef<Path>>(path: P) -> DecodeResult<player::PlaybackEngine> {
    let mut container = container::GifContainer::open(path)?;
    let store = decoder::decode(&mut container)?;
    Ok(player::PlaybackEngine::new(store))
}
