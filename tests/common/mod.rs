#![allow(dead_code)]

//! Builds GIF byte streams for tests.
//!
//! Image data is LZW-coded with literal codes only, resetting the code table before
//! it would grow, so the code width never changes and any conforming decoder reads it.



#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
    pub code_size: u8,
    pub pixels: Vec<u8>,
    /// Centiseconds; `Some` writes a graphic control extension
    pub delay: Option<u16>,
    pub transparent: Option<u8>,
    pub local_palette: Option<Vec<[u8; 3]>>,
    pub interlaced: bool,
}


impl Frame {
    pub fn new(width: u16, height: u16, code_size: u8, pixels: Vec<u8>) -> Self {
        Frame { width, height, code_size, pixels, ..Default::default() }
    }

    pub fn at(mut self, left: u16, top: u16) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    pub fn delay(mut self, delay: u16) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn transparent(mut self, index: u8) -> Self {
        self.transparent = Some(index);
        self
    }

    pub fn palette(mut self, colors: &[[u8; 3]]) -> Self {
        self.local_palette = Some(colors.to_vec());
        self
    }
}


pub fn gif(width: u16, height: u16, global: Option<&[[u8; 3]]>, frames: &[Frame]) -> Vec<u8> {
    let mut out = b"GIF89a".to_vec();
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    match global {
        Some(colors) => {
            out.extend_from_slice(&[0x80 | table_size_bits(colors.len()), 0, 0]);
            write_table(&mut out, colors);
        },
        None => out.extend_from_slice(&[0, 0, 0]),
    }

    for frame in frames {
        if frame.delay.is_some() || frame.transparent.is_some() {
            let delay = frame.delay.unwrap_or(0);
            let flags = if frame.transparent.is_some() { 0x01 } else { 0x00 };
            out.extend_from_slice(&[0x21, 0xf9, 0x04, flags]);
            out.extend_from_slice(&delay.to_le_bytes());
            out.extend_from_slice(&[frame.transparent.unwrap_or(0), 0x00]);
        }

        out.push(0x2c);
        for v in &[frame.left, frame.top, frame.width, frame.height] {
            out.extend_from_slice(&v.to_le_bytes());
        }
        let mut packed = if frame.interlaced { 0x40 } else { 0x00 };
        if let Some(ref colors) = frame.local_palette {
            packed |= 0x80 | table_size_bits(colors.len());
        }
        out.push(packed);
        if let Some(ref colors) = frame.local_palette {
            write_table(&mut out, colors);
        }

        out.push(frame.code_size);
        let data = lzw_literals(&frame.pixels, frame.code_size);
        for block in data.chunks(255) {
            out.push(block.len() as u8);
            out.extend_from_slice(block);
        }
        out.push(0x00);
    }

    out.push(0x3b);
    out
}

/// Rows of `pixels` (`width` wide) in the order an interlaced GIF stores them.
pub fn interlace(pixels: &[u8], width: usize) -> Vec<u8> {
    let height = pixels.len() / width;
    let mut out = vec![];
    for &(start, step) in &[(0, 8), (4, 8), (2, 4), (1, 2)] {
        for y in (start .. height).step_by(step) {
            out.extend_from_slice(&pixels[y * width .. (y + 1) * width]);
        }
    }
    out
}

fn table_size_bits(entries: usize) -> u8 {
    let mut bits = 0;
    while (2 << bits) < entries {
        bits += 1;
    }
    bits
}

fn write_table(out: &mut Vec<u8>, colors: &[[u8; 3]]) {
    let entries = 2 << table_size_bits(colors.len());
    for i in 0 .. entries {
        out.extend_from_slice(&colors.get(i).cloned().unwrap_or([0, 0, 0]));
    }
}

fn lzw_literals(pixels: &[u8], code_size: u8) -> Vec<u8> {
    let clear = 1u32 << code_size;
    let end = clear + 1;
    let width = u32::from(code_size) + 1;
    let run = (1usize << code_size).saturating_sub(3).max(1);

    let mut out = vec![];
    let mut acc = 0u32;
    let mut bits = 0;
    let mut push = |code: u32, out: &mut Vec<u8>| {
        acc |= code << bits;
        bits += width;
        while 8 <= bits {
            out.push(acc as u8);
            acc >>= 8;
            bits -= 8;
        }
    };

    for chunk in pixels.chunks(run) {
        push(clear, &mut out);
        for &p in chunk {
            push(u32::from(p), &mut out);
        }
    }
    push(end, &mut out);
    if 0 < bits {
        out.push(acc as u8);
    }
    out
}
