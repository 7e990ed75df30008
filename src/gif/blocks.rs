
use std::io::{self, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use super::Region;



pub const SIGNATURE: &[u8; 3] = b"GIF";
pub const VERSIONS: [&[u8; 3]; 2] = [b"87a", b"89a"];

pub const EXTENSION_INTRODUCER: u8 = 0x21;
pub const IMAGE_SEPARATOR: u8 = 0x2c;
pub const TRAILER: u8 = 0x3b;

pub const GRAPHIC_CONTROL_LABEL: u8 = 0xf9;


#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LogicalScreen {
    pub width: u16,
    pub height: u16,
    /// Entries in the global color table, if any
    pub global_table: Option<usize>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GraphicControl {
    /// Centiseconds
    pub delay: u16,
    pub transparent: Option<u8>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ImageDescriptor {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
    pub local_table: Option<usize>,
    pub interlaced: bool,
}


fn table_entries(packed: u8) -> Option<usize> {
    if packed & 0x80 == 0 {
        None
    } else {
        Some(1 << ((packed & 0x07) + 1))
    }
}


impl LogicalScreen {
    pub fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        let width = r.read_u16::<LittleEndian>()?;
        let height = r.read_u16::<LittleEndian>()?;
        let packed = r.read_u8()?;
        // Background color index and pixel aspect ratio
        r.read_u8()?;
        r.read_u8()?;
        Ok(LogicalScreen { width, height, global_table: table_entries(packed) })
    }
}


impl GraphicControl {
    /// Parses the first sub-block of a graphic control extension (without its size byte).
    pub fn from_buf(buf: &[u8]) -> io::Result<Self> {
        if buf.len() < 4 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "short graphic control block"));
        }
        let mut r = buf;
        let packed = r.read_u8()?;
        let delay = r.read_u16::<LittleEndian>()?;
        let index = r.read_u8()?;
        let transparent = if packed & 0x01 != 0 { Some(index) } else { None };
        Ok(GraphicControl { delay, transparent })
    }

    pub fn duration_ms(&self) -> u32 {
        u32::from(self.delay) * 10
    }
}


impl ImageDescriptor {
    pub fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        let left = r.read_u16::<LittleEndian>()?;
        let top = r.read_u16::<LittleEndian>()?;
        let width = r.read_u16::<LittleEndian>()?;
        let height = r.read_u16::<LittleEndian>()?;
        let packed = r.read_u8()?;
        Ok(ImageDescriptor {
            left,
            top,
            width,
            height,
            local_table: table_entries(packed),
            interlaced: packed & 0x40 != 0,
        })
    }

    pub fn region(&self) -> Region {
        let (x0, y0) = (u32::from(self.left), u32::from(self.top));
        Region::new(x0, y0, x0 + u32::from(self.width), y0 + u32::from(self.height))
    }
}


pub fn read_color_table<R: Read>(r: &mut R, entries: usize) -> io::Result<Vec<u8>> {
    let mut table = vec![0; entries * 3];
    r.read_exact(&mut table)?;
    Ok(table)
}

/// Reads data sub-blocks up to the zero-length terminator, concatenated.
pub fn read_sub_blocks<R: Read>(r: &mut R) -> io::Result<Vec<u8>> {
    let mut data = vec![];
    loop {
        let size = r.read_u8()? as usize;
        if size == 0 {
            return Ok(data);
        }
        let start = data.len();
        data.resize(start + size, 0);
        r.read_exact(&mut data[start..])?;
    }
}
