
/// RGB lookup table indexed by a frame's color indices.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PaletteTable {
    entries: Vec<[u8; 3]>,
}


pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];


impl PaletteTable {
    /// Builds a table from packed RGB triples. A trailing partial triple is ignored.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let entries = bytes
            .chunks(3)
            .filter(|it| it.len() == 3)
            .take(256)
            .map(|it| [it[0], it[1], it[2]])
            .collect();
        PaletteTable { entries }
    }

    pub fn get(&self, index: u8) -> Option<[u8; 3]> {
        self.entries.get(index as usize).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// RGBA for `index`. The color key and indices the table does not cover are transparent.
    pub fn resolve(&self, index: u8, transparent: Option<u8>) -> [u8; 4] {
        if transparent == Some(index) {
            return TRANSPARENT;
        }
        match self.get(index) {
            Some([r, g, b]) => [r, g, b, 0xff],
            None => TRANSPARENT,
        }
    }
}
