pub mod gif;

pub use crate::gif::{DecodedFrame, DecodeOptions, FrameStore, Region, open};
pub use crate::gif::container::{Container, FrameHeader, GifContainer};
pub use crate::gif::decoder::{FrameDecoder, PaletteMode, decode};
pub use crate::gif::errors::{DecodeError, DecodeResult, Malformed};
pub use crate::gif::palette::PaletteTable;
pub use crate::gif::player::{Direction, PlaybackEngine};



#[cfg(test)]
mod tests {
    use crate::gif::container::GifContainer;

    #[test]
    fn it_works() {
        // 1x1, global palette of two colors, one frame with index 1
        let bytes = [
            0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00,
            0x01, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00,
            0xff, 0x00, 0x00, 0x2c, 0x00, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x01, 0x00, 0x00, 0x02, 0x02, 0x4c,
            0x01, 0x00, 0x3b,
        ];
        let mut container = GifContainer::from_bytes(&bytes).unwrap();
        let store = crate::decode(&mut container).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.frame(0).bitmap, vec![0xff, 0x00, 0x00, 0xff]);
    }
}
