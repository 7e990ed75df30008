
use failure::Fail;
use std::io::{Error as IOError, ErrorKind};


pub type DecodeResult<T> = Result<T, DecodeError>;



#[derive(Fail, Debug)]
pub enum DecodeError {
    #[fail(display = "No frames")]
    NoFrames,
    #[fail(display = "Unreadable: {}", _0)]
    Unreadable(Malformed),
}

#[derive(Fail, Debug)]
pub enum Malformed {
    #[fail(display = "Invalid LZW code size: {}", _0)]
    CodeSize(u8),
    #[fail(display = "IO error: {}", _0)]
    Io(IOError),
    #[fail(display = "Invalid LZW code: {}", _0)]
    Lzw(u16),
    #[fail(display = "Not a GIF")]
    Signature,
    #[fail(display = "Too large image: {} pixels", _0)]
    TooLargeImage(usize),
    #[fail(display = "Unexpected end of data")]
    Truncated,
    #[fail(display = "Unknown block: 0x{:02x}", _0)]
    UnknownBlock(u8),
}


macro_rules! define_error {
    ($source:ty, $kind:tt) => {
        impl From<$source> for DecodeError {
            fn from(error: $source) -> DecodeError {
                DecodeError::$kind(error)
            }
        }
    }
}

define_error!(Malformed, Unreadable);


impl From<IOError> for Malformed {
    fn from(error: IOError) -> Malformed {
        if error.kind() == ErrorKind::UnexpectedEof {
            Malformed::Truncated
        } else {
            Malformed::Io(error)
        }
    }
}

impl From<IOError> for DecodeError {
    fn from(error: IOError) -> DecodeError {
        DecodeError::Unreadable(error.into())
    }
}
