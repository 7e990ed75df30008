
use failure::Fail;



pub type AppResult<T> = Result<T, AppError>;


#[derive(Fail, Debug)]
pub enum AppError {
    #[fail(display = "Bitmap does not fit {}x{}", _0, _1)]
    BitmapSize(u32, u32),
    #[fail(display = "GIF error: {}", _0)]
    Decode(gif_player::DecodeError),
    #[fail(display = "Image error: {}", _0)]
    Image(image::ImageError),
    #[fail(display = "Not a integer: {}", _0)]
    Int(std::num::ParseIntError),
    #[fail(display = "IO error: {}", _0)]
    Io(std::io::Error),
    #[fail(display = "Not enough argument")]
    NotEnoughArgument,
    #[fail(display = "Unknown option: {}", _0)]
    UnknownOption(String),
}

macro_rules! define_error {
    ($source:ty, $kind:ident) => {
        impl From<$source> for AppError {
            fn from(error: $source) -> AppError {
                AppError::$kind(error)
            }
        }
    }
}

define_error!(std::io::Error, Io);
define_error!(std::num::ParseIntError, Int);
define_error!(image::ImageError, Image);
define_error!(gif_player::DecodeError, Decode);
