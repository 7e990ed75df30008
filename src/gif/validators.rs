
use super::Region;
use super::errors::Malformed;



pub fn validate_code_size(code_size: u8) -> Result<(), Malformed> {
    if (1 ..= 8).contains(&code_size) {
        Ok(())
    } else {
        Err(Malformed::CodeSize(code_size))
    }
}

pub fn validate_image_size(region: &Region, max_image_size: Option<usize>) -> Result<(), Malformed> {
    match max_image_size {
        Some(max) if max < region.pixels() => Err(Malformed::TooLargeImage(region.pixels())),
        _ => Ok(()),
    }
}
