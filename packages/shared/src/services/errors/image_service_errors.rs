use std::fmt;

#[derive(Debug)]
pub enum ImageServiceError {
    UnsupportedMediaType,
    Undecodable,
    TooLarge { pixels: u64, max_pixels: u64 },
    EncodeError(String),
}

impl fmt::Display for ImageServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ImageServiceError::UnsupportedMediaType => write!(f, "Only JPEG images are supported."),
            ImageServiceError::Undecodable => write!(f, "The image provided could not be decoded."),
            ImageServiceError::TooLarge { max_pixels, .. } => write!(
                f,
                "The maximum supported image size is {} Mpx.",
                max_pixels / 1_000_000
            ),
            ImageServiceError::EncodeError(_) => {
                write!(f, "The output image could not be successfully encoded.")
            }
        }
    }
}

impl std::error::Error for ImageServiceError {}
