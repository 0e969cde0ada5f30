use image::{ImageFormat, ImageReader};
use std::io::Cursor;
use tracing::{debug, error};

use crate::services::errors::image_service_errors::ImageServiceError;

pub const JPEG_MEDIA_TYPE: &str = "image/jpeg";
pub const DEFAULT_MAX_PIXELS: u64 = 12_000_000;

pub struct ImageService {
    max_pixels: u64,
}

impl Default for ImageService {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PIXELS)
    }
}

impl ImageService {
    pub fn new(max_pixels: u64) -> Self {
        ImageService { max_pixels }
    }

    /// Inverts every color channel of an uploaded JPEG and re-encodes it.
    pub fn invert_jpeg(
        &self,
        content_type: Option<&str>,
        data: &[u8],
    ) -> Result<Vec<u8>, ImageServiceError> {
        if !is_jpeg_media_type(content_type) {
            debug!("Rejected upload with content type {:?}", content_type);
            return Err(ImageServiceError::UnsupportedMediaType);
        }

        // Dimensions come from the header, so oversized images are refused
        // before any pixel buffer is allocated.
        let (width, height) = ImageReader::with_format(Cursor::new(data), ImageFormat::Jpeg)
            .into_dimensions()
            .map_err(|_| ImageServiceError::Undecodable)?;
        let pixels = u64::from(width) * u64::from(height);
        if pixels > self.max_pixels {
            debug!("Rejected {}x{} image ({} px)", width, height, pixels);
            return Err(ImageServiceError::TooLarge {
                pixels,
                max_pixels: self.max_pixels,
            });
        }

        let mut image = image::load_from_memory_with_format(data, ImageFormat::Jpeg)
            .map_err(|_| ImageServiceError::Undecodable)?;
        image.invert();

        let mut output = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut output), ImageFormat::Jpeg)
            .map_err(|e| {
                error!("Failed to encode inverted image: {:#?}", e);
                ImageServiceError::EncodeError(e.to_string())
            })?;

        debug!("Inverted {}x{} image into {} bytes", width, height, output.len());
        Ok(output)
    }
}

fn is_jpeg_media_type(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|value| value.split(';').next())
        .map(|essence| essence.trim().eq_ignore_ascii_case(JPEG_MEDIA_TYPE))
        .unwrap_or(false)
}
