use image::ImageReader;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageMetadata {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug)]
pub enum MetadataError {
    UnreadableImage(String),
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataError::UnreadableImage(msg) => write!(f, "unreadable image: {}", msg),
        }
    }
}

impl std::error::Error for MetadataError {}

/// Reads the pixel dimensions of the image stored at `path`.
///
/// Stored files always carry a `.jpg` extension, so the format is guessed from
/// the content rather than the name.
pub async fn extract_metadata(path: &Path) -> Result<ImageMetadata, MetadataError> {
    let path: PathBuf = path.to_path_buf();

    tokio::task::spawn_blocking(move || read_dimensions(&path))
        .await
        .map_err(|err| MetadataError::UnreadableImage(err.to_string()))?
}

fn read_dimensions(path: &Path) -> Result<ImageMetadata, MetadataError> {
    let unreadable = |err: &dyn fmt::Display| MetadataError::UnreadableImage(err.to_string());

    let (width, height) = ImageReader::open(path)
        .map_err(|err| unreadable(&err))?
        .with_guessed_format()
        .map_err(|err| unreadable(&err))?
        .into_dimensions()
        .map_err(|err| unreadable(&err))?;

    let width = i32::try_from(width).map_err(|err| unreadable(&err))?;
    let height = i32::try_from(height).map_err(|err| unreadable(&err))?;
    if width == 0 || height == 0 {
        return Err(MetadataError::UnreadableImage("image has no pixels".to_string()));
    }

    Ok(ImageMetadata { width, height })
}

#[cfg(test)]
pub(crate) fn encode_png(width: u32, height: u32) -> Vec<u8> {
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    let img = RgbImage::from_pixel(width, height, Rgb([200, 30, 60]));
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png).unwrap();
    bytes.into_inner()
}
