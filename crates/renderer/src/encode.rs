//! Image encoding, format chosen from the output path.

use std::ffi::OsString;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageOutputFormat, RgbaImage};

use crate::error::Result;

/// JPEG quality used for `.jpg` output
const JPEG_QUALITY: u8 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    /// Format named by `path`'s extension, if it is one we encode.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            _ => None,
        }
    }

    /// Output format and path for a requested output.
    ///
    /// Paths without an image extension (`plot`, `run.v2`) are written as
    /// PNG with `.png` appended.
    pub fn resolve_output(path: PathBuf) -> (Self, PathBuf) {
        match Self::from_path(&path) {
            Some(format) => (format, path),
            None => {
                let mut name = OsString::from(path);
                name.push(".");
                name.push(ImageFormat::Png.extension());
                (ImageFormat::Png, PathBuf::from(name))
            }
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }
}

/// Encode `image` to bytes. JPEG drops the alpha channel.
pub fn encode(image: &RgbaImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut cursor = Cursor::new(&mut bytes);

    match format {
        ImageFormat::Png => image.write_to(&mut cursor, ImageOutputFormat::Png)?,
        ImageFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            rgb.write_to(&mut cursor, ImageOutputFormat::Jpeg(JPEG_QUALITY))?;
        }
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(ImageFormat::from_path(Path::new("out")), None);
        assert_eq!(ImageFormat::from_path(Path::new("a.PNG")), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_path(Path::new("a.jpeg")), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_path(Path::new("a.svg")), None);
    }

    #[test]
    fn test_resolve_output() {
        assert_eq!(
            ImageFormat::resolve_output(PathBuf::from("out/plot.jpg")),
            (ImageFormat::Jpeg, PathBuf::from("out/plot.jpg"))
        );
        assert_eq!(
            ImageFormat::resolve_output(PathBuf::from("plot")),
            (ImageFormat::Png, PathBuf::from("plot.png"))
        );
        // A dotted stem keeps its suffix
        assert_eq!(
            ImageFormat::resolve_output(PathBuf::from("run.v2")),
            (ImageFormat::Png, PathBuf::from("run.v2.png"))
        );
    }

    #[test]
    fn test_png_signature() {
        let image = RgbaImage::new(3, 2);
        let bytes = encode(&image, ImageFormat::Png).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_jpeg_signature() {
        let image = RgbaImage::new(8, 8);
        let bytes = encode(&image, ImageFormat::Jpeg).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }
}
