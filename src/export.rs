//! PNG export and the file-save capability.

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbaImage};

use crate::error::ExportError;

pub const PNG_MIME: &str = "image/png";

/// File name used when saving a composed face.
pub const CUSTOM_EMOJI_FILENAME: &str = "custom-emoji.png";

/// Client-initiated download of a binary blob.
pub trait FileSaver {
    fn save(&mut self, data: &[u8], filename: &str) -> Result<(), ExportError>;
}

/// Encodes an image as PNG.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// `data:image/png;base64,...` form of already encoded PNG bytes.
pub fn png_data_uri(png: &[u8]) -> String {
    format!("data:{PNG_MIME};base64,{}", STANDARD.encode(png))
}

/// Download name for a library emoji.
pub fn emoji_filename(id: &str) -> String {
    format!("{id}.png")
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Records every save.
    #[derive(Default)]
    pub struct MockSaver {
        pub saved: Vec<(String, Vec<u8>)>,
        pub reject: bool,
    }

    impl FileSaver for MockSaver {
        fn save(&mut self, data: &[u8], filename: &str) -> Result<(), ExportError> {
            if self.reject {
                return Err(ExportError::Save {
                    filename: filename.to_string(),
                    reason: "blocked".into(),
                });
            }
            self.saved.push((filename.to_string(), data.to_vec()));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn png_decodes_back() {
        let img = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255]));
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[1..4], b"PNG");

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(0, 0).0, [1, 2, 3, 255]);
    }

    #[test]
    fn data_uri_prefix() {
        let uri = png_data_uri(&[0x89, b'P', b'N', b'G']);
        assert_eq!(uri, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn filenames() {
        assert_eq!(emoji_filename("dog-face"), "dog-face.png");
        assert_eq!(CUSTOM_EMOJI_FILENAME, "custom-emoji.png");
    }
}
