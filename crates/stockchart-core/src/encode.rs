// File: crates/stockchart-core/src/encode.rs
// Summary: PNG serialization of a finished canvas (and decoding back, for verification tools).

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};

use crate::canvas::PixelCanvas;
use crate::error::{ChartError, ChartResult};

/// Encode the canvas as an RGBA8 PNG with the codec's default settings.
pub fn encode_png(canvas: &PixelCanvas) -> ChartResult<Vec<u8>> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(canvas.as_raw(), canvas.width(), canvas.height(), ExtendedColorType::Rgba8)
        .map_err(|e| ChartError::Encoding(e.to_string()))?;
    Ok(out)
}

/// Decode PNG bytes into a canvas. Any decode failure is reported as `Encoding`.
pub fn decode_png(bytes: &[u8]) -> ChartResult<PixelCanvas> {
    let img = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(|e| ChartError::Encoding(e.to_string()))?
        .to_rgba8();
    let (w, h) = img.dimensions();
    PixelCanvas::from_raw(w, h, img.into_raw())
        .ok_or_else(|| ChartError::Encoding("decoded buffer size mismatch".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Rgba;

    #[test]
    fn png_magic_and_dimensions() {
        let canvas = PixelCanvas::new(7, 3, Rgba::rgb(10, 20, 30));
        let bytes = encode_png(&canvas).expect("encode");
        assert!(bytes.starts_with(&[137, 80, 78, 71, 13, 10, 26, 10]));
        let back = decode_png(&bytes).expect("decode");
        assert_eq!((back.width(), back.height()), (7, 3));
        assert_eq!(back.pixel(6, 2), Some(Rgba::rgb(10, 20, 30)));
    }

    #[test]
    fn garbage_is_an_encoding_error() {
        assert!(matches!(decode_png(b"not a png"), Err(ChartError::Encoding(_))));
    }
}
