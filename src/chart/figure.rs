use std::path::Path;

use image::{ExtendedColorType, ImageFormat};

use crate::error::PlotError;

/// Bytes per pixel of the RGB canvas.
const CHANNELS: usize = 3;

// ---------------------------------------------------------------------------
// Figure – the in-memory canvas owned by one run
// ---------------------------------------------------------------------------

/// White RGB canvas the panels are rasterized into.
///
/// The pixel buffer lives exactly as long as the `Figure`; dropping it (on
/// success or on any error path) releases the memory.
pub struct Figure {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Figure {
    pub fn new((width, height): (u32, u32)) -> Self {
        let len = width as usize * height as usize * CHANNELS;
        log::debug!("Allocated {width}x{height} figure");
        Figure {
            width,
            height,
            pixels: vec![255; len],
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw RGB bytes, row-major.
    #[cfg(test)]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Encode the canvas as PNG at `path`.
    pub fn save_png(&self, path: &Path) -> Result<(), PlotError> {
        image::save_buffer_with_format(
            path,
            &self.pixels,
            self.width,
            self.height,
            ExtendedColorType::Rgb8,
            ImageFormat::Png,
        )
        .map_err(|source| PlotError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Drop for Figure {
    fn drop(&mut self) {
        log::debug!("Released {}x{} figure", self.width, self.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_figure_is_white() {
        let figure = Figure::new((4, 3));
        assert_eq!(figure.size(), (4, 3));
        assert_eq!(figure.pixels().len(), 4 * 3 * 3);
        assert!(figure.pixels().iter().all(|&b| b == 255));
    }

    #[test]
    fn saves_png_with_canvas_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.png");
        Figure::new((20, 10)).save_png(&path).unwrap();

        assert_eq!(image::image_dimensions(&path).unwrap(), (20, 10));
    }

    #[test]
    fn unwritable_destination_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("figure.png");
        let err = Figure::new((2, 2)).save_png(&path).unwrap_err();

        match err {
            PlotError::Write { path: attempted, .. } => assert_eq!(attempted, path),
            other => panic!("expected write error, got {other:?}"),
        }
    }
}
