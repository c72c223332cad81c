use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use plotters::style::{register_font, FontDesc, FontFamily, FontStyle};

/// Family every chart text element is drawn with.
pub const FAMILY: FontFamily<'static> = FontFamily::SansSerif;

static REGISTERED: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Register the first readable font in `candidates` under [`FAMILY`].
///
/// The font registry is process-wide, so only the first call does any work;
/// later calls report what that call found.
pub fn ensure_registered(candidates: &[PathBuf]) -> Option<&'static Path> {
    REGISTERED
        .get_or_init(|| register_first(candidates))
        .as_deref()
}

/// Try each candidate in turn and register the first one that loads.
fn register_first(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find_map(|path| {
        let bytes = std::fs::read(path).ok()?;
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        match register_font(FAMILY.as_str(), FontStyle::Normal, bytes) {
            Ok(()) => {
                log::debug!("Using font {}", path.display());
                Some(path.clone())
            }
            Err(_) => {
                log::debug!("Skipping font {}: not a TrueType/OpenType font", path.display());
                None
            }
        }
    })
}

/// Whether text of `size_px` can actually be laid out.
pub fn text_available(candidates: &[PathBuf], size_px: f64) -> bool {
    if ensure_registered(candidates).is_none() {
        log::warn!("No usable font found; the chart is rendered without text");
        return false;
    }
    match desc(size_px).box_size("0") {
        Ok(_) => true,
        Err(err) => {
            log::warn!("Font cannot lay out text ({err:?}); the chart is rendered without text");
            false
        }
    }
}

/// Regular font of the chart family at `size_px`.
pub fn desc(size_px: f64) -> FontDesc<'static> {
    FontDesc::new(FAMILY, size_px, FontStyle::Normal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_and_invalid_candidates_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let not_a_font = dir.path().join("notes.ttf");
        std::fs::write(&not_a_font, b"this is plain text").unwrap();
        let absent = dir.path().join("absent.ttf");

        assert_eq!(register_first(&[absent, not_a_font]), None);
        assert_eq!(register_first(&[]), None);
    }
}
