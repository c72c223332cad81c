use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::chart::figure::Figure;
use crate::error::PlotError;

// ---------------------------------------------------------------------------
// Output path
// ---------------------------------------------------------------------------

/// Image path for an input table: `run.csv` → `run.png`.
///
/// Only a trailing, lowercase `.csv` extension is replaced; any other name
/// keeps its extension and gets `.png` appended (`run.txt` → `run.txt.png`).
pub fn derive_output_path(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == "csv") {
        return input.with_extension("png");
    }
    let mut name = OsString::from(input.as_os_str());
    name.push(".png");
    PathBuf::from(name)
}

/// Write the rendered figure to `path`.
pub fn write_figure(figure: &Figure, path: &Path) -> Result<(), PlotError> {
    figure.save_png(path)?;
    log::info!("Wrote {}x{} PNG to {}", figure.size().0, figure.size().1, path.display());
    Ok(())
}
