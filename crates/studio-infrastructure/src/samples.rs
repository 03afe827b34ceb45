//! Local sample files: transcript previews and street segments.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use studio_core::parking::{SegmentFeature, parse_segments};
use studio_core::run::Variant;
use studio_core::{Result, StudioError};

/// Shown in place of a transcript preview that could not be read.
pub const NO_PREVIEW_TEXT: &str = "(no preview available)";

/// Reads transcript previews from a directory of `<variant>.txt` files.
#[derive(Debug, Clone)]
pub struct SampleLibrary {
    dir: PathBuf,
}

impl SampleLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Preview text for `variant`, or [`NO_PREVIEW_TEXT`] when the file is
    /// missing, unreadable or empty.
    pub fn transcript(&self, variant: Variant) -> String {
        let path = self.dir.join(variant.sample_file_name());
        match fs::read_to_string(&path) {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => NO_PREVIEW_TEXT.to_string(),
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %e, "could not read transcript preview");
                }
                NO_PREVIEW_TEXT.to_string()
            }
        }
    }
}

/// Loads a GeoJSON segment collection from disk.
pub fn load_segments(path: &Path) -> Result<Vec<SegmentFeature>> {
    let json = fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            StudioError::not_found("segments file", path.display().to_string())
        } else {
            StudioError::from(e)
        }
    })?;
    let segments = parse_segments(&json)?;
    tracing::debug!(path = %path.display(), count = segments.len(), "segments loaded");
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_transcript_reads_variant_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("sensitive.txt"), "Interviewer: hello\n").unwrap();

        let library = SampleLibrary::new(dir.path());
        assert_eq!(library.transcript(Variant::Sensitive), "Interviewer: hello\n");
        assert_eq!(library.transcript(Variant::Sanitized), NO_PREVIEW_TEXT);
    }

    #[test]
    fn test_blank_transcript_uses_placeholder() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("sanitized.txt"), "  \n").unwrap();
        assert_eq!(
            SampleLibrary::new(dir.path()).transcript(Variant::Sanitized),
            NO_PREVIEW_TEXT
        );
    }

    #[test]
    fn test_load_segments() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("segments.geojson");
        fs::write(
            &path,
            r#"{
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "properties": {"segment_id": "walther_tumblinger_maistra_n", "street_name": "Waltherstraße"},
                    "geometry": {"type": "LineString", "coordinates": [[11.56, 48.12], [11.57, 48.13]]}
                }]
            }"#,
        )
        .unwrap();

        let segments = load_segments(&path).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].lat_lngs()[0], [48.12, 11.56]);
    }

    #[test]
    fn test_missing_segments_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = load_segments(&dir.path().join("none.geojson")).unwrap_err();
        assert!(err.is_not_found());
    }
}
