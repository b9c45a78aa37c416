use crate::error::Error;
use crate::hasher::{fingerprint_file, Fingerprint};
use chrono::{DateTime, Datelike, Local, Month};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Calendar month a file is filed under, taken from its local-time mtime.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn of(time: SystemTime) -> Self {
        let local: DateTime<Local> = time.into();
        Self {
            year: local.year(),
            month: local.month(),
        }
    }

    /// `MM-MonthName`, e.g. `03-March`.
    pub fn folder_name(&self) -> String {
        let name = u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("Unknown");
        format!("{:02}-{}", self.month, name)
    }

    /// `<root>/<year>/<MM-Month>`.
    pub fn directory(&self, dest_root: &Path) -> PathBuf {
        dest_root
            .join(self.year.to_string())
            .join(self.folder_name())
    }
}

/// Identity of one scanned file. Built once per file, never mutated.
#[derive(Debug, Clone)]
pub struct FileDescriptor {
    pub fingerprint: Fingerprint,
    pub source_path: PathBuf,
    pub size: u64,
    pub modified: SystemTime,
}

impl FileDescriptor {
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let to_error = |source| Error::Fingerprint {
            path: path.to_path_buf(),
            source,
        };
        let metadata = fs::metadata(path).map_err(to_error)?;
        let modified = metadata.modified().map_err(to_error)?;
        let fingerprint = fingerprint_file(path).map_err(to_error)?;

        Ok(Self {
            fingerprint,
            source_path: path.to_path_buf(),
            size: metadata.len(),
            modified,
        })
    }

    pub fn period(&self) -> Period {
        Period::of(self.modified)
    }

    pub fn sanitized_name(&self) -> String {
        let name = self
            .source_path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        sanitize_file_name(&name)
    }

    /// `<root>/<year>/<MM-Month>/<SSSSS>-<name>`. Sequences past 99999 simply
    /// print wider.
    pub fn destination_path(&self, dest_root: &Path, sequence: u32) -> PathBuf {
        self.period()
            .directory(dest_root)
            .join(format!("{:05}-{}", sequence, self.sanitized_name()))
    }
}

/// Path separators and spaces each become a hyphen so the name stays a single
/// flat component.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ' ' => '-',
            other => other,
        })
        .collect();
    match cleaned.as_str() {
        "" | "." | ".." => format!("{}-", cleaned.replace('.', "-")),
        _ => cleaned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::Component;

    fn local_time(year: i32, month: u32, day: u32) -> SystemTime {
        Local
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .unwrap()
            .into()
    }

    fn descriptor(path: &str, modified: SystemTime) -> FileDescriptor {
        FileDescriptor {
            fingerprint: Fingerprint::from_bytes([7u8; 32]),
            source_path: PathBuf::from(path),
            size: 1,
            modified,
        }
    }

    #[test]
    fn test_destination_layout() {
        let d = descriptor("/camera/DCIM/A.jpg", local_time(2021, 3, 1));
        assert_eq!(
            d.destination_path(Path::new("/archive"), 1),
            PathBuf::from("/archive/2021/03-March/00001-A.jpg")
        );
    }

    #[test]
    fn test_spaces_become_hyphens() {
        let d = descriptor("/camera/My Holiday Pic.jpg", local_time(2019, 12, 24));
        assert_eq!(
            d.destination_path(Path::new("out"), 42),
            PathBuf::from("out/2019/12-December/00042-My-Holiday-Pic.jpg")
        );
    }

    #[test]
    fn test_sequence_past_five_digits_is_not_wrapped() {
        let d = descriptor("x.png", local_time(2020, 1, 15));
        let path = d.destination_path(Path::new("out"), 123_456);
        assert!(path.ends_with("2020/01-January/123456-x.png"));
    }

    #[test]
    fn test_sanitize_never_escapes_period_dir() {
        for raw in ["a/b c", "..", "back\\slash", ".", "../../etc passwd"] {
            let clean = sanitize_file_name(raw);
            assert!(!clean.contains('/'));
            assert!(!clean.contains('\\'));
            assert!(!clean.contains(' '));
            let components: Vec<_> = Path::new(&clean).components().collect();
            assert_eq!(components.len(), 1, "{} -> {}", raw, clean);
            assert!(matches!(components[0], Component::Normal(_)));
        }
    }

    #[test]
    fn test_period_distinguishes_year_and_month() {
        let a = Period::of(local_time(2020, 1, 10));
        let b = Period::of(local_time(2021, 1, 10));
        let c = Period::of(local_time(2020, 2, 10));
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, Period::of(local_time(2020, 1, 28)));
        assert_eq!(c.folder_name(), "02-February");
    }
}
