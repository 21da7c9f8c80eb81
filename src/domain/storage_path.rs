use std::fmt;

use uuid::Uuid;

/// Location of a stored audio object, relative to the store root. Upload
/// paths are unique per recording; the original extension is preserved so
/// the speech API can infer the encoding later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath(String);

impl StoragePath {
    pub fn for_upload(original_filename: &str) -> Self {
        let extension = original_filename
            .rsplit_once('.')
            .map(|(_, ext)| format!(".{}", ext))
            .unwrap_or_default();
        Self(format!("{}{}", Uuid::new_v4(), extension))
    }

    pub fn from_raw(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_path_keeps_extension() {
        let path = StoragePath::for_upload("consultation.m4a");
        assert!(path.as_str().ends_with(".m4a"));
    }

    #[test]
    fn upload_path_without_extension_is_bare_uuid() {
        let path = StoragePath::for_upload("audio");
        assert!(!path.as_str().contains('.'));
    }

    #[test]
    fn upload_paths_are_unique() {
        assert_ne!(
            StoragePath::for_upload("a.wav"),
            StoragePath::for_upload("a.wav")
        );
    }
}
