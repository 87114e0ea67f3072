use crate::logger;
use std::path::{Path, PathBuf};

const PUBLIC_PREFIX: &str = "public/";

/// Converts a dataset path (`public\images\dog.webp`) into a root-relative
/// URL path (`/images/dog.webp`).
pub fn normalize_path(raw: &str) -> String {
    let path = raw.trim().replace('\\', "/");
    match path.strip_prefix(PUBLIC_PREFIX) {
        Some(rest) => format!("/{}", rest),
        None => path,
    }
}

/// Maps normalized media paths onto files under a media root directory.
#[derive(Debug, Clone)]
pub struct MediaResolver {
    root: PathBuf,
}

impl MediaResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn to_file_path(&self, raw: &str) -> PathBuf {
        let url = normalize_path(raw);
        self.root.join(url.trim_start_matches('/'))
    }

    pub fn exists(&self, raw: &str) -> bool {
        !raw.trim().is_empty() && self.to_file_path(raw).is_file()
    }

    /// Resolves a dataset path to an existing file, logging missing media.
    pub fn resolve(&self, raw: &str) -> Option<PathBuf> {
        if raw.trim().is_empty() {
            return None;
        }
        let path = self.to_file_path(raw);
        if path.is_file() {
            Some(path)
        } else {
            logger::warn(&format!("Media file not found: {}", path.display()));
            None
        }
    }
}

/// What the image panel shows for an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageView {
    /// A resolvable image; holds the normalized URL path.
    Available(String),
    /// Referenced but not found on disk.
    Missing(String),
    /// No reference, or deliberately hidden.
    Blank,
}

impl ImageView {
    pub fn for_path(resolver: &MediaResolver, raw: &str) -> Self {
        if raw.trim().is_empty() {
            return ImageView::Blank;
        }
        let url = normalize_path(raw);
        if resolver.exists(raw) {
            ImageView::Available(url)
        } else {
            ImageView::Missing(url)
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        match self {
            ImageView::Available(url) | ImageView::Missing(url) => {
                url.rsplit('/').next().filter(|name| !name.is_empty())
            }
            ImageView::Blank => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_normalize_backslashes_and_public_prefix() {
        assert_eq!(
            normalize_path("public\\images\\dog.webp"),
            "/images/dog.webp"
        );
        assert_eq!(
            normalize_path("public\\audio\\dog\\ENG_male_1.mp3"),
            "/audio/dog/ENG_male_1.mp3"
        );
    }

    #[test]
    fn test_normalize_keeps_other_paths() {
        assert_eq!(normalize_path("images/cat.webp"), "images/cat.webp");
        assert_eq!(normalize_path("/already/rooted.png"), "/already/rooted.png");
        assert_eq!(normalize_path("assets\\public\\x.png"), "assets/public/x.png");
    }

    #[test]
    fn test_resolver_finds_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("images")).unwrap();
        fs::write(dir.path().join("images/dog.webp"), b"webp").unwrap();

        let resolver = MediaResolver::new(dir.path());
        assert_eq!(
            resolver.resolve("public\\images\\dog.webp"),
            Some(dir.path().join("images/dog.webp"))
        );
    }

    #[test]
    fn test_resolver_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = MediaResolver::new(dir.path());
        assert_eq!(resolver.resolve("public\\images\\ghost.webp"), None);
        assert_eq!(resolver.resolve("   "), None);
    }

    #[test]
    fn test_image_view_states() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("images")).unwrap();
        fs::write(dir.path().join("images/cat.webp"), b"webp").unwrap();
        let resolver = MediaResolver::new(dir.path());

        let found = ImageView::for_path(&resolver, "public\\images\\cat.webp");
        assert_eq!(found, ImageView::Available("/images/cat.webp".to_string()));
        assert_eq!(found.file_name(), Some("cat.webp"));

        let missing = ImageView::for_path(&resolver, "public\\images\\dog.webp");
        assert_eq!(missing, ImageView::Missing("/images/dog.webp".to_string()));

        assert_eq!(ImageView::for_path(&resolver, ""), ImageView::Blank);
        assert_eq!(ImageView::Blank.file_name(), None);
    }
}
