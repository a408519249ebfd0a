use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProbeId(pub(crate) usize);

impl fmt::Display for ProbeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Out of band image load request.
#[derive(Debug, Clone, PartialEq)]
pub struct Probe {
    pub id: ProbeId,
    pub url: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageOutcome {
    Loaded,
    Failed,
}

/// Loads images without blocking the caller.
///
/// There is no timeout: a probe never returned by `poll` stays pending forever.
pub trait ImageLoader {
    fn request(&mut self, probe: Probe);

    /// Returns probes resolved since the last poll, in any order.
    fn poll(&mut self) -> Vec<(ProbeId, ImageOutcome)>;
}

/// Resolves image URLs against local resources directory.
///
/// Requests are answered on the next poll. URLs with network scheme never resolve.
pub struct ResourceLoader {
    resources: PathBuf,
    pending: Vec<Probe>,
}

impl ResourceLoader {
    pub fn new(resources: impl AsRef<Path>) -> Self {
        Self {
            resources: resources.as_ref().to_path_buf(),
            pending: vec![],
        }
    }

    fn resolve(&self, url: &str) -> Option<PathBuf> {
        if let Some(path) = url.strip_prefix("file://") {
            return Some(PathBuf::from(path));
        }
        if url.contains("://") || url.starts_with("data:") {
            return None;
        }
        let path = url.split(['?', '#']).next().unwrap_or(url);
        Some(self.resources.join(path.trim_start_matches('/')))
    }
}

impl ImageLoader for ResourceLoader {
    fn request(&mut self, probe: Probe) {
        debug!("request image {} {}", probe.id, probe.url);
        self.pending.push(probe);
    }

    fn poll(&mut self) -> Vec<(ProbeId, ImageOutcome)> {
        let mut resolved = vec![];
        let mut pending = vec![];
        for probe in std::mem::take(&mut self.pending) {
            let path = match self.resolve(&probe.url) {
                Some(path) => path,
                None => {
                    pending.push(probe);
                    continue;
                }
            };
            let outcome = match fs::read(&path) {
                Ok(bytes) if bytes.is_empty() => {
                    error!("unable to decode image {path:?}, file is empty");
                    ImageOutcome::Failed
                }
                Ok(bytes) if !is_image(&bytes) => {
                    error!("unable to decode image {path:?}, unknown format");
                    ImageOutcome::Failed
                }
                Ok(_) => ImageOutcome::Loaded,
                Err(reason) => {
                    error!("unable to read image {path:?}, {reason}");
                    ImageOutcome::Failed
                }
            };
            resolved.push((probe.id, outcome));
        }
        self.pending = pending;
        resolved
    }
}

const SIGNATURES: [&[u8]; 6] = [
    b"\x89PNG\r\n\x1a\n",
    b"\xff\xd8\xff",
    b"GIF87a",
    b"GIF89a",
    b"BM",
    b"RIFF",
];

/// Recognizes image file by its signature, SVG by root tag.
fn is_image(bytes: &[u8]) -> bool {
    if SIGNATURES.iter().any(|signature| bytes.starts_with(signature)) {
        return true;
    }
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(256)]);
    head.contains("<svg")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn image(id: usize, url: &str) -> Probe {
        Probe {
            id: ProbeId(id),
            url: url.to_string(),
        }
    }

    #[test]
    pub fn test_resolve_relative_url() {
        let loader = ResourceLoader::new("./assets");
        let path = loader.resolve("/images/far.jpg?v=2");
        assert_eq!(path, Some(PathBuf::from("./assets/images/far.jpg")))
    }

    #[test]
    pub fn test_network_url_stays_pending() {
        let mut loader = ResourceLoader::new("./assets");
        loader.request(image(0, "https://example.com/far.jpg"));
        assert!(loader.poll().is_empty());
        assert!(loader.poll().is_empty());
        assert_eq!(loader.pending.len(), 1);
    }

    #[test]
    pub fn test_missing_file_fails() {
        let mut loader = ResourceLoader::new(env::temp_dir());
        loader.request(image(3, "parallax-missing-image-file.png"));
        assert_eq!(loader.poll(), vec![(ProbeId(3), ImageOutcome::Failed)]);
        assert!(loader.poll().is_empty());
    }

    #[test]
    pub fn test_existing_file_loads() {
        let directory = env::temp_dir().join("parallax-loader-test");
        fs::create_dir_all(&directory).expect("temp directory created");
        fs::write(directory.join("near.png"), b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR").expect("image written");
        let mut loader = ResourceLoader::new(&directory);
        loader.request(image(1, "near.png"));
        assert_eq!(loader.poll(), vec![(ProbeId(1), ImageOutcome::Loaded)]);
    }

    #[test]
    pub fn test_empty_file_fails() {
        let directory = env::temp_dir().join("parallax-loader-empty");
        fs::create_dir_all(&directory).expect("temp directory created");
        fs::write(directory.join("empty.png"), b"").expect("image written");
        let mut loader = ResourceLoader::new(&directory);
        loader.request(image(2, "empty.png"));
        assert_eq!(loader.poll(), vec![(ProbeId(2), ImageOutcome::Failed)]);
    }

    #[test]
    pub fn test_text_file_fails() {
        let directory = env::temp_dir().join("parallax-loader-text");
        fs::create_dir_all(&directory).expect("temp directory created");
        fs::write(directory.join("far.jpg"), "not found").expect("image written");
        let mut loader = ResourceLoader::new(&directory);
        loader.request(image(4, "far.jpg"));
        assert_eq!(loader.poll(), vec![(ProbeId(4), ImageOutcome::Failed)]);
    }

    #[test]
    pub fn test_fixture_image_loads() {
        let mut loader = ResourceLoader::new("./assets");
        loader.request(image(5, "images/mountains.png"));
        assert_eq!(loader.poll(), vec![(ProbeId(5), ImageOutcome::Loaded)]);
    }
}
