//! Media dimension lookup for the works index
//!
//! The best media URL of each work is downloaded once into a cache directory
//! (file name = SHA-256 of the URL plus its extension) and measured with
//! `ffprobe`, falling back to reading the image header when `ffprobe` is
//! missing or has no answer. Results are kept in a metadata file keyed by URL so later runs
//! skip both the download and the probe. Every failure along the way simply
//! leaves the work without dimensions.

use crate::collector::WorkRecord;
use crate::config::CatalogConfig;
use crate::error::Result;
use crate::io::write_atomic;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "m4v", "webm", "ogg", "ogv", "mov", "avi"];
const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "avif", "svg", "bmp", "tiff",
];

/// Fields consulted for a work's media, in order of preference
pub const MEDIA_SOURCE_FIELDS: &[&str] = &["previewSource", "staticPreviewSource", "fileSource"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Image,
    Unknown,
}

impl MediaKind {
    /// Guess from the URL's file extension, ignoring any query string
    pub fn from_url(url: &str) -> Self {
        let extension = url_extension(url).map(|e| e.to_lowercase());
        match extension.as_deref() {
            Some(e) if VIDEO_EXTENSIONS.contains(&e) => Self::Video,
            Some(e) if IMAGE_EXTENSIONS.contains(&e) => Self::Image,
            _ => Self::Unknown,
        }
    }
}

fn url_extension(url: &str) -> Option<&str> {
    let without_query = url.split('?').next().unwrap_or(url);
    Path::new(without_query).extension().and_then(|e| e.to_str())
}

/// Cached measurement of one media URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub width: u32,
    pub height: u32,
    pub path: String,
    pub kind: MediaKind,
}

/// The media cache directory and its metadata file
#[derive(Debug, Clone)]
pub struct MediaCache {
    dir: PathBuf,
    metadata_path: PathBuf,
    entries: BTreeMap<String, MediaRecord>,
}

impl MediaCache {
    /// Open the cache; an unreadable metadata file counts as empty
    pub fn load(dir: impl Into<PathBuf>, metadata_path: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let metadata_path = metadata_path.into();
        let entries = match fs::read_to_string(&metadata_path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(
                    "Ignoring unreadable media metadata {}: {}",
                    metadata_path.display(),
                    e
                );
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self {
            dir,
            metadata_path,
            entries,
        }
    }

    pub fn for_config(config: &CatalogConfig) -> Self {
        Self::load(&config.media_cache_dir, &config.media_metadata_path)
    }

    pub fn get(&self, url: &str) -> Option<&MediaRecord> {
        self.entries.get(url)
    }

    pub fn insert(&mut self, url: impl Into<String>, record: MediaRecord) {
        self.entries.insert(url.into(), record);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Where the download of `url` is stored
    pub fn path_for(&self, url: &str) -> PathBuf {
        let digest = hex::encode(Sha256::digest(url.as_bytes()));
        let file_name = match url_extension(url) {
            Some(extension) => format!("{}.{}", digest, extension),
            None => digest,
        };
        self.dir.join(file_name)
    }

    /// Rewrite the metadata file
    pub fn save(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(&self.entries)?;
        write_atomic(&self.metadata_path, json)
    }
}

/// Downloads a URL to a local file
pub trait MediaFetcher {
    fn fetch(&mut self, url: &str, destination: &Path) -> Result<()>;
}

/// Blocking HTTP download
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

impl MediaFetcher for HttpFetcher {
    fn fetch(&mut self, url: &str, destination: &Path) -> Result<()> {
        let bytes = self.client.get(url).send()?.error_for_status()?.bytes()?;
        write_atomic(destination, &bytes)
    }
}

/// Measures a local media file
pub trait DimensionProbe {
    fn probe(&self, path: &Path) -> Option<Dimensions>;
}

/// Runs `ffprobe` on the first video stream; still images count as one
#[derive(Debug, Clone)]
pub struct FfprobeProbe {
    program: Option<PathBuf>,
}

impl FfprobeProbe {
    /// Look up `ffprobe` on `PATH` once
    pub fn locate() -> Self {
        let program = which::which("ffprobe").ok();
        if program.is_none() {
            warn!("ffprobe not found; only image headers will be measured");
        }
        Self { program }
    }
}

impl DimensionProbe for FfprobeProbe {
    fn probe(&self, path: &Path) -> Option<Dimensions> {
        let program = self.program.as_ref()?;
        let output = Command::new(program)
            .args([
                "-v",
                "error",
                "-select_streams",
                "v:0",
                "-show_entries",
                "stream=width,height",
                "-of",
                "json",
            ])
            .arg(path)
            .output()
            .map_err(|e| debug!("ffprobe failed to start: {}", e))
            .ok()?;
        if !output.status.success() {
            debug!("ffprobe rejected {}", path.display());
            return None;
        }
        parse_ffprobe_output(&String::from_utf8_lossy(&output.stdout))
    }
}

#[derive(Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Deserialize)]
struct FfprobeStream {
    width: Option<u32>,
    height: Option<u32>,
}

/// Read width and height of the first stream from `ffprobe -of json` output
pub fn parse_ffprobe_output(json: &str) -> Option<Dimensions> {
    let output: FfprobeOutput = serde_json::from_str(json).ok()?;
    let stream = output.streams.first()?;
    match (stream.width, stream.height) {
        (Some(width), Some(height)) if width > 0 && height > 0 => {
            Some(Dimensions { width, height })
        }
        _ => None,
    }
}

/// Reads width and height from the header of an image file
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageHeaderProbe;

impl DimensionProbe for ImageHeaderProbe {
    fn probe(&self, path: &Path) -> Option<Dimensions> {
        let size = imagesize::size(path)
            .map_err(|e| debug!("No image header in {}: {}", path.display(), e))
            .ok()?;
        let width = u32::try_from(size.width).ok()?;
        let height = u32::try_from(size.height).ok()?;
        (width > 0 && height > 0).then_some(Dimensions { width, height })
    }
}

/// Asks `first`, then `second` when `first` has no answer
#[derive(Debug, Clone)]
pub struct FallbackProbe<A, B> {
    first: A,
    second: B,
}

impl<A: DimensionProbe, B: DimensionProbe> FallbackProbe<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: DimensionProbe, B: DimensionProbe> DimensionProbe for FallbackProbe<A, B> {
    fn probe(&self, path: &Path) -> Option<Dimensions> {
        self.first
            .probe(path)
            .or_else(|| self.second.probe(path))
    }
}

/// `ffprobe` first, then the image header
pub type DefaultProbe = FallbackProbe<FfprobeProbe, ImageHeaderProbe>;

/// Supplies dimensions for media URLs during indexing
pub trait MediaEnricher {
    fn dimensions(&mut self, url: &str) -> Option<Dimensions>;

    /// Store whatever was learned during the run
    fn persist(&mut self) -> Result<()>;
}

/// Cache-backed enricher: cache hit, else download and probe
pub struct MediaResolver<F, P> {
    cache: MediaCache,
    fetcher: F,
    probe: P,
}

impl<F: MediaFetcher, P: DimensionProbe> MediaResolver<F, P> {
    pub fn new(cache: MediaCache, fetcher: F, probe: P) -> Self {
        Self {
            cache,
            fetcher,
            probe,
        }
    }

    pub fn cache(&self) -> &MediaCache {
        &self.cache
    }
}

impl MediaResolver<HttpFetcher, DefaultProbe> {
    /// HTTP downloads measured by [`DefaultProbe`], with the cache from `config`
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        Ok(Self::new(
            MediaCache::for_config(config),
            HttpFetcher::new(&config.user_agent)?,
            FallbackProbe::new(FfprobeProbe::locate(), ImageHeaderProbe),
        ))
    }
}

impl<F: MediaFetcher, P: DimensionProbe> MediaEnricher for MediaResolver<F, P> {
    fn dimensions(&mut self, url: &str) -> Option<Dimensions> {
        if url.is_empty() {
            return None;
        }
        if let Some(cached) = self.cache.get(url) {
            if cached.width > 0 && cached.height > 0 {
                return Some(Dimensions {
                    width: cached.width,
                    height: cached.height,
                });
            }
        }

        let path = self.cache.path_for(url);
        if !path.exists() {
            debug!("Downloading {} to {}", url, path.display());
            if let Err(e) = self.fetcher.fetch(url, &path) {
                warn!("Skipping media {}: {}", url, e);
                return None;
            }
        }

        let dimensions = self.probe.probe(&path)?;
        self.cache.insert(
            url,
            MediaRecord {
                width: dimensions.width,
                height: dimensions.height,
                path: path.to_string_lossy().into_owned(),
                kind: MediaKind::from_url(url),
            },
        );
        Some(dimensions)
    }

    fn persist(&mut self) -> Result<()> {
        self.cache.save()
    }
}

/// First non-empty media source of a work
pub fn best_media_source(record: &WorkRecord) -> Option<String> {
    MEDIA_SOURCE_FIELDS
        .iter()
        .filter_map(|key| record.fields().get(key))
        .find(|value| !value.is_blank())
        .map(|value| value.to_string())
}
