//! Hero image processing: public copies, resized variants and fluid descriptors

use base64::Engine;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::ImagesConfig;
use crate::content::{FluidImage, PostImage};
use crate::helpers::url_for;

/// Breakpoints as fractions of `max_width`
const BREAKPOINTS: [f64; 6] = [0.25, 0.5, 1.0, 1.5, 2.0, 3.0];

/// Formats that get resized variants; anything else is only copied
const RESIZABLE: [&str; 5] = ["jpg", "jpeg", "png", "webp", "tiff"];

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Image not found: {0:?}")]
    NotFound(PathBuf),

    #[error("Failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode {path:?}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Turns source images into the public files and descriptors a post page needs
pub struct ImageProcessor {
    public_dir: PathBuf,
    root: String,
    options: ImagesConfig,
}

impl ImageProcessor {
    pub fn new(public_dir: impl Into<PathBuf>, root: &str, options: ImagesConfig) -> Self {
        Self {
            public_dir: public_dir.into(),
            root: root.to_string(),
            options,
        }
    }

    /// Publish `source` and build its descriptor.
    ///
    /// The original lands in `static/<hash>/<name>`; resizable formats also get
    /// one variant per kept breakpoint in `static/<hash>/<width>/<name>`.
    pub fn process(&self, source: &Path) -> Result<PostImage, ImageError> {
        if !source.is_file() {
            return Err(ImageError::NotFound(source.to_path_buf()));
        }

        let bytes = fs::read(source)?;
        let hash = hash_bytes(&bytes);
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());

        let rel_dir = format!("static/{}", hash);
        let out_dir = self.public_dir.join(&rel_dir);
        fs::create_dir_all(&out_dir)?;
        fs::write(out_dir.join(&name), &bytes)?;

        let public_url = url_for(&self.root, &format!("{}/{}", rel_dir, name));

        let fluid = if is_resizable(source) {
            let img = image::load_from_memory(&bytes).map_err(|source_err| ImageError::Decode {
                path: source.to_path_buf(),
                source: source_err,
            })?;
            Some(self.fluid(&img, &rel_dir, &name, source)?)
        } else {
            tracing::debug!("Copied {:?} without resizing", source);
            None
        };

        Ok(PostImage { public_url, fluid })
    }

    fn fluid(
        &self,
        img: &DynamicImage,
        rel_dir: &str,
        name: &str,
        source: &Path,
    ) -> Result<FluidImage, ImageError> {
        let (width, height) = (img.width(), img.height());
        let widths = variant_widths(self.options.max_width, width);
        let format = ImageFormat::from_path(source).map_err(|e| ImageError::Encode {
            path: source.to_path_buf(),
            source: e,
        })?;

        let mut src_set = Vec::with_capacity(widths.len());
        for &w in &widths {
            let variant_dir = self.public_dir.join(rel_dir).join(w.to_string());
            fs::create_dir_all(&variant_dir)?;
            let dest = variant_dir.join(name);

            if !dest.exists() {
                let h = scaled_height(width, height, w);
                let resized = img.resize_exact(w, h, FilterType::Lanczos3);
                resized
                    .save_with_format(&dest, format)
                    .map_err(|e| ImageError::Encode {
                        path: dest.clone(),
                        source: e,
                    })?;
            }

            let url = url_for(&self.root, &format!("{}/{}/{}", rel_dir, w, name));
            src_set.push((w, url));
        }

        let presentation_width = self.options.max_width.min(width);
        let src = src_set
            .iter()
            .find(|(w, _)| *w == presentation_width)
            .or_else(|| src_set.last())
            .map(|(_, url)| url.clone())
            .unwrap_or_default();

        Ok(FluidImage {
            aspect_ratio: width as f64 / height.max(1) as f64,
            src,
            src_set: src_set
                .iter()
                .map(|(w, url)| format!("{} {}w", url, w))
                .collect::<Vec<_>>()
                .join(",\n"),
            sizes: format!(
                "(max-width: {}px) 100vw, {}px",
                presentation_width, presentation_width
            ),
            base64: self.placeholder(img, source),
        })
    }

    /// Tiny PNG rendition used as a blurred placeholder while the real image loads
    fn placeholder(&self, img: &DynamicImage, source: &Path) -> Option<String> {
        let width = self.options.placeholder_width;
        if width == 0 {
            return None;
        }
        let height = scaled_height(img.width(), img.height(), width);
        let thumb = img.resize_exact(width, height, FilterType::Triangle);

        let mut buf = Vec::new();
        if let Err(e) = thumb.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png) {
            tracing::warn!("Failed to build placeholder for {:?}: {}", source, e);
            return None;
        }

        Some(format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&buf)
        ))
    }
}

/// Breakpoint widths that do not upscale the original.
/// An image narrower than every breakpoint gets a single variant at its own width.
pub fn variant_widths(max_width: u32, original_width: u32) -> Vec<u32> {
    let mut widths: Vec<u32> = BREAKPOINTS
        .iter()
        .map(|f| (max_width as f64 * f).round() as u32)
        .filter(|&w| w > 0 && w <= original_width)
        .collect();

    if widths.is_empty() {
        widths.push(original_width.max(1));
    } else if original_width < max_width && widths.last() != Some(&original_width) {
        widths.push(original_width);
    }

    widths.dedup();
    widths
}

fn scaled_height(width: u32, height: u32, target_width: u32) -> u32 {
    let h = (height as f64 * target_width as f64 / width.max(1) as f64).round() as u32;
    h.max(1)
}

fn is_resizable(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| RESIZABLE.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn hash_bytes(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex()[..16].to_string()
}
