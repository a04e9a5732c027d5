//! Image decoding
//!
//! A single entry point, [`decode_file`], used both by the synchronous
//! decode-on-miss path and by the background preloader. Animated formats
//! (GIF, APNG, animated WebP) are decoded eagerly into a full frame
//! sequence with per-frame durations.

mod error;

pub use error::DecodeError;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use image::codecs::gif::GifDecoder;
use image::codecs::png::PngDecoder;
use image::codecs::webp::WebPDecoder;
use image::{AnimationDecoder, DynamicImage, Frame, ImageReader, RgbaImage};
use tracing::debug;

/// Duration used for frames that declare no delay.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(100);

/// One frame of an animated image.
#[derive(Debug, Clone)]
pub struct AnimationFrame {
    pub image: RgbaImage,
    pub duration: Duration,
}

impl AnimationFrame {
    pub fn new(image: RgbaImage, duration: Duration) -> Self {
        let duration = if duration.is_zero() {
            DEFAULT_FRAME_DURATION
        } else {
            duration
        };
        Self { image, duration }
    }
}

/// Decoded pixel data for one file.
#[derive(Debug, Clone)]
pub enum Decoded {
    Still(RgbaImage),
    /// At least two frames.
    Animated(Vec<AnimationFrame>),
}

impl Decoded {
    pub fn frame_count(&self) -> usize {
        match self {
            Decoded::Still(_) => 1,
            Decoded::Animated(frames) => frames.len(),
        }
    }

    pub fn is_animated(&self) -> bool {
        self.frame_count() > 1
    }

    /// Pixels of frame `index`.
    pub fn frame(&self, index: usize) -> Option<&RgbaImage> {
        match self {
            Decoded::Still(image) if index == 0 => Some(image),
            Decoded::Still(_) => None,
            Decoded::Animated(frames) => frames.get(index).map(|f| &f.image),
        }
    }

    /// Display duration of frame `index`; stills have none.
    pub fn frame_duration(&self, index: usize) -> Option<Duration> {
        match self {
            Decoded::Still(_) => None,
            Decoded::Animated(frames) => frames.get(index).map(|f| f.duration),
        }
    }

    /// Width and height of the first frame.
    pub fn dimensions(&self) -> (u32, u32) {
        self.frame(0).map(|f| f.dimensions()).unwrap_or((0, 0))
    }

    /// Wrap a frame list, collapsing a single frame into a still image.
    fn from_frames(path: &Path, mut frames: Vec<AnimationFrame>) -> Result<Self, DecodeError> {
        match frames.len() {
            0 => Err(DecodeError::NoFrames {
                path: path.to_path_buf(),
            }),
            1 => Ok(Decoded::Still(frames.remove(0).image)),
            _ => Ok(Decoded::Animated(frames)),
        }
    }
}

/// Decode `path` into a still image or a complete frame sequence.
///
/// The format is picked from the extension; files whose extension does not
/// name an animated format go through format sniffing.
pub fn decode_file(path: &Path) -> Result<Decoded, DecodeError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let decoded = match ext.as_deref() {
        Some("gif") => decode_gif(path)?,
        Some("png") => decode_png(path)?,
        Some("webp") => decode_webp(path)?,
        _ => decode_still(path)?,
    };

    debug!(
        path = %path.display(),
        frames = decoded.frame_count(),
        "decoded image"
    );
    Ok(decoded)
}

fn open(path: &Path) -> Result<BufReader<File>, DecodeError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| DecodeError::from_io(path.to_path_buf(), e))
}

fn image_err(path: &Path) -> impl FnOnce(image::ImageError) -> DecodeError {
    let path: PathBuf = path.to_path_buf();
    move |e| DecodeError::from_image(path, e)
}

fn decode_still(path: &Path) -> Result<Decoded, DecodeError> {
    let image = ImageReader::new(open(path)?)
        .with_guessed_format()
        .map_err(|e| DecodeError::from_io(path.to_path_buf(), e))?
        .decode()
        .map_err(image_err(path))?;
    Ok(Decoded::Still(image.into_rgba8()))
}

fn decode_gif(path: &Path) -> Result<Decoded, DecodeError> {
    let decoder = GifDecoder::new(open(path)?).map_err(image_err(path))?;
    collect(path, decoder)
}

fn decode_png(path: &Path) -> Result<Decoded, DecodeError> {
    let decoder = PngDecoder::new(open(path)?).map_err(image_err(path))?;
    if decoder.is_apng().map_err(image_err(path))? {
        let apng = decoder.apng().map_err(image_err(path))?;
        collect(path, apng)
    } else {
        let image = DynamicImage::from_decoder(decoder).map_err(image_err(path))?;
        Ok(Decoded::Still(image.into_rgba8()))
    }
}

fn decode_webp(path: &Path) -> Result<Decoded, DecodeError> {
    let decoder = WebPDecoder::new(open(path)?).map_err(image_err(path))?;
    if decoder.has_animation() {
        collect(path, decoder)
    } else {
        let image = DynamicImage::from_decoder(decoder).map_err(image_err(path))?;
        Ok(Decoded::Still(image.into_rgba8()))
    }
}

fn collect<'a, D: AnimationDecoder<'a>>(path: &Path, decoder: D) -> Result<Decoded, DecodeError> {
    let frames = decoder
        .into_frames()
        .collect_frames()
        .map_err(image_err(path))?;
    Decoded::from_frames(path, frames.into_iter().map(to_animation_frame).collect())
}

fn to_animation_frame(frame: Frame) -> AnimationFrame {
    let (numer, denom) = frame.delay().numer_denom_ms();
    let millis = if denom == 0 { 0 } else { numer / denom };
    AnimationFrame::new(frame.into_buffer(), Duration::from_millis(u64::from(millis)))
}
