use image::{DynamicImage, RgbImage, RgbaImage};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VideoError {
    #[error("video file not found: {0}")]
    NotFound(String),

    #[error("failed to probe video: {0}")]
    Probe(String),

    #[error("cannot open video: {0}")]
    Open(String),

    #[error("failed to decode frame {index}: {reason}")]
    Decode { index: usize, reason: String },

    #[error("video capture is not open")]
    Closed,
}

/// One decoded frame, already scaled to the render size.
#[derive(Debug, Clone)]
pub struct Frame {
    image: RgbaImage,
}

impl Frame {
    /// Wraps a packed RGB24 buffer. `None` if the buffer size does not match.
    pub fn from_rgb24(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        let rgb = RgbImage::from_raw(width, height, data)?;
        Some(Self {
            image: DynamicImage::ImageRgb8(rgb).to_rgba8(),
        })
    }

    pub fn size(&self) -> [usize; 2] {
        [self.image.width() as usize, self.image.height() as usize]
    }

    pub fn rgba(&self) -> &[u8] {
        self.image.as_raw()
    }
}

/// Random-access frame decoder owned by the playback controller.
pub trait FrameSource {
    fn is_open(&self) -> bool;

    fn frame_count(&self) -> usize;

    /// Decodes frame `index`. Reading `index + 1` next should be cheap.
    fn read_frame(&mut self, index: usize) -> Result<Frame, VideoError>;

    /// Frees the decoder. Safe to call more than once.
    fn release(&mut self);
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_from_rgb24_expands_to_rgba() {
        let frame = Frame::from_rgb24(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(frame.size(), [2, 1]);
        assert_eq!(frame.rgba(), &[1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn test_frame_rejects_short_buffer() {
        assert!(Frame::from_rgb24(2, 2, vec![0; 5]).is_none());
    }
}
