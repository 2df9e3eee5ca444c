use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};

use crate::core::VideoConfig;
use crate::video::source::{Frame, FrameSource, VideoError};

/// What ffprobe tells us about the first video stream.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoInfo {
    pub frame_count: usize,
    pub frame_rate: f64,
    pub width: u32,
    pub height: u32,
}

/// Parses `r_frame_rate` style values ("30000/1001", "240").
pub fn parse_frame_rate(text: &str) -> Option<f64> {
    let text = text.trim();
    let fps = if let Some((num, den)) = text.split_once('/') {
        let num: f64 = num.trim().parse().ok()?;
        let den: f64 = den.trim().parse().ok()?;
        if den == 0.0 {
            return None;
        }
        num / den
    } else {
        text.parse().ok()?
    };
    (fps.is_finite() && fps > 0.0).then_some(fps)
}

/// Reads ffprobe's JSON (`-show_streams -show_format`).
pub fn parse_probe(json: &str) -> Result<VideoInfo, VideoError> {
    let info: serde_json::Value =
        serde_json::from_str(json).map_err(|e| VideoError::Probe(format!("invalid ffprobe output: {}", e)))?;

    let empty_vec = vec![];
    let streams = info["streams"].as_array().unwrap_or(&empty_vec);
    let stream = streams
        .iter()
        .find(|s| s["codec_type"].as_str() == Some("video"))
        .ok_or_else(|| VideoError::Probe("no video stream".to_string()))?;

    let frame_rate = stream["r_frame_rate"]
        .as_str()
        .and_then(parse_frame_rate)
        .or_else(|| stream["avg_frame_rate"].as_str().and_then(parse_frame_rate))
        .unwrap_or(30.0)
        .clamp(1.0, 1000.0);

    let width = stream["width"].as_u64().unwrap_or(0) as u32;
    let height = stream["height"].as_u64().unwrap_or(0) as u32;

    let nb_frames = stream["nb_frames"]
        .as_str()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n > 0);

    let duration = stream["duration"]
        .as_str()
        .or_else(|| info["format"]["duration"].as_str())
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d > 0.0);

    let frame_count = nb_frames
        .or_else(|| duration.map(|d| (d * frame_rate).round() as usize))
        .ok_or_else(|| VideoError::Probe("unable to determine frame count".to_string()))?;

    Ok(VideoInfo {
        frame_count,
        frame_rate,
        width,
        height,
    })
}

/// An ffmpeg child writing raw RGB24 frames to its stdout.
struct FrameStream {
    child: Child,
    stdout: ChildStdout,
    next_index: usize,
}

/// Frame source backed by the ffmpeg and ffprobe command line tools.
///
/// Consecutive reads come from one long-lived decoder process; any jump
/// restarts the decoder at the requested frame.
pub struct FfmpegSource {
    path: PathBuf,
    ffmpeg: PathBuf,
    info: VideoInfo,
    render_width: u32,
    render_height: u32,
    stream: Option<FrameStream>,
    is_open: bool,
}

impl FfmpegSource {
    pub fn open(path: &Path, config: &VideoConfig) -> Result<Self, VideoError> {
        if !path.is_file() {
            return Err(VideoError::NotFound(path.display().to_string()));
        }

        let info = Self::probe(path, &config.ffprobe())?;
        if info.frame_count == 0 {
            return Err(VideoError::Open(format!("{} contains no frames", path.display())));
        }

        log::info!(
            "Opened {} ({} frames at {:.2} fps, {}x{})",
            path.display(),
            info.frame_count,
            info.frame_rate,
            info.width,
            info.height
        );

        Ok(Self {
            path: path.to_path_buf(),
            ffmpeg: config.ffmpeg(),
            info,
            render_width: config.render_width.max(1),
            render_height: config.render_height.max(1),
            stream: None,
            is_open: true,
        })
    }

    fn probe(path: &Path, ffprobe: &Path) -> Result<VideoInfo, VideoError> {
        let output = Command::new(ffprobe)
            .arg("-v").arg("quiet")
            .arg("-print_format").arg("json")
            .arg("-show_format")
            .arg("-show_streams")
            .arg("-select_streams").arg("v:0")
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| VideoError::Open(format!("failed to run {}: {}", ffprobe.display(), e)))?;

        if !output.status.success() {
            return Err(VideoError::Open(format!("ffprobe could not read {}", path.display())));
        }

        let json_str = String::from_utf8_lossy(&output.stdout);
        parse_probe(&json_str)
    }

    fn spawn_stream(&self, index: usize) -> Result<FrameStream, VideoError> {
        // Seek half a frame early so rounding never skips the target frame.
        let start = (index as f64 - 0.5).max(0.0) / self.info.frame_rate;

        let mut cmd = Command::new(&self.ffmpeg);
        cmd.arg("-ss").arg(format!("{:.6}", start));
        cmd.arg("-i").arg(&self.path);
        cmd.arg("-map").arg("0:v:0");
        cmd.arg("-f").arg("rawvideo");
        cmd.arg("-pix_fmt").arg("rgb24");
        cmd.arg("-s").arg(format!("{}x{}", self.render_width, self.render_height));
        cmd.arg("-loglevel").arg("error");
        cmd.arg("-nostdin");
        cmd.arg("pipe:1");
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::null());

        let mut child = cmd.spawn().map_err(|e| VideoError::Decode {
            index,
            reason: format!("failed to spawn FFmpeg: {}", e),
        })?;

        let stdout = match child.stdout.take() {
            Some(stdout) => stdout,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(VideoError::Decode {
                    index,
                    reason: "FFmpeg stdout unavailable".to_string(),
                });
            }
        };

        log::debug!("Started FFmpeg decoder at frame {} ({:.3}s)", index, start);
        Ok(FrameStream {
            child,
            stdout,
            next_index: index,
        })
    }

    fn kill_stream(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            let _ = stream.child.kill();
            let _ = stream.child.wait();
            log::debug!("Stopped FFmpeg decoder");
        }
    }
}

impl FrameSource for FfmpegSource {
    fn is_open(&self) -> bool {
        self.is_open
    }

    fn frame_count(&self) -> usize {
        self.info.frame_count
    }

    fn read_frame(&mut self, index: usize) -> Result<Frame, VideoError> {
        if !self.is_open {
            return Err(VideoError::Closed);
        }
        if index >= self.info.frame_count {
            return Err(VideoError::Decode {
                index,
                reason: format!("past last frame {}", self.info.frame_count - 1),
            });
        }

        let sequential = self.stream.as_ref().map_or(false, |s| s.next_index == index);
        if !sequential {
            self.kill_stream();
            self.stream = Some(self.spawn_stream(index)?);
        }

        let frame_size = (self.render_width * self.render_height * 3) as usize;
        let mut buffer = vec![0u8; frame_size];

        let read = match self.stream.as_mut() {
            Some(stream) => {
                let read = stream.stdout.read_exact(&mut buffer);
                if read.is_ok() {
                    stream.next_index += 1;
                }
                read
            }
            None => return Err(VideoError::Closed),
        };

        if let Err(e) = read {
            self.kill_stream();
            return Err(VideoError::Decode {
                index,
                reason: e.to_string(),
            });
        }

        Frame::from_rgb24(self.render_width, self.render_height, buffer).ok_or_else(|| VideoError::Decode {
            index,
            reason: "unexpected frame size".to_string(),
        })
    }

    fn release(&mut self) {
        if self.is_open {
            log::info!("Releasing video {}", self.path.display());
        }
        self.kill_stream();
        self.is_open = false;
    }
}

impl Drop for FfmpegSource {
    fn drop(&mut self) {
        self.release();
    }
}
