//! The fixed compression profile.
//!
//! Every job is transcoded to the same target: 1280x720, ~1.17 Mbps H.264
//! video at 25 fps with the `fast` preset, and ~48 kbps AAC audio.

use serde::Serialize;

pub const TARGET_WIDTH: u32 = 1280;
pub const TARGET_HEIGHT: u32 = 720;
/// Video bitrate in bits per second.
pub const TARGET_VIDEO_BITRATE: u32 = 1_167_824;
/// Audio bitrate in bits per second.
pub const TARGET_AUDIO_BITRATE: u32 = 48_023;
pub const TARGET_FRAME_RATE: u32 = 25;

/// Transcoding parameters passed to ffmpeg between the input and output paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompressionProfile {
    pub width: u32,
    pub height: u32,
    pub video_bitrate: u32,
    pub audio_bitrate: u32,
    pub frame_rate: u32,
    pub video_codec: &'static str,
    pub preset: &'static str,
    pub audio_codec: &'static str,
    pub audio_quality: u8,
}

impl Default for CompressionProfile {
    fn default() -> Self {
        Self {
            width: TARGET_WIDTH,
            height: TARGET_HEIGHT,
            video_bitrate: TARGET_VIDEO_BITRATE,
            audio_bitrate: TARGET_AUDIO_BITRATE,
            frame_rate: TARGET_FRAME_RATE,
            video_codec: "libx264",
            preset: "fast",
            audio_codec: "aac",
            audio_quality: 2,
        }
    }
}

impl CompressionProfile {
    /// Renders the profile as ffmpeg arguments, in the order ffmpeg expects
    /// them after `-i <input>`.
    pub fn to_args(&self) -> Vec<String> {
        vec![
            "-vf".to_string(),
            format!("scale={}:{}", self.width, self.height),
            "-b:v".to_string(),
            self.video_bitrate.to_string(),
            "-b:a".to_string(),
            self.audio_bitrate.to_string(),
            "-r".to_string(),
            self.frame_rate.to_string(),
            "-c:v".to_string(),
            self.video_codec.to_string(),
            "-preset".to_string(),
            self.preset.to_string(),
            "-c:a".to_string(),
            self.audio_codec.to_string(),
            "-q:a".to_string(),
            self.audio_quality.to_string(),
        ]
    }
}
