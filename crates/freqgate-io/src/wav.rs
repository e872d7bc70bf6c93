//! WAV file reading and writing.

use crate::{Error, Result, StereoSamples};
use hound::{SampleFormat, WavReader, WavWriter};
use std::io::Read;
use std::path::Path;

/// Bit depths accepted by [`write_wav_stereo`]. 32-bit is written as float.
pub const SUPPORTED_BIT_DEPTHS: [u16; 3] = [16, 24, 32];

/// WAV file metadata.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavInfo {
    /// Number of channels in the file.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Whether samples are IEEE float.
    pub float: bool,
    /// Samples per channel.
    pub num_frames: u64,
}

impl WavInfo {
    fn from_reader<R: Read>(reader: &WavReader<R>) -> Self {
        let spec = reader.spec();
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            float: spec.sample_format == SampleFormat::Float,
            num_frames: u64::from(reader.duration()),
        }
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            0.0
        } else {
            self.num_frames as f64 / f64::from(self.sample_rate)
        }
    }
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    Ok(WavInfo::from_reader(&reader))
}

/// Read a WAV file as stereo `f32` samples in `[-1, 1]`.
///
/// Mono files are duplicated to both channels; files with more than two
/// channels use the first two.
pub fn read_wav_stereo<P: AsRef<Path>>(path: P) -> Result<(StereoSamples, WavInfo)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let info = WavInfo::from_reader(&reader);

    let interleaved: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let scale = int_scale(info.bits_per_sample);
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    tracing::debug!(
        path = %path.display(),
        channels = info.channels,
        sample_rate = info.sample_rate,
        bits = info.bits_per_sample,
        frames = info.num_frames,
        "read wav"
    );

    Ok((
        StereoSamples::from_interleaved(&interleaved, usize::from(info.channels)),
        info,
    ))
}

/// Write stereo samples to a WAV file at 16, 24 or 32 (float) bits.
///
/// Integer output is clamped to full scale.
pub fn write_wav_stereo<P: AsRef<Path>>(
    path: P,
    samples: &StereoSamples,
    sample_rate: u32,
    bits_per_sample: u16,
) -> Result<()> {
    if !SUPPORTED_BIT_DEPTHS.contains(&bits_per_sample) {
        return Err(Error::UnsupportedBitDepth(bits_per_sample));
    }
    let path = path.as_ref();
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample,
        sample_format: if bits_per_sample == 32 {
            SampleFormat::Float
        } else {
            SampleFormat::Int
        },
    };
    let mut writer = WavWriter::create(path, spec)?;

    let frames = samples.left.iter().zip(samples.right.iter());
    if bits_per_sample == 32 {
        for (&l, &r) in frames {
            writer.write_sample(l)?;
            writer.write_sample(r)?;
        }
    } else {
        let scale = int_scale(bits_per_sample);
        let quantize = |x: f32| (x * scale).round().clamp(-scale, scale - 1.0) as i32;
        for (&l, &r) in frames {
            writer.write_sample(quantize(l))?;
            writer.write_sample(quantize(r))?;
        }
    }

    writer.finalize()?;
    tracing::debug!(
        path = %path.display(),
        frames = samples.len(),
        bits = bits_per_sample,
        "wrote wav"
    );
    Ok(())
}

fn int_scale(bits: u16) -> f32 {
    (1_i64 << (bits.clamp(1, 32) - 1)) as f32
}
