// PCM Transcode
// Copyright (c) 2026 The PCM Transcode Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `buffer` module defines the interleaved PCM buffer exchanged with decoders, processing
//! nodes, and outputs.

use std::mem;

use bytemuck::NoUninit;

use crate::errors::{malformed_buffer_error, Result};
use crate::format::SampleFormat;

/// `PcmSpec` describes the characteristics of the signal carried by a buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PcmSpec {
    /// The sampling rate in hertz (Hz).
    pub rate: u32,
    /// The number of channels. Each frame has one sample per channel.
    pub channels: usize,
}

impl PcmSpec {
    pub fn new(rate: u32, channels: usize) -> Self {
        PcmSpec { rate, channels }
    }
}

/// A `PcmBuffer` holds interleaved PCM audio in a single sample format.
///
/// Samples are ordered frame-major, channel-minor: all channels of frame 0, then all channels of
/// frame 1, and so on. The length of the data is always `frames * channels * width` bytes, where
/// `width` is the width of one sample of the sample format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcmBuffer {
    data: Vec<u8>,
    format: SampleFormat,
    spec: PcmSpec,
    frames: usize,
    ts: u64,
}

impl PcmBuffer {
    /// Instantiate a new `PcmBuffer` holding `frames` frames of interleaved samples.
    ///
    /// The data of a buffer in an unknown sample format cannot be checked and is accepted as is.
    pub fn new(
        data: Vec<u8>,
        format: SampleFormat,
        spec: PcmSpec,
        frames: usize,
    ) -> Result<PcmBuffer> {
        if !format.is_unknown() {
            let expected =
                frames.checked_mul(spec.channels).and_then(|n| n.checked_mul(format.width()));

            if expected != Some(data.len()) {
                return malformed_buffer_error("data length does not match frame count");
            }
        }

        Ok(PcmBuffer { data, format, spec, frames, ts: 0 })
    }

    /// Instantiate a new `PcmBuffer` from a slice of interleaved, native byte order, samples.
    ///
    /// The size of `S` must be the width of the sample format. Formats whose byte order differs
    /// from the host's are accepted, and the samples are assumed to already be byte swapped.
    pub fn from_samples<S: NoUninit>(
        samples: &[S],
        format: SampleFormat,
        spec: PcmSpec,
    ) -> Result<PcmBuffer> {
        if format.is_unknown() || mem::size_of::<S>() != format.width() {
            return malformed_buffer_error("sample type does not match sample format");
        }

        if spec.channels == 0 || samples.len() % spec.channels != 0 {
            return malformed_buffer_error("sample count is not a multiple of channel count");
        }

        let frames = samples.len() / spec.channels;
        let data = bytemuck::cast_slice::<S, u8>(samples).to_vec();

        PcmBuffer::new(data, format, spec, frames)
    }

    /// Set the timestamp of the first frame, in frames, of the buffer.
    pub fn with_ts(mut self, ts: u64) -> Self {
        self.ts = ts;
        self
    }

    /// Get the sample format.
    pub fn format(&self) -> SampleFormat {
        self.format
    }

    /// Get the signal specification.
    pub fn spec(&self) -> &PcmSpec {
        &self.spec
    }

    /// Get the number of channels.
    pub fn channels(&self) -> usize {
        self.spec.channels
    }

    /// Get the number of frames.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Get the total number of samples, across all channels.
    pub fn samples(&self) -> usize {
        self.frames * self.spec.channels
    }

    /// Get the timestamp of the first frame.
    pub fn ts(&self) -> u64 {
        self.ts
    }

    /// Get the raw interleaved sample data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the raw interleaved sample data as a mutable slice.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer and return the raw interleaved sample data.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get the bytes of a single sample, or `None` if the frame or channel is out of range.
    pub fn sample(&self, frame: usize, channel: usize) -> Option<&[u8]> {
        if frame >= self.frames || channel >= self.spec.channels {
            return None;
        }

        let width = self.format.width();
        let start = (frame * self.spec.channels + channel) * width;

        self.data.get(start..start + width)
    }

    /// Replace the sample data and sample format. Everything else is preserved.
    pub(crate) fn replace(&mut self, data: Vec<u8>, format: SampleFormat) {
        self.data = data;
        self.format = format;
    }

    /// Replace only the sample format. Used when the data was converted in place.
    pub(crate) fn set_format(&mut self, format: SampleFormat) {
        self.format = format;
    }
}
