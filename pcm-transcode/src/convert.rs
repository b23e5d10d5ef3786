// PCM Transcode
// Copyright (c) 2026 The PCM Transcode Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `convert` module applies conversion pipelines to whole buffers.

use log::debug;

use crate::buffer::PcmBuffer;
use crate::cache::{ConversionCache, ConversionKey};
use crate::errors::{unsupported_error, Result};
use crate::format::SampleFormat;
use crate::pipeline::Pipeline;
use crate::sample::Word;

/// The result of a conversion.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// The buffer was converted to the target format.
    Converted,
    /// The buffer was already in the target format and is unchanged.
    Identity,
    /// The source or target format is unknown. The buffer is unchanged.
    Unsupported,
}

impl ConversionOutcome {
    /// Returns true if the buffer is in the target format after the conversion.
    pub fn is_ok(&self) -> bool {
        matches!(self, ConversionOutcome::Converted | ConversionOutcome::Identity)
    }

    /// Turn an unsupported conversion into an error.
    pub fn into_result(self) -> Result<ConversionOutcome> {
        match self {
            ConversionOutcome::Unsupported => unsupported_error("unknown sample format"),
            outcome => Ok(outcome),
        }
    }
}

/// `ConverterOptions` is the set of options a `Converter` is created with.
#[derive(Copy, Clone, Debug, Default)]
pub struct ConverterOptions {
    /// Build every conversion pipeline when the converter is created, instead of on first use.
    pub warm: bool,
}

/// A `Converter` converts `PcmBuffer`s from one sample format to another.
///
/// The converter owns a [`ConversionCache`] and never changes after a pipeline is built, so a
/// single converter may be shared by every thread that converts audio.
pub struct Converter {
    cache: ConversionCache,
}

impl Converter {
    /// Instantiate a new `Converter`.
    pub fn new(opts: &ConverterOptions) -> Self {
        let cache = if opts.warm { ConversionCache::warmed() } else { ConversionCache::new() };
        Converter { cache }
    }

    /// Get the conversion cache.
    pub fn cache(&self) -> &ConversionCache {
        &self.cache
    }

    /// Convert the buffer to the `target` sample format.
    ///
    /// Only the sample data and sample format of the buffer change. The frame count, channel
    /// count, sample rate, and timestamp are preserved. Lossy conversions are not errors: narrowed
    /// samples are truncated, and out-of-range float samples wrap.
    pub fn convert(&self, buf: &mut PcmBuffer, target: SampleFormat) -> ConversionOutcome {
        let source = buf.format();

        if source == target {
            return ConversionOutcome::Identity;
        }

        let pipeline = match self.cache.get(ConversionKey::new(source, target)) {
            Some(pipeline) => pipeline,
            None => {
                debug!("unsupported sample format conversion {} -> {}", source, target);
                return ConversionOutcome::Unsupported;
            }
        };

        if pipeline.changes_width() {
            // The converted samples do not fit in the same space, so write them to a new buffer.
            let mut data = vec![0; buf.samples() * target.width()];
            convert_into(pipeline, buf.data(), &mut data);
            buf.replace(data, target);
        }
        else {
            convert_in_place(pipeline, buf.data_mut());
            buf.set_format(target);
        }

        ConversionOutcome::Converted
    }

    /// Convert the buffer to the `target` sample format, taking and returning ownership of the
    /// buffer.
    pub fn convert_owned(
        &self,
        mut buf: PcmBuffer,
        target: SampleFormat,
    ) -> (PcmBuffer, ConversionOutcome) {
        let outcome = self.convert(&mut buf, target);
        (buf, outcome)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Converter::new(&Default::default())
    }
}

/// Convert every sample in `data` in-place. The pipeline must not change the sample width.
fn convert_in_place(pipeline: &Pipeline, data: &mut [u8]) {
    let width = pipeline.source().width();

    for sample in data.chunks_exact_mut(width) {
        pipeline.run(Word::from_bytes(sample)).write_to(sample);
    }
}

/// Convert every sample in `src` and write them to `dst`.
fn convert_into(pipeline: &Pipeline, src: &[u8], dst: &mut [u8]) {
    let src_width = pipeline.source().width();
    let dst_width = pipeline.target().width();

    for (s, d) in src.chunks_exact(src_width).zip(dst.chunks_exact_mut(dst_width)) {
        pipeline.run(Word::from_bytes(s)).write_to(d);
    }
}
