// PCM Transcode
// Copyright (c) 2026 The PCM Transcode Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `processor` module provides a processing node that converts every buffer passing through a
//! processing chain to one configured sample format.

use std::sync::Arc;

use log::{debug, warn};

use crate::buffer::PcmBuffer;
use crate::convert::{ConversionOutcome, Converter};
use crate::errors::Result;
use crate::format::SampleFormat;

/// `FormatConverterOptions` is the persistent configuration of a `FormatConverter`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FormatConverterOptions {
    /// The sample format every buffer is converted to. If unknown, buffers pass through unchanged.
    pub target: SampleFormat,
}

impl FormatConverterOptions {
    /// The configuration key the target format code is stored under.
    pub const TARGET_KEY: &'static str = "to";

    /// Restore the options from a persisted target format code.
    pub fn from_code(code: i64) -> Result<Self> {
        Ok(FormatConverterOptions { target: SampleFormat::from_code(code)? })
    }

    /// Get the target format code to persist.
    pub fn to_code(&self) -> i64 {
        self.target.to_code()
    }
}

/// A `FormatConverter` is a processing node that converts buffers to a target sample format.
///
/// Buffers are never dropped by the node. A buffer that cannot be converted continues through the
/// chain in its original format, and the rest of the chain decides what to do with it.
pub struct FormatConverter {
    converter: Arc<Converter>,
    opts: FormatConverterOptions,
    /// Bitmask, by format code, of source formats a warning was already logged for.
    warned: u32,
    converted: u64,
}

impl FormatConverter {
    /// Instantiate a new `FormatConverter` that shares `converter` with other nodes.
    pub fn new(converter: Arc<Converter>, opts: &FormatConverterOptions) -> Self {
        debug!("format converter target is {}", opts.target);
        FormatConverter { converter, opts: *opts, warned: 0, converted: 0 }
    }

    /// Get the current options, for example to persist them.
    pub fn options(&self) -> &FormatConverterOptions {
        &self.opts
    }

    /// Get the target sample format.
    pub fn target(&self) -> SampleFormat {
        self.opts.target
    }

    /// Change the target sample format.
    pub fn set_target(&mut self, target: SampleFormat) {
        if target != self.opts.target {
            debug!("format converter target changed from {} to {}", self.opts.target, target);
            self.opts.target = target;
            self.warned = 0;
        }
    }

    /// Get the number of buffers converted so far.
    pub fn converted(&self) -> u64 {
        self.converted
    }

    /// Convert a buffer to the target sample format.
    pub fn process(&mut self, buf: &mut PcmBuffer) -> ConversionOutcome {
        let source = buf.format();
        let outcome = self.converter.convert(buf, self.opts.target);

        match outcome {
            ConversionOutcome::Converted => self.converted += 1,
            ConversionOutcome::Identity => (),
            // An unknown target means the node was never configured, and passes everything.
            ConversionOutcome::Unsupported if self.opts.target.is_unknown() => (),
            ConversionOutcome::Unsupported => {
                let bit = 1 << source.to_code();

                if self.warned & bit == 0 {
                    warn!(
                        "cannot convert {} buffers to {}, passing them on",
                        source, self.opts.target
                    );
                    self.warned |= bit;
                }
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PcmSpec;
    use crate::errors::Error;

    fn node(target: SampleFormat) -> FormatConverter {
        FormatConverter::new(Arc::new(Converter::default()), &FormatConverterOptions { target })
    }

    #[test]
    fn verify_options_persistence() {
        let opts = FormatConverterOptions::default();
        assert_eq!(opts.target, SampleFormat::Unknown);
        assert_eq!(opts.to_code(), 0);

        let opts = FormatConverterOptions::from_code(5).unwrap();
        assert_eq!(opts.target, SampleFormat::S16LE);
        assert_eq!(opts.to_code(), 5);

        assert_eq!(FormatConverterOptions::from_code(99), Err(Error::InvalidFormatCode(99)));
    }

    #[test]
    fn verify_process() {
        let mut node = node(SampleFormat::S16LE);
        let spec = PcmSpec::new(44_100, 2);

        let mut buf = PcmBuffer::new(vec![0x80; 4], SampleFormat::U8, spec, 2).unwrap();
        assert_eq!(node.process(&mut buf), ConversionOutcome::Converted);
        assert_eq!(buf.format(), SampleFormat::S16LE);
        assert_eq!(buf.data(), &[0; 8]);

        // Already in the target format.
        assert_eq!(node.process(&mut buf), ConversionOutcome::Identity);
        assert_eq!(node.converted(), 1);

        let mut buf = PcmBuffer::new(vec![1, 2, 3], SampleFormat::Unknown, spec, 1).unwrap();
        assert_eq!(node.process(&mut buf), ConversionOutcome::Unsupported);
        assert_eq!(buf.data(), &[1, 2, 3]);
        assert_eq!(node.converted(), 1);
    }

    #[test]
    fn verify_unconfigured_passes_through() {
        let mut node = node(SampleFormat::Unknown);
        let spec = PcmSpec::new(44_100, 1);

        let mut buf = PcmBuffer::new(vec![0x12, 0x34], SampleFormat::S16BE, spec, 1).unwrap();
        assert_eq!(node.process(&mut buf), ConversionOutcome::Unsupported);
        assert_eq!(buf.format(), SampleFormat::S16BE);
        assert_eq!(buf.data(), &[0x12, 0x34]);

        node.set_target(SampleFormat::S16LE);
        assert_eq!(node.options().to_code(), 5);
        assert_eq!(node.process(&mut buf), ConversionOutcome::Converted);
        assert_eq!(buf.data(), &[0x34, 0x12]);
    }
}
