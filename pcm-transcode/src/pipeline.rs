// PCM Transcode
// Copyright (c) 2026 The PCM Transcode Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `pipeline` module derives the sequence of primitive transforms that converts a sample from
//! one sample format to another.

use smallvec::SmallVec;

use crate::conv;
use crate::format::{SampleFormat, SampleKind};
use crate::sample::Word;

/// The most transforms any pipeline needs: a byte swap in, a scale or rescale, a sign flip, and a
/// byte swap out.
const MAX_TRANSFORMS: usize = 4;

/// A single primitive transform with its operand widths.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transform {
    /// Reverse the byte order of a `width` byte sample.
    EndianSwap { width: usize },
    /// Toggle the sign bit of a `width` byte integer sample.
    SignFlip { width: usize },
    /// Widen or narrow an integer sample.
    WidthRescale { from: usize, to: usize },
    /// Scale a `width` byte signed integer sample to a float sample.
    IntToFloat { width: usize },
    /// Scale a float sample to a `width` byte signed integer sample.
    FloatToInt { width: usize },
}

impl Transform {
    /// Apply the transform to a sample.
    #[inline(always)]
    pub fn apply(self, word: Word) -> Word {
        match self {
            Transform::EndianSwap { width } => {
                debug_assert!(word.width() == width);
                conv::endian_swap(word)
            }
            Transform::SignFlip { width } => {
                debug_assert!(word.width() == width);
                conv::sign_flip(word)
            }
            Transform::WidthRescale { from, to } => {
                debug_assert!(word.width() == from);
                conv::width_rescale(word, to)
            }
            Transform::IntToFloat { width } => {
                debug_assert!(word.width() == width);
                conv::int_to_float(word)
            }
            Transform::FloatToInt { width } => conv::float_to_int(word, width),
        }
    }

    /// Get the width of the sample the transform produces.
    pub fn output_width(&self) -> usize {
        match *self {
            Transform::EndianSwap { width } => width,
            Transform::SignFlip { width } => width,
            Transform::WidthRescale { to, .. } => to,
            Transform::IntToFloat { .. } => 4,
            Transform::FloatToInt { width } => width,
        }
    }
}

/// A `Pipeline` is the ordered list of transforms that converts one sample of the source format
/// into one sample of the target format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pipeline {
    source: SampleFormat,
    target: SampleFormat,
    transforms: SmallVec<[Transform; MAX_TRANSFORMS]>,
}

impl Pipeline {
    /// Build the pipeline for converting samples from `source` to `target`.
    ///
    /// Returns `None` if the formats are the same, or if either is unknown, since there is nothing
    /// to convert.
    ///
    /// Samples are always brought into native byte order before any arithmetic is done on them,
    /// and only put into the target byte order once all other transforms are done.
    pub fn build(source: SampleFormat, target: SampleFormat) -> Option<Pipeline> {
        if source == target {
            return None;
        }

        let source_kind = source.kind()?;
        let target_kind = target.kind()?;

        let mut transforms = SmallVec::new();

        // 1. To native byte order.
        if source.is_foreign_endian() {
            transforms.push(Transform::EndianSwap { width: source.width() });
        }

        match (source_kind, target_kind) {
            // 2. Scale between integer and float. Scaling is always done on a signed integer.
            (SampleKind::Int, SampleKind::Float) => {
                if !source.is_signed() {
                    transforms.push(Transform::SignFlip { width: source.width() });
                }
                transforms.push(Transform::IntToFloat { width: source.width() });
            }
            (SampleKind::Float, SampleKind::Int) => {
                transforms.push(Transform::FloatToInt { width: target.width() });
                if !target.is_signed() {
                    transforms.push(Transform::SignFlip { width: target.width() });
                }
            }
            (SampleKind::Int, SampleKind::Int) => {
                // 3. Rescale the integer width.
                if source.width() != target.width() {
                    transforms.push(Transform::WidthRescale {
                        from: source.width(),
                        to: target.width(),
                    });
                }
                // 4. Change the signedness.
                if source.is_signed() != target.is_signed() {
                    transforms.push(Transform::SignFlip { width: target.width() });
                }
            }
            (SampleKind::Float, SampleKind::Float) => (),
        }

        // 5. To the target byte order.
        if target.is_foreign_endian() {
            transforms.push(Transform::EndianSwap { width: target.width() });
        }

        Some(Pipeline { source, target, transforms })
    }

    /// Get the source sample format.
    pub fn source(&self) -> SampleFormat {
        self.source
    }

    /// Get the target sample format.
    pub fn target(&self) -> SampleFormat {
        self.target
    }

    /// Get the transforms, in the order they are applied.
    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    /// Returns true if a converted sample has a different width than the source sample.
    pub fn changes_width(&self) -> bool {
        self.source.width() != self.target.width()
    }

    /// Convert a single sample.
    #[inline(always)]
    pub fn run(&self, word: Word) -> Word {
        self.transforms.iter().fold(word, |word, transform| transform.apply(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Endianness;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn convert(source: SampleFormat, target: SampleFormat, bytes: &[u8]) -> Vec<u8> {
        let pipeline = Pipeline::build(source, target).unwrap();
        pipeline.run(Word::from_bytes(bytes)).as_bytes().to_vec()
    }

    /// An independent model of a sample's meaning: integers are left-aligned in a signed 32-bit
    /// value, floats are kept as is.
    #[derive(Copy, Clone, Debug)]
    enum Value {
        Int(i32),
        Float(f32),
    }

    fn read_model(format: SampleFormat, bytes: &[u8]) -> Value {
        let mut be = [0u8; 4];
        let width = format.width();

        match format.endianness() {
            Some(Endianness::Little) => {
                for (i, b) in bytes.iter().enumerate() {
                    be[width - 1 - i] = *b;
                }
            }
            _ => be[..width].copy_from_slice(bytes),
        }

        if format.kind() == Some(SampleKind::Float) {
            return Value::Float(f32::from_be_bytes(be));
        }

        let raw = u32::from_be_bytes(be);
        let raw = if format.is_signed() { raw } else { raw ^ 0x8000_0000 };
        Value::Int(raw as i32)
    }

    fn write_model(format: SampleFormat, value: Value) -> Vec<u8> {
        let width = format.width();

        let be = match value {
            Value::Float(v) => v.to_be_bytes(),
            Value::Int(v) => {
                let raw = if format.is_signed() { v as u32 } else { v as u32 ^ 0x8000_0000 };
                raw.to_be_bytes()
            }
        };

        let mut out = be[..width].to_vec();

        if format.endianness() == Some(Endianness::Little) {
            out.reverse();
        }
        out
    }

    fn convert_model(source: SampleFormat, target: SampleFormat, bytes: &[u8]) -> Vec<u8> {
        let value = match (read_model(source, bytes), target.kind().unwrap()) {
            (Value::Int(v), SampleKind::Float) => {
                // Shift back down to the native scale of the source.
                let bits = if source.width() <= 2 { 8 * source.width() as u32 } else { 32 };
                let native = v >> (32 - bits);
                Value::Float(native as f32 / (1u64 << (bits - 1)) as f32)
            }
            (Value::Float(v), SampleKind::Int) => {
                let bits = if target.width() <= 2 { 8 * target.width() as u32 } else { 32 };
                let max = ((1u64 << (bits - 1)) - 1) as f64;
                let native = (f64::from(v) * max) as i64 as u32;
                Value::Int(native.wrapping_shl(32 - bits) as i32)
            }
            (Value::Int(v), SampleKind::Int) => {
                // Truncate the low-order bytes the target cannot hold.
                let keep = 8 * target.width() as u32;
                Value::Int(((v as u32) >> (32 - keep) << (32 - keep)) as i32)
            }
            (value, SampleKind::Float) => value,
        };

        write_model(target, value)
    }

    #[test]
    fn verify_identity_and_unknown() {
        for format in SampleFormat::ALL {
            assert!(Pipeline::build(format, format).is_none());
            assert!(Pipeline::build(format, SampleFormat::Unknown).is_none());
            assert!(Pipeline::build(SampleFormat::Unknown, format).is_none());
        }
        assert!(Pipeline::build(SampleFormat::Unknown, SampleFormat::Unknown).is_none());
    }

    #[test]
    fn verify_all_pairs_build() {
        let mut count = 0;

        for source in SampleFormat::ALL {
            for target in SampleFormat::ALL {
                if source == target {
                    continue;
                }

                let pipeline = Pipeline::build(source, target).unwrap();
                assert!(!pipeline.transforms().is_empty());
                assert!(pipeline.transforms().len() <= MAX_TRANSFORMS);
                assert_eq!(pipeline.transforms().last().unwrap().output_width(), target.width());
                assert_eq!(pipeline.changes_width(), source.width() != target.width());

                count += 1;
            }
        }

        assert_eq!(count, 240);
    }

    #[test]
    fn verify_transform_order() {
        let pipeline = Pipeline::build(SampleFormat::U16BE, SampleFormat::S32BE).unwrap();
        let rescale = Transform::WidthRescale { from: 2, to: 4 };
        let flip = Transform::SignFlip { width: 4 };

        if cfg!(target_endian = "little") {
            let expected = [
                Transform::EndianSwap { width: 2 },
                rescale,
                flip,
                Transform::EndianSwap { width: 4 },
            ];
            assert_eq!(pipeline.transforms(), &expected);
        }
        else {
            assert_eq!(pipeline.transforms(), &[rescale, flip]);
        }

        let pipeline = Pipeline::build(SampleFormat::U8, SampleFormat::F32LE).unwrap();
        let scale = [Transform::SignFlip { width: 1 }, Transform::IntToFloat { width: 1 }];

        if cfg!(target_endian = "little") {
            assert_eq!(pipeline.transforms(), &scale);
        }
        else {
            assert_eq!(&pipeline.transforms()[..2], &scale);
            assert_eq!(pipeline.transforms()[2], Transform::EndianSwap { width: 4 });
        }
    }

    #[test]
    fn verify_known_vectors() {
        use SampleFormat::*;

        // Signed to unsigned at the same width.
        assert_eq!(convert(S8, U8, &[0x00]), [0x80]);
        assert_eq!(convert(U8, S8, &[0xff]), [0x7f]);
        assert_eq!(convert(S16LE, U16BE, &[0x34, 0x12]), [0x92, 0x34]);

        // Widening zero-fills.
        assert_eq!(convert(S8, S16LE, &[0x7f]), [0x00, 0x7f]);
        assert_eq!(convert(U8, S32LE, &[0x80]), [0x00, 0x00, 0x00, 0x00]);
        assert_eq!(convert(S16BE, S24LE, &[0x12, 0x34]), [0x00, 0x34, 0x12]);
        assert_eq!(convert(S24BE, S32LE, &[0x12, 0x34, 0x56]), [0x00, 0x56, 0x34, 0x12]);

        // Narrowing truncates.
        assert_eq!(convert(S32LE, S16LE, &[0xff, 0xff, 0x34, 0x12]), [0x34, 0x12]);
        assert_eq!(convert(S32LE, S24BE, &[0xff, 0x56, 0x34, 0x12]), [0x12, 0x34, 0x56]);
        assert_eq!(convert(U16LE, S8, &[0xff, 0x80]), [0x00]);

        // Integer to float.
        assert_eq!(convert(S16LE, F32LE, &[0x00, 0x40]), 0.5f32.to_le_bytes());
        assert_eq!(convert(U8, F32BE, &[0x00]), (-1.0f32).to_be_bytes());
        assert_eq!(convert(S24LE, F32LE, &[0x00, 0x00, 0xc0]), (-0.5f32).to_le_bytes());

        // Float to integer.
        assert_eq!(convert(F32LE, S16LE, &1.0f32.to_le_bytes()), [0xff, 0x7f]);
        assert_eq!(convert(F32LE, S16LE, &0.5f32.to_le_bytes()), [0xff, 0x3f]);
        assert_eq!(convert(F32BE, U8, &0.0f32.to_be_bytes()), [0x80]);
        assert_eq!(convert(F32LE, S24LE, &1.0f32.to_le_bytes()), [0xff, 0xff, 0x7f]);
        assert_eq!(convert(F32LE, U32BE, &(-1.0f32).to_le_bytes()), [0x00, 0x00, 0x00, 0x01]);

        // Float byte order.
        assert_eq!(convert(F32LE, F32BE, &[0x01, 0x02, 0x03, 0x04]), [0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn verify_against_model() {
        let mut rng = SmallRng::seed_from_u64(0x5eed_0004);

        for source in SampleFormat::ALL {
            for target in SampleFormat::ALL {
                if source == target {
                    continue;
                }

                for _ in 0..256 {
                    let mut bytes = [0u8; 4];

                    if source.kind() == Some(SampleKind::Float) {
                        // Keep floats finite, and mostly within the nominal range.
                        let v = rng.random_range(-1.25f32..1.25f32);
                        bytes = match source.endianness() {
                            Some(Endianness::Little) => v.to_le_bytes(),
                            _ => v.to_be_bytes(),
                        };
                    }
                    else {
                        rng.fill(&mut bytes[..]);
                    }

                    let input = &bytes[..source.width()];

                    assert_eq!(
                        convert(source, target, input),
                        convert_model(source, target, input),
                        "{} -> {} for {:02x?}",
                        source,
                        target,
                        input
                    );
                }
            }
        }
    }
}
