// PCM Transcode
// Copyright (c) 2026 The PCM Transcode Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]
// The following lints are allowed in all PCM Transcode crates. Please see the workspace
// Cargo.toml for their justification.
#![allow(clippy::identity_op)]
#![allow(clippy::manual_range_contains)]

//! # PCM Transcode
//!
//! PCM Transcode converts interleaved PCM audio between sample formats: 8, 16, 24, and 32-bit
//! integers, signed or unsigned, little or big-endian, and 32-bit floating point.
//!
//! Only the encoding of the samples changes. There is no resampling, remixing, dithering, or
//! clipping, and the channel and frame counts of a buffer are never touched.
//!
//! # Usage
//!
//! A [`Converter`] is created once and shared by everything that converts audio. Each call to
//! [`Converter::convert`] converts one [`PcmBuffer`] to a target [`SampleFormat`] and returns a
//! [`ConversionOutcome`].
//!
//! Internally, the conversion between any two sample formats is a short pipeline of primitive
//! transforms ([`conv`]) derived by [`pipeline::Pipeline::build`], and memoized in a
//! [`cache::ConversionCache`].

pub mod buffer;
pub mod cache;
pub mod conv;
pub mod convert;
pub mod errors;
pub mod format;
pub mod pipeline;
pub mod processor;
pub mod sample;
pub mod util;

pub use crate::buffer::{PcmBuffer, PcmSpec};
pub use crate::convert::{ConversionOutcome, Converter, ConverterOptions};
pub use crate::format::{Endianness, SampleFormat, SampleKind};
