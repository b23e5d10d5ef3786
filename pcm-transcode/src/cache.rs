// PCM Transcode
// Copyright (c) 2026 The PCM Transcode Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `cache` module memoizes conversion pipelines for each ordered pair of sample formats.

use log::trace;
use once_cell::sync::OnceCell;

use crate::format::SampleFormat;
use crate::pipeline::Pipeline;

const NUM_SLOTS: usize = SampleFormat::COUNT * SampleFormat::COUNT;

/// A `ConversionKey` is an ordered pair of source and target sample formats.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConversionKey {
    pub source: SampleFormat,
    pub target: SampleFormat,
}

impl ConversionKey {
    pub fn new(source: SampleFormat, target: SampleFormat) -> Self {
        ConversionKey { source, target }
    }

    /// Returns true if converting between the pair does nothing, either because the formats are
    /// the same, or because one of them is unknown.
    pub fn is_noop(&self) -> bool {
        self.source == self.target || self.source.is_unknown() || self.target.is_unknown()
    }

    fn slot(&self) -> Option<usize> {
        if self.is_noop() {
            return None;
        }
        Some(self.source.index()? * SampleFormat::COUNT + self.target.index()?)
    }
}

/// A `ConversionCache` maps each [`ConversionKey`] to the [`Pipeline`] that performs the
/// conversion.
///
/// Pipelines are built on first use, or all at once with [`ConversionCache::warm`]. A slot is
/// filled at most once and never changes afterwards, so lookups of a built pipeline are lock-free
/// and the cache may be shared between threads.
pub struct ConversionCache {
    slots: Box<[OnceCell<Option<Pipeline>>]>,
}

impl ConversionCache {
    /// Instantiate a new, cold, `ConversionCache`.
    pub fn new() -> Self {
        ConversionCache { slots: (0..NUM_SLOTS).map(|_| OnceCell::new()).collect() }
    }

    /// Instantiate a new `ConversionCache` with every pipeline already built.
    pub fn warmed() -> Self {
        let cache = ConversionCache::new();
        cache.warm();
        cache
    }

    /// Build the pipeline for every ordered pair of distinct, known, sample formats.
    pub fn warm(&self) {
        for source in SampleFormat::ALL {
            for target in SampleFormat::ALL {
                let _ = self.get(ConversionKey::new(source, target));
            }
        }
    }

    /// Get the pipeline for a conversion, building it if it has not been used before.
    ///
    /// Returns `None`, without touching the cache, if the conversion is a no-op.
    pub fn get(&self, key: ConversionKey) -> Option<&Pipeline> {
        let slot = key.slot()?;

        self.slots[slot]
            .get_or_init(|| {
                trace!("building pipeline for {} -> {}", key.source, key.target);
                Pipeline::build(key.source, key.target)
            })
            .as_ref()
    }

    /// Get the pipeline for a conversion only if it has already been built.
    pub fn get_built(&self, key: ConversionKey) -> Option<&Pipeline> {
        self.slots[key.slot()?].get()?.as_ref()
    }

    /// Get the number of pipelines built so far.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| matches!(slot.get(), Some(Some(_)))).count()
    }

    /// Returns true if no pipeline has been built yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if every pipeline has been built.
    pub fn is_warm(&self) -> bool {
        self.len() == SampleFormat::COUNT * (SampleFormat::COUNT - 1)
    }
}

impl Default for ConversionCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn verify_lazy_fill() {
        let cache = ConversionCache::new();
        assert!(cache.is_empty());

        let key = ConversionKey::new(SampleFormat::S16LE, SampleFormat::F32LE);
        assert!(cache.get_built(key).is_none());

        let pipeline = cache.get(key).unwrap();
        assert_eq!(pipeline.source(), SampleFormat::S16LE);
        assert_eq!(pipeline.target(), SampleFormat::F32LE);

        assert_eq!(cache.len(), 1);
        assert!(cache.get_built(key).is_some());

        // A second lookup does not build another pipeline.
        cache.get(key).unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn verify_noop_keys_are_not_cached() {
        let cache = ConversionCache::new();

        assert!(cache.get(ConversionKey::new(SampleFormat::U8, SampleFormat::U8)).is_none());
        assert!(cache.get(ConversionKey::new(SampleFormat::Unknown, SampleFormat::U8)).is_none());
        assert!(cache.get(ConversionKey::new(SampleFormat::U8, SampleFormat::Unknown)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn verify_warm() {
        let cache = ConversionCache::warmed();
        assert!(cache.is_warm());
        assert_eq!(cache.len(), 240);

        for source in SampleFormat::ALL {
            for target in SampleFormat::ALL {
                let key = ConversionKey::new(source, target);
                assert_eq!(cache.get_built(key).is_some(), source != target);
                assert_eq!(cache.get_built(key).cloned(), Pipeline::build(source, target));
            }
        }
    }

    #[test]
    fn verify_concurrent_fill() {
        let cache = Arc::new(ConversionCache::new());

        let handles = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    cache.warm();
                    cache.len()
                })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 240);
        }

        assert!(cache.is_warm());
    }
}
