//! # Tile Pipeline
//!
//! Runs the power layer over a batch of source records.
//!
//! ## Architecture
//!
//! ```text
//! records ──► bounded channel ──► worker 1..N ──► per-zoom buckets
//!                                                      │
//!                                   all workers joined ◄┘
//!                                          │
//!                                          ▼
//!                              post_process, one zoom at a time
//! ```
//!
//! Workers share the layer read-only. Every resolved feature carries the
//! index of the record that produced it, and buckets are sorted by that
//! index once the workers have joined, so the output does not depend on
//! the number of workers or on scheduling.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::thread;

use crossbeam_channel::{bounded, Receiver};
use gridlayer_core::{
    AttributeProcessor, MergeEngine, TagCopier, TileFeature, Zoom, MAX_ZOOM, MIN_ZOOM,
};
use gridlayer_geo::{GeoCollector, GeoRecord, GeoShape, SharedGeometry};
use gridlayer_power::PowerLayer;
use parking_lot::Mutex;

use crate::error::{PipelineError, PipelineResult};

/// A feature as it appears at one zoom.
pub type Feature = TileFeature<SharedGeometry>;

/// Features per zoom, in record input order.
pub type Tiles = BTreeMap<Zoom, Vec<Feature>>;

/// Queued records per worker.
const QUEUE_DEPTH_PER_WORKER: usize = 64;

type Buckets = Mutex<BTreeMap<Zoom, Vec<(usize, Feature)>>>;

/// Classifies records in parallel and post-processes the result per zoom.
#[derive(Debug)]
pub struct TilePipeline<A = TagCopier> {
    layer: PowerLayer<A>,
    workers: usize,
}

impl<A: AttributeProcessor> TilePipeline<A> {
    /// Creates a pipeline using one worker per available CPU.
    #[must_use]
    pub fn new(layer: PowerLayer<A>) -> Self {
        let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        Self { layer, workers }
    }

    /// Sets the number of worker threads (at least one).
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Layer run by this pipeline.
    #[must_use]
    pub fn layer(&self) -> &PowerLayer<A> {
        &self.layer
    }

    /// Number of worker threads.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Classifies every claimed record and buckets the result by zoom.
    ///
    /// Records the layer does not claim are skipped. Zooms with no
    /// features have no bucket.
    #[must_use]
    pub fn classify(&self, records: Vec<GeoRecord>) -> Tiles {
        let total = records.len();
        let buckets: Buckets = Mutex::new(BTreeMap::new());
        let (sender, receiver) = bounded(self.workers * QUEUE_DEPTH_PER_WORKER);

        let claimed: usize = thread::scope(|scope| {
            let buckets = &buckets;
            let handles: Vec<_> = (0..self.workers)
                .map(|_| {
                    let receiver = receiver.clone();
                    scope.spawn(move || self.worker(&receiver, buckets))
                })
                .collect();
            drop(receiver);

            for item in records.into_iter().enumerate() {
                if sender.send(item).is_err() {
                    break;
                }
            }
            drop(sender);

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                })
                .sum()
        });

        let tiles: Tiles = buckets
            .into_inner()
            .into_iter()
            .map(|(zoom, mut features)| {
                features.sort_by_key(|&(index, _)| index);
                (zoom, features.into_iter().map(|(_, feature)| feature).collect())
            })
            .collect();

        tracing::info!(
            "Classified {} of {} records into {} features across {} zooms",
            claimed,
            total,
            tiles.values().map(Vec::len).sum::<usize>(),
            tiles.len()
        );
        tiles
    }

    /// Runs the layer's post-processing on every zoom.
    ///
    /// # Errors
    ///
    /// Returns the first merge failure, tagged with its zoom.
    pub fn post_process<M>(&self, tiles: Tiles, merge: &M) -> PipelineResult<Tiles>
    where
        M: MergeEngine<SharedGeometry> + ?Sized,
    {
        tiles
            .into_iter()
            .map(|(zoom, features)| {
                let merged = self
                    .layer
                    .post_process(zoom, features, merge)
                    .map_err(|source| PipelineError::PostProcess { zoom, source })?;
                Ok((zoom, merged))
            })
            .collect()
    }

    /// Classifies `records`, then post-processes every zoom.
    ///
    /// # Errors
    ///
    /// Returns the first merge failure, tagged with its zoom.
    pub fn run<M>(&self, records: Vec<GeoRecord>, merge: &M) -> PipelineResult<Tiles>
    where
        M: MergeEngine<SharedGeometry> + ?Sized,
    {
        let tiles = self.classify(records);
        self.post_process(tiles, merge)
    }

    /// Worker loop: drains the queue until the sender hangs up.
    fn worker(&self, receiver: &Receiver<(usize, GeoRecord)>, buckets: &Buckets) -> usize {
        let mut claimed = 0;
        for (index, record) in receiver {
            if !self.layer.claims(&record) {
                continue;
            }
            claimed += 1;

            let mut collector = GeoCollector::new(&record);
            self.layer.process_feature(&record, &mut collector);
            let resolved = resolve(&collector.into_instructions());
            if resolved.is_empty() {
                continue;
            }

            let mut buckets = buckets.lock();
            for (zoom, feature) in resolved {
                buckets.entry(zoom).or_default().push((index, feature));
            }
        }
        claimed
    }
}

/// Expands shapes into the features they contribute at each zoom.
///
/// Shapes below their minimum pixel size at a zoom are culled there.
fn resolve(shapes: &[GeoShape]) -> Vec<(Zoom, Feature)> {
    (MIN_ZOOM..=MAX_ZOOM)
        .flat_map(|zoom| {
            shapes
                .iter()
                .filter(move |shape| shape.large_enough_at(zoom))
                .filter_map(move |shape| shape.at_zoom(zoom).map(|feature| (zoom, feature)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use gridlayer_core::{RenderInstruction, Shape, ShapeKind};

    fn shape(kind: ShapeKind, world_size: f64) -> GeoShape {
        let empty = geo::GeometryCollection(Vec::new());
        let geometry: SharedGeometry = Arc::new(geo::Geometry::GeometryCollection(empty));
        RenderInstruction::new("power", kind, geometry, world_size)
    }

    #[test]
    fn test_resolve_respects_range() {
        let mut point = shape(ShapeKind::Point, 0.0);
        point.set_min_zoom(12);
        let zooms: Vec<Zoom> = resolve(&[point]).into_iter().map(|(zoom, _)| zoom).collect();
        assert_eq!(zooms, vec![12, 13, 14, 15]);
    }

    #[test]
    fn test_resolve_culls_small_shapes() {
        // 1/1024 of the world reaches 2 px at zoom 3.
        let mut polygon = shape(ShapeKind::Polygon, 1.0 / 1024.0);
        polygon.set_min_pixel_size(2.0);
        let first = resolve(&[polygon]).first().map(|&(zoom, _)| zoom);
        assert_eq!(first, Some(3));
    }

    #[test]
    fn test_worker_count_is_at_least_one() {
        let pipeline = TilePipeline::new(PowerLayer::default()).with_workers(0);
        assert_eq!(pipeline.workers(), 1);
    }
}
