//! Distributes image rows over a fixed pool of worker threads.
//!
//! Workers are scoped threads created for a single frame and joined before
//! the frame is returned. The pixel buffer is split into disjoint row slices
//! up front, so each row is written by exactly one worker and the buffer
//! itself needs no synchronization. The policies differ only in how rows are
//! handed out; their output is identical.

use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use glint_math::Color;
use rayon::prelude::*;

use crate::error::{RenderError, RenderResult};

/// Row distribution policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schedule {
    /// Contiguous, near-equal row ranges fixed at launch.
    Static,
    /// Rows claimed one at a time from a shared atomic counter.
    #[default]
    Dynamic,
    /// Rows fed to a rayon pool of the requested size.
    WorkStealing,
}

impl Schedule {
    pub fn name(&self) -> &'static str {
        match self {
            Schedule::Static => "static",
            Schedule::Dynamic => "dynamic",
            Schedule::WorkStealing => "work-stealing",
        }
    }
}

/// What one worker did during a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerStats {
    pub worker: usize,
    pub rows: usize,
    pub elapsed: Duration,
}

/// Queue of row indices shared between workers.
///
/// Claims only need distinct indices, so the counter uses relaxed ordering;
/// joining the workers publishes their writes.
pub struct RowQueue {
    rows: usize,
    next: AtomicUsize,
}

impl RowQueue {
    /// Create a queue handing out `0..rows`.
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            next: AtomicUsize::new(0),
        }
    }

    /// Claim the next unprocessed row, or `None` once all are taken.
    pub fn claim(&self) -> Option<usize> {
        let row = self.next.fetch_add(1, Ordering::Relaxed);
        (row < self.rows).then_some(row)
    }

    /// Get an iterator that claims rows until the queue runs dry.
    pub fn iter(&self) -> RowQueueIter<'_> {
        RowQueueIter { queue: self }
    }

    /// Get the total number of rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Check whether every row has been claimed.
    pub fn is_empty(&self) -> bool {
        self.next.load(Ordering::Relaxed) >= self.rows
    }
}

/// Iterator over claimed rows.
pub struct RowQueueIter<'a> {
    queue: &'a RowQueue,
}

impl Iterator for RowQueueIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        self.queue.claim()
    }
}

/// Split `rows` into `workers` contiguous ranges whose lengths differ by at
/// most one. Earlier ranges take the remainder.
pub fn static_partition(rows: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let base = rows / workers;
    let extra = rows % workers;

    let mut start = 0;
    (0..workers)
        .map(|worker| {
            let len = base + usize::from(worker < extra);
            let range = start..start + len;
            start += len;
            range
        })
        .collect()
}

/// Render every row of `pixels` with `threads` workers.
///
/// `pixels` is row-major with `width` entries per row. `render_row` receives
/// the image row index and that row's slice.
pub fn run<F>(
    schedule: Schedule,
    threads: usize,
    width: usize,
    pixels: &mut [Color],
    render_row: F,
) -> RenderResult<Vec<WorkerStats>>
where
    F: Fn(usize, &mut [Color]) + Sync,
{
    if threads == 0 {
        return Err(RenderError::InvalidThreadCount);
    }
    if width == 0 || pixels.is_empty() {
        return Ok(Vec::new());
    }

    log::debug!(
        "Scheduling {} rows on {} {} worker(s)",
        pixels.len() / width,
        threads,
        schedule.name()
    );

    match schedule {
        Schedule::Static => run_static(threads, width, pixels, &render_row),
        Schedule::Dynamic => run_dynamic(threads, width, pixels, &render_row),
        Schedule::WorkStealing => run_work_stealing(threads, width, pixels, &render_row),
    }
}

fn run_static<F>(
    threads: usize,
    width: usize,
    pixels: &mut [Color],
    render_row: &F,
) -> RenderResult<Vec<WorkerStats>>
where
    F: Fn(usize, &mut [Color]) + Sync,
{
    let ranges = static_partition(pixels.len() / width, threads);

    let results = thread::scope(|scope| {
        let mut rest = pixels;
        let mut handles = Vec::with_capacity(ranges.len());
        for (worker, range) in ranges.into_iter().enumerate() {
            let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(range.len() * width);
            rest = tail;
            handles.push(scope.spawn(move || {
                let start = Instant::now();
                for (offset, row) in chunk.chunks_mut(width).enumerate() {
                    render_row(range.start + offset, row);
                }
                WorkerStats {
                    worker,
                    rows: range.len(),
                    elapsed: start.elapsed(),
                }
            }));
        }
        handles.into_iter().map(|h| h.join()).collect::<Vec<_>>()
    });

    collect_stats(results)
}

fn run_dynamic<F>(
    threads: usize,
    width: usize,
    pixels: &mut [Color],
    render_row: &F,
) -> RenderResult<Vec<WorkerStats>>
where
    F: Fn(usize, &mut [Color]) + Sync,
{
    // Each slot is emptied exactly once, by the worker that claimed its
    // index, so the per-row locks are never contended.
    let slots: Vec<Mutex<Option<&mut [Color]>>> = pixels
        .chunks_mut(width)
        .map(|row| Mutex::new(Some(row)))
        .collect();
    let queue = RowQueue::new(slots.len());

    let results = thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|worker| {
                let slots = &slots;
                let queue = &queue;
                scope.spawn(move || {
                    let start = Instant::now();
                    let mut rows = 0;
                    for index in queue.iter() {
                        let row = slots[index]
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .take();
                        if let Some(row) = row {
                            render_row(index, row);
                            rows += 1;
                        }
                    }
                    WorkerStats {
                        worker,
                        rows,
                        elapsed: start.elapsed(),
                    }
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join()).collect::<Vec<_>>()
    });

    collect_stats(results)
}

fn run_work_stealing<F>(
    threads: usize,
    width: usize,
    pixels: &mut [Color],
    render_row: &F,
) -> RenderResult<Vec<WorkerStats>>
where
    F: Fn(usize, &mut [Color]) + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|index| format!("glint-worker-{}", index))
        .build()?;

    let row_counts: Vec<AtomicUsize> = (0..threads).map(|_| AtomicUsize::new(0)).collect();
    let start = Instant::now();
    pool.install(|| {
        pixels
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(index, row)| {
                render_row(index, row);
                if let Some(worker) = rayon::current_thread_index() {
                    row_counts[worker].fetch_add(1, Ordering::Relaxed);
                }
            });
    });
    let elapsed = start.elapsed();

    Ok(row_counts
        .into_iter()
        .enumerate()
        .map(|(worker, rows)| WorkerStats {
            worker,
            rows: rows.into_inner(),
            elapsed,
        })
        .collect())
}

fn collect_stats(results: Vec<thread::Result<WorkerStats>>) -> RenderResult<Vec<WorkerStats>> {
    results
        .into_iter()
        .enumerate()
        .map(|(worker, result)| result.map_err(|_| RenderError::WorkerPanicked { worker }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEDULES: [Schedule; 3] = [Schedule::Static, Schedule::Dynamic, Schedule::WorkStealing];

    /// Writes the row index into red and bumps green once per visit.
    fn mark_row(index: usize, row: &mut [Color]) {
        for (column, pixel) in row.iter_mut().enumerate() {
            pixel.x = index as f32;
            pixel.y += 1.0;
            pixel.z = column as f32;
        }
    }

    #[test]
    fn test_static_partition_covers_all_rows() {
        let ranges = static_partition(10, 3);
        assert_eq!(ranges, vec![0..4, 4..7, 7..10]);

        let ranges = static_partition(9, 3);
        assert_eq!(ranges, vec![0..3, 3..6, 6..9]);
    }

    #[test]
    fn test_static_partition_more_workers_than_rows() {
        let ranges = static_partition(2, 4);
        assert_eq!(ranges, vec![0..1, 1..2, 2..2, 2..2]);
    }

    #[test]
    fn test_row_queue_hands_out_each_row_once() {
        let queue = RowQueue::new(3);
        assert_eq!(queue.len(), 3);
        assert!(!queue.is_empty());

        let claimed: Vec<usize> = queue.iter().collect();
        assert_eq!(claimed, vec![0, 1, 2]);
        assert!(queue.is_empty());
        assert_eq!(queue.claim(), None);
    }

    #[test]
    fn test_every_row_written_exactly_once() {
        let (width, height) = (5, 37);
        for schedule in SCHEDULES {
            for threads in [1, 2, 3, 8, 64] {
                let mut pixels = vec![Color::ZERO; width * height];
                let stats = run(schedule, threads, width, &mut pixels, mark_row).unwrap();

                for (i, pixel) in pixels.iter().enumerate() {
                    assert_eq!(pixel.x, (i / width) as f32, "{:?}", schedule);
                    assert_eq!(pixel.y, 1.0, "{:?} x{} visited twice", schedule, threads);
                    assert_eq!(pixel.z, (i % width) as f32);
                }
                assert_eq!(stats.len(), threads);
                assert_eq!(stats.iter().map(|s| s.rows).sum::<usize>(), height);
            }
        }
    }

    #[test]
    fn test_zero_threads_is_rejected() {
        let mut pixels = vec![Color::ZERO; 4];
        assert!(matches!(
            run(Schedule::Dynamic, 0, 2, &mut pixels, mark_row),
            Err(RenderError::InvalidThreadCount)
        ));
    }

    #[test]
    fn test_worker_panic_is_reported() {
        let mut pixels = vec![Color::ZERO; 8];
        let result = run(Schedule::Static, 2, 2, &mut pixels, |index, _row| {
            if index == 3 {
                panic!("row 3 failed");
            }
        });
        assert!(matches!(
            result,
            Err(RenderError::WorkerPanicked { worker: 1 })
        ));
    }
}
