#![allow(dead_code)]

//! Tile planning and the fixed-capacity work queue workers pop from.
//! The queue has exactly one producer (the render driver) and any number
//! of consumers (worker threads); `head` is the only field consumers
//! mutate, via fetch-add, so two workers can never claim the same index.

use std::sync::atomic::{AtomicUsize, Ordering};

/// A rectangular, half-open pixel range: `[min_x, max_x) x [min_y, max_y)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Tile {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

/// Partitions `[0,image_width) x [0,image_height)` into row-major `tile_w x
/// tile_h` tiles, edge tiles clipped to the image bounds. Truncates to
/// `cap` tiles if there would be more, logging what was dropped rather
/// than silently covering less than the caller asked for.
pub fn compute_tiles(image_width: usize, image_height: usize, tile_w: usize, tile_h: usize, cap: usize) -> Vec<Tile> {
    let cols = (image_width + tile_w - 1) / tile_w;
    let rows = (image_height + tile_h - 1) / tile_h;
    let total = cols * rows;

    let mut tiles = Vec::with_capacity(total.min(cap));
    'rows: for row in 0..rows {
        for col in 0..cols {
            if tiles.len() >= cap {
                break 'rows;
            }
            let min_x = col * tile_w;
            let min_y = row * tile_h;
            tiles.push(Tile {
                min_x,
                min_y,
                max_x: (min_x + tile_w).min(image_width),
                max_y: (min_y + tile_h).min(image_height),
            });
        }
    }

    if tiles.len() < total {
        eprintln!("compute_tiles: dropped {} of {} tiles (cap={})", total - tiles.len(), total, cap);
    }

    tiles
}

/// A fixed-capacity ring populated once per render pass by a single
/// producer, then drained by any number of worker threads. Only `reset`
/// (called by the producer, before workers start) ever writes `tasks`;
/// during a pass, `head` is the only mutable shared state.
pub struct WorkQueue {
    tasks: Vec<Tile>,
    head: AtomicUsize,
    tail: AtomicUsize,
}

impl WorkQueue {
    pub fn with_capacity(capacity: usize) -> WorkQueue {
        WorkQueue {
            tasks: Vec::with_capacity(capacity),
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
        }
    }

    /// Loads `tiles` as this pass's task list. Must complete before any
    /// worker starts popping.
    pub fn reset(&mut self, tiles: Vec<Tile>) {
        assert!(tiles.len() <= self.tasks.capacity(), "work queue capacity exceeded");
        self.head.store(0, Ordering::Relaxed);
        self.tasks = tiles;
        self.tail.store(self.tasks.len(), Ordering::Release);
    }

    /// Claims the next tile, or `None` once the queue is drained. Safe to
    /// call concurrently from any number of workers: the fetch-add makes
    /// each index exclusive to the worker that claims it.
    pub fn pop(&self) -> Option<Tile> {
        let tail = self.tail.load(Ordering::Acquire);
        loop {
            let head = self.head.load(Ordering::Relaxed);
            if head >= tail {
                return None;
            }
            if self
                .head
                .compare_exchange_weak(head, head + 1, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
            {
                return Some(self.tasks[head]);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::thread;

    #[test]
    fn tile_planning_covers_exact_grid() {
        let tiles = compute_tiles(10, 10, 2, 2, 64);
        assert_eq!(tiles.len(), 25);
        assert_eq!(tiles[0], Tile { min_x: 0, min_y: 0, max_x: 2, max_y: 2 });
        assert_eq!(tiles[24], Tile { min_x: 8, min_y: 8, max_x: 10, max_y: 10 });
    }

    #[test]
    fn tile_planning_clips_edge_tiles() {
        let tiles = compute_tiles(9, 9, 2, 2, 64);
        assert_eq!(tiles.len(), 25);
        assert_eq!(tiles[24], Tile { min_x: 8, min_y: 8, max_x: 9, max_y: 9 });
    }

    #[test]
    fn tile_planning_truncates_to_cap() {
        let tiles = compute_tiles(10, 10, 2, 2, 10);
        assert_eq!(tiles.len(), 10);
    }

    #[test]
    fn work_queue_determinism_with_two_workers() {
        let mut queue = WorkQueue::with_capacity(4);
        queue.reset(vec![
            Tile { min_x: 0, min_y: 0, max_x: 1, max_y: 1 },
            Tile { min_x: 1, min_y: 0, max_x: 2, max_y: 1 },
            Tile { min_x: 2, min_y: 0, max_x: 3, max_y: 1 },
            Tile { min_x: 3, min_y: 0, max_x: 4, max_y: 1 },
        ]);
        let queue = Arc::new(queue);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let mut handles = Vec::new();
        for _ in 0..2 {
            let queue = Arc::clone(&queue);
            let seen = Arc::clone(&seen);
            handles.push(thread::spawn(move || {
                while let Some(tile) = queue.pop() {
                    seen.lock().unwrap().push(tile);
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 4);
        let mut xs: Vec<usize> = seen.iter().map(|t| t.min_x).collect();
        xs.sort_unstable();
        assert_eq!(xs, vec![0, 1, 2, 3]);
    }
}
