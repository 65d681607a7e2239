#![allow(dead_code)]

//! Per-thread performance counters and the global record they flush into.
//! Workers accumulate locally during a tile and merge into the shared
//! atomics once, on tile completion, rather than contending on every
//! traversal step.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, Default)]
pub struct PerThreadMetrics {
    pub rays_traced: u64,
    pub aabb_tests: u64,
    pub triangle_tests: u64,
    pub traversal_overflows: u64,
}

impl PerThreadMetrics {
    pub fn new() -> PerThreadMetrics {
        PerThreadMetrics::default()
    }

    pub fn add_ray(&mut self) {
        self.rays_traced += 1;
    }

    pub fn add_aabb_tests(&mut self, n: u64) {
        self.aabb_tests += n;
    }

    pub fn add_triangle_test(&mut self) {
        self.triangle_tests += 1;
    }

    pub fn add_overflow(&mut self) {
        self.traversal_overflows += 1;
    }
}

/// Process-wide counters, each updated via atomic add. Ordering between
/// workers is irrelevant since every counter is a monotonic, commutative
/// sum.
#[derive(Debug, Default)]
pub struct GlobalMetrics {
    pub rays_traced: AtomicU64,
    pub aabb_tests: AtomicU64,
    pub triangle_tests: AtomicU64,
    pub traversal_overflows: AtomicU64,
}

impl GlobalMetrics {
    pub fn new() -> GlobalMetrics {
        GlobalMetrics::default()
    }

    pub fn merge(&self, local: &PerThreadMetrics) {
        self.rays_traced.fetch_add(local.rays_traced, Ordering::Relaxed);
        self.aabb_tests.fetch_add(local.aabb_tests, Ordering::Relaxed);
        self.triangle_tests.fetch_add(local.triangle_tests, Ordering::Relaxed);
        self.traversal_overflows.fetch_add(local.traversal_overflows, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> PerThreadMetrics {
        PerThreadMetrics {
            rays_traced: self.rays_traced.load(Ordering::Relaxed),
            aabb_tests: self.aabb_tests.load(Ordering::Relaxed),
            triangle_tests: self.triangle_tests.load(Ordering::Relaxed),
            traversal_overflows: self.traversal_overflows.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn merge_sums_fields() {
        let global = GlobalMetrics::new();
        let mut a = PerThreadMetrics::new();
        a.add_ray();
        a.add_aabb_tests(3);
        global.merge(&a);

        let mut b = PerThreadMetrics::new();
        b.add_ray();
        b.add_overflow();
        global.merge(&b);

        let snap = global.snapshot();
        assert_eq!(snap.rays_traced, 2);
        assert_eq!(snap.aabb_tests, 3);
        assert_eq!(snap.traversal_overflows, 1);
    }

    #[test]
    fn concurrent_merges_do_not_lose_updates() {
        let global = Arc::new(GlobalMetrics::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let global = Arc::clone(&global);
            handles.push(thread::spawn(move || {
                let mut local = PerThreadMetrics::new();
                for _ in 0..1000 {
                    local.add_ray();
                }
                global.merge(&local);
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(global.snapshot().rays_traced, 8000);
    }
}
