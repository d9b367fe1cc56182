use log::info;

#[allow(unused_imports)]
use crate::Llrb;

/// Depth distribution of the absent-child positions of a [`Llrb`]
/// tree, collected by [`Llrb::validate`]. Depth of a position is the
/// number of nodes on the path from root to it, so an empty tree has a
/// single position at depth zero.
#[derive(Clone, Debug, Default)]
pub struct Depth {
    samples: usize,
    min: usize,
    max: usize,
    total: usize,
    histogram: Vec<u64>, // positions found at each depth.
}

impl Depth {
    pub(crate) fn new() -> Depth {
        Default::default()
    }

    pub(crate) fn sample(&mut self, depth: usize) {
        if self.samples == 0 || depth < self.min {
            self.min = depth
        }
        self.max = self.max.max(depth);
        self.samples += 1;
        self.total += depth;

        if self.histogram.len() <= depth {
            self.histogram.resize(depth + 1, 0);
        }
        self.histogram[depth] += 1;
    }

    /// Return number of absent-child positions sampled, one more than
    /// the number of entries.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Return depth of the shallowest absent-child position.
    pub fn min(&self) -> usize {
        self.min
    }

    /// Return depth of the deepest absent-child position.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Return the average depth, zero when nothing was sampled.
    pub fn mean(&self) -> usize {
        match self.samples {
            0 => 0,
            n => self.total / n,
        }
    }

    /// Return (percentile, depth) for percentiles 90 to 99, where depth
    /// is the smallest depth covering at least that share of positions.
    pub fn percentiles(&self) -> Vec<(u8, usize)> {
        if self.samples == 0 {
            return vec![];
        }

        let samples = self.samples as u64;
        let mut cumulative = self.histogram.iter().scan(0_u64, |acc, n| {
            *acc += n;
            Some(*acc)
        });
        let (mut depth, mut covered) = (0, cumulative.next().unwrap_or(0));

        (90_u8..100)
            .map(|perc| {
                while covered * 100 < u64::from(perc) * samples {
                    match cumulative.next() {
                        Some(n) => covered = n,
                        None => break,
                    }
                    depth += 1;
                }
                (perc, depth)
            })
            .collect()
    }

    /// Log depth statistics in human readable format.
    pub fn pretty_print(&self, prefix: &str) {
        info!(
            "{}depth (min, avg, max): {:?}",
            prefix,
            (self.min, self.mean(), self.max)
        );
        for (perc, depth) in self.percentiles().into_iter() {
            info!("{}  {} percentile = {}", prefix, perc, depth);
        }
    }

    /// Render depth statistics as a compact JSON-like string, useful
    /// for plotting.
    pub fn json(&self) -> String {
        let ps: Vec<String> = self
            .percentiles()
            .into_iter()
            .map(|(p, d)| format!("{}: {}", p, d))
            .collect();
        format!(
            "{{ min: {}, mean: {}, max: {}, percentiles: {} }}",
            self.min,
            self.mean(),
            self.max,
            ps.join(", ")
        )
    }
}
