//! Summary figures for a generated project.
//!
//! Every figure here is an estimate. `bundle_size` is the total length of the
//! emitted sources, not a bundler measurement, and the render time is a
//! linear heuristic in the element count.

use crate::generators::{FileKind, GeneratedFile};
use crate::validate::TreeStats;
use serde::{Deserialize, Serialize};
use weft_core::Framework;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetrics {
    /// Sum of emitted file content lengths in bytes.
    pub bundle_size: usize,
    pub element_count: usize,
    pub component_count: usize,
    pub max_depth: usize,
    /// Lines across all emitted files.
    pub lines_of_code: usize,
    /// Heuristic: `base + per_element * element_count`.
    pub estimated_render_time_ms: f64,
}

/// `(base, per element)` render cost in milliseconds.
pub fn render_cost(framework: Framework) -> (f64, f64) {
    match framework {
        Framework::React => (2.0, 0.05),
        Framework::Vue => (1.8, 0.045),
        Framework::Angular => (3.0, 0.06),
        Framework::Svelte => (1.0, 0.03),
        Framework::Html => (0.5, 0.02),
    }
}

pub fn estimate_render_time(framework: Framework, element_count: usize) -> f64 {
    let (base, per_element) = render_cost(framework);
    base + per_element * element_count as f64
}

impl ProjectMetrics {
    pub fn compute(files: &[GeneratedFile], stats: TreeStats, framework: Framework) -> Self {
        Self {
            bundle_size: files.iter().map(|f| f.content.len()).sum(),
            element_count: stats.element_count,
            component_count: files.iter().filter(|f| f.kind == FileKind::Component).count(),
            max_depth: stats.max_depth,
            lines_of_code: files.iter().map(GeneratedFile::lines).sum(),
            estimated_render_time_ms: estimate_render_time(framework, stats.element_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_time_is_monotonic() {
        for framework in Framework::ALL {
            let mut last = estimate_render_time(framework, 0);
            for n in 1..50 {
                let next = estimate_render_time(framework, n);
                assert!(next > last);
                last = next;
            }
        }
    }

    #[test]
    fn test_compute() {
        let files = vec![
            GeneratedFile::new("a.tsx", "line\nline\n", FileKind::Component),
            GeneratedFile::new("package.json", "{}", FileKind::Config),
        ];
        let stats = TreeStats {
            element_count: 4,
            max_depth: 2,
        };
        let metrics = ProjectMetrics::compute(&files, stats, Framework::Svelte);
        assert_eq!(metrics.bundle_size, 12);
        assert_eq!(metrics.component_count, 1);
        assert_eq!(metrics.lines_of_code, 3);
        assert!((metrics.estimated_render_time_ms - 1.12).abs() < 1e-9);
    }
}
