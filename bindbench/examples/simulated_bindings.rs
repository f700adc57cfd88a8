//! Simulated Binding Comparison
//!
//! Two in-process stand-ins for differently built bindings of the same
//! remeshing extension. Both share one vertex-clustering remesher; the
//! copying variant marshals its input and output through owned `f64` buffers,
//! the zero-copy variant hands the slices straight through.
//!
//! Run with:
//!   cargo run --example simulated_bindings                       # Full suite
//!   cargo run --example simulated_bindings -- --format markdown  # Markdown report
//!   cargo run --example simulated_bindings -- list               # Scenario catalog
//!   cargo run --example simulated_bindings -- --filter import    # Import time only

use bindbench::prelude::*;
use std::collections::HashMap;
use std::hint::black_box;
use std::path::{Path, PathBuf};

// ============================================================================
// Shared remesher
// ============================================================================

/// Vertex clustering on a uniform grid sized for roughly `target` vertices
fn cluster_remesh(
    points: &[[f32; 3]],
    triangles: &[[u32; 3]],
    target: usize,
) -> Result<RemeshOutput, BindingError> {
    if points.is_empty() {
        return Err(BindingError::InvalidInput("empty mesh".to_string()));
    }
    if target == 0 {
        return Err(BindingError::InvalidInput(
            "target vertex count must be positive".to_string(),
        ));
    }
    if triangles.iter().flatten().any(|&i| i as usize >= points.len()) {
        return Err(BindingError::InvalidInput(
            "triangle index out of range".to_string(),
        ));
    }
    if points.len() <= target {
        return Ok(RemeshOutput {
            points: points.to_vec(),
            triangles: triangles.to_vec(),
        });
    }

    let mut lo = [f32::INFINITY; 3];
    let mut hi = [f32::NEG_INFINITY; 3];
    for p in points {
        for axis in 0..3 {
            lo[axis] = lo[axis].min(p[axis]);
            hi[axis] = hi[axis].max(p[axis]);
        }
    }

    let cells = ((target as f64).cbrt().floor() as usize).max(1);
    let cell_of = |p: &[f32; 3]| -> [usize; 3] {
        std::array::from_fn(|axis| {
            let extent = hi[axis] - lo[axis];
            if extent <= 0.0 {
                0
            } else {
                let cell = ((p[axis] - lo[axis]) / extent * cells as f32) as usize;
                cell.min(cells - 1)
            }
        })
    };

    let mut cluster_ids: HashMap<[usize; 3], u32> = HashMap::new();
    let mut sums: Vec<([f64; 3], u32)> = Vec::new();
    let mut cluster_of = Vec::with_capacity(points.len());
    for p in points {
        let id = *cluster_ids.entry(cell_of(p)).or_insert_with(|| {
            sums.push(([0.0; 3], 0));
            (sums.len() - 1) as u32
        });
        let (sum, count) = &mut sums[id as usize];
        for axis in 0..3 {
            sum[axis] += f64::from(p[axis]);
        }
        *count += 1;
        cluster_of.push(id);
    }

    let points = sums
        .iter()
        .map(|(sum, count)| std::array::from_fn(|axis| (sum[axis] / f64::from(*count)) as f32))
        .collect();
    let triangles = triangles
        .iter()
        .filter_map(|t| {
            let [a, b, c] = t.map(|i| cluster_of[i as usize]);
            (a != b && b != c && a != c).then_some([a, b, c])
        })
        .collect();

    Ok(RemeshOutput { points, triangles })
}

/// Module initialization work: a lookup table of `size` entries
fn load_module(size: usize) -> Vec<f64> {
    (0..size).map(|i| (i as f64).sqrt()).collect()
}

fn newest_wheel(dir: &Path) -> Option<ArtifactInfo> {
    find_latest_artifact(dir, "whl").ok().flatten()
}

// ============================================================================
// Copying variant
// ============================================================================

/// Binding that converts arrays to owned buffers on every call
struct CopyingBinding {
    module: Option<Vec<f64>>,
    dist: PathBuf,
}

impl ModuleRegistry for CopyingBinding {
    fn evict(&mut self) {
        self.module = None;
    }

    fn import(&mut self) -> Result<(), BindingError> {
        self.module = Some(black_box(load_module(200_000)));
        Ok(())
    }
}

impl BindingVariant for CopyingBinding {
    fn name(&self) -> &str {
        "copying"
    }

    fn remesh(&self, workload: &Workload) -> Result<RemeshOutput, BindingError> {
        if self.module.is_none() {
            return Err(BindingError::Import("module not imported".to_string()));
        }

        let points: Vec<Vec<f64>> = workload
            .points()
            .iter()
            .map(|p| p.iter().map(|&c| f64::from(c)).collect())
            .collect();
        let points: Vec<[f32; 3]> = points
            .iter()
            .map(|p| [p[0] as f32, p[1] as f32, p[2] as f32])
            .collect();
        let triangles: Vec<[u32; 3]> = workload.triangles().to_vec();

        let output = cluster_remesh(&points, &triangles, workload.target_vertex_count())?;
        Ok(RemeshOutput {
            points: output.points.clone(),
            triangles: output.triangles.clone(),
        })
    }

    fn artifact(&self) -> Option<ArtifactInfo> {
        newest_wheel(&self.dist)
    }
}

// ============================================================================
// Zero-copy variant
// ============================================================================

/// Binding that borrows the caller's arrays
struct ZeroCopyBinding {
    module: Option<Vec<f64>>,
    dist: PathBuf,
}

impl ModuleRegistry for ZeroCopyBinding {
    fn evict(&mut self) {
        self.module = None;
    }

    fn import(&mut self) -> Result<(), BindingError> {
        self.module = Some(black_box(load_module(60_000)));
        Ok(())
    }
}

impl BindingVariant for ZeroCopyBinding {
    fn name(&self) -> &str {
        "zero-copy"
    }

    fn remesh(&self, workload: &Workload) -> Result<RemeshOutput, BindingError> {
        if self.module.is_none() {
            return Err(BindingError::Import("module not imported".to_string()));
        }
        cluster_remesh(
            workload.points(),
            workload.triangles(),
            workload.target_vertex_count(),
        )
    }

    fn artifact(&self) -> Option<ArtifactInfo> {
        newest_wheel(&self.dist)
    }
}

fn main() -> anyhow::Result<()> {
    let baseline = CopyingBinding {
        module: None,
        dist: PathBuf::from("target/wheels/copying"),
    };
    let candidate = ZeroCopyBinding {
        module: None,
        dist: PathBuf::from("target/wheels/zero-copy"),
    };

    bindbench::run(Box::new(baseline), Box::new(candidate))
}
