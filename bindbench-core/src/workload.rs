//! Workload Generators
//!
//! Deterministic synthetic meshes fed to the callable under test:
//! - a minimal tetrahedron that isolates per-call binding overhead
//! - a structured grid whose size scales with a subdivision parameter
//!
//! The structured grid triangulates only the front and back face of every
//! cell, so the mesh is not watertight. Triangle counts depend on this.

/// Target output vertex count used with the minimal workload
pub const MINIMAL_TARGET_VERTICES: usize = 10;

/// Target output vertex count used with the structured workload
pub const STRUCTURED_TARGET_VERTICES: usize = 500;

/// Immutable input payload for one scenario
///
/// # Invariant
///
/// Every index in `triangles` refers to an existing entry of `points`.
/// Constructors assume it; it is checked only in debug builds. Feeding a
/// malformed workload to a binding is a caller bug.
#[derive(Debug, Clone, PartialEq)]
pub struct Workload {
    points: Vec<[f32; 3]>,
    triangles: Vec<[u32; 3]>,
    target_vertex_count: usize,
    deterministic: bool,
}

impl Workload {
    /// Build a workload from raw mesh data
    pub fn new(
        points: Vec<[f32; 3]>,
        triangles: Vec<[u32; 3]>,
        target_vertex_count: usize,
    ) -> Self {
        let workload = Self {
            points,
            triangles,
            target_vertex_count,
            deterministic: true,
        };
        debug_assert!(
            workload.is_well_formed(),
            "workload triangle references a point index out of range"
        );
        workload
    }

    /// Replace the target output vertex count
    pub fn with_target(mut self, target_vertex_count: usize) -> Self {
        self.target_vertex_count = target_vertex_count;
        self
    }

    /// Point coordinates
    pub fn points(&self) -> &[[f32; 3]] {
        &self.points
    }

    /// Index triples into [`Workload::points`]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Requested output vertex count
    pub fn target_vertex_count(&self) -> usize {
        self.target_vertex_count
    }

    /// Whether the binding is asked for reproducible output
    pub fn deterministic(&self) -> bool {
        self.deterministic
    }

    /// Number of input points
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Number of input triangles
    pub fn face_count(&self) -> usize {
        self.triangles.len()
    }

    /// Check that every triangle index is in range
    pub fn is_well_formed(&self) -> bool {
        let n = self.points.len();
        self.triangles
            .iter()
            .flatten()
            .all(|&idx| (idx as usize) < n)
    }
}

/// Tetrahedron: 4 points, 4 faces
pub fn minimal_workload() -> Workload {
    let points = vec![
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.5, 0.866, 0.0],
        [0.5, 0.433, 0.816],
    ];
    let triangles = vec![[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];

    Workload::new(points, triangles, MINIMAL_TARGET_VERTICES)
}

/// Subdivided unit cube with `(n+1)^3` points
///
/// Every cell contributes its front and back face (`2*n^3` quad faces in
/// total), each split into two triangles.
pub fn structured_workload(subdivisions: usize) -> Workload {
    let side = subdivisions + 1;
    let step = if subdivisions == 0 {
        0.0
    } else {
        1.0 / subdivisions as f64
    };

    let mut points = Vec::with_capacity(side * side * side);
    for i in 0..side {
        for j in 0..side {
            for k in 0..side {
                points.push([
                    (i as f64 * step) as f32,
                    (j as f64 * step) as f32,
                    (k as f64 * step) as f32,
                ]);
            }
        }
    }

    let index = |i: usize, j: usize, k: usize| (i * side * side + j * side + k) as u32;

    let mut triangles = Vec::with_capacity(4 * subdivisions.pow(3));
    for i in 0..subdivisions {
        for j in 0..subdivisions {
            for k in 0..subdivisions {
                // Front face (z = k)
                let v0 = index(i, j, k);
                let v1 = index(i + 1, j, k);
                let v2 = index(i + 1, j + 1, k);
                let v3 = index(i, j + 1, k);
                triangles.push([v0, v1, v2]);
                triangles.push([v0, v2, v3]);

                // Back face (z = k + 1), opposite winding
                let v4 = index(i, j, k + 1);
                let v5 = index(i + 1, j, k + 1);
                let v6 = index(i + 1, j + 1, k + 1);
                let v7 = index(i, j + 1, k + 1);
                triangles.push([v4, v6, v5]);
                triangles.push([v4, v7, v6]);
            }
        }
    }

    Workload::new(points, triangles, STRUCTURED_TARGET_VERTICES)
}
