use std::collections::BTreeMap;

use serde::Deserialize;

/// Monkhorst-Pack mesh
#[derive(Debug, Clone, Deserialize)]
pub struct KpointsMesh {
    pub mesh: [u32; 3],
    #[serde(default)]
    pub offset: [f64; 3],
}

/// Band-structure path through labelled high-symmetry points
#[derive(Debug, Clone, Deserialize)]
pub struct KpointPath {
    pub path: Vec<(String, String)>,
    /// Fractional coordinates of every label used in `path`
    pub point_coords: BTreeMap<String, [f64; 3]>,
}

impl KpointsMesh {
    pub fn new(mesh: [u32; 3]) -> Self {
        Self {
            mesh,
            offset: [0.0; 3],
        }
    }

    /// Every mesh point in fractional coordinates, first index slowest.
    pub fn points(&self) -> Vec<[f64; 3]> {
        let [n1, n2, n3] = self.mesh;
        let coord = |i: u32, n: u32, offset: f64| (f64::from(i) + offset) / f64::from(n);

        let len = [n1, n2, n3]
            .into_iter()
            .try_fold(1usize, |acc, n| acc.checked_mul(n as usize));
        let mut points = Vec::with_capacity(len.unwrap_or(0));
        for i in 0..n1 {
            for j in 0..n2 {
                for k in 0..n3 {
                    points.push([
                        coord(i, n1, self.offset[0]),
                        coord(j, n2, self.offset[1]),
                        coord(k, n3, self.offset[2]),
                    ]);
                }
            }
        }
        points
    }
}

impl KpointPath {
    /// Labels used by the path without coordinates.
    pub fn missing_labels(&self) -> Vec<&str> {
        let mut missing = Vec::new();
        for label in self.path.iter().flat_map(|(from, to)| [from.as_str(), to.as_str()]) {
            if !self.point_coords.contains_key(label) && !missing.contains(&label) {
                missing.push(label);
            }
        }
        missing
    }
}
