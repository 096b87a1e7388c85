use serde::Deserialize;

/// Crystal structure, lengths in Å
#[derive(Debug, Clone, Deserialize)]
pub struct Structure {
    /// Lattice vectors as rows
    pub cell: [[f64; 3]; 3],
    pub sites: Vec<Site>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Site {
    pub kind_name: String,
    /// Cartesian position
    pub position: [f64; 3],
}
