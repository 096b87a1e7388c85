use std::fmt;

use serde::Deserialize;

/// One line of the `projections` block
#[derive(Debug, Clone, Deserialize)]
pub struct Projection {
    pub site: ProjectionSite,
    /// e.g. `["s", "p"]` or `["sp3"]`
    pub ang_mtm: Vec<String>,
    #[serde(default)]
    pub zaxis: Option<[f64; 3]>,
    #[serde(default)]
    pub xaxis: Option<[f64; 3]>,
    #[serde(default)]
    pub radial: Option<u32>,
    #[serde(default)]
    pub zona: Option<f64>,
}

/// 投影中心
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionSite {
    /// Every atom of a kind
    Kind(String),
    /// Cartesian position in Å
    Cartesian([f64; 3]),
    /// Position in crystal coordinates
    Fractional([f64; 3]),
}

struct Triple<'a>(&'a [f64; 3]);

impl Projection {
    pub fn kind(name: impl Into<String>, ang_mtm: &[&str]) -> Self {
        Self {
            site: ProjectionSite::Kind(name.into()),
            ang_mtm: ang_mtm.iter().map(|&s| s.to_owned()).collect(),
            zaxis: None,
            xaxis: None,
            radial: None,
            zona: None,
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.site, self.ang_mtm.join(";"))?;
        if let Some(z) = &self.zaxis {
            write!(f, ":z={}", Triple(z))?;
        }
        if let Some(x) = &self.xaxis {
            write!(f, ":x={}", Triple(x))?;
        }
        if let Some(r) = self.radial {
            write!(f, ":r={r}")?;
        }
        if let Some(zona) = self.zona {
            write!(f, ":zona={zona:?}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ProjectionSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind(name) => f.write_str(name),
            Self::Cartesian(c) => write!(f, "c={}", Triple(c)),
            Self::Fractional(c) => write!(f, "f={}", Triple(c)),
        }
    }
}

impl fmt::Display for Triple<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{a:?},{b:?},{c:?}")
    }
}
