//! Rendering of the `<seedname>.win` input file.
//!
//! Keywords come first, sorted, as `key = value`. Blocks follow, sorted by
//! name, each preceded by a blank line. The output only depends on the
//! simulation inputs, so it can be compared byte for byte.

use std::collections::BTreeMap;

use domain::model::{entity::CalcJobInputs, vo::ParameterValue};

const LENGTH_UNIT: &str = "ang";

/// `parameters` must already be lowercased and free of derived keywords.
pub(crate) fn render(inputs: &CalcJobInputs, mut parameters: BTreeMap<String, ParameterValue>) -> String {
    let mesh = inputs.kpoints.mesh.map(i64::from).to_vec();
    parameters.insert("mp_grid".to_owned(), mesh.into());

    let mut blocks: BTreeMap<&str, Vec<String>> = BTreeMap::new();

    let structure = &inputs.structure;
    blocks.insert(
        "unit_cell_cart",
        std::iter::once(LENGTH_UNIT.to_owned())
            .chain(structure.cell.iter().map(coords))
            .collect(),
    );
    blocks.insert(
        "atoms_cart",
        std::iter::once(LENGTH_UNIT.to_owned())
            .chain(
                structure
                    .sites
                    .iter()
                    .map(|site| format!("{} {}", site.kind_name, coords(&site.position))),
            )
            .collect(),
    );
    blocks.insert("kpoints", inputs.kpoints.points().iter().map(coords).collect());

    if let Some(path) = &inputs.kpoint_path {
        let segments = path
            .path
            .iter()
            .filter_map(|(from, to)| {
                let start = path.point_coords.get(from)?;
                let end = path.point_coords.get(to)?;
                Some(format!("{from} {} {to} {}", coords(start), coords(end)))
            })
            .collect();
        blocks.insert("kpoint_path", segments);
    }

    let random = inputs.settings.random_projections;
    if inputs.projections.is_some() || random {
        let lines = random
            .then(|| "random".to_owned())
            .into_iter()
            .chain(inputs.projections.iter().flatten().map(ToString::to_string))
            .collect();
        blocks.insert("projections", lines);
    }

    let mut lines: Vec<String> =
        parameters.iter().map(|(key, value)| format!("{key} = {value}")).collect();
    for (name, body) in blocks {
        lines.push(String::new());
        lines.push(format!("begin {name}"));
        lines.extend(body);
        lines.push(format!("end {name}"));
    }

    let mut win = lines.join("\n");
    win.push('\n');
    win
}

fn coords(c: &[f64; 3]) -> String {
    format!("{:.10} {:.10} {:.10}", c[0], c[1], c[2])
}
