use domain::{
    error::PrepareError,
    model::entity::{LocalCopy, RemoteCopy, RemoteFolder, Settings},
};
use regex::Regex;
use uuid::Uuid;

/// Inputs without which `wannier90.x` cannot start
const REQUIRED_EXTENSIONS: [&str; 2] = ["mmn", "amn"];

/// Extensions of `<seedname>.*` files read by `wannier90.x`
const INPUT_EXTENSIONS: [&str; 11] = [
    "mmn", "amn", "eig", "chk", "spn", "uHu", "uIu", "sHu", "sIu", "dmn", "nnkp",
];

const RETRIEVE_SUFFIXES: [&str; 4] = [".wout", ".werr", "_band.dat", "_band.kpt"];

/// Files of `folder_files` to copy into the job directory.
///
/// Fails when nothing is staged under `seedname` or a required input is absent.
pub(crate) fn local_copy_list(
    seedname: &str,
    folder_uuid: Uuid,
    folder_files: &[String],
    unk_file: &Regex,
) -> Result<Vec<LocalCopy>, PrepareError> {
    if !folder_files.iter().any(|f| in_family(f, seedname)) {
        return Err(PrepareError::invalid(format!(
            "local_input_folder has no files staged for seedname `{seedname}`"
        )));
    }

    let missing: Vec<String> = REQUIRED_EXTENSIONS
        .iter()
        .map(|ext| format!("{seedname}.{ext}"))
        .filter(|name| !folder_files.contains(name))
        .collect();
    if !missing.is_empty() {
        return Err(PrepareError::invalid(format!(
            "local_input_folder is missing {} for seedname `{seedname}`",
            missing.join(", ")
        )));
    }

    Ok(folder_files
        .iter()
        .filter(|f| unk_file.is_match(f) || is_input_file(f, seedname))
        .map(|f| LocalCopy::same_name(folder_uuid, f.as_str()))
        .collect())
}

/// Required inputs and wavefunction grids of a folder on the target computer.
pub(crate) fn remote_input_list(seedname: &str, folder: &RemoteFolder) -> Vec<RemoteCopy> {
    let base = folder.path.trim_end_matches('/');
    REQUIRED_EXTENSIONS
        .iter()
        .map(|ext| {
            let name = format!("{seedname}.{ext}");
            RemoteCopy {
                computer: folder.computer,
                source: format!("{base}/{name}"),
                target: name,
            }
        })
        .chain(std::iter::once(RemoteCopy {
            computer: folder.computer,
            source: format!("{base}/UNK*"),
            target: ".".to_owned(),
        }))
        .collect()
}

pub(crate) fn retrieve_list(seedname: &str, settings: &Settings) -> Result<Vec<String>, PrepareError> {
    let excludes = settings
        .exclude_retrieve_list
        .iter()
        .map(|pattern| {
            glob_to_regex(pattern).map_err(|e| {
                PrepareError::invalid(format!("invalid exclude_retrieve_list pattern `{pattern}`: {e}"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut list: Vec<String> = RETRIEVE_SUFFIXES
        .iter()
        .map(|suffix| format!("{seedname}{suffix}"))
        .filter(|name| !excludes.iter().any(|re| re.is_match(name)))
        .collect();
    if settings.postproc_setup {
        list.push(format!("{seedname}.nnkp"));
    }
    for extra in &settings.additional_retrieve_list {
        if !list.contains(extra) {
            list.push(extra.clone());
        }
    }
    Ok(list)
}

/// `<seedname>.*` or `<seedname>_*` at the top of the folder
fn in_family(name: &str, seedname: &str) -> bool {
    !name.contains('/')
        && name
            .strip_prefix(seedname)
            .is_some_and(|rest| rest.starts_with('.') || rest.starts_with('_'))
}

fn is_input_file(name: &str, seedname: &str) -> bool {
    name.strip_prefix(seedname)
        .and_then(|rest| rest.strip_prefix('.'))
        .is_some_and(|ext| INPUT_EXTENSIONS.contains(&ext))
}

/// Shell-style pattern (`*`, `?`, `[...]`, `[!...]`) as an anchored regex.
pub(crate) fn glob_to_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let mut re = String::from("^");
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            '[' => {
                re.push('[');
                if chars.peek() == Some(&'!') {
                    chars.next();
                    re.push('^');
                }
                for c in chars.by_ref() {
                    if c == ']' {
                        break;
                    }
                    if matches!(c, '[' | '\\' | '&' | '~') {
                        re.push('\\');
                    }
                    re.push(c);
                }
                re.push(']');
            }
            c => re.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    re.push('$');
    Regex::new(&re)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unk_file() -> Regex {
        Regex::new(r"^UNK\d{5}\.(\d+|NC)$").unwrap()
    }

    fn names(copies: &[LocalCopy]) -> Vec<&str> {
        let mut names: Vec<&str> = copies.iter().map(|c| c.target.as_str()).collect();
        names.sort();
        names
    }

    #[test]
    fn glob() {
        let re = glob_to_regex("*.werr").unwrap();
        assert!(re.is_match("aiida.werr"));
        assert!(!re.is_match("aiida.werr.bak"));

        let re = glob_to_regex("aiida_band.[!d]*").unwrap();
        assert!(re.is_match("aiida_band.kpt"));
        assert!(!re.is_match("aiida_band.dat"));

        assert!(glob_to_regex("a+b?.c").unwrap().is_match("a+b1.c"));
    }

    #[test]
    fn local_copies_skip_foreign_files() {
        let files: Vec<String> = [
            "UNK00001.1",
            "UNK00001.NC",
            "UNKNOWN.txt",
            "aiida.mmn",
            "aiida.amn",
            "aiida.eig",
            "aiida.wout",
            "other.mmn",
            "sub/aiida.chk",
        ]
        .map(String::from)
        .to_vec();

        let copies = local_copy_list("aiida", Uuid::nil(), &files, &unk_file()).unwrap();
        assert_eq!(
            names(&copies),
            vec!["UNK00001.1", "UNK00001.NC", "aiida.amn", "aiida.eig", "aiida.mmn"]
        );
        assert!(copies.iter().all(|c| c.uuid.is_nil() && c.source == c.target));
    }

    #[test]
    fn partial_file_set_is_rejected() {
        let files = vec!["UNK00001.1".to_owned(), "aiida.mmn".to_owned()];
        let err = local_copy_list("aiida", Uuid::nil(), &files, &unk_file()).unwrap_err();
        assert!(err.is_input_validation());
        assert!(err.to_string().contains("aiida.amn"));
    }

    #[test]
    fn seedname_prefix_is_not_a_family() {
        let files = vec!["aiida.mmn".to_owned(), "aiida.amn".to_owned()];
        let err = local_copy_list("a", Uuid::nil(), &files, &unk_file()).unwrap_err();
        assert!(err.is_input_validation());
    }

    #[test]
    fn remote_inputs() {
        let folder = RemoteFolder {
            computer: Uuid::nil(),
            path: "/scratch/pw/out/".to_owned(),
        };
        let list = remote_input_list("wannier", &folder);
        let sources: Vec<&str> = list.iter().map(|c| c.source.as_str()).collect();
        assert_eq!(
            sources,
            vec!["/scratch/pw/out/wannier.mmn", "/scratch/pw/out/wannier.amn", "/scratch/pw/out/UNK*"]
        );
        assert_eq!(list[2].target, ".");
    }

    #[test]
    fn retrieve_exclusions_and_additions() {
        let settings = Settings {
            exclude_retrieve_list: vec!["*_band.*".to_owned()],
            additional_retrieve_list: vec!["aiida_hr.dat".to_owned(), "aiida.wout".to_owned()],
            ..Default::default()
        };
        assert_eq!(
            retrieve_list("aiida", &settings).unwrap(),
            vec!["aiida.wout", "aiida.werr", "aiida_hr.dat"]
        );

        let settings = Settings {
            exclude_retrieve_list: vec!["[".to_owned()],
            ..Default::default()
        };
        assert!(retrieve_list("aiida", &settings).unwrap_err().is_input_validation());
    }
}
