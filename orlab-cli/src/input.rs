use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Read a JSON problem from a file, or from stdin when the path is `-`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read problem from stdin")?;
        return serde_json::from_str(&buf).context("Invalid problem JSON on stdin");
    }

    let file = File::open(path).with_context(|| format!("Failed to open problem file: {:?}", path))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid problem JSON in {:?}", path))
}

/// Read engine settings, or the defaults when no file is given.
pub fn read_settings<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T> {
    match path {
        Some(path) => read_json(path).context("Failed to load settings"),
        None => Ok(T::default()),
    }
}

/// Print a result as JSON on stdout.
pub fn write_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use orlab_mip::{BnbSettings, IntegerProgram};

    #[test]
    fn test_read_problem_file() {
        let path = std::env::temp_dir().join(format!("orlab-ip-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"c": [5, 8], "a_ub": [[1, 1], [5, 9]], "b_ub": [6, 45], "maximize": true}"#).unwrap();

        let prob: IntegerProgram = read_json(&path).unwrap();
        assert_eq!(prob.c, vec![5.0, 8.0]);
        assert!(prob.maximize);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_partial_settings_keep_defaults() {
        let path = std::env::temp_dir().join(format!("orlab-settings-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"max_nodes": 25}"#).unwrap();

        let settings: BnbSettings = read_settings(Some(&path)).unwrap();
        assert_eq!(settings.max_nodes, 25);
        assert_eq!(settings.record_cap, BnbSettings::default().record_cap);
        std::fs::remove_file(&path).unwrap();

        let defaults: BnbSettings = read_settings(None).unwrap();
        assert_eq!(defaults, BnbSettings::default());
    }

    #[test]
    fn test_settings_for_wrong_engine_rejected() {
        let path = std::env::temp_dir().join(format!("orlab-bad-settings-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"max_iter": 5}"#).unwrap();

        let err = read_settings::<BnbSettings>(Some(&path)).unwrap_err();
        assert!(format!("{:#}", err).contains("max_iter"));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = read_json::<IntegerProgram>(Path::new("/nonexistent/ip.json")).unwrap_err();
        assert!(format!("{}", err).contains("/nonexistent/ip.json"));
    }
}
