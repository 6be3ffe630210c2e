//! Reading and writing plant configs as YAML files.
//!
//! Prediction-mode deployments keep the fixed episode parameters of a plant
//! in a file instead of receiving them from the platform; these helpers
//! cover that path for any config record of a descriptor.
use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Reads a config record from a YAML file.
pub fn load_config<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let file = File::open(path)?;
    let rdr = BufReader::new(file);
    let config = serde_yaml::from_reader(rdr)?;
    Ok(config)
}

/// Writes a config record to a YAML file.
pub fn save_config<T: Serialize>(config: &T, path: impl AsRef<Path>) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(serde_yaml::to_string(config)?.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load_config, save_config};
    use serde::{Deserialize, Serialize};
    use tempdir::TempDir;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Knobs {
        phase: f64,
        gain: f64,
    }

    #[test]
    fn config_survives_a_file_round_trip() {
        let dir = TempDir::new("simbridge-config").unwrap();
        let path = dir.path().join("knobs.yaml");
        let knobs = Knobs {
            phase: 0.25,
            gain: 30.0,
        };
        save_config(&knobs, &path).unwrap();
        let loaded: Knobs = load_config(&path).unwrap();
        assert_eq!(loaded, knobs);
    }
}
