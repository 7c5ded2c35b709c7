use std::{fs, path::Path};

use anyhow::Context;
use dicecup_engine::RollerConfig;
use encoding_rs::Encoding;

/// Defaults when no file is given; otherwise the YAML file must parse.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<RollerConfig> {
    let Some(path) = path else {
        return Ok(RollerConfig::default());
    };
    let text = read_text_auto(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    RollerConfig::from_yaml_str(&text)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

/// Read a text file, honouring a UTF-8/UTF-16 BOM when one is present.
fn read_text_auto(path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(path)?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}
