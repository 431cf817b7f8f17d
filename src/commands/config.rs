use anyhow::Result;
use std::io::Write;

use crate::{
    config::{Settings, config_file_path},
    runtime::Runtime,
};

pub fn show_config<R: Runtime, W: Write>(
    runtime: &R,
    league: Option<String>,
    api_url: Option<String>,
    out: &mut W,
) -> Result<()> {
    let settings = Settings::resolve(runtime, league, api_url)?;

    writeln!(
        out,
        "League: {} [{}]",
        settings.league.value, settings.league.source
    )?;
    writeln!(
        out,
        "API URL: {} [{}]",
        settings.api_url.value, settings.api_url.source
    )?;
    match config_file_path(runtime) {
        Some(path) if runtime.exists(&path) => writeln!(out, "Config file: {}", path.display())?,
        Some(path) => writeln!(out, "Config file: {} (not found)", path.display())?,
        None => writeln!(out, "Config file: (no config directory)")?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use std::path::PathBuf;

    #[test]
    fn test_show_config_defaults() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_config_dir()
            .returning(|| Some(PathBuf::from("/home/user/.config")));
        runtime
            .expect_env_var()
            .returning(|_| Err(std::env::VarError::NotPresent));
        runtime.expect_exists().returning(|_| false);

        let mut out = Vec::new();
        show_config(&runtime, None, None, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("League: Standard [default]"));
        assert!(out.contains("API URL: https://www.poeprices.info/api [default]"));
        assert!(out.contains("(not found)"));
    }

    #[test]
    fn test_show_config_flag_source() {
        let mut runtime = MockRuntime::new();
        runtime.expect_config_dir().returning(|| None);
        runtime
            .expect_env_var()
            .returning(|_| Err(std::env::VarError::NotPresent));

        let mut out = Vec::new();
        show_config(&runtime, Some("Hardcore".to_string()), None, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("League: Hardcore [command line]"));
        assert!(out.contains("(no config directory)"));
    }
}
