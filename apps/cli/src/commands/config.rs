//! Prints the effective configuration after file and environment merging.

use std::io::Write;

use crate::config::AppConfig;
use crate::error::CliResult;

pub fn show(config: &AppConfig, out: &mut impl Write) -> CliResult<()> {
    write!(out, "{}", config.to_toml()?)?;
    writeln!(out, "# store directory: {}", config.store_dir().display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_show_includes_sections() {
        let mut config = AppConfig::default();
        config.store.dir = Some(PathBuf::from("/data/carts"));

        let mut out = Vec::new();
        show(&config, &mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();

        assert!(printed.contains("[offers]"));
        assert!(printed.contains("base_url = \"http://henri-potier.xebia.fr\""));
        assert!(printed.contains("key = \"cpascher_cart\""));
        assert!(printed.contains("ttl_days = 1"));
        assert!(printed.ends_with("# store directory: /data/carts\n"));
    }
}
