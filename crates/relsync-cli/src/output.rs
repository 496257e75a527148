//! Output formatting for the CLI.

use console::style;
use relsync_core::SyncReport;
use serde::Serialize;
use std::fmt::Write;

/// Output format for the run report.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

/// Render `value` in the specified format.
///
/// # Errors
/// Returns error if the value cannot be serialized.
pub fn render<T: Serialize + HumanDisplay>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Human => value.human_display(),
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    })
}

/// Print output in the specified format.
///
/// # Errors
/// Returns error if the value cannot be serialized.
pub fn print<T: Serialize + HumanDisplay>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

/// Print a success message.
pub fn print_success(message: &str, format: OutputFormat) {
    match format {
        OutputFormat::Human => println!("{message}"),
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "status": "ok", "message": message }));
        }
        OutputFormat::Yaml => {
            println!("status: ok\nmessage: {message:?}");
        }
    }
}

/// Trait for human-readable display.
pub trait HumanDisplay {
    fn human_display(&self) -> String;
}

impl HumanDisplay for SyncReport {
    fn human_display(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "Version:   {}", style(&self.version).bold());
        let _ = writeln!(
            out,
            "Updated:   {}",
            format_keys(&self.issue_keys, |k| style(k).green().to_string())
        );
        let _ = write!(
            out,
            "Failed:    {}",
            format_keys(&self.failed_keys, |k| style(k).red().to_string())
        );

        out
    }
}

fn format_keys(keys: &[String], paint: impl Fn(&str) -> String) -> String {
    if keys.is_empty() {
        return "-".to_string();
    }
    keys.iter().map(|k| paint(k)).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn report() -> SyncReport {
        SyncReport {
            version: "v1.0.0".to_string(),
            issue_keys: vec!["ABC-1".to_string(), "ABC-2".to_string()],
            failed_keys: vec![],
        }
    }

    #[test]
    fn test_human_display() {
        console::set_colors_enabled(false);

        assert_eq!(
            report().human_display(),
            "Version:   v1.0.0\nUpdated:   ABC-1, ABC-2\nFailed:    -"
        );
    }

    #[test]
    fn test_render_json() {
        let json = render(&report(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "version": "v1.0.0",
                "issue_keys": ["ABC-1", "ABC-2"],
                "failed_keys": []
            })
        );
    }

    #[test]
    fn test_render_yaml() {
        let yaml = render(&report(), OutputFormat::Yaml).unwrap();

        assert!(yaml.contains("version: v1.0.0"));
        assert!(yaml.contains("- ABC-1"));
    }
}
