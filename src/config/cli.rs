use crate::config::target::Overrides;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "crane", version)]
#[command(about = "Manage services in the catalog")]
pub struct CliConfig {
    #[arg(long, help = "API target URL (overrides CRANE_TARGET and config.toml)")]
    pub target: Option<String>,

    #[arg(long, help = "Authentication token (overrides CRANE_TOKEN and config.toml)")]
    pub token: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit log lines as JSON")]
    pub log_json: bool,

    /// Command to run; omit to list available commands
    pub command: Option<String>,

    /// Arguments passed to the command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl CliConfig {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            target: self.target.clone(),
            token: self.token.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdin_marker_and_flags_pass_through() {
        let config = CliConfig::try_parse_from(["crane", "--target", "http://localhost:8080", "create", "-"]).unwrap();
        assert_eq!(config.target.as_deref(), Some("http://localhost:8080"));
        assert_eq!(config.command.as_deref(), Some("create"));
        assert_eq!(config.args, vec!["-"]);
    }

    #[test]
    fn test_command_arguments() {
        let config = CliConfig::try_parse_from(["crane", "-v", "doc-add", "serv", "doc.md"]).unwrap();
        assert!(config.verbose);
        assert_eq!(config.command.as_deref(), Some("doc-add"));
        assert_eq!(config.args, vec!["serv", "doc.md"]);

        let config = CliConfig::try_parse_from(["crane"]).unwrap();
        assert_eq!(config.command, None);
        assert!(config.args.is_empty());
    }
}
