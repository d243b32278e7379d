//! CLI argument parsing.

use clap::{Parser, Subcommand};

use brightpath_core::Config;

#[derive(Parser, Debug)]
#[command(name = "brightpath-server", version, about = "Document-to-lesson conversion server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server (default).
    Serve {
        /// Bind address; overrides HOST.
        #[arg(long)]
        host: Option<String>,
        /// Listen port; overrides PORT.
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Apply command-line overrides on top of the environment config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(Command::Serve { host, port }) = &self.command {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_flags_override_config() {
        let cli = Cli::parse_from(["brightpath-server", "serve", "--host", "127.0.0.1", "--port", "8080"]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn no_subcommand_keeps_config() {
        let cli = Cli::parse_from(["brightpath-server"]);
        assert!(cli.command.is_none());
        let mut config = Config::default();
        let before = config.server.port;
        cli.apply(&mut config);
        assert_eq!(config.server.port, before);
    }
}
