//! # ga-hit
//!
//! Command-line front end for sending Measurement Protocol hits.
//!
//! Usage:
//!   ga-hit send --tid UA-XXXXX-Y --dp /home
//!   ga-hit debug --tid UA-XXXXX-Y --type event -p ec=video -p ea=play
//!   ga-hit prepare --tid UA-XXXXX-Y --uid user-1 --no-auto-cid
//!   ga-hit client-id --cookie-jar ~/.ga-hit/cookies.json
//!
//! Set `RUST_LOG=debug` to see payloads and response status lines.

use clap::{Args, Parser, Subcommand};
use simple_ga::{
    ClientConfig, ClientIdStore, FileStore, HitOptions, HitType, HttpTransport, MemoryStore,
    Tracker,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ga-hit")]
#[command(about = "Send hits to the Measurement Protocol collect endpoint", long_about = None)]
struct Cli {
    /// Collection host (overrides SIMPLE_GA_HOST)
    #[arg(long, global = true)]
    host: Option<String>,

    /// JSON cookie jar holding the client id across runs (default: in-memory)
    #[arg(long, global = true)]
    cookie_jar: Option<PathBuf>,

    /// Do not generate a client id; --cid or --uid must be given
    #[arg(long, global = true)]
    no_auto_cid: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a hit to the production endpoint
    Send(HitArgs),

    /// Send a hit to the validation endpoint and print the verdict
    Debug(HitArgs),

    /// Print the encoded payload without sending it
    Prepare(HitArgs),

    /// Print the client id, creating it if needed
    ClientId,
}

#[derive(Args)]
struct HitArgs {
    /// Tracking ID, e.g. UA-XXXXX-Y
    #[arg(long)]
    tid: Option<String>,

    /// Hit type (pageview, event, ...)
    #[arg(long = "type")]
    hit_type: Option<HitType>,

    /// Document path
    #[arg(long)]
    dp: Option<String>,

    /// Document title
    #[arg(long)]
    dt: Option<String>,

    /// Client ID
    #[arg(long)]
    cid: Option<String>,

    /// User ID
    #[arg(long)]
    uid: Option<String>,

    /// Extra parameter as key=value (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_param)]
    params: Vec<(String, String)>,
}

impl HitArgs {
    fn into_options(self) -> HitOptions {
        let mut opts = HitOptions::new();
        opts.tid = self.tid;
        opts.t = self.hit_type;
        opts.dp = self.dp;
        opts.dt = self.dt;
        opts.cid = self.cid;
        opts.uid = self.uid;
        self.params
            .into_iter()
            .fold(opts, |opts, (key, value)| opts.param(key, value))
    }
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got {:?}", raw)),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?.with_auto_generate_cid(!cli.no_auto_cid);
    if let Some(host) = cli.host {
        config = config.with_host(host);
    }

    let store: Box<dyn ClientIdStore> = match cli.cookie_jar {
        Some(path) => Box::new(FileStore::new(path)),
        None => Box::new(MemoryStore::new()),
    };
    let transport = HttpTransport::from_config(&config)?;

    match cli.command {
        Commands::ClientId => {
            // Always resolve an id here, regardless of --no-auto-cid.
            let tracker = Tracker::new(config.with_auto_generate_cid(true), store, transport)?;
            if let Some(cid) = tracker.client_id() {
                println!("{}", cid);
            }
        }

        Commands::Prepare(args) => {
            let tracker = Tracker::new(config, store, transport)?;
            println!("{}", tracker.prepare(&args.into_options())?);
        }

        Commands::Send(args) => {
            let tracker = Tracker::new(config, store, transport)?;
            if tracker.send(&args.into_options())? {
                println!("Success!");
            }
        }

        Commands::Debug(args) => {
            let tracker = Tracker::new(config, store, transport)?;
            let hit = tracker.debug(&args.into_options())?;
            println!("{}", serde_json::to_string_pretty(&hit)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("cd1=a=b").unwrap(),
            ("cd1".to_string(), "a=b".to_string())
        );
        assert!(parse_param("novalue").is_err());
        assert!(parse_param("=x").is_err());
    }

    #[test]
    fn test_cli_into_options() {
        let cli = Cli::parse_from([
            "ga-hit", "debug", "--tid", "UA-1-1", "--type", "event", "-p", "ec=video",
        ]);
        let Commands::Debug(args) = cli.command else {
            panic!("expected debug subcommand");
        };
        let opts = args.into_options();
        assert_eq!(opts.tid.as_deref(), Some("UA-1-1"));
        assert_eq!(opts.t, Some(HitType::Event));
        assert_eq!(opts.extra, vec![("ec".to_string(), "video".to_string())]);
    }
}
