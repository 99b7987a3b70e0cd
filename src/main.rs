//! hostinfo - Host Diagnostics Server Binary
//!
//! Opens an HTTP server on the given port and answers requests with
//! information about the host.

use clap::{error::ErrorKind, Parser};
use hostinfo::{HostInfoError, ProcFs, Server, ServerConfig};
use std::process::ExitCode;
use tracing::{error, info, Level};
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

const ROUTES_HELP: &str = "Possible requests:
  hostname    Send hostname of the machine the server runs on
  cpu-name    Send name of the CPU and on some platforms brief information about it
  load        Send current load of the CPU";

#[derive(Parser, Debug)]
#[command(name = "hostinfo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Opens an HTTP server on the given port and responds to HTTP requests with information about the host.")]
#[command(after_help = ROUTES_HELP)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// TCP port to listen on (0-65535)
    port: u16,

    /// Bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum ReturnCode {
    NoError = 0,
    ArgumentError = 1,
    ServerSocketSetupError = 2,
}

impl From<ReturnCode> for ExitCode {
    fn from(code: ReturnCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Parse arguments, printing help or usage to stderr when parsing stops.
fn parse_args<I, T>(args: I) -> Result<Cli, ReturnCode>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(|err| match err.kind() {
        ErrorKind::DisplayHelp => {
            eprint!("{}", err.render());
            ReturnCode::NoError
        }
        ErrorKind::DisplayVersion => {
            print!("{}", err.render());
            ReturnCode::NoError
        }
        _ => {
            eprint!("{}", err.render());
            ReturnCode::ArgumentError
        }
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(code) => return code.into(),
    };

    if let Err(e) = init_logging(&cli) {
        eprintln!("Failed to initialize logging: {e:#}");
    }

    serve(&cli).await.into()
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

async fn serve(cli: &Cli) -> ReturnCode {
    let config = ServerConfig::new(&cli.host, cli.port);
    info!("Starting hostinfo on {}", config.bind_address());

    let server = match Server::bind(&config, ProcFs::new(&config.proc_root)).await {
        Ok(server) => server,
        Err(e) => {
            report_startup_error(&e);
            return ReturnCode::ServerSocketSetupError;
        }
    };

    server.run().await;
    ReturnCode::NoError
}

fn report_startup_error(e: &HostInfoError) {
    error!("{}", e);
    // Logging may be filtered out; setup failures must always be visible
    if !tracing::enabled!(Level::ERROR) {
        eprintln!("[ERROR] {}", e);
    }
}
