//! Reports which bridged OS primitives this build carries, and can
//! exercise the descriptor-creation path end to end for target diagnosis.

use anyhow::Result;
use clap::Parser;
use karst_os::feature::{self, Feature};

#[derive(Parser)]
#[command(name = "karst-os-probe")]
#[command(about = "Report availability of bridged OS primitives.", long_about = None)]
struct Cli {
    /// Print one `name available|unavailable` line per bridged primitive.
    #[arg(long)]
    list: bool,

    /// Create and close an epoll descriptor through the bridge.
    #[arg(long)]
    epoll: bool,
}

fn main() -> std::process::ExitCode {
    match try_main() {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("karst-os-probe: {err:#}");
            std::process::ExitCode::from(2)
        }
    }
}

fn try_main() -> Result<()> {
    // Test hook: drive the fatal stub path without needing a foreign build
    // target.
    if let Ok(name) = std::env::var("KARST_PROBE_FORCE_STUB") {
        feature::feature_failure(&name);
    }

    let cli = Cli::parse();

    if cli.list {
        for f in feature::ALL {
            let state = if f.available() {
                "available"
            } else {
                "unavailable"
            };
            println!("{} {}", f.name(), state);
        }
    }

    if cli.epoll {
        probe_epoll()?;
    }

    Ok(())
}

fn probe_epoll() -> Result<()> {
    use karst_tagged::Tagged;

    if !Feature::EpollCreate1.available() {
        anyhow::bail!("{} is unavailable on this target", Feature::EpollCreate1.name());
    }
    let out = karst_os::epoll::karst_linux_epoll_create1(Tagged::fixnum(0));
    let n = out.to_fixnum();
    if n < 0 {
        anyhow::bail!("epoll_create1 failed: errno {}", -n);
    }
    println!("epoll_create1(0) -> fd {n}");
    let rv = unsafe { libc::close(out.to_raw_fd()) };
    if rv != 0 {
        anyhow::bail!("close({n}) failed");
    }
    Ok(())
}
