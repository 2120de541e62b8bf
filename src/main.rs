use clap::{Parser, Subcommand};
use lopgl_webpage::catalog::Catalog;
use lopgl_webpage::config::{self, SiteConfig};
use lopgl_webpage::deploy::{self, Deployer};
use lopgl_webpage::filesystem::{self, StdFs};
use lopgl_webpage::layout::Layout;
use lopgl_webpage::output;
use lopgl_webpage::serve::{self, ServeOutcome};
use lopgl_webpage::toolchain::{FipsToolchain, HostPlatform};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "lopgl-webpage")]
#[command(about = "Build and serve the learnopengl-examples webpage")]
#[command(long_about = "\
Build and serve the learnopengl-examples webpage

The project directory sits inside a fips workspace. Compiled examples are
read from, and the webpage is written to, the workspace's fips-deploy/:

  <workspace>/
  ├── learnopengl-examples/              # --project
  │   ├── webpage.toml                   # optional config
  │   └── webpage/                       # templates, support files, screenshots
  ├── fips-sdks/emsdk/                   # examples are compiled when present
  └── fips-deploy/
      ├── learnopengl-examples/webgl2-wasm-ninja-release/
      └── learnopengl-examples-webpage/  # output

Run 'lopgl-webpage gen-config' to generate a documented webpage.toml.")]
#[command(version)]
struct Cli {
    /// Project directory
    #[arg(long, default_value = ".", global = true)]
    project: PathBuf,

    /// Log every file written and copied
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Compile the examples and deploy the webpage, keeping earlier files
    Build,
    /// Like build, but clear the deployment directory first
    Rebuild,
    /// Serve the deployed webpage locally
    Serve,
    /// Validate config, catalog and templates without building
    Check,
    /// Print a stock webpage.toml with all options documented
    GenConfig,
}

/// Message for a run without a command.
const MISSING_COMMAND: &str = "Param 'build' or 'serve' expected";

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    dispatch(cli)
}

fn dispatch(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let Some(command) = cli.command else {
        eprintln!("{MISSING_COMMAND}");
        return Ok(ExitCode::FAILURE);
    };

    match command {
        Command::Build => build(&cli.project, false)?,
        Command::Rebuild => build(&cli.project, true)?,
        Command::Serve => {
            let config = config::load_config(&cli.project)?;
            let layout = Layout::resolve(&cli.project, &config)?;
            let platform = HostPlatform::detect()?;
            println!("==> Serving {}", layout.deploy_dir.display());
            match serve::serve(&layout.deploy_dir, &config.server.command, platform)? {
                ServeOutcome::Interrupted => println!("==> Server stopped"),
                ServeOutcome::Exited => println!("==> Server exited"),
            }
        }
        Command::Check => {
            let config = config::load_config(&cli.project)?;
            let layout = Layout::resolve(&cli.project, &config)?;
            println!("==> Checking {}", layout.project_dir.display());
            let catalog = load_catalog(&layout, &config)?;
            output::print_catalog_output(&catalog);
            println!();
            let checks = deploy::check_templates(&StdFs, &layout, &config)?;
            output::print_template_checks(&checks);
            println!("==> Project is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// `RUST_LOG` wins; otherwise warnings, or everything with `-v`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn load_catalog(layout: &Layout, config: &SiteConfig) -> Result<Catalog, Box<dyn std::error::Error>> {
    let catalog = match layout.catalog_path(config) {
        Some(path) => Catalog::load(&path)?,
        None => Catalog::builtin()?,
    };
    Ok(catalog)
}

fn build(project: &Path, rebuild: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = config::load_config(project)?;
    let layout = Layout::resolve(project, &config)?;
    let catalog = load_catalog(&layout, &config)?;
    let platform = HostPlatform::detect()?;
    let toolchain = FipsToolchain::new(&layout, platform);

    println!(
        "==> {} {} examples for {}",
        if rebuild { "Rebuilding" } else { "Building" },
        catalog.example_count(),
        platform.name()
    );
    let report = Deployer::new(&StdFs, &toolchain, &layout, &config, &catalog).run(rebuild)?;
    output::print_deploy_output(&report);

    let on_disk = filesystem::list_files(&layout.deploy_dir).len();
    let earlier = on_disk.saturating_sub(report.pages.len() + report.copied());
    if earlier > 0 {
        println!("{earlier} files from earlier runs remain (use `rebuild` to clear them)");
    }
    println!(
        "==> Generated examples web page under {}",
        layout.deploy_dir.display()
    );
    Ok(())
}
