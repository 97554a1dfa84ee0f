use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use ora_tools_lib::config::Settings;
use ora_tools_lib::logging::{init_logging, LogConfig};
use ora_tools_lib::oracle::{
  check_output, load_registry, resolve_environment, ComponentFilter, LoadOutcome, ALL_COMPONENTS,
};
use ora_tools_lib::util::{chunk_string, check_toolchain, convert_size, dump_config};

#[derive(Parser)]
#[command(name = "oratool", version, about = "Oracle host helper: oratab, environment and error checks")]
struct Cli {
  /// Debug logging with module paths
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Errors only
  #[arg(short, long, global = true)]
  quiet: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Print the oratab SID to ORACLE_HOME mapping as JSON
  Oratab {
    #[arg(long)]
    oratab: Option<String>,
  },
  /// Print shell exports for a SID (use with eval)
  Env {
    sid: String,
    #[arg(long)]
    oratab: Option<String>,
  },
  /// Scan command output (file or stdin) for Oracle message codes
  Check {
    /// Component to check (repeatable); default is all components
    #[arg(short, long = "component", default_value = ALL_COMPONENTS)]
    components: Vec<String>,
    /// Installation home; defaults to $ORACLE_HOME
    #[arg(long)]
    home: Option<PathBuf>,
    /// File to scan; stdin when omitted or "-"
    file: Option<PathBuf>,
  },
  /// Format a byte count
  Size { bytes: u128 },
  /// Split text into fixed-width chunks, one per line
  Chunk { width: usize, text: String },
  /// Print an INI configuration file
  DumpConfig { file: PathBuf },
  /// Print versions and check the build toolchain is supported
  Version,
}

fn print_json<T: serde::Serialize>(value: &T) {
  match serde_json::to_string_pretty(value) {
    Ok(s) => println!("{}", s),
    Err(e) => eprintln!("failed to serialize: {}", e),
  }
}

fn cmd_oratab(oratab: Option<&str>) -> i32 {
  match load_registry(oratab) {
    Ok(LoadOutcome::Loaded { path, registry }) => {
      print_json(&serde_json::json!({ "path": path, "sids": registry }));
      0
    }
    Ok(LoadOutcome::NotFound { searched }) => {
      eprintln!("No oratab found. Searched: {:?}", searched);
      print_json(&serde_json::json!({ "path": null, "sids": {} }));
      0
    }
    Err(e) => {
      eprintln!("{}", e);
      e.exit_code()
    }
  }
}

fn cmd_env(sid: &str, oratab: Option<&str>) -> i32 {
  let settings = Settings::default();
  let registry = match load_registry(oratab) {
    Ok(outcome) => outcome.into_registry(),
    Err(e) => {
      eprintln!("{}", e);
      return e.exit_code();
    }
  };

  let current = settings.library_path();
  match resolve_environment(sid, &registry, current.as_deref()) {
    Some(env) => {
      match std::io::stdout().lock().write_all(&env.shell_exports(&settings)) {
        Ok(()) => 0,
        Err(e) => {
          eprintln!("Cannot write exports: {}", e);
          2
        }
      }
    }
    None => {
      eprintln!("SID '{}' not found in oratab", sid);
      1
    }
  }
}

fn read_input(file: Option<&PathBuf>) -> std::io::Result<String> {
  match file {
    Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path),
    _ => {
      let mut buf = String::new();
      std::io::stdin().read_to_string(&mut buf)?;
      Ok(buf)
    }
  }
}

fn cmd_check(components: Vec<String>, home: Option<PathBuf>, file: Option<&PathBuf>) -> i32 {
  let output = match read_input(file) {
    Ok(text) => text,
    Err(e) => {
      eprintln!("Cannot read input: {}", e);
      return 2;
    }
  };

  let home = home.or_else(|| Settings::default().oracle_home());
  let filter = ComponentFilter::from_components(components);
  match check_output(&output, home.as_deref(), &filter) {
    Ok(report) => {
      print_json(&report);
      report.exit_code()
    }
    Err(e) => {
      eprintln!("{}", e);
      e.exit_code()
    }
  }
}

fn cmd_dump_config(file: &Path) -> i32 {
  let mut stdout = std::io::stdout().lock();
  match dump_config(file, &mut stdout) {
    Ok(()) => 0,
    Err(e) => {
      log::error!("Error parsing config file {}: {}", file.display(), e);
      eprintln!("{}", e);
      e.exit_code()
    }
  }
}

fn cmd_version() -> i32 {
  println!("oratool {}", env!("CARGO_PKG_VERSION"));
  match check_toolchain() {
    Ok(v) => {
      println!("toolchain {}", v);
      0
    }
    Err(e) => {
      eprintln!("Error: {}", e);
      e.exit_code()
    }
  }
}

fn main() {
  let cli = Cli::parse();
  init_logging(LogConfig::from_flags(cli.verbose, cli.quiet));

  let code = match cli.command {
    Command::Oratab { oratab } => cmd_oratab(oratab.as_deref()),
    Command::Env { sid, oratab } => cmd_env(&sid, oratab.as_deref()),
    Command::Check { components, home, file } => cmd_check(components, home, file.as_ref()),
    Command::Size { bytes } => {
      println!("{}", convert_size(bytes));
      0
    }
    Command::Chunk { width, text } => {
      for chunk in chunk_string(&text, width) {
        println!("{}", chunk);
      }
      0
    }
    Command::DumpConfig { file } => cmd_dump_config(&file),
    Command::Version => cmd_version(),
  };

  std::process::exit(code);
}
