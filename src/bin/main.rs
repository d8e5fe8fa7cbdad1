use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use jclass::config::Config;
use jclass::cpinfo::{self, ClassFileHeader};
use jclass::signature::{
    self, exclude_package_name, Signature, SignatureForm, TreePrinter, Visitable,
};

#[derive(Parser)]
#[command(name = "jclass")]
#[command(about = "Java class-file signature and constant pool tool")]
#[command(version)]
struct Cli {
    /// Accept class type signatures missing their terminating ';'
    #[arg(long, global = true)]
    lenient: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SignatureKind {
    Auto,
    Class,
    Method,
    Field,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a signature and print its internal and Java forms
    Parse {
        /// Signature text, e.g. "<T:Ljava/lang/Object;>(TT;)V"
        #[arg(value_name = "SIGNATURE")]
        signature: String,

        /// Grammar to parse with
        #[arg(short, long, value_enum, default_value = "auto")]
        kind: SignatureKind,

        /// Drop this package qualifier from every class type (repeatable)
        #[arg(short, long, value_name = "PACKAGE")]
        exclude: Vec<String>,
    },

    /// Print the node tree of a signature
    Tree {
        #[arg(value_name = "SIGNATURE")]
        signature: String,
    },

    /// Dump the constant pool of .class files
    Pool {
        /// Class files, or directories searched recursively
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        /// Check cross references between entries
        #[arg(long)]
        verify: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if cli.lenient {
        config.strict_class_terminator = false;
    }
    init_logging(&config);

    match &cli.command {
        Commands::Parse { signature, kind, exclude } => {
            parse_command(signature, *kind, exclude, &config)?;
        }
        Commands::Tree { signature } => {
            tree_command(signature, &config)?;
        }
        Commands::Pool { paths, verify } => {
            pool_command(paths, *verify)?;
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise debug mode shows parser traces
fn default_log_filter(config: &Config) -> &'static str {
    if config.debug {
        "trace"
    } else {
        "warn"
    }
}

fn init_logging(config: &Config) {
    let filter = env_logger::Env::default().default_filter_or(default_log_filter(config));
    let _ = env_logger::Builder::from_env(filter).try_init();
}

fn parse_as(text: &str, kind: SignatureKind, config: &Config) -> Result<Signature> {
    let config = config.clone();
    let parsed = match kind {
        SignatureKind::Auto => signature::parse_signature_with(text, config)?,
        SignatureKind::Class => signature::parse_class_signature_with(text, config)?.into(),
        SignatureKind::Method => signature::parse_method_signature_with(text, config)?.into(),
        SignatureKind::Field => Signature::Field(signature::parse_field_signature_with(text, config)?),
    };
    Ok(parsed)
}

fn parse_command(text: &str, kind: SignatureKind, exclude: &[String], config: &Config) -> Result<()> {
    let mut parsed = parse_as(text, kind, config).with_context(|| format!("cannot parse '{}'", text))?;
    for package in exclude {
        parsed = exclude_package_name(&parsed, package);
    }
    println!("kind:     {}", parsed.kind());
    println!("internal: {}", parsed.to_internal_form());
    println!("external: {}", parsed.to_external_form());
    Ok(())
}

fn tree_command(text: &str, config: &Config) -> Result<()> {
    let parsed = parse_as(text, SignatureKind::Auto, config).with_context(|| format!("cannot parse '{}'", text))?;
    let mut printer = TreePrinter::default();
    parsed.accept(&mut printer);
    print!("{}", printer.output);
    Ok(())
}

fn pool_command(paths: &[PathBuf], verify: bool) -> Result<()> {
    let mut failures = 0;
    for path in paths {
        for class_file in class_files(path) {
            if let Err(err) = dump_pool(&class_file, verify) {
                eprintln!("{}: {:#}", class_file.display(), err);
                failures += 1;
            }
        }
    }
    if failures > 0 {
        bail!("{} class file(s) failed", failures);
    }
    Ok(())
}

fn class_files(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }
    WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().map_or(false, |ext| ext == "class"))
        .collect()
}

fn dump_pool(path: &Path, verify: bool) -> Result<()> {
    let header = ClassFileHeader::open(path)?;
    println!(
        "{}: version {}.{}, {} constant pool slots",
        path.display(),
        header.major_version,
        header.minor_version,
        header.constant_pool.len()
    );
    for (index, constant) in header.constant_pool.iter() {
        println!("  {:>6} = {}", index.to_string(), constant);
    }
    if verify {
        let problems = cpinfo::verify_all(&header.constant_pool);
        for problem in &problems {
            println!("  error: {}", problem);
        }
        if !problems.is_empty() {
            bail!("{} constant pool problem(s)", problems.len());
        }
    }
    Ok(())
}
