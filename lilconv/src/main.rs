use std::collections::HashSet;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lilconv::bake::PngPacker;
use lilconv::codegen::write_document;
use lilconv::config::{LanguageSetting, DEFAULT_CONFIG};
use lilconv::messages::DIALOG_TITLE;
use lilconv::{AoPolicy, BatchReport, Config, Confirm, Converter, Language, Text};
use toon_xml::MaterialDocument;

#[derive(Parser, Debug)]
#[command(name = "lilconv", version, about = "Convert UnityChanToonShader materials to lilToon")]
struct Cli {
    /// Settings file (defaults to ./lilconv.xml when it exists)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum)]
    lang: Option<LanguageSetting>,
    /// Whether to pack two different AO masks into one new texture
    #[arg(long, value_enum)]
    ao_bake: Option<AoPolicy>,
    /// Directory texture paths in the documents are relative to
    #[arg(long)]
    asset_root: Option<PathBuf>,
    /// Write converted documents here instead of rewriting the inputs
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Rewrite inputs in place without asking
    #[arg(short, long)]
    yes: bool,
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

/// Asks on the terminal; anything but the "yes" answer declines.
struct Prompt;

impl Confirm for Prompt {
    fn confirm(&mut self, message: &str, yes: &str, no: &str) -> bool {
        let mut stderr = io::stderr();
        let _ = write!(stderr, "[{DIALOG_TITLE}]\n{message}\n({yes}/{no}) ");
        let _ = stderr.flush();

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        let answer = line.trim();
        answer == yes || answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .init();

    run(cli)
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display())),
        None if Path::new(DEFAULT_CONFIG).exists() => {
            Config::load(DEFAULT_CONFIG).with_context(|| format!("loading {DEFAULT_CONFIG}"))
        }
        None => Ok(Config::default()),
    }
}

fn run(cli: Cli) -> Result<()> {
    let flags = Config {
        language: cli.lang,
        ao_bake: cli.ao_bake,
        asset_root: cli.asset_root.clone(),
    };
    let settings = load_config(cli.config.as_deref())?.merge(flags).resolve();
    let language = settings.language;
    let outputs = output_paths(&cli.files, cli.out_dir.as_deref())?;

    if cli.out_dir.is_none()
        && !cli.yes
        && !Prompt.confirm(
            language.text(Text::BeforeConvert),
            language.text(Text::Ok),
            language.text(Text::Cancel),
        )
    {
        info!("cancelled");
        return Ok(());
    }

    if let Some(dir) = &cli.out_dir {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut converter = Converter::new(
        language,
        settings.ao_bake,
        PngPacker::new(settings.asset_root),
        Prompt,
    );

    let mut report = BatchReport::default();
    for (input, output) in cli.files.iter().zip(&outputs) {
        report.merge(convert_file(&mut converter, input, output)?);
    }

    finish(&report, language);
    Ok(())
}

/// Where each input is written. Two inputs may not share an output.
fn output_paths(inputs: &[PathBuf], out_dir: Option<&Path>) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut outputs = Vec::with_capacity(inputs.len());
    for input in inputs {
        let output = output_path(input, out_dir)?;
        if !seen.insert(output.clone()) {
            bail!(
                "{} would overwrite the output of an earlier input ({})",
                input.display(),
                output.display()
            );
        }
        outputs.push(output);
    }
    Ok(outputs)
}

fn output_path(input: &Path, out_dir: Option<&Path>) -> Result<PathBuf> {
    let Some(dir) = out_dir else {
        return Ok(input.to_owned());
    };
    let Some(name) = input.file_name() else {
        bail!("{} is not a file", input.display());
    };
    Ok(dir.join(name))
}

fn convert_file(
    converter: &mut Converter<PngPacker, Prompt>,
    input: &Path,
    output: &Path,
) -> Result<BatchReport> {
    let mut doc =
        MaterialDocument::load(input).with_context(|| format!("reading {}", input.display()))?;
    let report = converter.convert_document(&mut doc);

    std::fs::write(output, write_document(&doc))
        .with_context(|| format!("writing {}", output.display()))?;
    info!(
        input = %input.display(),
        output = %output.display(),
        converted = report.converted.len(),
        "document written"
    );
    Ok(report)
}

fn finish(report: &BatchReport, language: Language) {
    if let Some(message) = report.unsupported_message(language) {
        println!("{message}");
    }
    for name in &report.shader_missing {
        println!("{name}: lilToon variant not found, shader left unchanged");
    }
    for texture in &report.baked {
        println!("{texture}");
    }
    println!("{}", language.text(Text::Complete));
}
