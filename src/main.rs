use clap::Parser;
use quire::{Engine, ReportError};
use std::path::PathBuf;
use std::process::ExitCode;

/// Generate a PDF report from an XML template and JSON data.
#[derive(Parser, Debug)]
#[command(name = "quire", version, about)]
struct Cli {
    /// Path to the XML template file
    #[arg(long)]
    template: PathBuf,

    /// Path to the JSON data file
    #[arg(long)]
    data: Option<PathBuf>,

    /// Path for the output PDF file
    #[arg(long, default_value = "output.pdf")]
    output: PathBuf,

    /// Only validate the template without generating a PDF
    #[arg(long)]
    validate: bool,

    /// Base directory for relative font paths
    #[arg(long)]
    font_dir: Option<PathBuf>,

    /// Base directory for relative image paths
    #[arg(long)]
    image_dir: Option<PathBuf>,

    /// Compress PDF streams
    #[arg(long)]
    compress: bool,
}

fn run(cli: &Cli) -> Result<(), ReportError> {
    let mut builder = Engine::builder().compression(cli.compress);
    if let Some(dir) = &cli.font_dir {
        builder = builder.font_dir(dir);
    }
    if let Some(dir) = &cli.image_dir {
        builder = builder.image_dir(dir);
    }
    let mut engine = builder.build();

    engine.load_template(&cli.template)?;
    if cli.validate {
        println!("Template validation successful");
        return Ok(());
    }
    if let Some(data) = &cli.data {
        engine.load_data_from_file(data)?;
    }
    engine.generate(&cli.output)?;
    println!("PDF generated successfully: {}", cli.output.display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsStr;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn output_defaults_to_output_pdf() {
        let cli = Cli::try_parse_from(["quire", "--template", "report.xml"]).unwrap();
        assert_eq!(cli.output, PathBuf::from("output.pdf"));
        assert!(cli.data.is_none());
        assert!(!cli.validate && !cli.compress);
    }

    #[test]
    fn template_is_required() {
        assert!(Cli::try_parse_from(["quire", "--data", "data.json"]).is_err());
    }

    #[test]
    fn validate_only_parses_the_template() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("report.xml");
        std::fs::write(&template, "<report><sections/></report>").unwrap();
        let output = dir.path().join("out.pdf");
        let cli = Cli::try_parse_from([
            OsStr::new("quire"),
            OsStr::new("--template"),
            template.as_os_str(),
            OsStr::new("--output"),
            output.as_os_str(),
            OsStr::new("--validate"),
        ])
        .unwrap();
        run(&cli).unwrap();
        assert!(!output.exists());
    }
}
