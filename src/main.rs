use anyhow::{Context, Result, bail};
use log::{debug, info};
use refyaml::{Config, DiskOutput, DocItemSet, YamlGenerator};

fn main() -> Result<()> {
    let config = Config::parse();

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(config.level_filter())
        .init();

    debug!(config:?; "Parsed configuration");
    config.validate().context("Invalid configuration")?;

    let doc_items = DocItemSet::from_json_file(&config.input)
        .context("Failed to load documentation model")?;
    info!(items = doc_items.len(), packages = doc_items.packages().len(); "Loaded documentation model");

    let generator = YamlGenerator::new(&doc_items).with_langs(vec![config.lang.clone()]);
    let mut output = DiskOutput;
    let report = generator
        .generate_files(&config.output, &mut output)
        .context("Failed to generate YAML files")?;

    if !report.is_success() {
        let mut packages: Vec<&str> = report
            .failures
            .iter()
            .map(|failure| failure.package.as_str())
            .collect();
        packages.dedup();
        bail!(
            "{} files failed to generate in packages: {}",
            report.failures.len(),
            packages.join(", ")
        );
    }

    info!(
        files = report.files_written.len(),
        output:? = config.output;
        "Generated YAML files"
    );
    Ok(())
}
