use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::Utc;
use maiden_analysis::engine::{AnalysisResponse, Engine};
use maiden_records::RecordSet;
use tracing::info;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AskArg {
    /// The question to answer
    query: String,
    /// Path to the passenger CSV file
    #[arg(long, default_value = "data/titanic.csv")]
    data: PathBuf,
    /// Print the response as JSON instead of text
    #[arg(long)]
    json: bool,
    /// Directory to additionally write the response JSON into
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

pub(crate) fn run(arg: &AskArg) -> anyhow::Result<()> {
    let records = RecordSet::from_csv_path(&arg.data)
        .with_context(|| format!("Failed to load dataset from {}", arg.data.display()))?;
    info!(passengers = records.len(), "dataset loaded");

    let engine = Engine::default();
    let response = engine.respond(&records, &arg.query);

    if let Some(export_dir) = &arg.export_dir {
        let filepath = export(export_dir, &response)?;
        info!(path = %filepath.display(), "response exported");
    }

    if arg.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("{}", response.summary_text);
    if let (Some(visualization), Some(title), Some(payload)) =
        (response.visualization, &response.title, &response.payload)
    {
        println!("Suggested chart: {title} ({visualization})");
        println!();
        println!("{}", util::render_table(payload));
    }
    Ok(())
}

fn export(dir: &Path, response: &AnalysisResponse) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;

    let filename = format!("answer_{}.json", Utc::now().format("%Y%m%d_%H%M%S"));
    let filepath = dir.join(filename);

    let file = File::create(&filepath)
        .with_context(|| format!("Failed to create file: {}", filepath.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, response)
        .with_context(|| format!("Failed to write JSON to {}", filepath.display()))?;
    Ok(filepath)
}
