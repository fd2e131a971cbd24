use maiden_analysis::engine::Engine;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ClassifyArg {
    /// The query to classify
    query: String,
}

pub(crate) fn run(arg: &ClassifyArg) -> anyhow::Result<()> {
    let engine = Engine::default();
    println!("{}", engine.classify(&arg.query));
    Ok(())
}
