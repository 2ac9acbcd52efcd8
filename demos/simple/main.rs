use std::sync::Arc;

use dagflow::{Binding, ChannelHandle, ChannelKind, Channels, Config, DagBuilder, InParam, OutParam};

/// Stand-in for a runtime channel object.
struct Queue {
    #[allow(unused)]
    capacity: usize,
}

fn main() -> dagflow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let config = Config::load_from_str(include_str!("./dag.toml"))?;

    let reads = ChannelHandle::wrap(ChannelKind::Queue, Arc::new(Queue { capacity: 64 }));
    let genome = ChannelHandle::value();
    let bam = ChannelHandle::queue();
    let stats = ChannelHandle::queue();

    let mut binding = Binding::new();
    binding.set("reads_ch", reads.clone());
    binding.set("genome", genome.clone());

    let mut dag = DagBuilder::new().config(config).binding(binding).build()?;

    dag.register_source("fromFilePairs", &reads)?;
    dag.register_task("ALIGN", &[InParam::named("reads", reads.clone()), InParam::named("genome", genome.clone())], &[OutParam::named("bam", vec![bam.clone()])])?;
    dag.register_task("STATS", &[InParam::named("bam", bam.clone()), InParam::named("genome", genome.clone())], &[OutParam::set("stats", vec![stats.clone()])])?;
    dag.register_operator("view", &stats, Channels::None)?;

    dag.normalize()?;

    let model = dag.snapshot();
    println!("Graph: {}", serde_json::to_string_pretty(&model)?);

    Ok(())
}
