use starscape::{config::BackdropConfig, flow};

fn main() -> anyhow::Result<()> {
    flow::run(BackdropConfig::default())
}
