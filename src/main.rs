use opensearch_description::{build_cli, init_logging, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = build_cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    let output = run(&matches).await?;
    println!("{}", output.trim_end());
    Ok(())
}
