use std::path::PathBuf;

use anyhow::Context;
use backstage_dom::Document;
use backstage_editor::{registry, snapshot};
use clap::Args;

#[derive(Args, Debug)]
pub struct CollectArgs {
    /// Page file to read
    pub page: PathBuf,
}

/// Print the snapshot JSON a save on this page would persist.
pub fn collect(args: CollectArgs) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(&args.page)
        .with_context(|| format!("cannot read {}", args.page.display()))?;

    let mut doc = Document::parse(&source);
    registry::scan(&mut doc);
    let state = snapshot::collect(&doc);

    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}
