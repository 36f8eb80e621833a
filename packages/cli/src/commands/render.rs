use std::path::PathBuf;

use anyhow::Context;
use backstage_common::JsonFileStore;
use backstage_dom::{serialize_nodes, Document, Node};
use backstage_editor::AdminSession;
use clap::Args;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Page file to render
    pub page: PathBuf,

    /// Store file holding persisted admin state (the local-storage
    /// stand-in). Missing or malformed files render the static page.
    #[arg(short, long, default_value = "backstage-store.json")]
    state: PathBuf,

    /// Query string to boot with, e.g. "admin=1"
    #[arg(short, long, default_value = "")]
    query: String,
}

/// Render a page the way a browser load would see it: scanned, with the
/// saved snapshot applied.
pub fn render(args: RenderArgs) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(&args.page)
        .with_context(|| format!("cannot read {}", args.page.display()))?;

    let store = JsonFileStore::open(&args.state);
    let mut session = AdminSession::new(Document::parse(&source), store);
    session.boot(&args.query);

    let body = session.document.body.clone();
    println!("{}", serialize_nodes(&[Node::Element(body)]));
    Ok(())
}
