use std::path::PathBuf;

use anyhow::Context;
use backstage_dom::Document;
use backstage_editor::registry::{self, Role};
use clap::Args;
use colored::Colorize;

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Page file to inspect
    pub page: PathBuf,
}

pub fn scan(args: ScanArgs) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(&args.page)
        .with_context(|| format!("cannot read {}", args.page.display()))?;

    let mut doc = Document::parse(&source);
    registry::scan(&mut doc);

    println!("{} {}", "Scanned".green().bold(), args.page.display());

    let roles = [
        (Role::Text, "text"),
        (Role::Image, "images"),
        (Role::List, "lists"),
        (Role::Gallery, "galleries"),
    ];
    for (role, label) in roles {
        let entries = registry::list_by_role(&doc, role);
        println!();
        println!("{} ({})", label.bold(), entries.len());
        for (key, el) in entries {
            println!("  {} {}", key, format!("<{}>", el.tag).dimmed());
        }
    }

    Ok(())
}
