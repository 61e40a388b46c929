use std::path::Path;

use colored::*;
use latmap_common::catalog::Catalog;

use super::load_catalog;
use crate::mprint;
use crate::terminal::{colors, format, print};

pub fn regions(path: Option<&Path>, q: u8) -> anyhow::Result<()> {
    let catalog: Catalog = load_catalog(path)?;

    print::header("endpoint catalog", q);
    for (idx, endpoint) in catalog.iter().enumerate() {
        print::tree_head(idx, &endpoint.id);
        print::as_tree_one_level(vec![
            format::address_to_detail(endpoint),
            ("Location".to_string(), endpoint.coordinates.to_string().color(colors::DISTANCE)),
        ]);
        if idx + 1 != catalog.len() {
            mprint!();
        }
    }

    let count: ColoredString = format!("{} endpoints", catalog.len()).bold().green();
    print::fat_separator();
    print::centerln(&format!("Catalog holds {count}").color(colors::TEXT_DEFAULT).to_string());
    Ok(())
}
