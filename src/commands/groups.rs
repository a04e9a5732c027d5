//! Groups command handler
//!
//! Prints the three-tier grouping of a folder as a tree or as JSON.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use imgnav::index::SortOrder;
use imgnav::theme::Painter;
use imgnav::{scan_folder, Config, GroupIndex};

use super::parse_sort_order;

#[derive(Debug, Serialize)]
pub struct GroupsReport {
    pub folder: String,
    pub sort: SortOrder,
    pub files: usize,
    pub groups: Vec<TopGroupReport>,
}

#[derive(Debug, Serialize)]
pub struct TopGroupReport {
    pub key: String,
    pub sets: Vec<SetReport>,
}

#[derive(Debug, Serialize)]
pub struct SetReport {
    /// Empty when the files have no middle segment
    pub key: String,
    pub files: Vec<String>,
}

/// Collect the grouping of `index` in display order.
pub fn build_report(folder: &Path, index: &GroupIndex) -> GroupsReport {
    let groups = index
        .top_keys()
        .iter()
        .map(|top| TopGroupReport {
            key: top.clone(),
            sets: index
                .middle_groups(top)
                .into_iter()
                .map(|set| SetReport {
                    key: set.key.to_string(),
                    files: set.files.iter().map(|f| f.name().to_string()).collect(),
                })
                .collect(),
        })
        .collect();

    GroupsReport {
        folder: folder.display().to_string(),
        sort: index.sort_order(),
        files: index.len(),
        groups,
    }
}

/// Render `report` as an indented tree.
pub fn render_tree(report: &GroupsReport, painter: &Painter) -> String {
    let mut out = String::new();
    for group in &report.groups {
        let count: usize = group.sets.iter().map(|s| s.files.len()).sum();
        out.push_str(&format!(
            "{} {}\n",
            painter.accent(&group.key),
            painter.secondary(&format!("({})", count))
        ));
        for set in &group.sets {
            let label = if set.key.is_empty() { "(none)" } else { &set.key };
            out.push_str(&format!("  {}\n", painter.primary(label)));
            for file in &set.files {
                out.push_str(&format!("    {}\n", painter.secondary(file)));
            }
        }
    }
    out.push_str(&format!(
        "{} files in {} groups (sorted by {})\n",
        report.files,
        report.groups.len(),
        report.sort
    ));
    out
}

/// Scan `folder` and print its groups.
#[cfg(not(tarpaulin_include))]
pub fn handle(folder: &Path, json: bool, sort: Option<&str>, config_path: &Path) -> Result<()> {
    let config = Config::load_from(config_path)?;
    let order = match sort {
        Some(value) => parse_sort_order(value)?,
        None => config.library.sort_order,
    };

    let entries = scan_folder(folder)?;
    let index = GroupIndex::build(entries).with_sort_order(order);
    let report = build_report(folder, &index);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_tree(&report, &Painter::stdout()));
    }
    Ok(())
}
