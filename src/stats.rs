//! Content statistics overview.
//!
//! A quick summary of what was loaded: document counts per collection and
//! per docs section, reading time, and the most recent change. Used by
//! `folio stats` to confirm the content tree compiles the way authors expect.

use anyhow::Result;
use chrono::{DateTime, Utc};

use folio_core::models::DocumentRecord;
use folio_core::ordering::OrderingConfig;
use folio_core::readtime::read_time_minutes;

use crate::config::Config;
use crate::content::LoadedContent;

/// Per-section breakdown of the docs collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionStats {
    pub section: String,
    pub doc_count: usize,
    pub read_minutes: usize,
    pub last_activity: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentStats {
    pub docs: usize,
    pub blog: usize,
    pub skipped: usize,
    pub read_minutes: usize,
    /// Sections in sidebar order.
    pub sections: Vec<SectionStats>,
}

impl ContentStats {
    pub fn average_read_minutes(&self) -> f64 {
        let total = self.docs + self.blog;
        if total == 0 {
            0.0
        } else {
            self.read_minutes as f64 / total as f64
        }
    }
}

pub fn collect_stats(content: &LoadedContent, ordering: &OrderingConfig) -> ContentStats {
    let mut sections: Vec<SectionStats> = Vec::new();
    for doc in &content.docs {
        let Some(name) = doc.section() else {
            continue;
        };
        let minutes = read_time_minutes(&doc.body);
        match sections.iter_mut().find(|s| s.section == name) {
            Some(s) => {
                s.doc_count += 1;
                s.read_minutes += minutes;
                s.last_activity = s.last_activity.max(doc.last_activity());
            }
            None => sections.push(SectionStats {
                section: name.to_string(),
                doc_count: 1,
                read_minutes: minutes,
                last_activity: doc.last_activity(),
            }),
        }
    }
    sections.sort_by(|a, b| ordering.compare_sections(&a.section, &b.section));

    let read_minutes = content
        .docs
        .iter()
        .chain(content.blog.iter())
        .map(|d: &DocumentRecord| read_time_minutes(&d.body))
        .sum();

    ContentStats {
        docs: content.docs.len(),
        blog: content.blog.len(),
        skipped: content.skipped.len(),
        read_minutes,
        sections,
    }
}

/// Run the stats command: summarize loaded content and print it.
pub fn run_stats(config: &Config, content: &LoadedContent) -> Result<()> {
    let stats = collect_stats(content, &config.ordering);

    println!("Folio Content Stats");
    println!("===================");
    println!();
    println!("  Content root: {}", config.content.root.display());
    println!();
    println!("  Docs:         {}", stats.docs);
    println!("  Blog posts:   {}", stats.blog);
    println!("  Skipped:      {}", stats.skipped);
    println!(
        "  Read time:    {} min total, {:.1} min average",
        stats.read_minutes,
        stats.average_read_minutes()
    );

    if !stats.sections.is_empty() {
        println!();
        println!("  By section:");
        println!(
            "  {:<28} {:>6} {:>10}   {}",
            "SECTION", "DOCS", "READ MIN", "LAST CHANGE"
        );
        println!("  {}", "-".repeat(70));
        for s in &stats.sections {
            let changed = match s.last_activity {
                Some(ts) => format_ts_relative(ts),
                None => "unknown".to_string(),
            };
            println!(
                "  {:<28} {:>6} {:>10}   {}",
                s.section, s.doc_count, s.read_minutes, changed
            );
        }
    }

    if !content.skipped.is_empty() {
        println!();
        println!("  Skipped files:");
        for f in &content.skipped {
            println!("    {}  ({})", f.path, f.error);
        }
    }

    println!();
    Ok(())
}

/// Format a timestamp relative to now (e.g. "3 days ago").
fn format_ts_relative(ts: DateTime<Utc>) -> String {
    let delta = (Utc::now() - ts).num_seconds();

    if delta < 0 {
        return format_ts_iso(ts);
    }

    if delta < 60 {
        "just now".to_string()
    } else if delta < 3600 {
        let mins = delta / 60;
        format!("{} min{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if delta < 86400 {
        let hours = delta / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if delta < 86400 * 30 {
        let days = delta / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else {
        format_ts_iso(ts)
    }
}

fn format_ts_iso(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}
