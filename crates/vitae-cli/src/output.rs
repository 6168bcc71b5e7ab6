use std::io::Write;
use std::path::Path;

use owo_colors::OwoColorize;
use vitae_core::Report;
use vitae_parsing::{SectionFamily, Segmentation, Strategy};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the one-line summary after a report is written.
pub fn print_report_summary(
    w: &mut dyn Write,
    path: &Path,
    report: &Report,
    color: ColorMode,
) -> std::io::Result<()> {
    let s = &report.summary;
    let mut counts = format!(
        "pubs={}, talks={}, invited={}",
        s.n_publications, s.n_presentations, s.n_invited_talks
    );
    if let Some(n) = s.n_unknown {
        counts.push_str(&format!(", unknown={}", n));
    }

    if color.enabled() {
        writeln!(w, "{} {} ({})", "Wrote".green(), path.display(), counts)?;
    } else {
        writeln!(w, "Wrote {} ({})", path.display(), counts)?;
    }

    let unparsed = report.unparsed.len();
    if unparsed > 0 {
        let msg = format!(
            "({} publications and {} talks could not be fully parsed)",
            report.unparsed.publications.len(),
            report.unparsed.presentations.len()
        );
        if color.enabled() {
            writeln!(w, "{}", msg.dimmed())?;
        } else {
            writeln!(w, "{}", msg)?;
        }
    }
    Ok(())
}

fn family_heading(family: SectionFamily) -> &'static str {
    match family {
        SectionFamily::Publications => "PUBLICATIONS",
        SectionFamily::Talks => "TALKS",
        SectionFamily::Other => "ITEMS",
    }
}

/// Print segmented items grouped by section family, in document order.
pub fn print_segmentation(
    w: &mut dyn Write,
    strategy: Strategy,
    segmentation: &Segmentation,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w, "Strategy: {}", strategy)?;
    match segmentation.total {
        Some(total) => writeln!(w, "Found {} numbered items", total)?,
        None => writeln!(w, "Found {} items", segmentation.items.len())?,
    }

    let mut current = None;
    for (i, item) in segmentation.items.iter().enumerate() {
        if current != Some(item.family) {
            current = Some(item.family);
            writeln!(w)?;
            let heading = family_heading(item.family);
            if color.enabled() {
                writeln!(w, "{}", heading.bold())?;
            } else {
                writeln!(w, "{}", heading)?;
            }
        }

        let label = item.index.unwrap_or(i + 1);
        if color.enabled() {
            writeln!(w, "{} {}", format!("[{}]", label).dimmed(), item.text)?;
        } else {
            writeln!(w, "[{}] {}", label, item.text)?;
        }
    }
    Ok(())
}
