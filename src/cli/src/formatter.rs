use anyhow::Result;
use colored::Colorize;
use console::Emoji;
use projstats_report::BatchSummary;
use std::fmt::Write;
use std::path::PathBuf;

const STATUS_OK: Emoji<'_, '_> = Emoji("🟢 ", "+ ");
const STATUS_WARNING: Emoji<'_, '_> = Emoji("🟡 ", "! ");
const STATUS_ERROR: Emoji<'_, '_> = Emoji("🔴 ", "x ");

const LABEL_WIDTH: usize = 20;

/// Boxed, coloured rendering of a batch summary for the terminal.
pub struct ReportFormatter {
    output: String,
    width: usize,
}

impl ReportFormatter {
    pub fn new(width: usize) -> Self {
        Self {
            output: String::new(),
            width,
        }
    }

    fn inner_width(&self) -> usize {
        self.width.saturating_sub(2)
    }

    pub fn add_header(&mut self, title: &str) -> Result<()> {
        let width = self.inner_width();
        writeln!(
            &mut self.output,
            "\n┌{:─^width$}┐",
            format!(" {} ", title),
            width = width
        )?;
        Ok(())
    }

    pub fn add_footer(&mut self) -> Result<()> {
        let width = self.inner_width();
        writeln!(
            &mut self.output,
            "└{:─^width$}┘",
            "",
            width = width
        )?;
        Ok(())
    }

    pub fn add_section_header(&mut self, title: &str) -> Result<()> {
        let width = self.inner_width();
        writeln!(
            &mut self.output,
            "├{:─^width$}┤",
            format!(" {} ", title),
            width = width
        )?;
        Ok(())
    }

    pub fn add_field(&mut self, label: &str, value: &str, color: &str) -> Result<()> {
        // Truncate before colouring so escape codes are never cut.
        let max_value_width = self.width.saturating_sub(LABEL_WIDTH + 4).max(4);
        let value = if value.chars().count() > max_value_width {
            let kept: String = value.chars().take(max_value_width - 3).collect();
            format!("{}...", kept)
        } else {
            value.to_string()
        };

        let colored_value = match color {
            "green" => value.green(),
            "yellow" => value.yellow(),
            "cyan" => value.cyan(),
            "magenta" => value.magenta(),
            "blue" => value.blue(),
            "red" => value.red(),
            "bold" => value.bold(),
            _ => value.normal(),
        };

        writeln!(
            &mut self.output,
            "│ {:<label_width$} │ {}  ",
            label,
            colored_value,
            label_width = LABEL_WIDTH
        )?;
        Ok(())
    }

    pub fn add_status_field(&mut self, label: &str, value: &str, status: &str) -> Result<()> {
        let (emoji, color) = match status {
            "ok" => (STATUS_OK, "green"),
            "error" => (STATUS_ERROR, "red"),
            _ => (STATUS_WARNING, "yellow"),
        };

        writeln!(
            &mut self.output,
            "│ {:<label_width$} │ {}{}  ",
            label,
            emoji,
            value.color(color),
            label_width = LABEL_WIDTH
        )?;
        Ok(())
    }

    pub fn add_empty_line(&mut self) -> Result<()> {
        let width = self.inner_width();
        writeln!(
            &mut self.output,
            "│{:width$}│",
            "",
            width = width
        )?;
        Ok(())
    }

    pub fn get_output(&self) -> &str {
        &self.output
    }

    fn add_counts(&mut self, title: &str, counts: &[(String, usize)], color: &str) -> Result<()> {
        self.add_section_header(title)?;
        for (label, count) in counts {
            self.add_field(label, &count.to_string(), color)?;
        }
        Ok(())
    }

    pub fn print_summary(&mut self, summary: &BatchSummary) -> Result<()> {
        self.add_header("PROJECT SUMMARY STATS")?;
        self.add_empty_line()?;
        self.add_field("Total data points", &summary.total.to_string(), "bold")?;
        self.add_empty_line()?;

        self.add_counts("CLADES", &summary.clades, "cyan")?;
        self.add_counts("RUN TYPES", &summary.entry_points, "magenta")?;
        self.add_counts("TICKETS", &summary.tickets, "blue")?;

        self.add_section_header("INPUT FILES")?;
        if summary.empty_files.is_empty()
            && summary.unreadable_files.is_empty()
            && summary.ignored_files.is_empty()
        {
            self.add_status_field("Skipped", "none", "ok")?;
        }
        for name in &summary.empty_files {
            self.add_status_field("Empty file", name, "warning")?;
        }
        for (name, reason) in &summary.unreadable_files {
            self.add_status_field("Unreadable file", &format!("{}: {}", name, reason), "error")?;
        }
        for (name, rule) in &summary.ignored_files {
            self.add_status_field("Ignored file", &format!("{}: {}", name, rule), "warning")?;
        }
        if summary.duplicate_runs > 0 {
            self.add_status_field(
                "Duplicate runs",
                &summary.duplicate_runs.to_string(),
                "warning",
            )?;
        }
        if summary.unknown_processes > 0 {
            self.add_status_field(
                "Unknown processes",
                &summary.unknown_processes.to_string(),
                "warning",
            )?;
        }
        if summary.coercion_failures > 0 {
            self.add_status_field(
                "Non-numeric metrics",
                &summary.coercion_failures.to_string(),
                "warning",
            )?;
        }
        self.add_empty_line()?;
        Ok(())
    }

    pub fn print_artifacts(&mut self, artifacts: &[PathBuf]) -> Result<()> {
        self.add_section_header("OUTPUTS")?;
        self.add_field("Files written", &artifacts.len().to_string(), "green")?;
        for artifact in artifacts {
            let name = artifact
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            self.add_field("", &name, "white")?;
        }
        self.add_empty_line()?;
        self.add_footer()?;
        Ok(())
    }
}
