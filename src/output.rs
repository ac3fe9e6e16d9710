use std::io::{self, Write};

use serde::Serialize;

use crate::app::{ConvertResult, ProgressEvent, ProgressSink};

#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    Interactive,
    NonInteractive,
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_convert(result: &ConvertResult) -> io::Result<()> {
        Self::print_json(result)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

impl ProgressSink for JsonOutput {
    fn event(&self, _event: ProgressEvent) {}
}

/// Prints progress lines to stderr.
pub struct ConsoleOutput;

impl ConsoleOutput {
    pub fn print_convert(result: &ConvertResult) {
        println!("Done, check {}", result.full_path);
        println!("  gene-level facts: {}", result.gene_level_path);
        println!("  organism genes:   {}", result.organism_genes_path);
        println!(
            "  release {}: {} genes, {} proteins, {} interactions",
            result.version,
            result.summary.genes,
            result.summary.proteins,
            result.summary.interactions
        );
    }
}

impl ProgressSink for ConsoleOutput {
    fn event(&self, event: ProgressEvent) {
        match event.elapsed {
            Some(elapsed) => eprintln!("{} ({} ms)", event.message, elapsed.as_millis()),
            None => eprintln!("{}", event.message),
        }
    }
}
