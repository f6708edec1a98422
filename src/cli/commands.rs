//! Subcommand implementations.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use tilegraph_edge::{edges_from_bytes, edges_to_bytes, slope, DirectedEdge, DirectedEdgeBuilder};
use tracing::{debug, info, info_span};

use super::attrs::EdgeAttributes;

/// Builds one record per attribute object in `input`.
///
/// Records go to `output` as raw bytes, or to stdout as one hex line each.
pub fn build(input: &Path, output: Option<&Path>) -> Result<()> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let documents: Vec<EdgeAttributes> = serde_json::from_str(&text)
        .with_context(|| format!("Invalid attribute document {}", input.display()))?;

    let mut edges = Vec::with_capacity(documents.len());
    let mut corrected = 0usize;
    for (index, attrs) in documents.iter().enumerate() {
        let _span = info_span!("edge", index).entered();
        let mut builder = DirectedEdgeBuilder::new();
        attrs
            .apply(&mut builder)
            .with_context(|| format!("Edge {index} cannot be built"))?;
        // Corrections are reported through tracing as they happen
        let (edge, diagnostics) = builder.finish()?;
        corrected += diagnostics.len();
        edges.push(edge);
    }
    info!(edges = edges.len(), corrected, "built directed edges");
    if corrected > 0 {
        eprintln!("{corrected} attribute value(s) corrected while building");
    }

    match output {
        Some(path) => {
            fs::write(path, edges_to_bytes(&edges))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "Wrote {} records ({} bytes) to {}",
                edges.len(),
                edges.len() * DirectedEdge::SIZE,
                path.display()
            );
        }
        None => {
            let mut stdout = io::stdout().lock();
            for edge in &edges {
                writeln!(stdout, "{}", hex::encode(edge.to_bytes()))?;
            }
        }
    }
    Ok(())
}

/// Prints the export JSON of the records in `input`.
pub fn inspect(input: &Path, index: Option<usize>) -> Result<()> {
    let bytes = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let edges = edges_from_bytes(&bytes)
        .with_context(|| format!("Invalid record file {}", input.display()))?;
    debug!(count = edges.len(), "decoded record file");

    let json = match index {
        Some(i) => match edges.get(i) {
            Some(edge) => edge.to_json(),
            None => bail!("Record {i} out of range: file holds {} records", edges.len()),
        },
        None => serde_json::Value::Array(edges.iter().map(DirectedEdge::to_json).collect()),
    };
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

/// Shows how a grade in degrees is quantized.
pub fn show_slope(degrees: f32) -> Result<()> {
    let up = slope::encode_up_slope(degrees);
    let down = slope::encode_down_slope(degrees);
    println!(
        "max_up_slope:   code {up:#04x} -> {} degrees",
        slope::decode_up_slope(up)
    );
    println!(
        "max_down_slope: code {down:#04x} -> {} degrees",
        slope::decode_down_slope(down)
    );
    if slope::saturates(degrees.abs()) {
        eprintln!(
            "note: {degrees} exceeds the representable range of {} degrees",
            slope::MAX_SLOPE_DEGREES
        );
    }
    Ok(())
}
