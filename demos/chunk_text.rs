//! Chunk Text for a TTS Provider
//!
//! Reads text from a file (or stdin), chunks it with settings from the
//! environment, and prints each chunk with its size.
//!
//! ```bash
//! TTS_CHUNK_LIMIT=600 TTS_CHUNK_UNIT=bytes cargo run --example chunk_text -- article.txt
//! RUST_LOG=debug cargo run --example chunk_text < article.txt
//! ```

use std::io::Read;

use tracing_subscriber::EnvFilter;
use ttschunk::{ChunkStats, Chunker, ChunkerConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let text = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let config = ChunkerConfig::from_env()?;
    let chunker = config.build()?;
    let chunks = chunker.chunk(&text);

    println!(
        "limit: {} {}  clause fallback: {}\n",
        chunker.limit(),
        chunker.unit(),
        chunker.clause_fallback()
    );
    for chunk in &chunks {
        println!(
            "[{}] {} bytes, {} chars, {:?}: \"{}\"",
            chunk.index,
            chunk.len(),
            chunk.char_len(),
            chunk.kind,
            chunk.text
        );
    }
    println!("\n{}", ChunkStats::compute(&text, &chunks));

    Ok(())
}
