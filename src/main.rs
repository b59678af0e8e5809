//! Semsearch CLI entrypoint.

use anyhow::Context;
use clap::{Parser, Subcommand};

use semsearch::chunking;
use semsearch::config::Config;
use semsearch::document::load_documents;
use semsearch::embedding::{Embedder, TextEmbedder};
use semsearch::engine::SearchEngine;
use semsearch::store::VectorRepository;

#[derive(Parser, Debug)]
#[command(name = "semsearch", version, about = "Semantic search over a local document collection")]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Verify that the embedding model loads, and print its metadata.
    Verify,
    /// Generate an embedding for the input text.
    #[command(name = "embed_text")]
    EmbedText {
        /// Text to embed.
        text: String,
    },
    /// Build or load the document embedding matrix and print its shape.
    #[command(name = "verify_embeddings")]
    VerifyEmbeddings,
    /// Generate an embedding for a query text.
    #[command(name = "embedquery")]
    EmbedQuery {
        /// Query text to embed.
        text: String,
    },
    /// Rank documents against a query and print the top hits.
    Search {
        /// Query text.
        text: String,
        /// Max number of results.
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Split text into overlapping token windows.
    Chunk {
        /// Text to chunk.
        text: String,
        /// Tokens per chunk.
        #[arg(long = "chunk-size", default_value_t = 200)]
        chunk_size: usize,
        /// Tokens shared between consecutive chunks.
        #[arg(long, default_value_t = 0)]
        overlap: usize,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Verify => verify(&config),
        Commands::EmbedText { text } => embed_text(&config, &text),
        Commands::VerifyEmbeddings => verify_embeddings(&config),
        Commands::EmbedQuery { text } => embed_query(&config, &text),
        Commands::Search { text, limit } => search(&config, &text, limit),
        Commands::Chunk {
            text,
            chunk_size,
            overlap,
        } => chunk(&text, chunk_size, overlap),
    }
}

fn load_embedder(config: &Config) -> anyhow::Result<TextEmbedder> {
    TextEmbedder::load(config.embedder_config()).context("failed to load embedding model")
}

fn verify(config: &Config) -> anyhow::Result<()> {
    let embedder = load_embedder(config)?;
    println!("Model loaded: {embedder:?}");
    println!("Embedding dimensions: {}", embedder.embedding_dim());
    println!("Max sequence length: {}", embedder.config().max_seq_len);
    Ok(())
}

fn embed_text(config: &Config, text: &str) -> anyhow::Result<()> {
    let embedder = load_embedder(config)?;
    let embedding = embedder.embed(text)?;
    print_embedding("Text", text, &embedding);
    Ok(())
}

fn embed_query(config: &Config, text: &str) -> anyhow::Result<()> {
    let embedder = load_embedder(config)?;
    let embedding = embedder.embed(text)?;
    print_embedding("Query", text, &embedding);
    Ok(())
}

fn print_embedding(label: &str, text: &str, embedding: &[f32]) {
    let head = &embedding[..embedding.len().min(3)];
    println!("{label}: {text}");
    println!("First 3 dimensions: {head:?}");
    println!("Dimensions: {}", embedding.len());
}

fn build_engine(config: &Config) -> anyhow::Result<SearchEngine<TextEmbedder>> {
    let embedder = load_embedder(config)?;
    let repository = VectorRepository::new(config.cache_file());
    let mut engine = SearchEngine::new(embedder, repository);

    let documents = load_documents(&config.documents_path).with_context(|| {
        format!(
            "failed to load document set from {}",
            config.documents_path.display()
        )
    })?;
    engine.index(documents)?;

    Ok(engine)
}

fn verify_embeddings(config: &Config) -> anyhow::Result<()> {
    let engine = build_engine(config)?;
    let store = engine.store().context("index was not built")?;
    println!("Embeddings shape: {} x {}", store.len(), store.dim());
    Ok(())
}

fn search(config: &Config, text: &str, limit: usize) -> anyhow::Result<()> {
    let engine = build_engine(config)?;
    let results = engine.search(text, limit)?;

    for (rank, result) in results.iter().enumerate() {
        println!(
            "{}. [{:.4}] {} - {}",
            rank + 1,
            result.score,
            result.document.title,
            result.document.description
        );
    }
    Ok(())
}

fn chunk(text: &str, chunk_size: usize, overlap: usize) -> anyhow::Result<()> {
    for (index, piece) in chunking::chunk(text, chunk_size, overlap)?.enumerate() {
        println!("{index}: {piece}");
    }
    Ok(())
}
