// Résumé ingestion: document text → labeled sections → overlapping chunks → index.
// Nothing here calls the generation backend; see `rewrite` for that.

pub mod chunker;
pub mod document;
pub mod index;
pub mod sections;
