// Section rewriting: policy table, generation calls, orchestration, SEO enrichment.
// All generation calls go through llm_client::GenerationOracle.

pub mod handlers;
pub mod pipeline;
pub mod policy;
pub mod prompts;
pub mod rewriter;
pub mod seo;
