//! Pipeline orchestrator.
//!
//! Flow: split_sections → chunk every section → build index (one call per document),
//!       and independently: sections → rewrite_section (bounded pool) → RewrittenSections
//!       → optional SEO keyword trailer.
//!
//! Any rewrite failure aborts the whole run; no partial mapping is returned.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::GenerationOracle;
use crate::resume::chunker::Chunker;
use crate::resume::index::{IndexHandle, VectorIndex};
use crate::resume::sections::{split_sections, Section};
use crate::rewrite::rewriter::rewrite_section;
use crate::rewrite::seo::{integrate_seo_keywords, KeywordAnnotator};

/// Section name → rewritten text. Repeated section names keep the last rewrite.
pub type RewrittenSections = HashMap<String, String>;

/// Splits the document, chunks every section and builds one index over all chunks.
pub async fn ingest_document(
    text: &str,
    index: &dyn VectorIndex,
    chunker: &Chunker,
) -> Result<(IndexHandle, Vec<Section>), AppError> {
    let sections = split_sections(text);
    let chunks = chunker.chunk_sections(&sections);
    info!(
        "Split document into {} sections and {} chunks",
        sections.len(),
        chunks.len()
    );

    let handle = index.build(chunks).await?;
    Ok((handle, sections))
}

/// Rewrites every section, at most `concurrency` at a time.
///
/// Results are merged in source order, so for repeated names the later
/// section's rewrite wins regardless of completion order.
pub async fn optimize_all(
    oracle: Arc<dyn GenerationOracle>,
    sections: &[Section],
    example_text: &str,
    concurrency: usize,
) -> Result<RewrittenSections, AppError> {
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));
    let example: Arc<str> = Arc::from(example_text);
    let mut tasks = JoinSet::new();

    for (position, section) in sections.iter().cloned().enumerate() {
        let oracle = Arc::clone(&oracle);
        let permits = Arc::clone(&permits);
        let example = Arc::clone(&example);

        tasks.spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|e| AppError::Internal(anyhow::anyhow!("Rewrite pool closed: {e}")))?;

            let text = rewrite_section(oracle.as_ref(), &section.name, &section.content, &example)
                .await
                .map_err(|e| AppError::from_llm(&section.name, e))?;

            Ok::<_, AppError>((position, section.name, text))
        });
    }

    let mut results: Vec<Option<(String, String)>> = vec![None; sections.len()];
    while let Some(joined) = tasks.join_next().await {
        // Returning early drops the JoinSet, which aborts the outstanding rewrites.
        let outcome = joined
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Rewrite task failed: {e}")))
            .and_then(|r| r);
        match outcome {
            Ok((position, name, text)) => results[position] = Some((name, text)),
            Err(e) => {
                error!("Aborting rewrite batch: {e}");
                return Err(e);
            }
        }
    }

    let mut rewritten = RewrittenSections::new();
    for (name, text) in results.into_iter().flatten() {
        rewritten.insert(name, text);
    }
    Ok(rewritten)
}

/// Everything one pipeline run produces.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub index: IndexHandle,
    pub sections: Vec<Section>,
    pub rewritten: RewrittenSections,
}

/// Collaborators for a pipeline run.
pub struct PipelineDeps<'a> {
    pub oracle: Arc<dyn GenerationOracle>,
    pub index: &'a dyn VectorIndex,
    pub annotator: Option<&'a dyn KeywordAnnotator>,
    pub chunker: Chunker,
    pub concurrency: usize,
}

/// Runs ingestion and rewriting for one document.
pub async fn run_pipeline(
    deps: PipelineDeps<'_>,
    text: &str,
    example_text: &str,
) -> Result<PipelineOutput, AppError> {
    let run_id = Uuid::new_v4();
    info!("Pipeline run {run_id} started");

    let (index, sections) = ingest_document(text, deps.index, &deps.chunker).await?;
    let mut rewritten =
        optimize_all(deps.oracle, &sections, example_text, deps.concurrency).await?;

    if let Some(annotator) = deps.annotator {
        integrate_seo_keywords(&mut rewritten, annotator).await;
    }

    info!(
        "Pipeline run {run_id} finished: {} sections rewritten",
        rewritten.len()
    );

    Ok(PipelineOutput {
        run_id,
        generated_at: Utc::now(),
        index,
        sections,
        rewritten,
    })
}
