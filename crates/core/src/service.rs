//! Prompt service
//!
//! The boundary the optimize and history views call. Combines the
//! transformation engine with the record store and validates input that
//! the views are expected to have checked already.

use log::info;

use crate::{
    config::Config,
    errors::{OptimizerError, Result},
    history::{HistoryQuery, HistoryStats},
    optimizer::{
        optimized_prompt, Category, OptimizationRequest, OptimizationResponse, Optimizer, Target,
    },
    store::{FileBackend, Record, RecordStore},
};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug)]
pub struct PromptService {
    optimizer: Optimizer,
    store:     RecordStore,
}

impl PromptService {
    pub fn new(optimizer: Optimizer, store: RecordStore) -> Self {
        Self { optimizer, store }
    }

    /// File-backed service under `config.data_dir`
    pub fn from_config(config: &Config) -> Result<Self> {
        let backend = FileBackend::new(&config.data_dir)?;
        info!(
            "opening prompt history (dir={}, latency_ms={})",
            backend.root().display(),
            config.latency_ms
        );
        let store = RecordStore::open(Box::new(backend), config.on_corrupt)?;
        Ok(Self::new(Optimizer::new(config.latency()), store))
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// The engine, cloned by callers that must not hold the service across
    /// the simulated latency
    pub fn optimizer(&self) -> &Optimizer {
        &self.optimizer
    }

    pub async fn optimize(
        &self,
        prompt: &str,
        category: Category,
        target: Option<Target>,
    ) -> Result<OptimizationResponse> {
        let request = OptimizationRequest {
            prompt: prompt.to_string(),
            category,
            target,
        };
        self.optimize_request(&request).await
    }

    pub async fn optimize_request(
        &self,
        request: &OptimizationRequest,
    ) -> Result<OptimizationResponse> {
        ensure_prompt(&request.prompt)?;
        Ok(self.optimizer.optimize(request).await)
    }

    /// Save a record for `original` under `category`
    ///
    /// The stored `optimized` text is always the rewrite of `original` for
    /// `category`. An empty `optimized` asks for it to be derived; any other
    /// value must equal the rewrite.
    pub fn save(
        &mut self,
        original: &str,
        optimized: &str,
        category: Category,
        tags: Vec<String>,
    ) -> Result<Record> {
        ensure_prompt(original)?;
        let derived = optimized_prompt(original, &category);
        if !optimized.is_empty() && optimized != derived {
            return Err(OptimizerError::validation(format!(
                "optimized text does not match the '{}' rewrite of the original",
                category
            )));
        }
        self.store
            .create(original.to_string(), derived, category, tags)
    }

    /// Save an optimize result, tagged with its category and, when one was
    /// picked, its target
    pub fn save_optimization(
        &mut self,
        request: &OptimizationRequest,
        response: &OptimizationResponse,
    ) -> Result<Record> {
        let mut tags = vec![request.category.to_string()];
        if let Some(target) = &request.target {
            tags.push(target.to_string());
        }
        self.save(
            &request.prompt,
            &response.optimized,
            request.category.clone(),
            tags,
        )
    }

    pub fn list(&self) -> &[Record] {
        self.store.list()
    }

    pub fn delete(&mut self, id: &str) -> Result<()> {
        self.store.delete(id)
    }

    pub fn rate(&mut self, id: &str, rating: u8) -> Result<()> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(OptimizerError::validation(format!(
                "rating must be between {} and {}, got {}",
                MIN_RATING, MAX_RATING, rating
            )));
        }
        self.store.update_rating(id, rating)
    }

    pub fn history(&self, query: &HistoryQuery) -> Vec<Record> {
        query.apply(self.store.list())
    }

    pub fn stats(&self) -> HistoryStats {
        HistoryStats::from_records(self.store.list())
    }
}

/// Reject prompts that are empty after trimming
pub fn ensure_prompt(prompt: &str) -> Result<()> {
    if prompt.trim().is_empty() {
        return Err(OptimizerError::validation("prompt must not be empty"));
    }
    Ok(())
}
