use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::catalog::store::HeaderLookup;
use crate::core::hash::TargetIdentity;
use crate::core::record::RomRecord;
use crate::core::source::{file_stem, ByteSource, SourceProvider};
use crate::core::types::ROM_EXTENSIONS;
use crate::loading::{LoadMode, RomLoader};
use crate::matching::budget::{BudgetExhausted, SearchBudget, MAX_FILES_TO_CHECK};

/// Configuration for a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Load attempts allowed per search pass
    pub max_attempts: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_attempts: MAX_FILES_TO_CHECK,
        }
    }
}

/// How a search ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(ByteSource),
    /// Every eligible candidate was checked
    NotFound,
    /// The budget ran out before the candidates did
    BudgetExhausted,
}

/// Outcome of a search plus the work it took
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub attempts: usize,
}

impl SearchReport {
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Found(_))
    }

    #[must_use]
    pub fn into_match(self) -> Option<ByteSource> {
        match self.outcome {
            SearchOutcome::Found(source) => Some(source),
            SearchOutcome::NotFound | SearchOutcome::BudgetExhausted => None,
        }
    }
}

/// Finds the file among many candidates whose contents match a target identity
pub struct RomMatcher<'a> {
    loader: RomLoader<'a>,
    config: SearchConfig,
}

impl<'a> RomMatcher<'a> {
    /// Matcher with the standard loader and default configuration
    #[must_use]
    pub fn new(provider: &'a dyn SourceProvider, database: &'a dyn HeaderLookup) -> Self {
        Self::with_loader(RomLoader::new(provider, database))
    }

    /// Matcher around a custom loader, switched to verify-only logging
    #[must_use]
    pub fn with_loader(loader: RomLoader<'a>) -> Self {
        Self {
            loader: loader.with_mode(LoadMode::VerifyOnly),
            config: SearchConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Find a candidate whose CRC-32 or SHA-1 equals the target's.
    ///
    /// In fast mode only candidates named like `target_name` are checked.
    #[must_use]
    pub fn find_match(
        &self,
        candidates: &[PathBuf],
        target_name: &str,
        target: &TargetIdentity,
        fast_search: bool,
    ) -> Option<ByteSource> {
        self.search(candidates, target_name, target, fast_search)
            .into_match()
    }

    /// Like [`find_match`](Self::find_match), but reports why nothing was found
    #[must_use]
    pub fn search(
        &self,
        candidates: &[PathBuf],
        target_name: &str,
        target: &TargetIdentity,
        fast_search: bool,
    ) -> SearchReport {
        let mut budget = SearchBudget::new(self.config.max_attempts);

        if target.is_empty() {
            debug!("Search target has neither CRC-32 nor SHA-1, nothing can match");
            return SearchReport {
                outcome: SearchOutcome::NotFound,
                attempts: 0,
            };
        }

        let target_name = target_name.to_lowercase();
        let target_stem = file_stem(&target_name);

        for path in candidates {
            if fast_search && !is_named_like(path, &target_name, &target_stem) {
                continue;
            }

            match self.verify(path, target, &mut budget) {
                Ok(Some(source)) => {
                    debug!(source = %source, attempts = budget.attempts(), "Found matching rom");
                    return SearchReport {
                        outcome: SearchOutcome::Found(source),
                        attempts: budget.attempts(),
                    };
                }
                Ok(None) => {}
                Err(BudgetExhausted { ceiling }) => {
                    info!(
                        "Could not find a file matching the specified name/hash after {ceiling} tries, giving up..."
                    );
                    return SearchReport {
                        outcome: SearchOutcome::BudgetExhausted,
                        attempts: budget.attempts(),
                    };
                }
            }
        }

        SearchReport {
            outcome: SearchOutcome::NotFound,
            attempts: budget.attempts(),
        }
    }

    /// Fast pass on the name (if one is given), then a slow pass over everything.
    ///
    /// Each pass gets its own budget; the report counts attempts of both.
    #[must_use]
    pub fn locate(
        &self,
        candidates: &[PathBuf],
        target_name: &str,
        target: &TargetIdentity,
    ) -> SearchReport {
        let mut spent = 0;
        if !target_name.is_empty() {
            let fast = self.search(candidates, target_name, target, true);
            if fast.is_found() {
                return fast;
            }
            spent = fast.attempts;
        }

        let mut slow = self.search(candidates, target_name, target, false);
        slow.attempts += spent;
        slow
    }

    /// Load one candidate (or each entry of a candidate archive) and compare
    fn verify(
        &self,
        path: &Path,
        target: &TargetIdentity,
        budget: &mut SearchBudget,
    ) -> Result<Option<ByteSource>, BudgetExhausted> {
        let provider = self.loader.provider();

        if let Some(archive) = provider.open_archive(path) {
            for entry in archive.list_entries(ROM_EXTENSIONS) {
                budget.try_consume()?;
                let source = ByteSource::entry(path, entry.as_str());
                let record = match archive.read_entry(&entry) {
                    Ok(data) => self.loader.load_bytes(data, &source),
                    Err(e) => {
                        debug!(source = %source, error = %e, "Failed to read archive entry");
                        continue;
                    }
                };
                if is_match(&record, target) {
                    return Ok(Some(source));
                }
            }
            return Ok(None);
        }

        budget.try_consume()?;
        let source = ByteSource::file(path);
        let record = self.loader.load(&source);
        Ok(is_match(&record, target).then_some(source))
    }
}

/// Fast-mode filter: the path contains the target name and the stems agree
fn is_named_like(path: &Path, target_name: &str, target_stem: &str) -> bool {
    let path = path.to_string_lossy().to_lowercase();
    path.contains(target_name) && file_stem(&path) == target_stem
}

fn is_match(record: &RomRecord, target: &TargetIdentity) -> bool {
    !record.is_failed() && target.matches(record.info.crc32, record.info.sha1.as_ref())
}
