//! Generation pass driver.

use rustc_hash::FxHashMap;

use crate::config::EmitterOptions;
use crate::diagnostics::Diagnostic;
use crate::emit::{GeneratedUnit, Strategy};
use crate::model::{BoundMethod, OwningType};

/// Everything one pass produced.
#[derive(Debug, Default)]
pub struct GenerationOutput {
    /// Diagnostics in candidate order. Always reported.
    pub diagnostics: Vec<Diagnostic>,
    /// One unit per owning type, in order of first appearance.
    pub units: Vec<GeneratedUnit>,
}

impl GenerationOutput {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Runs a generation pass with a fixed set of options.
#[derive(Debug, Clone, Copy)]
pub struct Generator {
    options: EmitterOptions,
    strategy: Strategy,
}

impl Generator {
    pub fn new(options: EmitterOptions) -> Self {
        Self {
            options,
            strategy: Strategy::select(&options),
        }
    }

    pub fn options(&self) -> &EmitterOptions {
        &self.options
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Collect all bind outcomes, split diagnostics from models, group the
    /// models by owning type and emit one unit per group.
    ///
    /// A failing candidate only contributes its diagnostic. With no models at
    /// all, the output holds diagnostics only.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run<I>(&self, outcomes: I) -> GenerationOutput
    where
        I: IntoIterator<Item = Result<BoundMethod, Diagnostic>>,
    {
        let mut diagnostics = Vec::new();
        let mut models = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(model) => models.push(model),
                Err(diagnostic) => diagnostics.push(diagnostic),
            }
        }

        if models.is_empty() {
            return GenerationOutput {
                diagnostics,
                units: Vec::new(),
            };
        }

        let units = group_by_owner(models)
            .into_iter()
            .map(|(owner, methods)| {
                #[cfg(feature = "profiling")]
                profiling::scope!("emit_group");
                self.strategy.emit_group(&owner, &methods, &self.options)
            })
            .collect();

        GenerationOutput { diagnostics, units }
    }
}

/// Group by owning-type identity, keeping first-appearance order.
fn group_by_owner(models: Vec<BoundMethod>) -> Vec<(OwningType, Vec<BoundMethod>)> {
    let mut index: FxHashMap<OwningType, usize> = FxHashMap::default();
    let mut groups: Vec<(OwningType, Vec<BoundMethod>)> = Vec::new();

    for model in models {
        match index.get(&model.owner) {
            Some(&slot) => groups[slot].1.push(model),
            None => {
                index.insert(model.owner.clone(), groups.len());
                groups.push((model.owner.clone(), vec![model]));
            }
        }
    }

    groups
}
