//! Model-table shaping shared by all provider adapters

use super::output::{ModelConfig, TokenLimit};
use crate::provider::{ConnectedProvider, ModelEntry, ProviderId, ToolSupport};
use std::collections::BTreeMap;

/// Conservative limits for Anthropic-hosted models
pub(crate) const ANTHROPIC_LIMIT: TokenLimit = TokenLimit {
    context: 200_000,
    output: 8_192,
};

/// Conservative limits for OpenAI-hosted and Azure-hosted models
pub(crate) const OPENAI_LIMIT: TokenLimit = TokenLimit {
    context: 128_000,
    output: 16_384,
};

/// Conservative limits for self-hosted backends
pub(crate) const SELF_HOSTED_LIMIT: TokenLimit = TokenLimit {
    context: 32_768,
    output: 8_192,
};

/// Conservative limits for Bedrock-hosted models
pub(crate) const BEDROCK_LIMIT: TokenLimit = TokenLimit {
    context: 200_000,
    output: 8_192,
};

/// How an adapter decides a model's tool capability
#[derive(Debug, Clone, Copy)]
pub(crate) enum ToolRule {
    /// Every model of this backend gets the same fixed answer
    Fixed(bool),
    /// Use the per-model metadata the backend reported; `unknown` is never
    /// treated as capable
    Metadata,
}

impl ToolRule {
    fn tools_capable(self, entry: &ModelEntry) -> bool {
        match self {
            ToolRule::Fixed(capable) => capable,
            ToolRule::Metadata => matches!(entry.tool_support, Some(ToolSupport::Supported)),
        }
    }
}

/// Strip at most one leading `"<providerId>/"` segment from a model id
///
/// A doubled prefix is left alone so stripping stays idempotent.
pub fn strip_model_prefix(provider: ProviderId, model_id: &str) -> String {
    let prefix = format!("{}/", provider.as_str());
    match model_id.strip_prefix(&prefix) {
        Some(rest) if !rest.starts_with(&prefix) => rest.to_string(),
        _ => model_id.to_string(),
    }
}

/// Build the model table for one compiled provider entry
///
/// Uses every advertised model when the connect-time listing is present, and
/// falls back to the single selected (or synthesized) id otherwise. Keys are
/// prefix-stripped.
pub(crate) fn shape_models(
    provider: ProviderId,
    entry: &ConnectedProvider,
    fallback_model: &str,
    rule: ToolRule,
    limit: TokenLimit,
) -> BTreeMap<String, ModelConfig> {
    let mut models = BTreeMap::new();

    if entry.available_models.is_empty() {
        let id = strip_model_prefix(provider, fallback_model);
        models.insert(
            id.clone(),
            ModelConfig {
                name: id,
                tools_capable: match rule {
                    ToolRule::Fixed(capable) => capable,
                    ToolRule::Metadata => false,
                },
                limit,
            },
        );
        return models;
    }

    for model in &entry.available_models {
        let id = strip_model_prefix(provider, &model.id);
        let name = if model.name.is_empty() {
            id.clone()
        } else {
            model.name.clone()
        };
        models.insert(
            id,
            ModelConfig {
                name,
                tools_capable: rule.tools_capable(model),
                limit,
            },
        );
    }

    models
}
