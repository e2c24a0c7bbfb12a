//! Immutable per-form pipeline parts.
use std::sync::Arc;

use canonical::{validate_prefix, CanonicalError, ClientNote, TextBuilder};
use ingest::{BotPolicy, FormKind, FormSchema, Validator};
use render::DocumentRenderer;

use crate::config::IntakeConfig;

/// Schema, validator, text builder, renderer, bot policy and identifier
/// prefix for one form type. Cheap to clone; the schema is shared.
#[derive(Debug, Clone)]
pub struct FormEngine {
    schema: Arc<FormSchema>,
    validator: Validator,
    texts: TextBuilder,
    renderer: DocumentRenderer,
    bot: BotPolicy,
    prefix: String,
}

impl FormEngine {
    pub fn new(kind: FormKind, config: &IntakeConfig) -> Result<Self, CanonicalError> {
        let prefix = config.prefix(kind).to_string();
        validate_prefix(&prefix)?;
        let schema = Arc::new(FormSchema::for_kind(kind));
        Ok(Self {
            validator: Validator::new(Arc::clone(&schema)),
            texts: TextBuilder::new(
                Arc::clone(&schema),
                ClientNote::new(config.sender_name.as_str()),
            ),
            renderer: DocumentRenderer::new(Arc::clone(&schema), config.render.layout()),
            bot: config.bot.clone(),
            prefix,
            schema,
        })
    }

    pub fn kind(&self) -> FormKind {
        self.schema.kind
    }

    pub fn schema(&self) -> &Arc<FormSchema> {
        &self.schema
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn texts(&self) -> &TextBuilder {
        &self.texts
    }

    pub fn renderer(&self) -> &DocumentRenderer {
        &self.renderer
    }

    pub fn bot(&self) -> &BotPolicy {
        &self.bot
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}
