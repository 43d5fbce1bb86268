//! Kotlin binding generation for message, service and action schemas.

pub mod payload;
pub mod source;
pub mod wrapper;

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::kotlin::{ClassName, krosbridge};
use crate::resolver::TypeResolver;
use crate::types::{Action, Message, RosType, Schema, Service};

use source::source_path;
use wrapper::{render_action_class, render_service_class, render_topic_class};

pub const TOPIC_SUFFIX: &str = "Topic";
pub const REQUEST_SUFFIX: &str = "Request";
pub const RESPONSE_SUFFIX: &str = "Response";
pub const GOAL_SUFFIX: &str = "Goal";
pub const RESULT_SUFFIX: &str = "Result";
pub const FEEDBACK_SUFFIX: &str = "Feedback";

/// Outcome of a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Files written, in emission order
    pub written: Vec<PathBuf>,
    /// Fully-qualified classes skipped because they were already emitted
    pub skipped: Vec<String>,
}

/// Generation session over one output directory.
///
/// Payload classes are tracked by fully-qualified name for the lifetime of the
/// generator, so a class shared by several schemas is written once and a type
/// that inlines itself terminates.
pub struct Generator {
    config: GeneratorConfig,
    resolver: TypeResolver,
    emitted: HashSet<String>,
    report: GenerationReport,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        let resolver = TypeResolver::new(config.package_prefix.clone());
        Self {
            config,
            resolver,
            emitted: HashSet::new(),
            report: GenerationReport::default(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn resolver(&self) -> &TypeResolver {
        &self.resolver
    }

    pub fn report(&self) -> &GenerationReport {
        &self.report
    }

    pub fn into_report(self) -> GenerationReport {
        self.report
    }

    /// Generate the wrapper and payload classes of one schema
    pub fn generate(&mut self, schema: &Schema) -> Result<()> {
        tracing::debug!("Generating bindings for {}", schema.name());
        match schema {
            Schema::Message(msg) => self.generate_message(msg),
            Schema::Service(srv) => self.generate_service(srv),
            Schema::Action(action) => self.generate_action(action),
        }
    }

    pub fn generate_all<'a, I>(&mut self, schemas: I) -> Result<&GenerationReport>
    where
        I: IntoIterator<Item = &'a Schema>,
    {
        for schema in schemas {
            self.generate(schema)?;
        }
        tracing::info!(
            "Generated {} files ({} skipped) in {:?}",
            self.report.written.len(),
            self.report.skipped.len(),
            self.config.output_dir
        );
        Ok(&self.report)
    }

    // Wrappers are rendered up front so that a rejected schema writes nothing,
    // and written after their payloads.
    fn generate_message(&mut self, msg: &Message) -> Result<()> {
        let (wrapper, text) = render_topic_class(&self.resolver, msg)?;
        self.emit_payload_class(&msg.name, &msg.fields, Some(&krosbridge::message()))?;
        self.write_source(&wrapper, &text)?;
        Ok(())
    }

    fn generate_service(&mut self, srv: &Service) -> Result<()> {
        let (wrapper, text) = render_service_class(&self.resolver, srv)?;
        self.emit_payload_class(
            &srv.name.with_suffix(REQUEST_SUFFIX),
            &srv.request,
            Some(&krosbridge::service_request()),
        )?;
        self.emit_payload_class(
            &srv.name.with_suffix(RESPONSE_SUFFIX),
            &srv.response,
            Some(&krosbridge::service_response()),
        )?;
        self.write_source(&wrapper, &text)?;
        Ok(())
    }

    fn generate_action(&mut self, action: &Action) -> Result<()> {
        let (wrapper, text) = render_action_class(&self.resolver, action)?;
        self.emit_payload_class(
            &action.name.with_suffix(GOAL_SUFFIX),
            &action.goal,
            Some(&krosbridge::action_goal()),
        )?;
        self.emit_payload_class(
            &action.name.with_suffix(RESULT_SUFFIX),
            &action.result,
            Some(&krosbridge::action_result()),
        )?;
        self.emit_payload_class(
            &action.name.with_suffix(FEEDBACK_SUFFIX),
            &action.feedback,
            Some(&krosbridge::action_feedback()),
        )?;
        self.write_source(&wrapper, &text)?;
        Ok(())
    }

    /// Whether the inline class `class` was already emitted in this session.
    /// With `skip_existing` an existing file at the class location also counts,
    /// matched by name only.
    fn already_emitted(&mut self, class: &ClassName) -> bool {
        let key = class.canonical();
        if self.emitted.contains(&key) {
            tracing::debug!("Skipping {} (already emitted)", key);
        } else if self.config.skip_existing
            && source_path(&self.config.output_dir, class).exists()
        {
            tracing::debug!("Skipping {} (found in output directory)", key);
            self.emitted.insert(key.clone());
        } else {
            return false;
        }
        self.report.skipped.push(key);
        true
    }

    fn mark_emitted(&mut self, class: &ClassName) {
        self.emitted.insert(class.canonical());
    }

    fn write_source(&mut self, class: &ClassName, contents: &str) -> Result<PathBuf> {
        let path = source_path(&self.config.output_dir, class);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::write(&path, contents).map_err(|e| Error::io(&path, e))?;
        tracing::debug!("Wrote {} to {:?}", class, path);
        self.report.written.push(path.clone());
        Ok(path)
    }
}
