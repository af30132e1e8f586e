//! Submission intake.
//!
//! Front door for new generation requests: looks up the target generator,
//! resolves every artifact reference in the submitted inputs, and only
//! then writes a pending record.

use crate::ArtifactResolver;
use atelier_core::{
    Generation, GenerationId, GenerationOutput, GenerationStatus, ResolvedInputs, TenantId,
};
use atelier_error::{AtelierResult, SchemaError, SchemaErrorKind};
use atelier_schema::GeneratorRegistry;
use atelier_store::GenerationStore;
use chrono::Utc;
use derive_getters::Getters;
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

/// An accepted submission: the pending record as written, plus the
/// resolved inputs ready for generator execution.
#[derive(Debug, Clone, Getters)]
pub struct SubmissionOutcome {
    /// The pending generation record as persisted
    generation: Generation,
    /// Submitted inputs with every artifact reference resolved
    inputs: ResolvedInputs,
}

/// Accepts generation submissions against a registry of generators.
///
/// Validation runs before anything is written: a submission that fails
/// resolution leaves no record behind.
#[derive(Debug, Clone)]
pub struct SubmissionService<S> {
    registry: GeneratorRegistry,
    store: S,
    resolver: ArtifactResolver<S>,
}

impl<S: GenerationStore + Clone> SubmissionService<S> {
    /// Create a submission service over a generator registry and store.
    pub fn new(registry: GeneratorRegistry, store: S) -> Self {
        let resolver = ArtifactResolver::new(store.clone());
        Self {
            registry,
            store,
            resolver,
        }
    }

    /// The registry this service accepts submissions against.
    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    /// Submit a generation request.
    ///
    /// The raw inputs are resolved against the named generator's compiled
    /// schema; on success a `pending` record is written carrying the raw
    /// inputs verbatim as `input_params`, which is what lineage traversal
    /// later reads references out of.
    ///
    /// # Arguments
    ///
    /// * `tenant` - Submitting tenant
    /// * `generator` - Registered generator name
    /// * `raw_inputs` - Submitted inputs, field name to JSON value
    ///
    /// # Returns
    ///
    /// The persisted pending record together with the resolved inputs
    ///
    /// # Errors
    ///
    /// Returns a schema error when the generator is not registered, or a
    /// resolve error when any input fails validation. Nothing is written
    /// in either case.
    #[instrument(skip(self, raw_inputs), fields(tenant = %tenant, generator = generator))]
    pub async fn submit(
        &self,
        tenant: TenantId,
        generator: &str,
        raw_inputs: Map<String, Value>,
    ) -> AtelierResult<SubmissionOutcome> {
        let registered = self.registry.get(generator).ok_or_else(|| {
            warn!(generator, "Submission names an unregistered generator");
            SchemaError::new(SchemaErrorKind::UnknownGenerator(generator.to_string()))
        })?;

        let inputs = self
            .resolver
            .resolve(tenant, registered.schema(), &raw_inputs)
            .await?;

        let generation = Generation {
            id: GenerationId::new(),
            tenant_id: tenant,
            generator: registered.name().to_string(),
            status: GenerationStatus::Pending,
            artifact_kind: registered.manifest().produces,
            input_params: raw_inputs,
            output: GenerationOutput::default(),
            created_at: Utc::now(),
        };
        self.store.create(generation.clone()).await?;
        info!(
            id = %generation.id,
            kind = generation.artifact_kind.as_str(),
            "Accepted generation submission"
        );

        Ok(SubmissionOutcome { generation, inputs })
    }
}
