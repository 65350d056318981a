//! OpenFlow models: flow definitions, their modules, and flow run status.
//!
//! A flow is an ordered list of [`FlowModule`]s. Each module's `value` is a
//! [`FlowModuleValue`] union and each module input is an [`InputTransform`]
//! union; both are decoded by trial in declared order (see [`crate::union`]).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::script::ScriptLang;
use crate::{impl_model, tagged_union, AdditionalProperties, ExtraPerms, JobId, Maybe, Timestamp};

// ---------------------------------------------------------------------------
// Single-valued discriminators
// ---------------------------------------------------------------------------

macro_rules! discriminator {
    ($(#[$attr:meta])* $name:ident => $variant:ident = $wire:literal) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            #[default]
            #[serde(rename = $wire)]
            $variant,
        }
    };
}

discriminator!(
    /// `type` tag of a [`StaticTransform`].
    StaticTransformType => Static = "static"
);
discriminator!(
    /// `type` tag of a [`JavascriptTransform`].
    JavascriptTransformType => Javascript = "javascript"
);
discriminator!(
    /// `type` tag of a [`PathScript`].
    PathScriptType => Script = "script"
);
discriminator!(
    /// `type` tag of a [`ForloopFlow`].
    ForloopFlowType => ForloopFlow = "forloopflow"
);
discriminator!(
    /// `type` tag of a [`FlowReference`].
    FlowReferenceType => Flow = "flow"
);

// ---------------------------------------------------------------------------
// Input transforms
// ---------------------------------------------------------------------------

/// A module input bound to a literal value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticTransform {
    #[serde(rename = "type")]
    pub kind: StaticTransformType,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub value: Maybe<Value>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(StaticTransform { "type", "value" });

/// A module input computed by a JavaScript expression over prior results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JavascriptTransform {
    pub expr: String,
    #[serde(rename = "type")]
    pub kind: JavascriptTransformType,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(JavascriptTransform { "expr", "type" });

tagged_union! {
    /// How a module input (or a sleep duration, or a for-loop iterator) is
    /// produced.
    pub enum InputTransform {
        Static(StaticTransform),
        Javascript(JavascriptTransform),
    }
}

impl InputTransform {
    /// A literal input.
    pub fn static_value(value: Value) -> Self {
        InputTransform::Static(StaticTransform {
            value: Maybe::Set(value),
            ..Default::default()
        })
    }

    /// An input computed from `expr`.
    pub fn javascript(expr: impl Into<String>) -> Self {
        InputTransform::Javascript(JavascriptTransform {
            expr: expr.into(),
            ..Default::default()
        })
    }
}

/// Module inputs keyed by argument name.
pub type InputTransforms = BTreeMap<String, InputTransform>;

// ---------------------------------------------------------------------------
// Module values
// ---------------------------------------------------------------------------

/// Inline script source embedded in the flow.
///
/// `type` is an unconstrained string here, so this shape accepts any object
/// carrying `content` and a known `language`; it is tried first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawScript {
    pub content: String,
    pub language: ScriptLang,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub path: Maybe<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(RawScript { "content", "language", "type", "path" });

impl RawScript {
    /// Wire value of `type` for inline scripts.
    pub const TYPE: &'static str = "rawscript";

    pub fn new(language: ScriptLang, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            language,
            kind: Self::TYPE.to_string(),
            path: Maybe::Unset,
            additional_properties: AdditionalProperties::default(),
        }
    }
}

/// Reference to a deployed script by path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathScript {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: PathScriptType,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(PathScript { "path", "type" });

/// Runs `modules` once per element produced by `iterator`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForloopFlow {
    pub iterator: InputTransform,
    pub modules: Vec<FlowModule>,
    pub skip_failures: bool,
    #[serde(rename = "type")]
    pub kind: ForloopFlowType,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(ForloopFlow { "iterator", "modules", "skip_failures", "type" });

/// Reference to another flow, run as a sub-flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowReference {
    #[serde(rename = "type")]
    pub kind: FlowReferenceType,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub path: Maybe<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(FlowReference { "type", "path" });

tagged_union! {
    /// What a flow module runs.
    pub enum FlowModuleValue {
        RawScript(RawScript),
        Script(PathScript),
        ForLoop(ForloopFlow),
        Flow(FlowReference),
    }
}

// ---------------------------------------------------------------------------
// Module controls
// ---------------------------------------------------------------------------

/// Early-exit condition evaluated after a module completes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StopAfterIf {
    pub expr: String,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub skip_if_stopped: Maybe<bool>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(StopAfterIf { "expr", "skip_if_stopped" });

/// Retry with a fixed delay between attempts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstantDelay {
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub attempts: Maybe<i64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub seconds: Maybe<i64>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(ConstantDelay { "attempts", "seconds" });

/// Retry with a delay of `multiplier * seconds ^ attempt`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExponentialDelay {
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub attempts: Maybe<i64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub multiplier: Maybe<i64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub seconds: Maybe<i64>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(ExponentialDelay { "attempts", "multiplier", "seconds" });

/// Retry policy of a module; the constant phase runs before the exponential one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Retry {
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub constant: Maybe<ConstantDelay>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub exponential: Maybe<ExponentialDelay>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(Retry { "constant", "exponential" });

// ---------------------------------------------------------------------------
// Modules and flows
// ---------------------------------------------------------------------------

/// One step of a flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowModule {
    pub input_transforms: InputTransforms,
    pub value: FlowModuleValue,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub stop_after_if: Maybe<StopAfterIf>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub sleep: Maybe<InputTransform>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub summary: Maybe<String>,
    /// Number of approval events to wait for before resuming.
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub suspend: Maybe<i64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub retry: Maybe<Retry>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(FlowModule {
    "input_transforms",
    "value",
    "stop_after_if",
    "sleep",
    "summary",
    "suspend",
    "retry",
});

impl FlowModule {
    /// A module with no inputs and no controls.
    pub fn new(value: FlowModuleValue) -> Self {
        Self {
            input_transforms: InputTransforms::new(),
            value,
            stop_after_if: Maybe::Unset,
            sleep: Maybe::Unset,
            summary: Maybe::Unset,
            suspend: Maybe::Unset,
            retry: Maybe::Unset,
            additional_properties: AdditionalProperties::default(),
        }
    }
}

/// The executable part of a flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowValue {
    pub modules: Vec<FlowModule>,
    /// Module run when any step fails.
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub failure_module: Maybe<FlowModule>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub same_worker: Maybe<bool>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(FlowValue { "modules", "failure_module", "same_worker" });

/// A flow definition without workspace metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenFlow {
    pub summary: String,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub description: Maybe<String>,
    pub value: FlowValue,
    /// JSON schema of the flow inputs.
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub schema: Maybe<Value>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(OpenFlow { "summary", "description", "value", "schema" });

/// A flow definition addressed by path; body of create/update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenFlowWPath {
    pub path: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub description: Maybe<String>,
    pub value: FlowValue,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub schema: Maybe<Value>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(OpenFlowWPath { "path", "summary", "description", "value", "schema" });

/// A deployed flow as returned by the workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    pub path: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub description: Maybe<String>,
    pub value: FlowValue,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub schema: Maybe<Value>,
    pub edited_by: String,
    pub edited_at: Timestamp,
    pub archived: bool,
    pub extra_perms: ExtraPerms,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub workspace_id: Maybe<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(Flow {
    "path",
    "summary",
    "description",
    "value",
    "schema",
    "edited_by",
    "edited_at",
    "archived",
    "extra_perms",
    "workspace_id",
});

/// A flow published on the hub.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HubFlow {
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub flow: Maybe<OpenFlow>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(HubFlow { "flow" });

/// Body of the archive endpoint; an absent flag archives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchiveFlowBody {
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub archived: Maybe<bool>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(ArchiveFlowBody { "archived" });

// ---------------------------------------------------------------------------
// Run status
// ---------------------------------------------------------------------------

/// Progress of one module within a flow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowStatusModuleType {
    WaitingForPriorSteps,
    WaitingForEvents,
    WaitingForExecutor,
    InProgress,
    Success,
    Failure,
}

/// Iteration state of a for-loop module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowIteratorStatus {
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub index: Maybe<i64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub itered: Maybe<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub args: Maybe<Value>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(FlowIteratorStatus { "index", "itered", "args" });

/// Status of one module of a running or finished flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowStatusModule {
    #[serde(rename = "type")]
    pub kind: FlowStatusModuleType,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub job: Maybe<JobId>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub count: Maybe<i64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub iterator: Maybe<FlowIteratorStatus>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub flow_jobs: Maybe<Vec<JobId>>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(FlowStatusModule { "type", "job", "count", "iterator", "flow_jobs" });

/// Retry bookkeeping of a flow run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowStatusRetry {
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub fail_count: Maybe<i64>,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub failed_jobs: Maybe<Vec<JobId>>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(FlowStatusRetry { "fail_count", "failed_jobs" });

/// Status of a flow run, one entry per module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowStatus {
    /// Index of the module currently running.
    pub step: i64,
    pub modules: Vec<FlowStatusModule>,
    pub failure_module: FlowStatusModule,
    #[serde(default, skip_serializing_if = "Maybe::is_unset")]
    pub retry: Maybe<FlowStatusRetry>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl_model!(FlowStatus { "step", "modules", "failure_module", "retry" });
