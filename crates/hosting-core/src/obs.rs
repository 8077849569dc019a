//! Structured observability hooks for stack assembly.
//!
//! This module provides:
//! - A stack-scoped tracing span via the `StackSpan` RAII guard
//! - Emission functions for each assembly step and for synthesis
//!
//! Events are emitted at `info!` level (filter with `HOSTING_LOG` or `RUST_LOG`).

use tracing::info;

use crate::domain::{Platform, RedirectStatus, Stage};

/// RAII guard that enters a stack-scoped span for the duration of assembly.
///
/// # Example
///
/// ```ignore
/// let _span = StackSpan::enter("AmplifyHostingStack");
/// // every event below carries stack = "AmplifyHostingStack"
/// ```
pub struct StackSpan {
    _span: tracing::span::EnteredSpan,
}

impl StackSpan {
    pub fn enter(stack: &str) -> Self {
        let span = tracing::info_span!("hosting.stack", stack = %stack);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: application constructed from its source binding.
pub fn emit_stack_constructed(app_name: &str, repository_url: &str, env_count: usize) {
    info!(
        event = "stack.constructed",
        app_name = %app_name,
        repository = %repository_url,
        env_count = env_count,
    );
}

pub fn emit_rule_attached(source: &str, target: &str, status: RedirectStatus) {
    info!(
        event = "stack.rule_attached",
        source = %source,
        target = %target,
        status = status.code(),
    );
}

pub fn emit_branch_attached(branch: &str, stage: Stage) {
    info!(event = "stack.branch_attached", branch = %branch, stage = stage.as_str());
}

/// Emit event: a low-level property was set past the high-level construct.
pub fn emit_override_applied(path: &str, platform: Platform) {
    info!(
        event = "stack.override_applied",
        path = %path,
        platform = platform.as_str(),
    );
}

pub fn emit_output_published(output_id: &str) {
    info!(event = "stack.output_published", output_id = %output_id);
}

/// Emit event: template synthesized.
///
/// # Example
///
/// ```ignore
/// emit_stack_synthesized("AmplifyHostingStack", 3, 1, "ab12...");
/// // logs: event=stack.synthesized resources=3 outputs=1 digest=ab12...
/// ```
pub fn emit_stack_synthesized(stack: &str, resources: usize, outputs: usize, digest: &str) {
    info!(
        event = "stack.synthesized",
        stack = %stack,
        resources = resources,
        outputs = outputs,
        digest = %digest,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emitters_do_not_panic_without_subscriber() {
        let _span = StackSpan::enter("test-stack");
        emit_stack_constructed("Demo", "https://github.com/acme/site", 1);
        emit_rule_attached("/<*>", "/index.html", RedirectStatus::NotFoundRewrite);
        emit_branch_attached("main", Stage::Production);
        emit_override_applied("ProductViewer", Platform::WebCompute);
        emit_output_published("appId");
        emit_stack_synthesized("test-stack", 3, 1, "deadbeef");
    }
}
