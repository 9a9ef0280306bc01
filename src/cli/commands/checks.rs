//! List the available checks

use std::sync::Arc;

use repo_analyzer::checks::{CheckContext, CheckRegistry};
use repo_analyzer::config::Settings;
use repo_analyzer::output::{CheckInfo, CheckListResult, OutputMode};

/// Print every registered check with its description
#[allow(clippy::unnecessary_wraps)]
pub fn checks(mode: OutputMode) -> anyhow::Result<()> {
    // Listing never clones, so no credentials are needed
    let ctx = Arc::new(CheckContext::from_settings(&Settings::load(), None));
    let registry = CheckRegistry::builtin(&ctx);

    CheckListResult {
        checks: registry
            .iter()
            .map(|check| CheckInfo {
                name: check.name().to_string(),
                description: check.description().to_string(),
            })
            .collect(),
    }
    .render(mode);
    Ok(())
}
