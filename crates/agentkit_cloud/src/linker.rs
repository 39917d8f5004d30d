//! Frontend linker.
//!
//! Renders the environment file the static frontend is built with, so the
//! served assets point at the deployed identity pool and API. Values come
//! from the aggregate stack outputs; the file lands next to the frontend
//! sources before the asset build runs.

use std::path::Path;

use tracing::info;

use crate::error::CloudResult;
use crate::outputs::StackOutputs;

/// Generates frontend build configuration from stack outputs.
pub struct FrontendLinker<'a> {
    outputs: &'a StackOutputs,
}

impl<'a> FrontendLinker<'a> {
    pub fn new(outputs: &'a StackOutputs) -> Self {
        Self { outputs }
    }

    /// Render the environment file content.
    pub fn render_env(&self) -> String {
        let mut content = String::from(
            "# Frontend configuration\n\
             # Auto-generated from stack outputs - do not edit manually.\n",
        );

        content.push_str(&format!(
            "VITE_COGNITO_USER_POOL_ID={}\n",
            self.outputs.identity.user_pool_id
        ));
        content.push_str(&format!(
            "VITE_COGNITO_CLIENT_ID={}\n",
            self.outputs.identity.client_id
        ));
        if let Some(domain) = &self.outputs.identity.domain {
            content.push_str(&format!("VITE_COGNITO_DOMAIN={}\n", domain));
        }
        content.push_str(&format!("VITE_API_ENDPOINT={}\n", self.outputs.api.api_url));
        content.push_str(&format!(
            "VITE_APP_URL={}\n",
            self.outputs.distribution.frontend_url
        ));

        content
    }

    /// Write the environment file to `target_dir/.env.production`.
    pub fn write_env(&self, target_dir: &Path) -> CloudResult<()> {
        std::fs::create_dir_all(target_dir)?;
        let path = target_dir.join(".env.production");
        std::fs::write(&path, self.render_env())?;
        info!("Wrote frontend environment to {:?}", path);
        Ok(())
    }
}
