//! Export workspaces use case.

use std::future::Future;
use std::path::PathBuf;

use porter_domain::{
    CollectionSummary, EnvironmentSummary, WorkspaceSummary, collection_file_name,
    environment_file_name, globals_file_name,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::ApplicationResult;
use crate::ports::{ExportRepository, RequestSender};
use crate::postman_api::PostmanApi;

/// What to export and how to react to failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Also export each workspace's environments.
    pub include_environments: bool,
    /// Also export each workspace's global variables.
    pub include_globals: bool,
    /// Leave files that already exist untouched instead of fetching them again.
    pub skip_existing: bool,
    /// Log per-item failures and keep going instead of aborting the run.
    pub continue_on_error: bool,
}

/// Outcome of an export run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Files written, in export order.
    pub exported: Vec<PathBuf>,
    /// Files left untouched because they already existed.
    pub skipped: Vec<PathBuf>,
    /// Items that failed while `continue_on_error` was set.
    pub failures: usize,
    /// Paths produced more than once in this run; the later item wins.
    pub duplicates: Vec<PathBuf>,
}

/// Use case exporting every collection of every workspace.
///
/// Workspaces and their items are processed one at a time in API order.
/// By default the first failure aborts the run.
pub struct ExportWorkspaces<S: RequestSender, R: ExportRepository> {
    api: PostmanApi<S>,
    repository: R,
    options: ExportOptions,
}

impl<S: RequestSender, R: ExportRepository> ExportWorkspaces<S, R> {
    /// Creates a new `ExportWorkspaces` use case.
    #[must_use]
    pub const fn new(api: PostmanApi<S>, repository: R, options: ExportOptions) -> Self {
        Self {
            api,
            repository,
            options,
        }
    }

    /// Runs the export.
    ///
    /// # Errors
    ///
    /// Returns the first failure. The workspace listing failing always
    /// aborts; with `continue_on_error` any later failure is logged,
    /// counted in the report, and skipped.
    pub async fn execute(&self) -> ApplicationResult<ExportReport> {
        let workspaces = self.api.get_workspaces().await?;
        info!(count = workspaces.len(), "listed workspaces");

        let mut report = ExportReport::default();
        for workspace in &workspaces {
            let result = self.export_workspace(workspace, &mut report).await;
            self.recover(result, &mut report, "workspace", &workspace.name)?;
        }

        Ok(report)
    }

    async fn export_workspace(
        &self,
        workspace: &WorkspaceSummary,
        report: &mut ExportReport,
    ) -> ApplicationResult<()> {
        let detail = self.api.get_workspace(&workspace.id).await?;
        info!(
            workspace = %workspace.name,
            collections = detail.collections.len(),
            environments = detail.environments.len(),
            "exporting workspace"
        );

        if self.options.include_globals {
            let result = self.export_globals(workspace, report).await;
            self.recover(result, report, "global variables", &workspace.name)?;
        }

        for collection in &detail.collections {
            let result = self.export_collection(&workspace.name, collection, report).await;
            self.recover(result, report, "collection", &collection.name)?;
        }

        if self.options.include_environments {
            for environment in &detail.environments {
                let result = self
                    .export_environment(&workspace.name, environment, report)
                    .await;
                self.recover(result, report, "environment", &environment.name)?;
            }
        }

        Ok(())
    }

    async fn export_collection(
        &self,
        workspace: &str,
        collection: &CollectionSummary,
        report: &mut ExportReport,
    ) -> ApplicationResult<()> {
        let file_name = collection_file_name(workspace, &collection.name);
        let fetch = self.api.get_collection(&collection.id);
        if let Some(path) = self.write_export(file_name, fetch, report).await? {
            info!(
                path = %path.display(),
                "Exported {} from workspace {}",
                collection.name,
                workspace
            );
        }
        Ok(())
    }

    async fn export_environment(
        &self,
        workspace: &str,
        environment: &EnvironmentSummary,
        report: &mut ExportReport,
    ) -> ApplicationResult<()> {
        let file_name = environment_file_name(workspace, &environment.name);
        let fetch = self.api.get_environment(&environment.id);
        if let Some(path) = self.write_export(file_name, fetch, report).await? {
            info!(
                path = %path.display(),
                "Exported environment {} from workspace {}",
                environment.name,
                workspace
            );
        }
        Ok(())
    }

    async fn export_globals(
        &self,
        workspace: &WorkspaceSummary,
        report: &mut ExportReport,
    ) -> ApplicationResult<()> {
        let file_name = globals_file_name(&workspace.name);
        let fetch = self.api.get_global_variables(&workspace.id);
        if let Some(path) = self.write_export(file_name, fetch, report).await? {
            info!(
                path = %path.display(),
                "Exported global variables from workspace {}",
                workspace.name
            );
        }
        Ok(())
    }

    /// Fetches and stores one document; returns `None` when it was skipped.
    async fn write_export<F>(
        &self,
        file_name: String,
        fetch: F,
        report: &mut ExportReport,
    ) -> ApplicationResult<Option<PathBuf>>
    where
        F: Future<Output = ApplicationResult<Value>>,
    {
        let path = self.repository.path_for(&file_name);
        // A file written earlier in this run exists only because of that write.
        let written_this_run = report.exported.contains(&path);
        if written_this_run || report.skipped.contains(&path) {
            warn!(path = %path.display(), "file name already used in this run");
            report.duplicates.push(path.clone());
        }

        if self.options.skip_existing
            && !written_this_run
            && self.repository.exists(&file_name).await
        {
            info!(path = %path.display(), "already exported, skipping");
            report.skipped.push(path);
            return Ok(None);
        }

        let document = fetch.await?;
        let file = self.repository.save_document(&file_name, &document).await?;
        report.exported.push(file.path.clone());
        Ok(Some(file.path))
    }

    fn recover(
        &self,
        result: ApplicationResult<()>,
        report: &mut ExportReport,
        item: &str,
        name: &str,
    ) -> ApplicationResult<()> {
        match result {
            Err(error) if self.options.continue_on_error => {
                report.failures += 1;
                warn!(item, name, error = %error, "export failed, continuing");
                Ok(())
            }
            other => other,
        }
    }
}
