//! Result storage API.
//!
//! Layout: `<root>/<result_id>/manifest.json` + `response.json`.

use crate::types::ResultManifest;
use crate::{ResultsError, ResultsResult};
use hf_record::FlowTestResponse;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct ResultStore {
    root_dir: PathBuf,
}

impl ResultStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    /// Store beside a record file, under `.hydrantflow/results`.
    pub fn for_record(record_path: &Path) -> ResultsResult<Self> {
        let record_dir = record_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: "record path has no parent directory".to_string(),
            })?;
        Self::new(record_dir.join(".hydrantflow").join("results"))
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn result_dir(&self, result_id: &str) -> PathBuf {
        self.root_dir.join(result_id)
    }

    pub fn has_result(&self, result_id: &str) -> bool {
        self.result_dir(result_id).join("manifest.json").exists()
    }

    pub fn save_result(
        &self,
        manifest: &ResultManifest,
        response: &FlowTestResponse,
    ) -> ResultsResult<()> {
        let dir = self.result_dir(&manifest.result_id);
        fs::create_dir_all(&dir)?;

        let response_json = serde_json::to_string_pretty(response)?;
        fs::write(dir.join("response.json"), response_json)?;

        // Manifest last: its presence marks the entry complete.
        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(dir.join("manifest.json"), manifest_json)?;

        info!(
            result_id = %manifest.result_id,
            hydrant_id = %manifest.hydrant_id,
            class = %manifest.nfpa_class,
            "stored flow test result"
        );
        Ok(())
    }

    pub fn load_manifest(&self, result_id: &str) -> ResultsResult<ResultManifest> {
        let manifest_path = self.result_dir(result_id).join("manifest.json");

        if !manifest_path.exists() {
            return Err(ResultsError::ResultNotFound {
                result_id: result_id.to_string(),
            });
        }

        let content = fs::read_to_string(manifest_path)?;
        let manifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }

    pub fn load_response(&self, result_id: &str) -> ResultsResult<FlowTestResponse> {
        let response_path = self.result_dir(result_id).join("response.json");

        if !response_path.exists() {
            return Err(ResultsError::ResultNotFound {
                result_id: result_id.to_string(),
            });
        }

        let content = fs::read_to_string(response_path)?;
        let response = serde_json::from_str(&content)?;
        Ok(response)
    }

    /// All manifests, newest test first.
    pub fn list_all(&self) -> ResultsResult<Vec<ResultManifest>> {
        let mut manifests = Vec::new();

        if !self.root_dir.exists() {
            return Ok(manifests);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let result_id = entry.file_name().to_string_lossy().to_string();
            match self.load_manifest(&result_id) {
                Ok(manifest) => manifests.push(manifest),
                Err(e) => debug!(%result_id, error = %e, "skipping unreadable result entry"),
            }
        }

        manifests.sort_by(|a, b| {
            b.tested_on
                .cmp(&a.tested_on)
                .then_with(|| b.evaluated_at.cmp(&a.evaluated_at))
        });
        Ok(manifests)
    }

    pub fn list_for_hydrant(&self, hydrant_id: Uuid) -> ResultsResult<Vec<ResultManifest>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|m| m.hydrant_id == hydrant_id)
            .collect())
    }

    pub fn list_for_organization(
        &self,
        organization_id: Uuid,
    ) -> ResultsResult<Vec<ResultManifest>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|m| m.organization_id == organization_id)
            .collect())
    }

    pub fn delete_result(&self, result_id: &str) -> ResultsResult<()> {
        let dir = self.result_dir(result_id);
        if dir.exists() {
            fs::remove_dir_all(dir)?;
        }
        Ok(())
    }
}
