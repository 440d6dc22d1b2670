use relstore_core::Error;
use relstore_release::{diff_documents, find_releases_by_parameters, ReleaseService};
use relstore_store::Store;
use tracing::instrument;

use crate::error::{DispatchError, DispatchResult};
use crate::operation::Operation;
use crate::output::{DispatchOutput, OutputMode};

/// The single entry point external callers go through: one dispatch
/// method per [`Operation`], each returning a [`DispatchOutput`] already
/// shaped for the requested [`OutputMode`] (spec §4.8).
pub struct Dispatcher<S: Store> {
    service: ReleaseService<S>,
}

impl<S: Store> Dispatcher<S> {
    pub fn new(service: ReleaseService<S>) -> Self {
        Self { service }
    }

    #[instrument(skip(self, operation))]
    pub async fn dispatch(&self, operation: Operation, mode: OutputMode) -> DispatchResult<Shaped> {
        let output = self.run(operation).await?;
        Ok(Shaped::new(output, mode))
    }

    async fn run(&self, operation: Operation) -> DispatchResult<DispatchOutput> {
        let svc = &self.service;
        let out = match operation {
            Operation::AddContentRelease {
                site_code,
                title,
                version,
                base_release,
                use_current_live_as_base_release,
            } => DispatchOutput::Release(
                svc.create_release(
                    &site_code,
                    &title,
                    &version,
                    base_release,
                    use_current_live_as_base_release,
                )
                .await?,
            ),
            Operation::RemoveContentRelease { id } => {
                svc.remove_release(id).await?;
                DispatchOutput::Unit
            }
            Operation::UpdateContentRelease { id, title, version } => {
                DispatchOutput::Release(svc.update_release(id, title, version).await?)
            }
            Operation::UpdateContentReleaseParameters {
                id,
                parameters,
                clear_first,
            } => {
                svc.update_release_parameters(id, parameters, clear_first).await?;
                DispatchOutput::Unit
            }
            Operation::GetContentReleaseDetails { id } => {
                DispatchOutput::Release(svc.get_release(id).await?)
            }
            Operation::GetContentReleaseDetailsQueryParameters { site_code, parameters } => {
                let matches = find_releases_by_parameters(svc.store(), &site_code, &parameters)
                    .await
                    .map_err(DispatchError::Domain)?;
                match matches.len() {
                    0 => return Err(Error::ContentReleaseDoesNotExist.into()),
                    1 => DispatchOutput::Release(matches.into_iter().next().unwrap()),
                    _ => return Err(Error::ContentReleaseMoreThanOne.into()),
                }
            }
            Operation::SetStageContentRelease { id } => {
                DispatchOutput::Release(svc.set_stage(id).await?)
            }
            Operation::SetLiveContentRelease { id } => {
                DispatchOutput::Release(svc.set_live(id).await?)
            }
            Operation::FreezeContentRelease { id, publish_datetime } => {
                DispatchOutput::Release(svc.freeze(id, publish_datetime).await?)
            }
            Operation::UnfreezeContentRelease { id } => {
                DispatchOutput::Release(svc.unfreeze(id).await?)
            }
            Operation::ArchiveContentRelease { id } => {
                DispatchOutput::Release(svc.archive(id).await?)
            }
            Operation::UnarchiveContentRelease { id } => {
                DispatchOutput::Release(svc.unarchive(id).await?)
            }
            Operation::GetLiveContentRelease { site_code } => {
                DispatchOutput::Release(svc.get_live_release(&site_code).await?)
            }
            Operation::ListContentReleases {
                site_code,
                status,
                since,
            } => DispatchOutput::Releases(svc.list_releases(&site_code, status, since).await?),
            Operation::PublishDocumentToContentRelease {
                release_id,
                document_key,
                content_type,
                document_json,
                parameters,
            } => DispatchOutput::Document(
                svc.publish_document(release_id, &document_key, &content_type, document_json, parameters)
                    .await?,
            ),
            Operation::UnpublishDocumentFromContentRelease { release_id, identity } => {
                DispatchOutput::Document(svc.unpublish_document(release_id, &identity).await?)
            }
            Operation::DeleteDocumentFromContentRelease { release_id, identity } => {
                DispatchOutput::Document(svc.delete_document(release_id, &identity).await?)
            }
            Operation::GetDocumentFromContentRelease { release_id, identity } => {
                DispatchOutput::Document(svc.get_document(release_id, &identity).await?)
            }
            Operation::GetDocumentExtraFromContentRelease {
                release_id,
                identity,
                key,
            } => {
                svc.get_release(release_id).await?;
                let doc = svc
                    .store()
                    .find_document(release_id, &identity)
                    .await
                    .map_err(relstore_core::Error::from)?
                    .ok_or(Error::ReleaseDocumentDoesNotExist)?;
                let value = svc
                    .store()
                    .get_document_parameter(doc.id, &key)
                    .await
                    .map_err(relstore_core::Error::from)?
                    .ok_or(Error::ContentReleaseExtraParameterDoesNotExist)?;
                DispatchOutput::Parameter(value)
            }
            Operation::GetExtraParamater { release_id, key } => {
                DispatchOutput::Parameter(svc.get_release_parameter(release_id, &key).await?)
            }
            Operation::GetExtraParamaters { release_id } => {
                DispatchOutput::Parameters(svc.list_release_parameters(release_id).await?)
            }
            Operation::CompareContentReleases {
                from_release_id,
                to_release_id,
            } => {
                // `effective_view` validates release existence via
                // `get_release` first, so an unknown uuid on either side
                // surfaces as `content_release_does_not_exist` rather than
                // `base_content_release_does_not_exist` (spec §4.6).
                let from_view = svc.effective_view(from_release_id).await?;
                let to_view = svc.effective_view(to_release_id).await?;
                DispatchOutput::Diff(diff_documents(&from_view, &to_view))
            }
        };
        Ok(out)
    }
}

/// A dispatch result, still tagged with the mode it should be rendered in.
pub struct Shaped {
    output: DispatchOutput,
    mode: OutputMode,
}

impl Shaped {
    fn new(output: DispatchOutput, mode: OutputMode) -> Self {
        Self { output, mode }
    }

    /// The native Rust value, if native mode was requested.
    pub fn native(self) -> Option<DispatchOutput> {
        match self.mode {
            OutputMode::Native => Some(self.output),
            OutputMode::Json => None,
        }
    }

    /// The JSON rendering, computed regardless of mode (useful for callers
    /// that already know they're in JSON mode and don't want the `Option`).
    pub fn into_json(self) -> serde_json::Value {
        self.output.into_json()
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }
}
