//! Drive API v2
//!
//! File metadata, folders, sharing, comments and revisions. Media upload and
//! download are not covered.

use crate::error::Result;
use crate::gcp::transport::Transport;
use crate::model::drive::{
    About, App, AppList, Change, ChangeList, Channel, ChildList, ChildReference, Comment,
    CommentList, CommentReply, CommentReplyList, DriveFile, FileList, ParentList,
    ParentReference, Permission, PermissionId, PermissionList, Property, PropertyList,
    Revision, RevisionList,
};
use crate::resource::fetcher::{fetch_all_pages, PAGE_TOKEN_PARAMETER};
use crate::resource::registry::{builtin_service, ServiceDef};
use crate::resource::{InvocationArgs, OptParams, Resource, ResourceInvoker};

/// Typed client for the Drive API v2
pub struct DriveService<T> {
    invoker: ResourceInvoker<T>,
    service: &'static ServiceDef,
}

impl<T: Transport> DriveService<T> {
    pub fn new(transport: T) -> Self {
        Self::with_invoker(ResourceInvoker::new(transport))
    }

    pub fn with_invoker(invoker: ResourceInvoker<T>) -> Self {
        Self {
            invoker,
            service: builtin_service("drive"),
        }
    }

    pub fn invoker(&self) -> &ResourceInvoker<T> {
        &self.invoker
    }

    pub fn service(&self) -> &'static ServiceDef {
        self.service
    }

    pub fn about(&self) -> AboutResource<'_, T> {
        AboutResource(self.invoker.resource(self.service, "about"))
    }

    pub fn apps(&self) -> AppsResource<'_, T> {
        AppsResource(self.invoker.resource(self.service, "apps"))
    }

    pub fn changes(&self) -> ChangesResource<'_, T> {
        ChangesResource(self.invoker.resource(self.service, "changes"))
    }

    pub fn channels(&self) -> ChannelsResource<'_, T> {
        ChannelsResource(self.invoker.resource(self.service, "channels"))
    }

    pub fn children(&self) -> ChildrenResource<'_, T> {
        ChildrenResource(self.invoker.resource(self.service, "children"))
    }

    pub fn comments(&self) -> CommentsResource<'_, T> {
        CommentsResource(self.invoker.resource(self.service, "comments"))
    }

    pub fn files(&self) -> FilesResource<'_, T> {
        FilesResource(self.invoker.resource(self.service, "files"))
    }

    pub fn parents(&self) -> ParentsResource<'_, T> {
        ParentsResource(self.invoker.resource(self.service, "parents"))
    }

    pub fn permissions(&self) -> PermissionsResource<'_, T> {
        PermissionsResource(self.invoker.resource(self.service, "permissions"))
    }

    pub fn properties(&self) -> PropertiesResource<'_, T> {
        PropertiesResource(self.invoker.resource(self.service, "properties"))
    }

    pub fn realtime(&self) -> RealtimeResource<'_, T> {
        RealtimeResource(self.invoker.resource(self.service, "realtime"))
    }

    pub fn replies(&self) -> RepliesResource<'_, T> {
        RepliesResource(self.invoker.resource(self.service, "replies"))
    }

    pub fn revisions(&self) -> RevisionsResource<'_, T> {
        RevisionsResource(self.invoker.resource(self.service, "revisions"))
    }
}

pub struct AboutResource<'a, T>(Resource<'a, T>);

impl<T: Transport> AboutResource<'_, T> {
    /// Information about the user, their quota and Drive settings
    pub async fn get(&self, opt_params: OptParams) -> Result<About> {
        self.0.call("get", InvocationArgs::new().merge(opt_params)).await
    }
}

pub struct AppsResource<'a, T>(Resource<'a, T>);

impl<T: Transport> AppsResource<'_, T> {
    pub async fn get(&self, app_id: &str, opt_params: OptParams) -> Result<App> {
        let args = InvocationArgs::new().with("appId", app_id);
        self.0.call("get", args.merge(opt_params)).await
    }

    pub async fn list(&self, opt_params: OptParams) -> Result<AppList> {
        self.0.call("list", InvocationArgs::new().merge(opt_params)).await
    }
}

pub struct ChangesResource<'a, T>(Resource<'a, T>);

impl<T: Transport> ChangesResource<'_, T> {
    pub async fn get(&self, change_id: &str, opt_params: OptParams) -> Result<Change> {
        let args = InvocationArgs::new().with("changeId", change_id);
        self.0.call("get", args.merge(opt_params)).await
    }

    /// Changes for the user, starting at `startChangeId` if given
    pub async fn list(&self, opt_params: OptParams) -> Result<ChangeList> {
        self.0.call("list", InvocationArgs::new().merge(opt_params)).await
    }

    pub async fn watch(&self, body: &Channel, opt_params: OptParams) -> Result<Channel> {
        let args = InvocationArgs::new()
            .with_body(body)?;
        self.0.call("watch", args.merge(opt_params)).await
    }
}

pub struct ChannelsResource<'a, T>(Resource<'a, T>);

impl<T: Transport> ChannelsResource<'_, T> {
    pub async fn stop(&self, body: &Channel, opt_params: OptParams) -> Result<()> {
        let args = InvocationArgs::new()
            .with_body(body)?;
        self.0.call_void("stop", args.merge(opt_params)).await
    }
}

pub struct ChildrenResource<'a, T>(Resource<'a, T>);

impl<T: Transport> ChildrenResource<'_, T> {
    pub async fn delete(
        &self,
        folder_id: &str,
        child_id: &str,
        opt_params: OptParams,
    ) -> Result<()> {
        let args = InvocationArgs::new()
            .with("folderId", folder_id)
            .with("childId", child_id);
        self.0.call_void("delete", args.merge(opt_params)).await
    }

    pub async fn get(
        &self,
        folder_id: &str,
        child_id: &str,
        opt_params: OptParams,
    ) -> Result<ChildReference> {
        let args = InvocationArgs::new()
            .with("folderId", folder_id)
            .with("childId", child_id);
        self.0.call("get", args.merge(opt_params)).await
    }

    pub async fn insert(
        &self,
        folder_id: &str,
        body: &ChildReference,
        opt_params: OptParams,
    ) -> Result<ChildReference> {
        let args = InvocationArgs::new()
            .with("folderId", folder_id)
            .with_body(body)?;
        self.0.call("insert", args.merge(opt_params)).await
    }

    pub async fn list(&self, folder_id: &str, opt_params: OptParams) -> Result<ChildList> {
        let args = InvocationArgs::new().with("folderId", folder_id);
        self.0.call("list", args.merge(opt_params)).await
    }
}

pub struct CommentsResource<'a, T>(Resource<'a, T>);

impl<T: Transport> CommentsResource<'_, T> {
    pub async fn delete(
        &self,
        file_id: &str,
        comment_id: &str,
        opt_params: OptParams,
    ) -> Result<()> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with("commentId", comment_id);
        self.0.call_void("delete", args.merge(opt_params)).await
    }

    pub async fn get(
        &self,
        file_id: &str,
        comment_id: &str,
        opt_params: OptParams,
    ) -> Result<Comment> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with("commentId", comment_id);
        self.0.call("get", args.merge(opt_params)).await
    }

    pub async fn insert(
        &self,
        file_id: &str,
        body: &Comment,
        opt_params: OptParams,
    ) -> Result<Comment> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with_body(body)?;
        self.0.call("insert", args.merge(opt_params)).await
    }

    pub async fn list(&self, file_id: &str, opt_params: OptParams) -> Result<CommentList> {
        let args = InvocationArgs::new().with("fileId", file_id);
        self.0.call("list", args.merge(opt_params)).await
    }

    pub async fn patch(
        &self,
        file_id: &str,
        comment_id: &str,
        body: &Comment,
        opt_params: OptParams,
    ) -> Result<Comment> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with("commentId", comment_id)
            .with_body(body)?;
        self.0.call("patch", args.merge(opt_params)).await
    }

    pub async fn update(
        &self,
        file_id: &str,
        comment_id: &str,
        body: &Comment,
        opt_params: OptParams,
    ) -> Result<Comment> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with("commentId", comment_id)
            .with_body(body)?;
        self.0.call("update", args.merge(opt_params)).await
    }
}

pub struct FilesResource<'a, T>(Resource<'a, T>);

impl<T: Transport> FilesResource<'_, T> {
    /// Copy a file, applying the given metadata to the copy
    pub async fn copy(
        &self,
        file_id: &str,
        body: &DriveFile,
        opt_params: OptParams,
    ) -> Result<DriveFile> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with_body(body)?;
        self.0.call("copy", args.merge(opt_params)).await
    }

    /// Permanently delete a file, skipping the trash
    pub async fn delete(&self, file_id: &str, opt_params: OptParams) -> Result<()> {
        let args = InvocationArgs::new().with("fileId", file_id);
        self.0.call_void("delete", args.merge(opt_params)).await
    }

    /// Permanently delete everything in the trash
    pub async fn empty_trash(&self, opt_params: OptParams) -> Result<()> {
        self.0.call_void("emptyTrash", InvocationArgs::new().merge(opt_params)).await
    }

    pub async fn get(&self, file_id: &str, opt_params: OptParams) -> Result<DriveFile> {
        let args = InvocationArgs::new().with("fileId", file_id);
        self.0.call("get", args.merge(opt_params)).await
    }

    /// Create a file from metadata only
    pub async fn insert(&self, body: &DriveFile, opt_params: OptParams) -> Result<DriveFile> {
        let args = InvocationArgs::new()
            .with_body(body)?;
        self.0.call("insert", args.merge(opt_params)).await
    }

    pub async fn list(&self, opt_params: OptParams) -> Result<FileList> {
        self.0.call("list", InvocationArgs::new().merge(opt_params)).await
    }

    pub async fn patch(
        &self,
        file_id: &str,
        body: &DriveFile,
        opt_params: OptParams,
    ) -> Result<DriveFile> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with_body(body)?;
        self.0.call("patch", args.merge(opt_params)).await
    }

    /// Set the modified time of a file to now
    pub async fn touch(&self, file_id: &str, opt_params: OptParams) -> Result<DriveFile> {
        let args = InvocationArgs::new().with("fileId", file_id);
        self.0.call("touch", args.merge(opt_params)).await
    }

    pub async fn trash(&self, file_id: &str, opt_params: OptParams) -> Result<DriveFile> {
        let args = InvocationArgs::new().with("fileId", file_id);
        self.0.call("trash", args.merge(opt_params)).await
    }

    pub async fn untrash(&self, file_id: &str, opt_params: OptParams) -> Result<DriveFile> {
        let args = InvocationArgs::new().with("fileId", file_id);
        self.0.call("untrash", args.merge(opt_params)).await
    }

    pub async fn update(
        &self,
        file_id: &str,
        body: &DriveFile,
        opt_params: OptParams,
    ) -> Result<DriveFile> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with_body(body)?;
        self.0.call("update", args.merge(opt_params)).await
    }

    pub async fn watch(
        &self,
        file_id: &str,
        body: &Channel,
        opt_params: OptParams,
    ) -> Result<Channel> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with_body(body)?;
        self.0.call("watch", args.merge(opt_params)).await
    }
}

pub struct ParentsResource<'a, T>(Resource<'a, T>);

impl<T: Transport> ParentsResource<'_, T> {
    pub async fn delete(
        &self,
        file_id: &str,
        parent_id: &str,
        opt_params: OptParams,
    ) -> Result<()> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with("parentId", parent_id);
        self.0.call_void("delete", args.merge(opt_params)).await
    }

    pub async fn get(
        &self,
        file_id: &str,
        parent_id: &str,
        opt_params: OptParams,
    ) -> Result<ParentReference> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with("parentId", parent_id);
        self.0.call("get", args.merge(opt_params)).await
    }

    pub async fn insert(
        &self,
        file_id: &str,
        body: &ParentReference,
        opt_params: OptParams,
    ) -> Result<ParentReference> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with_body(body)?;
        self.0.call("insert", args.merge(opt_params)).await
    }

    pub async fn list(&self, file_id: &str, opt_params: OptParams) -> Result<ParentList> {
        let args = InvocationArgs::new().with("fileId", file_id);
        self.0.call("list", args.merge(opt_params)).await
    }
}

pub struct PermissionsResource<'a, T>(Resource<'a, T>);

impl<T: Transport> PermissionsResource<'_, T> {
    pub async fn delete(
        &self,
        file_id: &str,
        permission_id: &str,
        opt_params: OptParams,
    ) -> Result<()> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with("permissionId", permission_id);
        self.0.call_void("delete", args.merge(opt_params)).await
    }

    pub async fn get(
        &self,
        file_id: &str,
        permission_id: &str,
        opt_params: OptParams,
    ) -> Result<Permission> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with("permissionId", permission_id);
        self.0.call("get", args.merge(opt_params)).await
    }

    /// The permission id of an email address
    pub async fn get_id_for_email(
        &self,
        email: &str,
        opt_params: OptParams,
    ) -> Result<PermissionId> {
        let args = InvocationArgs::new().with("email", email);
        self.0.call("getIdForEmail", args.merge(opt_params)).await
    }

    pub async fn insert(
        &self,
        file_id: &str,
        body: &Permission,
        opt_params: OptParams,
    ) -> Result<Permission> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with_body(body)?;
        self.0.call("insert", args.merge(opt_params)).await
    }

    pub async fn list(&self, file_id: &str, opt_params: OptParams) -> Result<PermissionList> {
        let args = InvocationArgs::new().with("fileId", file_id);
        self.0.call("list", args.merge(opt_params)).await
    }

    pub async fn patch(
        &self,
        file_id: &str,
        permission_id: &str,
        body: &Permission,
        opt_params: OptParams,
    ) -> Result<Permission> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with("permissionId", permission_id)
            .with_body(body)?;
        self.0.call("patch", args.merge(opt_params)).await
    }

    pub async fn update(
        &self,
        file_id: &str,
        permission_id: &str,
        body: &Permission,
        opt_params: OptParams,
    ) -> Result<Permission> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with("permissionId", permission_id)
            .with_body(body)?;
        self.0.call("update", args.merge(opt_params)).await
    }
}

pub struct PropertiesResource<'a, T>(Resource<'a, T>);

impl<T: Transport> PropertiesResource<'_, T> {
    pub async fn delete(
        &self,
        file_id: &str,
        property_key: &str,
        opt_params: OptParams,
    ) -> Result<()> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with("propertyKey", property_key);
        self.0.call_void("delete", args.merge(opt_params)).await
    }

    pub async fn get(
        &self,
        file_id: &str,
        property_key: &str,
        opt_params: OptParams,
    ) -> Result<Property> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with("propertyKey", property_key);
        self.0.call("get", args.merge(opt_params)).await
    }

    pub async fn insert(
        &self,
        file_id: &str,
        body: &Property,
        opt_params: OptParams,
    ) -> Result<Property> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with_body(body)?;
        self.0.call("insert", args.merge(opt_params)).await
    }

    pub async fn list(&self, file_id: &str, opt_params: OptParams) -> Result<PropertyList> {
        let args = InvocationArgs::new().with("fileId", file_id);
        self.0.call("list", args.merge(opt_params)).await
    }

    pub async fn patch(
        &self,
        file_id: &str,
        property_key: &str,
        body: &Property,
        opt_params: OptParams,
    ) -> Result<Property> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with("propertyKey", property_key)
            .with_body(body)?;
        self.0.call("patch", args.merge(opt_params)).await
    }

    pub async fn update(
        &self,
        file_id: &str,
        property_key: &str,
        body: &Property,
        opt_params: OptParams,
    ) -> Result<Property> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with("propertyKey", property_key)
            .with_body(body)?;
        self.0.call("update", args.merge(opt_params)).await
    }
}

pub struct RealtimeResource<'a, T>(Resource<'a, T>);

impl<T: Transport> RealtimeResource<'_, T> {
}

pub struct RepliesResource<'a, T>(Resource<'a, T>);

impl<T: Transport> RepliesResource<'_, T> {
    pub async fn delete(
        &self,
        file_id: &str,
        comment_id: &str,
        reply_id: &str,
        opt_params: OptParams,
    ) -> Result<()> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with("commentId", comment_id)
            .with("replyId", reply_id);
        self.0.call_void("delete", args.merge(opt_params)).await
    }

    pub async fn get(
        &self,
        file_id: &str,
        comment_id: &str,
        reply_id: &str,
        opt_params: OptParams,
    ) -> Result<CommentReply> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with("commentId", comment_id)
            .with("replyId", reply_id);
        self.0.call("get", args.merge(opt_params)).await
    }

    pub async fn insert(
        &self,
        file_id: &str,
        comment_id: &str,
        body: &CommentReply,
        opt_params: OptParams,
    ) -> Result<CommentReply> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with("commentId", comment_id)
            .with_body(body)?;
        self.0.call("insert", args.merge(opt_params)).await
    }

    pub async fn list(
        &self,
        file_id: &str,
        comment_id: &str,
        opt_params: OptParams,
    ) -> Result<CommentReplyList> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with("commentId", comment_id);
        self.0.call("list", args.merge(opt_params)).await
    }

    pub async fn patch(
        &self,
        file_id: &str,
        comment_id: &str,
        reply_id: &str,
        body: &CommentReply,
        opt_params: OptParams,
    ) -> Result<CommentReply> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with("commentId", comment_id)
            .with("replyId", reply_id)
            .with_body(body)?;
        self.0.call("patch", args.merge(opt_params)).await
    }

    pub async fn update(
        &self,
        file_id: &str,
        comment_id: &str,
        reply_id: &str,
        body: &CommentReply,
        opt_params: OptParams,
    ) -> Result<CommentReply> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with("commentId", comment_id)
            .with("replyId", reply_id)
            .with_body(body)?;
        self.0.call("update", args.merge(opt_params)).await
    }
}

pub struct RevisionsResource<'a, T>(Resource<'a, T>);

impl<T: Transport> RevisionsResource<'_, T> {
    pub async fn delete(
        &self,
        file_id: &str,
        revision_id: &str,
        opt_params: OptParams,
    ) -> Result<()> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with("revisionId", revision_id);
        self.0.call_void("delete", args.merge(opt_params)).await
    }

    pub async fn get(
        &self,
        file_id: &str,
        revision_id: &str,
        opt_params: OptParams,
    ) -> Result<Revision> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with("revisionId", revision_id);
        self.0.call("get", args.merge(opt_params)).await
    }

    pub async fn list(&self, file_id: &str, opt_params: OptParams) -> Result<RevisionList> {
        let args = InvocationArgs::new().with("fileId", file_id);
        self.0.call("list", args.merge(opt_params)).await
    }

    pub async fn patch(
        &self,
        file_id: &str,
        revision_id: &str,
        body: &Revision,
        opt_params: OptParams,
    ) -> Result<Revision> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with("revisionId", revision_id)
            .with_body(body)?;
        self.0.call("patch", args.merge(opt_params)).await
    }

    pub async fn update(
        &self,
        file_id: &str,
        revision_id: &str,
        body: &Revision,
        opt_params: OptParams,
    ) -> Result<Revision> {
        let args = InvocationArgs::new()
            .with("fileId", file_id)
            .with("revisionId", revision_id)
            .with_body(body)?;
        self.0.call("update", args.merge(opt_params)).await
    }
}

impl<T: Transport> FilesResource<'_, T> {
    /// Every file matching the optional `q` search, following page tokens
    pub async fn list_all(&self, opt_params: OptParams) -> Result<Vec<DriveFile>> {
        fetch_all_pages(|page_token| {
            let mut params = opt_params.clone();
            if let Some(token) = page_token {
                params.insert(PAGE_TOKEN_PARAMETER.to_string(), token.into());
            }
            self.list(params)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvokeError;
    use crate::gcp::transport::spy::SpyTransport;
    use crate::opt_params;
    use crate::resource::HttpMethod;

    #[tokio::test]
    async fn test_create_folder() {
        let spy = SpyTransport::new(200, r#"{"id": "folder-1", "mimeType": "application/vnd.google-apps.folder"}"#);
        let drive = DriveService::new(&spy);

        let folder = drive
            .files()
            .insert(&DriveFile::folder("Reports"), opt_params!())
            .await
            .unwrap();

        assert!(folder.is_folder());
        let call = &spy.calls()[0];
        assert_eq!(call.method, HttpMethod::Post);
        assert_eq!(call.url, "https://www.googleapis.com/drive/v2/files");
        assert!(call.body.as_deref().unwrap().contains("\"title\":\"Reports\""));
    }

    #[tokio::test]
    async fn test_email_is_encoded_as_one_segment() {
        let spy = SpyTransport::new(200, r#"{"id": "0123", "kind": "drive#permissionId"}"#);
        let drive = DriveService::new(&spy);

        let id = drive
            .permissions()
            .get_id_for_email("someone+drive@example.com", opt_params!())
            .await
            .unwrap();

        assert_eq!(id.id.as_deref(), Some("0123"));
        assert_eq!(
            spy.calls()[0].path_and_query(),
            "/drive/v2/permissionIds/someone%2Bdrive%40example.com"
        );
    }

    #[tokio::test]
    async fn test_empty_trash_has_no_parameters() {
        let spy = SpyTransport::new(204, "");
        let drive = DriveService::new(&spy);
        drive.files().empty_trash(opt_params!()).await.unwrap();
        let call = &spy.calls()[0];
        assert_eq!(call.method, HttpMethod::Delete);
        assert_eq!(call.path_and_query(), "/drive/v2/files/trash");
    }

    #[tokio::test]
    async fn test_not_found_surfaces_status() {
        let spy = SpyTransport::new(404, r#"{"error": {"code": 404, "message": "File not found: x"}}"#);
        let drive = DriveService::new(&spy);
        let err = drive.files().get("x", opt_params!()).await.unwrap_err();
        assert!(matches!(err, InvokeError::Transport { status: Some(404), .. }));
    }
}
