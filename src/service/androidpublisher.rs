//! Google Play Developer API v2
//!
//! App edits (listings, tracks, testers, APKs), in-app products and
//! purchase verification. Image and APK uploads are not covered.

use crate::error::Result;
use crate::gcp::transport::Transport;
use crate::model::androidpublisher::{
    ApkListing, ApkListingsListResponse, ApksAddExternallyHostedRequest,
    ApksAddExternallyHostedResponse, ApksListResponse, AppDetails, AppEdit,
    EntitlementsListResponse, ExpansionFile, ImagesDeleteAllResponse, ImagesListResponse,
    InAppProduct, InappproductsBatchRequest, InappproductsBatchResponse,
    InappproductsListResponse, Listing, ListingsListResponse, ProductPurchase,
    SubscriptionPurchase, SubscriptionPurchasesDeferRequest,
    SubscriptionPurchasesDeferResponse, Testers, Track, TracksListResponse,
};
use crate::resource::registry::{builtin_service, ServiceDef};
use crate::resource::{InvocationArgs, OptParams, Resource, ResourceInvoker};

/// Typed client for the Google Play Developer API v2
pub struct AndroidPublisherService<T> {
    invoker: ResourceInvoker<T>,
    service: &'static ServiceDef,
}

impl<T: Transport> AndroidPublisherService<T> {
    pub fn new(transport: T) -> Self {
        Self::with_invoker(ResourceInvoker::new(transport))
    }

    pub fn with_invoker(invoker: ResourceInvoker<T>) -> Self {
        Self {
            invoker,
            service: builtin_service("androidpublisher"),
        }
    }

    pub fn invoker(&self) -> &ResourceInvoker<T> {
        &self.invoker
    }

    pub fn service(&self) -> &'static ServiceDef {
        self.service
    }

    pub fn edits(&self) -> EditsResource<'_, T> {
        EditsResource(self.invoker.resource(self.service, "edits"))
    }

    pub fn edits_apk_listings(&self) -> EditsApkListingsResource<'_, T> {
        EditsApkListingsResource(self.invoker.resource(self.service, "edits.apklistings"))
    }

    pub fn edits_apks(&self) -> EditsApksResource<'_, T> {
        EditsApksResource(self.invoker.resource(self.service, "edits.apks"))
    }

    pub fn edits_details(&self) -> EditsDetailsResource<'_, T> {
        EditsDetailsResource(self.invoker.resource(self.service, "edits.details"))
    }

    pub fn edits_expansion_files(&self) -> EditsExpansionFilesResource<'_, T> {
        EditsExpansionFilesResource(self.invoker.resource(self.service, "edits.expansionfiles"))
    }

    pub fn edits_images(&self) -> EditsImagesResource<'_, T> {
        EditsImagesResource(self.invoker.resource(self.service, "edits.images"))
    }

    pub fn edits_listings(&self) -> EditsListingsResource<'_, T> {
        EditsListingsResource(self.invoker.resource(self.service, "edits.listings"))
    }

    pub fn edits_testers(&self) -> EditsTestersResource<'_, T> {
        EditsTestersResource(self.invoker.resource(self.service, "edits.testers"))
    }

    pub fn edits_tracks(&self) -> EditsTracksResource<'_, T> {
        EditsTracksResource(self.invoker.resource(self.service, "edits.tracks"))
    }

    pub fn entitlements(&self) -> EntitlementsResource<'_, T> {
        EntitlementsResource(self.invoker.resource(self.service, "entitlements"))
    }

    pub fn inappproducts(&self) -> InappproductsResource<'_, T> {
        InappproductsResource(self.invoker.resource(self.service, "inappproducts"))
    }

    pub fn purchases_products(&self) -> PurchasesProductsResource<'_, T> {
        PurchasesProductsResource(self.invoker.resource(self.service, "purchases.products"))
    }

    pub fn purchases_subscriptions(&self) -> PurchasesSubscriptionsResource<'_, T> {
        PurchasesSubscriptionsResource(self.invoker.resource(self.service, "purchases.subscriptions"))
    }
}

pub struct EditsResource<'a, T>(Resource<'a, T>);

impl<T: Transport> EditsResource<'_, T> {
    /// Commit the changes made in an edit
    pub async fn commit(
        &self,
        package_name: &str,
        edit_id: &str,
        opt_params: OptParams,
    ) -> Result<AppEdit> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id);
        self.0.call("commit", args.merge(opt_params)).await
    }

    pub async fn delete(
        &self,
        package_name: &str,
        edit_id: &str,
        opt_params: OptParams,
    ) -> Result<()> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id);
        self.0.call_void("delete", args.merge(opt_params)).await
    }

    pub async fn get(
        &self,
        package_name: &str,
        edit_id: &str,
        opt_params: OptParams,
    ) -> Result<AppEdit> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id);
        self.0.call("get", args.merge(opt_params)).await
    }

    /// Open a new edit for an app
    pub async fn insert(
        &self,
        package_name: &str,
        body: &AppEdit,
        opt_params: OptParams,
    ) -> Result<AppEdit> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with_body(body)?;
        self.0.call("insert", args.merge(opt_params)).await
    }

    /// Check an edit for errors without committing it
    pub async fn validate(
        &self,
        package_name: &str,
        edit_id: &str,
        opt_params: OptParams,
    ) -> Result<AppEdit> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id);
        self.0.call("validate", args.merge(opt_params)).await
    }
}

pub struct EditsApkListingsResource<'a, T>(Resource<'a, T>);

impl<T: Transport> EditsApkListingsResource<'_, T> {
    pub async fn delete(
        &self,
        package_name: &str,
        edit_id: &str,
        apk_version_code: i32,
        language: &str,
        opt_params: OptParams,
    ) -> Result<()> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id)
            .with("apkVersionCode", apk_version_code)
            .with("language", language);
        self.0.call_void("delete", args.merge(opt_params)).await
    }

    pub async fn delete_all(
        &self,
        package_name: &str,
        edit_id: &str,
        apk_version_code: i32,
        opt_params: OptParams,
    ) -> Result<()> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id)
            .with("apkVersionCode", apk_version_code);
        self.0.call_void("deleteall", args.merge(opt_params)).await
    }

    pub async fn get(
        &self,
        package_name: &str,
        edit_id: &str,
        apk_version_code: i32,
        language: &str,
        opt_params: OptParams,
    ) -> Result<ApkListing> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id)
            .with("apkVersionCode", apk_version_code)
            .with("language", language);
        self.0.call("get", args.merge(opt_params)).await
    }

    pub async fn list(
        &self,
        package_name: &str,
        edit_id: &str,
        apk_version_code: i32,
        opt_params: OptParams,
    ) -> Result<ApkListingsListResponse> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id)
            .with("apkVersionCode", apk_version_code);
        self.0.call("list", args.merge(opt_params)).await
    }

    pub async fn patch(
        &self,
        package_name: &str,
        edit_id: &str,
        apk_version_code: i32,
        language: &str,
        body: &ApkListing,
        opt_params: OptParams,
    ) -> Result<ApkListing> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id)
            .with("apkVersionCode", apk_version_code)
            .with("language", language)
            .with_body(body)?;
        self.0.call("patch", args.merge(opt_params)).await
    }

    pub async fn update(
        &self,
        package_name: &str,
        edit_id: &str,
        apk_version_code: i32,
        language: &str,
        body: &ApkListing,
        opt_params: OptParams,
    ) -> Result<ApkListing> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id)
            .with("apkVersionCode", apk_version_code)
            .with("language", language)
            .with_body(body)?;
        self.0.call("update", args.merge(opt_params)).await
    }
}

pub struct EditsApksResource<'a, T>(Resource<'a, T>);

impl<T: Transport> EditsApksResource<'_, T> {
    /// Register an APK hosted outside Google Play
    pub async fn add_externally_hosted(
        &self,
        package_name: &str,
        edit_id: &str,
        body: &ApksAddExternallyHostedRequest,
        opt_params: OptParams,
    ) -> Result<ApksAddExternallyHostedResponse> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id)
            .with_body(body)?;
        self.0.call("addexternallyhosted", args.merge(opt_params)).await
    }

    pub async fn list(
        &self,
        package_name: &str,
        edit_id: &str,
        opt_params: OptParams,
    ) -> Result<ApksListResponse> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id);
        self.0.call("list", args.merge(opt_params)).await
    }
}

pub struct EditsDetailsResource<'a, T>(Resource<'a, T>);

impl<T: Transport> EditsDetailsResource<'_, T> {
    pub async fn get(
        &self,
        package_name: &str,
        edit_id: &str,
        opt_params: OptParams,
    ) -> Result<AppDetails> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id);
        self.0.call("get", args.merge(opt_params)).await
    }

    pub async fn patch(
        &self,
        package_name: &str,
        edit_id: &str,
        body: &AppDetails,
        opt_params: OptParams,
    ) -> Result<AppDetails> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id)
            .with_body(body)?;
        self.0.call("patch", args.merge(opt_params)).await
    }

    pub async fn update(
        &self,
        package_name: &str,
        edit_id: &str,
        body: &AppDetails,
        opt_params: OptParams,
    ) -> Result<AppDetails> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id)
            .with_body(body)?;
        self.0.call("update", args.merge(opt_params)).await
    }
}

pub struct EditsExpansionFilesResource<'a, T>(Resource<'a, T>);

impl<T: Transport> EditsExpansionFilesResource<'_, T> {
    pub async fn get(
        &self,
        package_name: &str,
        edit_id: &str,
        apk_version_code: i32,
        expansion_file_type: &str,
        opt_params: OptParams,
    ) -> Result<ExpansionFile> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id)
            .with("apkVersionCode", apk_version_code)
            .with("expansionFileType", expansion_file_type);
        self.0.call("get", args.merge(opt_params)).await
    }

    pub async fn patch(
        &self,
        package_name: &str,
        edit_id: &str,
        apk_version_code: i32,
        expansion_file_type: &str,
        body: &ExpansionFile,
        opt_params: OptParams,
    ) -> Result<ExpansionFile> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id)
            .with("apkVersionCode", apk_version_code)
            .with("expansionFileType", expansion_file_type)
            .with_body(body)?;
        self.0.call("patch", args.merge(opt_params)).await
    }

    pub async fn update(
        &self,
        package_name: &str,
        edit_id: &str,
        apk_version_code: i32,
        expansion_file_type: &str,
        body: &ExpansionFile,
        opt_params: OptParams,
    ) -> Result<ExpansionFile> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id)
            .with("apkVersionCode", apk_version_code)
            .with("expansionFileType", expansion_file_type)
            .with_body(body)?;
        self.0.call("update", args.merge(opt_params)).await
    }
}

pub struct EditsImagesResource<'a, T>(Resource<'a, T>);

impl<T: Transport> EditsImagesResource<'_, T> {
    pub async fn delete(
        &self,
        package_name: &str,
        edit_id: &str,
        language: &str,
        image_type: &str,
        image_id: &str,
        opt_params: OptParams,
    ) -> Result<()> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id)
            .with("language", language)
            .with("imageType", image_type)
            .with("imageId", image_id);
        self.0.call_void("delete", args.merge(opt_params)).await
    }

    pub async fn delete_all(
        &self,
        package_name: &str,
        edit_id: &str,
        language: &str,
        image_type: &str,
        opt_params: OptParams,
    ) -> Result<ImagesDeleteAllResponse> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id)
            .with("language", language)
            .with("imageType", image_type);
        self.0.call("deleteall", args.merge(opt_params)).await
    }

    pub async fn list(
        &self,
        package_name: &str,
        edit_id: &str,
        language: &str,
        image_type: &str,
        opt_params: OptParams,
    ) -> Result<ImagesListResponse> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id)
            .with("language", language)
            .with("imageType", image_type);
        self.0.call("list", args.merge(opt_params)).await
    }
}

pub struct EditsListingsResource<'a, T>(Resource<'a, T>);

impl<T: Transport> EditsListingsResource<'_, T> {
    pub async fn delete(
        &self,
        package_name: &str,
        edit_id: &str,
        language: &str,
        opt_params: OptParams,
    ) -> Result<()> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id)
            .with("language", language);
        self.0.call_void("delete", args.merge(opt_params)).await
    }

    pub async fn delete_all(
        &self,
        package_name: &str,
        edit_id: &str,
        opt_params: OptParams,
    ) -> Result<()> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id);
        self.0.call_void("deleteall", args.merge(opt_params)).await
    }

    pub async fn get(
        &self,
        package_name: &str,
        edit_id: &str,
        language: &str,
        opt_params: OptParams,
    ) -> Result<Listing> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id)
            .with("language", language);
        self.0.call("get", args.merge(opt_params)).await
    }

    pub async fn list(
        &self,
        package_name: &str,
        edit_id: &str,
        opt_params: OptParams,
    ) -> Result<ListingsListResponse> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id);
        self.0.call("list", args.merge(opt_params)).await
    }

    pub async fn patch(
        &self,
        package_name: &str,
        edit_id: &str,
        language: &str,
        body: &Listing,
        opt_params: OptParams,
    ) -> Result<Listing> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id)
            .with("language", language)
            .with_body(body)?;
        self.0.call("patch", args.merge(opt_params)).await
    }

    pub async fn update(
        &self,
        package_name: &str,
        edit_id: &str,
        language: &str,
        body: &Listing,
        opt_params: OptParams,
    ) -> Result<Listing> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id)
            .with("language", language)
            .with_body(body)?;
        self.0.call("update", args.merge(opt_params)).await
    }
}

pub struct EditsTestersResource<'a, T>(Resource<'a, T>);

impl<T: Transport> EditsTestersResource<'_, T> {
    pub async fn get(
        &self,
        package_name: &str,
        edit_id: &str,
        track: &str,
        opt_params: OptParams,
    ) -> Result<Testers> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id)
            .with("track", track);
        self.0.call("get", args.merge(opt_params)).await
    }

    pub async fn patch(
        &self,
        package_name: &str,
        edit_id: &str,
        track: &str,
        body: &Testers,
        opt_params: OptParams,
    ) -> Result<Testers> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id)
            .with("track", track)
            .with_body(body)?;
        self.0.call("patch", args.merge(opt_params)).await
    }

    pub async fn update(
        &self,
        package_name: &str,
        edit_id: &str,
        track: &str,
        body: &Testers,
        opt_params: OptParams,
    ) -> Result<Testers> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id)
            .with("track", track)
            .with_body(body)?;
        self.0.call("update", args.merge(opt_params)).await
    }
}

pub struct EditsTracksResource<'a, T>(Resource<'a, T>);

impl<T: Transport> EditsTracksResource<'_, T> {
    pub async fn get(
        &self,
        package_name: &str,
        edit_id: &str,
        track: &str,
        opt_params: OptParams,
    ) -> Result<Track> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id)
            .with("track", track);
        self.0.call("get", args.merge(opt_params)).await
    }

    pub async fn list(
        &self,
        package_name: &str,
        edit_id: &str,
        opt_params: OptParams,
    ) -> Result<TracksListResponse> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id);
        self.0.call("list", args.merge(opt_params)).await
    }

    pub async fn patch(
        &self,
        package_name: &str,
        edit_id: &str,
        track: &str,
        body: &Track,
        opt_params: OptParams,
    ) -> Result<Track> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id)
            .with("track", track)
            .with_body(body)?;
        self.0.call("patch", args.merge(opt_params)).await
    }

    pub async fn update(
        &self,
        package_name: &str,
        edit_id: &str,
        track: &str,
        body: &Track,
        opt_params: OptParams,
    ) -> Result<Track> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("editId", edit_id)
            .with("track", track)
            .with_body(body)?;
        self.0.call("update", args.merge(opt_params)).await
    }
}

pub struct EntitlementsResource<'a, T>(Resource<'a, T>);

impl<T: Transport> EntitlementsResource<'_, T> {
    pub async fn list(
        &self,
        package_name: &str,
        opt_params: OptParams,
    ) -> Result<EntitlementsListResponse> {
        let args = InvocationArgs::new().with("packageName", package_name);
        self.0.call("list", args.merge(opt_params)).await
    }
}

pub struct InappproductsResource<'a, T>(Resource<'a, T>);

impl<T: Transport> InappproductsResource<'_, T> {
    /// Insert or update several in-app products at once
    pub async fn batch(
        &self,
        body: &InappproductsBatchRequest,
        opt_params: OptParams,
    ) -> Result<InappproductsBatchResponse> {
        let args = InvocationArgs::new()
            .with_body(body)?;
        self.0.call("batch", args.merge(opt_params)).await
    }

    pub async fn delete(&self, package_name: &str, sku: &str, opt_params: OptParams) -> Result<()> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("sku", sku);
        self.0.call_void("delete", args.merge(opt_params)).await
    }

    pub async fn get(
        &self,
        package_name: &str,
        sku: &str,
        opt_params: OptParams,
    ) -> Result<InAppProduct> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("sku", sku);
        self.0.call("get", args.merge(opt_params)).await
    }

    pub async fn insert(
        &self,
        package_name: &str,
        body: &InAppProduct,
        opt_params: OptParams,
    ) -> Result<InAppProduct> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with_body(body)?;
        self.0.call("insert", args.merge(opt_params)).await
    }

    pub async fn list(
        &self,
        package_name: &str,
        opt_params: OptParams,
    ) -> Result<InappproductsListResponse> {
        let args = InvocationArgs::new().with("packageName", package_name);
        self.0.call("list", args.merge(opt_params)).await
    }

    pub async fn patch(
        &self,
        package_name: &str,
        sku: &str,
        body: &InAppProduct,
        opt_params: OptParams,
    ) -> Result<InAppProduct> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("sku", sku)
            .with_body(body)?;
        self.0.call("patch", args.merge(opt_params)).await
    }

    pub async fn update(
        &self,
        package_name: &str,
        sku: &str,
        body: &InAppProduct,
        opt_params: OptParams,
    ) -> Result<InAppProduct> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("sku", sku)
            .with_body(body)?;
        self.0.call("update", args.merge(opt_params)).await
    }
}

pub struct PurchasesProductsResource<'a, T>(Resource<'a, T>);

impl<T: Transport> PurchasesProductsResource<'_, T> {
    pub async fn get(
        &self,
        package_name: &str,
        product_id: &str,
        token: &str,
        opt_params: OptParams,
    ) -> Result<ProductPurchase> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("productId", product_id)
            .with("token", token);
        self.0.call("get", args.merge(opt_params)).await
    }
}

pub struct PurchasesSubscriptionsResource<'a, T>(Resource<'a, T>);

impl<T: Transport> PurchasesSubscriptionsResource<'_, T> {
    /// Cancel a subscription; it stays valid until it expires
    pub async fn cancel(
        &self,
        package_name: &str,
        subscription_id: &str,
        token: &str,
        opt_params: OptParams,
    ) -> Result<()> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("subscriptionId", subscription_id)
            .with("token", token);
        self.0.call_void("cancel", args.merge(opt_params)).await
    }

    /// Move the next billing date of a subscription
    pub async fn defer(
        &self,
        package_name: &str,
        subscription_id: &str,
        token: &str,
        body: &SubscriptionPurchasesDeferRequest,
        opt_params: OptParams,
    ) -> Result<SubscriptionPurchasesDeferResponse> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("subscriptionId", subscription_id)
            .with("token", token)
            .with_body(body)?;
        self.0.call("defer", args.merge(opt_params)).await
    }

    pub async fn get(
        &self,
        package_name: &str,
        subscription_id: &str,
        token: &str,
        opt_params: OptParams,
    ) -> Result<SubscriptionPurchase> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("subscriptionId", subscription_id)
            .with("token", token);
        self.0.call("get", args.merge(opt_params)).await
    }

    /// Refund a subscription without cancelling it
    pub async fn refund(
        &self,
        package_name: &str,
        subscription_id: &str,
        token: &str,
        opt_params: OptParams,
    ) -> Result<()> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("subscriptionId", subscription_id)
            .with("token", token);
        self.0.call_void("refund", args.merge(opt_params)).await
    }

    /// Refund and immediately end a subscription
    pub async fn revoke(
        &self,
        package_name: &str,
        subscription_id: &str,
        token: &str,
        opt_params: OptParams,
    ) -> Result<()> {
        let args = InvocationArgs::new()
            .with("packageName", package_name)
            .with("subscriptionId", subscription_id)
            .with("token", token);
        self.0.call_void("revoke", args.merge(opt_params)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gcp::transport::spy::SpyTransport;
    use crate::gcp::transport::HttpResponse;
    use crate::model::androidpublisher::SubscriptionDeferralInfo;
    use crate::opt_params;
    use crate::resource::HttpMethod;

    #[tokio::test]
    async fn test_edit_flow_paths() {
        let spy = SpyTransport::with_responses(vec![
            HttpResponse::new(200, r#"{"id": "edit-1", "expiryTimeSeconds": "1790000000"}"#),
            HttpResponse::new(200, r#"{"track": "beta", "versionCodes": [42]}"#),
            HttpResponse::new(200, r#"{"id": "edit-1"}"#),
        ]);
        let publisher = AndroidPublisherService::new(&spy);
        let package = "com.example.app";

        let edit = publisher
            .edits()
            .insert(package, &AppEdit::default(), opt_params!())
            .await
            .unwrap();
        let edit_id = edit.id.unwrap();
        publisher
            .edits_tracks()
            .update(package, &edit_id, "beta", &Track::new("beta", vec![42]), opt_params!())
            .await
            .unwrap();
        publisher.edits().commit(package, &edit_id, opt_params!()).await.unwrap();

        let paths: Vec<_> = spy
            .calls()
            .iter()
            .map(|c| format!("{} {}", c.method, c.path_and_query()))
            .collect();
        assert_eq!(
            paths,
            vec![
                "POST /androidpublisher/v2/applications/com.example.app/edits",
                "PUT /androidpublisher/v2/applications/com.example.app/edits/edit-1/tracks/beta",
                "POST /androidpublisher/v2/applications/com.example.app/edits/edit-1:commit",
            ]
        );
    }

    #[tokio::test]
    async fn test_defer_subscription() {
        let spy = SpyTransport::new(200, r#"{"newExpiryTimeMillis": "1800000000000"}"#);
        let publisher = AndroidPublisherService::new(&spy);
        let request = SubscriptionPurchasesDeferRequest {
            deferral_info: Some(SubscriptionDeferralInfo {
                expected_expiry_time_millis: Some("1790000000000".to_string()),
                desired_expiry_time_millis: Some("1800000000000".to_string()),
            }),
        };

        let response = publisher
            .purchases_subscriptions()
            .defer("com.example.app", "monthly", "tok/en", &request, opt_params!())
            .await
            .unwrap();

        assert_eq!(response.new_expiry_time_millis.as_deref(), Some("1800000000000"));
        let call = &spy.calls()[0];
        assert_eq!(call.method, HttpMethod::Post);
        assert!(call.url.ends_with("/subscriptions/monthly/tokens/tok%2Fen:defer"));
    }

    #[tokio::test]
    async fn test_integer_version_code_in_path() {
        let spy = SpyTransport::new(200, r#"{"language": "fr-FR", "recentChanges": "Corrections"}"#);
        let publisher = AndroidPublisherService::new(&spy);

        let listing = publisher
            .edits_apk_listings()
            .get("com.example.app", "e1", 42, "fr-FR", opt_params!())
            .await
            .unwrap();

        assert_eq!(listing.recent_changes.as_deref(), Some("Corrections"));
        assert!(spy.calls()[0].url.ends_with("/edits/e1/apks/42/listings/fr-FR"));
    }
}
