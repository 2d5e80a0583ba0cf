//! Adapter service: the typed facade and the dispatcher pipelines.

use std::time::Duration;

use infragate_core::error::{InfraError, InfraResult};
use infragate_core::field_mask::FieldMask;
use infragate_core::id::{ResourceId, ResourceKind};
use infragate_core::inventory::{InheritedProfilesQuery, InventoryClient, ResourceFilter};
use infragate_core::models::enums::HostState;
use infragate_core::models::{HostResource, Resource};
use tracing::{debug, info};

use crate::config::AdapterConfig;
use crate::context::RequestContext;
use crate::convert::{self, host};
use crate::dispatch::{
    self, ApiKind, ApiResource, KindHandler, Request, Response, WireResource, WriteOp,
};
use crate::error::ConvertError;
use crate::fields::{self, INVALIDATE_MASK, ONBOARD_MASK, REGISTER_UPDATE_MASK};
use crate::filter;
use crate::hierarchy;
use crate::page::{self, ListEnvelope, PageRequest, narrow};
use crate::relation::{self, Requirement};
use crate::wire::{Host, HostRegister, ListParams, LocationsQuery, LocationsResponse};

/// Translation adapter over an inventory backend.
///
/// Generic over the backend so the adapter has no dependency on any
/// particular store. Holds no per-request state.
pub struct InventoryAdapter<I: InventoryClient> {
    client: I,
    config: AdapterConfig,
}

fn typed<T: ApiResource>(wire: WireResource) -> InfraResult<T> {
    let kind = wire.kind();
    T::from_wire(wire).ok_or_else(|| {
        InfraError::Backend(format!("expected a {} result, got {kind}", T::KIND))
    })
}

impl<I: InventoryClient> InventoryAdapter<I> {
    pub fn new(client: I, config: AdapterConfig) -> Self {
        Self { client, config }
    }

    pub fn client(&self) -> &I {
        &self.client
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    fn fallback(&self) -> Duration {
        Duration::from_secs(self.config.backend_timeout_secs)
    }

    /// Route one request to its kind's pipeline.
    pub async fn dispatch(&self, ctx: &RequestContext, request: Request) -> InfraResult<Response> {
        match request {
            Request::Create(resource) => self
                .create_wire(ctx, resource)
                .await
                .map(Response::Resource),
            Request::Get { kind, id } => self
                .get_wire(ctx, kind, &id)
                .await
                .map(Response::Resource),
            Request::List { kind, params } => self
                .list_wire(ctx, kind, &params)
                .await
                .map(Response::List),
            Request::Update { id, resource } => self
                .update_wire(ctx, &id, resource, "update")
                .await
                .map(Response::Resource),
            Request::Patch { id, resource } => self
                .update_wire(ctx, &id, resource, "patch")
                .await
                .map(Response::Resource),
            Request::Delete { kind, id } => self
                .delete_wire(ctx, kind, &id)
                .await
                .map(|()| Response::Deleted),
        }
    }

    // -----------------------------------------------------------------
    // Typed operations
    // -----------------------------------------------------------------

    pub async fn create<T: ApiResource>(
        &self,
        ctx: &RequestContext,
        resource: T,
    ) -> InfraResult<T> {
        typed(self.create_wire(ctx, resource.into_wire()).await?)
    }

    pub async fn get<T: ApiResource>(&self, ctx: &RequestContext, id: &str) -> InfraResult<T> {
        typed(self.get_wire(ctx, T::KIND, id).await?)
    }

    pub async fn list<T: ApiResource>(
        &self,
        ctx: &RequestContext,
        params: &ListParams,
    ) -> InfraResult<ListEnvelope<T>> {
        let envelope = self.list_wire(ctx, T::KIND, params).await?;
        let items = envelope
            .items
            .into_iter()
            .map(typed)
            .collect::<InfraResult<Vec<T>>>()?;
        Ok(ListEnvelope {
            items,
            total_elements: envelope.total_elements,
            has_next: envelope.has_next,
        })
    }

    /// Replace every maskable field of `T` with the values in `resource`.
    pub async fn update<T: ApiResource>(
        &self,
        ctx: &RequestContext,
        id: &str,
        resource: T,
    ) -> InfraResult<T> {
        typed(self.update_wire(ctx, id, resource.into_wire(), "update").await?)
    }

    /// Same constant mask as [`Self::update`].
    pub async fn patch<T: ApiResource>(
        &self,
        ctx: &RequestContext,
        id: &str,
        resource: T,
    ) -> InfraResult<T> {
        typed(self.update_wire(ctx, id, resource.into_wire(), "patch").await?)
    }

    pub async fn delete<T: ApiResource>(&self, ctx: &RequestContext, id: &str) -> InfraResult<()> {
        self.delete_wire(ctx, T::KIND, id).await
    }

    // -----------------------------------------------------------------
    // Host lifecycle
    // -----------------------------------------------------------------

    /// Announce a host by uuid and/or serial number.
    pub async fn register_host(
        &self,
        ctx: &RequestContext,
        input: &HostRegister,
    ) -> InfraResult<Host> {
        let resource = host::register_to_internal(input)?;
        let created = ctx
            .call(
                "create",
                self.fallback(),
                self.client.create(ctx.tenant_id, Resource::from(resource)),
            )
            .await?;
        info!(
            tenant_id = %ctx.tenant_id,
            host_id = created.resource_id(),
            auto_onboard = input.auto_onboard.unwrap_or(false),
            "host registered"
        );
        self.host_out(&created)
    }

    pub async fn update_host_registration(
        &self,
        ctx: &RequestContext,
        id: &str,
        input: &HostRegister,
    ) -> InfraResult<Host> {
        let resource = host::registration_update_to_internal(input);
        self.update_host(ctx, id, &REGISTER_UPDATE_MASK, resource, "update_host_registration")
            .await
    }

    pub async fn onboard_host(&self, ctx: &RequestContext, id: &str) -> InfraResult<Host> {
        let resource = HostResource {
            desired_state: HostState::Onboarded,
            ..Default::default()
        };
        self.update_host(ctx, id, &ONBOARD_MASK, resource, "onboard_host")
            .await
    }

    /// Mark a host untrusted, recording why in its note.
    pub async fn invalidate_host(
        &self,
        ctx: &RequestContext,
        id: &str,
        note: Option<&str>,
    ) -> InfraResult<Host> {
        let resource = HostResource {
            desired_state: HostState::Untrusted,
            note: note.unwrap_or_default().to_owned(),
            ..Default::default()
        };
        self.update_host(ctx, id, &INVALIDATE_MASK, resource, "invalidate_host")
            .await
    }

    async fn update_host(
        &self,
        ctx: &RequestContext,
        id: &str,
        mask: &FieldMask,
        resource: HostResource,
        operation: &'static str,
    ) -> InfraResult<Host> {
        let id = ApiKind::Host.parse_id(id)?;
        let updated = ctx
            .call(
                operation,
                self.fallback(),
                self.client.update(ctx.tenant_id, &id, mask, Resource::from(resource)),
            )
            .await?;
        info!(tenant_id = %ctx.tenant_id, host_id = %id, operation, "host updated");
        self.host_out(&updated)
    }

    fn host_out(&self, resource: &Resource) -> InfraResult<Host> {
        Ok(Host::from_internal(resource, None, self.config.nesting_depth)?)
    }

    // -----------------------------------------------------------------
    // Locations
    // -----------------------------------------------------------------

    pub async fn list_locations(
        &self,
        ctx: &RequestContext,
        query: &LocationsQuery,
    ) -> InfraResult<LocationsResponse> {
        hierarchy::list_locations(&self.client, ctx, &self.config, query).await
    }

    // -----------------------------------------------------------------
    // Pipelines
    // -----------------------------------------------------------------

    async fn create_wire(
        &self,
        ctx: &RequestContext,
        resource: WireResource,
    ) -> InfraResult<WireResource> {
        let kind = resource.kind();
        let handler = dispatch::handler(kind)?;

        // 1. Relation rules, then conversion.
        (handler.validate_relations)(&resource, WriteOp::Create)?;
        let internal = (handler.to_internal)(&resource)?;

        // 2. Backend create.
        debug!(%kind, "creating resource");
        let created = ctx
            .call("create", self.fallback(), self.client.create(ctx.tenant_id, internal))
            .await?;
        info!(tenant_id = %ctx.tenant_id, %kind, id = created.resource_id(), "resource created");

        // 3. Convert back.
        Ok((handler.from_internal)(&created, None, self.config.nesting_depth)?)
    }

    async fn get_wire(
        &self,
        ctx: &RequestContext,
        kind: ApiKind,
        id: &str,
    ) -> InfraResult<WireResource> {
        let handler = dispatch::handler(kind)?;
        let id = kind.parse_id(id)?;
        debug!(%kind, %id, "getting resource");
        let found = ctx
            .call("get", self.fallback(), self.client.get(ctx.tenant_id, &id))
            .await?;
        Ok((handler.from_internal)(
            &found.resource,
            found.rendered_metadata.as_deref(),
            self.config.nesting_depth,
        )?)
    }

    async fn list_wire(
        &self,
        ctx: &RequestContext,
        kind: ApiKind,
        params: &ListParams,
    ) -> InfraResult<ListEnvelope<WireResource>> {
        let handler = dispatch::handler(kind)?;

        // 1. Page, caller expressions, kind constraints.
        let page = PageRequest::from_wire(params.offset, params.page_size, &self.config)?;
        let caller = fields::translate_filter(kind, params.filter.as_deref().unwrap_or_default())?;
        let order_by =
            fields::translate_order_by(kind, params.order_by.as_deref().unwrap_or_default())?;
        let mut clauses = vec![caller];
        clauses.extend((handler.list_filter)(params)?);
        let filter = filter::conjoin(clauses);

        let inherited = params.show_inherited == Some(true)
            && matches!(
                kind,
                ApiKind::TelemetryLogsProfile | ApiKind::TelemetryMetricsProfile
            );
        if inherited {
            return self
                .list_inherited_profiles(ctx, handler, params, filter, order_by, page)
                .await;
        }

        // 2. Backend list.
        let request = ResourceFilter::new(kind.resource_kind())
            .with_filter(filter)
            .with_order_by(order_by)
            .with_page(page.offset, page.limit);
        debug!(
            %kind,
            filter = %request.filter,
            offset = page.offset,
            limit = page.limit,
            "listing resources"
        );
        let result = ctx
            .call("list", self.fallback(), self.client.list(ctx.tenant_id, request))
            .await?;

        // 3. Convert, decorate, assemble.
        let mut items = result
            .resources
            .iter()
            .map(|r| (handler.from_internal)(r, None, self.config.nesting_depth))
            .collect::<Result<Vec<_>, ConvertError>>()?;
        if kind == ApiKind::Region && params.show_total_sites == Some(true) {
            self.fill_total_sites(ctx, &mut items).await?;
        }
        Ok(page::assemble(items, result.total_elements, result.has_next)?)
    }

    /// Profiles attached to the single target given or to any of its
    /// ancestors.
    async fn list_inherited_profiles(
        &self,
        ctx: &RequestContext,
        handler: &KindHandler,
        params: &ListParams,
        filter: String,
        order_by: String,
        page: PageRequest,
    ) -> InfraResult<ListEnvelope<WireResource>> {
        let targets = [
            ("instanceId", params.instance_id.as_deref()),
            ("siteId", params.site_id.as_deref()),
            ("regionId", params.region_id.as_deref()),
        ];
        let kinds = [ResourceKind::Instance, ResourceKind::Site, ResourceKind::Region];
        let Some((index, raw)) = relation::validate_exclusive(&targets, Requirement::Required)?
        else {
            return Err(ConvertError::MissingRelation {
                fields: targets.iter().map(|(name, _)| *name).collect(),
            }
            .into());
        };
        let anchor = convert::parse_id(targets[index].0, kinds[index], raw)?;

        debug!(kind = %handler.kind, %anchor, "listing inherited telemetry profiles");
        let query = InheritedProfilesQuery {
            anchor,
            filter,
            order_by,
            limit: page.limit,
            offset: page.offset,
        };
        let result = ctx
            .call(
                "list_inherited_telemetry_profiles",
                self.fallback(),
                self.client.list_inherited_telemetry_profiles(ctx.tenant_id, query),
            )
            .await?;

        let items = result
            .resources
            .into_iter()
            .map(|p| (handler.from_internal)(&Resource::from(p), None, self.config.nesting_depth))
            .collect::<Result<Vec<_>, ConvertError>>()?;
        Ok(page::assemble(items, result.total_elements, result.has_next)?)
    }

    /// One extra backend call for the whole page.
    async fn fill_total_sites(
        &self,
        ctx: &RequestContext,
        items: &mut [WireResource],
    ) -> InfraResult<()> {
        let ids = items
            .iter()
            .filter_map(|item| match item {
                WireResource::Region(r) => r.resource_id.as_deref(),
                _ => None,
            })
            .map(|raw| ApiKind::Region.parse_id(raw))
            .collect::<Result<Vec<ResourceId>, ConvertError>>()?;
        if ids.is_empty() {
            return Ok(());
        }
        let counts = ctx
            .call(
                "get_sites_per_region",
                self.fallback(),
                self.client.get_sites_per_region(ctx.tenant_id, &ids),
            )
            .await?;
        for item in items.iter_mut() {
            let WireResource::Region(region) = item else {
                continue;
            };
            let Some(raw) = region.resource_id.as_deref() else {
                continue;
            };
            let count = ApiKind::Region
                .parse_id(raw)
                .ok()
                .and_then(|id| counts.get(&id).copied())
                .unwrap_or(0);
            region.total_sites = Some(narrow("totalSites", count)?);
        }
        Ok(())
    }

    async fn update_wire(
        &self,
        ctx: &RequestContext,
        id: &str,
        resource: WireResource,
        verb: &'static str,
    ) -> InfraResult<WireResource> {
        let kind = resource.kind();
        let handler = dispatch::handler(kind)?;
        let Some(mask) = handler.mask else {
            return Err(InfraError::Unimplemented(format!("{verb} is not supported for {kind}")));
        };

        // 1. Relation rules, id, conversion.
        (handler.validate_relations)(&resource, WriteOp::Update)?;
        let id = kind.parse_id(id)?;
        let internal = (handler.to_internal)(&resource)?;

        // 2. Backend update with the kind's full mask.
        debug!(%kind, %id, fields = mask.len(), verb, "updating resource");
        let updated = ctx
            .call(verb, self.fallback(), self.client.update(ctx.tenant_id, &id, mask, internal))
            .await?;
        info!(tenant_id = %ctx.tenant_id, %kind, %id, verb, "resource updated");

        // 3. Convert back.
        Ok((handler.from_internal)(&updated, None, self.config.nesting_depth)?)
    }

    async fn delete_wire(&self, ctx: &RequestContext, kind: ApiKind, id: &str) -> InfraResult<()> {
        dispatch::handler(kind)?;
        let id = kind.parse_id(id)?;
        ctx.call("delete", self.fallback(), self.client.delete(ctx.tenant_id, &id))
            .await?;
        info!(tenant_id = %ctx.tenant_id, %kind, %id, "resource deleted");
        Ok(())
    }
}
