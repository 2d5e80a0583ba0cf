//! The inventory backend contract.
//!
//! All persistence, indexing and consistency belong to the backend. Every
//! call is tenant-scoped and async; implementations must be shareable
//! across concurrent requests.

use std::collections::HashMap;

use uuid::Uuid;

use crate::error::InfraResult;
use crate::field_mask::FieldMask;
use crate::id::{ResourceId, ResourceKind};
use crate::models::{Resource, TelemetryProfileResource};

/// A filtered, ordered, paginated query over one resource kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFilter {
    pub kind: ResourceKind,
    /// Filter expression (see [`crate::query`]); empty matches everything.
    pub filter: String,
    /// `field [asc|desc]` terms separated by commas; empty keeps creation order.
    pub order_by: String,
    pub offset: u32,
    pub limit: u32,
}

impl ResourceFilter {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            filter: String::new(),
            order_by: String::new(),
            offset: 0,
            limit: 0,
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = order_by.into();
        self
    }

    pub fn with_page(mut self, offset: u32, limit: u32) -> Self {
        self.offset = offset;
        self.limit = limit;
        self
    }
}

/// A resource together with its server-rendered inherited metadata.
#[derive(Debug, Clone)]
pub struct GetResult {
    pub resource: Resource,
    /// JSON-encoded metadata inherited from ancestors, when the kind has any.
    pub rendered_metadata: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ListResult<T = Resource> {
    pub resources: Vec<T>,
    pub total_elements: u64,
    pub has_next: bool,
}

/// Lightweight result of a find: ids only.
#[derive(Debug, Clone)]
pub struct FindResult {
    pub resource_ids: Vec<ResourceId>,
    pub total_elements: u64,
    pub has_next: bool,
}

/// One node of an ancestor tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub current: ResourceId,
    /// Direct parents of the node. May contain kinds the caller does not
    /// care about.
    pub parents: Vec<ResourceId>,
    pub name: String,
}

/// Query for telemetry profiles attached to an anchor or any of its
/// ancestors.
#[derive(Debug, Clone)]
pub struct InheritedProfilesQuery {
    /// Instance, site or region id.
    pub anchor: ResourceId,
    pub filter: String,
    pub order_by: String,
    pub limit: u32,
    pub offset: u32,
}

pub trait InventoryClient: Send + Sync {
    /// Create a resource; the backend assigns its id.
    fn create(
        &self,
        tenant_id: Uuid,
        resource: Resource,
    ) -> impl Future<Output = InfraResult<Resource>> + Send;

    fn get(
        &self,
        tenant_id: Uuid,
        id: &ResourceId,
    ) -> impl Future<Output = InfraResult<GetResult>> + Send;

    fn list(
        &self,
        tenant_id: Uuid,
        filter: ResourceFilter,
    ) -> impl Future<Output = InfraResult<ListResult>> + Send;

    fn find(
        &self,
        tenant_id: Uuid,
        filter: ResourceFilter,
    ) -> impl Future<Output = InfraResult<FindResult>> + Send;

    /// Overwrite the fields named by `mask` with the values in `resource`.
    fn update(
        &self,
        tenant_id: Uuid,
        id: &ResourceId,
        mask: &FieldMask,
        resource: Resource,
    ) -> impl Future<Output = InfraResult<Resource>> + Send;

    fn delete(
        &self,
        tenant_id: Uuid,
        id: &ResourceId,
    ) -> impl Future<Output = InfraResult<()>> + Send;

    /// Nodes for `ids` and all their ancestors. `descending` orders roots
    /// before their descendants.
    fn get_tree_hierarchy(
        &self,
        tenant_id: Uuid,
        ids: &[ResourceId],
        descending: bool,
    ) -> impl Future<Output = InfraResult<Vec<TreeNode>>> + Send;

    /// Number of sites directly inside each requested region.
    fn get_sites_per_region(
        &self,
        tenant_id: Uuid,
        region_ids: &[ResourceId],
    ) -> impl Future<Output = InfraResult<HashMap<ResourceId, u32>>> + Send;

    fn list_inherited_telemetry_profiles(
        &self,
        tenant_id: Uuid,
        query: InheritedProfilesQuery,
    ) -> impl Future<Output = InfraResult<ListResult<TelemetryProfileResource>>> + Send;
}
