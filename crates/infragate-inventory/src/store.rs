//! SurrealDB implementation of [`InventoryClient`].

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use infragate_core::error::InfraResult;
use infragate_core::field_mask::FieldMask;
use infragate_core::id::{ResourceId, ResourceKind};
use infragate_core::inventory::{
    FindResult, GetResult, InheritedProfilesQuery, InventoryClient, ListResult, ResourceFilter,
    TreeNode,
};
use infragate_core::models::{Resource, TelemetryProfileResource, Timestamps};
use serde_json::Value;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::DbError;
use crate::filter::{OrderBy, Predicate};
use crate::graph;

/// Maximum depth for ancestor traversal to prevent infinite loops.
const MAX_ANCESTOR_DEPTH: usize = 50;

/// Fresh ids drawn before giving up on a create. Record ids are global, so a
/// suffix already used by any tenant must be redrawn.
const MAX_ID_ATTEMPTS: usize = 8;

#[derive(Debug, SurrealValue)]
struct RecordIdRow {
    record_id: String,
}

#[derive(Debug, SurrealValue)]
struct ResourceRowWithId {
    record_id: String,
    kind: String,
    body: Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// A decoded row: kind, stored body (edges as stubs) and timestamps.
#[derive(Debug, Clone)]
struct Stored {
    id: String,
    kind: ResourceKind,
    body: Value,
    timestamps: Timestamps,
}

impl ResourceRowWithId {
    fn try_into_stored(self) -> Result<Stored, DbError> {
        let kind = ResourceKind::parse(&self.kind)
            .ok_or_else(|| DbError::Decode(format!("unknown resource kind {:?}", self.kind)))?;
        Ok(Stored {
            id: self.record_id,
            kind,
            body: self.body,
            timestamps: Timestamps {
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        })
    }
}

const SELECT_COLUMNS: &str = "SELECT meta::id(id) AS record_id, *";

/// SurrealDB implementation of the inventory backend.
#[derive(Clone)]
pub struct SurrealInventory<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealInventory<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn fetch(&self, tenant_id: Uuid, id: &str) -> Result<Option<Stored>, DbError> {
        let mut result = self
            .db
            .query(format!(
                "{SELECT_COLUMNS} FROM type::record('resource', $id) \
                 WHERE tenant_id = $tenant_id"
            ))
            .bind(("id", id.to_owned()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ResourceRowWithId> = result.take(0).map_err(DbError::from)?;
        rows.into_iter()
            .next()
            .map(ResourceRowWithId::try_into_stored)
            .transpose()
    }

    /// Whether any tenant already owns the record `id`.
    async fn id_taken(&self, id: &str) -> Result<bool, DbError> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id FROM type::record('resource', $id)")
            .bind(("id", id.to_owned()))
            .await
            .map_err(DbError::from)?;
        let rows: Vec<RecordIdRow> = result.take(0).map_err(DbError::from)?;
        Ok(!rows.is_empty())
    }

    /// Draw ids from `next` until one is unused across all tenants.
    async fn allocate_id(
        &self,
        kind: ResourceKind,
        mut next: impl FnMut(ResourceKind) -> ResourceId,
    ) -> Result<ResourceId, DbError> {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let id = next(kind);
            if !self.id_taken(id.as_str()).await? {
                return Ok(id);
            }
            debug!(%kind, %id, attempt, "Generated id already in use, redrawing");
        }
        Err(DbError::Conflict(format!(
            "no free {kind} id after {MAX_ID_ATTEMPTS} attempts"
        )))
    }

    async fn fetch_required(&self, tenant_id: Uuid, id: &ResourceId) -> Result<Stored, DbError> {
        self.fetch(tenant_id, id.as_str())
            .await?
            .ok_or_else(|| DbError::NotFound {
                kind: id.kind().to_string(),
                id: id.to_string(),
            })
    }

    /// All resources of `kind` for a tenant, in creation order.
    async fn fetch_kind(
        &self,
        tenant_id: Uuid,
        kind: ResourceKind,
    ) -> Result<Vec<Stored>, DbError> {
        let mut result = self
            .db
            .query(format!(
                "{SELECT_COLUMNS} FROM resource \
                 WHERE tenant_id = $tenant_id AND kind = $kind \
                 ORDER BY created_at ASC, record_id ASC"
            ))
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("kind", kind.as_str()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ResourceRowWithId> = result.take(0).map_err(DbError::from)?;
        rows.into_iter()
            .map(ResourceRowWithId::try_into_stored)
            .collect()
    }

    async fn fetch_all(&self, tenant_id: Uuid) -> Result<Vec<Stored>, DbError> {
        let mut result = self
            .db
            .query(format!(
                "{SELECT_COLUMNS} FROM resource WHERE tenant_id = $tenant_id"
            ))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ResourceRowWithId> = result.take(0).map_err(DbError::from)?;
        rows.into_iter()
            .map(ResourceRowWithId::try_into_stored)
            .collect()
    }

    /// Every edge in `body` must name an existing resource of this tenant.
    /// A telemetry profile may only reference a group of its own sub-kind.
    async fn check_targets(
        &self,
        tenant_id: Uuid,
        kind: ResourceKind,
        body: &Value,
    ) -> Result<(), DbError> {
        let sub_kind = graph::telemetry_sub_kind(kind, body);
        for edge in graph::edges(kind, body) {
            let target = ResourceId::parse(&edge.target)?;
            let found = self.fetch_required(tenant_id, &target).await?;
            let target_sub_kind = graph::telemetry_sub_kind(found.kind, &found.body);
            match (sub_kind, target_sub_kind) {
                (Some(expected), Some(actual)) if expected != actual => {
                    return Err(DbError::InvalidArgument(format!(
                        "{target} is a {actual} group, expected {expected}"
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// The resource itself followed by its ancestors, nearest first.
    async fn chain(
        &self,
        tenant_id: Uuid,
        start: Stored,
        cache: &mut HashMap<String, Stored>,
    ) -> Result<Vec<Stored>, DbError> {
        let mut chain = vec![start];
        while chain.len() <= MAX_ANCESTOR_DEPTH {
            let Some(last) = chain.last() else { break };
            let Some(parent_id) = graph::parent_of(last.kind, &last.body) else {
                break;
            };
            if chain.iter().any(|s| s.id == parent_id) {
                break;
            }
            let parent = match cache.get(&parent_id) {
                Some(hit) => hit.clone(),
                None => match self.fetch(tenant_id, &parent_id).await? {
                    Some(found) => {
                        cache.insert(parent_id.clone(), found.clone());
                        found
                    }
                    None => break,
                },
            };
            chain.push(parent);
        }
        Ok(chain)
    }

    /// Populate edges one level deep and derive reverse edges.
    async fn hydrate(&self, tenant_id: Uuid, rows: Vec<Stored>) -> Result<Vec<Resource>, DbError> {
        let mut targets: HashMap<String, Option<Value>> = HashMap::new();
        let mut reverse: HashMap<ResourceKind, Vec<Stored>> = HashMap::new();
        let mut out = Vec::with_capacity(rows.len());

        for row in rows {
            let mut body = row.body;

            for edge in graph::edges(row.kind, &body) {
                if !targets.contains_key(&edge.target) {
                    let found = self.fetch(tenant_id, &edge.target).await?;
                    targets.insert(edge.target.clone(), found.map(|s| s.body));
                }
                if let (Some(Some(target)), Some(slot)) =
                    (targets.get(&edge.target), body.pointer_mut(&edge.pointer))
                {
                    *slot = target.clone();
                }
            }

            match row.kind {
                ResourceKind::Host => {
                    if !reverse.contains_key(&ResourceKind::Instance) {
                        let instances = self.fetch_kind(tenant_id, ResourceKind::Instance).await?;
                        reverse.insert(ResourceKind::Instance, instances);
                    }
                    let instance = reverse.get(&ResourceKind::Instance).and_then(|all| {
                        all.iter().find(|i| {
                            graph::parent_of(ResourceKind::Instance, &i.body).as_deref()
                                == Some(row.id.as_str())
                        })
                    });
                    if let (Some(instance), Some(object)) = (instance, body.as_object_mut()) {
                        object.insert("instance".into(), instance.body.clone());
                    }
                }
                ResourceKind::Workload => {
                    if !reverse.contains_key(&ResourceKind::WorkloadMember) {
                        let members = self
                            .fetch_kind(tenant_id, ResourceKind::WorkloadMember)
                            .await?;
                        reverse.insert(ResourceKind::WorkloadMember, members);
                    }
                    let members: Vec<Value> = reverse
                        .get(&ResourceKind::WorkloadMember)
                        .map(|all| {
                            all.iter()
                                .filter(|m| {
                                    m.body.pointer("/workload/resource_id").and_then(Value::as_str)
                                        == Some(row.id.as_str())
                                })
                                .map(|m| m.body.clone())
                                .collect()
                        })
                        .unwrap_or_default();
                    if let (false, Some(object)) = (members.is_empty(), body.as_object_mut()) {
                        object.insert("members".into(), Value::Array(members));
                    }
                }
                _ => {}
            }

            let mut resource = Resource::from_body(row.kind, body)?;
            resource.set_resource_id(row.id);
            resource.set_timestamps(Some(row.timestamps));
            out.push(resource);
        }

        Ok(out)
    }

    /// Filter, order and slice rows of one kind.
    fn select(
        rows: Vec<Stored>,
        predicate: &Predicate,
        order: &OrderBy,
        offset: u32,
        limit: u32,
    ) -> (Vec<Stored>, u64, bool) {
        let mut matched: Vec<Stored> = rows
            .into_iter()
            .filter(|row| predicate.matches(&row.body))
            .collect();
        if !order.is_empty() {
            matched.sort_by(|a, b| order.compare(&a.body, &b.body));
        }

        let total = matched.len() as u64;
        let start = (offset as usize).min(matched.len());
        let end = if limit == 0 {
            matched.len()
        } else {
            start.saturating_add(limit as usize).min(matched.len())
        };
        let has_next = end < matched.len();
        let page = matched.drain(start..end).collect();
        (page, total, has_next)
    }

    async fn rendered_metadata(&self, tenant_id: Uuid, row: &Stored) -> Result<String, DbError> {
        let mut cache = HashMap::new();
        let chain = self.chain(tenant_id, row.clone(), &mut cache).await?;
        let layers: Vec<&Value> = chain.iter().skip(1).map(|s| &s.body).collect();
        Ok(graph::merge_metadata(&layers)?)
    }
}

impl<C: Connection> InventoryClient for SurrealInventory<C> {
    async fn create(&self, tenant_id: Uuid, resource: Resource) -> InfraResult<Resource> {
        let kind = resource.kind();
        let id = self.allocate_id(kind, ResourceId::generate).await?;
        let id_str = id.to_string();

        let mut body = resource.to_body().map_err(DbError::from)?;
        graph::normalize(kind, &mut body);
        if let Some(object) = body.as_object_mut() {
            object.insert("resource_id".into(), Value::String(id_str.clone()));
        }
        self.check_targets(tenant_id, kind, &body).await?;

        let result = self
            .db
            .query(format!(
                "CREATE type::record('resource', $id) SET \
                 tenant_id = $tenant_id, kind = $kind, body = $body; \
                 {SELECT_COLUMNS} FROM type::record('resource', $id);"
            ))
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("kind", kind.as_str()))
            .bind(("body", body))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Conflict(e.to_string()))?;

        let rows: Vec<ResourceRowWithId> = result.take(1).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::NotFound {
                kind: kind.to_string(),
                id: id_str.clone(),
            })?
            .try_into_stored()?;

        info!(%tenant_id, kind = %kind, id = %id_str, "Created resource");

        let mut hydrated = self.hydrate(tenant_id, vec![row]).await?;
        hydrated.pop().ok_or_else(|| {
            DbError::NotFound {
                kind: kind.to_string(),
                id: id_str,
            }
            .into()
        })
    }

    async fn get(&self, tenant_id: Uuid, id: &ResourceId) -> InfraResult<GetResult> {
        let row = self.fetch_required(tenant_id, id).await?;
        let rendered_metadata = if graph::inherits_metadata(row.kind) {
            Some(self.rendered_metadata(tenant_id, &row).await?)
        } else {
            None
        };

        let resource = self
            .hydrate(tenant_id, vec![row])
            .await?
            .pop()
            .ok_or_else(|| DbError::NotFound {
                kind: id.kind().to_string(),
                id: id.to_string(),
            })?;

        Ok(GetResult {
            resource,
            rendered_metadata,
        })
    }

    async fn list(&self, tenant_id: Uuid, filter: ResourceFilter) -> InfraResult<ListResult> {
        let predicate = Predicate::parse(&filter.filter).map_err(DbError::from)?;
        let order = OrderBy::parse(&filter.order_by).map_err(DbError::from)?;
        let rows = self.fetch_kind(tenant_id, filter.kind).await?;

        let (page, total_elements, has_next) =
            Self::select(rows, &predicate, &order, filter.offset, filter.limit);
        debug!(
            kind = %filter.kind,
            filter = %filter.filter,
            total_elements,
            "Listed resources"
        );

        Ok(ListResult {
            resources: self.hydrate(tenant_id, page).await?,
            total_elements,
            has_next,
        })
    }

    async fn find(&self, tenant_id: Uuid, filter: ResourceFilter) -> InfraResult<FindResult> {
        let predicate = Predicate::parse(&filter.filter).map_err(DbError::from)?;
        let order = OrderBy::parse(&filter.order_by).map_err(DbError::from)?;
        let rows = self.fetch_kind(tenant_id, filter.kind).await?;

        let (page, total_elements, has_next) =
            Self::select(rows, &predicate, &order, filter.offset, filter.limit);
        let resource_ids = page
            .iter()
            .map(|row| ResourceId::parse(&row.id).map_err(DbError::from))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FindResult {
            resource_ids,
            total_elements,
            has_next,
        })
    }

    async fn update(
        &self,
        tenant_id: Uuid,
        id: &ResourceId,
        mask: &FieldMask,
        resource: Resource,
    ) -> InfraResult<Resource> {
        let stored = self.fetch_required(tenant_id, id).await?;
        if resource.kind() != stored.kind {
            return Err(DbError::InvalidArgument(format!(
                "cannot update {} {id} with a {} payload",
                stored.kind,
                resource.kind()
            ))
            .into());
        }

        let mut incoming = resource.to_body().map_err(DbError::from)?;
        let stored_sub_kind = graph::telemetry_sub_kind(stored.kind, &stored.body);
        let incoming_sub_kind = graph::telemetry_sub_kind(stored.kind, &incoming);
        if stored_sub_kind != incoming_sub_kind {
            return Err(DbError::InvalidArgument(format!(
                "cannot update {id} ({}) with a {} payload",
                stored_sub_kind.unwrap_or("unspecified"),
                incoming_sub_kind.unwrap_or("unspecified")
            ))
            .into());
        }

        let writable = graph::writable_fields(stored.kind);
        if let Some(unknown) = mask.paths().iter().find(|p| !writable.contains(&p.as_str())) {
            return Err(DbError::InvalidArgument(format!(
                "field {unknown:?} cannot be updated on a {}",
                stored.kind
            ))
            .into());
        }

        graph::normalize(stored.kind, &mut incoming);

        let mut body = stored.body;
        if let Some(object) = body.as_object_mut() {
            for path in mask.paths() {
                match incoming.get(path.as_str()) {
                    Some(value) => {
                        object.insert(path.clone(), value.clone());
                    }
                    None => {
                        object.remove(path.as_str());
                    }
                }
            }
        }
        self.check_targets(tenant_id, stored.kind, &body).await?;

        let result = self
            .db
            .query(format!(
                "UPDATE type::record('resource', $id) SET \
                 body = $body, updated_at = time::now() \
                 WHERE tenant_id = $tenant_id; \
                 {SELECT_COLUMNS} FROM type::record('resource', $id) \
                 WHERE tenant_id = $tenant_id;"
            ))
            .bind(("id", id.to_string()))
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("body", body))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Conflict(e.to_string()))?;

        let rows: Vec<ResourceRowWithId> = result.take(1).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::NotFound {
                kind: id.kind().to_string(),
                id: id.to_string(),
            })?
            .try_into_stored()?;

        info!(%tenant_id, id = %id, fields = ?mask.paths(), "Updated resource");

        self.hydrate(tenant_id, vec![row]).await?.pop().ok_or_else(|| {
            DbError::NotFound {
                kind: id.kind().to_string(),
                id: id.to_string(),
            }
            .into()
        })
    }

    async fn delete(&self, tenant_id: Uuid, id: &ResourceId) -> InfraResult<()> {
        self.fetch_required(tenant_id, id).await?;

        let referrer = self.fetch_all(tenant_id).await?.into_iter().find(|row| {
            graph::edges(row.kind, &row.body)
                .iter()
                .any(|edge| edge.target == id.as_str())
        });
        if let Some(referrer) = referrer {
            return Err(DbError::Conflict(format!(
                "{id} is still referenced by {}",
                referrer.id
            ))
            .into());
        }

        self.db
            .query("DELETE type::record('resource', $id) WHERE tenant_id = $tenant_id")
            .bind(("id", id.to_string()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Conflict(e.to_string()))?;

        info!(%tenant_id, id = %id, "Deleted resource");
        Ok(())
    }

    async fn get_tree_hierarchy(
        &self,
        tenant_id: Uuid,
        ids: &[ResourceId],
        descending: bool,
    ) -> InfraResult<Vec<TreeNode>> {
        let mut cache = HashMap::new();
        let mut seen = HashSet::new();
        let mut nodes: Vec<(usize, TreeNode)> = Vec::new();

        for id in ids {
            let start = self.fetch_required(tenant_id, id).await?;
            let chain = self.chain(tenant_id, start, &mut cache).await?;
            let chain_ids = chain
                .iter()
                .map(|s| ResourceId::parse(&s.id))
                .collect::<Result<Vec<_>, _>>()
                .map_err(DbError::from)?;

            for (i, stored) in chain.iter().enumerate() {
                if !seen.insert(stored.id.clone()) {
                    continue;
                }
                let depth = chain.len() - 1 - i;
                nodes.push((
                    depth,
                    TreeNode {
                        current: chain_ids[i].clone(),
                        parents: chain_ids.get(i + 1).cloned().into_iter().collect(),
                        name: stored
                            .body
                            .get("name")
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_owned(),
                    },
                ));
            }
        }

        if descending {
            nodes.sort_by_key(|(depth, _)| *depth);
        } else {
            nodes.sort_by_key(|(depth, _)| std::cmp::Reverse(*depth));
        }
        Ok(nodes.into_iter().map(|(_, node)| node).collect())
    }

    async fn get_sites_per_region(
        &self,
        tenant_id: Uuid,
        region_ids: &[ResourceId],
    ) -> InfraResult<HashMap<ResourceId, u32>> {
        let mut counts: HashMap<ResourceId, u32> =
            region_ids.iter().map(|id| (id.clone(), 0)).collect();

        for site in self.fetch_kind(tenant_id, ResourceKind::Site).await? {
            let Some(region) = graph::parent_of(ResourceKind::Site, &site.body) else {
                continue;
            };
            let Ok(region) = ResourceId::parse(&region) else {
                continue;
            };
            if let Some(count) = counts.get_mut(&region) {
                *count += 1;
            }
        }
        Ok(counts)
    }

    async fn list_inherited_telemetry_profiles(
        &self,
        tenant_id: Uuid,
        query: InheritedProfilesQuery,
    ) -> InfraResult<ListResult<TelemetryProfileResource>> {
        let predicate = Predicate::parse(&query.filter).map_err(DbError::from)?;
        let order = OrderBy::parse(&query.order_by).map_err(DbError::from)?;

        let anchor = self.fetch_required(tenant_id, &query.anchor).await?;
        let mut cache = HashMap::new();
        let scope: HashSet<String> = self
            .chain(tenant_id, anchor, &mut cache)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();

        let profiles: Vec<Stored> = self
            .fetch_kind(tenant_id, ResourceKind::TelemetryProfile)
            .await?
            .into_iter()
            .filter(|p| {
                graph::edges(ResourceKind::TelemetryProfile, &p.body)
                    .iter()
                    .any(|e| e.pointer.starts_with("/relation/") && scope.contains(&e.target))
            })
            .collect();

        let (page, total_elements, has_next) =
            Self::select(profiles, &predicate, &order, query.offset, query.limit);

        let resources = self
            .hydrate(tenant_id, page)
            .await?
            .into_iter()
            .filter_map(|r| match r {
                Resource::TelemetryProfile(p) => Some(p),
                _ => None,
            })
            .collect();

        Ok(ListResult {
            resources,
            total_elements,
            has_next,
        })
    }
}
