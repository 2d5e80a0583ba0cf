//! The location hierarchy query.
//!
//! Regions and sites whose name contains the search term are found with
//! one capped query per kind, then annotated with their ancestors through a
//! single tree request. Any backend failure aborts the whole query.

use std::time::Duration;

use infragate_core::error::InfraResult;
use infragate_core::id::{ResourceId, ResourceKind};
use infragate_core::inventory::{InventoryClient, ResourceFilter, TreeNode};
use infragate_core::query;
use tracing::{debug, warn};

use crate::config::AdapterConfig;
use crate::context::RequestContext;
use crate::error::ConvertError;
use crate::page::narrow;
use crate::presence;
use crate::wire::{LocationNode, LocationType, LocationsQuery, LocationsResponse};

fn location_type(kind: ResourceKind) -> Option<LocationType> {
    match kind {
        ResourceKind::Region => Some(LocationType::Region),
        ResourceKind::Site => Some(LocationType::Site),
        _ => None,
    }
}

fn count(field: &'static str, n: usize) -> Result<i32, ConvertError> {
    i32::try_from(n).map_err(|_| ConvertError::Overflow {
        field,
        value: i128::try_from(n).unwrap_or(i128::MAX),
    })
}

/// Validated search parameters.
fn requested_kinds(query: &LocationsQuery) -> Result<(&str, Vec<ResourceKind>), ConvertError> {
    let Some(name) = presence::classify(query.name.as_deref()).value() else {
        return Err(ConvertError::MissingField("name"));
    };
    let mut kinds = Vec::with_capacity(2);
    if query.show_regions == Some(true) {
        kinds.push(ResourceKind::Region);
    }
    if query.show_sites == Some(true) {
        kinds.push(ResourceKind::Site);
    }
    if kinds.is_empty() {
        return Err(ConvertError::MissingRelation {
            fields: vec!["showRegions", "showSites"],
        });
    }
    Ok((name, kinds))
}

/// Project backend tree nodes onto regions and sites.
///
/// A node's parent is the first region or site among its direct parents.
/// The backend never reports more than one today; if it does, the first
/// wins and the ambiguity is logged.
pub fn project_tree(nodes: Vec<TreeNode>) -> Vec<LocationNode> {
    nodes
        .into_iter()
        .filter_map(|node| {
            let node_type = location_type(node.current.kind())?;
            let parents: Vec<&ResourceId> = node
                .parents
                .iter()
                .filter(|p| location_type(p.kind()).is_some())
                .collect();
            if parents.len() > 1 {
                warn!(
                    node = %node.current,
                    parents = ?parents.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
                    "location has more than one region or site parent, using the first"
                );
            }
            let parent_id = parents
                .first()
                .map(|p| p.as_str().to_owned())
                .unwrap_or_default();
            Some(LocationNode {
                resource_id: node.current.as_str().to_owned(),
                name: node.name,
                parent_id,
                node_type,
            })
        })
        .collect()
}

pub async fn list_locations<I: InventoryClient>(
    client: &I,
    ctx: &RequestContext,
    config: &AdapterConfig,
    query: &LocationsQuery,
) -> InfraResult<LocationsResponse> {
    let (name, kinds) = requested_kinds(query)?;
    let fallback = Duration::from_secs(config.backend_timeout_secs);
    let pattern = format!("name = {}", query::quote(&format!("*{name}*")));

    let mut ids: Vec<ResourceId> = Vec::new();
    let mut total: u64 = 0;
    for kind in kinds {
        let filter = ResourceFilter::new(kind)
            .with_filter(pattern.clone())
            .with_page(0, config.max_location_results);
        debug!(%kind, pattern = %pattern, "finding locations");
        let found = ctx
            .call("find", fallback, client.find(ctx.tenant_id, filter))
            .await?;
        total = total.saturating_add(found.total_elements);
        ids.extend(found.resource_ids);
    }

    let total_elements: i32 = narrow("totalElements", total)?;
    let output_elements = count("outputElements", ids.len())?;
    if ids.is_empty() {
        return Ok(LocationsResponse {
            nodes: Vec::new(),
            total_elements,
            output_elements,
        });
    }

    debug!(ids = ids.len(), "resolving location ancestors");
    let tree = ctx
        .call(
            "get_tree_hierarchy",
            fallback,
            client.get_tree_hierarchy(ctx.tenant_id, &ids, true),
        )
        .await?;

    Ok(LocationsResponse {
        nodes: project_tree(tree),
        total_elements,
        output_elements,
    })
}
