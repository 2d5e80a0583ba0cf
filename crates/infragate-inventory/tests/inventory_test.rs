//! Integration tests for the SurrealDB inventory backend using in-memory
//! SurrealDB.

use infragate_core::error::InfraError;
use infragate_core::field_mask::FieldMask;
use infragate_core::id::{ResourceId, ResourceKind};
use infragate_core::inventory::{InheritedProfilesQuery, InventoryClient, ResourceFilter};
use infragate_core::models::enums::{SeverityLevel, TelemetryKind};
use infragate_core::models::{
    HostResource, InstanceResource, ProfileTarget, RegionResource, Resource, SiteResource,
    TelemetryGroupResource, TelemetryProfileResource, WorkloadMemberResource, WorkloadResource,
};
use infragate_inventory::SurrealInventory;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

async fn setup() -> (SurrealInventory<Db>, Uuid) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    infragate_inventory::run_migrations(&db).await.unwrap();
    (SurrealInventory::new(db), Uuid::new_v4())
}

fn id_of(resource: &Resource) -> ResourceId {
    ResourceId::parse(resource.resource_id()).unwrap()
}

async fn region(
    inv: &SurrealInventory<Db>,
    tenant: Uuid,
    name: &str,
    parent: Option<&ResourceId>,
    metadata: &str,
) -> ResourceId {
    let created = inv
        .create(
            tenant,
            RegionResource {
                name: name.into(),
                parent_region: parent.map(|p| RegionResource::stub(p.as_str())),
                metadata: metadata.into(),
                ..Default::default()
            }
            .into(),
        )
        .await
        .unwrap();
    id_of(&created)
}

async fn site(
    inv: &SurrealInventory<Db>,
    tenant: Uuid,
    name: &str,
    region: &ResourceId,
) -> ResourceId {
    let created = inv
        .create(
            tenant,
            SiteResource {
                name: name.into(),
                region: Some(RegionResource::stub(region.as_str())),
                ..Default::default()
            }
            .into(),
        )
        .await
        .unwrap();
    id_of(&created)
}

#[tokio::test]
async fn create_assigns_id_and_timestamps() {
    let (inv, tenant) = setup().await;

    let created = inv
        .create(
            tenant,
            RegionResource {
                name: "emea".into(),
                ..Default::default()
            }
            .into(),
        )
        .await
        .unwrap();

    let id = id_of(&created);
    assert_eq!(id.kind(), ResourceKind::Region);
    assert!(created.timestamps().is_some());
    assert_eq!(created.name(), "emea");
}

#[tokio::test]
async fn get_populates_edges_one_level() {
    let (inv, tenant) = setup().await;
    let root = region(&inv, tenant, "root", None, "").await;
    let child = region(&inv, tenant, "child", Some(&root), "").await;
    let s1 = site(&inv, tenant, "s1", &child).await;

    let got = inv.get(tenant, &s1).await.unwrap();
    let Resource::Site(site) = got.resource else {
        panic!("expected a site");
    };
    let region = site.region.expect("region edge populated");
    assert_eq!(region.resource_id, child.as_str());
    assert_eq!(region.name, "child");
    // The region's own parent stays a stub.
    let parent = region.parent_region.expect("parent stub");
    assert_eq!(parent.resource_id, root.as_str());
    assert!(parent.name.is_empty());
}

#[tokio::test]
async fn create_rejects_dangling_edges() {
    let (inv, tenant) = setup().await;

    let err = inv
        .create(
            tenant,
            SiteResource {
                name: "orphan".into(),
                region: Some(RegionResource::stub("region-deadbeef")),
                ..Default::default()
            }
            .into(),
        )
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn get_is_tenant_scoped() {
    let (inv, tenant) = setup().await;
    let r = region(&inv, tenant, "r", None, "").await;

    let err = inv.get(Uuid::new_v4(), &r).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn list_filters_orders_and_pages() {
    let (inv, tenant) = setup().await;
    for i in 0..10 {
        region(&inv, tenant, &format!("region-{i:02}"), None, "").await;
    }

    let page = inv
        .list(
            tenant,
            ResourceFilter::new(ResourceKind::Region)
                .with_order_by("name desc")
                .with_page(0, 4),
        )
        .await
        .unwrap();
    assert_eq!(page.resources.len(), 4);
    assert_eq!(page.total_elements, 10);
    assert!(page.has_next);
    assert_eq!(page.resources[0].name(), "region-09");

    let tail = inv
        .list(
            tenant,
            ResourceFilter::new(ResourceKind::Region).with_page(8, 4),
        )
        .await
        .unwrap();
    assert_eq!(tail.resources.len(), 2);
    assert!(!tail.has_next);

    let named = inv
        .list(
            tenant,
            ResourceFilter::new(ResourceKind::Region).with_filter(r#"name = "*-0*""#),
        )
        .await
        .unwrap();
    assert_eq!(named.total_elements, 10);
}

#[tokio::test]
async fn list_by_edge_and_absence() {
    let (inv, tenant) = setup().await;
    let r = region(&inv, tenant, "r", None, "").await;
    let s = site(&inv, tenant, "s", &r).await;
    inv.create(
        tenant,
        HostResource {
            name: "placed".into(),
            site: Some(SiteResource::stub(s.as_str())),
            ..Default::default()
        }
        .into(),
    )
    .await
    .unwrap();
    inv.create(
        tenant,
        HostResource {
            name: "floating".into(),
            ..Default::default()
        }
        .into(),
    )
    .await
    .unwrap();

    let at_site = inv
        .find(
            tenant,
            ResourceFilter::new(ResourceKind::Host)
                .with_filter(format!(r#"site.resource_id = "{s}""#)),
        )
        .await
        .unwrap();
    assert_eq!(at_site.total_elements, 1);

    let unplaced = inv
        .list(
            tenant,
            ResourceFilter::new(ResourceKind::Host).with_filter("NOT has(site)"),
        )
        .await
        .unwrap();
    assert_eq!(unplaced.resources.len(), 1);
    assert_eq!(unplaced.resources[0].name(), "floating");
}

#[tokio::test]
async fn malformed_filter_is_a_validation_error() {
    let (inv, tenant) = setup().await;
    let err = inv
        .list(
            tenant,
            ResourceFilter::new(ResourceKind::Host).with_filter("name = "),
        )
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn update_applies_only_masked_fields() {
    let (inv, tenant) = setup().await;
    let r1 = region(&inv, tenant, "r1", None, "").await;
    let s = site(&inv, tenant, "before", &r1).await;

    let replacement = SiteResource {
        name: "after".into(),
        address: "ignored".into(),
        ..Default::default()
    };
    let updated = inv
        .update(
            tenant,
            &s,
            &FieldMask::new(["name", "region"]),
            replacement.into(),
        )
        .await
        .unwrap();

    let Resource::Site(updated) = updated else {
        panic!("expected a site");
    };
    assert_eq!(updated.name, "after");
    assert!(updated.address.is_empty());
    // Masked but absent edge is cleared.
    assert!(updated.region.is_none());
    let stamps = updated.timestamps.unwrap();
    assert!(stamps.updated_at >= stamps.created_at);
}

#[tokio::test]
async fn update_rejects_unknown_paths() {
    let (inv, tenant) = setup().await;
    let r = region(&inv, tenant, "r", None, "").await;

    let err = inv
        .update(
            tenant,
            &r,
            &FieldMask::new(["resource_id"]),
            RegionResource::default().into(),
        )
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn delete_refuses_referenced_resources() {
    let (inv, tenant) = setup().await;
    let r = region(&inv, tenant, "r", None, "").await;
    let s = site(&inv, tenant, "s", &r).await;

    let err = inv.delete(tenant, &r).await.unwrap_err();
    assert!(matches!(err, InfraError::Backend(_)));

    inv.delete(tenant, &s).await.unwrap();
    inv.delete(tenant, &r).await.unwrap();
    assert!(inv.get(tenant, &r).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn reverse_edges_are_derived_on_read() {
    let (inv, tenant) = setup().await;
    let host = id_of(
        &inv.create(
            tenant,
            HostResource {
                name: "h".into(),
                ..Default::default()
            }
            .into(),
        )
        .await
        .unwrap(),
    );
    let instance = id_of(
        &inv.create(
            tenant,
            InstanceResource {
                name: "i".into(),
                host: Some(HostResource::stub(host.as_str())),
                ..Default::default()
            }
            .into(),
        )
        .await
        .unwrap(),
    );
    let workload = id_of(
        &inv.create(
            tenant,
            WorkloadResource {
                name: "w".into(),
                ..Default::default()
            }
            .into(),
        )
        .await
        .unwrap(),
    );
    inv.create(
        tenant,
        WorkloadMemberResource {
            workload: Some(WorkloadResource::stub(workload.as_str())),
            instance: Some(InstanceResource::stub(instance.as_str())),
            ..Default::default()
        }
        .into(),
    )
    .await
    .unwrap();

    let Resource::Host(h) = inv.get(tenant, &host).await.unwrap().resource else {
        panic!("expected a host");
    };
    assert_eq!(h.instance.unwrap().resource_id, instance.as_str());

    let Resource::Workload(w) = inv.get(tenant, &workload).await.unwrap().resource else {
        panic!("expected a workload");
    };
    assert_eq!(w.members.len(), 1);
}

#[tokio::test]
async fn tree_hierarchy_lists_ancestors_once() {
    let (inv, tenant) = setup().await;
    let r1 = region(&inv, tenant, "r1", None, "").await;
    let r2 = region(&inv, tenant, "r2", Some(&r1), "").await;
    let s1 = site(&inv, tenant, "s1", &r2).await;

    let nodes = inv
        .get_tree_hierarchy(tenant, &[r2.clone(), s1.clone()], true)
        .await
        .unwrap();

    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes[0].current, r1);
    assert!(nodes[0].parents.is_empty());
    let site_node = nodes.iter().find(|n| n.current == s1).unwrap();
    assert_eq!(site_node.parents, vec![r2.clone()]);
    assert_eq!(site_node.name, "s1");
}

#[tokio::test]
async fn sites_are_counted_per_region() {
    let (inv, tenant) = setup().await;
    let r1 = region(&inv, tenant, "r1", None, "").await;
    let r2 = region(&inv, tenant, "r2", None, "").await;
    site(&inv, tenant, "a", &r1).await;
    site(&inv, tenant, "b", &r1).await;

    let counts = inv
        .get_sites_per_region(tenant, &[r1.clone(), r2.clone()])
        .await
        .unwrap();
    assert_eq!(counts[&r1], 2);
    assert_eq!(counts[&r2], 0);
}

#[tokio::test]
async fn inherited_metadata_prefers_nearest_ancestor() {
    let (inv, tenant) = setup().await;
    let root = region(
        &inv,
        tenant,
        "root",
        None,
        r#"[{"key":"zone","value":"far"},{"key":"app","value":"x"}]"#,
    )
    .await;
    let child = region(
        &inv,
        tenant,
        "child",
        Some(&root),
        r#"[{"key":"zone","value":"near"}]"#,
    )
    .await;
    let s = site(&inv, tenant, "s", &child).await;

    let got = inv.get(tenant, &s).await.unwrap();
    assert_eq!(
        got.rendered_metadata.as_deref(),
        Some(r#"[{"key":"zone","value":"near"},{"key":"app","value":"x"}]"#)
    );

    let root_get = inv.get(tenant, &root).await.unwrap();
    assert_eq!(root_get.rendered_metadata.as_deref(), Some(""));
}

#[tokio::test]
async fn inherited_profiles_follow_the_location_chain() {
    let (inv, tenant) = setup().await;
    let r = region(&inv, tenant, "r", None, "").await;
    let s = site(&inv, tenant, "s", &r).await;
    let other = region(&inv, tenant, "other", None, "").await;

    let group = id_of(
        &inv.create(
            tenant,
            TelemetryGroupResource {
                name: "logs".into(),
                kind: TelemetryKind::Logs,
                ..Default::default()
            }
            .into(),
        )
        .await
        .unwrap(),
    );

    for target in [
        ProfileTarget::Region(RegionResource::stub(r.as_str())),
        ProfileTarget::Site(SiteResource::stub(s.as_str())),
        ProfileTarget::Region(RegionResource::stub(other.as_str())),
    ] {
        inv.create(
            tenant,
            TelemetryProfileResource {
                kind: TelemetryKind::Logs,
                relation: Some(target),
                group: Some(TelemetryGroupResource::stub(group.as_str())),
                log_level: SeverityLevel::Warn,
                ..Default::default()
            }
            .into(),
        )
        .await
        .unwrap();
    }

    let inherited = inv
        .list_inherited_telemetry_profiles(
            tenant,
            InheritedProfilesQuery {
                anchor: s,
                filter: String::new(),
                order_by: String::new(),
                limit: 10,
                offset: 0,
            },
        )
        .await
        .unwrap();
    assert_eq!(inherited.total_elements, 2);
    assert!(!inherited.has_next);
    assert!(inherited.resources.iter().all(|p| {
        p.group
            .as_ref()
            .is_some_and(|g| g.name == "logs")
    }));
}

async fn telemetry_group(
    inv: &SurrealInventory<Db>,
    tenant: Uuid,
    name: &str,
    kind: TelemetryKind,
) -> ResourceId {
    let created = inv
        .create(
            tenant,
            TelemetryGroupResource {
                name: name.into(),
                kind,
                ..Default::default()
            }
            .into(),
        )
        .await
        .unwrap();
    id_of(&created)
}

fn profile(kind: TelemetryKind, target: &ResourceId, group: &ResourceId) -> Resource {
    TelemetryProfileResource {
        kind,
        relation: Some(ProfileTarget::Region(RegionResource::stub(target.as_str()))),
        group: Some(TelemetryGroupResource::stub(group.as_str())),
        ..Default::default()
    }
    .into()
}

fn profile_filter() -> ResourceFilter {
    ResourceFilter::new(ResourceKind::TelemetryProfile).with_page(0, 10)
}

#[tokio::test]
async fn profile_group_must_share_sub_kind() {
    let (inv, tenant) = setup().await;
    let r = region(&inv, tenant, "r", None, "").await;
    let logs = telemetry_group(&inv, tenant, "syslog", TelemetryKind::Logs).await;
    let metrics = telemetry_group(&inv, tenant, "cpu", TelemetryKind::Metrics).await;

    let err = inv
        .create(tenant, profile(TelemetryKind::Logs, &r, &metrics))
        .await
        .unwrap_err();
    assert!(err.is_validation(), "{err}");
    let listed = inv.list(tenant, profile_filter()).await.unwrap();
    assert_eq!(listed.total_elements, 0);

    let created = inv
        .create(tenant, profile(TelemetryKind::Logs, &r, &logs))
        .await
        .unwrap();
    let id = id_of(&created);

    // Repointing the profile at a metrics group is refused and not written.
    let err = inv
        .update(
            tenant,
            &id,
            &FieldMask::new(["group"]),
            profile(TelemetryKind::Logs, &r, &metrics),
        )
        .await
        .unwrap_err();
    assert!(err.is_validation(), "{err}");
    let stored = inv.get(tenant, &id).await.unwrap().resource;
    let Resource::TelemetryProfile(stored) = stored else {
        panic!("expected a telemetry profile");
    };
    assert_eq!(stored.group.unwrap().resource_id, logs.as_str());
}

#[tokio::test]
async fn update_keeps_telemetry_sub_kind() {
    let (inv, tenant) = setup().await;
    let r = region(&inv, tenant, "r", None, "").await;
    let logs = telemetry_group(&inv, tenant, "syslog", TelemetryKind::Logs).await;
    let metrics = telemetry_group(&inv, tenant, "cpu", TelemetryKind::Metrics).await;
    let id = id_of(
        &inv.create(tenant, profile(TelemetryKind::Metrics, &r, &metrics))
            .await
            .unwrap(),
    );

    let err = inv
        .update(
            tenant,
            &id,
            &FieldMask::new(["relation", "group", "log_level"]),
            profile(TelemetryKind::Logs, &r, &logs),
        )
        .await
        .unwrap_err();
    assert!(err.is_validation(), "{err}");

    let Resource::TelemetryProfile(stored) = inv.get(tenant, &id).await.unwrap().resource else {
        panic!("expected a telemetry profile");
    };
    assert_eq!(stored.kind, TelemetryKind::Metrics);
    assert_eq!(stored.group.unwrap().resource_id, metrics.as_str());

    // Groups cannot switch sub-kind either.
    let err = inv
        .update(
            tenant,
            &logs,
            &FieldMask::new(["name"]),
            TelemetryGroupResource {
                name: "renamed".into(),
                kind: TelemetryKind::Metrics,
                ..Default::default()
            }
            .into(),
        )
        .await
        .unwrap_err();
    assert!(err.is_validation(), "{err}");
}
